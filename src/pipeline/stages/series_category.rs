//! Series category stage
//!
//! Guarantees every programme carries at least one `<category>`. Programmes
//! without any get `<category lang="en">series</category>` appended; existing
//! categories are never touched.

use tracing::debug;

use crate::pipeline::traits::{PipelineStage, StageKind};
use crate::xmltv::Document;
use crate::xmltv::document::Element;
use crate::xmltv::tags::{CATEGORY, PROGRAMME, tag_qualifier};

pub const SERIES_CATEGORY: &str = "series";
pub const SERIES_CATEGORY_LANG: &str = "en";

#[derive(Debug, Default)]
pub struct SeriesCategoryStage;

impl SeriesCategoryStage {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineStage for SeriesCategoryStage {
    fn kind(&self) -> StageKind {
        StageKind::SeriesCategory
    }

    fn stage_name(&self) -> &'static str {
        "Series Category"
    }

    fn execute(&mut self, document: &mut Document) -> usize {
        let (programme_tag, category_tag) = {
            let qualify = tag_qualifier(&document.root.name);
            (qualify(PROGRAMME), qualify(CATEGORY))
        };

        let mut added = 0;
        document
            .root
            .visit_descendants_mut(&programme_tag, &mut |programme| {
                if programme.children_named(&category_tag).next().is_some() {
                    return;
                }
                programme.append(
                    Element::new(category_tag.clone())
                        .with_attribute("lang", SERIES_CATEGORY_LANG)
                        .with_text(SERIES_CATEGORY),
                );
                debug!(
                    "Added series category to programme start={:?}",
                    programme.attribute("start")
                );
                added += 1;
            });
        added
    }
}
