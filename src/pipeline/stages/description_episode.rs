//! Description-based episode numbering stage
//!
//! Mines each programme's first `<desc>` for a season/episode pair and writes
//! the zero-based `xmltv_ns` value. A populated `xmltv_ns` episode-num is
//! never overwritten; an empty one is filled, a missing one is created.

use tracing::{debug, trace};

use crate::pipeline::season_episode::parse_season_episode;
use crate::pipeline::traits::{PipelineStage, StageKind};
use crate::xmltv::Document;
use crate::xmltv::tags::{
    DESC, EPISODE_NUM, PROGRAMME, find_xmltv_ns_episode, new_xmltv_ns_episode, tag_qualifier,
};

#[derive(Debug, Default)]
pub struct DescriptionEpisodeStage;

impl DescriptionEpisodeStage {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineStage for DescriptionEpisodeStage {
    fn kind(&self) -> StageKind {
        StageKind::DescriptionEpisode
    }

    fn stage_name(&self) -> &'static str {
        "Description Episode Inference"
    }

    fn execute(&mut self, document: &mut Document) -> usize {
        let (programme_tag, desc_tag, episode_num_tag) = {
            let qualify = tag_qualifier(&document.root.name);
            (qualify(PROGRAMME), qualify(DESC), qualify(EPISODE_NUM))
        };

        let mut inferred = 0;
        document
            .root
            .visit_descendants_mut(&programme_tag, &mut |programme| {
                let existing = find_xmltv_ns_episode(programme, &episode_num_tag);

                let description = programme
                    .find_child(&desc_tag)
                    .map(|desc| desc.text())
                    .unwrap_or_default();
                let Some(season_episode) = parse_season_episode(description) else {
                    trace!("No season/episode in description: {:?}", description);
                    return;
                };
                let value = season_episode.to_xmltv_ns();

                match existing {
                    None => {
                        programme.append(new_xmltv_ns_episode(&episode_num_tag, &value));
                    }
                    Some(index) => {
                        let episode = &mut programme.children[index];
                        if !episode.text().trim().is_empty() {
                            return;
                        }
                        episode.set_text(value.as_str());
                    }
                }
                debug!(
                    "Inferred xmltv_ns {} from description for programme start={:?}",
                    value,
                    programme.attribute("start")
                );
                inferred += 1;
            });
        inferred
    }
}
