//! Episode-number default filler
//!
//! Last stage of the pipeline: any `xmltv_ns` episode-num still holding
//! blank text, wherever it sits in the tree, is set to `0.0.0`.

use tracing::debug;

use crate::pipeline::traits::{PipelineStage, StageKind};
use crate::xmltv::Document;
use crate::xmltv::tags::{EPISODE_NUM, is_xmltv_ns_episode, tag_qualifier};

pub const DEFAULT_XMLTV_NS: &str = "0.0.0";

#[derive(Debug, Default)]
pub struct DefaultEpisodeStage;

impl DefaultEpisodeStage {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineStage for DefaultEpisodeStage {
    fn kind(&self) -> StageKind {
        StageKind::DefaultEpisode
    }

    fn stage_name(&self) -> &'static str {
        "Episode Number Default"
    }

    fn execute(&mut self, document: &mut Document) -> usize {
        let episode_num_tag = tag_qualifier(&document.root.name)(EPISODE_NUM);

        let mut filled = 0;
        document
            .root
            .visit_descendants_mut(&episode_num_tag, &mut |episode| {
                if is_xmltv_ns_episode(episode, &episode_num_tag) && episode.text().trim().is_empty() {
                    episode.set_text(DEFAULT_XMLTV_NS);
                    filled += 1;
                }
            });
        if filled > 0 {
            debug!("Defaulted {} empty xmltv_ns episode numbers to {}", filled, DEFAULT_XMLTV_NS);
        }
        filled
    }
}
