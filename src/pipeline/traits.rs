//! Pipeline Traits
//!
//! Every normalization pass implements [`PipelineStage`]. Stages mutate the
//! document in place and report how many programmes (or elements) they changed;
//! they never fail, malformed input is simply left alone.

use crate::pipeline::stage_names;
use crate::xmltv::Document;

/// The normalization passes a stage can implement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    SeriesCategory,
    DescriptionEpisode,
    DateEpisode,
    DefaultEpisode,
}

impl StageKind {
    pub fn stage_id(self) -> &'static str {
        match self {
            Self::SeriesCategory => stage_names::SERIES_CATEGORY,
            Self::DescriptionEpisode => stage_names::DESCRIPTION_EPISODE,
            Self::DateEpisode => stage_names::DATE_EPISODE,
            Self::DefaultEpisode => stage_names::DEFAULT_EPISODE,
        }
    }
}

/// Trait for normalization stages executed in sequence
pub trait PipelineStage {
    /// Which pass this stage performs
    fn kind(&self) -> StageKind;

    /// Get the unique identifier for this stage
    fn stage_id(&self) -> &'static str {
        self.kind().stage_id()
    }

    /// Get the human-readable name for this stage
    fn stage_name(&self) -> &'static str;

    /// Apply the stage to `document`, returning the number of modifications
    fn execute(&mut self, document: &mut Document) -> usize;
}
