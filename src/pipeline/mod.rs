//! XMLTV normalization pipeline
//!
//! - **Stages**: the four normalization passes (series category, description
//!   episode inference, date episode fallback, episode default)
//! - **Orchestrator**: runs the stages in order and summarizes their counts
//! - **Season/episode**: free-text matchers used by the description stage

pub mod orchestrator;
pub mod season_episode;
pub mod stages;
pub mod traits;

pub use orchestrator::{NormalizationPipeline, NormalizationSummary, normalize};
pub use season_episode::{SeasonEpisode, parse_season_episode};
pub use stages::{
    DateEpisodeStage, DefaultEpisodeStage, DescriptionEpisodeStage, SeriesCategoryStage,
};
pub use traits::{PipelineStage, StageKind};

/// Pipeline stage names for consistent naming across the system
pub mod stage_names {
    pub const SERIES_CATEGORY: &str = "series_category";
    pub const DESCRIPTION_EPISODE: &str = "description_episode";
    pub const DATE_EPISODE: &str = "date_episode";
    pub const DEFAULT_EPISODE: &str = "default_episode";
}
