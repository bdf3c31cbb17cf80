//! Normalization stage implementations
//!
//! Stages are listed in execution order. Each later stage only acts on
//! programmes the earlier ones left unresolved.

pub mod series_category;
pub mod description_episode;
pub mod date_episode;
pub mod default_episode;

pub use date_episode::DateEpisodeStage;
pub use default_episode::DefaultEpisodeStage;
pub use description_episode::DescriptionEpisodeStage;
pub use series_category::SeriesCategoryStage;
