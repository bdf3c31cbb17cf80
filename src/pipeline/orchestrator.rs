//! Pipeline orchestration
//!
//! Runs the normalization stages over a document in their fixed order and
//! collects the per-stage modification counts.

use std::fmt;
use std::time::Instant;

use tracing::{info, warn};

use crate::pipeline::stages::{
    DateEpisodeStage, DefaultEpisodeStage, DescriptionEpisodeStage, SeriesCategoryStage,
};
use crate::pipeline::traits::{PipelineStage, StageKind};
use crate::xmltv::Document;
use crate::xmltv::tags::{PROGRAMME, tag_qualifier};

/// Modification counts of one full pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizationSummary {
    pub series_categories_added: usize,
    pub episodes_from_description: usize,
    pub episodes_from_date: usize,
    pub episodes_defaulted: usize,
}

impl NormalizationSummary {
    fn record(&mut self, kind: StageKind, modified: usize) {
        let counter = match kind {
            StageKind::SeriesCategory => &mut self.series_categories_added,
            StageKind::DescriptionEpisode => &mut self.episodes_from_description,
            StageKind::DateEpisode => &mut self.episodes_from_date,
            StageKind::DefaultEpisode => &mut self.episodes_defaulted,
        };
        *counter += modified;
    }

    /// Whether the run changed anything at all
    pub fn is_unchanged(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for NormalizationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "added 'series' to {} programme(s); \
             inferred S/E from description on {} programme(s); \
             date-based fallback applied on {} programme(s); \
             set xmltv_ns episode-num to 0.0.0 on {} element(s)",
            self.series_categories_added,
            self.episodes_from_description,
            self.episodes_from_date,
            self.episodes_defaulted
        )
    }
}

/// Ordered set of normalization stages
pub struct NormalizationPipeline {
    stages: Vec<Box<dyn PipelineStage>>,
}

impl Default for NormalizationPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl NormalizationPipeline {
    /// The standard four-stage pipeline
    pub fn new() -> Self {
        Self {
            stages: vec![
                Box::new(SeriesCategoryStage::new()),
                Box::new(DescriptionEpisodeStage::new()),
                Box::new(DateEpisodeStage::new()),
                Box::new(DefaultEpisodeStage::new()),
            ],
        }
    }

    /// Stage identifiers in execution order
    pub fn stage_ids(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.stage_id()).collect()
    }

    /// Run every stage over `document` in order
    pub fn run(&mut self, document: &mut Document) -> NormalizationSummary {
        let pipeline_start = Instant::now();
        let programme_tag = tag_qualifier(&document.root.name)(PROGRAMME);
        let programmes = document.root.count_descendants(&programme_tag);
        if programmes == 0 {
            warn!("Document contains no <{}> elements", programme_tag);
        }
        info!("Normalizing {} programmes", programmes);

        let mut summary = NormalizationSummary::default();
        for stage in self.stages.iter_mut() {
            let stage_start = Instant::now();
            let modified = stage.execute(document);
            info!(
                "Stage '{}' completed: modified={} duration={:?}",
                stage.stage_name(),
                modified,
                stage_start.elapsed()
            );
            summary.record(stage.kind(), modified);
        }

        info!(
            "Normalization completed in {:?}: {}",
            pipeline_start.elapsed(),
            summary
        );
        summary
    }
}

/// Run the standard pipeline over `document`
pub fn normalize(document: &mut Document) -> NormalizationSummary {
    NormalizationPipeline::new().run(document)
}
