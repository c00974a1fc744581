use crate::harvest::hierarchy::CategoryTree;
use crate::harvest::pipeline::{fetch_categories, HarvestStats, StopReason};
use crate::progress::Progress;
use crate::report::{save_categories, save_tree_json, ReportError};
use crate::traits::RowSource;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// What a full run produced.
#[derive(Debug)]
pub struct HarvestReport {
    pub stats: HarvestStats,
    pub stop: StopReason,
    pub records_written: usize,
    pub csv_path: PathBuf,
    pub json_path: Option<PathBuf>,
}

pub struct HarvesterExecutor<S> {
    source: S,
    output_path: PathBuf,
    json_path: Option<PathBuf>,
}

impl<S> HarvesterExecutor<S>
where
    S: RowSource,
{
    pub fn new(source: S, output_path: impl Into<PathBuf>) -> Self {
        Self {
            source,
            output_path: output_path.into(),
            json_path: None,
        }
    }

    pub fn with_json_output(mut self, path: Option<PathBuf>) -> Self {
        self.json_path = path;
        self
    }

    /// Collects categories from the source and writes the reports.
    ///
    /// A failed page only shortens the collection; the reports are still
    /// written from what was gathered. Only report I/O errors are returned.
    #[instrument(skip(self, progress), fields(source = %self.source.source_id()))]
    pub async fn run(&self, progress: &mut dyn Progress) -> Result<HarvestReport, ReportError> {
        info!("Starting category harvest");

        let outcome = fetch_categories(&self.source, progress).await;
        if let StopReason::Failed { page, error } = &outcome.stop {
            warn!(
                page,
                error = %error,
                kept = outcome.categories.len(),
                "Collection ended early, reporting partial result"
            );
        }

        let records_written = save_categories(&outcome.categories, &self.output_path)?;

        if let Some(json_path) = &self.json_path {
            let tree = CategoryTree::from_paths(&outcome.categories);
            save_tree_json(&tree, json_path)?;
        }

        info!(records = records_written, "Finished category harvest");

        Ok(HarvestReport {
            stats: outcome.stats,
            stop: outcome.stop,
            records_written,
            csv_path: self.output_path.clone(),
            json_path: self.json_path.clone(),
        })
    }
}
