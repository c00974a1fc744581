//! Paginated category collection.
//!
//! This module provides [`fetch_categories`], which walks a [`RowSource`]
//! page by page and gathers the unique category paths it returns with:
//! - Strictly sequential requests (one page in flight)
//! - Structured logging via `tracing`
//! - Graceful degradation: a failed page ends collection, it never aborts it

use std::collections::BTreeSet;
use std::time::Instant;
use tracing::{error, info, instrument};

use crate::model::RowsPage;
use crate::progress::Progress;
use crate::traits::{FetchError, RowSource};

// ============================================================================
// Outcome Types
// ============================================================================

/// Why the pagination loop stopped.
#[derive(Debug)]
pub enum StopReason {
    /// A page came back with no rows
    EmptyPage { page: u32 },

    /// The API reported no page after this one
    LastPage { page: u32 },

    /// Fetching `page` failed; nothing from it was kept
    Failed { page: u32, error: FetchError },
}

impl StopReason {
    pub fn is_failure(&self) -> bool {
        matches!(self, StopReason::Failed { .. })
    }
}

/// Statistics about one collection run.
#[derive(Debug, Default, Clone)]
pub struct HarvestStats {
    /// Requests issued, including the one that ended the loop
    pub requests: u32,

    /// Non-empty pages accumulated
    pub pages_processed: u32,

    /// Rows seen across accumulated pages
    pub rows_seen: usize,

    /// Rows whose category was missing, blank or not a string
    pub rows_skipped: usize,

    /// Wall time for the whole loop (milliseconds)
    pub duration_ms: u64,
}

/// Result of [`fetch_categories`]: whatever was collected, and why it stopped.
#[derive(Debug)]
pub struct HarvestOutcome {
    /// Unique trimmed category paths
    pub categories: BTreeSet<String>,

    pub stats: HarvestStats,

    pub stop: StopReason,
}

// ============================================================================
// Collection
// ============================================================================

/// Adds every usable category in `page` to `categories`.
///
/// Returns the number of rows skipped.
pub fn accumulate(page: &RowsPage, categories: &mut BTreeSet<String>) -> usize {
    let mut skipped = 0;
    for row in &page.results {
        match row.category_path() {
            Some(path) => {
                categories.insert(path.to_string());
            }
            None => skipped += 1,
        }
    }
    skipped
}

/// Pages through `source` from page 1 and collects unique category paths.
///
/// Stops on the first empty page, when the API reports no further page, or
/// when a request fails. A failure is logged with its status and body and the
/// categories gathered from earlier pages are returned as-is; there is no
/// retry and no error is propagated.
#[instrument(skip(source, progress), fields(source = %source.source_id()))]
pub async fn fetch_categories<S>(source: &S, progress: &mut dyn Progress) -> HarvestOutcome
where
    S: RowSource + ?Sized,
{
    let start = Instant::now();
    let mut stats = HarvestStats::default();
    let mut categories = BTreeSet::new();
    let mut page = 1u32;

    let stop = loop {
        stats.requests += 1;

        let rows = match source.fetch_page(page).await {
            Ok(rows) => rows,
            Err(error) => {
                match &error {
                    FetchError::Status { status, body } => {
                        error!(page, status, body = %body, "Error fetching page");
                    }
                    other => error!(page, error = %other, "Error fetching page"),
                }
                break StopReason::Failed { page, error };
            }
        };

        if rows.results.is_empty() {
            break StopReason::EmptyPage { page };
        }

        stats.rows_seen += rows.results.len();
        stats.rows_skipped += accumulate(&rows, &mut categories);
        stats.pages_processed += 1;

        info!(page, unique = categories.len(), "Processed page");
        progress.page_done(page, categories.len());

        if !rows.has_next() {
            break StopReason::LastPage { page };
        }

        page += 1;
    };

    stats.duration_ms = start.elapsed().as_millis() as u64;
    progress.finish(categories.len());

    info!(
        unique = categories.len(),
        requests = stats.requests,
        pages = stats.pages_processed,
        skipped = stats.rows_skipped,
        duration_ms = stats.duration_ms,
        "Collection stopped"
    );

    HarvestOutcome {
        categories,
        stats,
        stop,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CategoryRow;
    use crate::progress::NullProgress;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    enum MockPage {
        Rows(Vec<&'static str>, bool),
        Status(u16),
    }

    // Serves scripted pages; requests past the script get an empty page.
    struct MockSource {
        pages: Vec<MockPage>,
        calls: AtomicU32,
    }

    impl MockSource {
        fn new(pages: Vec<MockPage>) -> Self {
            Self {
                pages,
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RowSource for MockSource {
        fn source_id(&self) -> String {
            "mock".to_string()
        }

        async fn fetch_page(&self, page: u32) -> Result<RowsPage, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.pages.get(page as usize - 1) {
                Some(MockPage::Rows(rows, has_next)) => Ok(RowsPage {
                    count: None,
                    next: has_next.then(|| format!("?page={}", page + 1)),
                    previous: None,
                    results: rows.iter().map(|r| CategoryRow::from_path(r)).collect(),
                }),
                Some(MockPage::Status(status)) => Err(FetchError::Status {
                    status: *status,
                    body: "{\"error\":\"ERROR_NO_PERMISSION\"}".to_string(),
                }),
                None => Ok(RowsPage::default()),
            }
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        pages: Vec<(u32, usize)>,
        finished: Option<usize>,
    }

    impl Progress for RecordingProgress {
        fn page_done(&mut self, page: u32, unique: usize) {
            self.pages.push((page, unique));
        }

        fn finish(&mut self, total: usize) {
            self.finished = Some(total);
        }
    }

    #[tokio::test]
    async fn test_collects_distinct_trimmed_categories() {
        let source = MockSource::new(vec![
            MockPage::Rows(vec!["Toys > Balls", " Toys > Balls ", "", "Pets > Dogs"], true),
            MockPage::Rows(vec!["Pets > Dogs", "Home > Kitchen > Pans"], false),
        ]);

        let outcome = fetch_categories(&source, &mut NullProgress).await;

        let expected: BTreeSet<String> = ["Toys > Balls", "Pets > Dogs", "Home > Kitchen > Pans"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(outcome.categories, expected);
        assert_eq!(outcome.stats.rows_seen, 6);
        assert_eq!(outcome.stats.rows_skipped, 1);
        assert!(matches!(outcome.stop, StopReason::LastPage { page: 2 }));
    }

    #[tokio::test]
    async fn test_stops_on_missing_next_without_extra_request() {
        let source = MockSource::new(vec![MockPage::Rows(vec!["A > B"], false)]);

        let outcome = fetch_categories(&source, &mut NullProgress).await;

        assert_eq!(source.calls(), 1);
        assert_eq!(outcome.stats.requests, 1);
        assert_eq!(outcome.categories.len(), 1);
    }

    #[tokio::test]
    async fn test_terminates_within_n_plus_one_requests() {
        // Three non-empty pages that all claim a next page, then an empty one.
        let source = MockSource::new(vec![
            MockPage::Rows(vec!["A > B"], true),
            MockPage::Rows(vec!["A > C"], true),
            MockPage::Rows(vec!["A > D"], true),
        ]);

        let outcome = fetch_categories(&source, &mut NullProgress).await;

        assert_eq!(source.calls(), 4);
        assert_eq!(outcome.stats.pages_processed, 3);
        assert!(matches!(outcome.stop, StopReason::EmptyPage { page: 4 }));
    }

    #[tokio::test]
    async fn test_failed_page_keeps_earlier_pages_only() {
        let source = MockSource::new(vec![
            MockPage::Rows(vec!["A > B", "A > C"], true),
            MockPage::Rows(vec!["A > D"], true),
            MockPage::Status(401),
            MockPage::Rows(vec!["Z > Never"], false),
        ]);

        let outcome = fetch_categories(&source, &mut NullProgress).await;

        assert_eq!(source.calls(), 3);
        assert_eq!(outcome.categories.len(), 3);
        assert!(!outcome.categories.contains("Z > Never"));
        assert!(outcome.stop.is_failure());
        match outcome.stop {
            StopReason::Failed {
                page,
                error: FetchError::Status { status, .. },
            } => {
                assert_eq!(page, 3);
                assert_eq!(status, 401);
            }
            other => panic!("unexpected stop reason: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_first_page_failure_yields_empty_set() {
        let source = MockSource::new(vec![MockPage::Status(500)]);

        let outcome = fetch_categories(&source, &mut NullProgress).await;

        assert!(outcome.categories.is_empty());
        assert_eq!(outcome.stats.pages_processed, 0);
        assert!(outcome.stop.is_failure());
    }

    #[tokio::test]
    async fn test_progress_reports_each_non_empty_page() {
        let source = MockSource::new(vec![
            MockPage::Rows(vec!["A > B", "A > C"], true),
            MockPage::Rows(vec!["A > B"], true),
        ]);
        let mut progress = RecordingProgress::default();

        fetch_categories(&source, &mut progress).await;

        assert_eq!(progress.pages, vec![(1, 2), (2, 2)]);
        assert_eq!(progress.finished, Some(2));
    }

    #[test]
    fn test_accumulate_skips_non_string_values() {
        let page = RowsPage {
            results: vec![
                CategoryRow {
                    category: Some(serde_json::json!(["A", "B"])),
                },
                CategoryRow { category: None },
                CategoryRow::from_path("Garden"),
            ],
            ..RowsPage::default()
        };
        let mut set = BTreeSet::new();

        let skipped = accumulate(&page, &mut set);

        assert_eq!(skipped, 2);
        assert_eq!(set.len(), 1);
    }
}
