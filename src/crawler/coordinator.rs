//! Crawl coordination - the main page loop
//!
//! The coordinator walks listing pages in order starting at 1, filters each
//! page's entries down to the requested exam, and saves every match. The loop
//! ends the first time a listing page comes back empty (the site's
//! end-of-data signal), when the configured page cap is reached, or when the
//! cancellation flag is raised. A fetch failure anywhere is fatal for the
//! run; per-entry and per-section misses are absorbed locally.

use crate::config::CrawlConfig;
use crate::crawler::discussion::{parse_discussion, NO_CONTENT_MARKER};
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::listing::{matches_exam, parse_listing, ListingEntry};
use crate::naming::FilenameDeriver;
use crate::output::RecordWriter;
use crate::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Mutable loop state, owned exclusively by the coordinator
#[derive(Debug, Clone)]
pub struct CrawlState {
    /// Listing page currently being processed (starts at 1)
    pub current_page: u32,

    /// Discussions saved so far this run
    pub total_saved: u64,

    /// Matching entries seen on the current page
    pub matched_on_page: u32,
}

/// Final counters reported when the run ends, on every exit path
#[derive(Debug, Clone, Copy)]
pub struct CrawlSummary {
    /// Listing pages fetched
    pub pages_visited: u32,

    /// Discussion files written
    pub total_saved: u64,

    /// Whether the run stopped because of a cancellation signal
    pub interrupted: bool,
}

/// Drives the sequential crawl over listing pages
pub struct Coordinator {
    config: CrawlConfig,
    deriver: FilenameDeriver,
    writer: RecordWriter,
    state: CrawlState,
    pages_visited: u32,
    cancel: Arc<AtomicBool>,
    interrupted: bool,
}

impl Coordinator {
    /// Validates the config and prepares the output directory
    pub fn new(config: CrawlConfig, cancel: Arc<AtomicBool>) -> Result<Self> {
        config.validate()?;

        let deriver = FilenameDeriver::new(&config.exam_id)?;
        let writer = RecordWriter::new(&config.output_dir, &config.exam_id)?;

        Ok(Self {
            config,
            deriver,
            writer,
            state: CrawlState {
                current_page: 1,
                total_saved: 0,
                matched_on_page: 0,
            },
            pages_visited: 0,
            cancel,
            interrupted: false,
        })
    }

    /// Runs the crawl loop to completion, cancellation, or a fatal error
    ///
    /// Counters survive every outcome; call [`Coordinator::summary`]
    /// afterwards to report them.
    pub async fn run<F: PageFetcher>(&mut self, fetcher: &F) -> Result<()> {
        tracing::info!(
            "Starting crawl for exam '{}' ({})",
            self.config.exam_id,
            self.config.company
        );

        'pages: while self.state.current_page <= self.config.max_pages {
            if self.cancelled() {
                break;
            }

            let page = self.state.current_page;
            tracing::info!("Scraping page {}", page);

            let html = fetcher.fetch(&self.config.listing_url(page)).await?;
            self.pages_visited += 1;

            let entries = parse_listing(&html);
            if entries.is_empty() {
                tracing::info!("No more discussion links found");
                break;
            }

            self.state.matched_on_page = 0;
            for entry in entries {
                if self.cancelled() {
                    break 'pages;
                }

                if !matches_exam(&entry.title, &self.config.exam_id) {
                    continue;
                }

                self.state.matched_on_page += 1;
                self.save_discussion(fetcher, &entry).await?;
            }

            if self.state.matched_on_page == 0 {
                tracing::debug!("No matches on page {}", page);
            } else {
                tracing::debug!(
                    "Found {} matches on page {}",
                    self.state.matched_on_page,
                    page
                );
            }

            self.state.current_page += 1;
        }

        Ok(())
    }

    /// Fetches, extracts, and writes a single matching discussion
    async fn save_discussion<F: PageFetcher>(
        &mut self,
        fetcher: &F,
        entry: &ListingEntry,
    ) -> Result<()> {
        let filename = self.deriver.derive(&entry.title, self.state.total_saved);
        tracing::debug!("{} -> {}", entry.title, filename);

        let html = fetcher.fetch(&self.config.discussion_url(&entry.href)).await?;

        let content = match parse_discussion(&html) {
            Some(record) => record.render(),
            None => NO_CONTENT_MARKER.to_string(),
        };

        self.writer.write(&filename, &content)?;
        self.state.total_saved += 1;
        tracing::info!("Saved {}", filename);

        Ok(())
    }

    fn cancelled(&mut self) -> bool {
        if self.cancel.load(Ordering::SeqCst) {
            self.interrupted = true;
            true
        } else {
            false
        }
    }

    /// Counters accumulated so far, valid on every exit path
    pub fn summary(&self) -> CrawlSummary {
        CrawlSummary {
            pages_visited: self.pages_visited,
            total_saved: self.state.total_saved,
            interrupted: self.interrupted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScrapeError;
    use std::collections::HashMap;
    use std::path::Path;
    use std::time::Duration;

    struct StubFetcher {
        pages: HashMap<String, String>,
    }

    impl StubFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, html)| (url.to_string(), html.to_string()))
                    .collect(),
            }
        }
    }

    impl PageFetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| ScrapeError::Config(format!("no stub page for {}", url)))
        }
    }

    fn create_test_config(output_dir: &Path) -> CrawlConfig {
        CrawlConfig {
            company: "vmware".to_string(),
            exam_id: "2v0-11.25".to_string(),
            output_dir: output_dir.to_path_buf(),
            max_pages: 50,
            delay: Duration::from_secs(0),
            headless: true,
        }
    }

    #[tokio::test]
    async fn test_empty_first_page_terminates_without_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let config = create_test_config(tmp.path());

        let fetcher = StubFetcher::new(&[(
            "https://www.examtopics.com/discussions/vmware/1/",
            "<html><body></body></html>",
        )]);

        let cancel = Arc::new(AtomicBool::new(false));
        let mut coordinator = Coordinator::new(config, cancel).expect("coordinator");
        coordinator.run(&fetcher).await.expect("run");

        let summary = coordinator.summary();
        assert_eq!(summary.pages_visited, 1);
        assert_eq!(summary.total_saved, 0);
        assert!(!summary.interrupted);
    }

    #[tokio::test]
    async fn test_max_pages_stops_the_loop() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut config = create_test_config(tmp.path());
        config.max_pages = 2;

        // Both pages carry a non-matching entry, so the loop only stops
        // because of the page cap; page 3 has no stub and would error.
        let listing = r#"<a class="discussion-link" href="/d/1">cisco 200-301 question 1</a>"#;
        let fetcher = StubFetcher::new(&[
            ("https://www.examtopics.com/discussions/vmware/1/", listing),
            ("https://www.examtopics.com/discussions/vmware/2/", listing),
        ]);

        let cancel = Arc::new(AtomicBool::new(false));
        let mut coordinator = Coordinator::new(config, cancel).expect("coordinator");
        coordinator.run(&fetcher).await.expect("run");

        let summary = coordinator.summary();
        assert_eq!(summary.pages_visited, 2);
        assert_eq!(summary.total_saved, 0);
    }

    #[tokio::test]
    async fn test_preset_cancellation_fetches_nothing() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let config = create_test_config(tmp.path());

        let fetcher = StubFetcher::new(&[]);

        let cancel = Arc::new(AtomicBool::new(true));
        let mut coordinator = Coordinator::new(config, cancel).expect("coordinator");
        coordinator.run(&fetcher).await.expect("run");

        let summary = coordinator.summary();
        assert_eq!(summary.pages_visited, 0);
        assert_eq!(summary.total_saved, 0);
        assert!(summary.interrupted);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_fatal_but_keeps_counters() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let config = create_test_config(tmp.path());

        // Page 1 succeeds with no matches; page 2 has no stub response.
        let fetcher = StubFetcher::new(&[(
            "https://www.examtopics.com/discussions/vmware/1/",
            r#"<a class="discussion-link" href="/d/1">cisco 200-301 question 1</a>"#,
        )]);

        let cancel = Arc::new(AtomicBool::new(false));
        let mut coordinator = Coordinator::new(config, cancel).expect("coordinator");
        assert!(coordinator.run(&fetcher).await.is_err());

        let summary = coordinator.summary();
        assert_eq!(summary.pages_visited, 1);
        assert_eq!(summary.total_saved, 0);
    }
}
