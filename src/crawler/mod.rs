//! Crawler module - fetching, filtering, extraction, and coordination
//!
//! The crawl is fully sequential: one listing page at a time, then zero or
//! more detail pages, before advancing. The browser session behind the
//! [`PageFetcher`] is acquired once per run by [`crawl`] and released on
//! every exit path, including errors and cancellation.

mod coordinator;
mod discussion;
mod fetcher;
mod listing;

pub use coordinator::{Coordinator, CrawlState, CrawlSummary};
pub use discussion::{parse_discussion, Comment, DiscussionRecord, NO_CONTENT_MARKER};
pub use fetcher::{BrowserFetcher, PageFetcher};
pub use listing::{matches_exam, parse_listing, ListingEntry};

use crate::config::CrawlConfig;
use crate::Result;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Runs a complete crawl with a browser-backed fetcher
///
/// Acquires the browser session, drives the coordinator, and releases the
/// session whether the run completed, failed, or was cancelled. The final
/// counters are reported in all three cases.
pub async fn crawl(config: CrawlConfig, cancel: Arc<AtomicBool>) -> Result<CrawlSummary> {
    let mut coordinator = Coordinator::new(config.clone(), cancel)?;

    let fetcher = BrowserFetcher::launch(config.headless, config.delay).await?;

    let outcome = coordinator.run(&fetcher).await;

    if let Err(e) = fetcher.close().await {
        tracing::warn!("Failed to release browser cleanly: {}", e);
    }

    let summary = coordinator.summary();

    match outcome {
        Ok(()) => {
            tracing::info!(
                "Crawl finished: {} page(s) visited, {} discussion(s) saved",
                summary.pages_visited,
                summary.total_saved
            );
            Ok(summary)
        }
        Err(e) => {
            tracing::error!(
                "Crawl aborted after {} page(s) and {} saved discussion(s): {}",
                summary.pages_visited,
                summary.total_saved,
                e
            );
            Err(e)
        }
    }
}
