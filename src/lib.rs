//! ExamTopics discussion scraper
//!
//! This crate crawls the paginated discussion listing on examtopics.com for a
//! single vendor, filters the entries down to one exam, and saves each
//! matching discussion (question, choices, suggested answer, comments) as a
//! plain text file.

pub mod config;
pub mod crawler;
pub mod naming;
pub mod output;

use thiserror::Error;

/// Main error type for scraper operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    #[error("Fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        source: chromiumoxide::error::CdpError,
    },

    #[error("Invalid title pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::{crawl, Coordinator, CrawlSummary, PageFetcher};
pub use naming::{sanitize_filename, FilenameDeriver};
pub use output::RecordWriter;
