//! Crawl configuration
//!
//! Unlike a long-running crawler this tool is configured entirely from the
//! command line, so the config is a plain struct the binary fills in from its
//! parsed arguments. URL composition for the target site lives here too.

use crate::{Result, ScrapeError};
use std::path::PathBuf;
use std::time::Duration;

/// Root of the site all listing and discussion URLs hang off of
pub const SITE_ROOT: &str = "https://www.examtopics.com";

/// Configuration for a single crawl run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Vendor name as it appears in the listing URL (e.g. "vmware", "cisco")
    pub company: String,

    /// Exam identifier matched against listing titles (e.g. "2v0-11.25")
    pub exam_id: String,

    /// Root directory saved discussions are written under
    pub output_dir: PathBuf,

    /// Hard cap on the number of listing pages to visit
    pub max_pages: u32,

    /// Settling delay after each navigation, also the self-throttle
    pub delay: Duration,

    /// Run the browser without a visible window
    pub headless: bool,
}

impl CrawlConfig {
    /// Returns the URL of the nth listing page for the configured company
    pub fn listing_url(&self, page: u32) -> String {
        format!("{}/discussions/{}/{}/", SITE_ROOT, self.company, page)
    }

    /// Resolves a relative discussion link discovered on a listing page
    pub fn discussion_url(&self, href: &str) -> String {
        format!("{}{}", SITE_ROOT, href)
    }

    /// Validates the configuration before a crawl starts
    pub fn validate(&self) -> Result<()> {
        if self.company.is_empty() {
            return Err(ScrapeError::Config("company cannot be empty".to_string()));
        }

        if self.exam_id.is_empty() {
            return Err(ScrapeError::Config("exam id cannot be empty".to_string()));
        }

        if self.max_pages < 1 {
            return Err(ScrapeError::Config(format!(
                "max_pages must be >= 1, got {}",
                self.max_pages
            )));
        }

        Ok(())
    }
}
