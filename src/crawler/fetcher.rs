//! Page fetching via headless Chrome
//!
//! The listing and discussion pages are rendered client-side, so a plain HTTP
//! client never sees the anchors this crawler needs. Fetching therefore goes
//! through a real browser session: navigate, wait out a settling delay, and
//! hand back the final HTML. The same delay doubles as the self-throttle
//! between requests.

use crate::{Result, ScrapeError};
use chromiumoxide::error::CdpError;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info};

/// A capability that turns a URL into fully rendered HTML
///
/// The crawl loop only ever needs this one operation, which keeps the browser
/// behind a seam that tests can replace with a canned-response stub.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// `PageFetcher` backed by a headless Chrome session
///
/// The session is acquired once per crawl and must be released with
/// [`BrowserFetcher::close`] on every exit path.
pub struct BrowserFetcher {
    browser: Browser,
    handler_task: JoinHandle<()>,
    delay: Duration,
}

impl BrowserFetcher {
    /// Launches the browser and starts its event-handler task
    pub async fn launch(headless: bool, delay: Duration) -> Result<Self> {
        let mut builder = BrowserConfig::builder().args(vec![
            "--disable-gpu",
            "--no-sandbox",
            "--disable-dev-shm-usage",
            "--disable-extensions",
        ]);

        builder = if headless {
            builder.new_headless_mode()
        } else {
            builder.with_head()
        };

        let config = builder.build().map_err(ScrapeError::Launch)?;

        let (browser, mut handler) = Browser::launch(config).await?;

        // The handler stream must be drained for the session to make progress
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        info!("Browser launched (headless: {})", headless);

        Ok(Self {
            browser,
            handler_task,
            delay,
        })
    }

    /// Shuts the browser down and stops the event-handler task
    pub async fn close(mut self) -> Result<()> {
        self.browser.close().await?;
        let _ = self.browser.wait().await;
        self.handler_task.abort();

        debug!("Browser session released");
        Ok(())
    }
}

impl PageFetcher for BrowserFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("Fetching {}", url);

        let page = self
            .browser
            .new_page(url)
            .await
            .map_err(|e| fetch_error(url, e))?;

        page.wait_for_navigation()
            .await
            .map_err(|e| fetch_error(url, e))?;

        // Settling delay: lets client-side rendering finish before we read
        sleep(self.delay).await;

        let html = page.content().await.map_err(|e| fetch_error(url, e))?;
        page.close().await.map_err(|e| fetch_error(url, e))?;

        Ok(html)
    }
}

fn fetch_error(url: &str, source: CdpError) -> ScrapeError {
    ScrapeError::Fetch {
        url: url.to_string(),
        source,
    }
}
