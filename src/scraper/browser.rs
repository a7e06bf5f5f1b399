//! Page fetching through a caller-supplied browser session.

use std::sync::Arc;

use async_trait::async_trait;
use headless_chrome::Tab;
use tracing::debug;
use url::Url;

use crate::error::Result;

/// Swappable page-fetch abstraction. The production implementation drives a
/// browser tab; tests substitute canned markup.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String>;
}

/// Fetches pages by navigating an already-running browser tab. The tab's
/// lifecycle (launch, teardown) belongs to the caller; this wrapper only
/// navigates and reads the rendered document. There is no retry and no
/// timeout handling here: whatever the browser layer raises propagates.
pub struct BrowserFetcher {
    tab: Arc<Tab>,
}

impl BrowserFetcher {
    pub fn new(tab: Arc<Tab>) -> Self {
        Self { tab }
    }
}

#[async_trait]
impl PageFetcher for BrowserFetcher {
    async fn fetch(&self, url: &Url) -> Result<String> {
        debug!("navigating to {}", url);
        self.tab.navigate_to(url.as_str())?;
        self.tab.wait_until_navigated()?;
        let html = self.tab.get_content()?;
        Ok(html)
    }
}
