use crate::error::{Result, ScanError};
use crate::extract::{extract_archive_links, parse_base_url, resolve_link, resolve_page};
use crate::result::{LinkResult, ValidationReport};
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/";
pub const DEFAULT_PAGE: &str = "pages/about/awards.html";

/// Called after each link check with its 1-based position.
pub type LinkProgressCallback = Arc<dyn Fn(usize, &LinkResult) + Send + Sync>;

/// Called once the page is fetched, with the number of archive links found.
pub type LinksFoundCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// Options for configuring a validation run
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    pub base_url: String,
    /// Page to fetch, relative to `base_url`
    pub page: String,
    pub page_timeout: Duration,
    pub link_timeout: Duration,
    /// Pause between consecutive link checks
    pub delay: Duration,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page: DEFAULT_PAGE.to_string(),
            page_timeout: Duration::from_secs(10),
            link_timeout: Duration::from_secs(5),
            delay: Duration::from_millis(100),
        }
    }
}

/// Strings whose presence in a body means the site stylesheet was wired up.
#[derive(Debug, Clone)]
pub struct StyleMarkers {
    pub stylesheet: String,
    pub font: String,
}

impl StyleMarkers {
    /// Returns `(has_stylesheet, has_font)`.
    pub fn detect(&self, body: &str) -> (bool, bool) {
        (body.contains(&self.stylesheet), body.contains(&self.font))
    }
}

impl Default for StyleMarkers {
    fn default() -> Self {
        Self {
            stylesheet: "bootstrap.min.css".to_string(),
            font: "EB Garamond".to_string(),
        }
    }
}

/// Sequential link checker: one request in flight, fixed delay between
/// requests, no retries.
pub struct LinkValidator {
    client: Client,
    page_timeout: Duration,
    link_timeout: Duration,
    delay: Duration,
    markers: StyleMarkers,
    progress_callback: Option<LinkProgressCallback>,
    links_found_callback: Option<LinksFoundCallback>,
}

impl LinkValidator {
    pub fn new() -> Result<Self> {
        let defaults = ValidateOptions::default();
        let client = Client::builder()
            .user_agent(concat!("sitefix/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(5))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            client,
            page_timeout: defaults.page_timeout,
            link_timeout: defaults.link_timeout,
            delay: defaults.delay,
            markers: StyleMarkers::default(),
            progress_callback: None,
            links_found_callback: None,
        })
    }

    pub fn from_options(options: &ValidateOptions) -> Result<Self> {
        Ok(Self::new()?
            .with_page_timeout(options.page_timeout)
            .with_link_timeout(options.link_timeout)
            .with_delay(options.delay))
    }

    pub fn with_page_timeout(mut self, timeout: Duration) -> Self {
        self.page_timeout = timeout;
        self
    }

    pub fn with_link_timeout(mut self, timeout: Duration) -> Self {
        self.link_timeout = timeout;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_markers(mut self, markers: StyleMarkers) -> Self {
        self.markers = markers;
        self
    }

    pub fn with_progress_callback(mut self, callback: LinkProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn with_links_found_callback(mut self, callback: LinksFoundCallback) -> Self {
        self.links_found_callback = Some(callback);
        self
    }

    /// Fetch the page under test. Anything but HTTP 200 is an error.
    pub async fn fetch_page(&self, url: &Url) -> Result<String> {
        info!("Fetching {}", url);

        let response = self
            .client
            .get(url.clone())
            .timeout(self.page_timeout)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(ScanError::PageUnavailable {
                url: url.to_string(),
                status,
            });
        }

        Ok(response.text().await?)
    }

    /// Request one resolved link and record status and style markers.
    ///
    /// Never fails; transport errors end up in [`LinkResult::error`].
    pub async fn check_link(&self, link: &str, url: &Url) -> LinkResult {
        debug!("Checking {}", url);

        let mut result = LinkResult::new(link.to_string(), url.to_string());
        let start = Instant::now();

        match self
            .client
            .get(url.clone())
            .timeout(self.link_timeout)
            .send()
            .await
        {
            Ok(response) => {
                let status = response.status().as_u16();
                result.status_code = Some(status);

                if status == 200 {
                    match response.text().await {
                        Ok(body) => {
                            let (has_stylesheet, has_font) = self.markers.detect(&body);
                            result.has_stylesheet = has_stylesheet;
                            result.has_font = has_font;
                        }
                        Err(e) => {
                            warn!("Failed to read body of {}: {}", url, e);
                            result.error = Some(e.to_string());
                        }
                    }
                }
            }
            Err(e) => {
                warn!("Request to {} failed: {}", url, e);
                result.error = Some(e.to_string());
            }
        }

        result.response_time = start.elapsed();
        result
    }

    /// Check every link in order, pausing between requests.
    pub async fn check_links(&self, base: &Url, links: &[String]) -> Vec<LinkResult> {
        let mut results = Vec::with_capacity(links.len());

        for (idx, link) in links.iter().enumerate() {
            if idx > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let result = match resolve_link(base, link) {
                Ok(url) => self.check_link(link, &url).await,
                Err(e) => LinkResult::with_error(link.clone(), link.clone(), e.to_string()),
            };

            if let Some(ref callback) = self.progress_callback {
                callback(idx + 1, &result);
            }
            results.push(result);
        }

        results
    }

    /// Fetch `page` from `base_url`, extract its archive links and check them.
    ///
    /// A page without archive links yields an empty report.
    pub async fn validate(&self, base_url: &str, page: &str) -> Result<ValidationReport> {
        let base = parse_base_url(base_url)?;
        let page_url = resolve_page(&base, page)?;

        let content = self.fetch_page(&page_url).await?;
        let links = extract_archive_links(&content);
        info!("Found {} archive links on {}", links.len(), page_url);
        if let Some(ref callback) = self.links_found_callback {
            callback(links.len());
        }

        let results = self.check_links(&base, &links).await;
        Ok(ValidationReport::new(page_url.to_string(), results))
    }
}
