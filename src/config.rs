use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Page scraped when no URL is given.
pub const DEFAULT_URL: &str =
    "https://www.netmeds.com/offers/12-month-netmeds-first-membership-worth-rs-499";

/// Flat wait between navigation and the DOM snapshot.
pub const DEFAULT_RENDER_SETTLE: Duration = Duration::from_secs(10);

/// Browser launch parameters
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub headless: bool,
    pub window_size: Option<(u32, u32)>,
    /// Chrome/Chromium binary, auto-detected when `None`
    pub chrome_path: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: Some((1280, 1024)),
            chrome_path: None,
        }
    }
}

/// Everything a single run needs
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub url: Url,
    pub output_dir: PathBuf,
    /// How long to let client-side scripts run after navigation.
    /// There is no readiness polling: the wait is always the full duration.
    pub render_settle: Duration,
    /// Drop text found inside `script`, `style`, `noscript` and `template`
    pub skip_hidden: bool,
    pub browser: BrowserConfig,
}

impl ScrapeConfig {
    pub fn for_url(url: Url) -> Self {
        Self {
            url,
            output_dir: PathBuf::from("."),
            render_settle: DEFAULT_RENDER_SETTLE,
            skip_hidden: false,
            browser: BrowserConfig::default(),
        }
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        // DEFAULT_URL is a literal, parsing it cannot fail
        let url = Url::parse(DEFAULT_URL).unwrap_or_else(|e| panic!("bad DEFAULT_URL: {e}"));
        Self::for_url(url)
    }
}
