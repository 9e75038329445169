use headless_chrome;
use anyhow;
use url::{Url, ParseError};
use thiserror::Error;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use crate::config::BrowserConfig;

#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("DriverError, can't drive the browser: {0}")]
    Driver(#[source] anyhow::Error),
    #[error("NavigationError, can't load {url}: {source}")]
    Navigation {
        url: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("UrlError, can't parse given URL: {0}")]
    UrlError(#[from] ParseError),
    #[error("UrlError, only http(s) pages can be scraped, got scheme {0:?}")]
    UnsupportedScheme(String),
}
pub type Result<T> = std::result::Result<T, BrowserError>;

/// Parses a target URL, accepting only `http` and `https`
pub fn parse_target(url: &str) -> Result<Url> {
    let url = Url::parse(url)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(BrowserError::UnsupportedScheme(other.to_string())),
    }
}

/// A live browser owned by one run.
///
/// `quit` consumes the session so nothing can touch the browser after it is
/// gone.
pub trait BrowserSession {
    fn navigate(&mut self, url: &Url) -> Result<()>;
    /// Serialization of the current live DOM, scripts' changes included
    fn rendered_html(&mut self) -> Result<String>;
    fn quit(self);
}

/// Chrome/Chromium driven over the DevTools protocol.
///
/// Dropping it without `quit` still kills the browser process.
pub struct ChromeSession {
    tab: Arc<headless_chrome::Tab>,
    browser: headless_chrome::Browser,
}

impl ChromeSession {

    /// Starts the browser and opens the tab every navigation goes through.
    ///
    /// `idle_timeout` must outlast the settle wait, the DevTools connection is
    /// silent while we sleep.
    pub fn launch(config: &BrowserConfig, idle_timeout: Duration) -> Result<Self> {

        let options = headless_chrome::LaunchOptions {
            headless: config.headless,
            window_size: config.window_size,
            path: config.chrome_path.clone(),
            idle_browser_timeout: idle_timeout,
            ..Default::default()
        };

        info!(headless = config.headless, "launching browser");
        let browser = headless_chrome::Browser::new(options).map_err(BrowserError::Driver)?;
        let tab = browser.new_tab().map_err(BrowserError::Driver)?;

        Ok(Self { tab, browser })
    }
}

impl BrowserSession for ChromeSession {

    fn navigate(&mut self, url: &Url) -> Result<()> {
        info!(%url, "navigating");
        self.tab
            .navigate_to(url.as_str())
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|source| BrowserError::Navigation { url: url.to_string(), source })?;
        Ok(())
    }

    fn rendered_html(&mut self) -> Result<String> {
        self.tab.get_content().map_err(BrowserError::Driver)
    }

    fn quit(self) {
        if let Err(e) = self.tab.close(false) {
            warn!(error = %e, "can't close tab, killing the browser anyway");
        }
        // the browser process is killed when the handle drops
        drop(self.browser);
        info!("browser closed");
    }
}

/// Loads `url`, waits `settle`, and snapshots the DOM.
///
/// The session is quit before returning, whether the fetch succeeded or not.
pub async fn fetch_rendered<S: BrowserSession>(mut session: S, url: &Url, settle: Duration) -> Result<String> {

    let html = render(&mut session, url, settle).await;
    session.quit();

    html
}

async fn render<S: BrowserSession>(session: &mut S, url: &Url, settle: Duration) -> Result<String> {

    session.navigate(url)?;

    debug!(settle_ms = settle.as_millis() as u64, "waiting for the page to settle");
    tokio::time::sleep(settle).await;

    let html = session.rendered_html()?;
    debug!(bytes = html.len(), "captured rendered document");

    Ok(html)
}
