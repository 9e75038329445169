//! One run of the scraper: fetch the rendered page, project it to text, save
//! it under the page's domain name.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, instrument};
use url::Url;
use crate::browser::{self, BrowserError, BrowserSession};
use crate::config::ScrapeConfig;
use crate::output::{self, OutputError};
use crate::text::{TextError, TextExtractor};

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("BrowserError: {0}")]
    Browser(#[from] BrowserError),
    #[error("TextError: {0}")]
    Text(#[from] TextError),
    #[error("OutputError: {0}")]
    Output(#[from] OutputError),
    #[error("I/O error, can't read {}: {source}", .path.display())]
    ReadHtml {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

/// What a successful run produced
#[derive(Debug)]
pub struct ScrapedPage {
    pub url: Url,
    pub output: PathBuf,
    /// Size of the rendered document the text came from
    pub html_bytes: usize,
    pub text: String,
}

/// Scrapes `config.url` through `session` and writes `<domain>.txt`.
///
/// The file name is derived before the browser loads anything, so a URL
/// without a `.com` domain fails without a page load. The session is quit on
/// every path.
#[instrument(skip_all, fields(url = %config.url))]
pub async fn scrape<S: BrowserSession>(session: S, config: &ScrapeConfig) -> Result<ScrapedPage> {

    let filename = match output::derive_filename(&config.url) {
        Ok(filename) => filename,
        Err(e) => {
            session.quit();
            return Err(e.into());
        }
    };

    let html = browser::fetch_rendered(session, &config.url, config.render_settle).await?;

    save(config, &filename, html.as_bytes())
}

/// Same as [`scrape`] for a document saved earlier, no browser involved.
#[instrument(skip_all, fields(url = %config.url, html = %path.display()))]
pub fn scrape_html_file(path: &Path, config: &ScrapeConfig) -> Result<ScrapedPage> {

    let filename = output::derive_filename(&config.url)?;

    let html = std::fs::read(path)
        .map_err(|source| ScrapeError::ReadHtml { path: path.to_path_buf(), source })?;

    save(config, &filename, &html)
}

fn save(config: &ScrapeConfig, filename: &str, html: &[u8]) -> Result<ScrapedPage> {

    let text = TextExtractor::new(config.skip_hidden).extract_bytes(html)?;
    info!(html_bytes = html.len(), text_bytes = text.len(), "extracted text");

    let output = output::write_text(&config.output_dir, filename, &text)?;

    Ok(ScrapedPage {
        url: config.url.clone(),
        output,
        html_bytes: html.len(),
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::tests::FakeSession;
    use std::time::Duration;

    fn config_in(dir: &Path, url: &str) -> ScrapeConfig {
        ScrapeConfig {
            output_dir: dir.to_path_buf(),
            render_settle: Duration::ZERO,
            ..ScrapeConfig::for_url(Url::parse(url).unwrap())
        }
    }

    #[tokio::test]
    async fn scrape_writes_text_named_after_domain() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "https://shop.example.com/deal");
        let session = FakeSession::serving("<html><body><p>Hello</p><p>World</p></body></html>");
        let quit = session.quit.clone();

        let page = scrape(session, &config).await.unwrap();

        assert_eq!(page.output, dir.path().join("example.com.txt"));
        assert_eq!(page.text, "HelloWorld");
        assert_eq!(std::fs::read_to_string(&page.output).unwrap(), "HelloWorld");
        assert!(quit.get());
    }

    #[tokio::test]
    async fn scrape_twice_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "https://www.netmeds.com/offers/x");
        let html = std::fs::read_to_string("test/htmls/offer.html").unwrap();

        let first = scrape(FakeSession::serving(&html), &config).await.unwrap();
        let first_bytes = std::fs::read(&first.output).unwrap();
        let second = scrape(FakeSession::serving(&html), &config).await.unwrap();

        assert_eq!(first.output, second.output);
        assert_eq!(std::fs::read(&second.output).unwrap(), first_bytes);
    }

    #[tokio::test]
    async fn no_com_domain_fails_before_loading() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "https://example.org/page");
        let session = FakeSession::serving("<p>never read</p>");
        let navigated = session.navigated.clone();
        let quit = session.quit.clone();

        let err = scrape(session, &config).await.unwrap_err();

        assert!(matches!(err, ScrapeError::Output(OutputError::FilenameDerivation(_))));
        assert!(!navigated.get());
        assert!(quit.get());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn navigation_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "https://www.netmeds.com/offers/x");
        let session = FakeSession::unreachable();
        let quit = session.quit.clone();

        let err = scrape(session, &config).await.unwrap_err();

        assert!(matches!(err, ScrapeError::Browser(BrowserError::Navigation { .. })));
        assert!(quit.get());
        assert!(!dir.path().join("netmeds.com.txt").exists());
    }

    #[test]
    fn html_file_skipping_hidden_text() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScrapeConfig {
            skip_hidden: true,
            ..config_in(dir.path(), "https://www.netmeds.com/offers/x")
        };

        let page = scrape_html_file(Path::new("test/htmls/offer.html"), &config).unwrap();

        assert_eq!(page.output, dir.path().join("netmeds.com.txt"));
        assert!(page.text.contains("Free delivery on all prescription orders"));
        assert!(!page.text.contains("dataLayer"));
        assert!(!page.text.contains("border"));
    }

    #[test]
    fn html_file_that_is_not_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let html = dir.path().join("latin1.html");
        std::fs::write(&html, b"<p>caf\xe9</p>").unwrap();
        let config = config_in(dir.path(), "https://shop.example.com/deal");

        let err = scrape_html_file(&html, &config).unwrap_err();

        assert!(matches!(err, ScrapeError::Text(TextError::Parse(_))));
        assert!(!dir.path().join("example.com.txt").exists());
    }

    #[test]
    fn missing_html_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "https://shop.example.com/deal");

        let err = scrape_html_file(&dir.path().join("gone.html"), &config).unwrap_err();

        assert!(matches!(err, ScrapeError::ReadHtml { .. }));
    }
}
