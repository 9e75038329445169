use webpage_text::browser::{self, ChromeSession};
use webpage_text::config::{BrowserConfig, DEFAULT_URL, ScrapeConfig};
use webpage_text::report::ScrapeReport;
use webpage_text::scrape;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Loads a webpage in a headless browser and saves its visible text
/// to `<domain>.txt`
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// URL of the webpage to be scraped
    #[arg(env = "WEBPAGE_TEXT_URL", default_value = DEFAULT_URL)]
    url: String,

    /// Directory the text file is written to
    #[arg(short, long, env = "WEBPAGE_TEXT_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Seconds to let the page render after it loaded
    #[arg(long, env = "WEBPAGE_TEXT_SETTLE_SECS", default_value_t = 10)]
    settle_secs: u64,

    /// Leave out the text of script, style, noscript and template elements
    #[arg(long)]
    skip_hidden: bool,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Chrome/Chromium executable, detected when omitted
    #[arg(long, env = "CHROME")]
    chrome_path: Option<PathBuf>,

    /// Extract from a saved HTML file instead of loading the URL
    #[arg(long, value_name = "FILE")]
    html: Option<PathBuf>,

    /// Print a JSON summary of the run on stdout
    #[arg(long)]
    report: bool,
}

impl Args {
    fn into_config(self) -> anyhow::Result<ScrapeConfig> {
        let url = browser::parse_target(&self.url)?;

        Ok(ScrapeConfig {
            url,
            output_dir: self.output_dir,
            render_settle: Duration::from_secs(self.settle_secs),
            skip_hidden: self.skip_hidden,
            browser: BrowserConfig {
                headless: !self.headed,
                chrome_path: self.chrome_path,
                ..BrowserConfig::default()
            },
        })
    }
}

/// DevTools goes quiet during the settle wait, keep the connection alive past it
fn idle_timeout(settle: Duration) -> Duration {
    settle.saturating_add(Duration::from_secs(30))
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {

    init_logging();

    let mut args = Args::parse();
    let html_file = args.html.take();
    let report = args.report;
    let config = args.into_config()?;

    let page = match html_file {
        Some(path) => scrape::scrape_html_file(&path, &config)?,
        None => {
            let session = ChromeSession::launch(&config.browser, idle_timeout(config.render_settle))
                .context("Can't initiate browser")?;
            scrape::scrape(session, &config).await?
        }
    };

    if report {
        println!("{}", ScrapeReport::from_page(&page).to_json()?);
    }

    Ok(())
}
