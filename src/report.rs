use serde::Serialize;
use time::OffsetDateTime;
use crate::scrape::ScrapedPage;

/// Summary of one run, printed as JSON with `--report`
#[derive(Serialize, Debug)]
pub struct ScrapeReport {
    url: String,
    output: String,
    date: String,
    nb_words: usize,
    nb_chars: usize,
    html_bytes: usize,
}

impl ScrapeReport {

    pub fn from_page(page: &ScrapedPage) -> Self {

        // the local offset is unknowable once other threads run, fall back to UTC
        let today = OffsetDateTime::now_local()
            .unwrap_or_else(|_| OffsetDateTime::now_utc())
            .date()
            .to_string();

        Self {
            url: page.url.to_string(),
            output: page.output.display().to_string(),
            date: today,
            nb_words: page.text.split_whitespace().count(),
            nb_chars: page.text.chars().count(),
            html_bytes: page.html_bytes,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
