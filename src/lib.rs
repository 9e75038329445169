pub mod browser;
pub mod config;
pub mod output;
pub mod report;
pub mod scrape;
pub mod text;
