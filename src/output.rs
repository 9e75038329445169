use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use url::Url;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("FilenameDerivationError, no .com domain in {0}")]
    FilenameDerivation(String),
    #[error("FilesystemError, can't write {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, OutputError>;

/// `<label>.com.txt`, `<label>` being the host label right before the first
/// `com` label.
///
/// `https://www.netmeds.com/offers` gives `netmeds.com.txt`. Hosts without a
/// `.com` label have no name and are refused.
pub fn derive_filename(url: &Url) -> Result<String> {

    let no_domain = || OutputError::FilenameDerivation(url.to_string());

    let host = url.host_str().ok_or_else(no_domain)?;
    let labels: Vec<&str> = host.split('.').collect();

    // a leading `com` label has nothing before it, the next one might
    let com = labels
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, label)| label.eq_ignore_ascii_case("com"))
        .map(|(i, _)| i)
        .ok_or_else(no_domain)?;

    let domain = labels[com - 1];
    if domain.is_empty() {
        return Err(no_domain());
    }

    Ok(format!("{}.com.txt", domain.to_ascii_lowercase()))
}

/// Writes `text` as UTF-8 to `directory/filename`, replacing any previous
/// content. The file handle is released on every path out of here.
pub fn write_text(directory: &Path, filename: &str, text: &str) -> Result<PathBuf> {

    let path = directory.join(filename);
    let fs_error = |source| OutputError::Filesystem { path: path.clone(), source };

    let file = File::create(&path).map_err(fs_error)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(text.as_bytes()).map_err(fs_error)?;
    writer.flush().map_err(fs_error)?;

    info!(path = %path.display(), bytes = text.len(), "saved text");

    Ok(path)
}
