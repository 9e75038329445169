use scraper::{Html, Node};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum TextError {
    #[error("ParseError, document is not valid UTF-8: {0}")]
    Parse(#[from] std::str::Utf8Error),
}

pub type Result<T> = std::result::Result<T, TextError>;

/// Elements whose text never shows up on screen
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Turns an HTML document into its visible-text projection
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExtractor {
    pub skip_hidden: bool,
}

impl TextExtractor {

    pub fn new(skip_hidden: bool) -> Self {
        Self { skip_hidden }
    }

    pub fn extract_bytes(&self, html: &[u8]) -> Result<String> {
        let html = std::str::from_utf8(html)?;
        Ok(self.extract(html))
    }

    /// Concatenates every text node in document order.
    ///
    /// Whitespace is left exactly as the parser produced it.
    pub fn extract(&self, html: &str) -> String {

        let document = Html::parse_document(html);
        let mut text = String::with_capacity(html.len() / 2);

        for node in document.tree.root().descendants() {
            let Node::Text(fragment) = node.value() else { continue };

            if self.skip_hidden && node.ancestors().any(|parent| Self::is_hidden(parent.value())) {
                continue;
            }

            text.push_str(fragment);
        }

        debug!(html_bytes = html.len(), text_bytes = text.len(), skip_hidden = self.skip_hidden, "projected document to text");
        text
    }

    fn is_hidden(node: &Node) -> bool {
        match node {
            Node::Element(element) => HIDDEN_ELEMENTS.contains(&element.name()),
            _ => false,
        }
    }
}
