//! Content extraction functionality for the crawler module

use scraper::{Html, Node, Selector};
use url::Url;

/// Elements whose text never reaches the index
const NON_CONTENT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Collapse every whitespace run to one space and trim the ends.
///
/// Chunking and scoring are whitespace-token based, so every text the
/// crawler emits passes through here.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract normalized visible text and the document title from HTML
///
/// # Arguments
///
/// * `html` - The raw HTML of the page
///
/// # Returns
///
/// `(text, title)`; the title is empty when the document has no non-empty
/// `<title>` element
pub fn extract_text_and_title(html: &str) -> (String, String) {
    let document = Html::parse_document(html);
    (document_text(&document), document_title(&document))
}

/// Extract outbound links from a page
///
/// Each `href` is resolved against `base_url` and has its fragment removed.
/// Hrefs that do not resolve are dropped. At most `cap` links are returned,
/// taken in document order.
pub fn extract_links(base_url: &Url, html: &str, cap: usize) -> Vec<Url> {
    let document = Html::parse_document(html);
    document_links(&document, base_url, cap)
}

pub(crate) fn document_text(document: &Html) -> String {
    let mut raw = String::new();
    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| NON_CONTENT_ELEMENTS.contains(&element.name()))
        });
        if !hidden {
            raw.push_str(text);
            raw.push(' ');
        }
    }
    normalize_whitespace(&raw)
}

pub(crate) fn document_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .map(|element| normalize_whitespace(&element.text().collect::<String>()))
        .unwrap_or_default()
}

pub(crate) fn document_links(document: &Html, base_url: &Url, cap: usize) -> Vec<Url> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter_map(|href| base_url.join(href.trim()).ok())
        .map(|mut url| {
            url.set_fragment(None);
            url
        })
        .take(cap)
        .collect()
}
