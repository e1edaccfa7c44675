//! Citation extraction from grounded answers

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A source URL an answer cited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub url: String,
    pub section: String,
}

impl Citation {
    fn page(url: &str) -> Self {
        Self {
            url: url.to_string(),
            section: "page".to_string(),
        }
    }
}

fn marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"\[(\d+)\]").expect("citation marker pattern is valid"))
}

/// Map every `[n]` marker in `answer` to `sources[n - 1]`
///
/// Out-of-range markers are ignored. The result is deduplicated by URL and
/// sorted lexicographically.
pub fn extract_citations(answer: &str, sources: &[String]) -> Vec<Citation> {
    let cited: BTreeSet<&str> = marker()
        .captures_iter(answer)
        .filter_map(|captures| captures[1].parse::<usize>().ok())
        .filter_map(|n| n.checked_sub(1))
        .filter_map(|index| sources.get(index))
        .map(String::as_str)
        .collect();

    cited.into_iter().map(Citation::page).collect()
}
