//! Breadth-first crawl state: the work queue and the visited set.

use std::collections::{HashSet, VecDeque};

use url::Url;

/// Queue and visited set owned by a single crawl.
///
/// URLs are keyed by their string form after resolution and fragment
/// removal. A URL popped once is never handed out again, whether or not its
/// fetch succeeded.
#[derive(Debug)]
pub struct CrawlState {
    host: String,
    queue: VecDeque<Url>,
    queued: HashSet<String>,
    visited: HashSet<String>,
}

impl CrawlState {
    /// Seed the state. Priority paths are resolved against the seed's origin
    /// and queued ahead of the seed itself.
    pub fn new(seed: &Url, priority_paths: &[String]) -> Self {
        let mut state = Self {
            host: seed.host_str().unwrap_or_default().to_ascii_lowercase(),
            queue: VecDeque::new(),
            queued: HashSet::new(),
            visited: HashSet::new(),
        };

        let origin = seed.origin().ascii_serialization();
        for path in priority_paths {
            if let Ok(url) = Url::parse(&origin).and_then(|base| base.join(path)) {
                state.enqueue(url);
            }
        }
        state.enqueue(seed.clone());
        state
    }

    /// Whether `url` is an http(s) URL on the crawl's host
    pub fn is_same_host(&self, url: &Url) -> bool {
        matches!(url.scheme(), "http" | "https")
            && url
                .host_str()
                .is_some_and(|host| host.eq_ignore_ascii_case(&self.host))
    }

    /// Queue `url` unless it is off-host, already visited or already queued.
    /// Returns whether it was queued.
    pub fn enqueue(&mut self, mut url: Url) -> bool {
        url.set_fragment(None);
        if !self.is_same_host(&url) {
            return false;
        }
        let key = url.as_str().to_string();
        if self.visited.contains(&key) || self.queued.contains(&key) {
            return false;
        }
        self.queued.insert(key);
        self.queue.push_back(url);
        true
    }

    /// Queue every link in order, returning how many were accepted
    pub fn enqueue_all(&mut self, links: impl IntoIterator<Item = Url>) -> usize {
        links
            .into_iter()
            .fold(0, |accepted, link| accepted + usize::from(self.enqueue(link)))
    }

    /// Pop the next unvisited URL and mark it visited
    pub fn next_url(&mut self) -> Option<Url> {
        while let Some(url) = self.queue.pop_front() {
            let key = url.as_str().to_string();
            self.queued.remove(&key);
            if self.visited.insert(key) {
                return Some(url);
            }
        }
        None
    }

    /// Number of URLs waiting in the queue
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Number of URLs handed out so far
    pub fn visited(&self) -> usize {
        self.visited.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_seed_only() {
        let mut state = CrawlState::new(&url("https://acme.example.com/"), &[]);

        assert_eq!(state.pending(), 1);
        assert_eq!(
            state.next_url().unwrap().as_str(),
            "https://acme.example.com/"
        );
        assert!(state.next_url().is_none());
        assert_eq!(state.visited(), 1);
    }

    #[test]
    fn test_priority_paths_resolve_against_origin_and_precede_seed() {
        let paths = vec!["/pricing".to_string(), "/faq".to_string()];
        let mut state = CrawlState::new(&url("https://acme.example.com/blog/post?x=1"), &paths);

        let order: Vec<String> = std::iter::from_fn(|| state.next_url())
            .map(|u| u.to_string())
            .collect();
        assert_eq!(
            order,
            vec![
                "https://acme.example.com/pricing",
                "https://acme.example.com/faq",
                "https://acme.example.com/blog/post?x=1",
            ]
        );
    }

    #[test]
    fn test_cross_host_and_non_http_links_are_discarded() {
        let mut state = CrawlState::new(&url("https://acme.example.com/"), &[]);

        assert!(!state.enqueue(url("https://other.example.com/")));
        assert!(!state.enqueue(url("mailto:hello@acme.example.com")));
        assert!(!state.enqueue(url("ftp://acme.example.com/file")));
        assert!(state.enqueue(url("http://acme.example.com/about")));
    }

    #[test]
    fn test_no_duplicate_queueing_or_revisits() {
        let mut state = CrawlState::new(&url("https://acme.example.com/"), &[]);

        assert!(state.enqueue(url("https://acme.example.com/a#top")));
        assert!(!state.enqueue(url("https://acme.example.com/a")));
        assert_eq!(state.pending(), 2);

        state.next_url();
        state.next_url();
        assert!(!state.enqueue(url("https://acme.example.com/")));
        assert!(!state.enqueue(url("https://acme.example.com/a")));
        assert!(state.next_url().is_none());
    }

    #[test]
    fn test_enqueue_all_counts_accepted() {
        let mut state = CrawlState::new(&url("https://acme.example.com/"), &[]);
        let accepted = state.enqueue_all(vec![
            url("https://acme.example.com/x"),
            url("https://acme.example.com/x"),
            url("https://elsewhere.example.com/"),
            url("https://acme.example.com/y"),
        ]);

        assert_eq!(accepted, 2);
    }
}
