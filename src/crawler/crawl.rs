//! The breadth-first crawl loop

use scraper::Html;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::cancel::CancelToken;
use crate::crawler::content_extraction::{document_links, document_text, document_title};
use crate::crawler::error::CrawlError;
use crate::crawler::fetch::Fetcher;
use crate::crawler::frontier::CrawlState;
use crate::crawler::{CrawledPage, CrawlerConfig};

/// Parse and check a seed URL: absolute, http or https, with a host.
/// The fragment is stripped.
pub fn parse_seed_url(seed: &str) -> Result<Url, CrawlError> {
    let mut url = Url::parse(seed.trim())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CrawlError::InvalidSeed(format!(
            "{seed}: scheme must be http or https"
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(CrawlError::InvalidSeed(format!("{seed}: missing host")));
    }
    url.set_fragment(None);
    Ok(url)
}

/// Crawl a website breadth-first from `seed`
///
/// Fetches run one at a time since link discovery depends on the previous
/// page. Fetch failures and statuses >= 400 are skipped. The crawl stops
/// when the queue empties, `max_pages` pages have been collected, or
/// `cancel` fires; pages collected so far are returned in all cases.
///
/// # Arguments
///
/// * `fetcher` - The network seam
/// * `seed` - Absolute http(s) URL to start from
/// * `config` - The crawler configuration
/// * `cancel` - Aborts the loop, including an in-flight fetch
///
/// # Returns
///
/// Crawled pages in visit order
#[instrument(skip(fetcher, config, cancel))]
pub async fn crawl_website<F: Fetcher>(
    fetcher: &F,
    seed: &str,
    config: &CrawlerConfig,
    cancel: &CancelToken,
) -> Result<Vec<CrawledPage>, CrawlError> {
    let seed = parse_seed_url(seed)?;
    info!(max_pages = config.max_pages, "Starting crawl for {}", seed);

    let mut state = CrawlState::new(&seed, &config.priority_paths);
    let mut pages = Vec::new();

    while pages.len() < config.max_pages {
        if cancel.is_cancelled() {
            warn!("Crawl cancelled after {} pages", pages.len());
            break;
        }
        let Some(url) = state.next_url() else {
            break;
        };

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("Crawl cancelled while fetching {}", url);
                break;
            }
            response = fetcher.fetch(&url) => response,
        };

        let response = match response {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                debug!(status = response.status, "Skipping {}", url);
                continue;
            }
            Err(e) => {
                debug!("Skipping {}: {}", url, e);
                continue;
            }
        };

        let (page, links) = {
            let document = Html::parse_document(&response.body);
            let page = CrawledPage {
                url: url.to_string(),
                title: document_title(&document),
                text: document_text(&document),
            };
            let links = document_links(&document, &url, config.max_links_per_page);
            (page, links)
        };

        let accepted = state.enqueue_all(links);
        debug!(
            text_len = page.text.len(),
            new_links = accepted,
            queue = state.pending(),
            "Crawled {}",
            page.url
        );
        pages.push(page);
    }

    info!(
        visited = state.visited(),
        "Crawl finished with {} pages",
        pages.len()
    );
    Ok(pages)
}
