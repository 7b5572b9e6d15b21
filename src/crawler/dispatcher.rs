//! Crawl dispatcher - work distribution across the worker pool
//!
//! The dispatcher runs a fixed pool of workers for the lifetime of the
//! process. Each worker blocks on the inbound queue, and for every
//! delivered domain drives the pipeline: dedup check, normalize, fetch
//! (gated by robots.txt), extract links, record each link.
//!
//! Failure handling is per item: a fetch or extraction failure is logged
//! and the item is dropped; a persistence failure on one link does not
//! abort the remaining links of the same page. No per-item error ever
//! crosses to a sibling worker. Deliveries are acknowledged after the full
//! pipeline attempt, success or terminal drop alike, so a crash mid-item
//! leads to redelivery and is absorbed by the dedup set.

use crate::crawler::extractor::extract_links;
use crate::crawler::fetcher::PageFetcher;
use crate::queue::DomainQueue;
use crate::storage::LinkStore;
use crate::url::normalize_url;
use crate::HarvestError;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Drives the crawl pipeline over the inbound queue
pub struct Dispatcher {
    queue: Arc<dyn DomainQueue>,
    fetcher: Arc<PageFetcher>,
    store: Arc<dyn LinkStore>,
    processed: Arc<Mutex<HashSet<String>>>,
    workers: usize,
}

impl Dispatcher {
    /// Creates a new dispatcher
    ///
    /// # Arguments
    ///
    /// * `queue` - The inbound domain-name queue
    /// * `fetcher` - The shared page fetcher
    /// * `store` - The result store links are recorded into
    /// * `workers` - Size of the fixed worker pool
    pub fn new(
        queue: Arc<dyn DomainQueue>,
        fetcher: Arc<PageFetcher>,
        store: Arc<dyn LinkStore>,
        workers: usize,
    ) -> Self {
        Self {
            queue,
            fetcher,
            store,
            // One set shared by every worker: the same domain delivered to
            // two workers concurrently must still be fetched at most once.
            processed: Arc::new(Mutex::new(HashSet::new())),
            workers,
        }
    }

    /// Runs the worker pool until the queue closes and drains, or the
    /// shutdown signal stops workers from pulling new items
    ///
    /// # Arguments
    ///
    /// * `shutdown` - Process-wide cancellation signal; flipping it to
    ///   `true` stops workers after their current item
    pub async fn run(self, shutdown: watch::Receiver<bool>) {
        tracing::info!("starting {} crawl workers", self.workers);

        let mut handles = Vec::with_capacity(self.workers);
        for worker_id in 0..self.workers {
            let queue = Arc::clone(&self.queue);
            let fetcher = Arc::clone(&self.fetcher);
            let store = Arc::clone(&self.store);
            let processed = Arc::clone(&self.processed);
            let shutdown = shutdown.clone();

            handles.push(tokio::spawn(worker_loop(
                worker_id, queue, fetcher, store, processed, shutdown,
            )));
        }

        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!("crawl worker panicked: {}", e);
            }
        }

        // Release the queue transport once every worker has drained.
        self.queue.close();

        tracing::info!("crawl dispatcher stopped");
    }
}

/// Pulls items from the queue until it closes or shutdown is signaled
async fn worker_loop(
    worker_id: usize,
    queue: Arc<dyn DomainQueue>,
    fetcher: Arc<PageFetcher>,
    store: Arc<dyn LinkStore>,
    processed: Arc<Mutex<HashSet<String>>>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        if *shutdown.borrow() {
            tracing::debug!("worker {} stopping on shutdown signal", worker_id);
            break;
        }

        tokio::select! {
            _ = shutdown.changed() => {
                tracing::debug!("worker {} stopping on shutdown signal", worker_id);
                break;
            }
            delivery = queue.receive() => {
                let delivery = match delivery {
                    Some(d) => d,
                    None => {
                        tracing::debug!("queue closed, worker {} exiting", worker_id);
                        break;
                    }
                };

                if let Err(e) = process_item(&fetcher, &store, &processed, &delivery.payload).await {
                    tracing::warn!("dropping work item {}: {}", delivery.payload, e);
                }

                // Acknowledge after the attempt, success or drop alike.
                if let Err(e) = queue.acknowledge(delivery).await {
                    tracing::warn!("failed to acknowledge delivery: {}", e);
                }
            }
        }
    }
}

/// Runs the pipeline for one domain-name work item
///
/// Returns `Ok(())` both on success and on a dedup skip; an error means
/// the item was terminally dropped at some pipeline stage.
async fn process_item(
    fetcher: &PageFetcher,
    store: &Arc<dyn LinkStore>,
    processed: &Mutex<HashSet<String>>,
    domain: &str,
) -> Result<(), HarvestError> {
    // Membership check and insertion are one atomic step; the domain is
    // marked before the fetch so a concurrent duplicate delivery skips.
    {
        let mut processed = processed.lock().unwrap();
        if !processed.insert(domain.to_string()) {
            tracing::debug!("domain {} already processed, skipping", domain);
            return Ok(());
        }
    }

    let page_url = normalize_url(domain);

    let body = fetcher.fetch_page(&page_url).await?;

    let links = extract_links(&body).map_err(|message| HarvestError::HtmlParse {
        url: page_url.clone(),
        message,
    })?;

    let mut recorded = 0;
    for link in &links {
        match store.record_link(domain, link) {
            Ok(()) => recorded += 1,
            Err(e) => {
                tracing::warn!("failed to persist link {} for domain {}: {}", link, domain, e);
            }
        }
    }

    tracing::info!("harvested {} links for domain {}", recorded, domain);
    Ok(())
}
