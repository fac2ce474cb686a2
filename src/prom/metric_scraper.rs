use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use thiserror::Error;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::model::MetricFamilies;
use super::parser::parse;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("failed to scrape {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("scrape timed out after {0:?}")]
    Timeout(Duration),
}

/// Something that hands out the current exposition text.
#[async_trait]
pub trait MetricSource: Send + Sync {
    fn describe(&self) -> &str;

    async fn fetch(&self) -> Result<String, ScrapeError>;
}

/// Fetches the metrics text with an HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: &str, timeout: Duration) -> Result<HttpSource, ScrapeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ScrapeError::Request {
                url: url.to_string(),
                source,
            })?;
        Ok(HttpSource {
            client,
            url: url.to_string(),
            timeout,
        })
    }
}

#[async_trait]
impl MetricSource for HttpSource {
    fn describe(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<String, ScrapeError> {
        let to_error = |source: reqwest::Error| {
            if source.is_timeout() {
                ScrapeError::Timeout(self.timeout)
            } else {
                ScrapeError::Request {
                    url: self.url.clone(),
                    source,
                }
            }
        };
        let response = self.client.get(&self.url).send().await.map_err(to_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: self.url.clone(),
                status,
            });
        }
        response.text().await.map_err(to_error)
    }
}

/// The latest state published by the scraper.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub families: MetricFamilies,
    pub last_success: Option<DateTime<Local>>,
    pub last_error: Option<String>,
    pub scrapes: u64,
    pub failures: u64,
}

struct Shared {
    source: Arc<dyn MetricSource>,
    snapshot: RwLock<Snapshot>,
    in_flight: AtomicBool,
    refresh: Notify,
}

/// Clears the single-flight flag even if the scrape future is dropped.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Shared {
    /// Returns false when another scrape was already running.
    async fn scrape_once(&self) -> bool {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            log::debug!("Scrape of {} already in flight, skipping", self.source.describe());
            return false;
        }
        let _guard = InFlight(&self.in_flight);

        // parse outside the write lock
        let result = self.source.fetch().await.map(|text| parse(&text));
        let mut snapshot = self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        snapshot.scrapes += 1;
        match result {
            Ok(families) => {
                log::info!(
                    "Scraped {} metric families from {}",
                    families.len(),
                    self.source.describe()
                );
                snapshot.families = families;
                snapshot.last_success = Some(Local::now());
                snapshot.last_error = None;
            }
            Err(e) => {
                log::warn!("Scrape failed: {e}");
                snapshot.failures += 1;
                snapshot.last_error = Some(e.to_string());
            }
        }
        true
    }
}

/// Periodically scrapes a [`MetricSource`] and keeps the newest parse.
///
/// Only one fetch is outstanding at any time. The polling task runs until
/// [`MetricScraper::stop`] is called or the scraper is dropped.
pub struct MetricScraper {
    shared: Arc<Shared>,
    stop_tx: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl MetricScraper {
    pub fn new(source: Arc<dyn MetricSource>) -> MetricScraper {
        let (stop_tx, _) = watch::channel(false);
        MetricScraper {
            shared: Arc::new(Shared {
                source,
                snapshot: RwLock::new(Snapshot::default()),
                in_flight: AtomicBool::new(false),
                refresh: Notify::new(),
            }),
            stop_tx,
            handle: None,
        }
    }

    /// Spawns the polling task on the current tokio runtime. The first
    /// scrape happens immediately.
    pub fn start(&mut self, interval: Duration) {
        if self.is_running() {
            log::warn!("Scraper for {} is already running", self.shared.source.describe());
            return;
        }
        self.stop_tx.send_replace(false);
        let stop_rx = self.stop_tx.subscribe();
        let shared = Arc::clone(&self.shared);
        log::info!(
            "Scraping {} every {}s",
            shared.source.describe(),
            interval.as_secs_f64()
        );
        self.handle = Some(tokio::spawn(poll(shared, interval, stop_rx)));
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Scrapes right away on the caller's task. Returns false if a scrape
    /// was already in flight.
    pub async fn scrape_now(&self) -> bool {
        self.shared.scrape_once().await
    }

    /// Asks the polling task for an extra scrape. Coalesced with one that
    /// is already running.
    pub fn refresh(&self) {
        self.shared.refresh.notify_one();
    }

    pub fn stop(&self) {
        self.stop_tx.send_replace(true);
    }

    /// Stops the polling task and waits for it to exit.
    pub async fn shutdown(mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                log::error!("Scraper task ended abnormally: {e}");
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.shared
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Drop for MetricScraper {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll(shared: Arc<Shared>, interval: Duration, mut stop_rx: watch::Receiver<bool>) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            _ = wait_for_stop(&mut stop_rx) => break,
            _ = ticker.tick() => {}
            _ = shared.refresh.notified() => {}
        }
        tokio::select! {
            _ = wait_for_stop(&mut stop_rx) => break,
            _ = shared.scrape_once() => {}
        }
    }
    log::info!("Stopped scraping {}", shared.source.describe());
}

async fn wait_for_stop(stop_rx: &mut watch::Receiver<bool>) {
    while !*stop_rx.borrow_and_update() {
        if stop_rx.changed().await.is_err() {
            return;
        }
    }
}
