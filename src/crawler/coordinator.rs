//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop for one root category:
//! - Seeding a fresh frontier with `/{locale}/{root}`
//! - Popping categories in FIFO order and dropping already-visited ones
//! - Rotating the HTTP session after a fixed number of requests
//! - Waiting out failed fetches with an escalating, uncapped backoff
//! - Writing extracted sites and queueing in-scope subcategories
//!
//! The loop is strictly sequential: one category is fully resolved,
//! including any backoff waits, before the next one is popped.

use crate::category::{is_descendant, CategoryPath};
use crate::config::Config;
use crate::crawler::backoff::Backoff;
use crate::crawler::fetcher::{FetchResult, HttpFetcher, PageFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::{PageContent, PageExtractor};
use crate::crawler::session::Session;
use crate::output::{CrawlReport, ResultSink};
use crate::state::CrawlState;
use crate::CanopyError;

/// Main crawler coordinator structure
pub struct Coordinator<F> {
    config: Config,
    fetcher: F,
    extractor: PageExtractor,
    state: CrawlState,
}

impl Coordinator<HttpFetcher> {
    /// Creates a coordinator that fetches pages over HTTP
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(CanopyError)` - Invalid base URL or page selectors
    pub fn new(config: Config) -> Result<Self, CanopyError> {
        let extractor = PageExtractor::new(&config.page)?;
        let fetcher = HttpFetcher::new(&config.site, extractor.clone())?;
        Ok(Self {
            config,
            fetcher,
            extractor,
            state: CrawlState::Idle,
        })
    }
}

impl<F: PageFetcher> Coordinator<F> {
    /// Creates a coordinator around a custom page fetcher
    pub fn with_fetcher(config: Config, fetcher: F) -> Result<Self, CanopyError> {
        let extractor = PageExtractor::new(&config.page)?;
        Ok(Self {
            config,
            fetcher,
            extractor,
            state: CrawlState::Idle,
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// The page fetcher in use
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Crawls every category under one root until the frontier drains
    ///
    /// Each call starts from a fresh frontier and a fresh HTTP session.
    /// Fetch failures never end the crawl; they are retried after a
    /// growing wait.
    ///
    /// # Arguments
    ///
    /// * `root_name` - Top-level category name, e.g. `Business`
    /// * `sink` - Destination for extracted sites
    ///
    /// # Errors
    ///
    /// * `CanopyError::Category` - The root name is empty
    /// * `CanopyError::Output` - The sink could not be opened or written
    /// * `CanopyError::Http` - A new HTTP session could not be built
    pub async fn crawl_one_category<S: ResultSink + ?Sized>(
        &mut self,
        root_name: &str,
        sink: &S,
    ) -> Result<CrawlReport, CanopyError> {
        let root_name = root_name.trim().trim_matches('/');
        let root = CategoryPath::from_root(&self.config.site.locale, root_name)?;

        self.transition(CrawlState::Running)?;
        let result = self.drain(root, root_name, sink).await;
        self.transition(CrawlState::Idle)?;

        let report = result?;
        tracing::info!(
            "Finished {}: {} categories, {} sites written to {}",
            report.root,
            report.categories_crawled,
            report.entries_written,
            sink.destination()
        );
        Ok(report)
    }

    async fn drain<S: ResultSink + ?Sized>(
        &self,
        root: CategoryPath,
        root_name: &str,
        sink: &S,
    ) -> Result<CrawlReport, CanopyError> {
        let http = &self.config.http;
        let user_agent = &self.config.user_agent;

        let mut report = CrawlReport::new(root_name);
        let mut session = Session::open(http, user_agent)?;

        tracing::info!("Just added {}", root);
        let mut frontier = Frontier::with_root(root);

        while !frontier.is_empty() {
            let path = frontier.pop()?;

            if frontier.is_visited(&path) {
                tracing::trace!("Skipping already visited {}", path);
                report.duplicates_skipped += 1;
                continue;
            }

            tracing::info!("Scraping {}. Queue size: {}", path, frontier.size());

            if session.is_exhausted(http.session_max_requests) {
                session = session.rotate(http, user_agent)?;
                report.session_rotations += 1;
                tracing::info!(
                    "Opened HTTP session #{} after {} requests",
                    session.generation(),
                    http.session_max_requests
                );
            }
            session.record_request();

            let Some(page) = self.fetch_with_backoff(&session, &path, &mut report).await else {
                frontier.mark_visited(path);
                continue;
            };

            let entries = self.extractor.extract_entries(&page, &path);
            sink.append(&entries)?;
            report.entries_written += entries.len() as u64;
            report.categories_crawled += 1;

            let subcategories = self.extractor.extract_subcategories(&page);
            frontier.mark_visited(path);

            for href in subcategories {
                if !is_descendant(&href, root_name) {
                    tracing::trace!("Out of scope: {}", href);
                    report.subcategories_rejected += 1;
                    continue;
                }
                match CategoryPath::parse(&href) {
                    Ok(subcategory) => {
                        tracing::info!("Just added {}", subcategory);
                        frontier.push(subcategory);
                    }
                    Err(e) => {
                        tracing::debug!("Ignoring subcategory: {}", e);
                        report.subcategories_rejected += 1;
                    }
                }
            }
        }

        tracing::debug!(
            "Frontier for {} drained after {} distinct categories",
            report.root,
            frontier.visited_count()
        );
        report.finish();
        Ok(report)
    }

    /// Fetches a category, waiting and retrying until a usable page arrives
    ///
    /// The first retry waits the configured initial delay; every further
    /// failure adds the configured step. Returns `None` when the failure
    /// cannot be fixed by waiting, such as a path that is not a valid URL.
    async fn fetch_with_backoff(
        &self,
        session: &Session,
        path: &CategoryPath,
        report: &mut CrawlReport,
    ) -> Option<PageContent> {
        let mut backoff = Backoff::new(&self.config.backoff);

        loop {
            let failure = match self.fetcher.fetch(session, path).await {
                FetchResult::Success(page) => return Some(page),
                failure => failure,
            };

            if !failure.is_retryable() {
                tracing::error!("Skipping {}: {}", path, failure);
                return None;
            }

            let delay = backoff.next_delay();
            report.fetch_retries += 1;
            tracing::warn!(
                "Fetching {} failed ({}); retry #{} in {}s",
                path,
                failure,
                backoff.attempts(),
                delay.as_secs()
            );
            tokio::time::sleep(delay).await;
        }
    }

    fn transition(&mut self, to: CrawlState) -> Result<(), CanopyError> {
        if !self.state.can_transition_to(to) {
            return Err(CanopyError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        tracing::trace!("Crawl state {} -> {}", self.state, to);
        self.state = to;
        Ok(())
    }
}

/// Crawls one root category over HTTP with a fresh coordinator
///
/// # Example
///
/// ```no_run
/// use canopy_crawler::config::Config;
/// use canopy_crawler::crawler::crawl_one_category;
/// use canopy_crawler::output::JsonLinesSink;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let sink = JsonLinesSink::new("business.jsonl");
/// let report = crawl_one_category(Config::default(), "Business", &sink).await?;
/// println!("{} sites", report.entries_written);
/// # Ok(())
/// # }
/// ```
pub async fn crawl_one_category<S: ResultSink + ?Sized>(
    config: Config,
    root_name: &str,
    sink: &S,
) -> Result<CrawlReport, CanopyError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.crawl_one_category(root_name, sink).await
}
