/// Crawl driver lifecycle
///
/// A driver sits in `Idle` between root categories and in `Running` while
/// its frontier is being drained. Each root category is one
/// `Idle -> Running -> Idle` cycle.
use std::fmt;

/// Represents the current state of the crawl driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CrawlState {
    /// No crawl in progress; ready for a root category
    #[default]
    Idle,

    /// Draining the frontier of a root category
    Running,
}

impl CrawlState {
    /// Returns true if moving from this state to `next` is allowed
    pub fn can_transition_to(&self, next: CrawlState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running) | (Self::Running, Self::Idle)
        )
    }

    /// Returns a lowercase label for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
