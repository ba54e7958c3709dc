//! Crawl frontier
//!
//! This module handles:
//! - FIFO ordering of pending category paths (breadth-first traversal)
//! - The set of category paths already processed
//!
//! Pushes are unconditional. Duplicates are resolved when a path is popped:
//! the driver checks `is_visited` before fetching and drops repeats.

use crate::category::CategoryPath;
use std::collections::{HashSet, VecDeque};
use thiserror::Error;

/// Frontier errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrontierError {
    #[error("Frontier is empty")]
    Empty,
}

/// Pending category paths plus the visited set
#[derive(Debug, Default)]
pub struct Frontier {
    /// Pending paths, in discovery order
    pending: VecDeque<CategoryPath>,

    /// Paths that have been fetched and processed
    visited: HashSet<CategoryPath>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier holding a single starting path
    pub fn with_root(root: CategoryPath) -> Self {
        let mut frontier = Self::new();
        frontier.push(root);
        frontier
    }

    /// Appends a path to the end of the queue
    pub fn push(&mut self, path: CategoryPath) {
        self.pending.push_back(path);
    }

    /// Removes and returns the oldest pending path
    ///
    /// # Errors
    ///
    /// Returns `FrontierError::Empty` when nothing is pending.
    pub fn pop(&mut self) -> Result<CategoryPath, FrontierError> {
        self.pending.pop_front().ok_or(FrontierError::Empty)
    }

    /// Records a path as processed
    pub fn mark_visited(&mut self, path: CategoryPath) {
        self.visited.insert(path);
    }

    /// Checks whether a path has already been processed
    pub fn is_visited(&self, path: &CategoryPath) -> bool {
        self.visited.contains(path)
    }

    /// Returns the number of pending paths
    pub fn size(&self) -> usize {
        self.pending.len()
    }

    /// Returns whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Returns the number of visited paths
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
