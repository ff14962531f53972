use crate::expression::PrintStyle;
use crate::solver::constants::{MAX_NUMBERS, SLACK_THRESHOLD};

/// Configuration for a [`WorkerPool`](super::WorkerPool).
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of persistent worker threads.
    pub threads: usize,
    /// Largest game each worker's buffers are sized for.
    pub capacity: usize,
    /// How solutions are printed.
    pub style: PrintStyle,
    /// A branch is only handed to another worker while more than this many
    /// numbers are still unused on it.
    pub slack: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            threads: available_threads(),
            capacity: MAX_NUMBERS,
            style: PrintStyle::default(),
            slack: SLACK_THRESHOLD,
        }
    }
}

fn available_threads() -> usize {
    std::thread::available_parallelism()
        .map(|threads| threads.get())
        .unwrap_or(1)
}

impl PoolConfig {
    /// Set the number of worker threads (at least one).
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// Set the thread count from an Option, keeping the default on `None`.
    pub fn with_threads_option(self, threads: Option<usize>) -> Self {
        match threads {
            Some(threads) => self.with_threads(threads),
            None => self,
        }
    }

    /// Size worker buffers for games of up to `capacity` numbers.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.clamp(1, MAX_NUMBERS);
        self
    }

    pub fn with_style(mut self, style: PrintStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_slack(mut self, slack: usize) -> Self {
        self.slack = slack;
        self
    }
}
