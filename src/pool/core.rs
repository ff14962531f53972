use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

use log::{debug, info, trace, warn};

use crate::expression::{PrintStyle, SolutionLine, Token};
use crate::pool::config::PoolConfig;
use crate::pool::errors::PoolError;
use crate::pool::output::OutputSink;
use crate::pool::sync::{lock, wait};
use crate::pool::worker::{WorkerSlot, worker_loop};
use crate::solver::constants::MAX_NUMBERS;
use crate::solver::{Game, SearchState};

/// Lifecycle of one worker thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerStatus {
    Idle,
    Active,
    Terminated,
}

/// Running totals over the lifetime of a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    /// Searches dispatched through `solve` or `generate`.
    pub searches: u64,
    /// Branches handed from a busy worker to an idle one.
    pub forks: u64,
    /// Solution lines written.
    pub solutions: u64,
}

/// Everything the pool lock guards.
///
/// `active` is the single source of truth for whether work is outstanding.
pub(crate) struct PoolState {
    active: usize,
    status: Vec<WorkerStatus>,
}

impl PoolState {
    fn first_idle(&self) -> Option<usize> {
        self.status
            .iter()
            .position(|&status| status == WorkerStatus::Idle)
    }

    fn idle_count(&self) -> usize {
        self.status
            .iter()
            .filter(|&&status| status == WorkerStatus::Idle)
            .count()
    }
}

/// State shared between the pool handle and its worker threads
pub(crate) struct Shared {
    state: Mutex<PoolState>,
    /// Notified whenever a worker goes back to Idle.
    finished: Condvar,
    pub(crate) workers: Vec<WorkerSlot>,
    /// Idle worker count, readable without the lock to skip hopeless fork attempts.
    idle: AtomicUsize,
    output: OutputSink,
    style: PrintStyle,
    slack: usize,
    searches: AtomicU64,
    forks: AtomicU64,
    solutions: AtomicU64,
}

impl Shared {
    pub(crate) fn report(&self, game: &Game, trace: &[Token]) {
        self.solutions.fetch_add(1, Ordering::Relaxed);
        let show_value = !game.target().is_exact();
        self.output
            .emit(SolutionLine::new(trace, self.style, show_value));
    }

    /// Hands the subtree below `state` to an idle worker, if there is one.
    pub(crate) fn fork(&self, source: usize, state: &SearchState) -> bool {
        if state.remaining() <= self.slack || self.idle.load(Ordering::Relaxed) == 0 {
            return false;
        }

        let target = {
            let mut pool = lock(&self.state, "pool");
            let Some(target) = pool.first_idle() else {
                return false;
            };
            let copied = lock(&self.workers[target].engine, "engine")
                .state_mut()
                .copy_from(state);
            if let Err(err) = copied {
                warn!("Worker {} could not take a fork: {}", target, err);
                return false;
            }
            self.activate(&mut pool, target);
            target
        };

        self.forks.fetch_add(1, Ordering::Relaxed);
        trace!(
            "Worker {} forked a branch with {} unused numbers onto worker {}",
            source,
            state.remaining(),
            target
        );
        self.workers[target].wake();
        true
    }

    /// Marks a worker Idle again after it ran out of work.
    pub(crate) fn complete(&self, index: usize) {
        let mut pool = lock(&self.state, "pool");
        pool.status[index] = WorkerStatus::Idle;
        pool.active -= 1;
        self.idle.store(pool.idle_count(), Ordering::Relaxed);
        if pool.active == 0 {
            trace!("All workers idle");
        }
        self.finished.notify_all();
    }

    pub(crate) fn terminate(&self, index: usize) {
        let mut pool = lock(&self.state, "pool");
        pool.status[index] = WorkerStatus::Terminated;
        self.idle.store(pool.idle_count(), Ordering::Relaxed);
    }

    fn activate(&self, pool: &mut PoolState, index: usize) {
        pool.status[index] = WorkerStatus::Active;
        pool.active += 1;
        self.idle.store(pool.idle_count(), Ordering::Relaxed);
    }

    /// Resets an idle worker onto a new game. The caller wakes it after
    /// releasing the pool lock.
    fn dispatch(
        &self,
        pool: &mut PoolState,
        index: usize,
        game: Arc<Game>,
    ) -> Result<(), PoolError> {
        lock(&self.workers[index].engine, "engine")
            .state_mut()
            .reset(game)?;
        self.activate(pool, index);
        self.searches.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// A fixed set of worker threads, each with its own search buffers.
///
/// Workers are created once and reused for every search until the pool is
/// dropped. While a search runs, a worker that extends a branch with enough
/// unused numbers left copies it onto an idle worker and moves on to its
/// next sibling.
pub struct WorkerPool {
    shared: Arc<Shared>,
    handles: Vec<JoinHandle<()>>,
    capacity: usize,
}

impl WorkerPool {
    /// Create a pool that prints solutions to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if `config.threads` is zero or a thread cannot be spawned.
    pub fn new(config: PoolConfig) -> Result<Self, PoolError> {
        Self::build(config, OutputSink::stdout())
    }

    /// Create a pool that writes solution lines to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config.threads` is zero or a thread cannot be spawned.
    pub fn with_writer(
        config: PoolConfig,
        writer: Box<dyn Write + Send>,
    ) -> Result<Self, PoolError> {
        Self::build(config, OutputSink::new(writer))
    }

    fn build(config: PoolConfig, output: OutputSink) -> Result<Self, PoolError> {
        if config.threads == 0 {
            return Err(PoolError::NoWorkers);
        }
        let capacity = config.capacity.clamp(1, MAX_NUMBERS);

        debug!(
            "Starting {} workers sized for {} numbers",
            config.threads, capacity
        );

        let mut parkers = Vec::with_capacity(config.threads);
        let workers = (0..config.threads)
            .map(|_| {
                let (slot, parker) = WorkerSlot::new(capacity);
                parkers.push(parker);
                slot
            })
            .collect();

        let shared = Arc::new(Shared {
            state: Mutex::new(PoolState {
                active: 0,
                status: vec![WorkerStatus::Idle; config.threads],
            }),
            finished: Condvar::new(),
            workers,
            idle: AtomicUsize::new(config.threads),
            output,
            style: config.style,
            slack: config.slack,
            searches: AtomicU64::new(0),
            forks: AtomicU64::new(0),
            solutions: AtomicU64::new(0),
        });

        let mut pool = Self {
            shared,
            handles: Vec::with_capacity(config.threads),
            capacity,
        };

        for (index, parker) in parkers.into_iter().enumerate() {
            let shared = Arc::clone(&pool.shared);
            let handle = thread::Builder::new()
                .name(format!("numbers-worker-{}", index))
                .spawn(move || worker_loop(shared, index, parker))
                .map_err(|source| PoolError::Spawn { index, source })?;
            pool.handles.push(handle);
        }

        Ok(pool)
    }

    pub fn threads(&self) -> usize {
        self.shared.workers.len()
    }

    /// Largest game the workers' buffers hold
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Runs one search to completion and returns how many solutions it printed.
    ///
    /// Waits for any work already in flight before starting on worker 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the game has more numbers than the pool's capacity.
    pub fn solve(&self, game: Game) -> Result<u64, PoolError> {
        let game = self.admit(game)?;
        info!(
            "Solving {:?} -> {} on {} workers",
            game.numbers(),
            game.target(),
            self.threads()
        );

        let mut pool = lock(&self.shared.state, "pool");
        while pool.active > 0 {
            pool = wait(&self.shared.finished, pool, "pool");
        }
        let before = self.shared.solutions.load(Ordering::Relaxed);
        self.shared.dispatch(&mut pool, 0, game)?;
        drop(pool);

        self.shared.workers[0].wake();
        self.wait_idle();

        let found = self.shared.solutions.load(Ordering::Relaxed) - before;
        info!("Search finished with {} solutions", found);
        Ok(found)
    }

    /// Starts a search on the first idle worker without waiting for it to finish.
    ///
    /// Blocks only while every worker is busy. Use [`Self::wait_idle`] to wait
    /// for all dispatched searches.
    ///
    /// # Errors
    ///
    /// Returns an error if the game has more numbers than the pool's capacity.
    pub fn generate(&self, game: Game) -> Result<(), PoolError> {
        let game = self.admit(game)?;

        let index = {
            let mut pool = lock(&self.shared.state, "pool");
            let index = loop {
                if let Some(index) = pool.first_idle() {
                    break index;
                }
                pool = wait(&self.shared.finished, pool, "pool");
            };
            self.shared.dispatch(&mut pool, index, game)?;
            index
        };

        debug!("Dispatched search onto worker {}", index);
        self.shared.workers[index].wake();
        Ok(())
    }

    /// Blocks until no worker is active, then flushes the output.
    pub fn wait_idle(&self) {
        let mut pool = lock(&self.shared.state, "pool");
        while pool.active > 0 {
            pool = wait(&self.shared.finished, pool, "pool");
        }
        drop(pool);
        self.shared.output.flush();
    }

    /// Writes a line of its own through the serialized output
    pub fn announce(&self, line: impl fmt::Display) {
        self.shared.output.emit(line);
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            searches: self.shared.searches.load(Ordering::Relaxed),
            forks: self.shared.forks.load(Ordering::Relaxed),
            solutions: self.shared.solutions.load(Ordering::Relaxed),
        }
    }

    pub fn statuses(&self) -> Vec<WorkerStatus> {
        lock(&self.shared.state, "pool").status.clone()
    }

    /// Finishes outstanding work, stops every worker and joins the threads.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn admit(&self, game: Game) -> Result<Arc<Game>, PoolError> {
        if game.len() > self.capacity {
            return Err(PoolError::CapacityExceeded {
                count: game.len(),
                capacity: self.capacity,
            });
        }
        Ok(Arc::new(game))
    }

    fn stop(&mut self) {
        if self.handles.is_empty() {
            return;
        }
        self.wait_idle();

        for slot in &self.shared.workers {
            slot.stop();
        }
        for (index, handle) in self.handles.drain(..).enumerate() {
            if handle.join().is_err() {
                warn!("Worker {} panicked before shutdown", index);
            }
        }

        let stats = self.stats();
        debug!(
            "Worker pool stopped after {} searches, {} forks, {} solutions",
            stats.searches, stats.forks, stats.solutions
        );
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.stop();
    }
}
