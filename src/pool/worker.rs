use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crossbeam_utils::sync::{Parker, Unparker};
use log::debug;

use crate::expression::Token;
use crate::pool::core::Shared;
use crate::pool::sync::lock;
use crate::solver::{Game, SearchEngine, SearchHooks, SearchState};

/// One worker's private engine and the handles used to wake it.
///
/// The engine is locked by its own thread while it runs and by a forking
/// worker only while this worker is Idle, so the lock is never contended.
/// The matching [`Parker`] lives on the worker thread.
pub(crate) struct WorkerSlot {
    pub(crate) engine: Mutex<SearchEngine>,
    pending: AtomicBool,
    live: AtomicBool,
    unparker: Unparker,
}

impl WorkerSlot {
    pub(crate) fn new(capacity: usize) -> (Self, Parker) {
        let parker = Parker::new();
        let slot = Self {
            engine: Mutex::new(SearchEngine::new(capacity)),
            pending: AtomicBool::new(false),
            live: AtomicBool::new(true),
            unparker: parker.unparker().clone(),
        };
        (slot, parker)
    }

    /// Signals the worker once its new state has been fully written
    pub(crate) fn wake(&self) {
        self.pending.store(true, Ordering::Release);
        self.unparker.unpark();
    }

    pub(crate) fn stop(&self) {
        self.live.store(false, Ordering::Release);
        self.unparker.unpark();
    }

    /// Blocks until there is work. Returns `false` once the worker should exit.
    ///
    /// Pending work is always taken before the liveness flag is looked at.
    fn wait_for_work(&self, parker: &Parker) -> bool {
        loop {
            if self.pending.swap(false, Ordering::AcqRel) {
                return true;
            }
            if !self.live.load(Ordering::Acquire) {
                return false;
            }
            parker.park();
        }
    }
}

struct WorkerHooks<'a> {
    shared: &'a Shared,
    index: usize,
}

impl SearchHooks for WorkerHooks<'_> {
    fn report(&mut self, game: &Game, trace: &[Token]) {
        self.shared.report(game, trace);
    }

    fn try_fork(&mut self, state: &SearchState) -> bool {
        self.shared.fork(self.index, state)
    }
}

pub(crate) fn worker_loop(shared: Arc<Shared>, index: usize, parker: Parker) {
    debug!("Worker {} started", index);
    let slot = &shared.workers[index];

    while slot.wait_for_work(&parker) {
        {
            let mut engine = lock(&slot.engine, "engine");
            let mut hooks = WorkerHooks {
                shared: &shared,
                index,
            };
            engine.run(&mut hooks);
        }
        shared.complete(index);
    }

    shared.terminate(index);
    debug!("Worker {} stopped", index);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wake_before_wait_is_not_lost() {
        let (slot, parker) = WorkerSlot::new(2);
        slot.wake();
        assert!(slot.wait_for_work(&parker));
    }

    #[test]
    fn test_pending_work_is_taken_before_stop() {
        let (slot, parker) = WorkerSlot::new(2);
        slot.wake();
        slot.stop();
        assert!(slot.wait_for_work(&parker));
        assert!(!slot.wait_for_work(&parker));
    }

    #[test]
    fn test_wake_from_another_thread() {
        let (slot, parker) = WorkerSlot::new(2);
        let slot = Arc::new(slot);
        let waker = Arc::clone(&slot);
        let handle = std::thread::spawn(move || waker.wake());
        assert!(slot.wait_for_work(&parker));
        assert!(handle.join().is_ok());
    }
}
