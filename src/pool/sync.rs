//! Lock helpers for the pool.
//!
//! A poisoned lock means some worker panicked in the middle of a state
//! transition, so the active-worker count can no longer be trusted. There is
//! no way to recover a consistent pool from that; the process exits.

use std::sync::{Condvar, Mutex, MutexGuard};

use log::error;

pub(crate) fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> MutexGuard<'a, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(_) => fatal(what),
    }
}

pub(crate) fn wait<'a, T>(
    condvar: &Condvar,
    guard: MutexGuard<'a, T>,
    what: &str,
) -> MutexGuard<'a, T> {
    match condvar.wait(guard) {
        Ok(guard) => guard,
        Err(_) => fatal(what),
    }
}

fn fatal(what: &str) -> ! {
    error!("Synchronization failure: {} lock poisoned", what);
    #[allow(clippy::exit)]
    std::process::exit(1)
}
