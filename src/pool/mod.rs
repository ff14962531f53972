//! Persistent worker threads that split a running search between them

mod config;
mod core;
mod errors;
mod output;
mod sync;
mod worker;

pub use config::PoolConfig;
pub use core::{PoolStats, WorkerPool, WorkerStatus};
pub use errors::PoolError;

#[cfg(test)]
mod tests;
