use std::io;

use thiserror::Error;

use crate::solver::SolverError;

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("Worker pool needs at least one thread")]
    NoWorkers,
    #[error("Failed to spawn worker thread {index}: {source}")]
    Spawn {
        index: usize,
        #[source]
        source: io::Error,
    },
    #[error("Game has {count} numbers but workers were sized for {capacity}")]
    CapacityExceeded { count: usize, capacity: usize },
    #[error("Invalid game: {0}")]
    Solver(#[from] SolverError),
}
