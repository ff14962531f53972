//! Numbers - exhaustive solver for the numbers round of a letters-and-numbers game
//!
//! Given a handful of positive integers and a target (or an inclusive target
//! range), this library enumerates every essentially distinct way of combining
//! the numbers with `+ - * /` so that every intermediate result stays a
//! positive integer and the final value hits the target. Commutative and
//! associative re-arrangements of the same calculation are reported once.

pub mod expression;
pub mod games;
pub mod pool;
pub mod solver;
pub mod utils;

// Re-export the main public API
pub use expression::{ExpressionError, Number, PrintStyle, SolutionLine};
pub use pool::{PoolConfig, PoolError, WorkerPool};
pub use solver::{Game, SearchEngine, SearchHooks, SolverError, TargetRange};
pub use utils::{UtilsError, parse_number, parse_target};

use std::sync::Arc;

use expression::Token;

/// Solve one game on a fresh worker pool, printing every solution to stdout
///
/// # Arguments
///
/// * `numbers` - The positive integers available, each usable at most once
/// * `target` - The exact target or inclusive target range
/// * `config` - Thread count, output style and fork threshold for the pool
///
/// # Returns
///
/// The number of solution lines printed.
///
/// # Errors
///
/// This function will return an error if:
/// * `numbers` is empty, contains a zero or has more than 64 entries
/// * The pool cannot start its worker threads
///
/// # Examples
///
/// ```no_run
/// use numbers::{PoolConfig, TargetRange, solve};
///
/// match solve(&[25, 50, 75, 100, 3, 6], TargetRange::exact(952), &PoolConfig::default()) {
///     Ok(count) => println!("{} solutions", count),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub fn solve(numbers: &[Number], target: TargetRange, config: &PoolConfig) -> Result<u64, PoolError> {
    let game = Game::new(numbers.to_vec(), target)?;
    let pool = WorkerPool::new(config.clone().with_capacity(game.len()))?;
    let found = pool.solve(game)?;
    pool.shutdown();
    Ok(found)
}

/// Collect every solution line of one game on the calling thread
///
/// Lines come back in search order, formatted exactly as the pool would
/// print them.
///
/// # Errors
///
/// Returns an error if `numbers` is empty, contains a zero or has more than
/// 64 entries.
///
/// # Examples
///
/// ```
/// use numbers::{PrintStyle, TargetRange, solutions};
///
/// let lines = solutions(&[1, 2], TargetRange::exact(3), PrintStyle::Expr);
/// assert_eq!(lines.ok(), Some(vec!["2 + 1".to_string()]));
/// ```
pub fn solutions(
    numbers: &[Number],
    target: TargetRange,
    style: PrintStyle,
) -> Result<Vec<String>, SolverError> {
    let game = Game::new(numbers.to_vec(), target)?;
    let mut engine = SearchEngine::new(game.len());
    engine.state_mut().reset(Arc::new(game))?;

    let mut collector = LineCollector {
        style,
        lines: Vec::new(),
    };
    engine.run(&mut collector);
    Ok(collector.lines)
}

struct LineCollector {
    style: PrintStyle,
    lines: Vec<String>,
}

impl SearchHooks for LineCollector {
    fn report(&mut self, game: &Game, trace: &[Token]) {
        let show_value = !game.target().is_exact();
        self.lines
            .push(SolutionLine::new(trace, self.style, show_value).to_string());
    }
}
