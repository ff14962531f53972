use std::fmt;

use log::info;

use crate::expression::Number;
use crate::games::selections::Selections;
use crate::pool::{PoolError, WorkerPool};
use crate::solver::{Game, TargetRange};

/// The standard card set: two of each small number and one of each large one
pub const STANDARD_CARDS: [Number; 24] = [
    1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 25, 50, 75, 100,
];

/// Cards dealt per game
pub const SELECTION_SIZE: usize = 6;

/// `numbers: 1 1 2 2 3 3`
struct SelectionHeader<'a>(&'a [Number]);

impl fmt::Display for SelectionHeader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "numbers:")?;
        for number in self.0 {
            write!(f, " {}", number)?;
        }
        Ok(())
    }
}

/// Searches every distinct standard selection against `target`.
///
/// Each selection's header line is printed before its search is dispatched,
/// whether or not it turns out to have solutions. Searches run concurrently,
/// so lines of different selections may interleave. Returns the number of
/// selections searched.
///
/// # Errors
///
/// Returns an error if a selection does not fit the pool's capacity.
pub fn generate_all(pool: &WorkerPool, target: TargetRange) -> Result<usize, PoolError> {
    generate_from(pool, &STANDARD_CARDS, SELECTION_SIZE, target)
}

pub(crate) fn generate_from(
    pool: &WorkerPool,
    cards: &[Number],
    size: usize,
    target: TargetRange,
) -> Result<usize, PoolError> {
    info!(
        "Generating every {}-card selection of {:?} for target {}",
        size, cards, target
    );

    let mut count = 0;
    for numbers in Selections::new(cards, size) {
        pool.announce(SelectionHeader(&numbers));
        pool.generate(Game::new(numbers, target)?)?;
        count += 1;
    }
    pool.wait_idle();

    let stats = pool.stats();
    info!(
        "Searched {} selections: {} solutions, {} forks",
        count, stats.solutions, stats.forks
    );
    Ok(count)
}
