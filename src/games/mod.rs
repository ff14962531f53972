//! Batch driver over every standard numbers-game selection

mod driver;
mod selections;

pub use driver::{SELECTION_SIZE, STANDARD_CARDS, generate_all};
pub use selections::Selections;
