//! Exhaustive backtracking search over postfix traces

pub mod constants;
mod core;
mod errors;
mod game;
mod rules;
mod stacks;
mod state;

pub use core::{SearchEngine, SearchHooks};
pub use errors::SolverError;
pub use game::{Game, TargetRange};
pub use rules::{Operand, Producer, fold};
pub use stacks::{FixedStack, FrontierEntry, FrontierStack, TokenStack};
pub use state::SearchState;
