use std::sync::Arc;

use crate::expression::{Number, Op, Token};
use crate::solver::errors::SolverError;
use crate::solver::game::Game;
use crate::solver::rules::{Operand, Producer};
use crate::solver::stacks::{FrontierEntry, FrontierStack, TokenStack};

/// Everything one search path needs, in buffers sized once for `capacity` numbers.
///
/// With `u` numbers placed and `k` operators applied, the trace holds `u + k`
/// tokens and the frontier `u - k` entries.
#[derive(Debug)]
pub struct SearchState {
    game: Option<Arc<Game>>,
    used_mask: u64,
    used_count: usize,
    trace: TokenStack,
    frontier: FrontierStack,
}

impl SearchState {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            game: None,
            used_mask: 0,
            used_count: 0,
            trace: TokenStack::with_capacity(2 * capacity - 1),
            frontier: FrontierStack::with_capacity(capacity),
        }
    }

    /// Largest game these buffers can hold
    pub fn capacity(&self) -> usize {
        self.frontier.capacity()
    }

    /// Starts over at the root of a new game, keeping the buffers.
    ///
    /// # Errors
    ///
    /// Returns an error if the game has more numbers than [`Self::capacity`].
    pub fn reset(&mut self, game: Arc<Game>) -> Result<(), SolverError> {
        if game.len() > self.capacity() {
            return Err(SolverError::CapacityExceeded {
                count: game.len(),
                capacity: self.capacity(),
            });
        }
        self.game = Some(game);
        self.used_mask = 0;
        self.used_count = 0;
        self.trace.clear();
        self.frontier.clear();
        Ok(())
    }

    /// Deep-copies another state into this one's buffers.
    ///
    /// Only the shared game handle is shared afterwards; nothing points into
    /// `other`'s buffers.
    ///
    /// # Errors
    ///
    /// Returns an error if `other`'s game has more numbers than [`Self::capacity`].
    pub fn copy_from(&mut self, other: &SearchState) -> Result<(), SolverError> {
        let count = other.game.as_ref().map_or(0, |game| game.len());
        if count > self.capacity() {
            return Err(SolverError::CapacityExceeded {
                count,
                capacity: self.capacity(),
            });
        }
        self.game = other.game.clone();
        self.used_mask = other.used_mask;
        self.used_count = other.used_count;
        self.trace.copy_from(&other.trace);
        self.frontier.copy_from(&other.frontier);
        Ok(())
    }

    pub fn game(&self) -> Option<&Arc<Game>> {
        self.game.as_ref()
    }

    pub fn trace(&self) -> &[Token] {
        self.trace.as_slice()
    }

    pub fn frontier(&self) -> &[FrontierEntry] {
        self.frontier.as_slice()
    }

    pub fn used_mask(&self) -> u64 {
        self.used_mask
    }

    pub fn used_count(&self) -> usize {
        self.used_count
    }

    /// Numbers of the current game not yet placed on this path
    pub fn remaining(&self) -> usize {
        self.game
            .as_ref()
            .map_or(0, |game| game.len() - self.used_count)
    }

    pub(crate) fn is_used(&self, index: usize) -> bool {
        self.used_mask & (1 << index) != 0
    }

    pub(crate) fn push_literal(&mut self, index: usize, value: Number) {
        self.used_mask |= 1 << index;
        self.used_count += 1;
        self.trace.push(Token::Literal(value));
        self.frontier.push(FrontierEntry {
            value,
            end: self.trace.len() - 1,
        });
    }

    pub(crate) fn pop_literal(&mut self, index: usize) {
        self.frontier.pop();
        self.trace.pop();
        self.used_count -= 1;
        self.used_mask &= !(1 << index);
    }

    /// The two topmost frontier entries as `(lhs, rhs)`
    pub(crate) fn operands(&self) -> Option<(Operand, Operand)> {
        match self.frontier.as_slice() {
            [.., lhs, rhs] => Some((self.operand(*lhs), self.operand(*rhs))),
            _ => None,
        }
    }

    fn operand(&self, entry: FrontierEntry) -> Operand {
        let producer = match self.trace.get(entry.end) {
            Some(Token::Operator(op, _)) => entry
                .end
                .checked_sub(1)
                .and_then(|index| self.trace.get(index))
                .map(|inner| Producer {
                    op: *op,
                    inner: inner.value(),
                }),
            _ => None,
        };
        Operand {
            value: entry.value,
            end: entry.end,
            producer,
        }
    }

    pub(crate) fn push_fold(&mut self, op: Op, value: Number) {
        self.frontier.pop();
        self.frontier.pop();
        self.trace.push(Token::Operator(op, value));
        self.frontier.push(FrontierEntry {
            value,
            end: self.trace.len() - 1,
        });
    }

    pub(crate) fn pop_fold(&mut self, lhs: &Operand, rhs: &Operand) {
        self.frontier.pop();
        self.trace.pop();
        self.frontier.push(lhs.entry());
        self.frontier.push(rhs.entry());
    }

    /// The single remaining value, once the frontier has folded to one entry
    pub(crate) fn result(&self) -> Option<Number> {
        match self.frontier.as_slice() {
            [only] => Some(only.value),
            _ => None,
        }
    }
}
