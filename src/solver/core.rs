use std::sync::Arc;

use log::debug;

use crate::expression::{Op, Token};
use crate::solver::game::Game;
use crate::solver::rules::fold;
use crate::solver::state::SearchState;

/// Callbacks the search makes while it walks the tree
pub trait SearchHooks {
    /// Called with the full trace whenever it folds to a value inside the target range
    fn report(&mut self, game: &Game, trace: &[Token]);

    /// Offers the freshly extended `state` to someone else.
    ///
    /// Returning `true` means the subtree below `state` is now theirs and the
    /// caller must not explore it.
    fn try_fork(&mut self, _state: &SearchState) -> bool {
        false
    }
}

/// One private search: its state buffers and the recursive walk over them
#[derive(Debug)]
pub struct SearchEngine {
    state: SearchState,
}

impl SearchEngine {
    /// Create an engine whose buffers hold games of up to `capacity` numbers
    pub fn new(capacity: usize) -> Self {
        Self {
            state: SearchState::with_capacity(capacity),
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SearchState {
        &mut self.state
    }

    /// Explores everything reachable from the current state.
    ///
    /// On a freshly reset state this is the whole game. On a state copied from
    /// another engine it is exactly the subtree that engine handed over.
    pub fn run<H: SearchHooks + ?Sized>(&mut self, hooks: &mut H) {
        let Some(game) = self.state.game().map(Arc::clone) else {
            debug!("Search engine started without a game");
            return;
        };
        self.explore(&game, hooks);
    }

    fn explore<H: SearchHooks + ?Sized>(&mut self, game: &Game, hooks: &mut H) {
        if let Some(value) = self.state.result()
            && game.target().contains(value)
        {
            hooks.report(game, self.state.trace());
        }
        self.explore_operators(game, hooks);
        self.explore_numbers(game, hooks);
    }

    fn descend<H: SearchHooks + ?Sized>(&mut self, game: &Game, hooks: &mut H) {
        if hooks.try_fork(&self.state) {
            return;
        }
        self.explore(game, hooks);
    }

    fn explore_numbers<H: SearchHooks + ?Sized>(&mut self, game: &Game, hooks: &mut H) {
        if self.state.used_count() == game.len() {
            return;
        }

        for (index, &number) in game.numbers().iter().enumerate() {
            if self.state.is_used(index) {
                continue;
            }
            self.state.push_literal(index, number);
            self.descend(game, hooks);
            self.state.pop_literal(index);
        }
    }

    fn explore_operators<H: SearchHooks + ?Sized>(&mut self, game: &Game, hooks: &mut H) {
        let Some((lhs, rhs)) = self.state.operands() else {
            return;
        };
        if lhs.value < rhs.value {
            return;
        }

        for op in Op::ALL {
            let Some(value) = fold(op, &lhs, &rhs) else {
                continue;
            };
            self.state.push_fold(op, value);
            self.descend(game, hooks);
            self.state.pop_fold(&lhs, &rhs);
        }
    }
}
