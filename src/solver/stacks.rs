//! Fixed-capacity stacks backing one search.
//!
//! # Invariants
//! - `len <= slots.len()` at all times.
//! - Slots are allocated once; pushing never reallocates.
//!
//! The token stack records the postfix trace of the current search path and
//! doubles as its undo log. The frontier stack holds the subexpressions not yet
//! folded, each pointing at the trace index where it ends.

use std::fmt;
use std::ops::Deref;

use crate::expression::{Number, Token};

/// A pending subexpression: its value and the trace index of its last token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrontierEntry {
    pub value: Number,
    pub end: usize,
}

/// Stack over a buffer sized once at construction.
///
/// # Panics
/// - `push` panics if the stack is full. The search sizes its stacks so
///   that this cannot happen for a game that fits the capacity.
pub struct FixedStack<T> {
    slots: Box<[T]>,
    len: usize,
}

pub type TokenStack = FixedStack<Token>;
pub type FrontierStack = FixedStack<FrontierEntry>;

impl<T: Copy + Default> FixedStack<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![T::default(); capacity].into_boxed_slice(),
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn push(&mut self, item: T) {
        assert!(self.len < self.slots.len(), "FixedStack capacity exceeded");
        self.slots[self.len] = item;
        self.len += 1;
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(self.slots[self.len])
    }

    pub fn top(&self) -> Option<T> {
        self.len.checked_sub(1).map(|index| self.slots[index])
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Overwrites this stack with the contents of `other` without reallocating.
    ///
    /// # Panics
    /// - Panics if `other` holds more items than this stack can.
    pub fn copy_from(&mut self, other: &FixedStack<T>) {
        let items = other.as_slice();
        assert!(
            items.len() <= self.slots.len(),
            "FixedStack capacity exceeded"
        );
        self.slots[..items.len()].copy_from_slice(items);
        self.len = items.len();
    }
}

impl<T> FixedStack<T> {
    pub fn as_slice(&self) -> &[T] {
        &self.slots[..self.len]
    }
}

impl<T> Deref for FixedStack<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for FixedStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_slice().fmt(f)
    }
}
