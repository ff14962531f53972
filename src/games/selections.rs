use crate::expression::Number;

/// Every distinct `size`-element sub-multiset of a multiset of cards.
///
/// Index combinations are walked in lexicographic order. A combination is
/// only yielded when, for each run of equal cards, it picks a prefix of the
/// run, so each distinct selection appears exactly once and sorted ascending.
#[derive(Debug, Clone)]
pub struct Selections {
    cards: Vec<Number>,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Selections {
    pub fn new(cards: &[Number], size: usize) -> Self {
        let mut cards = cards.to_vec();
        cards.sort_unstable();
        Self {
            done: size > cards.len(),
            cards,
            indices: (0..size).collect(),
            started: false,
        }
    }

    fn advance(&mut self) -> bool {
        let n = self.cards.len();
        let k = self.indices.len();
        let mut position = k;
        while position > 0 {
            position -= 1;
            if self.indices[position] < n - k + position {
                self.indices[position] += 1;
                for next in position + 1..k {
                    self.indices[next] = self.indices[next - 1] + 1;
                }
                return true;
            }
        }
        false
    }

    fn is_canonical(&self) -> bool {
        self.indices.iter().enumerate().all(|(position, &index)| {
            index == 0
                || self.cards[index] != self.cards[index - 1]
                || (position > 0 && self.indices[position - 1] == index - 1)
        })
    }
}

impl Iterator for Selections {
    type Item = Vec<Number>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            if self.started {
                if !self.advance() {
                    self.done = true;
                    return None;
                }
            } else {
                self.started = true;
            }

            if self.is_canonical() {
                return Some(self.indices.iter().map(|&index| self.cards[index]).collect());
            }
        }
        None
    }
}
