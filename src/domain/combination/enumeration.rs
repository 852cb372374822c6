//! Full enumeration over every quote of an event.

use super::CombinationGenerator;
use crate::domain::quote::{EventQuoteSet, Leg, Quote};

/// Default upper bound on legs per combination.
pub const DEFAULT_MAX_LEGS: usize = 4;

/// Enumerates every unordered subset of 2..=max_legs quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullEnumerationGenerator {
    max_legs: usize,
}

impl FullEnumerationGenerator {
    pub const fn new(max_legs: usize) -> Self {
        Self { max_legs }
    }

    pub const fn max_legs(&self) -> usize {
        self.max_legs
    }
}

impl Default for FullEnumerationGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LEGS)
    }
}

impl CombinationGenerator for FullEnumerationGenerator {
    fn name(&self) -> &'static str {
        "full_enumeration"
    }

    fn combinations<'a>(
        &'a self,
        set: &'a EventQuoteSet,
    ) -> Box<dyn Iterator<Item = Vec<Leg>> + 'a> {
        Box::new(Combinations::new(set.quotes(), self.max_legs))
    }
}

/// Iterator over subsets of sizes `2..=min(max_size, n)`.
///
/// Sizes ascend; within one size, subsets come in lexicographic index
/// order, so `[a, b, c]` yields `ab, ac, bc, abc`.
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    quotes: &'a [Quote],
    max_size: usize,
    size: usize,
    indices: Vec<usize>,
    fresh: bool,
}

impl<'a> Combinations<'a> {
    pub fn new(quotes: &'a [Quote], max_size: usize) -> Self {
        Self {
            quotes,
            max_size: max_size.min(quotes.len()),
            size: 2,
            indices: Vec::new(),
            fresh: true,
        }
    }

    fn current(&self) -> Vec<Leg> {
        self.indices.iter().map(|&i| Leg::from(&self.quotes[i])).collect()
    }

    /// Move to the next subset of the current size; false when exhausted.
    fn advance(&mut self) -> bool {
        let n = self.quotes.len();
        let k = self.size;
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] != i + n - k) else {
            return false;
        };
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        true
    }
}

impl Iterator for Combinations<'_> {
    type Item = Vec<Leg>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.size > self.max_size {
                return None;
            }
            if self.fresh {
                self.indices = (0..self.size).collect();
                self.fresh = false;
                return Some(self.current());
            }
            if self.advance() {
                return Some(self.current());
            }
            self.size += 1;
            self.fresh = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SourceId;
    use rust_decimal::Decimal;

    fn quotes(labels: &[&str]) -> Vec<Quote> {
        labels
            .iter()
            .map(|label| {
                Quote::try_new(*label, Decimal::TWO, SourceId::from("book"), None).unwrap()
            })
            .collect()
    }

    fn labels(combo: &[Leg]) -> String {
        combo.iter().map(|leg| leg.outcome_label.as_str()).collect()
    }

    #[test]
    fn enumerates_sizes_in_ascending_lexicographic_order() {
        let quotes = quotes(&["a", "b", "c"]);
        let combos: Vec<String> = Combinations::new(&quotes, 4).map(|c| labels(&c)).collect();
        assert_eq!(combos, vec!["ab", "ac", "bc", "abc"]);
    }

    #[test]
    fn counts_match_binomials() {
        // C(6,2) + C(6,3) + C(6,4) = 15 + 20 + 15
        let quotes = quotes(&["a", "b", "c", "d", "e", "f"]);
        assert_eq!(Combinations::new(&quotes, 4).count(), 50);
        // Size capped at 2
        assert_eq!(Combinations::new(&quotes, 2).count(), 15);
    }

    #[test]
    fn fewer_than_two_quotes_yield_nothing() {
        assert_eq!(Combinations::new(&quotes(&["a"]), 4).count(), 0);
        assert_eq!(Combinations::new(&[], 4).count(), 0);
    }

    #[test]
    fn max_size_is_bounded_by_quote_count() {
        let quotes = quotes(&["a", "b"]);
        let combos: Vec<String> = Combinations::new(&quotes, 4).map(|c| labels(&c)).collect();
        assert_eq!(combos, vec!["ab"]);
    }

    #[test]
    fn generator_includes_same_outcome_pairs() {
        let set = EventQuoteSet::new("A vs B", None, quotes(&["a", "a", "b"]));
        let generator = FullEnumerationGenerator::default();
        let combos: Vec<String> = generator.combinations(&set).map(|c| labels(&c)).collect();
        assert_eq!(combos, vec!["aa", "ab", "ab", "aab"]);
        assert_eq!(generator.name(), "full_enumeration");
    }
}
