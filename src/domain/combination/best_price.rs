//! Best price per outcome slot.

use super::{CombinationGenerator, SlotMatching};
use crate::domain::quote::{EventQuoteSet, Leg, Quote};

/// Default number of outcome slots (two-way markets).
pub const DEFAULT_SLOT_COUNT: usize = 2;

/// Picks, independently per slot, the provider quoting the highest price.
///
/// Produces at most one combination per event. When several providers
/// offer the same best price, the first one seen keeps the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestPriceGenerator {
    slot_count: usize,
    matching: SlotMatching,
}

impl BestPriceGenerator {
    pub const fn new(slot_count: usize, matching: SlotMatching) -> Self {
        Self {
            slot_count,
            matching,
        }
    }

    pub const fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub const fn matching(&self) -> SlotMatching {
        self.matching
    }

    /// The single best-price combination, if every slot is filled.
    pub fn best_legs(&self, set: &EventQuoteSet) -> Option<Vec<Leg>> {
        let slots = match self.matching {
            SlotMatching::Positional => self.positional_slots(set),
            SlotMatching::Label => self.label_slots(set)?,
        };
        slots
            .into_iter()
            .map(|slot| slot.map(Leg::from))
            .collect()
    }

    fn positional_slots<'a>(&self, set: &'a EventQuoteSet) -> Vec<Option<&'a Quote>> {
        let mut best: Vec<Option<&Quote>> = vec![None; self.slot_count];
        for group in set.provider_groups() {
            for (slot, current) in best.iter_mut().enumerate() {
                if let Some(quote) = group.get(slot) {
                    keep_better(current, quote);
                }
            }
        }
        best
    }

    fn label_slots<'a>(&self, set: &'a EventQuoteSet) -> Option<Vec<Option<&'a Quote>>> {
        let labels = set.outcome_labels();
        if labels.len() != self.slot_count {
            return None;
        }
        let slots = labels
            .iter()
            .map(|label| {
                let mut best = None;
                for quote in set.quotes().iter().filter(|q| q.outcome_label() == *label) {
                    keep_better(&mut best, quote);
                }
                best
            })
            .collect();
        Some(slots)
    }
}

fn keep_better<'a>(current: &mut Option<&'a Quote>, candidate: &'a Quote) {
    if current.map_or(true, |best| candidate.price() > best.price()) {
        *current = Some(candidate);
    }
}

impl Default for BestPriceGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SLOT_COUNT, SlotMatching::default())
    }
}

impl CombinationGenerator for BestPriceGenerator {
    fn name(&self) -> &'static str {
        "best_price"
    }

    fn combinations<'a>(
        &'a self,
        set: &'a EventQuoteSet,
    ) -> Box<dyn Iterator<Item = Vec<Leg>> + 'a> {
        Box::new(self.best_legs(set).into_iter())
    }
}
