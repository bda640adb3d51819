//! Selection set: the chosen outcomes on a slip, one per offer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{OfferId, OutcomeType};

/// A chosen outcome with the odds captured when it was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Offer the outcome belongs to.
    pub offer_id: OfferId,
    /// Chosen outcome.
    pub outcome_type: OutcomeType,
    /// Odds at selection time. Later catalog refreshes do not change it.
    pub odds: Decimal,
}

/// Immutable set of selections in insertion order.
///
/// Holds at most one selection per offer. [`SelectionSet::toggle`] is the
/// only transition that adds or removes selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SelectionSet {
    selections: Vec<Selection>,
}

impl SelectionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle an outcome, returning the next set.
    ///
    /// - the same outcome already selected: it is removed;
    /// - another outcome of the same offer selected: it is replaced and the
    ///   new selection moves to the end;
    /// - otherwise the selection is appended.
    #[must_use]
    pub fn toggle(&self, offer_id: OfferId, outcome_type: OutcomeType, odds: Decimal) -> Self {
        let mut selections = self.selections.clone();
        let selection = Selection {
            offer_id,
            outcome_type,
            odds,
        };

        match selections.iter().position(|s| s.offer_id == offer_id) {
            Some(idx) if selections[idx].outcome_type == outcome_type => {
                selections.remove(idx);
            }
            Some(idx) => {
                selections.remove(idx);
                selections.push(selection);
            }
            None => selections.push(selection),
        }

        let next = Self { selections };
        debug_assert!(next.is_exclusive(), "two selections share an offer: {:?}", next);
        next
    }

    /// The empty set.
    #[must_use]
    pub fn clear(&self) -> Self {
        Self::new()
    }

    /// Number of selections.
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Selections in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Selection> {
        self.selections.iter()
    }

    /// Selections as a slice.
    pub fn as_slice(&self) -> &[Selection] {
        &self.selections
    }

    /// The selection for an offer, if any.
    pub fn get(&self, offer_id: OfferId) -> Option<&Selection> {
        self.selections.iter().find(|s| s.offer_id == offer_id)
    }

    /// Check if this exact outcome is selected.
    pub fn contains(&self, offer_id: OfferId, outcome_type: OutcomeType) -> bool {
        self.get(offer_id)
            .is_some_and(|s| s.outcome_type == outcome_type)
    }

    fn is_exclusive(&self) -> bool {
        self.selections
            .iter()
            .enumerate()
            .all(|(i, a)| self.selections[i + 1..].iter().all(|b| b.offer_id != a.offer_id))
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a Selection;
    type IntoIter = std::slice::Iter<'a, Selection>;

    fn into_iter(self) -> Self::IntoIter {
        self.selections.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use strum::IntoEnumIterator;

    const O1: OfferId = OfferId(1);
    const O2: OfferId = OfferId(2);

    #[test]
    fn toggle_inserts_new_selection() {
        let set = SelectionSet::new().toggle(O1, OutcomeType::Home, dec!(1.50));

        assert_eq!(set.len(), 1);
        assert!(set.contains(O1, OutcomeType::Home));
    }

    #[test]
    fn toggle_same_outcome_removes_it() {
        let set = SelectionSet::new()
            .toggle(O1, OutcomeType::Home, dec!(1.50))
            .toggle(O1, OutcomeType::Home, dec!(1.50));

        assert!(set.is_empty());
    }

    #[test]
    fn toggle_other_outcome_replaces_it() {
        let set = SelectionSet::new()
            .toggle(O1, OutcomeType::Home, dec!(1.5))
            .toggle(O1, OutcomeType::Away, dec!(2.0));

        assert_eq!(
            set.as_slice(),
            &[Selection {
                offer_id: O1,
                outcome_type: OutcomeType::Away,
                odds: dec!(2.0),
            }]
        );
    }

    #[test]
    fn replacement_moves_selection_to_end() {
        let set = SelectionSet::new()
            .toggle(O1, OutcomeType::Home, dec!(1.5))
            .toggle(O2, OutcomeType::Draw, dec!(3.1))
            .toggle(O1, OutcomeType::Away, dec!(2.0));

        let offers: Vec<OfferId> = set.iter().map(|s| s.offer_id).collect();
        assert_eq!(offers, vec![O2, O1]);
    }

    #[test]
    fn double_toggle_restores_prior_state() {
        let base = SelectionSet::new()
            .toggle(O1, OutcomeType::Home, dec!(1.5))
            .toggle(O2, OutcomeType::Draw, dec!(3.1));

        let offer = OfferId(3);
        for outcome in OutcomeType::iter() {
            let round_trip = base
                .toggle(offer, outcome, dec!(2.25))
                .toggle(offer, outcome, dec!(2.25));
            assert_eq!(round_trip, base);
        }
    }

    #[test]
    fn toggle_leaves_original_untouched() {
        let base = SelectionSet::new().toggle(O1, OutcomeType::Home, dec!(1.5));
        let _next = base.toggle(O1, OutcomeType::Home, dec!(1.5));

        assert_eq!(base.len(), 1);
    }

    #[test]
    fn at_most_one_selection_per_offer_over_long_sequences() {
        let outcomes: Vec<OutcomeType> = OutcomeType::iter().collect();
        let mut set = SelectionSet::new();
        // Deterministic pseudo-random walk over 5 offers and all outcomes.
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        for _ in 0..2_000 {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            let offer = OfferId(seed % 5);
            let outcome = outcomes[((seed >> 8) % outcomes.len() as u64) as usize];
            set = set.toggle(offer, outcome, dec!(1.10));

            let mut offers: Vec<OfferId> = set.iter().map(|s| s.offer_id).collect();
            offers.sort();
            offers.dedup();
            assert_eq!(offers.len(), set.len());
        }
    }

    #[test]
    fn clear_empties_the_set() {
        let set = SelectionSet::new()
            .toggle(O1, OutcomeType::Home, dec!(1.5))
            .toggle(O2, OutcomeType::Away, dec!(2.5));

        assert!(set.clear().is_empty());
    }
}
