//! Accumulator odds and payout projection.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

use super::selection::SelectionSet;

/// Decimal places of combined odds.
pub const ODDS_SCALE: u32 = 4;

/// Decimal places of currency amounts.
pub const CURRENCY_SCALE: u32 = 2;

/// Combined odds of a slip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombinedOdds {
    /// Nothing selected yet. Not a number; renders as a prompt.
    NoSelection,
    /// Product of the selected odds.
    Odds(Decimal),
}

impl CombinedOdds {
    /// The numeric value, if any.
    pub fn value(&self) -> Option<Decimal> {
        match self {
            CombinedOdds::NoSelection => None,
            CombinedOdds::Odds(odds) => Some(*odds),
        }
    }

    /// Check for the empty-slip sentinel.
    pub fn is_no_selection(&self) -> bool {
        matches!(self, CombinedOdds::NoSelection)
    }
}

/// Round half-up (away from zero at the midpoint).
pub fn round_half_up(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

/// Multiply all snapshotted odds, rounding once at the end.
///
/// Saturates at [`Decimal::MAX`] if the product leaves the decimal range.
pub fn combined_odds(selections: &SelectionSet) -> CombinedOdds {
    if selections.is_empty() {
        return CombinedOdds::NoSelection;
    }

    let product = selections
        .iter()
        .try_fold(Decimal::ONE, |acc, s| acc.checked_mul(s.odds))
        .unwrap_or_else(|| {
            warn!(selections = selections.len(), "Combined odds overflow, saturating");
            Decimal::MAX
        });

    CombinedOdds::Odds(round_half_up(product, ODDS_SCALE))
}

/// Projected payout: stake times combined odds, at currency precision.
///
/// An empty slip pays nothing.
pub fn payout(stake: Decimal, combined: CombinedOdds) -> Decimal {
    let zero = Decimal::new(0, CURRENCY_SCALE);
    let Some(odds) = combined.value() else {
        return zero;
    };

    let raw = stake.checked_mul(odds).unwrap_or_else(|| {
        warn!(%stake, %odds, "Payout overflow, saturating");
        if stake.is_sign_negative() != odds.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    });

    round_half_up(raw, CURRENCY_SCALE)
}
