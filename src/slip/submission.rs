//! The slip (selections plus stake) and its finalized submission payload.

use rust_decimal::Decimal;
use serde::Serialize;

use super::odds::{combined_odds, payout, CombinedOdds};
use super::selection::{Selection, SelectionSet};
use super::validate::validate;
use crate::account::AccountId;
use crate::catalog::{OfferId, OutcomeType};
use crate::error::ValidationError;

/// Working slip for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slip {
    selections: SelectionSet,
    stake: Decimal,
}

impl Slip {
    /// Create an empty slip with zero stake.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current selections.
    pub fn selections(&self) -> &SelectionSet {
        &self.selections
    }

    /// Current stake.
    pub fn stake(&self) -> Decimal {
        self.stake
    }

    /// Toggle an outcome with the odds quoted right now.
    pub fn toggle(
        &mut self,
        offer_id: OfferId,
        outcome_type: OutcomeType,
        odds: Decimal,
    ) -> &SelectionSet {
        self.selections = self.selections.toggle(offer_id, outcome_type, odds);
        &self.selections
    }

    /// Set the stake. Checked only at validation time.
    pub fn set_stake(&mut self, stake: Decimal) {
        self.stake = stake;
    }

    /// Drop all selections and reset the stake.
    pub fn clear(&mut self) {
        self.selections = self.selections.clear();
        self.stake = Decimal::ZERO;
    }

    /// Combined odds of the current selections.
    pub fn combined_odds(&self) -> CombinedOdds {
        combined_odds(&self.selections)
    }

    /// Projected payout for the current stake.
    pub fn payout(&self) -> Decimal {
        payout(self.stake, self.combined_odds())
    }

    /// Validate the current stake against the current selections.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate(self.stake, &self.selections)
    }

    /// Freeze the slip into a payload for the sportsbook.
    pub fn finalize(&self, account_id: AccountId) -> Result<SlipSubmission, ValidationError> {
        self.validate()?;
        Ok(SlipSubmission {
            account_id,
            selections: self.selections.as_slice().to_vec(),
            stake: self.stake,
        })
    }

    /// Check whether the slip still holds exactly what was finalized.
    pub fn matches(&self, submission: &SlipSubmission) -> bool {
        self.stake == submission.stake && self.selections.as_slice() == submission.selections()
    }
}

/// A validated slip ready for the sportsbook.
///
/// Only [`Slip::finalize`] builds one, so every instance has passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlipSubmission {
    account_id: AccountId,
    selections: Vec<Selection>,
    stake: Decimal,
}

impl SlipSubmission {
    /// Account placing the wager.
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Selections with their snapshotted odds.
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// Stake amount.
    pub fn stake(&self) -> Decimal {
        self.stake
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn projection_follows_toggles() {
        let mut slip = Slip::new();
        assert_eq!(slip.combined_odds(), CombinedOdds::NoSelection);

        slip.set_stake(dec!(10.00));
        slip.toggle(OfferId(1), OutcomeType::Home, dec!(1.50));
        slip.toggle(OfferId(2), OutcomeType::Draw, dec!(2.00));

        assert_eq!(slip.combined_odds(), CombinedOdds::Odds(dec!(3.0000)));
        assert_eq!(slip.payout(), dec!(30.00));
    }

    #[test]
    fn finalize_requires_valid_slip() {
        let mut slip = Slip::new();
        slip.set_stake(dec!(10));
        assert_eq!(slip.finalize(AccountId(1)), Err(ValidationError::EmptySlip));

        slip.toggle(OfferId(1), OutcomeType::Home, dec!(1.50));
        slip.set_stake(dec!(0));
        assert_eq!(
            slip.finalize(AccountId(1)),
            Err(ValidationError::NonPositiveStake { stake: dec!(0) })
        );
    }

    #[test]
    fn finalize_copies_selections_and_stake() {
        let mut slip = Slip::new();
        slip.toggle(OfferId(4), OutcomeType::Away, dec!(2.10));
        slip.set_stake(dec!(5));

        let submission = slip.finalize(AccountId(9)).unwrap();
        assert_eq!(submission.account_id(), AccountId(9));
        assert_eq!(submission.stake(), dec!(5));
        assert_eq!(submission.selections().len(), 1);
        assert_eq!(submission.selections()[0].odds, dec!(2.10));
    }

    #[test]
    fn matches_detects_later_edits() {
        let mut slip = Slip::new();
        slip.toggle(OfferId(4), OutcomeType::Away, dec!(2.10));
        slip.set_stake(dec!(5));
        let submission = slip.finalize(AccountId(9)).unwrap();
        assert!(slip.matches(&submission));

        slip.toggle(OfferId(5), OutcomeType::Home, dec!(1.40));
        assert!(!slip.matches(&submission));

        slip.toggle(OfferId(5), OutcomeType::Home, dec!(1.40));
        slip.set_stake(dec!(6));
        assert!(!slip.matches(&submission));
    }

    #[test]
    fn clear_resets_everything() {
        let mut slip = Slip::new();
        slip.toggle(OfferId(4), OutcomeType::Away, dec!(2.10));
        slip.set_stake(dec!(5));
        slip.clear();

        assert_eq!(slip, Slip::new());
    }
}
