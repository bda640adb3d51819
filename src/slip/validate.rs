//! Stake validation.

use rust_decimal::Decimal;

use super::selection::SelectionSet;
use crate::error::ValidationError;

/// Check that a stake may be placed on these selections.
///
/// An empty slip is reported before a bad stake.
pub fn validate(stake: Decimal, selections: &SelectionSet) -> Result<(), ValidationError> {
    if selections.is_empty() {
        return Err(ValidationError::EmptySlip);
    }
    if stake <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveStake { stake });
    }
    Ok(())
}
