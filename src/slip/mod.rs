//! Bet-slip engine.
//!
//! This module handles:
//! - Selection state with one outcome per offer
//! - Combined odds and payout projection
//! - Stake validation and the finalized submission payload

pub mod odds;
pub mod selection;
pub mod submission;
pub mod validate;

pub use odds::{combined_odds, payout, CombinedOdds};
pub use selection::{Selection, SelectionSet};
pub use submission::{Slip, SlipSubmission};
pub use validate::validate;
