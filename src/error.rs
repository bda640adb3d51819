//! Unified error types for the bet-slip engine.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::catalog::{LeagueId, OfferId, OutcomeType};

/// Unified error type for the bet-slip engine.
#[derive(Error, Debug)]
pub enum BetslipError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Slip rejected before submission.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Catalog lookup error.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Account state error.
    #[error("account error: {0}")]
    Account(#[from] AccountError),

    /// Failure talking to the sportsbook backend.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Reasons a slip cannot be submitted.
///
/// These never cross the sportsbook boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The slip holds no selections.
    #[error("slip has no selections")]
    EmptySlip,

    /// The stake is zero or negative.
    #[error("stake must be positive, got {stake}")]
    NonPositiveStake {
        /// The rejected stake.
        stake: Decimal,
    },
}

/// Catalog lookup errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No league with this id.
    #[error("unknown league {league_id}")]
    UnknownLeague {
        /// The requested league.
        league_id: LeagueId,
    },

    /// No offer with this id.
    #[error("unknown offer {offer_id}")]
    UnknownOffer {
        /// The requested offer.
        offer_id: OfferId,
    },

    /// The offer exists but does not quote this outcome.
    #[error("offer {offer_id} has no odds for outcome {outcome}")]
    UnknownOutcome {
        /// The offer that was found.
        offer_id: OfferId,
        /// The outcome it does not quote.
        outcome: OutcomeType,
    },
}

/// Account state errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// The operation needs a logged-in account.
    #[error("no account is logged in")]
    NotLoggedIn,

    /// Funds must be added in positive amounts.
    #[error("amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The rejected amount.
        amount: Decimal,
    },

    /// The credit would take the balance out of the decimal range.
    #[error("crediting {amount} overflows the balance")]
    BalanceOverflow {
        /// The rejected amount.
        amount: Decimal,
    },
}

/// Sportsbook transport errors. Reported upward unchanged, never retried.
#[derive(Error, Debug)]
pub enum TransportError {
    /// HTTP request failed.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("request rejected with status {status}: {reason}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Error message from the backend.
        reason: String,
    },

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, BetslipError>;
