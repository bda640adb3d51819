//! Sportsbook backend boundary.
//!
//! This module handles:
//! - The async operations the engine needs from the backend
//! - HTTP client for the storefront REST API
//! - Wire formats of the feed
//! - Mock backend for testing

pub mod client;
pub mod mock;
pub mod wire;

use std::future::Future;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::account::AccountId;
use crate::catalog::{League, Offer};
use crate::error::TransportError;
use crate::slip::SlipSubmission;

pub use client::HttpSportsbook;
pub use mock::{MockConfig, MockOfferBuilder, MockSportsbook};

/// Acknowledgment of an accepted slip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SlipReceipt {
    /// Backend reference for the wager, when it returns one.
    #[serde(default, alias = "confirmationId")]
    pub confirmation_id: Option<String>,
}

/// Acknowledgment of added funds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FundsReceipt {
    /// Balance after the credit, when the backend reports it.
    #[serde(default, alias = "newBalance")]
    pub new_balance: Option<Decimal>,
}

/// Operations the engine consumes from the sportsbook backend.
///
/// Failures are returned as-is; implementations do not retry.
pub trait Sportsbook {
    /// Fetch all leagues with their rounds.
    fn fetch_leagues(&self) -> impl Future<Output = Result<Vec<League>, TransportError>> + Send;

    /// Fetch all offers with their odds.
    fn fetch_offers(&self) -> impl Future<Output = Result<Vec<Offer>, TransportError>> + Send;

    /// Place a validated slip.
    fn submit_slip(
        &self,
        submission: &SlipSubmission,
    ) -> impl Future<Output = Result<SlipReceipt, TransportError>> + Send;

    /// Credit an account.
    fn add_funds(
        &self,
        account_id: AccountId,
        amount: Decimal,
    ) -> impl Future<Output = Result<FundsReceipt, TransportError>> + Send;
}
