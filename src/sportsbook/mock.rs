//! Mock sportsbook for unit testing.
//!
//! This module provides a backend that can be used in tests
//! without making real network requests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use time::OffsetDateTime;

use super::{FundsReceipt, SlipReceipt, Sportsbook};
use crate::account::AccountId;
use crate::catalog::{League, Offer, OfferId, Outcome, OutcomeType};
use crate::error::TransportError;
use crate::slip::SlipSubmission;

/// Configuration for mock backend behavior.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Whether to fail league and offer fetches.
    pub fail_fetch: bool,
    /// Whether to fail slip submissions.
    pub fail_submit: bool,
    /// Whether to fail fund credits.
    pub fail_funds: bool,
    /// Whether fund receipts report the new balance.
    pub report_balance: bool,
    /// Simulated latency in milliseconds.
    pub latency_ms: u64,
}

/// Mock sportsbook for testing.
#[derive(Debug, Clone, Default)]
pub struct MockSportsbook {
    /// Mock configuration.
    config: MockConfig,
    /// Leagues returned by fetches.
    leagues: Arc<Mutex<Vec<League>>>,
    /// Offers returned by fetches.
    offers: Arc<Mutex<Vec<Offer>>>,
    /// Accepted submissions, in order.
    submissions: Arc<Mutex<Vec<SlipSubmission>>>,
    /// Balances after credits.
    balances: Arc<Mutex<HashMap<AccountId, Decimal>>>,
}

impl MockSportsbook {
    /// Create a new mock backend with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock backend with custom configuration.
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Change the failure configuration. Clones share data, not configuration.
    pub fn set_config(&mut self, config: MockConfig) {
        self.config = config;
    }

    /// Replace the served leagues.
    pub fn set_leagues(&self, leagues: Vec<League>) {
        *self.leagues.lock().unwrap() = leagues;
    }

    /// Replace the served offers.
    pub fn set_offers(&self, offers: Vec<Offer>) {
        *self.offers.lock().unwrap() = offers;
    }

    /// Set the backend balance of an account.
    pub fn set_balance(&self, account_id: AccountId, balance: Decimal) {
        self.balances.lock().unwrap().insert(account_id, balance);
    }

    /// Backend balance of an account.
    pub fn balance(&self, account_id: AccountId) -> Decimal {
        self.balances
            .lock()
            .unwrap()
            .get(&account_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Slips accepted so far.
    pub fn submissions(&self) -> Vec<SlipSubmission> {
        self.submissions.lock().unwrap().clone()
    }

    async fn simulate_latency(&self) {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.config.latency_ms)).await;
        }
    }

    fn unavailable(what: &str) -> TransportError {
        TransportError::Rejected {
            status: 503,
            reason: format!("mock {} failure", what),
        }
    }
}

impl Sportsbook for MockSportsbook {
    async fn fetch_leagues(&self) -> Result<Vec<League>, TransportError> {
        self.simulate_latency().await;
        if self.config.fail_fetch {
            return Err(Self::unavailable("league fetch"));
        }
        Ok(self.leagues.lock().unwrap().clone())
    }

    async fn fetch_offers(&self) -> Result<Vec<Offer>, TransportError> {
        self.simulate_latency().await;
        if self.config.fail_fetch {
            return Err(Self::unavailable("offer fetch"));
        }
        Ok(self.offers.lock().unwrap().clone())
    }

    async fn submit_slip(&self, submission: &SlipSubmission) -> Result<SlipReceipt, TransportError> {
        self.simulate_latency().await;
        if self.config.fail_submit {
            return Err(Self::unavailable("submission"));
        }

        let mut submissions = self.submissions.lock().unwrap();
        submissions.push(submission.clone());
        Ok(SlipReceipt {
            confirmation_id: Some(format!("MOCK-{}", submissions.len())),
        })
    }

    async fn add_funds(
        &self,
        account_id: AccountId,
        amount: Decimal,
    ) -> Result<FundsReceipt, TransportError> {
        self.simulate_latency().await;
        if self.config.fail_funds {
            return Err(Self::unavailable("deposit"));
        }

        let mut balances = self.balances.lock().unwrap();
        let balance = balances.entry(account_id).or_insert(Decimal::ZERO);
        *balance += amount;
        Ok(FundsReceipt {
            new_balance: self.config.report_balance.then_some(*balance),
        })
    }
}

/// Builder for mock offers.
pub struct MockOfferBuilder {
    id: OfferId,
    name: String,
    start_time: OffsetDateTime,
    outcomes: Vec<Outcome>,
}

impl MockOfferBuilder {
    /// Create a builder for the given offer id, kicking off at the Unix epoch.
    pub fn new(id: u64) -> Self {
        Self {
            id: OfferId(id),
            name: format!("Match {}", id),
            start_time: OffsetDateTime::UNIX_EPOCH,
            outcomes: Vec::new(),
        }
    }

    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the kick-off time.
    pub fn starts_at(mut self, start_time: OffsetDateTime) -> Self {
        self.start_time = start_time;
        self
    }

    /// Quote an outcome.
    pub fn odds(mut self, outcome_type: OutcomeType, odds: Decimal) -> Self {
        self.outcomes.retain(|o| o.outcome_type != outcome_type);
        self.outcomes.push(Outcome { outcome_type, odds });
        self
    }

    /// Quote 1, X and 2.
    pub fn three_way(self, home: Decimal, draw: Decimal, away: Decimal) -> Self {
        self.odds(OutcomeType::Home, home)
            .odds(OutcomeType::Draw, draw)
            .odds(OutcomeType::Away, away)
    }

    /// Build the offer.
    pub fn build(self) -> Offer {
        Offer {
            id: self.id,
            name: self.name,
            fixture_number: None,
            start_time: self.start_time,
            tv_channel: None,
            has_statistics: false,
            outcomes: self.outcomes,
        }
    }
}
