//! Bet session: the single event handler driving catalog, slip and account.
//!
//! Every operation runs to completion before the next one starts. Calls that
//! reach the sportsbook are split into a `begin_*` event, the async call made
//! outside the session, and a `complete_*` event, so toggles and projections
//! keep working while a call is pending. [`BetSession::submit`] and
//! [`BetSession::add_funds`] chain the three steps for callers that are happy
//! to wait.

use std::time::Instant;

use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use crate::account::{Account, AccountId, PendingCredit};
use crate::catalog::{MatchCatalog, OfferId, OutcomeType};
use crate::error::{AccountError, Result, TransportError, ValidationError};
use crate::metrics;
use crate::slip::{CombinedOdds, SelectionSet, Slip, SlipSubmission};
use crate::sportsbook::{FundsReceipt, SlipReceipt, Sportsbook};

/// What the slip would currently pay, and whether it could be placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlipProjection {
    /// Combined odds of the selections.
    pub combined_odds: CombinedOdds,
    /// Stake on the slip.
    pub stake: Decimal,
    /// Projected payout at currency precision.
    pub payout: Decimal,
    /// Result of validating the slip as it stands.
    pub validation: std::result::Result<(), ValidationError>,
}

/// A finalized slip handed to the sportsbook and not yet answered.
#[must_use]
#[derive(Debug)]
pub struct PendingSubmission {
    submission: SlipSubmission,
    started: Instant,
}

impl PendingSubmission {
    /// Payload to send with [`Sportsbook::submit_slip`].
    pub fn submission(&self) -> &SlipSubmission {
        &self.submission
    }
}

/// An optimistic credit whose backend call has not been answered.
#[must_use]
#[derive(Debug)]
pub struct PendingFunds {
    account_id: AccountId,
    credit: PendingCredit,
}

impl PendingFunds {
    /// Account being credited.
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Amount to send with [`Sportsbook::add_funds`].
    pub fn amount(&self) -> Decimal {
        self.credit.amount()
    }
}

/// Fetch leagues and offers and build a fresh catalog.
#[instrument(skip_all)]
pub async fn fetch_catalog<S: Sportsbook>(sportsbook: &S) -> Result<MatchCatalog> {
    let leagues = sportsbook.fetch_leagues().await?;
    let offers = sportsbook.fetch_offers().await?;
    Ok(MatchCatalog::new(leagues, offers))
}

/// One user's betting session.
#[derive(Debug)]
pub struct BetSession<S> {
    sportsbook: S,
    catalog: MatchCatalog,
    slip: Slip,
    account: Option<Account>,
}

impl<S: Sportsbook> BetSession<S> {
    /// Create a session with an empty catalog and slip.
    pub fn new(sportsbook: S) -> Self {
        Self {
            sportsbook,
            catalog: MatchCatalog::default(),
            slip: Slip::new(),
            account: None,
        }
    }

    /// The backend this session talks to.
    pub fn sportsbook(&self) -> &S {
        &self.sportsbook
    }

    /// Mutable access to the backend.
    pub fn sportsbook_mut(&mut self) -> &mut S {
        &mut self.sportsbook
    }

    /// Catalog as of the last refresh.
    pub fn catalog(&self) -> &MatchCatalog {
        &self.catalog
    }

    /// Current slip.
    pub fn slip(&self) -> &Slip {
        &self.slip
    }

    /// Logged-in account, if any.
    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    /// Swap in a freshly fetched catalog.
    ///
    /// Selections already on the slip keep their snapshotted odds.
    pub fn replace_catalog(&mut self, catalog: MatchCatalog) {
        self.catalog = catalog;
        info!(
            leagues = self.catalog.leagues().len(),
            offers = self.catalog.offer_count(),
            "Catalog refreshed"
        );
    }

    /// Fetch and install a new catalog. A failed fetch keeps the old one.
    pub async fn refresh_catalog(&mut self) -> Result<()> {
        let catalog = fetch_catalog(&self.sportsbook).await?;
        self.replace_catalog(catalog);
        Ok(())
    }

    /// Start using an account whose balance is already known.
    pub fn login(&mut self, account_id: AccountId, balance: Decimal) {
        info!(%account_id, "Logged in");
        self.account = Some(Account::new(account_id, balance));
    }

    /// Forget the account and clear the slip.
    pub fn logout(&mut self) {
        if let Some(account) = self.account.take() {
            info!(account_id = %account.id, "Logged out");
        }
        self.slip.clear();
    }

    /// Toggle an outcome, snapshotting the catalog's current odds.
    pub fn toggle(&mut self, offer_id: OfferId, outcome_type: OutcomeType) -> Result<&SelectionSet> {
        let odds = self.catalog.outcome_odds(offer_id, outcome_type)?;
        metrics::inc_slip_toggles();
        debug!(%offer_id, %outcome_type, %odds, "Toggling selection");
        Ok(self.slip.toggle(offer_id, outcome_type, odds))
    }

    /// Set the stake.
    pub fn set_stake(&mut self, stake: Decimal) {
        self.slip.set_stake(stake);
    }

    /// Clear the slip.
    pub fn reset(&mut self) {
        self.slip.clear();
    }

    /// Current odds, payout and validation state.
    pub fn projection(&self) -> SlipProjection {
        SlipProjection {
            combined_odds: self.slip.combined_odds(),
            stake: self.slip.stake(),
            payout: self.slip.payout(),
            validation: self.slip.validate(),
        }
    }

    /// Validate and freeze the slip for submission.
    ///
    /// The slip itself is left in place and may keep changing while the call
    /// is pending.
    pub fn begin_submit(&self) -> Result<PendingSubmission> {
        // Slip errors are reported ahead of a missing login.
        self.slip.validate()?;
        let account_id = self
            .account
            .as_ref()
            .map(|a| a.id)
            .ok_or(AccountError::NotLoggedIn)?;
        let submission = self.slip.finalize(account_id)?;

        debug!(%account_id, selections = submission.selections().len(), "Submitting slip");
        Ok(PendingSubmission {
            submission,
            started: Instant::now(),
        })
    }

    /// Record the sportsbook's answer to a submission.
    ///
    /// On success the slip is cleared, unless it was edited after
    /// [`begin_submit`](Self::begin_submit); the edits are kept as a new draft.
    pub fn complete_submit(
        &mut self,
        pending: PendingSubmission,
        result: std::result::Result<SlipReceipt, TransportError>,
    ) -> Result<SlipReceipt> {
        let PendingSubmission {
            submission,
            started,
        } = pending;
        let account_id = submission.account_id();

        match result {
            Ok(receipt) => {
                metrics::record_slip_submit_latency(started);
                metrics::inc_slip_submissions();
                info!(
                    %account_id,
                    selections = submission.selections().len(),
                    stake = %submission.stake(),
                    confirmation = ?receipt.confirmation_id,
                    "Slip accepted"
                );
                if self.slip.matches(&submission) {
                    self.slip.clear();
                } else {
                    debug!(%account_id, "Slip edited while pending, keeping edits");
                }
                Ok(receipt)
            }
            Err(e) => {
                metrics::inc_slip_submission_failures();
                warn!(%account_id, error = %e, "Slip submission failed");
                Err(e.into())
            }
        }
    }

    /// Validate and place the slip, waiting for the answer.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> Result<SlipReceipt> {
        let pending = self.begin_submit()?;
        let result = self.sportsbook.submit_slip(pending.submission()).await;
        self.complete_submit(pending, result)
    }

    /// Credit the logged-in account right away, ahead of the backend call.
    pub fn begin_add_funds(&mut self, amount: Decimal) -> Result<PendingFunds> {
        let account = self.account.as_mut().ok_or(AccountError::NotLoggedIn)?;
        let credit = account.credit_optimistic(amount)?;

        debug!(account_id = %account.id, %amount, balance = %account.balance(), "Credited optimistically");
        Ok(PendingFunds {
            account_id: account.id,
            credit,
        })
    }

    /// Settle an optimistic credit with the sportsbook's answer.
    ///
    /// A failed call reverts the credit. Returns the balance after settling,
    /// or `None` if the account logged out while the call was pending.
    pub fn complete_add_funds(
        &mut self,
        pending: PendingFunds,
        result: std::result::Result<FundsReceipt, TransportError>,
    ) -> Result<Option<Decimal>> {
        let PendingFunds { account_id, credit } = pending;
        let account = self.account.as_mut().filter(|a| a.id == account_id);

        match result {
            Ok(receipt) => {
                let Some(account) = account else {
                    info!(%account_id, "Funds added after logout");
                    return Ok(None);
                };
                account.confirm(credit, receipt.new_balance);
                info!(%account_id, balance = %account.balance(), "Funds added");
                Ok(Some(account.balance()))
            }
            Err(e) => {
                if let Some(account) = account {
                    account.revert(credit);
                }
                metrics::inc_funds_reverted();
                warn!(%account_id, error = %e, "Adding funds failed, credit reverted");
                Err(e.into())
            }
        }
    }

    /// Add funds and wait for the backend. Returns the balance after the credit.
    #[instrument(skip(self))]
    pub async fn add_funds(&mut self, amount: Decimal) -> Result<Decimal> {
        let pending = self.begin_add_funds(amount)?;
        let result = self
            .sportsbook
            .add_funds(pending.account_id(), pending.amount())
            .await;
        self.complete_add_funds(pending, result)?
            .ok_or_else(|| AccountError::NotLoggedIn.into())
    }
}
