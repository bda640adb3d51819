//! Logged-in account and its locally tracked balance.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AccountError;

/// Account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account with a locally displayed balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Account id.
    pub id: AccountId,
    balance: Decimal,
}

/// An optimistic credit awaiting acknowledgment.
///
/// Must be settled with [`Account::confirm`] or [`Account::revert`].
#[must_use]
#[derive(Debug, PartialEq, Eq)]
pub struct PendingCredit {
    amount: Decimal,
}

impl PendingCredit {
    /// Credited amount.
    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

impl Account {
    /// Create an account view with a known balance.
    pub fn new(id: AccountId, balance: Decimal) -> Self {
        Self { id, balance }
    }

    /// Current local balance.
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Credit the balance before the backend acknowledges it.
    pub fn credit_optimistic(&mut self, amount: Decimal) -> Result<PendingCredit, AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::NonPositiveAmount { amount });
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(AccountError::BalanceOverflow { amount })?;
        Ok(PendingCredit { amount })
    }

    /// Settle an acknowledged credit, adopting the backend balance if given.
    pub fn confirm(&mut self, _pending: PendingCredit, server_balance: Option<Decimal>) {
        if let Some(balance) = server_balance {
            self.balance = balance;
        }
    }

    /// Undo a credit the backend did not accept.
    pub fn revert(&mut self, pending: PendingCredit) {
        self.balance = self.balance.saturating_sub(pending.amount);
    }
}
