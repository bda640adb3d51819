//! Accumulator bet-slip engine for a sports-betting storefront.
//!
//! The engine keeps one selected outcome per match, multiplies the
//! selections' odds into accumulator odds, projects the payout and validates
//! a stake before the slip is handed to the sportsbook backend.
//!
//! # Example
//!
//! ```text
//! Dinamo - Hajduk   1    @ 1.50
//! Rijeka - Osijek   X2   @ 2.00
//! ─────────────────────────────
//! Combined odds:         3.0000
//! Stake:                 10.00
//! Payout:                30.00
//! ```
//!
//! # Modules
//!
//! - [`account`]: Logged-in account and optimistic balance updates
//! - [`catalog`]: Leagues, rounds, offers and odds lookup
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`metrics`]: Slip and boundary metrics
//! - [`session`]: Event handler tying catalog, slip and backend together
//! - [`slip`]: Selections, combined odds, payout and validation
//! - [`sportsbook`]: Backend boundary, HTTP client and mock

pub mod account;
pub mod catalog;
pub mod config;
pub mod error;
pub mod metrics;
pub mod session;
pub mod slip;
pub mod sportsbook;

pub use config::Config;
pub use error::{BetslipError, Result};
pub use session::{BetSession, PendingFunds, PendingSubmission, SlipProjection};
