//! Match catalog: leagues, rounds and offers with their odds.
//!
//! This module handles:
//! - Catalog data types and the outcome label table
//! - League-to-offer resolution and ordering
//! - Odds lookup for new selections

pub mod index;
pub mod types;

pub use index::MatchCatalog;
pub use types::{League, LeagueId, Offer, OfferId, Outcome, OutcomeType, Round};
