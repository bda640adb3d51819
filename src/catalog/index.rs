//! Read-only catalog queries over the fetched leagues and offers.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use strum::IntoEnumIterator;
use tracing::{debug, warn};

use super::types::{League, LeagueId, Offer, OfferId, OutcomeType};
use crate::error::CatalogError;
use crate::metrics;

/// Snapshot of leagues and offers as last fetched.
///
/// The catalog never mutates after construction; a refresh builds a new one.
#[derive(Debug, Clone, Default)]
pub struct MatchCatalog {
    leagues: Vec<League>,
    offers: HashMap<OfferId, Offer>,
}

impl MatchCatalog {
    /// Build a catalog. A repeated offer id keeps the last occurrence.
    pub fn new(leagues: Vec<League>, offers: Vec<Offer>) -> Self {
        let mut by_id = HashMap::with_capacity(offers.len());
        for offer in offers {
            if let Some(previous) = by_id.insert(offer.id, offer) {
                warn!(offer_id = %previous.id, "Duplicate offer in feed, keeping the later one");
            }
        }

        debug!(leagues = leagues.len(), offers = by_id.len(), "Catalog built");

        Self {
            leagues,
            offers: by_id,
        }
    }

    /// All leagues in feed order.
    pub fn leagues(&self) -> &[League] {
        &self.leagues
    }

    /// Look up a league.
    pub fn league(&self, id: LeagueId) -> Option<&League> {
        self.leagues.iter().find(|l| l.id == id)
    }

    /// Look up an offer.
    pub fn offer(&self, id: OfferId) -> Option<&Offer> {
        self.offers.get(&id)
    }

    /// Number of offers in the catalog.
    pub fn offer_count(&self) -> usize {
        self.offers.len()
    }

    /// Check if nothing has been loaded.
    pub fn is_empty(&self) -> bool {
        self.leagues.is_empty() && self.offers.is_empty()
    }

    /// Offers visible under a league, earliest kick-off first.
    ///
    /// Round references are deduplicated. References to offers missing from
    /// the catalog are logged and skipped. Equal start times are ordered by
    /// offer id.
    pub fn offers_for_league(&self, league: &League) -> Vec<&Offer> {
        let mut seen = HashSet::new();
        let mut offers = Vec::new();

        for offer_id in league.rounds.iter().flat_map(|r| r.offer_ids.iter().copied()) {
            if !seen.insert(offer_id) {
                continue;
            }

            match self.offers.get(&offer_id) {
                Some(offer) => offers.push(offer),
                None => {
                    warn!(
                        league = %league.name,
                        offer_id = %offer_id,
                        "Round references unknown offer, skipping"
                    );
                    metrics::inc_catalog_dangling_refs();
                }
            }
        }

        offers.sort_by(|a, b| a.start_time.cmp(&b.start_time).then(a.id.cmp(&b.id)));
        offers
    }

    /// Offers visible under the league with this id.
    pub fn offers_for_league_id(&self, id: LeagueId) -> Result<Vec<&Offer>, CatalogError> {
        let league = self
            .league(id)
            .ok_or(CatalogError::UnknownLeague { league_id: id })?;
        Ok(self.offers_for_league(league))
    }

    /// Current odds for one outcome of one offer.
    pub fn outcome_odds(
        &self,
        offer_id: OfferId,
        outcome_type: OutcomeType,
    ) -> Result<Decimal, CatalogError> {
        let offer = self
            .offer(offer_id)
            .ok_or(CatalogError::UnknownOffer { offer_id })?;

        offer.odds(outcome_type).ok_or(CatalogError::UnknownOutcome {
            offer_id,
            outcome: outcome_type,
        })
    }

    /// Outcome columns for a league table.
    ///
    /// Union of the rounds' declared types in first-seen order; every type
    /// when no round declares any.
    pub fn outcome_types_for_league(&self, league: &League) -> Vec<OutcomeType> {
        let mut types: Vec<OutcomeType> = Vec::new();
        for outcome_type in league.rounds.iter().flat_map(|r| r.outcome_types.iter()) {
            if !types.contains(outcome_type) {
                types.push(*outcome_type);
            }
        }

        if types.is_empty() {
            OutcomeType::iter().collect()
        } else {
            types
        }
    }
}
