//! Catalog types: leagues, rounds, offers and their quoted outcomes.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use time::OffsetDateTime;

/// League identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeagueId(pub u64);

impl fmt::Display for LeagueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Offer (match) identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfferId(pub u64);

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome type of a match.
///
/// The string forms are the column labels used by the feed and the CLI.
/// Nothing inside the engine compares labels.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum OutcomeType {
    /// Home win.
    #[strum(to_string = "1")]
    #[serde(rename = "1")]
    Home,
    /// Draw.
    #[strum(to_string = "X", serialize = "x")]
    #[serde(rename = "X", alias = "x")]
    Draw,
    /// Away win.
    #[strum(to_string = "2")]
    #[serde(rename = "2")]
    Away,
    /// Home win or draw.
    #[strum(to_string = "1X", serialize = "1x")]
    #[serde(rename = "1X", alias = "1x")]
    HomeOrDraw,
    /// Draw or away win.
    #[strum(to_string = "X2", serialize = "x2")]
    #[serde(rename = "X2", alias = "x2")]
    DrawOrAway,
    /// Either side wins.
    #[strum(to_string = "12")]
    #[serde(rename = "12")]
    HomeOrAway,
    /// Handicap double-chance variant.
    #[strum(to_string = "F+2", serialize = "f+2")]
    #[serde(rename = "F+2", alias = "f+2")]
    DoubleChanceVariant,
}

/// One quoted outcome of an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Which outcome.
    pub outcome_type: OutcomeType,
    /// Decimal odds. Trusted as given, not range-checked.
    pub odds: Decimal,
}

/// A wagerable match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    /// Offer id.
    pub id: OfferId,
    /// Display name, e.g. "Dinamo - Hajduk".
    pub name: String,
    /// Fixture number printed on the paper offer.
    pub fixture_number: Option<String>,
    /// Scheduled kick-off.
    pub start_time: OffsetDateTime,
    /// Broadcasting channel, if any.
    pub tv_channel: Option<String>,
    /// Whether match statistics are available.
    pub has_statistics: bool,
    /// Quoted outcomes.
    pub outcomes: Vec<Outcome>,
}

impl Offer {
    /// Current odds for an outcome type, if quoted.
    pub fn odds(&self, outcome_type: OutcomeType) -> Option<Decimal> {
        self.outcomes
            .iter()
            .find(|o| o.outcome_type == outcome_type)
            .map(|o| o.odds)
    }
}

/// Grouping of offers under a league.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Round {
    /// Offers shown in this round. May reference offers missing from the feed.
    pub offer_ids: Vec<OfferId>,
    /// Outcome columns this round offers.
    pub outcome_types: Vec<OutcomeType>,
}

/// A competition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct League {
    /// League id.
    pub id: LeagueId,
    /// Display name.
    pub name: String,
    /// Rounds in feed order.
    pub rounds: Vec<Round>,
}
