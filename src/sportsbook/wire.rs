//! JSON shapes of the storefront API and their conversion to catalog types.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::warn;

use crate::catalog::{League, LeagueId, Offer, OfferId, Outcome, OutcomeType, Round};
use crate::slip::SlipSubmission;

/// League list, either bare or wrapped as `{"lige": [...]}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LeaguesPayload {
    /// Wrapped form used by the static feed.
    Wrapped {
        /// Leagues.
        lige: Vec<LeagueFeed>,
    },
    /// Bare array returned by the API.
    Bare(Vec<LeagueFeed>),
}

impl LeaguesPayload {
    /// Unwrap into the league list.
    pub fn into_leagues(self) -> Vec<LeagueFeed> {
        match self {
            LeaguesPayload::Wrapped { lige } => lige,
            LeaguesPayload::Bare(lige) => lige,
        }
    }
}

/// League as sent by the feed.
#[derive(Debug, Clone, Deserialize)]
pub struct LeagueFeed {
    /// League id. Absent in the static feed.
    #[serde(default)]
    pub id: Option<u64>,
    /// League name.
    pub naziv: String,
    /// Rounds.
    #[serde(default)]
    pub razrade: Option<Vec<RoundFeed>>,
}

/// Round as sent by the feed.
#[derive(Debug, Clone, Deserialize)]
pub struct RoundFeed {
    /// Outcome columns.
    #[serde(default)]
    pub tipovi: Option<Vec<OutcomeTypeFeed>>,
    /// Offer ids.
    #[serde(default)]
    pub ponude: Option<Vec<u64>>,
}

/// Outcome column label.
#[derive(Debug, Clone, Deserialize)]
pub struct OutcomeTypeFeed {
    /// Label, e.g. "1X".
    pub naziv: String,
}

/// Offer as sent by the feed.
#[derive(Debug, Clone, Deserialize)]
pub struct OfferFeed {
    /// Fixture number.
    #[serde(default)]
    pub broj: Option<String>,
    /// Offer id.
    pub id: u64,
    /// Match name.
    pub naziv: String,
    /// Kick-off time.
    pub vrijeme: String,
    /// Quoted odds.
    #[serde(default)]
    pub tecajevi: Option<Vec<OddsFeed>>,
    /// TV channel.
    #[serde(default)]
    pub tv_kanal: Option<String>,
    /// Statistics available.
    #[serde(default)]
    pub ima_statistiku: Option<bool>,
}

/// One quoted outcome as sent by the feed.
#[derive(Debug, Clone, Deserialize)]
pub struct OddsFeed {
    /// Odds value.
    pub tecaj: Decimal,
    /// Outcome label.
    pub naziv: String,
}

/// Slip request body.
#[derive(Debug, Clone, Serialize)]
pub struct SlipRequest {
    /// Stake.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
    /// Picked outcomes.
    pub odigrani_par: Vec<PickRequest>,
}

/// One pick in a slip request.
#[derive(Debug, Clone, Serialize)]
pub struct PickRequest {
    /// Offer id.
    pub ponuda: u64,
    /// Outcome label.
    pub naziv: String,
    /// Odds snapshotted on the slip.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub tecaj: Decimal,
}

impl From<&SlipSubmission> for SlipRequest {
    fn from(submission: &SlipSubmission) -> Self {
        Self {
            amount: submission.stake(),
            odigrani_par: submission
                .selections()
                .iter()
                .map(|s| PickRequest {
                    ponuda: s.offer_id.0,
                    naziv: feed_label(s.outcome_type).to_string(),
                    tecaj: s.odds,
                })
                .collect(),
        }
    }
}

/// Outcome label as spelled by the feed. The backend matches it exactly.
pub fn feed_label(outcome_type: OutcomeType) -> &'static str {
    match outcome_type {
        OutcomeType::Home => "1",
        OutcomeType::Draw => "X",
        OutcomeType::Away => "2",
        OutcomeType::HomeOrDraw => "1X",
        OutcomeType::DrawOrAway => "X2",
        OutcomeType::HomeOrAway => "12",
        OutcomeType::DoubleChanceVariant => "f+2",
    }
}

/// Deposit request body.
#[derive(Debug, Clone, Serialize)]
pub struct DepositRequest {
    /// Amount to add.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
}

/// Convert feed leagues. Leagues without an id are numbered by position.
pub fn leagues_from_feed(feed: Vec<LeagueFeed>) -> Vec<League> {
    feed.into_iter()
        .enumerate()
        .map(|(position, league)| League {
            id: LeagueId(league.id.unwrap_or(position as u64 + 1)),
            rounds: league
                .razrade
                .unwrap_or_default()
                .into_iter()
                .map(|round| round_from_feed(&league.naziv, round))
                .collect(),
            name: league.naziv,
        })
        .collect()
}

fn round_from_feed(league: &str, round: RoundFeed) -> Round {
    let outcome_types = round
        .tipovi
        .unwrap_or_default()
        .into_iter()
        .filter_map(|tip| match OutcomeType::from_str(&tip.naziv) {
            Ok(outcome_type) => Some(outcome_type),
            Err(_) => {
                warn!(league, label = %tip.naziv, "Unknown outcome column, skipping");
                None
            }
        })
        .collect();

    Round {
        offer_ids: round
            .ponude
            .unwrap_or_default()
            .into_iter()
            .map(OfferId)
            .collect(),
        outcome_types,
    }
}

/// Convert feed offers, skipping any whose kick-off time cannot be parsed.
pub fn offers_from_feed(feed: Vec<OfferFeed>) -> Vec<Offer> {
    feed.into_iter().filter_map(offer_from_feed).collect()
}

fn offer_from_feed(offer: OfferFeed) -> Option<Offer> {
    let Some(start_time) = parse_start_time(&offer.vrijeme) else {
        warn!(offer_id = offer.id, vrijeme = %offer.vrijeme, "Unparseable start time, skipping offer");
        return None;
    };

    let outcomes = offer
        .tecajevi
        .unwrap_or_default()
        .into_iter()
        .filter_map(|tecaj| match OutcomeType::from_str(&tecaj.naziv) {
            Ok(outcome_type) => Some(Outcome {
                outcome_type,
                odds: tecaj.tecaj,
            }),
            Err(_) => {
                warn!(offer_id = offer.id, label = %tecaj.naziv, "Unknown outcome label, skipping");
                None
            }
        })
        .collect();

    Some(Offer {
        id: OfferId(offer.id),
        name: offer.naziv,
        fixture_number: offer.broj.filter(|b| !b.is_empty()),
        start_time,
        tv_channel: offer.tv_kanal.filter(|c| !c.is_empty()),
        has_statistics: offer.ima_statistiku.unwrap_or(false),
        outcomes,
    })
}

/// Parse RFC 3339, or a zone-less timestamp taken as UTC.
pub fn parse_start_time(raw: &str) -> Option<OffsetDateTime> {
    if let Ok(time) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(time);
    }

    let naive = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    PrimitiveDateTime::parse(raw, naive)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}
