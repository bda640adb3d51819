//! HTTP client for the storefront REST API.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::wire::{
    leagues_from_feed, offers_from_feed, ApiError, DepositRequest, LeaguesPayload, OfferFeed,
    SlipRequest,
};
use super::{FundsReceipt, SlipReceipt, Sportsbook};
use crate::account::AccountId;
use crate::catalog::{League, Offer};
use crate::config::Config;
use crate::error::TransportError;
use crate::slip::SlipSubmission;

/// Storefront API client.
#[derive(Debug, Clone)]
pub struct HttpSportsbook {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Base URL without trailing slash.
    base_url: String,
}

impl HttpSportsbook {
    /// Create a client from config.
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.http_timeout_ms))
            .connect_timeout(Duration::from_millis(config.http_timeout_ms.min(2_000)))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url().to_string(),
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        let response = self.http.get(self.url(path)).send().await?;
        decode(check_status(response).await?).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, TransportError> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        decode(check_status(response).await?).await
    }
}

/// Turn a non-success status into [`TransportError::Rejected`].
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let reason = serde_json::from_str::<ApiError>(&body)
        .map(|e| e.error)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });

    warn!(status = status.as_u16(), %reason, "Sportsbook rejected request");
    Err(TransportError::Rejected {
        status: status.as_u16(),
        reason,
    })
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TransportError> {
    response
        .json()
        .await
        .map_err(|e| TransportError::Decode(e.to_string()))
}

impl Sportsbook for HttpSportsbook {
    #[instrument(skip(self))]
    async fn fetch_leagues(&self) -> Result<Vec<League>, TransportError> {
        let payload: LeaguesPayload = self.get_json("lige").await?;
        let leagues = leagues_from_feed(payload.into_leagues());
        debug!(count = leagues.len(), "Fetched leagues");
        Ok(leagues)
    }

    #[instrument(skip(self))]
    async fn fetch_offers(&self) -> Result<Vec<Offer>, TransportError> {
        let feed: Vec<OfferFeed> = self.get_json("ponude").await?;
        let received = feed.len();
        let offers = offers_from_feed(feed);
        debug!(received, kept = offers.len(), "Fetched offers");
        Ok(offers)
    }

    #[instrument(skip_all, fields(account_id = %submission.account_id()))]
    async fn submit_slip(&self, submission: &SlipSubmission) -> Result<SlipReceipt, TransportError> {
        let body = SlipRequest::from(submission);
        let path = format!("uplata/{}", submission.account_id());
        self.post_json(&path, &body).await
    }

    #[instrument(skip_all, fields(account_id = %account_id, amount = %amount))]
    async fn add_funds(
        &self,
        account_id: AccountId,
        amount: Decimal,
    ) -> Result<FundsReceipt, TransportError> {
        let body = DepositRequest { amount };
        let path = format!("deposit/{}", account_id);
        self.post_json(&path, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_urls_from_config() {
        let config = Config {
            sportsbook_api_url: "https://book.example.com/api/".to_string(),
            ..Config::default()
        };
        let client = HttpSportsbook::new(&config).unwrap();

        assert_eq!(client.base_url(), "https://book.example.com/api");
        assert_eq!(client.url("lige"), "https://book.example.com/api/lige");
    }
}
