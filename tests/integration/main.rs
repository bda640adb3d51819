//! End-to-end tests driving a bet session against the mock sportsbook.
//!
//! The live tests at the bottom talk to a real storefront API.
//! Run with: cargo test --test integration -- --ignored

use betslip::account::AccountId;
use betslip::catalog::{League, LeagueId, OfferId, OutcomeType, Round};
use betslip::config::Config;
use betslip::error::{AccountError, BetslipError, TransportError, ValidationError};
use betslip::slip::CombinedOdds;
use betslip::sportsbook::{HttpSportsbook, MockConfig, MockOfferBuilder, MockSportsbook, Sportsbook};
use betslip::BetSession;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use time::macros::datetime;
use tokio_test::{assert_err, assert_ok};

const ACCOUNT: AccountId = AccountId(7);

/// A storefront with one league of three matches served out of kick-off order.
fn storefront() -> MockSportsbook {
    let book = MockSportsbook::new();
    book.set_leagues(vec![League {
        id: LeagueId(1),
        name: "1. HNL".to_string(),
        rounds: vec![
            Round {
                offer_ids: vec![OfferId(30), OfferId(10)],
                outcome_types: vec![OutcomeType::Home, OutcomeType::Draw, OutcomeType::Away],
            },
            Round {
                offer_ids: vec![OfferId(20), OfferId(99)],
                outcome_types: vec![OutcomeType::HomeOrDraw, OutcomeType::DrawOrAway],
            },
        ],
    }]);
    book.set_offers(vec![
        MockOfferBuilder::new(10)
            .name("Dinamo - Hajduk")
            .starts_at(datetime!(2026-05-02 18:00 UTC))
            .three_way(dec!(1.50), dec!(3.40), dec!(5.25))
            .build(),
        MockOfferBuilder::new(20)
            .name("Rijeka - Osijek")
            .starts_at(datetime!(2026-05-01 17:00 UTC))
            .three_way(dec!(2.10), dec!(3.10), dec!(3.30))
            .odds(OutcomeType::DrawOrAway, dec!(2.00))
            .build(),
        MockOfferBuilder::new(30)
            .name("Gorica - Varaždin")
            .starts_at(datetime!(2026-05-03 15:00 UTC))
            .three_way(dec!(2.45), dec!(3.00), dec!(2.80))
            .build(),
    ]);
    book
}

async fn ready_session() -> BetSession<MockSportsbook> {
    let mut session = BetSession::new(storefront());
    assert_ok!(session.refresh_catalog().await);
    session
}

#[tokio::test]
async fn browse_league_in_kickoff_order() {
    let session = ready_session().await;
    let catalog = session.catalog();
    let league = catalog.league(LeagueId(1)).unwrap();

    let names: Vec<&str> = catalog
        .offers_for_league(league)
        .into_iter()
        .map(|o| o.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Rijeka - Osijek", "Dinamo - Hajduk", "Gorica - Varaždin"]
    );
}

#[tokio::test]
async fn build_quote_and_place_slip() {
    let mut session = ready_session().await;
    session.login(ACCOUNT, dec!(100));

    assert_eq!(session.projection().combined_odds, CombinedOdds::NoSelection);

    assert_ok!(session.toggle(OfferId(10), OutcomeType::Home));
    assert_ok!(session.toggle(OfferId(20), OutcomeType::DrawOrAway));
    session.set_stake(dec!(10));

    let projection = session.projection();
    assert_eq!(projection.combined_odds, CombinedOdds::Odds(dec!(3.0000)));
    assert_eq!(projection.payout, dec!(30.00));
    assert_eq!(projection.validation, Ok(()));

    let receipt = assert_ok!(session.submit().await);
    assert_eq!(receipt.confirmation_id.as_deref(), Some("MOCK-1"));
    assert!(session.slip().selections().is_empty());

    let placed = session.sportsbook().submissions();
    assert_eq!(placed.len(), 1);
    assert_eq!(placed[0].account_id(), ACCOUNT);
    assert_eq!(placed[0].stake(), dec!(10));
    let picks: Vec<(OfferId, OutcomeType)> = placed[0]
        .selections()
        .iter()
        .map(|s| (s.offer_id, s.outcome_type))
        .collect();
    assert_eq!(
        picks,
        vec![
            (OfferId(10), OutcomeType::Home),
            (OfferId(20), OutcomeType::DrawOrAway)
        ]
    );
}

#[tokio::test]
async fn switching_outcome_keeps_one_pick_per_match() {
    let mut session = ready_session().await;

    assert_ok!(session.toggle(OfferId(10), OutcomeType::Home));
    assert_ok!(session.toggle(OfferId(30), OutcomeType::Away));
    let selections = assert_ok!(session.toggle(OfferId(10), OutcomeType::Draw)).clone();

    let picks: Vec<(OfferId, OutcomeType)> = selections
        .iter()
        .map(|s| (s.offer_id, s.outcome_type))
        .collect();
    assert_eq!(
        picks,
        vec![
            (OfferId(30), OutcomeType::Away),
            (OfferId(10), OutcomeType::Draw)
        ]
    );
    assert_eq!(
        session.projection().combined_odds,
        CombinedOdds::Odds(dec!(9.5200))
    );
}

#[tokio::test]
async fn unplaceable_slips_never_reach_backend() {
    let mut session = ready_session().await;
    session.login(ACCOUNT, dec!(100));

    let err = assert_err!(session.submit().await);
    assert!(matches!(
        err,
        BetslipError::Validation(ValidationError::EmptySlip)
    ));

    assert_ok!(session.toggle(OfferId(10), OutcomeType::Home));
    session.set_stake(Decimal::ZERO);
    let err = assert_err!(session.submit().await);
    assert!(matches!(
        err,
        BetslipError::Validation(ValidationError::NonPositiveStake { .. })
    ));

    session.logout();
    assert_ok!(session.toggle(OfferId(10), OutcomeType::Home));
    session.set_stake(dec!(5));
    let err = assert_err!(session.submit().await);
    assert!(matches!(err, BetslipError::Account(AccountError::NotLoggedIn)));

    assert!(session.sportsbook().submissions().is_empty());
}

#[tokio::test]
async fn rejected_slip_stays_on_screen() {
    let mut session = ready_session().await;
    session.login(ACCOUNT, dec!(100));
    assert_ok!(session.toggle(OfferId(20), OutcomeType::Draw));
    session.set_stake(dec!(4));

    session.sportsbook_mut().set_config(MockConfig {
        fail_submit: true,
        ..Default::default()
    });
    let err = assert_err!(session.submit().await);
    assert!(matches!(
        err,
        BetslipError::Transport(TransportError::Rejected { status: 503, .. })
    ));
    assert_eq!(session.slip().selections().len(), 1);
    assert_eq!(session.slip().stake(), dec!(4));

    session.sportsbook_mut().set_config(MockConfig::default());
    assert_ok!(session.submit().await);
    assert!(session.slip().selections().is_empty());
}

#[tokio::test]
async fn deposit_is_optimistic_and_reverts_on_failure() {
    let mut session = ready_session().await;
    session.login(ACCOUNT, dec!(20));
    session.sportsbook().set_balance(ACCOUNT, dec!(20));

    let balance = assert_ok!(session.add_funds(dec!(15)).await);
    assert_eq!(balance, dec!(35));
    assert_eq!(session.sportsbook().balance(ACCOUNT), dec!(35));

    session.sportsbook_mut().set_config(MockConfig {
        fail_funds: true,
        ..Default::default()
    });
    assert_err!(session.add_funds(dec!(50)).await);
    assert_eq!(session.account().unwrap().balance(), dec!(35));
    assert_eq!(session.sportsbook().balance(ACCOUNT), dec!(35));
}

#[tokio::test]
async fn refresh_keeps_snapshotted_odds() {
    let mut session = ready_session().await;
    assert_ok!(session.toggle(OfferId(10), OutcomeType::Home));

    session.sportsbook().set_offers(vec![MockOfferBuilder::new(10)
        .name("Dinamo - Hajduk")
        .three_way(dec!(1.80), dec!(3.40), dec!(4.20))
        .build()]);
    assert_ok!(session.refresh_catalog().await);

    assert_eq!(
        session.catalog().outcome_odds(OfferId(10), OutcomeType::Home).unwrap(),
        dec!(1.80)
    );
    assert_eq!(
        session.projection().combined_odds,
        CombinedOdds::Odds(dec!(1.5000))
    );
}

/// Config for the live tests, if a storefront is configured.
fn live_config() -> Option<Config> {
    dotenvy::dotenv().ok();
    std::env::var("SPORTSBOOK_API_URL").ok()?;
    Config::load().ok()
}

#[tokio::test]
#[ignore = "requires SPORTSBOOK_API_URL"]
async fn live_catalog_loads() {
    let config = match live_config() {
        Some(c) => c,
        None => {
            println!("Skipping: SPORTSBOOK_API_URL not set");
            return;
        }
    };

    let book = assert_ok!(HttpSportsbook::new(&config));
    let leagues = assert_ok!(book.fetch_leagues().await);
    let offers = assert_ok!(book.fetch_offers().await);
    println!("Fetched {} leagues and {} offers", leagues.len(), offers.len());

    let mut session = BetSession::new(book);
    assert_ok!(session.refresh_catalog().await);
    for league in session.catalog().leagues() {
        let offers = session.catalog().offers_for_league(league);
        assert!(offers.windows(2).all(|w| w[0].start_time <= w[1].start_time));
    }
}
