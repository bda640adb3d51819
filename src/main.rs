//! Bet-slip command-line client.

use std::str::FromStr;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use time::macros::format_description;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use betslip::account::AccountId;
use betslip::catalog::{LeagueId, OfferId, OutcomeType};
use betslip::config::Config;
use betslip::metrics;
use betslip::slip::CombinedOdds;
use betslip::sportsbook::{HttpSportsbook, Sportsbook};
use betslip::{BetSession, SlipProjection};

/// Shown instead of combined odds while the slip is empty.
const NO_SELECTION_PROMPT: &str = "select at least one outcome";

/// Bet-slip client for the sports-betting storefront.
#[derive(Parser, Debug)]
#[command(name = "betslip")]
#[command(about = "Browse offers and place accumulator slips")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check configuration validity.
    CheckConfig,

    /// List leagues.
    Leagues,

    /// List a league's offers, earliest first.
    Offers {
        /// League id as shown by `leagues`.
        league: u64,
    },

    /// Show combined odds and payout for a set of picks.
    Quote {
        /// Pick as OFFER:LABEL, e.g. 1042:1X. Repeat for more picks.
        #[arg(long = "pick", required = true)]
        picks: Vec<Pick>,

        /// Stake amount.
        #[arg(long, default_value = "0")]
        stake: Decimal,
    },

    /// Place a slip.
    Place {
        /// Account id (defaults to ACCOUNT_ID).
        #[arg(long)]
        account: Option<u64>,

        /// Pick as OFFER:LABEL, e.g. 1042:1X. Repeat for more picks.
        #[arg(long = "pick", required = true)]
        picks: Vec<Pick>,

        /// Stake amount.
        #[arg(long)]
        stake: Decimal,
    },

    /// Add funds to an account.
    Deposit {
        /// Account id (defaults to ACCOUNT_ID).
        #[arg(long)]
        account: Option<u64>,

        /// Amount to add.
        #[arg(long)]
        amount: Decimal,
    },
}

/// One outcome picked on the command line.
#[derive(Debug, Clone, Copy)]
struct Pick {
    offer_id: OfferId,
    outcome_type: OutcomeType,
}

impl FromStr for Pick {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (offer, label) = s
            .split_once(':')
            .ok_or_else(|| format!("expected OFFER:LABEL, got {:?}", s))?;
        let offer_id = offer
            .trim()
            .parse()
            .map(OfferId)
            .map_err(|_| format!("invalid offer id {:?}", offer))?;
        let outcome_type = OutcomeType::from_str(label.trim())
            .map_err(|_| format!("unknown outcome {:?} (use 1, X, 2, 1X, X2, 12, F+2)", label))?;

        Ok(Self {
            offer_id,
            outcome_type,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("betslip=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Initialize metrics
    metrics::init_metrics();

    match args.command {
        Command::CheckConfig => cmd_check_config(),
        Command::Leagues => cmd_leagues().await,
        Command::Offers { league } => cmd_offers(LeagueId(league)).await,
        Command::Quote { picks, stake } => cmd_quote(&picks, stake).await,
        Command::Place {
            account,
            picks,
            stake,
        } => cmd_place(account, &picks, stake).await,
        Command::Deposit { account, amount } => cmd_deposit(account, amount).await,
    }
}

/// Load and validate configuration.
fn load_config() -> anyhow::Result<Config> {
    let config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;
    Ok(config)
}

/// Build a session with a freshly fetched catalog.
async fn ready_session(config: &Config) -> anyhow::Result<BetSession<HttpSportsbook>> {
    let sportsbook = HttpSportsbook::new(config)?;
    let mut session = BetSession::new(sportsbook);
    session.refresh_catalog().await?;
    Ok(session)
}

fn resolve_account(arg: Option<u64>, config: &Config) -> anyhow::Result<AccountId> {
    arg.map(AccountId)
        .or(config.account_id)
        .ok_or_else(|| anyhow::anyhow!("no account given; pass --account or set ACCOUNT_ID"))
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("BETSLIP - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  API URL: {}", config.api_base_url());
    println!("  HTTP Timeout: {}ms", config.http_timeout_ms);
    match config.account_id {
        Some(id) => println!("  Default Account: {}", id),
        None => println!("  Default Account: (none)"),
    }
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// List leagues.
async fn cmd_leagues() -> anyhow::Result<()> {
    let config = load_config()?;
    let session = ready_session(&config).await?;
    let catalog = session.catalog();

    for league in catalog.leagues() {
        let offers = catalog.offers_for_league(league).len();
        println!("{:>4}  {:<40} {} offers", league.id, league.name, offers);
    }

    Ok(())
}

/// List a league's offers as a table of odds.
async fn cmd_offers(league_id: LeagueId) -> anyhow::Result<()> {
    let config = load_config()?;
    let session = ready_session(&config).await?;
    let catalog = session.catalog();

    let league = catalog
        .league(league_id)
        .ok_or_else(|| anyhow::anyhow!("unknown league {}", league_id))?;
    let columns = catalog.outcome_types_for_league(league);
    let time_format = format_description!("[day]/[month]/[year] [hour]:[minute]");

    println!("{}", league.name);
    print!("{:>8}  {:<36} {:<16}", "ID", "Match", "Time");
    for column in &columns {
        print!(" {:>6}", column.to_string());
    }
    println!();

    for offer in catalog.offers_for_league(league) {
        print!(
            "{:>8}  {:<36} {:<16}",
            offer.id,
            offer.name,
            offer.start_time.format(&time_format)?
        );
        for column in &columns {
            match offer.odds(*column) {
                Some(odds) => print!(" {:>6}", odds.to_string()),
                None => print!(" {:>6}", "-"),
            }
        }
        println!();
    }

    Ok(())
}

/// Show combined odds and payout.
async fn cmd_quote(picks: &[Pick], stake: Decimal) -> anyhow::Result<()> {
    let config = load_config()?;
    let mut session = ready_session(&config).await?;

    for pick in picks {
        session.toggle(pick.offer_id, pick.outcome_type)?;
    }
    session.set_stake(stake);

    print_slip(&session);
    Ok(())
}

/// Place a slip.
async fn cmd_place(account: Option<u64>, picks: &[Pick], stake: Decimal) -> anyhow::Result<()> {
    let config = load_config()?;
    let account_id = resolve_account(account, &config)?;
    let mut session = ready_session(&config).await?;
    session.login(account_id, Decimal::ZERO);

    for pick in picks {
        session.toggle(pick.offer_id, pick.outcome_type)?;
    }
    session.set_stake(stake);
    print_slip(&session);

    let receipt = session.submit().await?;
    info!(%account_id, "Slip placed");
    println!("======================================================================");
    match receipt.confirmation_id {
        Some(id) => println!("SLIP PLACED (confirmation {})", id),
        None => println!("SLIP PLACED"),
    }
    println!("======================================================================");

    Ok(())
}

/// Add funds to an account.
async fn cmd_deposit(account: Option<u64>, amount: Decimal) -> anyhow::Result<()> {
    let config = load_config()?;
    let account_id = resolve_account(account, &config)?;
    let mut session = BetSession::new(HttpSportsbook::new(&config)?);
    session.login(account_id, Decimal::ZERO);

    let balance = session.add_funds(amount).await?;
    println!("Deposited {:.2} to account {}", amount, account_id);
    println!("  Balance: {:.2}", balance);

    Ok(())
}

fn print_slip<S: Sportsbook>(session: &BetSession<S>) {
    let catalog = session.catalog();

    println!("----------------------------------------------------------------------");
    for selection in session.slip().selections() {
        let name = catalog
            .offer(selection.offer_id)
            .map(|o| o.name.as_str())
            .unwrap_or("?");
        println!(
            "  {:<40} {:>4} @ {}",
            name, selection.outcome_type.to_string(), selection.odds
        );
    }
    println!("----------------------------------------------------------------------");

    let SlipProjection {
        combined_odds,
        stake,
        payout,
        validation,
    } = session.projection();
    match combined_odds {
        CombinedOdds::NoSelection => println!("  Combined odds: {}", NO_SELECTION_PROMPT),
        CombinedOdds::Odds(odds) => println!("  Combined odds: {:.4}", odds),
    }
    println!("  Stake:         {:.2}", stake);
    println!("  Payout:        {:.2}", payout);
    if let Err(e) = validation {
        println!("  Not placeable: {}", e);
    }
}
