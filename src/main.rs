use clap::{Args, Parser, Subcommand};
use fxbot::api::FrankfurterClient;
use fxbot::backtest::{MarketScenario, ReplayRunner, SyntheticDataGenerator};
use fxbot::config::AppConfig;
use fxbot::execution::{PriceFeedManager, TickOutcome, TradingEngine};
use fxbot::report::{console, Snapshot};
use fxbot::Result;
use chrono::Utc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fxbot")]
#[command(about = "Threshold mean-reversion paper trader for a single FX pair", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file stem (Settings.toml, Settings.json, ...)
    #[arg(long, global = true, default_value = "Settings")]
    settings: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Poll the live rate and trade on paper
    Run {
        #[command(flatten)]
        session: SessionArgs,

        /// Seconds between ticks
        #[arg(long)]
        interval: Option<u64>,

        /// Run a single tick and exit
        #[arg(long)]
        once: bool,
    },

    /// Replay a synthetic price series
    Simulate {
        #[command(flatten)]
        session: SessionArgs,

        #[arg(long, value_enum, default_value = "sideways")]
        scenario: MarketScenario,

        /// Number of samples to generate
        #[arg(long, default_value = "500")]
        ticks: usize,

        #[arg(long, default_value = "42")]
        seed: u64,

        /// Rate level the series starts from
        #[arg(long, default_value = "1.10")]
        base_price: f64,
    },
}

#[derive(Args, Debug)]
struct SessionArgs {
    /// Starting balance (overrides settings)
    #[arg(long)]
    balance: Option<f64>,

    /// Percent move that triggers a trade (overrides settings)
    #[arg(long)]
    sensitivity: Option<f64>,

    /// Print the snapshot as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.settings)?;

    match cli.command {
        Commands::Run {
            session,
            interval,
            once,
        } => run_live(config, session, interval, once).await,
        Commands::Simulate {
            session,
            scenario,
            ticks,
            seed,
            base_price,
        } => run_simulation(config, session, scenario, ticks, seed, base_price),
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fxbot=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn build_engine(config: &AppConfig, session: &SessionArgs) -> Result<TradingEngine> {
    let balance = session.balance.unwrap_or(config.initial_balance);
    let sensitivity = session.sensitivity.unwrap_or(config.sensitivity);
    Ok(TradingEngine::new(balance, sensitivity)?)
}

fn ensure_base_price(base_price: f64) -> Result<f64> {
    if !(base_price.is_finite() && base_price > 0.0) {
        return Err(format!("--base-price must be positive, got {}", base_price).into());
    }
    Ok(base_price)
}

fn print_snapshot(snapshot: &Snapshot, pair: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
    } else {
        println!("{}", console::render(snapshot, pair));
    }
    Ok(())
}

// ============================================================================
// Live polling loop
// ============================================================================

async fn run_live(
    config: AppConfig,
    session: SessionArgs,
    interval_secs: Option<u64>,
    once: bool,
) -> Result<()> {
    let mut engine = build_engine(&config, &session)?;
    let client = FrankfurterClient::with_base_url(config.api_base_url.clone())
        .with_retry(config.max_retries, config.initial_backoff_ms)
        .with_rate_limit(config.rate_limit_per_minute);
    let feed = PriceFeedManager::new(client, &config.base_currency, &config.quote_currency);
    let pair = feed.pair();
    let period = interval_secs.unwrap_or(config.poll_interval_secs).max(1);

    tracing::info!("🚀 fxbot starting");
    tracing::info!("  Pair: {}", pair);
    tracing::info!("  Initial balance: {:.2}", engine.initial_balance());
    tracing::info!("  Sensitivity: {}%", engine.sensitivity());
    tracing::info!("  Poll interval: {}s", period);

    let mut ticker = interval(Duration::from_secs(period));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("⚠️  Received Ctrl+C, shutting down...");
                break;
            }
            _ = ticker.tick() => {
                tick(&feed, &mut engine).await;
                print_snapshot(&engine.snapshot(), &pair, session.json)?;
                if once {
                    break;
                }
            }
        }
    }

    tracing::info!("👋 fxbot stopped");
    Ok(())
}

/// One fetch → ingest cycle; failures are logged and the tick is skipped
async fn tick(feed: &PriceFeedManager, engine: &mut TradingEngine) {
    tracing::debug!("🔄 Tick at {}", Utc::now().format("%H:%M:%S"));

    let sample = match feed.fetch_sample().await {
        Ok(sample) => sample,
        Err(e) => {
            tracing::error!("✗ {} fetch failed: {}", feed.pair(), e);
            return;
        }
    };

    match engine.ingest_sample(sample.price, sample.timestamp) {
        Ok(TickOutcome::Held { variation_pct }) => {
            tracing::debug!("Holding ({:+.3}% from reference)", variation_pct);
        }
        Ok(_) => {}
        Err(e) => tracing::warn!("Sample rejected: {}", e),
    }
}

// ============================================================================
// Offline replay
// ============================================================================

fn run_simulation(
    config: AppConfig,
    session: SessionArgs,
    scenario: MarketScenario,
    ticks: usize,
    seed: u64,
    base_price: f64,
) -> Result<()> {
    let mut engine = build_engine(&config, &session)?;
    let spacing = i64::try_from(config.poll_interval_secs)?;
    let samples = SyntheticDataGenerator::new(seed)
        .with_base_price(ensure_base_price(base_price)?)
        .generate(scenario, ticks, spacing);

    let summary = ReplayRunner::run(&mut engine, &samples);

    print_snapshot(&summary.snapshot, &config.pair(), session.json)?;

    if !session.json {
        println!("=== Replay summary ({:?}, seed {}) ===", scenario, seed);
        println!("Ticks: {}", summary.ticks);
        println!("Trades: {}", summary.trades);
        println!("Triggers with nothing to trade: {}", summary.skipped_triggers);
        println!("Rejected samples: {}", summary.rejected);
        println!("Return: {:+.2}%", summary.return_pct(engine.initial_balance()));
    }

    Ok(())
}
