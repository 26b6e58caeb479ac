// In app/src/main.rs

use anyhow::Result;
use app_config::Settings;
use clap::{Parser, Subcommand};
use core_types::{Signal, Symbol, TickSnapshot};
use engine::Engine;
use rust_decimal::Decimal;
use std::sync::Arc;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "A moving-average crossover signal monitor.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs the monitor loop and renders the dashboard until ctrl-c.
    Run,

    /// Fetches and prints the current ticker price once, then exits.
    Price,
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments first: `--help` and friends must work
    // without any configuration files present.
    let cli = Cli::parse();

    let settings = app_config::load_settings()?;

    let level: tracing::Level = settings
        .app
        .log_level
        .parse()
        .unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    tracing::info!("Starting signal monitor application");

    // Match on the parsed command and call the appropriate handler.
    match cli.command {
        Commands::Run => {
            run_app(settings).await?;
        }
        Commands::Price => {
            handle_price(settings).await?;
        }
    }

    tracing::info!("Signal monitor has finished successfully.");

    Ok(())
}

// --- "Run" Subcommand Logic ---

/// The primary logic for the `run` command.
/// This function wires the feed client into the engine and renders every
/// published snapshot. It will run indefinitely until terminated.
async fn run_app(settings: Settings) -> Result<()> {
    // --- 1. Initialization ---
    let feed = api_client::new(&settings.feed)?;
    tracing::info!(
        symbol = %settings.feed.symbol,
        url = %settings.feed.rest_base_url,
        "Feed client ready."
    );

    let short_period = settings.engine.short_period;
    let long_period = settings.engine.long_period;

    // --- 2. Create the Engine ---
    let (monitor_engine, mut snapshot_rx) = Engine::new(Arc::new(feed), settings);

    // --- 3. Launch Concurrent Tasks ---
    // Spawn the engine to run in its own concurrent task; render snapshots in
    // the current one as they are published.
    let engine_handle = tokio::spawn(async move { monitor_engine.run().await });

    let render = async {
        loop {
            snapshot_rx.changed().await?;
            let snapshot = snapshot_rx.borrow_and_update().clone();
            if let Some(snapshot) = snapshot {
                render_snapshot(&snapshot, short_period, long_period);
            }
        }
        // The loop only exits by error; give the block a concrete type.
        #[allow(unreachable_code)]
        Ok::<(), tokio::sync::watch::error::RecvError>(())
    };

    // Wait for whichever ends first. In a healthy state, only ctrl-c does.
    tokio::select! {
        engine_result = engine_handle => {
            tracing::error!(?engine_result, "Engine task has terminated unexpectedly.");
        }
        render_result = render => {
            tracing::error!(?render_result, "Snapshot channel closed unexpectedly.");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received. Stopping monitor.");
            return Ok(());
        }
    }

    anyhow::bail!("A critical task terminated. Shutting down.")
}

/// Handles the logic for the `price` subcommand.
async fn handle_price(settings: Settings) -> Result<()> {
    let client = api_client::new(&settings.feed)?;
    let symbol = Symbol(settings.feed.symbol.clone());

    let price = client.get_ticker_price(&symbol).await?;
    println!("{}: {:.2}", symbol, price);

    Ok(())
}

// --- Rendering Helpers ---

/// Prints one dashboard frame for the latest snapshot.
fn render_snapshot(snapshot: &TickSnapshot, short_period: usize, long_period: usize) {
    println!("\n--- {} ---", snapshot.symbol);
    println!("Current Price:  {:.2}", snapshot.price);
    println!(
        "Short MA ({}):   {}",
        short_period,
        format_average(snapshot.short_ma)
    );
    println!(
        "Long MA ({}):   {}",
        long_period,
        format_average(snapshot.long_ma)
    );
    println!("Signal:         {}", signal_label(snapshot.signal));

    println!("Trade History:");
    if snapshot.trades.is_empty() {
        println!("  (no trades yet)");
    }
    for trade in &snapshot.trades {
        println!(
            "  {} @ ${:.2} - {}",
            trade.side,
            trade.price,
            trade
                .recorded_at
                .with_timezone(&chrono::Local)
                .format("%H:%M:%S")
        );
    }
}

fn format_average(average: Option<Decimal>) -> String {
    match average {
        Some(value) => format!("{:.2}", value),
        None => "Calculating...".to_string(),
    }
}

fn signal_label(signal: Signal) -> &'static str {
    match signal {
        Signal::Buy => "Buy 🚀",
        Signal::Sell => "Sell 🔻",
        Signal::Undetermined => "Calculating...",
    }
}
