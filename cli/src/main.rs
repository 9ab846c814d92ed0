//! Seedsweep CLI
//!
//! Drives the scan engine from the terminal: starts a session, prints live
//! statistics and discoveries, and shuts the pool down cleanly on Ctrl-C.

use anyhow::Result;
use clap::{Parser, Subcommand};
use seedsweep_core::{Address, AppConfig, Network};
use seedsweep_ledger::{
    BalanceOracle, HttpRegistrar, HttpTransferService, RetryPolicy, RippledClient,
};
use seedsweep_scanner::{ScanEngine, SweepDispatcher};
use seedsweep_store::DiscoveryStore;
use seedsweep_wallet::CandidateGenerator;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod report;

#[derive(Parser)]
#[command(name = "seedsweep")]
#[command(about = "Concurrent recovery-phrase scanner for the XRP Ledger")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scan session until Ctrl-C
    Scan {
        /// Number of concurrent workers
        #[arg(short, long)]
        workers: Option<usize>,

        /// Network to scan (testnet or mainnet)
        #[arg(short, long)]
        network: Option<String>,

        /// Destination address for swept funds
        #[arg(short, long)]
        destination: Option<String>,
    },

    /// Derive the address for one recovery phrase and check its balance
    Recover {
        /// The recovery phrase, quoted
        phrase: String,

        /// Network to query (testnet or mainnet)
        #[arg(short, long)]
        network: Option<String>,
    },

    /// Show recorded discoveries from the local log
    List {
        /// Maximum number of discoveries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = AppConfig::load_with_env()?;

    match cli.command {
        Commands::Scan {
            workers,
            network,
            destination,
        } => run_scan(config, workers, network, destination).await,
        Commands::Recover { phrase, network } => run_recover(&config, &phrase, network).await,
        Commands::List { limit } => run_list(&config, limit).await,
    }
}

fn resolve_network(config: &AppConfig, flag: Option<String>) -> Result<Network> {
    Ok(match flag {
        Some(value) => value.parse()?,
        None => config.ledger.network,
    })
}

fn oracle_for(config: &AppConfig, network: Network) -> Result<RippledClient> {
    let retry = RetryPolicy::new(
        config.retry.max_attempts,
        Duration::from_millis(config.retry.base_delay_ms),
    );
    let timeout = Duration::from_secs(config.ledger.timeout_secs);
    let url = config
        .ledger
        .rpc_url
        .clone()
        .unwrap_or_else(|| network.json_rpc_url().to_string());
    Ok(RippledClient::with_url(url, timeout, retry)?)
}

fn store_path(config: &AppConfig) -> Result<PathBuf> {
    match &config.store.path {
        Some(path) => Ok(path.clone()),
        None => {
            let dir = AppConfig::data_dir()?;
            std::fs::create_dir_all(&dir)?;
            Ok(dir.join("discoveries.db"))
        }
    }
}

async fn run_scan(
    mut config: AppConfig,
    workers: Option<usize>,
    network: Option<String>,
    destination: Option<String>,
) -> Result<()> {
    if let Some(workers) = workers {
        config.scan.workers = workers;
    }
    config.ledger.network = resolve_network(&config, network)?;
    if let Some(destination) = destination {
        config.sweep.destination = Some(destination);
    }

    let network = config.ledger.network;
    let timeout = Duration::from_secs(config.ledger.timeout_secs);
    let oracle = Arc::new(oracle_for(&config, network)?);

    let mut dispatcher = SweepDispatcher::new(network);
    let mut store = None;
    if config.store.enabled {
        let path = store_path(&config)?;
        let opened = Arc::new(DiscoveryStore::open(&path).await?);
        tracing::info!("recording discoveries in {}", path.display());
        dispatcher = dispatcher.with_registrar(opened.clone());
        store = Some(opened);
    }
    if let Some(url) = &config.registration.url {
        dispatcher = dispatcher.with_registrar(Arc::new(HttpRegistrar::new(url.as_str(), timeout)?));
    }
    match (&config.sweep.destination, &config.sweep.transfer_url) {
        (Some(destination), Some(url)) => {
            let destination = Address::new(destination.as_str())?;
            dispatcher = dispatcher.with_transfer(
                Arc::new(HttpTransferService::new(url.as_str(), timeout)?),
                destination,
            );
        }
        _ => {
            tracing::info!("sweeping disabled: destination or transfer endpoint not configured");
        }
    }

    let generator = CandidateGenerator::with_word_count(config.scan.word_count)?;
    let mut engine = ScanEngine::new(Arc::new(generator), oracle, Arc::new(dispatcher))
        .with_worker_count(config.scan.workers);
    if config.scan.dedup_across_sessions {
        if let Some(store) = &store {
            let known = store.known_addresses().await?;
            tracing::info!("preloading {} known addresses", known.len());
            engine = engine.with_known_addresses(known);
        }
    }

    let mut session = engine.start();
    let mut discoveries = session.subscribe();
    println!(
        "Scanning {} with {} workers. Ctrl-C to stop.",
        network, config.scan.workers
    );

    let mut ticker = tokio::time::interval(Duration::from_secs(5));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
            () = session.cancelled() => {
                // The pool stopped itself (generator failure)
                break;
            }
            _ = ticker.tick() => {
                report::print_snapshot(&session.snapshot());
            }
            received = discoveries.recv() => {
                match received {
                    Ok(discovery) => report::print_discovery(&discovery),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!("dropped {skipped} discovery notifications");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    if let Err(e) = session.stop().await {
        tracing::error!("session ended with failure: {e}");
    }
    report::print_snapshot(&session.snapshot());

    Ok(())
}

async fn run_recover(config: &AppConfig, phrase: &str, network: Option<String>) -> Result<()> {
    let network = resolve_network(config, network)?;
    let address = seedsweep_wallet::derive_address(phrase)?;
    println!("Address: {address}");

    let oracle = oracle_for(config, network)?;
    let balance = oracle.balance_of(&address).await?;
    println!("Balance: {balance}");
    if !balance.is_zero() {
        println!("This wallet is funded.");
    }

    Ok(())
}

async fn run_list(config: &AppConfig, limit: usize) -> Result<()> {
    let path = store_path(config)?;
    if !path.exists() {
        println!("No discoveries recorded yet.");
        return Ok(());
    }

    let store = DiscoveryStore::open(&path).await?;
    let discoveries = store.list().await?;
    if discoveries.is_empty() {
        println!("No discoveries recorded yet.");
        return Ok(());
    }

    println!("{} discoveries recorded, newest first:", discoveries.len());
    #[allow(clippy::cast_precision_loss)]
    for discovery in discoveries.iter().rev().take(limit) {
        println!(
            "{}  {}  {} XRP",
            discovery.discovered_at.to_rfc3339(),
            discovery.address,
            discovery.balance_drops as f64 / 1_000_000.0,
        );
        println!("    {}", discovery.phrase);
    }

    Ok(())
}
