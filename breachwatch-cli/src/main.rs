//! BreachWatch CLI
//!
//! Command-line interface for checking addresses against the breach dataset
//! and running the API server.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use breachwatch_api::{ApiConfig, ApiServer};
use breachwatch_cache::VerdictCache;
use breachwatch_core::traits::BreachStore;
use breachwatch_core::types::CheckOutcome;
use breachwatch_crypto::{normalize, validate_and_derive_key};
use breachwatch_lookup::BreachChecker;
use breachwatch_store::{seed_sample_data, MemoryStore, SqliteStore};

/// BreachWatch - check email addresses against known data breaches
#[derive(Parser)]
#[command(name = "breachwatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
        /// Bind address
        #[arg(short, long, env = "BIND_ADDR")]
        bind: Option<String>,
    },

    /// Check one address against the breach database
    Check {
        /// Address to check
        email: String,
        /// Database file
        #[arg(long, env = "DB_PATH")]
        db: Option<PathBuf>,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the lookup key for an address
    Hash {
        /// Address to hash
        email: String,
    },

    /// Insert the sample breach records
    Seed {
        /// Database file
        #[arg(long, env = "DB_PATH")]
        db: Option<PathBuf>,
    },

    /// Run benchmarks
    Bench {
        /// Number of distinct addresses to look up
        #[arg(short, long, default_value = "10000")]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "breachwatch=debug,info"
    } else {
        "breachwatch=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve { port, bind } => cmd_serve(port, bind).await,
        Commands::Check { email, db, json } => cmd_check(&email, db, json).await,
        Commands::Hash { email } => cmd_hash(&email),
        Commands::Seed { db } => cmd_seed(db).await,
        Commands::Bench { count } => cmd_bench(count).await,
    }
}

fn load_config() -> Result<ApiConfig> {
    ApiConfig::from_env().context("Invalid configuration")
}

async fn open_store(db: Option<PathBuf>) -> Result<SqliteStore> {
    let path = match db {
        Some(path) => path,
        None => load_config()?.db_path,
    };
    SqliteStore::open(&path)
        .await
        .with_context(|| format!("Failed to open database at {}", path.display()))
}

/// Run API server
async fn cmd_serve(port: Option<u16>, bind: Option<String>) -> Result<()> {
    let mut config = load_config()?;
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(bind) = bind {
        config.bind_addr = bind;
    }

    println!("{}", "🚀 Starting BreachWatch API server...".cyan().bold());
    println!("   {} http://{}", "Listening on:".green(), config.listen_addr());
    println!("   {} http://{}/api/health", "Health check:".dimmed(), config.listen_addr());
    println!("   {} {}", "Database:".dimmed(), config.db_path.display());
    if config.admin_credentials().is_none() {
        println!("   {}", "⚠️  ADMIN_USERNAME/ADMIN_PASSWORD unset, admin routes disabled".yellow());
    }
    println!("\n   Press Ctrl+C to stop.\n");

    let server = ApiServer::new(config)
        .await
        .context("Failed to start API server")?;
    server.run().await?;

    Ok(())
}

/// Check one address
async fn cmd_check(email: &str, db: Option<PathBuf>, json: bool) -> Result<()> {
    let config = load_config()?;
    let store = open_store(db.or(Some(config.db_path))).await?;
    let cache = Arc::new(VerdictCache::new(config.cache.ttl()));
    let checker = BreachChecker::new(cache, Arc::new(store));

    let outcome = checker.check_key(email).await.context("Lookup failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome {
        CheckOutcome::Rejected => bail!("Not a valid email address: {email:?}"),
        CheckOutcome::Hit { compromised } | CheckOutcome::Miss { compromised } => {
            if compromised {
                println!("{} {}", "⚠️  Found in known data breaches:".red().bold(), email);
            } else {
                println!("{} {}", "✅ Not found in known data breaches:".green().bold(), email);
            }
        }
    }

    Ok(())
}

/// Print the lookup key
fn cmd_hash(email: &str) -> Result<()> {
    let Some(key) = validate_and_derive_key(email) else {
        bail!("Not a valid email address: {email:?}");
    };

    println!("   {} {}", "Normalized:".dimmed(), normalize(email));
    println!("   {} {}", "Key:".yellow(), key);

    Ok(())
}

/// Seed sample data
async fn cmd_seed(db: Option<PathBuf>) -> Result<()> {
    println!("{}", "🌱 Seeding sample breach records...".cyan().bold());

    let store = open_store(db).await?;
    let inserted = seed_sample_data(&store).await.context("Failed to seed")?;
    let total = store.count().await?;

    println!("   {} {} new record(s)", "✓ Inserted".green(), inserted);
    println!("   {} {} record(s) at {}", "Database holds".dimmed(), total, store.path().display());

    Ok(())
}

/// Run benchmarks
async fn cmd_bench(count: usize) -> Result<()> {
    println!("{} {} addresses", "📊 Benchmarking with".cyan().bold(), count);

    let store = Arc::new(MemoryStore::new());
    seed_sample_data(store.as_ref()).await?;
    let cache = Arc::new(VerdictCache::new(Duration::from_secs(900)));
    let checker = BreachChecker::new(cache.clone(), store);

    let emails: Vec<String> = (0..count).map(|i| format!("user{i}@bench.example")).collect();

    // Cold pass: every lookup reaches the store
    println!("\n{}", "1. Cold lookups...".dimmed());
    let pb = ProgressBar::new(count as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("   [{bar:40.cyan/blue}] {pos}/{len}")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    for email in &emails {
        checker.check_key(email).await?;
        pb.inc(1);
    }
    pb.finish();
    let cold_time = start.elapsed();
    println!("   ✓ {} cold lookups: {:?}", count, cold_time);

    // Warm pass: every lookup is a cache hit
    println!("\n{}", "2. Cached lookups...".dimmed());
    let start = Instant::now();
    for email in &emails {
        checker.check_key(email).await?;
    }
    let warm_time = start.elapsed();
    println!("   ✓ {} cached lookups: {:?}", count, warm_time);

    // Sweep
    println!("\n{}", "3. Sweeping...".dimmed());
    let start = Instant::now();
    let (swept, removed) = sweep(&cache);
    println!("   ✓ Sweep over {} entries removed {}: {:?}", swept, removed, start.elapsed());

    let stats = checker.stats();
    let per_lookup = |elapsed: Duration| elapsed.as_nanos() as f64 / count.max(1) as f64 / 1000.0;

    println!("\n{}", "📈 Results:".green().bold());
    println!("   Cold: {:.2}µs per lookup", per_lookup(cold_time));
    println!("   Cached: {:.2}µs per lookup", per_lookup(warm_time));
    println!("   Hit ratio: {:.1}%", stats.hit_ratio() * 100.0);

    if stats.cache_hits as usize == count {
        println!("   {} Every repeat lookup was served from the cache", "✅".green());
    } else {
        println!("   {} Expected {} cache hits, got {}", "❌".red(), count, stats.cache_hits);
    }

    Ok(())
}

/// Runs one sweep and returns (entries before, entries removed).
fn sweep(cache: &VerdictCache) -> (usize, usize) {
    let before = cache.len();
    let removed = cache.remove_expired();
    (before, removed)
}
