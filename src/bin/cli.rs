//! restock CLI
//!
//! Runs the availability watcher, or one of its steps on demand.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use restock::{
    config::{self, Credentials, StoragePaths},
    error::Result,
    models::Settings,
    pipeline::{self, Context},
    storage::{LocalStorage, SnapshotStore},
};
use tokio::sync::watch;

/// restock - retailer availability watcher
#[derive(Parser, Debug)]
#[command(
    name = "restock",
    version,
    about = "Watches retailer catalogs and reports availability changes to Telegram"
)]
struct Cli {
    /// Path to storage directory containing settings, venues and snapshot
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the availability loop, command loop and control endpoint until Ctrl-C
    Run,

    /// Run a single availability cycle and exit
    Check,

    /// Print the status digest of the stored snapshot
    Status,

    /// Find venues in a city and print ready-to-use venue config entries
    #[cfg(feature = "discover")]
    Discover {
        /// City id from the discovery settings (e.g. tbilisi)
        #[arg(long)]
        city: String,

        /// Case-insensitive part of the store name
        #[arg(long)]
        name: String,

        /// Product names to pre-fill in every generated entry
        #[arg(long = "track")]
        track: Vec<String>,
    },

    /// Validate settings and venue configuration
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Load everything the Telegram-backed commands need.
fn build_context(storage_dir: &Path) -> Result<Context> {
    let (settings, venues) = config::load_all(storage_dir)?;
    config::validate_venues(&venues)?;
    let paths = StoragePaths::new(storage_dir, &settings);
    let credentials = Credentials::from_env()?;

    log::info!(
        "Loaded {} venues tracking {} products from {}",
        venues.len(),
        venues.iter().map(|v| v.names.len()).sum::<usize>(),
        paths.venues.display()
    );

    Context::build(settings, venues, &paths, credentials)
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("restock starting...");

    match cli.command {
        Command::Run => {
            let ctx = build_context(&cli.storage_dir)?;
            let (shutdown_tx, shutdown_rx) = watch::channel(false);

            tokio::spawn(async move {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => log::info!("Shutdown signal received"),
                    Err(e) => log::error!("Failed to listen for Ctrl-C: {}", e),
                }
                let _ = shutdown_tx.send(true);
            });

            pipeline::run_service(ctx, shutdown_rx).await;
        }

        Command::Check => {
            let ctx = build_context(&cli.storage_dir)?;
            let report = pipeline::run_cycle(&ctx).await;

            log::info!(
                "Checked {} venues ({} failed): {} results, {} notifications sent",
                report.venue_total,
                report.venue_failures,
                report.result_count,
                report.notifications_sent
            );
            if !report.snapshot_written {
                log::warn!("Snapshot was not written");
            }
        }

        Command::Status => {
            let settings = Settings::load_or_default(cli.storage_dir.join("settings.toml"));
            let paths = StoragePaths::new(&cli.storage_dir, &settings);
            let results = LocalStorage::new(&paths.snapshot).load_results().await?;

            log::info!("Snapshot: {}", paths.snapshot.display());
            println!("{}", pipeline::format_digest(&results));
        }

        #[cfg(feature = "discover")]
        Command::Discover { city, name, track } => {
            let settings = Settings::load_or_default(cli.storage_dir.join("settings.toml"));
            let client = restock::utils::http::create_async_client(&settings.http)?;
            let discovery =
                restock::services::DiscoveryClient::new(client, &settings.discovery);

            let venues =
                pipeline::run_discover(&settings.discovery, &discovery, &city, &name, &track)
                    .await?;
            println!("{}", serde_json::to_string_pretty(&venues)?);
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            let (settings, venues) = config::load_all(&cli.storage_dir)?;
            if let Err(e) = config::validate_venues(&venues) {
                log::error!("Venue config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Settings OK");
            log::info!(
                "✓ {} venues OK (snapshot: {})",
                venues.len(),
                StoragePaths::new(&cli.storage_dir, &settings).snapshot.display()
            );

            match Credentials::from_env() {
                Ok(_) => log::info!("✓ Telegram credentials present"),
                Err(e) => log::warn!("{}", e),
            }

            log::info!("All validations passed!");
        }
    }

    log::info!("Done!");

    Ok(())
}
