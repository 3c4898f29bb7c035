//! compliance_fort CLI
//!
//! Command-line interface for proof creation, verification and broker routing.

use anyhow::Context;
use clap::{Parser, Subcommand};
use compliance_fort::broker::get_partition_id;
use compliance_fort::config::EngineConfig;
use compliance_fort::proof::{batch_create, batch_create_items, batch_verify};
use compliance_fort::types::{BatchItem, Message};
use compliance_fort::utils::{Helpers, Logger};
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "compliance_fort")]
#[command(about = "Batch zero-knowledge proofs with a partitioned broker", long_about = None)]
struct Cli {
    /// Engine configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the public key for a secret key
    Keygen {
        #[arg(long)]
        secret_key: i32,
    },

    /// Create a proof for one message
    Prove {
        #[arg(long)]
        id: i32,

        #[arg(long)]
        data: i32,

        #[arg(long)]
        secret_key: i32,

        /// Public key to embed (derived from the secret key if omitted)
        #[arg(long)]
        public_key: Option<i32>,
    },

    /// Verify one proof
    Verify {
        #[arg(long)]
        id: i32,

        #[arg(long)]
        data: i32,

        #[arg(long)]
        proof_r: i32,

        #[arg(long)]
        proof_s: i32,

        #[arg(long)]
        public_key: i32,
    },

    /// Create proofs for a JSON array of {id, data} items
    BatchCreate {
        /// Input file path
        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        secret_key: i32,

        #[arg(long)]
        public_key: Option<i32>,

        /// Output file path (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Verify a JSON array of messages
    BatchVerify {
        /// Input file path
        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        public_key: i32,
    },

    /// Show the partition a key routes to
    Route {
        #[arg(long)]
        key: i32,

        #[arg(long)]
        partitions: usize,
    },

    /// Create, verify and ingest a synthetic batch
    Demo {
        #[arg(long, default_value = "1000")]
        count: i32,

        #[arg(long, default_value = "7")]
        secret_key: i32,
    },

    /// Run the REST API server
    #[cfg(feature = "api")]
    Serve {
        #[arg(long, default_value = "0.0.0.0:8000")]
        addr: std::net::SocketAddr,
    },
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose == 0 {
        Logger::init();
    } else {
        Logger::init_with_level(Logger::level_for_verbosity(cli.verbose));
    }

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if !config.is_legacy() {
        log::info!("using non-legacy proof settings");
    }

    let prover = config.build_prover();
    let verifier = config.build_verifier();

    match cli.command {
        Commands::Keygen { secret_key } => {
            println!("{}", prover.derive_public_key(secret_key));
        }
        Commands::Prove {
            id,
            data,
            secret_key,
            public_key,
        } => {
            let public_key = public_key.unwrap_or_else(|| prover.derive_public_key(secret_key));
            let msg = prover.create_proof(id, data, secret_key, public_key);
            println!("{}", serde_json::to_string_pretty(&msg)?);
        }
        Commands::Verify {
            id,
            data,
            proof_r,
            proof_s,
            public_key,
        } => {
            let msg = Message::new(id, data, proof_r, proof_s, public_key);
            let valid = verifier.verify_proof(&msg, public_key);
            println!("{}", if valid { "valid" } else { "invalid" });
        }
        Commands::BatchCreate {
            input,
            secret_key,
            public_key,
            output,
        } => {
            let items: Vec<BatchItem> = read_json(&input)?;
            let public_key = public_key.unwrap_or_else(|| prover.derive_public_key(secret_key));

            let start = Instant::now();
            let messages = batch_create_items(&prover, &items, secret_key, public_key);
            log::info!(
                "created {} proofs in {}",
                messages.len(),
                Helpers::format_duration_from(start.elapsed())
            );

            let json = serde_json::to_string_pretty(&messages)?;
            match output {
                Some(path) => fs::write(&path, json)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{}", json),
            }
        }
        Commands::BatchVerify { input, public_key } => {
            let messages: Vec<Message> = read_json(&input)?;

            let start = Instant::now();
            let outcome = batch_verify(&verifier, &messages, public_key);
            log::info!(
                "verified {} proofs in {}",
                outcome.total(),
                Helpers::format_duration_from(start.elapsed())
            );
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::Route { key, partitions } => {
            let partitions =
                NonZeroUsize::new(partitions).context("partitions must be at least 1")?;
            println!("{}", get_partition_id(key, partitions));
        }
        Commands::Demo { count, secret_key } => {
            let keys = prover.keypair(secret_key);
            let ids: Vec<i32> = (1..=count).collect();
            let data: Vec<i32> = ids.iter().map(|id| id.wrapping_mul(10)).collect();

            let start = Instant::now();
            let messages = batch_create(&prover, &ids, &data, keys.secret_key, keys.public_key)?;
            println!(
                "created {} proofs in {}",
                messages.len(),
                Helpers::format_duration_from(start.elapsed())
            );

            let start = Instant::now();
            let outcome = batch_verify(&verifier, &messages, keys.public_key);
            println!(
                "verified {}/{} proofs in {}",
                outcome.valid_count,
                outcome.total(),
                Helpers::format_duration_from(start.elapsed())
            );

            let mut broker = config.build_broker()?;
            let report = broker.ingest(&messages, keys.public_key);
            println!(
                "ingested {} messages ({} invalid, {} rejected by full partitions)",
                report.accepted.len(),
                report.rejected_invalid.len(),
                report.rejected_full.len()
            );
            for partition in broker.manager().partitions() {
                println!(
                    "  partition {}: {}/{}",
                    partition.id(),
                    partition.queue().len(),
                    partition.queue().capacity()
                );
            }
        }
        #[cfg(feature = "api")]
        Commands::Serve { addr } => {
            compliance_fort::api::ApiServer::new(addr, config)
                .start()
                .await?;
        }
    }

    Ok(())
}
