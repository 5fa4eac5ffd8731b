//! reward-admin: operator tool for the reward core's record store.
//!
//! Works directly on the data directory and takes its process lock, so it
//! refuses to run while a service holds the same directory.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rc_01_record_store::{JsonFileDocuments, RecordStore, RecordStoreApi};
use reward_runtime::{init_tracing, RuntimeConfig};
use serde::Serialize;

/// reward-admin: inspect and maintain reward claims and booster parties
#[derive(Parser, Debug)]
#[command(name = "reward-admin")]
#[command(about = "Inspect and maintain reward claims and booster parties")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Data directory (overrides configuration)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the data directory and any missing empty tables
    Init,
    /// Claim and booster program totals
    Status,
    /// Show the claim record of a testnet address
    Claimer {
        /// Testnet address
        address: String,
    },
    /// Show the booster party of a social handle
    Party {
        /// Social-media handle (case-insensitive)
        handle: String,
    },
    /// Whitelist a social account
    Whitelist {
        /// Social-media account id
        account_id: String,
        /// Display name
        name: String,
        /// Chat user id of the authorizing operator
        authorizer: String,
    },
    /// Mark a booster party's payment as settled
    Settle {
        /// Social-media account id
        account_id: String,
    },
}

#[derive(Serialize)]
struct StatusReport {
    claims: shared_types::ClaimStatusSummary,
    booster: shared_types::BoosterStatusSummary,
    program_cap: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = RuntimeConfig::load(args.config.as_deref()).context("loading configuration")?;
    if let Some(dir) = args.data_dir {
        config.store.data_dir = dir;
    }

    init_tracing(&config.log_level)
        .map_err(|e| anyhow::anyhow!("installing tracing subscriber: {e}"))?;

    match args.command {
        Command::Init => {
            let created = JsonFileDocuments::initialize(&config.store.data_dir)
                .with_context(|| format!("initializing {}", config.store.data_dir.display()))?;
            if created.is_empty() {
                println!("{}: all tables present", config.store.data_dir.display());
            }
            for table in created {
                println!("created {}", config.store.data_dir.join(table.file_name()).display());
            }
            Ok(())
        }
        Command::Status => {
            let store = open_store(&config)?;
            print_json(&StatusReport {
                claims: store.claim_status_summary(),
                booster: store.booster_status_summary(),
                program_cap: config.booster.program_cap,
            })
        }
        Command::Claimer { address } => match open_store(&config)?.lookup_claim(&address) {
            Some(record) => print_json(&record),
            None => bail!("testnet address not found: {address}"),
        },
        Command::Party { handle } => match open_store(&config)?.lookup_incentive_party(&handle) {
            Some(party) => print_json(&party),
            None => bail!("no booster party for `{handle}`"),
        },
        Command::Whitelist {
            account_id,
            name,
            authorizer,
        } => {
            let entry = open_store(&config)?
                .whitelist(&account_id, &name, &authorizer)
                .context("whitelisting account")?;
            print_json(&entry)
        }
        Command::Settle { account_id } => {
            let store = open_store(&config)?;
            store
                .mark_payment_settled(&account_id)
                .context("settling payment")?;
            match store.party_by_account(&account_id) {
                Some(party) => print_json(&party),
                None => bail!("booster party not found: {account_id}"),
            }
        }
    }
}

fn open_store(config: &RuntimeConfig) -> Result<RecordStore<JsonFileDocuments>> {
    let documents = JsonFileDocuments::open(&config.store.data_dir)
        .with_context(|| format!("opening {}", config.store.data_dir.display()))?;
    RecordStore::open(documents).context("loading tables")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
