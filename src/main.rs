//! # bank-ledger
//! Application replays an operation script against a fresh in-memory ledger and prints one
//! outcome per operation to stdout.
//!
//! ## Input format
//! csv with columns `op`, `account`, `pin`, `holder`, `age`, `address`, `kind`, `amount`,
//! `months`, `joint`, `email`, `mobile`, `loan`, `user`, `password`
//!
//! ## Output format
//! csv with columns `row`, `op`, `status`, `message`
//!
//! Logs go to stderr, filtered with `RUST_LOG`.

#![deny(missing_docs)]

use anyhow::Context;
use bank_ledger::{
    csv::{self, AccountSummary, ScriptRow},
    rates::RateTable,
    script, Ledger,
};
use clap::Parser;
use std::path::{Path, PathBuf};
use tokio::{
    io::{stdout, BufReader},
    spawn,
    sync::mpsc::{channel, Sender},
};
use tokio_stream::wrappers::ReceiverStream;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Replay a banking operation script against an in-memory ledger
#[derive(Parser, Debug)]
#[command(name = "bank-ledger", version, about, long_about = None)]
struct Cli {
    /// Operation script (csv)
    script: PathBuf,

    /// Interest rate table (json), built-in rates when omitted
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Write a summary of every account to this file (csv) after the script ends
    #[arg(long)]
    summary: Option<PathBuf>,
}

async fn read_commands_from_file(filename: PathBuf, sender: Sender<ScriptRow>) -> anyhow::Result<()> {
    let f = tokio::fs::File::open(&filename)
        .await
        .with_context(|| format!("access script file {}", filename.display()))?;

    let bf = BufReader::new(f);
    csv::deserialize_commands_from_csv_reader(bf, sender)
        .await
        .context("improper content of script")
}

async fn load_rates(path: Option<&Path>) -> anyhow::Result<RateTable> {
    let Some(path) = path else {
        return Ok(RateTable::default());
    };

    let raw = tokio::fs::read(path)
        .await
        .with_context(|| format!("access rate file {}", path.display()))?;
    info!(path = %path.display(), "loaded interest rate table");
    RateTable::from_json(raw.as_slice())
}

async fn write_summary(ledger: &Ledger, path: &Path) -> anyhow::Result<()> {
    let summaries: Vec<_> = ledger
        .accounts()
        .map(|acc| AccountSummary::new(acc, ledger.rates()))
        .collect();

    let f = tokio::fs::File::create(path)
        .await
        .with_context(|| format!("create summary file {}", path.display()))?;
    csv::summarize_accounts(tokio_stream::iter(summaries), f).await
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bank_ledger=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let rates = load_rates(cli.rates.as_deref()).await?;

    // read script rows from csv file
    let (tx_rows, rx_rows) = channel(8192);
    let task_read_csv = spawn(read_commands_from_file(cli.script.clone(), tx_rows));

    // single task owns the ledger and applies rows in script order
    let (tx_outcome, rx_outcome) = channel(8192);
    let task_ledger = spawn(script::serve_commands(
        Ledger::new(rates),
        rx_rows,
        tx_outcome,
    ));

    // read outcomes and write them to stdout
    let task_output = spawn(csv::write_outcomes(
        ReceiverStream::new(rx_outcome),
        stdout(),
    ));

    // await for each task to complete and handle it errors if occurred
    task_read_csv.await??;
    let ledger = task_ledger.await??;
    task_output.await?.context("failed to save output")?;

    if let Some(path) = cli.summary {
        write_summary(&ledger, &path)
            .await
            .context("failed to save account summary")?;
    }

    Ok(())
}
