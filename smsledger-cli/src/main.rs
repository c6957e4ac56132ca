use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod config;
mod input;
mod output;
mod state;

use config::{Config, LogSection, OutputFormat};
use output::{BatchRecord, ParseReport};

#[derive(Parser, Debug)]
#[command(
    name = "smsledger",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SMSLEDGER_BUILD_SHA"), ")"),
    about = "Extract transaction facts from bank and wallet SMS"
)]
struct Cli {
    /// Config file (default: ~/.smsledger/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset, e.g. `debug` (default: config log.level)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse one message and print the extracted fields with a validity verdict
    Parse {
        /// Message text
        text: Option<String>,

        /// Read the message from stdin instead
        #[arg(long, conflicts_with = "text")]
        stdin: bool,
    },

    /// Parse a file of messages (plain lines or JSON lines with text/date)
    Batch {
        #[arg(long, short)]
        input: PathBuf,

        /// Output format (default: config output.format)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Only emit messages that pass validation
        #[arg(long)]
        valid_only: bool,
    },

    /// Print the normalized tokens of a message
    Tokens { text: String },

    /// Manage ~/.smsledger/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_file = cli.config.as_deref();
    let cfg = config::load_config(config_file)?;
    init_tracing(cli.log_level.as_deref(), &cfg.log);

    match cli.command {
        Command::Parse { text, stdin } => {
            let text = message_text(text, stdin)?;
            let report = ParseReport::new(&text, &cfg.validation);
            output::write_report(&mut io::stdout().lock(), &report, cfg.output.pretty)?;
        }

        Command::Batch {
            input,
            format,
            valid_only,
        } => {
            run_batch(&cfg, &input, format.unwrap_or(cfg.output.format), valid_only)?;
        }

        Command::Tokens { text } => {
            let mut out = io::stdout().lock();
            for token in smsledger_parser::normalize(&text) {
                writeln!(out, "{token}")?;
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(config_file)?,
            ConfigCommand::Show => config::show_config(config_file)?,
        },
    }

    Ok(())
}

fn init_tracing(cli_level: Option<&str>, log: &LogSection) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = cli_level.unwrap_or(&log.level);
        format!("smsledger={level},smsledger_parser={level},smsledger_core={level}").into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if log.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer().with_writer(io::stderr).boxed()
    };
    subscriber.with(fmt_layer).init();
}

fn message_text(text: Option<String>, stdin: bool) -> Result<String> {
    if stdin {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("read message from stdin")?;
        return Ok(buf.trim_end_matches(['\r', '\n']).to_string());
    }
    match text {
        Some(text) => Ok(text),
        None => bail!("no message given (pass TEXT or --stdin)"),
    }
}

fn run_batch(cfg: &Config, path: &Path, format: OutputFormat, valid_only: bool) -> Result<()> {
    if !path.exists() {
        bail!("input not found: {}", path.display());
    }
    let inputs = input::read_records(path)?;
    let total = inputs.len();

    let records: Vec<BatchRecord> = inputs
        .into_iter()
        .map(|record| BatchRecord::new(record, &cfg.validation))
        .filter(|record| !valid_only || record.report.is_valid_transaction)
        .collect();

    let valid = records
        .iter()
        .filter(|r| r.report.is_valid_transaction)
        .count();
    info!(total, valid, emitted = records.len(), ?format, "batch parsed");

    output::write_batch(&mut io::stdout().lock(), &records, format, cfg.output.pretty)
        .with_context(|| format!("writing results for {}", path.display()))
}
