//! `ballot` — drive a single election from the command line.

use anyhow::{bail, Context};
use ballot_cli::{run_script, ElectionConfig, Script, Status};
use ballot_election::Election;
use ballot_utils::LogFormat;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ballot", about = "Weighted-delegation election driver")]
struct Cli {
    /// Log level: "trace", "debug", "info", "warn", "error".
    /// Defaults to the config file's value, then "info".
    #[arg(long, env = "BALLOT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "BALLOT_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Create an election from a config file and save its state.
    Init {
        #[arg(long, env = "BALLOT_CONFIG")]
        config: PathBuf,
        #[arg(long, env = "BALLOT_STATE")]
        state: PathBuf,
        /// Overwrite an existing state file.
        #[arg(long)]
        force: bool,
    },
    /// Apply a script of operations to a saved election.
    Apply {
        #[arg(long, env = "BALLOT_STATE")]
        state: PathBuf,
        #[arg(long)]
        script: PathBuf,
        /// Abort without saving on the first rejected step.
        #[arg(long)]
        strict: bool,
    },
    /// Print the tally and current winner of a saved election.
    Status {
        #[arg(long, env = "BALLOT_STATE")]
        state: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Create an election in memory, apply a script, print the result.
    Run {
        #[arg(long, env = "BALLOT_CONFIG")]
        config: PathBuf,
        #[arg(long)]
        script: PathBuf,
        #[arg(long)]
        strict: bool,
        #[arg(long)]
        json: bool,
    },
}

fn load_state(path: &Path) -> anyhow::Result<Election> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read state {}", path.display()))?;
    Election::load_state(&bytes).with_context(|| format!("invalid state {}", path.display()))
}

fn save_state(path: &Path, election: &Election) -> anyhow::Result<()> {
    let bytes = election.save_state()?;
    std::fs::write(path, bytes)
        .with_context(|| format!("failed to write state {}", path.display()))
}

fn load_script(path: &Path) -> anyhow::Result<Script> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    Script::from_toml_str(&content).with_context(|| format!("invalid script {}", path.display()))
}

fn print_status(election: &Election, json: bool) -> anyhow::Result<()> {
    let status = Status::from(election);
    if json {
        println!("{}", status.to_json()?);
    } else {
        println!("{status}");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config = match &cli.command {
        Command::Init { config, .. } | Command::Run { config, .. } => {
            Some(ElectionConfig::from_toml_file(config)?)
        }
        _ => None,
    };

    let log_format = cli
        .log_format
        .or(file_config.as_ref().map(|c| c.log_format))
        .unwrap_or_default();
    let log_level = cli
        .log_level
        .or_else(|| file_config.as_ref().map(|c| c.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    ballot_utils::init_logging(log_format, &log_level);

    match cli.command {
        Command::Init { state, force, .. } => {
            if state.exists() && !force {
                bail!("{} already exists, pass --force to overwrite", state.display());
            }
            let config = file_config.context("config not loaded")?;
            let election = config.build()?;
            save_state(&state, &election)?;
            tracing::info!(
                "created election with {} proposals at {}",
                election.proposal_count(),
                state.display()
            );
        }
        Command::Apply {
            state,
            script,
            strict,
        } => {
            let mut election = load_state(&state)?;
            let script = load_script(&script)?;
            let outcome = run_script(&mut election, &script, strict)?;
            save_state(&state, &election)?;
            println!(
                "applied {} step(s), rejected {}",
                outcome.applied,
                outcome.rejected.len()
            );
        }
        Command::Status { state, json } => {
            let election = load_state(&state)?;
            print_status(&election, json)?;
        }
        Command::Run {
            script,
            strict,
            json,
            ..
        } => {
            let config = file_config.context("config not loaded")?;
            let mut election = config.build()?;
            let script = load_script(&script)?;
            run_script(&mut election, &script, strict)?;
            print_status(&election, json)?;
        }
    }

    Ok(())
}
