//! CLI command definitions and handlers

mod detect;
mod init;
mod serve;

use crate::config::Config;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// codeorigin - Heuristic AI-vs-human code authorship detection
#[derive(Parser, Debug)]
#[command(name = "codeorigin")]
#[command(
    version,
    about = "Estimate whether source code was written by an AI assistant or a human",
    after_help = "\
Examples:
  codeorigin detect src/                     Score every supported file under src/
  codeorigin detect main.py --format json    JSON output for scripting
  cat snippet.js | codeorigin detect -l js   Score stdin
  codeorigin serve --port 8080               Start the HTTP API
  codeorigin init                            Write an example codeorigin.toml"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file (default: codeorigin.toml in the working directory)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score files, directories, or stdin
    Detect {
        /// Files or directories to analyze (reads stdin when omitted)
        paths: Vec<PathBuf>,

        /// Language hint applied to every input (default: from file extension)
        #[arg(long, short = 'l')]
        language: Option<String>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Seed the jitter for reproducible scores
        #[arg(long)]
        seed: Option<u64>,

        /// Disable score jitter entirely
        #[arg(long)]
        no_jitter: bool,

        /// Exit with code 1 if any input is classified as AI
        #[arg(long)]
        fail_on_ai: bool,
    },

    /// Start the HTTP detection API
    Serve {
        /// Interface to bind (overrides config and API_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config, API_PORT and PORT)
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },

    /// Write an example codeorigin.toml
    Init {
        /// Directory to write into
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Resolve configuration: an explicit file wins, otherwise layered discovery from the working directory
fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => {
            let mut config = Config::from_file(path)?;
            config.apply_env(|key| std::env::var(key).ok());
            Ok(config)
        }
        None => {
            let cwd = std::env::current_dir()?;
            Ok(Config::load(&cwd))
        }
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Detect {
            paths,
            language,
            format,
            output,
            seed,
            no_jitter,
            fail_on_ai,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            if seed.is_some() {
                config.engine.seed = seed;
            }
            if no_jitter {
                config.engine.jitter = 0.0;
            }
            detect::run(
                &config,
                &paths,
                language.as_deref(),
                &format,
                output.as_deref(),
                fail_on_ai,
            )
        }

        Commands::Serve { host, port } => {
            let mut config = load_config(cli.config.as_deref())?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve::run(&config)
        }

        Commands::Init { path, force } => init::run(&path, force),
    }
}
