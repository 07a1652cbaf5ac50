//! graphgen command line
//!
//! Loads `graphgen.toml`, wires the filesystem schema loader and the
//! configured generator commands, and runs the requested pipelines.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use adapters::{CommandToolchain, FsSchemaLoader};
use clap::{Args, Parser, Subcommand};
use config::GenerationConfig;
use graphgen_cli::{load_config, render_report, write_default_config, CliError, Result};
use pipeline::{GenerationFlags, PipelineKind};

/// Command-line interface configuration for graphgen.
#[derive(Parser, Debug)]
#[command(
    name = "graphgen",
    about = "Generate a GraphQL backend, client documents and database migrations",
    version
)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
    /// Path to graphgen.toml; searched for upwards from the current directory when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log level or filter directive, overriding [logging] level
    #[arg(long, global = true)]
    log_level: Option<String>,
}

/// Available graphgen commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the selected pipelines (backend only when none is selected)
    Generate(PipelineArgs),
    /// Validate the configuration for the selected pipelines without generating
    Check(PipelineArgs),
    /// Write a default graphgen.toml
    Init {
        /// Directory to write into
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone, Copy)]
struct PipelineArgs {
    /// Generate the schema and resolvers
    #[arg(long)]
    backend: bool,
    /// Generate client documents
    #[arg(long)]
    client: bool,
    /// Migrate the database
    #[arg(long)]
    db: bool,
}

impl From<PipelineArgs> for GenerationFlags {
    fn from(args: PipelineArgs) -> Self {
        GenerationFlags { backend: args.backend, client: args.client, db: args.db }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Generation(error)) => {
            eprint!("{}", render_report(&error));
            ExitCode::FAILURE
        }
        Err(error) => {
            eprintln!("error: {}", error);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.cmd {
        Commands::Generate(args) => {
            let config = prepare(cli.config, cli.log_level.as_deref())?;
            let loader = Arc::new(FsSchemaLoader::new());
            let factory =
                Arc::new(CommandToolchain::new(config.generators.clone(), &config.project_root));
            pipeline::generate(args.into(), &config, loader, factory).await?;
            println!("Generation completed successfully.");
            Ok(())
        }
        Commands::Check(args) => {
            let config = prepare(cli.config, cli.log_level.as_deref())?;
            let flags = GenerationFlags::from(args).normalize();
            config.validate()?;
            if flags.runs(PipelineKind::Database) {
                config.require_database()?;
            }
            let pipelines: Vec<String> =
                flags.pipelines().iter().map(PipelineKind::to_string).collect();
            println!("Configuration OK (pipelines: {})", pipelines.join(", "));
            for source in config.schema_sources() {
                println!("  schema source: {}", source.display());
            }
            Ok(())
        }
        Commands::Init { dir, force } => {
            let written = write_default_config(&dir, force)?;
            println!("Wrote {}", written.display());
            Ok(())
        }
    }
}

/// Load the configuration and install logging.
fn prepare(path: Option<PathBuf>, log_level: Option<&str>) -> Result<GenerationConfig> {
    let config = load_config(path.as_deref())?;
    let level = log_level.unwrap_or(&config.logging.level);
    let log_file = config.logging.file.as_ref().map(|file| config.project_root.join(file));
    logging::init(level, log_file.as_deref())?;
    tracing::debug!(root = %config.project_root.display(), "configuration loaded");
    Ok(config)
}
