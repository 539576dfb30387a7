//! buildplan CLI tool.

use buildplan_core::HookStage;
use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "buildplan")]
#[command(about = "Validate and inspect CI build configuration", long_about = None)]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a build configuration
    Validate {
        /// Path to the configuration file
        #[arg(env = "BUILDPLAN_CONFIG", default_value = ".travis.yml")]
        path: String,
    },
    /// Show the parsed build plan
    Show {
        /// Path to the configuration file
        #[arg(env = "BUILDPLAN_CONFIG", default_value = ".travis.yml")]
        path: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List the jobs of the expanded build matrix
    Matrix {
        /// Path to the configuration file
        #[arg(env = "BUILDPLAN_CONFIG", default_value = ".travis.yml")]
        path: String,
    },
    /// Show hook commands
    Hooks {
        /// Path to the configuration file
        #[arg(env = "BUILDPLAN_CONFIG", default_value = ".travis.yml")]
        path: String,
        /// Only show this stage (e.g., before_script)
        #[arg(long)]
        stage: Option<HookStage>,
    },
    /// Check whether a branch is allowed to build
    Branch {
        /// Branch name
        name: String,
        /// Path to the configuration file
        #[arg(long, env = "BUILDPLAN_CONFIG", default_value = ".travis.yml")]
        config: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Validate { path } => commands::validate(&path),
        Commands::Show { path, format } => match format {
            OutputFormat::Text => commands::show::text(&path),
            OutputFormat::Json => commands::show::json(&path),
        },
        Commands::Matrix { path } => commands::show::matrix(&path),
        Commands::Hooks { path, stage } => commands::show::hooks(&path, stage),
        Commands::Branch { name, config } => commands::branch::check(&config, &name),
    }
}
