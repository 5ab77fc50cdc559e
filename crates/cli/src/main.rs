use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use taint_modelgen::commands;

/// Taint entry-point model generator CLI.
///
/// This CLI is a thin wrapper around `modelgen-core`. All substantive logic
/// lives in the library so it can be tested thoroughly and reused from
/// other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "taint-modelgen",
    version,
    about = "Generate taint-analysis entry-point models from a type index",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the domain profiles built into this binary.
    Profiles {
        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Run a domain profile against a type index and print the models.
    Generate {
        /// Profile to run (see `profiles`).
        #[arg(long, default_value = "graphql")]
        profile: String,

        /// Path to an exported JSON index snapshot.
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Path to the indexer's query tool to shell out to instead of a
        /// snapshot.
        #[arg(long)]
        index_tool: Option<PathBuf>,

        /// Optional YAML config overriding the profile's annotation and
        /// whitelist defaults.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Expand base classes against a snapshot and print the subclass sets.
    Subclasses {
        /// Path to an exported JSON index snapshot.
        #[arg(long)]
        snapshot: PathBuf,

        /// Base class to expand; repeat for multiple targets.
        #[arg(long = "base", required = true)]
        bases: Vec<String>,

        /// Expand the full transitive closure instead of immediate
        /// subclasses only.
        #[arg(long, default_value_t = false)]
        transitive: bool,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Profiles { json } => commands::list_profiles_command(json),
        Command::Generate { profile, snapshot, index_tool, config, json } => {
            commands::generate_command(
                &profile,
                snapshot.as_deref(),
                index_tool.as_deref(),
                config.as_deref(),
                json,
            )
        }
        Command::Subclasses { snapshot, bases, transitive, json } => {
            commands::subclasses_command(&snapshot, &bases, transitive, json)
        }
    }
}
