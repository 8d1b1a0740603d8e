//! hospogate CLI tool.
//!
//! Usage:
//! ```bash
//! hospogate check [OPTIONS] [PATH]
//! hospogate fix [--dry-run] [PATH]
//! hospogate list-rules
//! hospogate init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Naming-convention linter for C# projects
#[derive(Parser)]
#[command(name = "hospogate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "HOSPOGATE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lint checks
    Check {
        /// Path to analyze (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Exit with an error when warnings are found
        #[arg(long)]
        deny_warnings: bool,
    },

    /// Rename every flagged identifier in place
    Fix {
        /// Path to fix (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Report what would change without writing files
        #[arg(long)]
        dry_run: bool,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
    /// Source excerpts with the offending identifier underlined.
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            exclude,
            deny_warnings,
        } => {
            let source = config_resolver::ConfigSource::locate(&path, cli.config.as_deref());
            let failed = commands::check::run(&path, format, exclude, deny_warnings, &source)?;
            if failed {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Fix {
            path,
            dry_run,
            exclude,
        } => {
            let source = config_resolver::ConfigSource::locate(&path, cli.config.as_deref());
            commands::fix::run(&path, dry_run, exclude, &source)
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn config_comes_from_flag_or_environment() {
        let cli = Cli::try_parse_from(["hospogate", "check", "--config", "team.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("team.toml")));

        std::env::set_var("HOSPOGATE_CONFIG", "ci.toml");
        let parsed = Cli::try_parse_from(["hospogate", "fix", "--dry-run"]);
        std::env::remove_var("HOSPOGATE_CONFIG");
        let cli = parsed.unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("ci.toml")));
        assert!(matches!(cli.command, Commands::Fix { dry_run: true, .. }));
    }
}
