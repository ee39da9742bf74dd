// SPDX-License-Identifier: MIT OR Apache-2.0

//! # tagcfg
//!
//! Inspects typed configuration files from the command line.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tagcfg::domain::{ConfigError, ConfigFile, LoadReport};
use tracing_subscriber::EnvFilter;

/// Inspect typed configuration files
#[derive(Parser)]
#[command(name = "tagcfg", version, about = "Inspect typed configuration files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every section and entry
    Show {
        /// Configuration file to read
        file: PathBuf,
    },
    /// Print the encoded value of one entry
    Get {
        /// Configuration file to read
        file: PathBuf,
        /// Section holding the entry
        section: String,
        /// Variable name
        name: String,
    },
    /// Report entries that fail to decode
    Check {
        /// Configuration file to read
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

fn setup_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<ExitCode, ConfigError> {
    match command {
        Commands::Show { file } => {
            let (config, _) = ConfigFile::from_path(&file)?;
            show(&config);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Get {
            file,
            section,
            name,
        } => {
            let (config, _) = ConfigFile::from_path(&file)?;
            match config
                .get_section(&section)
                .and_then(|s| s.get_variable(&name))
            {
                Some(variable) => {
                    println!("{}", variable.serialize());
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!("no variable '{name}' in section '{section}'");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Check { file } => {
            let (_, report) = ConfigFile::from_path(&file)?;
            Ok(check(&report))
        }
    }
}

fn show(config: &ConfigFile) {
    for section in config.sections() {
        println!("[{}]", section.name());
        for variable in section.variables() {
            println!(
                "  {} ({}) = {}",
                variable.name(),
                variable.type_tag(),
                variable.serialize()
            );
        }
    }
}

fn check(report: &LoadReport) -> ExitCode {
    if report.is_clean() {
        println!("ok");
        return ExitCode::SUCCESS;
    }
    for failure in report {
        println!("{failure}");
    }
    println!("{} entries failed to decode", report.len());
    ExitCode::FAILURE
}
