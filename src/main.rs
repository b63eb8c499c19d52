//! Swagger generator - Command-line tool for building Swagger 2.0 documents from annotated
//! source comments.
//!
//! # Usage
//!
//! ```bash
//! swagger-gen [OPTIONS]
//! ```
//!
//! # Examples
//!
//! Write `swagger.json` for the current directory into `./docs`:
//! ```bash
//! swagger-gen -o docs
//! ```
//!
//! Print YAML for another source tree:
//! ```bash
//! swagger-gen -s ../my-service -f yaml
//! ```
//!
//! Create a `swagger-meta.json` to edit:
//! ```bash
//! swagger-gen -s ../my-service --init
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use swagger_from_comments::cli;

fn main() -> Result<()> {
    // The verbose flag decides the log level, so parse before initializing the logger
    // and validate afterwards so validation messages are logged.
    let args = cli::CliArgs::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("Swagger generator starting...");

    let args = cli::parse_args_from_parsed(args)?;

    cli::run(args)?;

    info!("Swagger generation completed successfully");

    Ok(())
}
