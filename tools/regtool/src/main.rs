//! regtool - Modbus register value tool for VoltageEMS
//!
//! Decodes register windows, encodes typed values into registers and lists
//! a register block row by row in any of the 28 value formats.

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use common::LogConfig;
use voltage_regcodec::{RegisterWord, ValueFormat};

use crate::commands::parse_word;
use crate::config::{RegtoolConfig, SERVICE_NAME};

#[derive(Parser)]
#[command(name = "regtool")]
#[command(about = "Modbus register value tool")]
#[command(long_about = "Modbus register value tool

Examples:
  regtool formats                                  # List all value formats
  regtool decode -f float-be-swap 0x0000 0x3f80    # Decode two registers
  regtool encode -f int32-le -- -2                 # Encode a value
  regtool table -f uint32-be -a 100 0 1 0 2        # Show rows with addresses")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Configuration file (default: regtool.toml / config/regtool.* in the working directory)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all value formats
    Formats,

    /// Decode one value from register words
    Decode {
        /// Value format key or label (default: from config)
        #[arg(short, long)]
        format: Option<ValueFormat>,

        /// Index of the first register to read
        #[arg(short, long, default_value_t = 0)]
        offset: usize,

        /// Register words, decimal or 0x hex
        #[arg(required = true, value_parser = parse_word)]
        words: Vec<RegisterWord>,
    },

    /// Encode a value into register words
    Encode {
        /// Value format key or label (default: from config)
        #[arg(short, long)]
        format: Option<ValueFormat>,

        /// Value text, as typed into a register cell
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Show register words as `address = value` rows
    Table {
        /// Value format key or label (default: from config)
        #[arg(short, long)]
        format: Option<ValueFormat>,

        /// Address of the first register (default: from config)
        #[arg(short, long)]
        address: Option<u16>,

        /// Register words, decimal or 0x hex
        #[arg(required = true, value_parser = parse_word)]
        words: Vec<RegisterWord>,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "ERROR".red(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = RegtoolConfig::load(cli.config.as_deref())?;

    let log_config = LogConfig {
        service_name: SERVICE_NAME.to_string(),
        level: if cli.verbose {
            "debug".to_string()
        } else {
            config.log_level.clone()
        },
        log_dir: config.log_dir.clone(),
        ansi: !cli.no_color,
    };
    let _guard = common::logging::init_with_config(&log_config)?;

    match cli.command {
        Commands::Formats => {
            let listing = commands::list_formats();
            let mut lines = listing.lines();
            if let Some(header) = lines.next() {
                println!("{}", header.bold());
            }
            for line in lines {
                println!("{}", line);
            }
        },
        Commands::Decode {
            format,
            offset,
            words,
        } => {
            let format = format.unwrap_or(config.default_format);
            let text = commands::decode(&words, offset, format)?;
            println!("{} {}", format.label().dimmed(), text.green());
        },
        Commands::Encode { format, value } => {
            let format = format.unwrap_or(config.default_format);
            let words = commands::encode(&value, format)?;
            println!("{} {}", format.label().dimmed(), words.green());
        },
        Commands::Table {
            format,
            address,
            words,
        } => {
            let format = format.unwrap_or(config.default_format);
            let address = address.unwrap_or(config.start_address);
            println!("{}", format.label().bold());
            println!("{}", commands::table(&words, address, format)?);
        },
    }

    Ok(())
}
