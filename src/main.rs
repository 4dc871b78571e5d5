//! catsave - Recover cat records from game save files
//!
//! Usage:
//!   catsave <save_file>                 - Dump in-house cats as JSON
//!   catsave dump <save_file> [-o out]   - Dump cats as JSON
//!   catsave rooms <save_file>           - List the house table
//!   catsave info <save_file>            - Show save statistics

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use catsave::save_utils::{dump_cats, list_rooms, show_info, DumpOptions};

#[derive(Parser)]
#[command(name = "catsave")]
#[command(version = "0.1.0")]
#[command(about = "Recover cat records from game save files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the save file (for quick dump mode)
    save_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode cats and write them as JSON
    Dump {
        /// Path to the save file
        save_file: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Include cats that are not in the house
        #[arg(short, long)]
        all: bool,
        /// Only cats in rooms matching this pattern (e.g. "Den", "Bed*")
        #[arg(short, long)]
        room: Option<String>,
        /// Single-line JSON
        #[arg(short, long)]
        compact: bool,
    },
    /// List which cat lives in which room
    Rooms {
        /// Path to the save file
        save_file: PathBuf,
    },
    /// Show save statistics
    Info {
        /// Path to the save file
        save_file: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Dump {
            save_file,
            output,
            all,
            room,
            compact,
        }) => {
            dump_cats(
                &save_file,
                &DumpOptions {
                    output: output.as_deref(),
                    include_all: all,
                    room: room.as_deref(),
                    compact,
                },
            )?;
        }
        Some(Commands::Rooms { save_file }) => {
            list_rooms(&save_file)?;
        }
        Some(Commands::Info { save_file }) => {
            show_info(&save_file)?;
        }
        None => {
            // Quick dump mode
            if let Some(save_file) = cli.save_file {
                dump_cats(&save_file, &DumpOptions::default())?;
            } else {
                eprintln!("Usage: catsave <save_file>");
                eprintln!("       catsave dump <save_file> [-o output] [-a] [-r room] [-c]");
                eprintln!("       catsave rooms <save_file>");
                eprintln!("       catsave info <save_file>");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
