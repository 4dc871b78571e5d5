//! Save file command implementations
//!
//! Functions behind the CLI subcommands: dumping cats as JSON, listing the
//! house table and summarizing a save.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::{
    aggregate::{decode_rows, decode_rows_with, DecodeOptions, DecodeReport},
    compression::Lz4Block,
    utils::{create_room_matcher, format_size},
    Cat, SaveFile,
};

/// Options for `dump_cats`
#[derive(Debug, Clone, Default)]
pub struct DumpOptions<'a> {
    /// Write here instead of stdout
    pub output: Option<&'a Path>,
    /// Include cats that are not in the house
    pub include_all: bool,
    /// Room name pattern
    pub room: Option<&'a str>,
    /// Single-line JSON
    pub compact: bool,
}

/// Decode all cats in a save and write them as a JSON array
pub fn dump_cats(save_path: &Path, opts: &DumpOptions<'_>) -> Result<()> {
    let options = DecodeOptions {
        in_house_only: !opts.include_all,
        room_filter: opts.room.map(create_room_matcher).transpose()?,
    };

    let report = decode_save(save_path, &options)?;
    print_skipped(&report);

    match opts.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_json(BufWriter::new(file), &report.cats, opts.compact)?;
            eprintln!("Wrote {} cats to {}", report.cats.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            write_json(stdout.lock(), &report.cats, opts.compact)?;
        }
    }

    Ok(())
}

/// Print the house table, one cat per line
pub fn list_rooms(save_path: &Path) -> Result<()> {
    let save = open_save(save_path)?;
    let rooms = save.room_index().context("Failed to read house table")?;

    for (key, room) in rooms.entries() {
        let room = if room.is_empty() { "(none)" } else { room };
        println!("{:>10}  {}", key, room);
    }
    println!();
    println!("Total: {} cats in the house", rooms.len());

    Ok(())
}

/// Decode everything and print counts
pub fn show_info(save_path: &Path) -> Result<()> {
    let save = open_save(save_path)?;
    let rooms = save.room_index().context("Failed to read house table")?;
    let rows = save.cat_rows().context("Failed to read cat rows")?;
    let stored: u64 = rows.iter().map(|(_, blob)| blob.len() as u64).sum();

    let report = decode_rows(&rows, &rooms, &Lz4Block, &DecodeOptions::default());
    let in_house = report.cats.iter().filter(|c| c.in_house).count();

    println!("Save Info:");
    println!("  File: {}", save_path.display());
    println!("  Cat rows: {} ({})", rows.len(), format_size(stored));
    println!("  House entries: {}", rooms.len());
    println!("  Decoded: {}", report.decoded());
    println!("  In house: {}", in_house);
    println!("  Skipped: {}", report.skipped.len());

    Ok(())
}

fn open_save(save_path: &Path) -> Result<SaveFile> {
    SaveFile::open(save_path).with_context(|| format!("Failed to open {}", save_path.display()))
}

fn decode_save(save_path: &Path, options: &DecodeOptions) -> Result<DecodeReport> {
    let save = open_save(save_path)?;
    let rooms = save.room_index().context("Failed to read house table")?;
    let rows = save.cat_rows().context("Failed to read cat rows")?;

    eprintln!("Decoding {} cats...", rows.len());

    let pb = ProgressBar::new(rows.len() as u64);
    pb.set_style(ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
    )?);

    let report = decode_rows_with(&rows, &rooms, &Lz4Block, options, &|_| pb.inc(1));
    pb.finish_and_clear();

    eprintln!(
        "Decoded {} of {} cats, kept {}",
        report.decoded(),
        report.total,
        report.cats.len()
    );
    Ok(report)
}

fn print_skipped(report: &DecodeReport) {
    if report.skipped.is_empty() {
        return;
    }
    eprintln!("Skipped {} unreadable cats:", report.skipped.len());
    for s in &report.skipped {
        eprintln!("  {}: {}", s.db_key, s.reason);
    }
}

fn write_json<W: Write>(mut writer: W, cats: &[Cat], compact: bool) -> Result<()> {
    if compact {
        serde_json::to_writer(&mut writer, cats)?;
    } else {
        serde_json::to_writer_pretty(&mut writer, cats)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
