//! Decode every cat row of a save
//!
//! Each row is decompressed and decoded on its own, in parallel. A row that
//! fails is recorded in the report and the run continues.

use globset::GlobMatcher;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::compression::{decompress_blob, Decompress};
use crate::decoder::decode_cat;
use crate::error::{Error, Result};
use crate::house::RoomIndex;
use crate::record::Cat;

/// Which decoded cats to keep
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// Drop cats that are not listed in the house table
    pub in_house_only: bool,
    /// Keep only cats whose room name matches
    pub room_filter: Option<GlobMatcher>,
}

impl DecodeOptions {
    fn keeps(&self, cat: &Cat) -> bool {
        if self.in_house_only && !cat.in_house {
            return false;
        }
        match (&self.room_filter, cat.room.as_deref()) {
            (Some(m), Some(room)) => m.is_match(room),
            (Some(_), None) => false,
            (None, _) => true,
        }
    }
}

/// A row that could not be turned into a cat
#[derive(Debug)]
pub struct SkippedRecord {
    pub db_key: u32,
    pub reason: Error,
}

/// Result of decoding a batch of rows
#[derive(Debug, Default)]
pub struct DecodeReport {
    /// Kept cats, sorted by key
    pub cats: Vec<Cat>,
    /// Failed rows, sorted by key
    pub skipped: Vec<SkippedRecord>,
    /// Decoded but dropped by `DecodeOptions`
    pub filtered: usize,
    /// Rows seen
    pub total: usize,
}

impl DecodeReport {
    pub fn decoded(&self) -> usize {
        self.cats.len() + self.filtered
    }
}

enum Outcome {
    Kept(Cat),
    Filtered,
    Skipped(SkippedRecord),
}

/// Decompress and decode one stored row
pub fn decode_row(
    db_key: u32,
    blob: &[u8],
    rooms: &RoomIndex,
    decompressor: &dyn Decompress,
) -> Result<Cat> {
    let data = decompress_blob(blob, decompressor)?;
    decode_cat(&data, db_key, rooms)
}

/// Decode all rows. `rooms` must be complete before this is called.
pub fn decode_rows(
    rows: &[(u32, Vec<u8>)],
    rooms: &RoomIndex,
    decompressor: &dyn Decompress,
    options: &DecodeOptions,
) -> DecodeReport {
    decode_rows_with(rows, rooms, decompressor, options, &|_| {})
}

/// Like `decode_rows`, calling `on_row` with each key once it is handled
pub fn decode_rows_with(
    rows: &[(u32, Vec<u8>)],
    rooms: &RoomIndex,
    decompressor: &dyn Decompress,
    options: &DecodeOptions,
    on_row: &(dyn Fn(u32) + Sync),
) -> DecodeReport {
    let outcomes: Vec<Outcome> = rows
        .par_iter()
        .map(|(db_key, blob)| {
            let outcome = match decode_row(*db_key, blob, rooms, decompressor) {
                Ok(cat) if options.keeps(&cat) => Outcome::Kept(cat),
                Ok(_) => Outcome::Filtered,
                Err(reason) => {
                    warn!(db_key = *db_key, "skipping cat: {reason}");
                    Outcome::Skipped(SkippedRecord {
                        db_key: *db_key,
                        reason,
                    })
                }
            };
            on_row(*db_key);
            outcome
        })
        .collect();

    let mut report = DecodeReport {
        total: rows.len(),
        ..Default::default()
    };
    for outcome in outcomes {
        match outcome {
            Outcome::Kept(cat) => report.cats.push(cat),
            Outcome::Filtered => report.filtered += 1,
            Outcome::Skipped(s) => report.skipped.push(s),
        }
    }
    report.cats.sort_by_key(|c| c.db_key);
    report.skipped.sort_by_key(|s| s.db_key);

    info!(
        "decoded {} of {} cats ({} kept, {} filtered, {} skipped)",
        report.decoded(),
        report.total,
        report.cats.len(),
        report.filtered,
        report.skipped.len()
    );
    report
}
