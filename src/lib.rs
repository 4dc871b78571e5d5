//! # catsave
//!
//! A Rust library for recovering cat records from game save files.
//!
//! ## Overview
//!
//! A save is a SQLite database whose `cats` table holds one LZ4-compressed
//! blob per cat. The blobs have no schema, length table or version tag; field
//! boundaries are known only from reverse engineering. This library provides:
//!
//! - A bounds-checked little-endian cursor with guarded string reads
//! - A record decoder driven by a single layout table
//! - A resync scan that relocates the ability block when earlier fields drift
//! - House table parsing (which cat lives in which room)
//! - Parallel decoding of a whole save with per-record failure reporting
//!
//! ## Example
//!
//! ```rust,no_run
//! use catsave::{DecodeOptions, SaveFile};
//!
//! fn main() -> anyhow::Result<()> {
//!     let save = SaveFile::open("steamcampaign02.sav")?;
//!     let report = save.decode_cats(&DecodeOptions::default())?;
//!
//!     for cat in &report.cats {
//!         println!("{} ({}) STR {}", cat.name, cat.unique_id_hex(), cat.stats.strength);
//!     }
//!     for skipped in &report.skipped {
//!         eprintln!("cat {} unreadable: {}", skipped.db_key, skipped.reason);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Example - Single blob
//!
//! ```rust,no_run
//! use catsave::{compression::{decompress_blob, Lz4Block}, decode_cat, RoomIndex};
//!
//! # fn blob() -> Vec<u8> { Vec::new() }
//! fn main() -> catsave::Result<()> {
//!     let rooms = RoomIndex::default();
//!     let data = decompress_blob(&blob(), &Lz4Block)?;
//!     let cat = decode_cat(&data, 7, &rooms)?;
//!     println!("{}", cat.name);
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod compression;
pub mod cursor;
pub mod decoder;
pub mod error;
pub mod house;
pub mod layout;
pub mod record;
pub mod save;
pub mod save_utils;
pub mod scan;
pub mod utils;

pub use aggregate::{decode_rows, DecodeOptions, DecodeReport, SkippedRecord};
pub use compression::{Decompress, Lz4Block};
pub use cursor::ByteCursor;
pub use decoder::decode_cat;
pub use error::{Error, Result};
pub use house::RoomIndex;
pub use record::{BodyParts, Cat, Stats};
pub use save::SaveFile;
