//! Save file container
//!
//! A save is a SQLite database. Two tables matter here:
//!
//! - `files(key, data)`: named blobs; `house_state` holds the room table
//! - `cats(key, data)`: one compressed cat blob per row

use std::path::Path;

use rusqlite::{Connection, OpenFlags, OptionalExtension};
use tracing::{debug, info, warn};

use crate::aggregate::{decode_rows, DecodeOptions, DecodeReport};
use crate::compression::Lz4Block;
use crate::error::Result;
use crate::house::RoomIndex;

const HOUSE_STATE_KEY: &str = "house_state";

/// An open save database
pub struct SaveFile {
    conn: Connection,
}

impl SaveFile {
    /// Open a save read-only
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening save: {}", path.display());
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(Self { conn })
    }

    /// Wrap an existing connection
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Raw `house_state` blob, if the save has one
    pub fn house_state(&self) -> Result<Option<Vec<u8>>> {
        let data = self
            .conn
            .query_row(
                "SELECT data FROM files WHERE key = ?1",
                [HOUSE_STATE_KEY],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(data)
    }

    /// Room index from `house_state`; empty when the row is missing
    pub fn room_index(&self) -> Result<RoomIndex> {
        match self.house_state()? {
            Some(data) => Ok(RoomIndex::parse(&data)),
            None => {
                debug!("save has no {HOUSE_STATE_KEY} entry");
                Ok(RoomIndex::default())
            }
        }
    }

    /// All `(key, blob)` rows of the `cats` table.
    ///
    /// Rows whose key does not fit in a u32 are logged and left out.
    pub fn cat_rows(&self) -> Result<Vec<(u32, Vec<u8>)>> {
        let mut stmt = self.conn.prepare("SELECT key, data FROM cats")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, Vec<u8>>(1)?))
        })?;

        let mut cats = Vec::new();
        for row in rows {
            let (key, blob) = row?;
            match u32::try_from(key) {
                Ok(key) => cats.push((key, blob)),
                Err(_) => warn!("ignoring cat row with key {key} (not a u32)"),
            }
        }
        debug!("read {} cat rows", cats.len());
        Ok(cats)
    }

    /// Read the house table, then decode every cat
    pub fn decode_cats(&self, options: &DecodeOptions) -> Result<DecodeReport> {
        let rooms = self.room_index()?;
        let rows = self.cat_rows()?;
        Ok(decode_rows(&rows, &rooms, &Lz4Block, options))
    }
}
