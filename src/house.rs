//! House table parsing
//!
//! The `house_state` blob lists which cats live in the house and in which room.
//! Unlike cat records it is fully fixed-offset:
//!
//! ```text
//! 0   u32   (unused)
//! 4   u32   entry count
//! 8   entries:
//!       u32 key, 4 bytes padding
//!       u32 room_len, 4 bytes padding
//!       room_len bytes ASCII room name
//!       24 bytes not modeled
//! ```

use std::collections::HashMap;

use byteorder::{ByteOrder, LittleEndian};
use tracing::debug;

use crate::layout::HouseEntry;

/// Cat key to room name, built once per save and read-only afterwards
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomIndex {
    rooms: HashMap<u32, String>,
}

impl RoomIndex {
    /// Parse a `house_state` blob.
    ///
    /// Never fails: a buffer too short for the header gives an empty index and
    /// a truncated entry list keeps everything decoded before the cut.
    pub fn parse(data: &[u8]) -> Self {
        let mut index = RoomIndex::default();
        if data.len() < HouseEntry::HEADER_SIZE {
            return index;
        }

        let count = LittleEndian::read_u32(&data[HouseEntry::COUNT_OFFSET..HouseEntry::HEADER_SIZE]);
        let mut pos = HouseEntry::HEADER_SIZE;

        for n in 0..count {
            if data.len().saturating_sub(pos) < HouseEntry::SLOT_SIZE {
                debug!("house table truncated at entry {n}/{count}");
                break;
            }
            let key = LittleEndian::read_u32(&data[pos..pos + 4]);
            pos += HouseEntry::SLOT_SIZE;

            let Some(room_len) = read_u32_at(data, pos) else {
                debug!("house table truncated in entry {n}/{count} (key {key})");
                break;
            };
            pos += HouseEntry::SLOT_SIZE;

            let room_len = room_len as usize;
            let room = if room_len > 0 {
                let end = pos.saturating_add(room_len).min(data.len());
                let name = ascii_lossy(&data[pos.min(end)..end]);
                pos = pos.saturating_add(room_len);
                name
            } else {
                String::new()
            };
            pos = pos.saturating_add(HouseEntry::TRAILER_SIZE);

            index.rooms.insert(key, room);
        }

        debug!("house table: {} cats in {} entries", index.len(), count);
        index
    }

    pub fn insert(&mut self, key: u32, room: String) {
        self.rooms.insert(key, room);
    }

    pub fn get(&self, key: u32) -> Option<&str> {
        self.rooms.get(&key).map(String::as_str)
    }

    pub fn contains(&self, key: u32) -> bool {
        self.rooms.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Entries sorted by key
    pub fn entries(&self) -> Vec<(u32, &str)> {
        let mut entries: Vec<_> = self.rooms.iter().map(|(k, v)| (*k, v.as_str())).collect();
        entries.sort_by_key(|(k, _)| *k);
        entries
    }
}

fn read_u32_at(data: &[u8], pos: usize) -> Option<u32> {
    let bytes = data.get(pos..pos.checked_add(4)?)?;
    Some(LittleEndian::read_u32(bytes))
}

/// Keep ASCII bytes, drop everything else
fn ascii_lossy(bytes: &[u8]) -> String {
    bytes.iter().filter(|b| b.is_ascii()).map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: u32, room: &str) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&key.to_le_bytes());
        buf.extend_from_slice(&[0xCC; 4]);
        buf.extend_from_slice(&(room.len() as u32).to_le_bytes());
        buf.extend_from_slice(&[0xCC; 4]);
        buf.extend_from_slice(room.as_bytes());
        buf.extend_from_slice(&[0xDD; 24]);
        buf
    }

    fn table(count: u32, entries: &[(u32, &str)]) -> Vec<u8> {
        let mut buf = 0xABCDu32.to_le_bytes().to_vec();
        buf.extend_from_slice(&count.to_le_bytes());
        for (k, r) in entries {
            buf.extend(entry(*k, r));
        }
        buf
    }

    #[test]
    fn test_parse_entries() {
        let data = table(3, &[(7, "Den"), (12, "Attic"), (40, "")]);
        let index = RoomIndex::parse(&data);
        assert_eq!(index.len(), 3);
        assert_eq!(index.get(7), Some("Den"));
        assert_eq!(index.get(12), Some("Attic"));
        assert_eq!(index.get(40), Some(""));
        assert!(index.contains(40));
        assert!(!index.contains(8));
        assert_eq!(index.entries(), [(7, "Den"), (12, "Attic"), (40, "")]);
    }

    #[test]
    fn test_short_header() {
        assert!(RoomIndex::parse(&[]).is_empty());
        assert!(RoomIndex::parse(&[1, 0, 0, 0, 5, 0, 0]).is_empty());
        assert!(RoomIndex::parse(&table(0, &[])).is_empty());
    }

    #[test]
    fn test_count_past_end_stops_cleanly() {
        let data = table(10, &[(1, "Den"), (2, "Kitchen")]);
        let index = RoomIndex::parse(&data);
        assert_eq!(index.entries(), [(1, "Den"), (2, "Kitchen")]);
    }

    #[test]
    fn test_truncated_mid_entry() {
        let mut data = table(3, &[(1, "Den"), (2, "Kitchen")]);
        // third entry: key slot only, no room length
        data.extend_from_slice(&3u32.to_le_bytes());
        data.extend_from_slice(&[0; 4]);
        let index = RoomIndex::parse(&data);
        assert_eq!(index.len(), 2);
        assert!(!index.contains(3));
    }

    #[test]
    fn test_room_name_clipped_at_end() {
        let mut data = table(1, &[]);
        data.extend_from_slice(&5u32.to_le_bytes());
        data.extend_from_slice(&[0; 4]);
        data.extend_from_slice(&100u32.to_le_bytes());
        data.extend_from_slice(&[0; 4]);
        data.extend_from_slice(b"Porch");
        let index = RoomIndex::parse(&data);
        assert_eq!(index.get(5), Some("Porch"));
    }

    #[test]
    fn test_later_duplicate_wins() {
        let data = table(2, &[(9, "Den"), (9, "Yard")]);
        let index = RoomIndex::parse(&data);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(9), Some("Yard"));
    }

    #[test]
    fn test_non_ascii_dropped() {
        let data = table(1, &[(4, "Caf\u{e9}")]);
        assert_eq!(RoomIndex::parse(&data).get(4), Some("Caf"));
    }
}
