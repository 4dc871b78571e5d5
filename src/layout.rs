//! Field layout of the cat record and house table formats
//!
//! The save format carries no schema, so every offset and width the decoder
//! relies on lives here. Supporting a different format snapshot means
//! editing these tables, not the decoder.

/// Stat channels, in the order they are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Speed,
    Charisma,
    Luck,
}

impl Stat {
    pub const COUNT: usize = 7;

    /// All channels in storage order
    pub const ALL: [Stat; Stat::COUNT] = [
        Stat::Strength,
        Stat::Dexterity,
        Stat::Constitution,
        Stat::Intelligence,
        Stat::Speed,
        Stat::Charisma,
        Stat::Luck,
    ];

    /// Short display name, as shown in game
    pub fn abbrev(&self) -> &'static str {
        match self {
            Stat::Strength => "STR",
            Stat::Dexterity => "DEX",
            Stat::Constitution => "CON",
            Stat::Intelligence => "INT",
            Stat::Speed => "SPD",
            Stat::Charisma => "CHA",
            Stat::Luck => "LCK",
        }
    }
}

/// Offsets and widths of the cat record.
///
/// Field order is fixed; see `decoder::decode_cat` for the walk.
#[derive(Debug, Clone, Copy)]
pub struct CatLayout {
    /// Reserved block after the unknown string
    pub skip_after_unknown: usize,
    /// Internal stats block, not modeled
    pub skip_internal_stats: usize,
    /// Number of u32 body part slots
    pub body_part_count: usize,
    pub texture_index: usize,
    pub body_shape_index: usize,
    pub head_shape_index: usize,
    /// Reserved block after the body parts
    pub skip_after_body_parts: usize,
    /// Ability names read after the resync point
    pub ability_count: usize,
    /// Flagged passives following the first passive
    pub extra_passive_count: usize,
    /// Minimum bytes left before trying another flagged passive
    pub extra_passive_min_remaining: usize,
    pub scan: ScanRule,
}

/// Parameters of the ability block resync scan
#[derive(Debug, Clone, Copy)]
pub struct ScanRule {
    /// How far past the stat arrays to search
    pub window: usize,
    /// Bytes that must exist after a candidate offset
    pub peek: usize,
    /// Exclusive upper bound on a plausible ability name length
    pub max_name_len: u32,
}

pub const CAT_LAYOUT: CatLayout = CatLayout {
    skip_after_unknown: 16,
    skip_internal_stats: 64,
    body_part_count: 72,
    texture_index: 0,
    body_shape_index: 3,
    head_shape_index: 8,
    skip_after_body_parts: 12,
    ability_count: 6,
    extra_passive_count: 3,
    extra_passive_min_remaining: 12,
    scan: ScanRule {
        window: 500,
        peek: 9,
        max_name_len: 64,
    },
};

/// Longest length prefix a guarded string read accepts
pub const MAX_STRING_LEN: u64 = 10_000;

/// Layout of one house table entry.
///
/// `key (4) + pad (4) + room_len (4) + pad (4) + room (room_len) + trailer (24)`
pub struct HouseEntry;

impl HouseEntry {
    /// Header before the first entry: unused u32 + entry count
    pub const HEADER_SIZE: usize = 8;
    pub const COUNT_OFFSET: usize = 4;
    /// Width of the key and room length slots
    pub const SLOT_SIZE: usize = 8;
    /// Trailing fields not modeled
    pub const TRAILER_SIZE: usize = 24;
}

/// Equipment slot array length, fixed by the format
pub const EQUIPMENT_SLOTS: usize = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_order() {
        let names: Vec<_> = Stat::ALL.iter().map(Stat::abbrev).collect();
        assert_eq!(names, ["STR", "DEX", "CON", "INT", "SPD", "CHA", "LCK"]);
    }

    #[test]
    fn test_body_part_indices_in_range() {
        let l = CAT_LAYOUT;
        for idx in [l.texture_index, l.body_shape_index, l.head_shape_index] {
            assert!(idx < l.body_part_count);
        }
    }
}
