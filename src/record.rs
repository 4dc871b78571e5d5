//! Decoded cat record

use serde::{Serialize, Serializer};

use crate::layout::{Stat, EQUIPMENT_SLOTS};

/// One cat, decoded from a single save blob.
///
/// Built in one pass by `decoder::decode_cat` and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cat {
    /// Row key in the save container, shared with the house table
    #[serde(rename = "db_key")]
    pub db_key: u32,
    pub in_house: bool,
    pub room: Option<String>,
    pub breed_id: u32,
    #[serde(serialize_with = "serialize_unique_id")]
    pub unique_id: u64,
    pub name: String,
    pub collar: Option<String>,
    pub body_parts: BodyParts,
    pub gender: Option<String>,
    pub stats: Stats,
    pub abilities: Vec<String>,
    /// Slot position is meaningful, so empty slots are kept
    pub equipment_slots: [Option<String>; EQUIPMENT_SLOTS],
    pub passives: Vec<String>,
}

impl Cat {
    /// Unique id as shown to users: `0x` and 16 lowercase hex digits
    pub fn unique_id_hex(&self) -> String {
        format_unique_id(self.unique_id)
    }
}

pub fn format_unique_id(id: u64) -> String {
    format!("0x{:016x}", id)
}

fn serialize_unique_id<S: Serializer>(id: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_unique_id(*id))
}

/// Appearance ids picked out of the body part table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyParts {
    pub texture: u32,
    pub body_shape: u32,
    pub head_shape: u32,
}

/// Final value of each stat channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    #[serde(rename = "STR")]
    pub strength: i64,
    #[serde(rename = "DEX")]
    pub dexterity: i64,
    #[serde(rename = "CON")]
    pub constitution: i64,
    #[serde(rename = "INT")]
    pub intelligence: i64,
    #[serde(rename = "SPD")]
    pub speed: i64,
    #[serde(rename = "CHA")]
    pub charisma: i64,
    #[serde(rename = "LCK")]
    pub luck: i64,
}

impl Stats {
    /// Sum the three stored sources per channel.
    ///
    /// Modifiers may be negative enough to push a channel below zero.
    pub fn from_sources(
        allocations: &[u32; Stat::COUNT],
        modifiers: &[i32; Stat::COUNT],
        secondary: &[i32; Stat::COUNT],
    ) -> Self {
        let mut stats = Stats::default();
        for (i, stat) in Stat::ALL.iter().enumerate() {
            let value = allocations[i] as i64 + modifiers[i] as i64 + secondary[i] as i64;
            *stats.channel_mut(*stat) = value;
        }
        stats
    }

    pub fn get(&self, stat: Stat) -> i64 {
        match stat {
            Stat::Strength => self.strength,
            Stat::Dexterity => self.dexterity,
            Stat::Constitution => self.constitution,
            Stat::Intelligence => self.intelligence,
            Stat::Speed => self.speed,
            Stat::Charisma => self.charisma,
            Stat::Luck => self.luck,
        }
    }

    fn channel_mut(&mut self, stat: Stat) -> &mut i64 {
        match stat {
            Stat::Strength => &mut self.strength,
            Stat::Dexterity => &mut self.dexterity,
            Stat::Constitution => &mut self.constitution,
            Stat::Intelligence => &mut self.intelligence,
            Stat::Speed => &mut self.speed,
            Stat::Charisma => &mut self.charisma,
            Stat::Luck => &mut self.luck,
        }
    }

    /// Channels in storage order
    pub fn iter(&self) -> impl Iterator<Item = (Stat, i64)> + '_ {
        Stat::ALL.into_iter().map(move |s| (s, self.get(s)))
    }
}
