//! Cat record decoder
//!
//! Walks one decompressed cat blob field by field. The layout is:
//!
//! ```text
//! breed_id        u32
//! unique_id       u64
//! name            u64 count + UTF-16LE
//! (unknown)       guarded string
//! (reserved)      16 bytes
//! collar          guarded string
//! (reserved)      u32
//! (internal)      64 bytes
//! body parts      72 x u32 (texture = 0, body shape = 3, head shape = 8)
//! (reserved)      12 bytes
//! gender          guarded string
//! (reserved)      f64
//! allocations     7 x u32
//! modifiers       7 x i32
//! secondary       7 x i32
//! ...             variable, skipped by the resync scan
//! abilities       6 x guarded string
//! equipment       4 x guarded string
//! passive         guarded string
//! flagged passive up to 3 x (u32 flag + guarded string)
//! ```

use tracing::{debug, trace};

use crate::cursor::ByteCursor;
use crate::error::{Error, Result};
use crate::house::RoomIndex;
use crate::layout::{CatLayout, Stat, CAT_LAYOUT, EQUIPMENT_SLOTS};
use crate::record::{BodyParts, Cat, Stats};
use crate::scan::find_ability_block;

/// Decode a cat blob using the current format layout.
///
/// `db_key` is the row key the blob was stored under; it is what the house
/// table refers to. Any fixed-width read past the end aborts the whole record.
pub fn decode_cat(data: &[u8], db_key: u32, rooms: &RoomIndex) -> Result<Cat> {
    decode_cat_with(data, db_key, rooms, &CAT_LAYOUT)
}

/// Decode a cat blob with an explicit layout table
pub fn decode_cat_with(
    data: &[u8],
    db_key: u32,
    rooms: &RoomIndex,
    layout: &CatLayout,
) -> Result<Cat> {
    let mut cursor = ByteCursor::new(data);

    let breed_id = cursor.read_u32()?;
    let unique_id = cursor.read_u64()?;
    let name = cursor.read_utf16_str()?;

    let _unknown = cursor.read_guarded_str();
    cursor.skip(layout.skip_after_unknown);
    let collar = cursor.read_guarded_str();
    let _reserved = cursor.read_u32()?;

    cursor.skip(layout.skip_internal_stats);
    let body_parts = read_body_parts(&mut cursor, layout)?;
    cursor.skip(layout.skip_after_body_parts);

    let gender = cursor.read_guarded_str();
    let _reserved = cursor.read_f64()?;

    let stats = read_stats(&mut cursor)?;
    trace!(db_key, pos = cursor.position(), "stat arrays read");

    match find_ability_block(data, cursor.position(), &layout.scan) {
        Some(offset) => {
            trace!(db_key, offset, "ability block found");
            cursor.seek(offset);
        }
        None => debug!(
            db_key,
            pos = cursor.position(),
            "no ability block in scan window, reading in place"
        ),
    }

    let abilities = (0..layout.ability_count)
        .filter_map(|_| cursor.read_guarded_str())
        .filter(|s| !s.is_empty())
        .collect();

    let mut equipment_slots: [Option<String>; EQUIPMENT_SLOTS] = Default::default();
    for slot in equipment_slots.iter_mut() {
        *slot = cursor.read_guarded_str();
    }

    let passives = read_passives(&mut cursor, layout)?;

    let room = rooms.get(db_key).map(str::to_owned);

    Ok(Cat {
        db_key,
        in_house: rooms.contains(db_key),
        room,
        breed_id,
        unique_id,
        name,
        collar,
        body_parts,
        gender,
        stats,
        abilities,
        equipment_slots,
        passives,
    })
}

fn read_body_parts(cursor: &mut ByteCursor<'_>, layout: &CatLayout) -> Result<BodyParts> {
    let mut table = Vec::with_capacity(layout.body_part_count);
    for _ in 0..layout.body_part_count {
        table.push(cursor.read_u32()?);
    }
    let part = |index: usize| {
        table.get(index).copied().ok_or_else(|| {
            Error::InvalidLayout(format!(
                "body part index {index} outside {} slots",
                table.len()
            ))
        })
    };
    Ok(BodyParts {
        texture: part(layout.texture_index)?,
        body_shape: part(layout.body_shape_index)?,
        head_shape: part(layout.head_shape_index)?,
    })
}

/// Read allocations, modifiers and secondary sources, in that order
fn read_stats(cursor: &mut ByteCursor<'_>) -> Result<Stats> {
    let mut allocations = [0u32; Stat::COUNT];
    for value in allocations.iter_mut() {
        *value = cursor.read_u32()?;
    }
    let mut modifiers = [0i32; Stat::COUNT];
    for value in modifiers.iter_mut() {
        *value = cursor.read_i32()?;
    }
    let mut secondary = [0i32; Stat::COUNT];
    for value in secondary.iter_mut() {
        *value = cursor.read_i32()?;
    }
    Ok(Stats::from_sources(&allocations, &modifiers, &secondary))
}

/// One plain passive, then flagged passives while enough bytes remain
fn read_passives(cursor: &mut ByteCursor<'_>, layout: &CatLayout) -> Result<Vec<String>> {
    let mut passives = Vec::new();
    if let Some(p) = cursor.read_guarded_str().filter(|s| !s.is_empty()) {
        passives.push(p);
    }
    for _ in 0..layout.extra_passive_count {
        if cursor.remaining() < layout.extra_passive_min_remaining {
            break;
        }
        let _flag = cursor.read_u32()?;
        if let Some(p) = cursor.read_guarded_str().filter(|s| !s.is_empty()) {
            passives.push(p);
        }
    }
    Ok(passives)
}
