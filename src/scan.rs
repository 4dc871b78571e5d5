//! Ability block resynchronization
//!
//! Fields between the body parts and the stats can vary in width, so the
//! decoder does not trust its position when it reaches the ability names.
//! Instead it looks for the first thing shaped like a short ability name:
//!
//! ```text
//! [len: u32 LE, 0 < len < 64] [0u32] ['A'..='Z' ...]
//! ```
//!
//! i.e. a u64 length prefix with a zero high word followed by a capital letter.

use byteorder::{ByteOrder, LittleEndian};

use crate::layout::ScanRule;

/// Find the start of the ability block.
///
/// Candidates are `start..min(start + rule.window, data.len() - rule.peek)`.
/// Returns the first matching offset, or `None` if nothing in the window fits.
pub fn find_ability_block(data: &[u8], start: usize, rule: &ScanRule) -> Option<usize> {
    let end = start
        .saturating_add(rule.window)
        .min(data.len().saturating_sub(rule.peek));
    (start..end).find(|&i| looks_like_ability_name(&data[i..], rule.max_name_len))
}

/// Check the four-condition pattern at the head of `bytes`
fn looks_like_ability_name(bytes: &[u8], max_len: u32) -> bool {
    if bytes.len() < 9 {
        return false;
    }
    let length = LittleEndian::read_u32(&bytes[0..4]);
    let high = LittleEndian::read_u32(&bytes[4..8]);
    length > 0 && length < max_len && high == 0 && bytes[8].is_ascii_uppercase()
}
