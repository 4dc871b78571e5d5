//! Cat blob decompression
//!
//! Blobs in the `cats` table are LZ4 blocks with a 4-byte little-endian
//! uncompressed size in front:
//!
//! ```text
//! [size: u32 LE] [LZ4 block payload ...]
//! ```

/// Upper bound on LZ4 block expansion (one literal-run byte can add 255)
const MAX_EXPANSION: usize = 255;

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Error, Result};

/// Block decompressor used by the aggregator.
///
/// Implementations must be `Sync`; blobs are decompressed from worker threads.
pub trait Decompress: Sync {
    fn decompress(&self, payload: &[u8], declared_size: u32) -> Result<Vec<u8>>;
}

/// Raw LZ4 block format (no frame header)
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz4Block;

impl Decompress for Lz4Block {
    fn decompress(&self, payload: &[u8], declared_size: u32) -> Result<Vec<u8>> {
        let size = declared_size as usize;
        let limit = payload.len().saturating_mul(MAX_EXPANSION);
        if size > limit {
            return Err(Error::Decompression(format!(
                "declared size {} exceeds what {} payload bytes can expand to",
                size,
                payload.len()
            )));
        }
        let output = lz4_flex::block::decompress(payload, size)
            .map_err(|e| Error::Decompression(e.to_string()))?;
        if output.len() != size {
            return Err(Error::Decompression(format!(
                "size mismatch: expected {}, got {}",
                size,
                output.len()
            )));
        }
        Ok(output)
    }
}

/// Split the size prefix off a stored blob and decompress the rest
pub fn decompress_blob(blob: &[u8], decompressor: &dyn Decompress) -> Result<Vec<u8>> {
    if blob.len() < 4 {
        return Err(Error::Decompression(format!(
            "blob too short for size prefix ({} bytes)",
            blob.len()
        )));
    }
    let declared_size = LittleEndian::read_u32(&blob[..4]);
    decompressor.decompress(&blob[4..], declared_size)
}

/// Build a stored blob from raw record bytes
pub fn compress_blob(data: &[u8]) -> Vec<u8> {
    let mut blob = (data.len() as u32).to_le_bytes().to_vec();
    blob.extend(lz4_flex::block::compress(data));
    blob
}
