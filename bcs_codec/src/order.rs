use crate::error::{CodecError, Result};

/// Sort already-serialized map entries into canonical order.
///
/// Entries are ordered by ascending unsigned byte-lexicographic comparison
/// of the serialized key bytes (not the original key values). A strict
/// prefix sorts before any longer key sharing it. Duplicate serialized keys
/// are rejected.
pub fn sort_map_entries(mut entries: Vec<(Vec<u8>, Vec<u8>)>) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    for pair in entries.windows(2) {
        if pair[0].0 == pair[1].0 {
            return Err(CodecError::DuplicateMapKey {
                key: pair[0].0.clone(),
            });
        }
    }
    Ok(entries)
}

/// Verify that decoded map keys arrived in strictly ascending byte order.
///
/// The decode-side mirror of [`sort_map_entries`]: an equivalent map encoded
/// with any other entry order is non-canonical and must be rejected, since
/// it would hash differently.
pub fn verify_map_order<B: AsRef<[u8]>>(keys: &[B]) -> Result<()> {
    for pair in keys.windows(2) {
        if pair[0].as_ref() >= pair[1].as_ref() {
            return Err(CodecError::MapNotCanonical);
        }
    }
    Ok(())
}
