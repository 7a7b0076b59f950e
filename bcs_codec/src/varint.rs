use crate::cursor::ByteCursor;
use crate::error::{CodecError, Result};
use crate::sink::ByteSink;

/// Length/count fields and variant indices are capped at `u32::MAX`.
pub const MAX_SEQUENCE_LEN: u64 = u32::MAX as u64;

const CONTINUATION: u8 = 0x80;
const PAYLOAD_MASK: u8 = 0x7f;

/// Append the minimal ULEB128 encoding of `value`.
pub fn write_uleb128(sink: &mut ByteSink, mut value: u32) {
    loop {
        let group = (value & PAYLOAD_MASK as u32) as u8;
        value >>= 7;
        if value == 0 {
            sink.push(group);
            return;
        }
        sink.push(group | CONTINUATION);
    }
}

/// Read a ULEB128 value, enforcing canonicality.
///
/// Rejected inputs: a terminal zero group after at least one continuation
/// group (non-minimal, whatever the group count), a value above the u32 cap
/// or a non-zero group past the fifth (overflow), and a continuation bit
/// with no following byte (end of input). The cursor advances only on
/// success.
pub fn read_uleb128(cursor: &mut ByteCursor) -> Result<u32> {
    let rest = cursor.rest();
    let mut value: u64 = 0;
    let mut shift: u32 = 0;
    let mut overflow = false;
    for (i, &byte) in rest.iter().enumerate() {
        let group = u64::from(byte & PAYLOAD_MASK);
        if shift <= 28 {
            value |= group << shift;
        } else if group != 0 {
            // A group past the fifth can never contribute to a u32 value.
            overflow = true;
        }
        if byte & CONTINUATION == 0 {
            if i > 0 && byte == 0 {
                return Err(CodecError::NonMinimalVarint);
            }
            if overflow || value > MAX_SEQUENCE_LEN {
                return Err(CodecError::VarintOverflow);
            }
            cursor.advance(i + 1);
            return Ok(value as u32);
        }
        shift += 7;
    }
    Err(CodecError::UnexpectedEndOfInput {
        wanted: rest.len() + 1,
        remaining: rest.len(),
    })
}
