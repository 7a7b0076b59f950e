use crate::cursor::ByteCursor;
use crate::error::{CodecError, Result};
use crate::order;
use crate::value::U256;
use crate::varint;

/// Canonical deserializer: one read method per encodable shape, consuming an
/// exclusively-owned [`ByteCursor`].
///
/// Stricter than a generic parser: every accepted input is the unique
/// canonical encoding of its value. Non-minimal varints, out-of-range tag
/// bytes, invalid UTF-8, implausible lengths and out-of-order map keys are
/// all rejected. Primitive reads advance the cursor exactly by the bytes
/// consumed on success and leave it unchanged on failure; a failed compound
/// read aborts the whole decode, so no partial output escapes.
pub struct Deserializer<'a> {
    cursor: ByteCursor<'a>,
}

impl<'a> Deserializer<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            cursor: ByteCursor::new(buf),
        }
    }

    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Require that the whole input buffer was consumed. Every top-level
    /// decode must end with this.
    pub fn finish(self) -> Result<()> {
        self.cursor.expect_end()
    }

    /* Primitive scalars. */

    pub fn read_bool(&mut self) -> Result<bool> {
        match self.read_tag_byte()? {
            0x00 => Ok(false),
            0x01 => Ok(true),
            _ => unreachable!(),
        }
    }

    /// One byte that must be exactly 0x00 or 0x01. Shared by bool bodies and
    /// option tags; anything else is non-canonical.
    fn read_tag_byte(&mut self) -> Result<u8> {
        let rest = self.cursor.rest();
        let byte = match rest.first() {
            None => {
                return Err(CodecError::UnexpectedEndOfInput {
                    wanted: 1,
                    remaining: 0,
                })
            }
            Some(&byte) => byte,
        };
        if byte > 0x01 {
            return Err(CodecError::InvalidBooleanByte { byte });
        }
        self.cursor.advance(1);
        Ok(byte)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(u8::from_le_bytes(self.cursor.read_array()?))
    }
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.cursor.read_array()?))
    }
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.cursor.read_array()?))
    }
    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.cursor.read_array()?))
    }
    pub fn read_u128(&mut self) -> Result<u128> {
        Ok(u128::from_le_bytes(self.cursor.read_array()?))
    }
    pub fn read_u256(&mut self) -> Result<U256> {
        Ok(U256::from_le_bytes(self.cursor.read_array()?))
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(i8::from_le_bytes(self.cursor.read_array()?))
    }
    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.cursor.read_array()?))
    }
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.cursor.read_array()?))
    }
    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.cursor.read_array()?))
    }
    pub fn read_i128(&mut self) -> Result<i128> {
        Ok(i128::from_le_bytes(self.cursor.read_array()?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.cursor.read_array()?))
    }
    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.cursor.read_array()?))
    }

    pub fn read_char(&mut self) -> Result<char> {
        let rest = self.cursor.rest();
        if rest.len() < 4 {
            return Err(CodecError::UnexpectedEndOfInput {
                wanted: 4,
                remaining: rest.len(),
            });
        }
        let scalar = u32::from_le_bytes([rest[0], rest[1], rest[2], rest[3]]);
        let c = char::from_u32(scalar).ok_or(CodecError::ValueOutOfRange {
            what: "char scalar",
            value: scalar as u128,
        })?;
        self.cursor.advance(4);
        Ok(c)
    }

    /* Length prefixes, tags, indices. */

    /// ULEB128 length prefix for byte-counted bodies (bytes, str),
    /// plausibility-checked: a declared byte length larger than the remaining
    /// input can never complete, so it is rejected before any allocation.
    pub fn read_len(&mut self) -> Result<usize> {
        let len = varint::read_uleb128(&mut self.cursor)? as usize;
        let remaining = self.cursor.remaining();
        if len > remaining {
            return Err(CodecError::LengthExceedsBuffer {
                declared: len,
                remaining,
            });
        }
        Ok(len)
    }

    /// ULEB128 element count for sequences and maps. No comparison against
    /// the remaining input: elements such as unit occupy zero encoded bytes,
    /// so the count alone bounds nothing. Truncated inputs fail at the first
    /// element read instead.
    pub fn read_count(&mut self) -> Result<usize> {
        Ok(varint::read_uleb128(&mut self.cursor)? as usize)
    }

    pub fn read_variant_index(&mut self, variant_count: u32) -> Result<u32> {
        let index = varint::read_uleb128(&mut self.cursor)?;
        if index >= variant_count {
            return Err(CodecError::UnknownVariantIndex {
                index,
                variant_count,
            });
        }
        Ok(index)
    }

    pub fn read_option_tag(&mut self) -> Result<bool> {
        self.read_bool()
    }

    /* Byte and string bodies. */

    pub fn read_bytes(&mut self) -> Result<Vec<u8>> {
        let len = self.read_len()?;
        Ok(self.cursor.read_exact(len)?.to_vec())
    }

    pub fn read_fixed_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.cursor.read_exact(len)
    }

    pub fn read_str(&mut self) -> Result<String> {
        let body = self.read_bytes()?;
        String::from_utf8(body).map_err(|_| CodecError::InvalidUtf8)
    }

    /* Composites. */

    pub fn read_option<T>(
        &mut self,
        payload_fn: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<Option<T>> {
        if self.read_option_tag()? {
            Ok(Some(payload_fn(self)?))
        } else {
            Ok(None)
        }
    }

    pub fn read_seq<T>(
        &mut self,
        mut elem_fn: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let len = self.read_count()?;
        let mut elems = Vec::with_capacity(len.min(self.cursor.remaining() + 1));
        for _ in 0..len {
            elems.push(elem_fn(self)?);
        }
        Ok(elems)
    }

    /// Decode map entries, then re-verify that the encoded key bytes arrived
    /// in strictly ascending order. An equivalent map with any other entry
    /// order is a non-canonical encoding and is rejected.
    pub fn read_map<K, V>(
        &mut self,
        mut key_fn: impl FnMut(&mut Self) -> Result<K>,
        mut value_fn: impl FnMut(&mut Self) -> Result<V>,
    ) -> Result<Vec<(K, V)>> {
        let len = self.read_count()?;
        let cap = len.min(self.cursor.remaining() + 1);
        let mut entries = Vec::with_capacity(cap);
        let mut key_spans = Vec::with_capacity(cap);
        for _ in 0..len {
            let key_start = self.cursor.position();
            let key = key_fn(self)?;
            key_spans.push(self.cursor.span(key_start..self.cursor.position()));
            let value = value_fn(self)?;
            entries.push((key, value));
        }
        order::verify_map_order(&key_spans)?;
        Ok(entries)
    }
}

/// Decode a whole buffer with `decode_fn`, enforcing full consumption.
pub fn from_bytes<T>(
    buf: &[u8],
    decode_fn: impl FnOnce(&mut Deserializer) -> Result<T>,
) -> Result<T> {
    let mut de = Deserializer::new(buf);
    let value = decode_fn(&mut de)?;
    de.finish()?;
    Ok(value)
}
