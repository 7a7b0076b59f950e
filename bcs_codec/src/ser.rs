use crate::error::{CodecError, Result};
use crate::order;
use crate::sink::ByteSink;
use crate::value::{Value, U256};
use crate::varint::{self, MAX_SEQUENCE_LEN};
use derive_more::Deref;

/// Count of bytes appended by a compound write.
#[derive(Deref, Clone, Copy, Debug)]
pub struct WriteLen(usize);

/// Canonical serializer: one write method per encodable shape, appending to
/// an exclusively-owned [`ByteSink`].
///
/// Primitive writers never fail on in-range input. Length-bearing writers
/// reject lengths above the `u32` cap. Map writers pre-serialize each entry
/// and impose canonical key-byte order regardless of insertion order.
#[derive(Default)]
pub struct Serializer {
    sink: ByteSink,
}

impl Serializer {
    pub fn new() -> Self {
        Self {
            sink: ByteSink::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sink: ByteSink::with_capacity(capacity),
        }
    }

    /// Finish the invocation, yielding the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.sink.into_bytes()
    }

    pub fn encoded_len(&self) -> usize {
        self.sink.len()
    }

    /* Primitive scalars. */

    pub fn write_bool(&mut self, v: bool) {
        self.sink.push(if v { 0x01 } else { 0x00 });
    }

    pub fn write_u8(&mut self, v: u8) {
        self.sink.push(v);
    }
    pub fn write_u16(&mut self, v: u16) {
        self.sink.put_slice(&v.to_le_bytes());
    }
    pub fn write_u32(&mut self, v: u32) {
        self.sink.put_slice(&v.to_le_bytes());
    }
    pub fn write_u64(&mut self, v: u64) {
        self.sink.put_slice(&v.to_le_bytes());
    }
    pub fn write_u128(&mut self, v: u128) {
        self.sink.put_slice(&v.to_le_bytes());
    }
    pub fn write_u256(&mut self, v: U256) {
        self.sink.put_slice(&v.to_le_bytes());
    }

    pub fn write_i8(&mut self, v: i8) {
        self.sink.put_slice(&v.to_le_bytes());
    }
    pub fn write_i16(&mut self, v: i16) {
        self.sink.put_slice(&v.to_le_bytes());
    }
    pub fn write_i32(&mut self, v: i32) {
        self.sink.put_slice(&v.to_le_bytes());
    }
    pub fn write_i64(&mut self, v: i64) {
        self.sink.put_slice(&v.to_le_bytes());
    }
    pub fn write_i128(&mut self, v: i128) {
        self.sink.put_slice(&v.to_le_bytes());
    }

    pub fn write_f32(&mut self, v: f32) {
        self.sink.put_slice(&v.to_le_bytes());
    }
    pub fn write_f64(&mut self, v: f64) {
        self.sink.put_slice(&v.to_le_bytes());
    }

    pub fn write_char(&mut self, v: char) {
        self.write_u32(v as u32);
    }

    /* Length prefixes, tags, indices. */

    /// ULEB128 length/count prefix, capped at `u32::MAX`.
    pub fn write_len(&mut self, len: usize) -> Result<()> {
        if len as u64 > MAX_SEQUENCE_LEN {
            return Err(CodecError::ValueOutOfRange {
                what: "sequence length",
                value: len as u128,
            });
        }
        varint::write_uleb128(&mut self.sink, len as u32);
        Ok(())
    }

    pub fn write_variant_index(&mut self, index: u32) {
        varint::write_uleb128(&mut self.sink, index);
    }

    pub fn write_option_tag(&mut self, is_some: bool) {
        self.sink.push(if is_some { 0x01 } else { 0x00 });
    }

    /* Byte and string bodies. */

    /// Length-prefixed raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_len(bytes.len())?;
        self.sink.put_slice(bytes);
        Ok(())
    }

    /// Raw bytes with no length prefix, for fixed-width bodies such as
    /// addresses and pre-serialized map entries.
    pub fn write_fixed_bytes(&mut self, bytes: &[u8]) {
        self.sink.put_slice(bytes);
    }

    /// Length-prefixed UTF-8 string body, no terminator.
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /* Composites. */

    /// Length prefix, then each element in order via `elem_fn`.
    pub fn write_seq<T>(
        &mut self,
        elems: &[T],
        mut elem_fn: impl FnMut(&mut Self, &T) -> Result<()>,
    ) -> Result<()> {
        self.write_len(elems.len())?;
        for elem in elems {
            elem_fn(self, elem)?;
        }
        Ok(())
    }

    /// Tag byte, then the payload if present.
    pub fn write_option<T>(
        &mut self,
        opt: Option<&T>,
        payload_fn: impl FnOnce(&mut Self, &T) -> Result<()>,
    ) -> Result<()> {
        match opt {
            None => {
                self.write_option_tag(false);
                Ok(())
            }
            Some(payload) => {
                self.write_option_tag(true);
                payload_fn(self, payload)
            }
        }
    }

    /// Serialize every entry to temporary buffers, order by encoded key
    /// bytes, then emit count prefix and the ordered concatenation.
    pub fn write_map<K, V>(
        &mut self,
        entries: &[(K, V)],
        mut key_fn: impl FnMut(&mut Self, &K) -> Result<()>,
        mut value_fn: impl FnMut(&mut Self, &V) -> Result<()>,
    ) -> Result<()> {
        let mut encoded = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let mut key_ser = Serializer::new();
            key_fn(&mut key_ser, key)?;
            let mut value_ser = Serializer::new();
            value_fn(&mut value_ser, value)?;
            encoded.push((key_ser.into_bytes(), value_ser.into_bytes()));
        }

        let encoded = order::sort_map_entries(encoded)?;

        self.write_len(encoded.len())?;
        for (key_bytes, value_bytes) in encoded.iter() {
            self.write_fixed_bytes(key_bytes);
            self.write_fixed_bytes(value_bytes);
        }
        Ok(())
    }

    /* Value tree walk. */

    /// Encode a whole [`Value`] tree by its own shape.
    ///
    /// Tuple and struct fields are emitted in declaration order with no
    /// prefix; their arity is part of the type, not the encoding.
    pub fn write_value(&mut self, value: &Value) -> Result<WriteLen> {
        let start = self.sink.len();
        self.write_value_(value)?;
        Ok(WriteLen(self.sink.len() - start))
    }

    fn write_value_(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Unit => {}
            Value::Bool(v) => self.write_bool(*v),
            Value::U8(v) => self.write_u8(*v),
            Value::U16(v) => self.write_u16(*v),
            Value::U32(v) => self.write_u32(*v),
            Value::U64(v) => self.write_u64(*v),
            Value::U128(v) => self.write_u128(*v),
            Value::U256(v) => self.write_u256(*v),
            Value::I8(v) => self.write_i8(*v),
            Value::I16(v) => self.write_i16(*v),
            Value::I32(v) => self.write_i32(*v),
            Value::I64(v) => self.write_i64(*v),
            Value::I128(v) => self.write_i128(*v),
            Value::F32(v) => self.write_f32(*v),
            Value::F64(v) => self.write_f64(*v),
            Value::Char(v) => self.write_char(*v),
            Value::Str(s) => self.write_str(s)?,
            Value::Bytes(b) => self.write_bytes(b)?,
            Value::Option(opt) => {
                self.write_option(opt.as_deref(), |ser, payload| ser.write_value_(payload))?;
            }
            Value::Seq(elems) => {
                self.write_seq(elems, |ser, elem| ser.write_value_(elem))?;
            }
            Value::Tuple(members) | Value::Struct(members) => {
                for member in members {
                    self.write_value_(member)?;
                }
            }
            Value::Map(entries) => {
                self.write_map(
                    entries,
                    |ser, key| ser.write_value_(key),
                    |ser, value| ser.write_value_(value),
                )?;
            }
            Value::Variant { index, payload } => {
                self.write_variant_index(*index);
                self.write_value_(payload)?;
            }
        }
        Ok(())
    }
}

/// Encode a single [`Value`] to its canonical bytes.
pub fn to_bytes(value: &Value) -> Result<Vec<u8>> {
    let mut ser = Serializer::new();
    ser.write_value(value)?;
    Ok(ser.into_bytes())
}
