use crate::tag::{StructTag, TypeTag, ADDRESS_LENGTH};
use bcs_codec::{CodecError, Deserializer, Result, Serializer, Value};
use std::collections::HashMap;

/// One field position inside a struct layout: either a concrete tag, or a
/// reference to one of the enclosing struct tag's type parameters.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum LayoutField {
    Tag(TypeTag),
    TypeParam(usize),
}

impl From<TypeTag> for LayoutField {
    fn from(tag: TypeTag) -> Self {
        LayoutField::Tag(tag)
    }
}

/// Declared field order of a struct. Field order is part of the type;
/// fields are encoded exactly in this order, never sorted.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct StructLayout {
    pub fields: Vec<LayoutField>,
}

impl StructLayout {
    pub fn new(fields: Vec<LayoutField>) -> Self {
        Self { fields }
    }

    pub fn of_tags(tags: Vec<TypeTag>) -> Self {
        Self {
            fields: tags.into_iter().map(LayoutField::Tag).collect(),
        }
    }
}

/// Closed set of variant alternatives, indexed by ULEB128 variant index.
/// Alternatives need not share a shape.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EnumLayout {
    pub variants: Vec<StructLayout>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DatatypeLayout {
    Struct(StructLayout),
    Enum(EnumLayout),
}

/// Caller-supplied table of known struct field orders, keyed by qualified
/// path (`0x1::string::String`). Passed explicitly into every dynamic walk;
/// no module-global registry exists.
#[derive(Default, Debug)]
pub struct LayoutRegistry {
    layouts: HashMap<String, DatatypeLayout>,
}

impl LayoutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, path: impl Into<String>, layout: DatatypeLayout) {
        self.layouts.insert(path.into(), layout);
    }

    pub fn register_struct(&mut self, path: impl Into<String>, layout: StructLayout) {
        self.register(path, DatatypeLayout::Struct(layout));
    }

    pub fn register_enum(&mut self, path: impl Into<String>, layout: EnumLayout) {
        self.register(path, DatatypeLayout::Enum(layout));
    }

    pub fn resolve(&self, stag: &StructTag) -> Result<&DatatypeLayout> {
        let path = stag.path();
        self.layouts
            .get(&path)
            .ok_or_else(|| CodecError::MalformedTypeTag {
                reason: format!("no layout registered for {}", path),
            })
    }
}

fn mismatch(tag: &TypeTag, value: &Value) -> CodecError {
    CodecError::ValueTagMismatch {
        expected: tag.to_string(),
        found: value.kind(),
    }
}

/// Substitute a layout field against the struct tag's type parameters.
fn field_tag<'a>(stag: &'a StructTag, field: &'a LayoutField) -> Result<&'a TypeTag> {
    match field {
        LayoutField::Tag(tag) => Ok(tag),
        LayoutField::TypeParam(i) => {
            stag.type_params
                .get(*i)
                .ok_or_else(|| CodecError::MalformedTypeTag {
                    reason: format!("type parameter {} out of range for {}", i, stag),
                })
        }
    }
}

/// Walk `value` against `tag`, emitting its canonical encoding.
///
/// Primitive tags dispatch straight to the matching serializer primitive;
/// `vector<T>` writes a length prefix and recurses per element; qualified
/// tags resolve a field-order descriptor through `registry` and recurse per
/// field in declared order. Any disagreement between the runtime value's
/// shape and the tag is a `ValueTagMismatch`.
pub fn encode_value(
    value: &Value,
    tag: &TypeTag,
    registry: &LayoutRegistry,
    ser: &mut Serializer,
) -> Result<()> {
    match (tag, value) {
        (TypeTag::Bool, Value::Bool(v)) => {
            ser.write_bool(*v);
            Ok(())
        }
        (TypeTag::U8, Value::U8(v)) => {
            ser.write_u8(*v);
            Ok(())
        }
        (TypeTag::U16, Value::U16(v)) => {
            ser.write_u16(*v);
            Ok(())
        }
        (TypeTag::U32, Value::U32(v)) => {
            ser.write_u32(*v);
            Ok(())
        }
        (TypeTag::U64, Value::U64(v)) => {
            ser.write_u64(*v);
            Ok(())
        }
        (TypeTag::U128, Value::U128(v)) => {
            ser.write_u128(*v);
            Ok(())
        }
        (TypeTag::U256, Value::U256(v)) => {
            ser.write_u256(*v);
            Ok(())
        }
        (TypeTag::Address | TypeTag::Signer, Value::Bytes(b)) => {
            if b.len() != ADDRESS_LENGTH {
                return Err(CodecError::ValueOutOfRange {
                    what: "address byte length",
                    value: b.len() as u128,
                });
            }
            ser.write_fixed_bytes(b);
            Ok(())
        }
        (TypeTag::Str, Value::Str(s)) => ser.write_str(s),
        (TypeTag::Vector(inner), value) => encode_vector(value, inner, registry, ser),
        (TypeTag::Struct(stag), value) => match registry.resolve(stag)? {
            DatatypeLayout::Struct(layout) => encode_struct(value, tag, stag, layout, registry, ser),
            DatatypeLayout::Enum(layout) => encode_enum(value, tag, stag, layout, registry, ser),
        },
        (tag, value) => Err(mismatch(tag, value)),
    }
}

fn encode_vector(
    value: &Value,
    inner: &TypeTag,
    registry: &LayoutRegistry,
    ser: &mut Serializer,
) -> Result<()> {
    if *inner == TypeTag::U8 {
        // vector<u8> accepts raw bytes or a sequence of u8 values; both
        // produce the same bytes as the direct write_bytes path. A string
        // is not a byte vector.
        return match value {
            Value::Bytes(b) => ser.write_bytes(b),
            Value::Seq(elems) => {
                let mut bytes = Vec::with_capacity(elems.len());
                for elem in elems {
                    match elem {
                        Value::U8(b) => bytes.push(*b),
                        other => {
                            return Err(mismatch(inner, other));
                        }
                    }
                }
                ser.write_bytes(&bytes)
            }
            other => Err(mismatch(&TypeTag::Vector(Box::new(inner.clone())), other)),
        };
    }

    match value {
        Value::Seq(elems) => {
            ser.write_len(elems.len())?;
            for elem in elems {
                encode_value(elem, inner, registry, ser)?;
            }
            Ok(())
        }
        other => Err(mismatch(&TypeTag::Vector(Box::new(inner.clone())), other)),
    }
}

fn encode_struct(
    value: &Value,
    tag: &TypeTag,
    stag: &StructTag,
    layout: &StructLayout,
    registry: &LayoutRegistry,
    ser: &mut Serializer,
) -> Result<()> {
    let fields = match value {
        Value::Struct(fields) => fields,
        other => return Err(mismatch(tag, other)),
    };
    if fields.len() != layout.fields.len() {
        return Err(CodecError::ValueTagMismatch {
            expected: tag.to_string(),
            found: "struct of different arity",
        });
    }
    for (field_value, field) in fields.iter().zip(layout.fields.iter()) {
        encode_value(field_value, field_tag(stag, field)?, registry, ser)?;
    }
    Ok(())
}

fn encode_enum(
    value: &Value,
    tag: &TypeTag,
    stag: &StructTag,
    layout: &EnumLayout,
    registry: &LayoutRegistry,
    ser: &mut Serializer,
) -> Result<()> {
    let (index, payload) = match value {
        Value::Variant { index, payload } => (*index, payload.as_ref()),
        other => return Err(mismatch(tag, other)),
    };
    let variant_count = layout.variants.len() as u32;
    if index >= variant_count {
        return Err(CodecError::UnknownVariantIndex {
            index,
            variant_count,
        });
    }
    ser.write_variant_index(index);
    encode_struct(
        payload,
        tag,
        stag,
        &layout.variants[index as usize],
        registry,
        ser,
    )
}

/// Structural mirror of [`encode_value`], producing a typed [`Value`].
///
/// A decode failure propagates immediately; no partially-populated value is
/// ever handed back.
pub fn decode_value(
    tag: &TypeTag,
    registry: &LayoutRegistry,
    de: &mut Deserializer,
) -> Result<Value> {
    let value = match tag {
        TypeTag::Bool => Value::Bool(de.read_bool()?),
        TypeTag::U8 => Value::U8(de.read_u8()?),
        TypeTag::U16 => Value::U16(de.read_u16()?),
        TypeTag::U32 => Value::U32(de.read_u32()?),
        TypeTag::U64 => Value::U64(de.read_u64()?),
        TypeTag::U128 => Value::U128(de.read_u128()?),
        TypeTag::U256 => Value::U256(de.read_u256()?),
        TypeTag::Address | TypeTag::Signer => {
            Value::Bytes(de.read_fixed_bytes(ADDRESS_LENGTH)?.to_vec())
        }
        TypeTag::Str => Value::Str(de.read_str()?),
        TypeTag::Vector(inner) => {
            if **inner == TypeTag::U8 {
                Value::Bytes(de.read_bytes()?)
            } else {
                Value::Seq(de.read_seq(|de| decode_value(inner, registry, de))?)
            }
        }
        TypeTag::Struct(stag) => match registry.resolve(stag)? {
            DatatypeLayout::Struct(layout) => decode_struct(stag, layout, registry, de)?,
            DatatypeLayout::Enum(layout) => {
                let variant_count = layout.variants.len() as u32;
                let index = de.read_variant_index(variant_count)?;
                let payload = decode_struct(stag, &layout.variants[index as usize], registry, de)?;
                Value::Variant {
                    index,
                    payload: Box::new(payload),
                }
            }
        },
    };
    Ok(value)
}

fn decode_struct(
    stag: &StructTag,
    layout: &StructLayout,
    registry: &LayoutRegistry,
    de: &mut Deserializer,
) -> Result<Value> {
    let mut fields = Vec::with_capacity(layout.fields.len());
    for field in layout.fields.iter() {
        fields.push(decode_value(field_tag(stag, field)?, registry, de)?);
    }
    Ok(Value::Struct(fields))
}

/// Encode one value against one tag, yielding the finished bytes.
pub fn encode_to_bytes(value: &Value, tag: &TypeTag, registry: &LayoutRegistry) -> Result<Vec<u8>> {
    let mut ser = Serializer::new();
    encode_value(value, tag, registry, &mut ser)?;
    Ok(ser.into_bytes())
}

/// Decode one value against one tag, requiring the whole buffer to be
/// consumed.
pub fn decode_from_bytes(buf: &[u8], tag: &TypeTag, registry: &LayoutRegistry) -> Result<Value> {
    let mut de = Deserializer::new(buf);
    let value = decode_value(tag, registry, &mut de)?;
    de.finish()?;
    Ok(value)
}
