use crate::dynamic::{self, LayoutRegistry};
use crate::tag::{AccountAddress, TypeTag};
use bcs_codec::{Result, Value, U256};

/// A call argument: a runtime value paired with the type tag that drives its
/// canonical encoding. Constructors fix both halves together so the pair can
/// never disagree.
#[derive(Clone, PartialEq, Debug)]
pub struct Arg {
    value: Value,
    tag: TypeTag,
}

impl Arg {
    fn new(value: Value, tag: TypeTag) -> Self {
        Self { value, tag }
    }

    pub fn bool(v: bool) -> Self {
        Self::new(Value::Bool(v), TypeTag::Bool)
    }
    pub fn u8(v: u8) -> Self {
        Self::new(Value::U8(v), TypeTag::U8)
    }
    pub fn u16(v: u16) -> Self {
        Self::new(Value::U16(v), TypeTag::U16)
    }
    pub fn u32(v: u32) -> Self {
        Self::new(Value::U32(v), TypeTag::U32)
    }
    pub fn u64(v: u64) -> Self {
        Self::new(Value::U64(v), TypeTag::U64)
    }
    pub fn u128(v: u128) -> Self {
        Self::new(Value::U128(v), TypeTag::U128)
    }
    pub fn u256(v: U256) -> Self {
        Self::new(Value::U256(v), TypeTag::U256)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Self::new(Value::Str(s.into()), TypeTag::Str)
    }

    pub fn vector_u8(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(
            Value::Bytes(bytes.into()),
            TypeTag::Vector(Box::new(TypeTag::U8)),
        )
    }

    /// Address argument from a hex literal (`0x1` short form accepted).
    pub fn address(hex: &str) -> Result<Self> {
        let addr = AccountAddress::from_hex(hex)?;
        Ok(Self::new(
            Value::Bytes(addr.as_bytes().to_vec()),
            TypeTag::Address,
        ))
    }

    /// Object ids share the address wire shape: 32 raw bytes, no prefix.
    pub fn object_id(hex: &str) -> Result<Self> {
        Self::address(hex)
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn tag(&self) -> &TypeTag {
        &self.tag
    }

    /// Canonical argument bytes. Primitive and vector tags need no layouts.
    pub fn encode(&self) -> Result<Vec<u8>> {
        self.encode_with(&LayoutRegistry::new())
    }

    pub fn encode_with(&self, registry: &LayoutRegistry) -> Result<Vec<u8>> {
        dynamic::encode_to_bytes(&self.value, &self.tag, registry)
    }
}
