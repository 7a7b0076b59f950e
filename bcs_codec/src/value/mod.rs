mod u256;

pub use u256::U256;

/// Runtime value tree covering every encodable shape.
///
/// A `Value` carries no type information beyond its own shape; the canonical
/// encoding is driven either by the shape itself (static path, via
/// [`Serializer::write_value`]) or by a type tag walked against it (dynamic
/// path).
///
/// `Map` holds its entries as an insertion-ordered list; canonical key-byte
/// order is imposed at encode time, so two maps with the same entry set in
/// different insertion orders encode identically.
///
/// [`Serializer::write_value`]: crate::Serializer::write_value
#[derive(PartialEq, Clone, Debug)]
pub enum Value {
    Unit,
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    U256(U256),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    F32(f32),
    F64(f64),
    Char(char),
    Str(String),
    Bytes(Vec<u8>),
    Option(Option<Box<Value>>),
    Seq(Vec<Value>),
    Tuple(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Variant { index: u32, payload: Box<Value> },
    Struct(Vec<Value>),
}

impl Value {
    /// Short shape name, used in mismatch diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Unit => "unit",
            Value::Bool(_) => "bool",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::U128(_) => "u128",
            Value::U256(_) => "u256",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::I128(_) => "i128",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Char(_) => "char",
            Value::Str(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Option(_) => "option",
            Value::Seq(_) => "sequence",
            Value::Tuple(_) => "tuple",
            Value::Map(_) => "map",
            Value::Variant { .. } => "variant",
            Value::Struct(_) => "struct",
        }
    }
}
