use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodecError>;

/// Possible errors produced while encoding or decoding canonical bytes.
///
/// All of these are terminal. A malformed encoding is never partially
/// accepted or repaired, and no call hands back partial output alongside an
/// error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// A value does not fit the declared width or cap.
    #[error("value {value} out of range for {what}")]
    ValueOutOfRange { what: &'static str, value: u128 },
    /// Two map entries serialized to identical key bytes.
    #[error("duplicate map key bytes {key:02x?}")]
    DuplicateMapKey { key: Vec<u8> },
    /// Input buffer ended before the declared structure did.
    #[error("unexpected end of input: wanted {wanted} bytes, {remaining} remaining")]
    UnexpectedEndOfInput { wanted: usize, remaining: usize },
    /// A varint used more bytes than its value requires.
    #[error("non-minimal uleb128 encoding")]
    NonMinimalVarint,
    /// A varint exceeded the 32-bit cap.
    #[error("uleb128 value exceeds the u32 cap")]
    VarintOverflow,
    /// A bool or option tag byte was neither 0x00 nor 0x01.
    #[error("invalid boolean byte {byte:#04x}")]
    InvalidBooleanByte { byte: u8 },
    /// A string body was not valid UTF-8.
    #[error("invalid utf8 in string body")]
    InvalidUtf8,
    /// A declared length cannot fit in the remaining input.
    #[error("declared length {declared} exceeds {remaining} remaining bytes")]
    LengthExceedsBuffer { declared: usize, remaining: usize },
    /// Map entries were not in strictly ascending key-byte order.
    #[error("map entries not in canonical key order")]
    MapNotCanonical,
    /// A variant index fell outside the closed set of alternatives.
    #[error("variant index {index} out of bounds for {variant_count} alternatives")]
    UnknownVariantIndex { index: u32, variant_count: u32 },
    /// A top-level decode left input bytes unconsumed.
    #[error("{remaining} trailing bytes after decoded structure")]
    TrailingBytes { remaining: usize },
    /// A textual type tag failed to parse or resolve.
    #[error("malformed type tag: {reason}")]
    MalformedTypeTag { reason: String },
    /// A runtime value's shape disagreed with the type tag driving it.
    #[error("value of kind {found} does not match type tag {expected}")]
    ValueTagMismatch { expected: String, found: &'static str },
}
