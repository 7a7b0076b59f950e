//! # Serialization format
//!
//! Binary Canonical Serialization: a deterministic, type-driven binary
//! encoding. Equal values always produce byte-identical output, and the
//! decoder rejects any well-typed input that is not the unique canonical
//! encoding of its value.
//!
//! The below pseudocode depicts the serialized representations. There is no
//! self-description on the wire; both sides must agree on the shape being
//! encoded.
//!
//! ```text
//! bool:
//!     tag:            u8,             // exactly 0x00 or 0x01
//!
//! u8 ..= u256 (and signed counterparts):
//!     body:           [u8; W],        // little-endian, W in {1,2,4,8,16,32};
//!                                     // u256 = low u128 half, then high half
//!
//! f32 / f64:
//!     body:           [u8; 4 or 8],   // IEEE-754 bit pattern, little-endian
//!
//! char:
//!     body:           [u8; 4],        // Unicode scalar value, little-endian
//!
//! string / bytes / vector<u8>:
//!     len:            uleb128,        // minimal encoding, max value 2^32 - 1
//!     body:           [u8; len],      // string body must be valid UTF-8
//!
//! sequence<T>:
//!     len:            uleb128,
//!     elems:          [T; len],       // each element encoded in order
//!
//! tuple / struct:
//!     fields:         (T0, T1, ..),   // declaration order, no length prefix
//!
//! option<T>:
//!     tag:            u8,             // 0x00 = none (end), 0x01 = some
//!     payload:        T,              // present iff tag == 0x01
//!
//! variant:
//!     index:          uleb128,        // alternative index within a closed set
//!     payload:        ..,             // shape depends on the index
//!
//! map<K, V>:
//!     len:            uleb128,
//!     entries:        [(K, V); len],  // ordered by strictly ascending
//!                                     // unsigned byte-lexicographic
//!                                     // comparison of the encoded key bytes
//! ```

mod cursor;
mod error;
mod order;
mod sink;
mod varint;

pub mod de;
pub mod ser;
pub mod value;

mod serde_test;

pub use cursor::ByteCursor;
pub use de::{from_bytes, Deserializer};
pub use error::{CodecError, Result};
pub use order::{sort_map_entries, verify_map_order};
pub use ser::{to_bytes, Serializer, WriteLen};
pub use sink::ByteSink;
pub use value::{Value, U256};
pub use varint::MAX_SEQUENCE_LEN;
