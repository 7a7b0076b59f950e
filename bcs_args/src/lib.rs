//! Dynamically-typed canonical encoding.
//!
//! Call arguments to chain entry points are known only by a textual type
//! signature at call time. This crate parses such signatures into a
//! [`TypeTag`] tree and walks arbitrary runtime [`Value`]s against it,
//! dispatching every primitive reached during the walk to the canonical
//! codec in `bcs_codec`. Struct layouts are resolved through an explicit
//! caller-supplied [`LayoutRegistry`]; there is no global state.
//!
//! [`Value`]: bcs_codec::Value

mod args;
mod dynamic;
mod parse;
mod tag;

pub use args::Arg;
pub use dynamic::{
    decode_from_bytes, decode_value, encode_to_bytes, encode_value, DatatypeLayout, EnumLayout,
    LayoutField, LayoutRegistry, StructLayout,
};
pub use parse::{parse_struct_tag, parse_type_tag};
pub use tag::{AccountAddress, StructTag, TypeTag, ADDRESS_LENGTH};
