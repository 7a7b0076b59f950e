use bcs_codec::{CodecError, Result};
use std::fmt;

/// Account addresses are fixed 32-byte values, encoded raw with no length
/// prefix.
pub const ADDRESS_LENGTH: usize = 32;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountAddress([u8; ADDRESS_LENGTH]);

impl AccountAddress {
    pub const ZERO: AccountAddress = AccountAddress([0u8; ADDRESS_LENGTH]);

    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Parse from hex, with or without a `0x` prefix. Short forms such as
    /// `0x1` are left-padded to the full 32 bytes.
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.is_empty() || digits.len() > 2 * ADDRESS_LENGTH {
            return Err(malformed_address(s));
        }

        // Left-pad odd-length forms with a leading zero digit.
        let padded;
        let digits = if digits.len() % 2 == 1 {
            padded = format!("0{}", digits);
            &padded
        } else {
            digits
        };
        let decoded = hex::decode(digits).map_err(|_| malformed_address(s))?;

        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[ADDRESS_LENGTH - decoded.len()..].copy_from_slice(&decoded);
        Ok(Self(bytes))
    }

    /// Full-width lowercase hex, no prefix.
    pub fn to_canonical_string(&self) -> String {
        hex::encode(self.0)
    }
}

fn malformed_address(s: &str) -> CodecError {
    CodecError::MalformedTypeTag {
        reason: format!("invalid address {:?}", s),
    }
}

impl fmt::Display for AccountAddress {
    /// Short `0x` form with leading zeros trimmed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_canonical_string();
        let trimmed = hex.trim_start_matches('0');
        let trimmed = if trimmed.is_empty() { "0" } else { trimmed };
        write!(f, "0x{}", trimmed)
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Structural descriptor of an encodable type, constructed once per parse
/// and immutable thereafter.
///
/// Mirrors the shapes a dynamically-typed call argument can take, plus the
/// qualified `address::module::Name<T, ..>` reference form resolved through
/// a [`LayoutRegistry`].
///
/// [`LayoutRegistry`]: crate::LayoutRegistry
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum TypeTag {
    Bool,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    Address,
    Signer,
    Str,
    Vector(Box<TypeTag>),
    Struct(Box<StructTag>),
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct StructTag {
    pub address: AccountAddress,
    pub module: String,
    pub name: String,
    pub type_params: Vec<TypeTag>,
}

impl StructTag {
    /// Qualified path without type parameters; the registry lookup key.
    pub fn path(&self) -> String {
        format!("{}::{}::{}", self.address, self.module, self.name)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::U8 => write!(f, "u8"),
            TypeTag::U16 => write!(f, "u16"),
            TypeTag::U32 => write!(f, "u32"),
            TypeTag::U64 => write!(f, "u64"),
            TypeTag::U128 => write!(f, "u128"),
            TypeTag::U256 => write!(f, "u256"),
            TypeTag::Address => write!(f, "address"),
            TypeTag::Signer => write!(f, "signer"),
            TypeTag::Str => write!(f, "string"),
            TypeTag::Vector(inner) => write!(f, "vector<{}>", inner),
            TypeTag::Struct(stag) => write!(f, "{}", stag),
        }
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())?;
        if !self.type_params.is_empty() {
            write!(f, "<")?;
            for (i, param) in self.type_params.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", param)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}
