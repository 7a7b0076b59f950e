use std::cmp::Ordering;

/// 256-bit unsigned integer, stored as two 128-bit halves.
///
/// The canonical encoding writes the low half first, each half little-endian,
/// for a fixed 32-byte width.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct U256 {
    low: u128,
    high: u128,
}

impl U256 {
    pub const ZERO: U256 = U256 { low: 0, high: 0 };
    pub const MAX: U256 = U256 {
        low: u128::MAX,
        high: u128::MAX,
    };

    pub const fn new(low: u128, high: u128) -> Self {
        Self { low, high }
    }

    pub const fn from_u128(value: u128) -> Self {
        Self {
            low: value,
            high: 0,
        }
    }

    pub const fn from_u64(value: u64) -> Self {
        Self::from_u128(value as u128)
    }

    pub const fn low(&self) -> u128 {
        self.low
    }

    pub const fn high(&self) -> u128 {
        self.high
    }

    /// Convert to u128, returning None if the value doesn't fit.
    pub fn to_u128(&self) -> Option<u128> {
        if self.high == 0 {
            Some(self.low)
        } else {
            None
        }
    }

    pub fn to_le_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes[..16].copy_from_slice(&self.low.to_le_bytes());
        bytes[16..].copy_from_slice(&self.high.to_le_bytes());
        bytes
    }

    pub fn from_le_bytes(bytes: [u8; 32]) -> Self {
        let mut half = [0u8; 16];
        half.copy_from_slice(&bytes[..16]);
        let low = u128::from_le_bytes(half);
        half.copy_from_slice(&bytes[16..]);
        let high = u128::from_le_bytes(half);
        Self { low, high }
    }
}

impl From<u128> for U256 {
    fn from(value: u128) -> Self {
        Self::from_u128(value)
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &U256) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for U256 {
    fn cmp(&self, other: &U256) -> Ordering {
        (self.high, self.low).cmp(&(other.high, other.low))
    }
}
