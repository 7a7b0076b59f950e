use crate::error::{CodecError, Result};
use std::ops::Range;

/// Bounded input cursor over a borrowed byte buffer.
///
/// Invariant: `position <= buf.len()` at every step. The position advances
/// monotonically and never rewinds; a failed read leaves it unchanged.
/// A cursor is owned by exactly one in-progress [`Deserializer`] invocation.
///
/// [`Deserializer`]: crate::Deserializer
#[derive(Debug)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.position
    }

    /// The not-yet-consumed tail of the buffer. Does not advance.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.position..]
    }

    /// A span of the underlying buffer by absolute offsets. Used to compare
    /// already-consumed byte ranges, e.g. encoded map keys.
    pub fn span(&self, range: Range<usize>) -> &'a [u8] {
        &self.buf[range]
    }

    /// Commit `n` bytes as consumed. Callers validate before committing, so
    /// the cursor never needs to rewind.
    pub fn advance(&mut self, n: usize) {
        debug_assert!(n <= self.remaining());
        self.position += n;
    }

    pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(CodecError::UnexpectedEndOfInput {
                wanted: n,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.buf[self.position..self.position + n];
        self.position += n;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_exact(N)?;
        let mut arr = [0u8; N];
        arr.copy_from_slice(bytes);
        Ok(arr)
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        let bytes = self.read_exact(1)?;
        Ok(bytes[0])
    }

    /// Require that the whole buffer has been consumed.
    pub fn expect_end(&self) -> Result<()> {
        if self.remaining() > 0 {
            return Err(CodecError::TrailingBytes {
                remaining: self.remaining(),
            });
        }
        Ok(())
    }
}
