//! Bounded text output
//!
//! [`BoundedWriter`] implements [`core::fmt::Write`] over a caller-provided
//! byte slice. A write that would not fit fails with `fmt::Error` and leaves
//! everything past the slice untouched, so a too-small buffer is reported
//! rather than overrun. Bytes written before the failing call stay in the
//! buffer and should be treated as garbage.

use core::fmt;

/// `fmt::Write` sink over a fixed byte slice
#[derive(Debug)]
pub struct BoundedWriter<'a> {
    buf: &'a mut [u8],
    len: usize,
    overflowed: bool,
}

impl<'a> BoundedWriter<'a> {
    /// Wrap a buffer; writing starts at its first byte
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, len: 0, overflowed: false }
    }

    /// Bytes written so far
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been written
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total capacity of the wrapped buffer
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Whether any write was rejected for lack of space
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Written bytes as a string slice
    ///
    /// Only whole `&str` pieces are ever copied in, so this is valid UTF-8
    /// unless a write overflowed.
    pub fn as_str(&self) -> Option<&str> {
        if self.overflowed {
            return None;
        }
        core::str::from_utf8(&self.buf[..self.len]).ok()
    }
}

impl fmt::Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let end = self.len + bytes.len();
        if end > self.buf.len() {
            self.overflowed = true;
            return Err(fmt::Error);
        }

        self.buf[self.len..end].copy_from_slice(bytes);
        self.len = end;
        Ok(())
    }
}
