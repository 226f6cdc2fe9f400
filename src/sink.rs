use alloc::vec::Vec;

use crate::alloc_util::try_reserve;
use crate::{ErrorCode, WireError};

/// Destination for encoded bytes.
///
/// Implementations either grow (`Vec<u8>`), refuse writes past a fixed capacity
/// ([`SliceSink`]), or forward to a stream ([`IoSink`], `std` only). A sink that cannot take the
/// whole write must return an error; a silent partial write is never reported as success.
pub trait Sink {
    /// Append `bytes`.
    ///
    /// # Errors
    ///
    /// Returns `BufferFull` for fixed-capacity sinks, `AllocationFailed` when a growable sink
    /// cannot reserve memory, or `Io` for stream sinks.
    fn write(&mut self, bytes: &[u8]) -> Result<(), WireError>;

    /// Append one byte.
    ///
    /// # Errors
    ///
    /// Same as [`Sink::write`].
    fn write_u8(&mut self, byte: u8) -> Result<(), WireError> {
        self.write(&[byte])
    }

    /// Bytes accepted by this sink so far.
    fn position(&self) -> usize;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    #[inline]
    fn write(&mut self, bytes: &[u8]) -> Result<(), WireError> {
        (**self).write(bytes)
    }

    #[inline]
    fn write_u8(&mut self, byte: u8) -> Result<(), WireError> {
        (**self).write_u8(byte)
    }

    #[inline]
    fn position(&self) -> usize {
        (**self).position()
    }
}

impl Sink for Vec<u8> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), WireError> {
        let offset = self.len();
        try_reserve(self, bytes.len(), offset)?;
        self.extend_from_slice(bytes);
        Ok(())
    }

    fn write_u8(&mut self, byte: u8) -> Result<(), WireError> {
        if self.len() == self.capacity() {
            let offset = self.len();
            try_reserve(self, 1, offset)?;
        }
        self.push(byte);
        Ok(())
    }

    fn position(&self) -> usize {
        self.len()
    }
}

/// Fixed-capacity sink over a caller-provided buffer.
///
/// Covers arrays, slices, and raw memory regions. A write that does not fit is rejected whole
/// with `BufferFull`, leaving [`SliceSink::len`] at the last complete write.
#[derive(Debug)]
pub struct SliceSink<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> SliceSink<'a> {
    /// Wrap `buf`; writing starts at index 0.
    #[must_use]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, len: 0 }
    }

    /// Bytes written so far.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing was written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total capacity of the underlying buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Borrow the written prefix.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl Sink for SliceSink<'_> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), WireError> {
        let end = self
            .len
            .checked_add(bytes.len())
            .ok_or_else(|| WireError::new(ErrorCode::LengthOverflow, self.len))?;
        let dst = self
            .buf
            .get_mut(self.len..end)
            .ok_or_else(|| WireError::new(ErrorCode::BufferFull, self.len))?;
        dst.copy_from_slice(bytes);
        self.len = end;
        Ok(())
    }

    fn position(&self) -> usize {
        self.len
    }
}

/// Sink forwarding to any [`std::io::Write`].
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSink<W> {
    inner: W,
    written: usize,
}

#[cfg(feature = "std")]
impl<W: std::io::Write> IoSink<W> {
    /// Wrap a writer.
    pub const fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Return the wrapped writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(feature = "std")]
impl<W: std::io::Write> Sink for IoSink<W> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), WireError> {
        self.inner
            .write_all(bytes)
            .map_err(|e| WireError::io(&e, self.written))?;
        self.written += bytes.len();
        Ok(())
    }

    fn position(&self) -> usize {
        self.written
    }
}
