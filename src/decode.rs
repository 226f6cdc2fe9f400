use crate::endian::FixedWidth;
use crate::varint;
use crate::{DecodeLimits, ErrorCode, Options, WireError};

/// Bounds-checked read cursor over an input slice.
///
/// Every read either consumes exactly the bytes it reports or fails without moving the cursor.
/// Error offsets index the slice passed to [`Decoder::new`].
#[derive(Debug)]
pub struct Decoder<'de> {
    data: &'de [u8],
    pos: usize,
    options: Options,
    limits: DecodeLimits,
    depth: usize,
}

impl<'de> Decoder<'de> {
    /// Construct a decoder over `bytes`.
    ///
    /// # Errors
    ///
    /// Returns `InputLimitExceeded` if `bytes` is longer than `limits.max_input_bytes`.
    pub const fn new(
        bytes: &'de [u8],
        options: Options,
        limits: DecodeLimits,
    ) -> Result<Self, WireError> {
        if bytes.len() > limits.max_input_bytes {
            return Err(WireError::new(ErrorCode::InputLimitExceeded, 0));
        }
        Ok(Self {
            data: bytes,
            pos: 0,
            options,
            limits,
            depth: 0,
        })
    }

    /// Current byte offset in the input.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the cursor and the end bound.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true iff every input byte has been consumed.
    #[inline]
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Options this decode runs under.
    #[inline]
    #[must_use]
    pub const fn options(&self) -> Options {
        self.options
    }

    /// Error with `code` at the current position.
    #[inline]
    #[must_use]
    pub const fn error(&self, code: ErrorCode) -> WireError {
        WireError::new(code, self.pos)
    }

    /// Truncate the readable region to the first `end` bytes.
    pub(crate) fn set_end(&mut self, end: usize) {
        if end < self.data.len() {
            self.data = &self.data[..end];
        }
    }

    /// Read one raw byte.
    ///
    /// # Errors
    ///
    /// Returns `MessageSize` at end of input.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, WireError> {
        let byte = *self
            .data
            .get(self.pos)
            .ok_or_else(|| self.error(ErrorCode::MessageSize))?;
        self.pos += 1;
        Ok(byte)
    }

    /// Read exactly `len` raw bytes.
    ///
    /// # Errors
    ///
    /// Returns `MessageSize` if fewer than `len` bytes remain.
    #[inline]
    pub fn read_exact(&mut self, len: usize) -> Result<&'de [u8], WireError> {
        let end = self
            .pos
            .checked_add(len)
            .ok_or_else(|| self.error(ErrorCode::LengthOverflow))?;
        let data: &'de [u8] = self.data;
        let out = data
            .get(self.pos..end)
            .ok_or_else(|| self.error(ErrorCode::MessageSize))?;
        self.pos = end;
        Ok(out)
    }

    /// Read a one-byte flag that must be `0` or `1`.
    ///
    /// # Errors
    ///
    /// Returns `MessageSize` at end of input and `IllegalByteSequence` for any other byte value.
    #[inline]
    pub fn read_flag(&mut self) -> Result<bool, WireError> {
        let off = self.pos;
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => {
                self.pos = off;
                Err(WireError::new(ErrorCode::IllegalByteSequence, off))
            }
        }
    }

    /// Read an unsigned varint.
    ///
    /// # Errors
    ///
    /// Returns `MessageSize` if the varint is cut off and `IllegalByteSequence` if it overflows
    /// 64 bits.
    #[inline]
    pub fn read_uvarint(&mut self) -> Result<u64, WireError> {
        varint::decode_unsigned(self.data, &mut self.pos)
    }

    /// Read a signed varint.
    ///
    /// # Errors
    ///
    /// Same as [`Decoder::read_uvarint`].
    #[inline]
    pub fn read_ivarint(&mut self) -> Result<i64, WireError> {
        varint::decode_signed(self.data, &mut self.pos)
    }

    /// Read a fixed-width value in the option byte order.
    ///
    /// # Errors
    ///
    /// Returns `MessageSize` if fewer than `T::WIDTH` bytes remain.
    #[inline]
    pub fn read_fixed<T: FixedWidth>(&mut self) -> Result<T, WireError> {
        let raw = self.read_exact(T::WIDTH)?;
        let mut bytes = T::Bytes::default();
        bytes.as_mut().copy_from_slice(raw);
        Ok(T::from_wire(bytes, self.options.byte_order()))
    }

    /// Read a length or count: a varint, or eight fixed bytes under fixed-length encoding.
    ///
    /// # Errors
    ///
    /// Returns the underlying read error, or `LengthOverflow` if the value does not fit `usize`.
    pub fn read_len(&mut self) -> Result<usize, WireError> {
        let off = self.pos;
        let raw = if self.options.fixed_length() {
            self.read_fixed::<u64>()?
        } else {
            self.read_uvarint()?
        };
        usize::try_from(raw).map_err(|_| WireError::new(ErrorCode::LengthOverflow, off))
    }

    /// Read a container length and check it against the remaining input.
    ///
    /// Each element occupies at least `min_elem_len` bytes. A declared length that cannot fit
    /// in what is left fails before any element is read, unless the options say `UNCHECKED`.
    ///
    /// # Errors
    ///
    /// Returns `InputLimitExceeded` when the length is over `max_container_len`, and
    /// `ValueTooLarge` when the declared size exceeds the remaining bytes. Both are reported at
    /// the offset of the length prefix.
    pub fn read_container_len(&mut self, min_elem_len: usize) -> Result<usize, WireError> {
        let off = self.pos;
        let len = self.read_len()?;
        if len > self.limits.max_container_len {
            self.pos = off;
            return Err(WireError::new(ErrorCode::InputLimitExceeded, off));
        }
        if self.options.checked() {
            let needed = len
                .checked_mul(min_elem_len)
                .ok_or_else(|| WireError::new(ErrorCode::ValueTooLarge, off))?;
            if needed > self.remaining() {
                self.pos = off;
                return Err(WireError::new(ErrorCode::ValueTooLarge, off));
            }
        }
        Ok(len)
    }

    /// Initial capacity for a container of `len` elements, clamped to what the remaining input
    /// could possibly hold.
    #[inline]
    #[must_use]
    pub const fn capacity_hint(&self, len: usize, min_elem_len: usize) -> usize {
        let fit = if min_elem_len == 0 {
            self.remaining()
        } else {
            self.remaining() / min_elem_len
        };
        if len < fit {
            len
        } else {
            fit
        }
    }

    /// Read a sum-type alternative index and check it against `count`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the index is not below `count`.
    pub fn read_variant_index(&mut self, count: usize) -> Result<usize, WireError> {
        let off = self.pos;
        let index = self.read_len()?;
        if index >= count {
            self.pos = off;
            return Err(WireError::new(ErrorCode::InvalidArgument, off));
        }
        Ok(index)
    }

    /// Run `f` one nesting level deeper.
    ///
    /// # Errors
    ///
    /// Returns `DepthLimitExceeded` once the configured depth would be passed, otherwise
    /// whatever `f` returns.
    pub fn nested<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, WireError>,
    ) -> Result<R, WireError> {
        if self.depth >= self.limits.max_depth {
            return Err(self.error(ErrorCode::DepthLimitExceeded));
        }
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        out
    }
}
