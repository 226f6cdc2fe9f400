use crate::checksum::RunningChecksum;
use crate::endian::FixedWidth;
use crate::sink::Sink;
use crate::varint::{self, VarintBuf, MAX_VARINT_LEN};
use crate::{ErrorCode, Options, WireError};

/// Writes primitive wire forms into a [`Sink`] under a fixed set of [`Options`].
///
/// With `WITH_CHECKSUM` set, every byte is folded into a running CRC-32 as it is written and
/// [`Encoder::finish`] appends the trailer.
#[derive(Debug)]
pub struct Encoder<S> {
    sink: S,
    options: Options,
    written: usize,
    checksum: Option<RunningChecksum>,
}

impl<S: Sink> Encoder<S> {
    /// Construct an encoder writing to `sink`.
    pub fn new(sink: S, options: Options) -> Self {
        let checksum = options
            .contains(Options::WITH_CHECKSUM)
            .then(RunningChecksum::new);
        Self {
            sink,
            options,
            written: 0,
            checksum,
        }
    }

    /// Options this encode runs under.
    #[inline]
    #[must_use]
    pub const fn options(&self) -> Options {
        self.options
    }

    /// Bytes written so far, excluding any checksum trailer.
    #[inline]
    #[must_use]
    pub const fn written(&self) -> usize {
        self.written
    }

    /// Error with `code` at the current output offset.
    #[inline]
    #[must_use]
    pub const fn error(&self, code: ErrorCode) -> WireError {
        WireError::new(code, self.written)
    }

    /// Append raw bytes.
    ///
    /// # Errors
    ///
    /// Propagates the sink's error.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), WireError> {
        self.sink
            .write(bytes)
            .map_err(|e| WireError::new(e.code, self.written))?;
        if let Some(crc) = &mut self.checksum {
            crc.update(bytes);
        }
        self.written += bytes.len();
        Ok(())
    }

    /// Append one raw byte.
    ///
    /// # Errors
    ///
    /// Propagates the sink's error.
    #[inline]
    pub fn write_u8(&mut self, byte: u8) -> Result<(), WireError> {
        self.sink
            .write_u8(byte)
            .map_err(|e| WireError::new(e.code, self.written))?;
        if let Some(crc) = &mut self.checksum {
            crc.update(&[byte]);
        }
        self.written += 1;
        Ok(())
    }

    /// Append a `0`/`1` flag byte.
    ///
    /// # Errors
    ///
    /// Propagates the sink's error.
    #[inline]
    pub fn write_flag(&mut self, flag: bool) -> Result<(), WireError> {
        self.write_u8(u8::from(flag))
    }

    /// Append an unsigned varint.
    ///
    /// # Errors
    ///
    /// Propagates the sink's error.
    pub fn write_uvarint(&mut self, value: u64) -> Result<(), WireError> {
        let mut buf: VarintBuf = [0; MAX_VARINT_LEN];
        let n = varint::encode_unsigned(value, &mut buf);
        self.write_bytes(&buf[..n])
    }

    /// Append a signed varint.
    ///
    /// # Errors
    ///
    /// Propagates the sink's error.
    pub fn write_ivarint(&mut self, value: i64) -> Result<(), WireError> {
        let mut buf: VarintBuf = [0; MAX_VARINT_LEN];
        let n = varint::encode_signed(value, &mut buf);
        self.write_bytes(&buf[..n])
    }

    /// Append a fixed-width value in the option byte order.
    ///
    /// # Errors
    ///
    /// Propagates the sink's error.
    #[inline]
    pub fn write_fixed<T: FixedWidth>(&mut self, value: T) -> Result<(), WireError> {
        let bytes = value.to_wire(self.options.byte_order());
        self.write_bytes(bytes.as_ref())
    }

    /// Append a length or count: a varint, or eight fixed bytes under fixed-length encoding.
    ///
    /// # Errors
    ///
    /// Returns `LengthOverflow` if `len` does not fit 64 bits, otherwise the sink's error.
    pub fn write_len(&mut self, len: usize) -> Result<(), WireError> {
        let len = u64::try_from(len).map_err(|_| self.error(ErrorCode::LengthOverflow))?;
        if self.options.fixed_length() {
            self.write_fixed(len)
        } else {
            self.write_uvarint(len)
        }
    }

    /// Append a sum-type alternative index.
    ///
    /// # Errors
    ///
    /// Same as [`Encoder::write_len`].
    #[inline]
    pub fn write_variant_index(&mut self, index: usize) -> Result<(), WireError> {
        self.write_len(index)
    }

    /// Append the checksum trailer if enabled and return the total bytes written.
    ///
    /// # Errors
    ///
    /// Propagates the sink's error.
    pub fn finish(mut self) -> Result<usize, WireError> {
        if let Some(crc) = self.checksum.take() {
            let trailer = crc.finish().to_wire(self.options.byte_order());
            self.sink
                .write(&trailer)
                .map_err(|e| WireError::new(e.code, self.written))?;
            self.written += trailer.len();
        }
        Ok(self.written)
    }

    /// Return the sink without writing a trailer.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SliceSink;

    #[test]
    fn lengths_follow_mode() {
        let mut out = Vec::new();
        let mut enc = Encoder::new(&mut out, Options::NONE);
        enc.write_len(300).unwrap();
        assert_eq!(enc.finish().unwrap(), 2);
        assert_eq!(out, [0xac, 0x02]);

        let mut out = Vec::new();
        let mut enc = Encoder::new(&mut out, Options::FIXED_LENGTH_ENCODING | Options::BIG_ENDIAN);
        enc.write_len(1).unwrap();
        enc.finish().unwrap();
        assert_eq!(out, [0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn trailer_covers_prior_bytes() {
        let mut out = Vec::new();
        let mut enc = Encoder::new(&mut out, Options::WITH_CHECKSUM);
        enc.write_bytes(b"123456789").unwrap();
        assert_eq!(enc.written(), 9);
        assert_eq!(enc.finish().unwrap(), 13);
        assert_eq!(&out[9..], &0xcbf4_3926u32.to_le_bytes());
    }

    #[test]
    fn full_sink_reports_offset() {
        let mut buf = [0u8; 2];
        let mut enc = Encoder::new(SliceSink::new(&mut buf), Options::NONE);
        enc.write_u8(1).unwrap();
        let err = enc.write_fixed(7u16).unwrap_err();
        assert_eq!(err, WireError::new(ErrorCode::BufferFull, 1));
    }
}
