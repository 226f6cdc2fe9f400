//! Whole-message encode and decode: optional version prefix, fields, optional checksum trailer.

use alloc::vec::Vec;

#[cfg(feature = "std")]
use crate::alloc_util::try_vec_with_capacity;
use crate::checksum;
use crate::shape::{decode_fingerprint, encode_fingerprint, FINGERPRINT_LEN};
use crate::sink::{Sink, SliceSink};
use crate::{Decode, DecodeLimits, Decoder, Encode, Encoder, ErrorCode, Options, WireError};

#[cfg(feature = "tracing")]
fn report<T>(op: &'static str, result: &Result<T, WireError>, bytes: usize) {
    match result {
        Ok(_) => tracing::trace!(op, bytes, "fieldwire message complete"),
        Err(err) => tracing::debug!(
            op,
            code = err.code.as_str(),
            offset = err.offset,
            "fieldwire message failed"
        ),
    }
}

#[cfg(not(feature = "tracing"))]
#[inline]
const fn report<T>(_op: &'static str, _result: &Result<T, WireError>, _bytes: usize) {}

/// Encode `value` into `sink` and return the number of bytes written.
///
/// Layout: fingerprint (`WITH_VERSION`), fields, CRC-32 trailer (`WITH_CHECKSUM`).
///
/// # Errors
///
/// Returns the sink's error. A fixed-capacity sink that runs out of room yields `BufferFull`;
/// its contents are then an incomplete message.
pub fn encode_into<T, S>(value: &T, options: Options, sink: S) -> Result<usize, WireError>
where
    T: Encode + ?Sized,
    S: Sink,
{
    let mut enc = Encoder::new(sink, options);
    let result = encode_message(value, &mut enc).and_then(|()| enc.finish());
    let written = *result.as_ref().unwrap_or(&0);
    report("encode", &result, written);
    result
}

fn encode_message<T, S>(value: &T, enc: &mut Encoder<S>) -> Result<(), WireError>
where
    T: Encode + ?Sized,
    S: Sink,
{
    if enc.options().contains(Options::WITH_VERSION) {
        enc.write_fixed(encode_fingerprint::<T>())?;
    }
    value.encode(enc)
}

/// Encode `value` into a new vector.
///
/// # Errors
///
/// Returns `AllocationFailed` if the output cannot grow.
pub fn encode_to_vec<T: Encode + ?Sized>(value: &T, options: Options) -> Result<Vec<u8>, WireError> {
    let mut out = Vec::new();
    encode_into(value, options, &mut out)?;
    Ok(out)
}

/// Encode `value` into the front of `buf` and return the number of bytes written.
///
/// # Errors
///
/// Returns `BufferFull` if `buf` is too small; the caller must not treat the prefix as a
/// message.
pub fn encode_to_slice<T: Encode + ?Sized>(
    value: &T,
    options: Options,
    buf: &mut [u8],
) -> Result<usize, WireError> {
    encode_into(value, options, SliceSink::new(buf))
}

/// Encode `value` into a writer and return the number of bytes written.
///
/// # Errors
///
/// Returns `Io` if the writer fails.
#[cfg(feature = "std")]
pub fn encode_to_writer<T, W>(value: &T, options: Options, writer: W) -> Result<usize, WireError>
where
    T: Encode + ?Sized,
    W: std::io::Write,
{
    encode_into(value, options, crate::sink::IoSink::new(writer))
}

/// Decode a message into a default-initialized `T`.
///
/// # Errors
///
/// See [`decode_into`].
pub fn decode<T: Decode + Default>(bytes: &[u8], options: Options) -> Result<T, WireError> {
    decode_with_limits(bytes, options, DecodeLimits::default())
}

/// Decode a message into a default-initialized `T` under explicit resource limits.
///
/// # Errors
///
/// See [`decode_into`]; additionally `InputLimitExceeded` and `DepthLimitExceeded`.
pub fn decode_with_limits<T: Decode + Default>(
    bytes: &[u8],
    options: Options,
    limits: DecodeLimits,
) -> Result<T, WireError> {
    let mut out = T::default();
    decode_into_with_limits(&mut out, bytes, options, limits)?;
    Ok(out)
}

/// Decode a message into an existing value and return the number of input bytes consumed.
///
/// When `T` has more trailing fields than the message carries, the extra fields keep their
/// current values. When it has fewer, the unread tail is not validated; compare the returned
/// count with `bytes.len()` to detect it. On error the fields read before the failure keep
/// their decoded values.
///
/// # Errors
///
/// - `InvalidArgument`: checksummed input shorter than its trailer, version fingerprint
///   mismatch (nothing is written to `target`), bad variant index, bitset size mismatch, or a
///   foreign tagged integer.
/// - `BadMessage`: checksum mismatch (nothing is written to `target`).
/// - `MessageSize` / `ValueTooLarge`: truncated fixed-width value / oversized length prefix.
/// - `IllegalByteSequence`: malformed flag, varint, `char`, or UTF-8.
pub fn decode_into<T: Decode + ?Sized>(
    target: &mut T,
    bytes: &[u8],
    options: Options,
) -> Result<usize, WireError> {
    decode_into_with_limits(target, bytes, options, DecodeLimits::default())
}

/// [`decode_into`] under explicit resource limits.
///
/// # Errors
///
/// See [`decode_into`].
pub fn decode_into_with_limits<T: Decode + ?Sized>(
    target: &mut T,
    bytes: &[u8],
    options: Options,
    limits: DecodeLimits,
) -> Result<usize, WireError> {
    let result = decode_message(target, bytes, options, limits);
    let consumed = *result.as_ref().unwrap_or(&0);
    report("decode", &result, consumed);
    result
}

fn decode_message<T: Decode + ?Sized>(
    target: &mut T,
    bytes: &[u8],
    options: Options,
    limits: DecodeLimits,
) -> Result<usize, WireError> {
    let mut dec = Decoder::new(bytes, options, limits)?;
    let trailer = if options.contains(Options::WITH_CHECKSUM) {
        let payload_len = checksum::verify(bytes, options.byte_order())?;
        dec.set_end(payload_len);
        checksum::CHECKSUM_LEN
    } else {
        0
    };

    if options.contains(Options::WITH_VERSION) {
        if dec.remaining() < FINGERPRINT_LEN {
            return Err(dec.error(ErrorCode::InvalidArgument));
        }
        let off = dec.position();
        let stored: u32 = dec.read_fixed()?;
        if stored != decode_fingerprint::<T>() {
            return Err(WireError::new(ErrorCode::InvalidArgument, off));
        }
    }

    target.decode_in_place(&mut dec)?;
    Ok(dec.position() + trailer)
}

/// Read exactly `len` bytes from `reader` and decode them as one message.
///
/// # Errors
///
/// Returns `InputLimitExceeded` before reading if `len` is over the default limits, `Io` if the
/// reader fails or ends early, and otherwise the errors of [`decode_into`].
#[cfg(feature = "std")]
pub fn decode_from_reader<T, R>(reader: R, len: usize, options: Options) -> Result<T, WireError>
where
    T: Decode + Default,
    R: std::io::Read,
{
    decode_from_reader_with_limits(reader, len, options, DecodeLimits::default())
}

/// [`decode_from_reader`] under explicit resource limits.
///
/// # Errors
///
/// See [`decode_from_reader`].
#[cfg(feature = "std")]
pub fn decode_from_reader_with_limits<T, R>(
    mut reader: R,
    len: usize,
    options: Options,
    limits: DecodeLimits,
) -> Result<T, WireError>
where
    T: Decode + Default,
    R: std::io::Read,
{
    if len > limits.max_input_bytes {
        return Err(WireError::new(ErrorCode::InputLimitExceeded, 0));
    }
    let mut buf: Vec<u8> = try_vec_with_capacity(len, 0)?;
    buf.resize(len, 0);
    reader
        .read_exact(&mut buf)
        .map_err(|e| WireError::io(&e, 0))?;
    decode_with_limits(&buf, options, limits)
}
