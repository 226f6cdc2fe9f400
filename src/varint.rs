//! Variable-length integer coding.
//!
//! Unsigned values use 7 data bits per byte, least significant group first, with bit 7 set on
//! every byte that is followed by another.
//!
//! Signed values spend the first byte on a sign bit (bit 7), a continuation bit (bit 6), and
//! the low 6 bits of the magnitude. When the continuation bit is set the remaining magnitude
//! (`magnitude >> 6`) follows in the unsigned scheme. Zero is a single `0x00` byte in both.

use crate::{ErrorCode, WireError};

/// Longest possible encoding of a 64-bit value in either scheme.
pub const MAX_VARINT_LEN: usize = 10;

const DATA_BITS: u32 = 7;
const DATA_MASK: u8 = 0x7f;
const CONTINUATION: u8 = 0x80;

const SIGN_BIT: u8 = 0x80;
const SIGNED_CONTINUATION: u8 = 0x40;
const SIGNED_FIRST_BITS: u32 = 6;
const SIGNED_FIRST_MASK: u8 = 0x3f;

/// Scratch buffer large enough for any varint.
pub type VarintBuf = [u8; MAX_VARINT_LEN];

/// Write `value` into `buf` and return the number of bytes used.
#[must_use]
pub fn encode_unsigned(mut value: u64, buf: &mut VarintBuf) -> usize {
    let mut n = 0;
    while value >= u64::from(CONTINUATION) {
        buf[n] = low_byte(value) | CONTINUATION;
        value >>= DATA_BITS;
        n += 1;
    }
    buf[n] = low_byte(value);
    n + 1
}

/// Write `value` into `buf` using the sign/continuation first byte and return the length.
#[must_use]
pub fn encode_signed(value: i64, buf: &mut VarintBuf) -> usize {
    let magnitude = value.unsigned_abs();
    let mut first = low_byte(magnitude) & SIGNED_FIRST_MASK;
    if value < 0 {
        first |= SIGN_BIT;
    }
    let rest = magnitude >> SIGNED_FIRST_BITS;
    if rest == 0 {
        buf[0] = first;
        return 1;
    }
    buf[0] = first | SIGNED_CONTINUATION;
    let mut tail = [0u8; MAX_VARINT_LEN];
    let n = encode_unsigned(rest, &mut tail);
    buf[1..=n].copy_from_slice(&tail[..n]);
    n + 1
}

/// Number of bytes [`encode_unsigned`] produces for `value`.
#[must_use]
pub const fn unsigned_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    if bits == 0 {
        1
    } else {
        bits.div_ceil(DATA_BITS as usize)
    }
}

/// Number of bytes [`encode_signed`] produces for `value`.
#[must_use]
pub const fn signed_len(value: i64) -> usize {
    let rest = value.unsigned_abs() >> SIGNED_FIRST_BITS;
    if rest == 0 {
        1
    } else {
        1 + unsigned_len(rest)
    }
}

/// Read an unsigned varint starting at `*pos`, advancing `*pos` past it.
///
/// # Errors
///
/// Returns `MessageSize` if the input ends inside the varint and `IllegalByteSequence` if the
/// encoding does not fit in 64 bits.
pub fn decode_unsigned(data: &[u8], pos: &mut usize) -> Result<u64, WireError> {
    let start = *pos;
    let mut result = 0u64;
    let mut shift = 0u32;
    let mut at = start;
    loop {
        let byte = *data
            .get(at)
            .ok_or_else(|| WireError::new(ErrorCode::MessageSize, at))?;
        let bits = u64::from(byte & DATA_MASK);
        if shift == 63 && (byte & !1) != 0 {
            return Err(WireError::new(ErrorCode::IllegalByteSequence, start));
        }
        result |= bits << shift;
        at += 1;
        if byte & CONTINUATION == 0 {
            *pos = at;
            return Ok(result);
        }
        shift += DATA_BITS;
    }
}

/// Read a signed varint starting at `*pos`, advancing `*pos` past it.
///
/// # Errors
///
/// Returns `MessageSize` if the input ends inside the varint and `IllegalByteSequence` if the
/// magnitude does not fit in an `i64`.
pub fn decode_signed(data: &[u8], pos: &mut usize) -> Result<i64, WireError> {
    let start = *pos;
    let first = *data
        .get(start)
        .ok_or_else(|| WireError::new(ErrorCode::MessageSize, start))?;
    let negative = first & SIGN_BIT != 0;
    let mut magnitude = u64::from(first & SIGNED_FIRST_MASK);
    let mut at = start + 1;
    if first & SIGNED_CONTINUATION != 0 {
        let rest = decode_unsigned(data, &mut at)?;
        if rest > u64::MAX >> SIGNED_FIRST_BITS {
            return Err(WireError::new(ErrorCode::IllegalByteSequence, start));
        }
        magnitude |= rest << SIGNED_FIRST_BITS;
    }

    let value = if negative {
        if magnitude > i64::MIN.unsigned_abs() {
            return Err(WireError::new(ErrorCode::IllegalByteSequence, start));
        }
        // 2^63 maps onto i64::MIN through the wrapping negation.
        0i64.wrapping_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude)
            .map_err(|_| WireError::new(ErrorCode::IllegalByteSequence, start))?
    };
    *pos = at;
    Ok(value)
}

#[allow(clippy::cast_possible_truncation)]
#[inline]
const fn low_byte(value: u64) -> u8 {
    (value & DATA_MASK as u64) as u8
}
