//! Narrowest-representation integers with an explicit type tag.
//!
//! [`Tagged`] writes one tag byte naming the integer's declared width and the narrowest width
//! that holds its current value losslessly (for example "`u64` as `u8`"), then that many bytes
//! in the option byte order. Unlike a varint the width is known up front, so the value can be
//! read without scanning continuation bits.

use crate::shape::{ShapeWriter, TypeTag};
use crate::sink::Sink;
use crate::{ByteOrder, Decode, Decoder, Encode, Encoder, ErrorCode, WireError};

const SIGNED_FLAG: u8 = 0x80;
const DECLARED_SHIFT: u8 = 4;
const WIDTH_MASK: u8 = 0x03;
const KNOWN_BITS: u8 = SIGNED_FLAG | (WIDTH_MASK << DECLARED_SHIFT) | WIDTH_MASK;

/// Decoded form of a representation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntRepr {
    /// Two's-complement family.
    pub signed: bool,
    /// Width of the declared integer type in bytes.
    pub declared: usize,
    /// Width actually written in bytes.
    pub actual: usize,
}

impl IntRepr {
    /// Tag byte: bit 7 is the sign family, bits 4-5 hold `log2(declared)`, bits 0-1 hold
    /// `log2(actual)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn to_tag(self) -> u8 {
        let declared = self.declared.trailing_zeros() as u8;
        let actual = self.actual.trailing_zeros() as u8;
        let sign = if self.signed { SIGNED_FLAG } else { 0 };
        sign | (declared << DECLARED_SHIFT) | actual
    }

    /// Parse a tag byte, rejecting unknown bits and an actual width wider than the declared.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        if tag & !KNOWN_BITS != 0 {
            return None;
        }
        let declared = 1usize << ((tag >> DECLARED_SHIFT) & WIDTH_MASK);
        let actual = 1usize << (tag & WIDTH_MASK);
        if actual > declared {
            return None;
        }
        Some(Self {
            signed: tag & SIGNED_FLAG != 0,
            declared,
            actual,
        })
    }
}

/// Integers eligible for [`Tagged`].
pub trait CompactInt: Copy + Default + sealed::Sealed {
    /// Two's-complement family.
    const SIGNED: bool;
    /// Declared width in bytes.
    const WIDTH: usize;
    /// Shape tag of the plain integer.
    const TAG: TypeTag;

    /// Narrowest width in `{1, 2, 4, 8}` that holds `self` losslessly.
    fn narrowest(self) -> usize;

    /// Value widened to 64 bits (sign-extended for signed types).
    fn to_bits(self) -> u64;

    /// Value truncated from 64 bits.
    fn from_bits(bits: u64) -> Self;
}

mod sealed {
    pub trait Sealed {}
}

macro_rules! impl_compact_unsigned {
    ($($ty:ty => $tag:ident;)*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl CompactInt for $ty {
                const SIGNED: bool = false;
                const WIDTH: usize = core::mem::size_of::<$ty>();
                const TAG: TypeTag = TypeTag::$tag;

                #[inline]
                fn narrowest(self) -> usize {
                    let v = u64::from(self);
                    if u8::try_from(v).is_ok() {
                        1
                    } else if u16::try_from(v).is_ok() {
                        2
                    } else if u32::try_from(v).is_ok() {
                        4
                    } else {
                        8
                    }
                }

                #[inline]
                fn to_bits(self) -> u64 {
                    u64::from(self)
                }

                #[inline]
                #[allow(clippy::cast_possible_truncation)]
                fn from_bits(bits: u64) -> Self {
                    bits as $ty
                }
            }
        )*
    };
}

macro_rules! impl_compact_signed {
    ($($ty:ty => $tag:ident;)*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl CompactInt for $ty {
                const SIGNED: bool = true;
                const WIDTH: usize = core::mem::size_of::<$ty>();
                const TAG: TypeTag = TypeTag::$tag;

                #[inline]
                fn narrowest(self) -> usize {
                    let v = i64::from(self);
                    if i8::try_from(v).is_ok() {
                        1
                    } else if i16::try_from(v).is_ok() {
                        2
                    } else if i32::try_from(v).is_ok() {
                        4
                    } else {
                        8
                    }
                }

                #[inline]
                #[allow(clippy::cast_sign_loss)]
                fn to_bits(self) -> u64 {
                    i64::from(self) as u64
                }

                #[inline]
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                fn from_bits(bits: u64) -> Self {
                    bits as i64 as $ty
                }
            }
        )*
    };
}

impl_compact_unsigned! {
    u16 => U16;
    u32 => U32;
    u64 => U64;
}

impl_compact_signed! {
    i16 => I16;
    i32 => I32;
    i64 => I64;
}

/// Integer field written as a representation tag plus its narrowest lossless width.
///
/// ```
/// use fieldwire::{encode_to_vec, Options, Tagged};
///
/// let bytes = encode_to_vec(&Tagged(300u64), Options::BIG_ENDIAN).unwrap();
/// // `u64` stored as `u16`, then 0x012c big-endian.
/// assert_eq!(bytes, [0x31, 0x01, 0x2c]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tagged<T>(pub T);

impl<T> Tagged<T> {
    /// Unwrap the integer.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Tagged<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

fn write_narrow(bits: u64, width: usize, order: ByteOrder, out: &mut [u8; 8]) -> usize {
    match order {
        ByteOrder::Little => {
            out[..width].copy_from_slice(&bits.to_le_bytes()[..width]);
        }
        ByteOrder::Big => {
            out[..width].copy_from_slice(&bits.to_be_bytes()[8 - width..]);
        }
    }
    width
}

#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn read_narrow(bytes: &[u8], signed: bool, order: ByteOrder) -> u64 {
    let width = bytes.len();
    let mut buf = [0u8; 8];
    let raw = match order {
        ByteOrder::Little => {
            buf[..width].copy_from_slice(bytes);
            u64::from_le_bytes(buf)
        }
        ByteOrder::Big => {
            buf[8 - width..].copy_from_slice(bytes);
            u64::from_be_bytes(buf)
        }
    };
    let unused = 64 - 8 * width as u32;
    if signed && unused > 0 {
        (((raw << unused) as i64) >> unused) as u64
    } else {
        raw
    }
}

impl<T: CompactInt> Encode for Tagged<T> {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Tagged);
        shape.tag(T::TAG);
    }

    fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
        let actual = self.0.narrowest().min(T::WIDTH);
        let repr = IntRepr {
            signed: T::SIGNED,
            declared: T::WIDTH,
            actual,
        };
        let mut buf = [0u8; 9];
        buf[0] = repr.to_tag();
        let mut body = [0u8; 8];
        let n = write_narrow(self.0.to_bits(), actual, enc.options().byte_order(), &mut body);
        buf[1..=n].copy_from_slice(&body[..n]);
        enc.write_bytes(&buf[..=n])
    }
}

impl<T: CompactInt> Decode for Tagged<T> {
    const MIN_WIRE_LEN: usize = 2;

    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Tagged);
        shape.tag(T::TAG);
    }

    fn decode_in_place(&mut self, dec: &mut Decoder<'_>) -> Result<(), WireError> {
        let off = dec.position();
        let tag = dec.read_u8()?;
        let repr = IntRepr::from_tag(tag)
            .filter(|r| r.signed == T::SIGNED && r.actual <= T::WIDTH)
            .ok_or_else(|| WireError::new(ErrorCode::InvalidArgument, off))?;
        let body = dec.read_exact(repr.actual)?;
        let bits = read_narrow(body, repr.signed, dec.options().byte_order());
        self.0 = T::from_bits(bits);
        Ok(())
    }
}
