use alloc::boxed::Box;
use alloc::string::String;

use crate::shape::{ShapeWriter, TypeTag};
use crate::sink::Sink;
use crate::utf8;
use crate::{Decoder, Encoder, ErrorCode, WireError};

/// A value with a wire form.
///
/// Derive it on records and sum types with `#[derive(fieldwire::Encode)]`.
pub trait Encode {
    /// Append this type's shape, used for the version fingerprint.
    fn describe(shape: &mut ShapeWriter);

    /// Write `self`.
    ///
    /// # Errors
    ///
    /// Returns the sink's error when it cannot take the bytes.
    fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError>;
}

/// A value that can be filled from its wire form.
///
/// Decoding writes into an existing value rather than returning a new one: when a record's
/// input runs out or fails part way, the fields already read keep their decoded values and
/// the rest keep what they held before (normally their defaults).
pub trait Decode {
    /// Lower bound on the encoded size of one value, used to reject container lengths that
    /// cannot fit in the remaining input.
    const MIN_WIRE_LEN: usize = 1;

    /// Append this type's shape, used for the version fingerprint.
    fn describe(shape: &mut ShapeWriter);

    /// Read into `self`.
    ///
    /// # Errors
    ///
    /// Returns the first bounds, structure, or encoding failure.
    fn decode_in_place(&mut self, dec: &mut Decoder<'_>) -> Result<(), WireError>;
}

impl<T: Encode + ?Sized> Encode for &T {
    fn describe(shape: &mut ShapeWriter) {
        T::describe(shape);
    }

    #[inline]
    fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
        (**self).encode(enc)
    }
}

impl Encode for bool {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Bool);
    }

    #[inline]
    fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
        enc.write_flag(*self)
    }
}

impl Decode for bool {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Bool);
    }

    #[inline]
    fn decode_in_place(&mut self, dec: &mut Decoder<'_>) -> Result<(), WireError> {
        *self = dec.read_flag()?;
        Ok(())
    }
}

impl Encode for u8 {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::U8);
    }

    #[inline]
    fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
        enc.write_u8(*self)
    }
}

impl Decode for u8 {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::U8);
    }

    #[inline]
    fn decode_in_place(&mut self, dec: &mut Decoder<'_>) -> Result<(), WireError> {
        *self = dec.read_u8()?;
        Ok(())
    }
}

impl Encode for i8 {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::I8);
    }

    #[inline]
    fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
        enc.write_u8(self.to_le_bytes()[0])
    }
}

impl Decode for i8 {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::I8);
    }

    #[inline]
    fn decode_in_place(&mut self, dec: &mut Decoder<'_>) -> Result<(), WireError> {
        *self = Self::from_le_bytes([dec.read_u8()?]);
        Ok(())
    }
}

// Wider integers: varint by default, full width under fixed-length encoding. A reader whose
// integer is narrower than the writer's keeps the low bits.
macro_rules! impl_varint_int {
    ($($ty:ty => $tag:ident, $wide:ty, $write:ident, $read:ident;)*) => {
        $(
            impl Encode for $ty {
                fn describe(shape: &mut ShapeWriter) {
                    shape.tag(TypeTag::$tag);
                }

                #[inline]
                fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
                    if enc.options().fixed_length() {
                        enc.write_fixed(*self)
                    } else {
                        enc.$write(<$wide>::from(*self))
                    }
                }
            }

            impl Decode for $ty {
                fn describe(shape: &mut ShapeWriter) {
                    shape.tag(TypeTag::$tag);
                }

                #[inline]
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                fn decode_in_place(&mut self, dec: &mut Decoder<'_>) -> Result<(), WireError> {
                    *self = if dec.options().fixed_length() {
                        dec.read_fixed::<$ty>()?
                    } else {
                        dec.$read()? as $ty
                    };
                    Ok(())
                }
            }
        )*
    };
}

impl_varint_int! {
    u16 => U16, u64, write_uvarint, read_uvarint;
    u32 => U32, u64, write_uvarint, read_uvarint;
    u64 => U64, u64, write_uvarint, read_uvarint;
    i16 => I16, i64, write_ivarint, read_ivarint;
    i32 => I32, i64, write_ivarint, read_ivarint;
    i64 => I64, i64, write_ivarint, read_ivarint;
}

// Pointer-sized integers always use the 64-bit wire form so both sides agree across targets.
macro_rules! impl_pointer_sized {
    ($($ty:ty => $tag:ident, $wide:ty, $write:ident, $read:ident;)*) => {
        $(
            impl Encode for $ty {
                fn describe(shape: &mut ShapeWriter) {
                    shape.tag(TypeTag::$tag);
                }

                #[inline]
                #[allow(clippy::cast_lossless, clippy::cast_possible_wrap)]
                fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
                    let wide = *self as $wide;
                    if enc.options().fixed_length() {
                        enc.write_fixed(wide)
                    } else {
                        enc.$write(wide)
                    }
                }
            }

            impl Decode for $ty {
                fn describe(shape: &mut ShapeWriter) {
                    shape.tag(TypeTag::$tag);
                }

                #[inline]
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                fn decode_in_place(&mut self, dec: &mut Decoder<'_>) -> Result<(), WireError> {
                    let wide = if dec.options().fixed_length() {
                        dec.read_fixed::<$wide>()?
                    } else {
                        dec.$read()?
                    };
                    *self = wide as $ty;
                    Ok(())
                }
            }
        )*
    };
}

impl_pointer_sized! {
    usize => U64, u64, write_uvarint, read_uvarint;
    isize => I64, i64, write_ivarint, read_ivarint;
}

macro_rules! impl_float {
    ($($ty:ty => $tag:ident;)*) => {
        $(
            impl Encode for $ty {
                fn describe(shape: &mut ShapeWriter) {
                    shape.tag(TypeTag::$tag);
                }

                #[inline]
                fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
                    enc.write_fixed(*self)
                }
            }

            impl Decode for $ty {
                const MIN_WIRE_LEN: usize = core::mem::size_of::<$ty>();

                fn describe(shape: &mut ShapeWriter) {
                    shape.tag(TypeTag::$tag);
                }

                #[inline]
                fn decode_in_place(&mut self, dec: &mut Decoder<'_>) -> Result<(), WireError> {
                    *self = dec.read_fixed::<$ty>()?;
                    Ok(())
                }
            }
        )*
    };
}

impl_float! {
    f32 => F32;
    f64 => F64;
}

impl Encode for char {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Char);
    }

    fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
        u32::from(*self).encode(enc)
    }
}

impl Decode for char {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Char);
    }

    fn decode_in_place(&mut self, dec: &mut Decoder<'_>) -> Result<(), WireError> {
        let off = dec.position();
        let mut scalar = 0u32;
        scalar.decode_in_place(dec)?;
        *self = Self::from_u32(scalar)
            .ok_or_else(|| WireError::new(ErrorCode::IllegalByteSequence, off))?;
        Ok(())
    }
}

impl Encode for str {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::String);
    }

    fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
        enc.write_len(self.len())?;
        enc.write_bytes(self.as_bytes())
    }
}

impl Encode for String {
    fn describe(shape: &mut ShapeWriter) {
        str::describe(shape);
    }

    #[inline]
    fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
        self.as_str().encode(enc)
    }
}

impl Decode for String {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::String);
    }

    fn decode_in_place(&mut self, dec: &mut Decoder<'_>) -> Result<(), WireError> {
        let len = dec.read_container_len(1)?;
        let off = dec.position();
        let bytes = dec.read_exact(len)?;
        let text = utf8::validate(bytes, off)?;
        let mut out = Self::new();
        out.try_reserve_exact(text.len())
            .map_err(|_| WireError::new(ErrorCode::AllocationFailed, off))?;
        out.push_str(text);
        *self = out;
        Ok(())
    }
}

/// Presence flag, then the value when present.
impl<T: Encode> Encode for Option<T> {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Optional);
        T::describe(shape);
    }

    fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
        match self {
            Some(value) => {
                enc.write_flag(true)?;
                value.encode(enc)
            }
            None => enc.write_flag(false),
        }
    }
}

/// A present value is built from `T::default()` and filled, so `Option<Box<T>>` allocates only
/// when the flag says a value follows.
impl<T: Decode + Default> Decode for Option<T> {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Optional);
        T::describe(shape);
    }

    fn decode_in_place(&mut self, dec: &mut Decoder<'_>) -> Result<(), WireError> {
        if dec.read_flag()? {
            let mut value = T::default();
            value.decode_in_place(dec)?;
            *self = Some(value);
        } else {
            *self = None;
        }
        Ok(())
    }
}

/// Owning pointers are transparent on the wire; nullability comes from wrapping in `Option`.
impl<T: Encode + ?Sized> Encode for Box<T> {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::OwningPointer);
        T::describe(shape);
    }

    #[inline]
    fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
        (**self).encode(enc)
    }
}

impl<T: Decode> Decode for Box<T> {
    const MIN_WIRE_LEN: usize = T::MIN_WIRE_LEN;

    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::OwningPointer);
        T::describe(shape);
    }

    #[inline]
    fn decode_in_place(&mut self, dec: &mut Decoder<'_>) -> Result<(), WireError> {
        (**self).decode_in_place(dec)
    }
}

impl Encode for () {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Tuple);
        shape.count(0);
    }

    #[inline]
    fn encode<S: Sink>(&self, _enc: &mut Encoder<S>) -> Result<(), WireError> {
        Ok(())
    }
}

impl Decode for () {
    const MIN_WIRE_LEN: usize = 0;

    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Tuple);
        shape.count(0);
    }

    #[inline]
    fn decode_in_place(&mut self, _dec: &mut Decoder<'_>) -> Result<(), WireError> {
        Ok(())
    }
}
