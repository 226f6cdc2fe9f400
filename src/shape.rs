//! Structural fingerprints for versioned messages.
//!
//! A type's shape is a byte string built by walking its declared structure: one [`TypeTag`]
//! per value, element and field shapes nested inside their containers, and field counts for
//! records. A record that reappears inside itself is cut with a back-reference to the enclosing
//! occurrence, so pointer trees have a finite shape. Sibling fields of the same record type are
//! described in full. The fingerprint is the CRC-32 of those bytes.

use alloc::vec::Vec;

use crate::checksum::crc32;
use crate::varint::{self, VarintBuf, MAX_VARINT_LEN};
use crate::{Decode, Encode};

/// Size of the version fingerprint prefix in bytes.
pub const FINGERPRINT_LEN: usize = 4;

/// Closed set of wire categories recorded in a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[non_exhaustive]
pub enum TypeTag {
    /// `bool`
    Bool = 0x01,
    /// `char`
    Char = 0x02,
    /// `i8`
    I8 = 0x03,
    /// `i16`
    I16 = 0x04,
    /// `i32`
    I32 = 0x05,
    /// `i64` and `isize`
    I64 = 0x06,
    /// `u8`
    U8 = 0x07,
    /// `u16`
    U16 = 0x08,
    /// `u32`
    U32 = 0x09,
    /// `u64` and `usize`
    U64 = 0x0a,
    /// `f32`
    F32 = 0x0b,
    /// `f64`
    F64 = 0x0c,
    /// UTF-8 string.
    String = 0x10,
    /// Statically sized array; followed by the length and the element shape.
    FixedArray = 0x11,
    /// Owning pointer; followed by the pointee shape.
    OwningPointer = 0x12,
    /// Optional value; followed by the inner shape.
    Optional = 0x13,
    /// Two-element tuple.
    Pair = 0x14,
    /// Tuple of any other arity; followed by the arity and element shapes.
    Tuple = 0x15,
    /// Length-prefixed sequence.
    Sequence = 0x16,
    /// Ordered map.
    Map = 0x17,
    /// Hash map.
    UnorderedMap = 0x18,
    /// Set.
    Set = 0x19,
    /// Sum type; followed by the variant count and each variant's field shapes.
    Sum = 0x1a,
    /// Record; followed by the field count and field shapes.
    Record = 0x1b,
    /// Recursive record; followed by the nesting level of the enclosing occurrence.
    RecordRef = 0x1c,
    /// Fixed-size bit vector; followed by the bit count.
    Bitset = 0x1d,
    /// Integer written with a representation tag; followed by the integer shape.
    Tagged = 0x1e,
    /// Filesystem path.
    Path = 0x1f,
    /// Time span as seconds and nanoseconds.
    Duration = 0x20,
}

/// Accumulates the shape bytes of one type.
#[derive(Debug, Default)]
pub struct ShapeWriter {
    bytes: Vec<u8>,
    open: Vec<&'static str>,
}

impl ShapeWriter {
    /// Empty shape.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one category tag.
    #[inline]
    pub fn tag(&mut self, tag: TypeTag) {
        self.bytes.push(tag as u8);
    }

    /// Record a static count (array length, arity, field count).
    pub fn count(&mut self, n: usize) {
        let mut buf: VarintBuf = [0; MAX_VARINT_LEN];
        let len = varint::encode_unsigned(n as u64, &mut buf);
        self.bytes.extend_from_slice(&buf[..len]);
    }

    /// Describe a record named `name` with `fields` traversed fields.
    ///
    /// `body` writes the field shapes. If `name` is already open further up the walk, a
    /// back-reference is written instead and `body` is not run.
    pub fn record(&mut self, name: &'static str, fields: usize, body: impl FnOnce(&mut Self)) {
        self.enter(name, TypeTag::Record, fields, body);
    }

    /// Describe a sum type named `name` with `variants` alternatives.
    ///
    /// Same contract as [`ShapeWriter::record`]. `body` writes, per variant, a
    /// [`ShapeWriter::count`] of its fields followed by the field shapes.
    pub fn sum(&mut self, name: &'static str, variants: usize, body: impl FnOnce(&mut Self)) {
        self.enter(name, TypeTag::Sum, variants, body);
    }

    fn enter(
        &mut self,
        name: &'static str,
        tag: TypeTag,
        n: usize,
        body: impl FnOnce(&mut Self),
    ) {
        if let Some(level) = self.open.iter().position(|&open| open == name) {
            self.tag(TypeTag::RecordRef);
            self.count(level);
            return;
        }
        self.open.push(name);
        self.tag(tag);
        self.count(n);
        body(self);
        self.open.pop();
    }

    /// Shape bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// CRC-32 of the shape bytes.
    #[must_use]
    pub fn fingerprint(&self) -> u32 {
        crc32(&self.bytes)
    }
}

/// Version fingerprint of `T` as an encoder sees it.
#[must_use]
pub fn encode_fingerprint<T: Encode + ?Sized>() -> u32 {
    let mut shape = ShapeWriter::new();
    T::describe(&mut shape);
    shape.fingerprint()
}

/// Version fingerprint of `T` as a decoder sees it.
#[must_use]
pub fn decode_fingerprint<T: Decode + ?Sized>() -> u32 {
    let mut shape = ShapeWriter::new();
    T::describe(&mut shape);
    shape.fingerprint()
}
