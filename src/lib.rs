//! # fieldwire
//!
//! Schema-less compact binary encoding for plain Rust structs and enums.
//!
//! The field layout comes from the type itself: `#[derive(Encode, Decode)]` walks the fields in
//! declaration order and that order *is* the wire format. There is no IDL, no framing, and no
//! magic number; a message is the concatenation of its fields.
//!
//! ```
//! use fieldwire::{decode, encode_to_vec, Decode, Encode, Options};
//!
//! #[derive(Debug, Default, PartialEq, Encode, Decode)]
//! struct Reading {
//!     sensor: u32,
//!     celsius: f32,
//!     label: String,
//! }
//!
//! let r = Reading { sensor: 5, celsius: 21.5, label: "lab".into() };
//! let bytes = encode_to_vec(&r, Options::NONE).unwrap();
//! assert_eq!(bytes.len(), 1 + 4 + 1 + 3);
//! assert_eq!(decode::<Reading>(&bytes, Options::NONE).unwrap(), r);
//! ```
//!
//! ## Wire rules
//!
//! - `bool`, `u8`, `i8`: one raw byte.
//! - Wider integers: varints (7 bits per byte; signed values carry a sign bit and a
//!   continuation bit in the first byte), or their full width under
//!   [`Options::FIXED_LENGTH_ENCODING`] or [`Options::BIG_ENDIAN`]. Lengths follow the same
//!   rule with eight bytes. `usize`/`isize` use the 64-bit forms.
//! - `f32`/`f64`: raw IEEE-754 bytes.
//! - Strings and sequences: length prefix, then the bytes or elements.
//! - Fixed arrays, tuples, and nested records: their elements in order, no prefix.
//! - `Option<T>`: a `0`/`1` presence byte, then the value. `Option<Box<T>>` gives recursive
//!   structures a pre-order layout with one presence byte per child link.
//! - Maps: length, then key/value pairs. Sets: length, then elements.
//! - Enums: the variant index as a length, then the variant's fields.
//! - `Duration`: whole seconds as a `u64`, then sub-second nanoseconds as a `u32`.
//! - `PathBuf`/`Path` *(std)*: a UTF-8 string; non-Unicode paths do not encode.
//! - [`BitSet`]: bit count, then packed bytes. [`Tagged`]: representation tag, then the
//!   narrowest lossless width.
//!
//! Every fixed-width value is little-endian unless [`Options::BIG_ENDIAN`] is set, whatever
//! the host byte order.
//!
//! ## Compatibility
//!
//! Decoding stops at the end of the input without error. A reader with extra trailing fields
//! keeps their defaults; a reader with fewer fields ignores the rest of the message.
//! [`Options::WITH_VERSION`] prefixes a structural fingerprint so that incompatible shapes fail
//! fast with `InvalidArgument`, and [`Options::WITH_CHECKSUM`] appends a CRC-32.
//!
//! ## Feature flags
//!
//! - `std` *(default)*: io sinks and sources, `HashMap`/`HashSet`, `std::error::Error` for
//!   [`WireError`].
//! - `simdutf8`: SIMD-accelerated UTF-8 validation where supported.
//! - `tracing`: structured events for whole-message encode/decode outcomes.
//!
//! ## `no_std`
//!
//! The crate is `no_std` compatible and needs `alloc`.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

extern crate alloc;

mod alloc_util;
mod bitset;
pub mod checksum;
mod codec;
mod collections;
mod decode;
mod duration;
mod encode;
mod endian;
mod error;
mod limits;
mod message;
mod options;
#[cfg(feature = "std")]
mod path;
mod repr;
mod shape;
mod sink;
pub(crate) mod utf8;
pub mod varint;

pub use crate::bitset::BitSet;
pub use crate::codec::{Decode, Encode};
pub use crate::decode::Decoder;
pub use crate::encode::Encoder;
pub use crate::endian::FixedWidth;
pub use crate::error::{ErrorCode, WireError};
pub use crate::limits::{DecodeLimits, DEFAULT_MAX_CONTAINER_LEN, DEFAULT_MAX_DEPTH};
pub use crate::message::{
    decode, decode_into, decode_into_with_limits, decode_with_limits, encode_into,
    encode_to_slice, encode_to_vec,
};
#[cfg(feature = "std")]
pub use crate::message::{decode_from_reader, decode_from_reader_with_limits, encode_to_writer};
pub use crate::options::{ByteOrder, Options};
pub use crate::repr::{CompactInt, IntRepr, Tagged};
pub use crate::shape::{
    decode_fingerprint, encode_fingerprint, ShapeWriter, TypeTag, FINGERPRINT_LEN,
};
#[cfg(feature = "std")]
pub use crate::sink::IoSink;
pub use crate::sink::{Sink, SliceSink};

pub use fieldwire_derive::{Decode, Encode};
