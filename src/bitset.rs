use alloc::vec;
use alloc::vec::Vec;

use crate::shape::{ShapeWriter, TypeTag};
use crate::sink::Sink;
use crate::{Decode, Decoder, Encode, Encoder, ErrorCode, WireError};

/// Fixed-size bit vector of `N` bits.
///
/// On the wire: the bit count, then `ceil(N / 8)` bytes with bit `i` at byte `i / 8`,
/// bit `i % 8`. Decoding into a set of a different size is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitSet<const N: usize> {
    bytes: Vec<u8>,
}

impl<const N: usize> BitSet<N> {
    const BYTES: usize = N.div_ceil(8);

    /// All bits clear.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bytes: vec![0; Self::BYTES],
        }
    }

    /// Number of bits.
    #[must_use]
    pub const fn len(&self) -> usize {
        N
    }

    /// Returns true iff `N` is zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Bit `index`, or `None` past the end.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= N {
            return None;
        }
        Some(self.bytes[index / 8] & (1 << (index % 8)) != 0)
    }

    /// Set bit `index` to `value`. Returns `false` (and changes nothing) past the end.
    pub fn set(&mut self, index: usize, value: bool) -> bool {
        if index >= N {
            return false;
        }
        let mask = 1u8 << (index % 8);
        if value {
            self.bytes[index / 8] |= mask;
        } else {
            self.bytes[index / 8] &= !mask;
        }
        true
    }

    /// Number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Iterate over all `N` bits in index order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..N).map(move |i| self.bytes[i / 8] & (1 << (i % 8)) != 0)
    }

    /// Packed bytes, low bit first.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    // Bits past `N` in the final byte never survive a decode.
    fn mask_padding(&mut self) {
        let used = N % 8;
        if used != 0 {
            if let Some(last) = self.bytes.last_mut() {
                *last &= (1u8 << used) - 1;
            }
        }
    }
}

impl<const N: usize> Default for BitSet<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FromIterator<bool> for BitSet<N> {
    /// Bits beyond `N` are ignored.
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut out = Self::new();
        for (i, bit) in iter.into_iter().take(N).enumerate() {
            out.set(i, bit);
        }
        out
    }
}

impl<const N: usize> Encode for BitSet<N> {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Bitset);
        shape.count(N);
    }

    fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
        enc.write_len(N)?;
        enc.write_bytes(&self.bytes)
    }
}

impl<const N: usize> Decode for BitSet<N> {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Bitset);
        shape.count(N);
    }

    fn decode_in_place(&mut self, dec: &mut Decoder<'_>) -> Result<(), WireError> {
        let off = dec.position();
        let bits = dec.read_len()?;
        if bits != N {
            return Err(WireError::new(ErrorCode::InvalidArgument, off));
        }
        if dec.options().checked() && Self::BYTES > dec.remaining() {
            return Err(dec.error(ErrorCode::ValueTooLarge));
        }
        let body = dec.read_exact(Self::BYTES)?;
        let mut out = Self {
            bytes: body.to_vec(),
        };
        out.mask_padding();
        *self = out;
        Ok(())
    }
}
