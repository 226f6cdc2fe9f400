use core::ops::{BitOr, BitOrAssign};

/// Byte order used for every fixed-width value on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Least significant byte first (the default).
    Little,
    /// Most significant byte first.
    Big,
}

/// Encode/decode policy flags, resolved once per call and passed by value.
///
/// Flags compose with `|`:
///
/// ```
/// use fieldwire::Options;
///
/// let opts = Options::BIG_ENDIAN | Options::WITH_CHECKSUM;
/// assert!(opts.contains(Options::WITH_CHECKSUM));
/// assert!(!opts.contains(Options::WITH_VERSION));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Options(u8);

impl Options {
    /// Variable-length little-endian integers, no version, no checksum, bounds-checked.
    pub const NONE: Self = Self(0);
    /// Write fixed-width values most significant byte first.
    ///
    /// Integers and lengths are then written at full width, as under `FIXED_LENGTH_ENCODING`.
    pub const BIG_ENDIAN: Self = Self(1);
    /// Write integers at their full declared width instead of as varints.
    pub const FIXED_LENGTH_ENCODING: Self = Self(2);
    /// Prefix the payload with a 4-byte structural fingerprint of the record type.
    pub const WITH_VERSION: Self = Self(4);
    /// Append a 4-byte CRC-32 of everything written before it.
    pub const WITH_CHECKSUM: Self = Self(8);
    /// Skip the declared-length versus remaining-input pre-checks on decode.
    ///
    /// Reads stay memory safe; a lying length prefix surfaces later as `MessageSize` instead of
    /// `ValueTooLarge`.
    pub const UNCHECKED: Self = Self(16);

    const ALL: u8 = 0x1f;

    /// Raw flag bits.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Build options from raw bits, rejecting unknown flags.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::ALL != 0 {
            return None;
        }
        Some(Self(bits))
    }

    /// Returns true iff every flag in `other` is set in `self`.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union of both flag sets.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Byte order for fixed-width values.
    #[inline]
    #[must_use]
    pub const fn byte_order(self) -> ByteOrder {
        if self.contains(Self::BIG_ENDIAN) {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        }
    }

    /// Returns true iff integers and lengths are written at full width.
    ///
    /// Varints have no byte order, so `BIG_ENDIAN` turns them off as well.
    #[inline]
    #[must_use]
    pub const fn fixed_length(self) -> bool {
        self.0 & (Self::BIG_ENDIAN.0 | Self::FIXED_LENGTH_ENCODING.0) != 0
    }

    /// Returns true iff decode pre-checks are enabled.
    #[inline]
    #[must_use]
    pub const fn checked(self) -> bool {
        !self.contains(Self::UNCHECKED)
    }
}

impl BitOr for Options {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for Options {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}
