use crate::ByteOrder;

/// A primitive with a fixed-width wire form whose byte order follows [`ByteOrder`].
///
/// Implemented for the 16/32/64-bit integers and both float widths. The wire order never
/// depends on the host: a value written on a big-endian machine decodes identically on a
/// little-endian one.
pub trait FixedWidth: Copy {
    /// Byte array holding the encoded value.
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Default;

    /// Encoded width in bytes.
    const WIDTH: usize;

    /// Encode in the requested order.
    fn to_wire(self, order: ByteOrder) -> Self::Bytes;

    /// Decode from the requested order.
    fn from_wire(bytes: Self::Bytes, order: ByteOrder) -> Self;
}

macro_rules! impl_fixed_width {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FixedWidth for $ty {
                type Bytes = [u8; core::mem::size_of::<$ty>()];

                const WIDTH: usize = core::mem::size_of::<$ty>();

                #[inline]
                fn to_wire(self, order: ByteOrder) -> Self::Bytes {
                    match order {
                        ByteOrder::Little => self.to_le_bytes(),
                        ByteOrder::Big => self.to_be_bytes(),
                    }
                }

                #[inline]
                fn from_wire(bytes: Self::Bytes, order: ByteOrder) -> Self {
                    match order {
                        ByteOrder::Little => Self::from_le_bytes(bytes),
                        ByteOrder::Big => Self::from_be_bytes(bytes),
                    }
                }
            }
        )*
    };
}

impl_fixed_width!(u16, u32, u64, i16, i32, i64, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn big_endian_reverses_little() {
        assert_eq!(12345u16.to_wire(ByteOrder::Little), [0x39, 0x30]);
        assert_eq!(12345u16.to_wire(ByteOrder::Big), [0x30, 0x39]);
        assert_eq!(
            0x0102_0304u32.to_wire(ByteOrder::Big),
            [0x01, 0x02, 0x03, 0x04]
        );
    }

    #[test]
    fn floats_keep_bits() {
        let v = 3.14f32;
        let bytes = v.to_wire(ByteOrder::Big);
        assert_eq!(f32::from_wire(bytes, ByteOrder::Big).to_bits(), v.to_bits());
        let nan = f64::from_bits(0x7ff8_0000_0000_0001);
        let bytes = nan.to_wire(ByteOrder::Little);
        assert_eq!(
            f64::from_wire(bytes, ByteOrder::Little).to_bits(),
            nan.to_bits()
        );
    }
}
