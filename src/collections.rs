use alloc::collections::{BTreeMap, BTreeSet, LinkedList, VecDeque};
use alloc::vec::Vec;
#[cfg(feature = "std")]
use core::hash::{BuildHasher, Hash};
#[cfg(feature = "std")]
use std::collections::{HashMap, HashSet};

use crate::alloc_util::try_vec_with_capacity;
use crate::shape::{ShapeWriter, TypeTag};
use crate::sink::Sink;
use crate::{Decode, Decoder, Encode, Encoder, WireError};

fn encode_seq<'a, T, S, I>(enc: &mut Encoder<S>, len: usize, items: I) -> Result<(), WireError>
where
    T: Encode + 'a,
    S: Sink,
    I: IntoIterator<Item = &'a T>,
{
    enc.write_len(len)?;
    for item in items {
        item.encode(enc)?;
    }
    Ok(())
}

fn encode_entries<'a, K, V, S, I>(
    enc: &mut Encoder<S>,
    len: usize,
    entries: I,
) -> Result<(), WireError>
where
    K: Encode + 'a,
    V: Encode + 'a,
    S: Sink,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    enc.write_len(len)?;
    for (key, value) in entries {
        key.encode(enc)?;
        value.encode(enc)?;
    }
    Ok(())
}

/// Read a length prefix and `len` fresh elements, handing each to `push`.
///
/// The target is only replaced by the caller once every element decoded, so a failure leaves
/// it untouched.
fn decode_elements<T, F>(dec: &mut Decoder<'_>, mut push: F) -> Result<(), WireError>
where
    T: Decode + Default,
    F: FnMut(T),
{
    let len = dec.read_container_len(T::MIN_WIRE_LEN)?;
    dec.nested(|dec| {
        for _ in 0..len {
            let mut item = T::default();
            item.decode_in_place(dec)?;
            push(item);
        }
        Ok(())
    })
}

fn decode_entries<K, V, F>(dec: &mut Decoder<'_>, mut insert: F) -> Result<(), WireError>
where
    K: Decode + Default,
    V: Decode + Default,
    F: FnMut(K, V),
{
    let min = K::MIN_WIRE_LEN.saturating_add(V::MIN_WIRE_LEN);
    let len = dec.read_container_len(min)?;
    dec.nested(|dec| {
        for _ in 0..len {
            let mut key = K::default();
            key.decode_in_place(dec)?;
            let mut value = V::default();
            value.decode_in_place(dec)?;
            insert(key, value);
        }
        Ok(())
    })
}

impl<T: Encode> Encode for [T] {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Sequence);
        T::describe(shape);
    }

    fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
        encode_seq(enc, self.len(), self)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn describe(shape: &mut ShapeWriter) {
        <[T]>::describe(shape);
    }

    fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
        encode_seq(enc, self.len(), self)
    }
}

impl<T: Decode + Default> Decode for Vec<T> {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Sequence);
        T::describe(shape);
    }

    fn decode_in_place(&mut self, dec: &mut Decoder<'_>) -> Result<(), WireError> {
        let start = dec.position();
        let len = dec.read_container_len(T::MIN_WIRE_LEN)?;
        let mut out = try_vec_with_capacity(dec.capacity_hint(len, T::MIN_WIRE_LEN), start)?;
        dec.nested(|dec| {
            for _ in 0..len {
                let mut item = T::default();
                item.decode_in_place(dec)?;
                out.push(item);
            }
            Ok(())
        })?;
        *self = out;
        Ok(())
    }
}

impl<T: Encode> Encode for VecDeque<T> {
    fn describe(shape: &mut ShapeWriter) {
        <[T]>::describe(shape);
    }

    fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
        encode_seq(enc, self.len(), self)
    }
}

impl<T: Decode + Default> Decode for VecDeque<T> {
    fn describe(shape: &mut ShapeWriter) {
        <Vec<T> as Decode>::describe(shape);
    }

    fn decode_in_place(&mut self, dec: &mut Decoder<'_>) -> Result<(), WireError> {
        let mut items = Vec::<T>::new();
        items.decode_in_place(dec)?;
        *self = Self::from(items);
        Ok(())
    }
}

impl<T: Encode> Encode for LinkedList<T> {
    fn describe(shape: &mut ShapeWriter) {
        <[T]>::describe(shape);
    }

    fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
        encode_seq(enc, self.len(), self)
    }
}

impl<T: Decode + Default> Decode for LinkedList<T> {
    fn describe(shape: &mut ShapeWriter) {
        <Vec<T> as Decode>::describe(shape);
    }

    fn decode_in_place(&mut self, dec: &mut Decoder<'_>) -> Result<(), WireError> {
        let mut out = Self::new();
        decode_elements(dec, |item| out.push_back(item))?;
        *self = out;
        Ok(())
    }
}

/// Fixed arrays carry no length prefix.
impl<T: Encode, const N: usize> Encode for [T; N] {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::FixedArray);
        shape.count(N);
        T::describe(shape);
    }

    fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
        for item in self {
            item.encode(enc)?;
        }
        Ok(())
    }
}

impl<T: Decode + Default, const N: usize> Decode for [T; N] {
    const MIN_WIRE_LEN: usize = T::MIN_WIRE_LEN.saturating_mul(N);

    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::FixedArray);
        shape.count(N);
        T::describe(shape);
    }

    fn decode_in_place(&mut self, dec: &mut Decoder<'_>) -> Result<(), WireError> {
        let mut out: [T; N] = core::array::from_fn(|_| T::default());
        dec.nested(|dec| {
            for item in &mut out {
                item.decode_in_place(dec)?;
            }
            Ok(())
        })?;
        *self = out;
        Ok(())
    }
}

impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Map);
        K::describe(shape);
        V::describe(shape);
    }

    fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
        encode_entries(enc, self.len(), self)
    }
}

impl<K: Decode + Default + Ord, V: Decode + Default> Decode for BTreeMap<K, V> {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Map);
        K::describe(shape);
        V::describe(shape);
    }

    fn decode_in_place(&mut self, dec: &mut Decoder<'_>) -> Result<(), WireError> {
        let mut out = Self::new();
        decode_entries(dec, |key, value| {
            out.insert(key, value);
        })?;
        *self = out;
        Ok(())
    }
}

impl<T: Encode> Encode for BTreeSet<T> {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Set);
        T::describe(shape);
    }

    fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
        encode_seq(enc, self.len(), self)
    }
}

/// Duplicate elements on the wire collapse into one.
impl<T: Decode + Default + Ord> Decode for BTreeSet<T> {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Set);
        T::describe(shape);
    }

    fn decode_in_place(&mut self, dec: &mut Decoder<'_>) -> Result<(), WireError> {
        let mut out = Self::new();
        decode_elements(dec, |item| {
            out.insert(item);
        })?;
        *self = out;
        Ok(())
    }
}

/// Entries are written in the map's iteration order, which is not stable across processes.
#[cfg(feature = "std")]
impl<K: Encode, V: Encode, H> Encode for HashMap<K, V, H> {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::UnorderedMap);
        K::describe(shape);
        V::describe(shape);
    }

    fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
        encode_entries(enc, self.len(), self)
    }
}

#[cfg(feature = "std")]
impl<K, V, H> Decode for HashMap<K, V, H>
where
    K: Decode + Default + Eq + Hash,
    V: Decode + Default,
    H: BuildHasher + Default,
{
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::UnorderedMap);
        K::describe(shape);
        V::describe(shape);
    }

    fn decode_in_place(&mut self, dec: &mut Decoder<'_>) -> Result<(), WireError> {
        let mut out = Self::default();
        decode_entries(dec, |key, value| {
            out.insert(key, value);
        })?;
        *self = out;
        Ok(())
    }
}

#[cfg(feature = "std")]
impl<T: Encode, H> Encode for HashSet<T, H> {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Set);
        T::describe(shape);
    }

    fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
        encode_seq(enc, self.len(), self)
    }
}

#[cfg(feature = "std")]
impl<T, H> Decode for HashSet<T, H>
where
    T: Decode + Default + Eq + Hash,
    H: BuildHasher + Default,
{
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Set);
        T::describe(shape);
    }

    fn decode_in_place(&mut self, dec: &mut Decoder<'_>) -> Result<(), WireError> {
        let mut out = Self::default();
        decode_elements(dec, |item| {
            out.insert(item);
        })?;
        *self = out;
        Ok(())
    }
}

impl<A: Encode, B: Encode> Encode for (A, B) {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Pair);
        A::describe(shape);
        B::describe(shape);
    }

    fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
        self.0.encode(enc)?;
        self.1.encode(enc)
    }
}

impl<A: Decode, B: Decode> Decode for (A, B) {
    const MIN_WIRE_LEN: usize = A::MIN_WIRE_LEN.saturating_add(B::MIN_WIRE_LEN);

    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Pair);
        A::describe(shape);
        B::describe(shape);
    }

    fn decode_in_place(&mut self, dec: &mut Decoder<'_>) -> Result<(), WireError> {
        self.0.decode_in_place(dec)?;
        self.1.decode_in_place(dec)
    }
}

macro_rules! impl_tuple {
    ($len:expr => $($name:ident $idx:tt),+) => {
        impl<$($name: Encode),+> Encode for ($($name,)+) {
            fn describe(shape: &mut ShapeWriter) {
                shape.tag(TypeTag::Tuple);
                shape.count($len);
                $($name::describe(shape);)+
            }

            fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
                $(self.$idx.encode(enc)?;)+
                Ok(())
            }
        }

        impl<$($name: Decode),+> Decode for ($($name,)+) {
            const MIN_WIRE_LEN: usize = 0usize $(.saturating_add($name::MIN_WIRE_LEN))+;

            fn describe(shape: &mut ShapeWriter) {
                shape.tag(TypeTag::Tuple);
                shape.count($len);
                $($name::describe(shape);)+
            }

            fn decode_in_place(&mut self, dec: &mut Decoder<'_>) -> Result<(), WireError> {
                $(self.$idx.decode_in_place(dec)?;)+
                Ok(())
            }
        }
    };
}

impl_tuple!(1 => A 0);
impl_tuple!(3 => A 0, B 1, C 2);
impl_tuple!(4 => A 0, B 1, C 2, D 3);
impl_tuple!(5 => A 0, B 1, C 2, D 3, E 4);
impl_tuple!(6 => A 0, B 1, C 2, D 3, E 4, F 5);
impl_tuple!(7 => A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_tuple!(8 => A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
impl_tuple!(9 => A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8);
impl_tuple!(10 => A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9);
impl_tuple!(11 => A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10);
impl_tuple!(12 => A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DecodeLimits, ErrorCode, Options};

    fn enc<T: Encode + ?Sized>(value: &T) -> Vec<u8> {
        let mut out = Vec::new();
        let mut e = Encoder::new(&mut out, Options::NONE);
        value.encode(&mut e).unwrap();
        e.finish().unwrap();
        out
    }

    fn dec_into<T: Decode>(target: &mut T, bytes: &[u8]) -> Result<(), WireError> {
        let mut d = Decoder::new(bytes, Options::NONE, DecodeLimits::default())?;
        target.decode_in_place(&mut d)
    }

    #[test]
    fn failed_container_keeps_previous_value() {
        let mut v = vec![9u16, 9];
        let err = dec_into(&mut v, &[0x03, 0x01, 0x02]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueTooLarge);
        assert_eq!(v, [9, 9]);
    }

    #[test]
    fn set_collapses_duplicates() {
        let mut set = BTreeSet::<u8>::new();
        dec_into(&mut set, &[0x03, 0x01, 0x01, 0x02]).unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), [1, 2]);
    }

    #[test]
    fn fixed_arrays_have_no_prefix() {
        assert_eq!(enc(&[1u8, 2, 3]), [1, 2, 3]);
        assert_eq!(<[u32; 3] as Decode>::MIN_WIRE_LEN, 3);
        assert_eq!(<[f64; 2] as Decode>::MIN_WIRE_LEN, 16);
    }

    #[test]
    fn slices_and_vecs_share_a_shape() {
        let v = vec![(1u8, -2i32)];
        assert_eq!(enc(&v), enc(v.as_slice()));
        assert_eq!(enc(&v), [0x01, 0x01, 0x82]);
    }

    #[test]
    fn map_entries_are_key_then_value() {
        let mut m = BTreeMap::new();
        m.insert(2u8, true);
        m.insert(1u8, false);
        let bytes = enc(&m);
        assert_eq!(bytes, [0x02, 0x01, 0x00, 0x02, 0x01]);
        let mut back = BTreeMap::new();
        dec_into(&mut back, &bytes).unwrap();
        assert_eq!(back, m);
    }
}
