// Property-based roundtrips across every option combination.
//
// Sizes stay small to keep CI fast.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use std::collections::BTreeMap;

use fieldwire::varint::{decode_signed, decode_unsigned, encode_signed, encode_unsigned};
use fieldwire::{
    decode, decode_into, encode_to_vec, BitSet, Decode, DecodeLimits, Encode, Options, Tagged,
};

#[derive(Debug, Clone, Default, PartialEq, Encode, Decode)]
struct Sample {
    flag: bool,
    small: u8,
    signed: i64,
    unsigned: u32,
    ratio: f64,
    letter: char,
    name: String,
    tags: Vec<u16>,
    table: BTreeMap<String, i32>,
    maybe: Option<Box<(i16, String)>>,
    compact: Tagged<i64>,
    bits: BitSet<11>,
}

fn arb_bits() -> impl Strategy<Value = BitSet<11>> {
    proptest::collection::vec(any::<bool>(), 11).prop_map(|v| v.into_iter().collect())
}

fn arb_sample() -> impl Strategy<Value = Sample> {
    (
        (any::<bool>(), any::<u8>(), any::<i64>(), any::<u32>()),
        // NaN never compares equal, so keep to finite values.
        (-1.0e12f64..1.0e12, any::<char>(), "[a-z]{0,16}"),
        (
            proptest::collection::vec(any::<u16>(), 0..16),
            proptest::collection::btree_map("[a-z]{0,4}", any::<i32>(), 0..8),
            proptest::option::of((any::<i16>(), "[a-z]{0,8}")),
        ),
        (any::<i64>(), arb_bits()),
    )
        .prop_map(
            |((flag, small, signed, unsigned), (ratio, letter, name), (tags, table, maybe), (c, bits))| {
                Sample {
                    flag,
                    small,
                    signed,
                    unsigned,
                    ratio,
                    letter,
                    name,
                    tags,
                    table,
                    maybe: maybe.map(Box::new),
                    compact: Tagged(c),
                    bits,
                }
            },
        )
}

fn arb_options() -> impl Strategy<Value = Options> {
    (0u8..32).prop_map(|bits| Options::from_bits(bits).unwrap())
}

proptest! {
    #[test]
    fn record_roundtrip(value in arb_sample(), opts in arb_options()) {
        let bytes = encode_to_vec(&value, opts).unwrap();
        let mut back = Sample::default();
        let consumed = decode_into(&mut back, &bytes, opts).unwrap();
        prop_assert_eq!(consumed, bytes.len());
        prop_assert_eq!(back, value);
    }

    #[test]
    fn unsigned_varint_roundtrip(v in any::<u64>()) {
        let mut buf = [0u8; 10];
        let n = encode_unsigned(v, &mut buf);
        prop_assert_eq!(n, fieldwire::varint::unsigned_len(v));
        let mut pos = 0;
        prop_assert_eq!(decode_unsigned(&buf[..n], &mut pos).unwrap(), v);
        prop_assert_eq!(pos, n);
    }

    #[test]
    fn signed_varint_roundtrip(v in any::<i64>()) {
        let mut buf = [0u8; 10];
        let n = encode_signed(v, &mut buf);
        prop_assert_eq!(n, fieldwire::varint::signed_len(v));
        let mut pos = 0;
        prop_assert_eq!(decode_signed(&buf[..n], &mut pos).unwrap(), v);
        prop_assert_eq!(pos, n);
    }

    #[test]
    fn tagged_never_wider_than_varint_plus_tag(v in any::<u64>()) {
        let tagged = encode_to_vec(&Tagged(v), Options::NONE).unwrap();
        prop_assert!(tagged.len() <= 9);
        prop_assert_eq!(decode::<Tagged<u64>>(&tagged, Options::NONE).unwrap().0, v);
    }

    #[test]
    fn prefix_decodes_never_panic(value in arb_sample(), opts in arb_options(), cut in 0usize..256) {
        let bytes = encode_to_vec(&value, opts).unwrap();
        let cut = cut.min(bytes.len());
        let _ = decode::<Sample>(&bytes[..cut], opts);
    }

    #[test]
    fn arbitrary_bytes_never_panic(
        bytes in proptest::collection::vec(any::<u8>(), 0..256),
        opts in arb_options(),
    ) {
        let limits = DecodeLimits::for_bytes(bytes.len());
        let _ = fieldwire::decode_with_limits::<Sample>(&bytes, opts, limits);
        let _ = fieldwire::decode_with_limits::<Vec<()>>(&bytes, opts, limits);
        let _ = fieldwire::decode_with_limits::<BTreeMap<u8, Vec<String>>>(&bytes, opts, limits);
    }
}
