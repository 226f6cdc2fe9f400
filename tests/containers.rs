use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};

use fieldwire::{
    decode, decode_into, encode_to_vec, BitSet, Decode, Encode, ErrorCode, Options, WireError,
};

const HOSTILE: [u8; 4] = [0xff, 0x01, 0x02, 0x03];

#[test]
fn oversized_length_is_rejected_up_front() {
    let expected = WireError::new(ErrorCode::ValueTooLarge, 0);
    assert_eq!(decode::<Vec<u8>>(&HOSTILE, Options::NONE).unwrap_err(), expected);
    assert_eq!(decode::<BTreeSet<u8>>(&HOSTILE, Options::NONE).unwrap_err(), expected);
    assert_eq!(decode::<HashSet<u8>>(&HOSTILE, Options::NONE).unwrap_err(), expected);
    assert_eq!(decode::<String>(&HOSTILE, Options::NONE).unwrap_err(), expected);
}

#[derive(Debug, Default, PartialEq, Encode, Decode)]
struct Link {
    next: Option<Box<Link>>,
    value: u64,
    label: String,
}

#[test]
fn records_led_by_a_recursive_field_still_bound_lengths() {
    assert_eq!(<Link as Decode>::MIN_WIRE_LEN, 1);
    // 2^24 - 1 elements declared, nothing behind the prefix.
    let err = decode::<Vec<Link>>(&[0xff, 0xff, 0xff, 0x07], Options::NONE).unwrap_err();
    assert_eq!(err, WireError::new(ErrorCode::ValueTooLarge, 0));

    let chain = vec![
        Link {
            next: Some(Box::new(Link::default())),
            value: 7,
            label: "x".into(),
        },
        Link::default(),
    ];
    let bytes = encode_to_vec(&chain, Options::NONE).unwrap();
    assert_eq!(decode::<Vec<Link>>(&bytes, Options::NONE).unwrap(), chain);
}

#[derive(Debug, Default, PartialEq, Encode, Decode)]
struct Padded {
    marker: (),
    value: u32,
}

#[test]
fn leading_empty_fields_do_not_zero_the_bound() {
    assert_eq!(<Padded as Decode>::MIN_WIRE_LEN, 1);
    let err = decode::<Vec<Padded>>(&[0x05, 0x01], Options::NONE).unwrap_err();
    assert_eq!(err, WireError::new(ErrorCode::ValueTooLarge, 0));
}

#[test]
fn unchecked_runs_out_of_bytes_instead() {
    let err = decode::<Vec<u8>>(&HOSTILE, Options::UNCHECKED).unwrap_err();
    assert_eq!(err, WireError::new(ErrorCode::MessageSize, 4));
    assert!(err.is_truncation());
}

#[test]
fn map_length_counts_both_halves() {
    // Two entries need at least four bytes; only three follow the prefix.
    let bytes = [0x02, 0x01, 0x00, 0x02];
    let err = decode::<BTreeMap<u8, u8>>(&bytes, Options::NONE).unwrap_err();
    assert_eq!(err, WireError::new(ErrorCode::ValueTooLarge, 0));
}

#[test]
fn sequences_roundtrip_under_every_layout() {
    let deque: VecDeque<i64> = [-1, 0, i64::MAX].into_iter().collect();
    let list: LinkedList<u16> = [9, 900].into_iter().collect();
    for opts in [
        Options::NONE,
        Options::BIG_ENDIAN,
        Options::FIXED_LENGTH_ENCODING,
        Options::FIXED_LENGTH_ENCODING | Options::BIG_ENDIAN,
    ] {
        let bytes = encode_to_vec(&deque, opts).unwrap();
        assert_eq!(decode::<VecDeque<i64>>(&bytes, opts).unwrap(), deque);
        let bytes = encode_to_vec(&list, opts).unwrap();
        assert_eq!(decode::<LinkedList<u16>>(&bytes, opts).unwrap(), list);
    }
}

#[test]
fn sequence_kinds_share_a_wire_form() {
    let vec = vec![1u32, 2, 3];
    let deque: VecDeque<u32> = vec.iter().copied().collect();
    assert_eq!(
        encode_to_vec(&vec, Options::NONE).unwrap(),
        encode_to_vec(&deque, Options::NONE).unwrap()
    );
    let bytes = encode_to_vec(&vec, Options::NONE).unwrap();
    let list: LinkedList<u32> = decode(&bytes, Options::NONE).unwrap();
    assert_eq!(list.into_iter().collect::<Vec<_>>(), vec);
}

#[test]
fn maps_roundtrip() {
    let mut ordered = BTreeMap::new();
    ordered.insert("one".to_string(), vec![1u8]);
    ordered.insert("two".to_string(), vec![2, 2]);
    let bytes = encode_to_vec(&ordered, Options::NONE).unwrap();
    assert_eq!(decode::<BTreeMap<String, Vec<u8>>>(&bytes, Options::NONE).unwrap(), ordered);

    let unordered: HashMap<u32, bool> = [(1, true), (70_000, false)].into_iter().collect();
    let bytes = encode_to_vec(&unordered, Options::BIG_ENDIAN).unwrap();
    assert_eq!(
        decode::<HashMap<u32, bool>>(&bytes, Options::BIG_ENDIAN).unwrap(),
        unordered
    );
}

#[test]
fn map_decode_replaces_existing_entries() {
    let bytes = encode_to_vec(&BTreeMap::from([(1u8, 10u8)]), Options::NONE).unwrap();
    let mut target = BTreeMap::from([(2u8, 20u8)]);
    decode_into(&mut target, &bytes, Options::NONE).unwrap();
    assert_eq!(target, BTreeMap::from([(1, 10)]));
}

#[test]
fn tuples_and_arrays_roundtrip() {
    let value = (1u8, -2i32, "three".to_string(), [4.0f32, 5.0], Some('6'));
    let bytes = encode_to_vec(&value, Options::FIXED_LENGTH_ENCODING).unwrap();
    let back: (u8, i32, String, [f32; 2], Option<char>) =
        decode(&bytes, Options::FIXED_LENGTH_ENCODING).unwrap();
    assert_eq!(back, value);
}

#[test]
fn bitset_roundtrip_and_width_check() {
    let mut flags = BitSet::<12>::new();
    flags.set(0, true);
    flags.set(11, true);
    let bytes = encode_to_vec(&flags, Options::NONE).unwrap();
    assert_eq!(bytes, vec![0x0c, 0x01, 0x08]);
    assert_eq!(decode::<BitSet<12>>(&bytes, Options::NONE).unwrap(), flags);

    let err = decode::<BitSet<16>>(&bytes, Options::NONE).unwrap_err();
    assert_eq!(err, WireError::new(ErrorCode::InvalidArgument, 0));
}

#[derive(Debug, Default, PartialEq, Encode, Decode)]
enum Shape {
    #[default]
    Empty,
    Circle(u32),
    Rect {
        w: u32,
        h: u32,
    },
}

#[test]
fn enum_writes_index_then_fields() {
    assert_eq!(encode_to_vec(&Shape::Empty, Options::NONE).unwrap(), vec![0x00]);
    assert_eq!(
        encode_to_vec(&Shape::Circle(7), Options::NONE).unwrap(),
        vec![0x01, 0x07]
    );
    let rect = Shape::Rect { w: 2, h: 300 };
    let bytes = encode_to_vec(&rect, Options::NONE).unwrap();
    assert_eq!(bytes, vec![0x02, 0x02, 0xac, 0x02]);
    assert_eq!(decode::<Shape>(&bytes, Options::NONE).unwrap(), rect);
}

#[test]
fn enum_index_out_of_range() {
    let mut target = Shape::Circle(1);
    let err = decode_into(&mut target, &[0x03], Options::NONE).unwrap_err();
    assert_eq!(err, WireError::new(ErrorCode::InvalidArgument, 0));
    assert_eq!(target, Shape::Circle(1));
}

#[test]
fn enum_index_is_fixed_width_when_requested() {
    let bytes = encode_to_vec(&Shape::Circle(7), Options::FIXED_LENGTH_ENCODING).unwrap();
    assert_eq!(bytes, vec![1, 0, 0, 0, 0, 0, 0, 0, 7, 0, 0, 0]);
}
