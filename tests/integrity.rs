use fieldwire::{
    checksum::crc32, decode, decode_fingerprint, decode_into, encode_fingerprint, encode_to_vec,
    Decode, Encode, ErrorCode, Options, WireError,
};

#[derive(Debug, Default, PartialEq, Encode, Decode)]
struct Value {
    value: i32,
}

#[derive(Debug, Default, PartialEq, Encode, Decode)]
struct NarrowValue {
    value: u16,
}

#[derive(Debug, Default, PartialEq, Encode, Decode)]
struct Triple {
    a: i32,
    b: i32,
    c: i32,
}

#[test]
fn checksum_trailer_layout() {
    let bytes = encode_to_vec(&Value { value: 5 }, Options::WITH_CHECKSUM).unwrap();
    assert_eq!(bytes.len(), 5);
    assert_eq!(bytes[0], 0x05);
    assert_eq!(bytes[1..], crc32(&[0x05]).to_le_bytes());

    let be = encode_to_vec(&Value { value: 5 }, Options::WITH_CHECKSUM | Options::BIG_ENDIAN)
        .unwrap();
    assert_eq!(be[..4], [0x00, 0x00, 0x00, 0x05]);
    assert_eq!(be[4..], crc32(&[0x00, 0x00, 0x00, 0x05]).to_be_bytes());
}

#[test]
fn checksum_detects_removed_byte() {
    let bytes = encode_to_vec(&Value { value: 5 }, Options::WITH_CHECKSUM).unwrap();
    let err = decode::<Value>(&bytes[..bytes.len() - 1], Options::WITH_CHECKSUM).unwrap_err();
    assert_eq!(err.code, ErrorCode::BadMessage);
}

#[test]
fn checksum_detects_flipped_bit() {
    let mut bytes = encode_to_vec(&Value { value: 5 }, Options::WITH_CHECKSUM).unwrap();
    bytes[0] ^= 0x01;
    let mut target = Value { value: 77 };
    let err = decode_into(&mut target, &bytes, Options::WITH_CHECKSUM).unwrap_err();
    assert_eq!(err, WireError::new(ErrorCode::BadMessage, 1));
    assert_eq!(target.value, 77);
}

#[test]
fn checksum_needs_four_bytes() {
    let bytes = encode_to_vec(&Value { value: 5 }, Options::WITH_CHECKSUM).unwrap();
    let err = decode::<Value>(&bytes[..3], Options::WITH_CHECKSUM).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidArgument);
    let err = decode::<Value>(&[], Options::WITH_CHECKSUM).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidArgument);
}

#[test]
fn checksum_roundtrip_reports_full_length() {
    let bytes = encode_to_vec(&Value { value: -9 }, Options::WITH_CHECKSUM).unwrap();
    let mut out = Value::default();
    let consumed = decode_into(&mut out, &bytes, Options::WITH_CHECKSUM).unwrap();
    assert_eq!(out.value, -9);
    assert_eq!(consumed, bytes.len());
}

#[test]
fn version_prefix_is_the_fingerprint() {
    let bytes = encode_to_vec(&Value { value: 5 }, Options::WITH_VERSION).unwrap();
    assert_eq!(bytes.len(), 5);
    assert_eq!(bytes[..4], encode_fingerprint::<Value>().to_le_bytes());
    assert_eq!(encode_fingerprint::<Value>(), decode_fingerprint::<Value>());
    assert_eq!(decode::<Value>(&bytes, Options::WITH_VERSION).unwrap().value, 5);
}

#[test]
fn version_mismatch_fails_before_any_field() {
    let bytes = encode_to_vec(&Value { value: 5 }, Options::WITH_VERSION).unwrap();

    let mut narrow = NarrowValue { value: 11 };
    let err = decode_into(&mut narrow, &bytes, Options::WITH_VERSION).unwrap_err();
    assert_eq!(err, WireError::new(ErrorCode::InvalidArgument, 0));
    assert_eq!(narrow.value, 11);

    let mut triple = Triple { a: 1, b: 2, c: 3 };
    let err = decode_into(&mut triple, &bytes, Options::WITH_VERSION).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidArgument);
    assert_eq!(triple, Triple { a: 1, b: 2, c: 3 });
}

#[test]
fn version_distinguishes_element_types() {
    let bytes = encode_to_vec(&vec![1i32, 2], Options::WITH_VERSION).unwrap();
    let err = decode::<Vec<f32>>(&bytes, Options::WITH_VERSION).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidArgument);
    assert_eq!(
        decode::<Vec<i32>>(&bytes, Options::WITH_VERSION).unwrap(),
        vec![1, 2]
    );
}

#[test]
fn version_needs_four_bytes() {
    let err = decode::<Value>(&[0x01, 0x02], Options::WITH_VERSION).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidArgument);
}

#[test]
fn version_then_fields_then_checksum() {
    let opts = Options::WITH_VERSION | Options::WITH_CHECKSUM;
    let bytes = encode_to_vec(&Value { value: 5 }, opts).unwrap();
    assert_eq!(bytes.len(), 9);
    assert_eq!(bytes[..4], encode_fingerprint::<Value>().to_le_bytes());
    assert_eq!(bytes[4], 0x05);
    assert_eq!(bytes[5..], crc32(&bytes[..5]).to_le_bytes());
    assert_eq!(decode::<Value>(&bytes, opts).unwrap().value, 5);

    // Checksum is verified first, so a bad trailer wins over a bad fingerprint.
    let mut corrupted = bytes.clone();
    corrupted[0] ^= 0xff;
    assert_eq!(
        decode::<Value>(&corrupted, opts).unwrap_err().code,
        ErrorCode::BadMessage
    );
}

#[derive(Debug, Default, PartialEq, Encode, Decode)]
struct Node {
    value: i32,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

#[derive(Debug, Default, PartialEq, Encode, Decode)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Debug, Default, PartialEq, Encode, Decode)]
struct Coord {
    x: i32,
    y: i32,
}

#[derive(Debug, Default, PartialEq, Encode, Decode)]
struct Segment {
    from: Point,
    to: Point,
}

#[derive(Debug, Default, PartialEq, Encode, Decode)]
struct MixedSegment {
    from: Point,
    to: Coord,
}

#[test]
fn repeated_sibling_records_are_not_back_references() {
    assert_eq!(encode_fingerprint::<Segment>(), encode_fingerprint::<MixedSegment>());

    let seg = Segment {
        from: Point { x: 1, y: -2 },
        to: Point { x: 3, y: 4 },
    };
    let bytes = encode_to_vec(&seg, Options::WITH_VERSION).unwrap();
    let mixed = decode::<MixedSegment>(&bytes, Options::WITH_VERSION).unwrap();
    assert_eq!(mixed.from, seg.from);
    assert_eq!(mixed.to, Coord { x: 3, y: 4 });
}

#[test]
fn recursive_types_have_finite_fingerprints() {
    let a = encode_fingerprint::<Node>();
    assert_eq!(a, decode_fingerprint::<Node>());
    assert_ne!(a, encode_fingerprint::<Value>());
}
