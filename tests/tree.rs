use fieldwire::{
    decode, decode_with_limits, encode_to_vec, Decode, DecodeLimits, Encode, ErrorCode, Options,
};

#[derive(Debug, Default, PartialEq, Encode, Decode)]
struct Node {
    value: i32,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

fn leaf(value: i32) -> Option<Box<Node>> {
    Some(Box::new(Node {
        value,
        left: None,
        right: None,
    }))
}

fn sample() -> Node {
    Node {
        value: 5,
        left: Some(Box::new(Node {
            value: 3,
            left: leaf(1),
            right: leaf(2),
        })),
        right: leaf(4),
    }
}

const SAMPLE_BYTES: [u8; 15] = [
    0x05, 0x01, 0x03, 0x01, 0x01, 0x00, 0x00, 0x01, 0x02, 0x00, 0x00, 0x01, 0x04, 0x00, 0x00,
];

#[test]
fn tree_encodes_preorder() {
    assert_eq!(encode_to_vec(&sample(), Options::NONE).unwrap(), SAMPLE_BYTES);
}

#[test]
fn tree_decodes() {
    assert_eq!(decode::<Node>(&SAMPLE_BYTES, Options::NONE).unwrap(), sample());
}

#[test]
fn tree_roundtrips_with_version_and_checksum() {
    let opts = Options::WITH_VERSION | Options::WITH_CHECKSUM | Options::BIG_ENDIAN;
    let bytes = encode_to_vec(&sample(), opts).unwrap();
    // Five full-width values and ten presence bytes, between fingerprint and trailer.
    assert_eq!(bytes.len(), 4 + 5 * 4 + 10 + 4);
    assert_eq!(decode::<Node>(&bytes, opts).unwrap(), sample());
}

fn chain(depth: usize) -> Node {
    let mut node = Node::default();
    for value in 0..depth {
        node = Node {
            value: i32::try_from(value).unwrap(),
            left: Some(Box::new(node)),
            right: None,
        };
    }
    node
}

#[test]
fn deep_chain_hits_depth_limit() {
    let bytes = encode_to_vec(&chain(64), Options::NONE).unwrap();
    let limits = DecodeLimits {
        max_depth: 16,
        ..DecodeLimits::default()
    };
    let err = decode_with_limits::<Node>(&bytes, Options::NONE, limits).unwrap_err();
    assert_eq!(err.code, ErrorCode::DepthLimitExceeded);

    let relaxed = DecodeLimits {
        max_depth: 1024,
        ..DecodeLimits::default()
    };
    assert_eq!(
        decode_with_limits::<Node>(&bytes, Options::NONE, relaxed).unwrap(),
        chain(64)
    );
}

#[test]
fn truncated_tree_stops_cleanly() {
    // Decoding stops without error at the end of input between fields.
    let partial = decode::<Node>(&SAMPLE_BYTES[..5], Options::NONE).unwrap();
    assert_eq!(partial.value, 5);
    assert_eq!(partial.right, None);

    // A presence flag promising a subtree that never arrives stops cleanly too, leaving the
    // subtree at its defaults.
    let node = decode::<Node>(&[0x05, 0x01], Options::NONE).unwrap();
    assert_eq!(node.left, Some(Box::default()));
}

#[test]
fn bad_presence_flag() {
    let err = decode::<Node>(&[0x05, 0x02], Options::NONE).unwrap_err();
    assert_eq!(err.code, ErrorCode::IllegalByteSequence);
    assert_eq!(err.offset, 1);
}
