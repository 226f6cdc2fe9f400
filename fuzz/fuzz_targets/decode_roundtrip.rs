#![no_main]

use libfuzzer_sys::fuzz_target;

use fieldwire::{decode_into, encode_to_vec, BitSet, Decode, Encode, Options, Tagged};

#[derive(Debug, Default, PartialEq, Encode, Decode)]
struct Node {
    value: Tagged<i32>,
    label: String,
    flags: BitSet<9>,
    children: Vec<Node>,
}

fuzz_target!(|data: &[u8]| {
    let Some((&opts, body)) = data.split_first() else {
        return;
    };
    let Some(opts) = Options::from_bits(opts & 0x1f) else {
        return;
    };
    let mut node = Node::default();
    // Whatever decodes must survive a re-encode unchanged.
    if decode_into(&mut node, body, opts).is_ok() {
        let out = encode_to_vec(&node, opts).expect("re-encode");
        let mut again = Node::default();
        let n = decode_into(&mut again, &out, opts).expect("decode re-encoded");
        assert_eq!(n, out.len());
        assert_eq!(again, node);
    }
});
