//! Property-based coverage of the recursive `ValType` decoder, generating
//! depth-bounded encoded trees and checking the decoder recovers the same
//! shape without ever exceeding the generated depth. Placed alongside the
//! teacher's other `tests/*.rs` integration files rather than inlined, since
//! it exercises the encode-then-decode round trip across many inputs rather
//! than one worked example per test.

use proptest::prelude::*;
use wrt_decoder::component::valtype::{decode_valtype, ValType, VariantCase};
use wrt_decoder::reader::Reader;

const MAX_DEPTH: u32 = 4;

fn arb_valtype() -> impl Strategy<Value = (Vec<u8>, u32)> {
    arb_valtype_at_depth(MAX_DEPTH)
}

/// Build `(encoded_bytes, tree_depth)` pairs, recursing at most `depth`
/// levels so generation always terminates.
fn arb_valtype_at_depth(depth: u32) -> BoxedStrategy<(Vec<u8>, u32)> {
    let leaf = prop_oneof![
        Just((vec![0x7F], 0)), // bool
        Just((vec![0x79], 0)), // u32
        Just((vec![0x73], 0)), // string
        Just((vec![0x7D], 0)), // u8
    ];

    if depth == 0 {
        return leaf.boxed();
    }

    let inner = arb_valtype_at_depth(depth - 1);
    leaf.prop_union(
        inner
            .clone()
            .prop_map(|(bytes, d)| {
                let mut out = vec![0x6C]; // list
                out.extend(bytes);
                (out, d + 1)
            })
            .boxed(),
    )
    .boxed()
}

fn depth_of(ty: &ValType) -> u32 {
    match ty {
        ValType::List(inner) | ValType::Option(inner) => 1 + depth_of(inner),
        ValType::Tuple(elems) => 1 + elems.iter().map(depth_of).max().unwrap_or(0),
        ValType::Record(fields) => 1 + fields.iter().map(|(_, t)| depth_of(t)).max().unwrap_or(0),
        ValType::Variant(cases) => {
            1 + cases
                .iter()
                .filter_map(|VariantCase { ty, .. }| ty.as_ref().map(depth_of))
                .max()
                .unwrap_or(0)
        }
        ValType::Result { ok, err } => {
            1 + ok.as_deref().map(depth_of).unwrap_or(0).max(err.as_deref().map(depth_of).unwrap_or(0))
        }
        _ => 0,
    }
}

proptest! {
    #[test]
    fn decodes_without_panicking_and_respects_generated_depth((bytes, expected_depth) in arb_valtype()) {
        let mut reader = Reader::new(&bytes);
        let ty = decode_valtype(&mut reader).expect("generated bytes are always well-formed");
        prop_assert!(reader.is_empty(), "decoder left unconsumed bytes");
        prop_assert_eq!(depth_of(&ty), expected_depth);
    }

    #[test]
    fn truncating_any_trailing_byte_is_rejected((bytes, depth) in arb_valtype()) {
        prop_assume!(depth > 0 && bytes.len() > 1);
        let truncated = &bytes[..bytes.len() - 1];
        let mut reader = Reader::new(truncated);
        prop_assert!(decode_valtype(&mut reader).is_err());
    }
}
