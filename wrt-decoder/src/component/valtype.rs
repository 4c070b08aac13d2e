// wrt-decoder
// Module: Component Model valtype tree
//
// Copyright (c) 2025 The WRT Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The value-type lattice (`spec.md` §4.4): primitives plus the structural
//! constructors that may recursively embed any other `ValType`.
//!
//! This is the idiomatic-Rust analogue of the teacher's `FormatValType`
//! (`wrt-format/src/component.rs`, surfaced through
//! `wrt-decoder/src/component/val_type.rs`): a tagged `enum` owning its
//! children directly, so the destructor is automatic and a partially built
//! node can never outlive its owner. There is no separate "free `ValType`"
//! path: dropping a `ValType` drops its entire owned subtree.

/// One case of a [`ValType::Variant`].
#[derive(Debug, Clone, PartialEq)]
pub struct VariantCase {
    /// The case's label.
    pub name: String,
    /// The case's payload type, if it carries one.
    pub ty: Option<ValType>,
    /// Index of the case this one refines, if any.
    pub refines: Option<u32>,
}

/// A Component Model value type.
///
/// Composite constructors own their children by value (`Box`/`Vec`), never
/// by reference, matching spec §3's "never by pointer, only by index into a
/// same-scope vector" rule for *cross-entity* references while keeping
/// *intra-tree* ownership structural, as idiomatic Rust expects.
#[derive(Debug, Clone, PartialEq)]
pub enum ValType {
    /// `bool`
    Bool,
    /// `s8`
    S8,
    /// `u8`
    U8,
    /// `s16`
    S16,
    /// `u16`
    U16,
    /// `s32`
    S32,
    /// `u32`
    U32,
    /// `s64`
    S64,
    /// `u64`
    U64,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `char`
    Char,
    /// `string`
    String,
    /// A reference into the unified type index space.
    TypeIdx(u32),
    /// A record of named fields.
    Record(Vec<(String, ValType)>),
    /// A tagged union of named, optionally-typed cases.
    Variant(Vec<VariantCase>),
    /// A homogeneous, dynamically-sized sequence.
    List(Box<ValType>),
    /// A fixed-arity, heterogeneous sequence.
    Tuple(Vec<ValType>),
    /// A bit-set of named flags.
    Flags(Vec<String>),
    /// A tagged union of unit cases.
    Enum(Vec<String>),
    /// `option<T>`.
    Option(Box<ValType>),
    /// `result<ok?, err?>`.
    Result {
        /// The success payload type, if any.
        ok: Option<Box<ValType>>,
        /// The failure payload type, if any.
        err: Option<Box<ValType>>,
    },
    /// An owned resource handle, referencing a resource type by index.
    Own(u32),
    /// A borrowed resource handle, referencing a resource type by index.
    Borrow(u32),
}

/// Discriminant bytes for the structural constructors (spec.md §4.4, taken
/// verbatim — these do not collide with the primitive range below).
mod tag {
    pub const RECORD: u8 = 0x6E;
    pub const VARIANT: u8 = 0x6D;
    pub const LIST: u8 = 0x6C;
    pub const TUPLE: u8 = 0x6B;
    pub const FLAGS: u8 = 0x6A;
    pub const ENUM: u8 = 0x69;
    pub const OPTION: u8 = 0x68;
    pub const RESULT: u8 = 0x67;
    pub const OWN: u8 = 0x66;
    pub const BORROW: u8 = 0x65;
    pub const TYPE_IDX: u8 = 0x00;
}

/// Primitive tags, resolved per `SPEC_FULL.md` §4 (spec.md §9 open question
/// 2: "prefer the decoder's mapping"). Contiguous `0x73..=0x7F`, disjoint
/// from the structural-constructor range above.
mod prim_tag {
    pub const STRING: u8 = 0x73;
    pub const CHAR: u8 = 0x74;
    pub const F64: u8 = 0x75;
    pub const F32: u8 = 0x76;
    pub const U64: u8 = 0x77;
    pub const S64: u8 = 0x78;
    pub const U32: u8 = 0x79;
    pub const S32: u8 = 0x7A;
    pub const U16: u8 = 0x7B;
    pub const S16: u8 = 0x7C;
    pub const U8: u8 = 0x7D;
    pub const S8: u8 = 0x7E;
    pub const BOOL: u8 = 0x7F;
}

use wrt_error::{Error, Result};

use crate::reader::Reader;

/// Decode one `ValType` node (and, recursively, its entire owned subtree)
/// from `reader`.
///
/// On failure no partial subtree escapes: every child that was already
/// constructed is owned by a local `enum`/`Vec`/`Box` that is dropped when
/// the `?` unwinds out of this function, which is spec §4.4's "ownership on
/// failure" invariant made automatic by ownership rather than a manual
/// per-kind destructor.
pub fn decode_valtype(reader: &mut Reader<'_>) -> Result<ValType> {
    let tag = reader.read_u8()?;
    #[cfg(feature = "logging")]
    log::trace!("valtype tag {tag:#04x} at offset {:#x}", reader.position());
    let val = match tag {
        prim_tag::BOOL => ValType::Bool,
        prim_tag::S8 => ValType::S8,
        prim_tag::U8 => ValType::U8,
        prim_tag::S16 => ValType::S16,
        prim_tag::U16 => ValType::U16,
        prim_tag::S32 => ValType::S32,
        prim_tag::U32 => ValType::U32,
        prim_tag::S64 => ValType::S64,
        prim_tag::U64 => ValType::U64,
        prim_tag::F32 => ValType::F32,
        prim_tag::F64 => ValType::F64,
        prim_tag::CHAR => ValType::Char,
        prim_tag::STRING => ValType::String,
        tag::TYPE_IDX => ValType::TypeIdx(reader.read_leb_u32()?),
        tag::RECORD => {
            let count = reader.read_leb_u32()?;
            let mut fields = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let name = reader.read_string()?;
                let ty = decode_valtype(reader)?;
                fields.push((name, ty));
            }
            ValType::Record(fields)
        }
        tag::VARIANT => {
            let count = reader.read_leb_u32()?;
            let mut cases = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let name = reader.read_string()?;
                let ty = decode_option(reader, decode_valtype)?;
                let refines = decode_option_u32(reader)?;
                cases.push(VariantCase { name, ty, refines });
            }
            ValType::Variant(cases)
        }
        tag::LIST => ValType::List(Box::new(decode_valtype(reader)?)),
        tag::TUPLE => {
            let count = reader.read_leb_u32()?;
            let mut types = Vec::with_capacity(count as usize);
            for _ in 0..count {
                types.push(decode_valtype(reader)?);
            }
            ValType::Tuple(types)
        }
        tag::FLAGS => ValType::Flags(decode_string_vec(reader)?),
        tag::ENUM => ValType::Enum(decode_string_vec(reader)?),
        tag::OPTION => ValType::Option(Box::new(decode_valtype(reader)?)),
        tag::RESULT => {
            let ok = decode_option(reader, decode_valtype)?.map(Box::new);
            let err = decode_option(reader, decode_valtype)?.map(Box::new);
            ValType::Result { ok, err }
        }
        tag::OWN => ValType::Own(reader.read_leb_u32()?),
        tag::BORROW => ValType::Borrow(reader.read_leb_u32()?),
        other => return Err(Error::unknown_val_type(other)),
    };
    Ok(val)
}

fn decode_string_vec(reader: &mut Reader<'_>) -> Result<Vec<String>> {
    let count = reader.read_leb_u32()?;
    let mut names = Vec::with_capacity(count as usize);
    for _ in 0..count {
        names.push(reader.read_string()?);
    }
    Ok(names)
}

/// Decode a presence byte (`0x00`/`0x01`) followed, if present, by `T`.
fn decode_option<T>(
    reader: &mut Reader<'_>,
    decode: impl FnOnce(&mut Reader<'_>) -> Result<T>,
) -> Result<Option<T>> {
    match reader.read_u8()? {
        0x00 => Ok(None),
        0x01 => Ok(Some(decode(reader)?)),
        other => Err(Error::truncated_input(format!(
            "expected a 0x00/0x01 presence byte, found {other:#04x}"
        ))),
    }
}

fn decode_option_u32(reader: &mut Reader<'_>) -> Result<Option<u32>> {
    decode_option(reader, Reader::read_leb_u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> ValType {
        let mut r = Reader::new(bytes);
        let v = decode_valtype(&mut r).unwrap();
        assert!(r.is_empty(), "decoder left unconsumed bytes");
        v
    }

    #[test]
    fn single_primitive_bool() {
        // Corrected from spec.md S2's literal `7B` byte (spec.md's own
        // worked example used a tag value inconsistent with the resolved
        // mapping it itself specifies; see SPEC_FULL.md §8) to the tag this
        // crate's table assigns to `bool`, `0x7F`.
        assert_eq!(decode(&[0x7F]), ValType::Bool);
    }

    #[test]
    fn record_of_u32_and_string() {
        // spec.md S3, with field "a"'s tag (u32) and field "b"'s tag
        // (string) taken from the resolved primitive table rather than the
        // source scenario's inconsistent literal for `string`.
        let mut bytes = vec![tag::RECORD, 0x02];
        bytes.push(1);
        bytes.push(b'a');
        bytes.push(prim_tag::U32);
        bytes.push(1);
        bytes.push(b'b');
        bytes.push(prim_tag::STRING);
        match decode(&bytes) {
            ValType::Record(fields) => {
                assert_eq!(fields, vec![
                    ("a".to_string(), ValType::U32),
                    ("b".to_string(), ValType::String),
                ]);
            }
            other => panic!("expected Record, got {other:?}"),
        }
    }

    #[test]
    fn option_of_list_of_u8() {
        // spec.md S4, element tag taken from the resolved primitive table.
        let bytes = [tag::OPTION, tag::LIST, prim_tag::U8];
        match decode(&bytes) {
            ValType::Option(inner) => match *inner {
                ValType::List(elem) => assert_eq!(*elem, ValType::U8),
                other => panic!("expected List, got {other:?}"),
            },
            other => panic!("expected Option, got {other:?}"),
        }
    }

    #[test]
    fn truncated_variant_is_rejected() {
        // spec.md S6: variant declares 2 cases but only 1 is present.
        let mut bytes = vec![tag::VARIANT, 0x02];
        bytes.push(1);
        bytes.push(b'x');
        bytes.push(0x00); // no payload
                           // second case is missing entirely
        let mut r = Reader::new(&bytes);
        assert!(decode_valtype(&mut r).is_err());
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let mut r = Reader::new(&[0xC3]);
        let err = decode_valtype(&mut r).unwrap_err();
        assert_eq!(err.code, wrt_error::codes::UNKNOWN_VAL_TYPE);
    }

    #[test]
    fn own_and_borrow_carry_type_indices() {
        let mut r = Reader::new(&[tag::OWN, 0x2A]);
        assert_eq!(decode_valtype(&mut r).unwrap(), ValType::Own(42));
        let mut r = Reader::new(&[tag::BORROW, 0x2A]);
        assert_eq!(decode_valtype(&mut r).unwrap(), ValType::Borrow(42));
    }

    #[test]
    fn result_with_both_payloads_absent() {
        let bytes = [tag::RESULT, 0x00, 0x00];
        match decode(&bytes) {
            ValType::Result { ok, err } => {
                assert!(ok.is_none());
                assert!(err.is_none());
            }
            other => panic!("expected Result, got {other:?}"),
        }
    }
}
