// wrt-decoder
// Module: extern descriptors (import/export item types)
//
// Copyright (c) 2025 The WRT Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The typed description attached to every component-level import and to
//! `Import`/`Export` declarations nested inside a `ComponentType`/
//! `InstanceType` (spec.md §4.3/§4.5).
//!
//! spec.md names `ExternDesc` and its `TypeBound` resource case without
//! enumerating a discriminant byte for either; `SPEC_FULL.md` §4 resolves
//! both against the Component Model's extern-sort numbering, the same way
//! `SPEC_FULL.md` resolves the canonical ABI opcodes in
//! `component::model::CanonicalFunc`.

use wrt_error::Result;

use crate::component::valtype::{decode_valtype, ValType};
use crate::reader::Reader;

/// The bound on a `Type` extern, i.e. how a resource/type import or export
/// relates to the type it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeBound {
    /// The extern is exactly equal to the named type.
    Eq(u32),
    /// The extern is a fresh abstract subtype of `resource`.
    SubResource,
}

/// A typed description of an imported or exported item.
#[derive(Debug, Clone, PartialEq)]
pub enum ExternDesc {
    /// A core module, by index into `core_type_defs`.
    CoreModule(u32),
    /// A function, by index into the unified type space (a `DefinedType::Func`).
    Func(u32),
    /// A value of the given inline value type.
    Value(ValType),
    /// A type extern, with its bound.
    Type(TypeBound),
    /// A component instance, by index into the unified type space.
    Instance(u32),
    /// A nested component, by index into the unified type space.
    Component(u32),
}

mod kind {
    pub const CORE_MODULE: u8 = 0x00;
    pub const FUNC: u8 = 0x01;
    pub const VALUE: u8 = 0x02;
    pub const TYPE: u8 = 0x03;
    pub const INSTANCE: u8 = 0x04;
    pub const COMPONENT: u8 = 0x05;
}

mod bound {
    pub const EQ: u8 = 0x00;
    pub const SUB_RESOURCE: u8 = 0x01;
}

/// Decode one `ExternDesc`: a kind byte followed by the kind's payload.
pub fn decode_extern_desc(reader: &mut Reader<'_>) -> Result<ExternDesc> {
    let k = reader.read_u8()?;
    let desc = match k {
        kind::CORE_MODULE => ExternDesc::CoreModule(reader.read_leb_u32()?),
        kind::FUNC => ExternDesc::Func(reader.read_leb_u32()?),
        kind::VALUE => ExternDesc::Value(decode_valtype(reader)?),
        kind::TYPE => {
            let bound = match reader.read_u8()? {
                bound::EQ => TypeBound::Eq(reader.read_leb_u32()?),
                bound::SUB_RESOURCE => TypeBound::SubResource,
                other => {
                    return Err(wrt_error::Error::bad_canonical_kind(other));
                }
            };
            ExternDesc::Type(bound)
        }
        kind::INSTANCE => ExternDesc::Instance(reader.read_leb_u32()?),
        kind::COMPONENT => ExternDesc::Component(reader.read_leb_u32()?),
        other => return Err(wrt_error::Error::bad_canonical_kind(other)),
    };
    Ok(desc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_func_desc() {
        let bytes = [kind::FUNC, 0x07];
        let mut r = Reader::new(&bytes);
        assert_eq!(decode_extern_desc(&mut r).unwrap(), ExternDesc::Func(7));
    }

    #[test]
    fn decodes_type_eq_bound() {
        let bytes = [kind::TYPE, bound::EQ, 0x03];
        let mut r = Reader::new(&bytes);
        assert_eq!(
            decode_extern_desc(&mut r).unwrap(),
            ExternDesc::Type(TypeBound::Eq(3))
        );
    }

    #[test]
    fn decodes_type_sub_resource_bound() {
        let bytes = [kind::TYPE, bound::SUB_RESOURCE];
        let mut r = Reader::new(&bytes);
        assert_eq!(
            decode_extern_desc(&mut r).unwrap(),
            ExternDesc::Type(TypeBound::SubResource)
        );
    }

    #[test]
    fn decodes_inline_value_desc() {
        let bytes = [kind::VALUE, 0x7F]; // bool
        let mut r = Reader::new(&bytes);
        assert_eq!(decode_extern_desc(&mut r).unwrap(), ExternDesc::Value(ValType::Bool));
    }

    #[test]
    fn rejects_unknown_kind() {
        let mut r = Reader::new(&[0xFF]);
        assert!(decode_extern_desc(&mut r).is_err());
    }
}
