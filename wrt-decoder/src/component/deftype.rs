// wrt-decoder
// Module: DefinedType (func/component/instance/resource/core-module types)
//
// Copyright (c) 2025 The WRT Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The unified type-space payloads beyond plain [`ValType`]: function
//! signatures and the three "container" type shapes (`ComponentType`,
//! `InstanceType`, `ResourceType`) (spec.md §4.4). Core-level type tags
//! (`core:module` et al.) live outside the unified type index space
//! entirely, in `component::model::CoreTypeDef` via the standalone Core Type
//! section — there is no wire path that yields a core module type as a
//! unified-type-space entry, so no `DefinedType` variant models one.
//!
//! Dispatch peeks one byte without consuming it (spec.md §4.4): `0x40` a
//! function type, `0x41` a component type, `0x42` an instance type, `0x43` a
//! resource type, anything else a bare `ValType` — in which case the peeked
//! byte is left for [`decode_valtype`] to consume itself.

use wrt_error::{Error, Result};

use crate::component::decode::decode_alias_target;
use crate::component::extern_desc::{decode_extern_desc, ExternDesc};
use crate::component::model::AliasTarget;
use crate::component::valtype::{decode_valtype, ValType};
use crate::reader::Reader;

/// A function signature: named parameters plus an optional result type.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncType {
    /// `(name, type)` pairs, in declaration order.
    pub params: Vec<(String, ValType)>,
    /// The function's result type, if it returns a value.
    pub result: Option<ValType>,
}

/// One declaration inside a [`ComponentType`] body (spec.md §4.4).
#[derive(Debug)]
pub enum ComponentTypeDecl {
    /// A named import with its typed description.
    Import {
        /// The import's name.
        name: String,
        /// Its typed description.
        desc: ExternDesc,
    },
    /// A named export with its typed description.
    Export {
        /// The export's name.
        name: String,
        /// Its typed description.
        desc: ExternDesc,
    },
    /// An alias into an outer scope, scoped to this type's own alias space.
    Alias {
        /// The alias's name.
        name: String,
        /// The raw sort byte.
        sort: u8,
        /// What the alias resolves to.
        target: AliasTarget,
    },
    /// A nested core-level type declaration (`0x03`).
    CoreType(Box<DefinedType>),
    /// A nested component-level type declaration (`0x04`).
    Type(Box<DefinedType>),
}

/// A component type: the declarations an instance of it must satisfy.
#[derive(Debug, Default)]
pub struct ComponentType {
    /// The type's declarations, in encounter order.
    pub decls: Vec<ComponentTypeDecl>,
}

/// One declaration inside an [`InstanceType`] body. A strict subset of
/// [`ComponentTypeDecl`]: an instance type cannot itself declare imports
/// (spec.md §4.4).
#[derive(Debug)]
pub enum InstanceTypeDecl {
    /// A named export with its typed description.
    Export {
        /// The export's name.
        name: String,
        /// Its typed description.
        desc: ExternDesc,
    },
    /// An alias into an outer scope.
    Alias {
        /// The alias's name.
        name: String,
        /// The raw sort byte.
        sort: u8,
        /// What the alias resolves to.
        target: AliasTarget,
    },
    /// A nested core-level type declaration.
    CoreType(Box<DefinedType>),
    /// A nested component-level type declaration.
    Type(Box<DefinedType>),
}

/// An instance type: the exports a component instance guarantees.
#[derive(Debug, Default)]
pub struct InstanceType {
    /// The type's declarations, in encounter order.
    pub decls: Vec<InstanceTypeDecl>,
}

/// A resource type: its representation and optional destructor.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceType {
    /// The resource's representation type. Per spec.md's invariant this must
    /// be a primitive `ValType`; a composite representation is rejected with
    /// [`Error::non_primitive_resource_rep`].
    pub rep: ValType,
    /// Index of the destructor function, if the resource has one.
    pub dtor: Option<u32>,
}

/// A member of the unified type index space.
#[derive(Debug)]
pub enum DefinedType {
    /// A plain value type.
    Val(ValType),
    /// A function signature.
    Func(FuncType),
    /// A component type.
    Component(ComponentType),
    /// An instance type.
    Instance(InstanceType),
    /// A resource type.
    Resource(ResourceType),
}

mod tag {
    pub const FUNC: u8 = 0x40;
    pub const COMPONENT: u8 = 0x41;
    pub const INSTANCE: u8 = 0x42;
    pub const RESOURCE: u8 = 0x43;
}

mod decl_kind {
    pub const IMPORT: u8 = 0x00;
    pub const EXPORT: u8 = 0x01;
    pub const ALIAS: u8 = 0x02;
    pub const CORE_TYPE: u8 = 0x03;
    pub const TYPE: u8 = 0x04;
}

mod instance_decl_kind {
    pub const EXPORT: u8 = 0x00;
    pub const ALIAS: u8 = 0x01;
    pub const CORE_TYPE: u8 = 0x02;
    pub const TYPE: u8 = 0x03;
}

fn is_primitive(ty: &ValType) -> bool {
    matches!(
        ty,
        ValType::Bool
            | ValType::S8
            | ValType::U8
            | ValType::S16
            | ValType::U16
            | ValType::S32
            | ValType::U32
            | ValType::S64
            | ValType::U64
            | ValType::F32
            | ValType::F64
            | ValType::Char
            | ValType::String
    )
}

fn decode_functype(reader: &mut Reader<'_>) -> Result<FuncType> {
    let param_count = reader.read_leb_u32()?;
    let mut params = Vec::with_capacity(param_count as usize);
    for _ in 0..param_count {
        let name = reader.read_string()?;
        let ty = decode_valtype(reader)?;
        params.push((name, ty));
    }
    let result = match reader.read_u8()? {
        0x00 => None,
        0x01 => Some(decode_valtype(reader)?),
        other => {
            return Err(Error::truncated_input(format!(
                "expected a 0x00/0x01 result presence byte, found {other:#04x}"
            )))
        }
    };
    Ok(FuncType { params, result })
}

/// `0x02 Alias: string (alias name) + sort byte + target_kind byte +
/// target-specific payload` (spec.md §4.4), the same shape as the top-level
/// Alias section entries (spec.md §4.3), reused via [`decode_alias_target`].
fn decode_alias_in_type(reader: &mut Reader<'_>) -> Result<(String, u8, AliasTarget)> {
    let name = reader.read_string()?;
    let sort = reader.read_u8()?;
    let target = decode_alias_target(reader)?;
    Ok((name, sort, target))
}

fn decode_componenttype(reader: &mut Reader<'_>) -> Result<ComponentType> {
    let count = reader.read_leb_u32()?;
    let mut decls = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let decl = match reader.read_u8()? {
            decl_kind::IMPORT => ComponentTypeDecl::Import {
                name: reader.read_string()?,
                desc: decode_extern_desc(reader)?,
            },
            decl_kind::EXPORT => ComponentTypeDecl::Export {
                name: reader.read_string()?,
                desc: decode_extern_desc(reader)?,
            },
            decl_kind::ALIAS => {
                let (name, sort, target) = decode_alias_in_type(reader)?;
                ComponentTypeDecl::Alias { name, sort, target }
            }
            decl_kind::CORE_TYPE => ComponentTypeDecl::CoreType(Box::new(decode_defined_type(reader)?)),
            decl_kind::TYPE => ComponentTypeDecl::Type(Box::new(decode_defined_type(reader)?)),
            other => return Err(Error::bad_canonical_kind(other)),
        };
        decls.push(decl);
    }
    Ok(ComponentType { decls })
}

fn decode_instancetype(reader: &mut Reader<'_>) -> Result<InstanceType> {
    let count = reader.read_leb_u32()?;
    let mut decls = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let decl = match reader.read_u8()? {
            instance_decl_kind::EXPORT => InstanceTypeDecl::Export {
                name: reader.read_string()?,
                desc: decode_extern_desc(reader)?,
            },
            instance_decl_kind::ALIAS => {
                let (name, sort, target) = decode_alias_in_type(reader)?;
                InstanceTypeDecl::Alias { name, sort, target }
            }
            instance_decl_kind::CORE_TYPE => {
                InstanceTypeDecl::CoreType(Box::new(decode_defined_type(reader)?))
            }
            instance_decl_kind::TYPE => InstanceTypeDecl::Type(Box::new(decode_defined_type(reader)?)),
            other => return Err(Error::bad_canonical_kind(other)),
        };
        decls.push(decl);
    }
    Ok(InstanceType { decls })
}

fn decode_resourcetype(reader: &mut Reader<'_>) -> Result<ResourceType> {
    let rep = decode_valtype(reader)?;
    if !is_primitive(&rep) {
        return Err(Error::non_primitive_resource_rep());
    }
    let dtor = match reader.read_u8()? {
        0x00 => None,
        0x01 => Some(reader.read_leb_u32()?),
        other => {
            return Err(Error::truncated_input(format!(
                "expected a 0x00/0x01 destructor presence byte, found {other:#04x}"
            )))
        }
    };
    Ok(ResourceType { rep, dtor })
}

/// Decode one entry of the unified type index space: peek a byte, dispatch
/// on `0x40..=0x43`, or fall back to a bare [`ValType`] without consuming the
/// peeked byte.
pub fn decode_defined_type(reader: &mut Reader<'_>) -> Result<DefinedType> {
    let peeked = reader.peek_u8()?;
    let dt = match peeked {
        tag::FUNC => {
            reader.read_u8()?;
            DefinedType::Func(decode_functype(reader)?)
        }
        tag::COMPONENT => {
            reader.read_u8()?;
            DefinedType::Component(decode_componenttype(reader)?)
        }
        tag::INSTANCE => {
            reader.read_u8()?;
            DefinedType::Instance(decode_instancetype(reader)?)
        }
        tag::RESOURCE => {
            reader.read_u8()?;
            DefinedType::Resource(decode_resourcetype(reader)?)
        }
        _ => DefinedType::Val(decode_valtype(reader)?),
    };
    Ok(dt)
}
