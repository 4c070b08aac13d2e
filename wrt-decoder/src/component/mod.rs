// wrt-decoder
// Module: Component Model decoding
//
// Copyright (c) 2025 The WRT Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Everything needed to turn a Component Model binary into an owned
//! [`Component`] tree: the envelope/section driver in [`decode`], the
//! recursive value-type lattice in [`valtype`], the unified-type-space
//! payloads in [`deftype`], extern descriptors in [`extern_desc`], and the
//! owned entity types themselves in [`model`].

pub mod decode;
pub mod deftype;
pub mod extern_desc;
pub mod model;
pub mod valtype;

pub use decode::{load, unload};
pub use deftype::{
    ComponentType, ComponentTypeDecl, DefinedType, FuncType, InstanceType, InstanceTypeDecl,
    ResourceType,
};
pub use extern_desc::{ExternDesc, TypeBound};
pub use model::{
    Alias, AliasTarget, Canonical, CanonicalFunc, CanonicalOption, Component, ComponentInstance,
    CoreInstance, CoreInstanceExpr, CoreModule, CoreSort, CoreTypeDef, Export, Import,
    NestedComponent, Start,
};
pub use valtype::{ValType, VariantCase};
