// wrt-decoder
// Module: owned Component Model data types
//
// Copyright (c) 2025 The WRT Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The owned, in-memory representation of a loaded component (spec.md §3).
//!
//! This module holds data only, the same separation the teacher draws
//! between `wrt-format` (data + encode) and `wrt-decoder` (decode logic
//! consuming those types) — see `wrt-format/src/component.rs` and
//! `wrt-decoder/src/component/decode.rs`.
//!
//! Every cross-entity reference is a `u32` index into one of `Component`'s
//! index-space `Vec`s, never a pointer or borrow, satisfying spec.md §3's "no
//! cyclic references" rule and §9's "this is load-time only" note.

use crate::component::deftype::DefinedType;
use crate::component::extern_desc::ExternDesc;
use crate::core_loader::CoreModuleHandle;

/// The top-level container produced by [`crate::load`].
///
/// Dropping a `Component` drops every owned entity transitively; the only
/// piece that requires an explicit release is each [`CoreModule`]'s
/// [`CoreModuleHandle`], which is why [`crate::unload`] remains an explicit
/// operation rather than relying solely on `Drop` (see `SPEC_FULL.md` §6).
#[derive(Debug, Default)]
pub struct Component {
    /// Component Model layer/version envelope, `0x0A 0x00 0x01 0x00` for the
    /// canonical preamble.
    pub version: u32,
    /// The envelope's layer field (`0x01` for components).
    pub layer: u16,
    /// Embedded core modules, in encounter order.
    pub core_modules: Vec<CoreModule>,
    /// Core-level instances, in encounter order.
    pub core_instances: Vec<CoreInstance>,
    /// Core-level type tags, in encounter order.
    pub core_type_defs: Vec<CoreTypeDef>,
    /// Nested (unparsed) components, in encounter order.
    pub nested_components: Vec<NestedComponent>,
    /// Component-level instances, in encounter order.
    pub component_instances: Vec<ComponentInstance>,
    /// Aliases, in encounter order.
    pub aliases: Vec<Alias>,
    /// The unified type index space: every `ValType`/`FuncType`/
    /// `ComponentType`/`InstanceType`/`ResourceType` definition, in encounter
    /// order.
    pub defined_types: Vec<DefinedType>,
    /// Canonical lift/lower functions, in encounter order.
    pub canonicals: Vec<Canonical>,
    /// The start function, if present (spec.md invariant: length 0 or 1).
    pub starts: Vec<Start>,
    /// Component-level imports, in encounter order.
    pub imports: Vec<Import>,
    /// Component-level exports, in encounter order.
    pub exports: Vec<Export>,
}

impl Component {
    /// An empty component, as produced by an input with no sections
    /// (spec.md scenario S1).
    pub fn new(version: u32, layer: u16) -> Self {
        Self { version, layer, ..Default::default() }
    }
}

/// An embedded core WebAssembly module.
///
/// `bytes` is a deep copy of the module's byte range rather than a borrow
/// into the original input (spec.md §5's documented either/or choice — see
/// `SPEC_FULL.md` §3), so `Component` carries no lifetime parameter.
#[derive(Debug)]
pub struct CoreModule {
    /// The module's raw bytes, as handed to the external core loader.
    pub bytes: Vec<u8>,
    /// The opaque handle returned by the external core-module loader.
    pub handle: CoreModuleHandle,
}

/// A core-level sort tag as read from the binary (raw, since spec.md leaves
/// the concrete enumeration of core sort bytes unspecified beyond "kind
/// byte").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreSort(pub u8);

/// A core instantiation expression (spec.md §4.3 Core Instance).
#[derive(Debug)]
pub enum CoreInstanceExpr {
    /// Instantiate a core module with named instance arguments.
    Instantiate {
        /// Index into `core_modules`.
        module_idx: u32,
        /// `(import name, instance_idx)` pairs.
        args: Vec<(String, u32)>,
    },
    /// Synthesize an instance directly from named core-level exports.
    InlineExport {
        /// `(export name, sort, sort_idx)` triples.
        exports: Vec<(String, CoreSort, u32)>,
    },
}

/// A core-level instance.
#[derive(Debug)]
pub struct CoreInstance {
    /// How the instance was produced.
    pub expr: CoreInstanceExpr,
}

/// A core-level type tag (spec.md: "kind byte + (future) body" — deep
/// parsing of core-module types is out of scope for this loader).
#[derive(Debug, Clone, Copy)]
pub struct CoreTypeDef {
    /// The raw kind byte.
    pub kind: u8,
}

/// An unparsed nested component (spec.md §4.3: "record byte slice view
/// only (do not recurse)").
#[derive(Debug)]
pub struct NestedComponent {
    /// The nested component's raw bytes (deep-copied, see [`CoreModule`]).
    pub bytes: Vec<u8>,
}

/// A component-level instance (spec.md §4.3 Component Instance).
#[derive(Debug)]
pub struct ComponentInstance {
    /// `0` for a core instantiation, `1` for a component instantiation (the
    /// raw `instance_kind` byte; spec.md does not otherwise enumerate it).
    pub instance_kind: u8,
    /// Index of the component/core-module being instantiated.
    pub item_idx: u32,
    /// `(arg name, item_idx)` pairs. Each arg's `actual_sort` byte is
    /// consumed from the wire to keep cursor accounting exact but is not
    /// retained here (spec.md §9 Q6; DESIGN.md decision 5).
    pub args: Vec<(String, u32)>,
}

/// The target of an [`Alias`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasTarget {
    /// An alias into a sibling core instance's named exports.
    CoreExport {
        /// Index of the core instance being aliased.
        instance_idx: u32,
        /// The exported name.
        name: String,
    },
    /// An alias into an enclosing component's index space.
    Outer {
        /// How many enclosing components to walk up.
        outer_depth: u32,
        /// Index within that enclosing component's index space.
        target_idx: u32,
    },
    /// An alias directly by index: core module, type, component, or instance.
    Direct(u32),
}

/// An alias binding (spec.md §4.3 Alias).
#[derive(Debug)]
pub struct Alias {
    /// The raw sort byte (spec.md leaves the sort enumeration unspecified).
    pub sort: u8,
    /// What the alias resolves to.
    pub target: AliasTarget,
}

/// String-encoding / memory-management options for a [`Canonical`] function
/// (spec.md §4.3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonicalOption {
    /// `0x00`
    Utf8,
    /// `0x01`
    Utf16,
    /// `0x02`, named `Latin1Utf16` per `SPEC_FULL.md` §4 (spec.md §9 Q3).
    Latin1Utf16,
    /// `0x03 memory <idx>`
    Memory(u32),
    /// `0x04 realloc <idx>`
    Realloc(u32),
    /// `0x05 post-return <idx>`
    PostReturn(u32),
    /// `0x06 async`
    Async,
    /// `0x07 callback <idx>`
    Callback(u32),
    /// `0x08 always-task-return`
    AlwaysTaskReturn,
}

/// The kind-specific payload of a [`Canonical`] function, resolved per
/// `SPEC_FULL.md` §4 against the Component Model's published canonical ABI
/// opcode table (spec.md names the field shapes without enumerating the
/// discriminant byte).
#[derive(Debug)]
pub enum CanonicalFunc {
    /// `canon lift`.
    Lift {
        /// The core function being lifted.
        core_func_idx: u32,
        /// The component-level function type it is lifted to.
        type_idx: u32,
    },
    /// `canon lower`.
    Lower {
        /// The component-level function being lowered.
        func_idx: u32,
    },
    /// `canon resource.new`.
    ResourceNew {
        /// The resource type being constructed.
        type_idx: u32,
    },
    /// `canon resource.drop`.
    ResourceDrop {
        /// The resource type being dropped.
        type_idx: u32,
    },
    /// `canon resource.rep`.
    ResourceRep {
        /// The resource type whose representation is being read.
        type_idx: u32,
    },
}

/// A canonical lift/lower function (spec.md §4.3 Canonical).
#[derive(Debug)]
pub struct Canonical {
    /// The decoded kind-specific payload.
    pub func: CanonicalFunc,
    /// Encoding/memory-management options attached to this function.
    pub options: Vec<CanonicalOption>,
}

/// The component's start function, if present (spec.md §4.3 Start; at most
/// one entry is ever valid, enforced by the section decoder).
#[derive(Debug)]
pub struct Start {
    /// Index of the function to invoke at instantiation.
    pub func_idx: u32,
    /// Indices of the value arguments to pass.
    pub args: Vec<u32>,
}

/// A component-level import (spec.md §4.3 Import).
#[derive(Debug)]
pub struct Import {
    /// The import's name.
    pub name: String,
    /// The imported item's typed description.
    pub desc: ExternDesc,
}

/// A component-level export (spec.md §4.3 Export).
#[derive(Debug)]
pub struct Export {
    /// The export's name.
    pub name: String,
    /// The raw sort/kind byte of the exported item.
    pub kind: u8,
    /// Index of the exported item within its sort's index space.
    pub item_idx: u32,
    /// An optional descriptor type index, idiomatically `None` rather than
    /// spec.md's C-shaped `u32::MAX` sentinel (same value, Rust-native
    /// spelling; see `SPEC_FULL.md` §4).
    pub desc_type_idx: Option<u32>,
}
