// wrt-decoder
// Module: envelope check, section driver, and top-level load()/unload()
//
// Copyright (c) 2025 The WRT Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The section-stream driver: envelope validation, the id+size+body loop
//! shared by every section kind, and the flat per-kind decoders that fill in
//! a [`Component`].
//!
//! This mirrors the teacher's top-level `decode_component` entry point in
//! `wrt-decoder/src/component/decode.rs`: peel the preamble, then loop
//! `(section_id, leb_size, body)` triples, dispatching each to its decoder
//! and asserting the cursor landed exactly at `body_start + size` before
//! moving on — spec.md §4.2's "the cursor must land exactly on the section
//! boundary" invariant.

use wrt_error::{Error, Result};

use crate::component::deftype::decode_defined_type;
use crate::component::extern_desc::decode_extern_desc;
use crate::component::model::{
    Alias, AliasTarget, Canonical, CanonicalFunc, CanonicalOption, Component, ComponentInstance,
    CoreInstance, CoreInstanceExpr, CoreModule, CoreSort, CoreTypeDef, Export, Import,
    NestedComponent, Start,
};
use crate::core_loader::CoreModuleLoader;
use crate::reader::Reader;

const MAGIC: [u8; 4] = [0x00, 0x61, 0x73, 0x6D];

/// Section ids, 0-indexed in encounter order (spec.md §9 open question 1:
/// "pick whichever the decoder's own switch implies" — this crate's decoder
/// uses the 0-indexed numbering below consistently end to end).
mod section_id {
    pub const CORE_MODULE: u8 = 0;
    pub const CORE_INSTANCE: u8 = 1;
    pub const CORE_TYPE: u8 = 2;
    pub const NESTED_COMPONENT: u8 = 3;
    pub const INSTANCE: u8 = 4;
    pub const ALIAS: u8 = 5;
    pub const TYPE: u8 = 6;
    pub const CANONICAL: u8 = 7;
    pub const START: u8 = 8;
    pub const IMPORT: u8 = 9;
    pub const EXPORT: u8 = 10;
    pub const COUNT: usize = 11;
}

mod alias_kind {
    pub const CORE_EXPORT: u8 = 0x00;
    pub const OUTER: u8 = 0x01;
    pub const DIRECT: u8 = 0x02;
}

mod core_instance_kind {
    pub const INSTANTIATE: u8 = 0x00;
    pub const INLINE_EXPORT: u8 = 0x01;
}

mod canonical_kind {
    pub const LIFT: u8 = 0x00;
    pub const LOWER: u8 = 0x01;
    pub const RESOURCE_NEW: u8 = 0x02;
    pub const RESOURCE_DROP: u8 = 0x03;
    pub const RESOURCE_REP: u8 = 0x04;
}

mod canonical_option_kind {
    pub const UTF8: u8 = 0x00;
    pub const UTF16: u8 = 0x01;
    pub const LATIN1_UTF16: u8 = 0x02;
    pub const MEMORY: u8 = 0x03;
    pub const REALLOC: u8 = 0x04;
    pub const POST_RETURN: u8 = 0x05;
    pub const ASYNC: u8 = 0x06;
    pub const CALLBACK: u8 = 0x07;
    pub const ALWAYS_TASK_RETURN: u8 = 0x08;
}

fn decode_envelope(reader: &mut Reader<'_>) -> Result<(u32, u16)> {
    let magic = reader.read_bytes(4)?;
    if magic != MAGIC {
        return Err(Error::bad_magic(format!("expected \\0asm, found {magic:02x?}")));
    }
    let version = u32::from(u16::from_le_bytes(
        reader.read_bytes(2)?.try_into().expect("exactly 2 bytes"),
    ));
    if version == 0 {
        return Err(Error::bad_version("version field was 0"));
    }
    let layer = u16::from_le_bytes(reader.read_bytes(2)?.try_into().expect("exactly 2 bytes"));
    if layer != 1 {
        return Err(Error::bad_layer(format!("expected layer 1 (component), found {layer}")));
    }
    Ok((version, layer))
}

fn decode_core_instance_expr(reader: &mut Reader<'_>) -> Result<CoreInstanceExpr> {
    match reader.read_u8()? {
        core_instance_kind::INSTANTIATE => {
            let module_idx = reader.read_leb_u32()?;
            let arg_count = reader.read_leb_u32()?;
            let mut args = Vec::with_capacity(arg_count as usize);
            for _ in 0..arg_count {
                let name = reader.read_string()?;
                let instance_idx = reader.read_leb_u32()?;
                args.push((name, instance_idx));
            }
            Ok(CoreInstanceExpr::Instantiate { module_idx, args })
        }
        core_instance_kind::INLINE_EXPORT => {
            let count = reader.read_leb_u32()?;
            let mut exports = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let name = reader.read_string()?;
                let sort = CoreSort(reader.read_u8()?);
                let idx = reader.read_leb_u32()?;
                exports.push((name, sort, idx));
            }
            Ok(CoreInstanceExpr::InlineExport { exports })
        }
        other => Err(Error::unknown_instance_kind(other)),
    }
}

/// Shared by the top-level Alias section and by `ComponentType`/
/// `InstanceType` alias declarations (`deftype.rs`), which embed the exact
/// same `target_kind` + payload shape as spec.md §4.3 Alias.
pub(crate) fn decode_alias_target(reader: &mut Reader<'_>) -> Result<AliasTarget> {
    match reader.read_u8()? {
        alias_kind::CORE_EXPORT => {
            let instance_idx = reader.read_leb_u32()?;
            let name = reader.read_string()?;
            Ok(AliasTarget::CoreExport { instance_idx, name })
        }
        alias_kind::OUTER => {
            let outer_depth = reader.read_leb_u32()?;
            let target_idx = reader.read_leb_u32()?;
            Ok(AliasTarget::Outer { outer_depth, target_idx })
        }
        alias_kind::DIRECT => Ok(AliasTarget::Direct(reader.read_leb_u32()?)),
        other => Err(Error::unknown_alias_target(other)),
    }
}

fn decode_canonical_options(reader: &mut Reader<'_>) -> Result<Vec<CanonicalOption>> {
    let count = reader.read_leb_u32()?;
    let mut options = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let opt = match reader.read_u8()? {
            canonical_option_kind::UTF8 => CanonicalOption::Utf8,
            canonical_option_kind::UTF16 => CanonicalOption::Utf16,
            canonical_option_kind::LATIN1_UTF16 => CanonicalOption::Latin1Utf16,
            canonical_option_kind::MEMORY => CanonicalOption::Memory(reader.read_leb_u32()?),
            canonical_option_kind::REALLOC => CanonicalOption::Realloc(reader.read_leb_u32()?),
            canonical_option_kind::POST_RETURN => CanonicalOption::PostReturn(reader.read_leb_u32()?),
            canonical_option_kind::ASYNC => CanonicalOption::Async,
            canonical_option_kind::CALLBACK => CanonicalOption::Callback(reader.read_leb_u32()?),
            canonical_option_kind::ALWAYS_TASK_RETURN => CanonicalOption::AlwaysTaskReturn,
            other => return Err(Error::unknown_canonical_option(other)),
        };
        options.push(opt);
    }
    Ok(options)
}

fn decode_canonical(reader: &mut Reader<'_>) -> Result<Canonical> {
    let func = match reader.read_u8()? {
        canonical_kind::LIFT => CanonicalFunc::Lift {
            core_func_idx: reader.read_leb_u32()?,
            type_idx: reader.read_leb_u32()?,
        },
        canonical_kind::LOWER => CanonicalFunc::Lower { func_idx: reader.read_leb_u32()? },
        canonical_kind::RESOURCE_NEW => {
            CanonicalFunc::ResourceNew { type_idx: reader.read_leb_u32()? }
        }
        canonical_kind::RESOURCE_DROP => {
            CanonicalFunc::ResourceDrop { type_idx: reader.read_leb_u32()? }
        }
        canonical_kind::RESOURCE_REP => {
            CanonicalFunc::ResourceRep { type_idx: reader.read_leb_u32()? }
        }
        other => return Err(Error::bad_canonical_kind(other)),
    };
    let options = decode_canonical_options(reader)?;
    Ok(Canonical { func, options })
}

fn decode_export(reader: &mut Reader<'_>) -> Result<Export> {
    let name = reader.read_string()?;
    let kind = reader.read_u8()?;
    let item_idx = reader.read_leb_u32()?;
    let desc_type_idx = match reader.read_u8()? {
        0x00 => None,
        0x01 => Some(reader.read_leb_u32()?),
        other => {
            return Err(Error::truncated_input(format!(
                "expected a 0x00/0x01 export-descriptor presence byte, found {other:#04x}"
            )))
        }
    };
    Ok(Export { name, kind, item_idx, desc_type_idx })
}

/// Load a full component from `bytes`, delegating embedded core modules to
/// `core_loader`.
///
/// On any decode failure, everything constructed so far (core module
/// handles included) is dropped in place: ownership unwinds the partially
/// built tree automatically, so no explicit rollback/cleanup call is needed
/// (spec.md §6's "no leak on partial parse failure", satisfied the
/// idiomatic-Rust way rather than via a manual per-kind destructor).
pub fn load(bytes: &[u8], core_loader: &dyn CoreModuleLoader) -> Result<Component> {
    let mut reader = Reader::new(bytes);
    let (version, layer) = decode_envelope(&mut reader)?;
    let mut component = Component::new(version, layer);
    let mut seen = [false; section_id::COUNT];

    while !reader.is_empty() {
        let id = reader.read_u8()?;
        let size = reader.read_leb_u32()? as usize;
        let body_start = reader.position();
        let body = reader.sub_slice(size)?;
        let mut body_reader = Reader::new(body);
        #[cfg(feature = "logging")]
        log::debug!("decoding section id {id} ({size} bytes) at offset {body_start:#x}");

        let id_usize = usize::from(id);
        if id_usize < section_id::COUNT {
            if seen[id_usize] {
                return Err(Error::duplicate_section(format!("section id {id} appeared more than once")));
            }
            seen[id_usize] = true;
        }

        match id {
            section_id::CORE_MODULE => {
                // A single section lists every embedded core module as a
                // count-prefixed sequence of length-prefixed byte blobs,
                // so the once-per-component section-repeat policy
                // (DESIGN.md decision 7) does not also cap how many core
                // modules a component may embed.
                let count = body_reader.read_leb_u32()?;
                for _ in 0..count {
                    let len = body_reader.read_leb_u32()? as usize;
                    let module_bytes = body_reader.sub_slice(len)?;
                    let handle = core_loader.load_from_sections(module_bytes)?;
                    component
                        .core_modules
                        .push(CoreModule { bytes: module_bytes.to_vec(), handle });
                }
            }
            section_id::CORE_INSTANCE => {
                let count = body_reader.read_leb_u32()?;
                for _ in 0..count {
                    let expr = decode_core_instance_expr(&mut body_reader)?;
                    component.core_instances.push(CoreInstance { expr });
                }
            }
            section_id::CORE_TYPE => {
                let count = body_reader.read_leb_u32()?;
                for _ in 0..count {
                    let kind = body_reader.read_u8()?;
                    component.core_type_defs.push(CoreTypeDef { kind });
                }
            }
            section_id::NESTED_COMPONENT => {
                // Same count-prefixed-blobs shape as Core Module, for the
                // same reason: one section, any number of nested
                // components, each recorded as a raw byte view only (do
                // not recurse).
                let count = body_reader.read_leb_u32()?;
                for _ in 0..count {
                    let len = body_reader.read_leb_u32()? as usize;
                    let nested_bytes = body_reader.sub_slice(len)?;
                    component
                        .nested_components
                        .push(NestedComponent { bytes: nested_bytes.to_vec() });
                }
            }
            section_id::INSTANCE => {
                let count = body_reader.read_leb_u32()?;
                for _ in 0..count {
                    let instance_kind = body_reader.read_u8()?;
                    let item_idx = body_reader.read_leb_u32()?;
                    let arg_count = body_reader.read_leb_u32()?;
                    let mut args = Vec::with_capacity(arg_count as usize);
                    for _ in 0..arg_count {
                        let name = body_reader.read_string()?;
                        // `actual_sort`: parsed to keep cursor accounting
                        // exact but not retained (DESIGN.md decision 5).
                        let _actual_sort = body_reader.read_u8()?;
                        let idx = body_reader.read_leb_u32()?;
                        args.push((name, idx));
                    }
                    component.component_instances.push(ComponentInstance {
                        instance_kind,
                        item_idx,
                        args,
                    });
                }
            }
            section_id::ALIAS => {
                let count = body_reader.read_leb_u32()?;
                for _ in 0..count {
                    let sort = body_reader.read_u8()?;
                    let target = decode_alias_target(&mut body_reader)?;
                    component.aliases.push(Alias { sort, target });
                }
            }
            section_id::TYPE => {
                let count = body_reader.read_leb_u32()?;
                for _ in 0..count {
                    let ty = decode_defined_type(&mut body_reader)?;
                    component.defined_types.push(ty);
                }
            }
            section_id::CANONICAL => {
                let count = body_reader.read_leb_u32()?;
                for _ in 0..count {
                    let canon = decode_canonical(&mut body_reader)?;
                    component.canonicals.push(canon);
                }
            }
            section_id::START => {
                let count = body_reader.read_leb_u32()?;
                if count > 1 {
                    return Err(Error::unsupported_start_count(count));
                }
                for _ in 0..count {
                    let func_idx = body_reader.read_leb_u32()?;
                    let arg_count = body_reader.read_leb_u32()?;
                    let mut args = Vec::with_capacity(arg_count as usize);
                    for _ in 0..arg_count {
                        args.push(body_reader.read_leb_u32()?);
                    }
                    component.starts.push(Start { func_idx, args });
                }
            }
            section_id::IMPORT => {
                let count = body_reader.read_leb_u32()?;
                for _ in 0..count {
                    let name = body_reader.read_string()?;
                    let desc = decode_extern_desc(&mut body_reader)?;
                    component.imports.push(Import { name, desc });
                }
            }
            section_id::EXPORT => {
                let count = body_reader.read_leb_u32()?;
                for _ in 0..count {
                    component.exports.push(decode_export(&mut body_reader)?);
                }
            }
            _other => {
                #[cfg(feature = "logging")]
                log::debug!("skipping unknown section id {_other} ({size} bytes)");
            }
        }

        if !body_reader.is_empty() {
            return Err(Error::section_size_mismatch(format!(
                "section id {id} declared {size} bytes but its decoder left {} unconsumed",
                body_reader.remaining()
            )));
        }
        debug_assert_eq!(reader.position(), body_start + size);
    }

    Ok(component)
}

/// Release every embedded core module's handle back to `core_loader`.
///
/// This consumes `component` so a caller cannot use it (or double-release
/// its handles) afterwards — the ownership-based equivalent of spec.md §6's
/// "unload invalidates the handle."
pub fn unload(component: Component, core_loader: &dyn CoreModuleLoader) {
    for module in component.core_modules {
        core_loader.unload(module.handle);
    }
}
