// wrt-error
// Module: Error codes for the component loader
//
// Copyright (c) 2025 The WRT Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Numeric error codes for the component loader.
//!
//! These continue the host workspace's convention of grouping error codes by
//! hundred-range per subsystem (Core: 1000s, Runtime: 2000s, Component:
//! 3000s). This crate's codes live in the unused 3100-3199 sub-range of the
//! Component series.

/// Envelope magic bytes did not match any accepted preamble.
pub const BAD_MAGIC: u16 = 3100;
/// Envelope version field did not match any accepted preamble.
pub const BAD_VERSION: u16 = 3101;
/// Envelope layer field did not match any accepted preamble.
pub const BAD_LAYER: u16 = 3102;
/// A bounds check failed while reading from the input buffer.
pub const TRUNCATED_INPUT: u16 = 3103;
/// A LEB128 integer was over-long or unterminated.
pub const BAD_LEB: u16 = 3104;
/// A section decoder did not consume exactly its declared byte length.
pub const SECTION_SIZE_MISMATCH: u16 = 3105;
/// A section id occurred more than once.
pub const DUPLICATE_SECTION: u16 = 3106;
/// An unrecognized `valtype` discriminant byte was encountered.
pub const UNKNOWN_VAL_TYPE: u16 = 3107;
/// An unrecognized alias `target_kind` byte was encountered.
pub const UNKNOWN_ALIAS_TARGET: u16 = 3108;
/// A core-instance `kind` byte was outside `{0x00, 0x01}`.
pub const UNKNOWN_INSTANCE_KIND: u16 = 3109;
/// A canonical-function option kind byte was outside the defined set.
pub const UNKNOWN_CANONICAL_OPTION: u16 = 3110;
/// A canonical-function `func_kind` byte was outside the defined set.
pub const BAD_CANONICAL_KIND: u16 = 3111;
/// The start section declared a count other than 0 or 1.
pub const UNSUPPORTED_START_COUNT: u16 = 3112;
/// A resource type's representation was not a primitive value type.
pub const NON_PRIMITIVE_RESOURCE_REP: u16 = 3113;
/// The embedded core-module loader rejected a core module.
pub const CORE_LOADER_ERROR: u16 = 3114;
