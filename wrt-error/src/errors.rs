// wrt-error
// Module: Error and error handling types
//
// Copyright (c) 2025 The WRT Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Unified error handling for the component loader.
//!
//! This mirrors the host workspace's `category` + numeric `code` + owned
//! `message` shape, trimmed to the single `std` target this crate supports
//! (the teacher's no_std/ASIL allocation-strategy feature matrix is dropped;
//! see `DESIGN.md`).

use core::fmt;

use crate::codes;

/// Error categories for component-loader operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed input: envelope, section framing, or type encoding.
    Parse,
    /// The embedded core-module loader or allocator failed.
    Resource,
}

/// The component loader's error type.
///
/// Every fallible operation in `wrt-decoder` returns `Result<T, Error>`.
/// `Display` renders the single line the loader's original C-shaped API
/// would have written into `error_buf`.
#[derive(Debug, Clone)]
pub struct Error {
    /// Coarse-grained error category.
    pub category: ErrorCategory,
    /// Numeric error code, see [`codes`].
    pub code: u16,
    /// Human-readable detail, e.g. the offset and the specific mismatch.
    pub message: String,
}

impl Error {
    /// Construct an error from its category, code, and message.
    pub fn new(category: ErrorCategory, code: u16, message: impl Into<String>) -> Self {
        Self { category, code, message: message.into() }
    }

    /// `BadMagic`: the envelope's magic bytes matched no accepted preamble.
    pub fn bad_magic(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Parse, codes::BAD_MAGIC, message)
    }

    /// `BadVersion`: the envelope's version field matched no accepted preamble.
    pub fn bad_version(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Parse, codes::BAD_VERSION, message)
    }

    /// `BadLayer`: the envelope's layer field matched no accepted preamble.
    pub fn bad_layer(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Parse, codes::BAD_LAYER, message)
    }

    /// `TruncatedInput`: a bounds check failed on a read.
    pub fn truncated_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Parse, codes::TRUNCATED_INPUT, message)
    }

    /// `BadLeb`: an over-long or unterminated LEB128 integer.
    pub fn bad_leb(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Parse, codes::BAD_LEB, message)
    }

    /// `SectionSizeMismatch`: a section decoder under- or over-consumed its body.
    pub fn section_size_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Parse, codes::SECTION_SIZE_MISMATCH, message)
    }

    /// `DuplicateSection`: a section id occurred more than once.
    pub fn duplicate_section(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Parse, codes::DUPLICATE_SECTION, message)
    }

    /// `UnknownValType(tag)`: an unrecognized `valtype` discriminant byte.
    pub fn unknown_val_type(tag: u8) -> Self {
        Self::new(
            ErrorCategory::Parse,
            codes::UNKNOWN_VAL_TYPE,
            format!("unknown valtype tag {tag:#04x}"),
        )
    }

    /// `UnknownAliasTarget`: an unrecognized alias `target_kind` byte.
    pub fn unknown_alias_target(target_kind: u8) -> Self {
        Self::new(
            ErrorCategory::Parse,
            codes::UNKNOWN_ALIAS_TARGET,
            format!("unknown alias target_kind {target_kind:#04x}"),
        )
    }

    /// `UnknownInstanceKind`: a core-instance `kind` byte outside `{0x00, 0x01}`.
    pub fn unknown_instance_kind(kind: u8) -> Self {
        Self::new(
            ErrorCategory::Parse,
            codes::UNKNOWN_INSTANCE_KIND,
            format!("unknown core instance kind {kind:#04x}"),
        )
    }

    /// `UnknownCanonicalOption`: a canonical option kind outside the defined set.
    pub fn unknown_canonical_option(kind: u8) -> Self {
        Self::new(
            ErrorCategory::Parse,
            codes::UNKNOWN_CANONICAL_OPTION,
            format!("unknown canonical option kind {kind:#04x}"),
        )
    }

    /// A canonical-function `func_kind` byte outside the defined set.
    pub fn bad_canonical_kind(kind: u8) -> Self {
        Self::new(
            ErrorCategory::Parse,
            codes::BAD_CANONICAL_KIND,
            format!("unknown canonical func_kind {kind:#04x}"),
        )
    }

    /// `UnsupportedStartCount`: the start section declared more than one start function.
    pub fn unsupported_start_count(count: u32) -> Self {
        Self::new(
            ErrorCategory::Parse,
            codes::UNSUPPORTED_START_COUNT,
            format!("start section declared {count} entries, at most 1 is supported"),
        )
    }

    /// `NonPrimitiveResourceRep`: a resource type's representation was not primitive.
    pub fn non_primitive_resource_rep() -> Self {
        Self::new(
            ErrorCategory::Parse,
            codes::NON_PRIMITIVE_RESOURCE_REP,
            "resource representation type is not a primitive valtype",
        )
    }

    /// `CoreLoaderError`: the embedded core-module loader rejected a module.
    pub fn core_loader_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Resource, codes::CORE_LOADER_ERROR, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WASM component load failed: {}", self.message)
    }
}

impl std::error::Error for Error {}
