// wrt-error
// Module: Error handling
//
// Copyright (c) 2025 The WRT Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! Error handling for the WebAssembly Component Model loader.
//!
//! This crate provides a single, categorized [`Error`] type and the numeric
//! [`codes`] table it is built from. It exists as its own crate, separate
//! from `wrt-decoder`, the same way the host workspace keeps error handling
//! decoupled from the logic that raises errors.
//!
//! ```
//! use wrt_error::{Error, Result};
//!
//! fn read_one(bytes: &[u8]) -> Result<u8> {
//!     bytes.first().copied().ok_or_else(|| Error::truncated_input("expected at least one byte"))
//! }
//! ```

/// Numeric error codes, grouped by subsystem.
pub mod codes;
/// The [`Error`] type and its category enum.
pub mod errors;

pub use errors::{Error, ErrorCategory};

/// A specialized `Result` type for component-loader operations.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_has_required_prefix() {
        let err = Error::bad_magic("saw deadbeef");
        assert_eq!(err.to_string(), "WASM component load failed: saw deadbeef");
    }

    #[test]
    fn category_is_preserved() {
        let err = Error::core_loader_error("bad core module");
        assert_eq!(err.category, ErrorCategory::Resource);
        assert_eq!(err.code, codes::CORE_LOADER_ERROR);
    }
}
