// wrt-decoder
// Module: embedded core-module loader collaborator
//
// Copyright (c) 2025 The WRT Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The narrow contract this loader uses to hand embedded core WebAssembly
//! modules to an external, already-validated core-module parser.
//!
//! Per spec §1 the core Wasm parser is an out-of-scope black box: "given a
//! byte slice of a core module, produce an opaque handle, or report a parse
//! error; later release it." This module defines that contract as a trait so
//! hosts can plug in a real core-module validator (e.g. a `wasmparser`-backed
//! one) without this crate depending on it.

use wrt_error::{Error, Result};

/// An opaque handle to a loaded core module, minted by a [`CoreModuleLoader`].
///
/// `wrt-decoder` never inspects a handle's contents; it only stores it on
/// the owning [`crate::component::CoreModule`] and hands it back to
/// [`CoreModuleLoader::unload`] when the component is unloaded.
#[derive(Debug)]
pub struct CoreModuleHandle(Box<dyn core::any::Any + Send + Sync>);

impl CoreModuleHandle {
    /// Wrap an arbitrary loader-defined payload as an opaque handle.
    pub fn new<T: core::any::Any + Send + Sync>(payload: T) -> Self {
        Self(Box::new(payload))
    }
}

/// The external collaborator contract for embedded core modules.
///
/// Implementations must be reentrant: `wrt-decoder` may call `load_from_sections`
/// concurrently on independent inputs from independent threads (spec §5).
pub trait CoreModuleLoader {
    /// Parse a core module's raw bytes (the `code:<size bytes>` of a Core
    /// Module section entry) and return an opaque handle, or a
    /// [`wrt_error::Error`] describing why the module was rejected.
    fn load_from_sections(&self, bytes: &[u8]) -> Result<CoreModuleHandle>;

    /// Release a handle previously returned by `load_from_sections`.
    fn unload(&self, handle: CoreModuleHandle);
}

/// A minimal [`CoreModuleLoader`] that checks only the core Wasm preamble
/// (`\0asm` + version `1`) and stores nothing else.
///
/// Deep validation of embedded core modules is explicitly out of scope for
/// this loader (spec §1); this implementation exists so `load`/`unload` are
/// directly usable without a host supplying its own loader, and so the
/// ownership/failure-unwinding tests in this crate don't need one either.
#[derive(Debug, Default)]
pub struct PreambleOnlyCoreLoader;

const CORE_WASM_MAGIC: [u8; 4] = [0x00, 0x61, 0x73, 0x6D];
const CORE_WASM_VERSION: [u8; 4] = [0x01, 0x00, 0x00, 0x00];

impl CoreModuleLoader for PreambleOnlyCoreLoader {
    fn load_from_sections(&self, bytes: &[u8]) -> Result<CoreModuleHandle> {
        if bytes.len() < 8 || bytes[0..4] != CORE_WASM_MAGIC || bytes[4..8] != CORE_WASM_VERSION {
            return Err(Error::core_loader_error(
                "embedded core module has an invalid \\0asm preamble",
            ));
        }
        Ok(CoreModuleHandle::new(bytes.len()))
    }

    fn unload(&self, _handle: CoreModuleHandle) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_preamble() {
        let loader = PreambleOnlyCoreLoader;
        let mut bytes = CORE_WASM_MAGIC.to_vec();
        bytes.extend_from_slice(&CORE_WASM_VERSION);
        let handle = loader.load_from_sections(&bytes).unwrap();
        loader.unload(handle);
    }

    #[test]
    fn rejects_bad_preamble() {
        let loader = PreambleOnlyCoreLoader;
        assert!(loader.load_from_sections(&[0u8; 8]).is_err());
    }

    #[test]
    fn rejects_short_input() {
        let loader = PreambleOnlyCoreLoader;
        assert!(loader.load_from_sections(&[0u8; 4]).is_err());
    }
}
