// wrt-decoder
// Module: crate root
//
// Copyright (c) 2025 The WRT Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A loader for the WebAssembly Component Model's binary format.
//!
//! This crate turns a byte slice holding a complete component binary into an
//! owned [`component::Component`] tree: the preamble, every section kind
//! (core modules, core/component instances, aliases, the unified type
//! space, canonical functions, the start function, imports and exports),
//! and the recursive value-type lattice nested inside them.
//!
//! Parsing embedded core WebAssembly modules is explicitly out of scope:
//! callers supply a [`core_loader::CoreModuleLoader`] implementation and this
//! crate treats it as an opaque collaborator, handing it raw module bytes
//! and storing back whatever opaque handle it returns.
//!
//! ```
//! use wrt_decoder::core_loader::PreambleOnlyCoreLoader;
//!
//! let mut bytes = vec![0x00, 0x61, 0x73, 0x6D]; // magic
//! bytes.extend_from_slice(&1u16.to_le_bytes()); // version
//! bytes.extend_from_slice(&1u16.to_le_bytes()); // layer
//!
//! let loader = PreambleOnlyCoreLoader;
//! let component = wrt_decoder::load(&bytes, &loader).expect("valid empty component");
//! assert!(component.imports.is_empty());
//! wrt_decoder::unload(component, &loader);
//! ```
//!
//! ## Feature flags
//!
//! - `std` (default): pulls in `wrt-error/std`. This crate does not
//!   currently offer a `no_std` build (unlike its sibling `wrt-error`); the
//!   feature exists so the two crates' feature sets line up.
//! - `logging` (default): emits `log::trace!`/`log::debug!` diagnostics
//!   during decoding via the optional `log` dependency.

pub mod component;
pub mod core_loader;
pub mod reader;

pub use component::Component;
pub use core_loader::CoreModuleLoader;

/// Load a full component from `bytes`, delegating embedded core modules to
/// `core_loader`. See [`component::decode::load`] for the full contract.
pub fn load(bytes: &[u8], core_loader: &dyn CoreModuleLoader) -> wrt_error::Result<Component> {
    let result = component::decode::load(bytes, core_loader);
    #[cfg(feature = "logging")]
    if let Err(ref err) = result {
        log::debug!("component load failed: {err}");
    }
    result
}

/// Release a loaded component's resources, including every embedded core
/// module's handle. See [`component::decode::unload`].
pub fn unload(component: Component, core_loader: &dyn CoreModuleLoader) {
    component::decode::unload(component, core_loader);
}
