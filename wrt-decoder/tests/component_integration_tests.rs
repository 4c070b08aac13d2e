//! End-to-end tests driving the crate's public `load`/`unload` entry points
//! only (no `component::` internals), mirroring the teacher's
//! `tests/component_integration_test.rs` placement.

use std::cell::Cell;

use wrt_decoder::core_loader::{CoreModuleHandle, CoreModuleLoader};
use wrt_decoder::{load, unload};
use wrt_error::Result;

const MAGIC: [u8; 4] = [0x00, 0x61, 0x73, 0x6D];

fn preamble(version: u16, layer: u16) -> Vec<u8> {
    let mut bytes = MAGIC.to_vec();
    bytes.extend_from_slice(&version.to_le_bytes());
    bytes.extend_from_slice(&layer.to_le_bytes());
    bytes
}

/// A loader that counts how many modules it has loaded and unloaded, so
/// tests can assert every loaded handle is eventually released exactly
/// once (spec.md §6's unload-invalidates-the-handle invariant).
#[derive(Default)]
struct CountingLoader {
    loaded: Cell<u32>,
    unloaded: Cell<u32>,
}

impl CoreModuleLoader for CountingLoader {
    fn load_from_sections(&self, bytes: &[u8]) -> Result<CoreModuleHandle> {
        self.loaded.set(self.loaded.get() + 1);
        Ok(CoreModuleHandle::new(bytes.len()))
    }

    fn unload(&self, _handle: CoreModuleHandle) {
        self.unloaded.set(self.unloaded.get() + 1);
    }
}

#[test]
fn empty_component_round_trips_through_load_and_unload() {
    // spec.md S1.
    let loader = CountingLoader::default();
    let component = load(&preamble(1, 1), &loader).expect("empty component is valid");
    assert_eq!(component.version, 1);
    assert!(component.core_modules.is_empty());
    unload(component, &loader);
    assert_eq!(loader.loaded.get(), 0);
    assert_eq!(loader.unloaded.get(), 0);
}

#[test]
fn unload_releases_every_embedded_core_module_in_one_section_exactly_once() {
    let loader = CountingLoader::default();
    let mut bytes = preamble(1, 1);
    let module = [0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];
    // One Core Module section, listing 3 embedded modules as a
    // count-prefixed sequence of length-prefixed blobs.
    let mut body = vec![0x03];
    for _ in 0..3 {
        body.push(module.len() as u8);
        body.extend_from_slice(&module);
    }
    bytes.push(0); // Core Module section id
    bytes.push(body.len() as u8);
    bytes.extend_from_slice(&body);

    let component = load(&bytes, &loader).unwrap();
    assert_eq!(component.core_modules.len(), 3);
    assert_eq!(loader.loaded.get(), 3);
    unload(component, &loader);
    assert_eq!(loader.unloaded.get(), 3);
}

#[test]
fn single_core_module_section_loads_and_unloads_once() {
    let loader = CountingLoader::default();
    let mut bytes = preamble(1, 1);
    let module = [0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];
    let mut body = vec![0x01, module.len() as u8];
    body.extend_from_slice(&module);
    bytes.push(0);
    bytes.push(body.len() as u8);
    bytes.extend_from_slice(&body);

    let component = load(&bytes, &loader).unwrap();
    assert_eq!(component.core_modules.len(), 1);
    assert_eq!(loader.loaded.get(), 1);
    unload(component, &loader);
    assert_eq!(loader.unloaded.get(), 1);
}

#[test]
fn a_rejected_core_module_leaves_nothing_to_unload() {
    struct RejectingLoader;
    impl CoreModuleLoader for RejectingLoader {
        fn load_from_sections(&self, _bytes: &[u8]) -> Result<CoreModuleHandle> {
            Err(wrt_error::Error::core_loader_error("always rejects"))
        }
        fn unload(&self, _handle: CoreModuleHandle) {
            panic!("unload should never be called for a module that never loaded");
        }
    }

    let loader = RejectingLoader;
    let mut bytes = preamble(1, 1);
    bytes.push(0);
    bytes.push(4);
    bytes.extend_from_slice(&[1, 2, 3, 4]);

    assert!(load(&bytes, &loader).is_err());
}

#[test]
fn duplicate_import_sections_fail_the_whole_load() {
    // spec.md S5, exercised through the public API.
    let loader = CountingLoader::default();
    let mut bytes = preamble(1, 1);
    let empty_import_section = [9u8, 0x01, 0x00];
    bytes.extend_from_slice(&empty_import_section);
    bytes.extend_from_slice(&empty_import_section);
    let err = load(&bytes, &loader).unwrap_err();
    assert_eq!(err.code, wrt_error::codes::DUPLICATE_SECTION);
}

#[test]
fn unknown_section_ids_are_tolerated() {
    let loader = CountingLoader::default();
    let mut bytes = preamble(1, 1);
    bytes.push(250);
    bytes.push(3);
    bytes.extend_from_slice(&[1, 2, 3]);
    let component = load(&bytes, &loader).expect("unknown sections are skipped, not fatal");
    assert!(component.exports.is_empty());
}

#[test]
fn truncated_input_after_preamble_is_an_error() {
    let loader = CountingLoader::default();
    let mut bytes = preamble(1, 1);
    bytes.push(9); // Import section id, with no size/body following
    assert!(load(&bytes, &loader).is_err());
}
