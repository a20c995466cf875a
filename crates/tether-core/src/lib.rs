//! # tether-core
//!
//! Core library for the Tether mod: locating runtime data inside a live
//! game process and exposing typed access to it.
//!
//! This crate provides:
//! - Byte-signature scanning over a loaded module image
//! - Decoding of RIP-relative displacement fields into absolute addresses
//! - Typed, offset-based memory reads behind the [`MemoryView`] trait
//! - Best-effort cross-process scalar writes by process name
//! - One-shot registries for the vehicle handling block offset and the
//!   global time-scale array
//!
//! Scanning and resolution run once per process lifetime; reads are always
//! live. Nothing here retries a failed scan or survives a module reload.

pub mod error;
pub mod memory;
pub mod process;
pub mod registry;
pub mod scan;

pub use error::{Error, Result};
pub use memory::{Address, MemoryRange, MemoryView};
#[cfg(target_os = "windows")]
pub use memory::ProcessMemory;
#[cfg(target_os = "windows")]
pub use process::{ExternalProcessWriter, find_process_id, main_module_range};
pub use process::{ScalarWriter, WriteOutcome};
pub use registry::{HandlingRegistry, TimeScaleRegistry};
pub use scan::{
    Pattern, Scanner, Signature, SignatureSet, builtin_signatures, find_in_buffer,
    handling_signature, load_signatures, read_displacement, resolve_relative, save_signatures,
    time_scale_signature,
};
