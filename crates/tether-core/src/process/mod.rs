//! Cross-process write path.
//!
//! Reads stay in-process through [`MemoryView`](crate::memory::MemoryView);
//! writes cross the process boundary through a [`ScalarWriter`] that locates
//! the target process by name on every call. The asymmetry is deliberate:
//! the game process is treated as potentially separate from the host.

#[cfg(target_os = "windows")]
pub(crate) mod handle;
#[cfg(target_os = "windows")]
mod writer;

#[cfg(target_os = "windows")]
pub use handle::{find_process_id, main_module_range};
#[cfg(target_os = "windows")]
pub use writer::ExternalProcessWriter;

use crate::error::Result;
use crate::memory::Address;

/// Result of a cross-process write attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The scalar was stored in the target process.
    Written,
    /// No process matched the configured name; nothing was written.
    ///
    /// This is a successful no-op, not an error: the write path is
    /// best-effort and a vanished process simply skips the update.
    ProcessAbsent,
}

/// Writes a single scalar into another process's address space.
pub trait ScalarWriter {
    fn write_f32(&self, addr: Address, value: f32) -> Result<WriteOutcome>;
}
