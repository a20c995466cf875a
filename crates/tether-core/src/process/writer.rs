//! Best-effort scalar writes into a sibling process.

use std::ffi::c_void;

use tracing::debug;
use windows::Win32::System::Diagnostics::Debug::WriteProcessMemory;
use windows::Win32::System::Threading::{PROCESS_VM_OPERATION, PROCESS_VM_WRITE};

use super::handle::{find_process_id, open_process};
use super::{ScalarWriter, WriteOutcome};
use crate::error::{Error, Result};
use crate::memory::Address;

/// Writes scalars into a process located by executable name.
///
/// Every call stands alone: enumerate processes, open a write handle, store
/// one value, release the handle. No handle is cached across calls, so a
/// process that restarts between writes is picked up transparently and a
/// vanished one degrades to a no-op.
pub struct ExternalProcessWriter {
    process_name: String,
}

impl ExternalProcessWriter {
    pub fn new(process_name: impl Into<String>) -> Self {
        Self {
            process_name: process_name.into(),
        }
    }

    pub fn process_name(&self) -> &str {
        &self.process_name
    }
}

impl ScalarWriter for ExternalProcessWriter {
    fn write_f32(&self, addr: Address, value: f32) -> Result<WriteOutcome> {
        let Some(pid) = find_process_id(&self.process_name)? else {
            debug!(
                "no process named {:?}; skipping write to {}",
                self.process_name, addr
            );
            return Ok(WriteOutcome::ProcessAbsent);
        };

        let handle = match open_process(pid, PROCESS_VM_WRITE | PROCESS_VM_OPERATION) {
            Ok(handle) => handle,
            Err(e) => {
                // The process can exit between the snapshot and the open;
                // that is the same no-op as not finding it at all.
                if find_process_id(&self.process_name)?.is_none() {
                    return Ok(WriteOutcome::ProcessAbsent);
                }
                return Err(e);
            }
        };

        let bytes = value.to_le_bytes();
        // SAFETY: the handle was opened with VM_WRITE rights and stays alive
        // for the duration of the call; the source buffer is 4 bytes on the
        // stack.
        unsafe {
            WriteProcessMemory(
                handle.0,
                addr.raw() as usize as *const c_void,
                bytes.as_ptr() as *const c_void,
                bytes.len(),
                None,
            )
        }
        .map_err(|e| Error::AccessFault {
            address: addr.raw(),
            message: e.to_string(),
        })?;

        Ok(WriteOutcome::Written)
    }
}
