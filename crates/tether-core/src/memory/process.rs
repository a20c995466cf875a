//! Process memory views backed by `ReadProcessMemory`.
//!
//! The same type serves both modes the crate runs in: a view of the current
//! process (the mod's normal in-process mode, via the pseudo-handle) and a
//! read-only attachment to another process located by name (the CLI's
//! diagnostic mode).

use std::ffi::c_void;

use tracing::debug;
use windows::Win32::System::Diagnostics::Debug::ReadProcessMemory;
use windows::Win32::System::Threading::{
    GetCurrentProcess, GetCurrentProcessId, PROCESS_QUERY_INFORMATION, PROCESS_VM_READ,
};

use crate::error::{Error, Result};
use crate::memory::{Address, MemoryRange, MemoryView};
use crate::process::handle::{SafeHandle, find_process_id, main_module_range, open_process};

pub struct ProcessMemory {
    handle: SafeHandle,
    pid: u32,
    module: MemoryRange,
}

impl ProcessMemory {
    /// View of the process this code is running in.
    pub fn current() -> Result<Self> {
        // SAFETY: GetCurrentProcess returns the pseudo-handle; closing it on
        // drop has no effect.
        let handle = SafeHandle(unsafe { GetCurrentProcess() });
        let pid = unsafe { GetCurrentProcessId() };
        let module = main_module_range(pid)?;
        Ok(Self {
            handle,
            pid,
            module,
        })
    }

    /// Attach read-only to a running process by executable name.
    ///
    /// Returns `Ok(None)` when no process matches the name.
    pub fn open_by_name(name: &str) -> Result<Option<Self>> {
        let Some(pid) = find_process_id(name)? else {
            return Ok(None);
        };
        let handle = open_process(pid, PROCESS_VM_READ | PROCESS_QUERY_INFORMATION)?;
        let module = main_module_range(pid)?;
        debug!(
            "attached to {name:?} (pid {pid}, module {} + {:#x})",
            module.start, module.len
        );
        Ok(Some(Self {
            handle,
            pid,
            module,
        }))
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Range of the process's main module image, the default scan range.
    pub fn module_range(&self) -> MemoryRange {
        self.module
    }
}

impl MemoryView for ProcessMemory {
    fn read_bytes(&self, addr: Address, len: usize) -> Result<Vec<u8>> {
        if addr.is_null() {
            return Err(Error::AccessFault {
                address: 0,
                message: "null address".to_string(),
            });
        }

        let mut buffer = vec![0u8; len];
        let mut read = 0usize;
        // SAFETY: the buffer is `len` bytes and outlives the call; a failed
        // or partial read is reported through the return value, not a crash.
        unsafe {
            ReadProcessMemory(
                self.handle.0,
                addr.raw() as usize as *const c_void,
                buffer.as_mut_ptr() as *mut c_void,
                len,
                Some(&mut read),
            )
        }
        .map_err(|e| Error::AccessFault {
            address: addr.raw(),
            message: e.to_string(),
        })?;

        if read != len {
            return Err(Error::AccessFault {
                address: addr.raw(),
                message: format!("short read: expected {len} bytes, got {read}"),
            });
        }

        Ok(buffer)
    }
}
