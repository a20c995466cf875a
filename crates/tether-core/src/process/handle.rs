//! Win32 handle plumbing: scoped handles, process lookup, module ranges.

use std::mem::size_of;

use windows::Win32::Foundation::{BOOL, CloseHandle, HANDLE};
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, MODULEENTRY32W, Module32FirstW, PROCESSENTRY32W, Process32FirstW,
    Process32NextW, TH32CS_SNAPMODULE, TH32CS_SNAPMODULE32, TH32CS_SNAPPROCESS,
};
use windows::Win32::System::Threading::{OpenProcess, PROCESS_ACCESS_RIGHTS};

use crate::error::{Error, Result};
use crate::memory::{Address, MemoryRange};

/// Handle wrapper that closes on every exit path.
pub(crate) struct SafeHandle(pub HANDLE);

impl Drop for SafeHandle {
    fn drop(&mut self) {
        if !self.0.is_invalid() {
            // SAFETY: the handle is owned by this wrapper and not used after
            // drop. Closing the current-process pseudo-handle is a no-op.
            unsafe {
                let _ = CloseHandle(self.0);
            }
        }
    }
}

fn utf16_name(raw: &[u16]) -> String {
    let len = raw.iter().position(|&c| c == 0).unwrap_or(raw.len());
    String::from_utf16_lossy(&raw[..len])
}

/// Find a running process whose executable name matches `name`.
///
/// Windows executable names compare case-insensitively; the match is
/// otherwise exact. Returns `Ok(None)` when no process matches.
pub fn find_process_id(name: &str) -> Result<Option<u32>> {
    // SAFETY: a process snapshot handle is closed by SafeHandle on drop.
    let snapshot = SafeHandle(
        unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) }
            .map_err(|e| Error::ProcessOpenFailed(format!("process snapshot: {e}")))?,
    );

    let mut entry = PROCESSENTRY32W {
        dwSize: size_of::<PROCESSENTRY32W>() as u32,
        ..Default::default()
    };

    // SAFETY: entry.dwSize is initialized to the struct size as required.
    if unsafe { Process32FirstW(snapshot.0, &mut entry) }.is_err() {
        return Ok(None);
    }
    loop {
        if utf16_name(&entry.szExeFile).eq_ignore_ascii_case(name) {
            return Ok(Some(entry.th32ProcessID));
        }
        // SAFETY: same entry is reused for iteration; failure means the end
        // of the snapshot.
        if unsafe { Process32NextW(snapshot.0, &mut entry) }.is_err() {
            return Ok(None);
        }
    }
}

/// Open a process handle with the given access rights, scoped to a
/// [`SafeHandle`].
pub(crate) fn open_process(pid: u32, access: PROCESS_ACCESS_RIGHTS) -> Result<SafeHandle> {
    // SAFETY: OpenProcess only reads its arguments; the returned handle is
    // owned by the SafeHandle.
    let handle = unsafe { OpenProcess(access, BOOL::from(false), pid) }
        .map_err(|e| Error::ProcessOpenFailed(format!("pid {pid}: {e}")))?;
    Ok(SafeHandle(handle))
}

/// Base address and size of a process's main module image.
///
/// The first module in the snapshot is the executable itself.
pub fn main_module_range(pid: u32) -> Result<MemoryRange> {
    // SAFETY: a module snapshot handle is closed by SafeHandle on drop.
    let snapshot = SafeHandle(
        unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPMODULE | TH32CS_SNAPMODULE32, pid) }
            .map_err(|e| Error::ProcessOpenFailed(format!("module snapshot for pid {pid}: {e}")))?,
    );

    let mut entry = MODULEENTRY32W {
        dwSize: size_of::<MODULEENTRY32W>() as u32,
        ..Default::default()
    };

    // SAFETY: entry.dwSize is initialized to the struct size as required.
    unsafe { Module32FirstW(snapshot.0, &mut entry) }
        .map_err(|e| Error::ProcessOpenFailed(format!("main module for pid {pid}: {e}")))?;

    Ok(MemoryRange::new(
        Address::new(entry.modBaseAddr as u64),
        entry.modBaseSize as usize,
    ))
}
