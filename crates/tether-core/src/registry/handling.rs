//! Per-vehicle handling block access.
//!
//! One scan at startup resolves a single integer: the byte offset of the
//! handling block pointer inside every vehicle object. Queries then walk a
//! two-level indirection (vehicle -> handling block pointer -> field) with
//! the caller supplying the vehicle base and the field offset.

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::memory::{Address, MemoryRange, MemoryView};
use crate::process::{ScalarWriter, WriteOutcome};
use crate::scan::{Scanner, Signature, handling_signature, read_displacement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Uninitialized,
    /// Cached handling pointer offset within a vehicle object.
    Ready(u32),
    /// The scan failed; the registry is unusable for the process lifetime.
    Failed,
}

#[derive(Debug)]
pub struct HandlingRegistry {
    state: State,
}

impl HandlingRegistry {
    pub fn new() -> Self {
        Self {
            state: State::Uninitialized,
        }
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.state, State::Ready(_))
    }

    /// One-shot initialization against the module image using the builtin
    /// handling signature. A second call on an initialized registry is a
    /// no-op; a failed scan leaves the registry permanently unusable so the
    /// dependent feature can disable itself.
    pub fn init<M: MemoryView>(&mut self, view: &M, module: MemoryRange) -> Result<()> {
        self.init_with(view, module, &handling_signature())
    }

    pub fn init_with<M: MemoryView>(
        &mut self,
        view: &M,
        module: MemoryRange,
        signature: &Signature,
    ) -> Result<()> {
        match self.state {
            State::Ready(_) => return Ok(()),
            State::Failed => return Err(Error::NotFound),
            State::Uninitialized => {}
        }

        let result = Self::resolve_offset(view, module, signature);
        match result {
            Ok(offset) => {
                info!("handling pointer offset resolved: {offset:#x}");
                self.state = State::Ready(offset);
                Ok(())
            }
            Err(e) => {
                warn!("handling signature resolution failed: {e}");
                self.state = State::Failed;
                Err(e)
            }
        }
    }

    fn resolve_offset<M: MemoryView>(
        view: &M,
        module: MemoryRange,
        signature: &Signature,
    ) -> Result<u32> {
        let pattern = signature.pattern()?;
        let anchor = Scanner::new(view).scan(module, &pattern)?;
        let disp = read_displacement(view, anchor, signature.disp_offset)?;
        // The displacement here is a structure field offset, not a relative
        // address; a non-positive value means the match was bogus.
        if disp <= 0 {
            return Err(Error::NotFound);
        }
        Ok(disp as u32)
    }

    /// The cached handling pointer offset.
    pub fn offset(&self) -> Result<u32> {
        match self.state {
            State::Ready(offset) => Ok(offset),
            _ => Err(Error::NotInitialized),
        }
    }

    fn field_address<M: MemoryView>(
        &self,
        view: &M,
        vehicle: Address,
        field_offset: u64,
    ) -> Result<Address> {
        let offset = self.offset()?;
        let block = view.read_addr(vehicle.offset(offset as u64))?;
        if block.is_null() {
            return Err(Error::AccessFault {
                address: vehicle.offset(offset as u64).raw(),
                message: "null handling block pointer".to_string(),
            });
        }
        Ok(block.offset(field_offset))
    }

    /// Live read of `*(*(vehicle + cached_offset) + field_offset)`.
    pub fn get_value<M: MemoryView>(
        &self,
        view: &M,
        vehicle: Address,
        field_offset: u64,
    ) -> Result<f32> {
        let addr = self.field_address(view, vehicle, field_offset)?;
        view.read_f32(addr)
    }

    /// Store a field through the cross-process writer.
    ///
    /// The target address is resolved on the local read path; only the store
    /// itself crosses the process boundary. The game process is treated as
    /// potentially separate from the host, so the read/write asymmetry is
    /// load-bearing.
    pub fn set_value<M: MemoryView, W: ScalarWriter>(
        &self,
        view: &M,
        writer: &W,
        vehicle: Address,
        field_offset: u64,
        value: f32,
    ) -> Result<WriteOutcome> {
        let addr = self.field_address(view, vehicle, field_offset)?;
        writer.write_f32(addr, value)
    }
}

impl Default for HandlingRegistry {
    fn default() -> Self {
        Self::new()
    }
}
