//! Read-only access to the global time-scale float array.
//!
//! One scan at startup resolves the array's absolute base address. Slot 0
//! holds the scale this mod last requested (read back for confirmation),
//! slot 2 the scale the simulation is currently applying. Mutation of the
//! effective scale happens elsewhere entirely; this registry deliberately
//! exposes no write path.

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::memory::layout::time_scale;
use crate::memory::{Address, MemoryRange, MemoryView};
use crate::scan::{Scanner, Signature, resolve_relative, time_scale_signature};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Uninitialized,
    /// Cached base address of the float array.
    Ready(Address),
    /// The scan failed; the registry is unusable for the process lifetime.
    Failed,
}

#[derive(Debug)]
pub struct TimeScaleRegistry {
    state: State,
}

impl TimeScaleRegistry {
    pub fn new() -> Self {
        Self {
            state: State::Uninitialized,
        }
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.state, State::Ready(_))
    }

    /// One-shot initialization using the builtin time-scale signature.
    pub fn init<M: MemoryView>(&mut self, view: &M, module: MemoryRange) -> Result<()> {
        self.init_with(view, module, &time_scale_signature())
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

        let result = Self::resolve_base(view, module, signature);
        match result {
            Ok(base) => {
                info!("time-scale array resolved at {base}");
                self.state = State::Ready(base);
                Ok(())
            }
            Err(e) => {
                warn!("time-scale signature resolution failed: {e}");
                self.state = State::Failed;
                Err(e)
            }
        }
    }

    fn resolve_base<M: MemoryView>(
        view: &M,
        module: MemoryRange,
        signature: &Signature,
    ) -> Result<Address> {
        let pattern = signature.pattern()?;
        let anchor = Scanner::new(view).scan(module, &pattern)?;
        resolve_relative(view, anchor, signature.disp_offset, signature.instr_len)
    }

    /// The cached array base address.
    pub fn base(&self) -> Result<Address> {
        match self.state {
            State::Ready(base) => Ok(base),
            _ => Err(Error::NotInitialized),
        }
    }

    /// The scale this mod last requested (slot 0).
    pub fn requested<M: MemoryView>(&self, view: &M) -> Result<f32> {
        view.read_f32(self.base()?.offset(time_scale::REQUESTED))
    }

    /// The scale currently in effect in the simulation (slot 2).
    pub fn effective<M: MemoryView>(&self, view: &M) -> Result<f32> {
        view.read_f32(self.base()?.offset(time_scale::EFFECTIVE))
    }
}

impl Default for TimeScaleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::mock::{MockMemory, MockMemoryBuilder};

    const MODULE_BASE: u64 = 0x1000;
    const ARRAY_BASE: u64 = 0x1080;

    /// Module image with the time-scale signature at +0x10; the movss
    /// displacement points the array base at 0x1080.
    fn mock_process() -> MockMemory {
        // Anchor 0x1010, instruction end 0x1018, so disp = 0x1080 - 0x1018.
        let disp = (ARRAY_BASE - 0x1018) as i32;
        let mut site = vec![0xF3, 0x0F, 0x10, 0x05];
        site.extend_from_slice(&disp.to_le_bytes());
        site.extend_from_slice(&[0xF3, 0x0F, 0x59, 0x05, 0x00, 0x00, 0x00, 0x00]);
        site.extend_from_slice(&[0x0F, 0x2F, 0x05]);

        MockMemoryBuilder::new(MODULE_BASE)
            .write_bytes(MODULE_BASE + 0x10, &site)
            .write_f32(ARRAY_BASE, 0.5)
            .write_f32(ARRAY_BASE + 4, 0.0)
            .write_f32(ARRAY_BASE + 8, 1.25)
            .pad_to(0x100)
            .build()
    }

    #[test]
    fn test_init_resolves_array_base() {
        let memory = mock_process();
        let mut registry = TimeScaleRegistry::new();
        registry.init(&memory, memory.range()).unwrap();
        assert_eq!(registry.base().unwrap(), Address::new(ARRAY_BASE));
    }

    #[test]
    fn test_requested_and_effective_slots() {
        let memory = mock_process();
        let mut registry = TimeScaleRegistry::new();
        registry.init(&memory, memory.range()).unwrap();

        assert_eq!(registry.requested(&memory).unwrap(), 0.5);
        assert_eq!(registry.effective(&memory).unwrap(), 1.25);
    }

    #[test]
    fn test_reads_are_live() {
        let memory = mock_process();
        let mut registry = TimeScaleRegistry::new();
        registry.init(&memory, memory.range()).unwrap();

        // Same registry against updated memory: the address is cached, the
        // value is not.
        let updated = MockMemoryBuilder::new(MODULE_BASE)
            .write_f32(ARRAY_BASE + 8, 0.25)
            .pad_to(0x100)
            .build();
        assert_eq!(registry.effective(&updated).unwrap(), 0.25);
    }

    #[test]
    fn test_query_before_init_fails() {
        let memory = mock_process();
        let registry = TimeScaleRegistry::new();
        assert!(matches!(
            registry.requested(&memory),
            Err(Error::NotInitialized)
        ));
    }

    #[test]
    fn test_failed_scan_is_terminal() {
        let memory = MockMemoryBuilder::new(MODULE_BASE).pad_to(0x100).build();
        let mut registry = TimeScaleRegistry::new();

        assert!(matches!(
            registry.init(&memory, memory.range()),
            Err(Error::NotFound)
        ));
        assert!(matches!(
            registry.effective(&memory),
            Err(Error::NotInitialized)
        ));
        assert!(matches!(
            registry.init(&memory, memory.range()),
            Err(Error::NotFound)
        ));
    }
}
