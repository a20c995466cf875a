//! Mock memory and mock writer for testing.
//!
//! A [`MockMemory`] is a contiguous byte buffer pinned at a chosen base
//! address; reads outside the buffer fail with `AccessFault` the same way a
//! real unmapped access does. [`MockWriter`] records cross-process writes
//! instead of performing them.

use std::cell::RefCell;

use crate::error::{Error, Result};
use crate::memory::{Address, MemoryRange, MemoryView};
use crate::process::{ScalarWriter, WriteOutcome};

/// In-memory stand-in for a process address space.
#[derive(Debug, Clone)]
pub struct MockMemory {
    base: Address,
    bytes: Vec<u8>,
}

impl MockMemory {
    pub fn new(base: u64, bytes: Vec<u8>) -> Self {
        Self {
            base: Address::new(base),
            bytes,
        }
    }

    /// The full mocked range, usable as a scan range.
    pub fn range(&self) -> MemoryRange {
        MemoryRange::new(self.base, self.bytes.len())
    }
}

impl MemoryView for MockMemory {
    fn read_bytes(&self, addr: Address, len: usize) -> Result<Vec<u8>> {
        let fault = |message: &str| Error::AccessFault {
            address: addr.raw(),
            message: message.to_string(),
        };

        let start = addr
            .raw()
            .checked_sub(self.base.raw())
            .ok_or_else(|| fault("address below mocked range"))? as usize;
        let end = start
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| fault("address beyond mocked range"))?;

        Ok(self.bytes[start..end].to_vec())
    }
}

/// Builder assembling a [`MockMemory`] from absolute-addressed writes.
///
/// The buffer grows automatically; untouched bytes are zero.
#[derive(Debug, Default)]
pub struct MockMemoryBuilder {
    base: u64,
    bytes: Vec<u8>,
}

impl MockMemoryBuilder {
    pub fn new(base: u64) -> Self {
        Self {
            base,
            bytes: Vec::new(),
        }
    }

    pub fn write_bytes(mut self, at: u64, data: &[u8]) -> Self {
        assert!(at >= self.base, "write below mock base");
        let start = (at - self.base) as usize;
        let end = start + data.len();
        if end > self.bytes.len() {
            self.bytes.resize(end, 0);
        }
        self.bytes[start..end].copy_from_slice(data);
        self
    }

    pub fn write_i32(self, at: u64, value: i32) -> Self {
        self.write_bytes(at, &value.to_le_bytes())
    }

    pub fn write_u64(self, at: u64, value: u64) -> Self {
        self.write_bytes(at, &value.to_le_bytes())
    }

    pub fn write_f32(self, at: u64, value: f32) -> Self {
        self.write_bytes(at, &value.to_le_bytes())
    }

    /// Zero-pad the buffer so the mocked range covers `len` bytes.
    pub fn pad_to(mut self, len: usize) -> Self {
        if len > self.bytes.len() {
            self.bytes.resize(len, 0);
        }
        self
    }

    pub fn build(self) -> MockMemory {
        MockMemory::new(self.base, self.bytes)
    }
}

/// Scalar writer that records writes, optionally simulating an absent
/// target process.
#[derive(Debug, Default)]
pub struct MockWriter {
    absent: bool,
    writes: RefCell<Vec<(Address, f32)>>,
}

impl MockWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A writer whose target process does not exist: every write is a no-op.
    pub fn absent() -> Self {
        Self {
            absent: true,
            writes: RefCell::new(Vec::new()),
        }
    }

    pub fn writes(&self) -> Vec<(Address, f32)> {
        self.writes.borrow().clone()
    }
}

impl ScalarWriter for MockWriter {
    fn write_f32(&self, addr: Address, value: f32) -> Result<WriteOutcome> {
        if self.absent {
            return Ok(WriteOutcome::ProcessAbsent);
        }
        self.writes.borrow_mut().push((addr, value));
        Ok(WriteOutcome::Written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_read_roundtrip() {
        let memory = MockMemoryBuilder::new(0x2000)
            .write_f32(0x2010, 3.25)
            .build();
        assert_eq!(memory.read_f32(Address::new(0x2010)).unwrap(), 3.25);
        assert_eq!(memory.range().len, 0x14);
    }

    #[test]
    fn test_mock_out_of_range_reads() {
        let memory = MockMemoryBuilder::new(0x2000).pad_to(0x10).build();
        assert!(matches!(
            memory.read_bytes(Address::new(0x1FFF), 4),
            Err(Error::AccessFault { .. })
        ));
        assert!(matches!(
            memory.read_bytes(Address::new(0x200E), 4),
            Err(Error::AccessFault { .. })
        ));
    }

    #[test]
    fn test_mock_writer_records() {
        let writer = MockWriter::new();
        let outcome = writer.write_f32(Address::new(0x3000), 2.0).unwrap();
        assert_eq!(outcome, WriteOutcome::Written);
        assert_eq!(writer.writes(), vec![(Address::new(0x3000), 2.0)]);
    }

    #[test]
    fn test_absent_writer_is_noop() {
        let writer = MockWriter::absent();
        let outcome = writer.write_f32(Address::new(0x3000), 2.0).unwrap();
        assert_eq!(outcome, WriteOutcome::ProcessAbsent);
        assert!(writer.writes().is_empty());
    }
}
