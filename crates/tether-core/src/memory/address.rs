//! Typed addresses and address ranges.
//!
//! All address arithmetic in the crate goes through [`Address`] instead of
//! raw pointers. Dereferencing only happens behind the
//! [`MemoryView`](super::MemoryView) trait, which turns bad accesses into
//! typed errors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An absolute address in some process's address space.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Address(u64);

impl Address {
    /// The null address, also used as the "no match" sentinel by callers
    /// that carry an address instead of a `Result`.
    pub const NULL: Address = Address(0);

    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Offset forward by `bytes`.
    pub const fn offset(self, bytes: u64) -> Self {
        Self(self.0.wrapping_add(bytes))
    }

    /// Offset by a signed byte count (displacements can be negative).
    pub const fn offset_signed(self, bytes: i64) -> Self {
        Self(self.0.wrapping_add_signed(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// A contiguous addressable range, typically a loaded module image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryRange {
    pub start: Address,
    pub len: usize,
}

impl MemoryRange {
    pub const fn new(start: Address, len: usize) -> Self {
        Self { start, len }
    }

    pub const fn end(&self) -> Address {
        self.start.offset(self.len as u64)
    }

    pub fn contains(&self, addr: Address) -> bool {
        addr.raw() >= self.start.raw() && addr.raw() < self.end().raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_offset() {
        let addr = Address::new(0x1000);
        assert_eq!(addr.offset(0x10), Address::new(0x1010));
        assert_eq!(addr.offset_signed(-0x10), Address::new(0xFF0));
    }

    #[test]
    fn test_address_display() {
        assert_eq!(Address::new(0x1400).to_string(), "0x1400");
        assert_eq!(format!("{:#x}", Address::new(0x1400)), "0x1400");
    }

    #[test]
    fn test_range_contains() {
        let range = MemoryRange::new(Address::new(0x1000), 0x100);
        assert!(range.contains(Address::new(0x1000)));
        assert!(range.contains(Address::new(0x10FF)));
        assert!(!range.contains(Address::new(0x1100)));
        assert!(!range.contains(Address::new(0xFFF)));
    }
}
