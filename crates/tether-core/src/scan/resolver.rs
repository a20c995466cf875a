//! Decoding of position-relative displacement fields.
//!
//! x64 code addresses nearby data relative to the *end* of the referencing
//! instruction. Given a matched anchor and the known geometry of that
//! instruction (where the 4-byte displacement sits, how long the whole
//! instruction is), these functions recover either the absolute target
//! address or the raw immediate.

use crate::error::{Error, Result};
use crate::memory::{Address, MemoryView};

/// Read the raw 4-byte little-endian signed displacement at
/// `anchor + disp_offset`.
///
/// Some instruction sites embed a structure field offset rather than a
/// relative address; callers consuming the value that way use this directly.
pub fn read_displacement<M: MemoryView>(
    view: &M,
    anchor: Address,
    disp_offset: u64,
) -> Result<i32> {
    if anchor.is_null() {
        return Err(Error::InvalidAnchor);
    }
    view.read_i32(anchor.offset(disp_offset))
}

/// Resolve a RIP-relative reference into an absolute address:
/// `anchor + displacement + instr_len`.
///
/// `instr_len` is the byte length of the referencing instruction; the
/// displacement is relative to the instruction end, not its start.
/// Deterministic for identical inputs and memory contents.
pub fn resolve_relative<M: MemoryView>(
    view: &M,
    anchor: Address,
    disp_offset: u64,
    instr_len: u64,
) -> Result<Address> {
    let disp = read_displacement(view, anchor, disp_offset)?;
    Ok(anchor.offset(instr_len).offset_signed(disp as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MockMemoryBuilder;

    #[test]
    fn test_resolve_positive_displacement() {
        // 4 bytes at 0x1003 decode to 16: 0x1000 + 16 + 7 = 0x1017.
        let memory = MockMemoryBuilder::new(0x1000).write_i32(0x1003, 16).build();
        let target = resolve_relative(&memory, Address::new(0x1000), 3, 7).unwrap();
        assert_eq!(target, Address::new(0x1017));
    }

    #[test]
    fn test_resolve_zero_displacement() {
        let memory = MockMemoryBuilder::new(0x1000).write_i32(0x1003, 0).build();
        let target = resolve_relative(&memory, Address::new(0x1000), 3, 7).unwrap();
        assert_eq!(target, Address::new(0x1007));
    }

    #[test]
    fn test_resolve_negative_displacement() {
        let memory = MockMemoryBuilder::new(0x1000)
            .write_i32(0x1003, -0x20)
            .build();
        let target = resolve_relative(&memory, Address::new(0x1000), 3, 7).unwrap();
        assert_eq!(target, Address::new(0xFE7));
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let memory = MockMemoryBuilder::new(0x1000).write_i32(0x1004, 64).build();
        let first = resolve_relative(&memory, Address::new(0x1000), 4, 8).unwrap();
        let second = resolve_relative(&memory, Address::new(0x1000), 4, 8).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_null_anchor_is_invalid() {
        let memory = MockMemoryBuilder::new(0x1000).write_i32(0x1000, 0).build();
        assert!(matches!(
            resolve_relative(&memory, Address::NULL, 3, 7),
            Err(Error::InvalidAnchor)
        ));
        assert!(matches!(
            read_displacement(&memory, Address::NULL, 3),
            Err(Error::InvalidAnchor)
        ));
    }

    #[test]
    fn test_read_displacement_raw_value() {
        let memory = MockMemoryBuilder::new(0x1000)
            .write_i32(0x1003, 0x918)
            .build();
        assert_eq!(
            read_displacement(&memory, Address::new(0x1000), 3).unwrap(),
            0x918
        );
    }
}
