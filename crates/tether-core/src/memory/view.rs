//! Typed memory reads over an abstract byte source.

use crate::error::{Error, Result};
use crate::memory::Address;

fn to_array<const N: usize>(addr: Address, bytes: &[u8]) -> Result<[u8; N]> {
    bytes.try_into().map_err(|_| Error::AccessFault {
        address: addr.raw(),
        message: format!("short read: expected {N} bytes, got {}", bytes.len()),
    })
}

/// Read access to a process's memory.
///
/// Implementors only provide `read_bytes`; the typed readers are derived.
/// Reads are always live: registries cache addresses, never values, because
/// the underlying values change every simulation frame.
pub trait MemoryView {
    /// Read exactly `len` bytes starting at `addr`.
    ///
    /// A read that would touch unmapped or protected memory fails with
    /// [`Error::AccessFault`]; it must never crash the host process.
    fn read_bytes(&self, addr: Address, len: usize) -> Result<Vec<u8>>;

    fn read_u8(&self, addr: Address) -> Result<u8> {
        let bytes = self.read_bytes(addr, 1)?;
        Ok(bytes[0])
    }

    fn read_i32(&self, addr: Address) -> Result<i32> {
        let bytes = self.read_bytes(addr, 4)?;
        Ok(i32::from_le_bytes(to_array(addr, &bytes)?))
    }

    fn read_u32(&self, addr: Address) -> Result<u32> {
        let bytes = self.read_bytes(addr, 4)?;
        Ok(u32::from_le_bytes(to_array(addr, &bytes)?))
    }

    fn read_u64(&self, addr: Address) -> Result<u64> {
        let bytes = self.read_bytes(addr, 8)?;
        Ok(u64::from_le_bytes(to_array(addr, &bytes)?))
    }

    fn read_f32(&self, addr: Address) -> Result<f32> {
        let bytes = self.read_bytes(addr, 4)?;
        Ok(f32::from_le_bytes(to_array(addr, &bytes)?))
    }

    /// Read a pointer-sized value as an [`Address`].
    fn read_addr(&self, addr: Address) -> Result<Address> {
        Ok(Address::new(self.read_u64(addr)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::mock::MockMemoryBuilder;

    #[test]
    fn test_typed_readers() {
        let memory = MockMemoryBuilder::new(0x1000)
            .write_bytes(0x1000, &[0x2A])
            .write_i32(0x1004, -7)
            .write_u64(0x1008, 0xDEAD_BEEF)
            .write_f32(0x1010, 1.5)
            .build();

        assert_eq!(memory.read_u8(Address::new(0x1000)).unwrap(), 0x2A);
        assert_eq!(memory.read_i32(Address::new(0x1004)).unwrap(), -7);
        assert_eq!(memory.read_u64(Address::new(0x1008)).unwrap(), 0xDEAD_BEEF);
        assert_eq!(memory.read_f32(Address::new(0x1010)).unwrap(), 1.5);
        assert_eq!(
            memory.read_addr(Address::new(0x1008)).unwrap(),
            Address::new(0xDEAD_BEEF)
        );
    }

    #[test]
    fn test_read_past_end_is_access_fault() {
        let memory = MockMemoryBuilder::new(0x1000).write_u64(0x1000, 0).build();
        let err = memory.read_u64(Address::new(0x1005)).unwrap_err();
        assert!(matches!(err, Error::AccessFault { .. }));
    }
}
