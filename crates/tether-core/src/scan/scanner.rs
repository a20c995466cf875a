//! Window-by-window signature scan over a module image.

use tracing::debug;

use crate::error::{Error, Result};
use crate::memory::{Address, MemoryRange, MemoryView};
use crate::scan::Pattern;

/// Find the lowest offset in `buffer` whose window satisfies `pattern`.
///
/// Deliberately the simple O(buffer x pattern) comparison: patterns are
/// short and a scan runs once per process lifetime. If the signature occurs
/// more than once the first match wins silently; a signature that recurs
/// elsewhere in the image resolves to the wrong site with no diagnostic.
pub fn find_in_buffer(buffer: &[u8], pattern: &Pattern) -> Option<usize> {
    let bytes = pattern.bytes();
    if buffer.len() < bytes.len() {
        return None;
    }

    let last = buffer.len() - bytes.len();
    'outer: for i in 0..=last {
        for (j, byte) in bytes.iter().enumerate() {
            if let Some(value) = byte
                && buffer[i + j] != *value
            {
                continue 'outer;
            }
        }
        return Some(i);
    }
    None
}

/// Scans a memory range for byte signatures.
pub struct Scanner<'a, M: MemoryView> {
    view: &'a M,
}

impl<'a, M: MemoryView> Scanner<'a, M> {
    pub fn new(view: &'a M) -> Self {
        Self { view }
    }

    /// Absolute address of the first window in `range` satisfying `pattern`.
    pub fn scan(&self, range: MemoryRange, pattern: &Pattern) -> Result<Address> {
        let buffer = self.view.read_bytes(range.start, range.len)?;
        match find_in_buffer(&buffer, pattern) {
            Some(pos) => {
                let anchor = range.start.offset(pos as u64);
                debug!("pattern [{pattern}] matched at {anchor}");
                Ok(anchor)
            }
            None => {
                debug!("pattern [{pattern}] not found in {} bytes", range.len);
                Err(Error::NotFound)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MockMemory;

    #[test]
    fn test_masked_match_at_offset() {
        // [AA BB CC] under mask "xx?" matches AA BB <any>.
        let pattern = Pattern::from_mask(&[0xAA, 0xBB, 0xCC], "xx?").unwrap();
        let buffer = [0x11, 0xAA, 0xBB, 0x99, 0x22];
        assert_eq!(find_in_buffer(&buffer, &pattern), Some(1));
    }

    #[test]
    fn test_no_match() {
        let pattern = Pattern::from_mask(&[0xAA, 0xBB, 0xCC], "xx?").unwrap();
        let buffer = [0x11, 0xAA, 0xCC, 0x22];
        assert_eq!(find_in_buffer(&buffer, &pattern), None);
    }

    #[test]
    fn test_first_of_multiple_matches_wins() {
        let pattern = Pattern::parse("AA BB").unwrap();
        let buffer = [0x00, 0xAA, 0xBB, 0x00, 0xAA, 0xBB];
        assert_eq!(find_in_buffer(&buffer, &pattern), Some(1));
    }

    #[test]
    fn test_match_at_buffer_end() {
        let pattern = Pattern::parse("AA BB").unwrap();
        let buffer = [0x00, 0x00, 0xAA, 0xBB];
        assert_eq!(find_in_buffer(&buffer, &pattern), Some(2));
    }

    #[test]
    fn test_pattern_longer_than_buffer() {
        let pattern = Pattern::parse("AA BB CC DD").unwrap();
        assert_eq!(find_in_buffer(&[0xAA, 0xBB], &pattern), None);
    }

    #[test]
    fn test_scan_returns_absolute_address() {
        let memory = MockMemory::new(0x1000, vec![0x11, 0xAA, 0xBB, 0x99, 0x22]);
        let pattern = Pattern::from_mask(&[0xAA, 0xBB, 0xCC], "xx?").unwrap();
        let anchor = Scanner::new(&memory)
            .scan(memory.range(), &pattern)
            .unwrap();
        assert_eq!(anchor, Address::new(0x1001));
    }

    #[test]
    fn test_scan_not_found() {
        let memory = MockMemory::new(0x1000, vec![0x11, 0xAA, 0xCC, 0x22]);
        let pattern = Pattern::from_mask(&[0xAA, 0xBB, 0xCC], "xx?").unwrap();
        let err = Scanner::new(&memory)
            .scan(memory.range(), &pattern)
            .unwrap_err();
        assert!(matches!(err, Error::NotFound));
    }
}
