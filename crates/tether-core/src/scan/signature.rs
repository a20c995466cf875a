//! Code signatures: a pattern plus the displacement geometry of the
//! instruction it anchors.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scan::Pattern;

/// Name of the signature anchoring the per-vehicle handling block offset.
pub const HANDLING_DATA: &str = "handlingData";
/// Name of the signature anchoring the global time-scale float array.
pub const TIME_SCALE: &str = "timeScale";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub pattern: String,
    /// Byte offset of the 4-byte displacement field within the match.
    pub disp_offset: u64,
    /// Byte length of the referencing instruction (displacements are
    /// relative to the instruction end).
    pub instr_len: u64,
}

impl Signature {
    pub fn pattern(&self) -> Result<Pattern> {
        Pattern::parse(&self.pattern)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureSet {
    pub version: String,
    pub entries: Vec<Signature>,
}

impl SignatureSet {
    pub fn entry(&self, name: &str) -> Option<&Signature> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }
}

/// Signature for the `mov rcx, [rdi+disp32]` site that loads a vehicle's
/// handling block pointer; the displacement is the field offset itself.
pub fn handling_signature() -> Signature {
    Signature {
        name: HANDLING_DATA.to_string(),
        pattern: "48 8B 8F ?? ?? 00 00 48 85 C9 74 ?? F3 0F 10 89".to_string(),
        disp_offset: 3,
        instr_len: 7,
    }
}

/// Signature for the `movss xmm0, [rip+disp32]` site that reads the global
/// time-scale array; resolving the displacement yields the array base.
pub fn time_scale_signature() -> Signature {
    Signature {
        name: TIME_SCALE.to_string(),
        pattern: "F3 0F 10 05 ?? ?? ?? ?? F3 0F 59 05 ?? ?? ?? ?? 0F 2F 05".to_string(),
        disp_offset: 4,
        instr_len: 8,
    }
}

/// The compiled-in signatures both registries initialize from.
pub fn builtin_signatures() -> SignatureSet {
    SignatureSet {
        version: "1".to_string(),
        entries: vec![handling_signature(), time_scale_signature()],
    }
}

pub fn load_signatures<P: AsRef<Path>>(path: P) -> Result<SignatureSet> {
    let content = fs::read_to_string(&path)?;
    let data = serde_json::from_str(&content)?;
    Ok(data)
}

pub fn save_signatures<P: AsRef<Path>>(path: P, signatures: &SignatureSet) -> Result<()> {
    let content = serde_json::to_string_pretty(signatures)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_signatures_parse() {
        let set = builtin_signatures();
        assert_eq!(set.entries.len(), 2);
        for entry in &set.entries {
            let pattern = entry.pattern().unwrap();
            assert!(pattern.len() > entry.disp_offset as usize + 4);
        }
    }

    #[test]
    fn test_entry_lookup_is_case_insensitive() {
        let set = builtin_signatures();
        assert!(set.entry("handlingdata").is_some());
        assert!(set.entry(TIME_SCALE).is_some());
        assert!(set.entry("missing").is_none());
    }

    #[test]
    fn test_signature_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signatures.json");

        let set = builtin_signatures();
        save_signatures(&path, &set).unwrap();
        let loaded = load_signatures(&path).unwrap();

        assert_eq!(loaded.version, set.version);
        assert_eq!(loaded.entries.len(), set.entries.len());
        assert_eq!(loaded.entries[0].pattern, set.entries[0].pattern);
    }
}
