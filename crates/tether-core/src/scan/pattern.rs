//! Byte patterns with wildcard positions.

use std::fmt;

use crate::error::{Error, Result};

/// An ordered byte sequence where each position either requires an exact
/// byte or accepts anything.
///
/// Invariant: a pattern is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    bytes: Vec<Option<u8>>,
}

impl Pattern {
    /// Parse an IDA-style pattern string, e.g. `"48 8B 8F ?? ?? 00 00"`.
    ///
    /// `??` (or `?`) marks a wildcard position.
    pub fn parse(pattern: &str) -> Result<Self> {
        let mut bytes = Vec::new();
        for token in pattern.split_whitespace() {
            if token == "??" || token == "?" {
                bytes.push(None);
                continue;
            }

            let value = u8::from_str_radix(token, 16).map_err(|e| {
                Error::InvalidPattern(format!("invalid token '{token}': {e}"))
            })?;
            bytes.push(Some(value));
        }

        if bytes.is_empty() {
            return Err(Error::InvalidPattern("pattern is empty".to_string()));
        }

        Ok(Self { bytes })
    }

    /// Build a pattern from raw bytes and a same-length mask string, where
    /// `x` requires an exact match and `?` accepts any byte.
    pub fn from_mask(bytes: &[u8], mask: &str) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::InvalidPattern("pattern is empty".to_string()));
        }
        if bytes.len() != mask.len() {
            return Err(Error::InvalidPattern(format!(
                "mask length {} does not match pattern length {}",
                mask.len(),
                bytes.len()
            )));
        }

        let bytes = bytes
            .iter()
            .zip(mask.chars())
            .map(|(byte, flag)| match flag {
                'x' => Ok(Some(*byte)),
                '?' => Ok(None),
                other => Err(Error::InvalidPattern(format!(
                    "invalid mask character '{other}'"
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { bytes })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn bytes(&self) -> &[Option<u8>] {
        &self.bytes
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self
            .bytes
            .iter()
            .map(|b| match b {
                Some(value) => format!("{value:02X}"),
                None => "??".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ");
        f.write_str(&formatted)
    }
}
