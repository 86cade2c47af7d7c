/// Named character sets for glyph atlases.

use crate::error::{Error, Result};

/// A contiguous range of code points starting at U+0000
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSet {
    name: &'static str,
    end: u32,
}

impl CharacterSet {
    pub const US_ASCII: CharacterSet = CharacterSet { name: "US-ASCII", end: 0x80 };
    pub const ISO_8859_1: CharacterSet = CharacterSet { name: "ISO-8859-1", end: 0x100 };

    /// Look up a set by name, ignoring ASCII case
    ///
    /// Accepted: `US-ASCII`, `ASCII`, `ISO-8859-1`, `LATIN1`.
    pub fn from_name(name: &str) -> Result<Self> {
        let set = match name.to_ascii_uppercase().as_str() {
            "US-ASCII" | "ASCII" => Self::US_ASCII,
            "ISO-8859-1" | "LATIN1" => Self::ISO_8859_1,
            _ => crate::engine_bail!(
                "tessera::text::CharacterSet",
                Error::InvalidArgument(format!("Unknown character set '{}'", name))
            ),
        };
        Ok(set)
    }

    /// Canonical name
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.end as usize
    }

    pub fn is_empty(&self) -> bool {
        self.end == 0
    }

    pub fn contains(&self, c: char) -> bool {
        (c as u32) < self.end
    }

    /// Every char of the set in code point order
    pub fn chars(&self) -> impl Iterator<Item = char> {
        (0..self.end).filter_map(char::from_u32)
    }
}

#[cfg(test)]
#[path = "charset_tests.rs"]
mod tests;
