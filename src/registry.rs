//! Runtime encoding registry for name-based handler selection.
//!
//! File importers and protocol front-ends often receive an encoding as a
//! label ("UTF-8", "windows-1252", …) rather than a compile-time tag. Every
//! encoding tag registers an entry here via `inventory::submit!`; lookup is
//! case-insensitive over canonical names and aliases.
//!
//! # Example
//!
//! ```
//! use runely::registry;
//!
//! let entry = registry::find_encoding("utf-8").unwrap();
//! assert_eq!(entry.sub_type, runely::SubType::Utf8);
//!
//! let codec = registry::handler_by_name("CP1252").unwrap();
//! assert_eq!(codec.unit_size(), 1);
//! ```

use alloc::string::{String, ToString};
use core::fmt;

use crate::encoding::{handler, Codec, SubType};

/// Error returned when no registered encoding matches a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEncodingError(pub String);

impl fmt::Display for UnknownEncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown encoding: {}", self.0)
    }
}

impl core::error::Error for UnknownEncodingError {}

/// A registered encoding entry mapping names to a [`SubType`].
#[derive(Debug)]
pub struct EncodingEntry {
    /// The canonical name of the encoding (e.g., "UTF-8").
    pub name: &'static str,
    /// Alternative names (e.g., `&["UTF8"]`).
    pub aliases: &'static [&'static str],
    /// The tag this entry selects.
    pub sub_type: SubType,
}

impl EncodingEntry {
    /// Returns all names (canonical + aliases) for this encoding.
    pub fn all_names(&self) -> impl Iterator<Item = &'static str> {
        core::iter::once(self.name).chain(self.aliases.iter().copied())
    }

    /// Checks whether this entry matches `name`, case-insensitively.
    pub fn matches(&self, name: &str) -> bool {
        self.all_names().any(|n| n.eq_ignore_ascii_case(name))
    }
}

inventory::collect!(EncodingEntry);

/// Returns an iterator over all registered encodings.
pub fn encodings() -> impl Iterator<Item = &'static EncodingEntry> {
    inventory::iter::<EncodingEntry>()
}

/// Finds an encoding entry by name, case-insensitively.
pub fn find_encoding(name: &str) -> Result<&'static EncodingEntry, UnknownEncodingError> {
    encodings()
        .find(|e| e.matches(name))
        .ok_or_else(|| UnknownEncodingError(name.to_string()))
}

/// Resolves a name directly to its handler singleton.
pub fn handler_by_name(name: &str) -> Result<&'static dyn Codec, UnknownEncodingError> {
    find_encoding(name).map(|entry| handler(entry.sub_type))
}
