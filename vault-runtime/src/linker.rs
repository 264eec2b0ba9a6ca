//! Library linking for unlinked creation bytecode.
//!
//! A placeholder is a run of `_`, then a run of non-`_` characters, then a
//! run of `_` (e.g. `__TradingAction_________________________`). The name is
//! the placeholder with its padding stripped.

use std::collections::{BTreeMap, BTreeSet};

use alloy::primitives::Address;

use crate::error::VaultToolsError;

/// Library name → deployed address, as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryTable {
    entries: BTreeMap<String, String>,
}

impl LibraryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, address: impl ToString) {
        self.entries.insert(name.into(), address.to_string());
    }

    pub fn with(mut self, name: impl Into<String>, address: impl ToString) -> Self {
        self.insert(name, address);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, address)| (name.as_str(), address.as_str()))
    }

    /// Parse `Name=0xaddr,Other=0xaddr`. Whitespace around items is ignored.
    pub fn parse_pairs(pairs: &str) -> Result<Self, VaultToolsError> {
        let mut table = Self::new();
        for item in pairs.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (name, address) = item.split_once('=').ok_or_else(|| {
                VaultToolsError::ConfigError(format!("Invalid library entry '{item}', expected Name=0x…"))
            })?;
            table.insert(name.trim(), address.trim());
        }
        Ok(table)
    }
}

impl<N: Into<String>> FromIterator<(N, Address)> for LibraryTable {
    fn from_iter<I: IntoIterator<Item = (N, Address)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, address) in iter {
            table.insert(name, address);
        }
        table
    }
}

/// Collect the distinct placeholders in `bytecode`.
pub fn find_placeholders(bytecode: &str) -> BTreeSet<String> {
    let bytes = bytecode.as_bytes();
    let mut found = BTreeSet::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'_' {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && bytes[i] == b'_' {
            i += 1;
        }
        let name_start = i;
        while i < bytes.len() && bytes[i] != b'_' {
            i += 1;
        }
        // Needs a name and closing padding, otherwise nothing here is a marker.
        if i == name_start || i == bytes.len() {
            continue;
        }
        while i < bytes.len() && bytes[i] == b'_' {
            i += 1;
        }
        found.insert(bytecode[start..i].to_string());
    }

    found
}

/// Library name carried by a placeholder.
pub fn placeholder_name(marker: &str) -> &str {
    marker.trim_matches('_')
}

/// Lowercase last 40 hex characters of an address string.
pub fn right_aligned_address(address: &str) -> Result<String, VaultToolsError> {
    let address = address.trim();
    if address.len() < 40 || !address.is_char_boundary(address.len() - 40) {
        return Err(VaultToolsError::ConfigError(format!(
            "Library address '{address}' is shorter than 20 bytes"
        )));
    }
    let tail = address[address.len() - 40..].to_ascii_lowercase();
    if !tail.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(VaultToolsError::ConfigError(format!(
            "Library address '{address}' is not hex"
        )));
    }
    Ok(tail)
}

/// Replace every placeholder in `bytecode` with its library address.
///
/// All placeholders are resolved before any substitution happens, so a
/// missing library leaves nothing half-linked.
pub fn link_bytecode(bytecode: &str, libraries: &LibraryTable) -> Result<String, VaultToolsError> {
    let markers = find_placeholders(bytecode);

    let mut resolved = Vec::with_capacity(markers.len());
    for marker in &markers {
        let name = placeholder_name(marker);
        let address = libraries
            .get(name)
            .ok_or_else(|| VaultToolsError::UnresolvedLibrary {
                library: name.to_string(),
                marker: marker.clone(),
            })?;
        resolved.push((marker, right_aligned_address(address)?));
    }

    // A marker can be a substring of a longer padding of the same name.
    resolved.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut linked = bytecode.to_string();
    for (marker, address) in resolved {
        tracing::debug!(library = placeholder_name(marker), %address, "linking library");
        linked = linked.replace(marker.as_str(), &address);
    }
    Ok(linked)
}
