//! Source kind table: recognized script suffixes and their interpreter lines

use std::collections::BTreeMap;

/// Built-in kinds used when no configuration overrides them
pub const DEFAULT_KINDS: &[(&str, &str)] = &[(".py", "#!/bin/python3"), (".sh", "#!/bin/bash")];

/// Mapping from a recognized suffix (with leading dot) to its directive line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceKindTable {
    kinds: BTreeMap<String, String>,
}

impl SourceKindTable {
    pub fn new(kinds: BTreeMap<String, String>) -> Self {
        Self { kinds }
    }

    /// Directive text required for `suffix`, if the suffix is recognized
    pub fn directive_for(&self, suffix: &str) -> Option<&str> {
        self.kinds.get(suffix).map(String::as_str)
    }

    pub fn contains(&self, suffix: &str) -> bool {
        self.kinds.contains_key(suffix)
    }

    /// Recognized suffixes in sorted order
    pub fn suffixes(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }

    /// Suffixes joined for display in messages (e.g. ".py, .sh")
    pub fn describe(&self) -> String {
        self.suffixes().collect::<Vec<_>>().join(", ")
    }

    /// Overlay `other` on top of this table; entries in `other` win
    pub fn merge(&mut self, other: BTreeMap<String, String>) {
        self.kinds.extend(other);
    }

    #[cfg(test)]
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.kinds.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Default for SourceKindTable {
    fn default() -> Self {
        Self::new(
            DEFAULT_KINDS
                .iter()
                .map(|(suffix, directive)| ((*suffix).to_string(), (*directive).to_string()))
                .collect(),
        )
    }
}
