//! On-disk configuration file (config.yaml) data structures

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ExecScope;

/// Configuration file contents; every field is optional and overlays the defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Directory installed commands are copied to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_dir: Option<PathBuf>,

    /// Which execute bits to grant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec_scope: Option<ExecScope>,

    /// Extra or overriding kinds: suffix -> interpreter line
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub kinds: BTreeMap<String, String>,
}

impl ConfigFile {
    /// Parse configuration from YAML string. An empty document is an empty config.
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    #[cfg(test)]
    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
