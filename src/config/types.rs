use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Interface classification rules from `[interfaces]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceRules {
    /// Substrings that mark an interface as critical (error-level ownership).
    #[serde(default = "default_critical_markers")]
    pub critical_markers: Vec<String>,
    /// Extensions of declaration-only interface artifacts.
    #[serde(default = "default_interface_extensions")]
    pub interface_extensions: Vec<String>,
    /// Extensions picked up when a pattern names a directory.
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,
}

impl Default for InterfaceRules {
    fn default() -> Self {
        Self {
            critical_markers: default_critical_markers(),
            interface_extensions: default_interface_extensions(),
            source_extensions: default_source_extensions(),
        }
    }
}

fn default_critical_markers() -> Vec<String> {
    vec![
        "memory_interface".into(),
        "process_interface".into(),
        "filesystem_interface".into(),
    ]
}

fn default_interface_extensions() -> Vec<String> {
    vec!["h".into(), "hh".into(), "hpp".into()]
}

fn default_source_extensions() -> Vec<String> {
    vec!["c".into(), "h".into(), "cpp".into(), "hpp".into()]
}

/// On-disk shape of `seamcheck.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SeamToml {
    /// Component name to owned path patterns (files or directories).
    #[serde(default)]
    pub components: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub interfaces: InterfaceRules,
}

/// Runtime configuration handed to the analysis pipeline.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub components: BTreeMap<String, Vec<String>>,
    pub rules: InterfaceRules,
}

impl From<SeamToml> for Config {
    fn from(toml: SeamToml) -> Self {
        Self {
            components: toml.components,
            rules: toml.interfaces,
        }
    }
}
