pub mod io;
pub mod types;

pub use self::io::CONFIG_FILE;
pub use self::types::{Config, InterfaceRules, SeamToml};

use crate::error::{Result, SeamError};
use std::path::{Component as PathComponent, Path};

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates `path`.
    ///
    /// # Errors
    /// Returns a configuration error if the file is missing, malformed, or
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        let config = io::load_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    /// Returns a configuration error if the text is malformed or invalid.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config = io::parse_toml(content, Path::new(CONFIG_FILE))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates configuration. A run needs at least one component and every
    /// component needs at least one non-empty pattern.
    ///
    /// # Errors
    /// Returns `InvalidConfig` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.components.is_empty() {
            return Err(invalid("no components defined under [components]"));
        }
        for (name, patterns) in &self.components {
            if name.trim().is_empty() {
                return Err(invalid("component names must not be empty"));
            }
            if patterns.is_empty() {
                return Err(invalid(format!("component '{name}' has no path patterns")));
            }
            if patterns.iter().any(|p| p.trim().is_empty()) {
                return Err(invalid(format!("component '{name}' has an empty path pattern")));
            }
            if let Some(p) = patterns.iter().find(|p| escapes_root(p)) {
                return Err(invalid(format!(
                    "component '{name}' pattern '{p}' must be relative to the project root"
                )));
            }
        }
        if self.rules.interface_extensions.is_empty() {
            return Err(invalid("interfaces.interface_extensions must not be empty"));
        }
        if self.rules.source_extensions.is_empty() {
            return Err(invalid("interfaces.source_extensions must not be empty"));
        }
        Ok(())
    }

    /// Declaration-only interface artifact (a header).
    #[must_use]
    pub fn is_interface_artifact(&self, path: &Path) -> bool {
        has_extension(path, &self.rules.interface_extensions)
    }

    /// Artifact collected when a directory pattern is expanded.
    #[must_use]
    pub fn is_source_artifact(&self, path: &Path) -> bool {
        has_extension(path, &self.rules.source_extensions)
    }

    /// True if `interface` contains any critical marker.
    #[must_use]
    pub fn is_critical(&self, interface: &str) -> bool {
        self.rules
            .critical_markers
            .iter()
            .any(|marker| !marker.is_empty() && interface.contains(marker.as_str()))
    }
}

fn invalid(msg: impl Into<String>) -> SeamError {
    SeamError::InvalidConfig(msg.into())
}

/// Absolute paths and `..` segments point outside the analysed tree.
fn escapes_root(pattern: &str) -> bool {
    Path::new(pattern.trim()).components().any(|c| {
        matches!(
            c,
            PathComponent::ParentDir | PathComponent::RootDir | PathComponent::Prefix(_)
        )
    })
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|want| want.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[components]
kernel = ["kernel/kernel.c", "kernel/include/"]
fs = ["kernel/fs/"]
"#;

    #[test]
    fn parses_components_and_defaults() {
        let config = Config::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.components.len(), 2);
        assert_eq!(config.components["kernel"].len(), 2);
        assert!(config.is_critical("memory_interface.h"));
        assert!(!config.is_critical("timer.h"));
        assert!(config.is_interface_artifact(Path::new("a/b.h")));
        assert!(!config.is_interface_artifact(Path::new("a/b.c")));
        assert!(config.is_source_artifact(Path::new("a/b.cpp")));
        assert!(!config.is_source_artifact(Path::new("a/README.md")));
    }

    #[test]
    fn rejects_empty_mapping() {
        let err = Config::from_toml_str("[components]\n").unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("no components"));
    }

    #[test]
    fn rejects_component_without_patterns() {
        let err = Config::from_toml_str("[components]\nkernel = []\n").unwrap_err();
        assert!(err.to_string().contains("kernel"));
    }

    #[test]
    fn rejects_blank_pattern() {
        let err = Config::from_toml_str("[components]\nkernel = [\"  \"]\n").unwrap_err();
        assert!(err.to_string().contains("empty path pattern"));
    }

    #[test]
    fn rejects_patterns_outside_root() {
        for pattern in ["../shared/x.h", "/etc/x.h", "kernel/../../x.h"] {
            let text = format!("[components]\nkernel = [\"{pattern}\"]\n");
            let err = Config::from_toml_str(&text).unwrap_err();
            assert!(matches!(err, SeamError::InvalidConfig(_)), "{pattern} accepted");
        }
        assert!(Config::from_toml_str("[components]\nkernel = [\"./kernel/\"]\n").is_ok());
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = Config::from_toml_str("[components\nkernel = 3").unwrap_err();
        assert!(matches!(err, SeamError::ConfigParse { .. }));
    }

    #[test]
    fn custom_markers_and_extensions() {
        let text = r#"
[components]
net = ["net/"]

[interfaces]
critical_markers = ["socket"]
interface_extensions = [".hxx"]
"#;
        let config = Config::from_toml_str(text).unwrap();
        assert!(config.is_critical("socket_api.hxx"));
        assert!(!config.is_critical("memory_interface.h"));
        assert!(config.is_interface_artifact(Path::new("net/socket_api.HXX")));
        assert!(!config.is_interface_artifact(Path::new("net/socket_api.h")));
    }
}
