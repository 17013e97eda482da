//! Template loading for shiptrack-out.
//!
//! Templates ship in `templates/timeline.yaml` and are compiled into the
//! crate; a deployment can point at its own file with the same layout.

use serde::Deserialize;
use std::collections::HashMap;

const BUILTIN_TEMPLATES: &str = include_str!("../templates/timeline.yaml");

/// Top-level templates file structure
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesFile {
    pub version: String,
    pub templates: HashMap<String, Template>,
    /// Templates registered as partials (`{{> name}}`) instead of pages
    #[serde(default)]
    pub partials: HashMap<String, Template>,
}

/// A single template definition
#[derive(Debug, Clone, Deserialize)]
pub struct Template {
    pub description: String,
    pub template: String,
    /// HTML-escape interpolated values; off for plain-text output
    #[serde(default = "escape_by_default")]
    pub escape: bool,
}

fn escape_by_default() -> bool {
    true
}

impl TemplatesFile {
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| format!("Failed to parse templates: {}", e))
    }

    pub fn load(path: &str) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read templates file '{}': {}", path, e))?;
        Self::from_yaml(&content)
    }

    /// The templates compiled into the crate.
    pub fn builtin() -> Result<Self, String> {
        Self::from_yaml(BUILTIN_TEMPLATES)
    }

    pub fn list_templates(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
