//! Optional configuration file for `layout-expr --config <FILE>`.
//!
//! # Example
//!
//! ```toml
//! [inspect]
//! properties = ["hidden", "required"]
//! fail_on_complex = true
//!
//! [output]
//! pretty = true
//! ```
//!
//! Command-line flags take precedence over values read here.

use std::path::Path;

use layout_expr_core::ExpressionProperty;
use serde::{Deserialize, Serialize};

// ── Types ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub inspect: InspectSettings,
    pub output: OutputSettings,
}

/// `[inspect]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InspectSettings {
    /// Property tags to report. Empty means all.
    pub properties: Vec<String>,
    pub fail_on_complex: bool,
}

/// `[output]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

// ── Functions ─────────────────────────────────────────────────────────────────

/// Read and parse a config TOML file from `path`.
///
/// Returns a human-readable error string on failure.
pub fn read_config(path: &Path) -> Result<CliConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;

    toml::from_str(&content)
        .map_err(|e| format!("could not parse '{}': {}", path.display(), e))
}

impl CliConfig {
    /// Resolve `[inspect] properties` to property tags.
    ///
    /// Returns every unknown tag as an error, not just the first.
    pub fn inspect_properties(&self) -> Result<Vec<ExpressionProperty>, Vec<String>> {
        let mut properties = Vec::new();
        let mut errors = Vec::new();
        for tag in &self.inspect.properties {
            match tag.parse::<ExpressionProperty>() {
                Ok(property) => properties.push(property),
                Err(e) => errors.push(format!("config [inspect] properties: {}", e)),
            }
        }
        if errors.is_empty() {
            Ok(properties)
        } else {
            Err(errors)
        }
    }
}
