//! Dispatch-wide configuration: pagination limits and PATCH compatibility switches.
//!
//! This is deliberately much smaller than the configuration surface a deployed SCIM
//! server needs (no transport, persistence, or multi-tenant host-resolution settings —
//! those are out of scope here); a `tenant` tag travels on `RequestContext` instead of a
//! tenant table.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DispatchConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_default_page_size")]
    pub default_page_size: usize,
    #[serde(default)]
    pub compatibility: CompatibilityConfig,
}

fn default_max_results() -> usize {
    200
}

fn default_default_page_size() -> usize {
    20
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            default_page_size: default_default_page_size(),
            compatibility: CompatibilityConfig::default(),
        }
    }
}

/// Lenient/strict toggles for edge cases the PATCH Applicator and Attribute Projector
/// leave as implementation-defined, generalized from the teacher's per-flag
/// `CompatibilityConfig`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CompatibilityConfig {
    /// When true, PATCH `replace` against a path with no existing value raises
    /// `noTarget` instead of creating the attribute.
    #[serde(default = "default_strict_patch_replace")]
    pub strict_patch_replace: bool,
    /// When true, an empty array remains `[]` in projected responses instead of being
    /// stripped by `remove_null_fields`.
    #[serde(default = "default_show_empty_multi_valued")]
    pub show_empty_multi_valued: bool,
}

fn default_strict_patch_replace() -> bool {
    false
}

fn default_show_empty_multi_valued() -> bool {
    true
}

impl Default for CompatibilityConfig {
    fn default() -> Self {
        Self {
            strict_patch_replace: default_strict_patch_replace(),
            show_empty_multi_valued: default_show_empty_multi_valued(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_lenient() {
        let config = DispatchConfig::default();
        assert_eq!(config.max_results, 200);
        assert_eq!(config.default_page_size, 20);
        assert!(!config.compatibility.strict_patch_replace);
    }

    #[test]
    fn deserializes_with_partial_overrides() {
        let config: DispatchConfig =
            serde_json::from_value(serde_json::json!({"max_results": 500})).unwrap();
        assert_eq!(config.max_results, 500);
        assert_eq!(config.default_page_size, 20);
    }
}
