//! Generator configuration.
//!
//! All string settings are substituted verbatim into the emitted source.
//! The configuration can be parsed from TOML; missing keys fall back to the
//! defaults, so an empty document yields [`GeneratorConfig::default`].
//!
//! ```toml
//! class_under_test_variable_name = "sut"
//! actual_value_variable_name = "result"
//! default_assertion_statement = "assertTrue(false)"
//! mocker = "mockk"
//! is_parameterized = false
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::mocker::MockerKind;

/// Settings consumed by the test source renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Name of the subject-under-test field.
    #[serde(default = "default_class_under_test_variable_name")]
    pub class_under_test_variable_name: String,
    /// Name of the local that captures a function's result.
    #[serde(default = "default_actual_value_variable_name")]
    pub actual_value_variable_name: String,
    /// Statement emitted in every "then" section.
    #[serde(default = "default_assertion_statement")]
    pub default_assertion_statement: String,
    /// Mocking framework backend.
    #[serde(default)]
    pub mocker: MockerKind,
    /// Whether generated classes run under JUnit's `Parameterized` runner.
    #[serde(default)]
    pub is_parameterized: bool,
}

fn default_class_under_test_variable_name() -> String {
    "classUnderTest".into()
}
fn default_actual_value_variable_name() -> String {
    "actualValue".into()
}
fn default_assertion_statement() -> String {
    "TODO(\"Define assertions\")".into()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            class_under_test_variable_name: default_class_under_test_variable_name(),
            actual_value_variable_name: default_actual_value_variable_name(),
            default_assertion_statement: default_assertion_statement(),
            mocker: MockerKind::default(),
            is_parameterized: false,
        }
    }
}

impl GeneratorConfig {
    /// Default settings with a specific mocking backend.
    pub fn with_mocker(mocker: MockerKind) -> Self {
        Self {
            mocker,
            ..Default::default()
        }
    }

    /// Parse from an in-memory TOML document.
    pub fn from_toml_str(toml_str: &str) -> ConfigResult<Self> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Serialize to a TOML document.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}
