//! Mocking-framework backends.
//!
//! The renderer never writes framework-specific text itself. It asks the
//! active [`MockerCodeGenerator`] for mock declarations, mock instances,
//! runner annotations and set-up statements, and notifies it of the facts it
//! discovers while walking the metadata (`set_has_*` / `set_is_*`).
//!
//! ```text
//! ClassMetadata ──→ TestSourceRenderer ──→ MockerCodeGenerator ──→ framework text
//!                          │                 (mockito | mockk)
//!                          └──→ MockableTypeQualifier ──→ literal text
//! ```
//!
//! The set of backends is closed: [`MockerKind`] enumerates them and builds
//! the matching generator.

pub mod mockito;
pub mod mockk;

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::metadata::{ClassMetadata, TypedParameter};
use crate::qualifier::MockableTypeQualifier;
use crate::signature::TypeNode;

pub use mockito::MockitoCodeGenerator;
pub use mockk::MockkCodeGenerator;

pub(crate) const RUN_WITH_IMPORT: &str = "org.junit.runner.RunWith";
pub(crate) const PARAMETERIZED_IMPORT: &str = "org.junit.runners.Parameterized";
pub(crate) const PARAMETERIZED_RUNNER_ANNOTATION: &str = "@RunWith(Parameterized::class)";

/// Supported mocking frameworks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MockerKind {
    /// Mockito through `mockito-kotlin`: annotated fields and a JUnit runner.
    #[default]
    Mockito,
    /// MockK: DSL-style mocks initialised in the set-up method.
    Mockk,
}

impl MockerKind {
    /// A fresh generator for this framework, with an empty accumulator.
    pub fn generator(self) -> Box<dyn MockerCodeGenerator> {
        match self {
            MockerKind::Mockito => Box::new(MockitoCodeGenerator::new()),
            MockerKind::Mockk => Box::new(MockkCodeGenerator::new()),
        }
    }

    pub fn all() -> [MockerKind; 2] {
        [MockerKind::Mockito, MockerKind::Mockk]
    }
}

impl fmt::Display for MockerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MockerKind::Mockito => write!(f, "mockito"),
            MockerKind::Mockk => write!(f, "mockk"),
        }
    }
}

/// Facts a backend accumulates during one rendering session.
///
/// Imports that depend on a combination of facts are derived from the flags
/// when queried, so the order of the `set_*` notifications never matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockerState {
    imports: BTreeSet<String>,
    pub has_mocked_constructor_parameters: bool,
    pub is_parameterized: bool,
}

impl MockerState {
    pub fn add_import(&mut self, qualified_path: &str) {
        self.imports.insert(qualified_path.to_string());
    }

    pub fn imports(&self) -> &BTreeSet<String> {
        &self.imports
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// One mocking framework's voice.
///
/// Declarations may span several lines; the renderer indents every line.
pub trait MockerCodeGenerator: Send + Sync {
    /// Framework name used in logs (e.g. "mockito").
    fn name(&self) -> &str;

    /// Field declaration for a constructor parameter that is a managed mock.
    fn constructor_mock(&self, name: &str, data_type: &TypeNode) -> String;

    /// Expression creating an inline mock of `data_type`.
    fn mocked_instance(&self, data_type: &TypeNode) -> String;

    /// Expression creating an instance of an abstract class under test.
    fn abstract_class_under_test(&self, class: &ClassMetadata) -> String;

    fn set_has_mocked_constructor_parameters(&mut self, class: &ClassMetadata);

    fn set_has_mocked_function_parameters(&mut self);

    fn set_has_mocked_function_return_values(&mut self);

    fn set_is_abstract_class_under_test(&mut self, class: &ClassMetadata);

    fn set_is_parameterized_test(&mut self);

    /// Fully qualified imports needed by the text produced so far.
    fn required_imports(&self) -> BTreeSet<String>;

    /// Forget everything accumulated for the previous class.
    fn reset(&mut self);

    /// Class annotation used when the class has mocked constructor parameters.
    fn test_class_base_runner_annotation(&self) -> Option<String>;

    /// Class annotation used for parameterized tests without mocked fields.
    fn test_class_parameterized_runner_annotation(&self) -> Option<String>;

    /// Shared JUnit rule field declaration, when the framework needs one.
    fn mocking_rule(&self) -> Option<String>;

    /// Statements that open the set-up method.
    fn set_up_statements(&self) -> Option<String>;

    /// Field declaration for a constructor parameter: a literal-initialised
    /// value for concrete types, otherwise the framework's mock field.
    fn constructor_parameter_declaration(
        &self,
        qualifier: &MockableTypeQualifier,
        parameter: &TypedParameter,
    ) -> String {
        match qualifier.concrete_value(&parameter.data_type) {
            Some(value) => format!(
                "private val {}: {} = {}",
                parameter.name,
                parameter.data_type,
                value.expression(&parameter.name, &parameter.data_type)
            ),
            None => self.constructor_mock(&parameter.name, &parameter.data_type),
        }
    }

    /// Value expression for a local of `data_type`: a literal or an inline mock.
    fn instance_expression(
        &self,
        qualifier: &MockableTypeQualifier,
        variable_name: &str,
        data_type: &TypeNode,
    ) -> String {
        match qualifier.concrete_value(data_type) {
            Some(value) => value.expression(variable_name, data_type),
            None => self.mocked_instance(data_type),
        }
    }
}
