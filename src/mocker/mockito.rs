//! Mockito backend (through `mockito-kotlin`).
//!
//! Constructor mocks are `@Mock` fields initialised by `MockitoJUnitRunner`.
//! A parameterized class cannot use that runner, so in that case the mocks
//! are initialised by a `MockitoJUnit.rule()` field instead.
//!
//! ## Examples
//!
//! - constructor mock → `@Mock private lateinit var repo: Repo`
//! - inline mock → `mock<Repo>()`
//! - abstract subject → `mock<Shape>(defaultAnswer = Mockito.CALLS_REAL_METHODS)`

use std::collections::BTreeSet;

use crate::metadata::ClassMetadata;
use crate::signature::TypeNode;

use super::{
    MockerCodeGenerator, MockerState, PARAMETERIZED_IMPORT, PARAMETERIZED_RUNNER_ANNOTATION,
    RUN_WITH_IMPORT,
};

const MOCK_ANNOTATION_IMPORT: &str = "org.mockito.Mock";
const MOCK_FUNCTION_IMPORT: &str = "org.mockito.kotlin.mock";
const MOCKITO_IMPORT: &str = "org.mockito.Mockito";
const USE_CONSTRUCTOR_IMPORT: &str = "org.mockito.kotlin.UseConstructor";
const RUNNER_IMPORT: &str = "org.mockito.junit.MockitoJUnitRunner";
const RULE_IMPORTS: [&str; 3] = [
    "org.junit.Rule",
    "org.junit.rules.MethodRule",
    "org.mockito.junit.MockitoJUnit",
];

/// Annotation/reflection-style backend.
#[derive(Debug, Default)]
pub struct MockitoCodeGenerator {
    state: MockerState,
}

impl MockitoCodeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mocks are created by the rule instead of the runner.
    fn needs_rule(&self) -> bool {
        self.state.has_mocked_constructor_parameters && self.state.is_parameterized
    }
}

impl MockerCodeGenerator for MockitoCodeGenerator {
    fn name(&self) -> &str {
        "mockito"
    }

    fn constructor_mock(&self, name: &str, data_type: &TypeNode) -> String {
        format!("@Mock\nprivate lateinit var {name}: {}", data_type.non_null())
    }

    fn mocked_instance(&self, data_type: &TypeNode) -> String {
        format!("mock<{}>()", data_type.non_null())
    }

    fn abstract_class_under_test(&self, class: &ClassMetadata) -> String {
        if class.constructor_parameters.is_empty() {
            return format!(
                "mock<{}>(defaultAnswer = Mockito.CALLS_REAL_METHODS)",
                class.class_name
            );
        }
        let arguments = class
            .constructor_parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "mock<{}>(useConstructor = UseConstructor.withArguments({arguments}), \
             defaultAnswer = Mockito.CALLS_REAL_METHODS)",
            class.class_name
        )
    }

    fn set_has_mocked_constructor_parameters(&mut self, class: &ClassMetadata) {
        tracing::trace!(class = %class.class_name, "mockito: mocked constructor parameters");
        self.state.has_mocked_constructor_parameters = true;
        self.state.add_import(MOCK_ANNOTATION_IMPORT);
        self.state.add_import(RUN_WITH_IMPORT);
    }

    fn set_has_mocked_function_parameters(&mut self) {
        self.state.add_import(MOCK_FUNCTION_IMPORT);
    }

    // Abstract members answer with Mockito defaults; nothing to import.
    fn set_has_mocked_function_return_values(&mut self) {}

    fn set_is_abstract_class_under_test(&mut self, class: &ClassMetadata) {
        self.state.add_import(MOCK_FUNCTION_IMPORT);
        self.state.add_import(MOCKITO_IMPORT);
        if !class.constructor_parameters.is_empty() {
            self.state.add_import(USE_CONSTRUCTOR_IMPORT);
        }
    }

    fn set_is_parameterized_test(&mut self) {
        self.state.is_parameterized = true;
        self.state.add_import(RUN_WITH_IMPORT);
        self.state.add_import(PARAMETERIZED_IMPORT);
    }

    fn required_imports(&self) -> BTreeSet<String> {
        let mut imports = self.state.imports().clone();
        if self.needs_rule() {
            imports.extend(RULE_IMPORTS.iter().map(|i| i.to_string()));
        } else if self.state.has_mocked_constructor_parameters {
            imports.insert(RUNNER_IMPORT.to_string());
        }
        imports
    }

    fn reset(&mut self) {
        self.state.reset();
    }

    fn test_class_base_runner_annotation(&self) -> Option<String> {
        if self.state.is_parameterized {
            Some(PARAMETERIZED_RUNNER_ANNOTATION.to_string())
        } else {
            Some("@RunWith(MockitoJUnitRunner::class)".to_string())
        }
    }

    fn test_class_parameterized_runner_annotation(&self) -> Option<String> {
        Some(PARAMETERIZED_RUNNER_ANNOTATION.to_string())
    }

    fn mocking_rule(&self) -> Option<String> {
        self.needs_rule()
            .then(|| "@get:Rule\nval mockitoRule: MethodRule = MockitoJUnit.rule()".to_string())
    }

    fn set_up_statements(&self) -> Option<String> {
        None
    }
}
