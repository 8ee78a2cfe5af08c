//! MockK backend.
//!
//! Constructor mocks are `@MockK` fields initialised by
//! `MockKAnnotations.init(this)` in the set-up method, so no runner is
//! needed. Abstract classes under test become anonymous objects.

use std::collections::BTreeSet;

use crate::metadata::{ClassMetadata, FunctionMetadata};
use crate::qualifier::MockableTypeQualifier;
use crate::signature::TypeNode;

use super::{
    MockerCodeGenerator, MockerState, PARAMETERIZED_IMPORT, PARAMETERIZED_RUNNER_ANNOTATION,
    RUN_WITH_IMPORT,
};

const MOCKK_ANNOTATIONS_IMPORT: &str = "io.mockk.MockKAnnotations";
const MOCKK_ANNOTATION_IMPORT: &str = "io.mockk.impl.annotations.MockK";
const MOCKK_FUNCTION_IMPORT: &str = "io.mockk.mockk";

/// DSL-style backend.
#[derive(Debug, Default)]
pub struct MockkCodeGenerator {
    state: MockerState,
    qualifier: MockableTypeQualifier,
}

impl MockkCodeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `override fun Receiver.name(a: A): R = value`
    fn override_member(&self, function: &FunctionMetadata) -> String {
        let receiver = function
            .extension_receiver_type
            .as_ref()
            .map(|r| match r {
                TypeNode::Lambda { .. } => format!("({r})."),
                TypeNode::Specific { .. } | TypeNode::Generic { .. } => format!("{r}."),
            })
            .unwrap_or_default();
        let parameters = function
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.data_type))
            .collect::<Vec<_>>()
            .join(", ");
        let value = self.instance_expression(&self.qualifier, &function.name, &function.return_type);
        format!(
            "override fun {receiver}{}({parameters}): {} = {value}",
            function.name, function.return_type
        )
    }
}

impl MockerCodeGenerator for MockkCodeGenerator {
    fn name(&self) -> &str {
        "mockk"
    }

    fn constructor_mock(&self, name: &str, data_type: &TypeNode) -> String {
        format!("@MockK\nprivate lateinit var {name}: {}", data_type.non_null())
    }

    fn mocked_instance(&self, data_type: &TypeNode) -> String {
        format!("mockk<{}>()", data_type.non_null())
    }

    fn abstract_class_under_test(&self, class: &ClassMetadata) -> String {
        let arguments = class
            .constructor_parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let members: Vec<String> = class
            .abstract_functions()
            .map(|f| self.override_member(f))
            .collect();

        let header = format!("object : {}({arguments}) {{", class.class_name);
        if members.is_empty() {
            return format!("{header}}}");
        }
        let body = members
            .iter()
            .map(|m| format!("    {m}"))
            .collect::<Vec<_>>()
            .join("\n\n");
        format!("{header}\n{body}\n}}")
    }

    fn set_has_mocked_constructor_parameters(&mut self, class: &ClassMetadata) {
        tracing::trace!(class = %class.class_name, "mockk: mocked constructor parameters");
        self.state.has_mocked_constructor_parameters = true;
        self.state.add_import(MOCKK_ANNOTATIONS_IMPORT);
        self.state.add_import(MOCKK_ANNOTATION_IMPORT);
    }

    fn set_has_mocked_function_parameters(&mut self) {
        self.state.add_import(MOCKK_FUNCTION_IMPORT);
    }

    fn set_has_mocked_function_return_values(&mut self) {
        self.state.add_import(MOCKK_FUNCTION_IMPORT);
    }

    // The anonymous object needs nothing beyond the class's own imports.
    fn set_is_abstract_class_under_test(&mut self, _class: &ClassMetadata) {}

    fn set_is_parameterized_test(&mut self) {
        self.state.is_parameterized = true;
        self.state.add_import(RUN_WITH_IMPORT);
        self.state.add_import(PARAMETERIZED_IMPORT);
    }

    fn required_imports(&self) -> BTreeSet<String> {
        self.state.imports().clone()
    }

    fn reset(&mut self) {
        self.state.reset();
    }

    fn test_class_base_runner_annotation(&self) -> Option<String> {
        self.state
            .is_parameterized
            .then(|| PARAMETERIZED_RUNNER_ANNOTATION.to_string())
    }

    fn test_class_parameterized_runner_annotation(&self) -> Option<String> {
        Some(PARAMETERIZED_RUNNER_ANNOTATION.to_string())
    }

    fn mocking_rule(&self) -> Option<String> {
        None
    }

    fn set_up_statements(&self) -> Option<String> {
        self.state
            .has_mocked_constructor_parameters
            .then(|| "MockKAnnotations.init(this)".to_string())
    }
}
