//! Test source renderer: metadata → Kotlin test class text.
//!
//! One rendering session produces one test class and moves through
//! [`RenderState`] in order:
//!
//! ```text
//! Cleared → Preamble → ClassHeader → Fields → SetUp → TestMethods → Closed
//! ```
//!
//! Before anything is written, a discovery pass walks the metadata and
//! notifies the active [`MockerCodeGenerator`] of what it will need
//! (mocked constructor parameters, inline mocks, abstract subject,
//! parameterization), so the import block can be emitted first.
//!
//! Free-standing functions skip the subject field, constructor fields and
//! set-up method.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::config::GeneratorConfig;
use crate::error::TestgenResult;
use crate::metadata::{ClassMetadata, FunctionMetadata, StaticFunctionsMetadata};
use crate::mocker::MockerCodeGenerator;
use crate::qualifier::MockableTypeQualifier;
use crate::signature::TypeNode;

const INDENT: &str = "    ";
const RECEIVER_VARIABLE_NAME: &str = "receiver";
const PARAMETERS_IMPORT: &str = "org.junit.runners.Parameterized.Parameters";

/// Where a rendering session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Cleared,
    Preamble,
    ClassHeader,
    Fields,
    SetUp,
    TestMethods,
    Closed,
}

/// Renders test classes for class metadata and free-function groups.
///
/// A renderer owns its mocking backend. Sessions are sequential: every
/// `render_*` call starts by clearing the previous session.
pub struct TestSourceRenderer {
    config: GeneratorConfig,
    qualifier: MockableTypeQualifier,
    mocker: Box<dyn MockerCodeGenerator>,
    state: RenderState,
    out: String,
    /// Members written in the open class body; drives blank-line separation.
    members: usize,
    test_names: HashSet<String>,
}

impl TestSourceRenderer {
    /// Create a renderer using the backend named in `config`.
    pub fn new(config: GeneratorConfig) -> Self {
        let mocker = config.mocker.generator();
        Self {
            config,
            qualifier: MockableTypeQualifier::new(),
            mocker,
            state: RenderState::Cleared,
            out: String::new(),
            members: 0,
            test_names: HashSet::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Text emitted by the current session so far.
    pub fn output(&self) -> &str {
        &self.out
    }

    /// Return to [`RenderState::Cleared`] and reset the backend's accumulator.
    pub fn clear(&mut self) {
        self.out.clear();
        self.members = 0;
        self.test_names.clear();
        self.mocker.reset();
        self.transition(RenderState::Cleared);
    }

    /// Render the test class for `class`.
    pub fn render_class(&mut self, class: &ClassMetadata) -> String {
        self.clear();
        tracing::debug!(
            class = %class.class_name,
            functions = class.concrete_functions().count(),
            mocker = self.mocker.name(),
            "rendering test class"
        );

        let has_mocked_constructor_parameters = self.discover_class(class);
        let referenced = class_referenced_names(class);
        self.append_preamble(&class.package_name, &class.imports, &referenced);
        self.append_class_header(&format!("{}Test", class.class_name), has_mocked_constructor_parameters);
        self.append_subject_field(class);
        self.append_constructor_fields(class);
        self.append_set_up(class);
        for function in class.concrete_functions() {
            self.append_test_method(function, true);
        }
        self.close_class();

        tracing::debug!(class = %class.class_name, bytes = self.out.len(), "rendered test class");
        self.out.clone()
    }

    /// Parse class metadata from JSON and render its test class.
    pub fn render_class_json(&mut self, json: &str) -> TestgenResult<String> {
        let class = ClassMetadata::from_json(json)?;
        Ok(self.render_class(&class))
    }

    /// Render a test class named `test_class_name` for module-level functions.
    pub fn render_static_functions(
        &mut self,
        functions: &StaticFunctionsMetadata,
        test_class_name: &str,
    ) -> String {
        self.clear();
        tracing::debug!(
            class = test_class_name,
            functions = functions.concrete_functions().count(),
            mocker = self.mocker.name(),
            "rendering free-function tests"
        );

        self.discover_functions(functions.concrete_functions());
        if self.config.is_parameterized {
            self.mocker.set_is_parameterized_test();
        }
        let mut referenced = BTreeSet::new();
        for function in functions.concrete_functions() {
            referenced.extend(function_referenced_names(function));
        }
        self.append_preamble(&functions.package_name, &functions.imports, &referenced);
        self.append_class_header(test_class_name, false);
        self.transition(RenderState::Fields);
        self.transition(RenderState::SetUp);
        for function in functions.concrete_functions() {
            self.append_test_method(function, false);
        }
        self.close_class();

        self.out.clone()
    }

    // ── Discovery ───────────────────────────────────────────────────────

    /// Notify the backend of everything `class` will need.
    ///
    /// Returns whether any constructor parameter is a mock.
    fn discover_class(&mut self, class: &ClassMetadata) -> bool {
        let has_mocked_constructor_parameters = class
            .constructor_parameters
            .iter()
            .any(|p| self.qualifier.is_mockable(&p.data_type));
        if has_mocked_constructor_parameters {
            self.mocker.set_has_mocked_constructor_parameters(class);
        }

        self.discover_functions(class.concrete_functions());

        if class.is_abstract {
            self.mocker.set_is_abstract_class_under_test(class);
            if class
                .abstract_functions()
                .any(|f| self.qualifier.is_mockable(&f.return_type))
            {
                self.mocker.set_has_mocked_function_return_values();
            }
        }

        if self.config.is_parameterized {
            self.mocker.set_is_parameterized_test();
        }
        has_mocked_constructor_parameters
    }

    fn discover_functions<'a>(&mut self, mut functions: impl Iterator<Item = &'a FunctionMetadata>) {
        let qualifier = self.qualifier;
        let needs_inline_mocks = functions.any(|f| {
            f.parameters.iter().any(|p| qualifier.is_mockable(&p.data_type))
                || f.extension_receiver_type
                    .as_ref()
                    .is_some_and(|r| qualifier.is_mockable(r))
        });
        if needs_inline_mocks {
            self.mocker.set_has_mocked_function_parameters();
        }
    }

    // ── Emission ────────────────────────────────────────────────────────

    fn append_preamble(
        &mut self,
        package_name: &str,
        imports: &BTreeMap<String, String>,
        referenced: &BTreeSet<String>,
    ) {
        self.transition(RenderState::Preamble);
        if !package_name.is_empty() {
            self.out.push_str(&format!("package {package_name}\n\n"));
        }

        let mut lines = self.mocker.required_imports();
        lines.extend(
            imports
                .iter()
                .filter(|(name, _)| referenced.contains(*name))
                .map(|(_, path)| path.clone()),
        );
        if self.config.is_parameterized {
            lines.insert(PARAMETERS_IMPORT.to_string());
        }
        if !lines.is_empty() {
            for path in &lines {
                self.out.push_str(&format!("import {path}\n"));
            }
            self.out.push('\n');
        }
    }

    fn append_class_header(&mut self, test_class_name: &str, has_mocked_constructor_parameters: bool) {
        self.transition(RenderState::ClassHeader);
        let annotation = if has_mocked_constructor_parameters {
            self.mocker.test_class_base_runner_annotation()
        } else if self.config.is_parameterized {
            self.mocker.test_class_parameterized_runner_annotation()
        } else {
            None
        };
        if let Some(annotation) = annotation {
            self.out.push_str(&annotation);
            self.out.push('\n');
        }
        self.out.push_str(&format!("class {test_class_name} {{\n"));
    }

    fn append_subject_field(&mut self, class: &ClassMetadata) {
        self.transition(RenderState::Fields);
        let field = format!(
            "private lateinit var {}: {}",
            self.config.class_under_test_variable_name, class.class_name
        );
        self.append_member(&field);
        if let Some(rule) = self.mocker.mocking_rule() {
            self.append_member(&rule);
        }
    }

    fn append_constructor_fields(&mut self, class: &ClassMetadata) {
        for parameter in &class.constructor_parameters {
            let declaration = self
                .mocker
                .constructor_parameter_declaration(&self.qualifier, parameter);
            self.append_member(&declaration);
        }
    }

    fn append_set_up(&mut self, class: &ClassMetadata) {
        self.transition(RenderState::SetUp);
        let subject = if class.is_abstract {
            self.mocker.abstract_class_under_test(class)
        } else {
            let arguments = class
                .constructor_parameters
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}({arguments})", class.class_name)
        };

        let mut body = Vec::new();
        if let Some(statements) = self.mocker.set_up_statements() {
            body.push(statements);
        }
        body.push(format!("{} = {subject}", self.config.class_under_test_variable_name));
        self.append_method("@Before\nfun setUp()", &body.join("\n"));
    }

    /// One `@Test` method. `on_subject` routes calls through the subject under test.
    fn append_test_method(&mut self, function: &FunctionMetadata, on_subject: bool) {
        self.transition(RenderState::TestMethods);
        let name = test_method_name(function);
        if !self.test_names.insert(name.clone()) {
            tracing::warn!(test = %name, "duplicate test method name; overloads share a name");
        }

        let mut sections = Vec::new();
        let given = self.given_section(function);
        if !given.is_empty() {
            sections.push(format!("// Given\n{}", given.join("\n")));
        }
        sections.push(format!("// When\n{}", self.when_statement(function, on_subject)));
        sections.push(format!("// Then\n{}", self.config.default_assertion_statement));

        self.append_method(&format!("@Test\nfun `{name}`()"), &sections.join("\n\n"));
    }

    fn given_section(&self, function: &FunctionMetadata) -> Vec<String> {
        let mut lines: Vec<String> = function
            .parameters
            .iter()
            .map(|p| self.local_value(&p.name, &p.data_type))
            .collect();
        if let Some(receiver) = &function.extension_receiver_type {
            lines.push(self.local_value(&receiver_variable_name(function), receiver));
        }
        lines
    }

    fn local_value(&self, name: &str, data_type: &TypeNode) -> String {
        let value = self
            .mocker
            .instance_expression(&self.qualifier, name, data_type);
        format!("val {name}: {data_type} = {value}")
    }

    fn when_statement(&self, function: &FunctionMetadata, on_subject: bool) -> String {
        let arguments = function
            .parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let call = format!("{}({arguments})", function.name);
        let subject = &self.config.class_under_test_variable_name;

        let invocation = match (&function.extension_receiver_type, on_subject) {
            (Some(_), true) => {
                format!("with({subject}) {{ {}.{call} }}", receiver_variable_name(function))
            }
            (Some(_), false) => format!("{}.{call}", receiver_variable_name(function)),
            (None, true) => format!("{subject}.{call}"),
            (None, false) => call,
        };

        if function.return_type.is_unit() {
            invocation
        } else {
            format!("val {} = {invocation}", self.config.actual_value_variable_name)
        }
    }

    fn append_parameters_companion(&mut self) {
        self.append_member(
            "companion object {\n\
             \x20   @JvmStatic\n\
             \x20   @Parameters\n\
             \x20   fun data(): Collection<Array<Any>> = listOf(\n\
             \x20       arrayOf()\n\
             \x20   )\n\
             }",
        );
    }

    fn close_class(&mut self) {
        if self.config.is_parameterized {
            self.append_parameters_companion();
        }
        self.out.push_str("}\n");
        self.transition(RenderState::Closed);
    }

    /// `signature {` + body + `}` as one class member.
    fn append_method(&mut self, signature: &str, body: &str) {
        let mut text = format!("{signature} {{\n");
        for line in body.lines() {
            if line.is_empty() {
                text.push('\n');
            } else {
                text.push_str(INDENT);
                text.push_str(line);
                text.push('\n');
            }
        }
        text.push('}');
        self.append_member(&text);
    }

    /// Write a class member one level deep, blank-line separated from the previous one.
    fn append_member(&mut self, text: &str) {
        if self.members > 0 {
            self.out.push('\n');
        }
        self.members += 1;
        for line in text.lines() {
            if !line.is_empty() {
                self.out.push_str(INDENT);
                self.out.push_str(line);
            }
            self.out.push('\n');
        }
    }

    fn transition(&mut self, next: RenderState) {
        tracing::trace!(from = ?self.state, to = ?next, "render state");
        self.state = next;
    }
}

/// Local holding the extension receiver: `receiver`, or `receiver1`,
/// `receiver2`, … when a parameter already uses the name.
fn receiver_variable_name(function: &FunctionMetadata) -> String {
    let taken = |name: &str| function.parameters.iter().any(|p| p.name == name);
    if !taken(RECEIVER_VARIABLE_NAME) {
        return RECEIVER_VARIABLE_NAME.to_string();
    }
    (1..)
        .map(|n| format!("{RECEIVER_VARIABLE_NAME}{n}"))
        .find(|name| !taken(name))
        .unwrap_or_default()
}

/// `Given _ when load then _`, or `Given _ when String#load then _` for
/// extension functions.
pub fn test_method_name(function: &FunctionMetadata) -> String {
    match &function.extension_receiver_type {
        Some(receiver) => format!("Given _ when {}#{} then _", receiver.name(), function.name),
        None => format!("Given _ when {} then _", function.name),
    }
}

/// Type names a test for `function` mentions.
fn function_referenced_names(function: &FunctionMetadata) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for parameter in &function.parameters {
        names.extend(parameter.data_type.referenced_names());
    }
    if let Some(receiver) = &function.extension_receiver_type {
        names.extend(receiver.referenced_names());
    }
    names
}

fn class_referenced_names(class: &ClassMetadata) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for parameter in &class.constructor_parameters {
        names.extend(parameter.data_type.referenced_names());
    }
    for function in class.concrete_functions() {
        names.extend(function_referenced_names(function));
    }
    if class.is_abstract {
        for function in class.abstract_functions() {
            names.extend(function_referenced_names(function));
            names.extend(function.return_type.referenced_names());
        }
    }
    names
}
