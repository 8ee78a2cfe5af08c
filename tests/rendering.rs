//! End-to-end rendering tests.
//!
//! These build metadata through the public API (or JSON), render it with
//! each mocking backend and compare against complete Kotlin sources.

use kt_testgen::signature;
use kt_testgen::{
    ClassMetadata, FunctionMetadata, GeneratorConfig, MockerKind, RenderState,
    StaticFunctionsMetadata, TestSourceRenderer, TypeNode,
};

fn ty(text: &str) -> TypeNode {
    signature::parse(text).unwrap()
}

fn renderer(kind: MockerKind) -> TestSourceRenderer {
    TestSourceRenderer::new(GeneratorConfig::with_mocker(kind))
}

fn parameterized(kind: MockerKind) -> TestSourceRenderer {
    TestSourceRenderer::new(GeneratorConfig {
        is_parameterized: true,
        ..GeneratorConfig::with_mocker(kind)
    })
}

fn service() -> ClassMetadata {
    ClassMetadata::new("com.example", "Service")
        .with_import("Repo", "com.example.data.Repo")
        .with_import("Unused", "com.example.Unused")
        .with_constructor_parameter("repo", ty("Repo"))
        .with_constructor_parameter("limit", ty("Int"))
        .with_function(
            FunctionMetadata::new("find", ty("User?"))
                .with_parameter("id", ty("Long"))
                .with_parameter("filter", ty("Filter?")),
        )
}

#[test]
fn minimal_class_is_identical_across_backends() {
    let class = ClassMetadata::new("com.example", "Foo");
    let outputs: Vec<String> = MockerKind::all()
        .into_iter()
        .map(|kind| renderer(kind).render_class(&class))
        .collect();

    assert_eq!(
        outputs[0],
        "package com.example\n\
         \n\
         class FooTest {\n\
         \x20   private lateinit var classUnderTest: Foo\n\
         \n\
         \x20   @Before\n\
         \x20   fun setUp() {\n\
         \x20       classUnderTest = Foo()\n\
         \x20   }\n\
         }\n"
    );
    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn mockito_service_with_mocked_dependency() {
    let expected = r#"package com.example

import com.example.data.Repo
import org.junit.runner.RunWith
import org.mockito.Mock
import org.mockito.junit.MockitoJUnitRunner
import org.mockito.kotlin.mock

@RunWith(MockitoJUnitRunner::class)
class ServiceTest {
    private lateinit var classUnderTest: Service

    @Mock
    private lateinit var repo: Repo

    private val limit: Int = 0

    @Before
    fun setUp() {
        classUnderTest = Service(repo, limit)
    }

    @Test
    fun `Given _ when find then _`() {
        // Given
        val id: Long = 0L
        val filter: Filter? = mock<Filter>()

        // When
        val actualValue = classUnderTest.find(id, filter)

        // Then
        TODO("Define assertions")
    }
}
"#;
    assert_eq!(renderer(MockerKind::Mockito).render_class(&service()), expected);
}

#[test]
fn mockk_service_with_mocked_dependency() {
    let expected = r#"package com.example

import com.example.data.Repo
import io.mockk.MockKAnnotations
import io.mockk.impl.annotations.MockK
import io.mockk.mockk

class ServiceTest {
    private lateinit var classUnderTest: Service

    @MockK
    private lateinit var repo: Repo

    private val limit: Int = 0

    @Before
    fun setUp() {
        MockKAnnotations.init(this)
        classUnderTest = Service(repo, limit)
    }

    @Test
    fun `Given _ when find then _`() {
        // Given
        val id: Long = 0L
        val filter: Filter? = mockk<Filter>()

        // When
        val actualValue = classUnderTest.find(id, filter)

        // Then
        TODO("Define assertions")
    }
}
"#;
    assert_eq!(renderer(MockerKind::Mockk).render_class(&service()), expected);
}

#[test]
fn mockito_parameterized_uses_rule_and_companion() {
    let class = ClassMetadata::new("com.example", "Service")
        .with_import("Repo", "com.example.data.Repo")
        .with_constructor_parameter("repo", ty("Repo"));

    let expected = r#"package com.example

import com.example.data.Repo
import org.junit.Rule
import org.junit.rules.MethodRule
import org.junit.runner.RunWith
import org.junit.runners.Parameterized
import org.junit.runners.Parameterized.Parameters
import org.mockito.Mock
import org.mockito.junit.MockitoJUnit

@RunWith(Parameterized::class)
class ServiceTest {
    private lateinit var classUnderTest: Service

    @get:Rule
    val mockitoRule: MethodRule = MockitoJUnit.rule()

    @Mock
    private lateinit var repo: Repo

    @Before
    fun setUp() {
        classUnderTest = Service(repo)
    }

    companion object {
        @JvmStatic
        @Parameters
        fun data(): Collection<Array<Any>> = listOf(
            arrayOf()
        )
    }
}
"#;
    assert_eq!(parameterized(MockerKind::Mockito).render_class(&class), expected);
}

#[test]
fn parameterized_without_constructor_mocks_uses_parameterized_runner() {
    let class = ClassMetadata::new("com.example", "Calc").with_constructor_parameter("base", ty("Int"));
    for kind in MockerKind::all() {
        let text = parameterized(kind).render_class(&class);
        assert!(text.contains("@RunWith(Parameterized::class)\nclass CalcTest {\n"), "{kind}");
        assert!(!text.contains("mockitoRule"), "{kind}");
    }
}

#[test]
fn abstract_subject_per_backend() {
    let shape = ClassMetadata::new("com.example", "Shape")
        .abstract_class()
        .with_constructor_parameter("sides", ty("Int"))
        .with_function(FunctionMetadata::new("area", ty("Double")).abstract_member())
        .with_function(FunctionMetadata::new("describe", ty("String")));

    let mockito = renderer(MockerKind::Mockito).render_class(&shape);
    assert!(mockito.contains("import org.mockito.Mockito\n"));
    assert!(mockito.contains("import org.mockito.kotlin.UseConstructor\n"));
    assert!(mockito.contains(
        "        classUnderTest = mock<Shape>(useConstructor = UseConstructor.withArguments(sides), \
         defaultAnswer = Mockito.CALLS_REAL_METHODS)\n"
    ));

    let mockk = renderer(MockerKind::Mockk).render_class(&shape);
    assert!(mockk.contains(
        "    @Before\n\
         \x20   fun setUp() {\n\
         \x20       classUnderTest = object : Shape(sides) {\n\
         \x20           override fun area(): Double = 0.0\n\
         \x20       }\n\
         \x20   }\n"
    ));

    // Abstract members never get a test of their own.
    for text in [&mockito, &mockk] {
        assert!(text.contains("fun `Given _ when describe then _`()"));
        assert!(!text.contains("when area then"));
    }
}

#[test]
fn mockk_abstract_member_returning_mock_imports_factory() {
    let class = ClassMetadata::new("com.example", "Screen")
        .abstract_class()
        .with_function(FunctionMetadata::new("canvas", ty("Canvas")).abstract_member());
    let text = renderer(MockerKind::Mockk).render_class(&class);
    assert!(text.contains("import io.mockk.mockk\n"));
    assert!(text.contains("override fun canvas(): Canvas = mockk<Canvas>()"));
}

#[test]
fn free_functions_with_receiver() {
    let functions = StaticFunctionsMetadata::new("com.example.text")
        .with_import("Formatter", "com.example.fmt.Formatter")
        .with_function(
            FunctionMetadata::new("shout", ty("String"))
                .with_parameter("formatter", ty("Formatter"))
                .with_receiver(ty("String")),
        );

    let expected = r#"package com.example.text

import com.example.fmt.Formatter
import io.mockk.mockk

class StringsTest {
    @Test
    fun `Given _ when String#shout then _`() {
        // Given
        val formatter: Formatter = mockk<Formatter>()
        val receiver: String = "receiver"

        // When
        val actualValue = receiver.shout(formatter)

        // Then
        TODO("Define assertions")
    }
}
"#;
    let mut r = renderer(MockerKind::Mockk);
    assert_eq!(r.render_static_functions(&functions, "StringsTest"), expected);
}

#[test]
fn member_extension_is_called_inside_subject_scope() {
    let class = ClassMetadata::new("com.example", "Dsl").with_function(
        FunctionMetadata::new("emit", ty("Unit")).with_receiver(ty("Builder")),
    );
    let text = renderer(MockerKind::Mockito).render_class(&class);
    assert!(text.contains("        val receiver: Builder = mock<Builder>()\n"));
    assert!(text.contains("        with(classUnderTest) { receiver.emit() }\n"));
    assert!(text.contains("fun `Given _ when Builder#emit then _`()"));
    assert!(text.contains("import org.mockito.kotlin.mock\n"));
}

#[test]
fn function_without_inputs_has_no_given_section() {
    let class = ClassMetadata::new("com.example", "Clock")
        .with_function(FunctionMetadata::new("tick", ty("Unit")));
    let text = renderer(MockerKind::Mockito).render_class(&class);
    assert!(!text.contains("// Given"));
    assert!(text.contains(
        "        // When\n\
         \x20       classUnderTest.tick()\n\
         \n\
         \x20       // Then\n"
    ));
}

#[test]
fn lambda_parameters_are_literals() {
    let class = ClassMetadata::new("com.example", "Loader").with_function(
        FunctionMetadata::new("load", ty("Unit"))
            .with_parameter("callback", ty("(Value?, Error) -> Unit")),
    );
    for kind in MockerKind::all() {
        let text = renderer(kind).render_class(&class);
        assert!(text.contains("        val callback: (Value?, Error) -> Unit = { value, error -> }\n"));
        assert!(!text.contains("import "), "{kind}: lambdas need no mocking import");
    }
}

#[test]
fn rendering_is_idempotent_across_sessions() {
    let mut r = renderer(MockerKind::Mockito);
    let first = r.render_class(&service());
    let other = r.render_class(&ClassMetadata::new("com.other", "Plain"));
    assert!(!other.contains("org.mockito"));
    assert_eq!(r.render_class(&service()), first);
    assert_eq!(r.state(), RenderState::Closed);
}

#[test]
fn renders_from_json_metadata() {
    let json = r#"{
        "package_name": "com.example",
        "imports": { "Repo": "com.example.data.Repo" },
        "class_name": "Service",
        "constructor_parameters": [ { "name": "repo", "type": "Repo" } ],
        "functions": [
            {
                "name": "count",
                "parameters": [ { "name": "ids", "type": "List<Int>?" } ],
                "return_type": "Int"
            }
        ]
    }"#;
    let class = ClassMetadata::from_json(json).unwrap();
    let text = renderer(MockerKind::Mockk).render_class(&class);
    assert!(text.contains("        val ids: List<Int>? = emptyList<Int>()\n"));
    assert!(text.contains("        val actualValue = classUnderTest.count(ids)\n"));
}

#[test]
fn config_from_toml_drives_rendering() {
    let config = GeneratorConfig::from_toml_str(
        r#"
        class_under_test_variable_name = "sut"
        mocker = "mockk"
        "#,
    )
    .unwrap();
    let mut r = TestSourceRenderer::new(config);
    let text = r.render_class(&service());
    assert!(text.contains("private lateinit var sut: Service"));
    assert!(text.contains("sut = Service(repo, limit)"));
    assert!(text.contains("@MockK"));
}
