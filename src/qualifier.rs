//! Mockable-type qualifier.
//!
//! Decides whether a value of a given type can be written as a literal
//! (`0`, `"name"`, `emptyList<Int>()`, `{ value -> }`) or has to come from
//! the mocking framework.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::signature::TypeNode;

/// Literal-construction rule for a concrete type.
#[derive(Debug, Clone, Copy)]
pub struct ConcreteValue {
    /// Registry name (or `"Lambda"`) the rule was found under.
    pub tag: &'static str,
    build: fn(&str, &TypeNode) -> String,
}

impl ConcreteValue {
    /// Literal expression for a value named `variable_name` of type `data_type`.
    pub fn expression(&self, variable_name: &str, data_type: &TypeNode) -> String {
        (self.build)(variable_name, data_type)
    }
}

const LAMBDA_TAG: &str = "Lambda";

static REGISTRY: OnceLock<HashMap<&'static str, ConcreteValue>> = OnceLock::new();

fn registry() -> &'static HashMap<&'static str, ConcreteValue> {
    REGISTRY.get_or_init(|| {
        let rules = vec![
            rule("Boolean", |_, _| "false".into()),
            rule("Byte", |_, _| "0".into()),
            rule("Short", |_, _| "0".into()),
            rule("Int", |_, _| "0".into()),
            rule("Long", |_, _| "0L".into()),
            rule("Float", |_, _| "0f".into()),
            rule("Double", |_, _| "0.0".into()),
            rule("Char", |_, _| "'a'".into()),
            rule("String", |name, _| format!("\"{name}\"")),
            rule("CharSequence", |name, _| format!("\"{name}\"")),
            rule("Unit", |_, _| "Unit".into()),
            rule("Any", |_, _| "Any()".into()),
            rule("List", |_, t| format!("emptyList<{}>()", type_arguments(t, 1))),
            rule("Collection", |_, t| format!("emptyList<{}>()", type_arguments(t, 1))),
            rule("Iterable", |_, t| format!("emptyList<{}>()", type_arguments(t, 1))),
            rule("MutableList", |_, t| format!("mutableListOf<{}>()", type_arguments(t, 1))),
            rule("ArrayList", |_, t| format!("arrayListOf<{}>()", type_arguments(t, 1))),
            rule("Set", |_, t| format!("emptySet<{}>()", type_arguments(t, 1))),
            rule("MutableSet", |_, t| format!("mutableSetOf<{}>()", type_arguments(t, 1))),
            rule("HashSet", |_, t| format!("hashSetOf<{}>()", type_arguments(t, 1))),
            rule("Sequence", |_, t| format!("emptySequence<{}>()", type_arguments(t, 1))),
            rule("Array", |_, t| format!("emptyArray<{}>()", type_arguments(t, 1))),
            rule("Map", |_, t| format!("emptyMap<{}>()", type_arguments(t, 2))),
            rule("MutableMap", |_, t| format!("mutableMapOf<{}>()", type_arguments(t, 2))),
            rule("HashMap", |_, t| format!("hashMapOf<{}>()", type_arguments(t, 2))),
            rule("BooleanArray", |_, _| "booleanArrayOf()".into()),
            rule("ByteArray", |_, _| "byteArrayOf()".into()),
            rule("ShortArray", |_, _| "shortArrayOf()".into()),
            rule("IntArray", |_, _| "intArrayOf()".into()),
            rule("LongArray", |_, _| "longArrayOf()".into()),
            rule("FloatArray", |_, _| "floatArrayOf()".into()),
            rule("DoubleArray", |_, _| "doubleArrayOf()".into()),
            rule("CharArray", |_, _| "charArrayOf()".into()),
        ];
        rules.into_iter().collect()
    })
}

fn rule(tag: &'static str, build: fn(&str, &TypeNode) -> String) -> (&'static str, ConcreteValue) {
    (tag, ConcreteValue { tag, build })
}

/// Rendered type arguments of a collection node, or `Any` per slot when the
/// node carries none.
fn type_arguments(data_type: &TypeNode, arity: usize) -> String {
    match data_type {
        TypeNode::Generic { type_arguments, .. } => type_arguments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        TypeNode::Specific { .. } | TypeNode::Lambda { .. } => vec!["Any"; arity].join(", "),
    }
}

/// Registry key for a type name: standard-library prefixes are ignored.
fn lookup_name(name: &str) -> &str {
    name.strip_prefix("kotlin.collections.")
        .or_else(|| name.strip_prefix("kotlin."))
        .unwrap_or(name)
}

/// A no-op lambda literal echoing the lambda's parameter names.
fn lambda_literal(_: &str, data_type: &TypeNode) -> String {
    let TypeNode::Lambda { parameter_types, .. } = data_type else {
        return "{}".into();
    };
    if parameter_types.is_empty() {
        return "{}".into();
    }

    let base_names: Vec<String> = parameter_types.iter().map(parameter_name).collect();
    let names: Vec<String> = base_names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if base_names.iter().filter(|other| *other == name).count() > 1 {
                format!("{name}{}", i + 1)
            } else {
                name.clone()
            }
        })
        .map(escape_keyword)
        .collect();
    format!("{{ {} -> }}", names.join(", "))
}

/// Kotlin hard keywords; a lambda parameter with one of these names is escaped.
const HARD_KEYWORDS: [&str; 28] = [
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// `List<Int>` → `list`, `Value?` → `value`.
fn parameter_name(data_type: &TypeNode) -> String {
    let mut chars = data_type.simple_name().chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() => first.to_lowercase().chain(chars).collect(),
        _ => "value".into(),
    }
}

/// `object` → `` `object` ``; other names unchanged.
fn escape_keyword(name: String) -> String {
    if HARD_KEYWORDS.contains(&name.as_str()) {
        format!("`{name}`")
    } else {
        name
    }
}

/// Classifies types as literal-constructible or mock-requiring.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockableTypeQualifier;

impl MockableTypeQualifier {
    pub fn new() -> Self {
        Self
    }

    /// The literal rule for `data_type`, or `None` when it needs a mock.
    pub fn concrete_value(&self, data_type: &TypeNode) -> Option<ConcreteValue> {
        match data_type {
            TypeNode::Lambda { .. } => Some(ConcreteValue {
                tag: LAMBDA_TAG,
                build: lambda_literal,
            }),
            TypeNode::Specific { name, .. } | TypeNode::Generic { name, .. } => {
                registry().get(lookup_name(name)).copied()
            }
        }
    }

    pub fn is_mockable(&self, data_type: &TypeNode) -> bool {
        self.concrete_value(data_type).is_none()
    }

    /// Registered concrete type names, sorted.
    pub fn registered_type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = registry().keys().copied().collect();
        names.sort_unstable();
        names
    }
}
