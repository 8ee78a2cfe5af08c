//! Source metadata consumed by the renderer.
//!
//! These are immutable value types produced by an external source parser.
//! They can be built in code with the builder-style constructors or
//! deserialized from JSON, where every type may be given either as a
//! structured [`TypeNode`] or as a signature string such as `"List<Int>?"`.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{MetadataError, MetadataResult};
use crate::signature::{self, TypeNode};

/// A named, typed parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedParameter {
    pub name: String,
    #[serde(rename = "type", deserialize_with = "deserialize_type")]
    pub data_type: TypeNode,
}

impl TypedParameter {
    pub fn new(name: impl Into<String>, data_type: TypeNode) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A function or method under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionMetadata {
    pub name: String,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub parameters: Vec<TypedParameter>,
    /// When present the function is called as `receiver.name(...)`.
    #[serde(default, deserialize_with = "deserialize_optional_type")]
    pub extension_receiver_type: Option<TypeNode>,
    #[serde(deserialize_with = "deserialize_type")]
    pub return_type: TypeNode,
}

impl FunctionMetadata {
    pub fn new(name: impl Into<String>, return_type: TypeNode) -> Self {
        Self {
            name: name.into(),
            is_abstract: false,
            parameters: Vec::new(),
            extension_receiver_type: None,
            return_type,
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, data_type: TypeNode) -> Self {
        self.parameters.push(TypedParameter::new(name, data_type));
        self
    }

    pub fn with_receiver(mut self, receiver: TypeNode) -> Self {
        self.extension_receiver_type = Some(receiver);
        self
    }

    pub fn abstract_member(mut self) -> Self {
        self.is_abstract = true;
        self
    }
}

/// A class whose functions get one generated test each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMetadata {
    pub package_name: String,
    /// Simple name → fully qualified path.
    #[serde(default)]
    pub imports: BTreeMap<String, String>,
    pub class_name: String,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub constructor_parameters: Vec<TypedParameter>,
    #[serde(default)]
    pub functions: Vec<FunctionMetadata>,
}

impl ClassMetadata {
    pub fn new(package_name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            imports: BTreeMap::new(),
            class_name: class_name.into(),
            is_abstract: false,
            constructor_parameters: Vec::new(),
            functions: Vec::new(),
        }
    }

    /// Deserialize class metadata from the JSON handed over by the source parser.
    pub fn from_json(json: &str) -> MetadataResult<Self> {
        serde_json::from_str(json).map_err(|e| MetadataError::Json {
            message: e.to_string(),
        })
    }

    pub fn with_import(mut self, name: impl Into<String>, qualified_path: impl Into<String>) -> Self {
        self.imports.insert(name.into(), qualified_path.into());
        self
    }

    pub fn with_constructor_parameter(mut self, name: impl Into<String>, data_type: TypeNode) -> Self {
        self.constructor_parameters.push(TypedParameter::new(name, data_type));
        self
    }

    pub fn with_function(mut self, function: FunctionMetadata) -> Self {
        self.functions.push(function);
        self
    }

    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Functions that get a generated test method.
    pub fn concrete_functions(&self) -> impl Iterator<Item = &FunctionMetadata> {
        self.functions.iter().filter(|f| !f.is_abstract)
    }

    /// Functions an anonymous subclass has to override.
    pub fn abstract_functions(&self) -> impl Iterator<Item = &FunctionMetadata> {
        self.functions.iter().filter(|f| f.is_abstract)
    }
}

/// Module-level functions with no enclosing class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticFunctionsMetadata {
    pub package_name: String,
    #[serde(default)]
    pub imports: BTreeMap<String, String>,
    #[serde(default)]
    pub functions: Vec<FunctionMetadata>,
}

impl StaticFunctionsMetadata {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            imports: BTreeMap::new(),
            functions: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> MetadataResult<Self> {
        serde_json::from_str(json).map_err(|e| MetadataError::Json {
            message: e.to_string(),
        })
    }

    pub fn with_import(mut self, name: impl Into<String>, qualified_path: impl Into<String>) -> Self {
        self.imports.insert(name.into(), qualified_path.into());
        self
    }

    pub fn with_function(mut self, function: FunctionMetadata) -> Self {
        self.functions.push(function);
        self
    }

    pub fn concrete_functions(&self) -> impl Iterator<Item = &FunctionMetadata> {
        self.functions.iter().filter(|f| !f.is_abstract)
    }
}

/// A type as it may appear in JSON metadata.
#[derive(Deserialize)]
#[serde(untagged)]
enum TypeRepr {
    Signature(String),
    Node(TypeNode),
}

impl TypeRepr {
    fn into_node<E: serde::de::Error>(self) -> Result<TypeNode, E> {
        match self {
            TypeRepr::Signature(text) => signature::parse(&text).map_err(E::custom),
            TypeRepr::Node(node) => Ok(node),
        }
    }
}

fn deserialize_type<'de, D>(deserializer: D) -> Result<TypeNode, D::Error>
where
    D: Deserializer<'de>,
{
    TypeRepr::deserialize(deserializer)?.into_node()
}

fn deserialize_optional_type<'de, D>(deserializer: D) -> Result<Option<TypeNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<TypeRepr>::deserialize(deserializer)?
        .map(TypeRepr::into_node)
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int() -> TypeNode {
        TypeNode::specific("Int", false)
    }

    #[test]
    fn concrete_functions_exclude_abstract() {
        let class = ClassMetadata::new("com.example", "Shape")
            .abstract_class()
            .with_function(FunctionMetadata::new("area", int()).abstract_member())
            .with_function(FunctionMetadata::new("describe", TypeNode::specific("String", false)));

        let concrete: Vec<_> = class.concrete_functions().map(|f| f.name.as_str()).collect();
        let abstract_: Vec<_> = class.abstract_functions().map(|f| f.name.as_str()).collect();
        assert_eq!(concrete, vec!["describe"]);
        assert_eq!(abstract_, vec!["area"]);
    }

    #[test]
    fn static_concrete_functions_exclude_abstract() {
        let functions = StaticFunctionsMetadata::new("com.example")
            .with_function(FunctionMetadata::new("a", int()))
            .with_function(FunctionMetadata::new("b", int()).abstract_member());
        assert_eq!(functions.concrete_functions().count(), 1);
    }

    #[test]
    fn json_accepts_signature_strings() {
        let json = r#"{
            "package_name": "com.example",
            "imports": { "Repo": "com.example.data.Repo" },
            "class_name": "Service",
            "constructor_parameters": [ { "name": "repo", "type": "Repo" } ],
            "functions": [
                {
                    "name": "load",
                    "parameters": [ { "name": "ids", "type": "List<Int>?" } ],
                    "extension_receiver_type": "String",
                    "return_type": "Unit"
                }
            ]
        }"#;
        let class = ClassMetadata::from_json(json).unwrap();
        assert_eq!(class.constructor_parameters[0].data_type, TypeNode::specific("Repo", false));
        let load = &class.functions[0];
        assert_eq!(
            load.parameters[0].data_type,
            TypeNode::generic("List", true, vec![int()])
        );
        assert_eq!(load.extension_receiver_type, Some(TypeNode::specific("String", false)));
        assert!(load.return_type.is_unit());
        assert!(!load.is_abstract);
    }

    #[test]
    fn json_accepts_structured_nodes() {
        let json = r#"{
            "package_name": "p",
            "class_name": "C",
            "functions": [
                { "name": "f", "return_type": { "kind": "specific", "name": "Int", "is_nullable": true } }
            ]
        }"#;
        let class = ClassMetadata::from_json(json).unwrap();
        assert_eq!(class.functions[0].return_type, TypeNode::specific("Int", true));
        assert_eq!(class.functions[0].extension_receiver_type, None);
    }

    #[test]
    fn json_rejects_malformed_signature() {
        let json = r#"{ "package_name": "p", "class_name": "C",
            "constructor_parameters": [ { "name": "x", "type": "List<Int" } ] }"#;
        let err = ClassMetadata::from_json(json).unwrap_err();
        assert!(matches!(err, MetadataError::Json { .. }));
    }
}
