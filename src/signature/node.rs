//! Structured type representation produced by the signature parser.
//!
//! A [`TypeNode`] is a closed sum type: every consumer (qualifier, mocker
//! backends, renderer) matches it exhaustively.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::SignatureError;

/// Name of the Kotlin unit type; functions returning it have no result value.
pub const UNIT_TYPE_NAME: &str = "Unit";

/// Parsed shape of a type signature.
///
/// Nullability belongs to the node, not to its name: `Specific("X", true)`
/// and `Specific("X", false)` are different nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeNode {
    /// A named type with no type arguments.
    Specific { name: String, is_nullable: bool },

    /// A named type parameterized by one or more type arguments.
    Generic {
        name: String,
        is_nullable: bool,
        type_arguments: Vec<TypeNode>,
    },

    /// A function type. Its name and nullability are those of the return type.
    Lambda {
        return_type: Box<TypeNode>,
        parameter_types: Vec<TypeNode>,
    },
}

impl TypeNode {
    pub fn specific(name: impl Into<String>, is_nullable: bool) -> Self {
        TypeNode::Specific {
            name: name.into(),
            is_nullable,
        }
    }

    pub fn generic(name: impl Into<String>, is_nullable: bool, type_arguments: Vec<TypeNode>) -> Self {
        TypeNode::Generic {
            name: name.into(),
            is_nullable,
            type_arguments,
        }
    }

    /// Build a lambda whose return type is a plain named type.
    pub fn lambda(return_type_name: impl Into<String>, is_nullable: bool, parameter_types: Vec<TypeNode>) -> Self {
        TypeNode::Lambda {
            return_type: Box::new(TypeNode::specific(return_type_name, is_nullable)),
            parameter_types,
        }
    }

    /// The type's name; for a lambda, the return type's name.
    pub fn name(&self) -> &str {
        match self {
            TypeNode::Specific { name, .. } | TypeNode::Generic { name, .. } => name,
            TypeNode::Lambda { return_type, .. } => return_type.name(),
        }
    }

    /// Whether the node is nullable; for a lambda, whether its return type is.
    pub fn is_nullable(&self) -> bool {
        match self {
            TypeNode::Specific { is_nullable, .. } | TypeNode::Generic { is_nullable, .. } => *is_nullable,
            TypeNode::Lambda { return_type, .. } => return_type.is_nullable(),
        }
    }

    /// Last `.`-separated segment of the name (`kotlin.String` → `String`).
    pub fn simple_name(&self) -> &str {
        let name = self.name();
        name.rsplit('.').next().unwrap_or(name)
    }

    /// Whether a value of this type carries no information (`Unit`).
    pub fn is_unit(&self) -> bool {
        match self {
            TypeNode::Specific { .. } | TypeNode::Generic { .. } => self.simple_name() == UNIT_TYPE_NAME,
            TypeNode::Lambda { .. } => false,
        }
    }

    /// Copy of this node with top-level nullability cleared.
    ///
    /// Lambdas are returned unchanged.
    pub fn non_null(&self) -> TypeNode {
        match self {
            TypeNode::Specific { name, .. } => TypeNode::specific(name.clone(), false),
            TypeNode::Generic { name, type_arguments, .. } => {
                TypeNode::generic(name.clone(), false, type_arguments.clone())
            }
            TypeNode::Lambda { .. } => self.clone(),
        }
    }

    /// Apply a trailing `?` to this node.
    pub(crate) fn into_nullable(self) -> TypeNode {
        match self {
            TypeNode::Specific { name, .. } => TypeNode::Specific { name, is_nullable: true },
            TypeNode::Generic { name, type_arguments, .. } => TypeNode::Generic {
                name,
                is_nullable: true,
                type_arguments,
            },
            lambda @ TypeNode::Lambda { .. } => lambda,
        }
    }

    /// Every type name mentioned anywhere in the node, including nested
    /// type arguments, lambda parameters and lambda return types.
    pub fn referenced_names(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names(&self, names: &mut BTreeSet<String>) {
        match self {
            TypeNode::Specific { name, .. } => {
                names.insert(name.clone());
            }
            TypeNode::Generic { name, type_arguments, .. } => {
                names.insert(name.clone());
                for argument in type_arguments {
                    argument.collect_names(names);
                }
            }
            TypeNode::Lambda {
                return_type,
                parameter_types,
            } => {
                return_type.collect_names(names);
                for parameter in parameter_types {
                    parameter.collect_names(names);
                }
            }
        }
    }
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeNode::Specific { name, is_nullable } => {
                write!(f, "{name}")?;
                if *is_nullable {
                    write!(f, "?")?;
                }
                Ok(())
            }
            TypeNode::Generic {
                name,
                is_nullable,
                type_arguments,
            } => {
                write!(f, "{name}<{}>", join(type_arguments))?;
                if *is_nullable {
                    write!(f, "?")?;
                }
                Ok(())
            }
            TypeNode::Lambda {
                return_type,
                parameter_types,
            } => write!(f, "({}) -> {return_type}", join(parameter_types)),
        }
    }
}

impl FromStr for TypeNode {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::parser::parse(s)
    }
}

fn join(nodes: &[TypeNode]) -> String {
    nodes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
