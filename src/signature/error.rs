//! Diagnostic error types for the type-signature parser.
//!
//! Every variant carries `#[diagnostic(code(...), help(...))]` so the caller
//! can tell which signature was rejected and why.

use miette::Diagnostic;
use thiserror::Error;

/// Errors produced while parsing a type signature.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SignatureError {
    #[error("unbalanced brackets at position {position} in \"{input}\"")]
    #[diagnostic(
        code(testgen::signature::unbalanced),
        help(
            "Every `<` needs a matching `>` and every `(` a matching `)`. \
             Check the signature for a missing or extra bracket."
        )
    )]
    Unbalanced { input: String, position: usize },

    #[error("missing type name in \"{input}\"")]
    #[diagnostic(
        code(testgen::signature::empty_name),
        help(
            "A type argument list must follow a type name, as in `List<Int>`. \
             Signatures may not start with `<` or contain empty arguments like `Map<,V>`."
        )
    )]
    EmptyName { input: String },

    #[error("unparseable input \"{input}\": {token_count} sibling token(s) at one level")]
    #[diagnostic(
        code(testgen::signature::unparseable),
        help(
            "A type is either a single name (`Foo`, `Foo<Bar>`) or a function type \
             (`(A, B) -> C`). Any other combination of tokens cannot be classified."
        )
    )]
    Unparseable { input: String, token_count: usize },

    #[error("unexpected '{character}' at position {position} in \"{input}\"")]
    #[diagnostic(
        code(testgen::signature::unexpected_character),
        help("`?` may only follow a type name or a closing bracket.")
    )]
    UnexpectedCharacter {
        input: String,
        position: usize,
        character: char,
    },
}

/// Result type for signature parsing.
pub type SignatureResult<T> = std::result::Result<T, SignatureError>;
