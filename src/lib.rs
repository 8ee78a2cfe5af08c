// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # kt-testgen
//!
//! Generates Kotlin unit-test scaffolds from source metadata: one test class
//! per class under test (or per group of free functions), one test method per
//! concrete function, with constructor dependencies and call arguments filled
//! by literals or mocks.
//!
//! ## Architecture
//!
//! - **Signatures** (`signature`): parses `Map<String, List<Int?>>?`-style
//!   type text into [`TypeNode`] trees
//! - **Metadata** (`metadata`): class and function descriptions, buildable
//!   in code or from JSON
//! - **Qualifier** (`qualifier`): literal-or-mock decision per type
//! - **Mockers** (`mocker`): Mockito and MockK backends
//! - **Renderer** (`render`): assembles the test class text
//!
//! ## Library usage
//!
//! ```rust
//! use kt_testgen::{ClassMetadata, FunctionMetadata, GeneratorConfig, TestSourceRenderer};
//! use kt_testgen::signature;
//!
//! let class = ClassMetadata::new("com.example", "Greeter")
//!     .with_function(
//!         FunctionMetadata::new("greet", signature::parse("String").unwrap())
//!             .with_parameter("name", signature::parse("String?").unwrap()),
//!     );
//!
//! let mut renderer = TestSourceRenderer::new(GeneratorConfig::default());
//! let source = renderer.render_class(&class);
//! assert!(source.contains("fun `Given _ when greet then _`()"));
//! ```

pub mod config;
pub mod error;
pub mod metadata;
pub mod mocker;
pub mod qualifier;
pub mod render;
pub mod signature;

pub use config::GeneratorConfig;
pub use error::{TestgenError, TestgenResult};
pub use metadata::{ClassMetadata, FunctionMetadata, StaticFunctionsMetadata, TypedParameter};
pub use mocker::{MockerCodeGenerator, MockerKind};
pub use qualifier::MockableTypeQualifier;
pub use render::{RenderState, TestSourceRenderer};
pub use signature::TypeNode;
