//! Type-signature parsing.
//!
//! Converts the compact textual type signatures handed over by the metadata
//! producer into structured [`TypeNode`] values.
//!
//! ```text
//! "Map<String, List<Int?>>?" ──→ parser ──→ Generic("Map", nullable, [
//!                                              Specific("String"),
//!                                              Generic("List", [Specific("Int", nullable)]),
//!                                          ])
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use kt_testgen::signature::{self, TypeNode};
//!
//! let node = signature::parse("(name: Value?) -> Result").unwrap();
//! assert_eq!(
//!     node,
//!     TypeNode::lambda("Result", false, vec![TypeNode::specific("Value", true)]),
//! );
//! ```

pub mod error;
pub mod node;
pub mod parser;

pub use error::{SignatureError, SignatureResult};
pub use node::{TypeNode, UNIT_TYPE_NAME};
pub use parser::parse;
