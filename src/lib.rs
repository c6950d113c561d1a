//! # jsonschema-lite
//!
//! JSON Schema (draft 7) validation, together with the two standards it is built on:
//!   - RFC 3986 URI references, used to identify schemas and resolve `$ref`;
//!   - RFC 6901 JSON Pointers, used to address and edit parts of JSON documents.
//!
//! Schemas are compiled once into an arena of validators. References, including recursive ones,
//! become links between arena nodes, so validation never re-resolves anything.
//!
//! ## Usage Examples:
//! ```rust
//! # use jsonschema_lite::{SchemaError, SchemaValidator};
//! # use serde_json::json;
//! # fn foo() -> Result<(), SchemaError> {
//! let schema = json!({"type": "object", "required": ["name"]});
//! let validator = SchemaValidator::new(&schema)?;
//! if let Err(errors) = validator.validate(&json!({"age": 3})) {
//!     for error in errors {
//!         println!("{}: {}", error.path, error);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Defaults declared in `properties` can be written into a valid instance:
//! ```rust
//! # use jsonschema_lite::{ExpansionOptions, SchemaValidator};
//! # use serde_json::json;
//! let schema = json!({"properties": {"retries": {"default": 3}}});
//! let validator = SchemaValidator::new(&schema).expect("Valid schema");
//! let mut instance = json!({});
//! validator
//!     .validate_and_expand(&mut instance, ExpansionOptions::with_defaults())
//!     .expect("Valid instance");
//! assert_eq!(instance, json!({"retries": 3}));
//! ```
#![warn(
    clippy::cast_possible_truncation,
    clippy::doc_markdown,
    clippy::explicit_iter_loop,
    clippy::map_unwrap_or,
    clippy::match_same_arms,
    clippy::needless_borrow,
    clippy::needless_pass_by_value,
    clippy::print_stdout,
    clippy::redundant_closure,
    clippy::trivially_copy_pass_by_ref,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    variant_size_differences
)]
#![allow(clippy::unnecessary_wraps)]
mod compilation;
pub mod error;
mod graph;
mod helpers;
mod keywords;
mod meta;
mod paths;
pub mod pointer;
pub mod primitive_type;
pub mod uri;
mod validator;
pub use compilation::{
    options::{ExpansionOptions, ValidatorOptions},
    SchemaValidator,
};
pub use error::{
    format_message, PointerError, SchemaError, SchemaErrorKind, UriError, ValidationError,
    ValidationErrorKind,
};
pub use pointer::{Pointer, PointerSuffix};
pub use primitive_type::PrimitiveType;
pub use uri::{remove_dot_segments, Uri};
use serde_json::Value;

/// A shortcut for validating `instance` against `schema`.
/// ```rust
/// use jsonschema_lite::is_valid;
/// use serde_json::json;
///
/// let schema = json!({"maxLength": 5});
/// let instance = json!("foo");
/// assert!(is_valid(&schema, &instance));
/// ```
///
/// This function panics if an invalid schema is passed.
#[must_use]
#[inline]
pub fn is_valid(schema: &Value, instance: &Value) -> bool {
    let validator = SchemaValidator::new(schema).expect("Invalid schema");
    validator.is_valid(instance)
}
