use crate::{compilation::SchemaValidator, error::SchemaError};
use serde_json::Value;

/// Maximum nesting of schemas applied during one validation call.
pub(crate) const DEFAULT_MAX_DEPTH: usize = 128;

/// Full configuration to guide the `SchemaValidator` construction.
///
/// Using a `ValidatorOptions` instance you can configure the supported options:
/// ```rust
/// # use jsonschema_lite::SchemaValidator;
/// # use serde_json::json;
/// let schema = json!({"definitions": {"name": {"type": "string"}}});
/// let validator = SchemaValidator::options()
///     .with_schema_pointer("/definitions/name")
///     .with_max_depth(64)
///     .build(&schema)
///     .expect("A valid schema");
/// assert!(validator.is_valid(&json!("Jane")));
/// ```
#[derive(Clone, Debug)]
pub struct ValidatorOptions {
    schema_pointer: Option<String>,
    validate_schema: bool,
    documents: Vec<(String, Value)>,
    max_depth: usize,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        ValidatorOptions {
            schema_pointer: None,
            validate_schema: true,
            documents: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ValidatorOptions {
    /// Build a validator for `schema` with the configured options.
    ///
    /// # Errors
    ///
    /// Fails if the schema or one of the supplied documents is not a valid draft 7 schema, the
    /// schema pointer does not resolve, a `$ref` can not be resolved or references form a loop.
    pub fn build(&self, schema: &Value) -> Result<SchemaValidator, SchemaError> {
        SchemaValidator::build(schema.clone(), self)
    }

    /// Parse `schema` as JSON and build a validator for it.
    ///
    /// # Errors
    ///
    /// Same as [`ValidatorOptions::build`], plus a `Parsing` error for malformed JSON.
    pub fn build_str(&self, schema: &str) -> Result<SchemaValidator, SchemaError> {
        let schema = serde_json::from_str(schema).map_err(|error| SchemaError::parsing(&error))?;
        SchemaValidator::build(schema, self)
    }

    /// Validate instances against the sub-document at `pointer` instead of the document root.
    /// The rest of the document stays reachable for `$ref`.
    #[inline]
    pub fn with_schema_pointer(&mut self, pointer: impl Into<String>) -> &mut Self {
        self.schema_pointer = Some(pointer.into());
        self
    }
    pub(crate) fn schema_pointer(&self) -> Option<&str> {
        self.schema_pointer.as_deref()
    }

    /// Do not check the schema against the draft 7 meta-schema.
    #[inline]
    pub fn without_schema_validation(&mut self) -> &mut Self {
        self.validate_schema = false;
        self
    }
    pub(crate) fn validates_schema(&self) -> bool {
        self.validate_schema
    }

    /// Add a document that `$ref` can point to by `uri`.
    /// ```rust
    /// # use jsonschema_lite::SchemaValidator;
    /// # use serde_json::json;
    /// let validator = SchemaValidator::options()
    ///     .with_document("http://example.com/positive.json", json!({"exclusiveMinimum": 0}))
    ///     .build(&json!({"items": {"$ref": "http://example.com/positive.json"}}))
    ///     .expect("A valid schema");
    /// assert!(!validator.is_valid(&json!([1, 0])));
    /// ```
    #[inline]
    pub fn with_document(&mut self, uri: impl Into<String>, document: Value) -> &mut Self {
        self.documents.push((uri.into(), document));
        self
    }
    pub(crate) fn documents(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.documents
            .iter()
            .map(|(uri, document)| (uri.as_str(), document))
    }

    /// Limit how deeply schemas may nest while validating one instance.
    #[inline]
    pub fn with_max_depth(&mut self, depth: usize) -> &mut Self {
        self.max_depth = depth;
        self
    }
    pub(crate) fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// What `SchemaValidator::validate_and_expand` may change in the instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExpansionOptions {
    /// Add absent object members declared with a `default` in `properties`.
    pub add_defaults: bool,
}

impl ExpansionOptions {
    #[must_use]
    pub fn with_defaults() -> Self {
        ExpansionOptions { add_defaults: true }
    }
}
