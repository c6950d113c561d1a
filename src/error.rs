//! Error types for URI parsing, JSON Pointer addressing, schema construction and validation.
use crate::primitive_type::PrimitiveType;
use std::{error, fmt};

/// Errors that can occur while parsing a URI reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriError {
    /// A `%` is not followed by two hexadecimal digits.
    InvalidPercentEncoding { input: String },
    /// Percent-decoded bytes do not form valid UTF-8.
    InvalidUtf8 { input: String },
}

impl UriError {
    pub(crate) fn invalid_percent_encoding(input: impl Into<String>) -> UriError {
        UriError::InvalidPercentEncoding {
            input: input.into(),
        }
    }
    pub(crate) fn invalid_utf8(input: impl Into<String>) -> UriError {
        UriError::InvalidUtf8 {
            input: input.into(),
        }
    }
}

impl fmt::Display for UriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UriError::InvalidPercentEncoding { input } => {
                write!(f, "invalid % escape in '{}'", input)
            }
            UriError::InvalidUtf8 { input } => {
                write!(f, "percent-decoded '{}' is not valid UTF-8", input)
            }
        }
    }
}

impl error::Error for UriError {}

/// Errors produced by parsing a JSON Pointer or applying it to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerError {
    /// A non-empty pointer does not start with `/`.
    MissingLeadingSlash { pointer: String },
    /// A fragment pointer does not start with `#`.
    MissingHash { fragment: String },
    /// A `~` is followed by something other than `0` or `1`.
    InvalidEscape { token: String },
    /// The fragment contains an invalid percent-encoded sequence.
    InvalidPercentEncoding { fragment: String },
    /// An array index token is not a non-negative decimal number.
    InvalidIndex { token: String },
    /// An array index is beyond the end of the array.
    IndexOutOfRange { token: String, len: usize },
    /// An object member does not exist.
    MemberNotFound { name: String },
    /// An object member already exists and can not be inserted.
    MemberExists { name: String },
    /// The pointer tries to descend into a scalar value.
    ScalarAccess { token: String },
    /// The start index is past the end of the pointer.
    StartIndexOutOfRange { start: usize, len: usize },
    /// The operation needs a parent container, but the pointer addresses the root.
    RootAccess,
}

impl PointerError {
    pub(crate) fn missing_leading_slash(pointer: impl Into<String>) -> PointerError {
        PointerError::MissingLeadingSlash {
            pointer: pointer.into(),
        }
    }
    pub(crate) fn missing_hash(fragment: impl Into<String>) -> PointerError {
        PointerError::MissingHash {
            fragment: fragment.into(),
        }
    }
    pub(crate) fn invalid_escape(token: impl Into<String>) -> PointerError {
        PointerError::InvalidEscape {
            token: token.into(),
        }
    }
    pub(crate) fn invalid_percent_encoding(fragment: impl Into<String>) -> PointerError {
        PointerError::InvalidPercentEncoding {
            fragment: fragment.into(),
        }
    }
    pub(crate) fn invalid_index(token: impl Into<String>) -> PointerError {
        PointerError::InvalidIndex {
            token: token.into(),
        }
    }
    pub(crate) fn index_out_of_range(token: impl Into<String>, len: usize) -> PointerError {
        PointerError::IndexOutOfRange {
            token: token.into(),
            len,
        }
    }
    pub(crate) fn member_not_found(name: impl Into<String>) -> PointerError {
        PointerError::MemberNotFound { name: name.into() }
    }
    pub(crate) fn member_exists(name: impl Into<String>) -> PointerError {
        PointerError::MemberExists { name: name.into() }
    }
    pub(crate) fn scalar_access(token: impl Into<String>) -> PointerError {
        PointerError::ScalarAccess {
            token: token.into(),
        }
    }

    /// Whether the pointer string itself is malformed.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            PointerError::MissingLeadingSlash { .. }
                | PointerError::MissingHash { .. }
                | PointerError::InvalidEscape { .. }
                | PointerError::InvalidPercentEncoding { .. }
        )
    }

    /// Whether the pointer addresses a location that does not exist (or must not exist).
    #[must_use]
    pub fn is_range_error(&self) -> bool {
        matches!(
            self,
            PointerError::InvalidIndex { .. }
                | PointerError::IndexOutOfRange { .. }
                | PointerError::MemberNotFound { .. }
                | PointerError::MemberExists { .. }
                | PointerError::StartIndexOutOfRange { .. }
        )
    }

    /// Whether the pointer is applied to a value of the wrong kind.
    #[must_use]
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self,
            PointerError::ScalarAccess { .. } | PointerError::RootAccess
        )
    }
}

impl fmt::Display for PointerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointerError::MissingLeadingSlash { pointer } => {
                write!(f, "pointer '{}' doesn't begin with /", pointer)
            }
            PointerError::MissingHash { fragment } => {
                write!(f, "fragment '{}' doesn't begin with #", fragment)
            }
            PointerError::InvalidEscape { token } => write!(f, "invalid ~ escape in '{}'", token),
            PointerError::InvalidPercentEncoding { fragment } => {
                write!(f, "invalid % escape in '{}'", fragment)
            }
            PointerError::InvalidIndex { token } => write!(f, "invalid array index '{}'", token),
            PointerError::IndexOutOfRange { token, len } => {
                write!(f, "index {} out of range (array has {} items)", token, len)
            }
            PointerError::MemberNotFound { name } => write!(f, "member '{}' doesn't exist", name),
            PointerError::MemberExists { name } => write!(f, "member '{}' already exists", name),
            PointerError::ScalarAccess { token } => write!(
                f,
                "can't access component '{}' of scalar value",
                token
            ),
            PointerError::StartIndexOutOfRange { start, len } => write!(
                f,
                "start index {} out of range (pointer has {} tokens)",
                start, len
            ),
            PointerError::RootAccess => f.write_str("operation is not applicable to the root"),
        }
    }
}

impl error::Error for PointerError {}

// Message templates. Each `*` is replaced by one argument, in order.
const FALSE_SCHEMA: &str = "Schema false always fails.";
const INVALID_TYPE: &str = "Expected '*' but got '*'.";
const INVALID_CHOICE: &str = "Value does not match any valid type choices.";
const EMPTY_TYPE: &str = "Type is empty string";
const ANY_OF_FAILED: &str = "None of the option schemata was matched.";
const ONE_OF_FAILED: &str = "Not exactly one of the option schemata was matched.";
const NOT_FAILED: &str = "Disallowed schema was matched.";
const CONST: &str = "Value does not match const.";
const INVALID_ENUM: &str = "Value does not match any valid enum choices.";
const PROPERTY_REQUIRED: &str = "Required property * is missing.";
const UNEXPECTED_PROPERTY: &str = "Unexpected property.";
const MIN_PROPERTIES: &str = "Object must have at least * properties.";
const MAX_PROPERTIES: &str = "Object must not have more than * properties.";
const MIN_ITEMS: &str = "Array must have at least * items.";
const MAX_ITEMS: &str = "Array must not have more than * items.";
const NO_ADDITIONAL_ITEMS: &str = "Additional items not allowed.";
const ITEMS_NOT_UNIQUE: &str = "Items not unique.";
const ARRAY_CONTAINS: &str = "Array does not contain matching item.";
const MIN_LENGTH: &str = "String must be at least * characters long.";
const MAX_LENGTH: &str = "String must not be more than * characters long.";
const NOT_NEGATIVE: &str = "Parameter * must not be less than 0";
const PATTERN: &str = "String must match the pattern: *.";
const MINIMUM: &str = "Value must not be less than *.";
const MAXIMUM: &str = "Value must not be greater than *.";
const EXCLUSIVE_MINIMUM: &str = "Value must be greater than *.";
const EXCLUSIVE_MAXIMUM: &str = "Value must be less than *.";
const MULTIPLE_OF: &str = "Value must be multiple of *.";
const RECURSION_LIMIT: &str = "Maximum validation depth of * exceeded.";
const REFERENCE_CYCLE: &str = "reference loop including '*'";
const UNRESOLVED_REFERENCE: &str = "unresolved ref *";
const INVALID_KEYWORD: &str = "Invalid value for keyword *.";
const INVALID_PATTERN: &str = "Invalid regular expression *: *";
const INVALID_SCHEMA: &str = "Schema must be an object or a boolean.";

/// Replace the first `*` of `template` with the first argument, the next `*` with the second
/// argument and so on. Wildcards without a matching argument are kept as is.
#[must_use]
pub fn format_message(template: &str, arguments: &[&str]) -> String {
    let mut message = template.to_string();
    let mut offset = 0;
    for argument in arguments {
        match message[offset..].find('*') {
            Some(position) => {
                let start = offset + position;
                message.replace_range(start..=start, argument);
                offset = start + argument.len();
            }
            None => break,
        }
    }
    message
}

/// A single finding: the location inside the validated document and what is wrong there.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// JSON-Pointer-style path to the offending value. The document root is `/`.
    pub path: String,
    /// Type of validation error.
    pub kind: ValidationErrorKind,
}

/// Kinds of errors that may happen during validation or schema construction.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationErrorKind {
    /// Everything is invalid for `false` schema.
    FalseSchema,
    /// The input value is not of the expected type.
    Type {
        expected: PrimitiveType,
        actual: PrimitiveType,
    },
    /// The input value matches none of the types in a `type` array.
    TypeChoice,
    /// `type` is an empty string.
    EmptyType,
    /// The input value is not valid under any of the given schemas.
    AnyOf,
    /// The input value is valid under zero or more than one of the given schemas.
    OneOf,
    /// Negated schema matched.
    Not,
    /// The input value doesn't match expected constant.
    Constant,
    /// The input value doesn't match any of specified options.
    Enum,
    /// A required property is missing.
    Required { property: String },
    /// A property is covered neither by `properties` nor by `patternProperties`.
    UnexpectedProperty,
    /// Not enough properties in an object.
    MinProperties { limit: u64 },
    /// Too many properties in an object.
    MaxProperties { limit: u64 },
    /// Too few items in an array.
    MinItems { limit: u64 },
    /// Too many items in an array.
    MaxItems { limit: u64 },
    /// The array contains more items than `items` allows.
    AdditionalItems,
    /// The input array has non-unique elements.
    UniqueItems,
    /// None of the array items is valid under `contains`.
    Contains,
    /// String is too short.
    MinLength { limit: u64 },
    /// String is too long.
    MaxLength { limit: u64 },
    /// A length limit in the schema is negative.
    NegativeLimit { keyword: &'static str },
    /// The string doesn't match the pattern.
    Pattern { pattern: String },
    /// Value is too small.
    Minimum { limit: f64 },
    /// Value is too large.
    Maximum { limit: f64 },
    /// Value is too small.
    ExclusiveMinimum { limit: f64 },
    /// Value is too large.
    ExclusiveMaximum { limit: f64 },
    /// The number is not a multiple of another number.
    MultipleOf { multiple_of: f64 },
    /// The instance or schema nesting exceeds the configured depth.
    RecursionLimit { limit: usize },
    /// A chain of `$ref`s returns to where it started.
    ReferenceCycle { reference: String },
    /// A `$ref` points to a document that is not known.
    UnresolvedReference { reference: String },
    /// A JSON Pointer inside the schema could not be resolved.
    Pointer { error: PointerError },
    /// A URI inside the schema could not be parsed.
    Uri { error: UriError },
    /// The schema document is not valid JSON.
    JsonParse { message: String },
    /// A keyword has a value the validator can not work with.
    InvalidKeyword { keyword: String },
    /// A `pattern` or `patternProperties` key is not a valid regular expression.
    InvalidPattern { pattern: String, message: String },
    /// A sub-schema is neither an object nor a boolean.
    InvalidSchema,
}

impl ValidationErrorKind {
    /// Human readable message for this kind.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            ValidationErrorKind::FalseSchema => FALSE_SCHEMA.to_string(),
            ValidationErrorKind::Type { expected, actual } => format_message(
                INVALID_TYPE,
                &[&expected.to_string(), &actual.to_string()],
            ),
            ValidationErrorKind::TypeChoice => INVALID_CHOICE.to_string(),
            ValidationErrorKind::EmptyType => EMPTY_TYPE.to_string(),
            ValidationErrorKind::AnyOf => ANY_OF_FAILED.to_string(),
            ValidationErrorKind::OneOf => ONE_OF_FAILED.to_string(),
            ValidationErrorKind::Not => NOT_FAILED.to_string(),
            ValidationErrorKind::Constant => CONST.to_string(),
            ValidationErrorKind::Enum => INVALID_ENUM.to_string(),
            ValidationErrorKind::Required { property } => {
                format_message(PROPERTY_REQUIRED, &[property])
            }
            ValidationErrorKind::UnexpectedProperty => UNEXPECTED_PROPERTY.to_string(),
            ValidationErrorKind::MinProperties { limit } => {
                format_message(MIN_PROPERTIES, &[&limit.to_string()])
            }
            ValidationErrorKind::MaxProperties { limit } => {
                format_message(MAX_PROPERTIES, &[&limit.to_string()])
            }
            ValidationErrorKind::MinItems { limit } => {
                format_message(MIN_ITEMS, &[&limit.to_string()])
            }
            ValidationErrorKind::MaxItems { limit } => {
                format_message(MAX_ITEMS, &[&limit.to_string()])
            }
            ValidationErrorKind::AdditionalItems => NO_ADDITIONAL_ITEMS.to_string(),
            ValidationErrorKind::UniqueItems => ITEMS_NOT_UNIQUE.to_string(),
            ValidationErrorKind::Contains => ARRAY_CONTAINS.to_string(),
            ValidationErrorKind::MinLength { limit } => {
                format_message(MIN_LENGTH, &[&limit.to_string()])
            }
            ValidationErrorKind::MaxLength { limit } => {
                format_message(MAX_LENGTH, &[&limit.to_string()])
            }
            ValidationErrorKind::NegativeLimit { keyword } => {
                format_message(NOT_NEGATIVE, &[keyword])
            }
            ValidationErrorKind::Pattern { pattern } => format_message(PATTERN, &[pattern]),
            ValidationErrorKind::Minimum { limit } => {
                format_message(MINIMUM, &[&limit.to_string()])
            }
            ValidationErrorKind::Maximum { limit } => {
                format_message(MAXIMUM, &[&limit.to_string()])
            }
            ValidationErrorKind::ExclusiveMinimum { limit } => {
                format_message(EXCLUSIVE_MINIMUM, &[&limit.to_string()])
            }
            ValidationErrorKind::ExclusiveMaximum { limit } => {
                format_message(EXCLUSIVE_MAXIMUM, &[&limit.to_string()])
            }
            ValidationErrorKind::MultipleOf { multiple_of } => {
                format_message(MULTIPLE_OF, &[&multiple_of.to_string()])
            }
            ValidationErrorKind::RecursionLimit { limit } => {
                format_message(RECURSION_LIMIT, &[&limit.to_string()])
            }
            ValidationErrorKind::ReferenceCycle { reference } => {
                format_message(REFERENCE_CYCLE, &[reference])
            }
            ValidationErrorKind::UnresolvedReference { reference } => {
                format_message(UNRESOLVED_REFERENCE, &[reference])
            }
            ValidationErrorKind::Pointer { error } => error.to_string(),
            ValidationErrorKind::Uri { error } => error.to_string(),
            ValidationErrorKind::JsonParse { message } => message.clone(),
            ValidationErrorKind::InvalidKeyword { keyword } => {
                format_message(INVALID_KEYWORD, &[keyword])
            }
            ValidationErrorKind::InvalidPattern { pattern, message } => {
                format_message(INVALID_PATTERN, &[pattern, message])
            }
            ValidationErrorKind::InvalidSchema => INVALID_SCHEMA.to_string(),
        }
    }
}

/// Shortcuts for creation of specific error kinds.
impl ValidationError {
    pub(crate) fn new(path: impl Into<String>, kind: ValidationErrorKind) -> ValidationError {
        ValidationError {
            path: path.into(),
            kind,
        }
    }

    pub(crate) fn false_schema(path: String) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::FalseSchema)
    }
    pub(crate) fn single_type_error(
        path: String,
        expected: PrimitiveType,
        actual: PrimitiveType,
    ) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::Type { expected, actual })
    }
    pub(crate) fn type_choice(path: String) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::TypeChoice)
    }
    pub(crate) fn empty_type(path: String) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::EmptyType)
    }
    pub(crate) fn any_of(path: String) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::AnyOf)
    }
    pub(crate) fn one_of(path: String) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::OneOf)
    }
    pub(crate) fn not(path: String) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::Not)
    }
    pub(crate) fn constant(path: String) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::Constant)
    }
    pub(crate) fn enumeration(path: String) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::Enum)
    }
    pub(crate) fn required(path: String, property: impl Into<String>) -> ValidationError {
        ValidationError::new(
            path,
            ValidationErrorKind::Required {
                property: property.into(),
            },
        )
    }
    pub(crate) fn unexpected_property(path: String) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::UnexpectedProperty)
    }
    pub(crate) fn min_properties(path: String, limit: u64) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::MinProperties { limit })
    }
    pub(crate) fn max_properties(path: String, limit: u64) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::MaxProperties { limit })
    }
    pub(crate) fn min_items(path: String, limit: u64) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::MinItems { limit })
    }
    pub(crate) fn max_items(path: String, limit: u64) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::MaxItems { limit })
    }
    pub(crate) fn additional_items(path: String) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::AdditionalItems)
    }
    pub(crate) fn unique_items(path: String) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::UniqueItems)
    }
    pub(crate) fn contains(path: String) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::Contains)
    }
    pub(crate) fn min_length(path: String, limit: u64) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::MinLength { limit })
    }
    pub(crate) fn max_length(path: String, limit: u64) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::MaxLength { limit })
    }
    pub(crate) fn negative_limit(path: String, keyword: &'static str) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::NegativeLimit { keyword })
    }
    pub(crate) fn pattern(path: String, pattern: impl Into<String>) -> ValidationError {
        ValidationError::new(
            path,
            ValidationErrorKind::Pattern {
                pattern: pattern.into(),
            },
        )
    }
    pub(crate) fn minimum(path: String, limit: f64) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::Minimum { limit })
    }
    pub(crate) fn maximum(path: String, limit: f64) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::Maximum { limit })
    }
    pub(crate) fn exclusive_minimum(path: String, limit: f64) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::ExclusiveMinimum { limit })
    }
    pub(crate) fn exclusive_maximum(path: String, limit: f64) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::ExclusiveMaximum { limit })
    }
    pub(crate) fn multiple_of(path: String, multiple_of: f64) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::MultipleOf { multiple_of })
    }
    pub(crate) fn recursion_limit(path: String, limit: usize) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::RecursionLimit { limit })
    }
    pub(crate) fn reference_cycle(path: String, reference: impl Into<String>) -> ValidationError {
        ValidationError::new(
            path,
            ValidationErrorKind::ReferenceCycle {
                reference: reference.into(),
            },
        )
    }
    pub(crate) fn unresolved_reference(
        path: String,
        reference: impl Into<String>,
    ) -> ValidationError {
        ValidationError::new(
            path,
            ValidationErrorKind::UnresolvedReference {
                reference: reference.into(),
            },
        )
    }
    pub(crate) fn pointer(path: impl Into<String>, error: PointerError) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::Pointer { error })
    }
    pub(crate) fn uri(path: impl Into<String>, error: UriError) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::Uri { error })
    }
    pub(crate) fn json_parse(error: &serde_json::Error) -> ValidationError {
        ValidationError::new(
            "",
            ValidationErrorKind::JsonParse {
                message: error.to_string(),
            },
        )
    }
    pub(crate) fn invalid_keyword(path: String, keyword: impl Into<String>) -> ValidationError {
        ValidationError::new(
            path,
            ValidationErrorKind::InvalidKeyword {
                keyword: keyword.into(),
            },
        )
    }
    pub(crate) fn invalid_pattern(
        path: String,
        pattern: impl Into<String>,
        error: &regex::Error,
    ) -> ValidationError {
        ValidationError::new(
            path,
            ValidationErrorKind::InvalidPattern {
                pattern: pattern.into(),
                message: error.to_string(),
            },
        )
    }
    pub(crate) fn invalid_schema(path: String) -> ValidationError {
        ValidationError::new(path, ValidationErrorKind::InvalidSchema)
    }

    /// Human readable message for this error.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.message()
    }

    /// The same error, re-rooted below `prefix`.
    pub(crate) fn with_prefix(mut self, prefix: &str) -> ValidationError {
        if !prefix.is_empty() {
            self.path = if self.path == "/" || self.path.is_empty() {
                prefix.to_string()
            } else {
                format!("{}{}", prefix, self.path)
            };
        }
        self
    }
}

impl error::Error for ValidationError {}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.kind.message())
    }
}

/// Category of a failed validator construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorKind {
    /// An internal invariant was broken.
    Internal,
    /// The schema document could not be parsed.
    Parsing,
    /// A JSON Pointer or `$ref` could not be resolved.
    Pointer,
    /// The schema is not valid against the meta-schema, or its reference graph is broken.
    SchemaValidation,
}

/// Fatal error raised while building a validator. Carries every problem that was found.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    /// Error category.
    pub kind: SchemaErrorKind,
    /// Individual findings, e.g. every meta-schema violation.
    pub errors: Vec<ValidationError>,
}

impl SchemaError {
    pub(crate) fn new(kind: SchemaErrorKind, errors: Vec<ValidationError>) -> SchemaError {
        SchemaError { kind, errors }
    }
    pub(crate) fn internal(error: ValidationError) -> SchemaError {
        SchemaError::new(SchemaErrorKind::Internal, vec![error])
    }
    pub(crate) fn parsing(error: &serde_json::Error) -> SchemaError {
        SchemaError::new(
            SchemaErrorKind::Parsing,
            vec![ValidationError::json_parse(error)],
        )
    }
    pub(crate) fn pointer(error: ValidationError) -> SchemaError {
        SchemaError::new(SchemaErrorKind::Pointer, vec![error])
    }
    pub(crate) fn schema_validation(errors: Vec<ValidationError>) -> SchemaError {
        SchemaError::new(SchemaErrorKind::SchemaValidation, errors)
    }

    /// Short description of the error category.
    #[must_use]
    pub fn type_message(&self) -> &'static str {
        match self.kind {
            SchemaErrorKind::Internal => "internal error",
            SchemaErrorKind::Parsing => "parse error",
            SchemaErrorKind::Pointer => "invalid schema pointer",
            SchemaErrorKind::SchemaValidation => "invalid schema",
        }
    }
}

impl error::Error for SchemaError {}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_message())?;
        for (idx, error) in self.errors.iter().enumerate() {
            f.write_str(if idx == 0 { ": " } else { "; " })?;
            if !error.path.is_empty() {
                write!(f, "{}: ", error.path)?;
            }
            f.write_str(&error.message())?;
        }
        Ok(())
    }
}
