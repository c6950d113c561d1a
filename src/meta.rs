//! The draft 7 meta-schema and the validator built from it.
use crate::{compilation::SchemaValidator, error::ValidationError};
use once_cell::sync::Lazy;
use serde_json::Value;

/// URI of the draft 7 meta-schema, without the empty fragment.
pub(crate) const DRAFT7_URI: &str = "http://json-schema.org/draft-07/schema";

pub(crate) static DRAFT7: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../meta_schemas/draft7.json"))
        .expect("Valid meta-schema")
});

static META_VALIDATOR: Lazy<SchemaValidator> = Lazy::new(|| {
    SchemaValidator::options()
        .without_schema_validation()
        .with_max_depth(usize::MAX)
        .build(&DRAFT7)
        .expect("Valid meta-schema")
});

/// Validate `schema` against the draft 7 meta-schema.
pub(crate) fn validate_schema(schema: &Value) -> Vec<ValidationError> {
    META_VALIDATOR.validate(schema).err().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{validate_schema, DRAFT7};
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test]
    fn meta_schema_is_valid_against_itself() {
        assert!(validate_schema(&DRAFT7).is_empty());
    }

    #[test_case(&json!(true))]
    #[test_case(&json!({}))]
    #[test_case(&json!({"type": ["string", "null"], "minLength": 1}))]
    #[test_case(&json!({"properties": {"a": {"$ref": "#/definitions/a"}}, "definitions": {"a": false}}))]
    fn valid_schemas(schema: &Value) {
        assert!(validate_schema(schema).is_empty());
    }

    #[test]
    fn deeply_nested_schema_is_valid() {
        let mut schema = json!({"type": "string"});
        for _ in 0..100 {
            schema = json!({"properties": {"a": schema}});
        }
        assert!(validate_schema(&schema).is_empty());
    }

    #[test_case(&json!(1), "/")]
    #[test_case(&json!({"type": "nope"}), "/type")]
    #[test_case(&json!({"minLength": -1}), "/minLength")]
    #[test_case(&json!({"properties": {"a": {"maxItems": "1"}}}), "/properties/a/maxItems")]
    #[test_case(&json!({"required": ["a", "a"]}), "/required")]
    fn invalid_schemas(schema: &Value, path: &str) {
        let errors = validate_schema(schema);
        assert!(!errors.is_empty());
        assert!(errors.iter().all(|error| error.path == path));
    }
}
