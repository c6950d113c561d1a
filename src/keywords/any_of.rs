use crate::{
    compilation::{context::CompilationContext, SchemaValidator},
    error::ValidationError,
    keywords::CompilationResult,
    paths::InstancePath,
    validator::{format_nodes, NodeId, Validate, ValidationContext},
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct AnyOfValidator {
    schemas: Vec<NodeId>,
}

impl AnyOfValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value, context: &mut CompilationContext<'_, '_>) -> CompilationResult {
        match schema {
            Value::Array(items) => {
                let mut schemas = Vec::with_capacity(items.len());
                for idx in 0..items.len() {
                    schemas.push(context.subschema_item("anyOf", idx)?);
                }
                Ok(Box::new(AnyOfValidator { schemas }))
            }
            _ => Err(context.invalid_keyword("anyOf")),
        }
    }
}

impl Validate for AnyOfValidator {
    fn validate(
        &self,
        schema: &SchemaValidator,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        // Branch errors are never reported, only the overall outcome
        let matched = self.schemas.iter().any(|node| {
            context.trial(|context| schema.validate_node(*node, instance, instance_path, context))
        });
        if !matched {
            context.push_error(ValidationError::any_of(instance_path.to_string()));
        }
    }
}

impl fmt::Display for AnyOfValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anyOf: [{}]", format_nodes(&self.schemas))
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    context: &mut CompilationContext<'_, '_>,
) -> Option<CompilationResult> {
    Some(AnyOfValidator::compile(schema, context))
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::json;

    #[test]
    fn branch_errors_are_hidden() {
        let schema = json!({"anyOf": [{"minimum": 10}, {"maximum": 0}]});
        tests_util::expect_errors(&schema, &json!(5), &["None of the option schemata was matched."]);
        tests_util::is_valid(&schema, &json!(-1));
    }

    #[test]
    fn empty_array_never_matches() {
        let schema = json!({"anyOf": []});
        let validator = crate::SchemaValidator::options()
            .without_schema_validation()
            .build(&schema)
            .expect("Valid schema");
        assert!(!validator.is_valid(&json!(1)));
    }
}
