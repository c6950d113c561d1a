use crate::{
    compilation::{context::CompilationContext, SchemaValidator},
    error::ValidationError,
    keywords::{helpers, CompilationResult},
    paths::InstancePath,
    validator::{Validate, ValidationContext},
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct MaxPropertiesValidator {
    limit: u64,
}

impl MaxPropertiesValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value, context: &CompilationContext<'_, '_>) -> CompilationResult {
        match helpers::as_limit(schema) {
            Some(limit) => Ok(Box::new(MaxPropertiesValidator { limit })),
            None => Err(context.invalid_keyword("maxProperties")),
        }
    }
}

impl Validate for MaxPropertiesValidator {
    fn validate(
        &self,
        _: &SchemaValidator,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        if let Value::Object(item) = instance {
            if (item.len() as u64) > self.limit {
                context.push_error(ValidationError::max_properties(
                    instance_path.to_string(),
                    self.limit,
                ));
            }
        }
    }
}

impl fmt::Display for MaxPropertiesValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "maxProperties: {}", self.limit)
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    context: &mut CompilationContext<'_, '_>,
) -> Option<CompilationResult> {
    Some(MaxPropertiesValidator::compile(schema, context))
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::json;

    #[test]
    fn zero_allows_empty_objects_only() {
        let schema = json!({"maxProperties": 0});
        tests_util::is_valid(&schema, &json!({}));
        tests_util::is_not_valid(&schema, &json!({"a": null}));
    }
}
