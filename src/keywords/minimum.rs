use crate::{
    compilation::{context::CompilationContext, SchemaValidator},
    error::ValidationError,
    keywords::CompilationResult,
    paths::InstancePath,
    validator::{Validate, ValidationContext},
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct MinimumValidator {
    limit: f64,
}

impl MinimumValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value, context: &CompilationContext<'_, '_>) -> CompilationResult {
        match schema.as_f64() {
            Some(limit) => Ok(Box::new(MinimumValidator { limit })),
            None => Err(context.invalid_keyword("minimum")),
        }
    }
}

impl Validate for MinimumValidator {
    fn validate(
        &self,
        _: &SchemaValidator,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        if let Some(value) = instance.as_f64() {
            if value < self.limit {
                context.push_error(ValidationError::minimum(
                    instance_path.to_string(),
                    self.limit,
                ));
            }
        }
    }
}

impl fmt::Display for MinimumValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "minimum: {}", self.limit)
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    context: &mut CompilationContext<'_, '_>,
) -> Option<CompilationResult> {
    Some(MinimumValidator::compile(schema, context))
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!(5))]
    #[test_case(&json!(5.0))]
    #[test_case(&json!(u64::MAX))]
    fn inclusive(instance: &Value) {
        tests_util::is_valid(&json!({"minimum": 5}), instance)
    }

    #[test]
    fn below() {
        tests_util::expect_errors(
            &json!({"minimum": -1.5}),
            &json!(-2),
            &["Value must not be less than -1.5."],
        )
    }
}
