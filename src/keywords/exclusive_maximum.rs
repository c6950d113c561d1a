use crate::{
    compilation::{context::CompilationContext, SchemaValidator},
    error::ValidationError,
    keywords::CompilationResult,
    paths::InstancePath,
    validator::{Validate, ValidationContext},
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct ExclusiveMaximumValidator {
    limit: f64,
}

impl ExclusiveMaximumValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value, context: &CompilationContext<'_, '_>) -> CompilationResult {
        match schema.as_f64() {
            Some(limit) => Ok(Box::new(ExclusiveMaximumValidator { limit })),
            None => Err(context.invalid_keyword("exclusiveMaximum")),
        }
    }
}

impl Validate for ExclusiveMaximumValidator {
    fn validate(
        &self,
        _: &SchemaValidator,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        if let Some(value) = instance.as_f64() {
            if value >= self.limit {
                context.push_error(ValidationError::exclusive_maximum(
                    instance_path.to_string(),
                    self.limit,
                ));
            }
        }
    }
}

impl fmt::Display for ExclusiveMaximumValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exclusiveMaximum: {}", self.limit)
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    context: &mut CompilationContext<'_, '_>,
) -> Option<CompilationResult> {
    Some(ExclusiveMaximumValidator::compile(schema, context))
}
