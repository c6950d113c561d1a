use crate::{
    compilation::{context::CompilationContext, SchemaValidator},
    error::ValidationError,
    helpers::equal,
    keywords::CompilationResult,
    paths::InstancePath,
    validator::{Validate, ValidationContext},
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct ConstValidator {
    value: Value,
}

impl ConstValidator {
    #[inline]
    pub(crate) fn compile(value: &Value) -> CompilationResult {
        Ok(Box::new(ConstValidator {
            value: value.clone(),
        }))
    }
}

impl Validate for ConstValidator {
    fn validate(
        &self,
        _: &SchemaValidator,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        if !equal(instance, &self.value) {
            context.push_error(ValidationError::constant(instance_path.to_string()));
        }
    }
}

impl fmt::Display for ConstValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "const: {}", self.value)
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    _: &mut CompilationContext<'_, '_>,
) -> Option<CompilationResult> {
    Some(ConstValidator::compile(schema))
}
