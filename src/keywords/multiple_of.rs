use crate::{
    compilation::{context::CompilationContext, SchemaValidator},
    error::ValidationError,
    keywords::CompilationResult,
    paths::InstancePath,
    validator::{Validate, ValidationContext},
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct MultipleOfValidator {
    multiple_of: f64,
}

impl MultipleOfValidator {
    #[inline]
    pub(crate) fn compile(multiple_of: f64) -> CompilationResult {
        Ok(Box::new(MultipleOfValidator { multiple_of }))
    }
}

impl Validate for MultipleOfValidator {
    fn validate(
        &self,
        _: &SchemaValidator,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        if let Some(value) = instance.as_f64() {
            let quotient = value / self.multiple_of;
            if quotient.floor() != quotient {
                context.push_error(ValidationError::multiple_of(
                    instance_path.to_string(),
                    self.multiple_of,
                ));
            }
        }
    }
}

impl fmt::Display for MultipleOfValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "multipleOf: {}", self.multiple_of)
    }
}

/// A zero divisor is not checked.
#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    context: &mut CompilationContext<'_, '_>,
) -> Option<CompilationResult> {
    match schema.as_f64() {
        Some(multiple_of) if multiple_of == 0. => None,
        Some(multiple_of) => Some(MultipleOfValidator::compile(multiple_of)),
        None => Some(Err(context.invalid_keyword("multipleOf"))),
    }
}
