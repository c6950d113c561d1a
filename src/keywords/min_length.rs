use crate::{
    compilation::{context::CompilationContext, SchemaValidator},
    error::ValidationError,
    keywords::{helpers, CompilationResult},
    paths::InstancePath,
    validator::{Validate, ValidationContext},
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct MinLengthValidator {
    limit: u64,
}

impl MinLengthValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value, context: &CompilationContext<'_, '_>) -> CompilationResult {
        if helpers::is_negative(schema) {
            return NegativeLimitValidator::compile("minLength", schema);
        }
        match helpers::as_limit(schema) {
            Some(limit) => Ok(Box::new(MinLengthValidator { limit })),
            None => Err(context.invalid_keyword("minLength")),
        }
    }
}

impl Validate for MinLengthValidator {
    fn validate(
        &self,
        _: &SchemaValidator,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        if let Value::String(item) = instance {
            // Code points, not bytes
            if (bytecount::num_chars(item.as_bytes()) as u64) < self.limit {
                context.push_error(ValidationError::min_length(
                    instance_path.to_string(),
                    self.limit,
                ));
            }
        }
    }
}

impl fmt::Display for MinLengthValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "minLength: {}", self.limit)
    }
}

/// A negative `minLength` or `maxLength`. Every string is reported against it.
pub(crate) struct NegativeLimitValidator {
    keyword: &'static str,
    limit: Value,
}

impl NegativeLimitValidator {
    #[inline]
    pub(crate) fn compile(keyword: &'static str, limit: &Value) -> CompilationResult {
        Ok(Box::new(NegativeLimitValidator {
            keyword,
            limit: limit.clone(),
        }))
    }
}

impl Validate for NegativeLimitValidator {
    fn validate(
        &self,
        _: &SchemaValidator,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        if instance.is_string() {
            context.push_error(ValidationError::negative_limit(
                instance_path.to_string(),
                self.keyword,
            ));
        }
    }
}

impl fmt::Display for NegativeLimitValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.keyword, self.limit)
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    context: &mut CompilationContext<'_, '_>,
) -> Option<CompilationResult> {
    Some(MinLengthValidator::compile(schema, context))
}
