use crate::{
    compilation::{context::CompilationContext, SchemaValidator},
    error::ValidationError,
    keywords::{helpers, CompilationResult},
    paths::InstancePath,
    validator::{Validate, ValidationContext},
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct MaxItemsValidator {
    limit: u64,
}

impl MaxItemsValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value, context: &CompilationContext<'_, '_>) -> CompilationResult {
        match helpers::as_limit(schema) {
            Some(limit) => Ok(Box::new(MaxItemsValidator { limit })),
            None => Err(context.invalid_keyword("maxItems")),
        }
    }
}

impl Validate for MaxItemsValidator {
    fn validate(
        &self,
        _: &SchemaValidator,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        if let Value::Array(items) = instance {
            if (items.len() as u64) > self.limit {
                context.push_error(ValidationError::max_items(
                    instance_path.to_string(),
                    self.limit,
                ));
            }
        }
    }
}

impl fmt::Display for MaxItemsValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "maxItems: {}", self.limit)
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    context: &mut CompilationContext<'_, '_>,
) -> Option<CompilationResult> {
    Some(MaxItemsValidator::compile(schema, context))
}
