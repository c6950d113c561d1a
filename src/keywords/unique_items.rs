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

pub(crate) struct UniqueItemsValidator;

impl UniqueItemsValidator {
    #[inline]
    pub(crate) fn compile() -> CompilationResult {
        Ok(Box::new(UniqueItemsValidator))
    }
}

impl Validate for UniqueItemsValidator {
    fn validate(
        &self,
        _: &SchemaValidator,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        if let Value::Array(items) = instance {
            // One error per duplicate pair
            for (idx, left) in items.iter().enumerate() {
                for right in &items[idx + 1..] {
                    if equal(left, right) {
                        context.push_error(ValidationError::unique_items(instance_path.to_string()));
                    }
                }
            }
        }
    }
}

impl fmt::Display for UniqueItemsValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("uniqueItems: true")
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    context: &mut CompilationContext<'_, '_>,
) -> Option<CompilationResult> {
    match schema {
        Value::Bool(true) => Some(UniqueItemsValidator::compile()),
        Value::Bool(false) => None,
        _ => Some(Err(context.invalid_keyword("uniqueItems"))),
    }
}
