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

pub(crate) struct EnumValidator {
    options: Value,
}

impl EnumValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value, context: &CompilationContext<'_, '_>) -> CompilationResult {
        if schema.is_array() {
            Ok(Box::new(EnumValidator {
                options: schema.clone(),
            }))
        } else {
            Err(context.invalid_keyword("enum"))
        }
    }

    fn items(&self) -> &[Value] {
        self.options.as_array().map_or(&[], Vec::as_slice)
    }
}

impl Validate for EnumValidator {
    fn validate(
        &self,
        _: &SchemaValidator,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        if !self.items().iter().any(|item| equal(instance, item)) {
            context.push_error(ValidationError::enumeration(instance_path.to_string()));
        }
    }
}

impl fmt::Display for EnumValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "enum: {}", self.options)
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    context: &mut CompilationContext<'_, '_>,
) -> Option<CompilationResult> {
    Some(EnumValidator::compile(schema, context))
}
