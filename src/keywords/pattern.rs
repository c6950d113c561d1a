use crate::{
    compilation::{context::CompilationContext, SchemaValidator},
    error::ValidationError,
    keywords::CompilationResult,
    paths::InstancePath,
    validator::{Validate, ValidationContext},
};
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct PatternValidator {
    original: String,
    pattern: Regex,
}

impl PatternValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value, context: &CompilationContext<'_, '_>) -> CompilationResult {
        match schema {
            Value::String(item) => {
                let pattern = Regex::new(item)
                    .map_err(|error| context.invalid_pattern("pattern", item, &error))?;
                Ok(Box::new(PatternValidator {
                    original: item.clone(),
                    pattern,
                }))
            }
            _ => Err(context.invalid_keyword("pattern")),
        }
    }
}

impl Validate for PatternValidator {
    fn validate(
        &self,
        _: &SchemaValidator,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        if let Value::String(item) = instance {
            // Unanchored: a match anywhere in the string is enough
            if !self.pattern.is_match(item) {
                context.push_error(ValidationError::pattern(
                    instance_path.to_string(),
                    self.original.clone(),
                ));
            }
        }
    }
}

impl fmt::Display for PatternValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pattern: {}", self.original)
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    context: &mut CompilationContext<'_, '_>,
) -> Option<CompilationResult> {
    Some(PatternValidator::compile(schema, context))
}
