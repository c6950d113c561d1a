use crate::{
    compilation::{context::CompilationContext, SchemaValidator},
    error::ValidationError,
    keywords::CompilationResult,
    paths::InstancePath,
    validator::{NodeId, Validate, ValidationContext},
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct NotValidator {
    node: NodeId,
}

impl NotValidator {
    #[inline]
    pub(crate) fn compile(context: &mut CompilationContext<'_, '_>) -> CompilationResult {
        let node = context.subschema("not")?;
        Ok(Box::new(NotValidator { node }))
    }
}

impl Validate for NotValidator {
    fn validate(
        &self,
        schema: &SchemaValidator,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        if context.trial(|context| schema.validate_node(self.node, instance, instance_path, context)) {
            context.push_error(ValidationError::not(instance_path.to_string()));
        }
    }
}

impl fmt::Display for NotValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not: {}", self.node)
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    _: &Value,
    context: &mut CompilationContext<'_, '_>,
) -> Option<CompilationResult> {
    Some(NotValidator::compile(context))
}
