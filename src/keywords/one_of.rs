use crate::{
    compilation::{context::CompilationContext, SchemaValidator},
    error::ValidationError,
    keywords::CompilationResult,
    paths::InstancePath,
    validator::{format_nodes, NodeId, Validate, ValidationContext},
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct OneOfValidator {
    schemas: Vec<NodeId>,
}

impl OneOfValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value, context: &mut CompilationContext<'_, '_>) -> CompilationResult {
        match schema {
            Value::Array(items) => {
                let mut schemas = Vec::with_capacity(items.len());
                for idx in 0..items.len() {
                    schemas.push(context.subschema_item("oneOf", idx)?);
                }
                Ok(Box::new(OneOfValidator { schemas }))
            }
            _ => Err(context.invalid_keyword("oneOf")),
        }
    }
}

impl Validate for OneOfValidator {
    fn validate(
        &self,
        schema: &SchemaValidator,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        let mut matched = 0_usize;
        for node in &self.schemas {
            if context.trial(|context| schema.validate_node(*node, instance, instance_path, context)) {
                matched += 1;
                if matched > 1 {
                    break;
                }
            }
        }
        if matched != 1 {
            context.push_error(ValidationError::one_of(instance_path.to_string()));
        }
    }
}

impl fmt::Display for OneOfValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oneOf: [{}]", format_nodes(&self.schemas))
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    context: &mut CompilationContext<'_, '_>,
) -> Option<CompilationResult> {
    Some(OneOfValidator::compile(schema, context))
}
