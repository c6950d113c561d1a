use crate::{
    compilation::{context::CompilationContext, SchemaValidator},
    keywords::CompilationResult,
    paths::InstancePath,
    validator::{format_nodes, NodeId, Validate, ValidationContext},
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct AllOfValidator {
    schemas: Vec<NodeId>,
}

impl AllOfValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value, context: &mut CompilationContext<'_, '_>) -> CompilationResult {
        match schema {
            Value::Array(items) => {
                let mut schemas = Vec::with_capacity(items.len());
                for idx in 0..items.len() {
                    schemas.push(context.subschema_item("allOf", idx)?);
                }
                Ok(Box::new(AllOfValidator { schemas }))
            }
            _ => Err(context.invalid_keyword("allOf")),
        }
    }
}

impl Validate for AllOfValidator {
    fn validate(
        &self,
        schema: &SchemaValidator,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        for node in &self.schemas {
            schema.validate_node(*node, instance, instance_path, context);
        }
    }
}

impl fmt::Display for AllOfValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "allOf: [{}]", format_nodes(&self.schemas))
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    context: &mut CompilationContext<'_, '_>,
) -> Option<CompilationResult> {
    Some(AllOfValidator::compile(schema, context))
}
