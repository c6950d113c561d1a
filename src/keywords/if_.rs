use crate::{
    compilation::{context::CompilationContext, SchemaValidator},
    keywords::CompilationResult,
    paths::InstancePath,
    validator::{NodeId, Validate, ValidationContext},
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct IfThenElseValidator {
    schema: NodeId,
    then_schema: Option<NodeId>,
    else_schema: Option<NodeId>,
}

impl IfThenElseValidator {
    #[inline]
    pub(crate) fn compile(
        parent: &Map<String, Value>,
        context: &mut CompilationContext<'_, '_>,
    ) -> CompilationResult {
        let schema = context.subschema("if")?;
        let then_schema = if parent.contains_key("then") {
            Some(context.subschema("then")?)
        } else {
            None
        };
        let else_schema = if parent.contains_key("else") {
            Some(context.subschema("else")?)
        } else {
            None
        };
        Ok(Box::new(IfThenElseValidator {
            schema,
            then_schema,
            else_schema,
        }))
    }
}

impl Validate for IfThenElseValidator {
    fn validate(
        &self,
        schema: &SchemaValidator,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        let branch = if context.trial(|context| {
            schema.validate_node(self.schema, instance, instance_path, context)
        }) {
            self.then_schema
        } else {
            self.else_schema
        };
        if let Some(node) = branch {
            schema.validate_node(node, instance, instance_path, context);
        }
    }
}

impl fmt::Display for IfThenElseValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if: {}", self.schema)?;
        if let Some(node) = self.then_schema {
            write!(f, ", then: {}", node)?;
        }
        if let Some(node) = self.else_schema {
            write!(f, ", else: {}", node)?;
        }
        Ok(())
    }
}

/// `if` without `then` and `else` has no effect.
#[inline]
pub(crate) fn compile(
    parent: &Map<String, Value>,
    _: &Value,
    context: &mut CompilationContext<'_, '_>,
) -> Option<CompilationResult> {
    if parent.contains_key("then") || parent.contains_key("else") {
        Some(IfThenElseValidator::compile(parent, context))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!(-5))]
    #[test_case(&json!(4))]
    fn valid(instance: &Value) {
        let schema = json!({"if": {"exclusiveMaximum": 0}, "then": {"minimum": -10}, "else": {"multipleOf": 2}});
        tests_util::is_valid(&schema, instance)
    }

    #[test_case(&json!(-11), "Value must not be less than -10.")]
    #[test_case(&json!(3), "Value must be multiple of 2.")]
    fn invalid(instance: &Value, expected: &str) {
        let schema = json!({"if": {"exclusiveMaximum": 0}, "then": {"minimum": -10}, "else": {"multipleOf": 2}});
        tests_util::expect_errors(&schema, instance, &[expected])
    }
}
