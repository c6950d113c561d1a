use crate::{
    compilation::{context::CompilationContext, SchemaValidator},
    error::ValidationError,
    keywords::CompilationResult,
    paths::InstancePath,
    validator::{NodeId, Validate, ValidationContext},
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct ContainsValidator {
    node: NodeId,
}

impl ContainsValidator {
    #[inline]
    pub(crate) fn compile(context: &mut CompilationContext<'_, '_>) -> CompilationResult {
        let node = context.subschema("contains")?;
        Ok(Box::new(ContainsValidator { node }))
    }
}

impl Validate for ContainsValidator {
    fn validate(
        &self,
        schema: &SchemaValidator,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        if let Value::Array(items) = instance {
            let found = items.iter().enumerate().any(|(idx, item)| {
                let item_path = instance_path.push(idx);
                context.trial(|context| schema.validate_node(self.node, item, &item_path, context))
            });
            if !found {
                context.push_error(ValidationError::contains(instance_path.to_string()));
            }
        }
    }
}

impl fmt::Display for ContainsValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "contains: {}", self.node)
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    _: &Value,
    context: &mut CompilationContext<'_, '_>,
) -> Option<CompilationResult> {
    Some(ContainsValidator::compile(context))
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!([1, 7]))]
    #[test_case(&json!([7]))]
    fn some_item_matches(instance: &Value) {
        tests_util::is_valid(&json!({"contains": {"minimum": 5}}), instance)
    }

    #[test_case(&json!([]))]
    #[test_case(&json!([1, 2]))]
    fn no_item_matches(instance: &Value) {
        tests_util::expect_errors(
            &json!({"contains": {"minimum": 5}}),
            instance,
            &["Array does not contain matching item."],
        )
    }
}
