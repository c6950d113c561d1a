use crate::{
    compilation::{context::CompilationContext, SchemaValidator},
    keywords::{additional_items::AdditionalItems, CompilationResult},
    paths::InstancePath,
    validator::{format_nodes, NodeId, Validate, ValidationContext},
};
use serde_json::{Map, Value};
use std::fmt;

/// `items` as a tuple of schemas, one per position.
pub(crate) struct ItemsArrayValidator {
    items: Vec<NodeId>,
    additional_items: Option<AdditionalItems>,
}

impl ItemsArrayValidator {
    #[inline]
    pub(crate) fn compile(
        parent: &Map<String, Value>,
        count: usize,
        context: &mut CompilationContext<'_, '_>,
    ) -> CompilationResult {
        let mut items = Vec::with_capacity(count);
        for idx in 0..count {
            items.push(context.subschema_item("items", idx)?);
        }
        let additional_items = AdditionalItems::compile(parent, context)?;
        Ok(Box::new(ItemsArrayValidator {
            items,
            additional_items,
        }))
    }
}

impl Validate for ItemsArrayValidator {
    fn validate(
        &self,
        schema: &SchemaValidator,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        if let Value::Array(items) = instance {
            for (idx, (item, node)) in items.iter().zip(self.items.iter()).enumerate() {
                let item_path = instance_path.push(idx);
                schema.validate_node(*node, item, &item_path, context);
            }
            if let Some(additional_items) = &self.additional_items {
                additional_items.validate(schema, items, self.items.len(), instance_path, context);
            }
        }
    }
}

impl fmt::Display for ItemsArrayValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "items: [{}]", format_nodes(&self.items))?;
        if let Some(additional_items) = &self.additional_items {
            write!(f, ", {}", additional_items)?;
        }
        Ok(())
    }
}

/// `items` as a single schema for every element.
pub(crate) struct ItemsObjectValidator {
    node: NodeId,
}

impl ItemsObjectValidator {
    #[inline]
    pub(crate) fn compile(context: &mut CompilationContext<'_, '_>) -> CompilationResult {
        let node = context.subschema("items")?;
        Ok(Box::new(ItemsObjectValidator { node }))
    }
}

impl Validate for ItemsObjectValidator {
    fn validate(
        &self,
        schema: &SchemaValidator,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        if let Value::Array(items) = instance {
            for (idx, item) in items.iter().enumerate() {
                let item_path = instance_path.push(idx);
                schema.validate_node(self.node, item, &item_path, context);
            }
        }
    }
}

impl fmt::Display for ItemsObjectValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "items: {}", self.node)
    }
}

#[inline]
pub(crate) fn compile(
    parent: &Map<String, Value>,
    schema: &Value,
    context: &mut CompilationContext<'_, '_>,
) -> Option<CompilationResult> {
    match schema {
        Value::Array(items) => Some(ItemsArrayValidator::compile(parent, items.len(), context)),
        _ => Some(ItemsObjectValidator::compile(context)),
    }
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test]
    fn tuple_shorter_than_instance() {
        let schema = json!({"items": [{"type": "integer"}, {"type": "string"}]});
        tests_util::is_valid(&schema, &json!([1, "a", null]));
        tests_util::is_valid(&schema, &json!([1]));
        tests_util::is_not_valid(&schema, &json!(["a", 1]));
    }

    #[test]
    fn single_schema_errors_carry_positions() {
        let schema = json!({"items": {"type": "string"}});
        let validator = crate::SchemaValidator::new(&schema).expect("Valid schema");
        let errors = validator.validate(&json!(["a", 1, "b", 2])).expect_err("Invalid");
        let paths: Vec<_> = errors.iter().map(|error| error.path.as_str()).collect();
        assert_eq!(paths, vec!["/1", "/3"]);
    }

    #[test_case(&json!({"items": {}, "uniqueItems": true}), &json!([1, 1]))]
    #[test_case(&json!({"items": {"type": "integer"}, "uniqueItems": true}), &json!([1, 1]))]
    #[test_case(&json!({"items": {}, "contains": {"type": "string"}}), &json!([1]))]
    #[test_case(&json!({"items": true, "contains": false}), &json!([1]))]
    fn single_schema_ends_array_checks(schema: &Value, instance: &Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test_case(&json!({"items": {}, "minItems": 2}), &json!([1]))]
    #[test_case(&json!({"items": {}, "maxItems": 1}), &json!([1, 2]))]
    #[test_case(&json!({"items": [{}], "uniqueItems": true}), &json!([1, 1]))]
    #[test_case(&json!({"items": [{}], "contains": {"type": "string"}}), &json!([1]))]
    fn other_array_keywords_still_apply(schema: &Value, instance: &Value) {
        tests_util::is_not_valid(schema, instance)
    }
}
