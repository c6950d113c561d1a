use crate::{
    compilation::{context::CompilationContext, SchemaValidator},
    error::{SchemaError, ValidationError},
    paths::InstancePath,
    validator::{NodeId, ValidationContext},
};
use serde_json::{Map, Value};
use std::fmt;

/// `additionalItems` next to a tuple-form `items`.
pub(crate) enum AdditionalItems {
    Forbidden,
    Schema(NodeId),
}

impl AdditionalItems {
    /// `None` when the keyword is absent or `true`: extra items are unconstrained.
    pub(crate) fn compile(
        parent: &Map<String, Value>,
        context: &mut CompilationContext<'_, '_>,
    ) -> Result<Option<AdditionalItems>, SchemaError> {
        match parent.get("additionalItems") {
            None | Some(Value::Bool(true)) => Ok(None),
            Some(Value::Bool(false)) => Ok(Some(AdditionalItems::Forbidden)),
            Some(_) => Ok(Some(AdditionalItems::Schema(
                context.subschema("additionalItems")?,
            ))),
        }
    }

    /// Check the items past the tuple, starting at `start`.
    pub(crate) fn validate(
        &self,
        schema: &SchemaValidator,
        items: &[Value],
        start: usize,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        if items.len() <= start {
            return;
        }
        match self {
            AdditionalItems::Forbidden => {
                context.push_error(ValidationError::additional_items(instance_path.to_string()));
            }
            AdditionalItems::Schema(node) => {
                for (idx, item) in items.iter().enumerate().skip(start) {
                    let item_path = instance_path.push(idx);
                    schema.validate_node(*node, item, &item_path, context);
                }
            }
        }
    }
}

impl fmt::Display for AdditionalItems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdditionalItems::Forbidden => f.write_str("additionalItems: false"),
            AdditionalItems::Schema(node) => write!(f, "additionalItems: {}", node),
        }
    }
}
