use crate::{
    compilation::{context::CompilationContext, SchemaValidator},
    error::SchemaError,
    paths::InstancePath,
    validator::{NodeId, ValidationContext},
};
use serde_json::Value;
use std::fmt;

/// `propertyNames`: every member name is validated as a string instance.
pub(crate) struct PropertyNamesValidator {
    node: NodeId,
}

impl PropertyNamesValidator {
    #[inline]
    pub(crate) fn compile(context: &mut CompilationContext<'_, '_>) -> Result<Self, SchemaError> {
        let node = context.subschema("propertyNames")?;
        Ok(PropertyNamesValidator { node })
    }

    /// Names are not located in the instance, so their errors carry an empty path.
    pub(crate) fn validate_name(
        &self,
        schema: &SchemaValidator,
        name: &str,
        context: &mut ValidationContext,
    ) {
        let name = Value::String(name.to_string());
        schema.validate_node(self.node, &name, &InstancePath::unpositioned(), context);
    }
}

impl fmt::Display for PropertyNamesValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "propertyNames: {}", self.node)
    }
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::json;

    #[test]
    fn every_name_is_checked() {
        let schema = json!({"propertyNames": {"pattern": "^[a-z]+$"}});
        tests_util::is_valid(&schema, &json!({"abc": 1, "z": 2}));
        tests_util::expect_errors(
            &schema,
            &json!({"abc": 1, "B": 2, "C": 3}),
            &[
                "String must match the pattern: ^[a-z]+$.",
                "String must match the pattern: ^[a-z]+$.",
            ],
        );
    }

    #[test]
    fn false_rejects_any_member() {
        let schema = json!({"propertyNames": false});
        tests_util::is_valid(&schema, &json!({}));
        tests_util::is_not_valid(&schema, &json!({"a": 1}));
    }
}
