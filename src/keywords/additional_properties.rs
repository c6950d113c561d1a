use crate::{
    compilation::{context::CompilationContext, SchemaValidator},
    error::{SchemaError, ValidationError},
    paths::InstancePath,
    validator::{NodeId, ValidationContext},
};
use serde_json::Value;
use std::fmt;

/// `additionalProperties`: applies to members matched by neither `properties` nor `patternProperties`.
pub(crate) enum AdditionalProperties {
    Forbidden,
    Schema(NodeId),
}

impl AdditionalProperties {
    /// `None` for `true`, which allows anything.
    pub(crate) fn compile(
        schema: &Value,
        context: &mut CompilationContext<'_, '_>,
    ) -> Result<Option<AdditionalProperties>, SchemaError> {
        match schema {
            Value::Bool(true) => Ok(None),
            Value::Bool(false) => Ok(Some(AdditionalProperties::Forbidden)),
            _ => Ok(Some(AdditionalProperties::Schema(
                context.subschema("additionalProperties")?,
            ))),
        }
    }

    pub(crate) fn validate_member(
        &self,
        schema: &SchemaValidator,
        value: &Value,
        member_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        match self {
            AdditionalProperties::Forbidden => {
                context.push_error(ValidationError::unexpected_property(member_path.to_string()));
            }
            AdditionalProperties::Schema(node) => {
                schema.validate_node(*node, value, member_path, context);
            }
        }
    }
}

impl fmt::Display for AdditionalProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdditionalProperties::Forbidden => f.write_str("additionalProperties: false"),
            AdditionalProperties::Schema(node) => write!(f, "additionalProperties: {}", node),
        }
    }
}
