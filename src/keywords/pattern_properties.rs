use crate::{
    compilation::{context::CompilationContext, SchemaValidator},
    error::SchemaError,
    paths::InstancePath,
    validator::{NodeId, ValidationContext},
};
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;

/// `patternProperties`: each member is checked against every schema whose pattern matches its name.
pub(crate) struct PatternPropertiesValidator {
    patterns: Vec<(Regex, String, NodeId)>,
}

impl PatternPropertiesValidator {
    #[inline]
    pub(crate) fn compile(
        map: &Map<String, Value>,
        context: &mut CompilationContext<'_, '_>,
    ) -> Result<Self, SchemaError> {
        let mut patterns = Vec::with_capacity(map.len());
        for pattern in map.keys() {
            let regex = Regex::new(pattern)
                .map_err(|error| context.invalid_pattern("patternProperties", pattern, &error))?;
            let node = context.subschema_at("patternProperties", pattern)?;
            patterns.push((regex, pattern.clone(), node));
        }
        Ok(PatternPropertiesValidator { patterns })
    }

    /// Returns whether any pattern matched `name`.
    pub(crate) fn validate_member(
        &self,
        schema: &SchemaValidator,
        name: &str,
        value: &Value,
        member_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) -> bool {
        let mut matched = false;
        for (regex, _, node) in &self.patterns {
            if regex.is_match(name) {
                matched = true;
                schema.validate_node(*node, value, member_path, context);
            }
        }
        matched
    }
}

impl fmt::Display for PatternPropertiesValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "patternProperties: {{{}}}",
            self.patterns
                .iter()
                .map(|(_, pattern, node)| format!("{}: {}", pattern, node))
                .collect::<Vec<String>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"foo": 1, "foooooo": 2}))]
    #[test_case(&json!({"bar": "x"}))]
    #[test_case(&json!({}))]
    fn matching_members(instance: &Value) {
        tests_util::is_valid(&json!({"patternProperties": {"f.*o": {"type": "integer"}}}), instance)
    }

    #[test]
    fn pattern_is_not_anchored() {
        let schema = json!({"patternProperties": {"f.*o": {"type": "integer"}}});
        tests_util::is_not_valid(&schema, &json!({"xfoox": "1"}));
    }
}
