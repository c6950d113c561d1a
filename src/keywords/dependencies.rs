use crate::{
    compilation::{context::CompilationContext, SchemaValidator},
    error::{SchemaError, ValidationError},
    paths::InstancePath,
    validator::{NodeId, ValidationContext},
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) enum Dependency {
    /// Sibling members that must be present too.
    Required(Vec<String>),
    /// A schema the whole object must satisfy.
    Schema(NodeId),
}

pub(crate) struct DependenciesValidator {
    dependencies: Vec<(String, Dependency)>,
}

impl DependenciesValidator {
    #[inline]
    pub(crate) fn compile(
        map: &Map<String, Value>,
        context: &mut CompilationContext<'_, '_>,
    ) -> Result<Self, SchemaError> {
        let mut dependencies = Vec::with_capacity(map.len());
        for (name, dependency) in map {
            let dependency = if let Value::Array(items) = dependency {
                let mut required = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(item) => required.push(item.clone()),
                        _ => return Err(context.invalid_keyword("dependencies")),
                    }
                }
                Dependency::Required(required)
            } else {
                Dependency::Schema(context.subschema_at("dependencies", name)?)
            };
            dependencies.push((name.clone(), dependency));
        }
        Ok(DependenciesValidator { dependencies })
    }

    /// Apply the dependency of the member `name`, if there is one.
    pub(crate) fn validate_member(
        &self,
        schema: &SchemaValidator,
        name: &str,
        object: &Map<String, Value>,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        let dependency = self
            .dependencies
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, dependency)| dependency);
        match dependency {
            Some(Dependency::Required(required)) => {
                for sibling in required {
                    if !object.contains_key(sibling) {
                        context.push_error(ValidationError::required(
                            instance_path.to_string(),
                            sibling.as_str(),
                        ));
                    }
                }
            }
            Some(Dependency::Schema(node)) => {
                schema.validate_node(*node, instance, instance_path, context);
            }
            None => {}
        }
    }
}

impl fmt::Display for DependenciesValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dependencies = self
            .dependencies
            .iter()
            .map(|(name, dependency)| match dependency {
                Dependency::Required(required) => format!("{}: [{}]", name, required.join(", ")),
                Dependency::Schema(node) => format!("{}: {}", name, node),
            })
            .collect::<Vec<String>>()
            .join(", ");
        write!(f, "dependencies: {{{}}}", dependencies)
    }
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({}))]
    #[test_case(&json!({"foo": 1}))]
    #[test_case(&json!({"foo": 1, "bar": 2}))]
    fn satisfied(instance: &Value) {
        tests_util::is_valid(&json!({"dependencies": {"bar": ["foo"]}}), instance)
    }

    #[test]
    fn every_missing_sibling_is_reported() {
        tests_util::expect_errors(
            &json!({"dependencies": {"bar": ["foo", "baz"]}}),
            &json!({"bar": 1}),
            &[
                "Required property foo is missing.",
                "Required property baz is missing.",
            ],
        );
    }

    #[test]
    fn schema_dependency_checks_the_object() {
        let schema = json!({"dependencies": {"bar": {"properties": {"foo": {"type": "integer"}}}}});
        tests_util::is_valid(&schema, &json!({"foo": "x"}));
        tests_util::is_valid(&schema, &json!({"foo": 1, "bar": 2}));
        tests_util::is_not_valid(&schema, &json!({"foo": "x", "bar": 2}));
    }
}
