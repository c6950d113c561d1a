//! Object member keywords.
//!
//! `propertyNames`, `properties`, `patternProperties`, `additionalProperties` and `dependencies`
//! interact per member, so they are compiled into a single validator that walks the object once.
use crate::{
    compilation::{context::CompilationContext, SchemaValidator},
    error::SchemaError,
    keywords::{
        additional_properties::AdditionalProperties, dependencies::DependenciesValidator,
        pattern_properties::PatternPropertiesValidator, property_names::PropertyNamesValidator,
        CompilationResult,
    },
    paths::InstancePath,
    validator::{NodeId, Validate, ValidationContext},
};
use serde_json::{Map, Value};
use std::fmt;

const MEMBER_KEYWORDS: [&str; 5] = [
    "propertyNames",
    "properties",
    "patternProperties",
    "additionalProperties",
    "dependencies",
];

pub(crate) struct PropertiesValidator {
    properties: Vec<(String, NodeId)>,
    /// Declared `default` values of the member schemas.
    defaults: Vec<(String, Value)>,
}

impl PropertiesValidator {
    #[inline]
    pub(crate) fn compile(
        map: &Map<String, Value>,
        context: &mut CompilationContext<'_, '_>,
    ) -> Result<Self, SchemaError> {
        let mut properties = Vec::with_capacity(map.len());
        let mut defaults = Vec::new();
        for (name, subschema) in map {
            properties.push((name.clone(), context.subschema_at("properties", name)?));
            if let Some(default) = subschema.get("default") {
                defaults.push((name.clone(), default.clone()));
            }
        }
        Ok(PropertiesValidator {
            properties,
            defaults,
        })
    }

    #[inline]
    fn get(&self, name: &str) -> Option<NodeId> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, node)| *node)
    }
}

impl fmt::Display for PropertiesValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "properties: {{{}}}",
            self.properties
                .iter()
                .map(|(name, node)| format!("{}: {}", name, node))
                .collect::<Vec<String>>()
                .join(", ")
        )
    }
}

#[derive(Default)]
pub(crate) struct ObjectMembersValidator {
    property_names: Option<PropertyNamesValidator>,
    properties: Option<PropertiesValidator>,
    pattern_properties: Option<PatternPropertiesValidator>,
    additional_properties: Option<AdditionalProperties>,
    dependencies: Option<DependenciesValidator>,
}

impl ObjectMembersValidator {
    pub(crate) fn compile(
        parent: &Map<String, Value>,
        context: &mut CompilationContext<'_, '_>,
    ) -> CompilationResult {
        let mut validator = ObjectMembersValidator::default();
        if parent.contains_key("propertyNames") {
            validator.property_names = Some(PropertyNamesValidator::compile(context)?);
        }
        if let Some(value) = parent.get("properties") {
            match value {
                Value::Object(map) => {
                    validator.properties = Some(PropertiesValidator::compile(map, context)?);
                }
                _ => return Err(context.invalid_keyword("properties")),
            }
        }
        if let Some(value) = parent.get("patternProperties") {
            match value {
                Value::Object(map) => {
                    validator.pattern_properties =
                        Some(PatternPropertiesValidator::compile(map, context)?);
                }
                _ => return Err(context.invalid_keyword("patternProperties")),
            }
        }
        if let Some(value) = parent.get("additionalProperties") {
            validator.additional_properties = AdditionalProperties::compile(value, context)?;
        }
        if let Some(value) = parent.get("dependencies") {
            match value {
                Value::Object(map) => {
                    validator.dependencies = Some(DependenciesValidator::compile(map, context)?);
                }
                _ => return Err(context.invalid_keyword("dependencies")),
            }
        }
        Ok(Box::new(validator))
    }

    fn push_defaults(
        &self,
        object: &Map<String, Value>,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        if let Some(properties) = &self.properties {
            let location = instance_path.to_pointer();
            for (name, default) in &properties.defaults {
                if !object.contains_key(name) {
                    context.push_default(location.join(name.as_str()), default.clone());
                }
            }
        }
    }
}

impl Validate for ObjectMembersValidator {
    fn validate(
        &self,
        schema: &SchemaValidator,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        if let Value::Object(object) = instance {
            if context.collects_defaults() {
                self.push_defaults(object, instance_path, context);
            }
            for (name, value) in object {
                if let Some(property_names) = &self.property_names {
                    property_names.validate_name(schema, name, context);
                }
                let member_path = instance_path.push(name);
                let mut checked = false;
                if let Some(node) = self.properties.as_ref().and_then(|props| props.get(name)) {
                    checked = true;
                    schema.validate_node(node, value, &member_path, context);
                }
                if let Some(pattern_properties) = &self.pattern_properties {
                    if pattern_properties.validate_member(schema, name, value, &member_path, context)
                    {
                        checked = true;
                    }
                }
                if !checked {
                    if let Some(additional_properties) = &self.additional_properties {
                        additional_properties.validate_member(schema, value, &member_path, context);
                    }
                }
                if let Some(dependencies) = &self.dependencies {
                    dependencies.validate_member(
                        schema,
                        name,
                        object,
                        instance,
                        instance_path,
                        context,
                    );
                }
            }
        }
    }
}

impl fmt::Display for ObjectMembersValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::with_capacity(MEMBER_KEYWORDS.len());
        if let Some(property_names) = &self.property_names {
            parts.push(property_names.to_string());
        }
        if let Some(properties) = &self.properties {
            parts.push(properties.to_string());
        }
        if let Some(pattern_properties) = &self.pattern_properties {
            parts.push(pattern_properties.to_string());
        }
        if let Some(additional_properties) = &self.additional_properties {
            parts.push(additional_properties.to_string());
        }
        if let Some(dependencies) = &self.dependencies {
            parts.push(dependencies.to_string());
        }
        f.write_str(&parts.join(", "))
    }
}

/// `None` when the schema has none of the member keywords.
#[inline]
pub(crate) fn compile_members(
    parent: &Map<String, Value>,
    context: &mut CompilationContext<'_, '_>,
) -> Option<CompilationResult> {
    if MEMBER_KEYWORDS
        .iter()
        .any(|keyword| parent.contains_key(*keyword))
    {
        Some(ObjectMembersValidator::compile(parent, context))
    } else {
        None
    }
}
