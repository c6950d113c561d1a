use crate::{
    compilation::{context::CompilationContext, SchemaValidator},
    error::ValidationError,
    keywords::CompilationResult,
    paths::InstancePath,
    primitive_type::PrimitiveType,
    validator::{Validate, ValidationContext},
};
use serde_json::{Map, Value};
use std::{convert::TryFrom, fmt};

pub(crate) struct SingleTypeValidator {
    type_: PrimitiveType,
}

impl SingleTypeValidator {
    #[inline]
    pub(crate) fn compile(type_: PrimitiveType) -> CompilationResult {
        Ok(Box::new(SingleTypeValidator { type_ }))
    }
}

impl Validate for SingleTypeValidator {
    fn validate(
        &self,
        _: &SchemaValidator,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        let actual = PrimitiveType::of(instance);
        if !self.type_.accepts(actual) {
            context.push_error(ValidationError::single_type_error(
                instance_path.to_string(),
                self.type_,
                actual,
            ));
        }
    }
}

impl fmt::Display for SingleTypeValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type: {}", self.type_)
    }
}

pub(crate) struct MultipleTypesValidator {
    types: Vec<PrimitiveType>,
}

impl MultipleTypesValidator {
    #[inline]
    pub(crate) fn compile(items: &[Value], context: &CompilationContext<'_, '_>) -> CompilationResult {
        let mut types = Vec::with_capacity(items.len());
        for item in items {
            match item.as_str().map(PrimitiveType::try_from) {
                Some(Ok(type_)) => types.push(type_),
                _ => return Err(context.invalid_keyword("type")),
            }
        }
        Ok(Box::new(MultipleTypesValidator { types }))
    }
}

impl Validate for MultipleTypesValidator {
    fn validate(
        &self,
        _: &SchemaValidator,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        let actual = PrimitiveType::of(instance);
        if !self.types.iter().any(|type_| type_.accepts(actual)) {
            context.push_error(ValidationError::type_choice(instance_path.to_string()));
        }
    }
}

impl fmt::Display for MultipleTypesValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type: [{}]",
            self.types
                .iter()
                .map(PrimitiveType::to_string)
                .collect::<Vec<String>>()
                .join(", ")
        )
    }
}

/// `"type": ""` matches nothing.
pub(crate) struct EmptyTypeValidator;

impl Validate for EmptyTypeValidator {
    fn validate(
        &self,
        _: &SchemaValidator,
        _: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        context.push_error(ValidationError::empty_type(instance_path.to_string()));
    }
}

impl fmt::Display for EmptyTypeValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("type: \"\"")
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    context: &mut CompilationContext<'_, '_>,
) -> Option<CompilationResult> {
    match schema {
        Value::String(type_) if type_.is_empty() => Some(Ok(Box::new(EmptyTypeValidator))),
        Value::String(type_) => match PrimitiveType::try_from(type_.as_str()) {
            Ok(type_) => Some(SingleTypeValidator::compile(type_)),
            Err(()) => Some(Err(context.invalid_keyword("type"))),
        },
        Value::Array(items) => Some(MultipleTypesValidator::compile(items, context)),
        _ => Some(Err(context.invalid_keyword("type"))),
    }
}
