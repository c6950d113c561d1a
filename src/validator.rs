use crate::{
    compilation::SchemaValidator,
    error::ValidationError,
    keywords::{BoxedValidator, Validators},
    paths::InstancePath,
    pointer::Pointer,
};
use serde_json::Value;
use std::fmt;

pub(crate) trait Validate: Send + Sync + fmt::Display {
    /// Check `instance` and record every finding in `context`.
    fn validate(
        &self,
        schema: &SchemaValidator,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    );
}

impl fmt::Debug for dyn Validate + Send + Sync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string())
    }
}

/// Index of a compiled schema in the validator's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub(crate) fn format_nodes(nodes: &[NodeId]) -> String {
    nodes
        .iter()
        .map(NodeId::to_string)
        .collect::<Vec<String>>()
        .join(", ")
}

/// A compiled (sub-)schema.
#[derive(Debug)]
pub(crate) enum SchemaNode {
    Bool(bool),
    /// `$ref`, already flattened to its final target. Sibling keywords are ignored.
    Reference(NodeId),
    Keywords(KeywordSet),
}

/// Validators of a schema object, grouped by evaluation stage.
#[derive(Debug, Default)]
pub(crate) struct KeywordSet {
    pub(crate) type_: Option<BoxedValidator>,
    /// `allOf`, `anyOf`, `oneOf`, `not`, `if` and `const`, in this order.
    pub(crate) applicators: Validators,
    pub(crate) enum_: Option<BoxedValidator>,
    /// Kind-specific keywords; each of them ignores instances of other kinds.
    pub(crate) keywords: Validators,
}

impl KeywordSet {
    pub(crate) fn validate(
        &self,
        schema: &SchemaValidator,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        if let Some(type_) = &self.type_ {
            let before = context.error_count();
            type_.validate(schema, instance, instance_path, context);
            if context.error_count() > before {
                return;
            }
        }
        for validator in &self.applicators {
            validator.validate(schema, instance, instance_path, context);
        }
        if let Some(enum_) = &self.enum_ {
            // `enum` replaces the kind-specific checks
            enum_.validate(schema, instance, instance_path, context);
            return;
        }
        if matches!(instance, Value::Null | Value::Bool(_)) {
            return;
        }
        for validator in &self.keywords {
            validator.validate(schema, instance, instance_path, context);
        }
    }
}

/// A default value to be written into the instance once validation succeeds.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DefaultValue {
    pub(crate) location: Pointer,
    pub(crate) value: Value,
}

/// Per-call validation state.
#[derive(Debug)]
pub(crate) struct ValidationContext {
    errors: Vec<ValidationError>,
    defaults: Vec<DefaultValue>,
    collect_defaults: bool,
    depth: usize,
    aborted: Option<ValidationError>,
}

impl ValidationContext {
    pub(crate) fn new(collect_defaults: bool) -> Self {
        ValidationContext {
            errors: Vec::new(),
            defaults: Vec::new(),
            collect_defaults,
            depth: 0,
            aborted: None,
        }
    }

    #[inline]
    pub(crate) fn push_error(&mut self, error: ValidationError) {
        if self.aborted.is_none() {
            self.errors.push(error);
        }
    }

    #[inline]
    pub(crate) fn error_count(&self) -> usize {
        self.errors.len()
    }

    #[inline]
    pub(crate) fn is_aborted(&self) -> bool {
        self.aborted.is_some()
    }

    /// Stop the whole validation. Nothing recorded afterwards is kept.
    pub(crate) fn abort(&mut self, error: ValidationError) {
        if self.aborted.is_none() {
            self.aborted = Some(error);
        }
    }

    #[inline]
    pub(crate) fn collects_defaults(&self) -> bool {
        self.collect_defaults
    }

    pub(crate) fn push_default(&mut self, location: Pointer, value: Value) {
        if self.collect_defaults && self.aborted.is_none() {
            self.defaults.push(DefaultValue { location, value });
        }
    }

    /// Enter one level of schema nesting. Returns `false` once `max_depth` levels are active.
    #[inline]
    pub(crate) fn enter(&mut self, max_depth: usize) -> bool {
        if self.depth >= max_depth {
            return false;
        }
        self.depth += 1;
        true
    }

    #[inline]
    pub(crate) fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Run `f` as an isolated trial: whatever it records is discarded, only the outcome is kept.
    pub(crate) fn trial(&mut self, f: impl FnOnce(&mut ValidationContext)) -> bool {
        let errors = self.errors.len();
        let defaults = self.defaults.len();
        f(self);
        let valid = self.errors.len() == errors && self.aborted.is_none();
        self.errors.truncate(errors);
        self.defaults.truncate(defaults);
        valid
    }

    /// Collected defaults on success, every finding otherwise.
    pub(crate) fn finish(self) -> Result<Vec<DefaultValue>, Vec<ValidationError>> {
        let mut errors = self.errors;
        if let Some(error) = self.aborted {
            errors.push(error);
        }
        if errors.is_empty() {
            Ok(self.defaults)
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ValidationContext;
    use crate::{error::ValidationError, pointer::Pointer};
    use serde_json::json;

    #[test]
    fn trial_discards_findings() {
        let mut context = ValidationContext::new(true);
        context.push_error(ValidationError::any_of("/a".to_string()));
        let valid = context.trial(|context| {
            context.push_error(ValidationError::not("/b".to_string()));
            context.push_default(Pointer::root().join("x"), json!(1));
        });
        assert!(!valid);
        assert!(context.trial(|_| {}));
        let errors = context.finish().expect_err("Has errors");
        assert_eq!(errors, vec![ValidationError::any_of("/a".to_string())]);
    }

    #[test]
    fn abort_keeps_earlier_errors_only() {
        let mut context = ValidationContext::new(false);
        context.push_error(ValidationError::any_of("/".to_string()));
        context.abort(ValidationError::recursion_limit("/a".to_string(), 2));
        context.push_error(ValidationError::not("/".to_string()));
        assert!(!context.trial(|_| {}));
        let errors = context.finish().expect_err("Has errors");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[1].message(), "Maximum validation depth of 2 exceeded.");
    }

    #[test]
    fn depth_ceiling() {
        let mut context = ValidationContext::new(false);
        assert!(context.enter(1));
        assert!(!context.enter(1));
        context.leave();
        assert!(context.enter(1));
    }

    #[test]
    fn defaults_only_when_requested() {
        let mut context = ValidationContext::new(false);
        context.push_default(Pointer::root().join("x"), json!(1));
        assert_eq!(context.finish(), Ok(vec![]));
    }
}
