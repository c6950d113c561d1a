//! Schema compilation.
//! The resolved schema graph is compiled into an arena of nodes. Each node holds the validators
//! of one schema object; sub-schemas and `$ref` targets are addressed by their `NodeId`, so
//! recursive schemas compile to a finite graph.
pub(crate) mod context;
pub(crate) mod options;

use crate::{
    error::{SchemaError, ValidationError},
    graph::{Location, SchemaGraph},
    keywords::{self, helpers, CompileFunc},
    paths::InstancePath,
    pointer::Pointer,
    validator::{DefaultValue, KeywordSet, NodeId, SchemaNode, ValidationContext},
};
use ahash::AHashMap;
use context::CompilationContext;
use options::{ExpansionOptions, ValidatorOptions};
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::debug;

const APPLICATORS: &[(&str, CompileFunc)] = &[
    ("allOf", keywords::all_of::compile),
    ("anyOf", keywords::any_of::compile),
    ("oneOf", keywords::one_of::compile),
    ("not", keywords::not::compile),
    ("if", keywords::if_::compile),
    ("const", keywords::const_::compile),
];
const OBJECT_KEYWORDS: &[(&str, CompileFunc)] = &[
    ("required", keywords::required::compile),
    ("minProperties", keywords::min_properties::compile),
    ("maxProperties", keywords::max_properties::compile),
];
const ARRAY_KEYWORDS: &[(&str, CompileFunc)] = &[
    ("minItems", keywords::min_items::compile),
    ("maxItems", keywords::max_items::compile),
    ("items", keywords::items::compile),
    ("uniqueItems", keywords::unique_items::compile),
    ("contains", keywords::contains::compile),
];
const STRING_KEYWORDS: &[(&str, CompileFunc)] = &[
    ("minLength", keywords::min_length::compile),
    ("maxLength", keywords::max_length::compile),
    ("pattern", keywords::pattern::compile),
];
const NUMBER_KEYWORDS: &[(&str, CompileFunc)] = &[
    ("minimum", keywords::minimum::compile),
    ("exclusiveMinimum", keywords::exclusive_minimum::compile),
    ("maximum", keywords::maximum::compile),
    ("exclusiveMaximum", keywords::exclusive_maximum::compile),
    ("multipleOf", keywords::multiple_of::compile),
];

/// The structure that holds a JSON Schema compiled into a validation graph.
#[derive(Debug)]
pub struct SchemaValidator {
    nodes: Vec<SchemaNode>,
    root: NodeId,
    max_depth: usize,
    schema: Value,
}

impl SchemaValidator {
    /// Return a default `ValidatorOptions` that can configure
    /// `SchemaValidator` compilation flow.
    ///
    /// Using options you will be able to configure the validator to use:
    ///  - a sub-document of the schema as the entry point
    ///  - externally supplied documents for `$ref`
    ///  - no meta-schema validation of the schema
    ///  - a custom recursion ceiling
    #[must_use]
    pub fn options() -> ValidatorOptions {
        ValidatorOptions::default()
    }

    /// Compile the input schema with default options.
    ///
    /// # Errors
    ///
    /// Returns a `SchemaError` if the schema can not be used for validation.
    pub fn new(schema: &Value) -> Result<SchemaValidator, SchemaError> {
        Self::options().build(schema)
    }

    pub(crate) fn build(schema: Value, options: &ValidatorOptions) -> Result<SchemaValidator, SchemaError> {
        let graph = SchemaGraph::build(schema, options)?;
        let mut compiler = Compiler::new(&graph);
        let root = compiler.compile_location(graph.schema_root())?;
        let nodes = compiler.finish()?;
        debug!(nodes = nodes.len(), "Compiled schema");
        Ok(SchemaValidator {
            nodes,
            root,
            max_depth: options.max_depth(),
            schema: graph.into_document(),
        })
    }

    /// Run validation against `instance` and return every finding in the error case.
    /// Errors are ordered by discovery.
    ///
    /// # Errors
    ///
    /// Returns the list of findings if the instance is invalid.
    pub fn validate(&self, instance: &Value) -> Result<(), Vec<ValidationError>> {
        let mut context = ValidationContext::new(false);
        self.validate_node(self.root, instance, &InstancePath::new(), &mut context);
        context.finish().map(|_| ())
    }

    /// Run validation against `instance` but return a boolean result instead of the findings.
    #[must_use]
    #[inline]
    pub fn is_valid(&self, instance: &Value) -> bool {
        let mut context = ValidationContext::new(false);
        context.trial(|context| self.validate_node(self.root, instance, &InstancePath::new(), context))
    }

    /// Validate `instance` and, if it is valid, apply the expansions requested by `options`.
    /// An invalid instance is left untouched.
    ///
    /// ```rust
    /// # use jsonschema_lite::{ExpansionOptions, SchemaValidator};
    /// # use serde_json::json;
    /// let validator = SchemaValidator::new(&json!({
    ///     "properties": {"port": {"type": "integer", "default": 8080}}
    /// }))
    /// .expect("A valid schema");
    /// let mut instance = json!({});
    /// validator
    ///     .validate_and_expand(&mut instance, ExpansionOptions::with_defaults())
    ///     .expect("A valid instance");
    /// assert_eq!(instance, json!({"port": 8080}));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns the list of findings if the instance is invalid.
    pub fn validate_and_expand(
        &self,
        instance: &mut Value,
        options: ExpansionOptions,
    ) -> Result<(), Vec<ValidationError>> {
        let mut context = ValidationContext::new(options.add_defaults);
        self.validate_node(self.root, instance, &InstancePath::new(), &mut context);
        let defaults = context.finish()?;
        for DefaultValue { location, value } in defaults {
            apply_default(instance, &location, value)?;
        }
        Ok(())
    }

    /// The schema document this validator was built from.
    #[must_use]
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    pub(crate) fn validate_node(
        &self,
        node: NodeId,
        instance: &Value,
        instance_path: &InstancePath<'_>,
        context: &mut ValidationContext,
    ) {
        if context.is_aborted() {
            return;
        }
        if !context.enter(self.max_depth) {
            context.abort(ValidationError::recursion_limit(
                instance_path.to_string(),
                self.max_depth,
            ));
            return;
        }
        match &self.nodes[node.0] {
            SchemaNode::Bool(true) => {}
            SchemaNode::Bool(false) => {
                context.push_error(ValidationError::false_schema(instance_path.to_string()));
            }
            SchemaNode::Reference(target) => {
                self.validate_node(*target, instance, instance_path, context);
            }
            SchemaNode::Keywords(keywords) => {
                keywords.validate(self, instance, instance_path, context);
            }
        }
        context.leave();
    }
}

#[cfg(test)]
impl SchemaValidator {
    /// Debug representations of the root validators, in evaluation order.
    pub(crate) fn root_validators(&self) -> Vec<String> {
        match &self.nodes[self.root.0] {
            SchemaNode::Keywords(keywords) => keywords
                .type_
                .iter()
                .chain(&keywords.applicators)
                .chain(&keywords.enum_)
                .chain(&keywords.keywords)
                .map(|validator| format!("{:?}", validator))
                .collect(),
            node => vec![format!("{:?}", node)],
        }
    }
}

impl FromStr for SchemaValidator {
    type Err = SchemaError;

    /// Parse and compile the schema with default options.
    fn from_str(schema: &str) -> Result<Self, Self::Err> {
        Self::options().build_str(schema)
    }
}

fn apply_default(instance: &mut Value, location: &Pointer, value: Value) -> Result<(), Vec<ValidationError>> {
    // An enclosing default may already have supplied the member
    if location.get(instance).is_ok() {
        return Ok(());
    }
    location
        .set(instance, value)
        .map(|_| ())
        .map_err(|error| vec![ValidationError::pointer(location.to_string(), error)])
}

/// Compiles graph locations into arena nodes, each location at most once.
pub(crate) struct Compiler<'g> {
    graph: &'g SchemaGraph,
    nodes: Vec<Option<SchemaNode>>,
    memo: AHashMap<Location, NodeId>,
}

impl<'g> Compiler<'g> {
    fn new(graph: &'g SchemaGraph) -> Compiler<'g> {
        Compiler {
            graph,
            nodes: Vec::new(),
            memo: AHashMap::new(),
        }
    }

    pub(crate) fn graph(&self) -> &'g SchemaGraph {
        self.graph
    }

    pub(crate) fn compile_location(&mut self, location: &Location) -> Result<NodeId, SchemaError> {
        if let Some(id) = self.memo.get(location) {
            return Ok(*id);
        }
        // The slot is reserved before descending so that cycles through `$ref` terminate
        let id = NodeId(self.nodes.len());
        self.nodes.push(None);
        self.memo.insert(location.clone(), id);

        let graph = self.graph;
        let schema = graph.get(location).ok_or_else(|| {
            SchemaError::internal(ValidationError::invalid_schema(graph.describe(location)))
        })?;
        let node = match schema {
            Value::Bool(value) => SchemaNode::Bool(*value),
            Value::Object(object) if object.contains_key("$ref") => {
                let target = graph.target(location).ok_or_else(|| {
                    SchemaError::internal(ValidationError::unresolved_reference(
                        graph.describe(location),
                        object
                            .get("$ref")
                            .and_then(Value::as_str)
                            .unwrap_or_default(),
                    ))
                })?;
                SchemaNode::Reference(self.compile_location(target)?)
            }
            Value::Object(object) => {
                let mut context = CompilationContext::new(self, location.clone());
                SchemaNode::Keywords(compile_keywords(object, &mut context)?)
            }
            _ => {
                return Err(SchemaError::schema_validation(vec![
                    ValidationError::invalid_schema(graph.describe(location)),
                ]))
            }
        };
        self.nodes[id.0] = Some(node);
        Ok(id)
    }

    fn finish(self) -> Result<Vec<SchemaNode>, SchemaError> {
        self.nodes
            .into_iter()
            .enumerate()
            .map(|(idx, node)| {
                node.ok_or_else(|| {
                    SchemaError::internal(ValidationError::invalid_schema(NodeId(idx).to_string()))
                })
            })
            .collect()
    }
}

#[inline]
fn compile_group(
    group: &[(&str, CompileFunc)],
    schema: &Map<String, Value>,
    context: &mut CompilationContext<'_, '_>,
    validators: &mut keywords::Validators,
) -> Result<(), SchemaError> {
    for (keyword, compile) in group {
        if let Some(value) = schema.get(*keyword) {
            if let Some(validator) = compile(schema, value, context) {
                validators.push(validator?);
            }
        }
    }
    Ok(())
}

/// Compile the keywords of a schema object into their evaluation stages.
pub(crate) fn compile_keywords(
    schema: &Map<String, Value>,
    context: &mut CompilationContext<'_, '_>,
) -> Result<KeywordSet, SchemaError> {
    let mut keywords = KeywordSet::default();
    if let Some(value) = schema.get("type") {
        keywords.type_ = keywords::type_::compile(schema, value, context).transpose()?;
    }
    compile_group(APPLICATORS, schema, context, &mut keywords.applicators)?;
    if let Some(value) = schema.get("enum") {
        keywords.enum_ = keywords::enum_::compile(schema, value, context).transpose()?;
    }

    compile_group(OBJECT_KEYWORDS, schema, context, &mut keywords.keywords)?;
    if let Some(validator) = keywords::properties::compile_members(schema, context) {
        keywords.keywords.push(validator?);
    }
    for (keyword, compile) in ARRAY_KEYWORDS {
        if let Some(value) = schema.get(*keyword) {
            if let Some(validator) = compile(schema, value, context) {
                keywords.keywords.push(validator?);
            }
            // A single `items` schema ends the array checks
            if *keyword == "items" && !value.is_array() {
                break;
            }
        }
    }
    for (keyword, compile) in STRING_KEYWORDS {
        if let Some(value) = schema.get(*keyword) {
            if let Some(validator) = compile(schema, value, context) {
                keywords.keywords.push(validator?);
            }
            // A negative length limit ends the string checks
            if helpers::is_negative(value) {
                break;
            }
        }
    }
    compile_group(NUMBER_KEYWORDS, schema, context, &mut keywords.keywords)?;
    keywords.keywords.shrink_to_fit();
    Ok(keywords)
}

#[cfg(test)]
mod tests {
    use super::SchemaValidator;
    use crate::{
        error::{SchemaErrorKind, ValidationErrorKind},
        ExpansionOptions,
    };
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test]
    fn only_keyword() {
        let schema = json!({"type": "string"});
        let validator = SchemaValidator::new(&schema).expect("Valid schema");
        assert!(validator.validate(&json!("AB")).is_ok());
        assert!(validator.validate(&json!(1)).is_err());
    }

    #[test]
    fn wrong_schema_type() {
        let error = SchemaValidator::new(&json!([1])).expect_err("Invalid schema");
        assert_eq!(error.kind, SchemaErrorKind::SchemaValidation);
    }

    #[test]
    fn wrong_schema_type_without_meta_validation() {
        let error = SchemaValidator::options()
            .without_schema_validation()
            .build(&json!({"items": [1]}))
            .expect_err("Invalid schema");
        assert_eq!(error.kind, SchemaErrorKind::SchemaValidation);
        assert_eq!(error.errors[0].path, "/items/0");
        assert_eq!(error.errors[0].kind, ValidationErrorKind::InvalidSchema);
    }

    #[test]
    fn multiple_errors() {
        let schema = json!({"minProperties": 2, "propertyNames": {"minLength": 3}});
        let validator = SchemaValidator::new(&schema).expect("Valid schema");
        let errors = validator.validate(&json!({"a": 3})).expect_err("Invalid");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message(), "Object must have at least 2 properties.");
        assert_eq!(errors[1].message(), "String must be at least 3 characters long.");
        assert_eq!(errors[1].path, "");
    }

    #[test]
    fn recursive_schema_compiles_to_finite_graph() {
        let schema = json!({
            "type": "object",
            "properties": {"children": {"type": "array", "items": {"$ref": "#"}}}
        });
        let validator = SchemaValidator::new(&schema).expect("Valid schema");
        assert_eq!(validator.nodes.len(), 3);
        let instance = json!({"children": [{"children": []}, {"children": [{"children": 1}]}]});
        let errors = validator.validate(&instance).expect_err("Invalid");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "/children/1/children/0/children");
    }

    #[test]
    fn ref_siblings_are_ignored() {
        let schema = json!({
            "definitions": {"a": {"type": "integer"}},
            "properties": {"x": {"$ref": "#/definitions/a", "minimum": 10}}
        });
        let validator = SchemaValidator::new(&schema).expect("Valid schema");
        assert!(validator.is_valid(&json!({"x": 1})));
    }

    #[test]
    fn recursion_limit() {
        let schema = json!({"items": {"$ref": "#"}});
        let validator = SchemaValidator::options()
            .with_max_depth(3)
            .build(&schema)
            .expect("Valid schema");
        assert!(validator.is_valid(&json!([[]])));
        let errors = validator.validate(&json!([[[[]]]])).expect_err("Too deep");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].kind,
            ValidationErrorKind::RecursionLimit { limit: 3 }
        );
        assert_eq!(errors[0].path, "/0/0");
    }

    #[test]
    fn recursion_limit_is_not_masked_by_trials() {
        let schema = json!({"anyOf": [{"items": {"$ref": "#"}}, true]});
        let validator = SchemaValidator::options()
            .with_max_depth(4)
            .build(&schema)
            .expect("Valid schema");
        let errors = validator.validate(&json!([[[[[]]]]])).expect_err("Too deep");
        assert!(matches!(
            errors.last().map(|error| &error.kind),
            Some(ValidationErrorKind::RecursionLimit { .. })
        ));
    }

    #[test]
    fn from_str() {
        let validator: SchemaValidator = r#"{"maxLength": 2}"#.parse().expect("Valid schema");
        assert!(validator.is_valid(&json!("ab")));
        assert!(!validator.is_valid(&json!("abc")));
        let error = "{".parse::<SchemaValidator>().expect_err("Malformed");
        assert_eq!(error.kind, SchemaErrorKind::Parsing);
    }

    #[test]
    fn schema_is_kept() {
        let schema = json!({"const": 1});
        let validator = SchemaValidator::new(&schema).expect("Valid schema");
        assert_eq!(validator.schema(), &schema);
    }

    #[test_case(&json!({}), &json!({"a": 1, "b": {"c": "x"}}); "fills absent members")]
    #[test_case(&json!({"a": 5}), &json!({"a": 5, "b": {"c": "x"}}); "keeps present members")]
    #[test_case(&json!({"b": {}}), &json!({"a": 1, "b": {"c": "z"}}); "fills nested members")]
    #[test_case(&json!({"b": {"c": "y"}}), &json!({"a": 1, "b": {"c": "y"}}); "keeps nested members")]
    fn defaults(instance: &Value, expected: &Value) {
        let schema = json!({
            "properties": {
                "a": {"default": 1},
                "b": {"default": {"c": "x"}, "properties": {"c": {"default": "z"}}}
            }
        });
        let validator = SchemaValidator::new(&schema).expect("Valid schema");
        let mut instance = instance.clone();
        validator
            .validate_and_expand(&mut instance, ExpansionOptions::with_defaults())
            .expect("Valid instance");
        assert_eq!(&instance, expected);
    }

    #[test]
    fn defaults_are_not_applied_to_invalid_instances() {
        let schema = json!({
            "properties": {"a": {"default": 1}},
            "required": ["b"]
        });
        let validator = SchemaValidator::new(&schema).expect("Valid schema");
        let mut instance = json!({});
        assert!(validator
            .validate_and_expand(&mut instance, ExpansionOptions::with_defaults())
            .is_err());
        assert_eq!(instance, json!({}));
    }

    #[test]
    fn defaults_of_failed_trials_are_dropped() {
        let schema = json!({
            "anyOf": [
                {"properties": {"a": {"default": 1}}, "required": ["missing"]},
                {"properties": {"b": {"default": 2}}}
            ]
        });
        let validator = SchemaValidator::new(&schema).expect("Valid schema");
        let mut instance = json!({});
        validator
            .validate_and_expand(&mut instance, ExpansionOptions::with_defaults())
            .expect("Valid instance");
        // `anyOf` branches are trials, nothing they collect survives
        assert_eq!(instance, json!({}));
    }

    #[test]
    fn defaults_are_opt_in() {
        let schema = json!({"properties": {"a": {"default": 1}}});
        let validator = SchemaValidator::new(&schema).expect("Valid schema");
        let mut instance = json!({});
        validator
            .validate_and_expand(&mut instance, ExpansionOptions::default())
            .expect("Valid instance");
        assert_eq!(instance, json!({}));
    }
}
