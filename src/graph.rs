//! The id/reference graph of a schema.
//!
//! Every schema is addressed by its [`Location`]: a document index and a JSON Pointer into that
//! document. Document 0 is the schema passed by the caller; the others are supplied separately
//! and are known by their URIs.
use crate::{
    compilation::options::ValidatorOptions,
    error::{SchemaError, ValidationError},
    meta,
    pointer::Pointer,
    uri::Uri,
};
use ahash::{AHashMap, AHashSet};
use serde_json::Value;
use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet},
};
use tracing::{debug, trace};

/// Members holding a single schema.
const SCHEMA_MEMBERS: &[&str] = &[
    "additionalItems",
    "additionalProperties",
    "contains",
    "else",
    "if",
    "items",
    "not",
    "propertyNames",
    "then",
];
/// Members holding an array of schemas.
const SCHEMA_ARRAY_MEMBERS: &[&str] = &["allOf", "anyOf", "items", "oneOf"];
/// Members holding a map of named schemas.
const SCHEMA_MAP_MEMBERS: &[&str] = &["definitions", "dependencies", "patternProperties", "properties"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct Location {
    pub(crate) document: usize,
    pub(crate) pointer: Pointer,
}

impl Location {
    pub(crate) fn new(document: usize, pointer: Pointer) -> Location {
        Location { document, pointer }
    }
    pub(crate) fn root(document: usize) -> Location {
        Location::new(document, Pointer::root())
    }
    pub(crate) fn join(&self, token: impl Into<String>) -> Location {
        Location::new(self.document, self.pointer.join(token))
    }
}

#[derive(Debug)]
pub(crate) struct Document {
    /// Base URI without fragment. Empty for the main document.
    base: Uri,
    value: Value,
    /// Documents shipped with the crate are known to be valid.
    builtin: bool,
}

/// Resolved schema graph: every `$ref` is bound to its final, non-`$ref` target.
#[derive(Debug)]
pub(crate) struct SchemaGraph {
    documents: Vec<Document>,
    schema_root: Location,
    refs: AHashMap<Location, Location>,
}

impl SchemaGraph {
    pub(crate) fn build(schema: Value, options: &ValidatorOptions) -> Result<SchemaGraph, SchemaError> {
        let documents = collect_documents(schema, options)?;
        let schema_pointer = match options.schema_pointer() {
            Some(pointer) => Pointer::parse(pointer)
                .map_err(|error| SchemaError::pointer(ValidationError::pointer("", error)))?,
            None => Pointer::root(),
        };
        if let Err(error) = schema_pointer.get(&documents[0].value) {
            return Err(SchemaError::pointer(ValidationError::pointer("", error)));
        }
        let schema_root = Location::new(0, schema_pointer);

        // Starting points of the walk
        let mut roots = vec![schema_root.clone()];
        if !schema_root.pointer.is_empty() {
            if let Some(Value::Object(definitions)) = documents[0].value.get("definitions") {
                let location = Location::root(0).join("definitions");
                roots.extend(definitions.keys().map(|name| location.join(name.as_str())));
            }
        }
        roots.extend((1..documents.len()).map(Location::root));

        if options.validates_schema() {
            let mut errors = Vec::new();
            for (idx, root) in roots.iter().enumerate() {
                let document = &documents[root.document];
                if document.builtin {
                    continue;
                }
                let prefix = if idx == 0 {
                    root.pointer.to_string()
                } else {
                    describe(&documents, root)
                };
                errors.extend(validate_location(&documents, root, &prefix)?);
            }
            if !errors.is_empty() {
                return Err(SchemaError::schema_validation(errors));
            }
        }

        let mut index = Index::default();
        // The root `$id` must be known even if the root itself is not walked
        if let Value::Object(root) = &documents[0].value {
            if let (false, Some(Value::String(id))) = (root.contains_key("$ref"), root.get("$id")) {
                let scope = resolve_id(&Uri::new(), id).map_err(|error| {
                    SchemaError::pointer(ValidationError::uri("/$id", error))
                })?;
                index.register(scope.as_str(), &Location::root(0));
            }
        }
        for (idx, document) in documents.iter().enumerate().skip(1) {
            index.register(document.base.as_str(), &Location::root(idx));
        }
        for pass in [Pass::Ids, Pass::Refs] {
            for root in &roots {
                let base = base_uri_of(&documents, root)?;
                index.walk(&documents, root, &base, pass)?;
            }
        }
        debug!(
            ids = index.ids.len(),
            refs = index.refs.len(),
            schemas = index.sub_schemata.len(),
            "Collected schema ids and references"
        );

        // Schemas reachable only through `$ref` are validated and walked until nothing new shows up
        loop {
            let pending: BTreeSet<Location> = index
                .refs
                .values()
                .filter(|target| !index.sub_schemata.contains(*target))
                .cloned()
                .collect();
            if pending.is_empty() {
                break;
            }
            debug!(count = pending.len(), "Walking schemas reached through $ref");
            if options.validates_schema() {
                let mut errors = Vec::new();
                for target in &pending {
                    if !documents[target.document].builtin {
                        let prefix = describe(&documents, target);
                        errors.extend(validate_location(&documents, target, &prefix)?);
                    }
                }
                if !errors.is_empty() {
                    return Err(SchemaError::schema_validation(errors));
                }
            }
            for pass in [Pass::Ids, Pass::Refs] {
                for target in &pending {
                    let base = base_uri_of(&documents, target)?;
                    index.walk(&documents, target, &base, pass)?;
                }
            }
        }

        let refs = flatten(&documents, &index.refs)?;
        debug!(refs = refs.len(), "Flattened reference chains");
        Ok(SchemaGraph {
            documents,
            schema_root,
            refs,
        })
    }

    pub(crate) fn schema_root(&self) -> &Location {
        &self.schema_root
    }

    pub(crate) fn get(&self, location: &Location) -> Option<&Value> {
        self.documents
            .get(location.document)
            .and_then(|document| location.pointer.get(&document.value).ok())
    }

    /// Final target of the `$ref` at `location`.
    pub(crate) fn target(&self, location: &Location) -> Option<&Location> {
        self.refs.get(location)
    }

    pub(crate) fn describe(&self, location: &Location) -> String {
        describe(&self.documents, location)
    }

    /// The caller's schema document.
    pub(crate) fn into_document(mut self) -> Value {
        self.documents.swap_remove(0).value
    }
}

fn collect_documents(schema: Value, options: &ValidatorOptions) -> Result<Vec<Document>, SchemaError> {
    let mut documents = vec![Document {
        base: Uri::new(),
        value: schema,
        builtin: false,
    }];
    for (uri, value) in options.documents() {
        let base = Uri::parse(uri)
            .map_err(|error| SchemaError::pointer(ValidationError::uri("", error)))?
            .without_fragment();
        documents.push(Document {
            base,
            value: value.clone(),
            builtin: false,
        });
    }
    let main_id = match documents[0].value.get("$id") {
        Some(Value::String(id)) => Uri::parse(id).ok().map(|id| id.without_fragment()),
        _ => None,
    };
    let knows_meta_schema = main_id.as_ref().map_or(false, |id| id.as_str() == meta::DRAFT7_URI)
        || documents
            .iter()
            .any(|document| document.base.as_str() == meta::DRAFT7_URI);
    if !knows_meta_schema {
        let base = Uri::parse(meta::DRAFT7_URI)
            .map_err(|error| SchemaError::internal(ValidationError::uri("", error)))?;
        documents.push(Document {
            base,
            value: meta::DRAFT7.clone(),
            builtin: true,
        });
    }
    Ok(documents)
}

/// Human-readable location: the pointer for the main document, `uri#pointer` for the others.
fn describe(documents: &[Document], location: &Location) -> String {
    if location.document == 0 {
        location.pointer.to_string()
    } else {
        format!("{}#{}", documents[location.document].base, location.pointer)
    }
}

fn value_at<'d>(documents: &'d [Document], location: &Location) -> Result<&'d Value, SchemaError> {
    let document = documents.get(location.document).ok_or_else(|| {
        SchemaError::internal(ValidationError::invalid_schema(describe(documents, location)))
    })?;
    location
        .pointer
        .get(&document.value)
        .map_err(|error| SchemaError::internal(ValidationError::pointer(describe(documents, location), error)))
}

fn validate_location(
    documents: &[Document],
    location: &Location,
    prefix: &str,
) -> Result<Vec<ValidationError>, SchemaError> {
    let schema = value_at(documents, location)?;
    Ok(meta::validate_schema(schema)
        .into_iter()
        .map(|error| error.with_prefix(prefix))
        .collect())
}

/// Resolve `$id` against `base`. An empty fragment is dropped.
fn resolve_id(base: &Uri, id: &str) -> Result<Uri, crate::error::UriError> {
    let mut scope = base.resolve(&Uri::parse(id)?);
    if scope.fragment() == Some("") {
        scope.clear_fragment();
    }
    Ok(scope)
}

/// Base URI in effect at `location`, built from the `$id`s of its ancestors.
fn base_uri_of(documents: &[Document], location: &Location) -> Result<Uri, SchemaError> {
    let document = &documents[location.document];
    let mut base = document.base.clone();
    for ancestor in location.pointer.ancestors().take(location.pointer.len()) {
        if let Ok(Value::Object(schema)) = ancestor.get(&document.value) {
            if schema.contains_key("$ref") {
                continue;
            }
            if let Some(Value::String(id)) = schema.get("$id") {
                base = resolve_id(&base, id).map_err(|error| {
                    let path = describe(documents, &Location::new(location.document, ancestor.join("$id")));
                    SchemaError::pointer(ValidationError::uri(path, error))
                })?;
            }
        }
    }
    Ok(base)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Ids,
    Refs,
}

/// Working sets that exist only while the graph is being built.
#[derive(Debug, Default)]
struct Index {
    ids: AHashMap<String, Location>,
    refs: BTreeMap<Location, Location>,
    sub_schemata: AHashSet<Location>,
}

impl Index {
    fn register(&mut self, id: &str, location: &Location) {
        trace!(id, "Registering schema id");
        self.ids
            .entry(id.to_string())
            .or_insert_with(|| location.clone());
    }

    fn walk(
        &mut self,
        documents: &[Document],
        location: &Location,
        base: &Uri,
        pass: Pass,
    ) -> Result<(), SchemaError> {
        let value = value_at(documents, location)?;
        self.walk_value(documents, value, location, base, pass)
    }

    fn walk_value(
        &mut self,
        documents: &[Document],
        value: &Value,
        location: &Location,
        base: &Uri,
        pass: Pass,
    ) -> Result<(), SchemaError> {
        if pass == Pass::Ids {
            self.sub_schemata.insert(location.clone());
        }
        let schema = match value {
            Value::Object(schema) => schema,
            _ => return Ok(()),
        };
        let mut base = Cow::Borrowed(base);
        if let Some(reference) = schema.get("$ref") {
            if pass == Pass::Refs {
                let target = self.resolve_reference(documents, reference, location, &base)?;
                self.refs.insert(location.clone(), target);
            }
        } else if let Some(Value::String(id)) = schema.get("$id") {
            let scope = resolve_id(&base, id).map_err(|error| {
                SchemaError::pointer(ValidationError::uri(
                    describe(documents, &location.join("$id")),
                    error,
                ))
            })?;
            if pass == Pass::Ids {
                self.register(scope.as_str(), location);
            }
            base = Cow::Owned(scope);
        }
        for keyword in SCHEMA_MEMBERS {
            if let Some(subschema @ Value::Object(_)) = schema.get(*keyword) {
                self.walk_value(documents, subschema, &location.join(*keyword), &base, pass)?;
            }
        }
        for keyword in SCHEMA_ARRAY_MEMBERS {
            if let Some(Value::Array(items)) = schema.get(*keyword) {
                let parent = location.join(*keyword);
                for (idx, item) in items.iter().enumerate() {
                    let location = parent.join(itoa::Buffer::new().format(idx));
                    self.walk_value(documents, item, &location, &base, pass)?;
                }
            }
        }
        for keyword in SCHEMA_MAP_MEMBERS {
            if let Some(Value::Object(members)) = schema.get(*keyword) {
                let parent = location.join(*keyword);
                for (name, member) in members {
                    // `dependencies` may hold arrays of property names
                    if member.is_array() {
                        continue;
                    }
                    self.walk_value(documents, member, &parent.join(name.as_str()), &base, pass)?;
                }
            }
        }
        Ok(())
    }

    fn resolve_reference(
        &self,
        documents: &[Document],
        reference: &Value,
        location: &Location,
        base: &Uri,
    ) -> Result<Location, SchemaError> {
        let path = describe(documents, &location.join("$ref"));
        let reference = match reference {
            Value::String(reference) => reference,
            _ => {
                return Err(SchemaError::schema_validation(vec![
                    ValidationError::invalid_keyword(path, "$ref"),
                ]))
            }
        };
        let parsed = Uri::parse(reference)
            .map_err(|error| SchemaError::pointer(ValidationError::uri(path.clone(), error)))?;
        let mut uri = base.resolve(&parsed);
        let resolved = uri.as_str().to_string();
        let mut fragment = None;
        match uri.fragment().map(str::to_string).as_deref() {
            Some("") => uri.clear_fragment(),
            Some(pointer) if pointer.starts_with('/') => {
                fragment = Some(Pointer::parse(pointer).map_err(|error| {
                    SchemaError::pointer(ValidationError::pointer(path.clone(), error))
                })?);
                uri.clear_fragment();
            }
            // A plain-name fragment stays part of the id to look up
            _ => {}
        }
        let document = if uri.is_empty() {
            Location::root(0)
        } else {
            match self.ids.get(uri.as_str()) {
                Some(location) => location.clone(),
                None => {
                    return Err(SchemaError::pointer(ValidationError::unresolved_reference(
                        path, resolved,
                    )))
                }
            }
        };
        let target = match fragment {
            Some(pointer) => Location::new(document.document, document.pointer.concat(&pointer)),
            None => document,
        };
        if let Err(error) = value_at(documents, &target) {
            return match error.errors.into_iter().next() {
                Some(cause) => Err(SchemaError::pointer(ValidationError::new(path, cause.kind))),
                None => Err(SchemaError::pointer(ValidationError::unresolved_reference(
                    path, resolved,
                ))),
            };
        }
        trace!(
            reference = resolved.as_str(),
            location = %describe(documents, &target),
            "Recorded reference"
        );
        Ok(target)
    }
}

fn has_reference(documents: &[Document], location: &Location) -> bool {
    matches!(value_at(documents, location), Ok(Value::Object(schema)) if schema.contains_key("$ref"))
}

fn reference_of(documents: &[Document], location: &Location) -> String {
    match value_at(documents, location) {
        Ok(Value::Object(schema)) => match schema.get("$ref") {
            Some(Value::String(reference)) => reference.clone(),
            _ => String::new(),
        },
        _ => String::new(),
    }
}

/// Bind every `$ref` directly to the end of its chain.
fn flatten(
    documents: &[Document],
    refs: &BTreeMap<Location, Location>,
) -> Result<AHashMap<Location, Location>, SchemaError> {
    let mut resolved = AHashMap::with_capacity(refs.len());
    for (source, first) in refs {
        if resolved.contains_key(source) {
            continue;
        }
        let mut seen = AHashSet::new();
        seen.insert(source.clone());
        let mut target = first.clone();
        while has_reference(documents, &target) {
            if seen.contains(&target) {
                return Err(SchemaError::schema_validation(vec![
                    ValidationError::reference_cycle(
                        describe(documents, source),
                        reference_of(documents, source),
                    ),
                ]));
            }
            seen.insert(target.clone());
            target = match refs.get(&target) {
                Some(next) => next.clone(),
                None => {
                    return Err(SchemaError::internal(ValidationError::unresolved_reference(
                        describe(documents, &target),
                        reference_of(documents, &target),
                    )))
                }
            };
        }
        if seen.len() > 1 {
            trace!(
                length = seen.len(),
                location = %describe(documents, &target),
                "Flattened reference chain"
            );
        }
        for location in seen {
            resolved.insert(location, target.clone());
        }
    }
    Ok(resolved)
}
