use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jsonschema_lite::{ExpansionOptions, Pointer, SchemaValidator, Uri};
use serde_json::{json, Value};

macro_rules! bench_validate {
    ($b:ident, $name:expr, $schema:tt, $data: tt) => {
        fn $b(c: &mut Criterion) {
            let schema = json!($schema);
            let validator = SchemaValidator::new(&schema).unwrap();
            let data = black_box(json!($data));
            c.bench_function($name, |b| b.iter(|| validator.is_valid(&data)));
        }
    };
}

macro_rules! bench_compile {
    ($b:ident, $name:expr, $schema:tt) => {
        fn $b(c: &mut Criterion) {
            let schema = black_box(json!($schema));
            c.bench_function($name, |b| b.iter(|| SchemaValidator::new(&schema)));
        }
    };
}

fn tree(depth: usize) -> Value {
    let mut node = json!({"value": 0});
    for value in 1..=depth {
        node = json!({"value": value, "children": [node.clone(), node]});
    }
    node
}

fn recursive_benchmark(c: &mut Criterion) {
    let schema = json!({
        "type": "object",
        "required": ["value"],
        "properties": {
            "value": {"type": "integer", "minimum": 0},
            "children": {"type": "array", "items": {"$ref": "#"}}
        }
    });
    let validator = SchemaValidator::new(&schema).unwrap();
    let data = black_box(tree(10));
    c.bench_function("recursive tree", |b| b.iter(|| validator.is_valid(&data)));
    c.bench_function("recursive tree errors", |b| {
        b.iter(|| validator.validate(&data))
    });
}

fn defaults_benchmark(c: &mut Criterion) {
    let schema = json!({
        "properties": {
            "host": {"default": "localhost"},
            "port": {"default": 8080},
            "tls": {"properties": {"enabled": {"default": false}}}
        }
    });
    let validator = SchemaValidator::new(&schema).unwrap();
    c.bench_function("expand defaults", |b| {
        b.iter(|| {
            let mut instance = json!({"tls": {}});
            validator.validate_and_expand(&mut instance, ExpansionOptions::with_defaults())
        })
    });
}

fn pointer_benchmark(c: &mut Criterion) {
    let document = black_box(tree(6));
    let pointer = Pointer::parse("/children/1/children/0/children/1/value").unwrap();
    c.bench_function("pointer get", |b| b.iter(|| pointer.get(&document)));
    c.bench_function("pointer parse", |b| {
        b.iter(|| Pointer::parse(black_box("/definitions/a~1b/properties/c~0d")))
    });
}

fn uri_benchmark(c: &mut Criterion) {
    let base = Uri::parse("http://example.com/schemas/v1/root.json").unwrap();
    let reference = Uri::parse("../common/types.json#/definitions/id").unwrap();
    c.bench_function("uri resolve", |b| {
        b.iter(|| black_box(&base).resolve(black_box(&reference)).to_string())
    });
}

bench_compile!(c_meta_schema_ref, "compile meta-schema reference", {"$ref": "http://json-schema.org/draft-07/schema#"});
bench_compile!(c_properties, "compile properties", {"properties": {"a": {"type": "string"}, "b": {"items": {"minimum": 1}}}});

bench_validate!(meta_schema_valid, "meta-schema valid", {"$ref": "http://json-schema.org/draft-07/schema#"}, {"type": "object", "properties": {"a": {"minLength": 1}}});
bench_validate!(additional_properties_valid, "additionalProperties valid", {"additionalProperties": false, "properties": {"foo": {}}}, {"foo": 1});
bench_validate!(additional_properties_invalid, "additionalProperties invalid", {"additionalProperties": false, "properties": {"foo": {}}}, {"foo": 1, "bar": 2});
bench_validate!(all_of_valid, "allOf valid", {"allOf": [{"type": "integer"}, {"minimum": 2}]}, 4);
bench_validate!(all_of_invalid, "allOf invalid", {"allOf": [{"type": "integer"}, {"minimum": 2}]}, 1);
bench_validate!(any_of_valid, "anyOf valid", {"anyOf": [{"type": "integer"}, {"minimum": 2}]}, 1);
bench_validate!(any_of_invalid, "anyOf invalid", {"anyOf": [{"type": "integer"}, {"minimum": 2}]}, 1.5);
bench_validate!(one_of_valid, "oneOf valid", {"oneOf": [{"type": "integer"}, {"minimum": 2}]}, 1);
bench_validate!(one_of_invalid, "oneOf invalid", {"oneOf": [{"type": "integer"}, {"minimum": 2}]}, 3);
bench_validate!(enum_valid, "enum valid", {"enum": [1, 2, 3, 4]}, 4);
bench_validate!(enum_invalid, "enum invalid", {"enum": [1, 2, 3, 4]}, 5);
bench_validate!(pattern_valid, "pattern valid", {"pattern": "A[0-9]{2}Z"}, "A11Z");
bench_validate!(pattern_invalid, "pattern invalid", {"pattern": "A[0-9]{2}Z"}, "A119");
bench_validate!(unique_items_valid, "uniqueItems valid", {"uniqueItems": true}, [1, 2, 3, 4, 5]);
bench_validate!(unique_items_invalid, "uniqueItems invalid", {"uniqueItems": true}, [1, 2, 3, 4, 1]);

criterion_group!(
    keywords,
    additional_properties_valid,
    additional_properties_invalid,
    all_of_valid,
    all_of_invalid,
    any_of_valid,
    any_of_invalid,
    one_of_valid,
    one_of_invalid,
    enum_valid,
    enum_invalid,
    pattern_valid,
    pattern_invalid,
    unique_items_valid,
    unique_items_invalid,
    meta_schema_valid,
);
criterion_group!(compilation, c_meta_schema_ref, c_properties);
criterion_group!(
    documents,
    recursive_benchmark,
    defaults_benchmark,
    pointer_benchmark,
    uri_benchmark
);
criterion_main!(keywords, compilation, documents);
