use jsonschema_lite::{Pointer, PointerError};
use serde_json::{json, Value};
use test_case::test_case;

fn document() -> Value {
    json!({
        "users": [
            {"name": "ann", "tags": ["a", "b"]},
            {"name": "bob", "tags": []}
        ],
        "a/b": {"m~n": 1}
    })
}

#[test_case("", &document())]
#[test_case("/users/1/name", &json!("bob"))]
#[test_case("/users/0/tags/1", &json!("b"))]
#[test_case("/a~1b/m~0n", &json!(1))]
fn lookups(pointer: &str, expected: &Value) {
    let pointer = Pointer::parse(pointer).expect("Valid pointer");
    assert_eq!(pointer.get(&document()), Ok(expected));
}

#[test_case("users", "users")]
#[test_case("/a~2", "a~2")]
fn malformed(input: &str, token: &str) {
    let error = Pointer::parse(input).expect_err("Malformed pointer");
    assert!(error.is_parse_error());
    assert!(error.to_string().contains(token));
}

#[test_case("/users/2")]
#[test_case("/users/01")]
#[test_case("/users/-")]
#[test_case("/nobody")]
#[test_case("/users/0/name/x")]
fn unreachable(input: &str) {
    let pointer = Pointer::parse(input).expect("Valid pointer");
    assert!(pointer.get(&document()).is_err());
}

#[test]
fn editing_session() {
    let mut document = document();
    let tags = Pointer::parse("/users/1/tags/-").expect("Valid pointer");
    tags.insert(&mut document, json!("new")).expect("Appended");
    assert_eq!(document["users"][1]["tags"], json!(["new"]));

    let first = Pointer::parse("/users/0").expect("Valid pointer");
    let removed = first.erase(&mut document).expect("Removed");
    assert_eq!(removed["name"], json!("ann"));
    assert_eq!(document["users"][0]["name"], json!("bob"));

    let name = Pointer::parse("/users/0/name").expect("Valid pointer");
    let previous = name.replace(&mut document, json!("carl")).expect("Replaced");
    assert_eq!(previous, json!("bob"));

    let email = Pointer::parse("/users/0/email").expect("Valid pointer");
    assert_eq!(email.set(&mut document, json!("c@example.com")), Ok(None));
    assert_eq!(
        email.set(&mut document, json!("carl@example.com")),
        Ok(Some(json!("c@example.com")))
    );
    assert!(matches!(
        email.insert(&mut document, json!("x")),
        Err(PointerError::MemberExists { .. })
    ));
}

#[test]
fn suffix_operations() {
    let pointer = Pointer::parse("/ignored/users/0/name").expect("Valid pointer");
    let suffix = pointer.suffix(1).expect("In range");
    assert_eq!(suffix.get(&document()), Ok(&json!("ann")));
    assert!(matches!(
        pointer.suffix(5),
        Err(PointerError::StartIndexOutOfRange { start: 5, len: 4 })
    ));
    assert_eq!(pointer.suffix(4).expect("In range").get(&document()), Ok(&document()));
}

#[test]
fn fragments_decode_percent_escapes() {
    let pointer = Pointer::parse_fragment("#/a~1b/m~0n").expect("Valid fragment");
    assert_eq!(pointer.get(&document()), Ok(&json!(1)));
    let pointer = Pointer::parse_fragment("#/users/0/na%6De").expect("Valid fragment");
    assert_eq!(pointer.get(&document()), Ok(&json!("ann")));
}
