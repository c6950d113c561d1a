//! JSON Pointers (RFC 6901) and operations on the documents they address.
use crate::{error::PointerError, uri::percent_decode};
use serde_json::Value;
use std::{borrow::Cow, fmt, iter::FromIterator, mem, str::FromStr};

/// A parsed JSON Pointer: a sequence of unescaped reference tokens.
///
/// The empty pointer addresses the whole document.
///
/// ```rust
/// use jsonschema_lite::Pointer;
/// use serde_json::json;
///
/// let pointer = Pointer::parse("/a~1b/1").expect("Valid pointer");
/// let document = json!({"a/b": [0, 42]});
/// assert_eq!(pointer.get(&document), Ok(&json!(42)));
/// assert_eq!(pointer.to_string(), "/a~1b/1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pointer {
    tokens: Vec<String>,
}

/// Escape a single reference token. `~` is escaped before `/`.
#[must_use]
pub fn escape(token: &str) -> Cow<'_, str> {
    if token.contains(['~', '/']) {
        Cow::Owned(token.replace('~', "~0").replace('/', "~1"))
    } else {
        Cow::Borrowed(token)
    }
}

fn unescape(token: &str) -> Result<String, PointerError> {
    if !token.contains('~') {
        return Ok(token.to_string());
    }
    let mut unescaped = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        if c == '~' {
            match chars.next() {
                Some('0') => unescaped.push('~'),
                Some('1') => unescaped.push('/'),
                _ => return Err(PointerError::invalid_escape(token)),
            }
        } else {
            unescaped.push(c);
        }
    }
    Ok(unescaped)
}

/// Parse an array index. In growing mode `-` and the current length address the append position.
fn parse_array_index(token: &str, len: usize, growing: bool) -> Result<usize, PointerError> {
    if growing && token == "-" {
        return Ok(len);
    }
    if token.is_empty()
        || !token.bytes().all(|byte| byte.is_ascii_digit())
        || (token.len() > 1 && token.starts_with('0'))
    {
        return Err(PointerError::invalid_index(token));
    }
    let idx: usize = token
        .parse()
        .map_err(|_| PointerError::invalid_index(token))?;
    if idx > len || (idx == len && !growing) {
        Err(PointerError::index_out_of_range(token, len))
    } else {
        Ok(idx)
    }
}

impl Pointer {
    /// The pointer to the document root.
    #[must_use]
    pub fn root() -> Pointer {
        Pointer::default()
    }

    /// Parse a pointer in its plain string form, e.g. `/definitions/a`.
    ///
    /// # Errors
    ///
    /// Fails if a non-empty pointer doesn't begin with `/` or contains an invalid `~` escape.
    pub fn parse(pointer: &str) -> Result<Pointer, PointerError> {
        if pointer.is_empty() {
            return Ok(Pointer::root());
        }
        let rest = pointer
            .strip_prefix('/')
            .ok_or_else(|| PointerError::missing_leading_slash(pointer))?;
        let tokens = rest.split('/').map(unescape).collect::<Result<_, _>>()?;
        Ok(Pointer { tokens })
    }

    /// Parse a pointer in its URI fragment form, e.g. `#/a%20b`. `+` stands for a space.
    ///
    /// # Errors
    ///
    /// Fails if the fragment doesn't begin with `#`, has an invalid `%` escape or the decoded
    /// pointer is malformed.
    pub fn parse_fragment(fragment: &str) -> Result<Pointer, PointerError> {
        let encoded = fragment
            .strip_prefix('#')
            .ok_or_else(|| PointerError::missing_hash(fragment))?;
        let decoded = percent_decode(&encoded.replace('+', " "))
            .map_err(|_| PointerError::invalid_percent_encoding(fragment))?;
        Pointer::parse(&decoded)
    }

    /// Number of reference tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether this pointer addresses the document root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
    }

    /// A new pointer with `token` appended.
    #[must_use]
    pub fn join(&self, token: impl Into<String>) -> Pointer {
        let mut pointer = self.clone();
        pointer.push(token);
        pointer
    }

    /// A new pointer with all tokens of `other` appended.
    #[must_use]
    pub fn concat(&self, other: &Pointer) -> Pointer {
        let mut pointer = self.clone();
        pointer.tokens.extend(other.tokens.iter().cloned());
        pointer
    }

    /// Whether `self` is `other` or one of its descendants.
    #[must_use]
    pub fn starts_with(&self, other: &Pointer) -> bool {
        self.tokens.starts_with(&other.tokens)
    }

    /// All pointers from the root down to and including `self`.
    pub fn ancestors(&self) -> impl Iterator<Item = Pointer> + '_ {
        (0..=self.tokens.len()).map(move |len| Pointer {
            tokens: self.tokens[..len].to_vec(),
        })
    }

    /// View of the tokens starting at `start`. Operations on the view treat the token at
    /// `start` as the first one.
    ///
    /// # Errors
    ///
    /// Fails if `start` is past the end of the pointer.
    pub fn suffix(&self, start: usize) -> Result<PointerSuffix<'_>, PointerError> {
        self.tokens
            .get(start..)
            .map(|tokens| PointerSuffix { tokens })
            .ok_or(PointerError::StartIndexOutOfRange {
                start,
                len: self.tokens.len(),
            })
    }

    #[inline]
    fn full(&self) -> PointerSuffix<'_> {
        PointerSuffix {
            tokens: &self.tokens,
        }
    }

    /// The value this pointer addresses.
    ///
    /// # Errors
    ///
    /// Fails if the location does not exist.
    pub fn get<'v>(&self, root: &'v Value) -> Result<&'v Value, PointerError> {
        self.full().get(root)
    }

    /// The value this pointer addresses, mutably.
    ///
    /// # Errors
    ///
    /// Fails if the location does not exist.
    pub fn get_mut<'v>(&self, root: &'v mut Value) -> Result<&'v mut Value, PointerError> {
        self.full().get_mut(root)
    }

    /// Remove the addressed value from its parent and return it.
    ///
    /// # Errors
    ///
    /// Fails if the location does not exist or the pointer addresses the root.
    pub fn erase(&self, root: &mut Value) -> Result<Value, PointerError> {
        self.full().erase(root)
    }

    /// Insert `value` at the addressed location. Array elements at and after the index shift right.
    ///
    /// # Errors
    ///
    /// Fails if an object member already exists, the array index is past the append position or
    /// the pointer addresses the root.
    pub fn insert(&self, root: &mut Value, value: Value) -> Result<(), PointerError> {
        self.full().insert(root, value)
    }

    /// Replace the existing value at the addressed location and return the previous one.
    ///
    /// # Errors
    ///
    /// Fails if the location does not exist.
    pub fn replace(&self, root: &mut Value, value: Value) -> Result<Value, PointerError> {
        self.full().replace(root, value)
    }

    /// Store `value` at the addressed location, creating it if needed. Returns the previous value.
    ///
    /// # Errors
    ///
    /// Fails if the parent does not exist or is a scalar.
    pub fn set(&self, root: &mut Value, value: Value) -> Result<Option<Value>, PointerError> {
        self.full().set(root, value)
    }
}

/// A pointer addressed from a given start index. See [`Pointer::suffix`].
#[derive(Debug, Clone, Copy)]
pub struct PointerSuffix<'p> {
    tokens: &'p [String],
}

fn step<'v>(node: &'v Value, token: &str) -> Result<&'v Value, PointerError> {
    match node {
        Value::Array(items) => {
            let idx = parse_array_index(token, items.len(), false)?;
            items
                .get(idx)
                .ok_or_else(|| PointerError::index_out_of_range(token, items.len()))
        }
        Value::Object(map) => map
            .get(token)
            .ok_or_else(|| PointerError::member_not_found(token)),
        _ => Err(PointerError::scalar_access(token)),
    }
}

fn step_mut<'v>(node: &'v mut Value, token: &str) -> Result<&'v mut Value, PointerError> {
    match node {
        Value::Array(items) => {
            let len = items.len();
            let idx = parse_array_index(token, len, false)?;
            items
                .get_mut(idx)
                .ok_or_else(|| PointerError::index_out_of_range(token, len))
        }
        Value::Object(map) => map
            .get_mut(token)
            .ok_or_else(|| PointerError::member_not_found(token)),
        _ => Err(PointerError::scalar_access(token)),
    }
}

impl<'p> PointerSuffix<'p> {
    pub fn get<'v>(&self, root: &'v Value) -> Result<&'v Value, PointerError> {
        self.tokens
            .iter()
            .try_fold(root, |node, token| step(node, token))
    }

    pub fn get_mut<'v>(&self, root: &'v mut Value) -> Result<&'v mut Value, PointerError> {
        self.tokens
            .iter()
            .try_fold(root, |node, token| step_mut(node, token))
    }

    /// The parent container of the addressed location and the last token.
    fn parent_mut<'v>(
        &self,
        root: &'v mut Value,
    ) -> Result<(&'v mut Value, &'p str), PointerError> {
        let (last, parents) = self.tokens.split_last().ok_or(PointerError::RootAccess)?;
        let parent = PointerSuffix { tokens: parents }.get_mut(root)?;
        Ok((parent, last.as_str()))
    }

    pub fn erase(&self, root: &mut Value) -> Result<Value, PointerError> {
        match self.parent_mut(root)? {
            (Value::Array(items), token) => {
                let idx = parse_array_index(token, items.len(), false)?;
                Ok(items.remove(idx))
            }
            (Value::Object(map), token) => map
                .shift_remove(token)
                .ok_or_else(|| PointerError::member_not_found(token)),
            (_, token) => Err(PointerError::scalar_access(token)),
        }
    }

    pub fn insert(&self, root: &mut Value, value: Value) -> Result<(), PointerError> {
        match self.parent_mut(root)? {
            (Value::Array(items), token) => {
                let idx = parse_array_index(token, items.len(), true)?;
                items.insert(idx, value);
                Ok(())
            }
            (Value::Object(map), token) => {
                if map.contains_key(token) {
                    return Err(PointerError::member_exists(token));
                }
                map.insert(token.to_string(), value);
                Ok(())
            }
            (_, token) => Err(PointerError::scalar_access(token)),
        }
    }

    pub fn replace(&self, root: &mut Value, value: Value) -> Result<Value, PointerError> {
        if self.tokens.is_empty() {
            return Ok(mem::replace(root, value));
        }
        let target = self.get_mut(root)?;
        Ok(mem::replace(target, value))
    }

    pub fn set(&self, root: &mut Value, value: Value) -> Result<Option<Value>, PointerError> {
        if self.tokens.is_empty() {
            return Ok(Some(mem::replace(root, value)));
        }
        match self.parent_mut(root)? {
            (Value::Array(items), token) => {
                let idx = parse_array_index(token, items.len(), true)?;
                if idx == items.len() {
                    items.push(value);
                    Ok(None)
                } else {
                    Ok(Some(mem::replace(&mut items[idx], value)))
                }
            }
            (Value::Object(map), token) => Ok(map.insert(token.to_string(), value)),
            (_, token) => Err(PointerError::scalar_access(token)),
        }
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str("/")?;
            f.write_str(&escape(token))?;
        }
        Ok(())
    }
}

impl FromStr for Pointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pointer::parse(s)
    }
}

impl<S: Into<String>> FromIterator<S> for Pointer {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Pointer {
            tokens: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn rfc_document() -> Value {
        json!({
            "foo": ["bar", "baz"],
            "": 0,
            "a/b": 1,
            "c%d": 2,
            "e^f": 3,
            "g|h": 4,
            "i\\j": 5,
            "k\"l": 6,
            " ": 7,
            "m~n": 8
        })
    }

    // RFC 6901, section 5
    #[test_case("", &rfc_document())]
    #[test_case("/foo", &json!(["bar", "baz"]))]
    #[test_case("/foo/0", &json!("bar"))]
    #[test_case("/", &json!(0))]
    #[test_case("/a~1b", &json!(1))]
    #[test_case("/c%d", &json!(2))]
    #[test_case("/e^f", &json!(3))]
    #[test_case("/g|h", &json!(4))]
    #[test_case("/i\\j", &json!(5))]
    #[test_case("/k\"l", &json!(6))]
    #[test_case("/ ", &json!(7))]
    #[test_case("/m~0n", &json!(8))]
    fn rfc_examples(pointer: &str, expected: &Value) {
        let document = rfc_document();
        let pointer = Pointer::parse(pointer).expect("Valid pointer");
        assert_eq!(pointer.get(&document), Ok(expected))
    }

    // RFC 6901, section 6
    #[test_case("#", &rfc_document())]
    #[test_case("#/foo", &json!(["bar", "baz"]))]
    #[test_case("#/foo/0", &json!("bar"))]
    #[test_case("#/", &json!(0))]
    #[test_case("#/a~1b", &json!(1))]
    #[test_case("#/c%25d", &json!(2))]
    #[test_case("#/e%5Ef", &json!(3))]
    #[test_case("#/%20", &json!(7))]
    #[test_case("#/+", &json!(7))]
    #[test_case("#/m~0n", &json!(8))]
    fn fragment_examples(fragment: &str, expected: &Value) {
        let document = rfc_document();
        let pointer = Pointer::parse_fragment(fragment).expect("Valid fragment");
        assert_eq!(pointer.get(&document), Ok(expected))
    }

    #[test_case("/a~1b/~0/c"; "escapes")]
    #[test_case("/"; "empty token")]
    #[test_case("//x/"; "empty tokens")]
    #[test_case(""; "root")]
    #[test_case("/~01"; "tilde then one")]
    fn canonical_round_trip(input: &str) {
        let pointer = Pointer::parse(input).expect("Valid pointer");
        assert_eq!(pointer.to_string(), input)
    }

    #[test]
    fn tokens_are_unescaped() {
        let pointer = Pointer::parse("/~01/~10").expect("Valid pointer");
        assert_eq!(pointer.tokens(), &["~1".to_string(), "/0".to_string()]);
        assert_eq!(escape("~/"), "~0~1");
        assert_eq!(escape("plain"), "plain");
    }

    #[test_case("a", PointerError::missing_leading_slash("a"))]
    #[test_case("/a~", PointerError::invalid_escape("a~"))]
    #[test_case("/a~2", PointerError::invalid_escape("a~2"))]
    fn parse_errors(input: &str, expected: PointerError) {
        let error = Pointer::parse(input).expect_err("Should fail");
        assert!(error.is_parse_error());
        assert_eq!(error, expected)
    }

    #[test]
    fn fragment_errors() {
        assert_eq!(
            Pointer::parse_fragment("/a"),
            Err(PointerError::missing_hash("/a"))
        );
        assert_eq!(
            Pointer::parse_fragment("#/a%2"),
            Err(PointerError::invalid_percent_encoding("#/a%2"))
        );
    }

    #[test_case("/foo/01", PointerError::invalid_index("01"))]
    #[test_case("/foo/-1", PointerError::invalid_index("-1"))]
    #[test_case("/foo/+1", PointerError::invalid_index("+1"))]
    #[test_case("/foo/", PointerError::invalid_index(""))]
    #[test_case("/foo/-", PointerError::invalid_index("-"))]
    #[test_case("/foo/2", PointerError::index_out_of_range("2", 2))]
    #[test_case("/foo/99999999999999999999999", PointerError::invalid_index("99999999999999999999999"))]
    #[test_case("/bar", PointerError::member_not_found("bar"))]
    #[test_case("//x", PointerError::scalar_access("x"))]
    fn addressing_errors(input: &str, expected: PointerError) {
        let document = rfc_document();
        let pointer = Pointer::parse(input).expect("Valid pointer");
        assert_eq!(pointer.get(&document), Err(expected))
    }

    #[test]
    fn insert_then_erase_restores_array() {
        let original = json!({"a": [1, 2, 3]});
        for idx in ["0", "1", "2", "3"] {
            let mut document = original.clone();
            let pointer = Pointer::parse(&format!("/a/{}", idx)).expect("Valid pointer");
            pointer
                .insert(&mut document, json!("new"))
                .expect("Valid insert");
            assert_eq!(pointer.get(&document), Ok(&json!("new")));
            assert_eq!(pointer.erase(&mut document), Ok(json!("new")));
            assert_eq!(document, original);
        }
    }

    #[test]
    fn insert_appends_with_dash() {
        let mut document = json!([1]);
        Pointer::parse("/-")
            .expect("Valid pointer")
            .insert(&mut document, json!(2))
            .expect("Valid insert");
        assert_eq!(document, json!([1, 2]));
    }

    #[test]
    fn insert_rejects_existing_member() {
        let mut document = json!({"a": 1});
        let pointer = Pointer::parse("/a").expect("Valid pointer");
        let error = pointer
            .insert(&mut document, json!(2))
            .expect_err("Should fail");
        assert_eq!(error, PointerError::member_exists("a"));
        assert!(error.is_range_error());
        assert_eq!(document, json!({"a": 1}));
    }

    #[test]
    fn insert_past_append_position_fails() {
        let mut document = json!([1]);
        let pointer = Pointer::parse("/2").expect("Valid pointer");
        assert_eq!(
            pointer.insert(&mut document, json!(2)),
            Err(PointerError::index_out_of_range("2", 1))
        );
    }

    #[test]
    fn erase_keeps_member_order() {
        let mut document = json!({"a": 1, "b": 2, "c": 3});
        Pointer::parse("/a")
            .expect("Valid pointer")
            .erase(&mut document)
            .expect("Valid erase");
        let keys: Vec<_> = document
            .as_object()
            .expect("Is an object")
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, ["b", "c"]);
    }

    #[test]
    fn root_operations() {
        let mut document = json!({"a": 1});
        let root = Pointer::root();
        assert_eq!(root.erase(&mut document), Err(PointerError::RootAccess));
        assert_eq!(
            root.insert(&mut document, json!(1)),
            Err(PointerError::RootAccess)
        );
        assert_eq!(root.replace(&mut document, json!(2)), Ok(json!({"a": 1})));
        assert_eq!(root.set(&mut document, json!(3)), Ok(Some(json!(2))));
        assert_eq!(document, json!(3));
    }

    #[test]
    fn replace_requires_existing_location() {
        let mut document = json!({"a": [1]});
        assert_eq!(
            Pointer::parse("/a/0")
                .expect("Valid pointer")
                .replace(&mut document, json!(5)),
            Ok(json!(1))
        );
        assert_eq!(
            Pointer::parse("/a/1")
                .expect("Valid pointer")
                .replace(&mut document, json!(5)),
            Err(PointerError::index_out_of_range("1", 1))
        );
        assert_eq!(
            Pointer::parse("/b")
                .expect("Valid pointer")
                .replace(&mut document, json!(5)),
            Err(PointerError::member_not_found("b"))
        );
        assert_eq!(document, json!({"a": [5]}));
    }

    #[test]
    fn set_twice_restores() {
        let original = json!({"a": {"b": 1}, "c": [1]});
        let mut document = original.clone();
        let pointer = Pointer::parse("/a/b").expect("Valid pointer");
        let previous = pointer
            .set(&mut document, json!(2))
            .expect("Valid set")
            .expect("Had a value");
        assert_eq!(document, json!({"a": {"b": 2}, "c": [1]}));
        pointer.set(&mut document, previous).expect("Valid set");
        assert_eq!(document, original);
    }

    #[test]
    fn set_creates_members_and_appends() {
        let mut document = json!({"c": [1]});
        let member = Pointer::parse("/new").expect("Valid pointer");
        assert_eq!(member.set(&mut document, json!(true)), Ok(None));
        let append = Pointer::parse("/c/1").expect("Valid pointer");
        assert_eq!(append.set(&mut document, json!(2)), Ok(None));
        assert_eq!(document, json!({"c": [1, 2], "new": true}));
        let scalar = Pointer::parse("/new/x").expect("Valid pointer");
        assert_eq!(
            scalar.set(&mut document, json!(1)),
            Err(PointerError::scalar_access("x"))
        );
    }

    #[test]
    fn start_index() {
        let document = json!({"x": {"y": 1}, "y": 2});
        let pointer = Pointer::parse("/x/y").expect("Valid pointer");
        assert_eq!(pointer.suffix(1).and_then(|s| s.get(&document)), Ok(&json!(2)));
        assert_eq!(pointer.suffix(2).and_then(|s| s.get(&document)), Ok(&document));
        assert_eq!(
            pointer.suffix(3).map(|_| ()),
            Err(PointerError::StartIndexOutOfRange { start: 3, len: 2 })
        );
    }

    #[test]
    fn helpers() {
        let pointer: Pointer = ["definitions", "a/b"].iter().copied().collect();
        assert_eq!(pointer.to_string(), "/definitions/a~1b");
        assert_eq!(pointer.join("c").len(), 3);
        assert!(pointer.join("c").starts_with(&pointer));
        let ancestors: Vec<String> = pointer.ancestors().map(|p| p.to_string()).collect();
        assert_eq!(ancestors, ["", "/definitions", "/definitions/a~1b"]);
    }
}
