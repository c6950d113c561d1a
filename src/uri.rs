//! URI references as described in RFC 3986.
//!
//! Components are stored percent-decoded. Serialization re-encodes `?`, `#` and `%` in every
//! component except the scheme, so parsing the serialized form yields the same components.
use crate::error::UriError;
use once_cell::{sync::Lazy, unsync::OnceCell};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use regex::Regex;
use std::{borrow::Cow, fmt, str::FromStr};

// RFC 3986, Appendix B
static URI_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?s)(([^:/?#]+):)?(//([^/?#]*))?([^?#]*)(\?([^#]*))?(#(.*))?")
        .expect("Is a valid regex")
});

const COMPONENT: &AsciiSet = &CONTROLS.add(b'?').add(b'#').add(b'%');

/// A parsed URI reference. Absent and empty components are distinct: `http://a/b?` has an empty
/// query, `http://a/b` has none.
#[derive(Debug, Clone, Default)]
pub struct Uri {
    scheme: Option<String>,
    authority: Option<String>,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
    serialized: OnceCell<String>,
}

/// Decode `%XX` sequences. Every `%` must be followed by two hexadecimal digits.
pub(crate) fn percent_decode(input: &str) -> Result<String, UriError> {
    if !input.contains('%') {
        return Ok(input.to_string());
    }
    let bytes = input.as_bytes();
    for (idx, byte) in bytes.iter().enumerate() {
        if *byte == b'%' {
            let valid = bytes.get(idx + 1).map_or(false, u8::is_ascii_hexdigit)
                && bytes.get(idx + 2).map_or(false, u8::is_ascii_hexdigit);
            if !valid {
                return Err(UriError::invalid_percent_encoding(input));
            }
        }
    }
    percent_decode_str(input)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| UriError::invalid_utf8(input))
}

fn decode_component(component: Option<regex::Match<'_>>) -> Result<Option<String>, UriError> {
    component.map(|m| percent_decode(m.as_str())).transpose()
}

impl Uri {
    /// An empty URI reference.
    #[must_use]
    pub fn new() -> Uri {
        Uri::default()
    }

    /// Split `input` into its components and percent-decode all of them but the scheme.
    ///
    /// # Errors
    ///
    /// Fails when a component contains an invalid `%` escape or decodes to invalid UTF-8.
    pub fn parse(input: &str) -> Result<Uri, UriError> {
        let captures = match URI_REFERENCE.captures(input) {
            Some(captures) => captures,
            None => {
                return Ok(Uri {
                    path: percent_decode(input)?,
                    ..Uri::default()
                })
            }
        };
        let uri = Uri {
            scheme: captures.get(2).map(|m| m.as_str().to_string()),
            authority: decode_component(captures.get(4))?,
            path: decode_component(captures.get(5))?.unwrap_or_default(),
            query: decode_component(captures.get(7))?,
            fragment: decode_component(captures.get(9))?,
            serialized: OnceCell::new(),
        };
        if !input.contains('%') {
            // Nothing was decoded, the input is already the canonical form.
            let _ = uri.serialized.set(input.to_string());
        }
        Ok(uri)
    }

    /// Resolve `reference` against `self` as the base URI (RFC 3986, 5.2.2).
    #[must_use]
    pub fn resolve(&self, reference: &Uri) -> Uri {
        if reference.scheme.is_some() {
            return reference.clone();
        }
        let mut target = Uri::new();
        if reference.authority.is_some() {
            target.authority = reference.authority.clone();
            target.path = remove_dot_segments(&reference.path);
            target.query = reference.query.clone();
        } else {
            if reference.path.is_empty() {
                target.path = self.path.clone();
                target.query = reference.query.clone().or_else(|| self.query.clone());
            } else {
                target.path = if reference.path.starts_with('/') {
                    remove_dot_segments(&reference.path)
                } else {
                    remove_dot_segments(&self.merge(&reference.path))
                };
                target.query = reference.query.clone();
            }
            target.authority = self.authority.clone();
        }
        target.scheme = self.scheme.clone();
        target.fragment = reference.fragment.clone();
        target
    }

    // RFC 3986, 5.2.3
    fn merge(&self, relative: &str) -> String {
        if self.authority.is_some() && self.path.is_empty() {
            return format!("/{}", relative);
        }
        match self.path.rfind('/') {
            Some(idx) => format!("{}{}", &self.path[..=idx], relative),
            None => relative.to_string(),
        }
    }

    /// The same URI without its fragment.
    #[must_use]
    pub fn without_fragment(&self) -> Uri {
        let mut uri = self.clone();
        uri.clear_fragment();
        uri
    }

    /// Serialized form (RFC 3986, 5.3).
    pub fn as_str(&self) -> &str {
        self.serialized.get_or_init(|| {
            let mut output = String::new();
            if let Some(scheme) = &self.scheme {
                output.push_str(scheme);
                output.push(':');
            }
            if let Some(authority) = &self.authority {
                output.push_str("//");
                output.extend(utf8_percent_encode(authority, COMPONENT));
            }
            output.extend(utf8_percent_encode(&self.path, COMPONENT));
            if let Some(query) = &self.query {
                output.push('?');
                output.extend(utf8_percent_encode(query, COMPONENT));
            }
            if let Some(fragment) = &self.fragment {
                output.push('#');
                output.extend(utf8_percent_encode(fragment, COMPONENT));
            }
            output
        })
    }

    /// Whether the URI has no components at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scheme.is_none()
            && self.authority.is_none()
            && self.path.is_empty()
            && self.query.is_none()
            && self.fragment.is_none()
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }
    pub fn authority(&self) -> Option<&str> {
        self.authority.as_deref()
    }
    pub fn path(&self) -> &str {
        &self.path
    }
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn has_scheme(&self) -> bool {
        self.scheme.is_some()
    }
    pub fn has_authority(&self) -> bool {
        self.authority.is_some()
    }
    pub fn has_query(&self) -> bool {
        self.query.is_some()
    }
    pub fn has_fragment(&self) -> bool {
        self.fragment.is_some()
    }

    pub fn set_scheme(&mut self, scheme: impl Into<String>) {
        self.scheme = Some(scheme.into());
        self.invalidate();
    }
    pub fn set_authority(&mut self, authority: impl Into<String>) {
        self.authority = Some(authority.into());
        self.invalidate();
    }
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
        self.invalidate();
    }
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = Some(query.into());
        self.invalidate();
    }
    pub fn set_fragment(&mut self, fragment: impl Into<String>) {
        self.fragment = Some(fragment.into());
        self.invalidate();
    }

    pub fn clear_scheme(&mut self) {
        self.scheme = None;
        self.invalidate();
    }
    pub fn clear_authority(&mut self) {
        self.authority = None;
        self.invalidate();
    }
    pub fn clear_path(&mut self) {
        self.path.clear();
        self.invalidate();
    }
    pub fn clear_query(&mut self) {
        self.query = None;
        self.invalidate();
    }
    pub fn clear_fragment(&mut self) {
        self.fragment = None;
        self.invalidate();
    }

    #[inline]
    fn invalidate(&mut self) {
        self.serialized = OnceCell::new();
    }
}

/// Remove `.` and `..` segments from a path (RFC 3986, 5.2.4).
#[must_use]
pub fn remove_dot_segments(path: &str) -> String {
    let mut input = path;
    let mut output = String::with_capacity(path.len());
    while !input.is_empty() {
        if let Some(rest) = input.strip_prefix("../") {
            input = rest;
        } else if let Some(rest) = input.strip_prefix("./") {
            input = rest;
        } else if input.starts_with("/./") {
            input = &input[2..];
        } else if input == "/." {
            input = "/";
        } else if input.starts_with("/../") {
            input = &input[3..];
            pop_segment(&mut output);
        } else if input == "/.." {
            input = "/";
            pop_segment(&mut output);
        } else if input == "." || input == ".." {
            input = "";
        } else {
            let start = usize::from(input.starts_with('/'));
            let end = input[start..]
                .find('/')
                .map_or(input.len(), |idx| idx + start);
            output.push_str(&input[..end]);
            input = &input[end..];
        }
    }
    output
}

fn pop_segment(output: &mut String) {
    match output.rfind('/') {
        Some(idx) => output.truncate(idx),
        None => output.clear(),
    }
}

impl PartialEq for Uri {
    fn eq(&self, other: &Self) -> bool {
        self.scheme == other.scheme
            && self.authority == other.authority
            && self.path == other.path
            && self.query == other.query
            && self.fragment == other.fragment
    }
}

impl Eq for Uri {}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Uri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uri::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const BASE: &str = "http://a/b/c/d;p?q";

    // RFC 3986, 5.4.1 and 5.4.2
    #[test_case("g:h", "g:h")]
    #[test_case("g", "http://a/b/c/g")]
    #[test_case("./g", "http://a/b/c/g")]
    #[test_case("g/", "http://a/b/c/g/")]
    #[test_case("/g", "http://a/g")]
    #[test_case("//g", "http://g")]
    #[test_case("?y", "http://a/b/c/d;p?y")]
    #[test_case("g?y", "http://a/b/c/g?y")]
    #[test_case("#s", "http://a/b/c/d;p?q#s")]
    #[test_case("g#s", "http://a/b/c/g#s")]
    #[test_case("g?y#s", "http://a/b/c/g?y#s")]
    #[test_case(";x", "http://a/b/c/;x")]
    #[test_case("g;x", "http://a/b/c/g;x")]
    #[test_case("", "http://a/b/c/d;p?q")]
    #[test_case(".", "http://a/b/c/")]
    #[test_case("./", "http://a/b/c/")]
    #[test_case("..", "http://a/b/")]
    #[test_case("../", "http://a/b/")]
    #[test_case("../g", "http://a/b/g")]
    #[test_case("../..", "http://a/")]
    #[test_case("../../", "http://a/")]
    #[test_case("../../g", "http://a/g")]
    #[test_case("../../../g", "http://a/g")]
    #[test_case("../../../../g", "http://a/g")]
    #[test_case("/./g", "http://a/g")]
    #[test_case("/../g", "http://a/g")]
    #[test_case("g.", "http://a/b/c/g.")]
    #[test_case(".g", "http://a/b/c/.g")]
    #[test_case("g..", "http://a/b/c/g..")]
    #[test_case("./../g", "http://a/b/g")]
    #[test_case("./g/.", "http://a/b/c/g/")]
    #[test_case("g/./h", "http://a/b/c/g/h")]
    #[test_case("g/../h", "http://a/b/c/h")]
    #[test_case("g;x=1/./y", "http://a/b/c/g;x=1/y")]
    #[test_case("g;x=1/../y", "http://a/b/c/y")]
    fn resolves_rfc_examples(reference: &str, expected: &str) {
        let base = Uri::parse(BASE).expect("Valid URI");
        let reference = Uri::parse(reference).expect("Valid URI");
        assert_eq!(base.resolve(&reference).as_str(), expected)
    }

    #[test]
    fn reference_with_scheme_wins() {
        let base = Uri::parse("http://a/b").expect("Valid URI");
        let reference = Uri::parse("urn:x:y#frag").expect("Valid URI");
        assert_eq!(base.resolve(&reference), reference);
    }

    #[test]
    fn reference_with_scheme_is_returned_unchanged() {
        let base = Uri::parse("http://b/c").expect("Valid URI");
        let reference = Uri::parse("http://x/a/../b").expect("Valid URI");
        let resolved = base.resolve(&reference);
        assert_eq!(resolved.path(), "/a/../b");
        assert_eq!(resolved.to_string(), "http://x/a/../b");
    }

    #[test]
    fn reference_with_authority_keeps_base_scheme() {
        let base = Uri::parse("https://a/b?q").expect("Valid URI");
        let reference = Uri::parse("//h/p/../x").expect("Valid URI");
        let resolved = base.resolve(&reference);
        assert_eq!(resolved.scheme(), Some("https"));
        assert_eq!(resolved.authority(), Some("h"));
        assert_eq!(resolved.path(), "/x");
        assert!(!resolved.has_query());
    }

    #[test]
    fn merge_with_empty_base_path() {
        let base = Uri::parse("http://host").expect("Valid URI");
        let reference = Uri::parse("item.json").expect("Valid URI");
        assert_eq!(base.resolve(&reference).as_str(), "http://host/item.json");
    }

    #[test_case("/a/b/c/./../../g", "/a/g")]
    #[test_case("mid/content=5/../6", "mid/6")]
    #[test_case("/..", "/")]
    #[test_case("..", "")]
    #[test_case("a/b", "a/b")]
    #[test_case("", "")]
    fn dot_segments(path: &str, expected: &str) {
        assert_eq!(remove_dot_segments(path), expected)
    }

    #[test]
    fn absent_and_empty_components_differ() {
        let uri = Uri::parse("http://a/b?#").expect("Valid URI");
        assert_eq!(uri.query(), Some(""));
        assert_eq!(uri.fragment(), Some(""));
        assert_eq!(uri.as_str(), "http://a/b?#");
        let uri = Uri::parse("http://a/b").expect("Valid URI");
        assert!(!uri.has_query());
        assert!(!uri.has_fragment());
    }

    #[test]
    fn components() {
        let uri = Uri::parse("foo://example.com:8042/over/there?name=ferret#nose")
            .expect("Valid URI");
        assert_eq!(uri.scheme(), Some("foo"));
        assert_eq!(uri.authority(), Some("example.com:8042"));
        assert_eq!(uri.path(), "/over/there");
        assert_eq!(uri.query(), Some("name=ferret"));
        assert_eq!(uri.fragment(), Some("nose"));
    }

    #[test]
    fn decodes_and_reencodes() {
        let uri = Uri::parse("a%20b#x%23y%25").expect("Valid URI");
        assert_eq!(uri.path(), "a b");
        assert_eq!(uri.fragment(), Some("x#y%"));
        assert_eq!(uri.as_str(), "a b#x%23y%25");
        let reparsed = Uri::parse(uri.as_str()).expect("Valid URI");
        assert_eq!(reparsed, uri);
    }

    #[test]
    fn setters_reset_serialization() {
        let mut uri = Uri::parse("http://a/b#c").expect("Valid URI");
        assert_eq!(uri.as_str(), "http://a/b#c");
        uri.clear_fragment();
        assert_eq!(uri.as_str(), "http://a/b");
        uri.set_query("x?y");
        assert_eq!(uri.as_str(), "http://a/b?x%3Fy");
        uri.set_path("/p");
        uri.clear_scheme();
        assert_eq!(uri.to_string(), "//a/p?x%3Fy");
    }

    #[test_case("a%2")]
    #[test_case("a%zz")]
    #[test_case("#%")]
    #[test_case("//a%g1/")]
    fn rejects_invalid_escapes(input: &str) {
        assert!(matches!(
            Uri::parse(input),
            Err(UriError::InvalidPercentEncoding { .. })
        ))
    }

    #[test]
    fn without_fragment() {
        let uri = Uri::parse("http://x/y.json#/a").expect("Valid URI");
        assert_eq!(uri.without_fragment().as_str(), "http://x/y.json");
        assert!(Uri::new().is_empty());
    }
}
