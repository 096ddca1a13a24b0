//! `Pattern` value kind: a compiled, opaque regex (§3: "only `contains`
//! consumes it"). Thin `Rc`-shared wrapper around `regex::Regex`, matching the
//! teacher's approach of wrapping third-party types rather than reimplementing
//! them (`types::re_types` wraps the `regex`/`fancy-regex` crates similarly).

use std::fmt;
use std::rc::Rc;

use regex::Regex;

#[derive(Clone)]
pub struct Pattern(Rc<Regex>);

impl Pattern {
    /// # Errors
    /// Returns the underlying `regex` compile error as a `String`.
    pub fn compile(source: &str) -> Result<Self, String> {
        Regex::new(source).map(|re| Self(Rc::new(re))).map_err(|e| e.to_string())
    }

    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({:?})", self.0.as_str())
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_str() == other.0.as_str()
    }
}
impl Eq for Pattern {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_uses_regex_semantics() {
        let p = Pattern::compile("hello.*").unwrap();
        assert!(p.is_match("hello world"));
        assert!(!p.is_match("goodbye"));
    }

    #[test]
    fn equality_is_by_source_text() {
        let a = Pattern::compile("a+").unwrap();
        let b = Pattern::compile("a+").unwrap();
        assert_eq!(a, b);
    }
}
