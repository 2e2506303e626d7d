use regex::Regex;

/// Compiled "contains any of" matcher for one pattern list.
///
/// Patterns are literal substrings, matched case-sensitively and unanchored.
/// Internally this is a single alternation of escaped literals, so matching
/// cost does not grow with a second pass per pattern.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    regex: Regex,
}

impl PatternMatcher {
    /// Compile a non-empty pattern list. Callers are expected to have
    /// filtered out disabled and empty lists beforehand.
    pub fn new(patterns: &[String]) -> Result<Self, regex::Error> {
        let alternation = patterns
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            regex: Regex::new(&alternation)?,
        })
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(patterns: &[&str]) -> PatternMatcher {
        let patterns: Vec<String> = patterns.iter().map(|p| (*p).to_string()).collect();
        PatternMatcher::new(&patterns).unwrap()
    }

    #[test]
    fn matches_any_substring() {
        let m = matcher(&["test", "staging"]);

        assert!(m.is_match("my-test-instance"));
        assert!(m.is_match("staging"));
        assert!(!m.is_match("production"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let m = matcher(&["RUNNING"]);

        assert!(m.is_match("RUNNING"));
        assert!(!m.is_match("running"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let m = matcher(&["10.0.0.0/8"]);

        assert!(m.is_match("range 10.0.0.0/8 open"));
        assert!(!m.is_match("10a0b0c0/8"));
    }

    #[test]
    fn unanchored_match_inside_longer_values() {
        let m = matcher(&["web"]);

        assert!(m.is_match("web-1"));
        assert!(m.is_match("my-web"));
        assert!(!m.is_match("wXeb"));
    }
}
