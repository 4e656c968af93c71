/// How a query is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// Lemma, alternate lemma or inflected form equals the term
    Exact,
    /// `term@`: a form starts with the term
    Prefix,
    /// `@term` or `@term@`: a form contains the term
    AnywhereTerm,
    /// `%term`: any field, definition or example contains the term
    Fulltext,
    /// Definitions, examples and alternate lemmas contain the term
    Anywhere,
    /// Expressions whose lemma contains the term
    ExpressionsOnly,
    /// Lemma similarity above a threshold
    Fuzzy,
}

impl SearchMode {
    /// Whether EXPR entries are kept when the caller does not say otherwise
    pub fn includes_expressions(&self) -> bool {
        match self {
            SearchMode::Exact | SearchMode::ExpressionsOnly => true,
            SearchMode::Prefix
            | SearchMode::AnywhereTerm
            | SearchMode::Fulltext
            | SearchMode::Anywhere
            | SearchMode::Fuzzy => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Exact => "exact",
            SearchMode::Prefix => "prefix",
            SearchMode::AnywhereTerm => "anywhere_term",
            SearchMode::Fulltext => "fulltext",
            SearchMode::Anywhere => "anywhere",
            SearchMode::ExpressionsOnly => "expressions_only",
            SearchMode::Fuzzy => "fuzzy",
        }
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub mode: SearchMode,
    pub term: String,
}

/// Classify a non-empty query by its special characters.
///
/// `%term` is full-text, `term@` prefix, `@term` and `@term@` match anywhere
/// in a form; anything else is exact.
pub fn classify(query: &str) -> ParsedQuery {
    let (mode, term) = if let Some(rest) = query.strip_prefix('%') {
        (SearchMode::Fulltext, rest)
    } else if let (false, Some(rest)) = (query.starts_with('@'), query.strip_suffix('@')) {
        (SearchMode::Prefix, rest)
    } else if let Some(rest) = query.strip_prefix('@') {
        (SearchMode::AnywhereTerm, rest.strip_suffix('@').unwrap_or(rest))
    } else {
        (SearchMode::Exact, query)
    };

    ParsedQuery {
        mode,
        term: term.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(mode: SearchMode, term: &str) -> ParsedQuery {
        ParsedQuery {
            mode,
            term: term.to_string(),
        }
    }

    #[test]
    fn test_special_syntax() {
        assert_eq!(classify("%foo"), parsed(SearchMode::Fulltext, "foo"));
        assert_eq!(classify("foo@"), parsed(SearchMode::Prefix, "foo"));
        assert_eq!(classify("@foo"), parsed(SearchMode::AnywhereTerm, "foo"));
        assert_eq!(classify("@foo@"), parsed(SearchMode::AnywhereTerm, "foo"));
        assert_eq!(classify("foo"), parsed(SearchMode::Exact, "foo"));
    }

    #[test]
    fn test_rule_order() {
        // Full-text wins over a trailing @
        assert_eq!(classify("%foo@"), parsed(SearchMode::Fulltext, "foo@"));
        // Only one trailing @ is removed
        assert_eq!(classify("foo@@"), parsed(SearchMode::Prefix, "foo@"));
        assert_eq!(classify("@"), parsed(SearchMode::AnywhereTerm, ""));
        assert_eq!(classify("%"), parsed(SearchMode::Fulltext, ""));
        assert_eq!(classify("æ@re"), parsed(SearchMode::Exact, "æ@re"));
    }

    #[test]
    fn test_deterministic() {
        for q in ["%a", "a@", "@a", "@a@", "a", "gå"] {
            assert_eq!(classify(q), classify(q));
        }
    }

    #[test]
    fn test_default_expression_policy() {
        assert!(SearchMode::Exact.includes_expressions());
        assert!(SearchMode::ExpressionsOnly.includes_expressions());
        assert!(!SearchMode::Prefix.includes_expressions());
        assert!(!SearchMode::Fuzzy.includes_expressions());
    }
}
