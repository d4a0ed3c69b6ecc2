//! Case-insensitive substring search terms

/// Escape character used in every `LIKE ... ESCAPE` clause
pub const LIKE_ESCAPE: char = '\\';

/// A non-empty `q` parameter turned into a LIKE pattern.
///
/// The term is wrapped in `%` with wildcard characters escaped so they
/// match literally. Case folding happens in SQL, through the same
/// `lower()` that is applied to the column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    pattern: String,
}

impl SearchTerm {
    /// Build a term from an optional query value. Empty input means no search.
    pub fn from_query(q: Option<&str>) -> Option<Self> {
        let q = q?;
        if q.is_empty() {
            return None;
        }

        let mut pattern = String::with_capacity(q.len() + 2);
        pattern.push('%');
        for c in q.chars() {
            if matches!(c, '%' | '_' | LIKE_ESCAPE) {
                pattern.push(LIKE_ESCAPE);
            }
            pattern.push(c);
        }
        pattern.push('%');

        Some(Self { pattern })
    }

    /// Pattern for `lower(column) LIKE lower(?) ESCAPE '\'`.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// Drop empty equality filters (`?status=` means no filter).
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_and_keeps_case() {
        let term = SearchTerm::from_query(Some("Demog")).unwrap();
        assert_eq!(term.pattern(), "%Demog%");

        let term = SearchTerm::from_query(Some("ÉTUDE")).unwrap();
        assert_eq!(term.pattern(), "%ÉTUDE%");
    }

    #[test]
    fn empty_is_none() {
        assert!(SearchTerm::from_query(Some("")).is_none());
        assert!(SearchTerm::from_query(None).is_none());
    }

    #[test]
    fn escapes_wildcards() {
        let term = SearchTerm::from_query(Some("t_14%")).unwrap();
        assert_eq!(term.pattern(), r"%t\_14\%%");

        let term = SearchTerm::from_query(Some(r"a\b")).unwrap();
        assert_eq!(term.pattern(), r"%a\\b%");
    }

    #[test]
    fn non_empty_filter() {
        assert_eq!(non_empty(Some("open")), Some("open"));
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(None), None);
    }
}
