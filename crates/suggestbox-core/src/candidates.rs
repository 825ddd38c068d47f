use std::sync::Arc;

/// The built-in candidate list.
pub const DEFAULT_FRUITS: [&str; 6] = ["apple", "banana", "cherry", "date", "elderberry", "fig"];

/// Ordered, immutable list of strings searched by the suggestion engine.
///
/// Cloning is cheap: the items live behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    items: Arc<[String]>,
}

impl CandidateSet {
    /// Build a set from any list of strings. Blank entries are dropped,
    /// order and duplicates are kept.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items
            .into_iter()
            .map(Into::into)
            .filter(|s| !s.trim().is_empty())
            .collect();
        Self {
            items: items.into(),
        }
    }

    pub fn fruits() -> Self {
        Self::new(DEFAULT_FRUITS)
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Case-insensitive substring filter, in candidate order.
    ///
    /// An empty query matches nothing. Whitespace is significant here;
    /// blank-query handling belongs to the widget controller.
    pub fn filter(&self, query: &str) -> Vec<String> {
        if query.is_empty() {
            return Vec::new();
        }

        let query_lower = query.to_lowercase();
        self.items
            .iter()
            .filter(|c| c.to_lowercase().contains(&query_lower))
            .cloned()
            .collect()
    }

    /// `"apple, banana, ..."` for footers and CLI output.
    pub fn joined(&self) -> String {
        self.items.join(", ")
    }
}

impl Default for CandidateSet {
    fn default() -> Self {
        Self::fruits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(set: &CandidateSet, q: &str) -> Vec<String> {
        set.items()
            .iter()
            .filter(|c| c.to_lowercase().contains(&q.to_lowercase()))
            .cloned()
            .collect()
    }

    #[test]
    fn test_filter_an() {
        let set = CandidateSet::fruits();
        assert_eq!(set.filter("an"), vec!["banana"]);
    }

    #[test]
    fn test_filter_preserves_candidate_order() {
        let set = CandidateSet::fruits();
        assert_eq!(
            set.filter("e"),
            vec!["apple", "cherry", "date", "elderberry"]
        );
    }

    #[test]
    fn test_filter_no_match() {
        let set = CandidateSet::fruits();
        assert!(set.filter("xyz").is_empty());
    }

    #[test]
    fn test_filter_empty_query_is_empty() {
        let set = CandidateSet::fruits();
        assert!(set.filter("").is_empty());
    }

    #[test]
    fn test_filter_case_insensitive() {
        let set = CandidateSet::new(["Apple", "BANANA", "Cherry"]);
        assert_eq!(set.filter("aPp"), vec!["Apple"]);
        assert_eq!(set.filter("nan"), vec!["BANANA"]);
    }

    #[test]
    fn test_filter_matches_naive_containment() {
        let set = CandidateSet::fruits();
        for q in ["a", "A", "rr", "Berry", "fig", "g", "ch", " ", "date ", "zz"] {
            assert_eq!(set.filter(q), naive(&set, q), "query {q:?}");
        }
    }

    #[test]
    fn test_blank_entries_dropped() {
        let set = CandidateSet::new(["kiwi", "", "  ", "lime", "kiwi"]);
        assert_eq!(set.items(), &["kiwi", "lime", "kiwi"]);
        assert_eq!(set.joined(), "kiwi, lime, kiwi");
    }
}
