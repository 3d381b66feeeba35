use crate::model::{fold_case, DirectoryEntry};

/// Entries whose keyword contains `query`, ignoring case, in catalog order.
/// An empty query keeps the whole catalog.
pub fn filter(catalog: &[DirectoryEntry], query: &str) -> Vec<DirectoryEntry> {
    if query.is_empty() {
        return catalog.to_vec();
    }

    let folded_query = fold_case(query);
    catalog
        .iter()
        .filter(|entry| keyword_matches(entry, &folded_query))
        .cloned()
        .collect()
}

fn keyword_matches(entry: &DirectoryEntry, folded_query: &str) -> bool {
    entry.folded_keyword().contains(folded_query)
}

#[cfg(test)]
mod tests {
    use super::filter;
    use crate::model::DirectoryEntry;

    #[test]
    fn matches_keyword_only() {
        let catalog = vec![DirectoryEntry::new(
            "work",
            "/home/u/Photos",
            Some("Photo archive"),
        )];
        assert!(filter(&catalog, "photo").is_empty());
        assert_eq!(filter(&catalog, "OR").len(), 1);
    }
}
