//! Search and category filtering over the entry set

use ledgerview_parser::LedgerEntry;
use std::collections::HashSet;

use super::models::{CategoryFilter, FilterState};

/// Check if an entry matches the search text and category.
///
/// The search is a case-insensitive substring match on the party name; an
/// empty query matches everything.
pub fn matches(entry: &LedgerEntry, query_lower: &str, category: &CategoryFilter) -> bool {
    entry.party_name.to_lowercase().contains(query_lower) && category.matches(&entry.voucher_type)
}

/// Filter entries, keeping input order and duplicates
pub fn filter(entries: &[LedgerEntry], search_query: &str, category: &CategoryFilter) -> Vec<LedgerEntry> {
    let query_lower = search_query.to_lowercase();
    entries
        .iter()
        .filter(|e| matches(e, &query_lower, category))
        .cloned()
        .collect()
}

/// Filter entries with a session's filter state
pub fn apply(entries: &[LedgerEntry], state: &FilterState) -> Vec<LedgerEntry> {
    filter(entries, &state.search_query, &state.category)
}

/// Category tabs for the full entry set: `All` first, then each distinct
/// voucher type in first-seen order.
pub fn categories(entries: &[LedgerEntry]) -> Vec<CategoryFilter> {
    let mut seen = HashSet::new();
    let mut result = vec![CategoryFilter::All];
    for entry in entries {
        if seen.insert(entry.voucher_type.as_str()) {
            let category = CategoryFilter::from(entry.voucher_type.as_str());
            if category != CategoryFilter::All {
                result.push(category);
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(party: &str, voucher_type: &str) -> LedgerEntry {
        LedgerEntry {
            party_name: party.to_string(),
            voucher_type: voucher_type.to_string(),
            ..LedgerEntry::default()
        }
    }

    fn parties(entries: &[LedgerEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.party_name.as_str()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let entries = vec![entry("Anchor Co", "Sales"), entry("Zanco", "Sales"), entry("Bolt", "Sales")];
        let result = filter(&entries, "anc", &CategoryFilter::All);
        assert_eq!(parties(&result), vec!["Anchor Co", "Zanco"]);

        let result = filter(&entries, "ANC", &CategoryFilter::All);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_empty_query_matches_all() {
        let entries = vec![entry("A", "Sales"), entry("A", "Receipt"), entry("B", "")];
        assert_eq!(filter(&entries, "", &CategoryFilter::All), entries);
    }

    #[test]
    fn test_category_is_exact() {
        let entries = vec![entry("A", "Sales"), entry("B", "sales"), entry("C", "Receipt"), entry("D", "Sales")];
        let result = filter(&entries, "", &CategoryFilter::from("Sales"));
        assert_eq!(parties(&result), vec!["A", "D"]);
    }

    #[test]
    fn test_search_and_category_compose() {
        let entries = vec![entry("Acme", "Sales"), entry("Acme", "Receipt"), entry("Bolt", "Sales")];
        let state = FilterState::new("acme", CategoryFilter::from("Receipt"));
        let result = apply(&entries, &state);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].voucher_type, "Receipt");
    }

    #[test]
    fn test_refilter_with_noop_is_identity() {
        let entries = vec![entry("Acme", "Sales"), entry("Zanco", "Receipt"), entry("acme", "Sales")];
        let once = filter(&entries, "acm", &CategoryFilter::from("Sales"));
        let twice = filter(&once, "", &CategoryFilter::All);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_categories_first_seen_order() {
        let entries = vec![
            entry("A", "Sales"),
            entry("B", "Receipt"),
            entry("C", "Sales"),
            entry("D", ""),
            entry("E", "all"),
            entry("F", "Journal"),
        ];
        let tabs = categories(&entries);
        assert_eq!(
            tabs,
            vec![
                CategoryFilter::All,
                CategoryFilter::from("Sales"),
                CategoryFilter::from("Receipt"),
                CategoryFilter::from(""),
                CategoryFilter::from("Journal"),
            ]
        );
    }

    #[test]
    fn test_categories_of_empty_set() {
        assert_eq!(categories(&[]), vec![CategoryFilter::All]);
    }
}
