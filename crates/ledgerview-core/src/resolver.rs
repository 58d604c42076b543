//! Per-party latest balance resolution

use ledgerview_parser::LedgerEntry;
use std::collections::HashMap;

use super::models::PartyBalance;
use super::time::{parse_entry_date, EntryDate};

/// Reduce entries to one representative per party, ranked by balance size.
///
/// Parties are grouped in first-seen order. Within a party the entry with
/// the latest date wins; unparsable dates lose to any parsable one and ties
/// keep the earlier entry. The result is stably sorted by descending
/// `|balance|`, so equal magnitudes keep their grouping order.
pub fn resolve(entries: &[LedgerEntry]) -> Vec<PartyBalance> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&LedgerEntry, EntryDate, usize)> = Vec::new();

    for entry in entries {
        let date = parse_entry_date(&entry.date);
        match index.get(entry.party_name.as_str()) {
            Some(&i) => {
                let (latest, latest_date, count) = &mut groups[i];
                *count += 1;
                if date > *latest_date {
                    *latest = entry;
                    *latest_date = date;
                }
            }
            None => {
                index.insert(entry.party_name.as_str(), groups.len());
                groups.push((entry, date, 1));
            }
        }
    }

    let mut balances: Vec<PartyBalance> = groups
        .into_iter()
        .map(|(entry, _, entry_count)| PartyBalance {
            entry: entry.clone(),
            entry_count,
        })
        .collect();

    balances.sort_by(|a, b| b.entry.balance.abs().cmp(&a.entry.balance.abs()));
    balances
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::collections::HashSet;

    fn entry(party: &str, date: &str, balance: i64) -> LedgerEntry {
        LedgerEntry {
            party_name: party.to_string(),
            date: date.to_string(),
            balance: Decimal::from(balance),
            ..LedgerEntry::default()
        }
    }

    fn names(balances: &[PartyBalance]) -> Vec<&str> {
        balances.iter().map(|b| b.party_name()).collect()
    }

    #[test]
    fn test_latest_entry_wins() {
        let entries = vec![entry("Acme", "2024-01-01", 100), entry("Acme", "2024-01-02", 50)];
        let result = resolve(&entries);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].entry.date, "2024-01-02");
        assert_eq!(result[0].balance(), Decimal::from(50));
        assert_eq!(result[0].entry_count, 2);
    }

    #[test]
    fn test_latest_entry_wins_regardless_of_order() {
        let entries = vec![entry("Acme", "2024-03-01", 7), entry("Acme", "2024-01-01", 100)];
        let result = resolve(&entries);
        assert_eq!(result[0].balance(), Decimal::from(7));
    }

    #[test]
    fn test_unparsable_dates_are_oldest() {
        let entries = vec![entry("Acme", "not a date", 1), entry("Acme", "2020-01-01", 2)];
        assert_eq!(resolve(&entries)[0].balance(), Decimal::from(2));

        let entries = vec![entry("Acme", "2020-01-01", 2), entry("Acme", "", 1)];
        assert_eq!(resolve(&entries)[0].balance(), Decimal::from(2));
    }

    #[test]
    fn test_ties_keep_first_seen() {
        let entries = vec![
            entry("Acme", "2024-01-01", 1),
            entry("Acme", "2024-01-01", 2),
            entry("Bolt", "??", 3),
            entry("Bolt", "??", 4),
        ];
        let result = resolve(&entries);
        let acme = result.iter().find(|b| b.party_name() == "Acme").unwrap();
        let bolt = result.iter().find(|b| b.party_name() == "Bolt").unwrap();
        assert_eq!(acme.balance(), Decimal::from(1));
        assert_eq!(bolt.balance(), Decimal::from(3));
    }

    #[test]
    fn test_sorted_by_absolute_balance() {
        let entries = vec![
            entry("Small", "2024-01-01", 10),
            entry("Debtor", "2024-01-01", -500),
            entry("Large", "2024-01-01", 300),
        ];
        assert_eq!(names(&resolve(&entries)), vec!["Debtor", "Large", "Small"]);
    }

    #[test]
    fn test_equal_balances_keep_group_order() {
        let entries = vec![
            entry("C", "2024-01-01", 0),
            entry("A", "2024-01-01", 5),
            entry("B", "2024-01-01", 0),
            entry("D", "2024-01-01", -5),
            entry("E", "2024-01-01", 0),
        ];
        assert_eq!(names(&resolve(&entries)), vec!["A", "D", "C", "B", "E"]);
    }

    #[test]
    fn test_one_entry_per_party() {
        let entries = vec![
            entry("A", "2024-01-01", 1),
            entry("B", "2024-01-02", 2),
            entry("A", "2024-01-03", 3),
            entry("C", "x", 4),
            entry("B", "2024-01-01", 5),
        ];
        let result = resolve(&entries);
        let distinct: HashSet<_> = entries.iter().map(|e| e.party_name.as_str()).collect();
        assert_eq!(result.len(), distinct.len());
        let resolved: HashSet<_> = names(&result).into_iter().collect();
        assert_eq!(resolved, distinct);
    }

    #[test]
    fn test_empty_input() {
        assert!(resolve(&[]).is_empty());
    }
}
