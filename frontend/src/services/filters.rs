use std::collections::BTreeSet;

use shared::{Transaction, TransactionType};

/// Search and filter selections of a transaction list view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub search: String,
    pub categories: BTreeSet<String>,
    pub types: BTreeSet<TransactionType>,
}

impl TransactionFilter {
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.categories.is_empty() && self.types.is_empty()
    }

    /// A transaction matches when every dimension matches; within the
    /// category and type sets any member matches, and an empty set matches
    /// everything.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.matches_search(transaction)
            && (self.categories.is_empty() || self.categories.contains(&transaction.category))
            && (self.types.is_empty() || self.types.contains(&transaction.transaction_type))
    }

    fn matches_search(&self, transaction: &Transaction) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        transaction.description.to_lowercase().contains(&needle)
            || transaction.category.to_lowercase().contains(&needle)
    }

    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions.iter().filter(|t| self.matches(t)).cloned().collect()
    }

    pub fn set_category(&mut self, category: &str, active: bool) {
        if active {
            self.categories.insert(category.to_string());
        } else {
            self.categories.remove(category);
        }
    }

    pub fn set_type(&mut self, transaction_type: TransactionType, active: bool) {
        if active {
            self.types.insert(transaction_type);
        } else {
            self.types.remove(&transaction_type);
        }
    }
}

/// Categories present in `transactions`, in order of first appearance.
pub fn distinct_categories(transactions: &[Transaction]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    transactions
        .iter()
        .filter(|t| seen.insert(t.category.as_str()))
        .map(|t| t.category.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: i64, description: &str, category: &str, transaction_type: TransactionType) -> Transaction {
        Transaction {
            id,
            date: "2025-06-01".to_string(),
            description: description.to_string(),
            category: category.to_string(),
            transaction_type,
            amount: 10.0,
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(1, "Monthly salary", "Salary", TransactionType::Income),
            tx(2, "Supermarket", "Food", TransactionType::Expense),
            tx(3, "Rent June", "Housing", TransactionType::Expense),
            tx(4, "Pizza night", "Food", TransactionType::Expense),
            tx(5, "Side project", "Freelance", TransactionType::Income),
        ]
    }

    fn ids(transactions: &[Transaction]) -> Vec<i64> {
        transactions.iter().map(|t| t.id).collect()
    }

    #[test]
    fn empty_filter_is_identity() {
        let transactions = sample();
        let filter = TransactionFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&transactions), transactions);
    }

    #[test]
    fn search_is_case_insensitive_over_description_and_category() {
        let transactions = sample();
        let filter = TransactionFilter {
            search: "FOOD".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&transactions)), vec![2, 4]);

        let filter = TransactionFilter {
            search: "rent".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&transactions)), vec![3]);
    }

    #[test]
    fn categories_are_ored_and_dimensions_anded() {
        let transactions = sample();
        let mut filter = TransactionFilter::default();
        filter.set_category("Food", true);
        filter.set_category("Salary", true);
        assert_eq!(ids(&filter.apply(&transactions)), vec![1, 2, 4]);

        filter.set_type(TransactionType::Expense, true);
        assert_eq!(ids(&filter.apply(&transactions)), vec![2, 4]);

        filter.search = "pizza".to_string();
        assert_eq!(ids(&filter.apply(&transactions)), vec![4]);
    }

    #[test]
    fn deselecting_restores_the_vacuous_match() {
        let transactions = sample();
        let mut filter = TransactionFilter::default();
        filter.set_type(TransactionType::Income, true);
        filter.set_type(TransactionType::Income, false);
        filter.set_category("Housing", true);
        filter.set_category("Housing", false);
        assert_eq!(filter.apply(&transactions).len(), transactions.len());
    }

    #[test]
    fn whitespace_search_matches_everything() {
        let filter = TransactionFilter {
            search: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(filter.apply(&sample()).len(), 5);
    }

    #[test]
    fn padded_search_matches_the_trimmed_term() {
        let filter = TransactionFilter {
            search: " food ".to_string(),
            ..Default::default()
        };
        assert!(!filter.is_empty());
        assert_eq!(ids(&filter.apply(&sample())), vec![2, 4]);
    }

    #[test]
    fn distinct_categories_keep_first_seen_order() {
        assert_eq!(
            distinct_categories(&sample()),
            vec!["Salary", "Food", "Housing", "Freelance"]
        );
    }
}
