use shared::{MonthlyAggregate, Transaction, TransactionType};

/// Chart palette; colors are assigned by first-appearance index.
pub const PALETTE: [&str; 6] = ["#f43f5e", "#3b82f6", "#a855f7", "#10b981", "#f59e0b", "#6366f1"];

pub const UNKNOWN_MONTH: &str = "Unknown";

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAggregate {
    pub name: String,
    pub value: f64,
    pub color: &'static str,
}

/// Group transactions of `transaction_type` by category, in the order each
/// category first appears. Every transaction of that type lands in exactly
/// one group.
pub fn aggregate_by_category(transactions: &[Transaction], transaction_type: TransactionType) -> Vec<CategoryAggregate> {
    let mut groups: Vec<CategoryAggregate> = Vec::new();

    for transaction in transactions.iter().filter(|t| t.transaction_type == transaction_type) {
        match groups.iter_mut().find(|g| g.name == transaction.category) {
            Some(group) => group.value += transaction.amount,
            None => {
                let color = PALETTE[groups.len() % PALETTE.len()];
                groups.push(CategoryAggregate {
                    name: transaction.category.clone(),
                    value: transaction.amount,
                    color,
                });
            }
        }
    }

    groups
}

/// Share of each group in the total, as a percentage. Zero when the total is.
pub fn category_share(group: &CategoryAggregate, groups: &[CategoryAggregate]) -> f64 {
    let total: f64 = groups.iter().map(|g| g.value).sum();
    if total == 0.0 {
        0.0
    } else {
        group.value / total * 100.0
    }
}

pub fn type_total(transactions: &[Transaction], transaction_type: TransactionType) -> f64 {
    transactions
        .iter()
        .filter(|t| t.transaction_type == transaction_type)
        .map(|t| t.amount)
        .sum()
}

pub fn month_label(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => UNKNOWN_MONTH,
    }
}

/// Three-letter label for chart axes.
pub fn month_short_label(month: u32) -> &'static str {
    match month_label(month) {
        UNKNOWN_MONTH => UNKNOWN_MONTH,
        label => &label[..3],
    }
}

/// Monthly overview row ready for tables, charts and export.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRow {
    pub month: u32,
    pub label: &'static str,
    pub income: f64,
    pub expense: f64,
}

impl MonthlyRow {
    pub fn savings(&self) -> f64 {
        self.income - self.expense
    }

    /// Savings as a percentage of income; `None` for a month without income.
    pub fn savings_rate(&self) -> Option<f64> {
        if self.income == 0.0 {
            None
        } else {
            Some(self.savings() / self.income * 100.0)
        }
    }
}

impl From<&MonthlyAggregate> for MonthlyRow {
    fn from(aggregate: &MonthlyAggregate) -> Self {
        Self {
            month: aggregate.month,
            label: month_label(aggregate.month),
            income: aggregate.income,
            expense: aggregate.expense,
        }
    }
}

pub fn monthly_rows(aggregates: &[MonthlyAggregate]) -> Vec<MonthlyRow> {
    aggregates.iter().map(MonthlyRow::from).collect()
}

/// Column sums for the summary table footer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyTotals {
    pub income: f64,
    pub expense: f64,
}

impl MonthlyTotals {
    pub fn of(rows: &[MonthlyRow]) -> Self {
        rows.iter().fold(Self::default(), |acc, row| Self {
            income: acc.income + row.income,
            expense: acc.expense + row.expense,
        })
    }

    pub fn savings(&self) -> f64 {
        self.income - self.expense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(category: &str, transaction_type: TransactionType, amount: f64) -> Transaction {
        Transaction {
            id: 0,
            date: "2025-06-01".to_string(),
            description: String::new(),
            category: category.to_string(),
            transaction_type,
            amount,
        }
    }

    #[test]
    fn categories_sum_in_first_seen_order() {
        let transactions = vec![
            tx("Food", TransactionType::Expense, 100.0),
            tx("Food", TransactionType::Expense, 50.0),
            tx("Housing", TransactionType::Expense, 30.0),
        ];
        let groups = aggregate_by_category(&transactions, TransactionType::Expense);
        let pairs: Vec<(&str, f64)> = groups.iter().map(|g| (g.name.as_str(), g.value)).collect();
        assert_eq!(pairs, vec![("Food", 150.0), ("Housing", 30.0)]);
    }

    #[test]
    fn grouping_partitions_the_active_type() {
        let transactions = vec![
            tx("Salary", TransactionType::Income, 2000.0),
            tx("Housing", TransactionType::Expense, 800.0),
            tx("Food", TransactionType::Expense, 120.25),
            tx("Bonus", TransactionType::Income, 300.0),
            tx("Food", TransactionType::Expense, 79.75),
            tx("Transport", TransactionType::Expense, 45.0),
        ];
        for transaction_type in TransactionType::ALL {
            let groups = aggregate_by_category(&transactions, transaction_type);
            let grouped: f64 = groups.iter().map(|g| g.value).sum();
            assert_eq!(grouped, type_total(&transactions, transaction_type));
        }
    }

    #[test]
    fn colors_follow_insertion_order_and_wrap() {
        let names = ["A", "B", "C", "D", "E", "F", "G"];
        let transactions: Vec<Transaction> = names
            .iter()
            .map(|n| tx(n, TransactionType::Expense, 1.0))
            .collect();
        let groups = aggregate_by_category(&transactions, TransactionType::Expense);
        assert_eq!(groups[0].color, PALETTE[0]);
        assert_eq!(groups[5].color, PALETTE[5]);
        assert_eq!(groups[6].color, PALETTE[0]);
    }

    #[test]
    fn other_type_is_left_out() {
        let transactions = vec![tx("Salary", TransactionType::Income, 10.0)];
        assert!(aggregate_by_category(&transactions, TransactionType::Expense).is_empty());
    }

    #[test]
    fn shares_handle_zero_totals() {
        let groups = vec![CategoryAggregate {
            name: "Food".to_string(),
            value: 0.0,
            color: PALETTE[0],
        }];
        assert_eq!(category_share(&groups[0], &groups), 0.0);
    }

    #[test]
    fn savings_can_go_negative() {
        let row = MonthlyRow::from(&MonthlyAggregate {
            month: 2,
            income: 100.0,
            expense: 250.0,
        });
        assert_eq!(row.label, "February");
        assert_eq!(row.savings(), -150.0);
        assert_eq!(row.savings_rate(), Some(-150.0));
    }

    #[test]
    fn month_without_income_has_no_rate() {
        let row = MonthlyRow::from(&MonthlyAggregate {
            month: 7,
            income: 0.0,
            expense: 20.0,
        });
        assert_eq!(row.savings_rate(), None);
    }

    #[test]
    fn out_of_range_months_are_unknown() {
        assert_eq!(month_label(0), UNKNOWN_MONTH);
        assert_eq!(month_label(13), UNKNOWN_MONTH);
        assert_eq!(month_short_label(9), "Sep");
        assert_eq!(month_short_label(42), UNKNOWN_MONTH);
    }

    #[test]
    fn totals_sum_every_column() {
        let rows = monthly_rows(&[
            MonthlyAggregate { month: 1, income: 1000.0, expense: 400.0 },
            MonthlyAggregate { month: 2, income: 500.0, expense: 900.0 },
        ]);
        let totals = MonthlyTotals::of(&rows);
        assert_eq!(totals.income, 1500.0);
        assert_eq!(totals.expense, 1300.0);
        assert_eq!(totals.savings(), 200.0);
    }
}
