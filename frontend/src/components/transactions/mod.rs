pub mod category_chart;
pub mod recent_transactions;
pub mod transaction_stats;
pub mod transaction_table;

pub use recent_transactions::RecentTransactions;
pub use transaction_stats::TransactionStats;
