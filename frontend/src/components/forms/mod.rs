pub mod add_transaction_form;
pub mod goal_form;

pub use add_transaction_form::AddTransactionForm;
pub use goal_form::GoalForm;
