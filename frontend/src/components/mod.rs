pub mod advisor_page;
pub mod chart_colors;
pub mod dashboard_page;
pub mod fetch_status;
pub mod forms;
pub mod goal_card;
pub mod goals_page;
pub mod header;
pub mod login_page;
pub mod overview_chart;
pub mod summary_cards;
pub mod transactions;
pub mod transactions_page;
