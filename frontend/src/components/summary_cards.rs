use shared::{BalanceSummary, DashboardResponse};
use yew::prelude::*;

use crate::services::fetch_state::FetchState;
use crate::services::format::{format_money, format_percent};

#[derive(Properties, PartialEq)]
pub struct SummaryCardsProps {
    pub dashboard: FetchState<DashboardResponse>,
    pub summary: FetchState<BalanceSummary>,
}

fn card(title: &str, value: String, detail: Option<String>, class: &'static str) -> Html {
    html! {
        <div class={classes!("card", "summary-card", class)}>
            <div class="summary-title">{title}</div>
            <div class="summary-value">{value}</div>
            {if let Some(detail) = detail {
                html! { <div class="summary-detail">{detail}</div> }
            } else { html! {} }}
        </div>
    }
}

/// Balance, month income and month expenses.
#[function_component(SummaryCards)]
pub fn summary_cards(props: &SummaryCardsProps) -> Html {
    let placeholder = || "-".to_string();
    let dashboard = props.dashboard.data();

    let balance = match &props.summary {
        FetchState::Ready(summary) => format_money(summary.total_balance),
        _ => dashboard.map(|d| format_money(d.balance)).unwrap_or_else(placeholder),
    };
    let change = props.summary.data().map(|s| {
        let sign = if s.balance_change >= 0.0 { "+" } else { "" };
        format!("{}{} from last month", sign, format_percent(s.balance_change))
    });

    let (income, expenses) = match (&props.dashboard, dashboard) {
        (_, Some(d)) => (format_money(d.income), format_money(d.expenses)),
        (FetchState::Empty, None) => (format_money(0.0), format_money(0.0)),
        _ => (placeholder(), placeholder()),
    };

    html! {
        <div class="summary-cards">
            {card("Total Balance", balance, change, "balance")}
            {card("Income", income, Some("This month".to_string()), "income")}
            {card("Expenses", expenses, Some("This month".to_string()), "expense")}
            {if let Some(error) = props.dashboard.error() {
                html! { <div class="form-message error">{error}</div> }
            } else { html! {} }}
        </div>
    }
}
