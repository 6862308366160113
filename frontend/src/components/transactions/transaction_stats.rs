use shared::TransactionType;
use yew::prelude::*;

use super::category_chart::CategoryChart;
use crate::components::fetch_status::fetch_placeholder;
use crate::hooks::use_dashboard::use_dashboard;
use crate::hooks::use_overview::use_overview;
use crate::services::aggregates::{aggregate_by_category, category_share, monthly_rows, type_total, MonthlyTotals};
use crate::services::api::ApiClient;
use crate::services::date_utils::today;
use crate::services::export::{export_pdf, ExportData};
use crate::services::format::{format_money, format_percent};
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct TransactionStatsProps {
    pub api_client: ApiClient,
    /// Bumped by the page after a create; triggers a refetch.
    #[prop_or_default]
    pub revision: u32,
}

#[function_component(TransactionStats)]
pub fn transaction_stats(props: &TransactionStatsProps) -> Html {
    let dashboard = use_dashboard(&props.api_client);
    let overview = use_overview(&props.api_client);
    let active_type = use_state(|| TransactionType::Expense);
    let export_error = use_state(|| None::<String>);

    {
        let refresh_dashboard = dashboard.actions.refresh.clone();
        let refresh_overview = overview.refresh.clone();
        use_effect_with(props.revision, move |revision| {
            // Revision 0 is the mount, which already fetched.
            if *revision > 0 {
                refresh_dashboard.emit(());
                refresh_overview.emit(());
            }
            || ()
        });
    }

    let transactions = dashboard.state.data().map(|d| d.transactions.clone()).unwrap_or_default();
    let groups = aggregate_by_category(&transactions, *active_type);
    let rows = monthly_rows(overview.monthly.items());
    let totals = MonthlyTotals::of(&rows);

    let export = {
        let export_error = export_error.clone();
        move |title: &str, data: ExportData<'_>| match export_pdf(title, data, today()) {
            Ok(()) => export_error.set(None),
            Err(e) => {
                Logger::error_with_component("transaction-stats", &e.to_string());
                export_error.set(Some(e.to_string()));
            }
        }
    };

    let on_export_monthly = {
        let rows = rows.clone();
        let export = export.clone();
        Callback::from(move |_: MouseEvent| export("Monthly Summary", ExportData::Monthly(&rows)))
    };

    let on_export_categories = {
        let groups = groups.clone();
        let title = match *active_type {
            TransactionType::Expense => "Expenses by Category",
            TransactionType::Income => "Income by Category",
        };
        Callback::from(move |_: MouseEvent| export(title, ExportData::Categories(&groups)))
    };

    let tab = |transaction_type: TransactionType, label: &'static str| {
        let active_type = active_type.clone();
        let class = if *active_type == transaction_type { "tab active" } else { "tab" };
        html! {
            <button class={class} onclick={Callback::from(move |_| active_type.set(transaction_type))}>
                {label}
            </button>
        }
    };

    html! {
        <section class="card stats-section">
            <div class="section-header">
                <h2 class="card-title">{"Statistics"}</h2>
                <div class="section-actions">
                    <button class="btn btn-outline" onclick={on_export_categories} disabled={groups.is_empty()}>
                        {"Export categories"}
                    </button>
                    <button class="btn btn-outline" onclick={on_export_monthly} disabled={rows.is_empty()}>
                        {"Export monthly"}
                    </button>
                </div>
            </div>

            {if let Some(error) = (*export_error).as_ref() {
                html! { <div class="form-message error">{error}</div> }
            } else { html! {} }}

            <div class="tabs">
                {tab(TransactionType::Expense, "Expenses")}
                {tab(TransactionType::Income, "Income")}
            </div>

            {match fetch_placeholder(&dashboard.state, "Loading categories...", "No transactions yet.") {
                Some(placeholder) => placeholder,
                None => html! {
                    <div class="category-breakdown">
                        <CategoryChart groups={groups.clone()} />
                        <ul class="category-list">
                            {for groups.iter().map(|group| html! {
                                <li key={group.name.clone()}>
                                    <span class="swatch" style={format!("background: {}", group.color)}></span>
                                    <span class="category-name">{&group.name}</span>
                                    <span class="category-value">{format_money(group.value)}</span>
                                    <span class="category-share">{format_percent(category_share(group, &groups))}</span>
                                </li>
                            })}
                            <li class="category-total">
                                <span class="category-name">{"Total"}</span>
                                <span class="category-value">{format_money(type_total(&transactions, *active_type))}</span>
                            </li>
                        </ul>
                    </div>
                },
            }}

            <h3>{"Monthly Summary"}</h3>
            {match fetch_placeholder(&overview.monthly, "Loading monthly summary...", "No monthly data yet.") {
                Some(placeholder) => placeholder,
                None => html! {
                    <table class="summary-table">
                        <thead>
                            <tr>
                                <th>{"Month"}</th>
                                <th>{"Income"}</th>
                                <th>{"Expenses"}</th>
                                <th>{"Savings"}</th>
                                <th>{"Savings Rate"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {for rows.iter().map(|row| {
                                let savings_class = if row.savings() < 0.0 { "amount negative" } else { "amount positive" };
                                html! {
                                    <tr key={row.month}>
                                        <td>{row.label}</td>
                                        <td>{format_money(row.income)}</td>
                                        <td>{format_money(row.expense)}</td>
                                        <td class={savings_class}>{format_money(row.savings())}</td>
                                        <td>{row.savings_rate().map(format_percent).unwrap_or_else(|| "-".to_string())}</td>
                                    </tr>
                                }
                            })}
                        </tbody>
                        <tfoot>
                            <tr>
                                <td>{"Total"}</td>
                                <td>{format_money(totals.income)}</td>
                                <td>{format_money(totals.expense)}</td>
                                <td>{format_money(totals.savings())}</td>
                                <td></td>
                            </tr>
                        </tfoot>
                    </table>
                },
            }}
        </section>
    }
}
