use shared::Transaction;
use yew::prelude::*;

use super::forms::AddTransactionForm;
use super::overview_chart::OverviewChart;
use super::summary_cards::SummaryCards;
use super::transactions::{RecentTransactions, TransactionStats};
use crate::hooks::use_dashboard::use_dashboard;
use crate::hooks::use_overview::use_overview;
use crate::services::aggregates::monthly_rows;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct DashboardPageProps {
    pub api_client: ApiClient,
    pub recent_limit: usize,
}

#[function_component(DashboardPage)]
pub fn dashboard_page(props: &DashboardPageProps) -> Html {
    let dashboard = use_dashboard(&props.api_client);
    let overview = use_overview(&props.api_client);
    let revision = use_state(|| 0u32);

    // The create has completed by now, so the refetches cannot race it.
    let on_created = {
        let prepend = dashboard.actions.prepend.clone();
        let refresh_dashboard = dashboard.actions.refresh.clone();
        let refresh_overview = overview.refresh.clone();
        let revision = revision.clone();
        Callback::from(move |transaction: Transaction| {
            prepend.emit(transaction);
            refresh_dashboard.emit(());
            refresh_overview.emit(());
            revision.set(*revision + 1);
        })
    };

    html! {
        <div class="dashboard-page">
            <div class="page-header">
                <h2>{"Dashboard"}</h2>
                <AddTransactionForm api_client={props.api_client.clone()} {on_created} />
            </div>

            <SummaryCards dashboard={dashboard.state.clone()} summary={overview.summary.clone()} />

            <div class="dashboard-grid">
                <OverviewChart
                    rows={monthly_rows(overview.monthly.items())}
                    loading={overview.monthly.is_loading()}
                />
                <RecentTransactions dashboard={dashboard.state.clone()} limit={props.recent_limit} />
            </div>

            <TransactionStats api_client={props.api_client.clone()} revision={*revision} />
        </div>
    }
}
