//! One fetcher per backend resource. Fetchers never fail: every outcome the
//! views must render is a `FetchState`.

use chrono::NaiveDate;
use shared::{AdvisorRequest, BalanceSummary, Category, DashboardResponse, Goal, MonthlyAggregate, Transaction};

use super::api::ApiClient;
use super::fetch_state::FetchState;
use super::session::SessionAction;

pub async fn fetch_dashboard(api: &ApiClient) -> FetchState<DashboardResponse> {
    FetchState::resolve(api.get_dashboard().await, dashboard_is_empty)
}

/// A dashboard is empty only for a user who has never recorded anything;
/// a quiet month still shows its zero totals.
pub fn dashboard_is_empty(dashboard: &DashboardResponse) -> bool {
    dashboard.transactions.is_empty() && dashboard.total_transactions == 0
}

/// Merge a created transaction into an already loaded dashboard. Loading,
/// failed and unauthenticated states are left alone.
pub fn prepend_transaction(state: &mut FetchState<DashboardResponse>, transaction: Transaction, today: NaiveDate) {
    match state {
        FetchState::Ready(dashboard) => dashboard.record(transaction, today),
        FetchState::Empty => {
            let mut dashboard = DashboardResponse::default();
            dashboard.record(transaction, today);
            *state = FetchState::Ready(dashboard);
        }
        _ => log::debug!("dashboard not loaded; created transaction not merged"),
    }
}

/// Split a fetch outcome into the state to store and the session action it
/// implies. A 401 from any resource expires the session.
pub fn settle<T>(state: FetchState<T>) -> (FetchState<T>, Option<SessionAction>) {
    let follow_up = state.is_unauthenticated().then_some(SessionAction::Expired);
    (state, follow_up)
}

pub async fn fetch_overview(api: &ApiClient) -> FetchState<Vec<MonthlyAggregate>> {
    FetchState::resolve(api.get_overview().await, |rows| rows.is_empty())
}

pub async fn fetch_balance_summary(api: &ApiClient) -> FetchState<BalanceSummary> {
    FetchState::resolve(api.get_balance_summary().await, |_| false)
}

pub async fn fetch_categories(api: &ApiClient) -> FetchState<Vec<Category>> {
    FetchState::resolve(api.get_categories().await, |categories| categories.is_empty())
}

pub async fn fetch_goals(api: &ApiClient) -> FetchState<Vec<Goal>> {
    FetchState::resolve(api.get_goals().await, |goals| goals.is_empty())
}

pub async fn fetch_recommendations(api: &ApiClient, request: &AdvisorRequest) -> FetchState<Vec<String>> {
    FetchState::resolve(
        api.get_recommendations(request).await.map(|r| r.recommendations),
        |recommendations| recommendations.is_empty(),
    )
}
