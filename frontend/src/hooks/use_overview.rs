use shared::{BalanceSummary, MonthlyAggregate};
use yew::prelude::*;

use crate::hooks::use_resource::use_resource;
use crate::services::api::ApiClient;
use crate::services::fetch_state::FetchState;
use crate::services::resources;

pub struct UseOverviewResult {
    pub monthly: FetchState<Vec<MonthlyAggregate>>,
    pub summary: FetchState<BalanceSummary>,
    pub refresh: Callback<()>,
}

/// Monthly series and balance summary, fetched independently.
#[hook]
pub fn use_overview(api_client: &ApiClient) -> UseOverviewResult {
    let monthly = use_resource(api_client, |api: ApiClient| async move {
        resources::fetch_overview(&api).await
    });
    let summary = use_resource(api_client, |api: ApiClient| async move {
        resources::fetch_balance_summary(&api).await
    });

    let refresh = {
        let monthly = monthly.reload.clone();
        let summary = summary.reload.clone();
        Callback::from(move |_| {
            monthly.emit(());
            summary.emit(());
        })
    };

    UseOverviewResult {
        monthly: monthly.state().clone(),
        summary: summary.state().clone(),
        refresh,
    }
}
