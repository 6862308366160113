use shared::{DashboardResponse, Transaction};
use yew::prelude::*;

use crate::hooks::use_resource::use_resource;
use crate::services::api::ApiClient;
use crate::services::date_utils;
use crate::services::fetch_state::FetchState;
use crate::services::resources;

pub struct UseDashboardResult {
    pub state: FetchState<DashboardResponse>,
    pub actions: UseDashboardActions,
}

#[derive(Clone)]
pub struct UseDashboardActions {
    pub refresh: Callback<()>,
    /// Merge a transaction the backend just created.
    pub prepend: Callback<Transaction>,
}

#[hook]
pub fn use_dashboard(api_client: &ApiClient) -> UseDashboardResult {
    let resource = use_resource(api_client, |api: ApiClient| async move {
        resources::fetch_dashboard(&api).await
    });

    let prepend = resource.updater(|state, transaction: Transaction| {
        resources::prepend_transaction(state, transaction, date_utils::today());
    });

    UseDashboardResult {
        state: resource.state().clone(),
        actions: UseDashboardActions {
            refresh: resource.reload.clone(),
            prepend,
        },
    }
}
