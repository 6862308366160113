use shared::Goal;
use yew::prelude::*;

use crate::hooks::use_resource::use_resource;
use crate::services::api::ApiClient;
use crate::services::fetch_state::FetchState;
use crate::services::resources;

pub struct UseGoalsResult {
    pub state: FetchState<Vec<Goal>>,
    pub actions: UseGoalsActions,
}

#[derive(Clone, PartialEq)]
pub struct UseGoalsActions {
    pub refresh: Callback<()>,
    pub created: Callback<Goal>,
    pub updated: Callback<Goal>,
    pub removed: Callback<i64>,
}

#[hook]
pub fn use_goals(api_client: &ApiClient) -> UseGoalsResult {
    let resource = use_resource(api_client, |api: ApiClient| async move {
        resources::fetch_goals(&api).await
    });

    let created = resource.updater(|state, goal: Goal| state.prepend(goal));
    let updated = resource.updater(|state, goal: Goal| {
        let id = goal.id;
        state.replace_where(|g| g.id == id, goal);
    });
    let removed = resource.updater(|state, id: i64| state.remove_where(|g| g.id == id));

    UseGoalsResult {
        state: resource.state().clone(),
        actions: UseGoalsActions {
            refresh: resource.reload.clone(),
            created,
            updated,
            removed,
        },
    }
}
