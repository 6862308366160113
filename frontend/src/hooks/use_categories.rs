use shared::Category;
use yew::prelude::*;

use crate::hooks::use_resource::use_resource;
use crate::services::api::ApiClient;
use crate::services::fetch_state::FetchState;
use crate::services::resources;

#[hook]
pub fn use_categories(api_client: &ApiClient) -> FetchState<Vec<Category>> {
    let resource = use_resource(api_client, |api: ApiClient| async move {
        resources::fetch_categories(&api).await
    });
    resource.state().clone()
}
