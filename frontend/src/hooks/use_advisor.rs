use shared::AdvisorRequest;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_session::use_session;
use crate::hooks::use_view_lifetime::use_view_lifetime;
use crate::services::api::ApiClient;
use crate::services::fetch_state::FetchState;
use crate::services::logging::Logger;
use crate::services::resources;

pub struct UseAdvisorResult {
    /// `None` until the user asks for advice.
    pub state: Option<FetchState<Vec<String>>>,
    pub request: Callback<AdvisorRequest>,
}

/// Recommendations are fetched on demand, never on mount. A new request
/// supersedes one still in flight.
#[hook]
pub fn use_advisor(api_client: &ApiClient) -> UseAdvisorResult {
    let state = use_state(|| None::<FetchState<Vec<String>>>);
    let lifetime = use_view_lifetime();
    let channel = use_memo((), move |_| lifetime.channel());
    let session = use_session().dispatcher();

    let request = {
        let state = state.clone();
        use_callback(api_client.clone(), move |request: AdvisorRequest, api_client| {
            Logger::info_with_component(
                "advisor",
                &format!("requesting advice for {} transactions, {} goals", request.txs.len(), request.metas.len()),
            );

            let ticket = channel.ticket();
            let api_client = api_client.clone();
            let state = state.clone();
            let session = session.clone();
            state.set(Some(FetchState::Loading));

            spawn_local(async move {
                let result = resources::fetch_recommendations(&api_client, &request).await;
                ticket.apply(move || {
                    let (result, follow_up) = resources::settle(result);
                    if let (Some(action), Some(session)) = (follow_up, &session) {
                        session.dispatch(action);
                    }
                    state.set(Some(result));
                });
            });
        })
    };

    UseAdvisorResult {
        state: (*state).clone(),
        request,
    }
}
