use shared::AdvisorRequest;
use yew::prelude::*;

use super::fetch_status::fetch_placeholder;
use crate::hooks::use_advisor::use_advisor;
use crate::hooks::use_dashboard::use_dashboard;
use crate::hooks::use_goals::use_goals;
use crate::services::api::ApiClient;
use crate::services::fetch_state::FetchState;

#[derive(Properties, PartialEq)]
pub struct AdvisorCardProps {
    pub recommendations: Vec<String>,
}

#[function_component(AdvisorCard)]
pub fn advisor_card(props: &AdvisorCardProps) -> Html {
    html! {
        <div class="card advisor-card">
            <h3 class="card-title">{"Your Recommendations"}</h3>
            <ul class="recommendations">
                {for props.recommendations.iter().map(|rec| html! { <li>{rec}</li> })}
            </ul>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct AdvisorPageProps {
    pub api_client: ApiClient,
}

/// Advice is computed by the backend from the current transactions and goals.
#[function_component(AdvisorPage)]
pub fn advisor_page(props: &AdvisorPageProps) -> Html {
    let dashboard = use_dashboard(&props.api_client);
    let goals = use_goals(&props.api_client);
    let advisor = use_advisor(&props.api_client);

    let snapshot_ready = !dashboard.state.is_loading() && !goals.state.is_loading();
    let thinking = matches!(advisor.state, Some(FetchState::Loading));

    let on_request = {
        let request = advisor.request.clone();
        let transactions = dashboard.state.data().map(|d| d.transactions.clone()).unwrap_or_default();
        let goals = goals.state.items().to_vec();
        Callback::from(move |_: MouseEvent| {
            request.emit(AdvisorRequest::from_snapshot(&transactions, &goals));
        })
    };

    html! {
        <section class="advisor-page">
            <h2>{"Financial Advisor"}</h2>
            <p class="page-description">{"Get personalised recommendations about your finances."}</p>

            <button class="btn btn-primary" onclick={on_request} disabled={thinking || !snapshot_ready}>
                {if thinking { "Thinking..." } else { "Get recommendations" }}
            </button>

            {match &advisor.state {
                None => html! {},
                Some(state) => match fetch_placeholder(state, "Thinking...", "No recommendations right now.") {
                    Some(placeholder) => placeholder,
                    None => html! { <AdvisorCard recommendations={state.data().cloned().unwrap_or_default()} /> },
                },
            }}
        </section>
    }
}
