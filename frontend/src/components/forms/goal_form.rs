use shared::Goal;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_form::use_form;
use crate::hooks::use_session::use_session;
use crate::services::api::ApiClient;
use crate::services::forms::GoalDraft;
use crate::services::logging::Logger;
use crate::services::session::SessionAction;

#[derive(Properties, PartialEq)]
pub struct GoalFormProps {
    pub api_client: ApiClient,
    pub on_created: Callback<Goal>,
}

#[function_component(GoalForm)]
pub fn goal_form(props: &GoalFormProps) -> Html {
    let draft = use_state(GoalDraft::default);
    let form = use_form();
    let session = use_session();
    let status = form.snapshot();

    let field = |set: fn(&mut GoalDraft, String)| {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            set(&mut next, input.value());
            draft.set(next);
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let on_created = props.on_created.clone();
        let draft = draft.clone();
        let form = form.clone();
        let session = session.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Ok(request) = form.begin(&*draft) else {
                return;
            };

            let api_client = api_client.clone();
            let on_created = on_created.clone();
            let draft = draft.clone();
            let form = form.clone();
            let session = session.clone();

            spawn_local(async move {
                match api_client.create_goal(&request).await {
                    Ok(goal) => {
                        Logger::info_with_component("goals", &format!("created goal {}", goal.id));
                        form.succeed(format!("Goal \"{}\" added.", goal.goal_name));
                        draft.set(GoalDraft::default());
                        on_created.emit(goal);
                    }
                    Err(e) => {
                        if e.is_unauthorized() {
                            session.dispatch(SessionAction::Expired);
                        }
                        form.fail(e.to_string());
                    }
                }
            });
        })
    };

    let submitting = status.is_submitting();

    html! {
        <form class="goal-form" onsubmit={on_submit}>
            <input type="text" placeholder="Goal name"
                value={draft.goal_name.clone()}
                onchange={field(|d, v| d.goal_name = v)}
                disabled={submitting} />
            <input type="number" min="0" step="0.01" placeholder="Target amount"
                value={draft.target_amount.clone()}
                onchange={field(|d, v| d.target_amount = v)}
                disabled={submitting} />
            <input type="date"
                value={draft.deadline.clone()}
                onchange={field(|d, v| d.deadline = v)}
                disabled={submitting} />
            <button type="submit" class="btn btn-primary" disabled={submitting}>
                {if submitting { "..." } else { "Add goal" }}
            </button>
            {if let Some(error) = status.error() {
                html! { <div class="form-message error">{error}</div> }
            } else if let Some(message) = status.success() {
                html! { <div class="form-message success">{message}</div> }
            } else { html! {} }}
        </form>
    }
}
