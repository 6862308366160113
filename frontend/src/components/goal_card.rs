use shared::Goal;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_form::use_form;
use crate::hooks::use_session::use_session;
use crate::services::api::ApiClient;
use crate::services::date_utils::{deadline_label, format_long_date, today};
use crate::services::format::format_money;
use crate::services::forms::{GoalDeletion, GoalProgressDraft};
use crate::services::logging::Logger;
use crate::services::session::SessionAction;

#[derive(Properties, PartialEq)]
pub struct GoalCardProps {
    pub api_client: ApiClient,
    pub goal: Goal,
    pub on_updated: Callback<Goal>,
    pub on_removed: Callback<i64>,
}

#[function_component(GoalCard)]
pub fn goal_card(props: &GoalCardProps) -> Html {
    let goal = &props.goal;
    let session = use_session();
    let progress_form = use_form();
    let delete_form = use_form();
    let editing = use_state(|| false);
    let confirming_delete = use_state(|| false);
    let progress_draft = use_state(|| GoalProgressDraft::for_progress(goal.current_progress));

    let on_edit = {
        let editing = editing.clone();
        let progress_draft = progress_draft.clone();
        let progress_form = progress_form.clone();
        let current = goal.current_progress;
        Callback::from(move |_: MouseEvent| {
            progress_draft.set(GoalProgressDraft::for_progress(current));
            progress_form.clear();
            editing.set(!*editing);
        })
    };

    let on_progress_change = {
        let progress_draft = progress_draft.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            progress_draft.set(GoalProgressDraft { current_progress: input.value() });
        })
    };

    let on_save_progress = {
        let api_client = props.api_client.clone();
        let on_updated = props.on_updated.clone();
        let progress_draft = progress_draft.clone();
        let progress_form = progress_form.clone();
        let editing = editing.clone();
        let session = session.clone();
        let goal_id = goal.id;

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Ok(request) = progress_form.begin(&*progress_draft) else {
                return;
            };

            let api_client = api_client.clone();
            let on_updated = on_updated.clone();
            let progress_form = progress_form.clone();
            let editing = editing.clone();
            let session = session.clone();

            spawn_local(async move {
                match api_client.update_goal(goal_id, &request).await {
                    Ok(updated) => {
                        Logger::info_with_component("goals", &format!("updated progress of goal {}", goal_id));
                        progress_form.succeed("Progress saved");
                        editing.set(false);
                        on_updated.emit(updated);
                    }
                    Err(e) => {
                        if e.is_unauthorized() {
                            session.dispatch(SessionAction::Expired);
                        }
                        progress_form.fail(e.to_string());
                    }
                }
            });
        })
    };

    let on_delete = {
        let api_client = props.api_client.clone();
        let on_removed = props.on_removed.clone();
        let delete_form = delete_form.clone();
        let confirming_delete = confirming_delete.clone();
        let session = session.clone();
        let goal_id = goal.id;

        Callback::from(move |_: MouseEvent| {
            if !*confirming_delete {
                confirming_delete.set(true);
                return;
            }
            let Ok(id) = delete_form.begin(&GoalDeletion(goal_id)) else {
                return;
            };

            let api_client = api_client.clone();
            let on_removed = on_removed.clone();
            let delete_form = delete_form.clone();
            let confirming_delete = confirming_delete.clone();
            let session = session.clone();

            spawn_local(async move {
                match api_client.delete_goal(id).await {
                    Ok(()) => {
                        Logger::info_with_component("goals", &format!("deleted goal {}", id));
                        delete_form.succeed("Deleted");
                        on_removed.emit(id);
                    }
                    Err(e) => {
                        if e.is_unauthorized() {
                            session.dispatch(SessionAction::Expired);
                        }
                        confirming_delete.set(false);
                        delete_form.fail(e.to_string());
                    }
                }
            });
        })
    };

    let on_cancel_delete = {
        let confirming_delete = confirming_delete.clone();
        Callback::from(move |_: MouseEvent| confirming_delete.set(false))
    };

    let progress_status = progress_form.snapshot();
    let delete_status = delete_form.snapshot();
    let percent = goal.display_percent();
    let complete = goal.progress_ratio() >= 1.0;

    html! {
        <div class={classes!("card", "goal-card", complete.then_some("complete"))}>
            <div class="goal-header">
                <h3 class="goal-name">{&goal.goal_name}</h3>
                <span class="goal-percent">{goal.progress_label()}</span>
            </div>

            <div class="progress-bar">
                <div class="progress-fill" style={format!("width: {:.1}%", percent)}></div>
            </div>

            <div class="goal-details">
                <span>{format!("{} of {}", format_money(goal.current_progress), format_money(goal.target_amount))}</span>
                <span>{if complete { "Goal reached!".to_string() } else { format!("{} to go", format_money(goal.remaining())) }}</span>
            </div>
            <div class="goal-deadline">
                {format!("{} · {}", format_long_date(goal.deadline), deadline_label(goal.deadline, today()))}
            </div>

            {if *editing {
                html! {
                    <form class="goal-progress-form" onsubmit={on_save_progress}>
                        <input type="number" min="0" step="0.01"
                            value={progress_draft.current_progress.clone()}
                            onchange={on_progress_change}
                            disabled={progress_status.is_submitting()} />
                        <button type="submit" class="btn btn-primary" disabled={progress_status.is_submitting()}>
                            {if progress_status.is_submitting() { "Saving..." } else { "Save" }}
                        </button>
                    </form>
                }
            } else { html! {} }}

            {for [progress_status.error(), delete_status.error()].into_iter().flatten().map(|error| html! {
                <div class="form-message error">{error}</div>
            })}

            <div class="goal-actions">
                <button class="btn btn-outline" onclick={on_edit}>
                    {if *editing { "Cancel" } else { "Update progress" }}
                </button>
                {if *confirming_delete {
                    html! {
                        <>
                            <button class="btn btn-danger" onclick={on_delete} disabled={delete_status.is_submitting()}>
                                {if delete_status.is_submitting() { "Deleting..." } else { "Confirm delete" }}
                            </button>
                            <button class="btn btn-outline" onclick={on_cancel_delete}>{"Keep"}</button>
                        </>
                    }
                } else {
                    html! { <button class="btn btn-outline" onclick={on_delete}>{"Delete"}</button> }
                }}
            </div>
        </div>
    }
}
