use shared::{Transaction, TransactionType};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::hooks::use_categories::use_categories;
use crate::hooks::use_form::use_form;
use crate::hooks::use_session::use_session;
use crate::services::api::ApiClient;
use crate::services::date_utils::today;
use crate::services::forms::TransactionDraft;
use crate::services::logging::Logger;
use crate::services::session::SessionAction;

#[derive(Properties, PartialEq)]
pub struct AddTransactionFormProps {
    pub api_client: ApiClient,
    /// Receives the created transaction for an optimistic prepend.
    #[prop_or_default]
    pub on_created: Callback<Transaction>,
}

fn edit(draft: &UseStateHandle<TransactionDraft>, change: impl FnOnce(&mut TransactionDraft)) {
    let mut next = (**draft).clone();
    change(&mut next);
    draft.set(next);
}

/// "Add Transaction" button with its modal form.
#[function_component(AddTransactionForm)]
pub fn add_transaction_form(props: &AddTransactionFormProps) -> Html {
    let categories = use_categories(&props.api_client);
    let session = use_session();
    let draft = use_state(|| TransactionDraft::new(today()));
    let open = use_state(|| false);
    let form = use_form();
    let status = form.snapshot();

    {
        let draft = draft.clone();
        use_effect_with(categories.clone(), move |categories| {
            let loaded = categories.items().to_vec();
            edit(&draft, |d| d.set_categories(loaded));
            || ()
        });
    }

    let on_open = {
        let open = open.clone();
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            form.clear();
            open.set(true);
        })
    };

    let on_close = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(false))
    };

    let on_description_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            edit(&draft, |d| d.description = input.value());
        })
    };

    let on_amount_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            edit(&draft, |d| d.amount = input.value());
        })
    };

    let on_type_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            edit(&draft, |d| d.set_type(TransactionType::parse(&select.value())));
        })
    };

    let on_category_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            edit(&draft, |d| d.category_id = select.value().parse().ok());
        })
    };

    let on_date_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            edit(&draft, |d| d.date = input.value());
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let on_created = props.on_created.clone();
        let draft = draft.clone();
        let open = open.clone();
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
            let open = open.clone();
            let form = form.clone();
            let session = session.clone();

            spawn_local(async move {
                match api_client.create_transaction(&request).await {
                    Ok(response) => {
                        let category = draft.category_name(request.category_id).unwrap_or_default().to_string();
                        let created = Transaction::from_created(response.id, &request, &category);
                        Logger::info_with_component("add-transaction", &format!("created transaction {}", created.id));

                        form.succeed(TransactionDraft::success_message(&request));
                        edit(&draft, |d| d.reset(today()));
                        open.set(false);
                        on_created.emit(created);
                    }
                    Err(e) => {
                        Logger::warn_with_component("add-transaction", &format!("create failed: {}", e));
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
    let selected_type = draft.transaction_type.map(|t| t.as_str()).unwrap_or("");
    let selected_category = draft.category_id.map(|id| id.to_string()).unwrap_or_default();

    html! {
        <>
            <button class="btn btn-primary" onclick={on_open}>{"+ Add Transaction"}</button>
            {if let Some(message) = status.success() {
                html! { <div class="form-message success">{message}</div> }
            } else { html! {} }}

            {if *open {
                html! {
                    <div class="modal-overlay">
                        <div class="modal">
                            <h3>{"Add New Transaction"}</h3>
                            <p class="modal-description">{"Enter the details of your transaction below."}</p>

                            {if let Some(error) = status.error() {
                                html! { <div class="form-message error">{error}</div> }
                            } else { html! {} }}

                            <form class="transaction-form" onsubmit={on_submit}>
                                <div class="form-group">
                                    <label for="description">{"Description"}</label>
                                    <input id="description" type="text"
                                        value={draft.description.clone()}
                                        onchange={on_description_change}
                                        disabled={submitting} />
                                </div>
                                <div class="form-group">
                                    <label for="amount">{"Amount"}</label>
                                    <input id="amount" type="number" step="0.01" min="0"
                                        value={draft.amount.clone()}
                                        onchange={on_amount_change}
                                        disabled={submitting} />
                                </div>
                                <div class="form-group">
                                    <label for="type">{"Type"}</label>
                                    <select id="type" onchange={on_type_change} disabled={submitting}>
                                        <option value="" selected={selected_type.is_empty()}>{"Select type"}</option>
                                        {for TransactionType::ALL.iter().map(|t| html! {
                                            <option value={t.as_str()} selected={selected_type == t.as_str()}>{t.label()}</option>
                                        })}
                                    </select>
                                </div>
                                <div class="form-group">
                                    <label for="category">{"Category"}</label>
                                    <select id="category" onchange={on_category_change}
                                        disabled={submitting || draft.transaction_type.is_none()}>
                                        <option value="" selected={selected_category.is_empty()}>{"Select category"}</option>
                                        {for draft.available_categories().into_iter().map(|c| {
                                            let value = c.id.to_string();
                                            let selected = value == selected_category;
                                            html! { <option {value} {selected}>{c.name}</option> }
                                        })}
                                    </select>
                                </div>
                                <div class="form-group">
                                    <label for="date">{"Date"}</label>
                                    <input id="date" type="date"
                                        value={draft.date.clone()}
                                        onchange={on_date_change}
                                        disabled={submitting} />
                                </div>
                                <div class="modal-actions">
                                    <button type="button" class="btn btn-outline" onclick={on_close} disabled={submitting}>
                                        {"Cancel"}
                                    </button>
                                    <button type="submit" class="btn btn-primary" disabled={submitting}>
                                        {if submitting { "Saving..." } else { "Save Transaction" }}
                                    </button>
                                </div>
                            </form>
                        </div>
                    </div>
                }
            } else { html! {} }}
        </>
    }
}
