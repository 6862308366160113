use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_form::use_form;
use crate::hooks::use_session::use_session;
use crate::services::api::ApiClient;
use crate::services::forms::{LoginDraft, LOGIN_FAILED};
use crate::services::logging::Logger;
use crate::services::session::SessionAction;

#[derive(Properties, PartialEq)]
pub struct LoginPageProps {
    pub api_client: ApiClient,
}

#[function_component(LoginPage)]
pub fn login_page(props: &LoginPageProps) -> Html {
    let session = use_session();
    let draft = use_state(LoginDraft::default);
    let form = use_form();
    let status = form.snapshot();

    let on_email_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            draft.set(LoginDraft { email: input.value(), ..(*draft).clone() });
        })
    };

    let on_password_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            draft.set(LoginDraft { password: input.value(), ..(*draft).clone() });
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let draft = draft.clone();
        let form = form.clone();
        let session = session.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Ok(request) = form.begin(&*draft) else {
                return;
            };

            let api_client = api_client.clone();
            let form = form.clone();
            let session = session.clone();
            spawn_local(async move {
                match api_client.login(&request).await {
                    Ok(()) => {
                        Logger::info_with_component("login", "logged in");
                        form.succeed("Logged in");
                        session.dispatch(SessionAction::LoggedIn);
                    }
                    Err(e) => {
                        Logger::warn_with_component("login", &format!("login failed: {}", e));
                        form.fail(LOGIN_FAILED);
                    }
                }
            });
        })
    };

    let notice = session.state().notice;

    html! {
        <div class="login-page">
            <div class="card login-card">
                <h2 class="card-title">{"Login to FinFlow"}</h2>
                {if let Some(notice) = notice {
                    html! { <div class="form-message info">{notice}</div> }
                } else { html! {} }}
                <form class="login-form" onsubmit={on_submit}>
                    <input
                        type="email"
                        placeholder="Email"
                        value={draft.email.clone()}
                        onchange={on_email_change}
                        disabled={status.is_submitting()}
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        value={draft.password.clone()}
                        onchange={on_password_change}
                        disabled={status.is_submitting()}
                    />
                    {if let Some(error) = status.error() {
                        html! { <p class="form-message error">{error}</p> }
                    } else { html! {} }}
                    <button type="submit" class="btn btn-primary" disabled={status.is_submitting()}>
                        {if status.is_submitting() { "Logging in..." } else { "Login" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
