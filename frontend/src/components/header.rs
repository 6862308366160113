use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_session::use_session;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::session::{SessionAction, Theme};
use crate::Page;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub api_client: ApiClient,
    pub current: Page,
    pub on_navigate: Callback<Page>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let session = use_session();
    let theme = session.state().theme;

    let on_toggle_theme = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| session.dispatch(SessionAction::ToggleTheme))
    };

    let on_logout = {
        let api_client = props.api_client.clone();
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            let api_client = api_client.clone();
            let session = session.clone();
            spawn_local(async move {
                if let Err(e) = api_client.logout().await {
                    Logger::warn_with_component("header", &format!("logout request failed: {}", e));
                }
                // The local session ends whatever the backend answered.
                session.dispatch(SessionAction::LoggedOut);
            });
        })
    };

    html! {
        <header class="header">
            <div class="container">
                <h1>{"FinFlow"}</h1>
                <nav class="header-nav">
                    {for Page::ALL.iter().map(|page| {
                        let page = *page;
                        let on_navigate = props.on_navigate.clone();
                        let class = if page == props.current { "nav-link active" } else { "nav-link" };
                        html! {
                            <button class={class} onclick={Callback::from(move |_| on_navigate.emit(page))}>
                                {page.label()}
                            </button>
                        }
                    })}
                </nav>
                <div class="header-right">
                    <button class="btn btn-outline theme-switcher" onclick={on_toggle_theme}>
                        {match theme {
                            Theme::Dark => "☀️ Light mode",
                            Theme::Light => "🌙 Dark mode",
                        }}
                    </button>
                    <button class="btn btn-outline" onclick={on_logout}>{"Log out"}</button>
                </div>
            </div>
        </header>
    }
}
