use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::advisor_page::AdvisorPage;
use components::dashboard_page::DashboardPage;
use components::goals_page::GoalsPage;
use components::header::Header;
use components::login_page::LoginPage;
use components::transactions_page::TransactionsPage;
use services::api::ApiClient;
use services::config::AppConfig;
use services::logging::Logger;
use services::session::{self, AuthStatus, SessionAction, SessionContext, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Transactions,
    Goals,
    Advisor,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Dashboard, Page::Transactions, Page::Goals, Page::Advisor];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Transactions => "Transactions",
            Page::Goals => "Goals",
            Page::Advisor => "Advisor",
        }
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    config: AppConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let api_client = use_memo(props.config.clone(), ApiClient::from_config);
    let session = use_reducer(|| SessionState::restored(session::load_theme()));
    let page = use_state(|| Page::Dashboard);

    // Probe the session cookie once on load.
    {
        let session = session.clone();
        let api_client = api_client.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api_client.get_balance_summary().await {
                    Err(e) if e.is_unauthorized() => session.dispatch(SessionAction::Expired),
                    Err(e) => {
                        // Not a session problem; the pages report it themselves.
                        Logger::warn_with_component("app", &format!("session check failed: {}", e));
                        session.dispatch(SessionAction::LoggedIn);
                    }
                    Ok(_) => session.dispatch(SessionAction::LoggedIn),
                }
            });
            || ()
        });
    }

    use_effect_with(session.theme, |theme| {
        session::apply_theme(*theme);
        session::store_theme(*theme);
        || ()
    });

    // Every login starts on the dashboard.
    {
        let page = page.clone();
        use_effect_with(session.auth, move |auth| {
            if *auth == AuthStatus::Unauthenticated {
                page.set(Page::Dashboard);
            }
            || ()
        });
    }

    let on_navigate = {
        let page = page.clone();
        Callback::from(move |next: Page| page.set(next))
    };

    let api = (*api_client).clone();
    let recent_limit = props.config.recent_limit;

    let body = match session.auth {
        AuthStatus::Checking => html! {
            <div class="loading">
                <div class="loading-spinner"></div>
                <p>{"Checking your session..."}</p>
            </div>
        },
        AuthStatus::Unauthenticated => html! { <LoginPage api_client={api.clone()} /> },
        AuthStatus::Authenticated => html! {
            <>
                <Header api_client={api.clone()} current={*page} {on_navigate} />
                <main class="main">
                    <div class="container">
                        {match *page {
                            Page::Dashboard => html! { <DashboardPage api_client={api.clone()} {recent_limit} /> },
                            Page::Transactions => html! { <TransactionsPage api_client={api.clone()} {recent_limit} /> },
                            Page::Goals => html! { <GoalsPage api_client={api.clone()} /> },
                            Page::Advisor => html! { <AdvisorPage api_client={api.clone()} /> },
                        }}
                    </div>
                </main>
            </>
        },
    };

    html! {
        <ContextProvider<SessionContext> context={session.clone()}>
            <div class="app">{body}</div>
        </ContextProvider<SessionContext>>
    }
}

fn main() {
    let config = AppConfig::from_env();
    if let Err(e) = Logger::init(config.log_level) {
        gloo::console::warn!(format!("logger already installed: {}", e));
    }
    log::info!("FinFlow starting against {}", config.api_base_url);

    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
