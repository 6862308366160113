use yew::prelude::*;

use super::forms::AddTransactionForm;
use super::transactions::RecentTransactions;
use crate::hooks::use_dashboard::use_dashboard;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct TransactionsPageProps {
    pub api_client: ApiClient,
    pub recent_limit: usize,
}

/// Full transaction list with its own fetch.
#[function_component(TransactionsPage)]
pub fn transactions_page(props: &TransactionsPageProps) -> Html {
    let dashboard = use_dashboard(&props.api_client);

    html! {
        <div class="transactions-page">
            <div class="page-header">
                <h2>{"Transactions"}</h2>
                <AddTransactionForm api_client={props.api_client.clone()} on_created={dashboard.actions.prepend.clone()} />
            </div>
            <RecentTransactions
                dashboard={dashboard.state.clone()}
                limit={props.recent_limit}
                show_all={true}
                title="All Transactions"
            />
        </div>
    }
}
