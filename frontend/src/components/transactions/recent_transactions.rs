use shared::{DashboardResponse, TransactionType};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::transaction_table::TransactionTable;
use crate::components::fetch_status::fetch_placeholder;
use crate::services::date_utils::today;
use crate::services::export::{export_pdf, ExportData};
use crate::services::fetch_state::FetchState;
use crate::services::filters::{distinct_categories, TransactionFilter};
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct RecentTransactionsProps {
    pub dashboard: FetchState<DashboardResponse>,
    /// Rows shown until the user expands the list.
    pub limit: usize,
    #[prop_or(false)]
    pub show_all: bool,
    #[prop_or(String::from("Recent Transactions"))]
    pub title: String,
}

#[function_component(RecentTransactions)]
pub fn recent_transactions(props: &RecentTransactionsProps) -> Html {
    let filter = use_state(TransactionFilter::default);
    let filter_open = use_state(|| false);
    let expanded = use_state(|| props.show_all);
    let export_error = use_state(|| None::<String>);

    if let Some(placeholder) = fetch_placeholder(&props.dashboard, "Loading transactions...", "No transactions yet. Add your first one!") {
        return html! {
            <section class="card transactions-section">
                <h2 class="card-title">{&props.title}</h2>
                {placeholder}
            </section>
        };
    }

    let transactions = props.dashboard.data().map(|d| d.transactions.as_slice()).unwrap_or(&[]);
    let filtered = filter.apply(transactions);
    let visible: Vec<_> = if *expanded {
        filtered.clone()
    } else {
        filtered.iter().take(props.limit).cloned().collect()
    };
    let categories = distinct_categories(transactions);

    let on_search = {
        let filter = filter.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*filter).clone();
            next.search = input.value();
            filter.set(next);
        })
    };

    let on_toggle_menu = {
        let filter_open = filter_open.clone();
        Callback::from(move |_: MouseEvent| filter_open.set(!*filter_open))
    };

    let category_option = |category: &String| {
        let filter = filter.clone();
        let name = category.clone();
        let checked = filter.categories.contains(category);
        let onchange = Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*filter).clone();
            next.set_category(&name, input.checked());
            filter.set(next);
        });
        html! {
            <label class="filter-option">
                <input type="checkbox" {checked} {onchange} />
                {category}
            </label>
        }
    };

    let type_option = |transaction_type: TransactionType| {
        let filter = filter.clone();
        let checked = filter.types.contains(&transaction_type);
        let onchange = Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*filter).clone();
            next.set_type(transaction_type, input.checked());
            filter.set(next);
        });
        html! {
            <label class="filter-option">
                <input type="checkbox" {checked} {onchange} />
                {transaction_type.label()}
            </label>
        }
    };

    let on_export = {
        let filtered = filtered.clone();
        let title = props.title.clone();
        let export_error = export_error.clone();
        Callback::from(move |_: MouseEvent| {
            match export_pdf(&title, ExportData::Transactions(&filtered), today()) {
                Ok(()) => export_error.set(None),
                Err(e) => {
                    Logger::error_with_component("recent-transactions", &e.to_string());
                    export_error.set(Some(e.to_string()));
                }
            }
        })
    };

    let on_toggle_expanded = {
        let expanded = expanded.clone();
        Callback::from(move |_: MouseEvent| expanded.set(!*expanded))
    };

    html! {
        <section class="card transactions-section">
            <div class="section-header">
                <h2 class="card-title">{&props.title}</h2>
                <div class="section-actions">
                    <input
                        type="search"
                        class="search-input"
                        placeholder="Search transactions..."
                        value={filter.search.clone()}
                        oninput={on_search}
                    />
                    <div class="filter-menu">
                        <button class="btn btn-outline" onclick={on_toggle_menu}>
                            {if filter.is_empty() { "Filter".to_string() } else { "Filter •".to_string() }}
                        </button>
                        {if *filter_open {
                            html! {
                                <div class="filter-dropdown">
                                    <div class="filter-heading">{"Category"}</div>
                                    {for categories.iter().map(category_option)}
                                    <div class="filter-heading">{"Type"}</div>
                                    {for TransactionType::ALL.into_iter().map(type_option)}
                                </div>
                            }
                        } else { html! {} }}
                    </div>
                    <button class="btn btn-outline" onclick={on_export} disabled={filtered.is_empty()}>
                        {"Export PDF"}
                    </button>
                </div>
            </div>

            {if let Some(error) = (*export_error).as_ref() {
                html! { <div class="form-message error">{error}</div> }
            } else { html! {} }}

            <TransactionTable transactions={visible} />

            {if filtered.len() > props.limit {
                html! {
                    <button class="btn btn-link" onclick={on_toggle_expanded}>
                        {if *expanded { "Show less".to_string() } else { format!("View all {} transactions", filtered.len()) }}
                    </button>
                }
            } else { html! {} }}
        </section>
    }
}
