use yew::prelude::*;

use crate::services::fetch_state::FetchState;

/// Placeholder for every state without data. `None` means render the data.
pub fn fetch_placeholder<T>(state: &FetchState<T>, loading: &str, empty: &str) -> Option<Html> {
    match state {
        FetchState::Ready(_) => None,
        FetchState::Loading => Some(html! {
            <div class="loading">
                <div class="loading-spinner"></div>
                <p>{loading}</p>
            </div>
        }),
        FetchState::Empty => Some(html! { <div class="empty-state">{empty}</div> }),
        FetchState::Failed(message) => Some(html! { <div class="form-message error">{message}</div> }),
        // The session redirect takes over; show nothing stale meanwhile.
        FetchState::Unauthenticated => Some(html! {}),
    }
}
