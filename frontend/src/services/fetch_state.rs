use super::api::ApiError;

/// What a view knows about one backend resource.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Ready(T),
    /// The request succeeded but there is nothing to show
    Empty,
    Failed(String),
    /// The session is gone; no data may be shown
    Unauthenticated,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Loading
    }
}

impl<T> FetchState<T> {
    /// Resolve a fetch result, using `is_empty` to tell an empty success apart.
    pub fn resolve(result: Result<T, ApiError>, is_empty: impl FnOnce(&T) -> bool) -> Self {
        match result {
            Ok(data) if is_empty(&data) => FetchState::Empty,
            Ok(data) => FetchState::Ready(data),
            Err(ApiError::Unauthorized) => FetchState::Unauthenticated,
            Err(e) => FetchState::Failed(e.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, FetchState::Unauthenticated)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> FetchState<Vec<T>> {
    /// Items to render; empty for every state but `Ready`.
    pub fn items(&self) -> &[T] {
        match self {
            FetchState::Ready(items) => items.as_slice(),
            _ => &[],
        }
    }

    /// Put an entity created by this view at the front of the collection.
    pub fn prepend(&mut self, item: T) {
        match self {
            FetchState::Ready(items) => items.insert(0, item),
            FetchState::Empty => *self = FetchState::Ready(vec![item]),
            _ => {}
        }
    }

    /// Drop every item matching `predicate`, becoming `Empty` when none remain.
    pub fn remove_where(&mut self, predicate: impl Fn(&T) -> bool) {
        if let FetchState::Ready(items) = self {
            items.retain(|item| !predicate(item));
            if items.is_empty() {
                *self = FetchState::Empty;
            }
        }
    }

    /// Replace the first item matching `predicate`.
    pub fn replace_where(&mut self, predicate: impl Fn(&T) -> bool, item: T) {
        if let FetchState::Ready(items) = self {
            if let Some(slot) = items.iter_mut().find(|existing| predicate(existing)) {
                *slot = item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_success_is_distinct_from_data() {
        let empty: FetchState<Vec<i32>> = FetchState::resolve(Ok(vec![]), |v| v.is_empty());
        assert_eq!(empty, FetchState::Empty);

        let ready = FetchState::resolve(Ok(vec![1, 2]), |v: &Vec<i32>| v.is_empty());
        assert_eq!(ready.items(), &[1, 2]);
    }

    #[test]
    fn unauthorized_never_carries_data() {
        let state: FetchState<Vec<i32>> = FetchState::resolve(Err(ApiError::Unauthorized), |v| v.is_empty());
        assert!(state.is_unauthenticated());
        assert!(state.items().is_empty());
        assert_eq!(state.data(), None);
    }

    #[test]
    fn errors_keep_their_message() {
        let state: FetchState<Vec<i32>> = FetchState::resolve(
            Err(ApiError::Server {
                status: 500,
                message: "Database unavailable".to_string(),
            }),
            |v| v.is_empty(),
        );
        assert_eq!(state.error(), Some("Database unavailable"));
    }

    #[test]
    fn prepend_turns_empty_into_ready() {
        let mut state: FetchState<Vec<&str>> = FetchState::Empty;
        state.prepend("new");
        assert_eq!(state.items(), &["new"]);

        state.prepend("newer");
        assert_eq!(state.items(), &["newer", "new"]);
    }

    #[test]
    fn prepend_is_ignored_while_loading() {
        let mut state: FetchState<Vec<&str>> = FetchState::Loading;
        state.prepend("early");
        assert!(state.is_loading());
    }

    #[test]
    fn removing_the_last_item_empties_the_state() {
        let mut state = FetchState::Ready(vec![1, 2]);
        state.remove_where(|v| *v == 1);
        assert_eq!(state.items(), &[2]);
        state.remove_where(|v| *v == 2);
        assert_eq!(state, FetchState::Empty);
    }

    #[test]
    fn replace_swaps_the_matching_item() {
        let mut state = FetchState::Ready(vec![(1, "a"), (2, "b")]);
        state.replace_where(|(id, _)| *id == 2, (2, "c"));
        assert_eq!(state.items(), &[(1, "a"), (2, "c")]);
    }
}
