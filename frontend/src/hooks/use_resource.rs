use std::future::Future;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_session::use_session;
use crate::hooks::use_view_lifetime::use_view_lifetime;
use crate::services::api::ApiClient;
use crate::services::fetch_state::FetchState;
use crate::services::resources;

pub enum ResourceAction<T> {
    Resolve(FetchState<T>),
    Update(Box<dyn FnOnce(&mut FetchState<T>)>),
}

/// Reducer cell so local edits always apply to the latest fetched state.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceCell<T>(pub FetchState<T>);

impl<T> Default for ResourceCell<T> {
    fn default() -> Self {
        Self(FetchState::Loading)
    }
}

impl<T: Clone + 'static> Reducible for ResourceCell<T> {
    type Action = ResourceAction<T>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let state = match action {
            ResourceAction::Resolve(state) => state,
            ResourceAction::Update(update) => {
                let mut state = self.0.clone();
                update(&mut state);
                state
            }
        };
        Rc::new(Self(state))
    }
}

#[derive(Clone)]
pub struct UseResourceHandle<T: Clone + 'static> {
    cell: UseReducerHandle<ResourceCell<T>>,
    pub reload: Callback<()>,
}

impl<T: Clone + 'static> UseResourceHandle<T> {
    pub fn state(&self) -> &FetchState<T> {
        &self.cell.0
    }

    /// Local edit (prepend, replace, remove) without a refetch.
    pub fn updater<IN: 'static>(&self, update: impl Fn(&mut FetchState<T>, IN) + 'static) -> Callback<IN> {
        let dispatcher = self.cell.dispatcher();
        let update = Rc::new(update);
        Callback::from(move |input: IN| {
            let update = update.clone();
            dispatcher.dispatch(ResourceAction::Update(Box::new(move |state| update(state, input))));
        })
    }
}

/// Fetch one resource on mount (and whenever the client changes).
/// Results are applied only while the view is mounted and only for the most
/// recent request; a 401 also moves the session to "expired".
#[hook]
pub fn use_resource<T, F, Fut>(api_client: &ApiClient, loader: F) -> UseResourceHandle<T>
where
    T: Clone + 'static,
    F: Fn(ApiClient) -> Fut + 'static,
    Fut: Future<Output = FetchState<T>> + 'static,
{
    let cell = use_reducer(ResourceCell::<T>::default);
    let lifetime = use_view_lifetime();
    let channel = use_memo((), move |_| lifetime.channel());
    let loader = use_memo((), move |_| loader);
    let session = use_session().dispatcher();

    let reload = {
        let dispatcher = cell.dispatcher();
        use_callback(api_client.clone(), move |_: (), api_client| {
            let ticket = channel.ticket();
            let request = (*loader)(api_client.clone());
            let dispatcher = dispatcher.clone();
            let session = session.clone();

            spawn_local(async move {
                let state = request.await;
                ticket.apply(move || {
                    let (state, follow_up) = resources::settle(state);
                    if let (Some(action), Some(session)) = (follow_up, &session) {
                        session.dispatch(action);
                    }
                    dispatcher.dispatch(ResourceAction::Resolve(state));
                });
            });
        })
    };

    {
        let reload = reload.clone();
        use_effect_with(api_client.clone(), move |_| {
            reload.emit(());
            || ()
        });
    }

    UseResourceHandle { cell, reload }
}
