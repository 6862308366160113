use yew::prelude::*;

use crate::services::session::{SessionAction, SessionContext, SessionState};

/// Dispatcher for the app-wide session. Outside a provider (e.g. in isolated
/// component tests) dispatches are dropped.
#[derive(Clone, PartialEq)]
pub struct SessionHandle {
    context: Option<SessionContext>,
}

impl SessionHandle {
    pub fn state(&self) -> SessionState {
        self.context.as_ref().map(|c| (**c).clone()).unwrap_or_default()
    }

    pub fn dispatcher(&self) -> Option<UseReducerDispatcher<SessionState>> {
        self.context.as_ref().map(|c| c.dispatcher())
    }

    pub fn dispatch(&self, action: SessionAction) {
        match &self.context {
            Some(context) => context.dispatch(action),
            None => log::warn!("no session provider; dropped {:?}", action),
        }
    }
}

#[hook]
pub fn use_session() -> SessionHandle {
    SessionHandle {
        context: use_context::<SessionContext>(),
    }
}
