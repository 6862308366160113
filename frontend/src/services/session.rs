//! Process-wide session and theme state, shared through a yew context.

use std::rc::Rc;

use gloo::storage::{LocalStorage, Storage};
use yew::prelude::*;

pub const THEME_STORAGE_KEY: &str = "finflow-theme";
pub const EXPIRED_NOTICE: &str = "Your session has expired. Please log in again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Checking,
    Authenticated,
    Unauthenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub auth: AuthStatus,
    pub theme: Theme,
    /// Shown once on the login view, e.g. after an expired session.
    pub notice: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            auth: AuthStatus::Checking,
            theme: Theme::default(),
            notice: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    LoggedIn,
    /// A request came back 401.
    Expired,
    LoggedOut,
    ToggleTheme,
}

impl SessionState {
    /// Initial state on load: session unknown, theme as last saved.
    pub fn restored(theme: Option<Theme>) -> Self {
        Self {
            theme: theme.unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn apply(&self, action: SessionAction) -> Self {
        let mut next = self.clone();
        match action {
            SessionAction::LoggedIn => {
                next.auth = AuthStatus::Authenticated;
                next.notice = None;
            }
            SessionAction::Expired => {
                // Expiry during the initial session check is just "not logged in".
                if self.auth == AuthStatus::Authenticated {
                    next.notice = Some(EXPIRED_NOTICE.to_string());
                }
                next.auth = AuthStatus::Unauthenticated;
            }
            SessionAction::LoggedOut => {
                next.auth = AuthStatus::Unauthenticated;
                next.notice = None;
            }
            SessionAction::ToggleTheme => next.theme = self.theme.toggled(),
        }
        next
    }
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        log::debug!("session action {:?}", action);
        Rc::new(self.apply(action))
    }
}

pub type SessionContext = UseReducerHandle<SessionState>;

pub fn load_theme() -> Option<Theme> {
    LocalStorage::get::<String>(THEME_STORAGE_KEY)
        .ok()
        .and_then(|value| Theme::parse(&value))
}

pub fn store_theme(theme: Theme) {
    if let Err(e) = LocalStorage::set(THEME_STORAGE_KEY, theme.as_str()) {
        log::warn!("could not save theme: {}", e);
    }
}

/// Toggle the `dark` class on `<html>`.
pub fn apply_theme(theme: Theme) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    let classes = root.class_list();
    let result = match theme {
        Theme::Dark => classes.add_1("dark"),
        Theme::Light => classes.remove_1("dark"),
    };
    if let Err(e) = result {
        log::warn!("could not apply theme: {:?}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticated() -> SessionState {
        SessionState::default().apply(SessionAction::LoggedIn)
    }

    #[test]
    fn starts_checking_in_light_mode() {
        let state = SessionState::default();
        assert_eq!(state.auth, AuthStatus::Checking);
        assert_eq!(state.theme, Theme::Light);
    }

    #[test]
    fn expiry_after_login_leaves_a_notice() {
        let state = authenticated().apply(SessionAction::Expired);
        assert_eq!(state.auth, AuthStatus::Unauthenticated);
        assert_eq!(state.notice.as_deref(), Some(EXPIRED_NOTICE));

        let state = state.apply(SessionAction::LoggedIn);
        assert_eq!(state.auth, AuthStatus::Authenticated);
        assert_eq!(state.notice, None);
    }

    #[test]
    fn failed_session_check_is_silent() {
        let state = SessionState::default().apply(SessionAction::Expired);
        assert_eq!(state.auth, AuthStatus::Unauthenticated);
        assert_eq!(state.notice, None);
    }

    #[test]
    fn logout_clears_session_but_keeps_theme() {
        let state = authenticated()
            .apply(SessionAction::ToggleTheme)
            .apply(SessionAction::LoggedOut);
        assert_eq!(state.auth, AuthStatus::Unauthenticated);
        assert_eq!(state.theme, Theme::Dark);
    }

    #[test]
    fn theme_round_trips_through_storage_values() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(Theme::parse(theme.as_str()), Some(theme));
        }
        assert_eq!(Theme::parse("sepia"), None);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn restore_uses_saved_theme() {
        assert_eq!(SessionState::restored(Some(Theme::Dark)).theme, Theme::Dark);
        let fresh = SessionState::restored(None);
        assert_eq!(fresh.theme, Theme::Light);
        assert_eq!(fresh.auth, AuthStatus::Checking);
    }
}
