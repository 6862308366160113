pub mod aggregates;
pub mod api;
pub mod cancellation;
pub mod config;
pub mod date_utils;
pub mod export;
pub mod fetch_state;
pub mod filters;
pub mod format;
pub mod forms;
pub mod logging;
pub mod resources;
pub mod session;
