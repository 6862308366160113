pub mod use_advisor;
pub mod use_categories;
pub mod use_dashboard;
pub mod use_form;
pub mod use_goals;
pub mod use_overview;
pub mod use_resource;
pub mod use_session;
pub mod use_view_lifetime;
