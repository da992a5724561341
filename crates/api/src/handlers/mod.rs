pub mod analytics;
pub mod approvals;
pub mod auth;
pub mod catalogs;
pub mod form;
pub mod projects;
pub mod session;
