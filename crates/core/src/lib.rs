//! Domain core for the social work report dashboard.
//!
//! Holds the record shapes, option catalogs, the report form engine, the
//! approval workflow, the analytics aggregator and the dashboard session
//! controller. Nothing in this crate talks to a database directly; storage is
//! reached through the traits in [`store`].

pub mod analytics;
pub mod approval;
pub mod catalog;
pub mod currency;
pub mod error;
pub mod form;
pub mod project;
pub mod roles;
pub mod session;
pub mod store;
pub mod types;
