//! Workflow core for the home-care licensing dashboard.
//!
//! The library owns the role-based access rules and the license application
//! lifecycle. Everything that talks to the outside world goes through the
//! trait seams in [`store`] and [`auth::IdentityProvider`], so the HTTP
//! service and the tests can supply their own adapters.

pub mod auth;
pub mod config;
pub mod error;
pub mod licensing;
pub mod store;
pub mod telemetry;
