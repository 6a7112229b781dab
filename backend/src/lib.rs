//! Account Service Library
//!
//! Registration, email/password login and bearer-token profile lookup.
//! Exposed as a library so integration tests can build the router.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
