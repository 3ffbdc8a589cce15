//! Module for the dashboard dispatch endpoint.
//!
//! Tells the client which top-level view to render for the current session.
//! An unrecognized role gets a diagnostic panel with the raw role fields
//! rather than a blank page.

pub mod handlers;
pub mod routes;
