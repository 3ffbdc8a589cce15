//! Module for user profile API endpoints.
//!
//! These endpoints sit behind the session middleware: the profile is
//! refetched through the identity adapter on every request, and the
//! must-change-password flag can be cleared once the modal flow completes.

pub mod handlers;
pub mod routes;
