//! Module for core business logic services.
//!
//! This module encapsulates services that sit beside the session layer:
//! mapping a session to the dashboard it should see, and simulating the
//! latency of the demo backend.

pub mod dispatcher;
pub mod latency;
