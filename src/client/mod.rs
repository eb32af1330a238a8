//! Backend API client.
//!
//! This module provides the [`BackendClient`] for talking to the project
//! backend. Every request carries the configured token header.

mod backend;

pub use backend::{BackendClient, TOKEN_HEADER};
