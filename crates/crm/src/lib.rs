//! Monster Wash CRM library.
//!
//! This crate provides the lead tracking functionality as a library,
//! allowing it to be tested and reused by the CLI.
//!
//! # Layers
//!
//! - [`store`] - CSV and in-memory lead persistence
//! - [`services`] - record editor, query view, and staff authentication
//! - [`routes`] / [`middleware`] - axum HTTP surface with cookie sessions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
