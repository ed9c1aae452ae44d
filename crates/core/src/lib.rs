//! Monster Wash Core - Shared domain types.
//!
//! This crate provides the types used across all Monster Wash components:
//! - `crm` - Lead store, editor, query view, access control, and HTTP surface
//! - `cli` - Command-line tools for operating on the lead file
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no file access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Lead records, validated names, statuses, roles, and sessions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
