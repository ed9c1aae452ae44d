//! Core types for Monster Wash.
//!
//! This module provides type-safe wrappers for the CRM domain concepts.

pub mod name;
pub mod record;
pub mod session;
pub mod status;

pub use name::{CustomerName, CustomerNameError};
pub use record::CustomerRecord;
pub use session::Session;
pub use status::*;
