//! Order Sessions
//!
//! Per-user cart persistence that survives logout/login on shared tills.
//! Each user has at most one `active` and at most one `pending_logout`
//! session; every lifecycle operation runs in a single transaction holding a
//! per-user advisory lock.

pub mod data;
pub mod errors;
pub mod items;
pub mod models;
pub mod records;
mod repository;
pub mod service;

pub use errors::OrderSessionsServiceError;
pub use service::*;
