//! Till application core: users, API tokens and per-user order sessions.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod request;

#[cfg(test)]
mod test;

mod uuids;

pub use uuids::TypedUuid;
