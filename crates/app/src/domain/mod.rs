//! Till Domain Concerns

pub mod order_sessions;
pub mod users;
