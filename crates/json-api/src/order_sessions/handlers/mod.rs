//! Order Session Handlers

pub(crate) mod assign_tab;
pub(crate) mod complete;
pub(crate) mod get;
pub(crate) mod history;
pub(crate) mod logout;
pub(crate) mod persist;
pub(crate) mod update;
