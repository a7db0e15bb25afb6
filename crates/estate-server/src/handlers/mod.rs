//! HTTP request handlers.

pub(crate) mod forms;
pub(crate) mod health;
pub(crate) mod pages;
