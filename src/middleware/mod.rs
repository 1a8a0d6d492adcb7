//! Request guards: session verification and CSRF double-submit check.

pub mod auth;
pub mod csrf;
