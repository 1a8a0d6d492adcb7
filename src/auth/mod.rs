//! Authentication: user store, JWT sessions, cookies, and HTTP handlers.

pub mod cookies;
pub mod handlers;
pub mod sessions;
pub mod users;

pub use handlers::{csrf_token, get_me, login, logout, signup};
