//! Authentication HTTP handlers.
//!
//! - **`types`** - Request/response DTOs and input validation
//! - **`signup`** - `POST /signup`
//! - **`login`** - `POST /login` and `POST /logout`
//! - **`csrf`** - `GET /csrf`
//! - **`me`** - `GET /user`

pub mod csrf;
pub mod login;
pub mod me;
pub mod signup;
pub mod types;

pub use csrf::csrf_token;
pub use login::{login, logout};
pub use me::get_me;
pub use signup::signup;
