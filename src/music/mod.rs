//! Music generation and persistence.
//!
//! - **`client`** - Synchronous (per-request) client for the external
//!   music-generation API
//! - **`db`** - Music rows, one per diary entry

pub mod client;
pub mod db;
