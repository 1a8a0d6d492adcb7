//! Diary entries: storage, the create-with-music workflow, and handlers.
//!
//! - **`types`** - Rows, DTOs, and the pagination envelope
//! - **`db`** - Store queries
//! - **`service`** - Lifecycle orchestration, including the atomic
//!   diary+music creation
//! - **`handlers`** - HTTP handlers and query-parameter clamping

pub mod db;
pub mod handlers;
pub mod service;
pub mod types;
