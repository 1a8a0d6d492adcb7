//! Melodiary backend library
//!
//! A personal diary backend where every entry gets a generated piece of
//! music. Users sign up and log in with cookie-based JWT sessions; creating
//! a diary entry calls an external music-generation API and stores the
//! resulting track alongside the entry in one atomic transaction.
//!
//! # Module Overview
//!
//! - **`server`** - Configuration, application state, and startup wiring
//! - **`auth`** - User store, JWT sessions, cookies, and auth handlers
//! - **`diary`** - Diary store, the create-with-music workflow, handlers
//! - **`music`** - External generation client and the music store
//! - **`middleware`** - Session and CSRF request guards
//! - **`error`** - The `ApiError` taxonomy and its HTTP mapping
//! - **`routes`** - The route table and cross-cutting layers

pub mod auth;
pub mod diary;
pub mod error;
pub mod middleware;
pub mod music;
pub mod routes;
pub mod server;
