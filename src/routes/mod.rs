//! Route table and cross-cutting layers.

pub mod router;

pub use router::create_router;
