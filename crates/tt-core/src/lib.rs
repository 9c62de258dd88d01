//! trip-together/crates/tt-core/src/lib.rs
//!
//! The central domain logic and interface definitions for TripTogether.

pub mod catalog;
pub mod decode;
pub mod discovery;
pub mod error;
pub mod loader;
pub mod models;
pub mod repository;
pub mod seed;
pub mod session;
pub mod traits;

// Re-exporting for easier access in other crates
pub use catalog::*;
pub use error::*;
pub use models::*;
pub use traits::*;
