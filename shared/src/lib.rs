//! Shared types and models for the Crop Advisor application
//!
//! This crate contains types shared between the frontend host, the browser
//! bindings (via WASM), and the tests of both.

pub mod capabilities;
pub mod models;
pub mod position;
pub mod types;
pub mod validation;

pub use capabilities::*;
pub use models::*;
pub use position::*;
pub use types::*;
pub use validation::*;
