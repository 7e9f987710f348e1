//! Data models for the prediction API.
//!
//! Request/response bodies, the validated coordinates, the normalized
//! weather snapshot and the prediction records.

pub mod api;
pub mod coordinates;
pub mod prediction;
pub mod weather;

pub use api::*;
pub use coordinates::*;
pub use prediction::*;
pub use weather::*;
