//! HTTP request handlers and the app factory.

pub mod health;
pub mod metrics;
pub mod openapi;
pub mod predict;

pub use health::*;
pub use metrics::*;
pub use openapi::*;
pub use predict::*;
