//! Configuration structures and loading utilities.
//!
//! Every structure here is built once at startup from environment variables
//! and handed to the components that need it.

pub mod app;
pub mod metrics;
pub mod rate_limit;
pub mod weather;

pub use app::*;
pub use metrics::*;
pub use rate_limit::*;
pub use weather::*;
