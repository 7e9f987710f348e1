//! Service layer: the weather provider client, the prediction pipeline,
//! rate limiting and metrics.

pub mod metrics;
pub mod prediction;
pub mod rate_limit;
pub mod weather;

pub use metrics::*;
pub use prediction::*;
pub use rate_limit::*;
pub use weather::*;
