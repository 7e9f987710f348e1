//! Cross-cutting middleware: request IDs with request logging, and metrics.

pub mod metrics;
pub mod request_id;

pub use metrics::*;
pub use request_id::*;
