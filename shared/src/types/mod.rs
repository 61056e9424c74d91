//! Type definitions shared by all endpoints

pub mod response;

pub use response::{ApiResponse, HealthResponse, HealthStatus};
