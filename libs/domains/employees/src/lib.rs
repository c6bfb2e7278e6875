//! Employees Domain
//!
//! A facade over an upstream employee-record service. Every request is
//! answered by calling the upstream, decoding its payload and, for the
//! read-side queries, aggregating the full fetched collection in memory.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, audit events
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Use cases, id validation, aggregation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Upstream   │  ← Outbound calls (trait + reqwest client with retry)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Mapper    │  ← Upstream records → Employee
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use core_config::upstream::UpstreamConfig;
//! use domain_employees::{handlers, EmployeeService, HttpEmployeeUpstream};
//!
//! # fn main() -> Result<(), reqwest::Error> {
//! let upstream = HttpEmployeeUpstream::new(UpstreamConfig::default())?;
//! let service = EmployeeService::new(upstream);
//!
//! // Create Axum router
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod models;
pub mod retry;
pub mod service;
pub mod upstream;
pub mod validation;

// Re-export commonly used types
pub use error::{EmployeeError, EmployeeResult};
pub use handlers::ApiDoc;
pub use models::{CreateEmployee, Employee};
pub use retry::{RetryConfig, Retryable, retry_with_backoff};
pub use service::EmployeeService;
pub use upstream::{EmployeeUpstream, HttpEmployeeUpstream};
pub use validation::parse_employee_id;
