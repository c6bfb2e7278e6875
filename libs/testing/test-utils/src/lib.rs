//! Shared test utilities for domain testing
//!
//! This crate provides reusable test infrastructure for the domain crates:
//! - `TestUpstream`: mock upstream employee service (wiremock) with automatic cleanup
//! - `TestDataBuilder`: Deterministic test data generation
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestUpstream};
//!
//! async fn my_upstream_test() {
//!     let upstream = TestUpstream::start().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     upstream
//!         .mock_list(vec![builder.employee_record("main", 5000)])
//!         .await;
//!
//!     let config = upstream.config();
//! }
//! ```

use serde_json::{Value, json};
use uuid::Uuid;

mod upstream;

pub use upstream::{EMPLOYEE_PATH, TestUpstream};

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by using seeded random data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// This is the recommended way to create a builder for consistent test data.
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_list_employees");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Deterministic employee id for a given suffix
    pub fn employee_id(&self, suffix: &str) -> Uuid {
        let mut hasher_input = self.seed.to_le_bytes().to_vec();
        hasher_input.extend_from_slice(suffix.as_bytes());
        Uuid::new_v5(&Uuid::NAMESPACE_OID, &hasher_input)
    }

    /// Generate a unique name for testing
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("my_test");
    /// let name = builder.name("employee", "main");
    /// // Returns: "test-employee-12345-main"
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Upstream-shaped employee record (`{"data": ...}` element)
    pub fn employee_record(&self, suffix: &str, salary: u32) -> Value {
        json!({
            "id": self.employee_id(suffix).to_string(),
            "employee_name": self.name("employee", suffix),
            "employee_salary": salary,
            "employee_age": 30,
            "employee_title": "Engineer",
            "employee_email": format!("{}@company.com", suffix),
        })
    }
}
