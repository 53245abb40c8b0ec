//! Shared test utilities for domain testing
//!
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongo", default)
//! - `TestDataBuilder`: deterministic names and addresses derived from a test name
//!
//! ```rust,ignore
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! async fn creates_order() {
//!     let mongo = TestMongo::new().await;
//!     let data = TestDataBuilder::from_test_name("creates_order");
//!     let db = mongo.database(&data.database_name());
//!     // ...
//! }
//! ```

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "mongo")]
pub use mongo::TestMongo;

/// Deterministic test data keyed by a seed.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of the test name, so reruns produce the same data.
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Database name unique to this seed.
    pub fn database_name(&self) -> String {
        format!("test_{:x}", self.seed)
    }

    /// `"test-{prefix}-{seed}-{suffix}"`
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Syntactically valid address unique to this seed.
    pub fn email(&self, local: &str) -> String {
        format!("{}+{:x}@example.com", local, self.seed)
    }
}
