//! MongoDB test infrastructure
//!
//! Provides a `TestMongo` helper that runs MongoDB in a throwaway container.

use mongodb::{Client, Database};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::mongo::Mongo;

const MONGO_TAG: &str = "7.0";
const MONGO_PORT: u16 = 27017;

/// Test MongoDB wrapper
///
/// The container is stopped and removed when this struct is dropped.
///
/// ```no_run
/// use test_utils::TestMongo;
///
/// # async fn example() {
/// let mongo = TestMongo::new().await;
/// let db = mongo.database("catalog_test");
/// let names = db.list_collection_names().await.unwrap();
/// assert!(names.is_empty());
/// # }
/// ```
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    client: Client,
    pub connection_string: String,
}

impl TestMongo {
    /// Start a standalone MongoDB 7 server.
    pub async fn new() -> Self {
        let container = Mongo::default()
            .with_tag(MONGO_TAG)
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let host_port = container
            .get_host_port_ipv4(MONGO_PORT)
            .await
            .expect("Failed to get MongoDB port");

        let connection_string = format!("mongodb://127.0.0.1:{}", host_port);

        let client = Client::with_uri_str(&connection_string)
            .await
            .expect("Failed to create MongoDB client");

        tracing::info!(port = host_port, "Test MongoDB ready (mongo {})", MONGO_TAG);

        Self {
            container,
            client,
            connection_string,
        }
    }

    /// Cloned client handle (cheap, shares the pool)
    pub fn client(&self) -> Client {
        self.client.clone()
    }

    /// Handle to a database on the test server.
    ///
    /// Use a distinct name per test when several tests share one container.
    pub fn database(&self, name: &str) -> Database {
        self.client.database(name)
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}

impl Drop for TestMongo {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test MongoDB container");
    }
}
