#![allow(dead_code)]

use person_service::config::PersonConfig;
use person_service::services::PersonDb;
use person_service::startup::Application;
use serde_json::Value;
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: PersonDb,
    pub db_name: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        std::env::set_var("MONGODB_URI", "mongodb://localhost:27017");

        let db_name = format!("person_test_{}", Uuid::new_v4());

        let mut config = PersonConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing
        config.mongodb.database = db_name.clone();

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name,
            client,
        }
    }

    /// Creates a person and returns the generated id.
    pub async fn create_person(&self, body: &Value) -> String {
        let response = self
            .client
            .post(format!("{}/person", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.expect("Failed to parse JSON");
        body["InsertedID"]
            .as_str()
            .expect("InsertedID missing from response")
            .to_string()
    }

    pub async fn get_person(&self, id: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/person/{}", self.address, id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn list_persons(&self) -> reqwest::Response {
        self.client
            .get(format!("{}/person", self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Drops the per-test database.
    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}
