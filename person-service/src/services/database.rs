use crate::config::MongoConfig;
use crate::models::Person;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::ClientOptions,
    results::{DeleteResult, InsertOneResult, UpdateResult},
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

/// Pooled handle to the person collection. Cheap to clone; every clone shares
/// the same driver connection pool.
#[derive(Clone)]
pub struct PersonDb {
    client: MongoClient,
    db: Database,
    collection: String,
}

impl PersonDb {
    pub async fn connect(config: &MongoConfig) -> Result<Self, AppError> {
        tracing::info!(uri = %config.uri, "Connecting to MongoDB");

        let mut options = ClientOptions::parse(&config.uri).await.map_err(|e| {
            tracing::error!("Failed to parse MongoDB URI {}: {}", config.uri, e);
            AppError::from(e)
        })?;
        options.app_name = Some("person-service".to_string());
        options.max_pool_size = Some(config.max_pool_size);
        options.min_pool_size = Some(config.min_pool_size);
        options.connect_timeout = Some(config.connect_timeout());
        options.server_selection_timeout = Some(config.server_selection_timeout());

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client for {}: {}", config.uri, e);
            AppError::from(e)
        })?;
        let db = client.database(&config.database);
        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            max_pool_size = config.max_pool_size,
            "MongoDB client initialized"
        );

        Ok(Self {
            client,
            db,
            collection: config.collection.clone(),
        })
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn persons(&self) -> Collection<Person> {
        self.db.collection(&self.collection)
    }

    /// Untyped view of the same collection; reads return documents as stored.
    pub fn raw_persons(&self) -> Collection<Document> {
        self.db.collection(&self.collection)
    }

    /// Returns every stored document, or only the one with `id` when given.
    pub async fn find_persons(&self, id: Option<ObjectId>) -> Result<Vec<Document>, AppError> {
        let filter = match id {
            Some(id) => doc! { "_id": id },
            None => Document::new(),
        };

        let cursor = self.raw_persons().find(filter, None).await.map_err(|e| {
            tracing::error!("Failed to query persons: {}", e);
            AppError::from(e)
        })?;

        cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to read persons cursor: {}", e);
            AppError::from(e)
        })
    }

    pub async fn insert_person(&self, person: &Person) -> Result<InsertOneResult, AppError> {
        self.persons().insert_one(person, None).await.map_err(|e| {
            tracing::error!("Failed to insert person: {}", e);
            AppError::from(e)
        })
    }

    /// Overwrites all person fields of the document matching `id`.
    pub async fn replace_person_fields(
        &self,
        id: ObjectId,
        person: &Person,
    ) -> Result<UpdateResult, AppError> {
        let update = doc! { "$set": person.field_set() };
        self.persons()
            .update_one(doc! { "_id": id }, update, None)
            .await
            .map_err(|e| {
                tracing::error!(person_id = %id, "Failed to update person: {}", e);
                AppError::from(e)
            })
    }

    pub async fn delete_person(&self, id: ObjectId) -> Result<DeleteResult, AppError> {
        self.persons()
            .delete_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| {
                tracing::error!(person_id = %id, "Failed to delete person: {}", e);
                AppError::from(e)
            })
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Closes pooled connections. Outstanding clones stop working afterwards.
    pub async fn shutdown(self) {
        tracing::info!("Shutting down MongoDB client");
        self.client.shutdown().await;
    }
}
