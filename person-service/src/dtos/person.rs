use crate::models::Person;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use service_core::error::AppError;

/// Request body for create and update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PersonPayload {
    #[serde(default, alias = "firstname")]
    pub first_name: Option<String>,
    #[serde(default, alias = "lastname")]
    pub last_name: Option<String>,
    #[serde(default, alias = "email")]
    pub email: Option<String>,
    #[serde(default, alias = "age")]
    pub age: Option<i32>,
}

impl From<PersonPayload> for Person {
    fn from(payload: PersonPayload) -> Self {
        Person {
            id: None,
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            age: payload.age,
        }
    }
}

/// Renders a stored document as JSON: ObjectIds become hex strings, other
/// values use relaxed extended JSON. Unknown fields are kept.
pub fn document_to_json(document: Document) -> Value {
    Value::Object(
        document
            .into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(document) => document_to_json(document),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InsertResponse {
    #[serde(rename = "InsertedID")]
    pub inserted_id: String,
}

impl From<InsertOneResult> for InsertResponse {
    fn from(result: InsertOneResult) -> Self {
        Self {
            inserted_id: bson_id_to_string(&result.inserted_id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateResponse {
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    #[serde(rename = "UpsertedID")]
    pub upserted_id: Option<String>,
}

impl From<UpdateResult> for UpdateResponse {
    fn from(result: UpdateResult) -> Self {
        let upserted_id = result.upserted_id.as_ref().map(bson_id_to_string);
        Self {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: u64::from(upserted_id.is_some()),
            upserted_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteResponse {
    pub deleted_count: u64,
}

impl From<DeleteResult> for DeleteResponse {
    fn from(result: DeleteResult) -> Self {
        Self {
            deleted_count: result.deleted_count,
        }
    }
}

/// Parses a path identifier, rejecting anything that is not a 24-hex ObjectId.
pub fn parse_person_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Invalid person id {:?}: {}", raw, e))
    })
}

fn bson_id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}
