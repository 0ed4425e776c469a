use crate::dtos::{
    document_to_json, parse_person_id, DeleteResponse, InsertResponse, PersonPayload,
    UpdateResponse,
};
use crate::models::Person;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::WithRejection;
use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use service_core::error::AppError;

pub async fn list_persons(
    State(state): State<AppState>,
) -> Result<Json<Vec<Value>>, AppError> {
    find_persons(&state, None).await
}

pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Value>>, AppError> {
    let id = parse_person_id(&id)?;
    find_persons(&state, Some(id)).await
}

async fn find_persons(
    state: &AppState,
    id: Option<ObjectId>,
) -> Result<Json<Vec<Value>>, AppError> {
    let persons = state.db.find_persons(id).await?;

    if persons.is_empty() {
        return Err(AppError::NotFound(match id {
            Some(id) => anyhow::anyhow!("Person {} not found", id),
            None => anyhow::anyhow!("No persons found"),
        }));
    }

    Ok(Json(persons.into_iter().map(document_to_json).collect()))
}

pub async fn create_person(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<PersonPayload>, AppError>,
) -> Result<Json<InsertResponse>, AppError> {
    let person = Person::from(payload);
    let result = state.db.insert_person(&person).await?;
    let response = InsertResponse::from(result);

    tracing::info!(person_id = %response.inserted_id, "Person created");

    Ok(Json(response))
}

pub async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<PersonPayload>, AppError>,
) -> Result<Json<UpdateResponse>, AppError> {
    let id = parse_person_id(&id)?;
    let person = Person::from(payload);
    let result = state.db.replace_person_fields(id, &person).await?;

    tracing::info!(
        person_id = %id,
        matched = result.matched_count,
        modified = result.modified_count,
        "Person updated"
    );

    Ok(Json(UpdateResponse::from(result)))
}

pub async fn delete_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = parse_person_id(&id)?;
    let result = state.db.delete_person(id).await?;

    tracing::info!(person_id = %id, deleted = result.deleted_count, "Person deleted");

    Ok(Json(DeleteResponse::from(result)))
}
