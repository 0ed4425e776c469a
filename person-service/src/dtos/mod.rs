pub mod person;

pub use person::{
    document_to_json, parse_person_id, DeleteResponse, InsertResponse, PersonPayload,
    UpdateResponse,
};
