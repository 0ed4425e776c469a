use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// A person document as stored in MongoDB.
///
/// Every field is optional: documents are written without validation, and
/// updates may null out any field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "firstname")]
    pub first_name: Option<String>,
    #[serde(rename = "lastname")]
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

impl Person {
    /// `$set` body that overwrites every field; absent values become null.
    pub fn field_set(&self) -> Document {
        doc! {
            "firstname": self.first_name.clone(),
            "lastname": self.last_name.clone(),
            "email": self.email.clone(),
            "age": self.age,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, Bson};

    #[test]
    fn new_person_serializes_without_id() {
        let person = Person {
            first_name: Some("Ann".to_string()),
            ..Default::default()
        };

        let document = bson::to_document(&person).unwrap();

        assert!(!document.contains_key("_id"));
        assert_eq!(document.get_str("firstname").unwrap(), "Ann");
        assert_eq!(document.get("lastname"), Some(&Bson::Null));
    }

    #[test]
    fn stored_document_with_missing_fields_deserializes() {
        let id = ObjectId::new();
        let person: Person = bson::from_document(doc! { "_id": id, "email": "a@x.com" }).unwrap();

        assert_eq!(person.id, Some(id));
        assert_eq!(person.email.as_deref(), Some("a@x.com"));
        assert_eq!(person.first_name, None);
        assert_eq!(person.age, None);
    }

    #[test]
    fn field_set_covers_every_field() {
        let person = Person {
            id: Some(ObjectId::new()),
            last_name: Some("Lee".to_string()),
            age: Some(30),
            ..Default::default()
        };

        let set = person.field_set();

        assert_eq!(set.len(), 4);
        assert!(!set.contains_key("_id"));
        assert_eq!(set.get("firstname"), Some(&Bson::Null));
        assert_eq!(set.get_str("lastname").unwrap(), "Lee");
        assert_eq!(set.get("email"), Some(&Bson::Null));
        assert_eq!(set.get_i32("age").unwrap(), 30);
    }
}
