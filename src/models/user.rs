use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::require;
use crate::utils::AppError;

/// User document as stored in the `users` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    /// Unique across users (pre-checked on create, unique index in MongoDB)
    pub email: String,
}

/// Body of POST /users and PUT /users/{id}
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct UserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl UserRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require("name", &self.name)?;
        require("email", &self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id.to_hex(),
            name: u.name,
            email: u.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_name_and_email() {
        let request = UserRequest { name: "Ana".into(), email: "  ".into() };
        match request.validate() {
            Err(AppError::ValidationFailure(msg)) => assert_eq!(msg, "email is required"),
            other => panic!("unexpected result: {:?}", other),
        }

        let request = UserRequest { name: "Ana".into(), email: "ana@example.com".into() };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_response_uses_hex_id() {
        let id = ObjectId::new();
        let json = serde_json::to_value(UserResponse::from(User {
            id,
            name: "Ana".into(),
            email: "ana@example.com".into(),
        }))
        .unwrap();

        assert_eq!(json["_id"], id.to_hex());
        assert_eq!(json["email"], "ana@example.com");
    }
}
