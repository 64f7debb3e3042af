use mongodb::bson::oid::ObjectId;

use super::AppError;

/// Parses a 24-character hex identifier as sent by clients.
pub fn parse_object_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw.trim()).map_err(|_| AppError::InvalidIdentifier(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_id() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex()).unwrap(), id);
    }

    #[test]
    fn test_parse_invalid_id() {
        match parse_object_id("not-an-id") {
            Err(AppError::InvalidIdentifier(raw)) => assert_eq!(raw, "not-an-id"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
