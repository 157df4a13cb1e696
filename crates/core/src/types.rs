use uuid::Uuid;

use crate::error::CoreError;

/// All primary keys are time-ordered UUIDs (v7).
pub type DbId = Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Allocate a fresh primary key.
///
/// v7 ids sort by creation time, so listing by id is also listing by age.
pub fn new_id() -> DbId {
    Uuid::now_v7()
}

/// Parse a client-supplied identifier.
///
/// A string that is not a UUID cannot name any row, so it is reported as
/// [`CoreError::NotFound`] for `entity` rather than as a validation failure.
pub fn parse_id(raw: &str, entity: &'static str) -> Result<DbId, CoreError> {
    Uuid::parse_str(raw.trim()).map_err(|_| CoreError::not_found(entity, raw))
}

/// Parse an identifier embedded in a payload as a foreign reference.
///
/// Unlike [`parse_id`], a malformed value here is the caller pointing at
/// something that cannot exist, which is an invalid reference.
pub fn parse_reference(raw: &str, field: &str) -> Result<DbId, CoreError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| CoreError::InvalidReference(format!("{field} '{raw}' is not a valid id")))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn new_ids_are_v7_and_increasing() {
        let a = new_id();
        let b = new_id();
        assert_eq!(a.get_version_num(), 7);
        assert!(b > a, "later ids must sort after earlier ones");
    }

    #[test]
    fn parse_id_accepts_uuid() {
        let id = new_id();
        assert_eq!(parse_id(&id.to_string(), "batch").unwrap(), id);
    }

    #[test]
    fn malformed_id_is_not_found() {
        let err = parse_id("not-a-uuid", "notification").unwrap_err();
        assert_matches!(err, CoreError::NotFound { entity: "notification", ref id } if id == "not-a-uuid");
    }

    #[test]
    fn malformed_reference_is_invalid_reference() {
        let err = parse_reference("42", "notification_template_id").unwrap_err();
        assert_matches!(err, CoreError::InvalidReference(msg) if msg.contains("not a valid id"));
    }
}
