/// Domain-level errors shared across the workspace.
///
/// Each variant maps onto exactly one HTTP status at the API boundary, so
/// callers should pick the variant by what the client must do next rather
/// than by where the failure originated.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The addressed row does not exist under the calling tenant. Also used
    /// for ids that do not parse and for "already sent" / "already confirmed"
    /// states that collapse into absence.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The write collides with an existing row, e.g. a taken name or an
    /// existing group membership.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A reference inside a payload points nowhere or is not an id at all.
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`] with any displayable id.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        CoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
