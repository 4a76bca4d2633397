/// Domain-level errors shared by every layer above `core`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a missing movie.
    pub fn movie_not_found(id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: "Movie",
            id: id.into(),
        }
    }

    /// Shorthand for a missing favorite record.
    pub fn favorite_not_found(id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: "Favorite",
            id: id.into(),
        }
    }
}
