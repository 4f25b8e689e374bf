use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A sub-resource that has no id of its own is absent (e.g. lyrics).
    #[error("Not found: {0}")]
    Missing(String),

    #[error("Page {page} does not exist, total pages: {total_pages}")]
    PageNotFound { page: i64, total_pages: i64 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
