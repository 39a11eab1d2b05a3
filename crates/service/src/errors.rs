use thiserror::Error;

use crate::repo::RepoError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl ServiceError {
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) | ServiceError::Model(_) => 400,
            ServiceError::Repo(e) => e.status_code(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Repo(e) if e.is_not_found())
    }

    pub(crate) fn missing(field: &str) -> Self { Self::Validation(format!("{field} required")) }
}
