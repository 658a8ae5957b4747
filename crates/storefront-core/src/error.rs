use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("product not found: {id}")]
    NotFound { id: String },
    #[error("product id must not be empty")]
    InvalidProductId,
    #[error("catalog fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("catalog response malformed: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CoreError {
    pub fn not_found(id: impl Into<String>) -> Self {
        CoreError::NotFound { id: id.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound { .. })
    }
}
