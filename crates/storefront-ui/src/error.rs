use storefront_core::CoreError;
use thiserror::Error;

pub type UiResult<T> = Result<T, UiError>;

#[derive(Debug, Error)]
pub enum UiError {
    /// A container lacks a slot its view needs. Raised at construction time.
    #[error("container has no element matching {selector}")]
    MissingSlot { selector: String },
    #[error(transparent)]
    Core(#[from] CoreError),
}
