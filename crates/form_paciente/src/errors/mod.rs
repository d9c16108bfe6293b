use thiserror::Error;

/// Centralized error type for the form enhancer
#[derive(Error, Debug)]
pub enum FormError {
    #[error("JSON (de)serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Element not found: #{0}")]
    MissingElement(String),

    #[error("Element #{id} is a <{tag}> and carries no value")]
    UnsupportedElement { id: String, tag: String },

    #[error("DOM error: {0}")]
    Dom(String),
}

/// Alias for fallible operations in the form enhancer
pub type FormResult<T> = Result<T, FormError>;
