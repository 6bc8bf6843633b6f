// crates/catalog/src/error.rs
//! Error types for catalog processing

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while reading, rewriting or writing a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Malformed XML in the input document
    #[error("XML parsing error at byte {position}: {message}")]
    Xml { position: u64, message: String },

    /// The document has no root element
    #[error("Document has no root element")]
    EmptyDocument,

    /// A required element could not be located
    #[error("Missing required element: {0}")]
    MissingElement(String),

    /// An attribute value could not be interpreted
    #[error("Invalid value for attribute '{attribute}' on <{element}>: {value:?}")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },

    /// Failed to serialize the document
    #[error("Failed to serialize document: {0}")]
    Serialize(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    pub(crate) fn xml(position: impl TryInto<u64>, message: impl std::fmt::Display) -> Self {
        CatalogError::Xml {
            position: position.try_into().unwrap_or(u64::MAX),
            message: message.to_string(),
        }
    }

    pub(crate) fn serialize(err: impl std::fmt::Display) -> Self {
        CatalogError::Serialize(err.to_string())
    }
}
