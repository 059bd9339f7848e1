use thiserror::Error;

#[derive(Error, Debug)]
pub enum CraicError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Annotation set not found: {0}")]
    AnnotationSetNotFound(String),

    #[error("Unsupported file type. Please upload {accepted}.")]
    UnsupportedFileType { name: String, accepted: String },

    #[error("Error reading {name}: {reason}")]
    FileRead { name: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, CraicError>;
