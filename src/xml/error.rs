/// Error types for XML tree parsing
use thiserror::Error;

#[derive(Error, Debug)]
pub enum XmlError {
    #[error("XML syntax error at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    #[error("Invalid UTF-8 in {0}")]
    InvalidUtf8(&'static str),

    #[error("Unknown entity reference &{0};")]
    UnknownEntity(String),

    #[error("Unclosed element <{0}> at end of document")]
    UnclosedElement(String),

    #[error("More than one root element: <{0}>")]
    MultipleRoots(String),

    #[error("Document has no root element")]
    NoRoot,
}

pub type Result<T> = std::result::Result<T, XmlError>;
