/*!
 * Error types for the kwicindex application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors raised while validating context records
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A required context attribute is absent
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    /// The 'n' attribute of an item could not be parsed
    #[error("Invalid context number '{value}' at position {position}")]
    InvalidNumber {
        /// Raw attribute value
        value: String,
        /// Byte position in the input
        position: u64,
    },

    /// Two punctuation tags of the same type within one item
    #[error("Duplicate punctuation type '{punctuation_type}' at position {position}")]
    DuplicatePunctuation {
        /// Punctuation type attribute
        punctuation_type: String,
        /// Byte position in the input
        position: u64,
    },

    /// An end punctuation tag preceding an init punctuation tag
    #[error("Punctuation types in incorrect order at position {position}")]
    PunctuationOrder {
        /// Byte position in the input
        position: u64,
    },

    /// An init punctuation tag after the keyword of an item
    #[error("Init punctuation after keyword at position {position}")]
    InitPunctuationAfterKeyword {
        /// Byte position in the input
        position: u64,
    },

    /// An end punctuation tag before the keyword of an item
    #[error("End punctuation before keyword at position {position}")]
    EndPunctuationBeforeKeyword {
        /// Byte position in the input
        position: u64,
    },

    /// An unknown type attribute value on an item
    #[error("Unknown item type '{value}' at position {position}")]
    UnknownItemType {
        /// Raw attribute value
        value: String,
        /// Byte position in the input
        position: u64,
    },
}

/// Errors raised while reading context XML data
#[derive(Error, Debug)]
pub enum XmlError {
    /// Error from the underlying XML parser
    #[error("XML parse error at position {position}: {message}")]
    Parse {
        /// Parser error message
        message: String,
        /// Byte position in the input
        position: u64,
    },

    /// Structurally unexpected content
    #[error("Unexpected XML content at position {position}: {message}")]
    UnexpectedContent {
        /// Description of the violation
        message: String,
        /// Byte position in the input
        position: u64,
    },

    /// A context item failed validation
    #[error("Invalid context item: {0}")]
    Validation(#[from] ValidationError),
}

impl XmlError {
    /// Wraps a parser error with its input position.
    pub fn parse<E: std::fmt::Display>(error: E, position: u64) -> Self {
        Self::Parse {
            message: error.to_string(),
            position,
        }
    }
}

/// Errors that can occur while serializing an export document
#[derive(Error, Debug)]
pub enum ExportError {
    /// Error writing the XML event stream
    #[error("Failed to write XML output: {0}")]
    XmlWrite(String),

    /// Error encoding the JSON output
    #[error("Failed to encode JSON output: {0}")]
    JsonEncode(#[from] serde_json::Error),

    /// The serialized output is not valid UTF-8
    #[error("Export output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

impl From<std::io::Error> for ExportError {
    fn from(error: std::io::Error) -> Self {
        Self::XmlWrite(error.to_string())
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from context validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Error from reading context XML
    #[error("XML error: {0}")]
    Xml(#[from] XmlError),

    /// Error from serializing an export document
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
