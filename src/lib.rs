//! Tool CBD Library
//!
//! A Rust library for capturing and retrieving injection-mold tooling cost
//! breakdown (CBD) quotations.
//!
//! This library provides tools for:
//! - Parsing human-authored quotation CSV exports, including the tool component table
//! - Translating parsed labels into short form/storage keys
//! - Validating CSV uploads and building uniform upload responses
//! - Persisting quotations in SQLite with six-field deduplication
//! - Loading form dropdown lists from the reference spreadsheet

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod cost_breakdown;
        pub mod csv_record_parser;
        pub mod dropdown_options;
        pub mod field_mapping;
        pub mod quotation_store;
        pub mod quote_comparison;
        pub mod upload;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ParsedRecord, Quotation, QuotationKey, StoredQuotation, UploadResponse};
pub use config::Config;

/// Result type alias for Tool CBD operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for quotation parsing, storage and reference data loading
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV content could not be tokenized
    #[error("CSV parsing error: {message}")]
    CsvParsing {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Upload request carried no file part
    #[error("No file uploaded")]
    NoFileUploaded,

    /// File part present but with an empty filename
    #[error("No file selected")]
    NoFileSelected,

    /// Uploaded filename lacks the `.csv` extension
    #[error("Please upload a CSV file (got '{filename}')")]
    UnsupportedFileType { filename: String },

    /// Upload exceeds the configured ceiling
    #[error("Upload too large: {size} bytes exceeds limit of {limit} bytes")]
    UploadTooLarge { size: usize, limit: usize },

    /// Upload content is not valid UTF-8
    #[error("Decoding error: {message}")]
    Decoding {
        message: String,
        #[source]
        source: std::str::Utf8Error,
    },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Required quotation key fields were absent or empty
    #[error("Missing required fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<String> },

    /// A quotation with the same six-field key is already stored
    #[error("Record already exists and cannot be saved again")]
    DuplicateRecord,

    /// No quotation matches the requested key
    #[error("Record not found")]
    RecordNotFound,

    /// SQLite operation failed
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Reference workbook could not be read
    #[error("Workbook error in '{path}': {message}")]
    Workbook { path: String, message: String },

    /// Only some tool types have a quotation form
    #[error("{tool_type} form is under development, please check back later")]
    UnsupportedToolType { tool_type: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// JSON (de)serialization failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::CsvParsing {
            message: message.into(),
            source,
        }
    }

    /// Create an unsupported file type error
    pub fn unsupported_file_type(filename: impl Into<String>) -> Self {
        Self::UnsupportedFileType {
            filename: filename.into(),
        }
    }

    /// Create an upload size error
    pub fn upload_too_large(size: usize, limit: usize) -> Self {
        Self::UploadTooLarge { size, limit }
    }

    /// Create a decoding error
    pub fn decoding(message: impl Into<String>, source: std::str::Utf8Error) -> Self {
        Self::Decoding {
            message: message.into(),
            source,
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a missing fields error
    pub fn missing_fields(fields: Vec<String>) -> Self {
        Self::MissingFields { fields }
    }

    /// Create a database error with context
    pub fn database(message: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Database {
            message: message.into(),
            source,
        }
    }

    /// Create a workbook error
    pub fn workbook(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Workbook {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported tool type error
    pub fn unsupported_tool_type(tool_type: impl Into<String>) -> Self {
        Self::UnsupportedToolType {
            tool_type: tool_type.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Whether the error came from decoding or tokenizing upload content
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::CsvParsing { .. } | Self::Decoding { .. })
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            message: error.to_string(),
            source: Some(error),
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        Self::Database {
            message: "SQLite operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON conversion failed".to_string(),
            source: error,
        }
    }
}
