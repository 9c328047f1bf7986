//! CSV upload boundary
//!
//! Checks the preconditions of an uploaded file part, decodes it and hands
//! the text to the record parser. Every failure comes back as an [`Error`]
//! that [`UploadResponse::from_result`] folds into a uniform response, so no
//! upload can take the caller down.

use std::path::Path;
use tracing::{debug, info, warn};

use super::csv_record_parser::CsvRecordParser;
use crate::app::models::{ParsedRecord, UploadResponse};
use crate::constants::{CSV_EXTENSION, DEFAULT_MAX_UPLOAD_BYTES, UTF8_BOM};
use crate::{Error, Result};

/// One uploaded file part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Client-side file name, possibly empty
    pub filename: String,

    /// Raw file bytes
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Read a file from disk as an upload named after its file name
    pub async fn from_path(path: &Path) -> Result<Self> {
        let content = tokio::fs::read(path)
            .await
            .map_err(|e| Error::io(format!("Failed to read upload {}", path.display()), e))?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self { filename, content })
    }
}

/// Limits applied at the upload boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_upload_bytes: usize,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Validate, decode and parse an upload
///
/// Preconditions are checked in order: a file part is present, its name is
/// not empty, the name ends with `.csv` in any letter case, and the content
/// fits the size ceiling.
pub fn handle_upload(file: Option<&UploadedFile>, limits: &UploadLimits) -> Result<ParsedRecord> {
    let file = file.ok_or(Error::NoFileUploaded)?;

    if file.filename.is_empty() {
        return Err(Error::NoFileSelected);
    }

    if !file.filename.to_lowercase().ends_with(CSV_EXTENSION) {
        return Err(Error::unsupported_file_type(&file.filename));
    }

    if file.content.len() > limits.max_upload_bytes {
        return Err(Error::upload_too_large(
            file.content.len(),
            limits.max_upload_bytes,
        ));
    }

    let content = decode_content(&file.content)?;
    let result = CsvRecordParser::new().parse_content(content)?;

    info!(
        "Parsed upload '{}': {} fields from {} rows",
        file.filename,
        result.record.len(),
        result.stats.total_rows
    );
    Ok(result.record)
}

/// Run an upload and fold the outcome into a response
pub fn upload_response(file: Option<&UploadedFile>, limits: &UploadLimits) -> UploadResponse {
    let result = handle_upload(file, limits);
    if let Err(e) = &result {
        warn!("Upload rejected: {}", e);
    }
    UploadResponse::from_result(result)
}

/// Decode upload bytes as UTF-8, dropping a leading byte-order mark
pub(crate) fn decode_content(bytes: &[u8]) -> Result<&str> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::decoding("Upload is not valid UTF-8 text", e))?;

    match text.strip_prefix(UTF8_BOM) {
        Some(stripped) => {
            debug!("Dropping UTF-8 byte-order mark");
            Ok(stripped)
        }
        None => Ok(text),
    }
}
