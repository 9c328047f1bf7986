//! Data models for tooling cost quotations
//!
//! This module contains the records produced by CSV uploads, the persisted
//! quotation types identified by their six key fields, and the uniform
//! response payloads reported back to callers.

use crate::constants::REQUIRED_FIELDS;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

// =============================================================================
// Parsed Upload Record
// =============================================================================

/// Field label to value mapping produced by the CSV record parser
///
/// Later rows overwrite earlier ones with the same label. A `BTreeMap` keeps
/// serialized output stable across runs.
pub type ParsedRecord = BTreeMap<String, String>;

/// Distinct stored values per key field, used to populate lookup selectors
pub type KeyOptions = BTreeMap<String, Vec<String>>;

// =============================================================================
// Quotation Identity
// =============================================================================

/// The six fields that together identify a quotation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuotationKey {
    pub tool_type: String,
    pub program_name: String,
    pub part_name: String,
    pub part_version: String,
    pub quotation_date: String,
    pub supplier_name: String,
}

impl QuotationKey {
    /// Build a key from a field accessor, reporting every absent field at once
    ///
    /// Fields are checked in `REQUIRED_FIELDS` order so the missing list is
    /// reported the same way regardless of input ordering.
    pub fn from_fields<F>(mut get: F) -> Result<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut values = Vec::with_capacity(REQUIRED_FIELDS.len());
        let mut missing = Vec::new();

        for field in REQUIRED_FIELDS {
            match get(field) {
                Some(value) if !value.is_empty() => values.push(value),
                _ => missing.push(field.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(Error::missing_fields(missing));
        }

        let mut values = values.into_iter();
        let mut next = || values.next().unwrap_or_default();
        Ok(Self {
            tool_type: next(),
            program_name: next(),
            part_name: next(),
            part_version: next(),
            quotation_date: next(),
            supplier_name: next(),
        })
    }

    /// Key values in `REQUIRED_FIELDS` order
    pub fn values(&self) -> [&str; 6] {
        [
            &self.tool_type,
            &self.program_name,
            &self.part_name,
            &self.part_version,
            &self.quotation_date,
            &self.supplier_name,
        ]
    }
}

// =============================================================================
// Quotation Records
// =============================================================================

/// A quotation ready to be persisted: its key plus the full form payload
#[derive(Debug, Clone, PartialEq)]
pub struct Quotation {
    pub key: QuotationKey,
    pub data: Map<String, Value>,
}

impl Quotation {
    /// Validate a submitted form payload
    ///
    /// The payload must be a JSON object carrying every required key field.
    /// Strings must be non-empty; non-zero numbers are accepted in their
    /// textual form and `true` is stored as `1`.
    pub fn from_payload(payload: Value) -> Result<Self> {
        let Value::Object(data) = payload else {
            return Err(Error::data_validation("Quotation payload must be a JSON object"));
        };

        let key = QuotationKey::from_fields(|field| data.get(field).and_then(key_text))?;
        Ok(Self { key, data })
    }

    /// Serialize the full payload, keeping non-ASCII text as-is
    pub fn data_json(&self) -> Result<String> {
        serde_json::to_string(&self.data)
            .map_err(|e| Error::serialization("Failed to serialize quotation payload", e))
    }
}

/// Textual form of a key field value, if it counts as present
///
/// Only falsy values are absent. SQLite keeps `true` as the integer 1.
fn key_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        _ => None,
    }
}

/// A quotation as read back from the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredQuotation {
    pub id: i64,

    #[serde(flatten)]
    pub key: QuotationKey,

    /// Full form payload as stored
    pub data_json: String,
}

impl StoredQuotation {
    /// Decode the stored form payload
    pub fn data(&self) -> Result<Map<String, Value>> {
        serde_json::from_str(&self.data_json)
            .map_err(|e| Error::serialization(format!("Corrupt payload for record {}", self.id), e))
    }
}

// =============================================================================
// Responses
// =============================================================================

/// Uniform response of the CSV upload boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,

    /// Parsed record on success, empty on failure
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub data: ParsedRecord,

    pub message: String,
}

impl UploadResponse {
    /// Successful parse reporting the number of extracted fields
    pub fn parsed(data: ParsedRecord) -> Self {
        let message = format!("Parsed CSV file, found {} fields", data.len());
        Self {
            success: true,
            data,
            message,
        }
    }

    /// Failed upload; parse failures are reported with their underlying cause
    pub fn failed(error: &Error) -> Self {
        let message = if error.is_parse_failure() {
            format!("File parse error: {}", error)
        } else {
            error.to_string()
        };
        Self {
            success: false,
            data: ParsedRecord::new(),
            message,
        }
    }

    /// Fold an upload outcome into a response
    pub fn from_result(result: Result<ParsedRecord>) -> Self {
        match result {
            Ok(record) => Self::parsed(record),
            Err(e) => Self::failed(&e),
        }
    }
}

/// Status response of save and delete operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub msg: Option<String>,
}

impl StatusResponse {
    pub fn ok(msg: impl Into<String>) -> Self {
        Self {
            ok: true,
            msg: Some(msg.into()),
        }
    }

    pub fn failed(msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            msg: Some(msg.into()),
        }
    }

    /// Bare outcome without a message
    pub fn outcome(ok: bool) -> Self {
        Self { ok, msg: None }
    }
}

/// Response of a single quotation lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordResponse {
    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub record: Option<StoredQuotation>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub msg: Option<String>,
}

impl RecordResponse {
    pub fn found(record: StoredQuotation) -> Self {
        Self {
            ok: true,
            record: Some(record),
            msg: None,
        }
    }

    pub fn failed(msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            record: None,
            msg: Some(msg.into()),
        }
    }
}
