//! Quotation store backed by a single SQLite table

use rusqlite::{Connection, ErrorCode, OptionalExtension, params, params_from_iter};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::app::models::{KeyOptions, Quotation, QuotationKey, StoredQuotation};
use crate::constants::{QUOTATION_TABLE, REQUIRED_FIELDS};
use crate::{Error, Result};

fn schema_sql() -> String {
    format!(
        "
CREATE TABLE IF NOT EXISTS {QUOTATION_TABLE} (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tool_type       TEXT NOT NULL,
    program_name    TEXT NOT NULL,
    part_name       TEXT NOT NULL,
    part_version    TEXT NOT NULL,
    quotation_date  TEXT NOT NULL,
    supplier_name   TEXT NOT NULL,
    data_json       TEXT NOT NULL,
    UNIQUE (tool_type, program_name, part_name,
            part_version, quotation_date, supplier_name)
);
"
    )
}

/// Persistent quotation store
#[derive(Debug)]
pub struct QuotationStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl QuotationStore {
    /// Open or create the database file and make sure the table exists
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::io(
                    format!("Failed to create database directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let conn = Connection::open(path).map_err(|e| {
            Error::database(format!("Failed to open database {}", path.display()), e)
        })?;

        let store = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        store.init_schema()?;

        info!("Opened quotation store at {}", path.display());
        Ok(store)
    }

    /// Open a throwaway in-memory store
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::database("Failed to open in-memory database", e))?;

        let store = Self { conn, path: None };
        store.init_schema()?;
        Ok(store)
    }

    /// Database file location, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(&schema_sql())
            .map_err(|e| Error::database("Failed to create quotation table", e))
    }

    /// Validate and save a submitted form payload
    pub fn save_payload(&self, payload: Value) -> Result<i64> {
        let quotation = Quotation::from_payload(payload)?;
        self.save(&quotation)
    }

    /// Save a quotation, returning its new row id
    ///
    /// Fails with [`Error::DuplicateRecord`] when a quotation with the same
    /// six-field key already exists.
    pub fn save(&self, quotation: &Quotation) -> Result<i64> {
        let data_json = quotation.data_json()?;
        let [tool_type, program_name, part_name, part_version, quotation_date, supplier_name] =
            quotation.key.values();

        let sql = format!(
            "INSERT INTO {QUOTATION_TABLE}
               (tool_type, program_name, part_name, part_version,
                quotation_date, supplier_name, data_json)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
        );
        let inserted = self.conn.execute(
            &sql,
            params![
                tool_type,
                program_name,
                part_name,
                part_version,
                quotation_date,
                supplier_name,
                data_json
            ],
        );

        match inserted {
            Ok(_) => {
                let id = self.conn.last_insert_rowid();
                debug!("Saved quotation {} as record {}", describe(&quotation.key), id);
                Ok(id)
            }
            Err(rusqlite::Error::SqliteFailure(failure, _))
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                debug!("Duplicate quotation {}", describe(&quotation.key));
                Err(Error::DuplicateRecord)
            }
            Err(e) => Err(Error::database("Failed to save quotation", e)),
        }
    }

    /// Distinct non-empty stored values of every key field, ascending
    pub fn key_options(&self) -> Result<KeyOptions> {
        let mut options = KeyOptions::new();

        for column in REQUIRED_FIELDS {
            let sql = format!(
                "SELECT DISTINCT {column} FROM {QUOTATION_TABLE} ORDER BY {column}"
            );
            let mut stmt = self
                .conn
                .prepare(&sql)
                .map_err(|e| Error::database(format!("Failed to query {} options", column), e))?;

            let values = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<std::result::Result<Vec<_>, _>>()?
                .into_iter()
                .filter(|value| !value.is_empty())
                .collect();

            options.insert(column.to_string(), values);
        }

        Ok(options)
    }

    /// Look up the quotation stored under a key
    pub fn find(&self, key: &QuotationKey) -> Result<StoredQuotation> {
        let sql = format!(
            "SELECT id, data_json FROM {QUOTATION_TABLE} WHERE {}",
            REQUIRED_FIELDS
                .iter()
                .enumerate()
                .map(|(i, column)| format!("{} = ?{}", column, i + 1))
                .collect::<Vec<_>>()
                .join(" AND ")
        );

        let found = self
            .conn
            .query_row(&sql, params_from_iter(key.values()), |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
            })
            .optional()
            .map_err(|e| Error::database("Failed to look up quotation", e))?;

        let (id, data_json) = found.ok_or(Error::RecordNotFound)?;
        Ok(StoredQuotation {
            id,
            key: key.clone(),
            data_json,
        })
    }

    /// Delete a quotation by row id, reporting whether a row was removed
    pub fn delete(&self, id: i64) -> Result<bool> {
        let changed = self
            .conn
            .execute(
                &format!("DELETE FROM {QUOTATION_TABLE} WHERE id = ?1"),
                params![id],
            )
            .map_err(|e| Error::database(format!("Failed to delete record {}", id), e))?;

        debug!("Delete of record {} removed {} rows", id, changed);
        Ok(changed == 1)
    }

    /// Number of stored quotations
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {QUOTATION_TABLE}"),
            [],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

fn describe(key: &QuotationKey) -> String {
    key.values().join(" / ")
}
