//! SQLite persistence for tooling cost quotations
//!
//! Quotations are stored one row per six-field key, with the full submitted
//! form kept as JSON text. The key columns carry a uniqueness constraint, so
//! saving the same quotation twice is rejected by the database itself.
//!
//! ## Usage
//!
//! ```rust
//! use serde_json::json;
//! use tool_cbd::app::services::quotation_store::QuotationStore;
//!
//! # fn example() -> tool_cbd::Result<()> {
//! let store = QuotationStore::open_in_memory()?;
//! let id = store.save_payload(json!({
//!     "tool_type": "Injection",
//!     "program_name": "X1",
//!     "part_name": "Bezel",
//!     "part_version": "B",
//!     "quotation_date": "2024-05-01",
//!     "supplier_name": "Acme Mold",
//! }))?;
//!
//! assert!(store.delete(id)?);
//! # Ok(())
//! # }
//! ```

pub mod store;

#[cfg(test)]
pub mod tests;

pub use store::QuotationStore;
