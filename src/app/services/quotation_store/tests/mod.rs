//! Test suite for the quotation store

use serde_json::{Value, json};


/// Complete form payload with the given supplier
pub fn quotation_payload(supplier: &str) -> Value {
    json!({
        "tool_type": "Injection",
        "program_name": "X1",
        "part_name": "Bezel",
        "part_version": "B",
        "quotation_date": "2024-05-01",
        "supplier_name": supplier,
        "cae_rate": "350",
        "moldbase_material": "P20"
    })
}
