//! Quotation store commands: save, options, record and delete

use colored::*;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use super::shared::{
    CommandStatus, load_configuration, open_store, print_breakdown, print_json, print_pairs,
    print_status, print_values,
};
use crate::app::models::{RecordResponse, StatusResponse};
use crate::app::services::cost_breakdown::CostBreakdown;
use crate::cli::args::{DeleteArgs, OptionsArgs, RecordArgs, SaveArgs};
use crate::constants::{INCOMPLETE_KEY_MESSAGE, SAVED_MESSAGE};
use crate::{Error, Result};

/// Run the save command
pub async fn run_save(args: SaveArgs) -> Result<CommandStatus> {
    let config = load_configuration(&args.common)?;

    let text = tokio::fs::read_to_string(&args.payload_file)
        .await
        .map_err(|e| {
            Error::io(
                format!("Failed to read payload {}", args.payload_file.display()),
                e,
            )
        })?;

    let store = open_store(&config)?;
    let response = match serde_json::from_str::<Value>(&text)
        .map_err(|e| Error::serialization("Payload is not valid JSON", e))
        .and_then(|payload| store.save_payload(payload))
    {
        Ok(id) => {
            info!("Saved quotation as record {}", id);
            StatusResponse::ok(SAVED_MESSAGE)
        }
        Err(
            e @ (Error::MissingFields { .. }
            | Error::DuplicateRecord
            | Error::DataValidation { .. }
            | Error::Serialization { .. }),
        ) => {
            warn!("Quotation not saved: {}", e);
            StatusResponse::failed(e.to_string())
        }
        Err(e) => return Err(e),
    };

    print_status_response(&response, args.common.json_output())?;
    Ok(CommandStatus::from_success(response.ok))
}

/// Run the options command
pub async fn run_options(args: OptionsArgs) -> Result<CommandStatus> {
    let config = load_configuration(&args.common)?;
    let store = open_store(&config)?;

    let options = store.key_options()?;

    if args.common.json_output() {
        print_json(&options)?;
    } else {
        println!("{}", "Stored key values".bright_green().bold());
        for (field, values) in &options {
            print_values(field, values);
        }
    }

    Ok(CommandStatus::Succeeded)
}

/// Lookup response extended with the cost breakdown of the stored form
#[derive(Debug, Serialize)]
struct RecordReport<'a> {
    #[serde(flatten)]
    response: &'a RecordResponse,

    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<CostBreakdown>,
}

/// Run the record command
pub async fn run_record(args: RecordArgs) -> Result<CommandStatus> {
    let config = load_configuration(&args.common)?;

    let response = match args.key() {
        Ok(key) => {
            let store = open_store(&config)?;
            match store.find(&key) {
                Ok(record) => RecordResponse::found(record),
                Err(e @ Error::RecordNotFound) => RecordResponse::failed(e.to_string()),
                Err(e) => return Err(e),
            }
        }
        Err(Error::MissingFields { .. }) => RecordResponse::failed(INCOMPLETE_KEY_MESSAGE),
        Err(e) => return Err(e),
    };

    let data = response.record.as_ref().map(|record| record.data()).transpose()?;
    let breakdown = data
        .as_ref()
        .filter(|_| args.breakdown)
        .map(CostBreakdown::from_payload);

    if args.common.json_output() {
        print_json(&RecordReport {
            response: &response,
            breakdown,
        })?;
    } else {
        match (&response.record, &data) {
            (Some(record), Some(data)) => {
                print_status(true, &format!("Found record {}", record.id));
                let fields: Vec<(String, String)> = data
                    .iter()
                    .map(|(key, value)| (key.clone(), display_value(value)))
                    .collect();
                print_pairs("Quotation", fields.iter().map(|(k, v)| (k, v)));
                if let Some(breakdown) = &breakdown {
                    print_breakdown(breakdown);
                }
            }
            _ => print_status(false, response.msg.as_deref().unwrap_or_default()),
        }
    }

    Ok(CommandStatus::from_success(response.ok))
}

/// Run the delete command
pub async fn run_delete(args: DeleteArgs) -> Result<CommandStatus> {
    let config = load_configuration(&args.common)?;
    let store = open_store(&config)?;

    let deleted = store.delete(args.id)?;
    info!("Delete of record {}: {}", args.id, deleted);

    let response = StatusResponse::outcome(deleted);
    if args.common.json_output() {
        print_json(&response)?;
    } else if deleted {
        print_status(true, &format!("Deleted record {}", args.id));
    } else {
        print_status(false, &format!("No record with id {}", args.id));
    }

    Ok(CommandStatus::from_success(deleted))
}

fn print_status_response(response: &StatusResponse, json: bool) -> Result<()> {
    if json {
        print_json(response)
    } else {
        print_status(response.ok, response.msg.as_deref().unwrap_or_default());
        Ok(())
    }
}

/// Strings print bare, everything else as JSON
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::StoredQuotation;
    use crate::cli::args::CommonArgs;
    use crate::cli::commands::test_support::isolated;
    use serde_json::json;
    use std::path::{Path, PathBuf};

    fn write_payload(dir: &Path, payload: &Value) -> PathBuf {
        let path = dir.join("payload.json");
        std::fs::write(&path, payload.to_string()).unwrap();
        path
    }

    fn payload() -> Value {
        json!({
            "tool_type": "Injection",
            "program_name": "X1",
            "part_name": "Bezel",
            "part_version": "B",
            "quotation_date": "2024-05-01",
            "supplier_name": "Acme Mold",
            "tool_design_hrs": 40,
            "tool_design_rate": "250"
        })
    }

    fn record_args(common: &CommonArgs, supplier: Option<&str>) -> RecordArgs {
        RecordArgs {
            tool_type: Some("Injection".to_string()),
            program_name: Some("X1".to_string()),
            part_name: Some("Bezel".to_string()),
            part_version: Some("B".to_string()),
            quotation_date: Some("2024-05-01".to_string()),
            supplier_name: supplier.map(str::to_string),
            breakdown: true,
            common: common.clone(),
        }
    }

    #[test]
    fn test_save_then_duplicate() {
        isolated(|common, dir| async move {
            let args = SaveArgs {
                payload_file: write_payload(&dir, &payload()),
                common,
            };

            assert_eq!(run_save(args.clone()).await.unwrap(), CommandStatus::Succeeded);
            assert_eq!(run_save(args).await.unwrap(), CommandStatus::Failed);
        });
    }

    #[test]
    fn test_save_invalid_json_fails() {
        isolated(|common, dir| async move {
            let payload_file = dir.join("payload.json");
            std::fs::write(&payload_file, "{not json").unwrap();

            let args = SaveArgs {
                payload_file,
                common,
            };
            assert_eq!(run_save(args).await.unwrap(), CommandStatus::Failed);
        });
    }

    #[test]
    fn test_record_lookup() {
        isolated(|common, dir| async move {
            let save = SaveArgs {
                payload_file: write_payload(&dir, &payload()),
                common: common.clone(),
            };
            run_save(save).await.unwrap();

            let found = run_record(record_args(&common, Some("Acme Mold"))).await.unwrap();
            assert_eq!(found, CommandStatus::Succeeded);

            let other = run_record(record_args(&common, Some("Beta"))).await.unwrap();
            assert_eq!(other, CommandStatus::Failed);

            let incomplete = run_record(record_args(&common, None)).await.unwrap();
            assert_eq!(incomplete, CommandStatus::Failed);
        });
    }

    #[test]
    fn test_delete_unknown_id_fails() {
        isolated(|common, _dir| async move {
            let args = DeleteArgs { id: 42, common };
            assert_eq!(run_delete(args).await.unwrap(), CommandStatus::Failed);
        });
    }

    #[test]
    fn test_options_on_empty_store() {
        isolated(|common, _dir| async move {
            let args = OptionsArgs { common };
            assert_eq!(run_options(args).await.unwrap(), CommandStatus::Succeeded);
        });
    }

    #[test]
    fn test_record_report_includes_breakdown() {
        let Value::Object(data) = payload() else {
            unreachable!()
        };
        let record = StoredQuotation {
            id: 3,
            key: crate::app::models::Quotation::from_payload(payload()).unwrap().key,
            data_json: serde_json::to_string(&data).unwrap(),
        };
        let response = RecordResponse::found(record);
        let report = RecordReport {
            response: &response,
            breakdown: Some(CostBreakdown::from_payload(&data)),
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(value["record"]["id"], 3);
        assert_eq!(value["breakdown"]["tool_design_cost"], 10000.0);
        assert_eq!(value["breakdown"]["tool_total_cost"], 10000.0);

        let failed = RecordResponse::failed("Record not found");
        let value = serde_json::to_value(RecordReport {
            response: &failed,
            breakdown: None,
        })
        .unwrap();
        assert!(value.get("breakdown").is_none());
        assert_eq!(value["msg"], "Record not found");
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("Acme")), "Acme");
        assert_eq!(display_value(&json!(40)), "40");
    }
}
