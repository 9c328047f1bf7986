//! Reference data commands: the field mapping table and form dropdowns

use std::collections::BTreeMap;

use super::shared::{
    CommandStatus, load_configuration, print_json, print_pairs, print_status, print_values,
};
use crate::{Error, Result};
use crate::app::models::StatusResponse;
use crate::app::services::dropdown_options::form_options;
use crate::app::services::field_mapping::field_mapping;
use crate::cli::args::{DropdownsArgs, MappingArgs};

/// Run the mapping command
pub async fn run_mapping(args: MappingArgs) -> Result<CommandStatus> {
    let table: BTreeMap<&String, &String> = field_mapping().iter().collect();

    if args.common.json_output() {
        print_json(&table)?;
    } else {
        print_pairs("CSV label to form key", table);
    }

    Ok(CommandStatus::Succeeded)
}

/// Run the dropdowns command
pub async fn run_dropdowns(args: DropdownsArgs) -> Result<CommandStatus> {
    let config = load_configuration(&args.common)?;

    let options = match form_options(
        &args.tool_type,
        &config.workbook_path(),
        &config.reference.list_sheet,
    ) {
        Ok(options) => options,
        Err(e @ Error::UnsupportedToolType { .. }) => {
            let response = StatusResponse::failed(e.to_string());
            if args.common.json_output() {
                print_json(&response)?;
            } else {
                print_status(false, &e.to_string());
            }
            return Ok(CommandStatus::Failed);
        }
        Err(e) => return Err(e),
    };

    if args.common.json_output() {
        print_json(&options)?;
    } else {
        println!("Dropdown values for the {} form", args.tool_type);
        print_values("Tool type", &options.tool_types);
        print_values("Injection system", &options.injection_systems);
        print_values("Mold type", &options.mold_types);
        print_values("Hot runner system", &options.hot_runner_systems);
        print_values("Cold runner system", &options.cold_runner_systems);
        print_values("Gate type", &options.gate_types);
        print_values("Hot runner gate type", &options.hot_runner_gate_types);
    }

    Ok(CommandStatus::Succeeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::CommonArgs;
    use crate::cli::commands::test_support::isolated;

    fn dropdowns(tool_type: &str, common: CommonArgs) -> DropdownsArgs {
        DropdownsArgs {
            tool_type: tool_type.to_string(),
            common,
        }
    }

    #[test]
    fn test_injection_dropdowns_fall_back() {
        isolated(|common, _dir| async move {
            let status = run_dropdowns(dropdowns("injection", common)).await.unwrap();
            assert_eq!(status, CommandStatus::Succeeded);
        });
    }

    #[test]
    fn test_other_tool_types_under_development() {
        isolated(|common, _dir| async move {
            let status = run_dropdowns(dropdowns("die_casting", common)).await.unwrap();
            assert_eq!(status, CommandStatus::Failed);
        });
    }

    #[tokio::test]
    async fn test_mapping_table() {
        let args = MappingArgs {
            common: CommonArgs::default(),
        };

        assert_eq!(run_mapping(args).await.unwrap(), CommandStatus::Succeeded);
    }
}
