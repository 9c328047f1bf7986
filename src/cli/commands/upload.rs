//! Upload command: parse a quotation CSV export into form fields

use serde::Serialize;
use tracing::info;

use super::shared::{
    CommandStatus, load_configuration, print_breakdown, print_json, print_pairs, print_status,
};
use crate::Result;
use crate::app::models::UploadResponse;
use crate::app::services::cost_breakdown::CostBreakdown;
use crate::app::services::field_mapping::{MappedRecord, map_record};
use crate::app::services::upload::{UploadLimits, UploadedFile, upload_response};
use crate::cli::args::UploadArgs;

/// Upload response extended with the form key translation and its costs
#[derive(Debug, Serialize)]
struct MappedUploadReport<'a> {
    #[serde(flatten)]
    response: &'a UploadResponse,
    mapped: &'a MappedRecord,
    breakdown: CostBreakdown,
}

impl<'a> MappedUploadReport<'a> {
    fn new(response: &'a UploadResponse, mapped: &'a MappedRecord) -> Self {
        Self {
            response,
            mapped,
            breakdown: CostBreakdown::from_record(&mapped.mapped),
        }
    }
}

/// Run the upload command
pub async fn run_upload(args: UploadArgs) -> Result<CommandStatus> {
    let config = load_configuration(&args.common)?;

    info!("Parsing upload {}", args.file.display());
    let file = UploadedFile::from_path(&args.file).await?;
    let limits = UploadLimits {
        max_upload_bytes: config.upload.max_upload_bytes,
    };

    let response = upload_response(Some(&file), &limits);
    let mapped = (args.mapped && response.success).then(|| map_record(&response.data));
    let report = mapped
        .as_ref()
        .map(|mapped| MappedUploadReport::new(&response, mapped));

    if args.common.json_output() {
        match &report {
            Some(report) => print_json(report)?,
            None => print_json(&response)?,
        }
    } else {
        print_status(response.success, &response.message);
        if response.success && !response.data.is_empty() {
            print_pairs("Parsed fields", &response.data);
        }
        if let Some(report) = &report {
            print_pairs("Form fields", &report.mapped.mapped);
            if !report.mapped.unmapped.is_empty() {
                print_pairs("Unmapped labels", &report.mapped.unmapped);
            }
            print_breakdown(&report.breakdown);
        }
    }

    Ok(CommandStatus::from_success(response.success))
}
