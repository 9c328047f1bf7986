//! Tooling cost breakdown (CBD) of a quotation form
//!
//! Section subtotals are derived from the rate, hour and quantity fields of
//! a filled-in form. The tool total is the sum of the section subtotals and
//! each section reports its share of that total. Every monetary figure is
//! rounded to two decimals before it feeds the next step, so the totals add
//! up exactly as printed.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

use crate::constants::{COMPONENT_NAMES, cost_fields};

/// Top-level sections of the cost breakdown, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostSection {
    Design,
    HotRunner,
    ToolComponent,
    AssemblyFitting,
    MoldingTrial,
    Others,
    Profit,
}

impl CostSection {
    pub const ALL: [CostSection; 7] = [
        CostSection::Design,
        CostSection::HotRunner,
        CostSection::ToolComponent,
        CostSection::AssemblyFitting,
        CostSection::MoldingTrial,
        CostSection::Others,
        CostSection::Profit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CostSection::Design => "Design & Engineering",
            CostSection::HotRunner => "Hot Runner",
            CostSection::ToolComponent => "Tool Component",
            CostSection::AssemblyFitting => "Assembly & Fitting",
            CostSection::MoldingTrial => "Molding Trial",
            CostSection::Others => "Others",
            CostSection::Profit => "Profit",
        }
    }
}

/// Subtotal of one section and its share of the tool total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionCost {
    pub section: CostSection,
    pub sum: f64,

    /// Percentage of the tool total, absent while the total is zero
    pub percentage: Option<f64>,
}

/// Quantity, unit cost and total of one tool component
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentCost {
    /// Component key, e.g. `std_components`
    pub component: String,
    pub qty: f64,
    pub unit_cost: f64,
    pub total_cost: f64,
}

/// Full cost breakdown of one quotation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub cae_cost: f64,
    pub tool_design_cost: f64,
    pub components: Vec<ComponentCost>,
    pub assy_cost: f64,
    pub labor_trial_cost: f64,
    pub machine_trial_cost: f64,
    pub sections: Vec<SectionCost>,
    pub tool_total_cost: f64,
}

impl CostBreakdown {
    /// Compute the breakdown from a numeric field accessor
    pub fn from_fields<F>(number: F) -> Self
    where
        F: Fn(&str) -> f64,
    {
        let cae_cost = round2(number(cost_fields::CAE_DESIGN_HRS) * number(cost_fields::CAE_RATE));
        let tool_design_cost =
            round2(number(cost_fields::TOOL_DESIGN_HRS) * number(cost_fields::TOOL_DESIGN_RATE));
        let design_sum = round2(cae_cost + tool_design_cost);

        let hot_runner_sum = round2(number(cost_fields::HR_COST));

        let components: Vec<ComponentCost> = COMPONENT_NAMES
            .iter()
            .map(|name| {
                let component = name.replace(' ', "_");
                let qty = number(&format!("{}_qty", component));
                let unit_cost = number(&format!("{}_unit_cost", component));
                ComponentCost {
                    total_cost: round2(qty * unit_cost),
                    component,
                    qty,
                    unit_cost,
                }
            })
            .collect();
        let component_sum = round2(components.iter().map(|c| c.total_cost).sum());

        let assy_cost = round2(
            number(cost_fields::TOOL_MAKER_QTY)
                * number(cost_fields::TOOL_ASSY_HRS)
                * number(cost_fields::ASSY_RATE),
        );

        let labor_trial_cost = round2(
            number(cost_fields::TRIAL_PERS)
                * number(cost_fields::TRIAL_RATE)
                * number(cost_fields::TRIAL_HRS_LABOR),
        );
        let machine_trial_cost = round2(
            number(cost_fields::MACHINE_QTY)
                * number(cost_fields::MACHINE_RATE)
                * number(cost_fields::TRIAL_HRS_MACHINE),
        );
        let trial_sum = round2(labor_trial_cost + machine_trial_cost);

        let others_sum = round2(number(cost_fields::OTHERS_COST));
        let profit_sum = round2(number(cost_fields::PROFIT_COST));

        let sums = [
            design_sum,
            hot_runner_sum,
            component_sum,
            assy_cost,
            trial_sum,
            others_sum,
            profit_sum,
        ];
        let tool_total_cost = round2(sums.iter().sum());

        let sections = CostSection::ALL
            .iter()
            .zip(sums)
            .map(|(&section, sum)| SectionCost {
                section,
                sum,
                percentage: share(sum, tool_total_cost),
            })
            .collect();

        debug!("Tool total cost {:.2}", tool_total_cost);

        Self {
            cae_cost,
            tool_design_cost,
            components,
            assy_cost,
            labor_trial_cost,
            machine_trial_cost,
            sections,
            tool_total_cost,
        }
    }

    /// Breakdown of a record of form keys to text values, e.g. a mapped upload
    pub fn from_record(record: &BTreeMap<String, String>) -> Self {
        Self::from_fields(|key| record.get(key).map_or(0.0, |value| parse_number(value)))
    }

    /// Breakdown of a stored form payload
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        Self::from_fields(|key| payload.get(key).map_or(0.0, value_number))
    }

    /// Subtotal of one section
    pub fn section(&self, section: CostSection) -> Option<&SectionCost> {
        self.sections.iter().find(|s| s.section == section)
    }
}

/// Numeric value of form text; blank or non-numeric text counts as zero
pub fn parse_number(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

fn value_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()).unwrap_or(0.0),
        Value::String(s) => parse_number(s),
        _ => 0.0,
    }
}

fn share(sum: f64, total: f64) -> Option<f64> {
    (total != 0.0).then(|| round2(sum / total * 100.0))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
