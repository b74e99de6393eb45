//! The report handed to the presentation layer after every change.

use crate::{
    engine::{InputSnapshot, OutputSnapshot},
    series::{ChartKind, ComparisonSet},
};
use serde::{Deserialize, Serialize};

/// Warning text shown while the overload ratio is above `threshold`.
pub fn overload_warning(threshold: f64) -> String {
    format!("Extreme overload (R > {threshold})")
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalcReport {
    pub input:          InputSnapshot,
    pub output:         OutputSnapshot,
    pub series:         ComparisonSet,
    /// Set only while the office is overloaded.
    pub warning:        Option<String>,
    pub expanded_chart: Option<ChartKind>,
}

impl CalcReport {
    pub fn new(
        input: InputSnapshot,
        output: OutputSnapshot,
        series: ComparisonSet,
        expanded_chart: Option<ChartKind>,
        overload_threshold: f64,
    ) -> Self {
        let warning = output.is_overloaded.then(|| overload_warning(overload_threshold));
        Self { input, output, series, warning, expanded_chart }
    }

    pub fn to_json(&self) -> crate::error::CalcResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
