//! Engine constants: working calendar and overload threshold.
//!
//! The defaults are the values every chart and KPI is calibrated on.
//! A config file may override them; missing fields keep the default.

use crate::error::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WORKING_DAYS_PER_MONTH: u32 = 22;
pub const DEFAULT_WORKING_HOURS_PER_DAY: u32 = 8;
pub const DEFAULT_OVERLOAD_THRESHOLD: f64 = 2.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    #[serde(default = "default_working_days")]
    pub working_days_per_month: u32,
    #[serde(default = "default_working_hours")]
    pub working_hours_per_day: u32,
    /// Overload is flagged when the ratio is strictly above this value.
    #[serde(default = "default_overload_threshold")]
    pub overload_threshold: f64,
}

fn default_working_days() -> u32 { DEFAULT_WORKING_DAYS_PER_MONTH }
fn default_working_hours() -> u32 { DEFAULT_WORKING_HOURS_PER_DAY }
fn default_overload_threshold() -> f64 { DEFAULT_OVERLOAD_THRESHOLD }

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            working_days_per_month: DEFAULT_WORKING_DAYS_PER_MONTH,
            working_hours_per_day:  DEFAULT_WORKING_HOURS_PER_DAY,
            overload_threshold:     DEFAULT_OVERLOAD_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Load from a JSON file and validate it.
    pub fn load(path: &str) -> CalcResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> CalcResult<Self> {
        let config: EngineConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.working_days_per_month == 0 {
            return Err(CalcError::InvalidConfig {
                field:  "working_days_per_month",
                reason: "must be greater than zero".into(),
            });
        }
        if self.working_hours_per_day == 0 {
            return Err(CalcError::InvalidConfig {
                field:  "working_hours_per_day",
                reason: "must be greater than zero".into(),
            });
        }
        if !self.overload_threshold.is_finite() || self.overload_threshold < 0.0 {
            return Err(CalcError::InvalidConfig {
                field:  "overload_threshold",
                reason: format!(
                    "must be a finite non-negative number, got {}",
                    self.overload_threshold
                ),
            });
        }
        Ok(())
    }

    /// Paid working hours in one month (D × 8 with the defaults).
    pub fn monthly_working_hours(&self) -> f64 {
        f64::from(self.working_days_per_month) * f64::from(self.working_hours_per_day)
    }
}
