use serde::{Deserialize, Serialize};
use crate::{series::ChartKind, types::ProfileKey};

/// All edits the presentation layer can make to a calculator session.
/// Each command is one committed mutation followed by one recompute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum InputCommand {
    // ── Inputs ────────────────────────────────────
    SetProfile { profile_id: ProfileKey },
    SetActiveCases { value: u32 },
    SetStaffCount { value: u32 },
    SetDailyRoutineMinutes { value: u32 },
    SetAutomation { multiplier: f64 },

    // ── Display only; never affects computed values ──
    ExpandChart { chart: ChartKind },
    CollapseChart,
}

impl InputCommand {
    /// Stable name for logs and events.
    pub fn name(&self) -> &'static str {
        match self {
            InputCommand::SetProfile { .. }             => "set_profile",
            InputCommand::SetActiveCases { .. }         => "set_active_cases",
            InputCommand::SetStaffCount { .. }          => "set_staff_count",
            InputCommand::SetDailyRoutineMinutes { .. } => "set_daily_routine_minutes",
            InputCommand::SetAutomation { .. }          => "set_automation",
            InputCommand::ExpandChart { .. }            => "expand_chart",
            InputCommand::CollapseChart                 => "collapse_chart",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_from_tagged_json() {
        let cmd: InputCommand =
            serde_json::from_str(r#"{ "cmd": "set_staff_count", "value": 4 }"#).unwrap();
        assert_eq!(cmd, InputCommand::SetStaffCount { value: 4 });

        let json = r#"{ "cmd": "expand_chart", "chart": "cost_recovered" }"#;
        let cmd: InputCommand = serde_json::from_str(json).unwrap();
        assert_eq!(cmd, InputCommand::ExpandChart { chart: ChartKind::CostRecovered });
    }

    #[test]
    fn negative_counts_do_not_parse() {
        let parsed: Result<InputCommand, _> =
            serde_json::from_str(r#"{ "cmd": "set_active_cases", "value": -3 }"#);
        assert!(parsed.is_err());
    }
}
