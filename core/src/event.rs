//! Session events: what a single committed command caused.
//!
//! Returned from `CalculatorSession::apply` in the order they happened.
//! Purely informational: the observer always receives the full report.

use serde::{Deserialize, Serialize};
use crate::{series::ChartKind, types::{Hours, Money}};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    // ── Input events ───────────────────────────────
    InputChanged {
        command: String,
    },
    InputUnchanged {
        command: String,
    },

    // ── Metric events ──────────────────────────────
    MetricsRecomputed {
        overload_ratio:       f64,
        lost_hours_per_month: Hours,
        lost_cost_per_month:  Money,
    },
    OverloadRaised {
        overload_ratio: f64,
    },
    OverloadCleared,

    // ── Display events ─────────────────────────────
    ChartExpanded {
        chart: ChartKind,
    },
    ChartCollapsed,
}
