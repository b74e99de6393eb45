//! Comparison series: the data behind the three benchmark charts.
//!
//! All three charts share one shape: a "You" point followed by three
//! fixed competitor benchmarks derived from the same base value. A
//! single generator builds every series from (base, sign, multipliers).

use crate::engine::{InputSnapshot, OutputSnapshot};
use serde::{Deserialize, Serialize};

pub const SERIES_LABELS: [&str; 4] = ["You", "Competitor", "ProductX", "ProductY"];

const CASELOAD_MULTIPLIERS: [f64; 3] = [1.10, 1.25, 1.40];
const HOURS_MULTIPLIERS:    [f64; 3] = [0.10, 0.25, 0.40];
// The first benchmark is modelled with zero incremental cost.
const COST_MULTIPLIERS:     [f64; 3] = [0.0, 0.25, 0.40];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Caseload,
    HoursRecovered,
    CostRecovered,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [
        ChartKind::Caseload,
        ChartKind::HoursRecovered,
        ChartKind::CostRecovered,
    ];

    pub fn index(&self) -> usize {
        match self {
            ChartKind::Caseload       => 0,
            ChartKind::HoursRecovered => 1,
            ChartKind::CostRecovered  => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Caseload       => "Cases per professional",
            ChartKind::HoursRecovered => "Hours recovered (h)",
            ChartKind::CostRecovered  => "Cost comparison",
        }
    }
}

/// Whether the "You" point keeps or flips the sign of its base value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    /// Losses are drawn below the axis to contrast with competitors.
    Negative,
}

impl Sign {
    fn apply(self, value: i64) -> i64 {
        match self {
            Sign::Positive => value,
            Sign::Negative => -value,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeriesPoint {
    pub label: String,
    pub value: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComparisonSeries {
    pub kind:   ChartKind,
    pub points: Vec<SeriesPoint>,
}

impl ComparisonSeries {
    pub fn values(&self) -> Vec<i64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComparisonSet {
    pub caseload:        ComparisonSeries,
    pub hours_recovered: ComparisonSeries,
    pub cost_recovered:  ComparisonSeries,
}

impl ComparisonSet {
    pub fn get(&self, kind: ChartKind) -> &ComparisonSeries {
        match kind {
            ChartKind::Caseload       => &self.caseload,
            ChartKind::HoursRecovered => &self.hours_recovered,
            ChartKind::CostRecovered  => &self.cost_recovered,
        }
    }
}

/// Build one four-point series. "You" is `sign * round(base)`; each
/// benchmark is `round(base * multiplier)`.
pub fn build_series(
    kind: ChartKind,
    base: f64,
    sign: Sign,
    multipliers: [f64; 3],
) -> ComparisonSeries {
    let you = sign.apply(base.round() as i64);
    let benchmarks = multipliers.iter().map(|m| (base * m).round() as i64);
    let values = std::iter::once(you).chain(benchmarks);

    ComparisonSeries {
        kind,
        points: SERIES_LABELS
            .iter()
            .zip(values)
            .map(|(label, value)| SeriesPoint { label: (*label).to_string(), value })
            .collect(),
    }
}

/// Build all three chart series from the current input and output.
pub fn build_comparisons(input: &InputSnapshot, output: &OutputSnapshot) -> ComparisonSet {
    let per_professional = if input.staff_count > 0 {
        f64::from(input.active_cases) / f64::from(input.staff_count)
    } else {
        0.0
    };

    ComparisonSet {
        caseload: build_series(
            ChartKind::Caseload,
            per_professional,
            Sign::Positive,
            CASELOAD_MULTIPLIERS,
        ),
        hours_recovered: build_series(
            ChartKind::HoursRecovered,
            output.lost_hours_per_month as f64,
            Sign::Negative,
            HOURS_MULTIPLIERS,
        ),
        cost_recovered: build_series(
            ChartKind::CostRecovered,
            output.lost_cost_per_month as f64,
            Sign::Negative,
            COST_MULTIPLIERS,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_in_fixed_order() {
        let series = build_series(ChartKind::Caseload, 10.0, Sign::Positive, CASELOAD_MULTIPLIERS);
        let labels: Vec<&str> = series.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, SERIES_LABELS);
    }

    #[test]
    fn negative_sign_only_flips_you() {
        let series =
            build_series(ChartKind::HoursRecovered, 50.0, Sign::Negative, HOURS_MULTIPLIERS);
        assert_eq!(series.values(), vec![-50, 5, 13, 20]);
    }

    #[test]
    fn chart_index_round_trips() {
        for kind in ChartKind::ALL {
            assert_eq!(ChartKind::from_index(kind.index()), Some(kind));
        }
        assert_eq!(ChartKind::from_index(3), None);
    }
}
