//! Metrics engine: the one piece of real arithmetic in the calculator.
//!
//! This engine is PURE. It holds only immutable config and a reference
//! to the static catalog; the same InputSnapshot always produces a
//! bit-identical OutputSnapshot.
//!
//! ALGORITHM:
//!   1. Unknown profile or staff < 1  -> zeroed output (not an error).
//!   2. R          = cases / (capacity * staff)
//!   3. overloaded = R > threshold (strict)
//!   4. rep/day    = (routine minutes / 60) * R
//!   5. base hours = staff * rep/day * working days
//!   6. lost hours = round(base hours * automation multiplier)
//!   7. lost cost  = round(lost hours * salary floor / (days * hours/day))
//!
//! Rounding is f64::round (half away from zero), applied once to the
//! final float of steps 6 and 7.

use crate::{
    catalog::Catalog,
    config::EngineConfig,
    types::{Hours, Money, ProfileKey},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputSnapshot {
    pub profile_id:            ProfileKey,
    pub active_cases:          u32,
    pub staff_count:           u32,
    pub daily_routine_minutes: u32,
    pub automation_multiplier: f64,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            profile_id:            "massificado".into(),
            active_cases:          0,
            staff_count:           1,
            daily_routine_minutes: 0,
            automation_multiplier: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OutputSnapshot {
    pub overload_ratio:       f64,
    pub is_overloaded:        bool,
    pub lost_hours_per_month: Hours,
    pub lost_cost_per_month:  Money,
}

impl OutputSnapshot {
    /// The degenerate result for unusable inputs.
    pub fn zero() -> Self {
        Self {
            overload_ratio:       0.0,
            is_overloaded:        false,
            lost_hours_per_month: 0,
            lost_cost_per_month:  0,
        }
    }
}

pub struct MetricsEngine {
    config:  EngineConfig,
    catalog: &'static Catalog,
}

impl MetricsEngine {
    pub fn new(config: EngineConfig, catalog: &'static Catalog) -> Self {
        Self { config, catalog }
    }

    /// Engine over the built-in catalog with default constants.
    pub fn builtin() -> Self {
        Self::new(EngineConfig::default(), Catalog::builtin())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    pub fn compute(&self, input: &InputSnapshot) -> OutputSnapshot {
        let profile = match self.catalog.profile(&input.profile_id) {
            Some(p) if input.staff_count >= 1 => p,
            _ => {
                log::trace!(
                    "engine: degenerate input profile={:?} staff={}",
                    input.profile_id,
                    input.staff_count
                );
                return OutputSnapshot::zero();
            }
        };

        let staff = f64::from(input.staff_count);
        let working_days = f64::from(self.config.working_days_per_month);

        let overload_ratio =
            f64::from(input.active_cases) / (f64::from(profile.capacity) * staff);
        let is_overloaded = overload_ratio > self.config.overload_threshold;

        let repetitive_hours_per_day =
            (f64::from(input.daily_routine_minutes) / 60.0) * overload_ratio;
        let base_hours = staff * repetitive_hours_per_day * working_days;

        let lost_hours_per_month = (base_hours * input.automation_multiplier).round() as Hours;
        let lost_cost_per_month = (lost_hours_per_month as f64 * profile.salary_floor
            / self.config.monthly_working_hours())
        .round() as Money;

        log::trace!(
            "engine: profile={} R={overload_ratio:.3} base_h={base_hours:.2} \
             lost_h={lost_hours_per_month} lost_cost={lost_cost_per_month}",
            profile.id.as_str()
        );

        OutputSnapshot {
            overload_ratio,
            is_overloaded,
            lost_hours_per_month,
            lost_cost_per_month,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(
        profile: &str,
        cases: u32,
        staff: u32,
        minutes: u32,
        automation: f64,
    ) -> InputSnapshot {
        InputSnapshot {
            profile_id:            profile.into(),
            active_cases:          cases,
            staff_count:           staff,
            daily_routine_minutes: minutes,
            automation_multiplier: automation,
        }
    }

    #[test]
    fn default_input_produces_zero_loss() {
        let out = MetricsEngine::builtin().compute(&InputSnapshot::default());
        assert_eq!(out, OutputSnapshot::zero());
    }

    #[test]
    fn half_hour_cost_rounds_away_from_zero() {
        // 110 h * 3500 / 176 = 2187.5
        let out = MetricsEngine::builtin().compute(&input("massificado", 3000, 5, 60, 1.0));
        assert_eq!(out.lost_hours_per_month, 110);
        assert_eq!(out.lost_cost_per_month, 2188);
    }

    #[test]
    fn custom_calendar_changes_cost_denominator() {
        let config = EngineConfig {
            working_days_per_month: 20,
            ..EngineConfig::default()
        };
        let engine = MetricsEngine::new(config, Catalog::builtin());
        let out = engine.compute(&input("massificado", 3000, 5, 60, 1.0));
        // 5 * 1.0 * 20 = 100 h; 100 * 3500 / 160 = 2187.5
        assert_eq!(out.lost_hours_per_month, 100);
        assert_eq!(out.lost_cost_per_month, 2188);
    }

    #[test]
    fn ratio_exactly_at_threshold_is_not_overloaded() {
        // 2400 / (600 * 2) = 2.0
        let out = MetricsEngine::builtin().compute(&input("massificado", 2400, 2, 0, 1.0));
        assert_eq!(out.overload_ratio, 2.0);
        assert!(!out.is_overloaded);
    }
}
