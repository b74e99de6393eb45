//! Calculator session: the single reactive cycle.
//!
//! RULES:
//!   - One command = one committed mutation.
//!   - Input changes recompute the output and all three series wholesale.
//!   - An input identical to the current one is not recomputed.
//!   - The observer runs synchronously after the mutation is committed
//!     and always sees the full latest report.
//!   - Expanding or collapsing a chart never touches computed values.

use crate::{
    command::InputCommand,
    engine::{InputSnapshot, MetricsEngine},
    error::{CalcError, CalcResult},
    event::SessionEvent,
    report::CalcReport,
    series::{build_comparisons, ChartKind},
};

pub type Observer = Box<dyn FnMut(&CalcReport)>;

pub struct CalculatorSession {
    engine:   MetricsEngine,
    report:   CalcReport,
    observer: Option<Observer>,
}

impl CalculatorSession {
    pub fn new(engine: MetricsEngine) -> Self {
        let report = compute_report(&engine, InputSnapshot::default(), None);
        Self { engine, report, observer: None }
    }

    /// Start from an existing snapshot. The automation multiplier must
    /// match a catalog level, as it must for `SetAutomation`.
    pub fn with_input(engine: MetricsEngine, mut input: InputSnapshot) -> CalcResult<Self> {
        input.automation_multiplier = known_multiplier(&engine, input.automation_multiplier)?;
        let report = compute_report(&engine, input, None);
        Ok(Self { engine, report, observer: None })
    }

    /// Session over the built-in catalog with default inputs.
    pub fn builtin() -> Self {
        Self::new(MetricsEngine::builtin())
    }

    /// Register the observer. Replaces any previous one.
    pub fn subscribe(&mut self, observer: impl FnMut(&CalcReport) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn input(&self) -> &InputSnapshot {
        &self.report.input
    }

    pub fn report(&self) -> &CalcReport {
        &self.report
    }

    pub fn engine(&self) -> &MetricsEngine {
        &self.engine
    }

    /// Apply one command. Rejected commands leave the session untouched
    /// and do not notify the observer.
    pub fn apply(&mut self, command: InputCommand) -> CalcResult<Vec<SessionEvent>> {
        let name = command.name();
        let mut events = Vec::new();
        let mut next = self.report.input.clone();

        match command {
            InputCommand::ExpandChart { chart } => {
                self.set_expanded(Some(chart), &mut events);
            }
            InputCommand::CollapseChart => {
                self.set_expanded(None, &mut events);
            }
            InputCommand::SetProfile { profile_id } => {
                if self.engine.catalog().profile(&profile_id).is_none() {
                    log::debug!("session: unknown profile {profile_id:?}, output degrades to zero");
                }
                next.profile_id = profile_id;
                self.commit_input(name, next, &mut events);
            }
            InputCommand::SetActiveCases { value } => {
                next.active_cases = value;
                self.commit_input(name, next, &mut events);
            }
            InputCommand::SetStaffCount { value } => {
                next.staff_count = value;
                self.commit_input(name, next, &mut events);
            }
            InputCommand::SetDailyRoutineMinutes { value } => {
                next.daily_routine_minutes = value;
                self.commit_input(name, next, &mut events);
            }
            InputCommand::SetAutomation { multiplier } => {
                next.automation_multiplier = known_multiplier(&self.engine, multiplier)?;
                self.commit_input(name, next, &mut events);
            }
        }

        let unchanged = matches!(events.as_slice(), [SessionEvent::InputUnchanged { .. }]);
        if !unchanged {
            if let Some(observer) = self.observer.as_mut() {
                observer(&self.report);
            }
        }

        Ok(events)
    }

    fn set_expanded(&mut self, chart: Option<ChartKind>, events: &mut Vec<SessionEvent>) {
        self.report.expanded_chart = chart;
        events.push(match chart {
            Some(chart) => SessionEvent::ChartExpanded { chart },
            None        => SessionEvent::ChartCollapsed,
        });
    }

    fn commit_input(&mut self, name: &str, next: InputSnapshot, events: &mut Vec<SessionEvent>) {
        if next == self.report.input {
            events.push(SessionEvent::InputUnchanged { command: name.to_string() });
            return;
        }

        let was_overloaded = self.report.output.is_overloaded;
        self.report = compute_report(&self.engine, next, self.report.expanded_chart);
        let output = self.report.output;

        log::debug!(
            "session: {name} -> R={:.3} lost_h={} lost_cost={}",
            output.overload_ratio,
            output.lost_hours_per_month,
            output.lost_cost_per_month
        );

        events.push(SessionEvent::InputChanged { command: name.to_string() });
        events.push(SessionEvent::MetricsRecomputed {
            overload_ratio:       output.overload_ratio,
            lost_hours_per_month: output.lost_hours_per_month,
            lost_cost_per_month:  output.lost_cost_per_month,
        });

        match (was_overloaded, output.is_overloaded) {
            (false, true) => events.push(SessionEvent::OverloadRaised {
                overload_ratio: output.overload_ratio,
            }),
            (true, false) => events.push(SessionEvent::OverloadCleared),
            _ => {}
        }
    }
}

/// The catalog's own multiplier for `multiplier`, so near-equal values
/// memoise as the same input.
fn known_multiplier(engine: &MetricsEngine, multiplier: f64) -> CalcResult<f64> {
    match engine.catalog().automation_level(multiplier) {
        Some(level) => Ok(level.multiplier),
        None => {
            log::warn!("session: rejected automation multiplier {multiplier}: no matching level");
            Err(CalcError::UnknownAutomationLevel { value: multiplier })
        }
    }
}

fn compute_report(
    engine: &MetricsEngine,
    input: InputSnapshot,
    expanded_chart: Option<ChartKind>,
) -> CalcReport {
    let output = engine.compute(&input);
    let series = build_comparisons(&input, &output);
    CalcReport::new(input, output, series, expanded_chart, engine.config().overload_threshold)
}
