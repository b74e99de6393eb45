//! calc-runner: headless runner for the law-office efficiency calculator.
//!
//! Usage:
//!   calc-runner --profile boutique --cases 500 --staff 2 --minutes 30 --automation 0.5
//!   calc-runner --profile massificado --cases 3000 --staff 5 --minutes 60 --json
//!   calc-runner --list
//!   calc-runner --ipc-mode [--config engine.json]
//!
//! IPC mode reads one JSON object per line on stdin:
//!   {"type":"get_state"}
//!   {"type":"command","command":{"cmd":"set_staff_count","value":3}}
//!   {"type":"quit"}
//! and answers each with the current report, or {"error": ...}.

use anyhow::{anyhow, Context, Result};
use efficiency_core::{
    catalog::Catalog,
    command::InputCommand,
    config::EngineConfig,
    engine::{InputSnapshot, MetricsEngine},
    report::CalcReport,
    series::ChartKind,
    session::CalculatorSession,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Command {
        command: InputCommand,
    },
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = has_flag(&args, "--ipc-mode");
    let json = has_flag(&args, "--json");

    if has_flag(&args, "--list") {
        print_catalog(Catalog::builtin());
        return Ok(());
    }

    let config = match arg_value(&args, "--config")? {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let engine = MetricsEngine::new(config, Catalog::builtin());

    let defaults = InputSnapshot::default();
    let input = InputSnapshot {
        profile_id: arg_value(&args, "--profile")?
            .map(str::to_string)
            .unwrap_or(defaults.profile_id),
        active_cases:          parse_arg(&args, "--cases", defaults.active_cases)?,
        staff_count:           parse_arg(&args, "--staff", defaults.staff_count)?,
        daily_routine_minutes: parse_arg(&args, "--minutes", defaults.daily_routine_minutes)?,
        automation_multiplier: parse_arg(&args, "--automation", defaults.automation_multiplier)?,
    };

    log::debug!("calc-runner: config={config:?} input={input:?}");
    let mut session = CalculatorSession::with_input(engine, input)
        .context("invalid --automation (see --list)")?;

    if ipc_mode {
        run_ipc_loop(&mut session)?;
    } else if json {
        println!("{}", serde_json::to_string_pretty(session.report())?);
    } else {
        print_summary(session.report());
    }

    Ok(())
}

/// Outcome of one IPC line.
#[derive(Debug, PartialEq)]
enum IpcReply {
    Line(String),
    Quit,
}

fn run_ipc_loop(session: &mut CalculatorSession) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        match handle_ipc_line(session, &buffer) {
            IpcReply::Quit => break,
            IpcReply::Line(reply) => writeln!(stdout, "{reply}")?,
        }
        stdout.flush()?;
    }
    Ok(())
}

/// Handle one request line. Malformed or rejected requests answer with
/// `{"error": ...}` and leave the session as it was.
fn handle_ipc_line(session: &mut CalculatorSession, line: &str) -> IpcReply {
    let cmd: IpcCommand = match serde_json::from_str(line) {
        Ok(c) => c,
        Err(e) => return IpcReply::Line(error_json(&e.to_string())),
    };

    match cmd {
        IpcCommand::Quit => return IpcReply::Quit,
        IpcCommand::GetState => {}
        IpcCommand::Command { command } => match session.apply(command) {
            Ok(events) => log::debug!("ipc: {} event(s)", events.len()),
            Err(e) => return IpcReply::Line(error_json(&e.to_string())),
        },
    }

    IpcReply::Line(
        session
            .report()
            .to_json()
            .unwrap_or_else(|e| error_json(&e.to_string())),
    )
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

fn print_summary(report: &CalcReport) {
    let input = &report.input;
    let output = &report.output;

    println!("Law-Office Efficiency Calculator: calc-runner");
    println!("  generated: {}", chrono::Utc::now().to_rfc3339());
    println!();
    println!("=== INPUTS ===");
    println!("  profile:        {}", input.profile_id);
    println!("  active cases:   {}", input.active_cases);
    println!("  staff:          {}", input.staff_count);
    println!("  routine min:    {}", input.daily_routine_minutes);
    println!("  automation:     {}", input.automation_multiplier);
    println!();
    println!("=== RESULTS ===");
    if let Some(warning) = &report.warning {
        println!("  !! {warning}");
    }
    println!("  overload ratio: {:.3}", output.overload_ratio);
    println!("  lost hours/mo:  {} h", output.lost_hours_per_month);
    println!("  lost cost/mo:   {}", output.lost_cost_per_month);

    for kind in ChartKind::ALL {
        let series = report.series.get(kind);
        println!();
        println!("=== {} ===", kind.title().to_uppercase());
        for point in &series.points {
            println!("  {:<12} {:>10}", point.label, point.value);
        }
    }
}

fn print_catalog(catalog: &Catalog) {
    println!("=== OFFICE PROFILES ===");
    for p in catalog.profiles {
        println!(
            "  {:<13} {:<13} capacity {:>4} | salary floor {:>8.0}",
            p.id.as_str(),
            p.display_name,
            p.capacity,
            p.salary_floor
        );
    }
    println!();
    println!("=== AUTOMATION LEVELS ===");
    for a in catalog.automation_levels {
        println!("  {:<5} {}", a.multiplier, a.display_name);
    }
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Value following `flag`. A flag given without a value is an error.
fn arg_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>> {
    match args.iter().position(|a| a == flag) {
        None => Ok(None),
        Some(i) => args
            .get(i + 1)
            .map(|v| Some(v.as_str()))
            .ok_or_else(|| anyhow!("{flag} needs a value")),
    }
}

/// Parse `flag`'s value, or `default` when the flag is absent.
fn parse_arg<T>(args: &[String], flag: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match arg_value(args, flag)? {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|e| anyhow!("invalid value {raw:?} for {flag}: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("calc-runner")
            .chain(list.iter().copied())
            .map(str::to_string)
            .collect()
    }

    fn example_session() -> CalculatorSession {
        let input = InputSnapshot {
            active_cases:          3000,
            staff_count:           5,
            daily_routine_minutes: 60,
            ..InputSnapshot::default()
        };
        CalculatorSession::with_input(MetricsEngine::builtin(), input).unwrap()
    }

    fn reply_json(reply: IpcReply) -> serde_json::Value {
        match reply {
            IpcReply::Line(line) => serde_json::from_str(&line).unwrap(),
            IpcReply::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn missing_flag_uses_default() {
        assert_eq!(parse_arg(&args(&["--cases", "10"]), "--staff", 1u32).unwrap(), 1);
        assert_eq!(parse_arg(&args(&["--staff", "4"]), "--staff", 1u32).unwrap(), 4);
    }

    #[test]
    fn unparsable_flag_value_is_an_error() {
        for bad in ["-1", "two"] {
            let err = parse_arg(&args(&["--staff", bad]), "--staff", 1u32).unwrap_err();
            assert!(err.to_string().contains("--staff"), "{err}");
        }
    }

    #[test]
    fn flag_without_value_is_an_error() {
        assert!(parse_arg(&args(&["--staff"]), "--staff", 1u32).is_err());
    }

    #[test]
    fn malformed_line_replies_with_error() {
        let mut session = example_session();

        let reply = reply_json(handle_ipc_line(&mut session, "{ not json"));

        assert!(reply["error"].is_string());
    }

    #[test]
    fn rejected_command_leaves_session_unchanged() {
        let mut session = example_session();
        let before = session.report().clone();

        let line = r#"{"type":"command","command":{"cmd":"set_automation","multiplier":0.7}}"#;
        let reply = reply_json(handle_ipc_line(&mut session, line));

        assert!(reply["error"].as_str().unwrap().contains("0.7"));
        assert_eq!(session.report(), &before);

        // The session keeps serving after the rejection.
        let reply = reply_json(handle_ipc_line(&mut session, r#"{"type":"get_state"}"#));
        assert_eq!(reply["output"]["lost_hours_per_month"], 110);
    }

    #[test]
    fn get_state_reflects_last_command() {
        let mut session = example_session();

        let line = r#"{"type":"command","command":{"cmd":"set_staff_count","value":0}}"#;
        let reply = reply_json(handle_ipc_line(&mut session, line));
        assert_eq!(reply["input"]["staff_count"], 0);

        let reply = reply_json(handle_ipc_line(&mut session, r#"{"type":"get_state"}"#));
        assert_eq!(reply["input"]["staff_count"], 0);
        assert_eq!(reply["output"]["lost_hours_per_month"], 0);
        assert_eq!(reply["output"]["lost_cost_per_month"], 0);
        assert!(reply["warning"].is_null());
    }

    #[test]
    fn quit_ends_the_loop() {
        let mut session = example_session();

        assert_eq!(handle_ipc_line(&mut session, r#"{"type":"quit"}"#), IpcReply::Quit);
    }
}
