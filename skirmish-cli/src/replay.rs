//! Replay command - feed scripted input through a client session
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_script(), replay(), report_results()
//! - Level 3: per-event application

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use skirmish_core::{ClientSession, InputEvent, PlayerResponse};

use crate::inspect::load_state;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ReplayArgs {
    /// Initial game state snapshot JSON file
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// JSON list of input events
    #[arg(long, value_name = "FILE")]
    pub script: PathBuf,

    /// Stop at the first rejected event
    #[arg(long)]
    pub strict: bool,
}

/// Outcome of a replay
#[derive(Debug, Default, Serialize)]
pub struct ReplayReport {
    pub responses: Vec<PlayerResponse>,
    /// Indexes of events the session rejected
    pub rejected: Vec<usize>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run replay command
///
/// 1. Load initial state and script
/// 2. Apply every event to a fresh session
/// 3. Print submitted responses as JSON
pub fn run(args: ReplayArgs) -> Result<()> {
    let mut events = Vec::new();
    if let Some(path) = &args.state {
        events.push(InputEvent::StateReceived {
            state: load_state(path)?,
        });
    }
    events.extend(load_script(&args.script)?);

    let report = replay(events, args.strict)?;
    report_results(&report)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_script(path: &Path) -> Result<Vec<InputEvent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid script {}", path.display()))
}

/// Apply events in order; rejected events are skipped unless `strict`
pub fn replay(events: Vec<InputEvent>, strict: bool) -> Result<ReplayReport> {
    let mut session = ClientSession::default();
    let mut report = ReplayReport::default();

    for (idx, event) in events.into_iter().enumerate() {
        tracing::debug!(event = idx, ?event, "applying");
        if let Err(e) = session.handle(event) {
            if strict {
                return Err(e).with_context(|| format!("Event {} rejected", idx));
            }
            tracing::warn!(event = idx, error = %e, "event rejected, skipping");
            report.rejected.push(idx);
        }
        report.responses.extend(session.drain_responses());
    }

    Ok(report)
}

fn report_results(report: &ReplayReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    if !report.rejected.is_empty() {
        tracing::warn!("{} event(s) rejected", report.rejected.len());
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::Cc;

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
    }

    fn fixture_events() -> Vec<InputEvent> {
        let mut events = vec![InputEvent::StateReceived {
            state: load_state(&fixture("state.json")).unwrap(),
        }];
        events.extend(load_script(&fixture("script.json")).unwrap());
        events
    }

    #[test]
    fn test_replay_fixture() {
        let report = replay(fixture_events(), true).unwrap();
        assert!(report.rejected.is_empty());
        assert_eq!(
            report.responses,
            vec![PlayerResponse::with_index(2, 0), PlayerResponse::untargeted(0)]
        );
    }

    #[test]
    fn test_lenient_replay_skips_rejected() {
        let mut events = fixture_events();
        events.insert(1, InputEvent::Click { cc: Cc::new(2, -2), action: 0 });
        let report = replay(events, false).unwrap();
        assert_eq!(report.rejected, vec![1]);
        assert_eq!(report.responses.len(), 2);
    }

    #[test]
    fn test_strict_replay_fails() {
        let events = vec![InputEvent::Button];
        assert!(replay(events, true).is_err());
    }
}
