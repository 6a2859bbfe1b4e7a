//! Inspect command - print the action space derived from a snapshot
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_state(), derive(), report()
//! - Level 3: describe_cell(), describe_action()
//! - Level 4: formatting utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use skirmish_core::{derive_action_space, Action, ActionKind, ActionSpace, CellActions, GameState};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct InspectArgs {
    /// Game state snapshot JSON file
    #[arg(long, value_name = "FILE")]
    pub state: PathBuf,

    /// Include cells without actions
    #[arg(long)]
    pub all: bool,

    /// Output the action space as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run inspect command
///
/// 1. Load snapshot
/// 2. Derive the base action space
/// 3. Print it
pub fn run(args: InspectArgs) -> Result<()> {
    let state = load_state(&args.state)?;
    let space = derive(&state)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&space)?);
    } else {
        for line in report(&space, args.all) {
            println!("{}", line);
        }
    }

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Load and validate a snapshot
pub fn load_state(path: &Path) -> Result<GameState> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read state {}", path.display()))?;
    GameState::from_json(&content).with_context(|| format!("Invalid state {}", path.display()))
}

fn derive(state: &GameState) -> Result<ActionSpace> {
    let space = derive_action_space(state, None)?;
    tracing::debug!(cells = space.cells.len(), "action space derived");
    Ok(space)
}

/// One line per cell, sorted by coordinate, then the button
fn report(space: &ActionSpace, all: bool) -> Vec<String> {
    let mut cells: Vec<&CellActions> = space
        .cells
        .values()
        .filter(|cell| all || !cell.actions.is_empty())
        .collect();
    cells.sort_by_key(|cell| cell.cc);

    let mut lines: Vec<String> = cells.into_iter().map(describe_cell).collect();
    if let Some(button) = &space.button {
        lines.push(format!("button  {}", describe_action(button)));
    }
    lines
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn describe_cell(cell: &CellActions) -> String {
    let mut line = format!("{:>6}", cell.cc.key());
    if cell.actions.is_empty() {
        line.push_str("  -");
    }
    for action in &cell.actions {
        line.push_str("  ");
        line.push_str(&describe_action(action));
    }
    if !cell.previews.is_empty() {
        let names: Vec<&str> = cell.previews.iter().map(|p| p.name.as_str()).collect();
        line.push_str(&format!("  (preview: {})", names.join(", ")));
    }
    line
}

fn describe_action(action: &Action) -> String {
    match &action.description {
        Some(description) => format!("[{}: {}]", kind_label(action.kind), description),
        None => format!("[{}]", kind_label(action.kind)),
    }
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

fn kind_label(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Generic => "act",
        ActionKind::Move => "move",
        ActionKind::Activate => "activate",
        ActionKind::Menu => "menu",
        ActionKind::Select => "select",
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::{Cc, Effect, PlayerResponse};

    #[test]
    fn test_describe_action() {
        let action = Action::new(ActionKind::Move, Effect::Submit(PlayerResponse::untargeted(1)))
            .with_description(Some("move".to_string()));
        assert_eq!(describe_action(&action), "[move: move]");
        assert_eq!(describe_action(&Action::overflow(Cc::ORIGIN)), "[menu: more actions]");
    }

    #[test]
    fn test_report_fixture() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/state.json");
        let state = load_state(&path).unwrap();
        let lines = report(&derive(&state).unwrap(), false);

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "  -1,1  [move: move]");
        assert!(lines.iter().any(|l| l == "   0,0  [menu: more actions]"));
        assert!(lines.iter().any(|l| l.contains("[activate: activate]  (preview: Smash)")));
        assert_eq!(lines.last().unwrap(), "button  [act: skip]");
    }

    #[test]
    fn test_load_state_missing_file() {
        let err = load_state(Path::new("/nonexistent/state.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read state"));
    }
}
