//! Per-cell action space handed to the renderer
//!
//! Actions carry their trigger as data ([`Effect`]); the session applies it.
//! The aggregator caps how many click targets a cell shows at once.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::decision::{FacetPreview, OptionTag, PlayerResponse};
use crate::hex::Cc;
use crate::menu::{Menu, Step};
use crate::state::Board;

/// Most actions a cell may show before collapsing into an overflow menu
pub const MAX_CELL_ACTIONS: usize = 2;

// ============================================================================
// ACTIONS
// ============================================================================

/// Icon classification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Generic,
    Move,
    Activate,
    /// Opens a menu instead of answering
    Menu,
    /// Picks a candidate inside an open menu
    Select,
}

/// What activating an action does
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Effect {
    /// Send a response to the server and drop any open menu
    Submit(PlayerResponse),
    /// Replace the open menu
    Transition(Menu),
    CloseMenu,
}

impl From<Step> for Effect {
    fn from(step: Step) -> Self {
        match step {
            Step::Submit(response) => Effect::Submit(response),
            Step::Advance(menu) => Effect::Transition(Menu::Profile(menu)),
        }
    }
}

impl Effect {
    pub fn opens_menu(&self) -> bool {
        matches!(self, Effect::Transition(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    /// Kind of the decision option this action answers
    pub source: Option<OptionTag>,
    #[serde(default)]
    pub description: Option<String>,
    pub effect: Effect,
}

impl Action {
    pub fn new(kind: ActionKind, effect: Effect) -> Self {
        Self {
            kind,
            source: None,
            description: None,
            effect,
        }
    }

    pub fn with_source(mut self, source: OptionTag) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Overflow action opening the list menu for `cc`
    pub fn overflow(cc: Cc) -> Self {
        Action::new(ActionKind::Menu, Effect::Transition(Menu::List { cc }))
            .with_description(Some("more actions".to_string()))
    }

    fn is_move(&self) -> bool {
        self.source == Some(OptionTag::Move)
    }
}

// ============================================================================
// ACTION SPACE
// ============================================================================

/// Everything the renderer needs for one cell
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellActions {
    pub cc: Cc,
    pub actions: Vec<Action>,
    pub highlighted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_menu_items: Option<Vec<Action>>,
    /// Triggered when the pointer enters the cell
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover: Option<Effect>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub previews: Vec<FacetPreview>,
}

impl CellActions {
    pub fn new(cc: Cc) -> Self {
        Self {
            cc,
            actions: Vec::new(),
            highlighted: false,
            side_menu_items: None,
            hover: None,
            previews: Vec::new(),
        }
    }
}

/// Action space keyed by the `"r,h"` form of every board cell
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpace {
    pub cells: FxHashMap<String, CellActions>,
    /// Non-spatial action, e.g. finishing a selection early
    pub button: Option<Action>,
}

impl ActionSpace {
    /// One empty entry per board cell
    pub fn for_board(board: &Board) -> Self {
        Self {
            cells: board.ccs().map(|cc| (cc.key(), CellActions::new(cc))).collect(),
            button: None,
        }
    }

    pub fn get(&self, cc: Cc) -> Option<&CellActions> {
        self.cells.get(&cc.key())
    }

    pub fn get_mut(&mut self, cc: Cc) -> Option<&mut CellActions> {
        self.cells.get_mut(&cc.key())
    }

    /// Add an action to a cell; returns false if `cc` is off the board
    pub fn push(&mut self, cc: Cc, action: Action) -> bool {
        match self.get_mut(cc) {
            Some(cell) => {
                cell.actions.push(action);
                true
            }
            None => false,
        }
    }

    /// Mark a cell highlighted; off-board cells are ignored
    pub fn highlight(&mut self, cc: Cc) {
        if let Some(cell) = self.get_mut(cc) {
            cell.highlighted = true;
        }
    }

    pub fn actions_at(&self, cc: Cc) -> &[Action] {
        self.get(cc).map(|cell| cell.actions.as_slice()).unwrap_or(&[])
    }

    pub fn is_highlighted(&self, cc: Cc) -> bool {
        self.get(cc).is_some_and(|cell| cell.highlighted)
    }

    /// Highlighted cells in no particular order
    pub fn highlighted(&self) -> impl Iterator<Item = Cc> + '_ {
        self.cells.values().filter(|cell| cell.highlighted).map(|cell| cell.cc)
    }
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Whether a cell's raw actions must collapse into an overflow menu
pub fn is_crowded(actions: &[Action]) -> bool {
    if actions.len() > MAX_CELL_ACTIONS {
        return true;
    }
    if actions.len() == MAX_CELL_ACTIONS && actions.iter().any(|a| a.kind == ActionKind::Menu) {
        return true;
    }
    actions
        .iter()
        .enumerate()
        .any(|(i, a)| actions[i + 1..].iter().any(|b| b.kind == a.kind))
}

/// Collapse crowded cells and attach activation previews
///
/// Crowded cells get a single overflow action; actions answering a move
/// option stay alongside it, ahead of the overflow.
pub fn aggregate(
    mut raw: ActionSpace,
    board: &Board,
    previews: &FxHashMap<&str, &[FacetPreview]>,
) -> ActionSpace {
    for cell in raw.cells.values_mut() {
        if is_crowded(&cell.actions) {
            let mut kept: Vec<Action> = cell.actions.drain(..).filter(Action::is_move).collect();
            kept.push(Action::overflow(cell.cc));
            cell.actions = kept;
        }
        cell.highlighted = false;

        let unit_id = board
            .get(cell.cc)
            .and_then(|hex| hex.unit.as_ref())
            .map(|unit| unit.id.as_str());
        if let Some(facets) = unit_id.and_then(|id| previews.get(id)) {
            cell.previews = facets.to_vec();
        }
    }
    raw
}
