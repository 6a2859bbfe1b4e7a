//! Received game state: board, units, and the pending decision

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::decision::Decision;
use crate::error::StateError;
use crate::hex::Cc;

/// Opaque unit identifier assigned by the server
pub type UnitId = String;

// ============================================================================
// BOARD CONTENTS
// ============================================================================

/// A status effect on a unit or hex
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub identifier: String,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub stacks: Option<u32>,
}

/// A unit on the board
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub blueprint: String,
    pub controller: String,
    #[serde(default)]
    pub max_health: u32,
    #[serde(default)]
    pub damage: u32,
    #[serde(default)]
    pub exhausted: bool,
    #[serde(default)]
    pub statuses: Vec<Status>,
}

impl Unit {
    pub fn new(id: impl Into<UnitId>, blueprint: impl Into<String>, controller: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            blueprint: blueprint.into(),
            controller: controller.into(),
            max_health: 1,
            damage: 0,
            exhausted: false,
            statuses: Vec::new(),
        }
    }
}

/// One board cell
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexCell {
    pub cc: Cc,
    pub terrain: String,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    #[serde(default)]
    pub unit: Option<Unit>,
    #[serde(default)]
    pub statuses: Vec<Status>,
    #[serde(default)]
    pub is_objective: bool,
}

fn default_visible() -> bool {
    true
}

impl HexCell {
    pub fn new(cc: Cc, terrain: impl Into<String>) -> Self {
        Self {
            cc,
            terrain: terrain.into(),
            is_visible: true,
            unit: None,
            statuses: Vec::new(),
            is_objective: false,
        }
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }
}

/// Wire form of the map
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MapState {
    pub hexes: Vec<HexCell>,
}

// ============================================================================
// BOARD
// ============================================================================

/// Board with derived lookups
///
/// The per-hex list is authoritative; the coordinate and unit indexes are
/// rebuilt from it whenever a board is constructed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MapState", into = "MapState")]
pub struct Board {
    hexes: Vec<HexCell>,
    by_cc: FxHashMap<Cc, usize>,
    unit_positions: FxHashMap<UnitId, Cc>,
}

impl Board {
    pub fn new(hexes: Vec<HexCell>) -> Result<Self, StateError> {
        let mut by_cc = FxHashMap::default();
        let mut unit_positions = FxHashMap::default();

        for (idx, hex) in hexes.iter().enumerate() {
            if by_cc.insert(hex.cc, idx).is_some() {
                return Err(StateError::DuplicateHex(hex.cc));
            }
            if let Some(unit) = &hex.unit {
                if unit_positions.insert(unit.id.clone(), hex.cc).is_some() {
                    return Err(StateError::DuplicateUnit(unit.id.clone()));
                }
            }
        }

        Ok(Self {
            hexes,
            by_cc,
            unit_positions,
        })
    }

    /// Cells in wire order
    pub fn hexes(&self) -> &[HexCell] {
        &self.hexes
    }

    pub fn len(&self) -> usize {
        self.hexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }

    pub fn get(&self, cc: Cc) -> Option<&HexCell> {
        self.by_cc.get(&cc).map(|&idx| &self.hexes[idx])
    }

    pub fn contains(&self, cc: Cc) -> bool {
        self.by_cc.contains_key(&cc)
    }

    /// Hex currently holding a unit
    pub fn unit_position(&self, id: &str) -> Option<Cc> {
        self.unit_positions.get(id).copied()
    }

    pub fn unit(&self, id: &str) -> Option<&Unit> {
        self.unit_position(id)
            .and_then(|cc| self.get(cc))
            .and_then(|hex| hex.unit.as_ref())
    }

    /// Iterate cell coordinates in wire order
    pub fn ccs(&self) -> impl Iterator<Item = Cc> + '_ {
        self.hexes.iter().map(|hex| hex.cc)
    }
}

impl TryFrom<MapState> for Board {
    type Error = StateError;

    fn try_from(map: MapState) -> Result<Self, Self::Error> {
        Board::new(map.hexes)
    }
}

impl From<Board> for MapState {
    fn from(board: Board) -> Self {
        MapState { hexes: board.hexes }
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Unit currently taking its activation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveUnitContext {
    pub unit: Unit,
    #[serde(default)]
    pub movement_points: i32,
}

/// Scoreboard entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub name: String,
    #[serde(default)]
    pub points: i32,
}

/// Snapshot received from the server
///
/// Board and decision arrive together and are replaced together.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub map: Board,
    #[serde(default)]
    pub decision: Option<Decision>,
    #[serde(default)]
    pub active_unit_context: Option<ActiveUnitContext>,
    #[serde(default)]
    pub players: Vec<PlayerSummary>,
    #[serde(default)]
    pub round: u32,
    #[serde(default)]
    pub logs: Vec<serde_json::Value>,
}

impl GameState {
    pub fn new(map: Board, decision: Option<Decision>) -> Self {
        Self {
            map,
            decision,
            ..Default::default()
        }
    }

    pub fn with_active_unit(mut self, unit: Unit) -> Self {
        self.active_unit_context = Some(ActiveUnitContext {
            unit,
            movement_points: 0,
        });
        self
    }

    /// Hex of the active unit, if it is on the board
    pub fn active_unit_position(&self) -> Option<Cc> {
        self.active_unit_context
            .as_ref()
            .and_then(|ctx| self.map.unit_position(&ctx.unit.id))
    }

    /// Parse a snapshot from JSON
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(id: &str) -> Unit {
        Unit {
            id: id.to_string(),
            blueprint: "footman".to_string(),
            controller: "p1".to_string(),
            max_health: 5,
            damage: 0,
            exhausted: false,
            statuses: Vec::new(),
        }
    }

    #[test]
    fn test_board_lookup() {
        let board = Board::new(vec![
            HexCell::new(Cc::new(0, 0), "plains"),
            HexCell::new(Cc::new(1, 0), "forest").with_unit(unit("u1")),
        ])
        .unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board.unit_position("u1"), Some(Cc::new(1, 0)));
        assert_eq!(board.get(Cc::new(1, 0)).unwrap().terrain, "forest");
        assert!(board.unit_position("u2").is_none());
        assert!(!board.contains(Cc::new(5, 5)));
    }

    #[test]
    fn test_duplicate_hex_rejected() {
        let result = Board::new(vec![
            HexCell::new(Cc::new(0, 0), "plains"),
            HexCell::new(Cc::new(0, 0), "forest"),
        ]);
        assert_eq!(result.unwrap_err(), StateError::DuplicateHex(Cc::new(0, 0)));
    }

    #[test]
    fn test_duplicate_unit_rejected() {
        let result = Board::new(vec![
            HexCell::new(Cc::new(0, 0), "plains").with_unit(unit("u1")),
            HexCell::new(Cc::new(1, 0), "plains").with_unit(unit("u1")),
        ]);
        assert!(matches!(result, Err(StateError::DuplicateUnit(id)) if id == "u1"));
    }

    #[test]
    fn test_parse_game_state() {
        let json = r#"{
            "map": {"hexes": [
                {"cc": {"r": 0, "h": 0}, "terrain": "plains",
                 "unit": {"id": "7", "blueprint": "archer", "controller": "p1"}},
                {"cc": {"r": 1, "h": 0}, "terrain": "water", "is_visible": false}
            ]},
            "decision": null,
            "active_unit_context": {"unit": {"id": "7", "blueprint": "archer", "controller": "p1"}, "movement_points": 2},
            "players": [{"name": "alice", "points": 3}],
            "round": 4,
            "logs": []
        }"#;
        let state = GameState::from_json(json).unwrap();
        assert_eq!(state.round, 4);
        assert_eq!(state.active_unit_position(), Some(Cc::ORIGIN));
        assert!(!state.map.get(Cc::new(1, 0)).unwrap().is_visible);
        assert!(state.map.get(Cc::ORIGIN).unwrap().is_visible);
    }

    #[test]
    fn test_parse_rejects_duplicate_hexes() {
        let json = r#"{"map": {"hexes": [
            {"cc": {"r": 0, "h": 0}, "terrain": "plains"},
            {"cc": {"r": 0, "h": 0}, "terrain": "plains"}
        ]}}"#;
        assert!(GameState::from_json(json).is_err());
    }
}
