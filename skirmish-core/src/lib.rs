//! Skirmish Core - Tactical client interaction model
//!
//! This crate turns server snapshots into clickable affordances:
//! - Hex geometry (axial coordinates, rings, arcs, pixel layout)
//! - Game state and decision wire types
//! - Target profile interpretation into a per-cell action space
//! - Multi-step selection menus
//! - Client session applying input and emitting player responses

pub mod hex;
pub mod error;
pub mod state;
pub mod profile;
pub mod decision;
pub mod menu;
pub mod action_space;
pub mod interpret;
pub mod session;
pub mod config;

// Re-exports for convenient access
pub use hex::{Cc, Layout, DIRECTIONS, ring, arc, circle};
pub use error::{CoreError, GeometryError, StateError};
pub use state::{Board, GameState, HexCell, Unit, UnitId};
pub use profile::TargetProfile;
pub use decision::{Decision, DecisionOption, OptionKind, PlayerResponse, TargetPayload};
pub use menu::{Menu, ProfileMenu};
pub use action_space::{Action, ActionKind, ActionSpace, CellActions, Effect};
pub use interpret::derive_action_space;
pub use session::{ClientSession, InputEvent, ResponseSink};
pub use config::ClientConfig;
