//! Error types

use thiserror::Error;

use crate::hex::Cc;

/// Geometry contract violations
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("stroke center {stroke_center} is not on the radius {radius} ring around {arc_center}")]
    NotOnRing {
        stroke_center: Cc,
        arc_center: Cc,
        radius: u32,
    },
    #[error("invalid hex key: {0:?}")]
    InvalidKey(String),
}

/// Malformed game state snapshots
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("two hexes share coordinate {0}")]
    DuplicateHex(Cc),
    #[error("unit {0} appears on more than one hex")]
    DuplicateUnit(String),
}

/// Errors surfaced by action space derivation and the client session
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error("no action {index} at {cc}")]
    NoSuchAction { cc: Cc, index: usize },
    #[error("no button action available")]
    NoButton,
    #[error("unknown hex {0}")]
    UnknownHex(Cc),
}

pub type Result<T> = std::result::Result<T, CoreError>;
