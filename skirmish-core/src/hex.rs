//! Hex grid geometry with axial coordinates
//!
//! Coordinates are axial `(r, h)` pairs; the third cube axis `l = -(r + h)`
//! is derived. Direction order is clockwise with screen y pointing down and
//! is load-bearing: rings, arcs and cones index into it.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Axial hex coordinate
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cc {
    pub r: i32,
    pub h: i32,
}

impl Cc {
    pub const ORIGIN: Cc = Cc::new(0, 0);

    pub const fn new(r: i32, h: i32) -> Self {
        Self { r, h }
    }

    /// Derived cube axis
    pub const fn l(&self) -> i32 {
        -(self.r + self.h)
    }

    /// Distance between two hexes
    pub fn distance_to(&self, other: Cc) -> u32 {
        let dr = self.r - other.r;
        let dh = self.h - other.h;
        ((dr.abs() + (dr + dh).abs() + dh.abs()) / 2) as u32
    }

    /// Get neighbor in direction (0-5)
    pub fn neighbor(&self, direction: usize) -> Cc {
        *self + DIRECTIONS[direction % 6]
    }

    /// All six neighbors, in `DIRECTIONS` order
    pub fn neighbors(&self) -> [Cc; 6] {
        DIRECTIONS.map(|d| *self + d)
    }

    /// Canonical `"r,h"` lookup key
    pub fn key(&self) -> String {
        self.to_string()
    }

    pub fn from_key(key: &str) -> Result<Cc, GeometryError> {
        key.parse()
    }
}

/// Direction vectors in axial coordinates (dr, dh)
/// Index: 0=E, 1=SE, 2=SW, 3=W, 4=NW, 5=NE
pub const DIRECTIONS: [Cc; 6] = [
    Cc::new(1, 0),   // E
    Cc::new(0, 1),   // SE
    Cc::new(-1, 1),  // SW
    Cc::new(-1, 0),  // W
    Cc::new(0, -1),  // NW
    Cc::new(1, -1),  // NE
];

impl Add for Cc {
    type Output = Cc;
    fn add(self, rhs: Cc) -> Cc {
        Cc::new(self.r + rhs.r, self.h + rhs.h)
    }
}

impl Sub for Cc {
    type Output = Cc;
    fn sub(self, rhs: Cc) -> Cc {
        Cc::new(self.r - rhs.r, self.h - rhs.h)
    }
}

impl Mul<i32> for Cc {
    type Output = Cc;
    fn mul(self, rhs: i32) -> Cc {
        Cc::new(self.r * rhs, self.h * rhs)
    }
}

impl Neg for Cc {
    type Output = Cc;
    fn neg(self) -> Cc {
        Cc::new(-self.r, -self.h)
    }
}

impl fmt::Display for Cc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.r, self.h)
    }
}

impl FromStr for Cc {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GeometryError::InvalidKey(s.to_string());
        let (r, h) = s.split_once(',').ok_or_else(invalid)?;
        let r = r.trim().parse().map_err(|_| invalid())?;
        let h = h.trim().parse().map_err(|_| invalid())?;
        Ok(Cc::new(r, h))
    }
}

// ============================================================================
// SHAPES
// ============================================================================

/// All hexes at exactly `radius` from `center`
///
/// Walks six straight edges starting at `center + E * radius`, so for
/// radius 1 the result equals `center.neighbors()`.
pub fn ring(radius: u32, center: Cc) -> Vec<Cc> {
    if radius == 0 {
        return vec![center];
    }
    let steps = radius as i32;
    let mut cells = Vec::with_capacity(6 * radius as usize);
    let mut current = center + DIRECTIONS[0] * steps;
    for side in 0..6 {
        let dir = DIRECTIONS[(side + 2) % 6];
        for _ in 0..steps {
            cells.push(current);
            current = current + dir;
        }
    }
    cells
}

/// Contiguous run of `2 * arm_length + 1` ring cells centered on `stroke_center`
///
/// Wraps modulo the ring length. The stroke center must lie on
/// `ring(radius, arc_center)`.
pub fn arc(
    radius: u32,
    arm_length: u32,
    stroke_center: Cc,
    arc_center: Cc,
) -> Result<Vec<Cc>, GeometryError> {
    let cells = ring(radius, arc_center);
    let idx = cells
        .iter()
        .position(|cc| *cc == stroke_center)
        .ok_or(GeometryError::NotOnRing {
            stroke_center,
            arc_center,
            radius,
        })? as i64;
    let len = cells.len() as i64;
    let arm = arm_length as i64;
    Ok((-arm..=arm)
        .map(|offset| cells[(idx + offset).rem_euclid(len) as usize])
        .collect())
}

/// All hexes within `radius` of `center`
pub fn circle(radius: u32, center: Cc) -> Vec<Cc> {
    let n = radius as i32;
    let mut cells = Vec::new();
    for dr in -n..=n {
        for dh in (-n).max(-dr - n)..=n.min(-dr + n) {
            cells.push(center + Cc::new(dr, dh));
        }
    }
    cells
}

// ============================================================================
// PIXEL PROJECTION
// ============================================================================

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Pointy-top pixel layout
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Center-to-corner distance in pixels
    pub hex_size: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self { hex_size: 40.0 }
    }
}

impl Layout {
    pub fn new(hex_size: f64) -> Self {
        Self { hex_size }
    }

    /// Pixel position of a hex center
    pub fn to_pixel(&self, cc: Cc) -> (f64, f64) {
        let x = self.hex_size * (SQRT_3 * cc.r as f64 + SQRT_3 / 2.0 * cc.h as f64);
        let y = self.hex_size * (1.5 * cc.h as f64);
        (x, y)
    }

    /// Hex containing a pixel position
    pub fn from_pixel(&self, x: f64, y: f64) -> Cc {
        let r = (SQRT_3 / 3.0 * x - y / 3.0) / self.hex_size;
        let h = (2.0 / 3.0 * y) / self.hex_size;
        cube_round(r, h)
    }
}

/// Round fractional axial coordinates to the nearest hex
///
/// The axis with the largest rounding error is recomputed from the other
/// two, keeping `r + h + l == 0`.
pub fn cube_round(r: f64, h: f64) -> Cc {
    let l = -r - h;
    let mut rr = r.round();
    let mut rh = h.round();
    let rl = l.round();

    let r_diff = (rr - r).abs();
    let h_diff = (rh - h).abs();
    let l_diff = (rl - l).abs();

    if r_diff > h_diff && r_diff > l_diff {
        rr = -rh - rl;
    } else if h_diff > l_diff {
        rh = -rr - rl;
    }

    Cc::new(rr as i32, rh as i32)
}
