//! Fundamental geometric and simulation types.
//!
//! Axis convention: y is up. The horizontal plane is x/z and is the only
//! plane the movement subsystems steer in; the y component of a velocity
//! belongs to external physics.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Stable identity of a simulated agent. Assigned once by the entity
/// registry, starting at 1, and never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// World-space position (meters).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// World-space velocity (m/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Two-axis movement input for the controlled agent, already mapped to the
/// horizontal plane (x = right, z = forward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveInput {
    pub x: f64,
    pub z: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current fixed tick number.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Straight-line distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        DVec3::from(*self).distance(DVec3::from(*other))
    }

    /// Distance in the horizontal plane (ignoring height).
    pub fn horizontal_distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Speed in the horizontal plane.
    pub fn horizontal_speed(&self) -> f64 {
        (self.x * self.x + self.z * self.z).sqrt()
    }
}

impl MoveInput {
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.z * self.z).sqrt()
    }
}

impl SimTime {
    /// Seconds per fixed tick.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one fixed tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

impl From<Position> for DVec3 {
    fn from(p: Position) -> Self {
        DVec3::new(p.x, p.y, p.z)
    }
}

impl From<DVec3> for Position {
    fn from(v: DVec3) -> Self {
        Position::new(v.x, v.y, v.z)
    }
}

impl From<Velocity> for DVec3 {
    fn from(v: Velocity) -> Self {
        DVec3::new(v.x, v.y, v.z)
    }
}

impl From<DVec3> for Velocity {
    fn from(v: DVec3) -> Self {
        Velocity::new(v.x, v.y, v.z)
    }
}
