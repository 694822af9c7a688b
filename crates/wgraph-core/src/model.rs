//! Vertex, edge and position records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Integer identifier of a vertex.
pub type NodeId = i64;

/// A 3-D location attached to a vertex.
///
/// Positions exist for persistence and visualization only; no algorithm reads
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// True when every coordinate is a finite number.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        dz.mul_add(dz, dx.mul_add(dx, dy * dy)).sqrt()
    }
}

/// Why a `"x,y,z"` string could not be read as a [`Position`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePositionError {
    #[error("expected 3 comma-separated components, found {0}")]
    WrongArity(usize),
    #[error("component {index} ({raw:?}) is not a finite number")]
    BadComponent { index: usize, raw: String },
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ParsePositionError::WrongArity(parts.len()));
        }

        let mut coords = [0.0_f64; 3];
        for (index, raw) in parts.iter().enumerate() {
            coords[index] = raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ParsePositionError::BadComponent {
                    index,
                    raw: (*raw).to_string(),
                })?;
        }

        Ok(Self::new(coords[0], coords[1], coords[2]))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// A vertex record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub pos: Option<Position>,
}

/// A directed, weighted edge. Identified by `(src, dst)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub src: NodeId,
    pub dst: NodeId,
    pub weight: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_schema_string() {
        let pos: Position = "35.1, 32.1,0.0".parse().expect("valid position");
        assert_eq!(pos, Position::new(35.1, 32.1, 0.0));
    }

    #[test]
    fn display_round_trips_exactly() {
        let pos = Position::new(35.212_217_299_435_04, 32.106_235_628_571_43, 0.0);
        let parsed: Position = pos.to_string().parse().expect("round trip");
        assert_eq!(parsed, pos);
    }

    #[test]
    fn rejects_wrong_arity() {
        assert_eq!(
            "1,2".parse::<Position>(),
            Err(ParsePositionError::WrongArity(2))
        );
        assert_eq!(
            "1,2,3,4".parse::<Position>(),
            Err(ParsePositionError::WrongArity(4))
        );
    }

    #[test]
    fn rejects_non_numeric_and_non_finite() {
        assert!(matches!(
            "1,abc,3".parse::<Position>(),
            Err(ParsePositionError::BadComponent { index: 1, .. })
        ));
        assert!(matches!(
            "1,2,inf".parse::<Position>(),
            Err(ParsePositionError::BadComponent { index: 2, .. })
        ));
        assert!("".parse::<Position>().is_err());
    }

    #[test]
    fn finiteness_covers_every_axis() {
        assert!(Position::new(35.2, 32.1, 0.0).is_finite());
        assert!(!Position::new(f64::INFINITY, 0.0, 0.0).is_finite());
        assert!(!Position::new(0.0, f64::NAN, 0.0).is_finite());
        assert!(!Position::new(0.0, 0.0, f64::NEG_INFINITY).is_finite());
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 4.0, 12.0);
        assert!((a.distance(&b) - 13.0).abs() < 1e-12);
        assert!(a.distance(&a).abs() < f64::EPSILON);
    }
}
