//! Data model for the drilling pipeline.
//!
//! This module provides:
//! - Coordinate and direction primitives ([`Point3`], [`Vector3`])
//! - Symbolic classification types ([`Edge`], [`DrillType`], [`Orientation`])
//! - The drill point and workpiece value objects carried through the pipeline

use serde::{Deserialize, Serialize};

use crate::constants::{round_mm, VECTOR_EPSILON};

pub mod drill_point;
pub mod workpiece;

pub use drill_point::{DrillPoint, DrillPointRecord};
pub use workpiece::{Workpiece, WorkpieceRecord};

/// A coordinate triple in CAD or machine space (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    /// X-axis position
    pub x: f64,
    /// Y-axis position
    pub y: f64,
    /// Z-axis position
    pub z: f64,
}

impl Point3 {
    /// Create a new point.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Rotate 90 degrees clockwise about the Z axis: `(x,y) -> (y,-x)`.
    pub fn rotated_90_cw(&self) -> Self {
        Self::new(self.y, -self.x, self.z)
    }

    /// Round all components to the machine resolution (0.1 mm).
    pub fn rounded_mm(&self) -> Self {
        Self::new(round_mm(self.x), round_mm(self.y), round_mm(self.z))
    }

    /// Translate in the XY plane; Z is unchanged.
    pub fn offset_by(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z)
    }
}

impl From<(f64, f64, f64)> for Point3 {
    fn from(t: (f64, f64, f64)) -> Self {
        Self::new(t.0, t.1, t.2)
    }
}

impl std::fmt::Display for Point3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.x, self.y, self.z)
    }
}

/// A drilling direction (extrusion) vector. Need not be unit length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Vector3 {
    /// Create a new vector.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean magnitude.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit-length copy, or `None` when the vector is effectively zero.
    pub fn normalized(&self) -> Option<Self> {
        let magnitude = self.magnitude();
        if magnitude < VECTOR_EPSILON {
            return None;
        }
        Some(Self::new(
            self.x / magnitude,
            self.y / magnitude,
            self.z / magnitude,
        ))
    }

    /// Rotate 90 degrees clockwise about the Z axis: `(x,y) -> (y,-x)`.
    pub fn rotated_90_cw(&self) -> Self {
        Self::new(self.y, -self.x, self.z)
    }

    /// Round all components to 0.1.
    pub fn rounded_mm(&self) -> Self {
        Self::new(round_mm(self.x), round_mm(self.y), round_mm(self.z))
    }

    /// Integer key at 0.1 resolution, usable for exact grouping of vectors.
    pub fn grouping_key(&self) -> (i64, i64, i64) {
        (
            (self.x * 10.0).round() as i64,
            (self.y * 10.0).round() as i64,
            (self.z * 10.0).round() as i64,
        )
    }
}

impl From<(f64, f64, f64)> for Vector3 {
    fn from(t: (f64, f64, f64)) -> Self {
        Self::new(t.0, t.1, t.2)
    }
}

impl std::fmt::Display for Vector3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.x, self.y, self.z)
    }
}

/// The physical face of the workpiece a drilling operation targets.
///
/// Horizontal drilling enters through one of the four side faces; vertical
/// drilling enters top-down. `Unknown` marks vectors that match no face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Vertical,
    Left,
    Right,
    Front,
    Back,
    Unknown,
}

impl Edge {
    /// All edges, in reporting order.
    pub fn all() -> &'static [Edge] {
        &[
            Edge::Vertical,
            Edge::Front,
            Edge::Back,
            Edge::Left,
            Edge::Right,
            Edge::Unknown,
        ]
    }

    /// Uppercase label as used in layer conventions and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Edge::Vertical => "VERTICAL",
            Edge::Left => "LEFT",
            Edge::Right => "RIGHT",
            Edge::Front => "FRONT",
            Edge::Back => "BACK",
            Edge::Unknown => "UNKNOWN",
        }
    }

    /// Whether this edge is drilled horizontally (through a side face).
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Edge::Left | Edge::Right | Edge::Front | Edge::Back)
    }

    /// The drill type implied by this edge.
    pub fn drill_type(&self) -> DrillType {
        match self {
            Edge::Vertical => DrillType::Vertical,
            Edge::Left | Edge::Right | Edge::Front | Edge::Back => DrillType::Horizontal,
            Edge::Unknown => DrillType::Unknown,
        }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Orientation of the drilling operation relative to the workpiece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrillType {
    Vertical,
    Horizontal,
    Unknown,
}

impl std::fmt::Display for DrillType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertical => write!(f, "vertical"),
            Self::Horizontal => write!(f, "horizontal"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Placement of the workpiece relative to the origin, read off point C.
///
/// Point C is the corner diagonally opposite the origin-adjacent corner; its
/// quadrant determines which machine corner the workpiece currently occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    BottomLeft,
    TopLeft,
    TopRight,
    BottomRight,
    Unknown,
}

impl Orientation {
    /// Classify the placement from point C's XY signs.
    pub fn from_point_c(point_c: &Point3) -> Self {
        if point_c.x > 0.0 && point_c.y > 0.0 {
            Self::BottomLeft
        } else if point_c.x > 0.0 && point_c.y < 0.0 {
            Self::TopLeft
        } else if point_c.x < 0.0 && point_c.y < 0.0 {
            Self::TopRight
        } else if point_c.x < 0.0 && point_c.y > 0.0 {
            Self::BottomRight
        } else {
            Self::Unknown
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BottomLeft => write!(f, "bottom-left"),
            Self::TopLeft => write!(f, "top-left"),
            Self::TopRight => write!(f, "top-right"),
            Self::BottomRight => write!(f, "bottom-right"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A target corner of the machine table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CornerPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl CornerPosition {
    /// The orientation a workpiece has once parked at this corner.
    pub fn as_orientation(&self) -> Orientation {
        match self {
            Self::TopLeft => Orientation::TopLeft,
            Self::TopRight => Orientation::TopRight,
            Self::BottomLeft => Orientation::BottomLeft,
            Self::BottomRight => Orientation::BottomRight,
        }
    }
}

impl Default for CornerPosition {
    fn default() -> Self {
        Self::TopLeft
    }
}

impl std::fmt::Display for CornerPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TopLeft => write!(f, "top-left"),
            Self::TopRight => write!(f, "top-right"),
            Self::BottomLeft => write!(f, "bottom-left"),
            Self::BottomRight => write!(f, "bottom-right"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_rotation_cycle() {
        let p = Point3::new(500.0, 300.0, 12.0);
        let rotated = p
            .rotated_90_cw()
            .rotated_90_cw()
            .rotated_90_cw()
            .rotated_90_cw();
        assert_eq!(rotated, p);
    }

    #[test]
    fn test_vector_normalized() {
        let v = Vector3::new(0.0, 0.0, 2.0);
        let n = v.normalized().unwrap();
        assert!((n.z - 1.0).abs() < 1e-12);

        assert!(Vector3::new(0.0, 0.0, 0.0).normalized().is_none());
        assert!(Vector3::new(1e-5, 0.0, 0.0).normalized().is_none());
    }

    #[test]
    fn test_orientation_from_point_c() {
        assert_eq!(
            Orientation::from_point_c(&Point3::new(500.0, 300.0, 0.0)),
            Orientation::BottomLeft
        );
        assert_eq!(
            Orientation::from_point_c(&Point3::new(300.0, -500.0, 0.0)),
            Orientation::TopLeft
        );
        assert_eq!(
            Orientation::from_point_c(&Point3::new(-500.0, -300.0, 0.0)),
            Orientation::TopRight
        );
        assert_eq!(
            Orientation::from_point_c(&Point3::new(-300.0, 500.0, 0.0)),
            Orientation::BottomRight
        );
        assert_eq!(
            Orientation::from_point_c(&Point3::new(0.0, 0.0, 0.0)),
            Orientation::Unknown
        );
    }

    #[test]
    fn test_edge_labels() {
        assert_eq!(Edge::Vertical.to_string(), "VERTICAL");
        assert_eq!(Edge::Left.to_string(), "LEFT");
        assert!(Edge::Front.is_horizontal());
        assert!(!Edge::Vertical.is_horizontal());
        assert_eq!(Edge::Back.drill_type(), DrillType::Horizontal);
        assert_eq!(Edge::Unknown.drill_type(), DrillType::Unknown);
    }
}
