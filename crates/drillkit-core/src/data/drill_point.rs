//! Drill point value objects.

use serde::{Deserialize, Serialize};

use super::{DrillType, Edge, Point3, Vector3};

/// A drill point as produced by the external CAD extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillPointRecord {
    /// Hole position in CAD space (mm).
    pub position: Point3,
    /// Hole diameter (mm).
    pub diameter: f64,
    /// Drilling depth (mm).
    pub depth: f64,
    /// Extrusion/direction vector of the drilling operation.
    pub extrusion_vector: Vector3,
    /// Source layer name, e.g. `EDGE.DRILL_D8.0_P21.5`.
    #[serde(default)]
    pub layer: String,
}

/// A drill point flowing through the pipeline.
///
/// Created once per extracted CAD entity and carried through every stage.
/// Stages fill in classification and machine-space data progressively; a
/// stage that cannot process a point marks it skipped instead of dropping
/// it, so the point count is invariant end to end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillPoint {
    /// Current position. CAD space until transformed, then machine-relative.
    pub position: Point3,
    /// Hole diameter (mm).
    pub diameter: f64,
    /// Drilling depth (mm).
    pub depth: f64,
    /// Current extrusion/direction vector.
    pub extrusion_vector: Vector3,
    /// Source layer name.
    #[serde(default)]
    pub layer: String,

    /// Edge assigned by classification, if any.
    #[serde(default)]
    pub edge: Option<Edge>,
    /// Drill type implied by the edge.
    #[serde(default = "DrillPoint::default_drill_type")]
    pub drill_type: DrillType,

    /// Machine-space position, assigned by the coordinate transform.
    #[serde(default)]
    pub machine_position: Option<Point3>,
    /// Position before the first rotation touched this point.
    #[serde(default)]
    pub original_position: Option<Point3>,
    /// Extrusion vector before the first rotation touched this point.
    #[serde(default)]
    pub original_extrusion: Option<Vector3>,

    /// Whether the coordinate transform skipped this point.
    #[serde(default)]
    pub transformation_skipped: bool,
    /// Why the transform skipped this point, if it did.
    #[serde(default)]
    pub transformation_note: Option<String>,
    /// XY offset applied by positioning, recorded for traceability.
    #[serde(default)]
    pub applied_offset: Option<(f64, f64)>,
    /// Group key assigned by the simple grouper: (diameter, direction).
    #[serde(default)]
    pub group_key: Option<(f64, Vector3)>,
}

impl DrillPoint {
    fn default_drill_type() -> DrillType {
        DrillType::Unknown
    }

    /// Create an unclassified drill point.
    pub fn new(
        position: Point3,
        diameter: f64,
        depth: f64,
        extrusion_vector: Vector3,
        layer: impl Into<String>,
    ) -> Self {
        Self {
            position,
            diameter,
            depth,
            extrusion_vector,
            layer: layer.into(),
            edge: None,
            drill_type: DrillType::Unknown,
            machine_position: None,
            original_position: None,
            original_extrusion: None,
            transformation_skipped: false,
            transformation_note: None,
            applied_offset: None,
            group_key: None,
        }
    }

    /// Whether classification marked this point as vertical drilling.
    pub fn is_vertical(&self) -> bool {
        self.drill_type == DrillType::Vertical || self.edge == Some(Edge::Vertical)
    }

    /// Mark the point as skipped by a transformation stage.
    pub fn mark_skipped(&mut self, note: impl Into<String>) {
        self.transformation_skipped = true;
        self.transformation_note = Some(note.into());
    }

    /// Whether the point carries a successfully transformed machine position.
    pub fn is_transformed(&self) -> bool {
        self.machine_position.is_some() && !self.transformation_skipped
    }
}

impl From<DrillPointRecord> for DrillPoint {
    fn from(record: DrillPointRecord) -> Self {
        Self::new(
            record.position,
            record.diameter,
            record.depth,
            record.extrusion_vector,
            record.layer,
        )
    }
}
