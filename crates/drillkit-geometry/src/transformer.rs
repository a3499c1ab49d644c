//! Edge-specific transformation from CAD coordinates to machine coordinates.
//!
//! Horizontal drilling points are authored in the plane of the edge they
//! drill into; the machine wants them in table coordinates. The mapping per
//! edge, for a workpiece of width W, height H, thickness T:
//!
//! | Edge  | machine X | machine Y | machine Z |
//! |-------|-----------|-----------|-----------|
//! | LEFT  | 0         | H - |x|   | T + y     |
//! | RIGHT | W         | H - |x|   | T + y     |
//! | FRONT | W - |x|   | H         | T + y     |
//! | BACK  | W - |x|   | 0         | T + y     |
//!
//! Outputs are rounded to 0.1mm, the machine's working resolution.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use drillkit_core::constants::round_mm;
use drillkit_core::data::{DrillPoint, Edge, Point3, Workpiece};

use crate::error::{GeometryError, GeometryResult};

/// Applies the edge-specific CAD-to-machine coordinate mapping.
pub struct DrillPointTransformer {
    width: f64,
    height: f64,
    thickness: f64,
}

/// Per-edge counters for a transformation pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EdgeTransformStats {
    pub total: usize,
    pub transformed: usize,
    pub errors: usize,
}

/// Counts produced by a transformation pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransformReport {
    pub total_points: usize,
    pub horizontal_points: usize,
    pub vertical_points: usize,
    pub transformed: usize,
    pub skipped: usize,
    pub errors: usize,
    pub by_edge: BTreeMap<String, EdgeTransformStats>,
}

impl TransformReport {
    /// One-line description of the pass.
    pub fn summary(&self) -> String {
        format!(
            "Transformed {} of {} horizontal drilling points. Skipped {} vertical points.",
            self.transformed, self.horizontal_points, self.vertical_points
        )
    }
}

impl DrillPointTransformer {
    /// Create a transformer for the given workpiece dimensions.
    pub fn new(width: f64, height: f64, thickness: f64) -> GeometryResult<Self> {
        if width <= 0.0 || height <= 0.0 || thickness <= 0.0 {
            return Err(GeometryError::InvalidDimensions {
                width,
                height,
                thickness,
            });
        }
        Ok(Self {
            width,
            height,
            thickness,
        })
    }

    /// Create a transformer from a validated workpiece.
    pub fn for_workpiece(workpiece: &Workpiece) -> GeometryResult<Self> {
        Self::new(workpiece.width, workpiece.height, workpiece.thickness)
    }

    /// Machine Z for a horizontal drilling point: `thickness + y`.
    pub fn transform_z(&self, y_cad: f64) -> f64 {
        round_mm(self.thickness + y_cad)
    }

    /// Transform a single position for the given edge.
    ///
    /// Fails for any edge outside {LEFT, RIGHT, FRONT, BACK}; vertical
    /// drilling has no machine-space mapping here.
    pub fn transform_point(&self, position: &Point3, edge: Edge) -> GeometryResult<Point3> {
        let (x, y) = match edge {
            Edge::Left => (0.0, self.height - position.x.abs()),
            Edge::Right => (self.width, self.height - position.x.abs()),
            Edge::Front => (self.width - position.x.abs(), self.height),
            Edge::Back => (self.width - position.x.abs(), 0.0),
            other => return Err(GeometryError::UnsupportedEdge(other.label().to_string())),
        };
        Ok(Point3::new(
            round_mm(x),
            round_mm(y),
            self.transform_z(position.y),
        ))
    }

    /// Transform a classified batch.
    ///
    /// Horizontal points get a machine position; vertical points pass
    /// through untouched with a skip note; points without a usable edge are
    /// skipped as well. The output batch has the same length and order as
    /// the input.
    pub fn transform_points(&self, points: Vec<DrillPoint>) -> (Vec<DrillPoint>, TransformReport) {
        let mut report = TransformReport {
            total_points: points.len(),
            ..Default::default()
        };

        let points: Vec<DrillPoint> = points
            .into_iter()
            .map(|mut point| {
                let edge = point.edge.unwrap_or(Edge::Unknown);

                if edge == Edge::Vertical {
                    report.vertical_points += 1;
                    point.mark_skipped("vertical drilling is not transformed");
                    return point;
                }
                if !edge.is_horizontal() {
                    report.skipped += 1;
                    point.mark_skipped("missing edge or position data");
                    return point;
                }

                report.horizontal_points += 1;
                let stats = report.by_edge.entry(edge.label().to_string()).or_default();
                stats.total += 1;

                match self.transform_point(&point.position, edge) {
                    Ok(machine_position) => {
                        point.machine_position = Some(machine_position);
                        point.transformation_skipped = false;
                        report.transformed += 1;
                        stats.transformed += 1;
                    }
                    Err(err) => {
                        point.mark_skipped(err.to_string());
                        report.errors += 1;
                        stats.errors += 1;
                    }
                }
                point
            })
            .collect();

        info!("{}", report.summary());
        (points, report)
    }
}
