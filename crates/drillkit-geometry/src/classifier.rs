//! Edge classification of drilling direction vectors.
//!
//! The single source of truth for edge semantics: every downstream stage
//! relies on the labels produced here.

use std::collections::BTreeMap;

use serde::Serialize;

use drillkit_core::constants::AXIS_TOLERANCE;
use drillkit_core::data::{DrillPoint, DrillType, Edge, Vector3};

/// Classify a direction vector by the workpiece face it drills into.
///
/// The vector need not be unit length; it is normalized first, and vectors
/// with magnitude below 1e-4 classify as [`Edge::Unknown`]. A vector within
/// the axis tolerance of pure +Z is vertical drilling; otherwise the
/// strictly dominant X or Y component selects the edge. Vectors with no
/// dominant component (diagonals) are unknown.
pub fn detect_edge(vector: &Vector3) -> Edge {
    let unit = match vector.normalized() {
        Some(unit) => unit,
        None => return Edge::Unknown,
    };

    if (unit.z - 1.0).abs() < AXIS_TOLERANCE
        && unit.x.abs() < AXIS_TOLERANCE
        && unit.y.abs() < AXIS_TOLERANCE
    {
        return Edge::Vertical;
    }

    if unit.x.abs() > unit.y.abs() && unit.x.abs() > unit.z.abs() {
        if unit.x > 0.0 {
            Edge::Right
        } else {
            Edge::Left
        }
    } else if unit.y.abs() > unit.x.abs() && unit.y.abs() > unit.z.abs() {
        if unit.y > 0.0 {
            Edge::Back
        } else {
            Edge::Front
        }
    } else {
        Edge::Unknown
    }
}

/// Counts produced by a classification pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassificationReport {
    pub total_points: usize,
    pub vertical_count: usize,
    pub horizontal_count: usize,
    pub unknown_count: usize,
    pub by_edge: BTreeMap<String, usize>,
}

impl ClassificationReport {
    /// One-line description of the pass.
    pub fn summary(&self) -> String {
        format!(
            "Classification complete: {} vertical, {} horizontal points",
            self.vertical_count, self.horizontal_count
        )
    }
}

/// Stamp every drill point with its edge and drill type.
///
/// Consumes the batch and returns the classified points together with the
/// per-edge counts. An empty batch is fine and yields an empty report.
pub fn classify_points(points: Vec<DrillPoint>) -> (Vec<DrillPoint>, ClassificationReport) {
    let mut report = ClassificationReport {
        total_points: points.len(),
        ..Default::default()
    };

    let points = points
        .into_iter()
        .map(|mut point| {
            let edge = detect_edge(&point.extrusion_vector);
            point.edge = Some(edge);
            point.drill_type = edge.drill_type();

            *report.by_edge.entry(edge.label().to_string()).or_insert(0) += 1;
            match point.drill_type {
                DrillType::Vertical => report.vertical_count += 1,
                DrillType::Horizontal => report.horizontal_count += 1,
                DrillType::Unknown => report.unknown_count += 1,
            }
            point
        })
        .collect();

    (points, report)
}

/// Bucket classified points by edge, in reporting order.
///
/// Unclassified points land in the `Unknown` bucket.
pub fn points_by_edge(points: &[DrillPoint]) -> Vec<(Edge, Vec<&DrillPoint>)> {
    Edge::all()
        .iter()
        .map(|&edge| {
            let members = points
                .iter()
                .filter(|p| p.edge.unwrap_or(Edge::Unknown) == edge)
                .collect();
            (edge, members)
        })
        .collect()
}
