//! Grouping drill points into tool requirements.
//!
//! For horizontal drilling the edge is the primary grouping factor: each
//! edge is served by a different spindle, so points on different edges need
//! different tools even at the same diameter.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;
use tracing::warn;

use drillkit_core::constants::round_mm;
use drillkit_core::data::{DrillPoint, Edge, Vector3};

use crate::classifier::detect_edge;

/// A bucket of drill points sharing an edge and diameter: one tool requirement.
#[derive(Debug, Clone, Serialize)]
pub struct ToolRequirementGroup {
    /// Edge the group drills into.
    pub edge: Edge,
    /// Hole diameter, rounded to 0.1mm.
    pub diameter: f64,
    /// Whether this is top-down drilling.
    pub is_vertical: bool,
    /// Member points.
    pub points: Vec<DrillPoint>,
    /// Distinct drilling depths, ascending.
    pub depths: Vec<f64>,
    /// Distinct source layers.
    pub layers: Vec<String>,
    /// Distinct direction vectors (rounded to 0.1).
    pub vectors: Vec<Vector3>,
    /// Representative direction vector for display.
    pub primary_vector: Option<Vector3>,
    /// Member count.
    pub count: usize,
}

/// Aggregate counts for an analysis pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisStatistics {
    pub total_points: usize,
    pub total_groups: usize,
    pub vertical_groups: usize,
    pub horizontal_groups: usize,
    pub vertical_points: usize,
    pub horizontal_points: usize,
    pub rejected_points: usize,
    pub edge_counts: BTreeMap<String, usize>,
}

/// Result of analyzing a batch of drill points.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Tool requirement groups in deterministic order: vertical groups
    /// first, then by edge label, then by diameter ascending.
    pub groups: Vec<ToolRequirementGroup>,
    /// Points excluded from grouping (non-finite position or invalid
    /// diameter), kept for reporting.
    pub rejected: Vec<DrillPoint>,
    /// Aggregate counts.
    pub statistics: AnalysisStatistics,
}

impl Analysis {
    /// One-line description of the pass.
    pub fn summary(&self) -> String {
        format!(
            "Analysis complete: {} tool groups ({} vertical, {} horizontal)",
            self.statistics.total_groups,
            self.statistics.vertical_groups,
            self.statistics.horizontal_groups
        )
    }
}

/// Group drill points by tool requirement (edge + rounded diameter).
///
/// The edge is derived from each point's direction vector, so the batch does
/// not need to be classified beforehand. Invalid points go into the
/// rejection list instead of failing the pass; the sum of group member
/// counts plus rejections always equals the input count.
pub fn analyze_drill_points(points: &[DrillPoint]) -> Analysis {
    let mut index: HashMap<(Edge, i64), usize> = HashMap::new();
    let mut groups: Vec<ToolRequirementGroup> = Vec::new();
    let mut group_layers: Vec<BTreeSet<String>> = Vec::new();
    let mut group_vector_keys: Vec<BTreeSet<(i64, i64, i64)>> = Vec::new();
    let mut rejected: Vec<DrillPoint> = Vec::new();

    for point in points {
        let position_valid = point.position.x.is_finite()
            && point.position.y.is_finite()
            && point.position.z.is_finite();
        if !position_valid || point.diameter <= 0.0 {
            warn!(
                "Skipping invalid drill point at {} (diameter {})",
                point.position, point.diameter
            );
            rejected.push(point.clone());
            continue;
        }

        let diameter = round_mm(point.diameter);
        let depth = round_mm(point.depth);
        let edge = detect_edge(&point.extrusion_vector);
        let key = (edge, (diameter * 10.0).round() as i64);

        let group_index = *index.entry(key).or_insert_with(|| {
            groups.push(ToolRequirementGroup {
                edge,
                diameter,
                is_vertical: edge == Edge::Vertical,
                points: Vec::new(),
                depths: Vec::new(),
                layers: Vec::new(),
                vectors: Vec::new(),
                primary_vector: None,
                count: 0,
            });
            group_layers.push(BTreeSet::new());
            group_vector_keys.push(BTreeSet::new());
            groups.len() - 1
        });

        let group = &mut groups[group_index];
        group.points.push(point.clone());
        if !group.depths.iter().any(|d| (*d - depth).abs() < f64::EPSILON) {
            group.depths.push(depth);
        }
        group_layers[group_index].insert(point.layer.clone());

        let rounded_vector = point.extrusion_vector.rounded_mm();
        if group_vector_keys[group_index].insert(rounded_vector.grouping_key()) {
            group.vectors.push(rounded_vector);
        }
        if group.primary_vector.is_none() {
            group.primary_vector = Some(rounded_vector);
        }
    }

    for (group, layers) in groups.iter_mut().zip(group_layers) {
        group.count = group.points.len();
        group.depths.sort_by(|a, b| a.total_cmp(b));
        group.layers = layers.into_iter().collect();
    }

    groups.sort_by(|a, b| {
        let ka = u8::from(!a.is_vertical);
        let kb = u8::from(!b.is_vertical);
        ka.cmp(&kb)
            .then_with(|| a.edge.label().cmp(b.edge.label()))
            .then_with(|| a.diameter.total_cmp(&b.diameter))
    });

    let mut statistics = AnalysisStatistics {
        total_points: points.len(),
        total_groups: groups.len(),
        rejected_points: rejected.len(),
        ..Default::default()
    };
    for group in &groups {
        *statistics
            .edge_counts
            .entry(group.edge.label().to_string())
            .or_insert(0) += group.count;
        if group.is_vertical {
            statistics.vertical_groups += 1;
            statistics.vertical_points += group.count;
        } else {
            statistics.horizontal_groups += 1;
            statistics.horizontal_points += group.count;
        }
    }

    Analysis {
        groups,
        rejected,
        statistics,
    }
}
