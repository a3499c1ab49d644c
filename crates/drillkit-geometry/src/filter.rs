//! Partitioning drill points by machine capability.
//!
//! The horizontal spindles handle X/Y drilling; top-down work goes to a
//! different program section. This stage splits a batch accordingly.

use serde::Serialize;
use tracing::{info, warn};

use drillkit_core::constants::VECTOR_EPSILON;
use drillkit_core::data::{DrillPoint, Vector3};

/// Counts produced by a filtering pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FilterStats {
    pub original_count: usize,
    pub horizontal_count: usize,
    pub vertical_count: usize,
    pub missing_vector_count: usize,
}

/// Split a batch into horizontal and vertical drilling points.
///
/// A point is vertical exactly when its extrusion vector is `(0, 0, 1)`;
/// everything else with a usable vector counts as horizontal. Points with a
/// degenerate vector are dropped with a warning and counted.
pub fn filter_for_horizontal_drilling(
    points: Vec<DrillPoint>,
) -> (Vec<DrillPoint>, Vec<DrillPoint>, FilterStats) {
    let mut stats = FilterStats {
        original_count: points.len(),
        ..Default::default()
    };

    let vertical_vector = Vector3::new(0.0, 0.0, 1.0);
    let mut horizontal = Vec::new();
    let mut vertical = Vec::new();

    for point in points {
        if point.extrusion_vector.magnitude() < VECTOR_EPSILON {
            warn!("Drill point at {} has no direction vector", point.position);
            stats.missing_vector_count += 1;
            continue;
        }
        if point.extrusion_vector == vertical_vector {
            vertical.push(point);
        } else {
            horizontal.push(point);
        }
    }

    stats.horizontal_count = horizontal.len();
    stats.vertical_count = vertical.len();
    info!(
        "Filtered drill points: {} horizontal, {} vertical",
        stats.horizontal_count, stats.vertical_count
    );

    (horizontal, vertical, stats)
}
