//! Simple drill point grouping by diameter and direction.
//!
//! A lighter-weight companion to the tool requirement analysis: groups are
//! keyed by the raw `(diameter, direction vector)` pair and each point is
//! stamped with its key so later stages can refer back to its group.

use std::collections::BTreeMap;

use serde::Serialize;

use drillkit_core::constants::VECTOR_EPSILON;
use drillkit_core::data::{DrillPoint, Vector3};

use crate::error::{GeometryError, GeometryResult};

/// A group of drill points sharing a diameter and direction.
#[derive(Debug, Clone, Serialize)]
pub struct DrillGroup {
    /// Hole diameter (mm).
    pub diameter: f64,
    /// Shared direction vector.
    pub direction: Vector3,
    /// Member points.
    pub points: Vec<DrillPoint>,
}

/// Group drill points by `(diameter, direction)`.
///
/// An empty batch or a point without a usable direction vector is a
/// structural error: the caller handed over data the extractor should not
/// have produced. Groups come back in a deterministic order (diameter
/// ascending, then direction components).
pub fn group_drill_points(
    points: Vec<DrillPoint>,
) -> GeometryResult<(Vec<DrillPoint>, Vec<DrillGroup>)> {
    if points.is_empty() {
        return Err(GeometryError::EmptyPointList);
    }

    let mut grouped: BTreeMap<(i64, (i64, i64, i64)), DrillGroup> = BTreeMap::new();
    let mut stamped = Vec::with_capacity(points.len());

    for mut point in points {
        if point.extrusion_vector.magnitude() < VECTOR_EPSILON {
            return Err(GeometryError::MissingDirection);
        }

        let key = (
            (point.diameter * 10.0).round() as i64,
            point.extrusion_vector.grouping_key(),
        );
        point.group_key = Some((point.diameter, point.extrusion_vector));

        grouped
            .entry(key)
            .or_insert_with(|| DrillGroup {
                diameter: point.diameter,
                direction: point.extrusion_vector,
                points: Vec::new(),
            })
            .points
            .push(point.clone());
        stamped.push(point);
    }

    Ok((stamped, grouped.into_values().collect()))
}
