//! Machine placement driven directly by point C.
//!
//! An alternative to the orientation-table positioner for full jobs: the
//! shift that parks the workpiece's top-left corner at the machine origin
//! can be read straight off point C. If point C sits left of the origin the
//! workpiece shifts right by |c.x|; if it sits above, it shifts down by
//! |c.y|. Corner points and drill points move together.

use serde::Serialize;
use tracing::debug;

use drillkit_core::constants::round_mm;
use drillkit_core::data::{DrillPoint, Point3, Workpiece};

use crate::error::{GeometryError, GeometryResult};

/// Result of placing a workpiece and its drill points in machine space.
#[derive(Debug, Clone, Serialize)]
pub struct MachinePlacement {
    /// Workpiece with machine corner points and the applied offset recorded.
    pub workpiece: Workpiece,
    /// Drill points with machine positions assigned.
    pub points: Vec<DrillPoint>,
    /// The applied XY offset.
    pub offset: (f64, f64),
}

/// The offset that parks the top-left corner at the machine origin.
fn offset_from_point_c(point_c: &Point3) -> (f64, f64) {
    let offset_x = if point_c.x < 0.0 { -point_c.x } else { 0.0 };
    let offset_y = if point_c.y > 0.0 { -point_c.y } else { 0.0 };
    debug!(
        "Point C at ({}, {}) gives offset ({}, {})",
        point_c.x, point_c.y, offset_x, offset_y
    );
    (offset_x, offset_y)
}

fn shift(p: &Point3, dx: f64, dy: f64) -> Point3 {
    Point3::new(round_mm(p.x + dx), round_mm(p.y + dy), p.z)
}

/// Place the workpiece with its top-left corner at the machine origin.
///
/// The offset derived from point C is applied to every corner point and
/// every drill point; drill points receive it as their machine position,
/// with the CAD position retained. Missing corner data is a structural
/// error for the whole stage.
pub fn position_for_top_left(
    workpiece: &Workpiece,
    points: Vec<DrillPoint>,
) -> GeometryResult<MachinePlacement> {
    if workpiece.corner_points.len() < 4 {
        return Err(GeometryError::InsufficientCorners(
            workpiece.corner_points.len(),
        ));
    }

    let point_c = workpiece
        .point_c()
        .ok_or(GeometryError::MissingWorkpiece)?;
    let (dx, dy) = offset_from_point_c(&point_c);

    let machine_corners: Vec<Point3> = workpiece
        .corner_points
        .iter()
        .map(|corner| shift(corner, dx, dy))
        .collect();

    let points = points
        .into_iter()
        .map(|mut point| {
            point.original_position.get_or_insert(point.position);
            point.machine_position = Some(shift(&point.position, dx, dy));
            point
        })
        .collect();

    let mut positioned = workpiece.clone();
    positioned.machine_corner_points = Some(machine_corners);
    positioned.machine_offset = Some((dx, dy));

    Ok(MachinePlacement {
        workpiece: positioned,
        points,
        offset: (dx, dy),
    })
}
