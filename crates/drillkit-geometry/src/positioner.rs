//! Parking the workpiece at a machine-table corner.
//!
//! After transformation (and any rotation) the workpiece occupies one of the
//! four quadrants around the origin; the machine expects its program zero at
//! a specific table corner. Moving between any two corners of a rectangle
//! is a translation by the rectangle's own footprint, so the whole stage is
//! a 4x4 lookup over (current orientation, target corner).

use serde::Serialize;
use tracing::{info, warn};

use drillkit_core::constants::round_mm;
use drillkit_core::data::{CornerPosition, DrillPoint, Orientation, Point3};

/// Counts produced by an offset application pass.
#[derive(Debug, Clone, Serialize)]
pub struct PositioningReport {
    /// The XY offset that was applied.
    pub offset: (f64, f64),
    /// The target corner.
    pub target: CornerPosition,
    /// The orientation the workpiece had before positioning.
    pub orientation: Orientation,
    pub total_points: usize,
    pub offset_applied: usize,
    pub errors: usize,
}

impl PositioningReport {
    /// One-line description of the pass.
    pub fn summary(&self) -> String {
        format!(
            "Applied offset ({:.1}, {:.1}) to {} points",
            self.offset.0, self.offset.1, self.offset_applied
        )
    }
}

/// Computes and applies the offset that parks the workpiece at a target
/// corner of the machine table.
pub struct WorkpiecePositioner {
    target: CornerPosition,
    width: f64,
    height: f64,
}

impl WorkpiecePositioner {
    /// Create a positioner for a target corner and the workpiece's current
    /// footprint (post-rotation width and height).
    pub fn new(target: CornerPosition, width: f64, height: f64) -> Self {
        Self {
            target,
            width,
            height,
        }
    }

    /// The offset that moves the workpiece from `current` to the target
    /// corner. Every cell is a translation by the footprint: `{0, +/-W} x
    /// {0, +/-H}`. An unknown orientation yields a zero offset.
    pub fn calculate_offset(&self, current: Orientation) -> (f64, f64) {
        use CornerPosition as Target;
        let (w, h) = (self.width, self.height);

        match (current, self.target) {
            (Orientation::TopLeft, Target::TopLeft)
            | (Orientation::TopRight, Target::TopRight)
            | (Orientation::BottomLeft, Target::BottomLeft)
            | (Orientation::BottomRight, Target::BottomRight) => (0.0, 0.0),

            (Orientation::TopRight, Target::TopLeft) => (-w, 0.0),
            (Orientation::BottomLeft, Target::TopLeft) => (0.0, -h),
            (Orientation::BottomRight, Target::TopLeft) => (-w, -h),

            (Orientation::TopLeft, Target::TopRight) => (w, 0.0),
            (Orientation::BottomRight, Target::TopRight) => (0.0, -h),
            (Orientation::BottomLeft, Target::TopRight) => (w, -h),

            (Orientation::BottomRight, Target::BottomLeft) => (-w, 0.0),
            (Orientation::TopLeft, Target::BottomLeft) => (0.0, h),
            (Orientation::TopRight, Target::BottomLeft) => (-w, h),

            (Orientation::BottomLeft, Target::BottomRight) => (w, 0.0),
            (Orientation::TopRight, Target::BottomRight) => (0.0, h),
            (Orientation::TopLeft, Target::BottomRight) => (w, h),

            (Orientation::Unknown, target) => {
                warn!("Unknown orientation, using zero offset for {target}");
                (0.0, 0.0)
            }
        }
    }

    /// Add the offset to every point's machine position.
    ///
    /// Z is unchanged; X and Y are rounded to 0.1mm after the shift, and the
    /// applied offset is recorded on each point. Points without a machine
    /// position are counted as errors and left untouched.
    pub fn apply_offset(
        &self,
        points: Vec<DrillPoint>,
        current: Orientation,
    ) -> (Vec<DrillPoint>, PositioningReport) {
        let (dx, dy) = self.calculate_offset(current);
        let mut report = PositioningReport {
            offset: (dx, dy),
            target: self.target,
            orientation: current,
            total_points: points.len(),
            offset_applied: 0,
            errors: 0,
        };

        let points = points
            .into_iter()
            .map(|mut point| match point.machine_position {
                Some(machine) => {
                    let shifted = machine.offset_by(dx, dy);
                    point.machine_position = Some(Point3::new(
                        round_mm(shifted.x),
                        round_mm(shifted.y),
                        shifted.z,
                    ));
                    point.applied_offset = Some((dx, dy));
                    report.offset_applied += 1;
                    point
                }
                None => {
                    warn!("Drill point has no machine position, skipping offset");
                    report.errors += 1;
                    point
                }
            })
            .collect();

        info!("{}", report.summary());
        (points, report)
    }
}
