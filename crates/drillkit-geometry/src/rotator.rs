//! Workpiece rotation in 90 degree increments.
//!
//! Rotation is a pure coordinate rotation about the Z axis, never a
//! reflection: four clockwise steps restore every coordinate. Orientation
//! and footprint are always read off point C (the corner diagonally
//! opposite the origin corner) after rotation, never re-measured.

use serde::Serialize;
use tracing::warn;

use drillkit_core::constants::AUTO_ROTATION_HEIGHT_LIMIT;
use drillkit_core::data::{DrillPoint, Orientation, Point3, Vector3, Workpiece};

use crate::error::{GeometryError, GeometryResult};

/// Counts produced by rotating a batch of drill points.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RotationReport {
    /// Rotation angle applied, in degrees.
    pub angle: u32,
    /// Number of points in the batch.
    pub count: usize,
    /// Points rotated successfully.
    pub successful_rotations: usize,
    /// Points left untouched because their coordinates were unusable.
    pub skipped: usize,
}

impl RotationReport {
    /// One-line description of the pass.
    pub fn summary(&self) -> String {
        format!(
            "Rotated {} drill points by {} degrees",
            self.successful_rotations, self.angle
        )
    }
}

/// Tracks the rotation state of a workpiece's corner points.
pub struct WorkpieceRotator {
    original_corners: Vec<Point3>,
    current_corners: Vec<Point3>,
    rotation_count: u32,
}

impl WorkpieceRotator {
    /// Create a rotator for a workpiece's corner list.
    pub fn new(workpiece: &Workpiece) -> GeometryResult<Self> {
        Self::from_corners(workpiece.corner_points.clone())
    }

    /// Create a rotator from a raw corner list.
    pub fn from_corners(corners: Vec<Point3>) -> GeometryResult<Self> {
        if corners.len() < 4 {
            return Err(GeometryError::InsufficientCorners(corners.len()));
        }
        Ok(Self {
            original_corners: corners.clone(),
            current_corners: corners,
            rotation_count: 0,
        })
    }

    /// Rotate the corner points 90 degrees clockwise: `(x,y) -> (y,-x)`.
    pub fn rotate_90_clockwise(&mut self) -> &[Point3] {
        for corner in &mut self.current_corners {
            *corner = corner.rotated_90_cw();
        }
        self.rotation_count += 1;
        &self.current_corners
    }

    /// Restore the original corner points and zero the rotation count.
    pub fn reset_to_original(&mut self) {
        self.current_corners = self.original_corners.clone();
        self.rotation_count = 0;
    }

    /// Current rotation angle in degrees (0, 90, 180, or 270).
    pub fn rotation_angle(&self) -> u32 {
        (self.rotation_count % 4) * 90
    }

    /// Current corner points.
    pub fn current_corners(&self) -> &[Point3] {
        &self.current_corners
    }

    /// Point C: the corner diagonally opposite the origin corner.
    pub fn point_c(&self) -> Point3 {
        self.current_corners[2]
    }

    /// Current placement relative to the origin, read off point C.
    pub fn orientation(&self) -> Orientation {
        Orientation::from_point_c(&self.point_c())
    }

    /// Current footprint `(width, height)`, always `(|c.x|, |c.y|)`.
    pub fn dimensions(&self) -> (f64, f64) {
        let c = self.point_c();
        (c.x.abs(), c.y.abs())
    }

    /// How far the point-C-derived footprint strays from the supplied
    /// dimensions, accounting for the width/height swap of odd rotations.
    pub fn dimension_drift(&self, supplied_width: f64, supplied_height: f64) -> (f64, f64) {
        let (width, height) = self.dimensions();
        let (expected_width, expected_height) = if self.rotation_count % 2 == 1 {
            (supplied_height, supplied_width)
        } else {
            (supplied_width, supplied_height)
        };
        ((width - expected_width).abs(), (height - expected_height).abs())
    }

    /// Whether the current footprint requires the automatic rotation.
    pub fn auto_rotation_needed(&self) -> bool {
        self.dimensions().1 > AUTO_ROTATION_HEIGHT_LIMIT
    }

    /// Rotate a coordinate triple by the current angle.
    fn rotate_to_current(&self, p: Point3) -> Point3 {
        match self.rotation_angle() {
            90 => Point3::new(p.y, -p.x, p.z),
            180 => Point3::new(-p.x, -p.y, p.z),
            270 => Point3::new(-p.y, p.x, p.z),
            _ => p,
        }
    }

    /// Rotate a batch of drill points by the current angle.
    ///
    /// Positions and extrusion vectors rotate together; the pre-rotation
    /// values are retained on each point. Points with unusable coordinates
    /// are skipped and counted, never dropped.
    pub fn rotate_points(&self, points: Vec<DrillPoint>) -> (Vec<DrillPoint>, RotationReport) {
        let mut report = RotationReport {
            angle: self.rotation_angle(),
            count: points.len(),
            ..Default::default()
        };

        if report.angle == 0 {
            return (points, report);
        }

        let points = points
            .into_iter()
            .map(|mut point| {
                let usable = point.position.x.is_finite() && point.position.y.is_finite();
                if !usable {
                    warn!("Cannot rotate drill point at {}", point.position);
                    report.skipped += 1;
                    return point;
                }

                point.original_position.get_or_insert(point.position);
                point.position = self.rotate_to_current(point.position);

                point.original_extrusion.get_or_insert(point.extrusion_vector);
                let v = point.extrusion_vector;
                let rotated = self.rotate_to_current(Point3::new(v.x, v.y, v.z));
                point.extrusion_vector = Vector3::new(rotated.x, rotated.y, rotated.z);

                report.successful_rotations += 1;
                point
            })
            .collect();

        (points, report)
    }

    /// Rotate the machine-space positions of a batch by the current angle.
    ///
    /// Used after the edge transform, when the coordinates to carry through
    /// the rotation live in `machine_position`. Points without a machine
    /// position are skipped and counted.
    pub fn rotate_machine_points(
        &self,
        points: Vec<DrillPoint>,
    ) -> (Vec<DrillPoint>, RotationReport) {
        let mut report = RotationReport {
            angle: self.rotation_angle(),
            count: points.len(),
            ..Default::default()
        };

        if report.angle == 0 {
            return (points, report);
        }

        let points = points
            .into_iter()
            .map(|mut point| match point.machine_position {
                Some(machine) => {
                    point.machine_position = Some(self.rotate_to_current(machine));
                    report.successful_rotations += 1;
                    point
                }
                None => {
                    report.skipped += 1;
                    point
                }
            })
            .collect();

        (points, report)
    }
}
