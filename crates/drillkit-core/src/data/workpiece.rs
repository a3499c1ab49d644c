//! Workpiece boundary and placement data.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

use super::Point3;

/// Workpiece boundary as produced by the external CAD extractor.
///
/// `corner_points[0]` is the origin-adjacent corner and `corner_points[2]`
/// is the diagonally opposite corner ("point C").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkpieceRecord {
    /// Corner points in CAD space, winding order preserved.
    pub corner_points: Vec<Point3>,
    /// Panel width (mm).
    pub width: f64,
    /// Panel height (mm).
    pub height: f64,
    /// Panel thickness (mm).
    pub thickness: f64,
}

/// The workpiece flowing through the pipeline.
///
/// Rotation replaces the current corner list; positioning adds machine-space
/// corners and the applied offset. The originally supplied corners and
/// dimensions are retained for traceability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workpiece {
    /// Current corner points (CAD space until positioned).
    pub corner_points: Vec<Point3>,
    /// Width as supplied by the extractor (mm).
    pub width: f64,
    /// Height as supplied by the extractor (mm).
    pub height: f64,
    /// Thickness (mm).
    pub thickness: f64,

    /// Bounding box minimum X of the corner points.
    pub min_x: f64,
    /// Bounding box minimum Y of the corner points.
    pub min_y: f64,
    /// Bounding box maximum X of the corner points.
    pub max_x: f64,
    /// Bounding box maximum Y of the corner points.
    pub max_y: f64,

    /// Corner points as originally supplied, retained once rotation
    /// replaces the current list.
    #[serde(default)]
    pub original_corner_points: Option<Vec<Point3>>,
    /// Corner points after machine positioning, if applied.
    #[serde(default)]
    pub machine_corner_points: Option<Vec<Point3>>,
    /// XY offset applied by machine positioning, if any.
    #[serde(default)]
    pub machine_offset: Option<(f64, f64)>,
}

impl Workpiece {
    /// Build and validate a workpiece from an extractor record.
    pub fn from_record(record: WorkpieceRecord) -> CoreResult<Self> {
        if record.width <= 0.0 || record.height <= 0.0 || record.thickness <= 0.0 {
            return Err(CoreError::InvalidDimensions {
                width: record.width,
                height: record.height,
                thickness: record.thickness,
            });
        }
        if record.corner_points.len() < 4 {
            return Err(CoreError::InsufficientCornerPoints {
                count: record.corner_points.len(),
            });
        }

        let (min_x, min_y, max_x, max_y) = bounding_box(&record.corner_points);

        Ok(Self {
            corner_points: record.corner_points,
            width: record.width,
            height: record.height,
            thickness: record.thickness,
            min_x,
            min_y,
            max_x,
            max_y,
            original_corner_points: None,
            machine_corner_points: None,
            machine_offset: None,
        })
    }

    /// Replace the current corner list, retaining the first original.
    pub fn set_rotated_corners(&mut self, corners: Vec<Point3>) {
        if self.original_corner_points.is_none() {
            self.original_corner_points = Some(self.corner_points.clone());
        }
        self.corner_points = corners;
        self.refresh_bounding_box();
    }

    /// The corner diagonally opposite the origin-adjacent corner.
    pub fn point_c(&self) -> Option<Point3> {
        self.corner_points.get(2).copied()
    }

    /// Recompute the bounding box from the current corner points.
    pub fn refresh_bounding_box(&mut self) {
        let (min_x, min_y, max_x, max_y) = bounding_box(&self.corner_points);
        self.min_x = min_x;
        self.min_y = min_y;
        self.max_x = max_x;
        self.max_y = max_y;
    }
}

fn bounding_box(points: &[Point3]) -> (f64, f64, f64, f64) {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    (min_x, min_y, max_x, max_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> WorkpieceRecord {
        WorkpieceRecord {
            corner_points: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(500.0, 0.0, 0.0),
                Point3::new(500.0, 300.0, 0.0),
                Point3::new(0.0, 300.0, 0.0),
            ],
            width: 500.0,
            height: 300.0,
            thickness: 20.0,
        }
    }

    #[test]
    fn test_from_record() {
        let workpiece = Workpiece::from_record(sample_record()).unwrap();
        assert_eq!(workpiece.point_c(), Some(Point3::new(500.0, 300.0, 0.0)));
        assert_eq!(workpiece.min_x, 0.0);
        assert_eq!(workpiece.max_x, 500.0);
        assert_eq!(workpiece.max_y, 300.0);
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let mut record = sample_record();
        record.thickness = 0.0;
        assert!(matches!(
            Workpiece::from_record(record),
            Err(CoreError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_rejects_missing_corners() {
        let mut record = sample_record();
        record.corner_points.truncate(2);
        assert!(matches!(
            Workpiece::from_record(record),
            Err(CoreError::InsufficientCornerPoints { count: 2 })
        ));
    }
}
