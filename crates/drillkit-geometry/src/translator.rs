//! Direction-vector coordinate translation.
//!
//! A narrower sibling of the edge transformer used by the visual tooling:
//! instead of classified edges it keys on exact-axis extrusion vectors and
//! rewrites the point's own position into workpiece space. X-direction
//! drilling maps `(x,y,z)` to `(|z|, H-|x|, T+y)`; Y-direction drilling
//! maps it to `(W-|x|, |z|, T+y)`.

use serde::Serialize;
use tracing::warn;

use drillkit_core::constants::round_mm;
use drillkit_core::data::{DrillPoint, Point3, Vector3, Workpiece};

use crate::error::{GeometryError, GeometryResult};

/// Counts produced by a translation pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TranslationReport {
    pub x_direction_count: usize,
    pub y_direction_count: usize,
    pub skipped_count: usize,
}

impl TranslationReport {
    /// One-line description of the pass.
    pub fn summary(&self) -> String {
        format!(
            "Translated {} horizontal drill points ({} X-direction, {} Y-direction, {} skipped)",
            self.x_direction_count + self.y_direction_count,
            self.x_direction_count,
            self.y_direction_count,
            self.skipped_count
        )
    }
}

fn is_x_direction(v: &Vector3) -> bool {
    v.x.abs() == 1.0 && v.y == 0.0 && v.z == 0.0
}

fn is_y_direction(v: &Vector3) -> bool {
    v.x == 0.0 && v.y.abs() == 1.0 && v.z == 0.0
}

fn has_usable_fields(point: &DrillPoint) -> bool {
    let p = &point.position;
    let v = &point.extrusion_vector;
    p.x.is_finite()
        && p.y.is_finite()
        && p.z.is_finite()
        && v.x.is_finite()
        && v.y.is_finite()
        && v.z.is_finite()
}

/// Translate horizontal drill points into workpiece space.
///
/// Workpiece dimensions are rounded to 0.1mm and must be positive. Points
/// that are not exact-axis horizontal drilling are skipped; a batch where
/// nothing translates is an error. Translated points keep their CAD
/// position in `original_position`.
pub fn translate_coordinates(
    points: Vec<DrillPoint>,
    workpiece: &Workpiece,
) -> GeometryResult<(Vec<DrillPoint>, TranslationReport)> {
    let width = round_mm(workpiece.width);
    let height = round_mm(workpiece.height);
    let thickness = round_mm(workpiece.thickness);
    if width <= 0.0 || height <= 0.0 || thickness <= 0.0 {
        return Err(GeometryError::InvalidDimensions {
            width: workpiece.width,
            height: workpiece.height,
            thickness: workpiece.thickness,
        });
    }

    let mut report = TranslationReport::default();
    let mut translated = Vec::with_capacity(points.len());

    for mut point in points {
        if !has_usable_fields(&point) {
            warn!("Drill point has unusable coordinates, skipping translation");
            report.skipped_count += 1;
            continue;
        }

        let original = point.position;
        let vector = point.extrusion_vector;

        let new_position = if is_x_direction(&vector) {
            report.x_direction_count += 1;
            Point3::new(
                round_mm(original.z.abs()),
                round_mm(height - original.x.abs()),
                round_mm(thickness + original.y),
            )
        } else if is_y_direction(&vector) {
            report.y_direction_count += 1;
            Point3::new(
                round_mm(width - original.x.abs()),
                round_mm(original.z.abs()),
                round_mm(thickness + original.y),
            )
        } else {
            warn!("Unsupported drilling direction: {vector}");
            report.skipped_count += 1;
            continue;
        };

        point.original_position = Some(original);
        point.position = new_position;
        translated.push(point);
    }

    if report.x_direction_count + report.y_direction_count == 0 {
        return Err(GeometryError::NothingToTranslate);
    }

    Ok((translated, report))
}
