//! The full drilling geometry pipeline.
//!
//! Ties the stages together in their canonical order: classify every point
//! by edge, derive the tool requirements, transform horizontal points into
//! machine coordinates, rotate the workpiece when it does not fit the
//! machine (or on request), park it at the target table corner, and resolve
//! tools for each requirement group.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use drillkit_core::constants::round_mm;
use drillkit_core::data::{CornerPosition, DrillPoint, Edge, Point3, Workpiece};
use drillkit_tooldb::{Tool, ToolDirection, ToolMatcher, ToolTable};

use crate::analyzer::{analyze_drill_points, Analysis};
use crate::classifier::{classify_points, ClassificationReport};
use crate::error::{GeometryError, GeometryResult};
use crate::positioner::{PositioningReport, WorkpiecePositioner};
use crate::rotator::{RotationReport, WorkpieceRotator};
use crate::transformer::{DrillPointTransformer, TransformReport};

/// Configuration for a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Machine-table corner to park the workpiece at.
    pub target_position: CornerPosition,
    /// Rotate automatically when the workpiece exceeds the machine height.
    pub auto_rotation: bool,
    /// Explicit number of 90 degree rotations (0-3). Overrides auto rotation.
    pub manual_rotations: u32,
    /// Whether to apply the corner positioning offset.
    pub apply_positioning: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target_position: CornerPosition::TopLeft,
            auto_rotation: true,
            manual_rotations: 0,
            apply_positioning: true,
        }
    }
}

/// Tool resolution for one requirement group.
#[derive(Debug, Clone, Serialize)]
pub struct ToolAssignment {
    /// Edge the group drills into.
    pub edge: Edge,
    /// Required diameter (mm).
    pub diameter: f64,
    /// Number of drilling operations in the group.
    pub operations: usize,
    /// Spindle direction required, when the edge maps to one.
    pub direction: Option<ToolDirection>,
    /// The selected tool, when one matched.
    pub tool: Option<Tool>,
    /// Marker for groups the tool table cannot serve.
    pub missing: bool,
}

/// Everything a pipeline run reports back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    /// Unique id of this run.
    pub job_id: Uuid,
    /// When the run happened.
    pub generated_at: DateTime<Utc>,
    pub classification: ClassificationReport,
    pub analysis: Analysis,
    pub transform: TransformReport,
    /// Rotation pass, when one was applied.
    pub rotation: Option<RotationReport>,
    /// Total rotation angle applied, in degrees.
    pub rotation_angle: u32,
    /// Positioning pass, when one was applied.
    pub positioning: Option<PositioningReport>,
    /// Tool resolution per requirement group, in group order.
    pub assignments: Vec<ToolAssignment>,
}

impl PipelineReport {
    /// One-line description of the run.
    pub fn summary(&self) -> String {
        let missing = self.assignments.iter().filter(|a| a.missing).count();
        format!(
            "Job {}: transformed {} of {} horizontal points, {} tool groups ({} unmatched)",
            self.job_id,
            self.transform.transformed,
            self.transform.horizontal_points,
            self.analysis.statistics.total_groups,
            missing
        )
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    /// Workpiece with rotation and positioning recorded.
    pub workpiece: Workpiece,
    /// The full batch, same length and order as the input.
    pub points: Vec<DrillPoint>,
    /// Stage-by-stage reports.
    pub report: PipelineReport,
}

/// Runs the geometry pipeline over one extracted job.
pub struct JobPipeline {
    config: PipelineConfig,
}

impl JobPipeline {
    /// Create a pipeline with the given configuration.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Create a pipeline with the default configuration.
    pub fn with_defaults() -> Self {
        Self::new(PipelineConfig::default())
    }

    /// Run the pipeline over a workpiece and its drill points.
    ///
    /// Fails on structural problems (no points, bad dimensions, missing
    /// corners); per-point problems are recorded on the points and in the
    /// reports. The output batch always has the same length as the input.
    pub fn run(
        &self,
        workpiece: Workpiece,
        points: Vec<DrillPoint>,
        tools: Option<&ToolTable>,
    ) -> GeometryResult<PipelineOutcome> {
        if points.is_empty() {
            return Err(GeometryError::EmptyPointList);
        }
        let mut workpiece = workpiece;

        let (points, classification) = classify_points(points);
        let analysis = analyze_drill_points(&points);

        let transformer = DrillPointTransformer::for_workpiece(&workpiece)?;
        let (mut points, transform) = transformer.transform_points(points);

        let mut rotator = WorkpieceRotator::new(&workpiece)?;
        let rotations = if self.config.manual_rotations > 0 {
            self.config.manual_rotations.min(3)
        } else if self.config.auto_rotation && rotator.auto_rotation_needed() {
            1
        } else {
            0
        };

        let mut rotation = None;
        if rotations > 0 {
            for _ in 0..rotations {
                rotator.rotate_90_clockwise();
            }
            let (rotated, rotation_report) = rotator.rotate_machine_points(points);
            points = rotated;
            workpiece.set_rotated_corners(rotator.current_corners().to_vec());
            info!("{}", rotation_report.summary());
            rotation = Some(rotation_report);
        }

        let mut positioning = None;
        if self.config.apply_positioning {
            let (width, height) = rotator.dimensions();
            let orientation = rotator.orientation();
            let positioner =
                WorkpiecePositioner::new(self.config.target_position, width, height);
            let (positioned, positioning_report) = positioner.apply_offset(points, orientation);
            points = positioned;

            let (dx, dy) = positioning_report.offset;
            let machine_corners = workpiece
                .corner_points
                .iter()
                .map(|c| Point3::new(round_mm(c.x + dx), round_mm(c.y + dy), c.z))
                .collect();
            workpiece.machine_corner_points = Some(machine_corners);
            workpiece.machine_offset = Some((dx, dy));
            positioning = Some(positioning_report);
        }

        let assignments = assign_tools(&analysis, tools);

        let report = PipelineReport {
            job_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            classification,
            analysis,
            transform,
            rotation,
            rotation_angle: rotator.rotation_angle(),
            positioning,
            assignments,
        };
        info!("{}", report.summary());

        Ok(PipelineOutcome {
            workpiece,
            points,
            report,
        })
    }
}

/// Resolve a tool for every requirement group.
///
/// Groups whose edge maps to no spindle direction, and groups the table
/// cannot serve within tolerance, come back with the missing marker set.
fn assign_tools(analysis: &Analysis, tools: Option<&ToolTable>) -> Vec<ToolAssignment> {
    analysis
        .groups
        .iter()
        .map(|group| {
            let direction = ToolDirection::for_edge(group.edge);
            let tool = match (tools, direction) {
                (Some(table), Some(direction)) => ToolMatcher::new(table)
                    .match_tool(group.diameter, direction)
                    .ok()
                    .cloned(),
                _ => None,
            };
            let missing = tool.is_none();
            ToolAssignment {
                edge: group.edge,
                diameter: group.diameter,
                operations: group.count,
                direction,
                tool,
                missing,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use drillkit_core::data::{Vector3, WorkpieceRecord};

    fn workpiece(width: f64, height: f64, thickness: f64) -> Workpiece {
        Workpiece::from_record(WorkpieceRecord {
            corner_points: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(width, 0.0, 0.0),
                Point3::new(width, height, 0.0),
                Point3::new(0.0, height, 0.0),
            ],
            width,
            height,
            thickness,
        })
        .unwrap()
    }

    fn point(position: Point3, vector: Vector3) -> DrillPoint {
        DrillPoint::new(position, 8.0, 21.5, vector, "EDGE.DRILL_D8.0_P21.5")
    }

    #[test]
    fn test_empty_batch_is_an_error() {
        let pipeline = JobPipeline::with_defaults();
        let result = pipeline.run(workpiece(500.0, 300.0, 20.0), Vec::new(), None);
        assert!(matches!(result, Err(GeometryError::EmptyPointList)));
    }

    #[test]
    fn test_point_count_is_invariant() {
        let pipeline = JobPipeline::with_defaults();
        let points = vec![
            point(Point3::new(50.0, -10.0, 0.0), Vector3::new(1.0, 0.0, 0.0)),
            point(Point3::new(100.0, 100.0, 0.0), Vector3::new(0.0, 0.0, 1.0)),
            point(Point3::new(10.0, 10.0, 0.0), Vector3::new(0.7, 0.7, 0.0)),
        ];
        let outcome = pipeline
            .run(workpiece(500.0, 300.0, 20.0), points, None)
            .unwrap();
        assert_eq!(outcome.points.len(), 3);
    }

    #[test]
    fn test_auto_rotation_for_tall_workpieces() {
        let pipeline = JobPipeline::with_defaults();
        let points = vec![point(
            Point3::new(50.0, -10.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
        )];
        let outcome = pipeline
            .run(workpiece(400.0, 900.0, 20.0), points, None)
            .unwrap();

        assert_eq!(outcome.report.rotation_angle, 90);
        assert!(outcome.report.rotation.is_some());
        assert!(outcome.workpiece.original_corner_points.is_some());

        let pipeline = JobPipeline::new(PipelineConfig {
            auto_rotation: false,
            ..Default::default()
        });
        let points = vec![point(
            Point3::new(50.0, -10.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
        )];
        let outcome = pipeline
            .run(workpiece(400.0, 900.0, 20.0), points, None)
            .unwrap();
        assert_eq!(outcome.report.rotation_angle, 0);
    }

    #[test]
    fn test_positioning_records_offset_on_workpiece() {
        let pipeline = JobPipeline::with_defaults();
        let points = vec![point(
            Point3::new(50.0, -10.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
        )];
        let outcome = pipeline
            .run(workpiece(500.0, 300.0, 20.0), points, None)
            .unwrap();

        // Unrotated workpiece sits bottom-left; parking top-left shifts down.
        let positioning = outcome.report.positioning.unwrap();
        assert_eq!(positioning.offset, (0.0, -300.0));
        assert_eq!(outcome.workpiece.machine_offset, Some((0.0, -300.0)));
        assert_eq!(
            outcome.workpiece.machine_corner_points.as_ref().unwrap()[0],
            Point3::new(0.0, -300.0, 0.0)
        );
    }

    #[test]
    fn test_tool_assignment_marks_missing_groups() {
        use drillkit_tooldb::ToolRow;

        let rows = vec![ToolRow {
            tool_number: 7,
            tool_type: "drill".to_string(),
            diameter: 8.0,
            tool_direction: 1,
            in_spindle: false,
            tool_length: None,
            max_working_length: None,
            tool_holder_z_offset: None,
        }];
        let table = ToolTable::from_rows(&rows);

        let pipeline = JobPipeline::with_defaults();
        let points = vec![
            point(Point3::new(50.0, -10.0, 0.0), Vector3::new(1.0, 0.0, 0.0)),
            point(Point3::new(-50.0, -10.0, -500.0), Vector3::new(-1.0, 0.0, 0.0)),
        ];
        let outcome = pipeline
            .run(workpiece(500.0, 300.0, 20.0), points, Some(&table))
            .unwrap();

        assert_eq!(outcome.report.assignments.len(), 2);
        let right = outcome
            .report
            .assignments
            .iter()
            .find(|a| a.edge == Edge::Right)
            .unwrap();
        assert_eq!(right.tool.as_ref().unwrap().number, 7);
        assert!(!right.missing);

        let left = outcome
            .report
            .assignments
            .iter()
            .find(|a| a.edge == Edge::Left)
            .unwrap();
        assert!(left.tool.is_none());
        assert!(left.missing);
    }
}
