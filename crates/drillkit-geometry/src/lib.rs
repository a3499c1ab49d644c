//! # DrillKit Geometry
//!
//! The geometry pipeline for DrillKit: turns drill points extracted from a
//! CAD drawing into machine-space coordinates ready for program generation.
//!
//! ## Stages
//!
//! - **Classifier**: maps direction vectors to workpiece edges
//! - **Analyzer / Grouper**: buckets points into tool requirements
//! - **Transformer**: edge-specific CAD to machine coordinate mapping
//! - **Rotator**: 90 degree workpiece rotation with point-C bookkeeping
//! - **Positioner**: parks the workpiece at a machine-table corner
//! - **Pipeline**: runs the stages in order and reports per-stage results
//!
//! Every stage consumes and returns owned point batches; per-point problems
//! are recorded as skip flags and counters rather than errors, so a single
//! malformed hole never blocks machining the rest of a panel.

pub mod analyzer;
pub mod classifier;
pub mod error;
pub mod filter;
pub mod grouper;
pub mod machine;
pub mod pipeline;
pub mod positioner;
pub mod rotator;
pub mod transformer;
pub mod translator;

pub use analyzer::{analyze_drill_points, Analysis, AnalysisStatistics, ToolRequirementGroup};
pub use classifier::{classify_points, detect_edge, points_by_edge, ClassificationReport};
pub use error::{GeometryError, GeometryResult};
pub use filter::{filter_for_horizontal_drilling, FilterStats};
pub use grouper::{group_drill_points, DrillGroup};
pub use machine::{position_for_top_left, MachinePlacement};
pub use pipeline::{
    JobPipeline, PipelineConfig, PipelineOutcome, PipelineReport, ToolAssignment,
};
pub use positioner::{PositioningReport, WorkpiecePositioner};
pub use rotator::{RotationReport, WorkpieceRotator};
pub use transformer::{DrillPointTransformer, EdgeTransformStats, TransformReport};
pub use translator::{translate_coordinates, TranslationReport};
