//! # DrillKit
//!
//! Converts drilling geometry extracted from CAD drawings into CNC machine
//! coordinates and tool assignments.
//!
//! ## Architecture
//!
//! DrillKit is organized as a workspace with multiple crates:
//!
//! 1. **drillkit-core** - Core types: drill points, workpieces, edges,
//!    precision rules
//! 2. **drillkit-geometry** - The geometry pipeline: classification,
//!    coordinate transforms, rotation, positioning
//! 3. **drillkit-tooldb** - Tool table management and tool matching
//! 4. **drillkit** - Main binary that runs a job file through the pipeline
//!
//! Inputs are record lists produced by an external CAD extractor; outputs
//! are transformed point lists and tool assignments consumed by an external
//! G-code emitter.

pub use drillkit_core::{
    CornerPosition, DrillPoint, DrillPointRecord, DrillType, Edge, Orientation, Point3, Vector3,
    Workpiece, WorkpieceRecord,
};

pub use drillkit_geometry::{
    analyze_drill_points, classify_points, detect_edge, filter_for_horizontal_drilling,
    group_drill_points, position_for_top_left, translate_coordinates, Analysis,
    DrillPointTransformer, GeometryError, GeometryResult, JobPipeline, PipelineConfig,
    PipelineOutcome, PipelineReport, ToolAssignment, ToolRequirementGroup, WorkpiecePositioner,
    WorkpieceRotator,
};

pub use drillkit_tooldb::{
    load_tool_table, Tool, ToolDbError, ToolDbResult, ToolDirection, ToolMatcher, ToolRow,
    ToolTable,
};

/// Initialize logging for the binary.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    // Ignore double initialization so tests can call this freely.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();

    Ok(())
}
