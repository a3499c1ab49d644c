//! # DrillKit Core
//!
//! Core types, constants, and errors for DrillKit.
//! Provides the fundamental data model shared by the geometry pipeline
//! and the tool database: drill points, workpieces, edges, orientations,
//! and the millimeter precision rules of the target machine class.

pub mod constants;
pub mod data;
pub mod error;

pub use data::{
    CornerPosition, DrillPoint, DrillPointRecord, DrillType, Edge, Orientation, Point3, Vector3,
    Workpiece, WorkpieceRecord,
};

pub use error::{CoreError, CoreResult};
