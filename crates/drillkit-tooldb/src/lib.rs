//! # DrillKit Tool Database
//!
//! Tool table management and tool matching for DrillKit.
//! Models the machine's tool slots (number, type, diameter, direction) and
//! resolves drilling requirements to physical tools.

pub mod error;
pub mod matcher;
pub mod model;
pub mod persistence;

pub use error::{ToolDbError, ToolDbResult};
pub use matcher::ToolMatcher;
pub use model::{Tool, ToolDirection, ToolRow, ToolTable};
pub use persistence::{load_saved_table, load_tool_table, save_tool_table};
