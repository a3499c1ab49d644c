//! Tool and tool table data model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use drillkit_core::data::{Edge, Vector3};

use crate::error::{ToolDbError, ToolDbResult};

/// Drilling direction of a physical tool, as encoded in the tool database.
///
/// Codes follow the machine controller convention: 1..4 are the horizontal
/// spindles (X+/X-/Y+/Y-), 5 is the vertical drill, 6 is the milling spindle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolDirection {
    XPlus,
    XMinus,
    YPlus,
    YMinus,
    Vertical,
    Mill,
}

impl ToolDirection {
    /// Numeric code as stored in the tool database.
    pub fn code(&self) -> u8 {
        match self {
            Self::XPlus => 1,
            Self::XMinus => 2,
            Self::YPlus => 3,
            Self::YMinus => 4,
            Self::Vertical => 5,
            Self::Mill => 6,
        }
    }

    /// Decode a numeric direction code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::XPlus),
            2 => Some(Self::XMinus),
            3 => Some(Self::YPlus),
            4 => Some(Self::YMinus),
            5 => Some(Self::Vertical),
            6 => Some(Self::Mill),
            _ => None,
        }
    }

    /// Resolve an exact-axis direction vector to a code.
    ///
    /// `(0,0,1)` resolves to the vertical drill: the extrusion vector points
    /// out of the material while the machine drills downward into it.
    pub fn from_vector(vector: &Vector3) -> ToolDbResult<Self> {
        let key = vector.grouping_key();
        match key {
            (10, 0, 0) => Ok(Self::XPlus),
            (-10, 0, 0) => Ok(Self::XMinus),
            (0, 10, 0) => Ok(Self::YPlus),
            (0, -10, 0) => Ok(Self::YMinus),
            (0, 0, 10) => Ok(Self::Vertical),
            _ => Err(ToolDbError::UnsupportedDirection(vector.to_string())),
        }
    }

    /// The direction required to drill into a given workpiece edge.
    pub fn for_edge(edge: Edge) -> Option<Self> {
        match edge {
            Edge::Right => Some(Self::XPlus),
            Edge::Left => Some(Self::XMinus),
            Edge::Front => Some(Self::YPlus),
            Edge::Back => Some(Self::YMinus),
            Edge::Vertical => Some(Self::Vertical),
            Edge::Unknown => None,
        }
    }
}

impl std::fmt::Display for ToolDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::XPlus => write!(f, "X+"),
            Self::XMinus => write!(f, "X-"),
            Self::YPlus => write!(f, "Y+"),
            Self::YMinus => write!(f, "Y-"),
            Self::Vertical => write!(f, "Z-"),
            Self::Mill => write!(f, "MILL"),
        }
    }
}

/// A raw row from the external tool database.
///
/// Rows with `tool_type == "empty"` or a non-positive tool number describe
/// unoccupied slots and are dropped during table construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRow {
    pub tool_number: i64,
    pub tool_type: String,
    pub diameter: f64,
    pub tool_direction: u8,
    #[serde(default)]
    pub in_spindle: bool,
    #[serde(default)]
    pub tool_length: Option<f64>,
    #[serde(default)]
    pub max_working_length: Option<f64>,
    #[serde(default)]
    pub tool_holder_z_offset: Option<f64>,
}

/// A physical tool available on the machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Slot number on the machine (positive).
    pub number: u32,
    /// Tool type label from the database, e.g. `drill` or `mill`.
    pub tool_type: String,
    /// Cutting diameter in mm.
    pub diameter: f64,
    /// Drilling direction.
    pub direction: ToolDirection,
    /// Whether the tool currently sits in the spindle.
    pub in_spindle: bool,
    /// Overall tool length in mm, when known.
    pub tool_length: Option<f64>,
    /// Maximum working length in mm, when known.
    pub max_working_length: Option<f64>,
    /// Tool holder Z offset in mm, when known.
    pub tool_holder_z_offset: Option<f64>,
}

impl Tool {
    /// Build a tool from a database row.
    ///
    /// Returns `None` for empty slots; `Err` for rows that are present but
    /// undecodable (unknown direction code).
    pub fn from_row(row: &ToolRow) -> ToolDbResult<Option<Self>> {
        if row.tool_number <= 0 || row.tool_type.trim().eq_ignore_ascii_case("empty") {
            return Ok(None);
        }
        let direction = ToolDirection::from_code(row.tool_direction).ok_or_else(|| {
            ToolDbError::InvalidRow(format!(
                "tool {} has unknown direction code {}",
                row.tool_number, row.tool_direction
            ))
        })?;
        Ok(Some(Self {
            number: row.tool_number as u32,
            tool_type: row.tool_type.trim().to_string(),
            diameter: row.diameter,
            direction,
            in_spindle: row.in_spindle,
            tool_length: row.tool_length,
            max_working_length: row.max_working_length,
            tool_holder_z_offset: row.tool_holder_z_offset,
        }))
    }
}

/// Read-only collection of tools, indexed by slot number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolTable {
    tools: BTreeMap<u32, Tool>,
}

impl ToolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from raw database rows, dropping empty slots.
    ///
    /// Undecodable occupied rows are skipped with a warning rather than
    /// failing the whole load.
    pub fn from_rows(rows: &[ToolRow]) -> Self {
        let mut table = Self::new();
        for row in rows {
            match Tool::from_row(row) {
                Ok(Some(tool)) => {
                    table.insert(tool);
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!("Skipping tool row: {err}");
                }
            }
        }
        table
    }

    /// Insert a tool, replacing any previous occupant of the slot.
    pub fn insert(&mut self, tool: Tool) {
        self.tools.insert(tool.number, tool);
    }

    /// Look up a tool by slot number.
    pub fn get(&self, number: u32) -> Option<&Tool> {
        self.tools.get(&number)
    }

    /// All tools in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Tool> {
        self.tools.values()
    }

    /// Tools with the given direction, in slot order.
    pub fn with_direction(&self, direction: ToolDirection) -> Vec<&Tool> {
        self.tools
            .values()
            .filter(|t| t.direction == direction)
            .collect()
    }

    /// Number of tools in the table.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the table holds no tools.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(number: i64, tool_type: &str, diameter: f64, direction: u8) -> ToolRow {
        ToolRow {
            tool_number: number,
            tool_type: tool_type.to_string(),
            diameter,
            tool_direction: direction,
            in_spindle: false,
            tool_length: None,
            max_working_length: None,
            tool_holder_z_offset: None,
        }
    }

    #[test]
    fn test_direction_codes() {
        assert_eq!(ToolDirection::XPlus.code(), 1);
        assert_eq!(ToolDirection::from_code(5), Some(ToolDirection::Vertical));
        assert_eq!(ToolDirection::from_code(0), None);
        assert_eq!(ToolDirection::from_code(7), None);
        assert_eq!(ToolDirection::Vertical.to_string(), "Z-");
    }

    #[test]
    fn test_direction_from_vector() {
        let dir = ToolDirection::from_vector(&Vector3::new(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(dir, ToolDirection::XPlus);
        let dir = ToolDirection::from_vector(&Vector3::new(0.0, -1.0, 0.0)).unwrap();
        assert_eq!(dir, ToolDirection::YMinus);
        let dir = ToolDirection::from_vector(&Vector3::new(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(dir, ToolDirection::Vertical);

        assert!(ToolDirection::from_vector(&Vector3::new(0.5, 0.5, 0.0)).is_err());
        assert!(ToolDirection::from_vector(&Vector3::new(0.0, 0.0, -1.0)).is_err());
    }

    #[test]
    fn test_direction_for_edge() {
        assert_eq!(ToolDirection::for_edge(Edge::Right), Some(ToolDirection::XPlus));
        assert_eq!(ToolDirection::for_edge(Edge::Left), Some(ToolDirection::XMinus));
        assert_eq!(ToolDirection::for_edge(Edge::Front), Some(ToolDirection::YPlus));
        assert_eq!(ToolDirection::for_edge(Edge::Back), Some(ToolDirection::YMinus));
        assert_eq!(ToolDirection::for_edge(Edge::Unknown), None);
    }

    #[test]
    fn test_table_from_rows_filters_empty_slots() {
        let rows = vec![
            row(1, "drill", 8.0, 1),
            row(2, "empty", 0.0, 0),
            row(0, "drill", 10.0, 5),
            row(3, "drill", 10.0, 5),
        ];
        let table = ToolTable::from_rows(&rows);
        assert_eq!(table.len(), 2);
        assert!(table.get(1).is_some());
        assert!(table.get(2).is_none());
        assert_eq!(table.get(3).unwrap().direction, ToolDirection::Vertical);
    }

    #[test]
    fn test_table_from_rows_skips_bad_direction() {
        let rows = vec![row(1, "drill", 8.0, 9), row(2, "drill", 8.0, 2)];
        let table = ToolTable::from_rows(&rows);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(2).unwrap().direction, ToolDirection::XMinus);
    }
}
