//! Matching drilling requirements against the tool table.

use tracing::debug;

use drillkit_core::constants::{round_mm, DIAMETER_TOLERANCE};
use drillkit_core::data::Vector3;

use crate::error::{ToolDbError, ToolDbResult};
use crate::model::{Tool, ToolDirection, ToolTable};

/// Selects physical tools for drilling requirements.
///
/// A pure lookup over a read-only tool table: a requirement matches a tool
/// when both share the direction code and the diameters agree within the
/// machine tolerance. When several tools qualify, the one with the smallest
/// diameter difference wins; ties break to the lowest slot number.
pub struct ToolMatcher<'a> {
    table: &'a ToolTable,
}

impl<'a> ToolMatcher<'a> {
    /// Create a matcher over a tool table.
    pub fn new(table: &'a ToolTable) -> Self {
        Self { table }
    }

    /// Find a tool for the given diameter and direction.
    pub fn match_tool(&self, diameter: f64, direction: ToolDirection) -> ToolDbResult<&'a Tool> {
        let wanted = round_mm(diameter);
        let mut candidates: Vec<&Tool> = self
            .table
            .with_direction(direction)
            .into_iter()
            .filter(|t| (t.diameter - wanted).abs() <= DIAMETER_TOLERANCE)
            .collect();

        if candidates.is_empty() {
            return Err(ToolDbError::ToolNotFound {
                diameter: wanted,
                direction: direction.code(),
            });
        }

        candidates.sort_by(|a, b| {
            let da = (a.diameter - wanted).abs();
            let db = (b.diameter - wanted).abs();
            da.total_cmp(&db).then_with(|| a.number.cmp(&b.number))
        });

        let selected = candidates[0];
        debug!(
            "Matched tool #{} ({:.1}mm {}) for {:.1}mm requirement",
            selected.number, selected.diameter, selected.direction, wanted
        );
        Ok(selected)
    }

    /// Find a tool for a (diameter, direction vector) group key.
    ///
    /// Fails on vectors that map to no direction code.
    pub fn match_group(&self, diameter: f64, direction: &Vector3) -> ToolDbResult<&'a Tool> {
        let code = ToolDirection::from_vector(direction)?;
        self.match_tool(diameter, code)
    }

    /// Secondary path: nearest-diameter tool for a direction, ignoring the
    /// matching tolerance. Used when an exact match is absent and the caller
    /// wants a suggestion to surface to the operator.
    pub fn closest_tool(&self, diameter: f64, direction: ToolDirection) -> Option<&'a Tool> {
        let wanted = round_mm(diameter);
        self.table
            .with_direction(direction)
            .into_iter()
            .min_by(|a, b| {
                let da = (a.diameter - wanted).abs();
                let db = (b.diameter - wanted).abs();
                da.total_cmp(&db).then_with(|| a.number.cmp(&b.number))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ToolRow;

    fn table() -> ToolTable {
        let rows = vec![
            ToolRow {
                tool_number: 1,
                tool_type: "drill".to_string(),
                diameter: 8.02,
                tool_direction: 1,
                in_spindle: false,
                tool_length: None,
                max_working_length: None,
                tool_holder_z_offset: None,
            },
            ToolRow {
                tool_number: 2,
                tool_type: "drill".to_string(),
                diameter: 8.15,
                tool_direction: 2,
                in_spindle: false,
                tool_length: None,
                max_working_length: None,
                tool_holder_z_offset: None,
            },
            ToolRow {
                tool_number: 3,
                tool_type: "drill".to_string(),
                diameter: 10.0,
                tool_direction: 5,
                in_spindle: true,
                tool_length: None,
                max_working_length: None,
                tool_holder_z_offset: None,
            },
            ToolRow {
                tool_number: 4,
                tool_type: "drill".to_string(),
                diameter: 8.0,
                tool_direction: 1,
                in_spindle: false,
                tool_length: None,
                max_working_length: None,
                tool_holder_z_offset: None,
            },
        ];
        ToolTable::from_rows(&rows)
    }

    #[test]
    fn test_match_within_tolerance() {
        let table = table();
        let matcher = ToolMatcher::new(&table);

        // 8.02mm is within 0.1mm of an 8.0mm requirement.
        let tool = matcher.match_tool(8.0, ToolDirection::XPlus).unwrap();
        assert_eq!(tool.number, 4);
    }

    #[test]
    fn test_prefers_smallest_diameter_difference() {
        let table = table();
        let matcher = ToolMatcher::new(&table);

        // 8.02mm (diff 0.08) beats 8.0mm (diff 0.1) for an 8.1mm requirement.
        let tool = matcher.match_tool(8.1, ToolDirection::XPlus).unwrap();
        assert_eq!(tool.number, 1);
    }

    #[test]
    fn test_rejects_outside_tolerance() {
        let table = table();
        let matcher = ToolMatcher::new(&table);

        // The only X- tool is 8.15mm, 0.15mm away from 8.0.
        let err = matcher.match_tool(8.0, ToolDirection::XMinus).unwrap_err();
        assert!(matches!(
            err,
            ToolDbError::ToolNotFound {
                direction: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_match_group_resolves_vector() {
        let table = table();
        let matcher = ToolMatcher::new(&table);

        let tool = matcher
            .match_group(10.0, &Vector3::new(0.0, 0.0, 1.0))
            .unwrap();
        assert_eq!(tool.number, 3);

        let err = matcher
            .match_group(10.0, &Vector3::new(0.5, 0.5, 0.0))
            .unwrap_err();
        assert!(matches!(err, ToolDbError::UnsupportedDirection(_)));
    }

    #[test]
    fn test_closest_tool_ignores_tolerance() {
        let table = table();
        let matcher = ToolMatcher::new(&table);

        assert!(matcher.match_tool(12.0, ToolDirection::XMinus).is_err());
        let tool = matcher.closest_tool(12.0, ToolDirection::XMinus).unwrap();
        assert_eq!(tool.number, 2);

        assert!(matcher.closest_tool(12.0, ToolDirection::Mill).is_none());
    }
}
