//! Loading and saving the tool table.
//!
//! The machine's tool data lives in an external tabular store maintained by
//! the operator tooling; this module consumes its already-extracted rows as
//! JSON. Locking and backup rotation of the on-disk store happen outside
//! this crate.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{ToolDbError, ToolDbResult};
use crate::model::{ToolRow, ToolTable};

/// Load a tool table from a JSON file containing an array of tool rows.
pub fn load_tool_table(path: impl AsRef<Path>) -> ToolDbResult<ToolTable> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .map_err(|e| ToolDbError::LoadError(format!("{}: {e}", path.display())))?;
    let rows: Vec<ToolRow> = serde_json::from_str(&contents)
        .map_err(|e| ToolDbError::LoadError(format!("{}: {e}", path.display())))?;
    let table = ToolTable::from_rows(&rows);
    info!(
        "Loaded {} tools from {} rows in {}",
        table.len(),
        rows.len(),
        path.display()
    );
    Ok(table)
}

/// Save a tool table to a JSON file.
pub fn save_tool_table(table: &ToolTable, path: impl AsRef<Path>) -> ToolDbResult<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(table)?;
    fs::write(path, json).map_err(|e| ToolDbError::SaveError(format!("{}: {e}", path.display())))?;
    Ok(())
}

/// Load a previously saved tool table (the output of [`save_tool_table`]).
pub fn load_saved_table(path: impl AsRef<Path>) -> ToolDbResult<ToolTable> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .map_err(|e| ToolDbError::LoadError(format!("{}: {e}", path.display())))?;
    let table: ToolTable = serde_json::from_str(&contents)
        .map_err(|e| ToolDbError::LoadError(format!("{}: {e}", path.display())))?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_ROWS: &str = r#"[
        {"tool_number": 1, "tool_type": "drill", "diameter": 8.0, "tool_direction": 1, "in_spindle": true},
        {"tool_number": 2, "tool_type": "drill", "diameter": 8.0, "tool_direction": 2},
        {"tool_number": 3, "tool_type": "empty", "diameter": 0.0, "tool_direction": 0},
        {"tool_number": 4, "tool_type": "drill", "diameter": 10.0, "tool_direction": 5, "tool_length": 85.0}
    ]"#;

    #[test]
    fn test_load_tool_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tool-data.json");
        std::fs::write(&path, SAMPLE_ROWS).unwrap();

        let table = load_tool_table(&path).unwrap();
        assert_eq!(table.len(), 3);
        assert!(table.get(1).unwrap().in_spindle);
        assert_eq!(table.get(4).unwrap().tool_length, Some(85.0));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_tool_table("/nonexistent/tool-data.json").unwrap_err();
        assert!(matches!(err, ToolDbError::LoadError(_)));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let rows_path = dir.path().join("tool-data.json");
        let saved_path = dir.path().join("tool-table.json");
        std::fs::write(&rows_path, SAMPLE_ROWS).unwrap();

        let table = load_tool_table(&rows_path).unwrap();
        save_tool_table(&table, &saved_path).unwrap();

        let reloaded = load_saved_table(&saved_path).unwrap();
        assert_eq!(reloaded.len(), table.len());
        assert_eq!(reloaded.get(4).unwrap().diameter, 10.0);
    }
}
