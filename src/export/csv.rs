use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

use crate::error::ValidationError;
use crate::state::AppState;

pub const DEFAULT_EXPORT_FILE: &str = "function-points.csv";

const HEADER: &str = "Project,Type,Name,Complexity,Points";

/// Quote a cell, doubling any embedded quotes.
fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

fn row(cells: &[&str]) -> String {
    cells.iter().map(|c| quote(c)).collect::<Vec<_>>().join(",")
}

/// Render every entry of every project followed by per-project totals.
///
/// Entry rows keep insertion order. After a blank line each project gets an
/// unadjusted row and an adjusted row labelled with the current VAF.
pub fn build_csv(state: &AppState) -> Result<String, ValidationError> {
    let vaf = state.vaf()?;
    let mut lines = vec![HEADER.to_string()];

    for entry in state.entries() {
        let project_name = state
            .project(entry.project_id())
            .map(|p| p.name.as_str())
            .unwrap_or("");
        lines.push(row(&[
            project_name,
            entry.function_type().code(),
            entry.name(),
            entry.complexity().as_str(),
            entry.points().to_string().as_str(),
        ]));
    }

    lines.push(String::new());

    for project in state.projects() {
        let totals = state.totals_for(&project.id)?;
        let unadjusted_label = format!("{} - Unadjusted Total", project.name);
        let adjusted_label = format!("{} - Adjusted Total (VAF: {:.2})", project.name, vaf);
        let unadjusted = totals.unadjusted.to_string();
        let adjusted = format!("{:.2}", totals.adjusted);
        lines.push(row(&[unadjusted_label.as_str(), "", "", "", unadjusted.as_str()]));
        lines.push(row(&[adjusted_label.as_str(), "", "", "", adjusted.as_str()]));
    }

    Ok(lines.join("\n"))
}

/// Write the report atomically, creating parent directories as needed.
pub fn write_csv(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write export to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save export to {}", path.display()))?;

    tracing::info!(path = %path.display(), bytes = contents.len(), "exported csv");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{build_state, Config};
    use crate::model::ProjectId;
    use crate::state::{add_project, set_characteristic, AppState};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_csv_sample_workspace() {
        let state = build_state(&Config::sample()).unwrap();
        let csv = build_csv(&state).unwrap();
        let expected = [
            "Project,Type,Name,Complexity,Points",
            r#""Sales System","ILF","Customer Table","medium","10""#,
            r#""Sales System","EIF","External API Integration","high","10""#,
            r#""Sales System","EI","Product Registration","low","3""#,
            r#""Customer Portal","EQ","Sales Report","high","6""#,
            r#""Customer Portal","EO","Stock Query","medium","5""#,
            "",
            r#""Sales System - Unadjusted Total","","","","23""#,
            r#""Sales System - Adjusted Total (VAF: 0.90)","","","","20.70""#,
            r#""Customer Portal - Unadjusted Total","","","","11""#,
            r#""Customer Portal - Adjusted Total (VAF: 0.90)","","","","9.90""#,
        ]
        .join("\n");
        assert_eq!(csv, expected);
    }

    #[test]
    fn test_build_csv_escapes_quotes() {
        let state = add_project(
            &AppState::new(),
            ProjectId::new("1").unwrap(),
            "The \"Big\" One",
        )
        .unwrap();
        let csv = build_csv(&state).unwrap();
        assert!(csv.contains(r#""The ""Big"" One - Unadjusted Total","","","","0""#));
    }

    #[test]
    fn test_build_csv_uses_current_vaf() {
        let mut state = build_state(&Config::sample()).unwrap();
        for i in 0..14 {
            state = set_characteristic(&state, i, 0).unwrap();
        }
        let csv = build_csv(&state).unwrap();
        assert!(csv.contains(r#""Sales System - Adjusted Total (VAF: 0.65)","","","","14.95""#));
    }

    #[test]
    fn test_build_csv_empty_state() {
        let csv = build_csv(&AppState::new()).unwrap();
        assert_eq!(csv, "Project,Type,Name,Complexity,Points\n");
    }

    #[test]
    fn test_write_csv_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join(DEFAULT_EXPORT_FILE);
        write_csv(&path, "a,b\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a,b\n");

        write_csv(&path, "c").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "c");
    }
}
