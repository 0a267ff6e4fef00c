use std::io::IsTerminal;
use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{Width, terminal_size};

use crate::error::ValidationError;
use crate::model::{Complexity, FunctionPointEntry, FunctionType, ProjectId};
use crate::scoring::{total_degree_of_influence, weight_for, ProjectTotals};
use crate::state::AppState;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Adjusted totals always show two decimals ("20.70", "0.00")
pub fn format_points(points: f64) -> String {
    format!("{:.2}", points)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
pub fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Fit a trailing column into what is left of the terminal line.
fn fit_name(name: &str, fixed_width: usize) -> String {
    match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => truncate_name(name, width - fixed_width),
        Some(_) => truncate_name(name, 20),
        None => name.to_string(),
    }
}

/// Weight table: one row per function type, one column per complexity.
pub fn format_weight_table(use_colors: bool) -> String {
    let mut lines = Vec::new();
    let header = format!(
        "{:<4} {:<26} {:>4} {:>7} {:>5}",
        "Type", "", "Low", "Medium", "High"
    );
    lines.push(if use_colors {
        header.bold().to_string()
    } else {
        header
    });

    for function_type in FunctionType::ALL {
        let [low, medium, high] = Complexity::ALL.map(|c| weight_for(function_type, c));
        let code = format!("{:<4}", function_type.code());
        let code = if use_colors {
            code.cyan().to_string()
        } else {
            code
        };
        lines.push(format!(
            "{} {:<26} {:>4} {:>7} {:>5}",
            code,
            function_type.label(),
            low,
            medium,
            high
        ));
    }

    lines.join("\n")
}

fn format_entry_line(index: usize, entry: &FunctionPointEntry, use_colors: bool) -> String {
    // index (3) + type (4) + complexity (6) + points (3) + separators
    let fixed_width = 3 + 1 + 4 + 2 + 6 + 2 + 3 + 2;
    let index_str = format!("{:>2}.", index + 1);
    let code = format!("{:<4}", entry.function_type().code());
    let complexity = format!("{:<6}", entry.complexity().as_str());
    let points = format!("{:>3}", entry.points());
    let name = fit_name(entry.name(), fixed_width);

    if use_colors {
        format!(
            "{} {}  {}  {}  {}",
            index_str.dimmed(),
            code.cyan(),
            complexity,
            points.bold(),
            name
        )
    } else {
        format!("{} {}  {}  {}  {}", index_str, code, complexity, points, name)
    }
}

fn format_totals_line(totals: &ProjectTotals, use_colors: bool) -> String {
    let line = format!(
        "Unadjusted: {}  VAF: {:.2}  Adjusted: {}",
        totals.unadjusted,
        totals.vaf,
        format_points(totals.adjusted)
    );
    if use_colors {
        line.bold().to_string()
    } else {
        line
    }
}

/// Entry table for one project with an unadjusted/adjusted footer.
pub fn format_entries_table(
    state: &AppState,
    project_id: &ProjectId,
    use_colors: bool,
) -> Result<String, ValidationError> {
    let project = state
        .project(project_id)
        .ok_or_else(|| ValidationError::UnknownProject(project_id.to_string()))?;
    let totals = state.totals_for(project_id)?;

    let title = format!("{} ({})", project.name, project.id);
    let mut lines = vec![if use_colors {
        title.bold().to_string()
    } else {
        title
    }];

    let entries: Vec<_> = state.entries_for(project_id).collect();
    if entries.is_empty() {
        lines.push("No functions recorded.".to_string());
    } else {
        lines.extend(
            entries
                .iter()
                .enumerate()
                .map(|(idx, entry)| format_entry_line(idx, entry, use_colors)),
        );
    }

    lines.push(format_totals_line(&totals, use_colors));
    Ok(lines.join("\n"))
}

/// One line per project: id, totals and name.
pub fn format_summary(state: &AppState, use_colors: bool) -> Result<String, ValidationError> {
    if state.projects().is_empty() {
        return Ok("No projects found.".to_string());
    }

    let vaf = state.vaf()?;
    // Ids are printed whole so they can be passed back to `list --project`
    let id_width = state
        .projects()
        .iter()
        .map(|p| p.id.as_str().chars().count())
        .max()
        .unwrap_or(0);
    // id + unadjusted (>5) + adjusted (>9) + separators
    let fixed_width = id_width + 2 + 5 + 2 + 9 + 2;
    let mut lines = Vec::new();

    for project in state.projects() {
        let totals = state.totals_for(&project.id)?;
        let id = format!("{:>width$}", project.id.as_str(), width = id_width);
        let unadjusted = format!("{:>5}", totals.unadjusted);
        let adjusted = format!("{:>9}", format_points(totals.adjusted));
        let marker = if state.selected_id() == Some(&project.id) {
            "*"
        } else {
            ""
        };
        let name = fit_name(&format!("{}{}", project.name, marker), fixed_width);

        lines.push(if use_colors {
            format!("{}  {}  {}  {}", id.dimmed(), unadjusted, adjusted.bold(), name)
        } else {
            format!("{}  {}  {}  {}", id, unadjusted, adjusted, name)
        });
    }

    lines.push(format!("VAF: {:.2}", vaf));
    Ok(lines.join("\n"))
}

/// The fourteen ratings with their total and the resulting VAF.
pub fn format_vaf_panel(state: &AppState, use_colors: bool) -> Result<String, ValidationError> {
    let total = total_degree_of_influence(state.characteristics())?;
    let vaf = state.vaf()?;

    let mut lines: Vec<String> = state
        .characteristics()
        .iter()
        .enumerate()
        .map(|(idx, c)| {
            let bar = "#".repeat(c.degree_of_influence as usize);
            let label = format!("{:>2}. {:<30}", idx + 1, c.kind.label());
            let line = if use_colors {
                format!("{} {} {}", label, c.degree_of_influence.bold(), bar.green())
            } else {
                format!("{} {} {}", label, c.degree_of_influence, bar)
            };
            line.trim_end().to_string()
        })
        .collect();

    let footer = format!("Total degree of influence: {}  VAF: {:.2}", total, vaf);
    lines.push(if use_colors {
        footer.bold().to_string()
    } else {
        footer
    });
    Ok(lines.join("\n"))
}

/// Machine-readable snapshot of the workspace for `--format json`.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub vaf: f64,
    pub total_degree_of_influence: u32,
    pub characteristics: &'a [crate::model::GeneralCharacteristic],
    pub projects: Vec<ProjectReport<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ProjectReport<'a> {
    pub id: &'a ProjectId,
    pub name: &'a str,
    pub entries: Vec<&'a FunctionPointEntry>,
    pub totals: ProjectTotals,
}

/// Build the report, optionally narrowed to a single project.
pub fn build_report<'a>(
    state: &'a AppState,
    only: Option<&ProjectId>,
) -> Result<Report<'a>, ValidationError> {
    if let Some(id) = only {
        if state.project(id).is_none() {
            return Err(ValidationError::UnknownProject(id.to_string()));
        }
    }

    let projects = state
        .projects()
        .iter()
        .filter(|p| only.is_none_or(|id| &p.id == id))
        .map(|p| {
            Ok(ProjectReport {
                id: &p.id,
                name: &p.name,
                entries: state.entries_for(&p.id).collect(),
                totals: state.totals_for(&p.id)?,
            })
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    Ok(Report {
        vaf: state.vaf()?,
        total_degree_of_influence: total_degree_of_influence(state.characteristics())?,
        characteristics: state.characteristics(),
        projects,
    })
}
