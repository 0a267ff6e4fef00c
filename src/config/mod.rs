pub mod init;
mod schema;

pub use schema::{Config, EntryConfig, ExportConfig, ProjectConfig, ThemeMode};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::model::{CharacteristicKind, Complexity, FunctionType, ProjectId};
use crate::state::{self, AppState, EntryDraft};

/// Get the config directory path (~/.config/fpa-calc/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("fpa-calc"))
}

/// Get the default workspace file path (~/.config/fpa-calc/workspace.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("workspace.yaml"))
}

/// Load a workspace from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to the workspace file. If None, uses the default
///   path and falls back to the built-in sample workspace when it is missing.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given file does not exist
/// - The file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let (config_path, explicit) = match path {
        Some(p) => (p, true),
        None => (get_config_path()?, false),
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Workspace file not found at {}", config_path.display());
        }
        tracing::info!(
            path = %config_path.display(),
            "no workspace file, starting from the sample workspace"
        );
        return Ok(Config::sample());
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read workspace file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&content).with_context(|| {
        format!("Failed to parse workspace: invalid YAML in {}", config_path.display())
    })?;

    tracing::debug!(
        path = %config_path.display(),
        projects = config.projects.len(),
        entries = config.entries.len(),
        "loaded workspace"
    );

    Ok(config)
}

/// Build session state from a workspace, reporting every problem at once.
/// The first project (if any) ends up selected.
pub fn build_state(config: &Config) -> Result<AppState, Vec<String>> {
    crate::scoring::validate_workspace(config)?;
    assemble(config).map_err(|e| vec![e.to_string()])
}

fn assemble(config: &Config) -> Result<AppState, crate::error::ValidationError> {
    let mut app_state = AppState::new();

    for project in &config.projects {
        app_state = state::add_project(&app_state, ProjectId::new(project.id.as_str())?, &project.name)?;
    }

    for entry in &config.entries {
        let draft = EntryDraft {
            function_type: entry.function_type.parse::<FunctionType>()?,
            complexity: entry.complexity.parse::<Complexity>()?,
            name: entry.name.clone(),
        };
        app_state = state::add_entry_to(&app_state, &ProjectId::new(entry.project.as_str())?, &draft)?;
    }

    for (key, &degree) in &config.characteristics {
        let kind = key.parse::<CharacteristicKind>()?;
        app_state = state::set_characteristic(&app_state, kind.index(), degree)?;
    }

    if let Some(first) = config.projects.first() {
        app_state = state::select_project(&app_state, &ProjectId::new(first.id.as_str())?)?;
    }

    Ok(app_state)
}
