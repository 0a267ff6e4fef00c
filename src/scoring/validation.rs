use std::collections::HashSet;

use crate::config::Config;
use crate::model::{CharacteristicKind, Complexity, FunctionType, MAX_DEGREE};

/// Validate a workspace file before it is turned into application state.
/// Returns all validation errors at once (not just the first).
pub fn validate_workspace(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let mut project_ids = HashSet::new();
    for (i, project) in config.projects.iter().enumerate() {
        let id = project.id.trim();
        if id.is_empty() {
            errors.push(format!("projects[{}].id: must not be empty", i));
        } else if !project_ids.insert(id) {
            errors.push(format!("projects[{}].id: duplicate id '{}'", i, id));
        }
        if project.name.trim().is_empty() {
            errors.push(format!("projects[{}].name: must not be empty", i));
        }
    }

    for (i, entry) in config.entries.iter().enumerate() {
        if !project_ids.contains(entry.project.trim()) {
            errors.push(format!(
                "entries[{}].project: unknown project '{}'",
                i, entry.project
            ));
        }
        if let Err(e) = entry.function_type.parse::<FunctionType>() {
            errors.push(format!("entries[{}].type: {}", i, e));
        }
        if let Err(e) = entry.complexity.parse::<Complexity>() {
            errors.push(format!("entries[{}].complexity: {}", i, e));
        }
        if entry.name.trim().is_empty() {
            errors.push(format!("entries[{}].name: must not be empty", i));
        }
    }

    // Keys are matched loosely, so `Performance` and `performance` collide
    let mut rated = HashSet::new();
    for (key, &value) in &config.characteristics {
        match key.parse::<CharacteristicKind>() {
            Ok(kind) => {
                if !rated.insert(kind) {
                    errors.push(format!("characteristics.{}: rated more than once", key));
                }
            }
            Err(e) => errors.push(format!("characteristics.{}: {}", key, e)),
        }
        if !(0..=MAX_DEGREE as i64).contains(&value) {
            errors.push(format!(
                "characteristics.{}: degree of influence must be 0-5, got {}",
                key, value
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
