//! State transitions. Each takes the current state by reference and returns
//! a new one; the input is never modified.

use super::types::{AppState, EntryDraft};
use crate::error::ValidationError;
use crate::model::{
    CharacteristicKind, FunctionPointEntry, GeneralCharacteristic, Project, ProjectId,
    CHARACTERISTIC_COUNT,
};

/// Register a project and make it the selected one.
pub fn add_project(state: &AppState, id: ProjectId, name: &str) -> Result<AppState, ValidationError> {
    if state.project(&id).is_some() {
        return Err(ValidationError::DuplicateProject(id.to_string()));
    }
    let project = Project::new(id.clone(), name)?;

    let mut next = state.clone();
    next.projects.push(project);
    next.selected = Some(id);
    Ok(next)
}

/// Fresh project id derived from the wall clock in milliseconds, bumped
/// until it does not collide with an existing project.
pub fn next_project_id(state: &AppState) -> ProjectId {
    let mut millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
    loop {
        let candidate = ProjectId::from(millis);
        if state.project(&candidate).is_none() {
            return candidate;
        }
        millis += 1;
    }
}

/// Append an entry to the selected project.
pub fn add_entry(state: &AppState, draft: &EntryDraft) -> Result<AppState, ValidationError> {
    let project_id = state
        .selected
        .clone()
        .ok_or(ValidationError::NoProjectSelected)?;
    add_entry_to(state, &project_id, draft)
}

/// Append an entry to a specific project.
pub fn add_entry_to(
    state: &AppState,
    project_id: &ProjectId,
    draft: &EntryDraft,
) -> Result<AppState, ValidationError> {
    if state.project(project_id).is_none() {
        return Err(ValidationError::UnknownProject(project_id.to_string()));
    }
    let entry = FunctionPointEntry::new(
        draft.function_type,
        &draft.name,
        draft.complexity,
        project_id.clone(),
    )?;

    let mut next = state.clone();
    next.entries.push(entry);
    Ok(next)
}

/// Rate the characteristic at `index` (canonical order), clamping into [0, 5].
pub fn set_characteristic(state: &AppState, index: usize, raw: i64) -> Result<AppState, ValidationError> {
    if index >= CHARACTERISTIC_COUNT {
        return Err(ValidationError::CharacteristicIndex(index));
    }
    let kind = CharacteristicKind::ALL[index];

    let mut next = state.clone();
    next.characteristics[index] = GeneralCharacteristic::clamped(kind, raw);
    Ok(next)
}

pub fn select_project(state: &AppState, id: &ProjectId) -> Result<AppState, ValidationError> {
    if state.project(id).is_none() {
        return Err(ValidationError::UnknownProject(id.to_string()));
    }
    let mut next = state.clone();
    next.selected = Some(id.clone());
    Ok(next)
}

/// Move the selection forward (`step > 0`) or backward through the project
/// list, wrapping at either end.
pub fn cycle_project(state: &AppState, step: isize) -> AppState {
    let len = state.projects.len();
    if len == 0 {
        return state.clone();
    }
    let current = state
        .selected
        .as_ref()
        .and_then(|id| state.projects.iter().position(|p| &p.id == id))
        .unwrap_or(0) as isize;
    let idx = (current + step).rem_euclid(len as isize) as usize;

    let mut next = state.clone();
    next.selected = Some(state.projects[idx].id.clone());
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Complexity, FunctionType};

    fn pid(s: &str) -> ProjectId {
        ProjectId::new(s).unwrap()
    }

    fn draft(t: FunctionType, c: Complexity, name: &str) -> EntryDraft {
        EntryDraft {
            function_type: t,
            complexity: c,
            name: name.to_string(),
        }
    }

    fn two_projects() -> AppState {
        let state = add_project(&AppState::new(), pid("1"), "Sales System").unwrap();
        add_project(&state, pid("2"), "Customer Portal").unwrap()
    }

    #[test]
    fn test_add_project_selects_it() {
        let state = add_project(&AppState::new(), pid("1"), "  Sales  ").unwrap();
        assert_eq!(state.projects().len(), 1);
        assert_eq!(state.projects()[0].name, "Sales");
        assert_eq!(state.selected_id(), Some(&pid("1")));
    }

    #[test]
    fn test_add_project_leaves_input_untouched() {
        let before = AppState::new();
        let after = add_project(&before, pid("1"), "Sales").unwrap();
        assert!(before.projects().is_empty());
        assert_ne!(before, after);
    }

    #[test]
    fn test_add_project_rejects_duplicate_and_blank() {
        let state = two_projects();
        assert_eq!(
            add_project(&state, pid("1"), "Again").unwrap_err(),
            ValidationError::DuplicateProject("1".to_string())
        );
        assert_eq!(
            add_project(&state, pid("3"), "   ").unwrap_err(),
            ValidationError::EmptyProjectName
        );
    }

    #[test]
    fn test_next_project_id_is_unique() {
        let state = AppState::new();
        let first = next_project_id(&state);
        let state = add_project(&state, first.clone(), "A").unwrap();
        let second = next_project_id(&state);
        assert_ne!(first, second);
        assert!(second.as_str().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_add_entry_goes_to_selected_project() {
        let state = two_projects();
        let state = add_entry(&state, &draft(FunctionType::ExternalInput, Complexity::High, "Login"))
            .unwrap();
        assert_eq!(state.entries().len(), 1);
        assert_eq!(state.entries()[0].project_id(), &pid("2"));
        assert_eq!(state.entries()[0].points(), 6);
    }

    #[test]
    fn test_add_entry_without_selection() {
        let err = add_entry(
            &AppState::new(),
            &draft(FunctionType::ExternalInput, Complexity::Low, "Login"),
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::NoProjectSelected);
    }

    #[test]
    fn test_add_entry_rejects_blank_name() {
        let state = two_projects();
        let err = add_entry(&state, &draft(FunctionType::ExternalInput, Complexity::Low, " "))
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyName);
        assert!(state.entries().is_empty());
    }

    #[test]
    fn test_add_entry_to_unknown_project() {
        let state = two_projects();
        let err = add_entry_to(
            &state,
            &pid("42"),
            &draft(FunctionType::ExternalQuery, Complexity::Low, "Search"),
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::UnknownProject("42".to_string()));
    }

    #[test]
    fn test_set_characteristic_clamps() {
        let state = AppState::new();
        let state = set_characteristic(&state, 0, 9).unwrap();
        assert_eq!(state.characteristics()[0].degree_of_influence, 5);
        let state = set_characteristic(&state, 2, -4).unwrap();
        assert_eq!(state.characteristics()[2].degree_of_influence, 0);
        assert_eq!(state.characteristics().len(), 14);
    }

    #[test]
    fn test_set_characteristic_changes_vaf() {
        let state = AppState::new();
        assert_eq!(state.vaf().unwrap(), 0.90);
        // data communications 3 -> 5 adds 2 to the total
        let state = set_characteristic(&state, 0, 5).unwrap();
        assert_eq!(state.vaf().unwrap(), 0.92);
    }

    #[test]
    fn test_set_characteristic_bad_index() {
        assert_eq!(
            set_characteristic(&AppState::new(), 14, 1).unwrap_err(),
            ValidationError::CharacteristicIndex(14)
        );
    }

    #[test]
    fn test_select_project() {
        let state = two_projects();
        let state = select_project(&state, &pid("1")).unwrap();
        assert_eq!(state.selected_project().unwrap().name, "Sales System");
        assert!(select_project(&state, &pid("9")).is_err());
    }

    #[test]
    fn test_cycle_project_wraps() {
        let state = two_projects(); // "2" selected
        let state = cycle_project(&state, 1);
        assert_eq!(state.selected_id(), Some(&pid("1")));
        let state = cycle_project(&state, -1);
        assert_eq!(state.selected_id(), Some(&pid("2")));
        let empty = cycle_project(&AppState::new(), 1);
        assert!(empty.selected_id().is_none());
    }

    #[test]
    fn test_totals_for_selected_project() {
        let state = select_project(&two_projects(), &pid("1")).unwrap();
        let state = add_entry(&state, &draft(FunctionType::InternalLogicalFile, Complexity::Medium, "Customers")).unwrap();
        let state = add_entry(&state, &draft(FunctionType::ExternalInterfaceFile, Complexity::High, "Payments API")).unwrap();
        let state = add_entry(&state, &draft(FunctionType::ExternalInput, Complexity::Low, "New product")).unwrap();

        let totals = state.totals_for(&pid("1")).unwrap();
        assert_eq!(totals.unadjusted, 23);
        assert_eq!(totals.adjusted, 20.70);
        assert_eq!(state.totals_for(&pid("2")).unwrap().unadjusted, 0);
        assert_eq!(state.entries_for(&pid("1")).count(), 3);
    }
}
