use crate::model::{FunctionPointEntry, CHARACTERISTIC_COUNT, MAX_DEGREE};
use crate::state::{self, AppState, EntryDraft};
use crate::tui::theme::ThemeColors;
use std::path::PathBuf;
use std::time::Instant;

const FLASH_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Entries,
    Characteristics,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryField {
    Type,
    Complexity,
    Name,
}

impl EntryField {
    fn next(self) -> Self {
        match self {
            EntryField::Type => EntryField::Complexity,
            EntryField::Complexity => EntryField::Name,
            EntryField::Name => EntryField::Type,
        }
    }

    fn previous(self) -> Self {
        match self {
            EntryField::Type => EntryField::Name,
            EntryField::Complexity => EntryField::Type,
            EntryField::Name => EntryField::Complexity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    NewProject,
    NewEntry,
    Help,
    Breakdown,
}

#[derive(Debug, Clone)]
pub struct Flash {
    pub text: String,
    pub is_error: bool,
    pub shown_at: Instant,
}

pub struct App {
    pub state: AppState,
    pub table_state: ratatui::widgets::TableState,
    pub characteristic_index: usize,
    pub current_view: View,
    pub input_mode: InputMode,
    pub project_input: String,
    pub entry_draft: EntryDraft,
    pub entry_field: EntryField,
    pub flash_message: Option<Flash>,
    pub should_quit: bool,
    pub export_path: PathBuf,
    pub theme: ThemeColors,
}

impl App {
    pub fn new(state: AppState, export_path: PathBuf, theme: ThemeColors) -> Self {
        let mut app = Self {
            state,
            table_state: ratatui::widgets::TableState::default(),
            characteristic_index: 0,
            current_view: View::Entries,
            input_mode: InputMode::Normal,
            project_input: String::new(),
            entry_draft: EntryDraft::default(),
            entry_field: EntryField::Type,
            flash_message: None,
            should_quit: false,
            export_path,
            theme,
        };
        app.reset_row_selection();
        app
    }

    /// Entries of the selected project, in insertion order.
    pub fn current_entries(&self) -> Vec<&FunctionPointEntry> {
        match self.state.selected_id() {
            Some(id) => self.state.entries_for(id).collect(),
            None => Vec::new(),
        }
    }

    fn reset_row_selection(&mut self) {
        let selection = if self.current_entries().is_empty() {
            None
        } else {
            Some(0)
        };
        self.table_state.select(selection);
    }

    pub fn next_row(&mut self) {
        match self.current_view {
            View::Entries => {
                let len = self.current_entries().len();
                if len == 0 {
                    return;
                }
                let i = match self.table_state.selected() {
                    Some(i) if i + 1 < len => i + 1,
                    _ => 0,
                };
                self.table_state.select(Some(i));
            }
            View::Characteristics => {
                self.characteristic_index = (self.characteristic_index + 1) % CHARACTERISTIC_COUNT;
            }
        }
    }

    pub fn previous_row(&mut self) {
        match self.current_view {
            View::Entries => {
                let len = self.current_entries().len();
                if len == 0 {
                    return;
                }
                let i = match self.table_state.selected() {
                    Some(0) | None => len - 1,
                    Some(i) => i - 1,
                };
                self.table_state.select(Some(i));
            }
            View::Characteristics => {
                self.characteristic_index =
                    (self.characteristic_index + CHARACTERISTIC_COUNT - 1) % CHARACTERISTIC_COUNT;
            }
        }
    }

    pub fn toggle_view(&mut self) {
        self.current_view = match self.current_view {
            View::Entries => View::Characteristics,
            View::Characteristics => View::Entries,
        };
    }

    pub fn cycle_project(&mut self, step: isize) {
        self.state = state::cycle_project(&self.state, step);
        self.reset_row_selection();
    }

    pub fn update_flash(&mut self) {
        if let Some(flash) = &self.flash_message {
            if flash.shown_at.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some(Flash {
            text: msg,
            is_error: false,
            shown_at: Instant::now(),
        });
    }

    pub fn show_error(&mut self, msg: String) {
        self.flash_message = Some(Flash {
            text: msg,
            is_error: true,
            shown_at: Instant::now(),
        });
    }

    /// Start new project input mode
    pub fn start_new_project(&mut self) {
        self.input_mode = InputMode::NewProject;
        self.project_input.clear();
    }

    /// Create the project from the input buffer and select it
    pub fn confirm_new_project(&mut self) {
        let id = state::next_project_id(&self.state);
        match state::add_project(&self.state, id, &self.project_input) {
            Ok(next) => {
                self.state = next;
                let name = self
                    .state
                    .selected_project()
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                self.reset_row_selection();
                self.show_flash(format!("Created project: {}", name));
                self.input_mode = InputMode::Normal;
                self.project_input.clear();
            }
            // Stay in the form so the user can fix the name
            Err(e) => self.show_error(format!("Error: {}", e)),
        }
    }

    /// Open the entry form for the selected project
    pub fn start_new_entry(&mut self) {
        if self.state.selected_project().is_none() {
            self.show_error("Error: create a project first (n)".to_string());
            return;
        }
        self.input_mode = InputMode::NewEntry;
        self.entry_draft = EntryDraft::default();
        self.entry_field = EntryField::Type;
    }

    pub fn next_entry_field(&mut self) {
        self.entry_field = self.entry_field.next();
    }

    pub fn previous_entry_field(&mut self) {
        self.entry_field = self.entry_field.previous();
    }

    /// Cycle the value of the focused selector field
    pub fn cycle_entry_value(&mut self, forward: bool) {
        let draft = &mut self.entry_draft;
        match self.entry_field {
            EntryField::Type => {
                draft.function_type = if forward {
                    draft.function_type.next()
                } else {
                    draft.function_type.previous()
                };
            }
            EntryField::Complexity => {
                draft.complexity = if forward {
                    draft.complexity.next()
                } else {
                    draft.complexity.previous()
                };
            }
            EntryField::Name => {}
        }
    }

    /// Add the drafted entry to the selected project
    pub fn confirm_new_entry(&mut self) {
        match state::add_entry(&self.state, &self.entry_draft) {
            Ok(next) => {
                self.state = next;
                let entries = self.current_entries();
                let added = entries.len();
                let msg = entries.last().map(|entry| {
                    format!(
                        "Added: {} {} ({} points)",
                        entry.function_type().code(),
                        entry.name(),
                        entry.points()
                    )
                });
                if let Some(msg) = msg {
                    self.show_flash(msg);
                }
                self.table_state.select(added.checked_sub(1));
                self.input_mode = InputMode::Normal;
                self.entry_draft = EntryDraft::default();
            }
            Err(e) => {
                self.show_error(format!("Error: {}", e));
                self.entry_field = EntryField::Name;
            }
        }
    }

    /// Leave any text input without applying it
    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.project_input.clear();
        self.entry_draft = EntryDraft::default();
    }

    /// Rate the highlighted characteristic; out-of-range values are clamped.
    pub fn set_selected_degree(&mut self, raw: i64) {
        match state::set_characteristic(&self.state, self.characteristic_index, raw) {
            Ok(next) => {
                self.state = next;
                let rating = self.state.characteristics()[self.characteristic_index];
                match self.state.vaf() {
                    Ok(vaf) => self.show_flash(format!(
                        "{}: {} (VAF {:.2})",
                        rating.kind.label(),
                        rating.degree_of_influence,
                        vaf
                    )),
                    Err(e) => self.show_error(format!("Error: {}", e)),
                }
            }
            Err(e) => self.show_error(format!("Error: {}", e)),
        }
    }

    pub fn adjust_selected_degree(&mut self, delta: i64) {
        let current = self.state.characteristics()[self.characteristic_index].degree_of_influence as i64;
        let target = current + delta;
        if !(0..=MAX_DEGREE as i64).contains(&target) {
            return;
        }
        self.set_selected_degree(target);
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn show_breakdown(&mut self) {
        if self.state.selected_project().is_some() {
            self.input_mode = InputMode::Breakdown;
        }
    }

    pub fn dismiss_overlay(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Write the CSV report for every project to the export path
    pub fn export(&mut self) {
        let result = crate::export::build_csv(&self.state)
            .map_err(anyhow::Error::from)
            .and_then(|csv| crate::export::write_csv(&self.export_path, &csv));
        match result {
            Ok(()) => {
                let msg = format!(
                    "Exported {} entries to {}",
                    self.state.entries().len(),
                    self.export_path.display()
                );
                self.show_flash(msg);
            }
            Err(e) => self.show_error(format!("Failed to export: {:#}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{build_state, Config};
    use crate::model::{CharacteristicKind, Complexity, FunctionType};

    fn sample_app() -> App {
        let state = build_state(&Config::sample()).unwrap();
        App::new(state, PathBuf::from("unused.csv"), ThemeColors::dark())
    }

    #[test]
    fn test_new_selects_first_row() {
        let app = sample_app();
        assert_eq!(app.table_state.selected(), Some(0));
        assert_eq!(app.current_entries().len(), 3);
    }

    #[test]
    fn test_empty_state_has_no_row_selection() {
        let app = App::new(AppState::new(), PathBuf::from("x.csv"), ThemeColors::dark());
        assert_eq!(app.table_state.selected(), None);
        assert!(app.current_entries().is_empty());
    }

    #[test]
    fn test_rows_wrap() {
        let mut app = sample_app();
        app.previous_row();
        assert_eq!(app.table_state.selected(), Some(2));
        app.next_row();
        assert_eq!(app.table_state.selected(), Some(0));
    }

    #[test]
    fn test_characteristic_cursor_wraps() {
        let mut app = sample_app();
        app.toggle_view();
        app.previous_row();
        assert_eq!(app.characteristic_index, 13);
        app.next_row();
        assert_eq!(app.characteristic_index, 0);
    }

    #[test]
    fn test_cycle_project_resets_rows() {
        let mut app = sample_app();
        app.next_row();
        app.cycle_project(1);
        assert_eq!(app.state.selected_project().unwrap().name, "Customer Portal");
        assert_eq!(app.table_state.selected(), Some(0));
        assert_eq!(app.current_entries().len(), 2);
    }

    #[test]
    fn test_entry_form_cycles_values() {
        let mut app = sample_app();
        app.start_new_entry();
        app.cycle_entry_value(true);
        assert_eq!(app.entry_draft.function_type, FunctionType::ExternalInterfaceFile);
        app.cycle_entry_value(false);
        app.cycle_entry_value(false);
        assert_eq!(app.entry_draft.function_type, FunctionType::ExternalQuery);

        app.next_entry_field();
        app.cycle_entry_value(true);
        assert_eq!(app.entry_draft.complexity, Complexity::Medium);

        app.next_entry_field();
        assert_eq!(app.entry_field, EntryField::Name);
        app.cycle_entry_value(true);
        assert_eq!(app.entry_draft.complexity, Complexity::Medium);
    }

    #[test]
    fn test_confirm_entry_with_blank_name_keeps_form_open() {
        let mut app = sample_app();
        app.start_new_entry();
        app.confirm_new_entry();
        assert_eq!(app.input_mode, InputMode::NewEntry);
        assert_eq!(app.entry_field, EntryField::Name);
        assert!(app.flash_message.as_ref().unwrap().is_error);
        assert_eq!(app.state.entries().len(), 5);
    }

    #[test]
    fn test_start_entry_without_project() {
        let mut app = App::new(AppState::new(), PathBuf::from("x.csv"), ThemeColors::dark());
        app.start_new_entry();
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.flash_message.as_ref().unwrap().is_error);
    }

    #[test]
    fn test_adjust_degree_stops_at_bounds() {
        let mut app = sample_app();
        app.characteristic_index = CharacteristicKind::Performance.index();
        app.set_selected_degree(5);
        app.adjust_selected_degree(1);
        assert_eq!(app.state.characteristics()[app.characteristic_index].degree_of_influence, 5);
        app.set_selected_degree(0);
        app.adjust_selected_degree(-1);
        assert_eq!(app.state.characteristics()[app.characteristic_index].degree_of_influence, 0);
    }

    #[test]
    fn test_set_degree_clamps_and_reports_vaf() {
        let mut app = sample_app();
        app.set_selected_degree(99);
        assert_eq!(app.state.characteristics()[0].degree_of_influence, 5);
        assert_eq!(app.flash_message.as_ref().unwrap().text, "Data Communications: 5 (VAF 0.92)");
    }

    #[test]
    fn test_breakdown_needs_project() {
        let mut app = App::new(AppState::new(), PathBuf::from("x.csv"), ThemeColors::dark());
        app.show_breakdown();
        assert_eq!(app.input_mode, InputMode::Normal);

        let mut app = sample_app();
        app.show_breakdown();
        assert_eq!(app.input_mode, InputMode::Breakdown);
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let state = build_state(&Config::sample()).unwrap();
        let mut app = App::new(state, path.clone(), ThemeColors::dark());
        app.export();
        let flash = app.flash_message.as_ref().unwrap();
        assert!(!flash.is_error);
        assert!(flash.text.starts_with("Exported 5 entries"));
        assert!(std::fs::read_to_string(path).unwrap().starts_with("Project,Type"));
    }
}
