pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, Theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

pub async fn run_tui(mut app: App) -> anyhow::Result<SessionSummary> {
    // Buffer log output while TUI is active to prevent it corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(250);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(anyhow::Error::from(e).context("Failed to draw terminal"));
        }

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => app.update_flash(),
            Event::Resize => {}
        }

        if app.should_quit {
            break Ok(SessionSummary::from(&app));
        }
    };

    // Restore terminal
    ratatui::restore();

    // Flush buffered log lines now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    result
}

/// What the session ended with, reported after the terminal is restored.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub projects: usize,
    pub entries: usize,
}

impl From<&App> for SessionSummary {
    fn from(app: &App) -> Self {
        Self {
            projects: app.state.projects().len(),
            entries: app.state.entries().len(),
        }
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Ctrl-C always quits, even from an input form
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        app::InputMode::Normal => {
            match key.code {
                // Quit
                KeyCode::Char('q') => app.should_quit = true,

                // Navigation
                KeyCode::Char('j') | KeyCode::Down => app.next_row(),
                KeyCode::Char('k') | KeyCode::Up => app.previous_row(),

                // Tab switching
                KeyCode::Tab => app.toggle_view(),

                // Projects
                KeyCode::Char('p') => app.cycle_project(1),
                KeyCode::Char('P') => app.cycle_project(-1),
                KeyCode::Char('n') => app.start_new_project(),

                // Entries
                KeyCode::Char('a') => app.start_new_entry(),
                KeyCode::Char('b') => app.show_breakdown(),

                // Characteristic ratings
                KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right
                    if app.current_view == app::View::Characteristics =>
                {
                    app.adjust_selected_degree(1)
                }
                KeyCode::Char('-') | KeyCode::Left
                    if app.current_view == app::View::Characteristics =>
                {
                    app.adjust_selected_degree(-1)
                }
                KeyCode::Char(c @ '0'..='5') if app.current_view == app::View::Characteristics => {
                    app.set_selected_degree(i64::from(c as u8 - b'0'))
                }

                // Export
                KeyCode::Char('e') => app.export(),

                // Help
                KeyCode::Char('?') => app.show_help(),

                _ => {}
            }
        }
        app::InputMode::NewProject => {
            match key.code {
                KeyCode::Enter => app.confirm_new_project(),
                KeyCode::Esc => app.cancel_input(),
                KeyCode::Backspace => {
                    app.project_input.pop();
                }
                KeyCode::Char(c) => app.project_input.push(c),

                // Ignore all other keys (don't propagate to Normal mode)
                _ => {}
            }
        }
        app::InputMode::NewEntry => {
            match key.code {
                KeyCode::Enter => app.confirm_new_entry(),
                KeyCode::Esc => app.cancel_input(),
                KeyCode::Tab | KeyCode::Down => app.next_entry_field(),
                KeyCode::BackTab | KeyCode::Up => app.previous_entry_field(),
                KeyCode::Right => app.cycle_entry_value(true),
                KeyCode::Left => app.cycle_entry_value(false),
                KeyCode::Backspace if app.entry_field == app::EntryField::Name => {
                    app.entry_draft.name.pop();
                }
                KeyCode::Char(c) if app.entry_field == app::EntryField::Name => {
                    app.entry_draft.name.push(c);
                }
                _ => {}
            }
        }
        app::InputMode::Breakdown => match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('q') => app.dismiss_overlay(),
            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_overlay();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{build_state, Config};
    use crate::model::{Complexity, FunctionType, ProjectId};
    use super::app::{InputMode, View};
    use std::path::PathBuf;

    fn sample_app() -> App {
        let state = build_state(&Config::sample()).unwrap();
        App::new(state, PathBuf::from("unused.csv"), ThemeColors::dark())
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_quit_keys() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = sample_app();
        app.start_new_project();
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_new_project_flow() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.input_mode, InputMode::NewProject);

        // 'q' is text here, not quit
        type_text(&mut app, "Inventory q");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);

        assert!(!app.should_quit);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.state.projects().len(), 3);
        assert_eq!(app.state.selected_project().unwrap().name, "Inventory");
        assert_eq!(app.table_state.selected(), None);
    }

    #[test]
    fn test_new_project_blank_name_rejected() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::NewProject);
        assert_eq!(app.state.projects().len(), 2);
        assert!(app.flash_message.as_ref().unwrap().is_error);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_add_entry_flow() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.input_mode, InputMode::NewEntry);

        // ILF -> EIF -> EI
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Tab);
        // low -> high (wrapping backwards)
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Login");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        let entries = app.current_entries();
        assert_eq!(entries.len(), 4);
        let added = entries[3];
        assert_eq!(added.function_type(), FunctionType::ExternalInput);
        assert_eq!(added.complexity(), Complexity::High);
        assert_eq!(added.name(), "Login");
        assert_eq!(added.points(), 6);
        assert_eq!(app.table_state.selected(), Some(3));

        let sales = ProjectId::new("1").unwrap();
        assert_eq!(app.state.totals_for(&sales).unwrap().unadjusted, 29);
    }

    #[test]
    fn test_letters_ignored_on_selector_fields() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "xq");
        assert!(app.entry_draft.name.is_empty());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_rating_keys_only_on_characteristics_tab() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.state.characteristics()[0].degree_of_influence, 3);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_view, View::Characteristics);
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.state.characteristics()[0].degree_of_influence, 5);
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.state.characteristics()[0].degree_of_influence, 4);

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.state.characteristics()[1].degree_of_influence, 3);
        assert_eq!(app.state.vaf().unwrap(), 0.92);
    }

    #[test]
    fn test_digits_above_five_ignored() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.state.characteristics()[0].degree_of_influence, 3);
    }

    #[test]
    fn test_project_cycling_keys() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.state.selected_project().unwrap().name, "Customer Portal");
        press(&mut app, KeyCode::Char('P'));
        assert_eq!(app.state.selected_project().unwrap().name, "Sales System");
    }

    #[test]
    fn test_overlays() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.input_mode, InputMode::Help);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.input_mode, InputMode::Normal);

        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.input_mode, InputMode::Breakdown);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.input_mode, InputMode::Breakdown);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_summary_from_app() {
        let app = sample_app();
        assert_eq!(
            SessionSummary::from(&app),
            SessionSummary { projects: 2, entries: 5 }
        );
    }
}
