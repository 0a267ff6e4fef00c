use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, Tabs};

use crate::model::MAX_DEGREE;
use crate::output::{format_points, truncate_name};
use crate::scoring::{type_breakdown, weight_for};
use crate::tui::app::{App, EntryField, InputMode, View};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 8 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small")
            .alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Tabs(1) + Body(fill) + Totals(1) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),  // Title bar
        Constraint::Length(1),  // Tab bar
        Constraint::Fill(1),    // Entries or characteristics
        Constraint::Length(1),  // Totals
        Constraint::Length(1),  // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);
    match app.current_view {
        View::Entries => render_entries(frame, chunks[2], app),
        View::Characteristics => render_characteristics(frame, chunks[2], app),
    }
    render_totals(frame, chunks[3], app);
    render_status_bar(frame, chunks[4], app);

    // Render overlays based on input mode
    match app.input_mode {
        InputMode::NewProject => render_project_popup(frame, app),
        InputMode::NewEntry => render_entry_popup(frame, app),
        InputMode::Help => render_help_popup(frame, app),
        InputMode::Breakdown => render_breakdown_popup(frame, app),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let title = "Function Point Calculator";
    let mut spans = vec![Span::styled(title, Style::default().fg(app.theme.title_color).bold())];

    // Project position on the right
    let projects = app.state.projects();
    if let Some(selected) = app.state.selected_project() {
        let position = projects.iter().position(|p| p.id == selected.id).unwrap_or(0) + 1;
        let right = format!("{} ({}/{})", selected.name, position, projects.len());
        let padding_len = (area.width as usize).saturating_sub(title.len() + right.chars().count());
        spans.push(Span::raw(" ".repeat(padding_len)));
        spans.push(Span::styled(right, Style::default().fg(app.theme.muted)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles = vec!["Entries", "Characteristics"];
    let selected = match app.current_view {
        View::Entries => 0,
        View::Characteristics => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive_style)
        .highlight_style(app.theme.tab_active_style.reversed())
        .divider(" | ");

    frame.render_widget(tabs, area);
}

fn render_entries(frame: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;

    if app.state.selected_project().is_none() {
        let empty_msg = Paragraph::new("No projects yet. Press n to create one.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.muted));
        frame.render_widget(empty_msg, area);
        return;
    }

    let entries = app.current_entries();
    if entries.is_empty() {
        let empty_msg = Paragraph::new("No functions recorded. Press a to add one.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.muted));
        frame.render_widget(empty_msg, area);
        return;
    }

    let rows: Vec<Row> = entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            // Alternating row background (odd rows get subtle background)
            let row_style = if idx % 2 == 1 {
                Style::default().bg(theme.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(format!("{}.", idx + 1)).style(Style::default().fg(theme.index_color)),
                Cell::from(entry.function_type().code()).style(Style::default().fg(theme.type_color)),
                Cell::from(truncate_name(entry.name(), 60)),
                Cell::from(entry.complexity().as_str()),
                Cell::from(format!("{:>6}", entry.points()))
                    .style(Style::default().fg(theme.points_color)),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),   // Index: "99."
        Constraint::Length(5),   // Type: "ILF"
        Constraint::Fill(1),     // Name
        Constraint::Length(10),  // Complexity
        Constraint::Length(6),   // Points
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["#", "Type", "Name", "Complexity", "Points"])
                .style(theme.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(theme.row_selected);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn degree_bar(degree: u8, app: &App) -> Line<'static> {
    let filled = degree as usize;
    let empty = (MAX_DEGREE as usize).saturating_sub(filled);
    let color = app.theme.degree_color(degree);

    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled("█".repeat(filled), Style::default().fg(color)));
    }
    if empty > 0 {
        spans.push(Span::styled("░".repeat(empty), Style::default().fg(app.theme.bar_empty)));
    }
    Line::from(spans)
}

fn render_characteristics(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let rows: Vec<Row> = app
        .state
        .characteristics()
        .iter()
        .enumerate()
        .map(|(idx, c)| {
            let style = if idx == app.characteristic_index {
                theme.row_selected
            } else if idx % 2 == 1 {
                Style::default().bg(theme.row_alt_bg)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(format!("{}.", idx + 1)).style(Style::default().fg(theme.index_color)),
                Cell::from(c.kind.label()),
                Cell::from(c.degree_of_influence.to_string())
                    .style(Style::default().fg(theme.degree_color(c.degree_of_influence)).bold()),
                Cell::from(degree_bar(c.degree_of_influence, app)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths).header(
        Row::new(vec!["#", "Characteristic", "DI", ""])
            .style(theme.header_style)
            .bottom_margin(1),
    );

    frame.render_widget(table, area);
}

fn render_totals(frame: &mut Frame, area: Rect, app: &App) {
    let text = match app.state.selected_id().map(|id| app.state.totals_for(id)) {
        Some(Ok(totals)) => format!(
            "Unadjusted: {}   VAF: {:.2}   Adjusted: {}",
            totals.unadjusted,
            totals.vaf,
            format_points(totals.adjusted)
        ),
        Some(Err(e)) => format!("Error: {}", e),
        None => match app.state.vaf() {
            Ok(vaf) => format!("VAF: {:.2}", vaf),
            Err(e) => format!("Error: {}", e),
        },
    };

    frame.render_widget(
        Paragraph::new(text).style(app.theme.totals_style),
        area,
    );
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let text = if let Some(flash) = &app.flash_message {
        let color = if flash.is_error {
            theme.flash_error
        } else {
            theme.flash_success
        };
        Line::from(Span::styled(flash.text.clone(), Style::default().fg(color)))
    } else {
        let hints = match app.current_view {
            View::Entries => vec![
                ("j", "/", "k", ":nav "),
                ("p", "/", "P", ":project "),
                ("n", "", "", ":new project "),
                ("a", "", "", ":add "),
                ("b", "", "", ":breakdown "),
                ("e", "", "", ":export "),
                ("Tab", "", "", ":ratings "),
                ("?", "", "", ":help "),
                ("q", "", "", ":quit"),
            ],
            View::Characteristics => vec![
                ("j", "/", "k", ":nav "),
                ("+", "/", "-", ":rate "),
                ("0", "-", "5", ":set "),
                ("e", "", "", ":export "),
                ("Tab", "", "", ":entries "),
                ("?", "", "", ":help "),
                ("q", "", "", ":quit"),
            ],
        };

        // Build hints with colored shortcut keys
        let mut spans = Vec::new();
        for (i, (key1, sep, key2, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key1, Style::default().fg(theme.status_key_color)));
            if !sep.is_empty() {
                spans.push(Span::raw(*sep));
                spans.push(Span::styled(*key2, Style::default().fg(theme.status_key_color)));
            }
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    // Clamp dimensions to area bounds
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn popup_block<'a>(title: &'a str, app: &App) -> Block<'a> {
    Block::bordered()
        .title(title)
        .title_style(app.theme.popup_title)
        .border_style(Style::default().fg(app.theme.popup_border))
        .style(Style::default().bg(app.theme.popup_bg))
}

/// Render the new project name popup
fn render_project_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(50, 5, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block(" New Project ", app);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([
        Constraint::Length(1),  // Input line
        Constraint::Length(1),  // Help text
    ])
    .split(inner);

    frame.render_widget(Paragraph::new(format!("{}|", app.project_input)), chunks[0]);
    frame.render_widget(
        Paragraph::new("Enter: create | Esc: cancel").style(Style::default().fg(app.theme.muted)),
        chunks[1],
    );
}

/// Render the add-entry form popup
fn render_entry_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(56, 9, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block(" Add Function ", app);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let draft = &app.entry_draft;
    let field_style = |field: EntryField| {
        if app.entry_field == field {
            app.theme.field_active
        } else {
            Style::default()
        }
    };
    let points = weight_for(draft.function_type, draft.complexity);

    let lines = vec![
        Line::from(vec![
            Span::raw("Type        "),
            Span::styled(
                format!("< {} {} >", draft.function_type.code(), draft.function_type.label()),
                field_style(EntryField::Type),
            ),
        ]),
        Line::from(vec![
            Span::raw("Complexity  "),
            Span::styled(format!("< {} >", draft.complexity), field_style(EntryField::Complexity)),
        ]),
        Line::from(vec![
            Span::raw("Name        "),
            Span::styled(format!("{}|", draft.name), field_style(EntryField::Name)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("Points: {}", points),
            Style::default().fg(app.theme.points_color).bold(),
        )),
        Line::from(Span::styled(
            "Tab: next field | ←/→: change | Enter: add | Esc: cancel",
            Style::default().fg(app.theme.muted),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the per-type breakdown for the selected project
fn render_breakdown_popup(frame: &mut Frame, app: &App) {
    let Some(project) = app.state.selected_project() else {
        return;
    };
    let popup_area = centered_rect_fixed(52, 13, frame.area());
    frame.render_widget(Clear, popup_area);

    let title = format!(" {} ", project.name);
    let block = popup_block(&title, app);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let breakdown = type_breakdown(app.state.entries(), &project.id);
    let mut lines: Vec<Line> = breakdown
        .iter()
        .map(|row| {
            Line::from(vec![
                Span::styled(
                    format!("{:<4}", row.function_type.code()),
                    Style::default().fg(app.theme.type_color),
                ),
                Span::raw(format!("{:<26}", row.function_type.label())),
                Span::raw(format!("{:>3} × ", row.count)),
                Span::styled(
                    format!("{:>4}", row.points),
                    Style::default().fg(app.theme.points_color),
                ),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    match app.state.totals_for(&project.id) {
        Ok(totals) => {
            lines.push(Line::from(format!("Unadjusted total  {:>14}", totals.unadjusted)));
            lines.push(Line::from(format!("VAF               {:>14.2}", totals.vaf)));
            lines.push(Line::from(Span::styled(
                format!("Adjusted total    {:>14}", format_points(totals.adjusted)),
                Style::default().bold(),
            )));
        }
        Err(e) => lines.push(Line::from(Span::styled(
            format!("Error: {}", e),
            Style::default().fg(app.theme.flash_error),
        ))),
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Esc or b to close",
        Style::default().fg(app.theme.muted),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(52, 20, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block(" Keyboard Shortcuts ", app);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(app.theme.status_key_color).bold();
    let shortcuts = [
        ("j / Down      ", "Move down"),
        ("k / Up        ", "Move up"),
        ("Tab           ", "Toggle Entries/Characteristics"),
        ("p / P         ", "Next / previous project"),
        ("n             ", "New project"),
        ("a             ", "Add function to project"),
        ("b             ", "Breakdown by function type"),
        ("+ / -         ", "Raise / lower rating"),
        ("0-5           ", "Set rating"),
        ("e             ", "Export CSV"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = shortcuts
        .iter()
        .map(|(key, desc)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*desc)]))
        .collect();

    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(app.theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}
