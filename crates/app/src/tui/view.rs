use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::Stylize,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::model::{InputMode, TuiModel};

/// The View component of MVU - renders the model, never mutates it.
pub struct TuiView;

impl TuiView {
    /// Render the entire TUI based on the current model state
    pub fn render(model: &TuiModel, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(1),    // Course sheet
                Constraint::Length(3), // Status / input bar
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        Self::render_title(model, frame, chunks[0]);
        Self::render_sheet(model, frame, chunks[1]);
        Self::render_status_bar(model, frame, chunks[2]);
        Self::render_footer(frame, chunks[3]);

        if model.ui_state.show_help {
            Self::render_help_overlay(frame, frame.area());
        }
    }

    fn render_title(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let title_text = format!(
            "GradeGrip    {} course(s), {} unit(s)",
            model.sheet.len(),
            model.sheet.total_units()
        );
        let title = Paragraph::new(title_text)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        frame.render_widget(title, area);
    }

    fn render_sheet(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let content_lines = if model.sheet.is_empty() {
            vec![
                Line::from("No courses yet."),
                Line::from(""),
                Line::from(vec![
                    "Press ".into(),
                    "n".fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    " and enter how many courses you are offering.".into(),
                ]),
                Line::from("Courses with unreleased results default to F and score 0."),
            ]
        } else {
            model
                .sheet
                .courses
                .iter()
                .enumerate()
                .map(|(row, course)| {
                    let selected = row == model.ui_state.cursor_position;
                    let marker = if selected { "▶" } else { " " };

                    let mut spans = vec![Span::raw(format!("{} {:>2}  ", marker, course.index))];

                    let (color, is_bold) = Self::grade_color(model, &course.grade);
                    let mut grade_style = Style::default().fg(color);
                    if is_bold {
                        grade_style = grade_style.add_modifier(Modifier::BOLD);
                    }
                    spans.push(Span::styled(format!("{:<3}", course.grade), grade_style));

                    spans.push(Span::raw(format!("{:>3} unit(s)", course.units)));

                    if !model.scale.recognizes(&course.grade) {
                        spans.push(Span::styled(
                            "  ? unknown grade, scores 0",
                            Style::default().fg(Color::Red),
                        ));
                    }

                    let line = Line::from(spans);
                    if selected {
                        line.style(Style::default().add_modifier(Modifier::REVERSED))
                    } else {
                        line
                    }
                })
                .collect()
        };

        // Keep the cursor visible when the sheet outgrows the viewport
        let available_height = area.height.saturating_sub(2) as usize;
        let visible_lines = if content_lines.len() > available_height && available_height > 0 {
            let start = model
                .ui_state
                .cursor_position
                .saturating_sub(available_height - 1)
                .min(content_lines.len() - available_height);
            let end = (start + available_height).min(content_lines.len());
            content_lines[start..end].to_vec()
        } else {
            content_lines
        };

        let sheet = Paragraph::new(visible_lines)
            .block(Block::default().borders(Borders::ALL).title("Courses"))
            .style(Style::default().fg(Color::White));
        frame.render_widget(sheet, area);
    }

    fn render_status_bar(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let line = if model.input.mode != InputMode::None {
            Line::from(vec![
                model
                    .input
                    .prompt
                    .clone()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                " ".into(),
                model.input.text.clone().into(),
                "▏".fg(Color::Yellow),
            ])
        } else if let Some(error) = model.errors.last() {
            Line::from(error.clone().fg(Color::Red))
        } else if model.last_average.is_some() {
            Line::from(vec![
                "CGPA: ".into(),
                model
                    .formatted_average()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ])
        } else if let Some(message) = model.messages.last() {
            Line::from(message.clone())
        } else {
            Line::from(vec![
                "Press ".into(),
                "g".fg(Color::Yellow).add_modifier(Modifier::BOLD),
                " to calculate your CGPA".into(),
            ])
        };

        let status = Paragraph::new(line)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        frame.render_widget(status, area);
    }

    fn render_footer(frame: &mut Frame, area: Rect) {
        let footer = Paragraph::new(Line::from(vec![
            "n".fg(Color::Yellow).add_modifier(Modifier::BOLD),
            " courses  ".into(),
            "a-f".fg(Color::Yellow).add_modifier(Modifier::BOLD),
            " grade  ".into(),
            "+/-".fg(Color::Yellow).add_modifier(Modifier::BOLD),
            " units  ".into(),
            "g".fg(Color::Yellow).add_modifier(Modifier::BOLD),
            " calculate  ".into(),
            "?".fg(Color::Yellow).add_modifier(Modifier::BOLD),
            " help  ".into(),
            "q".fg(Color::Yellow).add_modifier(Modifier::BOLD),
            " quit".into(),
        ]))
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray));
        frame.render_widget(footer, area);
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let popup = Self::centered_rect(60, 60, area);
        frame.render_widget(Clear, popup);

        let help_lines = vec![
            Line::from("GradeGrip keys").style(Style::default().add_modifier(Modifier::BOLD)),
            Line::from(""),
            Line::from("  n        set the number of courses (rebuilds the sheet,"),
            Line::from("           discarding existing grades and units)"),
            Line::from("  j/k ↑↓   select a course"),
            Line::from("  a-f      set the selected course's grade"),
            Line::from("  + / -    step the selected course's units (floor 1)"),
            Line::from("  u        type a unit value directly"),
            Line::from("  g/Enter  calculate the CGPA"),
            Line::from("  q/Esc    quit"),
            Line::from(""),
            Line::from("Press any key to close"),
        ];

        let help = Paragraph::new(help_lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Help"));
        frame.render_widget(help, popup);
    }

    /// Letter grades get fixed colors; anything outside the scale is dimmed.
    fn grade_color(model: &TuiModel, grade: &str) -> (Color, bool) {
        if !model.scale.recognizes(grade) {
            return (Color::DarkGray, false);
        }

        // Top of the scale gets special treatment - bold green
        if model.scale.points(grade) == model.scale.max_point() {
            return (Color::Green, true);
        }

        match grade.trim().to_uppercase().as_str() {
            "B" => (Color::Cyan, false),
            "C" => (Color::Yellow, false),
            "D" => (Color::Magenta, false),
            "E" => (Color::Blue, false),
            _ => (Color::Red, false),
        }
    }

    fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(area);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(vertical[1])[1]
    }
}
