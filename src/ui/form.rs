use super::help_line;
use crate::form::Form;
use crate::ui::layout::centered_rect;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const FIELD_HEIGHT: u16 = 3;

pub fn draw_form(f: &mut Frame, form: &Form) {
    let area = centered_rect(70, 80, f.area());
    f.render_widget(Clear, area);

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", form.title));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let mut constraints: Vec<Constraint> = form
        .fields
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focused;
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let input = Paragraph::new(field.input.text().to_string()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(field.label),
        );
        let field_area = chunks[i];
        f.render_widget(input, field_area);

        if focused && field_area.height > 2 {
            let max_col = field_area.width.saturating_sub(3);
            let col = (field.input.cursor() as u16).min(max_col);
            f.set_cursor_position((field_area.x + 1 + col, field_area.y + 1));
        }
    }

    let n = form.fields.len();
    if let Some(error) = &form.error {
        let message = Paragraph::new(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        f.render_widget(message, chunks[n + 1]);
    }

    let help = help_line(&[
        ("Tab", "Next Field"),
        ("Enter", "Next/Submit"),
        ("Ctrl+S", "Submit"),
        ("Esc", "Cancel"),
    ]);
    f.render_widget(Paragraph::new(help), chunks[n + 2]);
}
