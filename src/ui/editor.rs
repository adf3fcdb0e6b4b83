use super::{help_line, help_paragraph};
use crate::app::App;
use crate::editor::{EditorFocus, NoteEditor};
use crate::text::{calculate_wrapped_cursor_position, wrap_lines};
use crate::ui::layout::calculate_editor_chunks;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Keep the cursor line inside the visible window.
fn follow_cursor(scroll: u16, cursor_line: usize, visible_height: usize) -> u16 {
    let mut new_scroll = scroll as usize;
    if cursor_line < new_scroll {
        new_scroll = cursor_line;
    } else if visible_height > 0 && cursor_line >= new_scroll + visible_height {
        new_scroll = cursor_line - visible_height + 1;
    }
    new_scroll as u16
}

fn status_line(editor: &NoteEditor) -> Line<'static> {
    let state = if editor.dirty {
        Span::styled("Unsaved changes", Style::default().fg(Color::Yellow))
    } else if editor.last_saved.is_some() {
        Span::styled("Saved", Style::default().fg(Color::Green))
    } else {
        Span::styled("Up to date", Style::default().fg(Color::DarkGray))
    };

    let mut spans = vec![
        Span::styled(
            format!("{} words  ", editor.word_count()),
            Style::default().fg(Color::DarkGray),
        ),
        state,
    ];
    if editor.restored_draft {
        spans.push(Span::styled(
            "  (restored draft)",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::ITALIC),
        ));
    }
    Line::from(spans)
}

fn draw_title(f: &mut Frame, editor: &NoteEditor, area: Rect) {
    let focused = editor.focus == EditorFocus::Title;
    let content = if editor.title.is_empty() && !focused {
        Line::from(Span::styled(
            "Untitled",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(editor.title.text().to_string())
    };

    let title = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(focused))
            .title("Title"),
    );
    f.render_widget(title, area);

    if focused {
        let inner_width = area.width.saturating_sub(2);
        let col = (editor.title.cursor() as u16).min(inner_width.saturating_sub(1));
        f.set_cursor_position((area.x + 1 + col, area.y + 1));
    }
}

pub fn draw_note_editor(f: &mut Frame, app: &mut App) {
    let layout = calculate_editor_chunks(f.area());
    let Some(editor) = app.note_editor.as_mut() else {
        return;
    };

    draw_title(f, editor, layout.title_area);

    let focused = editor.focus == EditorFocus::Body;
    let text_width = layout.body_area.width.saturating_sub(2) as usize;
    let visible_height = layout.body_area.height.saturating_sub(2) as usize;

    let (cursor_line, cursor_col) =
        calculate_wrapped_cursor_position(editor.body.text(), editor.body.cursor(), text_width);
    editor.scroll = follow_cursor(editor.scroll, cursor_line, visible_height);

    let lines: Vec<Line> = if editor.body.is_empty() && !focused {
        vec![Line::from(Span::styled(
            "[Start writing...]",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        wrap_lines(editor.body.text(), text_width)
            .into_iter()
            .map(|line| Line::from(line.text))
            .collect()
    };

    let body = Paragraph::new(lines).scroll((editor.scroll, 0)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(focused))
            .title("Note"),
    );
    f.render_widget(body, layout.body_area);

    if focused {
        let cursor_x = layout.body_area.x + 1 + cursor_col as u16;
        let cursor_y =
            layout.body_area.y + 1 + (cursor_line as u16).saturating_sub(editor.scroll);
        f.set_cursor_position((cursor_x, cursor_y));
    }

    f.render_widget(Paragraph::new(status_line(editor)), layout.status_area);

    let help = help_line(&[
        ("Esc", "Save & Close"),
        ("Tab", "Switch Field"),
        ("Enter", "New Line"),
        ("Ctrl+C", "Exit App"),
    ]);
    f.render_widget(help_paragraph(vec![help]), layout.help_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_cursor() {
        assert_eq!(follow_cursor(0, 3, 10), 0);
        assert_eq!(follow_cursor(0, 12, 10), 3);
        assert_eq!(follow_cursor(5, 2, 10), 2);
        assert_eq!(follow_cursor(4, 0, 0), 0);
    }
}
