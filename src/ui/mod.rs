pub mod layout;
mod browse;
mod cards;
mod confirm;
mod dates;
mod editor;
mod form;
mod quiz;
mod summary;

use crate::app::App;
use crate::models::{AppState, FormPurpose};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub use browse::draw_browse;
pub use cards::draw_card_study;
pub use confirm::draw_delete_confirmation;
pub use dates::format_timestamp;
pub use editor::draw_note_editor;
pub use form::draw_form;
pub use quiz::{draw_quiz_editor, draw_quiz_study};
pub use summary::draw_quiz_summary;

pub fn draw(f: &mut Frame, app: &mut App) {
    match app.state {
        AppState::Browse | AppState::Search => draw_browse(f, app),
        AppState::NoteEditor => draw_note_editor(f, app),
        AppState::QuizEditor => draw_quiz_editor(f, app),
        AppState::Form => {
            let over_quiz = app.form.as_ref().is_some_and(|form| {
                matches!(
                    form.purpose,
                    FormPurpose::NewQuestion | FormPurpose::EditQuestion(_) | FormPurpose::RenameQuiz
                )
            });
            if over_quiz {
                draw_quiz_editor(f, app);
            } else {
                draw_browse(f, app);
            }
            if let Some(form) = &app.form {
                draw_form(f, form);
            }
        }
        AppState::QuizStudy => {
            if let Some(study) = &app.quiz_study {
                draw_quiz_study(f, study);
            }
        }
        AppState::QuizSummary => {
            if let Some(study) = &app.quiz_study {
                draw_quiz_summary(f, study);
            }
        }
        AppState::CardStudy => {
            if let Some(study) = &app.card_study {
                draw_card_study(f, study);
            }
        }
        AppState::ConfirmDelete => {
            draw_browse(f, app);
            if let Some(target) = app.pending_delete {
                draw_delete_confirmation(f, target, app);
            }
        }
    }
}

pub(crate) fn key_span(key: &str) -> Span<'static> {
    Span::styled(
        key.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

/// One help line from `(key, action)` pairs.
pub(crate) fn help_line(entries: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(entries.len() * 2);
    for (i, (key, action)) in entries.iter().enumerate() {
        spans.push(key_span(key));
        if i + 1 < entries.len() {
            spans.push(Span::from(format!(" {}  ", action)));
        } else {
            spans.push(Span::from(format!(" {}", action)));
        }
    }
    Line::from(spans)
}

pub(crate) fn help_paragraph(lines: Vec<Line<'static>>) -> Paragraph<'static> {
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

pub(crate) fn header_paragraph(title: String) -> Paragraph<'static> {
    Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}
