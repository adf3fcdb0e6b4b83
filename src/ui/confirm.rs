use crate::app::App;
use crate::models::DeleteTarget;
use crate::ui::layout::centered_rect;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn describe(target: DeleteTarget, app: &App) -> (&'static str, String) {
    match target {
        DeleteTarget::Note(id) => {
            let title = app
                .notes
                .iter()
                .find(|n| n.id == id)
                .map_or("this note", |n| n.display_title());
            ("Move to Trash", format!("Move '{}' to the trash?", title))
        }
        DeleteTarget::NoteForever(id) => {
            let title = app
                .notes
                .iter()
                .find(|n| n.id == id)
                .map_or("this note", |n| n.display_title());
            (
                "Delete Forever",
                format!("Permanently delete '{}'? This cannot be undone.", title),
            )
        }
        DeleteTarget::Flashcard(id) => {
            let front = app
                .flashcards
                .iter()
                .find(|c| c.id == id)
                .map_or("this flashcard", |c| c.front.as_str());
            ("Delete Flashcard", format!("Delete '{}'?", front))
        }
        DeleteTarget::Quiz(id) => {
            let title = app
                .quizzes
                .iter()
                .find(|q| q.id == id)
                .map_or("this quiz", |q| q.title.as_str());
            ("Delete Quiz", format!("Delete '{}'?", title))
        }
    }
}

pub fn draw_delete_confirmation(f: &mut Frame, target: DeleteTarget, app: &App) {
    let area = centered_rect(60, 40, f.area());
    f.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    let (heading, question) = describe(target, app);

    let title = Paragraph::new(heading)
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new(question)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
