use super::{format_timestamp, help_line, help_paragraph};
use crate::app::App;
use crate::db::flashcard::MAX_SCORE;
use crate::models::{AppState, Flashcard, Note, Quiz, Tab};
use crate::text::truncate_string;
use crate::ui::layout::calculate_browse_chunks;
use crate::utils::markdown::render_markdown;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

const LIST_TITLE_WIDTH: usize = 40;

fn empty_item(message: &str) -> ListItem<'static> {
    ListItem::new(message.to_string()).style(
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )
}

fn note_item(note: &Note) -> ListItem<'static> {
    let mut spans = Vec::new();
    if note.pinned {
        spans.push(Span::styled("★ ", Style::default().fg(Color::Yellow)));
    }
    if note.archived {
        spans.push(Span::styled("[A] ", Style::default().fg(Color::DarkGray)));
    }
    spans.push(Span::from(truncate_string(note.display_title(), LIST_TITLE_WIDTH)));
    spans.push(Span::styled(
        format!("  {}", format_timestamp(note.updated_at)),
        Style::default().fg(Color::DarkGray),
    ));
    ListItem::new(Line::from(spans))
}

fn flashcard_item(card: &Flashcard) -> ListItem<'static> {
    let marker = if card.mastered { "✓ " } else { "  " };
    ListItem::new(Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Green)),
        Span::from(truncate_string(&card.front, LIST_TITLE_WIDTH)),
        Span::styled(
            format!("  [{}/{}]", card.score, MAX_SCORE),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
}

fn quiz_item(quiz: &Quiz) -> ListItem<'static> {
    let linked = if quiz.source_note_id.is_some() { "↻ " } else { "  " };
    ListItem::new(Line::from(vec![
        Span::styled(linked, Style::default().fg(Color::Cyan)),
        Span::from(truncate_string(&quiz.title, LIST_TITLE_WIDTH)),
        Span::styled(
            format!("  ({} questions)", quiz.questions.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
}

fn note_preview(note: &Note) -> Text<'static> {
    let mut text = Text::default();
    let mut meta = vec![Span::styled(
        format!("Updated {}", format_timestamp(note.updated_at)),
        Style::default().fg(Color::DarkGray),
    )];
    if !note.tags.is_empty() {
        meta.push(Span::styled(
            format!("  #{}", note.tags.join(" #")),
            Style::default().fg(Color::Magenta),
        ));
    }
    text.push_line(Line::from(meta));
    text.push_line(Line::from(""));
    text.extend(render_markdown(&note.content));
    text
}

fn flashcard_preview(card: &Flashcard) -> Text<'static> {
    let label = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut text = Text::default();
    text.push_line(Line::from(Span::styled("Front:", label)));
    text.push_line(Line::from(card.front.clone()));
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled("Back:", label)));
    text.push_line(Line::from(card.back.clone()));
    text.push_line(Line::from(""));
    if !card.tags.is_empty() {
        text.push_line(Line::from(Span::styled(
            format!("#{}", card.tags.join(" #")),
            Style::default().fg(Color::Magenta),
        )));
    }
    text.push_line(Line::from(format!(
        "Score: {}/{}{}",
        card.score,
        MAX_SCORE,
        if card.mastered { " (mastered)" } else { "" }
    )));
    text
}

fn quiz_preview(quiz: &Quiz) -> Text<'static> {
    let mut text = Text::default();
    if quiz.questions.is_empty() {
        text.push_line(Line::from(Span::styled(
            "No questions yet",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
        return text;
    }

    for (i, question) in quiz.questions.iter().enumerate() {
        text.push_line(Line::from(Span::styled(
            format!("{}. {}", i + 1, question.text),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for option in &question.options {
            let style = if *option == question.answer {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            text.push_line(Line::from(Span::styled(format!("   • {}", option), style)));
        }
        text.push_line(Line::from(""));
    }
    text
}

fn draw_search_bar(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    if app.state == AppState::Search {
        spans.push(Span::styled(
            format!("/{}", app.search),
            Style::default().fg(Color::Yellow),
        ));
    } else if !app.search.is_empty() {
        spans.push(Span::styled(
            format!("Filter: {}", app.search),
            Style::default().fg(Color::Yellow),
        ));
    } else {
        spans.push(Span::styled(
            "/ to search, #tag to filter",
            Style::default().fg(Color::DarkGray),
        ));
    }

    if app.tab == Tab::Notes && app.show_trash {
        spans.push(Span::styled("  [Trash]", Style::default().fg(Color::Red)));
    } else if app.tab == Tab::Notes && app.show_archived {
        spans.push(Span::styled(
            "  [+Archived]",
            Style::default().fg(Color::DarkGray),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);

    if app.state == AppState::Search {
        let x = area.x + 1 + app.search.chars().count() as u16;
        f.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
    }
}

fn help_for(app: &App) -> Vec<Line<'static>> {
    if app.state == AppState::Search {
        return vec![help_line(&[("Enter", "Apply"), ("Esc", "Clear")])];
    }

    let common = help_line(&[
        ("Tab", "Switch"),
        ("↑/↓", "Navigate"),
        ("/", "Search"),
        ("q", "Quit"),
    ]);
    let specific = match app.tab {
        Tab::Notes if app.show_trash => help_line(&[
            ("r", "Restore"),
            ("D", "Delete Forever"),
            ("t", "Back to Notes"),
        ]),
        Tab::Notes => help_line(&[
            ("n", "New"),
            ("Enter", "Edit"),
            ("p", "Pin"),
            ("A", "Archive"),
            ("v", "Show Archived"),
            ("d", "Trash"),
            ("t", "View Trash"),
            ("g", "Quiz"),
            ("e", "Export"),
            ("i", "Import"),
        ]),
        Tab::Flashcards => help_line(&[
            ("n", "New"),
            ("Enter", "Edit"),
            ("d", "Delete"),
            ("s", "Study"),
            ("i", "Import CSV"),
        ]),
        Tab::Quizzes => help_line(&[
            ("n", "New"),
            ("Enter", "Edit"),
            ("s", "Take Quiz"),
            ("d", "Delete"),
        ]),
    };
    vec![specific, common]
}

pub fn draw_browse(f: &mut Frame, app: &App) {
    let layout = calculate_browse_chunks(f.area());

    let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .block(Block::default().borders(Borders::ALL).title("Note Quiz"))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, layout.tabs_area);

    draw_search_bar(f, app, layout.search_area);

    let (items, preview, preview_title): (Vec<ListItem>, Text, String) = match app.tab {
        Tab::Notes => {
            let notes = app.visible_notes();
            let items = if notes.is_empty() {
                vec![empty_item(if app.show_trash {
                    "Trash is empty"
                } else {
                    "No notes. Press n to write one"
                })]
            } else {
                notes.iter().map(|n| note_item(n)).collect()
            };
            match app.selected_note() {
                Some(note) => (items, note_preview(note), note.display_title().to_string()),
                None => (items, Text::default(), "Preview".to_string()),
            }
        }
        Tab::Flashcards => {
            let cards = app.visible_flashcards();
            let items = if cards.is_empty() {
                vec![empty_item("No flashcards")]
            } else {
                cards.iter().map(|c| flashcard_item(c)).collect()
            };
            match app.selected_flashcard() {
                Some(card) => (items, flashcard_preview(card), "Flashcard".to_string()),
                None => (items, Text::default(), "Preview".to_string()),
            }
        }
        Tab::Quizzes => {
            let quizzes = app.visible_quizzes();
            let items = if quizzes.is_empty() {
                vec![empty_item("No quizzes")]
            } else {
                quizzes.iter().map(|q| quiz_item(q)).collect()
            };
            match app.selected_quiz() {
                Some(quiz) => (items, quiz_preview(quiz), quiz.title.clone()),
                None => (items, Text::default(), "Preview".to_string()),
            }
        }
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(app.tab.title()),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, layout.list_area, &mut state);

    let preview = Paragraph::new(preview)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(preview_title));
    f.render_widget(preview, layout.preview_area);

    let status = match &app.status {
        Some(message) => Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        )),
        None => Line::from(Span::styled(
            format!(
                "{} notes  {} flashcards  {} quizzes",
                app.notes.len(),
                app.flashcards.len(),
                app.quizzes.len()
            ),
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(status), layout.status_area);

    let help_area = layout.help_area;
    f.render_widget(help_paragraph(help_for(app)), help_area);
}
