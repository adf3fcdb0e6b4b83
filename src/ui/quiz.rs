use super::{header_paragraph, help_line, help_paragraph};
use crate::app::App;
use crate::quizgen::Question;
use crate::session::QuizStudy;
use crate::text::truncate_string;
use crate::ui::layout::calculate_study_chunks;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

fn question_detail(question: &Question) -> Text<'static> {
    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        question.text.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    for (i, option) in question.options.iter().enumerate() {
        let style = if *option == question.answer {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        text.push_line(Line::from(Span::styled(format!("{}. {}", i + 1, option), style)));
    }
    text.push_line(Line::from(""));
    text.push_line(Line::from(vec![
        Span::styled("Answer: ", Style::default().fg(Color::DarkGray)),
        Span::styled(question.answer.clone(), Style::default().fg(Color::Green)),
    ]));
    text
}

pub fn draw_quiz_editor(f: &mut Frame, app: &App) {
    let Some(editor) = &app.quiz_editor else {
        return;
    };
    let layout = calculate_study_chunks(f.area());

    let marker = if editor.dirty { " *" } else { "" };
    f.render_widget(
        header_paragraph(format!("{}{}", editor.title, marker)),
        layout.header_area,
    );

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(layout.question_area.union(layout.answer_area));

    let items: Vec<ListItem> = if editor.questions.is_empty() {
        vec![ListItem::new("No questions. Press a to add one").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        editor
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| ListItem::new(format!("{}. {}", i + 1, truncate_string(&q.text, 50))))
            .collect()
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!("Questions ({})", editor.questions.len())),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(editor.selected));
    f.render_stateful_widget(list, body[0], &mut state);

    let detail = editor
        .selected_question()
        .map(question_detail)
        .unwrap_or_default();
    let detail = Paragraph::new(detail)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(detail, body[1]);

    let help = help_line(&[
        ("a", "Add"),
        ("Enter", "Edit"),
        ("d", "Delete"),
        ("t", "Rename"),
        ("Esc", "Save & Close"),
    ]);
    f.render_widget(help_paragraph(vec![help]), layout.help_area);
}

fn option_style(study: &QuizStudy, question: &Question, idx: usize) -> Style {
    if !study.revealed {
        return if idx == study.selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
    }

    if question.correct_option() == Some(idx) {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else if idx == study.selected {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn draw_quiz_study(f: &mut Frame, study: &QuizStudy) {
    let Some(question) = study.current_question() else {
        return;
    };
    let layout = calculate_study_chunks(f.area());

    let progress = format!(
        "Question {} / {} - {}",
        study.current + 1,
        study.total(),
        study.title
    );
    f.render_widget(header_paragraph(progress), layout.header_area);

    let prompt = Paragraph::new(question.text.clone())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(prompt, layout.question_area);

    let mut text = Text::default();
    for (i, option) in question.options.iter().enumerate() {
        let pointer = if i == study.selected { "> " } else { "  " };
        text.push_line(Line::from(Span::styled(
            format!("{}{}. {}", pointer, i + 1, option),
            option_style(study, question, i),
        )));
    }

    if study.revealed {
        text.push_line(Line::from(""));
        let result = if study.is_correct(study.current) == Some(true) {
            Span::styled(
                "Correct!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                format!("Incorrect. The answer is {}", question.answer),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        };
        text.push_line(Line::from(result));
    }

    let title = if study.revealed { "Result" } else { "Choose an Answer" };
    let options = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(options, layout.answer_area);

    let help = if study.revealed {
        help_line(&[("Enter", "Next"), ("Esc", "Quit to Menu")])
    } else {
        help_line(&[
            ("↑/↓", "Select"),
            ("1-4", "Choose"),
            ("Enter", "Submit"),
            ("Esc", "Quit to Menu"),
        ])
    };
    f.render_widget(help_paragraph(vec![help]), layout.help_area);
}
