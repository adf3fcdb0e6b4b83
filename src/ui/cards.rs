use super::{header_paragraph, help_line, help_paragraph};
use crate::db::flashcard::MAX_SCORE;
use crate::session::CardStudy;
use crate::ui::layout::calculate_study_chunks;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn draw_complete(f: &mut Frame, study: &CardStudy) {
    let layout = calculate_study_chunks(f.area());
    f.render_widget(header_paragraph("Review Complete".to_string()), layout.header_area);

    let mut text = Text::default();
    text.push_line(Line::from(format!("Cards reviewed: {}", study.cards.len())));
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        format!("Good: {}", study.good),
        Style::default().fg(Color::Green),
    )));
    text.push_line(Line::from(Span::styled(
        format!("Again: {}", study.again),
        Style::default().fg(Color::Red),
    )));
    let mastered = study.cards.iter().filter(|c| c.mastered).count();
    text.push_line(Line::from(format!("Mastered: {}", mastered)));

    let summary = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(summary, layout.question_area.union(layout.answer_area));

    let help = help_line(&[("r", "Review Again"), ("Enter", "Back")]);
    f.render_widget(help_paragraph(vec![help]), layout.help_area);
}

pub fn draw_card_study(f: &mut Frame, study: &CardStudy) {
    if study.complete {
        draw_complete(f, study);
        return;
    }
    let Some(card) = study.current_card() else {
        return;
    };
    let layout = calculate_study_chunks(f.area());

    let progress = format!(
        "Card {} / {} - Score {}/{}",
        study.current + 1,
        study.cards.len(),
        card.score,
        MAX_SCORE
    );
    f.render_widget(header_paragraph(progress), layout.header_area);

    let front = Paragraph::new(card.front.clone())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Front"));
    f.render_widget(front, layout.question_area);

    let back = if study.flipped {
        Paragraph::new(card.back.clone())
    } else {
        Paragraph::new(Span::styled(
            "[Space to flip]",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
    };
    let back = back
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Back"));
    f.render_widget(back, layout.answer_area);

    let help = if study.flipped {
        help_line(&[
            ("g", "Good"),
            ("a", "Again"),
            ("Space", "Flip"),
            ("←/→", "Navigate"),
            ("Esc", "Quit to Menu"),
        ])
    } else {
        help_line(&[
            ("Space", "Flip"),
            ("←/→", "Navigate"),
            ("Esc", "Quit to Menu"),
        ])
    };
    f.render_widget(help_paragraph(vec![help]), layout.help_area);
}
