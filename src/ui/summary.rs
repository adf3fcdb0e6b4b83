use super::{header_paragraph, help_line, help_paragraph};
use crate::session::QuizStudy;
use crate::text::truncate_string;
use crate::ui::layout::calculate_summary_chunks;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn percent(score: usize, total: usize) -> usize {
    if total == 0 {
        0
    } else {
        score * 100 / total
    }
}

pub fn draw_quiz_summary(f: &mut Frame, study: &QuizStudy) {
    let layout = calculate_summary_chunks(f.area());

    f.render_widget(
        header_paragraph(format!("Quiz Summary - {}", study.title)),
        layout.header_area,
    );

    let score = study.score();
    let total = study.total();
    let mut summary_text = Text::default();
    summary_text.push_line(Line::from(Span::styled(
        format!("Score: {} / {} ({}%)", score, total, percent(score, total)),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    summary_text.push_line(Line::from(""));

    for (i, question) in study.questions.iter().enumerate() {
        let (mark, style) = match study.is_correct(i) {
            Some(true) => ("[✓]", Style::default().fg(Color::Green)),
            Some(false) => ("[✗]", Style::default().fg(Color::Red)),
            None => ("[ ]", Style::default().fg(Color::DarkGray)),
        };
        summary_text.push_line(Line::from(vec![
            Span::styled(mark, style),
            Span::from(format!(" {}. {}", i + 1, truncate_string(&question.text, 60))),
        ]));

        if study.is_correct(i) == Some(false) {
            let chosen = study
                .answers
                .get(i)
                .copied()
                .flatten()
                .and_then(|idx| question.options.get(idx))
                .map_or("", String::as_str);
            summary_text.push_line(Line::from(format!(
                "   Your Answer: {}",
                truncate_string(chosen, 56)
            )));
            summary_text.push_line(Line::from(Span::styled(
                format!("   Correct: {}", truncate_string(&question.answer, 56)),
                Style::default().fg(Color::Green),
            )));
        }
    }

    let summary = Paragraph::new(summary_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(summary, layout.content_area);

    let help = help_line(&[("r", "Retry"), ("m", "Main Menu"), ("Esc", "Back")]);
    f.render_widget(help_paragraph(vec![help]), layout.footer_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(4, 4), 100);
    }
}
