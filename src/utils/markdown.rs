use crate::text::html_to_text;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use regex::Regex;

lazy_static::lazy_static! {
    static ref HEADING: Regex = Regex::new(r"^(#{1,6})\s+(.*)$").unwrap();
    static ref NUMBERED: Regex = Regex::new(r"^(\d+)[.)]\s+(.*)$").unwrap();
    static ref RULE: Regex = Regex::new(r"^(-{3,}|\*{3,}|_{3,})$").unwrap();
    static ref INLINE: Regex = Regex::new(r"\*\*(.+?)\*\*|__(.+?)__|\*(.+?)\*|`([^`]+)`").unwrap();
}

const RULE_WIDTH: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Block<'a> {
    Blank,
    Heading(usize, &'a str),
    Bullet(&'a str),
    Numbered(&'a str, &'a str),
    Quote(&'a str),
    Rule,
    Paragraph(&'a str),
}

fn classify(line: &str) -> Block<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Block::Blank;
    }
    if RULE.is_match(trimmed) {
        return Block::Rule;
    }
    if let Some(caps) = HEADING.captures(trimmed) {
        let level = caps.get(1).map_or(1, |m| m.as_str().len());
        let text = caps.get(2).map_or("", |m| m.as_str());
        return Block::Heading(level, text);
    }
    if let Some(item) = ["- ", "* ", "+ "]
        .iter()
        .find_map(|marker| trimmed.strip_prefix(marker))
    {
        return Block::Bullet(item);
    }
    if let Some(caps) = NUMBERED.captures(trimmed) {
        let num = caps.get(1).map_or("", |m| m.as_str());
        let text = caps.get(2).map_or("", |m| m.as_str());
        return Block::Numbered(num, text);
    }
    if let Some(quote) = trimmed.strip_prefix('>') {
        return Block::Quote(quote.trim_start());
    }
    Block::Paragraph(line)
}

fn heading_style(level: usize) -> Style {
    let color = match level {
        1 => Color::Cyan,
        2 => Color::Green,
        _ => Color::Yellow,
    };
    let mut style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    if level == 1 {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

/// Render note content as styled lines for the preview pane.
pub fn render_markdown(content: &str) -> Vec<Line<'static>> {
    let text = html_to_text(content);

    text.lines()
        .map(|line| match classify(line) {
            Block::Blank => Line::from(""),
            Block::Rule => Line::from(Span::styled(
                "─".repeat(RULE_WIDTH),
                Style::default().fg(Color::DarkGray),
            )),
            Block::Heading(level, heading) => {
                Line::from(Span::styled(heading.to_string(), heading_style(level)))
            }
            Block::Bullet(item) => {
                let mut spans = vec![Span::from("  • ")];
                spans.extend(parse_inline(item));
                Line::from(spans)
            }
            Block::Numbered(num, item) => {
                let mut spans = vec![Span::from(format!("  {}. ", num))];
                spans.extend(parse_inline(item));
                Line::from(spans)
            }
            Block::Quote(quote) => {
                let quote_style = Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC);
                let mut spans = vec![Span::styled("│ ", Style::default().fg(Color::DarkGray))];
                spans.extend(
                    parse_inline(quote)
                        .into_iter()
                        .map(|span| span.patch_style(quote_style)),
                );
                Line::from(spans)
            }
            Block::Paragraph(paragraph) => Line::from(parse_inline(paragraph)),
        })
        .collect()
}

/// Split `text` into spans for `**bold**`, `__bold__`, `*italic*` and `` `code` ``.
fn parse_inline(text: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in INLINE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            spans.push(Span::from(text[last..whole.start()].to_string()));
        }

        let span = if let Some(bold) = caps.get(1).or(caps.get(2)) {
            Span::styled(
                bold.as_str().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )
        } else if let Some(italic) = caps.get(3) {
            Span::styled(
                italic.as_str().to_string(),
                Style::default().add_modifier(Modifier::ITALIC),
            )
        } else if let Some(code) = caps.get(4) {
            Span::styled(code.as_str().to_string(), Style::default().fg(Color::Magenta))
        } else {
            Span::from(whole.as_str().to_string())
        };
        spans.push(span);
        last = whole.end();
    }

    if last < text.len() || spans.is_empty() {
        spans.push(Span::from(text[last..].to_string()));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(content: &str) -> Vec<String> {
        render_markdown(content)
            .iter()
            .map(|line| line.to_string())
            .collect()
    }

    #[test]
    fn test_plain_and_blank_lines() {
        assert_eq!(rendered("Line 1\n\nLine 2"), vec!["Line 1", "", "Line 2"]);
    }

    #[test]
    fn test_html_content_is_flattened() {
        assert_eq!(rendered("<p>One</p><p>Two</p>"), vec!["One", "", "Two"]);
    }

    #[test]
    fn test_headings_by_level() {
        let lines = render_markdown("# Top\n### Small");
        assert_eq!(lines[0].spans[0].content, "Top");
        assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::UNDERLINED));
        assert_eq!(lines[1].spans[0].content, "Small");
        assert_eq!(lines[1].spans[0].style.fg, Some(Color::Yellow));
    }

    #[test]
    fn test_lists() {
        let lines = rendered("- Item 1\n* Item 2\n1. First\n2) Second");
        assert_eq!(lines[0], "  • Item 1");
        assert_eq!(lines[1], "  • Item 2");
        assert_eq!(lines[2], "  1. First");
        assert_eq!(lines[3], "  2. Second");
    }

    #[test]
    fn test_rule_and_quote() {
        let lines = render_markdown("---\n> wise words");
        assert_eq!(lines[0].to_string(), "─".repeat(RULE_WIDTH));
        assert_eq!(lines[1].to_string(), "│ wise words");
        assert!(lines[1].spans[1].style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn test_inline_styles() {
        let lines = render_markdown("Hello **bold** and *italic* with `code`");
        let spans = &lines[0].spans;
        assert_eq!(spans[0].content, "Hello ");
        assert_eq!(spans[1].content, "bold");
        assert!(spans[1].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(spans[3].content, "italic");
        assert!(spans[3].style.add_modifier.contains(Modifier::ITALIC));
        assert_eq!(spans[5].content, "code");
        assert_eq!(spans.len(), 6);
    }

    #[test]
    fn test_bold_inside_bullet() {
        let lines = render_markdown("- **Important** item");
        assert_eq!(lines[0].to_string(), "  • Important item");
        assert!(lines[0].spans[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_unmatched_marker_kept_verbatim() {
        assert_eq!(rendered("2 * 3 = 6"), vec!["2 * 3 = 6"]);
    }
}
