use regex::Regex;
use unicode_width::UnicodeWidthChar;

lazy_static::lazy_static! {
    static ref PARAGRAPH_BREAK: Regex = Regex::new(r"(?i)</p>\s*<p[^>]*>").unwrap();
    static ref LINE_BREAK: Regex = Regex::new(r"(?i)<br\s*/?>").unwrap();
    static ref TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref BLOCK_MARKER: Regex = Regex::new(r"^\s*(#{1,6}\s+|[-*+]\s+|>\s?|\d+[.)]\s+)").unwrap();
    static ref EMPHASIS: Regex = Regex::new(r"\*\*|__|`").unwrap();
}

pub fn strip_html(html: &str) -> String {
    TAG.replace_all(html, "").into_owned()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// HTML markup removed with paragraph and line breaks kept; markdown is left alone.
pub fn html_to_text(content: &str) -> String {
    let text = PARAGRAPH_BREAK.replace_all(content, "\n\n");
    let text = LINE_BREAK.replace_all(&text, "\n");
    decode_entities(&strip_html(&text))
}

/// Note content reduced to the prose a reader would see: tags gone, paragraph
/// breaks kept as blank lines, markdown block markers and emphasis removed.
pub fn plain_text(content: &str) -> String {
    let text = html_to_text(content);

    let lines: Vec<String> = text
        .lines()
        .map(|line| {
            let line = BLOCK_MARKER.replace(line, "");
            EMPHASIS.replace_all(&line, "").trim_end().to_string()
        })
        .collect();

    lines.join("\n").trim().to_string()
}

pub fn word_count(content: &str) -> usize {
    plain_text(content).split_whitespace().count()
}

pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars < 3 {
        return s.chars().take(max_chars).collect();
    }
    let head: String = s.chars().take(max_chars - 3).collect();
    format!("{}...", head)
}

/// One visual line: trimmed text plus the `[start, end)` char range it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Break `text` into visual lines of at most `max_width` columns, splitting at
/// explicit newlines and at the width limit. Trailing whitespace on each line
/// is trimmed. Indices are char indices.
pub fn wrap_lines(text: &str, max_width: usize) -> Vec<WrappedLine> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    let mut line_start = 0;
    let mut char_count = 0;

    for (idx, ch) in text.chars().enumerate() {
        char_count = idx + 1;
        if ch == '\n' {
            lines.push(WrappedLine {
                text: current.trim_end().to_string(),
                start: line_start,
                end: idx,
            });
            current.clear();
            current_width = 0;
            line_start = idx + 1;
            continue;
        }

        let width = ch.width().unwrap_or(1);
        if current_width + width > max_width && current_width > 0 {
            lines.push(WrappedLine {
                text: current.trim_end().to_string(),
                start: line_start,
                end: idx,
            });
            current = ch.to_string();
            current_width = width;
            line_start = idx;
        } else {
            current.push(ch);
            current_width += width;
        }
    }

    if !current.is_empty() || text.ends_with('\n') || lines.is_empty() {
        lines.push(WrappedLine {
            text: current.trim_end().to_string(),
            start: line_start,
            end: char_count,
        });
    }

    lines
}

/// (line, column) of the char index `cursor` once `text` is wrapped with
/// [`wrap_lines`].
pub fn calculate_wrapped_cursor_position(
    text: &str,
    cursor: usize,
    max_width: usize,
) -> (usize, usize) {
    if text.is_empty() || cursor == 0 {
        return (0, 0);
    }

    let lines = wrap_lines(text, max_width);
    for (idx, line) in lines.iter().enumerate() {
        if cursor >= line.start && cursor <= line.end {
            return (idx, cursor - line.start);
        }
    }

    match lines.last() {
        Some(last) => (lines.len() - 1, last.text.chars().count()),
        None => (0, 0),
    }
}
