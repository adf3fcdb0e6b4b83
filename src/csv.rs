use crate::models::NewFlashcard;
use std::fs;
use std::path::{Path, PathBuf};

pub fn get_csv_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if dir.is_dir()
        && let Ok(entries) = fs::read_dir(dir)
    {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "csv") {
                files.push(path);
            }
        }
    }

    files.sort();
    files
}

pub fn load_csv(path: &Path) -> std::io::Result<Vec<NewFlashcard>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_deck(&content))
}

/// Rows are `front,back[,tags]` with tags separated by `;`. A leading
/// `front,back` header and rows missing either side are skipped.
pub fn parse_deck(content: &str) -> Vec<NewFlashcard> {
    let mut cards = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields = parse_csv_line(line);
        if idx == 0 && is_header(&fields) {
            continue;
        }

        let mut fields = fields.into_iter();
        let front = fields.next().unwrap_or_default();
        let back = fields.next().unwrap_or_default();
        if front.trim().is_empty() || back.trim().is_empty() {
            continue;
        }

        let tags = fields
            .next()
            .map(|raw| {
                raw.split(';')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        cards.push(NewFlashcard {
            front: front.trim().to_string(),
            back: back.trim().to_string(),
            tags,
        });
    }

    cards
}

fn is_header(fields: &[String]) -> bool {
    fields.len() >= 2
        && fields[0].trim().eq_ignore_ascii_case("front")
        && fields[1].trim().eq_ignore_ascii_case("back")
}

/// Split one CSV line. Quoted fields may contain commas, and `""` inside
/// quotes is an escaped quote.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.is_empty() => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(line: &str) -> Vec<String> {
        parse_csv_line(line)
    }

    #[test]
    fn test_parse_csv_simple() {
        assert_eq!(fields("What is 2+2?,Four"), vec!["What is 2+2?", "Four"]);
    }

    #[test]
    fn test_parse_csv_with_quotes() {
        assert_eq!(fields("\"What is 2+2?\",\"Four\""), vec!["What is 2+2?", "Four"]);
    }

    #[test]
    fn test_parse_csv_with_commas_in_fields() {
        assert_eq!(
            fields("\"What is 2+2, 3+3?\",\"Four, or 4\""),
            vec!["What is 2+2, 3+3?", "Four, or 4"]
        );
    }

    #[test]
    fn test_parse_csv_with_escaped_quotes() {
        let line = "\"What is \"\"quoted\"\"?\",\"Answer with \"\"quotes\"\"\"";
        assert_eq!(
            fields(line),
            vec!["What is \"quoted\"?", "Answer with \"quotes\""]
        );
    }

    #[test]
    fn test_parse_csv_empty_fields() {
        assert_eq!(fields(","), vec!["", ""]);
        assert_eq!(fields(""), vec![""]);
    }

    #[test]
    fn test_parse_csv_mixed_quoting() {
        assert_eq!(fields("\"What is 2+2?\",Four"), vec!["What is 2+2?", "Four"]);
        assert_eq!(fields("What is 2+2?,\"Four\""), vec!["What is 2+2?", "Four"]);
    }

    #[test]
    fn test_parse_csv_third_column() {
        assert_eq!(
            fields("Capital of Peru?,Lima,geo;latam"),
            vec!["Capital of Peru?", "Lima", "geo;latam"]
        );
    }

    #[test]
    fn test_parse_deck_skips_blank_and_incomplete_rows() {
        let cards = parse_deck("Q1,A1\n\n,A2\nQ2,\nQ3,A3\n");
        let fronts: Vec<&str> = cards.iter().map(|c| c.front.as_str()).collect();
        assert_eq!(fronts, vec!["Q1", "Q3"]);
    }

    #[test]
    fn test_parse_deck_header_and_tags() {
        let cards = parse_deck("front,back,tags\nCapital of Peru?,Lima, geo ; latam ;\n2+2,4\n");
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].front, "Capital of Peru?");
        assert_eq!(cards[0].tags, vec!["geo".to_string(), "latam".to_string()]);
        assert!(cards[1].tags.is_empty());
    }

    #[test]
    fn test_load_csv_and_list_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("b.csv"), "Q,A\n").unwrap();
        fs::write(temp_dir.path().join("a.csv"), "Q1,A1\nQ2,A2\n").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let files = get_csv_files(temp_dir.path());
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.csv"));

        let cards = load_csv(&files[0]).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].back, "A2");
    }

    #[test]
    fn test_get_csv_files_missing_dir() {
        assert!(get_csv_files(Path::new("/definitely/not/here")).is_empty());
    }
}
