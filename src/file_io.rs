use crate::models::Note;
use crate::text::html_to_text;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub fn export_note_to_markdown(note: &Note) -> String {
    let text = html_to_text(&note.content);
    format!("# {}\n\n{}\n", note.title, text.trim())
}

/// File stem for an exported note: lowercase words joined by `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::new();
    for ch in title.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            slug.push(ch);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Write `note` as `<slug>.md` under `dir` and return the written path.
pub fn export_note(dir: &Path, note: &Note) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let mut stem = slugify(&note.title);
    if stem.is_empty() {
        stem = format!("note-{}", note.id);
    }
    let path = dir.join(format!("{}.md", stem));

    fs::write(&path, export_note_to_markdown(note))?;
    Ok(path)
}

pub fn read_markdown(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}

pub fn get_markdown_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
                files.push(path);
            }
        }
    }

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(title: &str, content: &str) -> Note {
        Note {
            id: 9,
            title: title.to_string(),
            content: content.to_string(),
            tags: vec![],
            pinned: false,
            archived: false,
            deleted: false,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_export_note_to_markdown() {
        let md = export_note_to_markdown(&note("Cells", "<p>One.</p><p>Two.</p>"));
        assert_eq!(md, "# Cells\n\nOne.\n\nTwo.\n");
    }

    #[test]
    fn test_export_keeps_markdown_body() {
        let md = export_note_to_markdown(&note("List", "- a\n- b\n"));
        assert_eq!(md, "# List\n\n- a\n- b\n");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Cell Biology: Part 1!"), "cell-biology-part-1");
        assert_eq!(slugify("  ***  "), "");
    }

    #[test]
    fn test_export_note_writes_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let out = temp_dir.path().join("exports");

        let path = export_note(&out, &note("My Note", "Body text.")).unwrap();
        assert!(path.ends_with("my-note.md"));
        assert_eq!(read_markdown(&path).unwrap(), "# My Note\n\nBody text.\n");

        let untitled = export_note(&out, &note("", "x")).unwrap();
        assert!(untitled.ends_with("note-9.md"));
    }

    #[test]
    fn test_get_markdown_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("b.md"), "# B").unwrap();
        fs::write(temp_dir.path().join("a.md"), "# A").unwrap();
        fs::write(temp_dir.path().join("c.txt"), "C").unwrap();

        let files = get_markdown_files(temp_dir.path());
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.md"));
        assert!(get_markdown_files(&temp_dir.path().join("missing")).is_empty());
    }
}
