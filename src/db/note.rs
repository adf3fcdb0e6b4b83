use super::{from_json, now, to_json};
use crate::models::{NewNote, Note};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Result, Row};

const NOTE_COLUMNS: &str =
    "id, title, content, tags, pinned, archived, deleted, created_at, updated_at";

const IMPORTED_TITLE: &str = "Imported note";
const MAX_IMPORTED_TITLE_CHARS: usize = 120;

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub pinned: Option<bool>,
    pub archived: Option<bool>,
    pub deleted: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListNotes {
    pub include_archived: bool,
    pub include_deleted: bool,
}

fn note_from_row(row: &Row<'_>) -> Result<Note> {
    let tags: String = row.get(3)?;
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        tags: from_json(3, &tags)?,
        pinned: row.get(4)?,
        archived: row.get(5)?,
        deleted: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

pub fn create_note(conn: &Connection, new: &NewNote) -> Result<Note> {
    let created_at = now();
    let tags = to_json(&new.tags)?;

    conn.execute(
        "INSERT INTO notes (title, content, tags, pinned, archived, deleted, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, 0, ?, ?)",
        rusqlite::params![
            new.title,
            new.content,
            tags,
            new.pinned,
            new.archived,
            created_at,
            created_at
        ],
    )?;

    Ok(Note {
        id: conn.last_insert_rowid() as u64,
        title: new.title.clone(),
        content: new.content.clone(),
        tags: new.tags.clone(),
        pinned: new.pinned,
        archived: new.archived,
        deleted: false,
        created_at,
        updated_at: created_at,
    })
}

pub fn get_note(conn: &Connection, id: u64) -> Result<Option<Note>> {
    conn.query_row(
        &format!("SELECT {} FROM notes WHERE id = ?", NOTE_COLUMNS),
        [id],
        note_from_row,
    )
    .optional()
}

/// Apply `patch` and stamp `updated_at`. Returns false when no such note exists.
pub fn update_note(conn: &Connection, id: u64, patch: &NotePatch) -> Result<bool> {
    let mut sets: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(title) = &patch.title {
        sets.push("title = ?");
        values.push(Value::Text(title.clone()));
    }
    if let Some(content) = &patch.content {
        sets.push("content = ?");
        values.push(Value::Text(content.clone()));
    }
    if let Some(tags) = &patch.tags {
        sets.push("tags = ?");
        values.push(Value::Text(to_json(tags)?));
    }
    if let Some(pinned) = patch.pinned {
        sets.push("pinned = ?");
        values.push(Value::Integer(pinned as i64));
    }
    if let Some(archived) = patch.archived {
        sets.push("archived = ?");
        values.push(Value::Integer(archived as i64));
    }
    if let Some(deleted) = patch.deleted {
        sets.push("deleted = ?");
        values.push(Value::Integer(deleted as i64));
    }
    sets.push("updated_at = ?");
    values.push(Value::Integer(now() as i64));
    values.push(Value::Integer(id as i64));

    let sql = format!("UPDATE notes SET {} WHERE id = ?", sets.join(", "));
    let changed = conn.execute(&sql, rusqlite::params_from_iter(values))?;
    Ok(changed > 0)
}

pub fn move_to_trash(conn: &Connection, id: u64) -> Result<bool> {
    update_note(
        conn,
        id,
        &NotePatch {
            deleted: Some(true),
            ..Default::default()
        },
    )
}

pub fn restore_note(conn: &Connection, id: u64) -> Result<bool> {
    update_note(
        conn,
        id,
        &NotePatch {
            deleted: Some(false),
            ..Default::default()
        },
    )
}

pub fn archive_note(conn: &Connection, id: u64) -> Result<bool> {
    update_note(
        conn,
        id,
        &NotePatch {
            archived: Some(true),
            ..Default::default()
        },
    )
}

pub fn unarchive_note(conn: &Connection, id: u64) -> Result<bool> {
    update_note(
        conn,
        id,
        &NotePatch {
            archived: Some(false),
            ..Default::default()
        },
    )
}

pub fn set_pinned(conn: &Connection, id: u64, pinned: bool) -> Result<bool> {
    update_note(
        conn,
        id,
        &NotePatch {
            pinned: Some(pinned),
            ..Default::default()
        },
    )
}

pub fn hard_delete_note(conn: &Connection, id: u64) -> Result<bool> {
    let changed = conn.execute("DELETE FROM notes WHERE id = ?", [id])?;
    Ok(changed > 0)
}

/// Pinned notes first, then most recently updated.
pub fn list_notes(conn: &Connection, opts: ListNotes) -> Result<Vec<Note>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM notes
         WHERE (?1 OR deleted = 0) AND (?2 OR archived = 0)
         ORDER BY pinned DESC, updated_at DESC, id DESC",
        NOTE_COLUMNS
    ))?;

    let notes = stmt
        .query_map(
            rusqlite::params![opts.include_deleted, opts.include_archived],
            note_from_row,
        )?
        .collect::<Result<Vec<_>>>()?;

    Ok(notes)
}

pub fn list_trash(conn: &Connection) -> Result<Vec<Note>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM notes WHERE deleted = 1 ORDER BY updated_at DESC, id DESC",
        NOTE_COLUMNS
    ))?;

    let notes = stmt
        .query_map([], note_from_row)?
        .collect::<Result<Vec<_>>>()?;

    Ok(notes)
}

/// Create a note from markdown text. Without an explicit title a leading
/// `# heading` becomes the title (and is dropped from the body); otherwise the
/// first line is used.
pub fn import_note_from_markdown(
    conn: &Connection,
    markdown: &str,
    title: Option<&str>,
    tags: &[String],
) -> Result<Note> {
    let (derived_title, content) = match title {
        Some(title) => (title.to_string(), markdown.to_string()),
        None => split_markdown_title(markdown),
    };

    let title = if derived_title.trim().is_empty() {
        IMPORTED_TITLE.to_string()
    } else {
        derived_title
            .trim()
            .chars()
            .take(MAX_IMPORTED_TITLE_CHARS)
            .collect()
    };

    create_note(
        conn,
        &NewNote {
            title,
            content,
            tags: tags.to_vec(),
            ..Default::default()
        },
    )
}

fn split_markdown_title(markdown: &str) -> (String, String) {
    let trimmed = markdown.trim_start();
    let (first_line, rest) = trimmed.split_once('\n').unwrap_or((trimmed, ""));

    match first_line.trim().strip_prefix("# ") {
        Some(heading) => (heading.to_string(), rest.trim().to_string()),
        None => (first_line.to_string(), markdown.to_string()),
    }
}
