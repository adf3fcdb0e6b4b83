use super::{from_json, now, to_json};
use crate::models::Quiz;
use crate::quizgen::Question;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Result, Row};

const QUIZ_COLUMNS: &str = "id, title, questions, source_note_id, deleted, created_at, updated_at";

#[derive(Debug, Clone, Default)]
pub struct QuizPatch {
    pub title: Option<String>,
    pub questions: Option<Vec<Question>>,
}

fn quiz_from_row(row: &Row<'_>) -> Result<Quiz> {
    let questions: String = row.get(2)?;
    Ok(Quiz {
        id: row.get(0)?,
        title: row.get(1)?,
        questions: from_json(2, &questions)?,
        source_note_id: row.get(3)?,
        deleted: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

pub fn create_quiz(
    conn: &Connection,
    title: &str,
    questions: &[Question],
    source_note_id: Option<u64>,
) -> Result<Quiz> {
    let created_at = now();
    let questions_json = to_json(&questions)?;

    conn.execute(
        "INSERT INTO quizzes (title, questions, source_note_id, deleted, created_at, updated_at)
         VALUES (?, ?, ?, 0, ?, ?)",
        rusqlite::params![title, questions_json, source_note_id, created_at, created_at],
    )?;

    Ok(Quiz {
        id: conn.last_insert_rowid() as u64,
        title: title.to_string(),
        questions: questions.to_vec(),
        source_note_id,
        deleted: false,
        created_at,
        updated_at: created_at,
    })
}

pub fn get_quiz(conn: &Connection, id: u64) -> Result<Option<Quiz>> {
    conn.query_row(
        &format!("SELECT {} FROM quizzes WHERE id = ?", QUIZ_COLUMNS),
        [id],
        quiz_from_row,
    )
    .optional()
}

pub fn update_quiz(conn: &Connection, id: u64, patch: &QuizPatch) -> Result<bool> {
    let mut sets: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(title) = &patch.title {
        sets.push("title = ?");
        values.push(Value::Text(title.clone()));
    }
    if let Some(questions) = &patch.questions {
        sets.push("questions = ?");
        values.push(Value::Text(to_json(questions)?));
    }
    sets.push("updated_at = ?");
    values.push(Value::Integer(now() as i64));
    values.push(Value::Integer(id as i64));

    let sql = format!("UPDATE quizzes SET {} WHERE id = ?", sets.join(", "));
    let changed = conn.execute(&sql, rusqlite::params_from_iter(values))?;
    Ok(changed > 0)
}

pub fn delete_quiz(conn: &Connection, id: u64, soft: bool) -> Result<bool> {
    let changed = if soft {
        conn.execute(
            "UPDATE quizzes SET deleted = 1, updated_at = ? WHERE id = ?",
            rusqlite::params![now(), id],
        )?
    } else {
        conn.execute("DELETE FROM quizzes WHERE id = ?", [id])?
    };
    Ok(changed > 0)
}

pub fn list_quizzes(conn: &Connection) -> Result<Vec<Quiz>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM quizzes WHERE deleted = 0 ORDER BY updated_at DESC, id DESC",
        QUIZ_COLUMNS
    ))?;

    let quizzes = stmt
        .query_map([], quiz_from_row)?
        .collect::<Result<Vec<_>>>()?;

    Ok(quizzes)
}

/// The quiz generated from `note_id`, including a soft-deleted one.
pub fn find_quiz_for_note(conn: &Connection, note_id: u64) -> Result<Option<Quiz>> {
    conn.query_row(
        &format!(
            "SELECT {} FROM quizzes WHERE source_note_id = ? ORDER BY id LIMIT 1",
            QUIZ_COLUMNS
        ),
        [note_id],
        quiz_from_row,
    )
    .optional()
}

/// Replace the note's generated quiz, creating it on first use. A previously
/// deleted quiz is revived.
pub fn upsert_note_quiz(
    conn: &Connection,
    note_id: u64,
    title: &str,
    questions: &[Question],
) -> Result<Quiz> {
    let Some(existing) = find_quiz_for_note(conn, note_id)? else {
        return create_quiz(conn, title, questions, Some(note_id));
    };

    let updated_at = now();
    conn.execute(
        "UPDATE quizzes SET title = ?, questions = ?, deleted = 0, updated_at = ? WHERE id = ?",
        rusqlite::params![title, to_json(&questions)?, updated_at, existing.id],
    )?;

    Ok(Quiz {
        title: title.to_string(),
        questions: questions.to_vec(),
        deleted: false,
        updated_at,
        ..existing
    })
}
