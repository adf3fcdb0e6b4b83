use super::{from_json, now, to_json};
use crate::models::{Flashcard, NewFlashcard};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Result, Row};

pub const MAX_SCORE: u8 = 5;
pub const MASTERED_THRESHOLD: u8 = 4;

const FLASHCARD_COLUMNS: &str =
    "id, front, back, tags, score, mastered, deleted, created_at, updated_at";

#[derive(Debug, Clone, Default)]
pub struct FlashcardPatch {
    pub front: Option<String>,
    pub back: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// One review step: a correct answer moves the score up, a miss moves it down.
pub fn adjust_score(score: u8, correct: bool) -> u8 {
    if correct {
        score.saturating_add(1).min(MAX_SCORE)
    } else {
        score.saturating_sub(1)
    }
}

fn flashcard_from_row(row: &Row<'_>) -> Result<Flashcard> {
    let tags: String = row.get(3)?;
    Ok(Flashcard {
        id: row.get(0)?,
        front: row.get(1)?,
        back: row.get(2)?,
        tags: from_json(3, &tags)?,
        score: row.get(4)?,
        mastered: row.get(5)?,
        deleted: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

pub fn create_flashcard(conn: &Connection, new: &NewFlashcard) -> Result<Flashcard> {
    let created_at = now();
    let tags = to_json(&new.tags)?;

    conn.execute(
        "INSERT INTO flashcards (front, back, tags, score, mastered, deleted, created_at, updated_at)
         VALUES (?, ?, ?, 0, 0, 0, ?, ?)",
        rusqlite::params![new.front, new.back, tags, created_at, created_at],
    )?;

    Ok(Flashcard {
        id: conn.last_insert_rowid() as u64,
        front: new.front.clone(),
        back: new.back.clone(),
        tags: new.tags.clone(),
        score: 0,
        mastered: false,
        deleted: false,
        created_at,
        updated_at: created_at,
    })
}

pub fn get_flashcard(conn: &Connection, id: u64) -> Result<Option<Flashcard>> {
    conn.query_row(
        &format!("SELECT {} FROM flashcards WHERE id = ?", FLASHCARD_COLUMNS),
        [id],
        flashcard_from_row,
    )
    .optional()
}

pub fn update_flashcard(conn: &Connection, id: u64, patch: &FlashcardPatch) -> Result<bool> {
    let mut sets: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(front) = &patch.front {
        sets.push("front = ?");
        values.push(Value::Text(front.clone()));
    }
    if let Some(back) = &patch.back {
        sets.push("back = ?");
        values.push(Value::Text(back.clone()));
    }
    if let Some(tags) = &patch.tags {
        sets.push("tags = ?");
        values.push(Value::Text(to_json(tags)?));
    }
    sets.push("updated_at = ?");
    values.push(Value::Integer(now() as i64));
    values.push(Value::Integer(id as i64));

    let sql = format!("UPDATE flashcards SET {} WHERE id = ?", sets.join(", "));
    let changed = conn.execute(&sql, rusqlite::params_from_iter(values))?;
    Ok(changed > 0)
}

/// `soft` marks the card deleted; otherwise the row is removed.
pub fn delete_flashcard(conn: &Connection, id: u64, soft: bool) -> Result<bool> {
    let changed = if soft {
        conn.execute(
            "UPDATE flashcards SET deleted = 1, updated_at = ? WHERE id = ?",
            rusqlite::params![now(), id],
        )?
    } else {
        conn.execute("DELETE FROM flashcards WHERE id = ?", [id])?
    };
    Ok(changed > 0)
}

pub fn list_flashcards(conn: &Connection) -> Result<Vec<Flashcard>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM flashcards WHERE deleted = 0 ORDER BY updated_at DESC, id DESC",
        FLASHCARD_COLUMNS
    ))?;

    let cards = stmt
        .query_map([], flashcard_from_row)?
        .collect::<Result<Vec<_>>>()?;

    Ok(cards)
}

/// Record a study answer. Returns the updated card, or `None` if it is gone.
pub fn record_review(conn: &Connection, id: u64, correct: bool) -> Result<Option<Flashcard>> {
    let Some(card) = get_flashcard(conn, id)? else {
        return Ok(None);
    };

    let score = adjust_score(card.score, correct);
    let mastered = score >= MASTERED_THRESHOLD;
    let updated_at = now();

    conn.execute(
        "UPDATE flashcards SET score = ?, mastered = ?, updated_at = ? WHERE id = ?",
        rusqlite::params![score, mastered, updated_at, id],
    )?;

    Ok(Some(Flashcard {
        score,
        mastered,
        updated_at,
        ..card
    }))
}

/// Insert a batch of cards in one transaction.
pub fn import_flashcards(conn: &mut Connection, cards: &[NewFlashcard]) -> Result<usize> {
    let tx = conn.transaction()?;
    for card in cards {
        create_flashcard(&tx, card)?;
    }
    tx.commit()?;
    Ok(cards.len())
}
