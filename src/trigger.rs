//! Background quiz generation kept in step with note writes.

use crate::db::{self, note, quiz};
use crate::logger;
use crate::models::{Note, Quiz};
use crate::quizgen;
use crate::text::plain_text;
use crossbeam_channel::{Receiver, Sender};
use rusqlite::{Connection, Result};
use std::io;
use std::path::PathBuf;
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteEvent {
    Written { note_id: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    Generated {
        note_id: u64,
        quiz_id: u64,
        questions: usize,
    },
    Skipped {
        note_id: u64,
    },
    Error {
        note_id: u64,
        error: String,
    },
}

pub fn quiz_title(note: &Note) -> String {
    let title = note.title.trim();
    if title.is_empty() {
        "Quiz from: Untitled Note".to_string()
    } else {
        format!("Quiz from: {}", title)
    }
}

/// Regenerate the quiz linked to `note_id`. Missing, trashed and empty notes
/// are skipped with `Ok(None)`.
pub fn handle_note_written(conn: &Connection, note_id: u64) -> Result<Option<Quiz>> {
    let Some(note) = note::get_note(conn, note_id)? else {
        return Ok(None);
    };
    if note.deleted {
        return Ok(None);
    }

    let text = plain_text(&note.content);
    if text.is_empty() {
        return Ok(None);
    }

    let draft = quizgen::generate(&text);
    let quiz = quiz::upsert_note_quiz(conn, note.id, &quiz_title(&note), &draft.questions)?;
    Ok(Some(quiz))
}

/// One-off quiz from the note's current text, not linked for regeneration.
pub fn create_quiz_from_note(conn: &Connection, note: &Note) -> Result<Option<Quiz>> {
    let text = plain_text(&note.content);
    if text.is_empty() {
        return Ok(None);
    }

    let draft = quizgen::generate(&text);
    quiz::create_quiz(conn, &quiz_title(note), &draft.questions, None).map(Some)
}

/// Start the worker on its own connection to `db_path`. It runs until every
/// sender of `events` is dropped.
pub fn spawn_quiz_worker(
    db_path: PathBuf,
    events: Receiver<NoteEvent>,
    outcomes: Sender<TriggerOutcome>,
) -> io::Result<thread::JoinHandle<()>> {
    let conn = db::open_db(&db_path).map_err(io::Error::other)?;

    thread::Builder::new()
        .name("note-quiz::quiz_worker".to_string())
        .spawn(move || {
            for event in events.iter() {
                let NoteEvent::Written { note_id } = event;
                logger::log(&format!("Quiz worker received write for note {}", note_id));

                let outcome = match handle_note_written(&conn, note_id) {
                    Ok(Some(quiz)) => {
                        logger::log(&format!(
                            "Quiz {} regenerated with {} questions",
                            quiz.id,
                            quiz.questions.len()
                        ));
                        TriggerOutcome::Generated {
                            note_id,
                            quiz_id: quiz.id,
                            questions: quiz.questions.len(),
                        }
                    }
                    Ok(None) => {
                        logger::log(&format!("Note {} has no text to quiz on", note_id));
                        TriggerOutcome::Skipped { note_id }
                    }
                    Err(e) => {
                        logger::log(&format!("Quiz worker error for note {}: {}", note_id, e));
                        TriggerOutcome::Error {
                            note_id,
                            error: e.to_string(),
                        }
                    }
                };

                if outcomes.send(outcome).is_err() {
                    break;
                }
            }
            logger::log("Quiz worker channel disconnected, exiting");
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_connection;
    use crate::models::NewNote;
    use std::time::Duration;

    fn add_note(conn: &Connection, title: &str, content: &str) -> Note {
        note::create_note(
            conn,
            &NewNote {
                title: title.to_string(),
                content: content.to_string(),
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_generates_quiz_for_note() {
        let conn = test_connection();
        let n = add_note(&conn, "Pets", "The cat sat on the mat. The dog ran fast.");

        let quiz = handle_note_written(&conn, n.id).unwrap().unwrap();
        assert_eq!(quiz.title, "Quiz from: Pets");
        assert_eq!(quiz.source_note_id, Some(n.id));
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.questions[1].answer, "dog");
    }

    #[test]
    fn test_untitled_note_title() {
        let conn = test_connection();
        let n = add_note(&conn, " ", "Water boils at sea level.");
        let quiz = handle_note_written(&conn, n.id).unwrap().unwrap();
        assert_eq!(quiz.title, "Quiz from: Untitled Note");
    }

    #[test]
    fn test_skips_missing_empty_and_trashed_notes() {
        let conn = test_connection();
        assert!(handle_note_written(&conn, 99).unwrap().is_none());

        let empty = add_note(&conn, "Empty", "<p> </p>");
        assert!(handle_note_written(&conn, empty.id).unwrap().is_none());

        let trashed = add_note(&conn, "Gone", "Rivers flow.");
        note::move_to_trash(&conn, trashed.id).unwrap();
        assert!(handle_note_written(&conn, trashed.id).unwrap().is_none());

        assert!(quiz::list_quizzes(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_rewrites_replace_existing_quiz() {
        let conn = test_connection();
        let n = add_note(&conn, "Pets", "The cat sat.");
        let first = handle_note_written(&conn, n.id).unwrap().unwrap();

        note::update_note(
            &conn,
            n.id,
            &note::NotePatch {
                content: Some("The cat sat. The dog ran. Birds sing.".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        let second = handle_note_written(&conn, n.id).unwrap().unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.questions.len(), 3);
        assert_eq!(quiz::list_quizzes(&conn).unwrap().len(), 1);
    }

    #[test]
    fn test_manual_quiz_is_unlinked() {
        let conn = test_connection();
        let n = add_note(&conn, "Pets", "The cat sat.");
        let quiz = create_quiz_from_note(&conn, &n).unwrap().unwrap();
        assert_eq!(quiz.source_note_id, None);
        assert!(create_quiz_from_note(&conn, &add_note(&conn, "E", "")).unwrap().is_none());
    }

    #[test]
    fn test_worker_processes_events() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("nq.db");
        let conn = db::open_db(&db_path).unwrap();
        let n = add_note(&conn, "Space", "The moon orbits the earth.");

        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        let (outcome_tx, outcome_rx) = crossbeam_channel::unbounded();
        let handle = spawn_quiz_worker(db_path, event_rx, outcome_tx).unwrap();

        event_tx.send(NoteEvent::Written { note_id: n.id }).unwrap();
        event_tx.send(NoteEvent::Written { note_id: 404 }).unwrap();

        let first = outcome_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(
            first,
            TriggerOutcome::Generated { note_id, questions: 1, .. } if note_id == n.id
        ));
        let second = outcome_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(second, TriggerOutcome::Skipped { note_id: 404 });

        drop(event_tx);
        handle.join().unwrap();

        let quizzes = quiz::list_quizzes(&conn).unwrap();
        assert_eq!(quizzes.len(), 1);
        assert_eq!(quizzes[0].source_note_id, Some(n.id));
    }
}
