use crate::autosave::Debouncer;
use crate::drafts::NoteDraft;
use crate::input::TextBuffer;
use crate::models::Note;
use crate::text::word_count;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorFocus {
    Title,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    None,
    /// Text changed; the caller persists a draft.
    Edited,
    Close,
}

/// In-progress edit of one note.
#[derive(Debug, Clone)]
pub struct NoteEditor {
    pub note_id: u64,
    pub title: TextBuffer,
    pub body: TextBuffer,
    pub focus: EditorFocus,
    pub scroll: u16,
    pub autosave: Debouncer,
    /// Changes not yet written to the store.
    pub dirty: bool,
    pub restored_draft: bool,
    pub last_saved: Option<Instant>,
}

impl NoteEditor {
    /// Open `note`, preferring `draft` when it holds unsaved changes.
    pub fn open(note: &Note, draft: Option<NoteDraft>, delay: Duration) -> Self {
        let (title, content, restored) = match draft {
            Some(d) if d.title != note.title || d.content != note.content => {
                (d.title, d.content, true)
            }
            _ => (note.title.clone(), note.content.clone(), false),
        };

        let focus = if title.is_empty() {
            EditorFocus::Title
        } else {
            EditorFocus::Body
        };

        Self {
            note_id: note.id,
            title: TextBuffer::new(&title),
            body: TextBuffer::new(&content),
            focus,
            scroll: 0,
            autosave: Debouncer::new(delay),
            dirty: restored,
            restored_draft: restored,
            last_saved: None,
        }
    }

    pub fn draft(&self) -> NoteDraft {
        NoteDraft {
            title: self.title.text().to_string(),
            content: self.body.text().to_string(),
        }
    }

    pub fn word_count(&self) -> usize {
        word_count(self.body.text())
    }

    pub fn mark_saved(&mut self, now: Instant) {
        self.dirty = false;
        self.restored_draft = false;
        self.last_saved = Some(now);
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> EditorAction {
        let changed = match (key.code, self.focus) {
            (KeyCode::Esc, _) => return EditorAction::Close,
            (KeyCode::Tab | KeyCode::BackTab, EditorFocus::Title) => {
                self.focus = EditorFocus::Body;
                false
            }
            (KeyCode::Tab | KeyCode::BackTab, EditorFocus::Body) => {
                self.focus = EditorFocus::Title;
                false
            }
            (KeyCode::Enter | KeyCode::Down, EditorFocus::Title) => {
                self.focus = EditorFocus::Body;
                false
            }
            (_, EditorFocus::Title) => self.title.handle_key(key),
            (KeyCode::Enter, EditorFocus::Body) => {
                self.body.insert('\n');
                true
            }
            (KeyCode::Up, EditorFocus::Body) => {
                self.body.up();
                false
            }
            (KeyCode::Down, EditorFocus::Body) => {
                self.body.down();
                false
            }
            (_, EditorFocus::Body) => self.body.handle_key(key),
        };

        if changed {
            self.dirty = true;
            self.autosave.touch(now);
            EditorAction::Edited
        } else {
            EditorAction::None
        }
    }
}
