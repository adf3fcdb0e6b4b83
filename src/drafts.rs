use crate::logger;
use crate::quizgen::Question;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftKind {
    Note,
    Quiz,
    Flashcard,
}

impl DraftKind {
    fn prefix(&self) -> &'static str {
        match self {
            DraftKind::Note => "note_draft",
            DraftKind::Quiz => "quiz_draft",
            DraftKind::Flashcard => "flash_draft",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizEditDraft {
    pub title: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlashcardDraft {
    pub front: String,
    pub back: String,
    pub tags: String,
}

/// Unsaved editor state, one JSON file per record under `dir`.
#[derive(Debug, Clone)]
pub struct DraftStore {
    dir: PathBuf,
}

impl DraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn key(kind: DraftKind, id: u64) -> String {
        format!("{}_{}", kind.prefix(), id)
    }

    fn path(&self, kind: DraftKind, id: u64) -> PathBuf {
        self.dir.join(format!("{}.json", Self::key(kind, id)))
    }

    pub fn save<T: Serialize>(&self, kind: DraftKind, id: u64, draft: &T) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string(draft).map_err(io::Error::other)?;
        fs::write(self.path(kind, id), json)
    }

    /// The stored draft, or `None` when it is missing or unreadable.
    pub fn get<T: DeserializeOwned>(&self, kind: DraftKind, id: u64) -> Option<T> {
        let path = self.path(kind, id);
        let raw = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(draft) => Some(draft),
            Err(e) => {
                logger::log(&format!("Ignoring corrupt draft {}: {}", path.display(), e));
                None
            }
        }
    }

    pub fn load<T: DeserializeOwned + Default>(&self, kind: DraftKind, id: u64) -> T {
        self.get(kind, id).unwrap_or_default()
    }

    pub fn remove(&self, kind: DraftKind, id: u64) -> io::Result<()> {
        match fs::remove_file(self.path(kind, id)) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
