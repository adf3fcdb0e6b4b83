use crate::quizgen::Question;

#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub pinned: bool,
    pub archived: bool,
    pub deleted: bool,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Note {
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub pinned: bool,
    pub archived: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Flashcard {
    pub id: u64,
    pub front: String,
    pub back: String,
    pub tags: Vec<String>,
    pub score: u8,
    pub mastered: bool,
    pub deleted: bool,
    pub created_at: u64,
    pub updated_at: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewFlashcard {
    pub front: String,
    pub back: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Quiz {
    pub id: u64,
    pub title: String,
    pub questions: Vec<Question>,
    /// Set for quizzes kept in sync with a note by the quiz trigger.
    pub source_note_id: Option<u64>,
    pub deleted: bool,
    pub created_at: u64,
    pub updated_at: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Notes,
    Flashcards,
    Quizzes,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Notes, Tab::Flashcards, Tab::Quizzes];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Notes => "Notes",
            Tab::Flashcards => "Flashcards",
            Tab::Quizzes => "Quizzes",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Notes => 0,
            Tab::Flashcards => 1,
            Tab::Quizzes => 2,
        }
    }

    pub fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn previous(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    /// Soft delete into the trash.
    Note(u64),
    /// Permanent delete from the trash.
    NoteForever(u64),
    Flashcard(u64),
    Quiz(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPurpose {
    NewFlashcard,
    EditFlashcard(u64),
    NewQuestion,
    /// Index into the quiz editor's question list.
    EditQuestion(usize),
    RenameQuiz,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Browse,
    Search,
    NoteEditor,
    Form,
    QuizEditor,
    QuizStudy,
    QuizSummary,
    CardStudy,
    ConfirmDelete,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::Notes.next(), Tab::Flashcards);
        assert_eq!(Tab::Quizzes.next(), Tab::Notes);
        assert_eq!(Tab::Notes.previous(), Tab::Quizzes);
    }

    #[test]
    fn test_display_title_falls_back() {
        let note = Note {
            id: 1,
            title: "  ".to_string(),
            content: String::new(),
            tags: vec![],
            pinned: false,
            archived: false,
            deleted: false,
            created_at: 0,
            updated_at: 0,
        };
        assert_eq!(note.display_title(), "Untitled");
    }
}
