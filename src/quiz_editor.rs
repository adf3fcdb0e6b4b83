use crate::autosave::Debouncer;
use crate::drafts::QuizEditDraft;
use crate::models::Quiz;
use crate::quizgen::Question;
use std::time::{Duration, Instant};

/// Working copy of a quiz's title and questions.
#[derive(Debug, Clone)]
pub struct QuizEditor {
    pub quiz_id: u64,
    pub title: String,
    pub questions: Vec<Question>,
    pub selected: usize,
    pub autosave: Debouncer,
    pub dirty: bool,
}

impl QuizEditor {
    pub fn open(quiz: &Quiz, draft: Option<QuizEditDraft>, delay: Duration) -> Self {
        let (title, questions, dirty) = match draft {
            Some(d) if d.title != quiz.title || d.questions != quiz.questions => {
                (d.title, d.questions, true)
            }
            _ => (quiz.title.clone(), quiz.questions.clone(), false),
        };

        Self {
            quiz_id: quiz.id,
            title,
            questions,
            selected: 0,
            autosave: Debouncer::new(delay),
            dirty,
        }
    }

    pub fn draft(&self) -> QuizEditDraft {
        QuizEditDraft {
            title: self.title.clone(),
            questions: self.questions.clone(),
        }
    }

    pub fn selected_question(&self) -> Option<&Question> {
        self.questions.get(self.selected)
    }

    fn changed(&mut self, now: Instant) {
        self.dirty = true;
        self.autosave.touch(now);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.questions.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn add_question(&mut self, question: Question, now: Instant) {
        self.questions.push(question);
        self.selected = self.questions.len() - 1;
        self.changed(now);
    }

    pub fn replace_question(&mut self, idx: usize, question: Question, now: Instant) -> bool {
        match self.questions.get_mut(idx) {
            Some(slot) => {
                *slot = question;
                self.changed(now);
                true
            }
            None => false,
        }
    }

    pub fn remove_selected(&mut self, now: Instant) -> Option<Question> {
        if self.selected >= self.questions.len() {
            return None;
        }
        let removed = self.questions.remove(self.selected);
        if self.selected >= self.questions.len() {
            self.selected = self.questions.len().saturating_sub(1);
        }
        self.changed(now);
        Some(removed)
    }

    pub fn rename(&mut self, title: String, now: Instant) {
        self.title = title;
        self.changed(now);
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz() -> Quiz {
        Quiz {
            id: 7,
            title: "Cells".to_string(),
            questions: vec![Question::blank(), Question::blank()],
            source_note_id: None,
            deleted: false,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn question(text: &str) -> Question {
        Question {
            text: text.to_string(),
            ..Question::blank()
        }
    }

    const DELAY: Duration = Duration::from_millis(600);

    #[test]
    fn test_add_replace_remove() {
        let now = Instant::now();
        let mut editor = QuizEditor::open(&quiz(), None, DELAY);
        assert!(!editor.dirty);

        editor.add_question(question("third"), now);
        assert_eq!(editor.selected, 2);
        assert!(editor.dirty);
        assert!(editor.autosave.is_pending());

        assert!(editor.replace_question(0, question("first"), now));
        assert!(!editor.replace_question(9, question("nope"), now));

        let removed = editor.remove_selected(now).unwrap();
        assert_eq!(removed.text, "third");
        assert_eq!(editor.selected, 1);
        assert_eq!(editor.questions.len(), 2);
        assert_eq!(editor.questions[0].text, "first");
    }

    #[test]
    fn test_remove_from_empty() {
        let mut editor = QuizEditor::open(
            &Quiz {
                questions: vec![],
                ..quiz()
            },
            None,
            DELAY,
        );
        assert!(editor.remove_selected(Instant::now()).is_none());
        assert!(!editor.dirty);
    }

    #[test]
    fn test_selection_bounds() {
        let mut editor = QuizEditor::open(&quiz(), None, DELAY);
        editor.select_previous();
        assert_eq!(editor.selected, 0);
        editor.select_next();
        editor.select_next();
        assert_eq!(editor.selected, 1);
    }

    #[test]
    fn test_draft_restore() {
        let draft = QuizEditDraft {
            title: "Cells v2".to_string(),
            questions: vec![],
        };
        let editor = QuizEditor::open(&quiz(), Some(draft.clone()), DELAY);
        assert!(editor.dirty);
        assert_eq!(editor.draft(), draft);

        let mut editor = QuizEditor::open(&quiz(), None, DELAY);
        editor.rename("Renamed".to_string(), Instant::now());
        assert_eq!(editor.title, "Renamed");
        editor.mark_saved();
        assert!(!editor.dirty);
    }
}
