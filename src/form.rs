use crate::drafts::FlashcardDraft;
use crate::input::TextBuffer;
use crate::models::{FormPurpose, NewFlashcard};
use crate::quizgen::Question;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub input: TextBuffer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Edited,
    Submit,
    Cancel,
}

/// Popup with labelled single-line fields.
#[derive(Debug, Clone)]
pub struct Form {
    pub title: String,
    pub purpose: FormPurpose,
    pub fields: Vec<FormField>,
    pub focused: usize,
    pub error: Option<String>,
}

const OPTION_LABELS: [&str; 4] = ["Option 1", "Option 2", "Option 3", "Option 4"];

impl Form {
    pub fn new(title: &str, purpose: FormPurpose, fields: &[(&'static str, &str)]) -> Self {
        Self {
            title: title.to_string(),
            purpose,
            fields: fields
                .iter()
                .map(|&(label, value)| FormField {
                    label,
                    input: TextBuffer::new(value),
                })
                .collect(),
            focused: 0,
            error: None,
        }
    }

    pub fn flashcard(purpose: FormPurpose, draft: &FlashcardDraft) -> Self {
        let title = match purpose {
            FormPurpose::EditFlashcard(_) => "Edit Flashcard",
            _ => "New Flashcard",
        };
        Self::new(
            title,
            purpose,
            &[
                ("Front", draft.front.as_str()),
                ("Back", draft.back.as_str()),
                ("Tags (comma separated)", draft.tags.as_str()),
            ],
        )
    }

    pub fn question(purpose: FormPurpose, question: &Question) -> Self {
        let option = |i: usize| question.options.get(i).map_or("", String::as_str);
        let title = match purpose {
            FormPurpose::NewQuestion => "New Question",
            _ => "Edit Question",
        };
        Self::new(
            title,
            purpose,
            &[
                ("Question", question.text.as_str()),
                (OPTION_LABELS[0], option(0)),
                (OPTION_LABELS[1], option(1)),
                (OPTION_LABELS[2], option(2)),
                (OPTION_LABELS[3], option(3)),
                ("Answer (text or 1-4)", question.answer.as_str()),
            ],
        )
    }

    pub fn rename(current: &str) -> Self {
        Self::new("Rename Quiz", FormPurpose::RenameQuiz, &[("Title", current)])
    }

    pub fn value(&self, idx: usize) -> &str {
        self.fields.get(idx).map_or("", |f| f.input.text())
    }

    pub fn focused_field(&self) -> Option<&FormField> {
        self.fields.get(self.focused)
    }

    fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    fn previous_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Esc => FormAction::Cancel,
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                FormAction::Submit
            }
            KeyCode::Tab | KeyCode::Down => {
                self.next_field();
                FormAction::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.previous_field();
                FormAction::None
            }
            KeyCode::Enter => {
                if self.focused + 1 >= self.fields.len() {
                    FormAction::Submit
                } else {
                    self.next_field();
                    FormAction::None
                }
            }
            _ => {
                let focused = self.focused;
                let edited = self
                    .fields
                    .get_mut(focused)
                    .is_some_and(|field| field.input.handle_key(key));
                if edited {
                    self.error = None;
                    FormAction::Edited
                } else {
                    FormAction::None
                }
            }
        }
    }

    pub fn flashcard_draft(&self) -> FlashcardDraft {
        FlashcardDraft {
            front: self.value(0).to_string(),
            back: self.value(1).to_string(),
            tags: self.value(2).to_string(),
        }
    }

    pub fn to_flashcard(&self) -> Result<NewFlashcard, String> {
        let front = self.value(0).trim();
        let back = self.value(1).trim();
        if front.is_empty() || back.is_empty() {
            return Err("Front and back are required".to_string());
        }

        let tags = self
            .value(2)
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        Ok(NewFlashcard {
            front: front.to_string(),
            back: back.to_string(),
            tags,
        })
    }

    pub fn to_question(&self) -> Result<Question, String> {
        let options: Vec<String> = (1..=4).map(|i| self.value(i).trim().to_string()).collect();
        let raw_answer = self.value(5).trim();

        let answer = match raw_answer.parse::<usize>() {
            Ok(n) if (1..=4).contains(&n) && !options.contains(&raw_answer.to_string()) => {
                options[n - 1].clone()
            }
            _ => raw_answer.to_string(),
        };

        let question = Question {
            text: self.value(0).trim().to_string(),
            options,
            answer,
        };

        if question.text.is_empty() {
            return Err("Question text is required".to_string());
        }
        if question.options.iter().any(|o| o.is_empty()) {
            return Err("All four options are required".to_string());
        }
        if !question.is_valid() {
            return Err("Answer must match one of the options".to_string());
        }
        Ok(question)
    }

    pub fn single_value(&self) -> Result<String, String> {
        let value = self.value(0).trim();
        if value.is_empty() {
            Err(format!("{} is required", self.fields.first().map_or("Value", |f| f.label)))
        } else {
            Ok(value.to_string())
        }
    }
}
