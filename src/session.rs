use crate::db::flashcard::record_review;
use crate::logger;
use crate::models::{AppState, Flashcard, Quiz};
use crate::quizgen::Question;
use crossterm::event::{KeyCode, KeyEvent};
use rusqlite::Connection;
use std::io;

/// One pass through a quiz's multiple-choice questions.
#[derive(Debug, Clone)]
pub struct QuizStudy {
    pub quiz_id: u64,
    pub title: String,
    pub questions: Vec<Question>,
    pub current: usize,
    pub selected: usize,
    pub revealed: bool,
    /// Chosen option per question, once submitted.
    pub answers: Vec<Option<usize>>,
}

impl QuizStudy {
    /// `None` when the quiz has no answerable questions.
    pub fn new(quiz: &Quiz) -> Option<Self> {
        let questions: Vec<Question> = quiz
            .questions
            .iter()
            .filter(|q| q.is_valid())
            .cloned()
            .collect();
        if questions.is_empty() {
            return None;
        }

        Some(Self {
            quiz_id: quiz.id,
            title: quiz.title.clone(),
            answers: vec![None; questions.len()],
            questions,
            current: 0,
            selected: 0,
            revealed: false,
        })
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn is_correct(&self, idx: usize) -> Option<bool> {
        let chosen = (*self.answers.get(idx)?)?;
        let question = self.questions.get(idx)?;
        Some(question.correct_option() == Some(chosen))
    }

    pub fn score(&self) -> usize {
        (0..self.total())
            .filter(|&i| self.is_correct(i) == Some(true))
            .count()
    }

    pub fn select(&mut self, option: usize) {
        if !self.revealed
            && let Some(question) = self.current_question()
            && option < question.options.len()
        {
            self.selected = option;
        }
    }

    pub fn submit(&mut self) {
        if self.revealed {
            return;
        }
        if let Some(slot) = self.answers.get_mut(self.current) {
            *slot = Some(self.selected);
            self.revealed = true;
        }
    }

    /// Move to the next question. Returns true once past the last one.
    pub fn advance(&mut self) -> bool {
        if self.current + 1 >= self.total() {
            return true;
        }
        self.current += 1;
        self.selected = 0;
        self.revealed = false;
        false
    }

    pub fn restart(&mut self) {
        self.current = 0;
        self.selected = 0;
        self.revealed = false;
        self.answers = vec![None; self.total()];
    }
}

pub fn handle_quiz_study_input(study: &mut QuizStudy, key: KeyEvent, app_state: &mut AppState) {
    if key.code == KeyCode::Esc {
        *app_state = AppState::Browse;
        return;
    }

    if !study.revealed {
        let option_count = study.current_question().map_or(0, |q| q.options.len());
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                study.select(study.selected.saturating_sub(1));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if study.selected + 1 < option_count {
                    study.select(study.selected + 1);
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let option = c as usize - '1' as usize;
                study.select(option);
            }
            KeyCode::Enter => study.submit(),
            _ => {}
        }
    } else {
        match key.code {
            KeyCode::Enter | KeyCode::Right | KeyCode::Char(' ') => {
                if study.advance() {
                    logger::log(&format!(
                        "Quiz {} finished: {}/{}",
                        study.quiz_id,
                        study.score(),
                        study.total()
                    ));
                    *app_state = AppState::QuizSummary;
                }
            }
            _ => {}
        }
    }
}

pub fn handle_quiz_summary_input(study: &mut QuizStudy, key: KeyEvent, app_state: &mut AppState) {
    match key.code {
        KeyCode::Char('r') => {
            study.restart();
            *app_state = AppState::QuizStudy;
        }
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('m') => {
            *app_state = AppState::Browse;
        }
        _ => {}
    }
}

/// Flip-and-grade review over a list of flashcards.
#[derive(Debug, Clone)]
pub struct CardStudy {
    pub cards: Vec<Flashcard>,
    pub current: usize,
    pub flipped: bool,
    pub good: usize,
    pub again: usize,
    pub complete: bool,
}

impl CardStudy {
    pub fn new(cards: Vec<Flashcard>) -> Option<Self> {
        if cards.is_empty() {
            return None;
        }
        Some(Self {
            cards,
            current: 0,
            flipped: false,
            good: 0,
            again: 0,
            complete: false,
        })
    }

    pub fn current_card(&self) -> Option<&Flashcard> {
        self.cards.get(self.current)
    }

    pub fn next(&mut self) {
        if self.current + 1 < self.cards.len() {
            self.current += 1;
            self.flipped = false;
        }
    }

    pub fn previous(&mut self) {
        if self.current > 0 {
            self.current -= 1;
            self.flipped = false;
        }
    }

    pub fn restart(&mut self) {
        self.current = 0;
        self.flipped = false;
        self.good = 0;
        self.again = 0;
        self.complete = false;
    }

    fn review(&mut self, conn: &Connection, correct: bool) -> io::Result<()> {
        let Some(card) = self.current_card() else {
            return Ok(());
        };

        if let Some(updated) = record_review(conn, card.id, correct).map_err(io::Error::other)? {
            self.cards[self.current] = updated;
        }
        if correct {
            self.good += 1;
        } else {
            self.again += 1;
        }

        if self.current + 1 >= self.cards.len() {
            self.complete = true;
        } else {
            self.next();
        }
        Ok(())
    }
}

pub fn handle_card_study_input(
    study: &mut CardStudy,
    key: KeyEvent,
    conn: &Connection,
    app_state: &mut AppState,
) -> io::Result<()> {
    if study.complete {
        match key.code {
            KeyCode::Char('r') => study.restart(),
            KeyCode::Enter | KeyCode::Esc => *app_state = AppState::Browse,
            _ => {}
        }
        return Ok(());
    }

    match key.code {
        KeyCode::Esc => *app_state = AppState::Browse,
        KeyCode::Char(' ') => study.flipped = !study.flipped,
        KeyCode::Left => study.previous(),
        KeyCode::Right => study.next(),
        KeyCode::Char('g') if study.flipped => study.review(conn, true)?,
        KeyCode::Char('a') if study.flipped => study.review(conn, false)?,
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::flashcard::{create_flashcard, get_flashcard};
    use crate::db::test_connection;
    use crate::models::NewFlashcard;
    use crate::quizgen::{FixedPermutation, QuizGenerator};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn quiz_from(text: &str) -> Quiz {
        // answer lands at index 2
        let shuffler = FixedPermutation::new(vec![1, 2, 0, 3]).unwrap();
        let draft = QuizGenerator::new(shuffler).generate(text);
        Quiz {
            id: 1,
            title: "Pets".to_string(),
            questions: draft.questions,
            source_note_id: None,
            deleted: false,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_quiz_without_valid_questions() {
        let mut quiz = quiz_from("");
        assert!(QuizStudy::new(&quiz).is_none());
        quiz.questions.push(Question::blank());
        assert!(QuizStudy::new(&quiz).is_none());
    }

    #[test]
    fn test_quiz_study_flow() {
        let quiz = quiz_from("The cat sat on the mat. The dog ran fast.");
        let mut study = QuizStudy::new(&quiz).unwrap();
        let mut state = AppState::QuizStudy;

        assert_eq!(study.questions[0].correct_option(), Some(2));

        handle_quiz_study_input(&mut study, key(KeyCode::Char('3')), &mut state);
        assert_eq!(study.selected, 2);
        handle_quiz_study_input(&mut study, key(KeyCode::Enter), &mut state);
        assert!(study.revealed);
        assert_eq!(study.is_correct(0), Some(true));

        handle_quiz_study_input(&mut study, key(KeyCode::Enter), &mut state);
        assert_eq!(study.current, 1);
        assert!(!study.revealed);

        handle_quiz_study_input(&mut study, key(KeyCode::Down), &mut state);
        handle_quiz_study_input(&mut study, key(KeyCode::Enter), &mut state);
        assert_eq!(study.is_correct(1), Some(false));
        assert_eq!(state, AppState::QuizStudy);

        handle_quiz_study_input(&mut study, key(KeyCode::Enter), &mut state);
        assert_eq!(state, AppState::QuizSummary);
        assert_eq!(study.score(), 1);
        assert_eq!(study.total(), 2);
    }

    #[test]
    fn test_selection_is_clamped() {
        let quiz = quiz_from("The cat sat.");
        let mut study = QuizStudy::new(&quiz).unwrap();
        let mut state = AppState::QuizStudy;

        handle_quiz_study_input(&mut study, key(KeyCode::Up), &mut state);
        assert_eq!(study.selected, 0);
        handle_quiz_study_input(&mut study, key(KeyCode::Char('9')), &mut state);
        assert_eq!(study.selected, 0);
        for _ in 0..6 {
            handle_quiz_study_input(&mut study, key(KeyCode::Down), &mut state);
        }
        assert_eq!(study.selected, 3);
    }

    #[test]
    fn test_esc_leaves_quiz() {
        let quiz = quiz_from("The cat sat.");
        let mut study = QuizStudy::new(&quiz).unwrap();
        let mut state = AppState::QuizStudy;
        handle_quiz_study_input(&mut study, key(KeyCode::Esc), &mut state);
        assert_eq!(state, AppState::Browse);
    }

    #[test]
    fn test_summary_restart() {
        let quiz = quiz_from("The cat sat.");
        let mut study = QuizStudy::new(&quiz).unwrap();
        let mut state = AppState::QuizSummary;
        study.submit();

        handle_quiz_summary_input(&mut study, key(KeyCode::Char('r')), &mut state);
        assert_eq!(state, AppState::QuizStudy);
        assert_eq!(study.answers, vec![None]);

        handle_quiz_summary_input(&mut study, key(KeyCode::Esc), &mut state);
        assert_eq!(state, AppState::Browse);
    }

    fn cards(conn: &Connection, n: usize) -> Vec<Flashcard> {
        (0..n)
            .map(|i| {
                create_flashcard(
                    conn,
                    &NewFlashcard {
                        front: format!("front {}", i),
                        back: format!("back {}", i),
                        tags: vec![],
                    },
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_card_study_requires_flip_before_grading() {
        let conn = test_connection();
        let mut study = CardStudy::new(cards(&conn, 2)).unwrap();
        let mut state = AppState::CardStudy;

        handle_card_study_input(&mut study, key(KeyCode::Char('g')), &conn, &mut state).unwrap();
        assert_eq!(study.good, 0);
        assert_eq!(study.current, 0);

        handle_card_study_input(&mut study, key(KeyCode::Char(' ')), &conn, &mut state).unwrap();
        assert!(study.flipped);
        handle_card_study_input(&mut study, key(KeyCode::Char('g')), &conn, &mut state).unwrap();
        assert_eq!(study.good, 1);
        assert_eq!(study.current, 1);
        assert!(!study.flipped);

        let stored = get_flashcard(&conn, study.cards[0].id).unwrap().unwrap();
        assert_eq!(stored.score, 1);
        assert_eq!(study.cards[0].score, 1);
    }

    #[test]
    fn test_card_study_completes() {
        let conn = test_connection();
        let mut study = CardStudy::new(cards(&conn, 1)).unwrap();
        let mut state = AppState::CardStudy;

        handle_card_study_input(&mut study, key(KeyCode::Char(' ')), &conn, &mut state).unwrap();
        handle_card_study_input(&mut study, key(KeyCode::Char('a')), &conn, &mut state).unwrap();
        assert!(study.complete);
        assert_eq!(study.again, 1);

        handle_card_study_input(&mut study, key(KeyCode::Char('r')), &conn, &mut state).unwrap();
        assert!(!study.complete);
        handle_card_study_input(&mut study, key(KeyCode::Esc), &conn, &mut state).unwrap();
        assert_eq!(state, AppState::Browse);
    }

    #[test]
    fn test_card_navigation() {
        let conn = test_connection();
        let mut study = CardStudy::new(cards(&conn, 3)).unwrap();
        let mut state = AppState::CardStudy;
        assert!(CardStudy::new(vec![]).is_none());

        handle_card_study_input(&mut study, key(KeyCode::Left), &conn, &mut state).unwrap();
        assert_eq!(study.current, 0);
        for _ in 0..5 {
            handle_card_study_input(&mut study, key(KeyCode::Right), &conn, &mut state).unwrap();
        }
        assert_eq!(study.current, 2);
    }
}
