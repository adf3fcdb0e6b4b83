use crate::config::Config;
use crate::csv::{get_csv_files, load_csv};
use crate::db::flashcard::{
    create_flashcard, delete_flashcard, import_flashcards, list_flashcards, update_flashcard,
    FlashcardPatch,
};
use crate::db::note::{
    archive_note, create_note, hard_delete_note, import_note_from_markdown, list_notes,
    list_trash, move_to_trash, restore_note, set_pinned, unarchive_note, update_note, ListNotes,
    NotePatch,
};
use crate::db::quiz::{create_quiz, delete_quiz, list_quizzes, update_quiz, QuizPatch};
use crate::drafts::{DraftKind, DraftStore, FlashcardDraft};
use crate::editor::{EditorAction, NoteEditor};
use crate::file_io::{export_note, get_markdown_files, read_markdown};
use crate::form::{Form, FormAction};
use crate::logger;
use crate::models::{
    AppState, DeleteTarget, Flashcard, FormPurpose, NewNote, Note, Quiz, Tab,
};
use crate::quiz_editor::QuizEditor;
use crate::quizgen::Question;
use crate::search::{filter_flashcards, filter_notes, filter_quizzes, parse_query};
use crate::session::{
    handle_card_study_input, handle_quiz_study_input, handle_quiz_summary_input, CardStudy,
    QuizStudy,
};
use crate::trigger::{create_quiz_from_note, NoteEvent, TriggerOutcome};
use crossbeam_channel::Sender;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rusqlite::Connection;
use std::fmt::Display;
use std::io;
use std::time::{Duration, Instant};

const NEW_QUIZ_TITLE: &str = "New Quiz";
/// Draft slot for a flashcard that has not been created yet.
const NEW_FLASHCARD_DRAFT_ID: u64 = 0;

fn db<T>(result: rusqlite::Result<T>) -> io::Result<T> {
    result.map_err(io::Error::other)
}

pub struct App {
    pub conn: Connection,
    pub config: Config,
    pub drafts: DraftStore,
    pub state: AppState,
    pub tab: Tab,
    pub notes: Vec<Note>,
    pub flashcards: Vec<Flashcard>,
    pub quizzes: Vec<Quiz>,
    pub selected: usize,
    pub search: String,
    pub show_trash: bool,
    pub show_archived: bool,
    pub note_editor: Option<NoteEditor>,
    pub quiz_editor: Option<QuizEditor>,
    pub form: Option<Form>,
    pub quiz_study: Option<QuizStudy>,
    pub card_study: Option<CardStudy>,
    pub pending_delete: Option<DeleteTarget>,
    pub status: Option<String>,
    pub trigger_tx: Option<Sender<NoteEvent>>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        conn: Connection,
        config: Config,
        trigger_tx: Option<Sender<NoteEvent>>,
    ) -> io::Result<Self> {
        let drafts = DraftStore::new(config.drafts_dir());
        let mut app = Self {
            conn,
            config,
            drafts,
            state: AppState::Browse,
            tab: Tab::Notes,
            notes: Vec::new(),
            flashcards: Vec::new(),
            quizzes: Vec::new(),
            selected: 0,
            search: String::new(),
            show_trash: false,
            show_archived: false,
            note_editor: None,
            quiz_editor: None,
            form: None,
            quiz_study: None,
            card_study: None,
            pending_delete: None,
            status: None,
            trigger_tx,
            should_quit: false,
        };
        app.reload()?;
        Ok(app)
    }

    pub fn reload(&mut self) -> io::Result<()> {
        self.notes = if self.show_trash {
            db(list_trash(&self.conn))?
        } else {
            db(list_notes(
                &self.conn,
                ListNotes {
                    include_archived: self.show_archived,
                    include_deleted: false,
                },
            ))?
        };
        self.flashcards = db(list_flashcards(&self.conn))?;
        self.quizzes = db(list_quizzes(&self.conn))?;
        self.clamp_selection();
        Ok(())
    }

    pub fn visible_notes(&self) -> Vec<&Note> {
        filter_notes(&self.notes, &self.search)
    }

    pub fn visible_flashcards(&self) -> Vec<&Flashcard> {
        let (query, tags) = parse_query(&self.search);
        filter_flashcards(&self.flashcards, &query, &tags)
    }

    pub fn visible_quizzes(&self) -> Vec<&Quiz> {
        filter_quizzes(&self.quizzes, &self.search)
    }

    fn visible_len(&self) -> usize {
        match self.tab {
            Tab::Notes => self.visible_notes().len(),
            Tab::Flashcards => self.visible_flashcards().len(),
            Tab::Quizzes => self.visible_quizzes().len(),
        }
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.visible_notes().get(self.selected).copied()
    }

    pub fn selected_flashcard(&self) -> Option<&Flashcard> {
        self.visible_flashcards().get(self.selected).copied()
    }

    pub fn selected_quiz(&self) -> Option<&Quiz> {
        self.visible_quizzes().get(self.selected).copied()
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    fn report(&mut self, context: &str, err: impl Display) {
        let message = format!("{}: {}", context, err);
        logger::log(&message);
        self.status = Some(message);
    }

    /// Time until the next pending autosave, if any.
    pub fn next_timeout(&self, now: Instant) -> Option<Duration> {
        let note = self
            .note_editor
            .as_ref()
            .and_then(|e| e.autosave.time_until(now));
        let quiz = self
            .quiz_editor
            .as_ref()
            .and_then(|e| e.autosave.time_until(now));
        match (note, quiz) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Run autosaves whose debounce delay has passed.
    pub fn tick(&mut self, now: Instant) {
        if self
            .note_editor
            .as_mut()
            .is_some_and(|e| e.autosave.poll(now))
            && let Err(e) = self.flush_note_editor(now)
        {
            self.report("Autosave failed", e);
        }
        if self
            .quiz_editor
            .as_mut()
            .is_some_and(|e| e.autosave.poll(now))
            && let Err(e) = self.flush_quiz_editor()
        {
            self.report("Autosave failed", e);
        }
    }

    pub fn apply_trigger_outcome(&mut self, outcome: TriggerOutcome) {
        match outcome {
            TriggerOutcome::Generated {
                note_id, questions, ..
            } => {
                match db(list_quizzes(&self.conn)) {
                    Ok(quizzes) => {
                        self.quizzes = quizzes;
                        self.clamp_selection();
                    }
                    Err(e) => self.report("Reload failed", e),
                }
                self.set_status(format!(
                    "Quiz for note {} updated ({} questions)",
                    note_id, questions
                ));
            }
            TriggerOutcome::Skipped { .. } => {}
            TriggerOutcome::Error { note_id, error } => {
                self.set_status(format!("Quiz generation failed for note {}: {}", note_id, error));
            }
        }
    }

    fn notify_note_written(&mut self, note_id: u64) {
        let failed = match &self.trigger_tx {
            Some(tx) => tx.send(NoteEvent::Written { note_id }).is_err(),
            None => false,
        };
        if failed {
            logger::log("Quiz worker is gone; disabling automatic quizzes");
            self.trigger_tx = None;
        }
    }

    pub fn quit(&mut self, now: Instant) {
        if let Err(e) = self.flush_note_editor(now) {
            self.report("Save failed", e);
        }
        if let Err(e) = self.flush_quiz_editor() {
            self.report("Save failed", e);
        }
        self.should_quit = true;
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> io::Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit(now);
            return Ok(());
        }

        let result = match self.state {
            AppState::Browse => self.handle_browse_key(key, now),
            AppState::Search => {
                self.handle_search_key(key);
                Ok(())
            }
            AppState::NoteEditor => self.handle_note_editor_key(key, now),
            AppState::Form => self.handle_form_key(key, now),
            AppState::QuizEditor => self.handle_quiz_editor_key(key, now),
            AppState::QuizStudy => {
                if let Some(study) = &mut self.quiz_study {
                    handle_quiz_study_input(study, key, &mut self.state);
                }
                Ok(())
            }
            AppState::QuizSummary => {
                if let Some(study) = &mut self.quiz_study {
                    handle_quiz_summary_input(study, key, &mut self.state);
                }
                Ok(())
            }
            AppState::CardStudy => self.handle_card_study_key(key),
            AppState::ConfirmDelete => self.handle_confirm_key(key),
        };

        if let Err(e) = result {
            self.report("Error", e);
        }
        Ok(())
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.state = AppState::Browse,
            KeyCode::Esc => {
                self.search.clear();
                self.state = AppState::Browse;
            }
            KeyCode::Backspace => {
                self.search.pop();
            }
            KeyCode::Char(c) => self.search.push(c),
            _ => return,
        }
        self.selected = 0;
    }

    fn handle_browse_key(&mut self, key: KeyEvent, now: Instant) -> io::Result<()> {
        self.status = None;
        match key.code {
            KeyCode::Char('q') => {
                self.quit(now);
                return Ok(());
            }
            KeyCode::Tab | KeyCode::Right => {
                self.switch_tab(self.tab.next());
                return Ok(());
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.switch_tab(self.tab.previous());
                return Ok(());
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                return Ok(());
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.visible_len() {
                    self.selected += 1;
                }
                return Ok(());
            }
            KeyCode::Char('/') => {
                self.state = AppState::Search;
                return Ok(());
            }
            KeyCode::Esc => {
                if !self.search.is_empty() {
                    self.search.clear();
                    self.selected = 0;
                } else if self.show_trash {
                    self.show_trash = false;
                    self.reload()?;
                }
                return Ok(());
            }
            _ => {}
        }

        match self.tab {
            Tab::Notes if self.show_trash => self.handle_trash_key(key),
            Tab::Notes => self.handle_notes_key(key),
            Tab::Flashcards => self.handle_flashcards_key(key),
            Tab::Quizzes => self.handle_quizzes_key(key),
        }
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.selected = 0;
        self.search.clear();
    }

    fn handle_notes_key(&mut self, key: KeyEvent) -> io::Result<()> {
        match key.code {
            KeyCode::Char('n') => {
                let note = db(create_note(&self.conn, &NewNote::default()))?;
                self.open_note_editor(&note);
            }
            KeyCode::Char('t') => {
                self.show_trash = true;
                self.selected = 0;
                self.reload()?;
            }
            KeyCode::Char('v') => {
                self.show_archived = !self.show_archived;
                self.reload()?;
                self.set_status(if self.show_archived {
                    "Showing archived notes"
                } else {
                    "Hiding archived notes"
                });
            }
            KeyCode::Char('i') => self.import_notes()?,
            _ => {
                let Some(note) = self.selected_note().cloned() else {
                    return Ok(());
                };
                self.handle_selected_note_key(key, &note)?;
            }
        }
        Ok(())
    }

    fn handle_selected_note_key(&mut self, key: KeyEvent, note: &Note) -> io::Result<()> {
        match key.code {
            KeyCode::Enter => self.open_note_editor(note),
            KeyCode::Char('p') => {
                db(set_pinned(&self.conn, note.id, !note.pinned))?;
                self.reload()?;
            }
            KeyCode::Char('A') => {
                if note.archived {
                    db(unarchive_note(&self.conn, note.id))?;
                    self.set_status(format!("Unarchived '{}'", note.display_title()));
                } else {
                    db(archive_note(&self.conn, note.id))?;
                    self.set_status(format!("Archived '{}'", note.display_title()));
                }
                self.reload()?;
            }
            KeyCode::Char('d') => self.confirm_delete(DeleteTarget::Note(note.id)),
            KeyCode::Char('g') => match db(create_quiz_from_note(&self.conn, note))? {
                Some(quiz) => {
                    self.reload()?;
                    self.set_status(format!(
                        "Created '{}' with {} questions",
                        quiz.title,
                        quiz.questions.len()
                    ));
                }
                None => self.set_status("Note has no text to quiz on"),
            },
            KeyCode::Char('e') => {
                let path = export_note(&self.config.export_dir, note)?;
                self.set_status(format!("Exported to {}", path.display()));
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_trash_key(&mut self, key: KeyEvent) -> io::Result<()> {
        match key.code {
            KeyCode::Char('t') => {
                self.show_trash = false;
                self.selected = 0;
                self.reload()?;
            }
            KeyCode::Char('r') => {
                if let Some(id) = self.selected_note().map(|n| n.id) {
                    db(restore_note(&self.conn, id))?;
                    self.reload()?;
                    self.set_status("Note restored");
                }
            }
            KeyCode::Char('D') => {
                if let Some(id) = self.selected_note().map(|n| n.id) {
                    self.confirm_delete(DeleteTarget::NoteForever(id));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn import_notes(&mut self) -> io::Result<()> {
        let files = get_markdown_files(&self.config.import_dir);
        if files.is_empty() {
            self.set_status(format!(
                "No markdown files in {}",
                self.config.import_dir.display()
            ));
            return Ok(());
        }

        let mut imported = Vec::new();
        for path in &files {
            let markdown = read_markdown(path)?;
            let note = db(import_note_from_markdown(&self.conn, &markdown, None, &[]))?;
            imported.push(note.id);
        }
        logger::log(&format!("Imported {} notes", imported.len()));
        for id in &imported {
            self.notify_note_written(*id);
        }

        self.reload()?;
        self.set_status(format!("Imported {} notes", imported.len()));
        Ok(())
    }

    fn handle_flashcards_key(&mut self, key: KeyEvent) -> io::Result<()> {
        match key.code {
            KeyCode::Char('n') => {
                let draft: FlashcardDraft =
                    self.drafts.load(DraftKind::Flashcard, NEW_FLASHCARD_DRAFT_ID);
                self.open_form(Form::flashcard(FormPurpose::NewFlashcard, &draft));
            }
            KeyCode::Enter => {
                if let Some(card) = self.selected_flashcard().cloned() {
                    let draft = self
                        .drafts
                        .get(DraftKind::Flashcard, card.id)
                        .unwrap_or_else(|| FlashcardDraft {
                            front: card.front.clone(),
                            back: card.back.clone(),
                            tags: card.tags.join(", "),
                        });
                    self.open_form(Form::flashcard(FormPurpose::EditFlashcard(card.id), &draft));
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_flashcard().map(|c| c.id) {
                    self.confirm_delete(DeleteTarget::Flashcard(id));
                }
            }
            KeyCode::Char('s') => {
                let cards: Vec<Flashcard> = self.visible_flashcards().into_iter().cloned().collect();
                match CardStudy::new(cards) {
                    Some(study) => {
                        self.card_study = Some(study);
                        self.state = AppState::CardStudy;
                    }
                    None => self.set_status("No flashcards to study"),
                }
            }
            KeyCode::Char('i') => self.import_decks()?,
            _ => {}
        }
        Ok(())
    }

    fn import_decks(&mut self) -> io::Result<()> {
        let files = get_csv_files(&self.config.csv_dir);
        if files.is_empty() {
            self.set_status(format!("No CSV decks in {}", self.config.csv_dir.display()));
            return Ok(());
        }

        let mut total = 0;
        for path in &files {
            let cards = load_csv(path)?;
            total += db(import_flashcards(&mut self.conn, &cards))?;
        }
        logger::log(&format!("Imported {} flashcards from {} decks", total, files.len()));

        self.reload()?;
        self.set_status(format!(
            "Imported {} flashcards from {} decks",
            total,
            files.len()
        ));
        Ok(())
    }

    fn handle_quizzes_key(&mut self, key: KeyEvent) -> io::Result<()> {
        match key.code {
            KeyCode::Char('n') => {
                let quiz = db(create_quiz(&self.conn, NEW_QUIZ_TITLE, &[], None))?;
                self.reload()?;
                self.open_quiz_editor(&quiz);
            }
            KeyCode::Enter => {
                if let Some(quiz) = self.selected_quiz().cloned() {
                    self.open_quiz_editor(&quiz);
                }
            }
            KeyCode::Char('s') => {
                if let Some(quiz) = self.selected_quiz() {
                    match QuizStudy::new(quiz) {
                        Some(study) => {
                            self.quiz_study = Some(study);
                            self.state = AppState::QuizStudy;
                        }
                        None => self.set_status("Quiz has no complete questions"),
                    }
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_quiz().map(|q| q.id) {
                    self.confirm_delete(DeleteTarget::Quiz(id));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn confirm_delete(&mut self, target: DeleteTarget) {
        self.pending_delete = Some(target);
        self.state = AppState::ConfirmDelete;
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> io::Result<()> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                self.state = AppState::Browse;
                if let Some(target) = self.pending_delete.take() {
                    self.delete(target)?;
                }
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.pending_delete = None;
                self.state = AppState::Browse;
            }
            _ => {}
        }
        Ok(())
    }

    fn delete(&mut self, target: DeleteTarget) -> io::Result<()> {
        let message = match target {
            DeleteTarget::Note(id) => {
                db(move_to_trash(&self.conn, id))?;
                "Note moved to trash"
            }
            DeleteTarget::NoteForever(id) => {
                db(hard_delete_note(&self.conn, id))?;
                self.drafts.remove(DraftKind::Note, id)?;
                "Note deleted permanently"
            }
            DeleteTarget::Flashcard(id) => {
                db(delete_flashcard(&self.conn, id, true))?;
                "Flashcard deleted"
            }
            DeleteTarget::Quiz(id) => {
                db(delete_quiz(&self.conn, id, true))?;
                "Quiz deleted"
            }
        };
        logger::log(&format!("{:?}: {}", target, message));
        self.reload()?;
        self.set_status(message);
        Ok(())
    }

    fn open_note_editor(&mut self, note: &Note) {
        let draft = self.drafts.get(DraftKind::Note, note.id);
        let editor = NoteEditor::open(note, draft, self.config.autosave_delay);
        if editor.restored_draft {
            self.set_status("Restored unsaved changes");
        }
        self.note_editor = Some(editor);
        self.state = AppState::NoteEditor;
    }

    fn handle_note_editor_key(&mut self, key: KeyEvent, now: Instant) -> io::Result<()> {
        let Some(editor) = self.note_editor.as_mut() else {
            self.state = AppState::Browse;
            return Ok(());
        };

        match editor.handle_key(key, now) {
            EditorAction::None => {}
            EditorAction::Edited => {
                let draft = editor.draft();
                let id = editor.note_id;
                self.drafts.save(DraftKind::Note, id, &draft)?;
            }
            EditorAction::Close => {
                self.flush_note_editor(now)?;
                self.note_editor = None;
                self.state = AppState::Browse;
                self.reload()?;
            }
        }
        Ok(())
    }

    /// Write pending note edits to the store and notify the quiz worker.
    pub fn flush_note_editor(&mut self, now: Instant) -> io::Result<()> {
        let Some(editor) = self.note_editor.as_mut() else {
            return Ok(());
        };
        editor.autosave.flush();
        if !editor.dirty {
            return Ok(());
        }

        let patch = NotePatch {
            title: Some(editor.title.text().to_string()),
            content: Some(editor.body.text().to_string()),
            ..Default::default()
        };
        db(update_note(&self.conn, editor.note_id, &patch))?;
        editor.mark_saved(now);
        let id = editor.note_id;

        if let Err(e) = self.drafts.remove(DraftKind::Note, id) {
            logger::log(&format!("Could not remove draft for note {}: {}", id, e));
        }
        self.notify_note_written(id);
        Ok(())
    }

    fn open_quiz_editor(&mut self, quiz: &Quiz) {
        let draft = self.drafts.get(DraftKind::Quiz, quiz.id);
        let editor = QuizEditor::open(quiz, draft, self.config.autosave_delay);
        if editor.dirty {
            self.set_status("Restored unsaved changes");
        }
        self.quiz_editor = Some(editor);
        self.state = AppState::QuizEditor;
    }

    fn save_quiz_draft(&mut self) -> io::Result<()> {
        if let Some(editor) = &self.quiz_editor {
            self.drafts
                .save(DraftKind::Quiz, editor.quiz_id, &editor.draft())?;
        }
        Ok(())
    }

    fn handle_quiz_editor_key(&mut self, key: KeyEvent, now: Instant) -> io::Result<()> {
        let Some(editor) = self.quiz_editor.as_mut() else {
            self.state = AppState::Browse;
            return Ok(());
        };

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => editor.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => editor.select_next(),
            KeyCode::Char('a') => {
                self.open_form(Form::question(FormPurpose::NewQuestion, &Question::blank()));
            }
            KeyCode::Enter => {
                if let Some(question) = editor.selected_question() {
                    let form = Form::question(FormPurpose::EditQuestion(editor.selected), question);
                    self.open_form(form);
                }
            }
            KeyCode::Char('t') => {
                let form = Form::rename(&editor.title);
                self.open_form(form);
            }
            KeyCode::Char('d') => {
                if editor.remove_selected(now).is_some() {
                    self.save_quiz_draft()?;
                }
            }
            KeyCode::Esc => {
                self.flush_quiz_editor()?;
                self.quiz_editor = None;
                self.state = AppState::Browse;
                self.reload()?;
            }
            _ => {}
        }
        Ok(())
    }

    pub fn flush_quiz_editor(&mut self) -> io::Result<()> {
        let Some(editor) = self.quiz_editor.as_mut() else {
            return Ok(());
        };
        editor.autosave.flush();
        if !editor.dirty {
            return Ok(());
        }

        let patch = QuizPatch {
            title: Some(editor.title.clone()),
            questions: Some(editor.questions.clone()),
        };
        db(update_quiz(&self.conn, editor.quiz_id, &patch))?;
        editor.mark_saved();
        let id = editor.quiz_id;

        if let Err(e) = self.drafts.remove(DraftKind::Quiz, id) {
            logger::log(&format!("Could not remove draft for quiz {}: {}", id, e));
        }
        Ok(())
    }

    fn open_form(&mut self, form: Form) {
        self.form = Some(form);
        self.state = AppState::Form;
    }

    fn form_return_state(purpose: FormPurpose) -> AppState {
        match purpose {
            FormPurpose::NewFlashcard | FormPurpose::EditFlashcard(_) => AppState::Browse,
            FormPurpose::NewQuestion | FormPurpose::EditQuestion(_) | FormPurpose::RenameQuiz => {
                AppState::QuizEditor
            }
        }
    }

    fn flashcard_draft_id(purpose: FormPurpose) -> Option<u64> {
        match purpose {
            FormPurpose::NewFlashcard => Some(NEW_FLASHCARD_DRAFT_ID),
            FormPurpose::EditFlashcard(id) => Some(id),
            _ => None,
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent, now: Instant) -> io::Result<()> {
        let Some(form) = self.form.as_mut() else {
            self.state = AppState::Browse;
            return Ok(());
        };
        let purpose = form.purpose;

        match form.handle_key(key) {
            FormAction::None => {}
            FormAction::Edited => {
                if let Some(id) = Self::flashcard_draft_id(purpose) {
                    let draft = form.flashcard_draft();
                    self.drafts.save(DraftKind::Flashcard, id, &draft)?;
                }
            }
            FormAction::Cancel => {
                if let Some(id) = Self::flashcard_draft_id(purpose) {
                    self.drafts.remove(DraftKind::Flashcard, id)?;
                }
                self.form = None;
                self.state = Self::form_return_state(purpose);
            }
            FormAction::Submit => self.submit_form(now)?,
        }
        Ok(())
    }

    fn submit_form(&mut self, now: Instant) -> io::Result<()> {
        let Some(mut form) = self.form.take() else {
            return Ok(());
        };
        let purpose = form.purpose;

        let outcome: Result<&str, String> = match purpose {
            FormPurpose::NewFlashcard => match form.to_flashcard() {
                Ok(card) => {
                    db(create_flashcard(&self.conn, &card))?;
                    Ok("Flashcard created")
                }
                Err(e) => Err(e),
            },
            FormPurpose::EditFlashcard(id) => match form.to_flashcard() {
                Ok(card) => {
                    let patch = FlashcardPatch {
                        front: Some(card.front),
                        back: Some(card.back),
                        tags: Some(card.tags),
                    };
                    db(update_flashcard(&self.conn, id, &patch))?;
                    Ok("Flashcard saved")
                }
                Err(e) => Err(e),
            },
            FormPurpose::NewQuestion => form.to_question().map(|question| {
                if let Some(editor) = self.quiz_editor.as_mut() {
                    editor.add_question(question, now);
                }
                "Question added"
            }),
            FormPurpose::EditQuestion(idx) => form.to_question().map(|question| {
                if let Some(editor) = self.quiz_editor.as_mut() {
                    editor.replace_question(idx, question, now);
                }
                "Question updated"
            }),
            FormPurpose::RenameQuiz => form.single_value().map(|title| {
                if let Some(editor) = self.quiz_editor.as_mut() {
                    editor.rename(title, now);
                }
                "Quiz renamed"
            }),
        };

        match outcome {
            Ok(message) => {
                if let Some(id) = Self::flashcard_draft_id(purpose) {
                    self.drafts.remove(DraftKind::Flashcard, id)?;
                    self.reload()?;
                } else {
                    self.save_quiz_draft()?;
                }
                self.state = Self::form_return_state(purpose);
                self.set_status(message);
            }
            Err(message) => {
                form.error = Some(message);
                self.form = Some(form);
            }
        }
        Ok(())
    }

    fn handle_card_study_key(&mut self, key: KeyEvent) -> io::Result<()> {
        if let Some(study) = &mut self.card_study {
            handle_card_study_input(study, key, &self.conn, &mut self.state)?;
        }
        if self.state == AppState::Browse {
            self.card_study = None;
            self.reload()?;
        }
        Ok(())
    }
}
