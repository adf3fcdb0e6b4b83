pub mod app;
pub mod autosave;
pub mod config;
pub mod csv;
pub mod db;
pub mod drafts;
pub mod editor;
pub mod file_io;
pub mod form;
pub mod input;
pub mod logger;
pub mod models;
pub mod quiz_editor;
pub mod quizgen;
pub mod search;
pub mod session;
pub mod text;
pub mod trigger;
pub mod ui;
pub mod utils;


// Re-exports for convenience
pub use app::App;
pub use config::Config;
pub use models::{AppState, Flashcard, Note, Quiz, Tab};
pub use quizgen::{KeepOrder, Question, QuizGenerator, RandomShuffler, Shuffler};
pub use text::calculate_wrapped_cursor_position;
pub use trigger::{NoteEvent, TriggerOutcome};
