//! Runtime settings read from `NOTE_QUIZ_*` environment variables.

use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_AUTOSAVE_MS: u64 = 600;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub csv_dir: PathBuf,
    pub export_dir: PathBuf,
    pub import_dir: PathBuf,
    pub autosave_delay: Duration,
    pub auto_quiz: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Unset, empty or
    /// unparsable values fall back to their defaults.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = get("NOTE_QUIZ_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_data_dir(get("HOME")));

        let export_dir = get("NOTE_QUIZ_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("exports"));

        let autosave_ms = get("NOTE_QUIZ_AUTOSAVE_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_AUTOSAVE_MS);

        let auto_quiz = get("NOTE_QUIZ_AUTO_QUIZ")
            .and_then(|v| parse_flag(&v))
            .unwrap_or(true);

        Self {
            csv_dir: get("NOTE_QUIZ_CSV_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("flashcards")),
            import_dir: get("NOTE_QUIZ_IMPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("notes")),
            export_dir,
            autosave_delay: Duration::from_millis(autosave_ms),
            auto_quiz,
            data_dir,
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("nq.db")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("note_quiz.log")
    }

    pub fn drafts_dir(&self) -> PathBuf {
        self.data_dir.join("drafts")
    }
}

fn default_data_dir(home: Option<String>) -> PathBuf {
    match home {
        Some(home) => PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("note-quiz"),
        None => PathBuf::from(".note-quiz"),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[("HOME", "/home/ada")]);
        let data_dir = PathBuf::from("/home/ada/.local/share/note-quiz");

        assert_eq!(config.data_dir, data_dir);
        assert_eq!(config.csv_dir, PathBuf::from("flashcards"));
        assert_eq!(config.import_dir, PathBuf::from("notes"));
        assert_eq!(config.export_dir, data_dir.join("exports"));
        assert_eq!(config.autosave_delay, Duration::from_millis(600));
        assert!(config.auto_quiz);
        assert_eq!(config.db_path(), data_dir.join("nq.db"));
        assert_eq!(config.log_path(), data_dir.join("note_quiz.log"));
        assert_eq!(config.drafts_dir(), data_dir.join("drafts"));
    }

    #[test]
    fn test_overrides() {
        let config = config_with(&[
            ("NOTE_QUIZ_DATA_DIR", "/tmp/nq"),
            ("NOTE_QUIZ_CSV_DIR", "/decks"),
            ("NOTE_QUIZ_EXPORT_DIR", "/out"),
            ("NOTE_QUIZ_IMPORT_DIR", "/in"),
            ("NOTE_QUIZ_AUTOSAVE_MS", "250"),
            ("NOTE_QUIZ_AUTO_QUIZ", "off"),
        ]);

        assert_eq!(config.data_dir, PathBuf::from("/tmp/nq"));
        assert_eq!(config.csv_dir, PathBuf::from("/decks"));
        assert_eq!(config.export_dir, PathBuf::from("/out"));
        assert_eq!(config.import_dir, PathBuf::from("/in"));
        assert_eq!(config.autosave_delay, Duration::from_millis(250));
        assert!(!config.auto_quiz);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_with(&[
            ("NOTE_QUIZ_DATA_DIR", "/tmp/nq"),
            ("NOTE_QUIZ_AUTOSAVE_MS", "soon"),
            ("NOTE_QUIZ_AUTO_QUIZ", "maybe"),
            ("NOTE_QUIZ_CSV_DIR", "  "),
        ]);

        assert_eq!(config.autosave_delay, Duration::from_millis(600));
        assert!(config.auto_quiz);
        assert_eq!(config.csv_dir, PathBuf::from("flashcards"));
    }

    #[test]
    fn test_missing_home() {
        let config = config_with(&[]);
        assert_eq!(config.data_dir, PathBuf::from(".note-quiz"));
    }
}
