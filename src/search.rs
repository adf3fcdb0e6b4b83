use crate::models::{Flashcard, Note, Quiz};
use crate::text::plain_text;

/// Case-insensitive match on title, plain content and tags. An empty query keeps everything.
pub fn filter_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return notes.iter().collect();
    }

    notes
        .iter()
        .filter(|note| {
            note.title.to_lowercase().contains(&query)
                || plain_text(&note.content).to_lowercase().contains(&query)
                || note.tags.join(" ").to_lowercase().contains(&query)
        })
        .collect()
}

/// Text match on either side of the card, then keep cards carrying any of `tags`.
pub fn filter_flashcards<'a>(
    cards: &'a [Flashcard],
    query: &str,
    tags: &[String],
) -> Vec<&'a Flashcard> {
    let query = query.trim().to_lowercase();

    cards
        .iter()
        .filter(|card| {
            query.is_empty()
                || card.front.to_lowercase().contains(&query)
                || card.back.to_lowercase().contains(&query)
        })
        .filter(|card| tags.is_empty() || card.tags.iter().any(|t| tags.contains(t)))
        .collect()
}

pub fn filter_quizzes<'a>(quizzes: &'a [Quiz], query: &str) -> Vec<&'a Quiz> {
    let query = query.trim().to_lowercase();
    quizzes
        .iter()
        .filter(|quiz| query.is_empty() || quiz.title.to_lowercase().contains(&query))
        .collect()
}

/// Split a search box entry into free text and `#tag` filters.
pub fn parse_query(input: &str) -> (String, Vec<String>) {
    let mut words = Vec::new();
    let mut tags = Vec::new();
    for word in input.split_whitespace() {
        match word.strip_prefix('#') {
            Some(tag) if !tag.is_empty() => tags.push(tag.to_string()),
            _ => words.push(word),
        }
    }
    (words.join(" "), tags)
}
