use lazy_static::lazy_static;
use std::collections::HashSet;

fn word_set(words: &[&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

lazy_static! {
    /// Never end a sentence.
    static ref ABBREVIATIONS: HashSet<&'static str> = word_set(&[
        "mr", "mrs", "ms", "dr", "prof", "vs", "e.g", "i.e", "cf", "approx",
    ]);

    /// Only abbreviations when a number follows: "No. 5", "Dec. 25".
    static ref NUMBER_ABBREVIATIONS: HashSet<&'static str> = word_set(&[
        "no", "vol", "fig", "est", "jan", "feb", "mar", "apr", "aug", "sep", "sept", "oct",
        "nov", "dec",
    ]);

    /// Only abbreviations when a name follows: "St. Louis", "U.S. Army".
    static ref NAME_ABBREVIATIONS: HashSet<&'static str> = word_set(&[
        "sr", "jr", "st", "mt", "inc", "ltd", "co", "dept", "gen", "col", "lt", "sgt", "rev",
        "u.s", "u.k", "a.m", "p.m",
    ]);

    /// Capitalized words that usually open a new sentence rather than continue a name.
    static ref SENTENCE_OPENERS: HashSet<&'static str> = word_set(&[
        "a", "an", "the", "this", "that", "these", "those", "it", "its", "he", "she", "they",
        "we", "i", "you", "his", "her", "their", "our", "my", "your", "there", "then", "but",
        "and", "or", "so", "if", "when", "while", "after", "before", "in", "on", "at", "for",
        "however", "also", "some", "many", "most", "all", "each", "every", "no", "not",
    ]);
}

const TERMINATORS: [char; 4] = ['.', '!', '?', '…'];
const CLOSERS: [char; 8] = ['"', '\'', ')', ']', '}', '’', '”', '»'];

/// Split free text into sentence-like units.
///
/// Boundaries are terminal punctuation followed by whitespace (or the end of
/// the text) and blank lines. Internal whitespace runs are collapsed to a
/// single space; fragments without any alphanumeric character are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (byte_idx, c) = chars[i];

        if c == '\n' && is_blank_line_after(&chars, i) {
            push_sentence(&mut sentences, &text[start..byte_idx]);
            i = skip_whitespace(&chars, i);
            start = byte_offset(&chars, i, text.len());
            continue;
        }

        if TERMINATORS.contains(&c) {
            let mut j = i + 1;
            while j < chars.len() && (TERMINATORS.contains(&chars[j].1) || CLOSERS.contains(&chars[j].1)) {
                j += 1;
            }
            let end = byte_offset(&chars, j, text.len());
            let at_end = j >= chars.len();
            let followed_by_space = !at_end && chars[j].1.is_whitespace();

            if (at_end || followed_by_space)
                && !(c == '.' && is_false_stop(&text[start..byte_idx], &chars, j))
            {
                push_sentence(&mut sentences, &text[start..end]);
                i = skip_whitespace(&chars, j);
                start = byte_offset(&chars, i, text.len());
                continue;
            }
            i = j;
            continue;
        }

        i += 1;
    }

    if start < text.len() {
        push_sentence(&mut sentences, &text[start..]);
    }

    sentences
}

fn byte_offset(chars: &[(usize, char)], idx: usize, len: usize) -> usize {
    chars.get(idx).map(|(b, _)| *b).unwrap_or(len)
}

fn skip_whitespace(chars: &[(usize, char)], mut idx: usize) -> usize {
    while idx < chars.len() && chars[idx].1.is_whitespace() {
        idx += 1;
    }
    idx
}

fn is_blank_line_after(chars: &[(usize, char)], newline_idx: usize) -> bool {
    chars[newline_idx + 1..]
        .iter()
        .map(|(_, c)| *c)
        .take_while(|c| c.is_whitespace())
        .any(|c| c == '\n')
}

/// A period that does not end the sentence: an abbreviation, an initial, or
/// one followed by a lowercase continuation.
fn is_false_stop(before: &str, chars: &[(usize, char)], after_idx: usize) -> bool {
    let last_word = before
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric());
    let next = next_word(chars, after_idx);

    if !last_word.is_empty() {
        let lower = last_word.to_lowercase();
        if ABBREVIATIONS.contains(lower.as_str()) {
            return true;
        }
        if NUMBER_ABBREVIATIONS.contains(lower.as_str())
            && next.starts_with(|c: char| c.is_ascii_digit())
        {
            return true;
        }
        if NAME_ABBREVIATIONS.contains(lower.as_str()) && is_name_like(&next) {
            return true;
        }
        if is_initial(last_word) && (is_initial(&next) || is_name_like(&next)) {
            return true;
        }
    }

    // "approx. value" style continuation, unless a paragraph break intervenes
    next.starts_with(char::is_lowercase)
}

/// The word after `idx` on the same line, without surrounding punctuation.
fn next_word(chars: &[(usize, char)], idx: usize) -> String {
    chars[idx..]
        .iter()
        .map(|(_, c)| *c)
        .skip_while(|c| c.is_whitespace() && *c != '\n')
        .take_while(|c| !c.is_whitespace())
        .collect::<String>()
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_string()
}

/// A single capital letter, as in "J. R. R. Tolkien".
fn is_initial(word: &str) -> bool {
    let mut letters = word.chars();
    matches!((letters.next(), letters.next()), (Some(c), None) if c.is_uppercase())
}

fn is_name_like(word: &str) -> bool {
    word.starts_with(char::is_uppercase)
        && !SENTENCE_OPENERS.contains(word.to_lowercase().as_str())
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    if !raw.chars().any(char::is_alphanumeric) {
        return;
    }
    let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    sentences.push(normalized);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple_sentences() {
        let sentences = split_sentences("The cat sat on the mat. The dog ran fast.");
        assert_eq!(
            sentences,
            vec!["The cat sat on the mat.", "The dog ran fast."]
        );
    }

    #[test]
    fn test_split_empty_and_whitespace() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n\t ").is_empty());
    }

    #[test]
    fn test_split_without_final_punctuation() {
        let sentences = split_sentences("First one. Second one without a stop");
        assert_eq!(sentences, vec!["First one.", "Second one without a stop"]);
    }

    #[test]
    fn test_split_mixed_terminators() {
        let sentences = split_sentences("Is it raining? Yes! It is.");
        assert_eq!(sentences, vec!["Is it raining?", "Yes!", "It is."]);
    }

    #[test]
    fn test_abbreviations_do_not_split() {
        let sentences = split_sentences("Dr. Smith met Mr. Jones. They talked.");
        assert_eq!(sentences, vec!["Dr. Smith met Mr. Jones.", "They talked."]);
    }

    #[test]
    fn test_decimal_numbers_do_not_split() {
        let sentences = split_sentences("Pi is about 3.14 in value. Next.");
        assert_eq!(sentences, vec!["Pi is about 3.14 in value.", "Next."]);
    }

    #[test]
    fn test_initials_do_not_split() {
        let sentences = split_sentences("J. R. R. Tolkien wrote books. He was British.");
        assert_eq!(
            sentences,
            vec!["J. R. R. Tolkien wrote books.", "He was British."]
        );
    }

    #[test]
    fn test_ambiguous_abbreviation_ends_sentence() {
        assert_eq!(
            split_sentences("The answer is no. The cat left."),
            vec!["The answer is no.", "The cat left."]
        );
        assert_eq!(
            split_sentences("We met in Dec. The dog ran."),
            vec!["We met in Dec.", "The dog ran."]
        );
        assert_eq!(
            split_sentences("She moved to the U.S. The dog ran."),
            vec!["She moved to the U.S.", "The dog ran."]
        );
    }

    #[test]
    fn test_ambiguous_abbreviation_before_its_argument() {
        assert_eq!(
            split_sentences("See No. 5 for details. It was born Dec. 25 in town."),
            vec!["See No. 5 for details.", "It was born Dec. 25 in town."]
        );
        assert_eq!(
            split_sentences("They live in St. Louis now. Done."),
            vec!["They live in St. Louis now.", "Done."]
        );
    }

    #[test]
    fn test_single_letter_ends_sentence_before_opener() {
        assert_eq!(
            split_sentences("I took vitamin C. The dog ran."),
            vec!["I took vitamin C.", "The dog ran."]
        );
    }

    #[test]
    fn test_lowercase_continuation_does_not_split() {
        let sentences = split_sentences("Use approx. values here. Done.");
        assert_eq!(sentences, vec!["Use approx. values here.", "Done."]);
    }

    #[test]
    fn test_blank_line_is_a_boundary() {
        let sentences = split_sentences("A heading\n\nBody text follows here.");
        assert_eq!(sentences, vec!["A heading", "Body text follows here."]);
    }

    #[test]
    fn test_single_newline_is_whitespace() {
        let sentences = split_sentences("Line one continues\non the next line.");
        assert_eq!(sentences, vec!["Line one continues on the next line."]);
    }

    #[test]
    fn test_closing_quotes_stay_with_sentence() {
        let sentences = split_sentences("He said \"stop.\" Then he left.");
        assert_eq!(sentences, vec!["He said \"stop.\"", "Then he left."]);
    }

    #[test]
    fn test_punctuation_only_fragments_are_dropped() {
        let sentences = split_sentences("... !!! Real sentence here.");
        assert_eq!(sentences, vec!["Real sentence here."]);
    }

    #[test]
    fn test_ellipsis_runs_collapse() {
        let sentences = split_sentences("Wait... What happened?");
        assert_eq!(sentences, vec!["Wait...", "What happened?"]);
    }
}
