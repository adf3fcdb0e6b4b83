use lazy_static::lazy_static;
use std::collections::HashSet;

fn word_set(words: &[&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

lazy_static! {
    /// Words that open a noun phrase.
    static ref DETERMINERS: HashSet<&'static str> = word_set(&[
        "a", "an", "the", "this", "that", "these", "those", "my", "your", "his", "her", "its",
        "our", "their", "some", "any", "each", "every", "no", "another", "many", "few",
        "several", "all", "both", "much", "more", "most", "such", "whose", "either", "neither",
    ]);

    static ref PREPOSITIONS: HashSet<&'static str> = word_set(&[
        "of", "in", "on", "at", "by", "for", "with", "about", "against", "between", "into",
        "through", "during", "before", "after", "above", "below", "to", "from", "up", "down",
        "over", "under", "around", "among", "near", "without", "within", "across", "behind",
        "beyond", "like", "toward", "towards", "upon", "via", "per", "onto", "inside",
        "outside", "throughout", "along", "beside", "besides", "despite", "except", "off",
    ]);

    static ref PRONOUNS: HashSet<&'static str> = word_set(&[
        "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself",
        "yourself", "himself", "herself", "itself", "ourselves", "themselves", "who", "whom",
        "what", "which", "someone", "something", "anyone", "anything", "everyone",
        "everything", "nobody", "nothing", "one", "there", "here", "mine", "yours", "ours",
        "theirs", "hers",
    ]);

    static ref CONJUNCTIONS: HashSet<&'static str> = word_set(&[
        "and", "or", "but", "nor", "so", "yet", "because", "although", "though", "while",
        "if", "unless", "since", "than", "whether", "as", "when", "where", "how", "why",
        "then", "until", "once", "whereas",
    ]);

    /// Auxiliaries and very common verbs in their usual inflections.
    static ref VERBS: HashSet<&'static str> = word_set(&[
        "is", "are", "was", "were", "be", "been", "being", "am", "do", "does", "did", "done",
        "have", "has", "had", "having", "will", "would", "shall", "should", "can", "could",
        "may", "might", "must", "go", "goes", "went", "gone", "going", "get", "gets", "got",
        "make", "makes", "made", "take", "takes", "took", "taken", "come", "comes", "came",
        "see", "sees", "saw", "seen", "know", "knows", "knew", "known", "say", "says", "said",
        "give", "gives", "gave", "given", "use", "uses", "find", "finds", "found", "run",
        "runs", "ran", "sit", "sits", "sat", "let", "lets", "put", "puts", "become",
        "becomes", "became", "seem", "seems", "seemed", "keep", "keeps", "kept", "think",
        "thinks", "thought", "tell", "tells", "told", "leave", "leaves", "left", "feel",
        "feels", "felt", "bring", "brings", "brought", "begin", "begins", "began", "write",
        "writes", "wrote", "written", "read", "reads", "eat", "eats", "ate", "stand",
        "stands", "stood", "lose", "loses", "lost", "pay", "pays", "paid", "meet", "meets",
        "met", "include", "includes", "contain", "contains", "produce", "produces", "allow",
        "allows", "help", "helps", "want", "wants", "need", "needs", "call", "calls", "try",
        "tries", "ask", "asks", "work", "works", "show", "shows", "move", "moves", "live",
        "lives", "believe", "believes", "happen", "happens", "consist", "consists",
    ]);

    static ref ADVERBS: HashSet<&'static str> = word_set(&[
        "not", "now", "very", "too", "also", "just", "only", "never", "always", "often",
        "soon", "fast", "again", "still", "already", "even", "quite", "rather", "almost",
        "yes", "ok", "okay", "please", "well", "really", "sometimes", "usually", "together",
        "away", "back", "out", "today", "tomorrow", "yesterday", "ever", "perhaps", "maybe",
        "instead", "however", "therefore", "thus", "hence", "otherwise", "later",
    ]);

    static ref ADJECTIVES: HashSet<&'static str> = word_set(&[
        "big", "small", "large", "little", "good", "bad", "new", "old", "long", "short",
        "high", "low", "great", "last", "next", "other", "same", "different", "important",
        "red", "blue", "green", "black", "white", "yellow", "young", "hot", "cold", "warm",
        "early", "late", "main", "major", "minor", "whole", "full", "free", "real", "best",
        "better", "worse", "worst", "own", "simple", "easy", "hard", "strong", "weak",
        "common", "single", "certain", "clear", "true", "false", "open", "close", "fine",
        "huge", "tiny", "quick", "slow", "bright", "dark", "deep", "wide", "narrow", "basic",
        "key", "general", "specific", "entire", "various", "first", "second", "third",
    ]);
}

const NOUN_SUFFIXES: [&str; 17] = [
    "tion", "sion", "ment", "ness", "ity", "ism", "ist", "ance", "ence", "ship", "hood",
    "dom", "ology", "sis", "ture", "age", "ery",
];

const ADJECTIVE_SUFFIXES: [&str; 8] = ["ous", "ful", "ive", "able", "ible", "less", "ical", "ish"];

#[derive(Debug, Clone)]
struct Token<'a> {
    text: &'a str,
    lower: String,
    possessive: bool,
    numeric: bool,
}

fn tokenize(sentence: &str) -> Vec<Token<'_>> {
    let is_word_char = |c: char| c.is_alphanumeric() || c == '\'' || c == '’' || c == '-';

    sentence
        .split(|c: char| !is_word_char(c))
        .map(|raw| raw.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            let (text, possessive) = match raw
                .strip_suffix("'s")
                .or_else(|| raw.strip_suffix("’s"))
            {
                Some(stem) if !stem.is_empty() => (stem, true),
                _ => (raw, false),
            };
            Token {
                text,
                lower: text.to_lowercase(),
                possessive,
                numeric: text.chars().all(|c| c.is_ascii_digit() || c == '-'),
            }
        })
        .collect()
}

fn is_function_word(word: &str) -> bool {
    DETERMINERS.contains(word)
        || PREPOSITIONS.contains(word)
        || PRONOUNS.contains(word)
        || CONJUNCTIONS.contains(word)
        || VERBS.contains(word)
        || ADVERBS.contains(word)
}

fn has_suffix(word: &str, suffixes: &[&str]) -> bool {
    suffixes
        .iter()
        .any(|suffix| word.len() >= suffix.len() + 2 && word.ends_with(suffix))
}

fn is_content(token: &Token<'_>) -> bool {
    !token.numeric
        && token.text.chars().any(char::is_alphabetic)
        && !is_function_word(&token.lower)
        && !(token.lower.len() > 4 && token.lower.ends_with("ly"))
}

fn is_adjective_like(token: &Token<'_>) -> bool {
    ADJECTIVES.contains(token.lower.as_str())
        || has_suffix(&token.lower, &ADJECTIVE_SUFFIXES)
        || (token.lower.len() > 4 && token.lower.ends_with("ed"))
}

fn opens_noun_phrase(token: &Token<'_>) -> bool {
    token.numeric
        || token.possessive
        || DETERMINERS.contains(token.lower.as_str())
        || PREPOSITIONS.contains(token.lower.as_str())
}

/// Walk back over modifiers and report whether the phrase was opened by a
/// determiner, preposition, possessive or number.
fn in_noun_phrase(tokens: &[Token<'_>], idx: usize) -> bool {
    let mut j = idx;
    while j > 0 {
        j -= 1;
        let prev = &tokens[j];
        if opens_noun_phrase(prev) {
            return true;
        }
        if !(is_content(prev) && is_adjective_like(prev)) {
            return false;
        }
    }
    false
}

fn is_noun_at(tokens: &[Token<'_>], idx: usize) -> bool {
    let token = &tokens[idx];
    if !is_content(token) {
        return false;
    }

    let next_is_content = tokens.get(idx + 1).map(is_content).unwrap_or(false);
    let modifier_position = is_adjective_like(token) && next_is_content;

    if token.possessive {
        return true;
    }
    if in_noun_phrase(tokens, idx) && !modifier_position {
        return true;
    }
    if has_suffix(&token.lower, &NOUN_SUFFIXES) && !modifier_position {
        return true;
    }

    let capitalized = token.text.chars().next().is_some_and(char::is_uppercase);
    if capitalized && idx > 0 {
        return true;
    }
    // Sentence-initial subject: "Photosynthesis is ..." / "Paris has ..."
    if capitalized
        && idx == 0
        && tokens
            .get(1)
            .is_some_and(|next| VERBS.contains(next.lower.as_str()))
    {
        return true;
    }

    false
}

/// Heuristically extract noun-like words from a sentence, in order of
/// appearance. Pronouns are never reported.
///
/// When nothing else qualifies, a capitalized opening content word is taken
/// as the subject ("Birds sing.").
pub fn extract_nouns(sentence: &str) -> Vec<String> {
    let tokens = tokenize(sentence);
    let nouns: Vec<String> = (0..tokens.len())
        .filter(|&idx| is_noun_at(&tokens, idx))
        .map(|idx| tokens[idx].text.to_string())
        .collect();
    if !nouns.is_empty() {
        return nouns;
    }

    tokens
        .first()
        .filter(|first| {
            first.text.starts_with(char::is_uppercase)
                && is_content(first)
                && !is_adjective_like(first)
        })
        .map(|first| vec![first.text.to_string()])
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determiner_context() {
        assert_eq!(extract_nouns("The cat sat on the mat."), vec!["cat", "mat"]);
    }

    #[test]
    fn test_no_nouns_in_command() {
        assert!(extract_nouns("Go now.").is_empty());
    }

    #[test]
    fn test_pronouns_are_not_nouns() {
        assert!(extract_nouns("She saw it there.").is_empty());
    }

    #[test]
    fn test_adjectives_before_noun_are_skipped() {
        assert_eq!(extract_nouns("A big red ball bounced."), vec!["ball"]);
    }

    #[test]
    fn test_trailing_adjective_after_determiner_is_kept() {
        // nothing follows, so "red" heads the phrase
        assert_eq!(extract_nouns("I like the red."), vec!["red"]);
    }

    #[test]
    fn test_sentence_initial_subject() {
        assert_eq!(
            extract_nouns("Photosynthesis is a process."),
            vec!["Photosynthesis", "process"]
        );
    }

    #[test]
    fn test_sentence_initial_subject_without_other_nouns() {
        assert_eq!(extract_nouns("Birds sing."), vec!["Birds"]);
        assert_eq!(extract_nouns("Light matters."), vec!["Light"]);
        assert!(extract_nouns("Why?").is_empty());
        assert!(extract_nouns("Quickly go.").is_empty());
    }

    #[test]
    fn test_proper_noun_mid_sentence() {
        assert_eq!(extract_nouns("We visited Paris yesterday."), vec!["Paris"]);
    }

    #[test]
    fn test_noun_suffix_without_determiner() {
        assert_eq!(
            extract_nouns("Evaporation drives precipitation."),
            vec!["Evaporation", "precipitation"]
        );
    }

    #[test]
    fn test_possessive_marks_noun_and_opens_phrase() {
        assert_eq!(extract_nouns("Newton's laws describe motion."), vec!["Newton", "laws", "motion"]);
    }

    #[test]
    fn test_numbers_open_noun_phrase() {
        assert_eq!(extract_nouns("Spiders have 8 legs."), vec!["Spiders", "legs"]);
    }

    #[test]
    fn test_adverbs_are_ignored() {
        assert_eq!(extract_nouns("The train moved quickly."), vec!["train"]);
    }

    #[test]
    fn test_empty_sentence() {
        assert!(extract_nouns("").is_empty());
        assert!(extract_nouns("...").is_empty());
    }
}
