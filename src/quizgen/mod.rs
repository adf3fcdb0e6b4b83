//! Multiple-choice quiz generation from note text.
//!
//! Each of the first [`MAX_QUESTIONS`] sentences becomes one question whose
//! answer is the first noun found in it, mixed with three fixed distractors.

mod nouns;
mod sentences;
mod shuffle;

use serde::{Deserialize, Serialize};

pub use nouns::extract_nouns;
pub use sentences::split_sentences;
pub use shuffle::{FixedPermutation, KeepOrder, RandomShuffler, Shuffler};

pub const MAX_QUESTIONS: usize = 10;

/// Answer used when a sentence yields no noun.
pub const FALLBACK_ANSWER: &str = "Answer";

pub const DISTRACTORS: [&str; 3] = ["Option A", "Option B", "Option C"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl Question {
    /// Empty question as added by hand in the quiz editor.
    pub fn blank() -> Self {
        Self {
            text: String::new(),
            options: vec![String::new(); 4],
            answer: String::new(),
        }
    }

    pub fn correct_option(&self) -> Option<usize> {
        self.options.iter().position(|o| *o == self.answer)
    }

    pub fn is_valid(&self) -> bool {
        !self.text.trim().is_empty()
            && self.options.len() == 4
            && !self.answer.trim().is_empty()
            && self.correct_option().is_some()
    }
}

/// Result of one generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizDraft {
    pub questions: Vec<Question>,
}

impl QuizDraft {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }
}

pub struct QuizGenerator<S: Shuffler> {
    shuffler: S,
}

impl<S: Shuffler> QuizGenerator<S> {
    pub fn new(shuffler: S) -> Self {
        Self { shuffler }
    }

    pub fn generate(&mut self, note_text: &str) -> QuizDraft {
        let questions = split_sentences(note_text)
            .into_iter()
            .take(MAX_QUESTIONS)
            .map(|sentence| self.question_for(sentence))
            .collect();
        QuizDraft { questions }
    }

    fn question_for(&mut self, sentence: String) -> Question {
        let answer = extract_nouns(&sentence)
            .into_iter()
            .next()
            .unwrap_or_else(|| FALLBACK_ANSWER.to_string());

        let mut options = Vec::with_capacity(4);
        options.push(answer.clone());
        options.extend(DISTRACTORS.iter().map(|d| d.to_string()));
        self.shuffler.shuffle(&mut options);

        Question {
            text: sentence,
            options,
            answer,
        }
    }
}

/// Generate a quiz using the thread RNG for option order.
pub fn generate(note_text: &str) -> QuizDraft {
    QuizGenerator::new(RandomShuffler::thread()).generate(note_text)
}

/// Same as [`generate`], treating absent text as empty.
pub fn generate_from(note_text: Option<&str>) -> QuizDraft {
    generate(note_text.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sorted(options: &[String]) -> Vec<String> {
        let mut options = options.to_vec();
        options.sort();
        options
    }

    #[test]
    fn test_scenario_two_sentences() {
        let draft = generate("The cat sat on the mat. The dog ran fast.");
        assert_eq!(draft.len(), 2);

        let first = &draft.questions[0];
        assert_eq!(first.text, "The cat sat on the mat.");
        assert!(first.answer == "cat" || first.answer == "mat");
        assert_eq!(
            sorted(&first.options),
            sorted(&[
                first.answer.clone(),
                "Option A".to_string(),
                "Option B".to_string(),
                "Option C".to_string(),
            ])
        );
        assert_eq!(draft.questions[1].answer, "dog");
    }

    #[test]
    fn test_empty_and_absent_input() {
        assert!(generate("").is_empty());
        assert!(generate_from(None).is_empty());
        assert!(generate("   \n\n  ").is_empty());
    }

    #[test]
    fn test_sentence_without_noun_uses_fallback() {
        let draft = generate("Go now.");
        assert_eq!(draft.len(), 1);
        assert_eq!(draft.questions[0].answer, FALLBACK_ANSWER);
        assert!(draft.questions[0].options.contains(&FALLBACK_ANSWER.to_string()));
    }

    #[test]
    fn test_truncates_to_max_questions() {
        let text = (1..=15)
            .map(|i| format!("Sentence number {} mentions a topic.", i))
            .collect::<Vec<_>>()
            .join(" ");
        let draft = generate(&text);
        assert_eq!(draft.len(), MAX_QUESTIONS);
        assert_eq!(draft.questions[0].text, "Sentence number 1 mentions a topic.");
        assert_eq!(draft.questions[9].text, "Sentence number 10 mentions a topic.");
    }

    #[test]
    fn test_fewer_sentences_are_not_padded() {
        let draft = generate("One idea here. Another idea there. A third idea.");
        assert_eq!(draft.len(), 3);
    }

    #[test]
    fn test_sentence_ending_words_keep_question_count() {
        let text = "The answer is no. I took vitamin C. \
                    We met in Dec. Birds sing.";
        let draft = generate(text);
        assert_eq!(draft.len(), 4);
        assert_eq!(draft.questions[0].text, "The answer is no.");
        assert_eq!(draft.questions[1].text, "I took vitamin C.");
        assert_eq!(draft.questions[3].answer, "Birds");
    }

    #[test]
    fn test_every_question_is_well_formed() {
        let text = "Photosynthesis converts light into energy. Go now! \
                    Mitochondria power the cell. Why? The river flows into the sea.";
        for question in generate(text).questions {
            assert_eq!(question.options.len(), 4);
            assert!(question.options.contains(&question.answer));
            for distractor in DISTRACTORS {
                assert!(question.options.iter().any(|o| o == distractor));
            }
            assert!(question.is_valid());
        }
    }

    #[test]
    fn test_structure_is_stable_across_calls() {
        let text = "The moon orbits the earth. Tides follow the moon.";
        let a = generate(text);
        let b = generate(text);
        assert_eq!(a.len(), b.len());
        for (qa, qb) in a.questions.iter().zip(&b.questions) {
            assert_eq!(qa.text, qb.text);
            assert_eq!(qa.answer, qb.answer);
            assert_eq!(sorted(&qa.options), sorted(&qb.options));
        }
    }

    #[test]
    fn test_keep_order_puts_answer_first() {
        let draft = QuizGenerator::new(KeepOrder).generate("The cat sat on the mat.");
        assert_eq!(
            draft.questions[0].options,
            vec!["cat", "Option A", "Option B", "Option C"]
        );
    }

    #[test]
    fn test_fixed_permutation_is_injectable() {
        let shuffler = FixedPermutation::new(vec![1, 2, 3, 0]).unwrap();
        let draft = QuizGenerator::new(shuffler).generate("The cat sat on the mat.");
        let question = &draft.questions[0];
        assert_eq!(question.options, vec!["Option A", "Option B", "Option C", "cat"]);
        assert_eq!(question.correct_option(), Some(3));
    }

    #[test]
    fn test_shuffle_is_fair_across_positions() {
        const RUNS: usize = 8000;
        let mut generator = QuizGenerator::new(RandomShuffler::new(StdRng::seed_from_u64(42)));
        let labels = ["cat", "Option A", "Option B", "Option C"];
        let mut counts = [[0usize; 4]; 4];

        for _ in 0..RUNS {
            let draft = generator.generate("The cat slept.");
            let options = &draft.questions[0].options;
            for (position, option) in options.iter().enumerate() {
                let label = labels.iter().position(|l| l == option).unwrap();
                counts[label][position] += 1;
            }
        }

        let expected = RUNS as f64 / 4.0;
        for row in counts {
            for count in row {
                let deviation = (count as f64 - expected).abs() / expected;
                assert!(deviation < 0.1, "count {} too far from {}", count, expected);
            }
        }
    }

    #[test]
    fn test_blank_question_is_invalid() {
        let question = Question::blank();
        assert_eq!(question.options.len(), 4);
        assert!(!question.is_valid());
    }
}
