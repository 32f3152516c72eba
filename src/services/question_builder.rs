use std::collections::HashSet;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::database::repository::WordRepository;
use crate::models::quiz_question::QuizQuestion;
use crate::models::word::{Word, WordFilter};

pub const DISTRACTORS_PER_QUESTION: usize = 3;

/// Builds one question: the word's translation plus up to three distinct wrong
/// translations drawn from `candidates`, padded with "오답N" placeholders,
/// in random order.
pub fn build_question<R: Rng + ?Sized>(word: Word, candidates: &[String], rng: &mut R) -> QuizQuestion {
    let correct_answer = word.korean.clone();

    let mut seen = HashSet::new();
    let unique: Vec<&String> = candidates
        .iter()
        .filter(|c| **c != correct_answer && seen.insert(c.as_str()))
        .collect();

    let mut options: Vec<String> = unique
        .choose_multiple(rng, DISTRACTORS_PER_QUESTION)
        .map(|c| (*c).clone())
        .collect();

    let placeholders = (1..).map(|n| format!("오답{}", n));
    for placeholder in placeholders {
        if options.len() == DISTRACTORS_PER_QUESTION {
            break;
        }
        if placeholder != correct_answer && !options.contains(&placeholder) {
            options.push(placeholder);
        }
    }

    options.push(correct_answer.clone());
    options.shuffle(rng);

    QuizQuestion {
        word,
        options,
        correct_answer,
    }
}

#[derive(Clone)]
pub struct QuestionSetBuilder {
    words: Arc<dyn WordRepository>,
    distractor_sample_size: i64,
}

impl QuestionSetBuilder {
    pub fn new(words: Arc<dyn WordRepository>, distractor_sample_size: i64) -> Self {
        Self {
            words,
            distractor_sample_size,
        }
    }

    /// Random sample of active words for a general quiz. Empty on failure.
    pub async fn sample_words(&self, count: usize) -> Vec<Word> {
        let filter = WordFilter::active().shuffled().limit(count as i64);
        match self.words.fetch_words(&filter).await {
            Ok(words) => words,
            Err(e) => {
                tracing::error!(error = ?e, "Error loading quiz words");
                Vec::new()
            }
        }
    }

    /// Active words among `ids`, in random order. Empty on failure.
    pub async fn words_by_ids(&self, ids: Vec<Uuid>) -> Vec<Word> {
        if ids.is_empty() {
            return Vec::new();
        }
        let filter = WordFilter::active().with_ids(ids).shuffled();
        match self.words.fetch_words(&filter).await {
            Ok(words) => words,
            Err(e) => {
                tracing::error!(error = ?e, "Error loading practice words");
                Vec::new()
            }
        }
    }

    /// Turns up to `count` distinct words from `source_words` into questions,
    /// keeping their order. Each word gets its own distractor draw from the
    /// other active words.
    pub async fn build<R: Rng + Send>(
        &self,
        count: usize,
        source_words: Vec<Word>,
        rng: &mut R,
    ) -> Vec<QuizQuestion> {
        let mut seen = HashSet::new();
        let words: Vec<Word> = source_words
            .into_iter()
            .filter(|w| seen.insert(w.id))
            .take(count)
            .collect();

        let mut questions = Vec::with_capacity(words.len());
        for word in words {
            let candidates = self.distractor_candidates(&word).await;
            questions.push(build_question(word, &candidates, rng));
        }
        questions
    }

    async fn distractor_candidates(&self, word: &Word) -> Vec<String> {
        let filter = WordFilter::active()
            .excluding(vec![word.id])
            .shuffled()
            .limit(self.distractor_sample_size);
        match self.words.fetch_words(&filter).await {
            Ok(others) => others.into_iter().map(|w| w.korean).collect(),
            Err(e) => {
                tracing::warn!(word_id = %word.id, error = ?e, "Falling back to placeholder distractors");
                Vec::new()
            }
        }
    }
}
