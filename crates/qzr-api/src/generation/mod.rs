//! AI content generation: quizzes, exams, flashcards and result feedback.
//!
//! [`QuizGenerator`] is what the routes call. [`AiQuizGenerator`] implements it
//! on top of any [`TextModel`], which in production is [`GeminiClient`].

pub mod gemini;
pub mod parse;
pub mod prompts;

use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use qzr_progress::{Difficulty, Flashcard, Quiz, QuizMode, grading::score_answers};
use thiserror::Error;
use uuid::Uuid;

pub use gemini::GeminiClient;

use crate::metrics;

pub const DEFAULT_QUIZ_QUESTIONS: u32 = 5;
pub const DEFAULT_FLASHCARDS: u32 = 10;
pub const DEFAULT_EXAM_QUESTIONS: u32 = 20;
pub const DEFAULT_EXAM_MINUTES: u32 = 30;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Model service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Malformed reply: {0}")]
    Malformed(String),
    #[error("Empty reply")]
    Empty,
}

/// A language model that answers a prompt with text
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Source of generated study content
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    async fn generate_quiz(
        &self,
        topic: &str,
        difficulty: Difficulty,
        question_count: u32,
    ) -> Result<Quiz, GenerationError>;

    async fn generate_flashcards(
        &self,
        topic: &str,
        difficulty: Difficulty,
        card_count: u32,
    ) -> Result<Vec<Flashcard>, GenerationError>;

    /// Written feedback on a finished attempt
    async fn analyze_result(
        &self,
        quiz: &Quiz,
        answers: &[usize],
        time_spent_ms: u64,
    ) -> Result<String, GenerationError>;
}

/// Generate a quiz and turn it into a timed exam
pub async fn generate_exam(
    generator: &dyn QuizGenerator,
    topic: &str,
    difficulty: Difficulty,
    question_count: u32,
    time_limit_minutes: u32,
) -> Result<Quiz, GenerationError> {
    let quiz = generator
        .generate_quiz(topic, difficulty, question_count)
        .await?;

    Ok(Quiz {
        mode: QuizMode::Exam,
        time_limit: Some(time_limit_minutes),
        ..quiz
    })
}

/// Feedback used when the model cannot analyze a result
pub fn fallback_analysis(quiz: &Quiz, score: u32) -> String {
    let total = quiz.questions.len();
    format!(
        "Great job completing the quiz! You scored {score}/{total} ({:.1}%). \
         Keep practicing to improve your knowledge in {}.",
        prompts::percentage(score, total),
        quiz.topic
    )
}

/// Analyze a result, falling back to [`fallback_analysis`] on any failure
pub async fn analyze_or_fallback(
    generator: &dyn QuizGenerator,
    quiz: &Quiz,
    answers: &[usize],
    time_spent_ms: u64,
) -> String {
    match generator.analyze_result(quiz, answers, time_spent_ms).await {
        Ok(analysis) => analysis,
        Err(e) => {
            tracing::warn!(quiz_id = %quiz.id, error = %e, "Analysis failed, using fallback");
            fallback_analysis(quiz, score_answers(quiz, answers))
        }
    }
}

/// [`QuizGenerator`] that prompts a [`TextModel`] and parses its JSON replies
#[derive(Debug, Clone)]
pub struct AiQuizGenerator<M> {
    model: M,
}

impl<M> AiQuizGenerator<M> {
    pub const fn new(model: M) -> Self {
        Self { model }
    }
}

impl<M: TextModel> AiQuizGenerator<M> {
    async fn timed<T>(
        &self,
        kind: &'static str,
        prompt: String,
        parse: impl FnOnce(String) -> Result<T, GenerationError> + Send,
    ) -> Result<T, GenerationError> {
        let started = Instant::now();
        let outcome = self.model.complete(&prompt).await.and_then(parse);
        metrics::record_generation(kind, started.elapsed().as_secs_f64(), outcome.is_ok());
        if let Err(e) = &outcome {
            tracing::warn!(kind, error = %e, "Generation failed");
        }
        outcome
    }
}

#[async_trait]
impl<M: TextModel> QuizGenerator for AiQuizGenerator<M> {
    async fn generate_quiz(
        &self,
        topic: &str,
        difficulty: Difficulty,
        question_count: u32,
    ) -> Result<Quiz, GenerationError> {
        let prompt = prompts::quiz_prompt(topic, difficulty, question_count);
        self.timed("quiz", prompt, |text| {
            let generated = parse::parse_quiz(&text)?;
            Ok(generated.into_quiz(Uuid::new_v4().to_string(), topic, difficulty, Utc::now()))
        })
        .await
    }

    async fn generate_flashcards(
        &self,
        topic: &str,
        difficulty: Difficulty,
        card_count: u32,
    ) -> Result<Vec<Flashcard>, GenerationError> {
        let prompt = prompts::flashcards_prompt(topic, difficulty, card_count);
        self.timed("flashcards", prompt, |text| {
            parse::parse_flashcards(&text, difficulty)
        })
        .await
    }

    async fn analyze_result(
        &self,
        quiz: &Quiz,
        answers: &[usize],
        time_spent_ms: u64,
    ) -> Result<String, GenerationError> {
        let score = score_answers(quiz, answers);
        let prompt = prompts::analysis_prompt(quiz, answers, score, time_spent_ms);
        self.timed("analysis", prompt, |text| {
            let text = text.trim();
            if text.is_empty() {
                Err(GenerationError::Empty)
            } else {
                Ok(text.to_string())
            }
        })
        .await
    }
}
