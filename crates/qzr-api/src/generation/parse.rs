//! Turning model replies into quizzes and flashcards.

use chrono::{DateTime, Utc};
use qzr_progress::{Difficulty, Flashcard, Question, Quiz, QuizMode};
use serde::Deserialize;

use super::GenerationError;

/// Remove markdown code fences around a JSON reply
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string, e.g. "json", up to the end of the opening line
    let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Quiz as the model describes it, before ids and timestamps are assigned
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuiz {
    #[serde(default)]
    pub title: String,
    pub questions: Vec<GeneratedQuestion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: String,
    pub difficulty: Option<Difficulty>,
}

impl GeneratedQuiz {
    /// Attach identity to the parsed quiz.
    ///
    /// Topic and difficulty come from the request, not the reply, so stats are
    /// keyed by what the user asked for.
    pub fn into_quiz(
        self,
        id: String,
        topic: &str,
        difficulty: Difficulty,
        created_at: DateTime<Utc>,
    ) -> Quiz {
        let title = if self.title.trim().is_empty() {
            format!("Quiz about {topic}")
        } else {
            self.title
        };

        Quiz {
            id,
            title,
            topic: topic.to_string(),
            difficulty,
            mode: QuizMode::Quiz,
            questions: self
                .questions
                .into_iter()
                .map(|q| Question {
                    question: q.question,
                    options: q.options,
                    correct_answer: q.correct_answer,
                    explanation: q.explanation,
                    difficulty: q.difficulty.unwrap_or(difficulty),
                })
                .collect(),
            created_at,
            time_limit: None,
        }
    }
}

pub fn parse_quiz(text: &str) -> Result<GeneratedQuiz, GenerationError> {
    let quiz: GeneratedQuiz = serde_json::from_str(strip_code_fences(text))
        .map_err(|e| GenerationError::Malformed(e.to_string()))?;

    if quiz.questions.is_empty() {
        return Err(GenerationError::Malformed("quiz has no questions".to_string()));
    }
    for (index, question) in quiz.questions.iter().enumerate() {
        if question.question.trim().is_empty() {
            return Err(GenerationError::Malformed(format!(
                "question {index} has no text"
            )));
        }
        if question.options.len() < 2 {
            return Err(GenerationError::Malformed(format!(
                "question {index} has {} options",
                question.options.len()
            )));
        }
        if question.correct_answer >= question.options.len() {
            return Err(GenerationError::Malformed(format!(
                "question {index} marks option {} correct out of {}",
                question.correct_answer,
                question.options.len()
            )));
        }
    }

    Ok(quiz)
}

pub fn parse_flashcards(
    text: &str,
    difficulty: Difficulty,
) -> Result<Vec<Flashcard>, GenerationError> {
    #[derive(Deserialize)]
    struct GeneratedCard {
        front: String,
        back: String,
        difficulty: Option<Difficulty>,
    }

    let cards: Vec<GeneratedCard> = serde_json::from_str(strip_code_fences(text))
        .map_err(|e| GenerationError::Malformed(e.to_string()))?;

    if cards.is_empty() {
        return Err(GenerationError::Malformed("no flashcards".to_string()));
    }

    Ok(cards
        .into_iter()
        .map(|card| Flashcard {
            front: card.front,
            back: card.back,
            difficulty: card.difficulty.unwrap_or(difficulty),
        })
        .collect())
}
