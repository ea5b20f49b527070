//! Prompt text sent to the language model.

use std::fmt::Write;

use qzr_progress::{Difficulty, Quiz};

pub fn quiz_prompt(topic: &str, difficulty: Difficulty, question_count: u32) -> String {
    format!(
        r#"Create a {difficulty} quiz about "{topic}" with exactly {question_count} multiple choice questions.

Requirements:
- Reply with valid JSON only, without any surrounding text or markdown
- Every question has exactly 4 options
- correctAnswer is the 0-based index (0-3) of the correct option
- Every question has an explanation of the correct answer
- Questions should be engaging and educational

JSON shape:
{{
  "title": "Quiz about [topic]",
  "topic": "{topic}",
  "difficulty": "{difficulty}",
  "questions": [
    {{
      "question": "Question text?",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correctAnswer": 0,
      "explanation": "Why this answer is correct",
      "difficulty": "{difficulty}"
    }}
  ]
}}"#
    )
}

pub fn flashcards_prompt(topic: &str, difficulty: Difficulty, card_count: u32) -> String {
    format!(
        r#"Create {card_count} flashcards about "{topic}" at {difficulty} level.

Requirements:
- Reply with a valid JSON array only, without any surrounding text
- The front holds a question or term, the back holds the answer or definition
- Cards should be educational and get progressively harder

JSON shape:
[
  {{
    "front": "Question or term",
    "back": "Answer or definition",
    "difficulty": "{difficulty}"
  }}
]"#
    )
}

/// Prompt asking for feedback on a finished quiz, listing every wrong answer
pub fn analysis_prompt(quiz: &Quiz, answers: &[usize], score: u32, time_spent_ms: u64) -> String {
    let total = quiz.questions.len();
    let percentage = percentage(score, total);

    let mut wrong = String::new();
    for (index, question) in quiz.questions.iter().enumerate() {
        let answer = answers.get(index).copied();
        if answer == Some(question.correct_answer) {
            continue;
        }
        if !wrong.is_empty() {
            wrong.push_str("\n\n");
        }
        let given = answer
            .and_then(|a| question.option_text(a))
            .unwrap_or("(no answer)");
        let _ = write!(
            wrong,
            "Q: {}\nYour Answer: {}\nCorrect Answer: {}",
            question.question,
            given,
            question.correct_text()
        );
    }

    format!(
        "Review this quiz attempt and give personal feedback:

Quiz Topic: {topic}
Difficulty: {difficulty}
Score: {score}/{total} ({percentage:.1}%)
Time Spent: {seconds} seconds

Wrong Answers:
{wrong}

Write 2-3 paragraphs covering:
1. How the attempt went overall
2. What to work on, based on the wrong answers
3. Encouraging next steps for further study

Keep the tone friendly, motivating and educational.",
        topic = quiz.topic,
        difficulty = quiz.difficulty,
        seconds = (time_spent_ms as f64 / 1000.0).round() as u64,
    )
}

pub(crate) fn percentage(score: u32, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(score) / total as f64 * 100.0
    }
}
