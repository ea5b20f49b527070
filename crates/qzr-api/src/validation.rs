use qzr_progress::Quiz;
use validator::ValidationError;

use crate::error::ApiError;

pub const MAX_TOPIC_CHARS: usize = 200;

/// Validate a study topic: 1 to 200 characters once surrounding whitespace is removed
///
/// # Examples
/// ```
/// use qzr_api::validation::validate_topic;
///
/// assert!(validate_topic("Photosynthesis").is_ok());
/// assert!(validate_topic("   ").is_err());
/// ```
pub fn validate_topic(topic: &str) -> Result<(), ValidationError> {
    let length = topic.trim().chars().count();
    let message = if length == 0 {
        "Topic cannot be empty".to_string()
    } else if length > MAX_TOPIC_CHARS {
        format!("Topic cannot exceed {MAX_TOPIC_CHARS} characters")
    } else {
        return Ok(());
    };

    let mut error = ValidationError::new("topic");
    error.message = Some(message.into());
    Err(error)
}

/// Check submitted answers against the quiz they answer.
///
/// Fewer answers than questions is allowed (a timed-out exam), but every given
/// answer must point at an existing option.
pub fn validate_answers(quiz: &Quiz, answers: &[usize]) -> Result<(), ApiError> {
    if answers.len() > quiz.questions.len() {
        return Err(ApiError::Validation(format!(
            "Got {} answers for {} questions",
            answers.len(),
            quiz.questions.len()
        )));
    }

    for (index, (question, answer)) in quiz.questions.iter().zip(answers).enumerate() {
        if *answer >= question.options.len() {
            return Err(ApiError::Validation(format!(
                "Answer {answer} to question {index} is not one of its {} options",
                question.options.len()
            )));
        }
    }

    Ok(())
}
