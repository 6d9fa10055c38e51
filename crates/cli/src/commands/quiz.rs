//! Power quiz commands.

use std::io::Write;

use clearr_core::quiz::{QUIZ_QUESTIONS, QuizResult, QuizSession};

use super::CommandError;

/// Print every question and its answer ids.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn questions(out: &mut impl Write) -> Result<(), CommandError> {
    for (index, question) in QUIZ_QUESTIONS.iter().enumerate() {
        writeln!(out, "{}. {} ({})", index + 1, question.id, question.key)?;
        for answer in question.answers {
            writeln!(out, "   {}  {}", answer.id, answer.key)?;
        }
    }
    Ok(())
}

/// Answer the quiz in order and print the recommendation.
///
/// # Errors
///
/// Returns [`CommandError::Quiz`] for an answer that does not fit its
/// question or an extra answer, and [`CommandError::QuizIncomplete`] when
/// answers run out early.
pub fn take<S: AsRef<str>>(out: &mut impl Write, answers: &[S]) -> Result<QuizResult, CommandError> {
    let mut session = QuizSession::new();
    for answer in answers {
        session.answer(answer.as_ref())?;
    }

    let result = match session.result() {
        Some(result) => result,
        None => {
            let missing = session.current_question().map_or("quiz", |q| q.id);
            return Err(CommandError::QuizIncomplete(missing));
        }
    };

    tracing::debug!(power = %result.power, "Quiz scored");
    writeln!(out, "Recommended power: {}", result.power)?;
    writeln!(out, "Order as: {}", result.nearest_option())?;
    if let Some(usage) = result.usage {
        writeln!(out, "Usage: {usage}")?;
    }
    if let Some(style) = result.style {
        writeln!(out, "Frame shape: {style}")?;
    }
    writeln!(out, "Shop filter: power={}", result.shop_filter())?;
    Ok(result)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clearr_core::LensPower;
    use clearr_core::quiz::QuizError;

    use super::*;
    use crate::commands::test_support::output;

    #[test]
    fn test_questions_lists_all_answers() {
        let mut buf = Vec::new();
        questions(&mut buf).unwrap();
        let text = output(buf);
        assert!(text.starts_with("1. age (ageQuestion)\n"));
        assert!(text.contains("   a6  60plus"));
        assert!(text.contains("3. style (styleQuestion)"));
    }

    #[test]
    fn test_take_prints_recommendation() {
        let mut buf = Vec::new();
        let result = take(&mut buf, &["a4", "u2", "s2"]).unwrap();
        assert_eq!(result.power, LensPower::from_hundredths(200));

        let text = output(buf);
        assert!(text.contains("Recommended power: +2.00"));
        assert!(text.contains("Order as: +2.00"));
        assert!(text.contains("Usage: computer"));
        assert!(text.contains("Frame shape: round"));
        assert!(text.contains("Shop filter: power=2"));
    }

    #[test]
    fn test_take_rejects_bad_answers() {
        let mut buf = Vec::new();
        let err = take(&mut buf, &["u1"]).unwrap_err();
        assert!(matches!(
            err,
            CommandError::Quiz(QuizError::UnknownAnswer { question: "age", .. })
        ));

        let err = take(&mut buf, &["a1", "u1"]).unwrap_err();
        assert!(matches!(err, CommandError::QuizIncomplete("style")));

        let err = take(&mut buf, &["a1", "u1", "s1", "s2"]).unwrap_err();
        assert!(matches!(err, CommandError::Quiz(QuizError::Finished)));
        assert!(buf.is_empty());
    }
}
