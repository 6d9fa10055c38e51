//! Reading-power quiz.
//!
//! Three questions (age bracket, daily usage, frame style) lead to a lens power
//! recommendation. The catalog is static; [`QuizSession`] walks a customer
//! through it one answer at a time and [`compute_power`] scores the result.
//!
//! Only the age bracket determines the power today. The usage answer is
//! collected and passed to [`compute_power`] but does not change the result.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::types::{LensPower, PowerOption};

/// Question id for the age bracket.
pub const AGE_QUESTION: &str = "age";
/// Question id for daily usage.
pub const USAGE_QUESTION: &str = "usage";
/// Question id for frame style.
pub const STYLE_QUESTION: &str = "style";

/// The value carried by an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnswerValue {
    /// A lens power (age brackets).
    Power(LensPower),
    /// A category label (usage, frame style).
    Category(&'static str),
}

impl AnswerValue {
    #[must_use]
    pub const fn as_power(&self) -> Option<LensPower> {
        match self {
            Self::Power(power) => Some(*power),
            Self::Category(_) => None,
        }
    }

    #[must_use]
    pub const fn as_category(&self) -> Option<&'static str> {
        match self {
            Self::Category(label) => Some(*label),
            Self::Power(_) => None,
        }
    }
}

/// One selectable answer. `key` is the translation key for its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizAnswer {
    pub id: &'static str,
    pub key: &'static str,
    pub value: AnswerValue,
}

/// A quiz question and its answers, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    pub id: &'static str,
    pub key: &'static str,
    pub answers: &'static [QuizAnswer],
}

impl QuizQuestion {
    /// Find an answer by id.
    #[must_use]
    pub fn answer(&self, answer_id: &str) -> Option<&'static QuizAnswer> {
        self.answers.iter().find(|answer| answer.id == answer_id)
    }
}

const fn power_answer(id: &'static str, key: &'static str, hundredths: i64) -> QuizAnswer {
    QuizAnswer {
        id,
        key,
        value: AnswerValue::Power(LensPower::from_hundredths(hundredths)),
    }
}

const fn category_answer(id: &'static str, key: &'static str, label: &'static str) -> QuizAnswer {
    QuizAnswer {
        id,
        key,
        value: AnswerValue::Category(label),
    }
}

static AGE_ANSWERS: [QuizAnswer; 6] = [
    power_answer("a1", "under40", 75),
    power_answer("a2", "40-44", 100),
    power_answer("a3", "45-49", 150),
    power_answer("a4", "50-54", 200),
    power_answer("a5", "55-59", 250),
    power_answer("a6", "60plus", 300),
];

static USAGE_ANSWERS: [QuizAnswer; 2] = [
    category_answer("u1", "reading", "reading"),
    category_answer("u2", "computer", "computer"),
];

static STYLE_ANSWERS: [QuizAnswer; 3] = [
    category_answer("s1", "classic", "rectangular"),
    category_answer("s2", "modern", "round"),
    category_answer("s3", "bold", "square"),
];

/// The quiz, in the order questions are asked.
pub static QUIZ_QUESTIONS: [QuizQuestion; 3] = [
    QuizQuestion {
        id: AGE_QUESTION,
        key: "ageQuestion",
        answers: &AGE_ANSWERS,
    },
    QuizQuestion {
        id: USAGE_QUESTION,
        key: "usageQuestion",
        answers: &USAGE_ANSWERS,
    },
    QuizQuestion {
        id: STYLE_QUESTION,
        key: "styleQuestion",
        answers: &STYLE_ANSWERS,
    },
];

/// Find a question by id.
#[must_use]
pub fn question(id: &str) -> Option<&'static QuizQuestion> {
    QUIZ_QUESTIONS.iter().find(|question| question.id == id)
}

/// Recommend a lens power from the age-bracket value and usage category.
///
/// The recommendation is the age-bracket value as-is. `usage` is accepted so
/// callers pass everything the quiz collects, but no adjustment for it has
/// been agreed yet. Values are not checked against the catalog.
///
/// ```
/// use clearr_core::quiz::compute_power;
/// use clearr_core::LensPower;
///
/// let age = LensPower::from_hundredths(150);
/// assert_eq!(compute_power(age, "computer"), age);
/// assert_eq!(compute_power(age, "reading"), age);
/// ```
#[must_use]
pub const fn compute_power(age_value: LensPower, _usage: &str) -> LensPower {
    age_value
}

/// Errors from answering quiz questions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// Every question has already been answered.
    #[error("quiz is already finished")]
    Finished,
    /// The answer id does not belong to the current question.
    #[error("unknown answer {answer} for question {question}")]
    UnknownAnswer {
        question: &'static str,
        answer: String,
    },
}

/// The outcome of a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    /// Recommended lens power.
    pub power: LensPower,
    /// Usage category label, if answered.
    pub usage: Option<&'static str>,
    /// Preferred frame shape, if answered.
    pub style: Option<&'static str>,
}

impl QuizResult {
    /// Value for the `power` filter on the shop listing, e.g. `1.5`.
    #[must_use]
    pub fn shop_filter(&self) -> String {
        self.power.value().normalize().to_string()
    }

    /// Closest power a customer can order.
    #[must_use]
    pub fn nearest_option(&self) -> PowerOption {
        PowerOption::nearest(self.power)
    }
}

/// A customer's progress through the quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizSession {
    step: usize,
    answers: BTreeMap<&'static str, &'static QuizAnswer>,
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-based index of the question being asked.
    #[must_use]
    pub const fn step(&self) -> usize {
        self.step
    }

    /// The question being asked, or `None` once finished.
    #[must_use]
    pub fn current_question(&self) -> Option<&'static QuizQuestion> {
        QUIZ_QUESTIONS.get(self.step)
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.step >= QUIZ_QUESTIONS.len()
    }

    /// Share of questions answered, 0 to 100.
    #[must_use]
    pub const fn progress_percent(&self) -> usize {
        let answered = if self.step > QUIZ_QUESTIONS.len() {
            QUIZ_QUESTIONS.len()
        } else {
            self.step
        };
        answered * 100 / QUIZ_QUESTIONS.len()
    }

    /// Answer the current question and move to the next one.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::Finished`] when every question is answered, or
    /// [`QuizError::UnknownAnswer`] when `answer_id` is not an answer of the
    /// current question. The session does not advance on error.
    pub fn answer(&mut self, answer_id: &str) -> Result<&'static QuizAnswer, QuizError> {
        let question = self.current_question().ok_or(QuizError::Finished)?;
        let answer = question
            .answer(answer_id)
            .ok_or_else(|| QuizError::UnknownAnswer {
                question: question.id,
                answer: answer_id.to_owned(),
            })?;

        self.answers.insert(question.id, answer);
        self.step += 1;
        Ok(answer)
    }

    /// The answer recorded for a question.
    #[must_use]
    pub fn selected(&self, question_id: &str) -> Option<&'static QuizAnswer> {
        self.answers.get(question_id).copied()
    }

    /// Start over.
    pub fn retake(&mut self) {
        self.step = 0;
        self.answers.clear();
    }

    /// Score the quiz once every question is answered.
    ///
    /// A missing or non-power age answer scores as zero power.
    #[must_use]
    pub fn result(&self) -> Option<QuizResult> {
        if !self.is_finished() {
            return None;
        }

        let category = |question_id: &str| {
            self.selected(question_id)
                .and_then(|answer| answer.value.as_category())
        };

        let age_value = self
            .selected(AGE_QUESTION)
            .and_then(|answer| answer.value.as_power())
            .unwrap_or(LensPower::ZERO);
        let usage = category(USAGE_QUESTION);

        Some(QuizResult {
            power: compute_power(age_value, usage.unwrap_or_default()),
            usage,
            style: category(STYLE_QUESTION),
        })
    }
}
