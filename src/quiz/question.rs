//! Quiz question type.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Questions per session unless configured otherwise.
pub const TOTAL_QUESTIONS: usize = 10;

/// Options shown per question, correct answer included.
pub const OPTIONS_COUNT: usize = 4;

/// A single "which capital belongs to this flag" question.
///
/// Built only by the generator, which guarantees `OPTIONS_COUNT`
/// distinct options containing the correct answer.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// 1-based position within the session.
    id: usize,
    /// Flag image reference of the source country.
    flag_ref: String,
    /// Display name of the source country.
    country_name: String,
    /// ISO alpha-2 code of the source country, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    country_code: Option<String>,
    /// First capital of the source country.
    correct_answer: String,
    /// Capitals in display order.
    options: Vec<String>,
}

impl QuizQuestion {
    pub(crate) fn new(
        id: usize,
        flag_ref: String,
        country_name: String,
        country_code: Option<String>,
        correct_answer: String,
        options: Vec<String>,
    ) -> Self {
        Self {
            id,
            flag_ref,
            country_name,
            country_code,
            correct_answer,
            options,
        }
    }

    /// Whether `choice` is the correct capital.
    pub fn is_correct(&self, choice: &str) -> bool {
        self.correct_answer == choice
    }

    /// Flag emoji for terminals that cannot show the image.
    pub fn flag_emoji(&self) -> Option<String> {
        self.country_code
            .as_deref()
            .and_then(crate::countries::flag_emoji)
    }
}
