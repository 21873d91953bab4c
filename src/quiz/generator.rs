//! Question generation from a pool of countries.

use super::invariants::{InvariantSet, QuestionInvariants};
use super::question::{OPTIONS_COUNT, QuizQuestion};
use crate::countries::CountryRecord;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use tracing::{debug, instrument, trace, warn};

/// The pool cannot supply a full question.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_new::new,
)]
#[display(
    "Not enough country data to build a question: {available} distinct capitals available, {required} required"
)]
pub struct InsufficientData {
    /// Distinct capitals that could be offered.
    pub available: usize,
    /// Distinct capitals a question needs.
    pub required: usize,
}

/// Builds up to `count` questions from `pool`.
///
/// Source countries are drawn without replacement from a uniform
/// permutation of the pool, so the result has `min(count, pool.len())`
/// questions. Each question carries `OPTIONS_COUNT` distinct capitals.
///
/// # Errors
///
/// Returns [`InsufficientData`] if the pool is empty, holds fewer than
/// `OPTIONS_COUNT` distinct capitals, or cannot complete a question's
/// options without repeating a capital.
#[instrument(skip(pool, rng), fields(pool = pool.len()))]
pub fn generate<R: Rng + ?Sized>(
    pool: &[CountryRecord],
    count: usize,
    rng: &mut R,
) -> Result<Vec<QuizQuestion>, InsufficientData> {
    let available = distinct_capitals(pool);
    if pool.is_empty() || available < OPTIONS_COUNT {
        warn!(available, "Pool too small for a full question");
        return Err(InsufficientData::new(available, OPTIONS_COUNT));
    }

    let mut order: Vec<&CountryRecord> = pool.iter().collect();
    order.shuffle(rng);

    let questions = order
        .into_iter()
        .take(count)
        .enumerate()
        .map(|(idx, country)| build_question(idx + 1, country, pool, rng))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(questions = questions.len(), "Generated questions");
    Ok(questions)
}

/// Number of distinct first capitals in the pool.
pub(crate) fn distinct_capitals(pool: &[CountryRecord]) -> usize {
    pool.iter()
        .map(CountryRecord::capital)
        .collect::<HashSet<_>>()
        .len()
}

fn build_question<R: Rng + ?Sized>(
    id: usize,
    country: &CountryRecord,
    pool: &[CountryRecord],
    rng: &mut R,
) -> Result<QuizQuestion, InsufficientData> {
    let correct = country.capital();

    let mut candidates: Vec<&CountryRecord> = pool
        .iter()
        .filter(|c| c.display_name() != country.display_name())
        .collect();
    candidates.shuffle(rng);

    let mut options = Vec::with_capacity(OPTIONS_COUNT);
    options.push(correct.to_string());
    let mut drawn: HashSet<&str> = HashSet::new();

    for candidate in candidates {
        if options.len() == OPTIONS_COUNT {
            break;
        }
        let capital = candidate.capital();
        if options.iter().any(|o| o == capital) {
            trace!(country = %candidate.display_name(), capital, "Skipping duplicate capital");
            continue;
        }
        if !drawn.insert(candidate.display_name().as_str()) {
            continue;
        }
        options.push(capital.to_string());
    }

    if options.len() < OPTIONS_COUNT {
        warn!(
            country = %country.display_name(),
            found = options.len(),
            "Could not complete options"
        );
        return Err(InsufficientData::new(options.len(), OPTIONS_COUNT));
    }

    options.shuffle(rng);

    let question = QuizQuestion::new(
        id,
        country.flag_ref().clone(),
        country.display_name().clone(),
        country.country_code().clone(),
        correct.to_string(),
        options,
    );

    debug_assert!(
        QuestionInvariants::check_all(&question).is_ok(),
        "generated question violates invariants: {question:?}"
    );

    Ok(question)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn record(name: &str, capital: &str) -> CountryRecord {
        CountryRecord::new(name, [capital], format!("{name}.svg")).unwrap()
    }

    #[test]
    fn test_duplicate_display_names_not_both_drawn() {
        // Two "Narnia" entries must not both appear as distractors.
        let pool = vec![
            record("Archenland", "Anvard"),
            record("Narnia", "Cair Paravel"),
            record("Narnia", "Beaversdam"),
            record("Calormen", "Tashbaan"),
            record("Telmar", "Telmar City"),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..20 {
            let question = build_question(1, &pool[0], &pool, &mut rng).unwrap();
            let narnian = question
                .options()
                .iter()
                .filter(|o| *o == "Cair Paravel" || *o == "Beaversdam")
                .count();
            assert!(narnian <= 1);
        }
    }

    #[test]
    fn test_distinct_capitals_counts_first_capital_only() {
        let pool = vec![
            CountryRecord::new("A", ["X", "Y"], "a.svg").unwrap(),
            CountryRecord::new("B", ["Y"], "b.svg").unwrap(),
            CountryRecord::new("C", ["X"], "c.svg").unwrap(),
        ];
        assert_eq!(distinct_capitals(&pool), 2);
    }
}
