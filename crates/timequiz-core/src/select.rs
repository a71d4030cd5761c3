//! Random question selection and option shuffling.

use rand::Rng;

use crate::error::QuizError;
use crate::model::{QuestionBank, QuestionRecord, SessionQuestion};

/// In-place Fisher–Yates shuffle.
///
/// Walks from the last slot down to 1, swapping each with a uniformly
/// chosen slot in `0..=i`.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Draw `count` distinct questions from the bank, each with its options
/// reshuffled.
///
/// Selection is without replacement: the whole bank is permuted and the
/// first `count` records are taken.
pub fn select_session<R: Rng + ?Sized>(
    bank: &QuestionBank,
    count: usize,
    rng: &mut R,
) -> Result<Vec<SessionQuestion>, QuizError> {
    if count > bank.len() {
        return Err(QuizError::InsufficientData {
            required: count,
            available: bank.len(),
        });
    }

    let mut order: Vec<&QuestionRecord> = bank.records().iter().collect();
    shuffle(&mut order, rng);

    Ok(order
        .into_iter()
        .take(count)
        .map(|record| shuffle_options(record, rng))
        .collect())
}

/// Reorder a record's options, keeping track of where the correct one lands.
pub fn shuffle_options<R: Rng + ?Sized>(record: &QuestionRecord, rng: &mut R) -> SessionQuestion {
    let mut slots: Vec<usize> = (0..record.options.len()).collect();
    shuffle(&mut slots, rng);

    let correct_index = slots
        .iter()
        .position(|&slot| slot == record.correct_index)
        .unwrap_or(record.correct_index);

    SessionQuestion {
        prompt: record.prompt.clone(),
        options: slots.iter().map(|&slot| record.options[slot].clone()).collect(),
        correct_index,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::bank;

    #[test]
    fn selects_distinct_questions() {
        let bank = bank::builtin().unwrap();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = select_session(&bank, 10, &mut rng).unwrap();
            assert_eq!(picked.len(), 10);
            let prompts: HashSet<_> = picked.iter().map(|q| q.prompt.as_str()).collect();
            assert_eq!(prompts.len(), 10, "seed {seed} drew a repeat");
        }
    }

    #[test]
    fn correct_index_follows_the_correct_text() {
        let bank = bank::builtin().unwrap();
        let originals: HashMap<_, _> = bank
            .records()
            .iter()
            .map(|r| (r.prompt.as_str(), r.correct_text()))
            .collect();

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            for question in select_session(&bank, 10, &mut rng).unwrap() {
                assert_eq!(question.options.len(), 4);
                assert_eq!(question.correct_text(), originals[question.prompt.as_str()]);
            }
        }
    }

    #[test]
    fn shuffled_options_are_a_permutation() {
        let record = QuestionRecord::new("q", ["w", "x", "y", "z"], 3);
        let mut rng = StdRng::seed_from_u64(7);
        let question = shuffle_options(&record, &mut rng);
        let mut sorted = question.options.clone();
        sorted.sort();
        assert_eq!(sorted, vec!["w", "x", "y", "z"]);
        assert_eq!(question.correct_text(), "z");
    }

    #[test]
    fn whole_bank_can_be_drawn() {
        let bank = QuestionBank::new(bank::builtin_records()[..10].to_vec()).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let picked = select_session(&bank, 10, &mut rng).unwrap();
        let prompts: HashSet<_> = picked.iter().map(|q| q.prompt.clone()).collect();
        let expected: HashSet<_> = bank.records().iter().map(|r| r.prompt.clone()).collect();
        assert_eq!(prompts, expected);
    }

    #[test]
    fn insufficient_bank_is_an_error() {
        let bank = QuestionBank::new(bank::builtin_records()[..4].to_vec()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            select_session(&bank, 10, &mut rng),
            Err(QuizError::InsufficientData {
                required: 10,
                available: 4
            })
        );
    }

    #[test]
    fn same_seed_same_draw() {
        let bank = bank::builtin().unwrap();
        let a = select_session(&bank, 10, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = select_session(&bank, 10, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn every_record_can_lead_a_session() {
        let bank = bank::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let mut leaders = HashSet::new();
        for _ in 0..2_000 {
            let picked = select_session(&bank, 1, &mut rng).unwrap();
            leaders.insert(picked[0].prompt.clone());
        }
        assert_eq!(leaders.len(), bank.len());
    }
}
