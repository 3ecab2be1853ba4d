use game_types::{VocabStat, VocabStats, WordPair};
use rand::Rng;
use rand::seq::SliceRandom;

const MILLIS_PER_DAY: f64 = 1000.0 * 3600.0 * 24.0;

/// Picks the words for a session, favouring words that are answered wrongly
/// or have not been answered correctly for a while.
#[derive(Debug, Clone, Copy)]
pub struct WordSelector {
    now_millis: i64,
    unseen_days_since_correct: f64,
}

impl WordSelector {
    pub fn new(now_millis: i64) -> Self {
        Self {
            now_millis,
            unseen_days_since_correct: 10.0,
        }
    }

    pub fn with_unseen_days(mut self, days: f64) -> Self {
        self.unseen_days_since_correct = days;
        self
    }

    /// Sampling weight for one word. Always strictly positive.
    pub fn weight(&self, stat: &VocabStat) -> f64 {
        let error_ratio =
            (f64::from(stat.incorrect_count) + 1.0) / (f64::from(stat.correct_count) + 1.0);

        let days_since_correct = if stat.has_been_correct() {
            self.now_millis.saturating_sub(stat.last_correct_epoch_millis) as f64 / MILLIS_PER_DAY
        } else {
            self.unseen_days_since_correct
        };
        let recency_bonus = days_since_correct.max(1.0).log10() + 1.0;

        error_ratio * recency_bonus
    }

    /// Return up to `count` pairs in random order.
    ///
    /// When `count` covers the whole list every pair comes back exactly once. Otherwise
    /// pairs are drawn by weight without replacement and the result is shuffled so its
    /// order says nothing about difficulty.
    pub fn select<R: Rng + ?Sized>(
        &self,
        pairs: &[WordPair],
        count: usize,
        stats: &VocabStats,
        rng: &mut R,
    ) -> Vec<WordPair> {
        if pairs.len() <= count {
            let mut all = pairs.to_vec();
            all.shuffle(rng);
            return all;
        }

        let weights: Vec<f64> = pairs
            .iter()
            .map(|pair| {
                let stat = stats.get(pair.key()).copied().unwrap_or_default();
                self.weight(&stat)
            })
            .collect();

        let mut chosen: Vec<WordPair> = Self::sample_indices(&weights, count, rng)
            .into_iter()
            .map(|index| pairs[index].clone())
            .collect();
        chosen.shuffle(rng);
        chosen
    }

    /// Weighted sampling without replacement.
    ///
    /// Each draw is uniform in `[0, remaining_total)`; the first untaken index whose
    /// cumulative weight exceeds the draw is taken and leaves the pool. Returns
    /// `min(count, weights.len())` distinct indices in draw order.
    pub fn sample_indices<R: Rng + ?Sized>(
        weights: &[f64],
        count: usize,
        rng: &mut R,
    ) -> Vec<usize> {
        let target = count.min(weights.len());
        let mut taken = vec![false; weights.len()];
        let mut chosen = Vec::with_capacity(target);

        while chosen.len() < target {
            let remaining: f64 = weights
                .iter()
                .zip(&taken)
                .filter(|(_, taken)| !**taken)
                .map(|(weight, _)| weight.max(0.0))
                .sum();
            let draw = rng.r#gen::<f64>() * remaining;

            let mut cumulative = 0.0;
            let mut picked = None;
            let mut last_available = None;
            for (index, weight) in weights.iter().enumerate() {
                if taken[index] {
                    continue;
                }
                last_available = Some(index);
                cumulative += weight.max(0.0);
                if draw < cumulative {
                    picked = Some(index);
                    break;
                }
            }

            // Rounding can leave the draw at the very end of the range.
            let Some(index) = picked.or(last_available) else {
                break;
            };
            taken[index] = true;
            chosen.push(index);
        }

        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;

    const NOW: i64 = 1_750_000_000_000;
    const DAY: i64 = 86_400_000;

    fn stat(correct: u32, incorrect: u32, last_correct: i64) -> VocabStat {
        VocabStat {
            correct_count: correct,
            incorrect_count: incorrect,
            last_correct_epoch_millis: last_correct,
        }
    }

    #[test]
    fn test_unseen_word_weight() {
        let selector = WordSelector::new(NOW);
        // ratio 1, ten days stale -> log10(10) + 1 = 2
        assert!((selector.weight(&VocabStat::default()) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_recent_correct_word_has_recency_floor() {
        let selector = WordSelector::new(NOW);
        let weight = selector.weight(&stat(3, 0, NOW - DAY / 2));
        assert!((weight - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_weight_grows_with_errors_and_staleness() {
        let selector = WordSelector::new(NOW);
        let base = selector.weight(&stat(1, 1, NOW - 5 * DAY));
        assert!(selector.weight(&stat(1, 4, NOW - 5 * DAY)) > base);
        assert!(selector.weight(&stat(1, 1, NOW - 50 * DAY)) > base);
        assert!(selector.weight(&stat(6, 1, NOW - 5 * DAY)) < base);
    }

    #[test]
    fn test_future_timestamp_stays_positive() {
        let selector = WordSelector::new(NOW);
        let weight = selector.weight(&stat(0, 0, NOW + 30 * DAY));
        assert!((weight - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_saturated_counters_keep_finite_weights() {
        let selector = WordSelector::new(NOW);

        let struggling = selector.weight(&stat(0, u32::MAX, 0));
        assert!(struggling.is_finite());
        assert!((struggling - 2.0 * (f64::from(u32::MAX) + 1.0)).abs() < 1.0);

        let mastered = selector.weight(&stat(u32::MAX, 0, NOW - DAY));
        assert!(mastered > 0.0 && mastered < 1e-9);

        let both = selector.weight(&stat(u32::MAX, u32::MAX, 1));
        assert!(both.is_finite() && both > 0.0);
    }

    #[test]
    fn test_sample_indices_walks_cumulative_weight() {
        // StepRng(0, 0) always draws 0.0, so the first untaken index wins each round.
        let mut rng = StepRng::new(0, 0);
        let picked = WordSelector::sample_indices(&[1.0, 5.0, 2.0], 3, &mut rng);
        assert_eq!(picked, vec![0, 1, 2]);
    }

    #[test]
    fn test_sample_indices_top_of_range() {
        // u64::MAX maps to the largest f64 below 1.0, so the last untaken index wins.
        let mut rng = StepRng::new(u64::MAX, 0);
        let picked = WordSelector::sample_indices(&[1.0, 5.0, 2.0], 2, &mut rng);
        assert_eq!(picked, vec![2, 1]);
    }

    #[test]
    fn test_sample_indices_terminates_on_degenerate_weights() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut picked = WordSelector::sample_indices(&[0.0, 0.0, 0.0], 5, &mut rng);
        picked.sort();
        assert_eq!(picked, vec![0, 1, 2]);

        assert!(WordSelector::sample_indices(&[], 3, &mut rng).is_empty());
    }

    #[test]
    fn test_select_empty_input() {
        let mut rng = StdRng::seed_from_u64(1);
        let selector = WordSelector::new(NOW);
        assert!(selector.select(&[], 5, &VocabStats::new(), &mut rng).is_empty());
    }
}
