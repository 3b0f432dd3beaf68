/// The single source of randomness in a draw
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Reorders a pool of names before the draw takes from its front.
///
/// Any `FnMut(&mut [String])` is a shuffler, so tests can pass a fixed
/// permutation instead of a random one.
pub trait Shuffler {
    fn shuffle(&mut self, names: &mut [String]);
}

impl<F> Shuffler for F
where
    F: FnMut(&mut [String]),
{
    fn shuffle(&mut self, names: &mut [String]) {
        self(names)
    }
}

/// Uniform Fisher-Yates shuffling over a seeded `StdRng`.
///
/// The seed is kept so it can be written to the audit report. Not suitable
/// where the outcome must resist a motivated adversary.
pub struct RandomShuffler {
    rng: StdRng,
    seed: u64,
}

impl RandomShuffler {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// A shuffler with a seed taken from the thread-local generator, so each
    /// invocation gets an independent ordering.
    pub fn fresh() -> Self {
        Self::from_seed(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Shuffler for RandomShuffler {
    fn shuffle(&mut self, names: &mut [String]) {
        names.shuffle(&mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("p{}", i)).collect()
    }

    #[test]
    fn same_seed_same_order() {
        let mut a = names(20);
        let mut b = names(20);

        RandomShuffler::from_seed(7).shuffle(&mut a);
        RandomShuffler::from_seed(7).shuffle(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut shuffled = names(50);
        RandomShuffler::from_seed(99).shuffle(&mut shuffled);

        let mut sorted = shuffled.clone();
        sorted.sort();
        let mut expected = names(50);
        expected.sort();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn every_ordering_of_three_shows_up() {
        use std::collections::HashSet;

        let mut seen = HashSet::new();
        let mut shuffler = RandomShuffler::from_seed(1);
        for _ in 0..200 {
            let mut pool = names(3);
            shuffler.shuffle(&mut pool);
            seen.insert(pool);
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn closures_are_shufflers() {
        let mut reverse = |names: &mut [String]| names.reverse();
        let mut pool = names(3);
        reverse.shuffle(&mut pool);
        assert_eq!(pool, vec!["p2", "p1", "p0"]);
    }
}
