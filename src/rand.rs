use rand_core::{impls, OsRng, RngCore};

// Linear congruential generator parameters
const MUL: u64 = 6364136223846793005; // Knuth section 3.3.4 (p.108)
const INC: u64 = 1442695040888963407;

/// The single random stream of a run. Feeds both the per-frame jitter offsets and the shuffles
/// applied to point-source requests, so fixing its seed fixes the whole output.
#[derive(Debug, Clone, PartialEq)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Builds a generator whose state is derived from `seed`. Nearby seeds (`0`, `1`, ...) give
    /// unrelated streams because the seed is expanded with splitmix64 first.
    pub fn from_seed(seed: u64) -> Rng {
        Rng {
            state: splitmix64(seed),
        }
    }

    /// Draws a seed from the operating system and returns it together with the generator, so the
    /// caller can report it and the run can be reproduced later.
    pub fn from_entropy() -> (u64, Rng) {
        let seed = OsRng.next_u64();
        (seed, Rng::from_seed(seed))
    }

    fn step(&mut self) -> u32 {
        let old_state = self.state;
        // Advance internal state.
        self.state = old_state.wrapping_mul(MUL).wrapping_add(INC);
        // Output function (XSH RR) on the old state: PCG-XSH-RR, O'Neill 2014, section 6.3.1.
        let xorshifted = (((old_state >> 18) ^ old_state) >> 27) as u32;
        xorshifted.rotate_right((old_state >> 59) as u32)
    }

    /// Picks a random value uniformly distributed between `0.0` (inclusive) and `1.0` (exclusive).
    pub fn rnd(&mut self) -> f64 {
        2.0f64.powi(-32) * f64::from(self.step())
    }

    /// Picks an index uniformly from `0..n`.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0`.
    pub fn below(&mut self, n: usize) -> usize {
        assert!(n > 0, "empty range");
        ((self.rnd() * n as f64) as usize).min(n - 1)
    }

    /// Permutes `xs` in place, uniformly at random (Fisher-Yates).
    pub fn shuffle<T>(&mut self, xs: &mut [T]) {
        for i in (1..xs.len()).rev() {
            let j = self.below(i + 1);
            xs.swap(i, j);
        }
    }
}

impl RngCore for Rng {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_seed_state() {
        assert_eq!(Rng::from_seed(0).state, 0xe220a8397b1dcdaf);
        assert_eq!(Rng::from_seed(42).state, 0xbdd732262feb6e95);
    }

    #[test]
    fn test_rnd_sequence() {
        let mut rng = Rng::from_seed(0);
        let us: [f64; 6] = std::array::from_fn(|_| rng.rnd());
        assert_eq!(
            us,
            [
                0.25441566947847605,
                0.0649109655059874,
                0.24210245092399418,
                0.32071696035563946,
                0.4734735519159585,
                0.1892298806924373
            ]
        );

        let mut rng = Rng::from_seed(42);
        let us: [f64; 6] = std::array::from_fn(|_| rng.rnd());
        assert_eq!(
            us,
            [
                0.7786403570789844,
                0.4118672765325755,
                0.9315656123217195,
                0.17309365258552134,
                0.5235329170245677,
                0.3193103512749076
            ]
        );
    }

    #[test]
    fn test_next_u32_matches_rnd() {
        let mut rng = Rng::from_seed(7);
        let xs: [u32; 4] = std::array::from_fn(|_| rng.next_u32());
        assert_eq!(xs, [759666674, 3665813033, 1246614877, 4289388153]);
    }

    #[test]
    fn test_below_in_range() {
        let mut rng = Rng::from_seed(3);
        for n in 1..50 {
            for _ in 0..20 {
                assert!(rng.below(n) < n);
            }
        }
    }

    #[test]
    fn test_shuffle_empty_and_singleton() {
        let mut rng = Rng::from_seed(0);
        let mut empty: [u8; 0] = [];
        rng.shuffle(&mut empty);
        let mut one = [777];
        rng.shuffle(&mut one);
        assert_eq!(one, [777]);
    }

    #[test]
    fn test_shuffle_sequence() {
        let mut rng = Rng::from_seed(7);

        let mut colors = ['r', 'o', 'y', 'g', 'b', 'i', 'v'];
        rng.shuffle(&mut colors);
        assert_eq!(colors, ['y', 'r', 'b', 'g', 'v', 'i', 'o']);

        let mut colors = ['r', 'o', 'y', 'g', 'b', 'i', 'v'];
        rng.shuffle(&mut colors);
        assert_eq!(colors, ['i', 'y', 'b', 'r', 'g', 'v', 'o']);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = Rng::from_seed(11);
        let mut xs: Vec<usize> = (0..100).collect();
        rng.shuffle(&mut xs);
        assert_ne!(xs, (0..100).collect::<Vec<_>>());
        xs.sort_unstable();
        assert_eq!(xs, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = Rng::from_seed(99);
        let mut b = Rng::from_seed(99);
        for _ in 0..32 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }
}
