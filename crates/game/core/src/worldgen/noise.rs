//! Seeded 2D gradient noise.

const TABLE_SIZE: usize = 256;

/// Classic 2D gradient noise over a seeded permutation table.
///
/// Each generator owns its table, so two generators with different seeds
/// never interfere with each other.
#[derive(Clone, Debug)]
pub struct PerlinNoise {
    seed: u64,
    /// 256-entry permutation duplicated to avoid index wrapping.
    perm: [u8; TABLE_SIZE * 2],
}

/// Linear congruential sequence used to shuffle the permutation table.
struct ShuffleLcg(u64);

impl ShuffleLcg {
    const MULTIPLIER: u64 = 9301;
    const INCREMENT: u64 = 49297;
    const MODULUS: u64 = 233280;

    fn new(seed: u64) -> Self {
        Self(seed % Self::MODULUS)
    }

    /// Next value in `[0, 1)`.
    fn next_unit(&mut self) -> f64 {
        self.0 = (self.0 * Self::MULTIPLIER + Self::INCREMENT) % Self::MODULUS;
        self.0 as f64 / Self::MODULUS as f64
    }
}

impl PerlinNoise {
    pub fn new(seed: u64) -> Self {
        let mut table: [u8; TABLE_SIZE] = std::array::from_fn(|i| i as u8);

        // Fisher-Yates, driven by the LCG.
        let mut lcg = ShuffleLcg::new(seed);
        for i in (1..TABLE_SIZE).rev() {
            let j = (lcg.next_unit() * (i + 1) as f64).floor() as usize;
            table.swap(i, j.min(i));
        }

        let perm = std::array::from_fn(|i| table[i % TABLE_SIZE]);
        Self { seed, perm }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn fade(t: f64) -> f64 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    fn lerp(t: f64, a: f64, b: f64) -> f64 {
        a + t * (b - a)
    }

    fn grad(hash: u8, x: f64, y: f64) -> f64 {
        let h = hash & 7;
        let (u, v) = if h < 4 { (x, y) } else { (y, x) };
        let u = if h & 1 == 0 { u } else { -u };
        let v = if h & 2 == 0 { v } else { -v };
        u + v
    }

    fn p(&self, index: usize) -> usize {
        usize::from(self.perm[index])
    }

    /// Single-octave sample in `[-1, 1]`.
    pub fn noise(&self, x: f64, y: f64) -> f64 {
        let xi = (x.floor() as i64 & 255) as usize;
        let yi = (y.floor() as i64 & 255) as usize;

        let x = x - x.floor();
        let y = y - y.floor();

        let u = Self::fade(x);
        let v = Self::fade(y);

        let aa = self.p(xi) + yi;
        let ab = self.p(xi) + yi + 1;
        let ba = self.p(xi + 1) + yi;
        let bb = self.p(xi + 1) + yi + 1;

        let grad_aa = Self::grad(self.perm[aa], x, y);
        let grad_ba = Self::grad(self.perm[ba], x - 1.0, y);
        let grad_ab = Self::grad(self.perm[ab], x, y - 1.0);
        let grad_bb = Self::grad(self.perm[bb], x - 1.0, y - 1.0);

        let lower = Self::lerp(u, grad_aa, grad_ba);
        let upper = Self::lerp(u, grad_ab, grad_bb);

        Self::lerp(v, lower, upper).clamp(-1.0, 1.0)
    }

    /// Sum of `octaves` samples at doubling frequency, each weighted by
    /// `persistence` times the previous weight, normalised to `[-1, 1]`.
    ///
    /// Returns `0.0` for zero octaves.
    pub fn octave_noise(&self, x: f64, y: f64, octaves: u32, persistence: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut max_value = 0.0;

        for _ in 0..octaves {
            total += self.noise(x * frequency, y * frequency) * amplitude;
            max_value += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }

        if max_value == 0.0 {
            return 0.0;
        }
        (total / max_value).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn permutation_is_a_bijection() {
        let noise = PerlinNoise::new(42);
        let mut seen = [false; TABLE_SIZE];
        for value in &noise.perm[..TABLE_SIZE] {
            seen[usize::from(*value)] = true;
        }
        assert!(seen.iter().all(|s| *s));
        assert_eq!(noise.perm[..TABLE_SIZE], noise.perm[TABLE_SIZE..]);
    }

    #[test]
    fn different_seeds_differ() {
        let a = PerlinNoise::new(42);
        let b = PerlinNoise::new(1337);
        assert_ne!(a.perm, b.perm);
    }

    #[test]
    fn lattice_points_are_zero() {
        let noise = PerlinNoise::new(7);
        assert_eq!(noise.noise(3.0, 5.0), 0.0);
    }

    #[test]
    fn zero_octaves_yield_zero() {
        assert_eq!(PerlinNoise::new(1).octave_noise(0.3, 0.7, 0, 0.5), 0.0);
    }

    proptest! {
        #[test]
        fn same_seed_same_output(seed in any::<u64>(), x in -500.0f64..500.0, y in -500.0f64..500.0) {
            let a = PerlinNoise::new(seed);
            let b = PerlinNoise::new(seed);
            prop_assert_eq!(a.noise(x, y).to_bits(), b.noise(x, y).to_bits());
            prop_assert_eq!(
                a.octave_noise(x, y, 4, 0.5).to_bits(),
                b.octave_noise(x, y, 4, 0.5).to_bits()
            );
        }

        #[test]
        fn output_is_bounded(
            seed in any::<u64>(),
            x in -500.0f64..500.0,
            y in -500.0f64..500.0,
            octaves in 0u32..12,
            persistence in 0.0f64..1.0,
        ) {
            let noise = PerlinNoise::new(seed);
            let single = noise.noise(x, y);
            let layered = noise.octave_noise(x, y, octaves, persistence);
            prop_assert!((-1.0..=1.0).contains(&single));
            prop_assert!((-1.0..=1.0).contains(&layered));
        }
    }
}
