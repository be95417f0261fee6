//! Deterministic random number generation.
//!
//! RULE: The generator never calls any platform RNG.
//! All randomness flows through StreamRng instances derived
//! from the single master seed of a generation run.
//!
//! Each field group gets its own RNG stream, seeded deterministically
//! from (master_seed XOR stream_index). This means:
//!   - Adding a new stream never changes existing streams.
//!   - Each stream is fully reproducible in isolation.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single field group.
pub struct StreamRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl StreamRng {
    /// Create a stream RNG from the master seed and a stable
    /// stream index. The index must never change once assigned.
    pub fn new(master_seed: u64, stream_index: u64) -> Self {
        let derived_seed = master_seed ^ (stream_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform real in [lo, hi).
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Uniform integer in [lo, hi], both ends inclusive.
    pub fn int_inclusive(&mut self, lo: u64, hi: u64) -> u64 {
        assert!(lo <= hi, "empty integer range {lo}..={hi}");
        lo + self.next_u64_below(hi - lo + 1)
    }

    /// Uniform pick from a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let index = self.next_u64_below(items.len() as u64) as usize;
        &items[index]
    }

    /// Categorical draw over (value, weight) pairs.
    /// Weights need not sum to 1; they are normalised by their total.
    pub fn weighted<'a, T>(&mut self, options: &'a [(T, f64)]) -> &'a T {
        assert!(!options.is_empty(), "weighted draw over no options");
        let total: f64 = options.iter().map(|(_, w)| w).sum();
        let roll = self.next_f64() * total;
        let mut cumulative = 0.0;
        for (value, weight) in options {
            cumulative += weight;
            if roll < cumulative {
                return value;
            }
        }
        // Float drift on the last bucket.
        &options[options.len() - 1].0
    }
}

/// All field-group RNGs for a single generation run, indexed by stable slot.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn for_stream(&self, slot: StreamSlot) -> StreamRng {
        StreamRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries — only append.
/// Reordering changes every stream's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamSlot {
    Catalog = 0,    // category, subcategory, price, quantity
    Pricing = 1,    // discount percent
    Feedback = 2,   // rating, review length
    Fulfilment = 3, // delivery days, delivery status, returned
    Customer = 4,   // segment, payment method, city
    Calendar = 5,   // order date
    Margin = 6,     // profit factor
}

impl StreamSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Pricing => "pricing",
            Self::Feedback => "feedback",
            Self::Fulfilment => "fulfilment",
            Self::Customer => "customer",
            Self::Calendar => "calendar",
            Self::Margin => "margin",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let bank = RngBank::new(42);
        let mut a = bank.for_stream(StreamSlot::Catalog);
        let mut b = bank.for_stream(StreamSlot::Catalog);
        for _ in 0..100 {
            assert_eq!(a.next_u64_below(1_000_000), b.next_u64_below(1_000_000));
        }
    }

    #[test]
    fn streams_are_independent() {
        let bank = RngBank::new(42);
        let mut a = bank.for_stream(StreamSlot::Catalog);
        let mut b = bank.for_stream(StreamSlot::Pricing);
        let xs: Vec<u64> = (0..16).map(|_| a.next_u64_below(u64::MAX)).collect();
        let ys: Vec<u64> = (0..16).map(|_| b.next_u64_below(u64::MAX)).collect();
        assert_ne!(xs, ys, "distinct slots must not share a stream");
    }

    #[test]
    fn int_inclusive_hits_both_ends() {
        let mut rng = RngBank::new(7).for_stream(StreamSlot::Fulfilment);
        let draws: Vec<u64> = (0..2_000).map(|_| rng.int_inclusive(1, 5)).collect();
        assert!(draws.iter().all(|d| (1..=5).contains(d)));
        assert!(draws.contains(&1));
        assert!(draws.contains(&5));
    }

    #[test]
    fn uniform_stays_in_range() {
        let mut rng = RngBank::new(9).for_stream(StreamSlot::Margin);
        for _ in 0..1_000 {
            let x = rng.uniform(0.2, 0.4);
            assert!((0.2..0.4).contains(&x), "{x} outside [0.2, 0.4)");
        }
    }

    #[test]
    fn weighted_draw_tracks_weights() {
        let mut rng = RngBank::new(11).for_stream(StreamSlot::Feedback);
        let options = [("a", 0.7), ("b", 0.2), ("c", 0.1)];
        let n = 20_000;
        let a_count = (0..n).filter(|_| *rng.weighted(&options) == "a").count();
        let share = a_count as f64 / n as f64;
        assert!((share - 0.7).abs() < 0.02, "share of 'a' was {share:.3}");
    }

    #[test]
    fn zero_weight_never_drawn() {
        let mut rng = RngBank::new(3).for_stream(StreamSlot::Pricing);
        let options = [(1u32, 1.0), (2u32, 0.0)];
        assert!((0..1_000).all(|_| *rng.weighted(&options) == 1));
    }
}
