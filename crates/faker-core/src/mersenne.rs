//! Seeded Mersenne Twister engine.
//!
//! The engine is MT19937 with 32-bit words, pinned bit-for-bit to the
//! reference `mt19937ar` algorithm so independent implementations agree on
//! every output for a given seed. The algorithm version is
//! [`ALGORITHM_VERSION`]; changing any constant below is a breaking change to
//! every recorded seed.
//!
//! # Derived values
//!
//! - [`MersenneTwister::next_f64`] is `genrand_res53`: two draws, the first
//!   supplying the high 27 bits and the second the low 26 bits.
//! - [`MersenneTwister::int_inclusive`] scales one `next_f64` by the range
//!   width and floors the product.
//!
//! # Example
//!
//! ```
//! use faker_core::{MersenneTwister, Seed};
//!
//! let mut engine = MersenneTwister::with_seed(&Seed::Single(5489)).expect("valid seed");
//! assert_eq!(engine.next_u32(), 3_499_211_612);
//! ```

use std::fmt;
use std::str::FromStr;

use rand::rngs::OsRng;
use rand::{RngCore, TryRngCore, rand_core};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::error::{ConfigurationError, GenerationError};

/// Identifier of the pinned generator and derivation rules.
pub const ALGORITHM_VERSION: &str = "mt19937-res53/1";

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;
const INIT_MULTIPLIER: u32 = 1_812_433_253;
const ARRAY_BASE_SEED: u32 = 19_650_218;
const ARRAY_MIX_FIRST: u32 = 1_664_525;
const ARRAY_MIX_SECOND: u32 = 1_566_083_941;

/// Largest range width that [`MersenneTwister::int_inclusive`] scales exactly.
const MAX_EXACT_SPAN: i128 = 1 << 53;

/// A seed for the engine.
///
/// A single value uses `init_genrand`; a sequence uses `init_by_array`, so
/// `Single(1)` and `Sequence(vec![1])` produce different streams.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Seed {
    /// One 32-bit seed value.
    Single(u32),
    /// An ordered, non-empty sequence of 32-bit seed values.
    Sequence(Vec<u32>),
}

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<u32>> for Seed {
    fn from(values: Vec<u32>) -> Self {
        Self::Sequence(values)
    }
}

impl<const K: usize> From<[u32; K]> for Seed {
    fn from(values: [u32; K]) -> Self {
        Self::Sequence(values.to_vec())
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(value) => write!(f, "{value}"),
            Self::Sequence(values) => {
                let mut first = true;
                for value in values {
                    if !first {
                        f.write_str(",")?;
                    }
                    write!(f, "{value}")?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for Seed {
    type Err = ConfigurationError;

    /// Parses `"42"` as a single seed and `"1,2,3"` as a sequence.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigurationError::InvalidSeed {
            value: text.to_owned(),
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(invalid());
        }
        if !trimmed.contains(',') {
            return trimmed.parse().map(Self::Single).map_err(|_| invalid());
        }
        trimmed
            .split(',')
            .map(|part| part.trim().parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::Sequence)
    }
}

/// Accepted shapes of a serialized seed.
#[derive(Deserialize)]
#[serde(untagged)]
enum SeedRepr {
    Single(u32),
    Sequence(Vec<u32>),
    Text(String),
}

/// Deserializes from an integer, an integer array, or seed text such as
/// `"1,2,3"`.
impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match SeedRepr::deserialize(deserializer)? {
            SeedRepr::Single(value) => Ok(Self::Single(value)),
            SeedRepr::Sequence(values) => Ok(Self::Sequence(values)),
            SeedRepr::Text(text) => text.parse().map_err(D::Error::custom),
        }
    }
}

impl Serialize for Seed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Single(value) => serializer.serialize_u32(*value),
            Self::Sequence(values) => serializer.collect_seq(values),
        }
    }
}

/// A copyable snapshot of the engine registers.
///
/// The draw counter is diagnostic only: it counts every `next_u32` since the
/// engine was created, survives reseeding, and never affects output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RngState {
    words: [u32; N],
    index: usize,
    draws: u64,
}

impl RngState {
    /// Returns the number of 32-bit draws taken so far.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

/// MT19937 pseudorandom engine with re-seedable, inspectable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MersenneTwister {
    state: RngState,
}

impl MersenneTwister {
    /// Creates an engine seeded with `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::EmptySeedSequence`] for an empty
    /// sequence seed.
    pub fn with_seed(seed: &Seed) -> Result<Self, ConfigurationError> {
        let mut engine = Self::unseeded();
        engine.apply_seed(seed)?;
        Ok(engine)
    }

    /// Creates an engine seeded from fresh OS entropy.
    ///
    /// Returns the engine together with the seed it used so the run can be
    /// replayed later.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Entropy`] if the OS entropy source is
    /// unavailable.
    pub fn from_entropy() -> Result<(Self, Seed), ConfigurationError> {
        let mut engine = Self::unseeded();
        let seed = engine.seed(None)?;
        Ok((engine, seed))
    }

    /// Restores an engine from a previously captured snapshot.
    #[must_use]
    pub const fn from_state(state: RngState) -> Self {
        Self { state }
    }

    fn unseeded() -> Self {
        Self {
            state: RngState {
                words: [0; N],
                index: N,
                draws: 0,
            },
        }
    }

    /// Reseeds the engine and returns the seed that was applied.
    ///
    /// With `None`, a fresh 32-bit seed is drawn from the OS entropy source.
    /// All prior state is discarded; the next draw after `seed(Some(s))` is
    /// always the same for the same `s`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::EmptySeedSequence`] for an empty
    /// sequence, or [`ConfigurationError::Entropy`] when no fresh seed can
    /// be drawn.
    pub fn seed(&mut self, value: Option<Seed>) -> Result<Seed, ConfigurationError> {
        let seed = match value {
            Some(seed) => {
                debug!(seed = %seed, "reseeding engine with explicit seed");
                seed
            }
            None => {
                let fresh = OsRng
                    .try_next_u32()
                    .map_err(|err| ConfigurationError::Entropy {
                        message: err.to_string(),
                    })?;
                debug!(seed = fresh, "reseeding engine from entropy");
                Seed::Single(fresh)
            }
        };
        self.apply_seed(&seed)?;
        Ok(seed)
    }

    fn apply_seed(&mut self, seed: &Seed) -> Result<(), ConfigurationError> {
        match seed {
            Seed::Single(value) => self.init_genrand(*value),
            Seed::Sequence(values) if values.is_empty() => {
                return Err(ConfigurationError::EmptySeedSequence);
            }
            Seed::Sequence(values) => self.init_by_array(values),
        }
        Ok(())
    }

    /// Returns a snapshot of the current registers.
    #[must_use]
    pub const fn state(&self) -> RngState {
        self.state
    }

    /// Returns the number of 32-bit draws taken so far.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.state.draws
    }

    /// Advances the engine by one step and returns the tempered output.
    #[expect(
        clippy::indexing_slicing,
        reason = "the index is below N after twisting"
    )]
    pub fn next_u32(&mut self) -> u32 {
        if self.state.index >= N {
            self.twist();
        }
        let mut y = self.state.words[self.state.index];
        self.state.index += 1;
        self.state.draws = self.state.draws.wrapping_add(1);

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^= y >> 18;
        y
    }

    /// Returns a float in `[0, 1)` with 53-bit resolution.
    ///
    /// Consumes exactly two draws.
    #[expect(
        clippy::float_arithmetic,
        reason = "genrand_res53 is defined in floating point; every step is exact"
    )]
    pub fn next_f64(&mut self) -> f64 {
        let high = self.next_u32() >> 5;
        let low = self.next_u32() >> 6;
        (f64::from(high) * 67_108_864.0 + f64::from(low)) * (1.0 / 9_007_199_254_740_992.0)
    }

    /// Returns an integer in `min..=max`.
    ///
    /// Computes `min + floor(next_f64() * width)`, clamped below `width` so
    /// rounding can never produce `max + 1`. Consumes exactly one
    /// [`Self::next_f64`].
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidRange`] when `max < min`, and
    /// [`GenerationError::RangeTooWide`] when the range holds more than 2^53
    /// values.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the width is at most 2^53, so it and the floored product are exact"
    )]
    pub fn int_inclusive(&mut self, min: i64, max: i64) -> Result<i64, GenerationError> {
        if max < min {
            return Err(GenerationError::InvalidRange { min, max });
        }
        let too_wide = || GenerationError::RangeTooWide { min, max };
        let span = i128::from(max) - i128::from(min) + 1;
        if span > MAX_EXACT_SPAN {
            return Err(too_wide());
        }
        let width = u64::try_from(span).map_err(|_| too_wide())?;

        let scaled = (self.next_f64() * width as f64).floor() as u64;
        let offset = scaled.min(width - 1);
        i64::try_from(i128::from(min) + i128::from(offset)).map_err(|_| too_wide())
    }

    #[expect(
        clippy::indexing_slicing,
        reason = "the loop counter is bounded by N"
    )]
    fn init_genrand(&mut self, seed: u32) {
        let words = &mut self.state.words;
        words[0] = seed;
        let mut prev = seed;
        for (word, position) in words.iter_mut().skip(1).zip(1_u32..) {
            prev = INIT_MULTIPLIER
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(position);
            *word = prev;
        }
        self.state.index = N;
    }

    #[expect(
        clippy::indexing_slicing,
        reason = "i stays in 1..N and j stays below the key length"
    )]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the reference algorithm adds indices modulo 2^32"
    )]
    fn init_by_array(&mut self, key: &[u32]) {
        self.init_genrand(ARRAY_BASE_SEED);
        let words = &mut self.state.words;
        let mut i = 1_usize;
        let mut j = 0_usize;

        for _ in 0..N.max(key.len()) {
            let prev = words[i - 1];
            words[i] = (words[i] ^ (prev ^ (prev >> 30)).wrapping_mul(ARRAY_MIX_FIRST))
                .wrapping_add(key[j])
                .wrapping_add(j as u32);
            i += 1;
            j += 1;
            if i >= N {
                words[0] = words[N - 1];
                i = 1;
            }
            if j >= key.len() {
                j = 0;
            }
        }
        for _ in 1..N {
            let prev = words[i - 1];
            words[i] = (words[i] ^ (prev ^ (prev >> 30)).wrapping_mul(ARRAY_MIX_SECOND))
                .wrapping_sub(i as u32);
            i += 1;
            if i >= N {
                words[0] = words[N - 1];
                i = 1;
            }
        }
        words[0] = UPPER_MASK;
        self.state.index = N;
    }

    #[expect(
        clippy::indexing_slicing,
        reason = "all indices are wrapped into 0..N"
    )]
    fn twist(&mut self) {
        let words = &mut self.state.words;
        for current in 0..N {
            let next = if current + 1 == N { 0 } else { current + 1 };
            let far = if current + M >= N {
                current + M - N
            } else {
                current + M
            };
            let y = (words[current] & UPPER_MASK) | (words[next] & LOWER_MASK);
            let mag = if y & 1 == 0 { 0 } else { MATRIX_A };
            words[current] = words[far] ^ (y >> 1) ^ mag;
        }
        self.state.index = 0;
    }
}

/// Lets the engine drive `rand` consumers.
///
/// `next_u64` takes two draws, low word first; `fill_bytes` writes
/// successive draws in little-endian order.
impl RngCore for MersenneTwister {
    fn next_u32(&mut self) -> u32 {
        Self::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dst);
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;

    fn seeded(seed: impl Into<Seed>) -> MersenneTwister {
        MersenneTwister::with_seed(&seed.into()).expect("valid seed")
    }

    fn draws(engine: &mut MersenneTwister, count: usize) -> Vec<u32> {
        (0..count).map(|_| engine.next_u32()).collect()
    }

    #[test]
    fn matches_reference_init_by_array_vector() {
        let mut engine = seeded([0x123, 0x234, 0x345, 0x456]);
        assert_eq!(draws(&mut engine, 3), vec![1_067_595_299, 955_945_823, 477_289_528]);
    }

    #[test]
    fn matches_reference_default_seed_ten_thousandth_output() {
        let mut engine = seeded(5489);
        let last = draws(&mut engine, 10_000).pop();
        assert_eq!(last, Some(4_123_659_995));
    }

    #[rstest]
    #[case(Seed::Single(1), [1_791_095_845, 4_282_876_139])]
    #[case(Seed::Single(42), [1_608_637_542, 3_421_126_067])]
    #[case(Seed::Sequence(vec![1, 2, 3]), [2_619_334_238, 1_552_691_353])]
    fn first_draws_match_reference(#[case] seed: Seed, #[case] expected: [u32; 2]) {
        let mut engine = seeded(seed);
        assert_eq!(draws(&mut engine, 2), expected.to_vec());
    }

    #[test]
    fn crosses_the_twist_boundary_deterministically() {
        let mut engine = seeded(7);
        let values = draws(&mut engine, 1000);
        assert_eq!(values.get(623), Some(&3_222_554_838));
        assert_eq!(values.get(624), Some(&3_732_577_367));
        assert_eq!(values.get(999), Some(&3_925_535_521));
    }

    #[test]
    fn single_and_sequence_seeds_differ() {
        let mut single = seeded(1);
        let mut sequence = seeded(vec![1]);
        assert_ne!(single.next_u32(), sequence.next_u32());
    }

    #[test]
    fn reseeding_resets_the_sequence() {
        let mut engine = seeded(99);
        let first = draws(&mut engine, 50);
        engine.seed(Some(Seed::Single(99))).expect("reseed");
        assert_eq!(draws(&mut engine, 50), first);
    }

    #[test]
    fn fresh_seed_can_be_replayed() {
        let mut engine = seeded(0);
        let used = engine.seed(None).expect("entropy available");
        let first = draws(&mut engine, 20);

        let replayed = engine.seed(Some(used.clone())).expect("reseed");
        assert_eq!(replayed, used);
        assert_eq!(draws(&mut engine, 20), first);
    }

    #[test]
    fn empty_sequence_seed_is_rejected() {
        let result = MersenneTwister::with_seed(&Seed::Sequence(Vec::new()));
        assert_eq!(result, Err(ConfigurationError::EmptySeedSequence));
    }

    #[test]
    fn res53_matches_reference_bits() {
        let mut engine = seeded(1);
        assert_eq!(engine.next_f64().to_bits(), 0x3fda_b07d_0ffa_3c06);
        assert_eq!(engine.draws(), 2);
    }

    #[test]
    fn int_inclusive_matches_reference_sequence() {
        let mut engine = seeded(1);
        let values: Vec<i64> = (0..5)
            .map(|_| engine.int_inclusive(1, 100).expect("valid range"))
            .collect();
        assert_eq!(values, vec![42, 73, 1, 31, 15]);
    }

    #[test]
    fn int_inclusive_stays_within_bounds() {
        let mut engine = seeded(2024);
        for _ in 0..1000 {
            let value = engine.int_inclusive(-3, 3).expect("valid range");
            assert!((-3..=3).contains(&value), "out of range: {value}");
        }
    }

    #[test]
    fn int_inclusive_on_a_single_value_still_draws() {
        let mut engine = seeded(5);
        assert_eq!(engine.int_inclusive(7, 7), Ok(7));
        assert_eq!(engine.draws(), 2);
    }

    #[rstest]
    #[case(5, 1, GenerationError::InvalidRange { min: 5, max: 1 })]
    #[case(i64::MIN, i64::MAX, GenerationError::RangeTooWide { min: i64::MIN, max: i64::MAX })]
    fn int_inclusive_rejects_bad_ranges(
        #[case] min: i64,
        #[case] max: i64,
        #[case] expected: GenerationError,
    ) {
        let mut engine = seeded(5);
        assert_eq!(engine.int_inclusive(min, max), Err(expected));
        assert_eq!(engine.draws(), 0);
    }

    #[test]
    fn snapshot_restores_the_pending_sequence() {
        let mut engine = seeded(3);
        draws(&mut engine, 10);
        let snapshot = engine.state();
        let expected = draws(&mut engine, 700);

        let mut restored = MersenneTwister::from_state(snapshot);
        assert_eq!(draws(&mut restored, 700), expected);
    }

    #[test]
    fn draw_counter_survives_reseeding() {
        let mut engine = seeded(3);
        draws(&mut engine, 4);
        engine.seed(Some(Seed::Single(3))).expect("reseed");
        draws(&mut engine, 1);
        assert_eq!(engine.state().draws(), 5);
    }

    #[test]
    fn rng_core_next_u64_takes_low_word_first() {
        let mut engine = seeded(1);
        assert_eq!(RngCore::next_u64(&mut engine), 18_394_812_951_614_845_989);
    }

    #[test]
    fn rng_core_fill_bytes_uses_successive_draws() {
        let mut engine = seeded(1);
        let mut bytes = [0_u8; 6];
        engine.fill_bytes(&mut bytes);

        let mut reference = seeded(1);
        let first = reference.next_u32().to_le_bytes();
        let second = reference.next_u32().to_le_bytes();
        assert_eq!(&bytes[..4], &first[..]);
        assert_eq!(&bytes[4..], &second[..2]);
    }

    #[rstest]
    #[case("42", Seed::Single(42))]
    #[case(" 7 ", Seed::Single(7))]
    #[case("1,2,3", Seed::Sequence(vec![1, 2, 3]))]
    #[case("4, 5", Seed::Sequence(vec![4, 5]))]
    fn parses_seed_text(#[case] text: &str, #[case] expected: Seed) {
        assert_eq!(text.parse::<Seed>(), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("-1")]
    #[case("1,,2")]
    #[case("4294967296")]
    fn rejects_malformed_seed_text(#[case] text: &str) {
        assert_eq!(
            text.parse::<Seed>(),
            Err(ConfigurationError::InvalidSeed {
                value: text.to_owned()
            })
        );
    }

    #[test]
    fn seed_display_round_trips_through_parsing() {
        let seed = Seed::Sequence(vec![1, 2, 3]);
        assert_eq!(seed.to_string(), "1,2,3");
        assert_eq!(seed.to_string().parse::<Seed>(), Ok(seed));
    }

    #[rstest]
    #[case(json!(42), Seed::Single(42))]
    #[case(json!([1, 2, 3]), Seed::Sequence(vec![1, 2, 3]))]
    #[case(json!("42"), Seed::Single(42))]
    #[case(json!("1,2,3"), Seed::Sequence(vec![1, 2, 3]))]
    fn deserializes_numbers_arrays_and_text(#[case] value: Value, #[case] expected: Seed) {
        assert_eq!(
            serde_json::from_value::<Seed>(value).expect("valid seed"),
            expected
        );
    }

    #[rstest]
    #[case(json!(-1))]
    #[case(json!("abc"))]
    #[case(json!({"seed": 1}))]
    fn rejects_other_serialized_shapes(#[case] value: Value) {
        assert!(serde_json::from_value::<Seed>(value).is_err());
    }

    #[test]
    fn serializes_as_numbers() {
        assert_eq!(
            serde_json::to_value(Seed::Single(42)).expect("serialize"),
            json!(42)
        );
        assert_eq!(
            serde_json::to_value(Seed::Sequence(vec![1, 2])).expect("serialize"),
            json!([1, 2])
        );
    }
}
