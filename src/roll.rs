use std::{collections::VecDeque, fmt::Display};
use rand::{rngs::{StdRng, ThreadRng}, Rng, SeedableRng};
use crate::parser::ParserError;


/// A source of die outcomes.
///
/// The pipeline never reaches for a global generator: every roll goes
/// through a `DieSource`, so tests and hosts can substitute their own.
pub trait DieSource {
    /// Returns one value uniformly drawn from `low..=high`.
    fn next_in_range(&mut self, low: u16, high: u16) -> u16;
}

impl<S: DieSource + ?Sized> DieSource for &mut S {
    fn next_in_range(&mut self, low: u16, high: u16) -> u16 {
        (**self).next_in_range(low, high)
    }
}


/// Adapts any [`rand::Rng`] into a [`DieSource`].
#[derive(Debug, Clone)]
pub struct RandomSource<R = ThreadRng> {
    rng: R
}

impl RandomSource<ThreadRng> {
    /// Uses the thread-local generator from `rand::rng()`.
    pub fn thread() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for RandomSource<ThreadRng> {
    fn default() -> Self {
        Self::thread()
    }
}

impl RandomSource<StdRng> {
    /// A reproducible source: the same seed always yields the same rolls.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl<R: Rng> RandomSource<R> {
    /// Wraps an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DieSource for RandomSource<R> {
    fn next_in_range(&mut self, low: u16, high: u16) -> u16 {
        self.rng.random_range(low..=high)
    }
}


/// Replays a fixed list of outcomes in order.
///
/// Values are clamped into the requested range. Once the list is used up
/// every further draw returns the low bound.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    values: VecDeque<u16>
}

impl ScriptedSource {
    /// Creates a source that will hand out `values` front to back.
    pub fn new<I: IntoIterator<Item = u16>>(values: I) -> Self {
        Self { values: values.into_iter().collect() }
    }

    /// Number of scripted values not consumed yet.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl DieSource for ScriptedSource {
    fn next_in_range(&mut self, low: u16, high: u16) -> u16 {
        self.values.pop_front()
            .map(|value| value.clamp(low, high))
            .unwrap_or(low)
    }
}


/// A validated dice roll: `count` dice with `size` faces each.
///
/// Both values are guaranteed to be non-zero, see [`RollBuilder::build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RollFields"))]
pub struct Roll {
    size: u16,
    count: u16
}

/// Unchecked shape of a deserialized [`Roll`], validated by the builder.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RollFields {
    size: u16,
    count: u16
}

#[cfg(feature = "serde")]
impl TryFrom<RollFields> for Roll {
    type Error = ParserError;

    fn try_from(fields: RollFields) -> Result<Self, Self::Error> {
        Roll::builder(fields.size).count(fields.count).build()
    }
}

impl Roll {
    /// Starts a roll of a single die with `size` faces.
    ///
    /// # Examples
    /// ```
    /// use inline_dice::Roll;
    ///
    /// let roll = Roll::builder(6).count(3).build().unwrap();
    /// assert_eq!(roll.to_string(), "3d6");
    /// ```
    pub fn builder(size: u16) -> RollBuilder {
        RollBuilder::new(size)
    }

    /// Face count of each die.
    pub const fn size(&self) -> u16 {
        self.size
    }

    /// Number of dice rolled.
    pub const fn count(&self) -> u16 {
        self.count
    }

    /// Draws `count` independent values in `1..=size` from `source`.
    pub fn roll<S: DieSource + ?Sized>(&self, source: &mut S) -> Vec<u16> {
        let values: Vec<u16> = (0..self.count)
            .map(|_| source.next_in_range(1, self.size))
            .collect();

        log::trace!("rolled {self}: {values:?}");
        values
    }
}

impl Display for Roll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.count, self.size)
    }
}


/// Builder for [`Roll`]. The count defaults to 1.
#[derive(Debug, Clone)]
pub struct RollBuilder {
    size: u16,
    count: u16
}

impl RollBuilder {
    fn new(size: u16) -> Self {
        Self { size, count: 1 }
    }

    /// Sets the number of dice to roll.
    pub fn count(mut self, count: u16) -> Self {
        self.count = count;
        self
    }

    /// Finalizes the roll.
    ///
    /// # Errors
    /// Returns [`ParserError::ZeroValue`] if `size` or `count` is 0.
    pub fn build(self) -> Result<Roll, ParserError> {
        if self.size == 0 || self.count == 0 {
            return Err(ParserError::ZeroValue);
        }

        Ok(Roll { size: self.size, count: self.count })
    }
}


/// Rolls `count` dice with `faces` faces each.
///
/// # Errors
/// Returns [`ParserError::ZeroValue`] if either argument is 0, so a
/// zero-faced die can never be rolled.
///
/// # Examples
/// ```
/// use inline_dice::{roll, ScriptedSource};
///
/// let mut source = ScriptedSource::new([5, 3]);
/// assert_eq!(roll(2, 6, &mut source).unwrap(), vec![5, 3]);
/// ```
pub fn roll<S: DieSource + ?Sized>(count: u16, faces: u16, source: &mut S) -> Result<Vec<u16>, ParserError> {
    Ok(Roll::builder(faces).count(count).build()?.roll(source))
}


#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use super::*;
    use crate::roll_test_strategies::roll_strategy;


    proptest! {
        #[test]
        fn test_roll_length_and_range(roll in roll_strategy(), seed: u64) {
            let mut source = RandomSource::seeded(seed);
            let values = roll.roll(&mut source);

            prop_assert_eq!(values.len(), roll.count() as usize);
            for &value in &values {
                prop_assert!(value >= 1 && value <= roll.size());
            }
        }

        #[test]
        fn test_seeded_is_reproducible(roll in roll_strategy(), seed: u64) {
            let first = roll.roll(&mut RandomSource::seeded(seed));
            let second = roll.roll(&mut RandomSource::seeded(seed));

            prop_assert_eq!(first, second);
        }

        #[test]
        fn test_roll_display(roll in roll_strategy()) {
            prop_assert_eq!(roll.to_string(), format!("{}d{}", roll.count(), roll.size()));
        }

        #[test]
        fn test_builder_validation(size in 0..100u16, count in 0..100u16) {
            let result = Roll::builder(size).count(count).build();

            if size == 0 || count == 0 {
                prop_assert_eq!(result, Err(ParserError::ZeroValue));
            } else {
                prop_assert!(result.is_ok());
            }
        }

        #[test]
        fn test_scripted_clamps(values in prop::collection::vec(0..50u16, 1..20), size in 1..20u16) {
            let mut source = ScriptedSource::new(values.clone());
            let rolled = roll(values.len() as u16, size, &mut source).unwrap();

            let expected: Vec<u16> = values.iter().map(|v| (*v).clamp(1, size)).collect();
            prop_assert_eq!(rolled, expected);
            prop_assert_eq!(source.remaining(), 0);
        }
    }

    #[test]
    fn test_one_faced_die() {
        let values = roll(4, 1, &mut RandomSource::thread()).unwrap();
        assert_eq!(values, vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_zero_faces_rejected() {
        let mut source = ScriptedSource::default();
        assert_eq!(roll(2, 0, &mut source), Err(ParserError::ZeroValue));
    }

    #[test]
    fn test_scripted_exhausted_returns_low() {
        let mut source = ScriptedSource::new([4]);

        assert_eq!(source.next_in_range(1, 6), 4);
        assert_eq!(source.next_in_range(1, 6), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_validates() {
        let zero_faces = serde_json::from_str::<Roll>(r#"{"size":0,"count":2}"#);
        let zero_count = serde_json::from_str::<Roll>(r#"{"size":6,"count":0}"#);

        assert!(zero_faces.unwrap_err().to_string().contains("Zero value"));
        assert!(zero_count.is_err());

        let roll: Roll = serde_json::from_str(r#"{"size":6,"count":3}"#).unwrap();
        assert_eq!(roll, Roll::builder(6).count(3).build().unwrap());
        assert_eq!(serde_json::to_string(&roll).unwrap(), r#"{"size":6,"count":3}"#);
    }

    #[test]
    fn test_source_through_mut_ref() {
        let mut source = ScriptedSource::new([2, 2]);
        let by_ref: &mut dyn DieSource = &mut source;

        assert_eq!(roll(2, 6, by_ref).unwrap(), vec![2, 2]);
    }
}
