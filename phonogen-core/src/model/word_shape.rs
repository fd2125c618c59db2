use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Upper bound accepted for `WordShape::max_syllables`.
pub const MAX_SYLLABLES: usize = 32;

/// Parameters controlling the shape of generated words.
///
/// # Responsibilities
/// - Bound the number of syllables per word
/// - Hold the probabilities of the first onset, of requested codas and of
///   the silent trailing letter
///
/// # Invariants
/// - Every probability lies in `[0.0, 1.0]`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WordShape {
	/// Upper bound of the syllable count (drawn uniformly in `1..=max_syllables`).
	/// Zero and values above `MAX_SYLLABLES` are rejected at generation time.
	pub max_syllables: usize,

	/// Probability that the first syllable starts with an onset.
	onset_probability: f64,

	/// Probability that a coda is requested when the policy allows one.
	coda_probability: f64,

	/// Probability of appending a silent letter to a word ending in a vowel,
	/// for varieties that have silent letters.
	silent_letter_probability: f64,
}

impl Default for WordShape {
	fn default() -> Self {
		Self {
			max_syllables: 3,
			onset_probability: 0.8,
			coda_probability: 0.5,
			silent_letter_probability: 0.5,
		}
	}
}

impl WordShape {
	/// Default shape with a custom syllable bound.
	///
	/// # Errors
	/// - `NoSyllables` if `max_syllables` is zero.
	/// - `TooManySyllables` if it exceeds `MAX_SYLLABLES`.
	pub fn new(max_syllables: usize) -> Result<Self, ConfigError> {
		if max_syllables == 0 {
			return Err(ConfigError::NoSyllables);
		}
		if max_syllables > MAX_SYLLABLES {
			return Err(ConfigError::TooManySyllables(max_syllables));
		}
		Ok(Self { max_syllables, ..Self::default() })
	}

	pub fn onset_probability(&self) -> f64 {
		self.onset_probability
	}

	pub fn coda_probability(&self) -> f64 {
		self.coda_probability
	}

	pub fn silent_letter_probability(&self) -> f64 {
		self.silent_letter_probability
	}

	/// Sets the probability of an initial onset (0.0..=1.0).
	///
	/// # Errors
	/// Returns an error if the value is outside the valid range.
	pub fn set_onset_probability(&mut self, value: f64) -> Result<(), ConfigError> {
		self.onset_probability = check_probability("onset_probability", value)?;
		Ok(())
	}

	pub fn set_coda_probability(&mut self, value: f64) -> Result<(), ConfigError> {
		self.coda_probability = check_probability("coda_probability", value)?;
		Ok(())
	}

	pub fn set_silent_letter_probability(&mut self, value: f64) -> Result<(), ConfigError> {
		self.silent_letter_probability = check_probability("silent_letter_probability", value)?;
		Ok(())
	}
}

fn check_probability(name: &'static str, value: f64) -> Result<f64, ConfigError> {
	if !(0.0..=1.0).contains(&value) {
		return Err(ConfigError::InvalidProbability { name, value });
	}
	Ok(value)
}
