use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::word_shape::WordShape;
use crate::variety::Variety;

/// Input parameters for generating words from several varieties.
///
/// `GenerationInput` contains both the **word shape** (syllable bound and
/// probabilities) and the **variety selection weights** (intensity and
/// normalized probabilities).
///
/// # Responsibilities
/// - Hold the `WordShape` applied to every generated word
/// - Track per-variety intensity (user-adjustable) and compute normalized
///   selection probabilities
///
/// # Invariants
/// - `intensity` keys are fixed and correspond to available varieties
/// - `probability` is always normalized, or uniform if all intensities are zero
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GenerationInput {
	/// Shape of the generated words.
	pub shape: WordShape,

	/// User-adjustable variety intensities (not normalized).
	intensity: HashMap<Variety, f32>,

	/// Normalized probabilities derived from `intensity`.
	probability: HashMap<Variety, f32>,
}

impl GenerationInput {
	/// Creates an input where every given variety has zero intensity, which
	/// normalizes to a uniform choice.
	///
	/// # Visibility
	/// - `pub(crate)`: inputs are made by `Generator::make_generation_input`
	///   so that their keys match the loaded engines.
	pub(crate) fn new(varieties: impl IntoIterator<Item = Variety>) -> Self {
		let mut input = Self {
			shape: WordShape::default(),
			intensity: varieties.into_iter().map(|v| (v, 0.0)).collect(),
			probability: HashMap::new(),
		};
		input.normalize();
		input
	}

	/// Normalizes `intensity` into `probability`.
	///
	/// - If total intensity > 0, probabilities are proportional to intensities.
	/// - If all intensities are 0, distributes uniform probabilities across varieties.
	fn normalize(&mut self) {
		let sum: f32 = self.intensity.values().sum();

		self.probability.clear();

		if sum > 0.0 {
			for (variety, intensity) in &self.intensity {
				self.probability.insert(*variety, intensity / sum);
			}
		} else if !self.intensity.is_empty() {
			let uniform = 1.0 / self.intensity.len() as f32;
			for variety in self.intensity.keys() {
				self.probability.insert(*variety, uniform);
			}
		}
	}

	/// Returns an iterator over normalized variety probabilities.
	pub fn probability(&self) -> impl Iterator<Item = (Variety, f32)> + '_ {
		self.probability.iter().map(|(k, v)| (*k, *v))
	}

	pub fn intensity(&self, variety: Variety) -> Option<f32> {
		self.intensity.get(&variety).copied()
	}

	/// Sets the intensity of a variety and renormalizes.
	///
	/// # Errors
	/// - `UnknownVariety` if the variety is not part of this input.
	/// - `InvalidIntensity` for negative or non-finite values.
	pub fn set_variety_intensity(&mut self, variety: Variety, intensity: f32) -> Result<(), ConfigError> {
		if !intensity.is_finite() || intensity < 0.0 {
			return Err(ConfigError::InvalidIntensity(intensity));
		}
		match self.intensity.get_mut(&variety) {
			Some(value) => *value = intensity,
			None => return Err(ConfigError::UnknownVariety(variety.name().to_owned())),
		}
		self.normalize();
		Ok(())
	}

	/// Zeroes every intensity but the given one.
	///
	/// # Errors
	/// `UnknownVariety` if the variety is not part of this input.
	pub fn only(&mut self, variety: Variety) -> Result<(), ConfigError> {
		if !self.intensity.contains_key(&variety) {
			return Err(ConfigError::UnknownVariety(variety.name().to_owned()));
		}
		for (key, value) in self.intensity.iter_mut() {
			*value = if *key == variety { 1.0 } else { 0.0 };
		}
		self.normalize();
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn input() -> GenerationInput {
		GenerationInput::new(Variety::ALL)
	}

	fn probability(input: &GenerationInput, variety: Variety) -> f32 {
		input.probability().find(|(v, _)| *v == variety).map(|(_, p)| p).unwrap()
	}

	#[test]
	fn test_uniform_by_default() {
		let input = input();
		assert_eq!(probability(&input, Variety::AmericanEnglish), 0.5);
		assert_eq!(probability(&input, Variety::MetropolitanFrench), 0.5);
	}

	#[test]
	fn test_intensity_is_normalized() {
		let mut input = input();
		input.set_variety_intensity(Variety::AmericanEnglish, 3.0).unwrap();
		input.set_variety_intensity(Variety::MetropolitanFrench, 1.0).unwrap();
		assert_eq!(probability(&input, Variety::AmericanEnglish), 0.75);
		assert_eq!(probability(&input, Variety::MetropolitanFrench), 0.25);
		assert_eq!(input.intensity(Variety::AmericanEnglish), Some(3.0));
	}

	#[test]
	fn test_invalid_intensity() {
		let mut input = input();
		assert_eq!(
			input.set_variety_intensity(Variety::AmericanEnglish, -1.0),
			Err(ConfigError::InvalidIntensity(-1.0))
		);
		assert!(input.set_variety_intensity(Variety::AmericanEnglish, f32::INFINITY).is_err());
	}

	#[test]
	fn test_unknown_variety() {
		let mut input = GenerationInput::new([Variety::MetropolitanFrench]);
		assert!(matches!(
			input.set_variety_intensity(Variety::AmericanEnglish, 1.0),
			Err(ConfigError::UnknownVariety(_))
		));
		assert!(input.only(Variety::AmericanEnglish).is_err());
	}

	#[test]
	fn test_only() {
		let mut input = input();
		input.only(Variety::MetropolitanFrench).unwrap();
		assert_eq!(probability(&input, Variety::MetropolitanFrench), 1.0);
		assert_eq!(probability(&input, Variety::AmericanEnglish), 0.0);
	}
}
