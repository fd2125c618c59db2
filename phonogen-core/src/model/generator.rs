use std::collections::HashMap;
use std::path::Path;

use log::{debug, info};
use rand::Rng;

use crate::error::{ConstructionError, GenerationError, SnapshotError};
use crate::io;
use crate::model::engine::Engine;
use crate::model::generation_input::GenerationInput;
use crate::variety::Variety;

/// High-level generator managing one engine per variety.
///
/// # Responsibilities
/// - Build (or load from snapshots) the engine of every shipped variety
/// - Provide weighted variety selection using `GenerationInput` probabilities
/// - Generate words with the selected engine
#[derive(Debug)]
pub struct Generator {
	engines: HashMap<Variety, Engine>,
}

impl Generator {
	/// Creates a generator by building every variety in memory.
	///
	/// # Errors
	/// Returns the first `ConstructionError` met; a shipped variety failing
	/// here is a defect of its definition.
	pub fn new() -> Result<Self, ConstructionError> {
		let mut engines = HashMap::new();
		for variety in Variety::ALL {
			engines.insert(variety, Engine::new(variety)?);
		}
		info!("Generator ready with {} varieties", engines.len());
		Ok(Self { engines })
	}

	/// Creates a generator backed by a snapshot folder.
	///
	/// # Parameters
	/// - `dir`: Folder holding `<variety>.bin` snapshots.
	///   Both `"folder"` and `"folder/"` are accepted.
	///
	/// # Behavior
	/// - Each variety is loaded from its snapshot when present.
	/// - Missing snapshots are built and written to the folder.
	///
	/// # Errors
	/// - Returns an error if the folder cannot be created or written.
	/// - Returns an error if a snapshot is damaged or holds another variety.
	pub fn with_snapshots<P: AsRef<Path>>(dir: P) -> Result<Self, SnapshotError> {
		let folder = io::normalize_folder(dir);
		let mut engines = HashMap::new();
		for variety in Variety::ALL {
			engines.insert(variety, Engine::load_or_build(variety, &folder)?);
		}
		info!("Generator ready with {} varieties from {}", engines.len(), folder.display());
		Ok(Self { engines })
	}

	/// Returns the names of the loaded varieties, sorted.
	pub fn variety_names(&self) -> Vec<&'static str> {
		let mut names: Vec<&'static str> = self.engines.keys().map(|v| v.name()).collect();
		names.sort_unstable();
		names
	}

	pub fn engine(&self, variety: Variety) -> Option<&Engine> {
		self.engines.get(&variety)
	}

	/// Creates a new `GenerationInput` with default intensity for all varieties.
	///
	/// Probabilities are automatically normalized.
	pub fn make_generation_input(&self) -> GenerationInput {
		GenerationInput::new(self.engines.keys().copied())
	}

	/// Draws a variety according to the input probabilities.
	///
	/// Each candidate with a positive weight `w` gets the key `u^(1/w)` with
	/// `u` uniform in `[0, 1)`; the highest key wins. Varieties without an
	/// engine or with a zero weight are never picked.
	pub fn pick_variety<R: Rng + ?Sized>(&self, rng: &mut R, input: &GenerationInput) -> Option<Variety> {
		input
			.probability()
			.filter(|(variety, weight)| *weight > 0.0 && self.engines.contains_key(variety))
			.map(|(variety, weight)| {
				let u: f64 = rng.random();
				(variety, u.powf(1.0 / weight as f64))
			})
			.max_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(variety, _)| variety)
	}

	/// Generates one word from a variety drawn with `pick_variety`.
	///
	/// # Errors
	/// - `NoVariety` if no variety can be picked.
	/// - Any error of `Engine::generate`.
	pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, input: &GenerationInput) -> Result<String, GenerationError> {
		let variety = self.pick_variety(rng, input).ok_or(GenerationError::NoVariety)?;
		let engine = self.engines.get(&variety).ok_or(GenerationError::NoVariety)?;
		let word = engine.generate(rng, &input.shape)?;
		debug!("Generated '{}' from {}", word.text, variety);
		Ok(word.text)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn test_names() {
		let generator = Generator::new().unwrap();
		assert_eq!(generator.variety_names(), vec!["american_english", "metropolitan_french"]);
		assert!(generator.engine(Variety::MetropolitanFrench).is_some());
	}

	#[test]
	fn test_pick_respects_zero_weights() {
		let generator = Generator::new().unwrap();
		let mut input = generator.make_generation_input();
		input.only(Variety::AmericanEnglish).unwrap();
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..50 {
			assert_eq!(generator.pick_variety(&mut rng, &input), Some(Variety::AmericanEnglish));
		}
	}

	#[test]
	fn test_pick_reaches_every_variety() {
		let generator = Generator::new().unwrap();
		let input = generator.make_generation_input();
		let mut rng = StdRng::seed_from_u64(11);
		let mut seen = Vec::new();
		for _ in 0..200 {
			if let Some(variety) = generator.pick_variety(&mut rng, &input) {
				if !seen.contains(&variety) {
					seen.push(variety);
				}
			}
		}
		assert_eq!(seen.len(), 2);
	}

	#[test]
	fn test_generate() {
		let generator = Generator::new().unwrap();
		let mut input = generator.make_generation_input();
		input.shape.max_syllables = 2;
		let mut rng = StdRng::seed_from_u64(3);
		for _ in 0..20 {
			let word = generator.generate(&mut rng, &input).unwrap();
			assert!(!word.is_empty());
		}
	}

	#[test]
	fn test_generate_without_engines() {
		let generator = Generator { engines: HashMap::new() };
		let input = generator.make_generation_input();
		let mut rng = StdRng::seed_from_u64(0);
		assert_eq!(generator.generate(&mut rng, &input), Err(GenerationError::NoVariety));
	}

	#[test]
	fn test_snapshots_are_written_then_reused() {
		let dir = tempfile::tempdir().unwrap();
		let built = Generator::with_snapshots(dir.path()).unwrap();
		assert!(dir.path().join("american_english.bin").exists());
		assert!(dir.path().join("metropolitan_french.bin").exists());

		let loaded = Generator::with_snapshots(dir.path()).unwrap();
		for variety in Variety::ALL {
			assert_eq!(built.engine(variety), loaded.engine(variety));
		}
	}
}
