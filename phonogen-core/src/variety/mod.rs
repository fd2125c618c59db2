//! Language varieties shipped with the engine.
//!
//! A variety is data: a phoneme inventory with its spelling rules and three
//! functions building the onset, nucleus and coda tables from that
//! inventory. The engine itself is the same for every variety.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConstructionError};
use crate::inventory::{Inventory, Phoneme};
use crate::model::constraint_table::ConstraintTable;
use crate::phonetics::Symbol;

/// General American English.
pub mod american_english;

/// Metropolitan (standard European) French.
pub mod metropolitan_french;

/// Builds one constraint table from an inventory.
pub type TableFn = fn(&Inventory) -> Result<ConstraintTable, ConstructionError>;

/// Everything the engine needs to know about a variety.
pub struct Definition {
	pub variety: Variety,
	pub phonemes: fn() -> Vec<Phoneme>,
	pub onsets: TableFn,
	/// Class 0 must be the free tier (every vowel); the conditioning map
	/// narrows the nucleus after specific onset-final phonemes.
	pub nuclei: TableFn,
	/// The conditioning map narrows the coda after specific nuclei.
	pub codas: TableFn,
	/// Nuclei that can only appear in closed syllables.
	pub must_have_coda: &'static [Symbol],
	/// Letters that may be appended, unpronounced, to a word ending in a vowel.
	pub silent_final_letters: &'static [char],
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variety {
	AmericanEnglish,
	MetropolitanFrench,
}

impl Variety {
	pub const ALL: [Variety; 2] = [Variety::AmericanEnglish, Variety::MetropolitanFrench];

	pub fn name(self) -> &'static str {
		match self {
			Variety::AmericanEnglish => "american_english",
			Variety::MetropolitanFrench => "metropolitan_french",
		}
	}

	pub fn definition(self) -> Definition {
		match self {
			Variety::AmericanEnglish => american_english::definition(),
			Variety::MetropolitanFrench => metropolitan_french::definition(),
		}
	}
}

impl fmt::Display for Variety {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Variety {
	type Err = ConfigError;

	/// Accepts the variety name or a short language tag (`en-us`, `fr-fr`).
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().replace('-', "_").as_str() {
			"american_english" | "en_us" | "en" => Ok(Variety::AmericanEnglish),
			"metropolitan_french" | "fr_fr" | "fr" => Ok(Variety::MetropolitanFrench),
			_ => Err(ConfigError::UnknownVariety(s.to_owned())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_names() {
		for variety in Variety::ALL {
			assert_eq!(variety.name().parse::<Variety>().unwrap(), variety);
			assert_eq!(variety.to_string(), variety.name());
		}
		assert_eq!("en-US".parse::<Variety>().unwrap(), Variety::AmericanEnglish);
		assert_eq!("fr".parse::<Variety>().unwrap(), Variety::MetropolitanFrench);
		assert!("klingon".parse::<Variety>().is_err());
	}

	#[test]
	fn test_definitions_match_their_variety() {
		for variety in Variety::ALL {
			assert_eq!(variety.definition().variety, variety);
		}
	}
}
