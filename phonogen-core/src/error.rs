//! Error types of the engine.
//!
//! Construction errors are defects in a variety definition (or a damaged
//! snapshot) and are reported once, when the engine is built. Generation
//! only fails on bad arguments.

use thiserror::Error;

use crate::phonetics::Symbol;
use crate::variety::Variety;

/// A variety definition (or a decoded snapshot) is inconsistent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConstructionError {
	/// A table or map references a symbol the inventory does not register.
	#[error("Symbol {0} is not part of the inventory")]
	UnknownSymbol(Symbol),

	#[error("Symbol {0} is registered twice")]
	DuplicateSymbol(Symbol),

	/// A phoneme index points outside the inventory.
	#[error("Phoneme index {index} in {location} is out of range")]
	InvalidPhoneme { location: String, index: usize },

	/// A conditioning map points at a class that does not exist.
	#[error("Class index {index} in {location} is out of range")]
	InvalidClass { location: String, index: usize },

	#[error("Cluster of {len} phonemes in {location}, expected 1 to 3")]
	MalformedCluster { location: String, len: usize },

	#[error("Class '{label}' is the target of a conditioning entry but is empty")]
	EmptyConditionedClass { label: String },

	#[error("The {table} table has no non-empty class")]
	NoSelectableClass { table: &'static str },

	/// A vowel in a consonant slot, or the other way round.
	#[error("{symbol} cannot appear in the {table} table")]
	WrongPhoneKind { table: &'static str, symbol: Symbol },

	#[error("{0} has no spelling rule")]
	NoSpellingRules(Symbol),

	/// Some reachable context has no accepting spelling rule.
	#[error("No spelling of {symbol} accepts {context}")]
	UncoveredContext { symbol: Symbol, context: String },
}

/// Generation was called with unusable arguments, or hit a defect that
/// validation should have caught.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
	#[error("A word needs at least one syllable")]
	NoSyllables,

	#[error("No spelling of {symbol} accepts {context}")]
	Unspellable { symbol: Symbol, context: String },

	#[error("A word has at most {max} syllables, got {0}", max = crate::model::word_shape::MAX_SYLLABLES)]
	TooManySyllables(usize),

	#[error("No variety available for generation")]
	NoVariety,

	#[error("The {0} table has nothing to pick from")]
	EmptyTable(&'static str),

	#[error("Phoneme index {0} is out of range")]
	InvalidPhoneme(usize),
}

/// Invalid generation settings.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
	#[error("{name} must be between 0.0 and 1.0, got {value}")]
	InvalidProbability { name: &'static str, value: f64 },

	#[error("A word needs at least one syllable")]
	NoSyllables,

	#[error("A word has at most {max} syllables, got {0}", max = crate::model::word_shape::MAX_SYLLABLES)]
	TooManySyllables(usize),

	#[error("Unknown variety '{0}'")]
	UnknownVariety(String),

	#[error("Intensity must be a finite, non-negative number, got {0}")]
	InvalidIntensity(f32),
}

/// Reading or writing an engine snapshot failed.
#[derive(Debug, Error)]
pub enum SnapshotError {
	#[error("Snapshot I/O failed: {0}")]
	Io(#[from] std::io::Error),

	#[error("Snapshot encoding failed: {0}")]
	Encoding(#[from] postcard::Error),

	#[error("Snapshot is not a valid engine: {0}")]
	Invalid(#[from] ConstructionError),

	#[error("Snapshot holds the {found} engine, expected {expected}")]
	WrongVariety { expected: Variety, found: Variety },
}
