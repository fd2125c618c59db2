use std::path::Path;

use log::{debug, info};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::error::{ConstructionError, GenerationError, SnapshotError};
use crate::inventory::{Inventory, PhonemeId};
use crate::io;
use crate::model::constraint_table::{Cluster, ConstraintTable};
use crate::model::syllable::{Syllable, Word};
use crate::model::word_shape::{MAX_SYLLABLES, WordShape};
use crate::spelling::{self, Context, Position};
use crate::variety::Variety;

/// Index of the nucleus class used when no conditioning entry applies.
pub const FREE_TIER: usize = 0;

/// Word generator for one language variety.
///
/// An `Engine` owns the phoneme inventory of its variety and the three
/// phonotactic tables built from it. It holds no random source: every
/// generating call borrows one from the caller.
///
/// # Responsibilities
/// - Build and validate the inventory and tables of a `Variety`
/// - Assemble syllables (onset, nucleus, coda) from the tables
/// - Spell assembled syllables with the context-sensitive rules
/// - Save and restore itself as a compact binary snapshot
///
/// # Invariants
/// - Every engine handed out by `new`, `load` or `from_bytes` has passed
///   `validate`
/// - The engine is immutable once built and can be shared across threads
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Engine {
	variety: Variety,
	inventory: Inventory,
	onsets: ConstraintTable,
	nuclei: ConstraintTable,
	codas: ConstraintTable,
	must_have_coda: Vec<PhonemeId>,
	silent_final_letters: Vec<char>,
}

impl Engine {
	/// Builds the engine of a variety.
	///
	/// # Behavior
	/// - Registers the phonemes of the variety.
	/// - Builds the onset, nucleus and coda tables, in that order.
	/// - Resolves the must-have-coda set against the inventory.
	/// - Runs `validate` on the result.
	///
	/// # Errors
	/// Returns a `ConstructionError` if the variety definition is
	/// inconsistent. Shipped varieties never fail; the error exists so that a
	/// broken definition is reported at startup instead of during generation.
	pub fn new(variety: Variety) -> Result<Self, ConstructionError> {
		let definition = variety.definition();
		let inventory = Inventory::new((definition.phonemes)())?;
		let onsets = (definition.onsets)(&inventory)?;
		let nuclei = (definition.nuclei)(&inventory)?;
		let codas = (definition.codas)(&inventory)?;
		let must_have_coda = definition
			.must_have_coda
			.iter()
			.map(|symbol| inventory.id(*symbol))
			.collect::<Result<Vec<_>, _>>()?;

		let engine = Self {
			variety,
			inventory,
			onsets,
			nuclei,
			codas,
			must_have_coda,
			silent_final_letters: definition.silent_final_letters.to_vec(),
		};
		engine.validate()?;

		debug!(
			"Built {} engine: {} phonemes, {} onset clusters, {} nuclei, {} coda clusters",
			variety,
			engine.inventory.len(),
			engine.onsets.clusters().count(),
			engine.nuclei.clusters().count(),
			engine.codas.clusters().count()
		);
		Ok(engine)
	}

	pub fn variety(&self) -> Variety {
		self.variety
	}

	pub fn inventory(&self) -> &Inventory {
		&self.inventory
	}

	pub fn onsets(&self) -> &ConstraintTable {
		&self.onsets
	}

	pub fn nuclei(&self) -> &ConstraintTable {
		&self.nuclei
	}

	pub fn codas(&self) -> &ConstraintTable {
		&self.codas
	}

	pub fn must_have_coda(&self) -> &[PhonemeId] {
		&self.must_have_coda
	}

	pub fn is_must_have_coda(&self, nucleus: PhonemeId) -> bool {
		self.must_have_coda.contains(&nucleus)
	}

	pub fn silent_final_letters(&self) -> &[char] {
		&self.silent_final_letters
	}

	/// Every letter a generated word may contain.
	pub fn letters(&self) -> Vec<char> {
		let mut letters = self.inventory.letters();
		letters.extend_from_slice(&self.silent_final_letters);
		letters.sort_unstable();
		letters.dedup();
		letters
	}

	/// Nucleus class licensed after the last phoneme of an onset.
	pub(crate) fn nucleus_class_after(&self, onset_end: Option<PhonemeId>) -> usize {
		onset_end
			.and_then(|id| self.nuclei.conditioned_class(id))
			.unwrap_or(FREE_TIER)
	}

	/// Coda clusters licensed after a nucleus.
	pub(crate) fn codas_after(&self, nucleus: PhonemeId) -> Vec<&Cluster> {
		match self.codas.conditioned_class(nucleus).and_then(|c| self.codas.class(c)) {
			Some(class) => class.clusters().iter().collect(),
			None => self.codas.clusters().collect(),
		}
	}

	/// Spelling context of a phoneme given its neighbours.
	pub(crate) fn context(
		&self,
		position: Position,
		prev: Option<PhonemeId>,
		next: Option<PhonemeId>,
		word_final: bool,
	) -> Result<Context, GenerationError> {
		let neighbor = |id: Option<PhonemeId>| -> Result<_, GenerationError> {
			match id {
				Some(id) => self
					.inventory
					.get(id)
					.map(|p| Some(p.neighbor()))
					.ok_or(GenerationError::InvalidPhoneme(id.index())),
				None => Ok(None),
			}
		};
		Ok(Context {
			position,
			prev: neighbor(prev)?,
			next: neighbor(next)?,
			word_final,
		})
	}

	/// Samples one syllable.
	///
	/// # Parameters
	/// - `onset`: whether the syllable starts with an onset cluster.
	/// - `coda`: whether a coda is requested. A nucleus of the
	///   must-have-coda set adds one even when it is not.
	///
	/// # Behavior
	/// - The onset class is picked uniformly among non-empty classes, then a
	///   cluster uniformly inside it.
	/// - The nucleus comes from the class conditioned by the last onset
	///   phoneme, or from the free tier.
	/// - The coda comes from the class conditioned by the nucleus, or from a
	///   uniformly picked non-empty class.
	///
	/// # Errors
	/// `EmptyTable` if a table has nothing to offer, which validation rules
	/// out for constructed engines.
	pub fn assemble<R: Rng + ?Sized>(&self, rng: &mut R, onset: bool, coda: bool) -> Result<Syllable, GenerationError> {
		let onset = if onset {
			self.onsets.pick(rng).ok_or(GenerationError::EmptyTable("onset"))?.clone()
		} else {
			Vec::new()
		};

		let class = self.nucleus_class_after(onset.last().copied());
		let nucleus = self
			.nuclei
			.pick_in(class, rng)
			.and_then(|cluster| cluster.first().copied())
			.ok_or(GenerationError::EmptyTable("nucleus"))?;

		let coda = if coda || self.is_must_have_coda(nucleus) {
			let cluster = match self.codas.conditioned_class(nucleus) {
				Some(class) => self.codas.pick_in(class, rng),
				None => self.codas.pick(rng),
			};
			cluster.ok_or(GenerationError::EmptyTable("coda"))?.clone()
		} else {
			Vec::new()
		};

		Ok(Syllable { onset, nucleus, coda })
	}

	/// Spells a sequence of syllables as one word.
	///
	/// # Behavior
	/// - Each sound is spelled with the previous sound of its syllable and
	///   the next sound of the word as context.
	/// - The last sound of the word is spelled as word-final.
	/// - If the variety has silent final letters and the last syllable has no
	///   coda, one of them is appended with probability
	///   `silent_letter_probability`.
	///
	/// # Errors
	/// - `InvalidPhoneme` if a syllable holds an id foreign to the inventory.
	/// - `Unspellable` if no rule accepts a context. Validation guarantees
	///   this never happens for syllables produced by `assemble`.
	pub fn spell_syllables<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		syllables: &[Syllable],
		silent_letter_probability: f64,
	) -> Result<String, GenerationError> {
		let sounds: Vec<(usize, Position, PhonemeId)> = syllables
			.iter()
			.enumerate()
			.flat_map(|(i, syllable)| {
				syllable
					.onset
					.iter()
					.map(move |id| (i, Position::Onset, *id))
					.chain(std::iter::once((i, Position::Nucleus, syllable.nucleus)))
					.chain(syllable.coda.iter().map(move |id| (i, Position::Coda, *id)))
			})
			.collect();

		let mut word = String::new();
		for (k, &(syllable, position, id)) in sounds.iter().enumerate() {
			let prev = k
				.checked_sub(1)
				.map(|j| sounds[j])
				.filter(|(s, _, _)| *s == syllable)
				.map(|(_, _, id)| id);
			let next = sounds.get(k + 1).map(|(_, _, id)| *id);
			let context = self.context(position, prev, next, next.is_none())?;

			let phoneme = self.inventory.get(id).ok_or(GenerationError::InvalidPhoneme(id.index()))?;
			let text = spelling::resolve(phoneme.spellings(), &context, rng).ok_or_else(|| {
				GenerationError::Unspellable { symbol: phoneme.symbol(), context: context.to_string() }
			})?;
			word.push_str(text);
		}

		let open_ending = syllables.last().is_some_and(|s| !s.has_coda());
		if open_ending && !self.silent_final_letters.is_empty() && rng.random_bool(silent_letter_probability) {
			if let Some(letter) = self.silent_final_letters.choose(rng) {
				word.push(*letter);
			}
		}

		Ok(word)
	}

	/// Generates one word.
	///
	/// # Behavior
	/// - Draws the syllable count uniformly in `1..=shape.max_syllables`.
	/// - The first syllable has an onset with probability
	///   `onset_probability`; every later syllable has one exactly when the
	///   previous syllable ended without a coda.
	/// - A coda is requested with probability `coda_probability` for the
	///   first syllable and for syllables without onset; otherwise only a
	///   must-have-coda nucleus adds one.
	///
	/// # Errors
	/// - `NoSyllables` if `shape.max_syllables` is zero.
	/// - `TooManySyllables` if it exceeds `MAX_SYLLABLES`.
	pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, shape: &WordShape) -> Result<Word, GenerationError> {
		if shape.max_syllables == 0 {
			return Err(GenerationError::NoSyllables);
		}
		if shape.max_syllables > MAX_SYLLABLES {
			return Err(GenerationError::TooManySyllables(shape.max_syllables));
		}

		let count = rng.random_range(1..=shape.max_syllables);
		let mut syllables: Vec<Syllable> = Vec::new();
		for i in 0..count {
			let onset = match syllables.last() {
				Some(previous) => !previous.has_coda(),
				None => rng.random_bool(shape.onset_probability()),
			};
			let coda = (!onset || i == 0) && rng.random_bool(shape.coda_probability());
			syllables.push(self.assemble(rng, onset, coda)?);
		}

		let text = self.spell_syllables(rng, &syllables, shape.silent_letter_probability())?;
		Ok(Word { syllables, text })
	}

	/// Generates the text of one word with default probabilities.
	///
	/// # Errors
	/// `NoSyllables` if `max_syllables` is zero, `TooManySyllables` above
	/// `MAX_SYLLABLES`.
	pub fn generate_word<R: Rng + ?Sized>(&self, rng: &mut R, max_syllables: usize) -> Result<String, GenerationError> {
		let mut shape = WordShape::default();
		shape.max_syllables = max_syllables;
		Ok(self.generate(rng, &shape)?.text)
	}

	/// Encodes the engine with `postcard`.
	pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
		Ok(postcard::to_stdvec(self)?)
	}

	/// Decodes and validates an engine.
	///
	/// # Errors
	/// `Encoding` if the bytes are not an engine, `Invalid` if the decoded
	/// engine fails validation.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
		let engine: Self = postcard::from_bytes(bytes)?;
		engine.validate()?;
		Ok(engine)
	}

	/// Writes a snapshot, creating the parent directory if needed.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
		io::write_bytes(&path, &self.to_bytes()?)?;
		info!("Saved {} engine to {}", self.variety, path.as_ref().display());
		Ok(())
	}

	/// Reads and validates a snapshot.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
		let bytes = io::read_bytes(&path)?;
		let engine = Self::from_bytes(&bytes)?;
		debug!("Loaded {} engine from {}", engine.variety, path.as_ref().display());
		Ok(engine)
	}

	/// Loads `<dir>/<variety>.bin` if it exists, otherwise builds the engine
	/// and writes that snapshot for the next run.
	///
	/// # Errors
	/// - `WrongVariety` if the snapshot holds another variety.
	/// - Any error of `load`, `new` or `save`.
	pub fn load_or_build<P: AsRef<Path>>(variety: Variety, dir: P) -> Result<Self, SnapshotError> {
		let path = io::snapshot_path(&dir, variety.name());
		if path.exists() {
			let engine = Self::load(&path)?;
			if engine.variety != variety {
				return Err(SnapshotError::WrongVariety { expected: variety, found: engine.variety });
			}
			return Ok(engine);
		}

		let engine = Self::new(variety)?;
		engine.save(&path)?;
		Ok(engine)
	}

	/// Assembles an engine without validating it.
	#[cfg(test)]
	pub(crate) fn from_parts(
		variety: Variety,
		inventory: Inventory,
		onsets: ConstraintTable,
		nuclei: ConstraintTable,
		codas: ConstraintTable,
		must_have_coda: Vec<PhonemeId>,
		silent_final_letters: Vec<char>,
	) -> Self {
		Self { variety, inventory, onsets, nuclei, codas, must_have_coda, silent_final_letters }
	}
}
