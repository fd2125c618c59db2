use serde::{Deserialize, Serialize};

use crate::error::ConstructionError;
use crate::phonetics::{Phone, Symbol, phone};
use crate::spelling::{Neighbor, SpellingRule};

/// Stable handle of a phoneme inside its variety's inventory.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhonemeId(pub(crate) usize);

impl PhonemeId {
	pub fn index(self) -> usize {
		self.0
	}
}

/// A sound of a variety and the ways it can be written.
///
/// ## Invariants
/// - `phone` always equals `phonetics::phone(symbol)`
/// - Rules are kept in declaration order; the resolver relies on it only
///   for determinism, never for priority
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Phoneme {
	symbol: Symbol,
	phone: Phone,
	spellings: Vec<SpellingRule>,
}

impl Phoneme {
	pub fn new(symbol: Symbol, spellings: Vec<SpellingRule>) -> Self {
		Self { symbol, phone: phone(symbol), spellings }
	}

	pub fn symbol(&self) -> Symbol {
		self.symbol
	}

	pub fn phone(&self) -> &Phone {
		&self.phone
	}

	pub fn spellings(&self) -> &[SpellingRule] {
		&self.spellings
	}

	/// This phoneme seen from an adjacent sound's spelling context.
	pub fn neighbor(&self) -> Neighbor {
		Neighbor { symbol: self.symbol, phone: self.phone }
	}
}

/// The phonemes of one variety, addressed by `PhonemeId`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Inventory {
	phonemes: Vec<Phoneme>,
}

impl Inventory {
	/// Builds an inventory, rejecting symbols registered twice.
	pub fn new(phonemes: Vec<Phoneme>) -> Result<Self, ConstructionError> {
		for (i, phoneme) in phonemes.iter().enumerate() {
			if phonemes[..i].iter().any(|p| p.symbol == phoneme.symbol) {
				return Err(ConstructionError::DuplicateSymbol(phoneme.symbol));
			}
		}
		Ok(Self { phonemes })
	}

	pub fn len(&self) -> usize {
		self.phonemes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.phonemes.is_empty()
	}

	/// Looks a symbol up.
	///
	/// # Errors
	/// `UnknownSymbol` if the variety did not register it. Tables are built
	/// through this method, so a typo in a variety definition surfaces at
	/// construction time.
	pub fn id(&self, symbol: Symbol) -> Result<PhonemeId, ConstructionError> {
		self.phonemes
			.iter()
			.position(|p| p.symbol == symbol)
			.map(PhonemeId)
			.ok_or(ConstructionError::UnknownSymbol(symbol))
	}

	/// Returns the phoneme behind an id, `None` if it is out of range.
	pub fn get(&self, id: PhonemeId) -> Option<&Phoneme> {
		self.phonemes.get(id.0)
	}

	/// Same as `get` for ids already checked by validation.
	///
	/// # Panics
	/// If `id` does not belong to this inventory.
	pub(crate) fn phoneme(&self, id: PhonemeId) -> &Phoneme {
		&self.phonemes[id.0]
	}

	/// Ids of every phoneme accepted by `filter`, in declaration order.
	pub fn select<F>(&self, filter: F) -> Vec<PhonemeId>
	where
		F: Fn(&Phoneme) -> bool,
	{
		self.iter().filter(|(_, p)| filter(*p)).map(|(id, _)| id).collect()
	}

	pub fn iter(&self) -> impl Iterator<Item = (PhonemeId, &Phoneme)> {
		self.phonemes.iter().enumerate().map(|(i, p)| (PhonemeId(i), p))
	}

	/// Every distinct letter the spelling rules can produce.
	pub fn letters(&self) -> Vec<char> {
		let mut letters: Vec<char> = self
			.phonemes
			.iter()
			.flat_map(|p| p.spellings.iter())
			.flat_map(|r| r.text.chars())
			.collect();
		letters.sort_unstable();
		letters.dedup();
		letters
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::spelling::{Condition, rule};

	fn sample() -> Inventory {
		Inventory::new(vec![
			Phoneme::new(Symbol::A, vec![rule("a", Condition::Always)]),
			Phoneme::new(Symbol::T, vec![rule("t", Condition::Always), rule("tt", Condition::BetweenVowels)]),
			Phoneme::new(Symbol::S, vec![rule("s", Condition::Always)]),
		])
		.unwrap()
	}

	#[test]
	fn test_lookup() {
		let inventory = sample();
		let t = inventory.id(Symbol::T).unwrap();
		assert_eq!(t.index(), 1);
		assert_eq!(inventory.get(t).unwrap().symbol(), Symbol::T);
		assert!(inventory.get(t).unwrap().phone().is_stop());
		assert_eq!(inventory.id(Symbol::Ny), Err(ConstructionError::UnknownSymbol(Symbol::Ny)));
		assert!(inventory.get(PhonemeId(99)).is_none());
	}

	#[test]
	fn test_duplicates_are_rejected() {
		let result = Inventory::new(vec![
			Phoneme::new(Symbol::A, vec![rule("a", Condition::Always)]),
			Phoneme::new(Symbol::A, vec![rule("aa", Condition::Always)]),
		]);
		assert_eq!(result, Err(ConstructionError::DuplicateSymbol(Symbol::A)));
	}

	#[test]
	fn test_select_keeps_declaration_order() {
		let inventory = sample();
		let consonants = inventory.select(|p| p.phone().is_consonant());
		assert_eq!(consonants, vec![PhonemeId(1), PhonemeId(2)]);
	}

	#[test]
	fn test_letters() {
		assert_eq!(sample().letters(), vec!['a', 's', 't']);
	}
}
