use serde::{Deserialize, Serialize};

use crate::inventory::PhonemeId;

/// One assembled syllable, before spelling.
///
/// Every phoneme comes from a cluster of the engine's tables.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Syllable {
	pub onset: Vec<PhonemeId>,
	pub nucleus: PhonemeId,
	pub coda: Vec<PhonemeId>,
}

impl Syllable {
	/// Phonemes in pronunciation order.
	pub fn phonemes(&self) -> impl Iterator<Item = PhonemeId> + '_ {
		self.onset.iter().copied().chain(std::iter::once(self.nucleus)).chain(self.coda.iter().copied())
	}

	pub fn has_onset(&self) -> bool {
		!self.onset.is_empty()
	}

	pub fn has_coda(&self) -> bool {
		!self.coda.is_empty()
	}
}

/// A generated word: the syllables it was built from and its spelling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
	pub syllables: Vec<Syllable>,
	pub text: String,
}
