use std::fmt;

use serde::{Deserialize, Serialize};

/// Sound symbols known to the engine.
///
/// The enum is the union of every sound used by the shipped varieties.
/// A variety registers the subset it needs in its `Inventory`; the same
/// symbol always carries the same articulatory features (see [`phone`]).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
	// Vowels and diphthongs
	A,
	Ash,
	BackA,
	Ai,
	Au,
	E,
	OpenE,
	Ei,
	Schwa,
	I,
	LaxI,
	U,
	LaxU,
	O,
	OpenO,
	Ou,
	Oi,
	Y,
	SlashedO,
	Oe,
	NasalE,
	NasalO,
	NasalA,
	// Consonants
	M,
	N,
	Eng,
	Ny,
	P,
	T,
	K,
	B,
	D,
	G,
	Tsh,
	Dzh,
	F,
	Theta,
	S,
	Sh,
	H,
	V,
	Eth,
	Z,
	Zh,
	W,
	L,
	R,
	UvularR,
	J,
	TurnedH,
}

impl Symbol {
	/// IPA transcription of the symbol.
	pub fn ipa(self) -> &'static str {
		match self {
			Symbol::A => "a",
			Symbol::Ash => "æ",
			Symbol::BackA => "ɑ",
			Symbol::Ai => "aɪ",
			Symbol::Au => "aʊ",
			Symbol::E => "e",
			Symbol::OpenE => "ɛ",
			Symbol::Ei => "eɪ",
			Symbol::Schwa => "ə",
			Symbol::I => "i",
			Symbol::LaxI => "ɪ",
			Symbol::U => "u",
			Symbol::LaxU => "ʊ",
			Symbol::O => "o",
			Symbol::OpenO => "ɔ",
			Symbol::Ou => "oʊ",
			Symbol::Oi => "ɔɪ",
			Symbol::Y => "y",
			Symbol::SlashedO => "ø",
			Symbol::Oe => "œ",
			Symbol::NasalE => "ɛ̃",
			Symbol::NasalO => "ɔ̃",
			Symbol::NasalA => "ɑ̃",
			Symbol::M => "m",
			Symbol::N => "n",
			Symbol::Eng => "ŋ",
			Symbol::Ny => "ɲ",
			Symbol::P => "p",
			Symbol::T => "t",
			Symbol::K => "k",
			Symbol::B => "b",
			Symbol::D => "d",
			Symbol::G => "g",
			Symbol::Tsh => "tʃ",
			Symbol::Dzh => "dʒ",
			Symbol::F => "f",
			Symbol::Theta => "θ",
			Symbol::S => "s",
			Symbol::Sh => "ʃ",
			Symbol::H => "h",
			Symbol::V => "v",
			Symbol::Eth => "ð",
			Symbol::Z => "z",
			Symbol::Zh => "ʒ",
			Symbol::W => "w",
			Symbol::L => "l",
			Symbol::R => "ɹ",
			Symbol::UvularR => "ʁ̞",
			Symbol::J => "j",
			Symbol::TurnedH => "ɥ",
		}
	}
}

impl fmt::Display for Symbol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "/{}/", self.ipa())
	}
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rounding {
	Rounded,
	Unrounded,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Height {
	Close,
	NearClose,
	CloseMid,
	Mid,
	OpenMid,
	NearOpen,
	Open,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Backness {
	Front,
	Central,
	Back,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Nasality {
	Oral,
	Nasal,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Voicing {
	Voiced,
	Voiceless,
}

/// Manner of articulation.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Manner {
	Nasal,
	Plosive,
	Fricative,
	Affricate,
	Approximant,
}

/// Place of articulation.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Place {
	Labial,
	Dental,
	Alveolar,
	PostAlveolar,
	Palatal,
	Velar,
	Uvular,
	Glottal,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VowelFeatures {
	pub rounding: Rounding,
	pub height: Height,
	pub backness: Backness,
	pub nasality: Nasality,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConsonantFeatures {
	pub voicing: Voicing,
	pub manner: Manner,
	pub place: Place,
}

/// Articulatory description of a sound.
///
/// Vowels and consonants carry disjoint feature sets; callers match on the
/// variant instead of testing a flag.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phone {
	Vowel(VowelFeatures),
	Consonant(ConsonantFeatures),
}

impl Phone {
	const fn vowel(rounding: Rounding, height: Height, backness: Backness, nasality: Nasality) -> Self {
		Phone::Vowel(VowelFeatures { rounding, height, backness, nasality })
	}

	const fn consonant(voicing: Voicing, manner: Manner, place: Place) -> Self {
		Phone::Consonant(ConsonantFeatures { voicing, manner, place })
	}

	pub fn is_vowel(&self) -> bool {
		matches!(self, Phone::Vowel(_))
	}

	pub fn is_consonant(&self) -> bool {
		matches!(self, Phone::Consonant(_))
	}

	/// Manner of articulation, `None` for vowels.
	pub fn manner(&self) -> Option<Manner> {
		match self {
			Phone::Consonant(c) => Some(c.manner),
			Phone::Vowel(_) => None,
		}
	}

	/// Place of articulation, `None` for vowels.
	pub fn place(&self) -> Option<Place> {
		match self {
			Phone::Consonant(c) => Some(c.place),
			Phone::Vowel(_) => None,
		}
	}

	pub fn is_stop(&self) -> bool {
		self.manner() == Some(Manner::Plosive)
	}

	pub fn is_fricative(&self) -> bool {
		self.manner() == Some(Manner::Fricative)
	}

	pub fn is_affricate(&self) -> bool {
		self.manner() == Some(Manner::Affricate)
	}

	pub fn is_approximant(&self) -> bool {
		self.manner() == Some(Manner::Approximant)
	}

	pub fn is_nasal_consonant(&self) -> bool {
		self.manner() == Some(Manner::Nasal)
	}

	pub fn is_nasal_vowel(&self) -> bool {
		matches!(self, Phone::Vowel(v) if v.nasality == Nasality::Nasal)
	}

	/// Vowels count as voiced.
	pub fn is_voiced(&self) -> bool {
		match self {
			Phone::Consonant(c) => c.voicing == Voicing::Voiced,
			Phone::Vowel(_) => true,
		}
	}

	pub fn is_voiceless(&self) -> bool {
		!self.is_voiced()
	}

	/// Alveolar or post-alveolar fricative.
	pub fn is_sibilant(&self) -> bool {
		self.is_fricative() && matches!(self.place(), Some(Place::Alveolar | Place::PostAlveolar))
	}

	pub fn is_front(&self) -> bool {
		matches!(self, Phone::Vowel(v) if v.backness == Backness::Front)
	}

	/// Close-mid, mid or open-mid vowel.
	pub fn is_any_mid(&self) -> bool {
		matches!(self, Phone::Vowel(v) if matches!(v.height, Height::CloseMid | Height::Mid | Height::OpenMid))
	}

	/// Unrounded vowel that is neither open nor near-open (the vowels
	/// spelled i, e, y in front of which c and g soften).
	pub fn is_e_or_i(&self) -> bool {
		matches!(self, Phone::Vowel(v)
			if v.rounding == Rounding::Unrounded
			&& !matches!(v.height, Height::Open | Height::NearOpen))
	}
}

/// Returns `true` when both sounds share a place of articulation.
///
/// Alveolar and post-alveolar count as the same place. Vowels are never
/// homorganic with anything.
pub fn homorganic(lhs: &Phone, rhs: &Phone) -> bool {
	match (lhs.place(), rhs.place()) {
		(Some(l), Some(r)) if l == r => true,
		(Some(Place::Alveolar), Some(Place::PostAlveolar)) => true,
		(Some(Place::PostAlveolar), Some(Place::Alveolar)) => true,
		_ => false,
	}
}

/// Returns the articulatory features of a symbol.
pub fn phone(symbol: Symbol) -> Phone {
	use Backness::*;
	use Height::*;
	use Manner::*;
	use Nasality::Oral;
	use Place::*;
	use Rounding::*;
	use Voicing::*;

	match symbol {
		Symbol::A => Phone::vowel(Unrounded, Open, Front, Oral),
		Symbol::Ai => Phone::vowel(Unrounded, Open, Front, Oral),
		Symbol::Au => Phone::vowel(Unrounded, Open, Front, Oral),
		Symbol::Ash => Phone::vowel(Unrounded, NearOpen, Front, Oral),
		Symbol::OpenE => Phone::vowel(Unrounded, OpenMid, Front, Oral),
		Symbol::NasalE => Phone::vowel(Unrounded, OpenMid, Front, Nasality::Nasal),
		Symbol::Oe => Phone::vowel(Rounded, OpenMid, Front, Oral),
		Symbol::E => Phone::vowel(Unrounded, CloseMid, Front, Oral),
		Symbol::Ei => Phone::vowel(Unrounded, CloseMid, Front, Oral),
		Symbol::SlashedO => Phone::vowel(Rounded, CloseMid, Front, Oral),
		Symbol::LaxI => Phone::vowel(Unrounded, NearClose, Front, Oral),
		Symbol::I => Phone::vowel(Unrounded, Close, Front, Oral),
		Symbol::Y => Phone::vowel(Rounded, Close, Front, Oral),
		Symbol::BackA => Phone::vowel(Unrounded, Open, Back, Oral),
		Symbol::NasalA => Phone::vowel(Unrounded, Open, Back, Nasality::Nasal),
		Symbol::OpenO => Phone::vowel(Rounded, OpenMid, Back, Oral),
		Symbol::NasalO => Phone::vowel(Rounded, OpenMid, Back, Nasality::Nasal),
		Symbol::Oi => Phone::vowel(Rounded, OpenMid, Back, Oral),
		Symbol::O => Phone::vowel(Rounded, CloseMid, Back, Oral),
		Symbol::Ou => Phone::vowel(Rounded, CloseMid, Back, Oral),
		Symbol::LaxU => Phone::vowel(Rounded, NearClose, Back, Oral),
		Symbol::Schwa => Phone::vowel(Unrounded, Mid, Central, Oral),
		Symbol::U => Phone::vowel(Rounded, Close, Back, Oral),
		Symbol::M => Phone::consonant(Voiced, Nasal, Labial),
		Symbol::N => Phone::consonant(Voiced, Nasal, Alveolar),
		Symbol::Ny => Phone::consonant(Voiced, Nasal, Palatal),
		Symbol::Eng => Phone::consonant(Voiced, Nasal, Velar),
		Symbol::P => Phone::consonant(Voiceless, Plosive, Labial),
		Symbol::T => Phone::consonant(Voiceless, Plosive, Alveolar),
		Symbol::Tsh => Phone::consonant(Voiceless, Affricate, PostAlveolar),
		Symbol::K => Phone::consonant(Voiceless, Plosive, Velar),
		Symbol::B => Phone::consonant(Voiced, Plosive, Labial),
		Symbol::D => Phone::consonant(Voiced, Plosive, Alveolar),
		Symbol::Dzh => Phone::consonant(Voiced, Affricate, PostAlveolar),
		Symbol::G => Phone::consonant(Voiced, Plosive, Velar),
		Symbol::F => Phone::consonant(Voiceless, Fricative, Labial),
		Symbol::Theta => Phone::consonant(Voiceless, Fricative, Dental),
		Symbol::S => Phone::consonant(Voiceless, Fricative, Alveolar),
		Symbol::Sh => Phone::consonant(Voiceless, Fricative, PostAlveolar),
		Symbol::H => Phone::consonant(Voiceless, Fricative, Glottal),
		Symbol::V => Phone::consonant(Voiced, Fricative, Labial),
		Symbol::Eth => Phone::consonant(Voiced, Fricative, Dental),
		Symbol::Z => Phone::consonant(Voiced, Fricative, Alveolar),
		Symbol::Zh => Phone::consonant(Voiced, Fricative, PostAlveolar),
		Symbol::W => Phone::consonant(Voiced, Approximant, Labial),
		Symbol::L => Phone::consonant(Voiced, Approximant, Alveolar),
		Symbol::R => Phone::consonant(Voiced, Approximant, PostAlveolar),
		Symbol::TurnedH => Phone::consonant(Voiced, Approximant, Palatal),
		Symbol::UvularR => Phone::consonant(Voiced, Approximant, Uvular),
		Symbol::J => Phone::consonant(Voiced, Approximant, Palatal),
	}
}
