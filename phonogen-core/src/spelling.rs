use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::phonetics::{Phone, Symbol, phone};

/// Slot of a syllable a sound is spelled in.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
	Onset,
	Nucleus,
	Coda,
}

/// A sound adjacent to the one being spelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Neighbor {
	pub symbol: Symbol,
	pub phone: Phone,
}

impl Neighbor {
	pub fn new(symbol: Symbol) -> Self {
		Self { symbol, phone: phone(symbol) }
	}
}

impl From<Symbol> for Neighbor {
	fn from(symbol: Symbol) -> Self {
		Neighbor::new(symbol)
	}
}

/// Everything a spelling condition may look at.
///
/// - `prev` is the preceding sound of the same syllable, `None` at the
///   start of a syllable.
/// - `next` is the following sound of the word (it may belong to the next
///   syllable), `None` at the end of the word.
/// - `word_final` is set for the last sound of the word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Context {
	pub position: Position,
	pub prev: Option<Neighbor>,
	pub next: Option<Neighbor>,
	pub word_final: bool,
}

impl fmt::Display for Context {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:?}", self.position)?;
		if let Some(prev) = self.prev {
			write!(f, " after {}", prev.symbol)?;
		}
		match self.next {
			Some(next) => write!(f, " before {}", next.symbol)?,
			None => f.write_str(" at end")?,
		}
		if self.word_final {
			f.write_str(" (word-final)")?;
		}
		Ok(())
	}
}

/// Context predicate attached to a spelling.
///
/// Conditions are plain data so that a whole rule set can be compared,
/// cloned and serialized along with the engine.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Condition {
	/// Accepts every context
	Always,
	/// The sound sits in the given syllable slot
	In(Position),
	/// Last sound of the word
	WordFinal,
	/// No preceding sound in the syllable
	SyllableInitial,
	/// Sounds on both sides
	MidWord,
	/// Something follows
	HasNext,
	BeforeVowel,
	BeforeConsonant,
	AfterVowel,
	BetweenVowels,
	/// The next sound is an unrounded, non-open vowel (i, e and the like)
	BeforeEOrI,
	AfterFrontVowel,
	After(Symbol),
	/// No consonant on either side
	Isolated,
	Not(Box<Condition>),
	All(Vec<Condition>),
	Any(Vec<Condition>),
}

impl Condition {
	/// Evaluates the condition against a context.
	pub fn accepts(&self, context: &Context) -> bool {
		let prev = context.prev.map(|n| n.phone);
		let next = context.next.map(|n| n.phone);
		match self {
			Condition::Always => true,
			Condition::In(position) => context.position == *position,
			Condition::WordFinal => context.word_final,
			Condition::SyllableInitial => context.prev.is_none(),
			Condition::MidWord => context.prev.is_some() && context.next.is_some(),
			Condition::HasNext => context.next.is_some(),
			Condition::BeforeVowel => next.is_some_and(|p| p.is_vowel()),
			Condition::BeforeConsonant => next.is_some_and(|p| p.is_consonant()),
			Condition::AfterVowel => prev.is_some_and(|p| p.is_vowel()),
			Condition::BetweenVowels => {
				prev.is_some_and(|p| p.is_vowel()) && next.is_some_and(|p| p.is_vowel())
			}
			Condition::BeforeEOrI => next.is_some_and(|p| p.is_e_or_i()),
			Condition::AfterFrontVowel => prev.is_some_and(|p| p.is_front()),
			Condition::After(symbol) => context.prev.is_some_and(|n| n.symbol == *symbol),
			Condition::Isolated => {
				!prev.is_some_and(|p| p.is_consonant()) && !next.is_some_and(|p| p.is_consonant())
			}
			Condition::Not(inner) => !inner.accepts(context),
			Condition::All(conditions) => conditions.iter().all(|c| c.accepts(context)),
			Condition::Any(conditions) => conditions.iter().any(|c| c.accepts(context)),
		}
	}
}

pub fn not(condition: Condition) -> Condition {
	Condition::Not(Box::new(condition))
}

pub fn all<const N: usize>(conditions: [Condition; N]) -> Condition {
	Condition::All(conditions.into())
}

pub fn any<const N: usize>(conditions: [Condition; N]) -> Condition {
	Condition::Any(conditions.into())
}

/// A literal spelling and the context it may be used in.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SpellingRule {
	pub text: String,
	pub condition: Condition,
}

impl SpellingRule {
	pub fn new(text: &str, condition: Condition) -> Self {
		Self { text: text.to_owned(), condition }
	}
}

/// Shorthand used by the variety tables.
pub fn rule(text: &str, condition: Condition) -> SpellingRule {
	SpellingRule::new(text, condition)
}

/// Picks a spelling for a context.
///
/// Probing starts at a uniformly random rule and walks the list circularly;
/// the first rule whose condition accepts the context wins.
///
/// Returns `None` if no rule accepts the context. Validated engines never
/// hit this case.
pub fn resolve<'a, R: Rng + ?Sized>(rules: &'a [SpellingRule], context: &Context, rng: &mut R) -> Option<&'a str> {
	if rules.is_empty() {
		return None;
	}

	let start = rng.random_range(0..rules.len());
	(0..rules.len())
		.map(|offset| &rules[(start + offset) % rules.len()])
		.find(|rule| rule.condition.accepts(context))
		.map(|rule| rule.text.as_str())
}

/// Returns `true` if at least one rule accepts the context.
pub fn covers(rules: &[SpellingRule], context: &Context) -> bool {
	rules.iter().any(|rule| rule.condition.accepts(context))
}
