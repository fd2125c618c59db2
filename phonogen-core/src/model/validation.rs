//! Construction-time checks of an `Engine`.
//!
//! Validation runs once, after an engine is built or decoded. Generation
//! relies on it: a validated engine never picks from an empty class and
//! always finds a spelling for the sounds it assembles.

use crate::error::ConstructionError;
use crate::inventory::{Inventory, PhonemeId};
use crate::model::constraint_table::ConstraintTable;
use crate::model::engine::{Engine, FREE_TIER};
use crate::spelling::{self, Position};

/// Which kind of phone a table may hold.
#[derive(Clone, Copy, PartialEq)]
enum Slot {
	Consonants,
	Vowels,
}

impl Engine {
	/// Checks the engine for definition defects.
	///
	/// # Behavior
	/// - Every cluster member, conditioning key and must-have-coda member
	///   is a phoneme of the inventory, and every conditioning target is an
	///   existing, non-empty class.
	/// - The onset and coda tables hold consonant clusters of one to three
	///   phonemes and have a selectable class; the nucleus table holds single
	///   vowels and a non-empty free tier.
	/// - Every phoneme has a spelling rule.
	/// - Every context the tables can produce is accepted by some spelling
	///   rule of the phoneme spelled in it.
	///
	/// # Errors
	/// The first defect found, as a `ConstructionError`.
	pub fn validate(&self) -> Result<(), ConstructionError> {
		let inventory = self.inventory();

		check_table(inventory, self.onsets(), "onset", Slot::Consonants)?;
		check_table(inventory, self.nuclei(), "nucleus", Slot::Vowels)?;
		check_table(inventory, self.codas(), "coda", Slot::Consonants)?;

		match self.nuclei().class(FREE_TIER) {
			Some(class) if !class.is_empty() => {}
			_ => return Err(ConstructionError::NoSelectableClass { table: "nucleus" }),
		}

		for id in self.must_have_coda() {
			if inventory.get(*id).is_none() {
				return Err(ConstructionError::InvalidPhoneme {
					location: "must-have-coda set".to_owned(),
					index: id.index(),
				});
			}
		}

		for (_, phoneme) in inventory.iter() {
			if phoneme.spellings().is_empty() {
				return Err(ConstructionError::NoSpellingRules(phoneme.symbol()));
			}
		}

		self.check_coverage()
	}

	/// Walks every reachable `(phoneme, context)` pair.
	///
	/// The sound following the last phoneme of a syllable may be the end of
	/// the word, the first phoneme of any onset, or any free-tier vowel.
	fn check_coverage(&self) -> Result<(), ConstructionError> {
		let inventory = self.inventory();

		let mut boundary: Vec<PhonemeId> = self
			.onsets()
			.clusters()
			.filter_map(|c| c.first().copied())
			.chain(self.nuclei_in(FREE_TIER))
			.collect();
		boundary.sort_unstable();
		boundary.dedup();
		let boundary: Vec<Option<PhonemeId>> = std::iter::once(None).chain(boundary.into_iter().map(Some)).collect();

		let check = |id: PhonemeId,
		             position: Position,
		             prev: Option<PhonemeId>,
		             next: Option<PhonemeId>|
		 -> Result<(), ConstructionError> {
			let context = self.context(position, prev, next, next.is_none()).map_err(|_| {
				ConstructionError::InvalidPhoneme { location: "spelling context".to_owned(), index: id.index() }
			})?;
			let phoneme = inventory.get(id).ok_or_else(|| ConstructionError::InvalidPhoneme {
				location: "spelling context".to_owned(),
				index: id.index(),
			})?;
			if spelling::covers(phoneme.spellings(), &context) {
				Ok(())
			} else {
				Err(ConstructionError::UncoveredContext { symbol: phoneme.symbol(), context: context.to_string() })
			}
		};

		// Onsets
		for cluster in self.onsets().clusters() {
			for (k, id) in cluster.iter().enumerate() {
				let prev = k.checked_sub(1).map(|j| cluster[j]);
				match cluster.get(k + 1) {
					Some(next) => check(*id, Position::Onset, prev, Some(*next))?,
					None => {
						for nucleus in self.nuclei_in(self.nucleus_class_after(Some(*id))) {
							check(*id, Position::Onset, prev, Some(nucleus))?;
						}
					}
				}
			}
		}

		// Nuclei, after every possible onset ending
		let mut onset_ends: Vec<PhonemeId> = self.onsets().clusters().filter_map(|c| c.last().copied()).collect();
		onset_ends.sort_unstable();
		onset_ends.dedup();

		let mut reachable: Vec<PhonemeId> = Vec::new();
		for end in std::iter::once(None).chain(onset_ends.into_iter().map(Some)) {
			for nucleus in self.nuclei_in(self.nucleus_class_after(end)) {
				reachable.push(nucleus);
				for cluster in self.codas_after(nucleus) {
					if let Some(first) = cluster.first() {
						check(nucleus, Position::Nucleus, end, Some(*first))?;
					}
				}
				if !self.is_must_have_coda(nucleus) {
					for next in &boundary {
						check(nucleus, Position::Nucleus, end, *next)?;
					}
				}
			}
		}
		reachable.sort_unstable();
		reachable.dedup();

		// Codas, after every reachable nucleus
		for nucleus in reachable {
			for cluster in self.codas_after(nucleus) {
				for (k, id) in cluster.iter().enumerate() {
					let prev = k.checked_sub(1).map_or(nucleus, |j| cluster[j]);
					match cluster.get(k + 1) {
						Some(next) => check(*id, Position::Coda, Some(prev), Some(*next))?,
						None => {
							for next in &boundary {
								check(*id, Position::Coda, Some(prev), *next)?;
							}
						}
					}
				}
			}
		}

		Ok(())
	}

	/// Vowels of a nucleus class.
	fn nuclei_in(&self, class: usize) -> impl Iterator<Item = PhonemeId> + '_ {
		self.nuclei()
			.class(class)
			.into_iter()
			.flat_map(|c| c.clusters().iter())
			.filter_map(|cluster| cluster.first().copied())
	}
}

fn check_table(
	inventory: &Inventory,
	table: &ConstraintTable,
	name: &'static str,
	slot: Slot,
) -> Result<(), ConstructionError> {
	for class in table.classes() {
		let location = || format!("{name} class '{}'", class.label());
		for cluster in class.clusters() {
			let max_len = if slot == Slot::Vowels { 1 } else { 3 };
			if cluster.is_empty() || cluster.len() > max_len {
				return Err(ConstructionError::MalformedCluster { location: location(), len: cluster.len() });
			}
			for id in cluster {
				let phoneme = inventory
					.get(*id)
					.ok_or_else(|| ConstructionError::InvalidPhoneme { location: location(), index: id.index() })?;
				let fits = match slot {
					Slot::Consonants => phoneme.phone().is_consonant(),
					Slot::Vowels => phoneme.phone().is_vowel(),
				};
				if !fits {
					return Err(ConstructionError::WrongPhoneKind { table: name, symbol: phoneme.symbol() });
				}
			}
		}
	}

	for index in table.selectable() {
		match table.class(*index) {
			Some(class) if !class.is_empty() => {}
			_ => {
				return Err(ConstructionError::InvalidClass {
					location: format!("{name} selectable classes"),
					index: *index,
				});
			}
		}
	}
	if slot == Slot::Consonants && table.selectable().is_empty() {
		return Err(ConstructionError::NoSelectableClass { table: name });
	}

	for (phoneme, index) in table.conditioning() {
		if inventory.get(phoneme).is_none() {
			return Err(ConstructionError::InvalidPhoneme {
				location: format!("{name} conditioning"),
				index: phoneme.index(),
			});
		}
		match table.class(index) {
			None => {
				return Err(ConstructionError::InvalidClass { location: format!("{name} conditioning"), index });
			}
			Some(class) if class.is_empty() => {
				return Err(ConstructionError::EmptyConditionedClass { label: class.label().to_owned() });
			}
			Some(_) => {}
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::inventory::Phoneme;
	use crate::model::constraint_table::TableBuilder;
	use crate::phonetics::Symbol;
	use crate::spelling::{Condition, rule};
	use crate::variety::Variety;

	fn inventory(t_rules: Vec<spelling::SpellingRule>) -> Inventory {
		Inventory::new(vec![
			Phoneme::new(Symbol::A, vec![rule("a", Condition::Always)]),
			Phoneme::new(Symbol::T, t_rules),
			Phoneme::new(Symbol::S, vec![rule("s", Condition::Always)]),
		])
		.unwrap()
	}

	fn tables(inventory: &Inventory) -> (ConstraintTable, ConstraintTable, ConstraintTable) {
		let mut onsets = TableBuilder::new(inventory);
		onsets.singles("consonants", |p| p.phone().is_consonant());
		let mut nuclei = TableBuilder::new(inventory);
		nuclei.singles("vowels", |p| p.phone().is_vowel());
		let mut codas = TableBuilder::new(inventory);
		codas.singles("t", |p| p.symbol() == Symbol::T);
		(onsets.build(), nuclei.build(), codas.build())
	}

	fn engine(inventory: Inventory) -> Engine {
		let (onsets, nuclei, codas) = tables(&inventory);
		Engine::from_parts(Variety::AmericanEnglish, inventory, onsets, nuclei, codas, vec![], vec![])
	}

	#[test]
	fn test_shipped_varieties_validate() {
		for variety in Variety::ALL {
			assert!(Engine::new(variety).unwrap().validate().is_ok());
		}
	}

	#[test]
	fn test_minimal_engine_validates() {
		assert_eq!(engine(inventory(vec![rule("t", Condition::Always)])).validate(), Ok(()));
	}

	#[test]
	fn test_uncovered_context() {
		// /t/ can end a word but has no word-final spelling
		let broken = engine(inventory(vec![rule("t", Condition::In(Position::Onset))]));
		match broken.validate() {
			Err(ConstructionError::UncoveredContext { symbol, .. }) => assert_eq!(symbol, Symbol::T),
			other => panic!("unexpected {other:?}"),
		}
	}

	#[test]
	fn test_missing_spelling() {
		let broken = engine(inventory(vec![]));
		assert_eq!(broken.validate(), Err(ConstructionError::NoSpellingRules(Symbol::T)));
	}

	#[test]
	fn test_wrong_phone_kind() {
		let inventory = inventory(vec![rule("t", Condition::Always)]);
		let (onsets, nuclei, _) = tables(&inventory);
		let mut codas = TableBuilder::new(&inventory);
		codas.singles("everything", |_| true);
		let codas = codas.build();

		let broken = Engine::from_parts(Variety::AmericanEnglish, inventory, onsets, nuclei, codas, vec![], vec![]);
		assert_eq!(
			broken.validate(),
			Err(ConstructionError::WrongPhoneKind { table: "coda", symbol: Symbol::A })
		);
	}

	#[test]
	fn test_empty_coda_table() {
		let inventory = inventory(vec![rule("t", Condition::Always)]);
		let (onsets, nuclei, _) = tables(&inventory);
		let mut codas = TableBuilder::new(&inventory);
		codas.singles("nothing", |_| false);
		let codas = codas.build();

		let broken = Engine::from_parts(Variety::AmericanEnglish, inventory, onsets, nuclei, codas, vec![], vec![]);
		assert_eq!(broken.validate(), Err(ConstructionError::NoSelectableClass { table: "coda" }));
	}

	#[test]
	fn test_conditioning_an_empty_class() {
		let inventory = inventory(vec![rule("t", Condition::Always)]);
		let (onsets, _, codas) = tables(&inventory);
		let mut nuclei = TableBuilder::new(&inventory);
		nuclei.singles("vowels", |p| p.phone().is_vowel());
		let empty = nuclei.singles("none", |_| false);
		nuclei.condition_after(Symbol::S, empty).unwrap();
		let nuclei = nuclei.build();

		let broken = Engine::from_parts(Variety::AmericanEnglish, inventory, onsets, nuclei, codas, vec![], vec![]);
		assert_eq!(
			broken.validate(),
			Err(ConstructionError::EmptyConditionedClass { label: "none".to_owned() })
		);
	}

	#[test]
	fn test_dangling_must_have_coda() {
		let inventory = inventory(vec![rule("t", Condition::Always)]);
		let (onsets, nuclei, codas) = tables(&inventory);
		let broken =
			Engine::from_parts(Variety::AmericanEnglish, inventory, onsets, nuclei, codas, vec![PhonemeId(42)], vec![]);
		assert!(matches!(broken.validate(), Err(ConstructionError::InvalidPhoneme { index: 42, .. })));
	}
}
