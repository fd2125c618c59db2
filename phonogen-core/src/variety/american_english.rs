use crate::error::ConstructionError;
use crate::inventory::{Inventory, Phoneme};
use crate::model::constraint_table::{ConstraintTable, TableBuilder, except, only};
use crate::phonetics::{Symbol, homorganic};
use crate::spelling::{Condition, Position, all, not, rule};

use super::{Definition, Variety};

pub fn definition() -> Definition {
	Definition {
		variety: Variety::AmericanEnglish,
		phonemes,
		onsets,
		nuclei,
		codas,
		must_have_coda: &[Symbol::LaxI, Symbol::OpenE, Symbol::LaxU],
		silent_final_letters: &[],
	}
}

fn onset() -> Condition {
	Condition::In(Position::Onset)
}

/// Inside a coda, before the end of the word.
fn coda() -> Condition {
	all([Condition::In(Position::Coda), not(Condition::WordFinal)])
}

/// Doubled letters only follow a vowel in a coda that a vowel follows.
fn doubled() -> Condition {
	all([Condition::In(Position::Coda), Condition::BetweenVowels])
}

fn last() -> Condition {
	Condition::WordFinal
}

fn vowel(symbol: Symbol, spellings: &[&str]) -> Phoneme {
	Phoneme::new(symbol, spellings.iter().map(|s| rule(s, Condition::Always)).collect())
}

fn phonemes() -> Vec<Phoneme> {
	use Symbol::*;

	vec![
		vowel(Ash, &["a"]),
		Phoneme::new(BackA, vec![
			rule("o", Condition::Always),
			rule("al", Condition::In(Position::Nucleus)),
			rule("au", Condition::Always),
			rule("aw", not(Condition::BeforeConsonant)),
		]),
		vowel(LaxI, &["i"]),
		vowel(OpenE, &["e", "ea"]),
		vowel(Schwa, &["a", "e", "o", "u", "ou"]),
		vowel(LaxU, &["u", "oo", "o"]),
		Phoneme::new(Ei, vec![
			rule("a", Condition::Always),
			rule("ai", Condition::Always),
			rule("ay", not(Condition::BeforeConsonant)),
		]),
		vowel(Ou, &["o", "oa", "ow"]),
		vowel(I, &["e", "ea", "ee", "y"]),
		Phoneme::new(U, vec![
			rule("u", Condition::Always),
			rule("oo", Condition::Always),
			rule("ew", not(Condition::BeforeConsonant)),
		]),
		vowel(Ai, &["i", "y", "igh"]),
		Phoneme::new(Oi, vec![
			rule("oi", Condition::Always),
			rule("oy", not(Condition::BeforeConsonant)),
		]),
		vowel(Au, &["ou", "ow"]),
		Phoneme::new(M, vec![
			rule("m", onset()),
			rule("m", coda()),
			rule("mm", doubled()),
			rule("m", last()),
			rule("me", last()),
		]),
		Phoneme::new(N, vec![
			rule("n", onset()),
			rule("n", coda()),
			rule("nn", doubled()),
			rule("n", last()),
			rule("ne", last()),
		]),
		Phoneme::new(Eng, vec![rule("ng", Condition::In(Position::Coda))]),
		Phoneme::new(P, vec![
			rule("p", onset()),
			rule("p", coda()),
			rule("pp", doubled()),
			rule("p", last()),
			rule("pe", last()),
		]),
		Phoneme::new(T, vec![
			rule("t", onset()),
			rule("t", coda()),
			rule("tt", doubled()),
			rule("t", last()),
			rule("te", last()),
		]),
		Phoneme::new(Tsh, vec![
			rule("ch", onset()),
			rule("ch", Condition::In(Position::Coda)),
			rule("tch", all([Condition::In(Position::Coda), Condition::AfterVowel])),
		]),
		Phoneme::new(K, vec![
			rule("c", all([onset(), not(Condition::BeforeEOrI)])),
			rule("k", onset()),
			rule("c", all([coda(), not(Condition::BeforeEOrI)])),
			rule("k", coda()),
			rule("ck", all([Condition::In(Position::Coda), Condition::AfterVowel])),
			rule("k", last()),
			rule("ke", last()),
		]),
		Phoneme::new(B, vec![
			rule("b", onset()),
			rule("b", coda()),
			rule("bb", doubled()),
			rule("b", last()),
			rule("be", last()),
		]),
		Phoneme::new(D, vec![
			rule("d", onset()),
			rule("d", coda()),
			rule("dd", doubled()),
			rule("d", last()),
			rule("de", last()),
		]),
		Phoneme::new(Dzh, vec![
			rule("j", onset()),
			rule("j", coda()),
			rule("dge", all([Condition::In(Position::Coda), Condition::AfterVowel])),
			rule("ge", last()),
		]),
		Phoneme::new(G, vec![
			rule("g", onset()),
			rule("g", Condition::In(Position::Coda)),
			rule("gg", all([Condition::In(Position::Coda), Condition::AfterVowel])),
		]),
		Phoneme::new(F, vec![
			rule("f", Condition::Always),
			rule("ph", Condition::Always),
			rule("ff", doubled()),
			rule("fe", last()),
		]),
		Phoneme::new(Theta, vec![rule("th", Condition::Always)]),
		Phoneme::new(S, vec![
			rule("s", Condition::Always),
			rule("ss", all([Condition::In(Position::Coda), Condition::AfterVowel])),
			rule("ce", all([last(), Condition::AfterVowel])),
		]),
		Phoneme::new(Sh, vec![rule("sh", Condition::Always)]),
		Phoneme::new(V, vec![rule("v", not(last())), rule("ve", last())]),
		Phoneme::new(Eth, vec![rule("th", Condition::Always), rule("the", last())]),
		Phoneme::new(Z, vec![
			rule("z", Condition::Always),
			rule("s", all([Condition::In(Position::Coda), Condition::AfterVowel])),
		]),
		Phoneme::new(Zh, vec![
			rule("j", onset()),
			rule("si", coda()),
			rule("s", coda()),
			rule("ge", Condition::In(Position::Coda)),
		]),
		Phoneme::new(H, vec![rule("h", onset())]),
		Phoneme::new(W, vec![rule("w", onset())]),
		Phoneme::new(L, vec![
			rule("l", Condition::Always),
			rule("ll", all([last(), Condition::AfterVowel])),
		]),
		Phoneme::new(R, vec![rule("r", Condition::Always)]),
		Phoneme::new(J, vec![rule("y", onset()), rule("i", all([onset(), Condition::BeforeVowel]))]),
	]
}

fn onsets(inventory: &Inventory) -> Result<ConstraintTable, ConstructionError> {
	let mut table = TableBuilder::new(inventory);
	let s = table.require(Symbol::S)?;

	table.singles("single consonant except /ŋ/", |p| {
		p.phone().is_consonant() && p.symbol() != Symbol::Eng
	});
	table.pairs(
		"stop plus approximant other than /j/",
		|p| p.phone().is_stop(),
		|p| p.phone().is_approximant() && p.symbol() != Symbol::J,
		|a, b| a.phone().place() == b.phone().place(),
	);
	table.pairs(
		"voiceless fricative other than /h/ plus approximant other than /j/",
		|p| p.phone().is_fricative() && p.phone().is_voiceless() && p.symbol() != Symbol::H,
		|p| p.phone().is_approximant() && p.symbol() != Symbol::J,
		|a, b| a.phone().place() == b.phone().place() || (a.symbol() == Symbol::S && b.symbol() == Symbol::R),
	);
	table.pairs(
		"/s/ plus voiceless stop",
		only(s),
		|p| p.phone().is_stop() && p.phone().is_voiceless(),
		|_, _| false,
	);
	table.pairs(
		"/s/ plus nasal other than /ŋ/",
		only(s),
		|p| p.phone().is_nasal_consonant() && p.symbol() != Symbol::Eng,
		|_, _| false,
	);
	table.triples(
		"/s/ plus voiceless stop plus approximant other than /ɹ/",
		only(s),
		|p| p.phone().is_stop() && p.phone().is_voiceless(),
		|p| p.phone().is_approximant() && p.symbol() != Symbol::R,
		|_, stop, approximant| homorganic(stop.phone(), approximant.phone()),
	);

	Ok(table.build())
}

fn nuclei(inventory: &Inventory) -> Result<ConstraintTable, ConstructionError> {
	let mut table = TableBuilder::new(inventory);
	table.singles("any vowel", |p| p.phone().is_vowel());
	Ok(table.build())
}

fn codas(inventory: &Inventory) -> Result<ConstraintTable, ConstructionError> {
	let mut table = TableBuilder::new(inventory);
	let l = table.require(Symbol::L)?;
	let r = table.require(Symbol::R)?;

	table.singles("single consonant except /h/, /w/, /j/", |p| {
		p.phone().is_consonant() && except(&[Symbol::H, Symbol::W, Symbol::J])(p)
	});
	table.pairs(
		"/l/ plus stop or affricate",
		only(l),
		|p| p.phone().is_stop() || p.phone().is_affricate(),
		|_, _| false,
	);
	table.pairs(
		"/ɹ/ plus stop or affricate",
		only(r),
		|p| p.phone().is_stop() || p.phone().is_affricate(),
		|_, _| false,
	);
	table.pairs(
		"/l/ plus fricative other than /h/",
		only(l),
		|p| p.phone().is_fricative() && p.symbol() != Symbol::H,
		|_, _| false,
	);

	Ok(table.build())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn inventory() -> Inventory {
		Inventory::new(phonemes()).unwrap()
	}

	fn contains(table: &ConstraintTable, inventory: &Inventory, symbols: &[Symbol]) -> bool {
		let ids: Vec<_> = symbols.iter().map(|s| inventory.id(*s).unwrap()).collect();
		table.clusters().any(|c| *c == ids)
	}

	#[test]
	fn test_first_vowel_is_ash() {
		let inventory = inventory();
		let first = inventory.iter().next().unwrap().1;
		assert_eq!(first.symbol(), Symbol::Ash);
		assert_eq!(first.spellings()[0].text, "a");
	}

	#[test]
	fn test_onsets() {
		let inventory = inventory();
		let table = onsets(&inventory).unwrap();

		assert!(contains(&table, &inventory, &[Symbol::P, Symbol::L]));
		assert!(!contains(&table, &inventory, &[Symbol::S, Symbol::T, Symbol::R]));
		assert!(contains(&table, &inventory, &[Symbol::S, Symbol::P, Symbol::L]));
		assert!(contains(&table, &inventory, &[Symbol::S, Symbol::K, Symbol::W]));
		assert!(!contains(&table, &inventory, &[Symbol::S, Symbol::T, Symbol::L]));
		assert!(!contains(&table, &inventory, &[Symbol::S, Symbol::P, Symbol::W]));
		assert!(contains(&table, &inventory, &[Symbol::S, Symbol::M]));
		assert!(contains(&table, &inventory, &[Symbol::F, Symbol::R]));
		assert!(!contains(&table, &inventory, &[Symbol::S, Symbol::R]));
		assert!(!contains(&table, &inventory, &[Symbol::P, Symbol::W]));
		assert!(!contains(&table, &inventory, &[Symbol::Eng]));
		assert!(!contains(&table, &inventory, &[Symbol::S, Symbol::Eng]));
		assert_eq!(table.selectable().len(), 6);
	}

	#[test]
	fn test_codas() {
		let inventory = inventory();
		let table = codas(&inventory).unwrap();

		assert!(contains(&table, &inventory, &[Symbol::Eng]));
		assert!(!contains(&table, &inventory, &[Symbol::H]));
		assert!(!contains(&table, &inventory, &[Symbol::W]));
		assert!(contains(&table, &inventory, &[Symbol::L, Symbol::Dzh]));
		assert!(contains(&table, &inventory, &[Symbol::R, Symbol::K]));
		assert!(contains(&table, &inventory, &[Symbol::L, Symbol::F]));
		assert!(!contains(&table, &inventory, &[Symbol::L, Symbol::H]));
		assert_eq!(table.conditioning().count(), 0);
	}

	#[test]
	fn test_nuclei_are_the_vowels() {
		let inventory = inventory();
		let table = nuclei(&inventory).unwrap();
		assert_eq!(table.classes().len(), 1);
		assert_eq!(table.class(0).unwrap().len(), 13);
	}
}
