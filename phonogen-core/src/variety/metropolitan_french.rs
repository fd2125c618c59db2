use crate::error::ConstructionError;
use crate::inventory::{Inventory, Phoneme};
use crate::model::constraint_table::{ConstraintTable, TableBuilder, except, only};
use crate::phonetics::{Place, Symbol};
use crate::spelling::{Condition, SpellingRule, all, any, not, rule};

use super::{Definition, Variety};

pub fn definition() -> Definition {
	Definition {
		variety: Variety::MetropolitanFrench,
		phonemes,
		onsets,
		nuclei,
		codas,
		must_have_coda: &[],
		silent_final_letters: &['d', 'g', 'p', 's', 't', 'x', 'z'],
	}
}

/// Consonants that never take a following glide in an onset.
const NO_GLIDE_AFTER: &[Symbol] = &[Symbol::Ny, Symbol::G, Symbol::Z, Symbol::J, Symbol::TurnedH, Symbol::W];

fn word_final() -> Condition {
	Condition::WordFinal
}

fn not_final() -> Condition {
	not(Condition::WordFinal)
}

/// Word-final and not part of a consonant cluster.
fn final_alone() -> Condition {
	all([Condition::WordFinal, Condition::Isolated])
}

fn after_glide() -> Condition {
	any([Condition::After(Symbol::J), Condition::After(Symbol::W), Condition::After(Symbol::TurnedH)])
}

/// Plain, doubled and e-final spellings shared by most consonants.
fn simple(plain: &str, doubled: &str) -> Vec<SpellingRule> {
	vec![
		rule(plain, not_final()),
		rule(doubled, Condition::BetweenVowels),
		rule(&format!("{plain}e"), word_final()),
	]
}

/// Same as `simple` with the doubled e-final spelling after a vowel.
fn geminable(plain: &str) -> Vec<SpellingRule> {
	let doubled = format!("{plain}{plain}");
	let mut rules = simple(plain, &doubled);
	rules.push(rule(&format!("{doubled}e"), final_alone()));
	rules
}

/// Nasal consonants double between vowels and never end a word bare.
fn nasal(letter: &str) -> Vec<SpellingRule> {
	let doubled = format!("{letter}{letter}");
	vec![
		rule(letter, all([not_final(), not(Condition::BetweenVowels)])),
		rule(&doubled, Condition::BetweenVowels),
		rule(&format!("{letter}e"), word_final()),
		rule(&format!("{doubled}e"), word_final()),
	]
}

fn phonemes() -> Vec<Phoneme> {
	use Symbol::*;

	vec![
		Phoneme::new(I, vec![rule("i", Condition::Always), rule("ie", word_final())]),
		Phoneme::new(Y, vec![
			rule("u", Condition::Always),
			rule("û", Condition::MidWord),
			rule("ue", word_final()),
		]),
		Phoneme::new(E, vec![
			rule("é", Condition::Always),
			rule("e", Condition::MidWord),
			rule("er", word_final()),
		]),
		Phoneme::new(SlashedO, vec![
			rule("eu", Condition::Always),
			rule("eû", not_final()),
			rule("œu", Condition::MidWord),
		]),
		Phoneme::new(Oe, vec![
			rule("eu", Condition::Always),
			rule("eû", not_final()),
			rule("œu", all([Condition::MidWord, not(Condition::After(J))])),
			rule("œ", Condition::MidWord),
		]),
		Phoneme::new(A, vec![
			rule("a", not(Condition::After(W))),
			rule("à", not(Condition::After(W))),
			rule("â", all([not(Condition::After(W)), Condition::HasNext])),
			rule("", Condition::After(W)),
		]),
		Phoneme::new(OpenO, vec![rule("o", Condition::Always)]),
		Phoneme::new(O, vec![
			rule("au", Condition::Always),
			rule("eau", Condition::Always),
			rule("o", Condition::Always),
			rule("ô", not_final()),
		]),
		Phoneme::new(U, vec![
			rule("ou", Condition::Always),
			rule("oû", not_final()),
			rule("oue", word_final()),
		]),
		Phoneme::new(OpenE, vec![
			rule("e", Condition::Always),
			rule("ai", Condition::Always),
			rule("aî", not_final()),
			rule("è", Condition::MidWord),
			rule("ê", not_final()),
			rule("ei", Condition::MidWord),
		]),
		Phoneme::new(Schwa, vec![rule("e", Condition::Always)]),
		Phoneme::new(NasalE, vec![
			rule("ain", not(after_glide())),
			rule("aim", not(after_glide())),
			rule("um", not(after_glide())),
			rule("un", not(after_glide())),
			rule("ein", not(after_glide())),
			rule("im", not(after_glide())),
			rule("in", not(after_glide())),
			rule("în", all([not(Condition::SyllableInitial), not(after_glide())])),
			rule("en", Condition::After(J)),
			// /w/ is already written "oi"
			rule("n", Condition::After(W)),
		]),
		Phoneme::new(NasalO, vec![rule("on", Condition::Always), rule("om", Condition::Always)]),
		Phoneme::new(NasalA, vec![
			rule("an", Condition::Always),
			rule("am", Condition::Always),
			rule("en", Condition::Always),
			rule("em", Condition::Always),
		]),
		Phoneme::new(M, nasal("m")),
		Phoneme::new(N, nasal("n")),
		Phoneme::new(Ny, vec![rule("gn", not_final()), rule("gne", word_final())]),
		Phoneme::new(P, simple("p", "pp")),
		Phoneme::new(T, geminable("t")),
		Phoneme::new(K, vec![
			rule("c", all([
				not(Condition::BeforeEOrI),
				any([not_final(), Condition::Isolated]),
			])),
			rule("cc", all([not(Condition::BeforeEOrI), Condition::BetweenVowels])),
			rule("qu", Condition::BeforeVowel),
			rule("que", word_final()),
		]),
		Phoneme::new(B, simple("b", "bb")),
		Phoneme::new(D, simple("d", "dd")),
		Phoneme::new(G, vec![
			rule("g", all([not(Condition::BeforeEOrI), not_final()])),
			rule("gu", Condition::BeforeEOrI),
			rule("gg", all([not(Condition::BeforeEOrI), Condition::BetweenVowels])),
			rule("gue", word_final()),
		]),
		Phoneme::new(F, vec![
			rule("f", Condition::Always),
			rule("ph", not_final()),
			rule("ff", Condition::BetweenVowels),
			rule("fe", word_final()),
			rule("phe", word_final()),
		]),
		Phoneme::new(S, vec![
			rule("s", not_final()),
			rule("ç", all([Condition::Isolated, not(Condition::BeforeEOrI), not_final()])),
			rule("c", all([Condition::Isolated, Condition::BeforeEOrI])),
			rule("ss", Condition::BetweenVowels),
			rule("se", word_final()),
			rule("sse", final_alone()),
			rule("ce", final_alone()),
		]),
		Phoneme::new(Sh, vec![rule("ch", not_final()), rule("che", word_final())]),
		Phoneme::new(V, vec![rule("v", not_final()), rule("ve", word_final())]),
		Phoneme::new(Z, vec![
			rule("z", not_final()),
			rule("s", Condition::MidWord),
			rule("se", word_final()),
		]),
		Phoneme::new(Zh, vec![
			rule("j", all([not(Condition::BeforeEOrI), not_final()])),
			rule("g", Condition::BeforeEOrI),
			rule("ge", word_final()),
		]),
		Phoneme::new(L, vec![
			rule("l", any([not_final(), Condition::Isolated])),
			rule("ll", Condition::BetweenVowels),
			rule("le", word_final()),
			rule("lle", final_alone()),
		]),
		Phoneme::new(UvularR, geminable("r")),
		Phoneme::new(J, vec![
			rule("i", not(Condition::SyllableInitial)),
			rule("y", Condition::SyllableInitial),
			rule("il", Condition::AfterFrontVowel),
			rule("ille", all([Condition::AfterFrontVowel, word_final()])),
		]),
		Phoneme::new(TurnedH, vec![
			rule("u", not(Condition::SyllableInitial)),
			rule("hu", Condition::SyllableInitial),
		]),
		Phoneme::new(W, vec![rule("oi", Condition::Always)]),
	]
}

fn onsets(inventory: &Inventory) -> Result<ConstraintTable, ConstructionError> {
	let mut table = TableBuilder::new(inventory);
	let r = table.require(Symbol::UvularR)?;
	let l = table.require(Symbol::L)?;
	let s = table.require(Symbol::S)?;
	let w = table.require(Symbol::W)?;
	let turned_h = table.require(Symbol::TurnedH)?;
	let j = table.require(Symbol::J)?;
	let plosive = table.require(Symbol::P)?;

	table.singles("single consonant except /ɲ/", |p| {
		p.phone().is_consonant() && p.symbol() != Symbol::Ny
	});
	table.pairs(
		"stop or non-sibilant fricative plus /ʁ/",
		|p| (p.phone().is_stop() || p.phone().is_fricative()) && !p.phone().is_sibilant(),
		only(r),
		|_, _| false,
	);
	table.pairs(
		"labial or velar stop, or /f/, plus /l/",
		|p| {
			(p.phone().is_stop() && matches!(p.phone().place(), Some(Place::Labial | Place::Velar)))
				|| p.symbol() == Symbol::F
		},
		only(l),
		|_, _| false,
	);
	table.pairs(
		"/s/ plus voiceless stop or nasal other than /ɲ/",
		only(s),
		|p| {
			(p.phone().is_nasal_consonant() || (p.phone().is_stop() && p.phone().is_voiceless()))
				&& p.symbol() != Symbol::Ny
		},
		|_, _| false,
	);

	table.pairs(
		"consonant plus /w/",
		|p| p.phone().is_consonant() && except(NO_GLIDE_AFTER)(p),
		only(w),
		|_, _| false,
	);
	table.pairs(
		"consonant plus /ɥ/",
		|p| p.phone().is_consonant() && except(NO_GLIDE_AFTER)(p),
		only(turned_h),
		|_, _| false,
	);
	table.pairs(
		"consonant plus /j/",
		|p| p.phone().is_consonant() && p.symbol() != Symbol::Zh && except(NO_GLIDE_AFTER)(p),
		only(j),
		|_, _| false,
	);
	table.pairs("/p/ plus /s/", only(plosive), only(s), |_, _| false);

	Ok(table.build())
}

fn nuclei(inventory: &Inventory) -> Result<ConstraintTable, ConstructionError> {
	let mut table = TableBuilder::new(inventory);
	let a = table.require(Symbol::A)?;
	let nasal_e = table.require(Symbol::NasalE)?;
	let i = table.require(Symbol::I)?;

	table.singles("any vowel", |p| p.phone().is_vowel());

	// /wi/ and /wɛ/ read fine as /u/ plus a vowel; only /wa/ and /wɛ̃/ need
	// the "oi" spelling
	let after_w = table.singles("after /w/", |p| p.symbol() == a || p.symbol() == nasal_e);
	table.condition_after(Symbol::W, after_w)?;

	let after_y = table.singles("after /ɥ/", only(i));
	table.condition_after(Symbol::TurnedH, after_y)?;

	let after_j = table.singles("after /j/", |p| {
		p.phone().is_front() && p.phone().is_any_mid() && p.symbol() != Symbol::Oe
	});
	table.condition_after(Symbol::J, after_j)?;

	Ok(table.build())
}

fn codas(inventory: &Inventory) -> Result<ConstraintTable, ConstructionError> {
	let mut table = TableBuilder::new(inventory);
	let r = table.require(Symbol::UvularR)?;
	let l = table.require(Symbol::L)?;
	let s = table.require(Symbol::S)?;

	table.singles("single consonant except /w/ and /ɥ/", |p| {
		p.phone().is_consonant() && except(&[Symbol::W, Symbol::TurnedH])(p)
	});
	table.pairs(
		"/ʁ/ plus non-approximant or /l/",
		only(r),
		|p| p.phone().is_consonant() && (!p.phone().is_approximant() || p.symbol() == Symbol::L),
		|_, _| false,
	);
	table.pairs(
		"/l/ plus non-approximant, no nasal other than /m/",
		only(l),
		|p| {
			p.phone().is_consonant()
				&& !p.phone().is_approximant()
				&& (!p.phone().is_nasal_consonant() || p.symbol() == Symbol::M)
		},
		|_, _| false,
	);
	table.pairs(
		"/s/ plus voiceless stop or /m/",
		only(s),
		|p| (p.phone().is_stop() && p.phone().is_voiceless()) || p.symbol() == Symbol::M,
		|_, _| false,
	);
	table.pairs(
		"stop or labial fricative plus /ʁ/",
		|p| p.phone().is_stop() || (p.phone().is_fricative() && p.phone().place() == Some(Place::Labial)),
		only(r),
		|_, _| false,
	);
	table.pairs(
		"non-alveolar stop or /f/ plus /l/",
		|p| (p.phone().is_stop() && p.phone().place() != Some(Place::Alveolar)) || p.symbol() == Symbol::F,
		only(l),
		|_, _| false,
	);
	table.pairs(
		"non-alveolar voiceless stop plus voiceless alveolar",
		|p| p.phone().is_stop() && p.phone().is_voiceless() && p.phone().place() != Some(Place::Alveolar),
		|p| p.phone().is_consonant() && p.phone().is_voiceless() && p.phone().place() == Some(Place::Alveolar),
		|_, _| false,
	);

	let after_nasal_vowel = table.derived("after nasal vowel", |cluster| {
		let first = cluster[0].phone();
		first.is_stop() || (first.is_fricative() && first.place() != Some(Place::Labial))
	});
	table.condition_after_all(|p| p.phone().is_nasal_vowel(), after_nasal_vowel);

	Ok(table.build())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn inventory() -> Inventory {
		Inventory::new(phonemes()).unwrap()
	}

	fn symbols(inventory: &Inventory, cluster: &[crate::inventory::PhonemeId]) -> Vec<Symbol> {
		cluster.iter().map(|id| inventory.get(*id).unwrap().symbol()).collect()
	}

	#[test]
	fn test_nucleus_after_w() {
		let inventory = inventory();
		let table = nuclei(&inventory).unwrap();
		let w = inventory.id(Symbol::W).unwrap();
		let class = table.class(table.conditioned_class(w).unwrap()).unwrap();
		let mut vowels: Vec<Symbol> = class.clusters().iter().map(|c| symbols(&inventory, c)[0]).collect();
		vowels.sort();
		assert_eq!(vowels, vec![Symbol::A, Symbol::NasalE]);
	}

	#[test]
	fn test_nucleus_after_j() {
		let inventory = inventory();
		let table = nuclei(&inventory).unwrap();
		let j = inventory.id(Symbol::J).unwrap();
		let class = table.class(table.conditioned_class(j).unwrap()).unwrap();
		let vowels: Vec<Symbol> = class.clusters().iter().map(|c| symbols(&inventory, c)[0]).collect();
		assert!(vowels.contains(&Symbol::E));
		assert!(vowels.contains(&Symbol::OpenE));
		assert!(!vowels.contains(&Symbol::Oe));
		assert!(!vowels.contains(&Symbol::I));
	}

	#[test]
	fn test_codas_after_nasal_vowel() {
		let inventory = inventory();
		let table = codas(&inventory).unwrap();
		let nasal_vowels = inventory.select(|p| p.phone().is_nasal_vowel());
		assert_eq!(nasal_vowels.len(), 3);

		for vowel in nasal_vowels {
			let class = table.class(table.conditioned_class(vowel).unwrap()).unwrap();
			assert!(!class.is_empty());
			for cluster in class.clusters() {
				let first = *inventory.get(cluster[0]).unwrap().phone();
				assert!(first.is_stop() || (first.is_fricative() && first.place() != Some(Place::Labial)));
			}
		}
	}

	#[test]
	fn test_onsets() {
		let inventory = inventory();
		let table = onsets(&inventory).unwrap();
		let clusters: Vec<Vec<Symbol>> = table.clusters().map(|c| symbols(&inventory, c)).collect();

		assert!(clusters.contains(&vec![Symbol::P, Symbol::S]));
		assert!(clusters.contains(&vec![Symbol::B, Symbol::UvularR]));
		assert!(clusters.contains(&vec![Symbol::K, Symbol::L]));
		assert!(clusters.contains(&vec![Symbol::T, Symbol::W]));
		assert!(!clusters.contains(&vec![Symbol::S, Symbol::UvularR]));
		assert!(!clusters.contains(&vec![Symbol::T, Symbol::L]));
		assert!(!clusters.contains(&vec![Symbol::G, Symbol::W]));
		assert!(!clusters.contains(&vec![Symbol::Zh, Symbol::J]));
		assert!(!clusters.contains(&vec![Symbol::Ny]));
	}
}
