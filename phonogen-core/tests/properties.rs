use std::sync::LazyLock;

use phonogen_core::phonetics::Symbol;
use phonogen_core::{Engine, SnapshotError, Variety, WordShape};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

static ENGLISH: LazyLock<Engine> = LazyLock::new(|| Engine::new(Variety::AmericanEnglish).unwrap());
static FRENCH: LazyLock<Engine> = LazyLock::new(|| Engine::new(Variety::MetropolitanFrench).unwrap());

fn engine(variety: Variety) -> &'static Engine {
	match variety {
		Variety::AmericanEnglish => &ENGLISH,
		Variety::MetropolitanFrench => &FRENCH,
	}
}

fn variety() -> impl Strategy<Value = Variety> {
	prop_oneof![Just(Variety::AmericanEnglish), Just(Variety::MetropolitanFrench)]
}

/// Random source that only ever yields zeros.
struct ZeroRng;

impl RngCore for ZeroRng {
	fn next_u32(&mut self) -> u32 {
		0
	}

	fn next_u64(&mut self) -> u64 {
		0
	}

	fn fill_bytes(&mut self, dst: &mut [u8]) {
		dst.fill(0);
	}
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(200))]

	#[test]
	fn words_use_the_variety_alphabet(variety in variety(), seed in any::<u64>(), max in 1usize..6) {
		let engine = engine(variety);
		let letters = engine.letters();
		let mut rng = StdRng::seed_from_u64(seed);
		let word = engine.generate_word(&mut rng, max).unwrap();

		prop_assert!(!word.is_empty());
		for c in word.chars() {
			prop_assert!(c.is_alphabetic() && c.is_lowercase(), "{word}");
			prop_assert!(letters.contains(&c), "{c} in {word}");
		}
	}

	#[test]
	fn syllable_count_is_bounded(variety in variety(), seed in any::<u64>(), max in 1usize..6) {
		let mut rng = StdRng::seed_from_u64(seed);
		let word = engine(variety).generate(&mut rng, &WordShape::new(max).unwrap()).unwrap();
		prop_assert!(!word.syllables.is_empty());
		prop_assert!(word.syllables.len() <= max);
	}

	#[test]
	fn must_have_nuclei_are_closed(variety in variety(), seed in any::<u64>()) {
		let engine = engine(variety);
		let mut rng = StdRng::seed_from_u64(seed);
		let word = engine.generate(&mut rng, &WordShape::new(4).unwrap()).unwrap();
		for syllable in &word.syllables {
			if engine.is_must_have_coda(syllable.nucleus) {
				prop_assert!(syllable.has_coda());
			}
		}
	}

	#[test]
	fn later_onsets_follow_open_syllables(variety in variety(), seed in any::<u64>()) {
		let mut rng = StdRng::seed_from_u64(seed);
		let word = engine(variety).generate(&mut rng, &WordShape::new(5).unwrap()).unwrap();
		for pair in word.syllables.windows(2) {
			prop_assert_eq!(pair[1].has_onset(), !pair[0].has_coda());
		}
	}

	#[test]
	fn assembled_syllables_honor_requests(variety in variety(), seed in any::<u64>(), onset: bool, coda: bool) {
		let engine = engine(variety);
		let mut rng = StdRng::seed_from_u64(seed);
		let syllable = engine.assemble(&mut rng, onset, coda).unwrap();
		prop_assert_eq!(syllable.has_onset(), onset);
		if coda {
			prop_assert!(syllable.has_coda());
		} else {
			prop_assert_eq!(syllable.has_coda(), engine.is_must_have_coda(syllable.nucleus));
		}
		for id in syllable.phonemes() {
			prop_assert!(engine.inventory().get(id).is_some());
		}
	}
}

#[test]
fn every_class_member_is_in_the_inventory() {
	for variety in Variety::ALL {
		let engine = engine(variety);
		for table in [engine.onsets(), engine.nuclei(), engine.codas()] {
			for cluster in table.clusters() {
				assert!((1..=3).contains(&cluster.len()));
				for id in cluster {
					assert!(engine.inventory().get(*id).is_some());
				}
			}
		}
	}
}

#[test]
fn construction_is_deterministic() {
	for variety in Variety::ALL {
		assert_eq!(&Engine::new(variety).unwrap(), engine(variety));
	}
}

#[test]
fn zero_source_gives_the_first_vowel() {
	let mut shape = WordShape::new(1).unwrap();
	shape.set_onset_probability(0.0).unwrap();
	shape.set_coda_probability(0.0).unwrap();
	let word = ENGLISH.generate(&mut ZeroRng, &shape).unwrap();
	assert_eq!(word.text, "a");
	assert_eq!(word.syllables.len(), 1);
	assert!(!word.syllables[0].has_onset());
}

#[test]
fn french_nucleus_after_w() {
	let symbol = |id| FRENCH.inventory().get(id).unwrap().symbol();
	let mut rng = StdRng::seed_from_u64(42);
	let mut seen = 0;
	for _ in 0..5000 {
		let syllable = FRENCH.assemble(&mut rng, true, false).unwrap();
		if syllable.onset.last().map(|id| symbol(*id)) == Some(Symbol::W) {
			seen += 1;
			assert!(matches!(symbol(syllable.nucleus), Symbol::A | Symbol::NasalE));
		}
	}
	assert!(seen > 0);
}

#[test]
fn snapshot_round_trip() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("french.bin");
	FRENCH.save(&path).unwrap();
	assert_eq!(&Engine::load(&path).unwrap(), &*FRENCH);
}

#[test]
fn load_or_build_writes_then_reads() {
	let dir = tempfile::tempdir().unwrap();
	let built = Engine::load_or_build(Variety::AmericanEnglish, dir.path()).unwrap();
	assert!(dir.path().join("american_english.bin").exists());
	let loaded = Engine::load_or_build(Variety::AmericanEnglish, dir.path()).unwrap();
	assert_eq!(built, loaded);
}

#[test]
fn load_or_build_rejects_a_foreign_snapshot() {
	let dir = tempfile::tempdir().unwrap();
	FRENCH.save(dir.path().join("american_english.bin")).unwrap();
	let result = Engine::load_or_build(Variety::AmericanEnglish, dir.path());
	assert!(matches!(
		result,
		Err(SnapshotError::WrongVariety { expected: Variety::AmericanEnglish, found: Variety::MetropolitanFrench })
	));
}

#[test]
fn damaged_snapshot_is_rejected() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("damaged.bin");
	std::fs::write(&path, [0xff, 0xff, 0xff]).unwrap();
	assert!(Engine::load(&path).is_err());
}
