use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConstructionError;
use crate::inventory::{Inventory, Phoneme, PhonemeId};
use crate::phonetics::Symbol;

/// A sequence of one to three phonemes licensed by a class.
pub type Cluster = Vec<PhonemeId>;

/// A named group of clusters implementing one phonotactic rule
/// (ex. "voiceless stop plus approximant other than /j/").
///
/// A class may be empty when no phoneme of the inventory satisfies the
/// rule; tables never select empty classes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ConstraintClass {
	label: String,
	clusters: Vec<Cluster>,
}

impl ConstraintClass {
	pub fn new(label: &str, clusters: Vec<Cluster>) -> Self {
		Self { label: label.to_owned(), clusters }
	}

	pub fn label(&self) -> &str {
		&self.label
	}

	pub fn clusters(&self) -> &[Cluster] {
		&self.clusters
	}

	pub fn len(&self) -> usize {
		self.clusters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.clusters.is_empty()
	}

	/// Picks a cluster uniformly. Returns `None` if the class is empty.
	pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Cluster> {
		if self.clusters.is_empty() {
			return None;
		}
		Some(&self.clusters[rng.random_range(0..self.clusters.len())])
	}
}

/// Ordered classes for one syllable slot (onset, nucleus or coda).
///
/// ## Invariants
/// - `selectable` lists exactly the indices of the non-empty classes
/// - `conditioning` maps a phoneme to the only class legal right after it
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ConstraintTable {
	classes: Vec<ConstraintClass>,
	selectable: Vec<usize>,
	conditioning: HashMap<PhonemeId, usize>,
}

impl ConstraintTable {
	pub fn classes(&self) -> &[ConstraintClass] {
		&self.classes
	}

	pub fn class(&self, index: usize) -> Option<&ConstraintClass> {
		self.classes.get(index)
	}

	/// Indices of the non-empty classes.
	pub fn selectable(&self) -> &[usize] {
		&self.selectable
	}

	/// Class the conditioning map assigns to the slot following `phoneme`.
	pub fn conditioned_class(&self, phoneme: PhonemeId) -> Option<usize> {
		self.conditioning.get(&phoneme).copied()
	}

	pub fn conditioning(&self) -> impl Iterator<Item = (PhonemeId, usize)> + '_ {
		self.conditioning.iter().map(|(p, c)| (*p, *c))
	}

	/// Every cluster of every class, in class order.
	pub fn clusters(&self) -> impl Iterator<Item = &Cluster> {
		self.classes.iter().flat_map(|c| c.clusters.iter())
	}

	/// Picks a class uniformly among the non-empty ones, then a cluster
	/// uniformly inside it.
	pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Cluster> {
		if self.selectable.is_empty() {
			return None;
		}
		let index = self.selectable[rng.random_range(0..self.selectable.len())];
		self.classes[index].pick(rng)
	}

	/// Picks a cluster inside a given class.
	pub fn pick_in<R: Rng + ?Sized>(&self, class: usize, rng: &mut R) -> Option<&Cluster> {
		self.classes.get(class)?.pick(rng)
	}
}

/// Filter accepting a single symbol.
pub fn only(symbol: Symbol) -> impl Fn(&Phoneme) -> bool {
	move |p| p.symbol() == symbol
}

/// Filter rejecting the listed symbols.
pub fn except(symbols: &'static [Symbol]) -> impl Fn(&Phoneme) -> bool {
	move |p| !symbols.contains(&p.symbol())
}

/// Incremental construction of a `ConstraintTable`.
///
/// Every method adding a class returns the index of that class, to be used
/// with `condition_after`.
pub struct TableBuilder<'a> {
	inventory: &'a Inventory,
	classes: Vec<ConstraintClass>,
	conditioning: HashMap<PhonemeId, usize>,
}

impl<'a> TableBuilder<'a> {
	pub fn new(inventory: &'a Inventory) -> Self {
		Self {
			inventory,
			classes: Vec::new(),
			conditioning: HashMap::new(),
		}
	}

	/// Checks that a symbol is registered and hands it back.
	///
	/// # Errors
	/// `UnknownSymbol` if the inventory does not contain it.
	pub fn require(&self, symbol: Symbol) -> Result<Symbol, ConstructionError> {
		self.inventory.id(symbol).map(|_| symbol)
	}

	/// Adds a class made of the given clusters.
	pub fn clusters(&mut self, label: &str, clusters: Vec<Cluster>) -> usize {
		self.classes.push(ConstraintClass::new(label, clusters));
		self.classes.len() - 1
	}

	/// Adds one single-phoneme cluster per phoneme accepted by `filter`.
	pub fn singles<F>(&mut self, label: &str, filter: F) -> usize
	where
		F: Fn(&Phoneme) -> bool,
	{
		let clusters = self.inventory.select(filter).into_iter().map(|id| vec![id]).collect();
		self.clusters(label, clusters)
	}

	/// Adds every pair `(a, b)` with `first(a)`, `second(b)` and not
	/// `exclude(a, b)`.
	pub fn pairs<F, S, X>(&mut self, label: &str, first: F, second: S, exclude: X) -> usize
	where
		F: Fn(&Phoneme) -> bool,
		S: Fn(&Phoneme) -> bool,
		X: Fn(&Phoneme, &Phoneme) -> bool,
	{
		let mut clusters = Vec::new();
		for (a_id, a) in self.inventory.iter().filter(|(_, p)| first(*p)) {
			for (b_id, b) in self.inventory.iter().filter(|(_, p)| second(*p)) {
				if !exclude(a, b) {
					clusters.push(vec![a_id, b_id]);
				}
			}
		}
		self.clusters(label, clusters)
	}

	/// Same as `pairs` for three-phoneme clusters.
	pub fn triples<F, S, T, X>(&mut self, label: &str, first: F, second: S, third: T, exclude: X) -> usize
	where
		F: Fn(&Phoneme) -> bool,
		S: Fn(&Phoneme) -> bool,
		T: Fn(&Phoneme) -> bool,
		X: Fn(&Phoneme, &Phoneme, &Phoneme) -> bool,
	{
		let mut clusters = Vec::new();
		for (a_id, a) in self.inventory.iter().filter(|(_, p)| first(*p)) {
			for (b_id, b) in self.inventory.iter().filter(|(_, p)| second(*p)) {
				for (c_id, c) in self.inventory.iter().filter(|(_, p)| third(*p)) {
					if !exclude(a, b, c) {
						clusters.push(vec![a_id, b_id, c_id]);
					}
				}
			}
		}
		self.clusters(label, clusters)
	}

	/// Adds a class holding the clusters of all classes declared so far
	/// that `filter` accepts.
	pub fn derived<F>(&mut self, label: &str, filter: F) -> usize
	where
		F: Fn(&[&Phoneme]) -> bool,
	{
		let clusters = self
			.classes
			.iter()
			.flat_map(|c| c.clusters.iter())
			.filter(|cluster| {
				let phonemes: Vec<&Phoneme> = cluster.iter().map(|id| self.inventory.phoneme(*id)).collect();
				filter(&phonemes)
			})
			.cloned()
			.collect();
		self.clusters(label, clusters)
	}

	/// Restricts the slot following `symbol` to `class`.
	///
	/// # Errors
	/// `UnknownSymbol` if the inventory does not contain `symbol`.
	pub fn condition_after(&mut self, symbol: Symbol, class: usize) -> Result<(), ConstructionError> {
		let id = self.inventory.id(symbol)?;
		self.conditioning.insert(id, class);
		Ok(())
	}

	/// Same as `condition_after` for every phoneme accepted by `filter`.
	pub fn condition_after_all<F>(&mut self, filter: F, class: usize)
	where
		F: Fn(&Phoneme) -> bool,
	{
		for id in self.inventory.select(filter) {
			self.conditioning.insert(id, class);
		}
	}

	pub fn build(self) -> ConstraintTable {
		let selectable = self
			.classes
			.iter()
			.enumerate()
			.filter(|(_, c)| !c.is_empty())
			.map(|(i, _)| i)
			.collect();
		ConstraintTable {
			classes: self.classes,
			selectable,
			conditioning: self.conditioning,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::spelling::{Condition, rule};
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn inventory() -> Inventory {
		let symbols = [Symbol::A, Symbol::P, Symbol::T, Symbol::S, Symbol::L, Symbol::W];
		Inventory::new(symbols.iter().map(|s| Phoneme::new(*s, vec![rule("x", Condition::Always)])).collect()).unwrap()
	}

	#[test]
	fn test_singles_and_pairs() {
		let inventory = inventory();
		let mut table = TableBuilder::new(&inventory);
		let singles = table.singles("consonants", |p| p.phone().is_consonant());
		let pairs = table.pairs(
			"stop plus approximant",
			|p| p.phone().is_stop(),
			|p| p.phone().is_approximant(),
			|a, b| a.phone().place() == b.phone().place(),
		);
		let table = table.build();

		assert_eq!(table.class(singles).unwrap().len(), 5);
		// p+l, t+w (p+w and t+l share a place)
		let pairs = table.class(pairs).unwrap();
		assert_eq!(pairs.len(), 2);
		for cluster in pairs.clusters() {
			assert_eq!(cluster.len(), 2);
		}
	}

	#[test]
	fn test_empty_classes_are_not_selectable() {
		let inventory = inventory();
		let mut table = TableBuilder::new(&inventory);
		let empty = table.singles("nasals", |p| p.phone().is_nasal_consonant());
		let full = table.singles("vowels", |p| p.phone().is_vowel());
		let table = table.build();

		assert!(table.class(empty).unwrap().is_empty());
		assert_eq!(table.selectable(), &[full]);

		let mut rng = StdRng::seed_from_u64(3);
		for _ in 0..20 {
			assert_eq!(table.pick(&mut rng).unwrap().len(), 1);
		}
	}

	#[test]
	fn test_triples_with_exclusion() {
		let inventory = inventory();
		let mut table = TableBuilder::new(&inventory);
		let class = table.triples(
			"s plus stop plus approximant",
			only(Symbol::S),
			|p| p.phone().is_stop(),
			except(&[Symbol::W, Symbol::A, Symbol::P, Symbol::T, Symbol::S]),
			|_, b, c| b.phone().place() == c.phone().place(),
		);
		let table = table.build();
		// only s+p+l survives
		assert_eq!(table.class(class).unwrap().len(), 1);
	}

	#[test]
	fn test_derived_and_conditioning() {
		let inventory = inventory();
		let mut table = TableBuilder::new(&inventory);
		table.singles("consonants", |p| p.phone().is_consonant());
		let stops = table.derived("stops only", |cluster| cluster[0].phone().is_stop());
		table.condition_after(Symbol::A, stops).unwrap();
		assert_eq!(
			table.condition_after(Symbol::Ny, stops),
			Err(ConstructionError::UnknownSymbol(Symbol::Ny))
		);
		let table = table.build();

		let a = inventory.id(Symbol::A).unwrap();
		assert_eq!(table.conditioned_class(a), Some(stops));
		assert_eq!(table.class(stops).unwrap().len(), 2);

		let mut rng = StdRng::seed_from_u64(9);
		let cluster = table.pick_in(stops, &mut rng).unwrap();
		assert!(inventory.get(cluster[0]).unwrap().phone().is_stop());
	}
}
