//! Syllable assembly and word generation.
//!
//! This module turns a variety definition into a working generator:
//! - Phonotactic tables of clusters (`ConstraintTable`)
//! - Syllables and generated words (`Syllable`, `Word`)
//! - Word shape settings (`WordShape`)
//! - A per-variety generator (`Engine`) and its load-time checks
//! - A multi-variety interface (`Generator`, `GenerationInput`)

/// Clusters grouped in labeled classes, with conditioning between tables.
pub mod constraint_table;

/// Onset, nucleus and coda of one syllable, and the assembled word.
pub mod syllable;

/// Syllable bound and probabilities applied when generating a word.
pub mod word_shape;

/// Word generator for a single variety.
///
/// Builds, validates, generates, spells and snapshots.
pub mod engine;

/// Construction-time checks of an engine.
///
/// Adds `Engine::validate`; nothing else is exposed.
mod validation;

/// Weighted variety selection settings.
///
/// Used by `Generator` to decide which variety produces the next word.
pub mod generation_input;

/// High-level interface over one engine per variety.
pub mod generator;
