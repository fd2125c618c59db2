//! Phonotactic word generation library.
//!
//! This crate generates pronounceable pseudo-words for a set of language
//! varieties. A word is built from syllables whose onsets, nuclei and codas
//! are drawn from per-variety phonotactic tables, then spelled with
//! context-sensitive rules:
//! - Phonetic features and symbols (`phonetics`)
//! - Spelling rules and their contexts (`spelling`)
//! - Phoneme inventories (`inventory`)
//! - Variety definitions (`variety`)
//! - Syllable assembly and generation (`model`)
//!
//! Engines are validated once when built or loaded; generation itself never
//! panics on a validated engine.

/// Articulatory features of the sounds known to the crate.
pub mod phonetics;

/// Context-sensitive spelling rules.
pub mod spelling;

/// Phonemes of a variety addressed by stable ids.
pub mod inventory;

/// Error types of construction, generation, settings and snapshots.
pub mod error;

/// Shipped varieties: American English and Metropolitan French.
pub mod variety;

/// Tables, engines and the high-level generator.
pub mod model;

/// I/O utilities (snapshot files, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use error::{ConfigError, ConstructionError, GenerationError, SnapshotError};
pub use model::engine::Engine;
pub use model::generation_input::GenerationInput;
pub use model::generator::Generator;
pub use model::word_shape::{MAX_SYLLABLES, WordShape};
pub use variety::Variety;
