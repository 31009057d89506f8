//! Word-list based random token generation library.
//!
//! This crate turns a caller-supplied vocabulary into random, human-readable
//! strings (passphrases, placeholder names, test fixtures):
//! - Uniform sampling with replacement from a cryptographically secure source
//! - Locale-aware casing (none, upper, title, lower)
//! - Joining with an arbitrary separator
//!
//! The crate performs no I/O and keeps no state between calls. Word lists
//! are borrowed for the duration of a single generation.

/// Generator, configuration, casing and random sources.
///
/// This module exposes the high-level generator interface together with
/// the pieces needed to configure it.
pub mod model;

/// Error types returned by generation and configuration.
pub mod error;

pub use error::{ConfigurationError, Error, Result};
pub use model::casing::Casing;
pub use model::generation_input::GenerationInput;
pub use model::generator::Generator;
pub use model::random::{OsRandom, RandomSource, SeededRandom};
