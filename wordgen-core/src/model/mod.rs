//! Top-level module for the word generation system.
//!
//! This module provides:
//! - The stateless `Generator` and its `generate()` operation
//! - Generation configuration (`GenerationInput`)
//! - Locale-aware casing transforms (`Casing`)
//! - Injectable random sources (`RandomSource`, `OsRandom`, `SeededRandom`)

/// High-level interface for generating separator-joined random words.
///
/// Validates the word list, draws indices, applies casing and joins.
pub mod generator;

/// Generation configuration: count, casing, separator and locale.
///
/// Built from explicit defaults and validating setters.
pub mod generation_input;

/// Casing modes and their dispatch onto Unicode case mapping.
pub mod casing;

/// Uniform index sources.
///
/// The production source reads from the operating system CSPRNG; a seeded
/// source is available for reproducible fixtures.
pub mod random;
