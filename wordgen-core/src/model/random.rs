use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng, TryRngCore};

use crate::error::{ConfigurationError, Error, Result};

/// A source of uniformly distributed indices.
///
/// This is the only capability the generator needs from randomness, which
/// lets tests substitute a deterministic source while production keeps the
/// operating system CSPRNG.
///
/// ## Contract
/// - `bound` is the length of the word list and must be at least 1
/// - The returned index lies in `[0, bound)`
/// - Every index in the range is equally likely
/// - Failures are returned, never retried internally
pub trait RandomSource {
	/// Draws an index uniformly from `[0, bound)`.
	///
	/// # Errors
	/// - `ConfigurationError::EmptyWordList` if `bound` is 0.
	/// - `Error::RandomSource` if the underlying source fails.
	fn uniform_index(&mut self, bound: usize) -> Result<usize>;
}

/// Cryptographically secure source backed by the operating system.
///
/// Zero-sized: each generation creates its own handle, so concurrent calls
/// share no random state.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
	fn uniform_index(&mut self, bound: usize) -> Result<usize> {
		draw_below(&mut OsRng, bound)
	}
}

/// Reproducible source seeded from a `u64`.
///
/// Intended for fixtures and tests where the same seed must yield the same
/// output. Not used by `Generator::generate`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
	rng: StdRng,
}

impl SeededRandom {
	/// Creates a source whose sequence is fully determined by `seed`.
	pub fn new(seed: u64) -> Self {
		Self { rng: StdRng::seed_from_u64(seed) }
	}
}

impl RandomSource for SeededRandom {
	fn uniform_index(&mut self, bound: usize) -> Result<usize> {
		if bound == 0 {
			return Err(ConfigurationError::EmptyWordList.into());
		}
		Ok(self.rng.random_range(0..bound))
	}
}

/// Draws an unbiased index below `bound` from a fallible generator.
///
/// Uses rejection sampling on 64-bit draws: values below `2^64 mod bound`
/// would over-represent the low indices and are discarded.
fn draw_below<R>(rng: &mut R, bound: usize) -> Result<usize>
where
	R: TryRngCore,
	R::Error: std::error::Error + Send + Sync + 'static,
{
	if bound == 0 {
		return Err(ConfigurationError::EmptyWordList.into());
	}

	let bound = bound as u64;
	let threshold = bound.wrapping_neg() % bound;
	loop {
		let value = rng
			.try_next_u64()
			.map_err(|e| Error::RandomSource(Box::new(e)))?;
		if value >= threshold {
			// value % bound < bound <= usize::MAX
			return Ok((value % bound) as usize);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::VecDeque;
	use std::io;

	/// Replays a fixed sequence of 64-bit values.
	struct Scripted(VecDeque<u64>);

	impl TryRngCore for Scripted {
		type Error = io::Error;

		fn try_next_u32(&mut self) -> std::result::Result<u32, Self::Error> {
			self.try_next_u64().map(|v| v as u32)
		}

		fn try_next_u64(&mut self) -> std::result::Result<u64, Self::Error> {
			self.0
				.pop_front()
				.ok_or_else(|| io::Error::other("script exhausted"))
		}

		fn try_fill_bytes(&mut self, dst: &mut [u8]) -> std::result::Result<(), Self::Error> {
			for chunk in dst.chunks_mut(8) {
				let bytes = self.try_next_u64()?.to_le_bytes();
				chunk.copy_from_slice(&bytes[..chunk.len()]);
			}
			Ok(())
		}
	}

	#[test]
	fn os_random_stays_in_range() {
		let mut source = OsRandom;
		for bound in [1, 2, 3, 7, 1000] {
			for _ in 0..200 {
				assert!(source.uniform_index(bound).unwrap() < bound);
			}
		}
	}

	#[test]
	fn zero_bound_is_a_configuration_error() {
		let err = OsRandom.uniform_index(0).unwrap_err();
		assert!(err.is_configuration());
		let err = SeededRandom::new(1).uniform_index(0).unwrap_err();
		assert!(err.is_configuration());
	}

	#[test]
	fn biased_low_values_are_rejected() {
		// 2^64 mod 3 == 1, so a raw 0 must be discarded.
		let mut rng = Scripted(VecDeque::from([0, 5]));
		assert_eq!(draw_below(&mut rng, 3).unwrap(), 2);
		assert!(rng.0.is_empty());
	}

	#[test]
	fn single_word_bound_always_yields_zero() {
		let mut rng = Scripted(VecDeque::from([0, u64::MAX, 42]));
		for _ in 0..3 {
			assert_eq!(draw_below(&mut rng, 1).unwrap(), 0);
		}
	}

	#[test]
	fn source_failure_is_surfaced() {
		let mut rng = Scripted(VecDeque::new());
		match draw_below(&mut rng, 4) {
			Err(Error::RandomSource(cause)) => assert_eq!(cause.to_string(), "script exhausted"),
			other => panic!("expected random source error, got {other:?}"),
		}
	}

	#[test]
	fn seeded_random_is_reproducible() {
		let mut a = SeededRandom::new(42);
		let mut b = SeededRandom::new(42);
		for _ in 0..100 {
			assert_eq!(a.uniform_index(1000).unwrap(), b.uniform_index(1000).unwrap());
		}
	}
}
