use crate::error::{ConfigurationError, Result};
use crate::model::generation_input::GenerationInput;
use crate::model::random::{OsRandom, RandomSource};

/// High-level generator turning a word list into a random, cased,
/// separator-joined string.
///
/// # Responsibilities
/// - Validate the word list before consuming any randomness
/// - Draw each word independently and uniformly (with replacement)
/// - Apply the configured casing and join with the separator
///
/// The generator is stateless between calls and only reads its
/// configuration, so a single instance can be shared across threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generator {
	input: GenerationInput,
}

impl Generator {
	/// Creates a generator from a configuration.
	pub fn new(input: GenerationInput) -> Self {
		Self { input }
	}

	/// Returns the configuration.
	pub fn input(&self) -> &GenerationInput {
		&self.input
	}

	/// Returns the configuration for in-place adjustment between calls.
	pub fn input_mut(&mut self) -> &mut GenerationInput {
		&mut self.input
	}

	/// Generates a string from `words` using the operating system CSPRNG.
	///
	/// # Errors
	/// - `ConfigurationError::EmptyWordList` if `words` is empty.
	/// - `Error::RandomSource` if the OS random source fails.
	pub fn generate<S: AsRef<str>>(&self, words: &[S]) -> Result<String> {
		self.generate_with(words, &mut OsRandom)
	}

	/// Generates a string from `words`, drawing indices from `source`.
	///
	/// # Behavior
	/// - Empty `words` fails before `source` is touched.
	/// - `count == 0` returns the empty string.
	/// - Otherwise `count` words are drawn; the separator goes between
	///   consecutive words, never after the last one.
	/// - Any source failure aborts the call; no partial string is returned.
	pub fn generate_with<S, R>(&self, words: &[S], source: &mut R) -> Result<String>
	where
		S: AsRef<str>,
		R: RandomSource + ?Sized,
	{
		if words.is_empty() {
			return Err(ConfigurationError::EmptyWordList.into());
		}

		let input = &self.input;
		let mut output = String::with_capacity(estimated_len(words, input));

		for i in 0..input.count {
			let word = words[source.uniform_index(words.len())?].as_ref();
			output.push_str(&input.casing.apply(word, input.locale()));

			if i + 1 < input.count {
				output.push_str(&input.separator);
			}
		}

		Ok(output)
	}
}

/// Capacity hint for the output buffer.
///
/// Uses the mean of a bounded prefix of the word list so the hint stays
/// O(1) for huge lists. Casing may change byte lengths; this is a hint only.
/// Capped at `MAX_CAPACITY_HINT`; longer outputs grow the buffer as needed.
fn estimated_len<S: AsRef<str>>(words: &[S], input: &GenerationInput) -> usize {
	const SAMPLE: usize = 64;
	const MAX_CAPACITY_HINT: usize = 1 << 20;

	if input.count == 0 {
		return 0;
	}

	let sample = &words[..words.len().min(SAMPLE)];
	let mean = sample.iter().map(|w| w.as_ref().len()).sum::<usize>() / sample.len();

	mean.saturating_add(input.separator.len())
		.saturating_mul(input.count)
		.min(MAX_CAPACITY_HINT)
}
