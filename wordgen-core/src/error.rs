/// Error type for generation and configuration.
///
/// Both kinds abort the whole call: a generation either returns a complete
/// string or no string at all.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The caller supplied an unusable configuration. Not retryable as is.
	#[error("configuration error: {0}")]
	Configuration(#[from] ConfigurationError),

	/// The secure random source failed to produce a value.
	#[error("failed to obtain secure randomness: {0}")]
	RandomSource(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
	/// Returns `true` if the caller can fix this error by changing its input.
	pub fn is_configuration(&self) -> bool {
		matches!(self, Error::Configuration(_))
	}
}

/// Precondition violations detected before any randomness is consumed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
	#[error("word list must not be empty")]
	EmptyWordList,
	#[error("unknown casing {0:?}, expected one of none, upper, title, lower")]
	UnknownCasing(String),
	#[error("invalid locale {tag:?}: {reason}")]
	InvalidLocale { tag: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_word_list_message() {
		let err = Error::from(ConfigurationError::EmptyWordList);
		assert!(err.is_configuration());
		assert_eq!(err.to_string(), "configuration error: word list must not be empty");
	}

	#[test]
	fn random_source_keeps_its_cause() {
		let cause = std::io::Error::other("entropy unavailable");
		let err = Error::RandomSource(Box::new(cause));
		assert!(!err.is_configuration());
		assert!(err.to_string().contains("entropy unavailable"));
		assert!(std::error::Error::source(&err).is_some());
	}
}
