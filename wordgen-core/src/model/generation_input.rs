use icu_locale_core::{langid, LanguageIdentifier};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};
use crate::model::casing::Casing;

/// Configuration for a generation.
///
/// `GenerationInput` is a plain value: it is never mutated by the generator
/// and can be reused across any number of calls without residual state.
///
/// # Defaults
/// - `count`: 1
/// - `casing`: `Casing::None`
/// - `separator`: a single space
/// - `locale`: `en`
///
/// # Invariants
/// - `locale` always holds a well-formed language identifier
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GenerationInput {
	/// Number of words to generate. Zero yields the empty string.
	pub count: usize,

	/// Casing applied to each selected word.
	pub casing: Casing,

	/// String inserted between consecutive words (never after the last).
	pub separator: String,

	/// Language whose case-mapping rules drive `casing`.
	#[serde(with = "locale_tag")]
	locale: LanguageIdentifier,
}

impl Default for GenerationInput {
	fn default() -> Self {
		Self {
			count: 1,
			casing: Casing::None,
			separator: " ".to_owned(),
			locale: langid!("en"),
		}
	}
}

impl GenerationInput {
	/// Returns the casing locale.
	pub fn locale(&self) -> &LanguageIdentifier {
		&self.locale
	}

	/// Sets the casing locale from a BCP-47 language tag (`"en"`, `"tr"`, `"de-CH"`).
	///
	/// # Errors
	/// Returns `ConfigurationError::InvalidLocale` if the tag does not parse.
	/// The previous locale is kept in that case.
	pub fn set_locale(&mut self, tag: &str) -> Result<()> {
		self.locale = parse_locale(tag)?;
		Ok(())
	}

	pub fn with_count(mut self, count: usize) -> Self {
		self.count = count;
		self
	}

	pub fn with_casing(mut self, casing: Casing) -> Self {
		self.casing = casing;
		self
	}

	pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
		self.separator = separator.into();
		self
	}

	/// Builder form of [`GenerationInput::set_locale`].
	pub fn with_locale(mut self, tag: &str) -> Result<Self> {
		self.set_locale(tag)?;
		Ok(self)
	}
}

fn parse_locale(tag: &str) -> std::result::Result<LanguageIdentifier, ConfigurationError> {
	tag.parse::<LanguageIdentifier>()
		.map_err(|e| ConfigurationError::InvalidLocale {
			tag: tag.to_owned(),
			reason: e.to_string(),
		})
}

/// Serde adapter storing the locale as its BCP-47 string.
mod locale_tag {
	use icu_locale_core::LanguageIdentifier;
	use serde::{Deserialize, Deserializer, Serializer};

	pub fn serialize<S: Serializer>(locale: &LanguageIdentifier, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(locale)
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LanguageIdentifier, D::Error> {
		let tag = String::deserialize(deserializer)?;
		super::parse_locale(&tag).map_err(serde::de::Error::custom)
	}
}
