use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use icu_casemap::options::TitlecaseOptions;
use icu_casemap::{CaseMapper, TitlecaseMapper};
use icu_locale_core::LanguageIdentifier;
use icu_properties::props::{GeneralCategory, GeneralCategoryGroup};
use icu_properties::CodePointMapData;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Letter casing applied to each selected word before joining.
///
/// All transforms are full Unicode case mappings parameterized by a locale,
/// so special rules (Turkish dotted `İ`, German `ß` -> `SS`, ...) apply.
///
/// ## Invariants
/// - Every transform is idempotent: `c.apply(c.apply(w)) == c.apply(w)`
/// - `None` never allocates
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Casing {
	/// Words are emitted unchanged.
	#[default]
	None,
	/// Every character mapped to uppercase.
	Upper,
	/// First letter of each word segment titlecased, the rest lowercased.
	Title,
	/// Every character mapped to lowercase.
	Lower,
}

impl Casing {
	/// All casing modes, in canonical order.
	pub const ALL: [Casing; 4] = [Casing::None, Casing::Upper, Casing::Title, Casing::Lower];

	/// Canonical lowercase name.
	pub fn as_str(&self) -> &'static str {
		match self {
			Casing::None => "none",
			Casing::Upper => "upper",
			Casing::Title => "title",
			Casing::Lower => "lower",
		}
	}

	/// Applies this casing to `word` under the rules of `locale`.
	pub fn apply<'a>(&self, word: &'a str, locale: &LanguageIdentifier) -> Cow<'a, str> {
		match self {
			Casing::None => Cow::Borrowed(word),
			Casing::Upper => CaseMapper::new().uppercase_to_string(word, locale).into(),
			Casing::Title => Cow::Owned(titlecase(word, locale)),
			Casing::Lower => CaseMapper::new().lowercase_to_string(word, locale).into(),
		}
	}
}

/// Titlecases every segment of `word`.
///
/// A segment starts at a letter or digit whose preceding character is not
/// part of a word. Letters, digits, marks, apostrophes and the mid-word
/// punctuation `.` `:` `·` are part of a word, so `o'neil` and `st.louis`
/// stay single segments while `jean-luc` and `a«b` split in two.
fn titlecase(word: &str, locale: &LanguageIdentifier) -> String {
	let mapper = TitlecaseMapper::new();
	let categories = CodePointMapData::<GeneralCategory>::new();
	let mut titled = String::with_capacity(word.len());

	let mut start = 0;
	let mut prev_in_word = false;
	for (i, c) in word.char_indices() {
		let category = categories.get(c);
		let starts_word = GeneralCategoryGroup::Letter.contains(category)
			|| GeneralCategoryGroup::Number.contains(category);

		if starts_word && !prev_in_word && i > start {
			titled.push_str(&mapper.titlecase_segment_to_string(&word[start..i], locale, TitlecaseOptions::default()));
			start = i;
		}
		prev_in_word = starts_word || GeneralCategoryGroup::Mark.contains(category) || is_mid_word(c);
	}
	titled.push_str(&mapper.titlecase_segment_to_string(&word[start..], locale, TitlecaseOptions::default()));

	titled
}

fn is_mid_word(c: char) -> bool {
	matches!(c, '\'' | '\u{2019}' | '.' | ':' | '\u{00B7}')
}

impl fmt::Display for Casing {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Casing {
	type Err = ConfigurationError;

	/// Parses a casing name, ignoring ASCII case.
	///
	/// The empty string means no casing.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"" | "none" => Ok(Casing::None),
			"upper" => Ok(Casing::Upper),
			"title" => Ok(Casing::Title),
			"lower" => Ok(Casing::Lower),
			_ => Err(ConfigurationError::UnknownCasing(s.to_owned())),
		}
	}
}

impl TryFrom<String> for Casing {
	type Error = ConfigurationError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use icu_locale_core::langid;

	fn en() -> LanguageIdentifier {
		langid!("en")
	}

	#[test]
	fn none_borrows_input() {
		assert!(matches!(Casing::None.apply("MiXeD", &en()), Cow::Borrowed("MiXeD")));
	}

	#[test]
	fn upper_lower_title_ascii() {
		assert_eq!(Casing::Upper.apply("apple", &en()), "APPLE");
		assert_eq!(Casing::Lower.apply("BaNaNa", &en()), "banana");
		assert_eq!(Casing::Title.apply("cHERRY", &en()), "Cherry");
	}

	#[test]
	fn title_handles_each_segment() {
		assert_eq!(Casing::Title.apply("new york", &en()), "New York");
		assert_eq!(Casing::Title.apply("jean-luc", &en()), "Jean-Luc");
		assert_eq!(Casing::Title.apply("o'neil", &en()), "O'neil");
		assert_eq!(Casing::Title.apply("  padded", &en()), "  Padded");
		assert_eq!(Casing::Title.apply("a«b", &en()), "A«B");
		assert_eq!(Casing::Title.apply("a¿b", &en()), "A¿B");
		assert_eq!(Casing::Title.apply("x×y", &en()), "X×Y");
		assert_eq!(Casing::Title.apply("«quoted»", &en()), "«Quoted»");
	}

	#[test]
	fn title_keeps_mid_word_punctuation_inside_a_segment() {
		assert_eq!(Casing::Title.apply("st.louis", &en()), "St.louis");
		assert_eq!(Casing::Title.apply("a:b", &en()), "A:b");
		assert_eq!(Casing::Title.apply("l·lum", &en()), "L·lum");
		assert_eq!(Casing::Title.apply("st. louis", &en()), "St. Louis");
	}

	#[test]
	fn title_handles_accented_letters() {
		assert_eq!(Casing::Title.apply("élan", &en()), "Élan");
		assert_eq!(Casing::Title.apply("ÅRE", &en()), "Åre");
	}

	#[test]
	fn upper_uses_full_mapping() {
		assert_eq!(Casing::Upper.apply("straße", &en()), "STRASSE");
	}

	#[test]
	fn turkish_dotted_i() {
		let tr: LanguageIdentifier = "tr".parse().unwrap();
		assert_eq!(Casing::Upper.apply("istanbul", &tr), "İSTANBUL");
		assert_eq!(Casing::Upper.apply("istanbul", &en()), "ISTANBUL");
		assert_eq!(Casing::Lower.apply("IĞDIR", &tr), "ığdır");
		assert_eq!(Casing::Title.apply("izmir", &tr), "İzmir");
	}

	#[test]
	fn transforms_are_idempotent() {
		let en = en();
		let tr: LanguageIdentifier = "tr".parse().unwrap();
		let words = ["apple", "New-YORK", "st.LOUIS", "a«b", "straße", "o'NEIL", "İstanbul", "ÅRE", "3d", ""];
		for casing in Casing::ALL {
			for locale in [&en, &tr] {
				for word in words {
					let once = casing.apply(word, locale).into_owned();
					let twice = casing.apply(&once, locale).into_owned();
					assert_eq!(once, twice, "{casing} not idempotent on {word:?}");
				}
			}
		}
	}

	#[test]
	fn parse_names() {
		assert_eq!("upper".parse::<Casing>(), Ok(Casing::Upper));
		assert_eq!("Title".parse::<Casing>(), Ok(Casing::Title));
		assert_eq!(" LOWER ".parse::<Casing>(), Ok(Casing::Lower));
		assert_eq!("none".parse::<Casing>(), Ok(Casing::None));
		assert_eq!("".parse::<Casing>(), Ok(Casing::None));
		assert_eq!(
			"camel".parse::<Casing>(),
			Err(ConfigurationError::UnknownCasing("camel".to_owned()))
		);
	}

	#[test]
	fn display_matches_parse() {
		for casing in Casing::ALL {
			assert_eq!(casing.to_string().parse::<Casing>(), Ok(casing));
		}
	}

	#[test]
	fn serde_uses_lowercase_names() {
		assert_eq!(serde_json::to_string(&Casing::Title).unwrap(), "\"title\"");
		assert_eq!(serde_json::from_str::<Casing>("\"UPPER\"").unwrap(), Casing::Upper);
		assert!(serde_json::from_str::<Casing>("\"snake\"").is_err());
	}
}
