//! Message translation
//!
//! Errors carry message templates. A [`Translate`] implementation turns one
//! error into display text for a named translation; the default
//! [`Translator`] is a dictionary from template to translated phrase.
//!
//! # Examples
//!
//! ```rust,ignore
//! use verdict::translation::{Translate, Translator};
//!
//! let translator = Translator::new()
//!     .with_phrase("Polish", "Must be at least {min} characters in length", "Minimum {min} znaki");
//!
//! let text = translator.translate(&error, Some("Polish"));
//! ```

use std::collections::HashMap;

use crate::foundation::{ValidationError, format_message};

/// Renders an error as display text.
pub trait Translate: Send + Sync {
    /// Renders `error` for the translation `translation`, or for no
    /// translation when `None`.
    fn translate(&self, error: &ValidationError, translation: Option<&str>) -> String;
}

/// Dictionary translator: translation name, then template, then phrase.
///
/// The phrase for an error's exact template replaces the template before
/// formatting. Unknown translations and templates fall back to the template
/// itself, so an empty translator renders every error in its original form.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    translations: HashMap<String, HashMap<String, String>>,
}

impl Translator {
    /// Creates a translator with no translations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a phrase and returns the translator.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_phrase(
        mut self,
        translation: impl Into<String>,
        template: impl Into<String>,
        phrase: impl Into<String>,
    ) -> Self {
        self.add_phrase(translation, template, phrase);
        self
    }

    /// Adds a phrase, replacing any previous phrase for the same template.
    pub fn add_phrase(
        &mut self,
        translation: impl Into<String>,
        template: impl Into<String>,
        phrase: impl Into<String>,
    ) {
        self.translations
            .entry(translation.into())
            .or_default()
            .insert(template.into(), phrase.into());
    }

    /// Adds every `(template, phrase)` pair to a translation.
    pub fn extend<I, K, V>(&mut self, translation: impl Into<String>, phrases: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.translations
            .entry(translation.into())
            .or_default()
            .extend(phrases.into_iter().map(|(k, v)| (k.into(), v.into())));
    }

    /// The phrase for `template` in `translation`.
    #[must_use]
    pub fn phrase(&self, translation: &str, template: &str) -> Option<&str> {
        self.translations
            .get(translation)
            .and_then(|phrases| phrases.get(template))
            .map(String::as_str)
    }

    /// Whether `translation` has any phrases.
    #[must_use]
    pub fn has_translation(&self, translation: &str) -> bool {
        self.translations.contains_key(translation)
    }

    /// Names of every translation, sorted.
    #[must_use]
    pub fn translation_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.translations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Translate for Translator {
    fn translate(&self, error: &ValidationError, translation: Option<&str>) -> String {
        let template = translation
            .and_then(|name| self.phrase(name, error.message()))
            .unwrap_or_else(|| error.message());
        format_message(template, error.args()).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::MessageArg;
    use pretty_assertions::assert_eq;

    fn min_length() -> ValidationError {
        ValidationError::with_args(
            "Must be at least {min} characters in length",
            [MessageArg::new("min", 3usize)],
        )
        .unwrap()
    }

    #[test]
    fn translated_phrase_is_formatted() {
        let translator = Translator::new().with_phrase(
            "Polish",
            "Must be at least {min} characters in length",
            "Minimalna długość to {min}",
        );

        assert_eq!(
            translator.translate(&min_length(), Some("Polish")),
            "Minimalna długość to 3"
        );
    }

    #[test]
    fn falls_back_to_template() {
        let translator = Translator::new().with_phrase("Polish", "other", "inne");

        assert_eq!(
            translator.translate(&min_length(), Some("Polish")),
            "Must be at least 3 characters in length"
        );
        assert_eq!(
            translator.translate(&min_length(), Some("German")),
            "Must be at least 3 characters in length"
        );
        assert_eq!(
            translator.translate(&min_length(), None),
            "Must be at least 3 characters in length"
        );
    }

    #[test]
    fn extend_and_names() {
        let mut translator = Translator::new();
        translator.extend("Polish", [("Required", "Wymagane"), ("Error", "Błąd")]);
        translator.add_phrase("English", "Required", "Required");

        assert_eq!(translator.translation_names(), vec!["English", "Polish"]);
        assert!(translator.has_translation("Polish"));
        assert_eq!(translator.phrase("Polish", "Error"), Some("Błąd"));
        assert_eq!(
            translator.translate(&ValidationError::new("Required"), Some("Polish")),
            "Wymagane"
        );
    }
}
