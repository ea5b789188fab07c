//! Validation entry point
//!
//! A [`Validator`] ties together the [`SpecificationRepository`], the
//! [`Translate`] implementation used for messages and the base
//! [`ValidationOptions`]. It is cheap to clone and safe to share across
//! threads; every call keeps its own traversal state.
//!
//! # Examples
//!
//! ```rust,ignore
//! use verdict::prelude::*;
//!
//! let repository = SpecificationRepository::new();
//! repository.register(user_spec);
//!
//! let validator = Validator::builder()
//!     .repository(repository)
//!     .translator(Translator::new().with_phrase("Polish", "Required", "Wymagane"))
//!     .options(ValidationOptions::default().with_translation("Polish"))
//!     .build()?;
//!
//! let result = validator.validate(&user)?;
//! for (path, messages) in result.messages() {
//!     println!("{path}: {messages:?}");
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::engine::{Scope, Traversal, execute_root};
use crate::foundation::{
    ErrorsCollection, NullRootStrategy, SpecError, SpecResult, ValidationOptions,
    ValidationStrategy,
};
use crate::repository::SpecificationRepository;
use crate::specification::Specification;
use crate::translation::{Translate, Translator};

// ============================================================================
// RESULT
// ============================================================================

/// Outcome of one validation call.
#[derive(Clone)]
pub struct ValidationResult {
    errors: ErrorsCollection,
    translator: Arc<dyn Translate>,
    translation: Option<String>,
}

impl ValidationResult {
    /// Whether the model passed every rule.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The hierarchical error report.
    #[must_use]
    pub const fn errors(&self) -> &ErrorsCollection {
        &self.errors
    }

    /// Consumes the result, returning the error report.
    #[must_use]
    pub fn into_errors(self) -> ErrorsCollection {
        self.errors
    }

    /// The translation the messages are rendered with.
    #[must_use]
    pub fn translation(&self) -> Option<&str> {
        self.translation.as_deref()
    }

    /// Rendered messages keyed by member path.
    ///
    /// Paths join member names with `.`; root-level errors use the empty
    /// path.
    #[must_use]
    pub fn messages(&self) -> IndexMap<String, Vec<String>> {
        self.render(self.translation.as_deref())
    }

    /// Rendered messages for another translation.
    #[must_use]
    pub fn messages_in(&self, translation: &str) -> IndexMap<String, Vec<String>> {
        self.render(Some(translation))
    }

    fn render(&self, translation: Option<&str>) -> IndexMap<String, Vec<String>> {
        self.errors
            .flatten()
            .into_iter()
            .map(|(path, errors)| {
                let messages = errors
                    .iter()
                    .map(|error| self.translator.translate(error, translation))
                    .collect();
                (path, messages)
            })
            .collect()
    }
}

impl fmt::Debug for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationResult")
            .field("errors", &self.errors)
            .field("translation", &self.translation)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return f.write_str("valid");
        }
        for (path, messages) in self.messages() {
            for message in messages {
                if path.is_empty() {
                    writeln!(f, "{message}")?;
                } else {
                    writeln!(f, "{path}: {message}")?;
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// Validates models against their registered specifications.
#[derive(Clone)]
pub struct Validator {
    repository: Arc<SpecificationRepository>,
    translator: Arc<dyn Translate>,
    options: ValidationOptions,
}

impl Validator {
    /// Starts building a validator.
    #[must_use]
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::default()
    }

    /// Creates a validator with default options and no translations.
    pub fn new(repository: impl Into<Arc<SpecificationRepository>>) -> SpecResult<Self> {
        Self::builder().repository(repository).build()
    }

    /// The repository specifications are looked up in.
    #[must_use]
    pub fn repository(&self) -> &SpecificationRepository {
        &self.repository
    }

    /// The base options.
    #[must_use]
    pub const fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Validates `model` with the specification registered for `M`.
    pub fn validate<M: 'static>(&self, model: &M) -> SpecResult<ValidationResult> {
        self.validate_option(Some(model))
    }

    /// Validates a model that may be absent.
    ///
    /// An absent model is handled by the configured [`NullRootStrategy`].
    pub fn validate_option<M: 'static>(&self, model: Option<&M>) -> SpecResult<ValidationResult> {
        let spec = self.repository.get::<M>()?;
        self.run(&spec, model, &self.options)
    }

    /// Validates with options replacing the base options for this call.
    pub fn validate_with<M: 'static>(
        &self,
        model: Option<&M>,
        options: &ValidationOptions,
    ) -> SpecResult<ValidationResult> {
        options.check()?;
        let spec = self.repository.get::<M>()?;
        self.run(&spec, model, options)
    }

    /// Validates with a specification that need not be registered.
    ///
    /// Nested rules still resolve through the repository.
    pub fn validate_with_spec<M: 'static>(
        &self,
        spec: &Specification<M>,
        model: Option<&M>,
    ) -> SpecResult<ValidationResult> {
        self.run(spec, model, &self.options)
    }

    /// Whether `model` is valid, stopping at the first error.
    pub fn is_valid<M: 'static>(&self, model: &M) -> SpecResult<bool> {
        let options = self
            .options
            .clone()
            .with_strategy(ValidationStrategy::FailFast);
        let spec = self.repository.get::<M>()?;
        Ok(self.run(&spec, Some(model), &options)?.is_valid())
    }

    /// Every error the specification for `M` can produce.
    ///
    /// Runs under [`ValidationStrategy::Force`] without a model, so each
    /// member reports its required error and each rule its error. Recursive
    /// specifications stop at the maximum depth with
    /// [`SpecError::MaxDepthExceeded`].
    pub fn template<M: 'static>(&self) -> SpecResult<ValidationResult> {
        let options = self.options.clone().with_strategy(ValidationStrategy::Force);
        let spec = self.repository.get::<M>()?;
        let scope = Scope::new(&options, &self.repository);
        let errors = execute_root(&spec, None, &scope, Traversal::new(options.strategy))?;
        Ok(self.finish(errors, &options))
    }

    fn run<M>(
        &self,
        spec: &Specification<M>,
        model: Option<&M>,
        options: &ValidationOptions,
    ) -> SpecResult<ValidationResult> {
        let errors = match model {
            Some(model) => {
                let scope = Scope::new(options, &self.repository);
                execute_root(spec, Some(model), &scope, Traversal::new(options.strategy))?
            }
            None => match options.null_root_strategy {
                NullRootStrategy::NoErrors => ErrorsCollection::new(),
                NullRootStrategy::RequiredError => {
                    ErrorsCollection::from_error(options.required_error.clone())
                }
                NullRootStrategy::ThrowOnNull => return Err(SpecError::NullModel),
            },
        };
        Ok(self.finish(errors, options))
    }

    fn finish(&self, errors: ErrorsCollection, options: &ValidationOptions) -> ValidationResult {
        ValidationResult {
            errors,
            translator: Arc::clone(&self.translator),
            translation: options.translation_name.clone(),
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("repository", &self.repository)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for a [`Validator`].
#[derive(Default)]
pub struct ValidatorBuilder {
    repository: Option<Arc<SpecificationRepository>>,
    translator: Option<Arc<dyn Translate>>,
    options: ValidationOptions,
}

impl ValidatorBuilder {
    /// Sets the repository. Defaults to an empty one.
    #[must_use = "builder methods must be chained or built"]
    pub fn repository(mut self, repository: impl Into<Arc<SpecificationRepository>>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    /// Sets the translator. Defaults to an empty [`Translator`].
    #[must_use = "builder methods must be chained or built"]
    pub fn translator(mut self, translator: impl Translate + 'static) -> Self {
        self.translator = Some(Arc::new(translator));
        self
    }

    /// Sets a translator shared with other owners.
    #[must_use = "builder methods must be chained or built"]
    pub fn shared_translator(mut self, translator: Arc<dyn Translate>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Sets the base options.
    #[must_use = "builder methods must be chained or built"]
    pub fn options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the validator, checking the options.
    pub fn build(self) -> SpecResult<Validator> {
        self.options.check()?;

        let repository = self.repository.unwrap_or_default();
        let translator = self
            .translator
            .unwrap_or_else(|| Arc::new(Translator::new()));

        tracing::debug!(
            specifications = repository.len(),
            strategy = ?self.options.strategy,
            max_depth = self.options.max_depth,
            "built validator"
        );

        Ok(Validator {
            repository,
            translator,
            options: self.options,
        })
    }
}

impl fmt::Debug for ValidatorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorBuilder")
            .field("repository", &self.repository)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
