//! Error types for validation outcomes
//!
//! A [`ValidationError`] is one message template plus its typed arguments.
//! An [`ErrorsCollection`] is the hierarchical report produced by a
//! validation run: errors attached to the current level plus named member
//! collections, mirroring the shape of the validated model.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::foundation::failure::check_name;
use crate::foundation::{MessageArg, SpecError, format_message};

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A message template with typed arguments.
///
/// Uses `Cow<'static, str>` so static templates cost no allocation.
///
/// # Examples
///
/// ```rust,ignore
/// use verdict::foundation::{MessageArg, ValidationError};
///
/// let error = ValidationError::new("Must not be empty");
///
/// let error = ValidationError::with_args(
///     "Must be at least {min} characters",
///     [MessageArg::new("min", 3usize)],
/// )?;
/// assert_eq!(error.formatted(), "Must be at least 3 characters");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawValidationError")]
pub struct ValidationError {
    message: Cow<'static, str>,

    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    args: SmallVec<[MessageArg; 2]>,
}

impl ValidationError {
    /// Creates an error without arguments.
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            args: SmallVec::new(),
        }
    }

    /// Creates an error with arguments.
    ///
    /// Argument names must be unique.
    pub fn with_args(
        message: impl Into<Cow<'static, str>>,
        args: impl IntoIterator<Item = MessageArg>,
    ) -> Result<Self, SpecError> {
        let args: SmallVec<[MessageArg; 2]> = args.into_iter().collect();

        for (index, arg) in args.iter().enumerate() {
            if args[..index].iter().any(|a| a.name() == arg.name()) {
                return Err(SpecError::invalid_argument(
                    "args",
                    format!("duplicate argument name `{}`", arg.name()),
                ));
            }
        }

        Ok(Self {
            message: message.into(),
            args,
        })
    }

    /// The raw message template.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The message arguments, in declaration order.
    #[must_use]
    pub fn args(&self) -> &[MessageArg] {
        &self.args
    }

    /// Looks up an argument by name.
    #[must_use]
    pub fn arg(&self, name: &str) -> Option<&MessageArg> {
        self.args.iter().find(|arg| arg.name() == name)
    }

    /// The template formatted with this error's own arguments.
    #[must_use]
    pub fn formatted(&self) -> Cow<'_, str> {
        format_message(&self.message, &self.args)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl From<&'static str> for ValidationError {
    fn from(message: &'static str) -> Self {
        Self::new(message)
    }
}

impl From<String> for ValidationError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

// ============================================================================
// ERRORS COLLECTION
// ============================================================================

/// Hierarchical collection of validation errors.
///
/// Invariant: a collection is empty exactly when it holds no errors and no
/// members. Empty member collections are never stored, so an empty
/// collection added under any name leaves the parent untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawErrorsCollection")]
pub struct ErrorsCollection {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    errors: Vec<ValidationError>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    members: IndexMap<String, ErrorsCollection>,
}

impl ErrorsCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection holding a single error.
    #[must_use]
    pub fn from_error(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
            members: IndexMap::new(),
        }
    }

    /// Returns true if there are no errors at any level.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.members.is_empty()
    }

    /// Errors attached directly to this level.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Nested member collections, in insertion order.
    #[must_use]
    pub fn members(&self) -> &IndexMap<String, ErrorsCollection> {
        &self.members
    }

    /// Returns the collection for one member, if it has errors.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&ErrorsCollection> {
        self.members.get(name)
    }

    /// Adds an error at this level.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Merges `collection` under `name`.
    ///
    /// The name must not be empty or whitespace. Adding an empty collection
    /// is a no-op.
    pub fn add_member(
        &mut self,
        name: impl Into<String>,
        collection: ErrorsCollection,
    ) -> Result<(), SpecError> {
        let name = name.into();
        check_name("name", &name)?;

        if collection.is_empty() {
            return Ok(());
        }

        match self.members.get_mut(&name) {
            Some(existing) => existing.include(collection),
            None => {
                self.members.insert(name, collection);
            }
        }
        Ok(())
    }

    /// Deep-merges `other` into `self`.
    ///
    /// Errors are concatenated per level (existing first, duplicates kept)
    /// and member maps are merged recursively.
    pub fn include(&mut self, other: ErrorsCollection) {
        self.errors.extend(other.errors);

        for (name, collection) in other.members {
            if collection.is_empty() {
                continue;
            }
            match self.members.get_mut(&name) {
                Some(existing) => existing.include(collection),
                None => {
                    self.members.insert(name, collection);
                }
            }
        }
    }

    /// Total number of errors at every level.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
            + self
                .members
                .values()
                .map(ErrorsCollection::error_count)
                .sum::<usize>()
    }

    /// Flattens the tree into `(path, errors)` pairs, depth-first.
    ///
    /// The root level has the empty path; member paths are joined with `.`.
    /// Levels without errors of their own are skipped.
    #[must_use]
    pub fn flatten(&self) -> Vec<(String, &[ValidationError])> {
        let mut out = Vec::new();
        self.flatten_into(String::new(), &mut out);
        out
    }

    fn flatten_into<'a>(&'a self, path: String, out: &mut Vec<(String, &'a [ValidationError])>) {
        if !self.errors.is_empty() {
            out.push((path.clone(), &self.errors));
        }
        for (name, member) in &self.members {
            let child = if path.is_empty() {
                name.clone()
            } else {
                format!("{path}.{name}")
            };
            member.flatten_into(child, out);
        }
    }

    /// Converts the collection to a JSON value.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl fmt::Display for ErrorsCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (path, errors) in self.flatten() {
            for error in errors {
                if path.is_empty() {
                    writeln!(f, "{error}")?;
                } else {
                    writeln!(f, "{path}: {error}")?;
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// DESERIALIZATION
// ============================================================================

// Deserialized values go through the same checks as the constructors.

#[derive(Deserialize)]
struct RawValidationError {
    message: Cow<'static, str>,
    #[serde(default)]
    args: SmallVec<[MessageArg; 2]>,
}

impl TryFrom<RawValidationError> for ValidationError {
    type Error = SpecError;

    fn try_from(raw: RawValidationError) -> Result<Self, Self::Error> {
        Self::with_args(raw.message, raw.args)
    }
}

#[derive(Deserialize)]
struct RawErrorsCollection {
    #[serde(default)]
    errors: Vec<ValidationError>,
    #[serde(default)]
    members: IndexMap<String, ErrorsCollection>,
}

impl TryFrom<RawErrorsCollection> for ErrorsCollection {
    type Error = SpecError;

    fn try_from(raw: RawErrorsCollection) -> Result<Self, Self::Error> {
        let mut collection: Self = raw.errors.into_iter().collect();
        for (name, member) in raw.members {
            collection.add_member(name, member)?;
        }
        Ok(collection)
    }
}

impl FromIterator<ValidationError> for ErrorsCollection {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
            members: IndexMap::new(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn err(message: &'static str) -> ValidationError {
        ValidationError::new(message)
    }

    #[test]
    fn empty_member_is_not_retained() {
        let mut collection = ErrorsCollection::new();
        collection.add_member("Name", ErrorsCollection::new()).unwrap();

        assert!(collection.is_empty());
        assert!(collection.member("Name").is_none());
    }

    #[test]
    fn invalid_member_name_fails() {
        let mut collection = ErrorsCollection::new();
        let result = collection.add_member(" ", ErrorsCollection::from_error(err("x")));
        assert!(matches!(result, Err(SpecError::InvalidArgument { .. })));
        assert!(collection.is_empty());
    }

    #[test]
    fn include_concatenates_and_merges_members() {
        let mut left = ErrorsCollection::from_error(err("a"));
        left.add_member("Name", ErrorsCollection::from_error(err("n1")))
            .unwrap();

        let mut right = ErrorsCollection::from_error(err("a"));
        right
            .add_member("Name", ErrorsCollection::from_error(err("n2")))
            .unwrap();
        right
            .add_member("Age", ErrorsCollection::from_error(err("g")))
            .unwrap();

        left.include(right);

        assert_eq!(left.errors(), &[err("a"), err("a")]);
        assert_eq!(left.member("Name").unwrap().errors(), &[err("n1"), err("n2")]);
        assert_eq!(left.member("Age").unwrap().errors(), &[err("g")]);
        let names: Vec<&str> = left.members().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Name", "Age"]);
    }

    #[test]
    fn with_args_rejects_duplicate_names() {
        let result = ValidationError::with_args(
            "{n}",
            [MessageArg::new("n", 1u8), MessageArg::new("n", 2u8)],
        );
        assert!(matches!(result, Err(SpecError::InvalidArgument { argument: "args", .. })));
    }

    #[test]
    fn formatted_uses_own_args() {
        let error =
            ValidationError::with_args("at least {min}", [MessageArg::new("min", 3usize)]).unwrap();
        assert_eq!(error.formatted(), "at least 3");
        assert_eq!(error.message(), "at least {min}");
        assert!(error.arg("min").is_some());
    }

    #[test]
    fn flatten_and_display() {
        let mut items = ErrorsCollection::new();
        items
            .add_member("1", ErrorsCollection::from_error(err("bad item")))
            .unwrap();

        let mut root = ErrorsCollection::from_error(err("root"));
        root.add_member("Items", items).unwrap();

        let paths: Vec<String> = root.flatten().into_iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["".to_string(), "Items.1".to_string()]);
        assert_eq!(root.to_string(), "root\nItems.1: bad item\n");
        assert_eq!(root.error_count(), 2);
    }

    #[test]
    fn deserializing_drops_empty_members() {
        let collection: ErrorsCollection =
            serde_json::from_str(r#"{"members":{"Name":{},"Age":{"members":{"Min":{}}}}}"#)
                .unwrap();

        assert!(collection.is_empty());
        assert!(collection.member("Name").is_none());
        assert_eq!(collection, ErrorsCollection::new());
    }

    #[test]
    fn deserializing_checks_names_and_args() {
        let blank = serde_json::from_str::<ErrorsCollection>(
            r#"{"members":{" ":{"errors":[{"message":"x"}]}}}"#,
        );
        assert!(blank.is_err());

        let duplicate = serde_json::from_value::<ValidationError>(serde_json::json!({
            "message": "{n}",
            "args": [
                { "name": "n", "value": { "kind": "unsigned", "value": 1 } },
                { "name": "n", "value": { "kind": "unsigned", "value": 2 } }
            ]
        }));
        assert!(duplicate.is_err());
    }

    #[test]
    fn serializes_without_empty_parts() {
        let mut root = ErrorsCollection::new();
        root.add_member("Name", ErrorsCollection::from_error(err("required")))
            .unwrap();

        assert_eq!(
            root.to_json_value(),
            serde_json::json!({ "members": { "Name": { "errors": [{ "message": "required" }] } } })
        );
    }
}
