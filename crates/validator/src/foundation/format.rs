//! Message template formatting
//!
//! Templates reference arguments by name with `{name}` or, with parameters,
//! `{name|param=value|...}`. Substitution is a single pass: the output of a
//! replacement is never scanned again.
//!
//! A placeholder stays verbatim in the output when its name does not match
//! exactly one argument, or when any of its parameters is malformed, not
//! allowed for the argument kind, or carries a value the argument cannot
//! render.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::foundation::MessageArg;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}|]*)((?:\|[^{}|]*)*)\}").unwrap());

/// Formats `template` by substituting placeholders with matching `args`.
///
/// # Examples
///
/// ```rust,ignore
/// use verdict::foundation::{format_message, MessageArg};
///
/// let args = [MessageArg::new("min", 3usize)];
/// assert_eq!(format_message("At least {min} items", &args), "At least 3 items");
/// assert_eq!(format_message("At least {max} items", &args), "At least {max} items");
/// ```
#[must_use]
pub fn format_message<'a>(template: &'a str, args: &[MessageArg]) -> Cow<'a, str> {
    if args.is_empty() || !template.contains('{') {
        return Cow::Borrowed(template);
    }

    PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
        substitute(caps, args).unwrap_or_else(|| caps[0].to_owned())
    })
}

fn substitute(caps: &Captures<'_>, args: &[MessageArg]) -> Option<String> {
    let name = &caps[1];
    let mut matching = args.iter().filter(|arg| arg.name() == name);
    let arg = matching.next()?;
    if matching.next().is_some() {
        return None;
    }

    let parameters = parse_parameters(&caps[2])?;
    let allowed = arg.allowed_parameters();
    if parameters.iter().any(|(key, _)| !allowed.contains(key)) {
        return None;
    }

    arg.value().render(&parameters)
}

/// Parses `|key=value|key=value` into pairs. `None` when malformed.
fn parse_parameters(raw: &str) -> Option<Vec<(&str, &str)>> {
    if raw.is_empty() {
        return Some(Vec::new());
    }

    let mut parameters: Vec<(&str, &str)> = Vec::new();
    for segment in raw.split('|').skip(1) {
        let (key, value) = segment.split_once('=')?;
        if key.is_empty() || value.is_empty() || parameters.iter().any(|(k, _)| *k == key) {
            return None;
        }
        parameters.push((key, value));
    }

    Some(parameters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn args() -> Vec<MessageArg> {
        vec![
            MessageArg::new("min", 3usize),
            MessageArg::new("max", 255u32),
            MessageArg::new("ratio", 0.256f64),
            MessageArg::text("field", "Email"),
        ]
    }

    #[rstest]
    #[case("between {min} and {max}", "between 3 and 255")]
    #[case("{max|format=hex}", "ff")]
    #[case("{ratio|precision=1}", "0.3")]
    #[case("{ratio|precision=4000000000}", "{ratio|precision=4000000000}")]
    #[case("{field|case=upper} is invalid", "EMAIL is invalid")]
    #[case("{unknown} stays", "{unknown} stays")]
    #[case("{min|format=octal}", "{min|format=octal}")]
    #[case("{min|precision=2}", "{min|precision=2}")]
    #[case("{min|format}", "{min|format}")]
    #[case("{min|=hex}", "{min|=hex}")]
    #[case("{min|format=hex|format=bin}", "{min|format=hex|format=bin}")]
    #[case("{}", "{}")]
    #[case("no placeholders", "no placeholders")]
    fn formats_placeholders(#[case] template: &str, #[case] expected: &str) {
        assert_eq!(format_message(template, &args()), expected);
    }

    #[test]
    fn substitution_is_single_pass() {
        let args = [
            MessageArg::text("a", "{b}"),
            MessageArg::text("b", "nested"),
        ];
        assert_eq!(format_message("{a}", &args), "{b}");
    }

    #[test]
    fn ambiguous_names_are_left_verbatim() {
        let args = [MessageArg::new("n", 1u8), MessageArg::new("n", 2u8)];
        assert_eq!(format_message("{n}", &args), "{n}");
    }

    #[test]
    fn no_args_borrows_template() {
        assert!(matches!(format_message("{x}", &[]), Cow::Borrowed("{x}")));
    }
}
