use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value as JsonValue;

use crate::spec::OptionType;

/// Single letter, or letters joined by inner hyphens.
static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A[A-Za-z](?:[-A-Za-z]*[A-Za-z])?\z").expect("static regex must compile")
});

/// Predicates checking the legality of single option specification fields.
///
/// Every predicate is pure. Callers turn a `false` into an
/// [`OptionErr::InvalidSpecification`](crate::OptionErr::InvalidSpecification)
/// naming the field and the rejected value.
pub struct SpecValidator;

impl SpecValidator {
    /// Every name is well-formed and no name repeats.
    pub fn names_ok<S: AsRef<str>>(names: &[S]) -> bool {
        let mut seen = HashSet::new();
        names.iter().all(|name| Self::name_ok(name.as_ref()) && seen.insert(name.as_ref()))
    }

    /// A single letter or a letter-delimited hyphenated word, e.g. `v` or `dry-run`.
    pub fn name_ok(name: &str) -> bool {
        NAME_RE.is_match(name)
    }

    pub fn type_ok(candidate: &JsonValue) -> bool {
        candidate.as_str().is_some_and(|t| t.parse::<OptionType>().is_ok())
    }

    pub fn mandatory_ok(candidate: &JsonValue) -> bool {
        candidate.is_boolean()
    }

    /// Both bounds open, one bound open, or `min <= max`.
    pub fn bounds_ok(min: Option<i64>, max: Option<i64>) -> bool {
        match (min, max) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }

    pub fn int_default_ok(default: Option<i64>, min: Option<i64>, max: Option<i64>) -> bool {
        let Some(default) = default else {
            return true;
        };
        if min.is_some_and(|min| default < min) {
            return false;
        }
        if max.is_some_and(|max| max < default) {
            return false;
        }
        true
    }

    /// An open domain, or a domain without duplicate entries.
    pub fn domain_ok<S: AsRef<str>>(domain: Option<&[S]>) -> bool {
        let Some(domain) = domain else {
            return true;
        };
        let mut seen = HashSet::new();
        domain.iter().all(|item| seen.insert(item.as_ref()))
    }

    pub fn str_default_ok<S: AsRef<str>>(default: Option<&str>, domain: Option<&[S]>) -> bool {
        match (default, domain) {
            (Some(default), Some(domain)) => domain.iter().any(|item| item.as_ref() == default),
            _ => true,
        }
    }

    pub fn help_ok(candidate: &JsonValue) -> bool {
        candidate.is_null() || candidate.is_string()
    }

    pub fn bind_ok(candidate: &JsonValue) -> bool {
        candidate.is_null() || candidate.is_string()
    }

    /// A bind target must be a single non-empty word.
    pub fn bind_target_ok(target: &str) -> bool {
        !target.is_empty() && !target.chars().any(char::is_whitespace)
    }
}
