use std::collections::HashMap;

use crate::option::Value;

/// Receives the values of options declared with a bind target.
///
/// After a successful parse the parser calls [`Binder::bind`] once for every
/// given option that has a bind target, with the target name and the
/// option's resolved value. How the value is applied is up to the host.
///
/// Any `FnMut(&str, &Value)` closure is a binder. [`BoundValues`] simply
/// collects the values by target name.
///
/// # Examples
///
/// ```
/// use argman::{DefaultParser, OptionSpec, OptionType, Options, Parser, Value};
///
/// struct Config { level: i64 }
///
/// let mut options = Options::new();
/// options.add_option(["l"], OptionSpec::new()
///     .kind(OptionType::Integer)
///     .default_int(1)
///     .bind("level")).unwrap();
///
/// let mut config = Config { level: 0 };
/// let mut binder = |target: &str, value: &Value| {
///     if target == "level" {
///         config.level = value.as_int().unwrap_or_default();
///     }
/// };
/// DefaultParser::builder().build()
///     .parse_and_bind(&mut options, &["-l", "4"], &mut binder)
///     .unwrap();
/// assert_eq!(4, config.level);
/// ```
pub trait Binder {
    fn bind(&mut self, target: &str, value: &Value);
}

impl<F> Binder for F
where
    F: FnMut(&str, &Value),
{
    fn bind(&mut self, target: &str, value: &Value) {
        self(target, value)
    }
}

/// A binder collecting `target => value`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundValues(HashMap<String, Value>);

impl BoundValues {
    pub fn new() -> BoundValues {
        BoundValues::default()
    }

    pub fn get(&self, target: &str) -> Option<&Value> {
        self.0.get(target)
    }

    pub fn into_inner(self) -> HashMap<String, Value> {
        self.0
    }
}

impl Binder for BoundValues {
    fn bind(&mut self, target: &str, value: &Value) {
        self.0.insert(target.to_string(), value.clone());
    }
}
