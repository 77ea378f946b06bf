use std::fmt::{Display, Formatter};

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use crate::error::OptionErr;
use crate::option::ArgOption;
use crate::spec::{OptionSpec, SpecDefaults};

/// The `Options` is the registry of declared [`ArgOption`]s.
///
/// Options keep their registration order. Every name is owned by at most
/// one option. Fields a declaration leaves out are taken from the
/// registry's specification defaults, see [`Options::set_defaults`].
///
/// # Examples
///
/// Basic usage
/// ```
/// use argman::{OptionSpec, OptionType, Options};
///
/// let mut options = Options::new();
/// options.add_option(["v", "verbose"], OptionSpec::new().help("print verbosely")).unwrap();
/// options.add_option(["l", "level"], OptionSpec::new()
///                     .kind(OptionType::Integer)
///                     .min(0)
///                     .max(9)
///                     .default_int(6)).unwrap();
/// assert!(options.add_option(["v"], OptionSpec::new()).is_err());
/// assert_eq!("level", options.fetch_by_name("l").unwrap().get_names()[1]);
/// ```
///
/// Change the defaults for every following declaration.
/// ```
/// use argman::{OptionSpec, OptionType, Options};
///
/// let mut options = Options::new();
/// options.set_defaults(OptionSpec::new().kind(OptionType::Integer).default_int(0)).unwrap();
/// options.add_options(&["i", "j", "k"]).unwrap();
/// assert!(options.get_options().iter().all(|o| o.kind() == OptionType::Integer));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Options {
    options: Vec<ArgOption>,
    defaults: SpecDefaults,
    non_options: Vec<String>,
}

/// One entry of a JSON declaration document.
#[derive(Deserialize)]
struct Declaration {
    names: Names,
    #[serde(flatten)]
    spec: Map<String, JsonValue>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Names {
    One(String),
    Many(Vec<String>),
}

impl Options {
    /// Create an empty registry with the built-in defaults (boolean, not mandatory).
    pub fn new() -> Options {
        Options::default()
    }

    /// Declare an option owning `names`.
    ///
    /// `spec` is merged over the current defaults key by key, then the
    /// option is built and validated as a whole before it is appended.
    ///
    /// # Error
    ///
    /// Returns [`OptionErr::InvalidSpecification`] if the merged spec is not legal
    /// and [`OptionErr::DuplicateName`] if a name is already registered.
    /// The registry is unchanged on error.
    pub fn add_option<I, S>(&mut self, names: I, spec: OptionSpec) -> Result<(), OptionErr>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let option = ArgOption::new(names, &self.defaults.merged(&spec))?;

        if let Some(name) = option.get_names().iter().find(|n| self.fetch_by_name(n).is_some()) {
            return Err(OptionErr::DuplicateName(name.to_owned()));
        }

        debug!(names = ?option.get_names(), kind = %option.kind(), "registered option");
        self.options.push(option);
        Ok(())
    }

    /// Declare one single-named option per name, each using only the current defaults.
    ///
    /// Stops at the first failing name; options registered before it stay.
    pub fn add_options(&mut self, names: &[&str]) -> Result<(), OptionErr> {
        for name in names {
            self.add_option([*name], OptionSpec::new())?;
        }
        Ok(())
    }

    /// Change the specification defaults used by later declarations.
    ///
    /// Fields are applied in the order they appear in `spec`. Each one is
    /// checked against the defaults as they stand at that moment: a new
    /// `min` must not exceed the current default `max` or `default_int`, and
    /// a new `domain` must contain the current `default_str`. To replace a
    /// domain together with its default, unset `default_str` first. The
    /// first invalid field aborts the call; fields before it remain applied.
    pub fn set_defaults(&mut self, spec: OptionSpec) -> Result<(), OptionErr> {
        for field in spec.fields() {
            self.defaults.check(field)?;
            debug!(key = %field.key(), value = ?field.value(), "changed specification default");
            self.defaults.apply(field.clone());
        }
        Ok(())
    }

    /// Get the current specification defaults.
    pub fn get_defaults(&self) -> &SpecDefaults {
        &self.defaults
    }

    /// Declare options from a JSON array of objects.
    ///
    /// Each object has `names` (a string or an array of strings) and any
    /// specification keys, for example
    /// `[{"names": ["l", "level"], "type": "integer", "min": 0, "max": 9}]`.
    /// Declarations are added in document order; the first failure stops
    /// loading.
    pub fn load_json(&mut self, json: &str) -> Result<(), OptionErr> {
        let declarations: Vec<Declaration> = serde_json::from_str(json)?;
        for declaration in declarations {
            let spec = OptionSpec::from_json_map(&declaration.spec)?;
            match declaration.names {
                Names::One(name) => self.add_option([name], spec)?,
                Names::Many(names) => self.add_option(names, spec)?,
            }
        }
        Ok(())
    }

    /// Find the option owning `name`.
    pub fn fetch_by_name(&self, name: &str) -> Option<&ArgOption> {
        self.options.iter().find(|o| o.has_name(name))
    }

    pub(crate) fn position_by_name(&self, name: &str) -> Option<usize> {
        self.options.iter().position(|o| o.has_name(name))
    }

    /// Get all options in registration order.
    pub fn get_options(&self) -> &[ArgOption] {
        &self.options
    }

    pub(crate) fn get_options_mut(&mut self) -> &mut [ArgOption] {
        &mut self.options
    }

    /// Get the non-option arguments left over by the most recent parse.
    pub fn get_non_options(&self) -> &[String] {
        &self.non_options
    }

    pub(crate) fn set_non_options(&mut self, non_options: Vec<String>) {
        self.non_options = non_options;
    }
}

impl Display for Options {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut buf = String::from("[ Options: ");
        self.options.iter().for_each(|option| {
            buf.push_str(&option.to_string());
        });
        buf.push_str(" ]");

        write!(f, "{}", buf)
    }
}

#[cfg(test)]
mod test {
    use crate::error::OptionErr;
    use crate::option::ArgOption;
    use crate::options::Options;
    use crate::spec::{OptionSpec, OptionType, SpecField, SpecKey};

    #[test]
    fn test_add_option_duplicate_name() {
        let mut options = Options::new();
        options.add_option(["a"], OptionSpec::new()).unwrap();
        assert!(matches!(options.add_option(["a"], OptionSpec::new()),
                         Err(OptionErr::DuplicateName(ref n)) if n == "a"));
        assert!(matches!(options.add_option(["b", "a"], OptionSpec::new()),
                         Err(OptionErr::DuplicateName(ref n)) if n == "a"));
        assert_eq!(1, options.get_options().len());
        assert!(options.fetch_by_name("b").is_none());
    }

    #[test]
    fn test_failed_add_leaves_registry_untouched() {
        let mut options = Options::new();
        let spec = OptionSpec::new().kind(OptionType::Integer).min(-1).max(1).default_int(5);
        assert!(options.add_option(["p"], spec).is_err());
        assert!(options.get_options().is_empty());
        assert!(options.add_option(["p"], OptionSpec::new()).is_ok());
    }

    #[test]
    fn test_fetch_by_any_name() {
        let mut options = Options::new();
        options.add_option(["b", "b-boolean"], OptionSpec::new()).unwrap();
        options.add_option(["c"], OptionSpec::new()).unwrap();

        let by_short = options.fetch_by_name("b").unwrap() as *const ArgOption;
        let by_long = options.fetch_by_name("b-boolean").unwrap() as *const ArgOption;
        assert_eq!(by_short, by_long);
        assert_eq!(&options.get_options()[0] as *const ArgOption, by_short);
        assert!(options.fetch_by_name("d").is_none());
    }

    #[test]
    fn test_add_options_uses_defaults() {
        let mut options = Options::new();
        options.add_options(&["u", "v", "w"]).unwrap();
        options.set_defaults(OptionSpec::new().kind(OptionType::Integer).default_int(0)).unwrap();
        options.add_options(&["i", "j", "k"]).unwrap();

        let kinds: Vec<OptionType> = options.get_options().iter().map(|o| o.kind()).collect();
        assert_eq!(vec![OptionType::Boolean; 3], kinds[..3]);
        assert_eq!(vec![OptionType::Integer; 3], kinds[3..]);
        assert!(options.add_options(&["x", "i", "y"]).is_err());
        assert!(options.fetch_by_name("x").is_some());
        assert!(options.fetch_by_name("y").is_none());
    }

    #[test]
    fn test_set_defaults_applies_in_order() {
        let mut options = Options::new();
        options.set_defaults(OptionSpec::new().min(0).max(10)).unwrap();

        let err = options.set_defaults(OptionSpec::new().help("RTFM").min(20).max(30)).unwrap_err();
        assert!(matches!(err, OptionErr::InvalidSpecification { key: SpecKey::Min, .. }));
        assert_eq!(Some("RTFM"), options.get_defaults().help.as_deref());
        assert_eq!(Some(0), options.get_defaults().min);
        assert_eq!(Some(10), options.get_defaults().max);

        options.set_defaults(OptionSpec::new().max(30).min(20)).unwrap();
        assert_eq!(Some(20), options.get_defaults().min);
        assert_eq!(Some(30), options.get_defaults().max);
    }

    #[test]
    fn test_set_defaults_cross_field() {
        let mut options = Options::new();
        options.set_defaults(OptionSpec::new().min(0).max(10).domain(["foo", "bar"])).unwrap();
        assert!(options.set_defaults(OptionSpec::new().max(-10)).is_err());
        assert!(options.set_defaults(OptionSpec::new().default_int(999)).is_err());
        assert!(options.set_defaults(OptionSpec::new().default_str("baz")).is_err());
        assert!(options.set_defaults(OptionSpec::new().domain(["foo", "foo"])).is_err());
        assert!(options.set_defaults(OptionSpec::new().default_str("bar")).is_ok());
        assert!(options.set_defaults(OptionSpec::new().field(SpecField::Max(None)).min(20)).is_ok());
    }

    #[test]
    fn test_defaults_are_inherited_and_overridden() {
        let mut options = Options::new();
        options.set_defaults(OptionSpec::new()
            .kind(OptionType::String)
            .mandatory(true)
            .help("RTFM")).unwrap();
        options.add_option(["s"], OptionSpec::new().field(SpecField::Help(None))).unwrap();

        let opt = options.fetch_by_name("s").unwrap();
        assert_eq!(OptionType::String, opt.kind());
        assert!(opt.is_mandatory());
        assert_eq!(None, opt.get_help());
    }

    #[test]
    fn test_load_json() {
        let mut options = Options::new();
        options.load_json(r#"[
            {"names": "v", "help": "verbose"},
            {"names": ["l", "level"], "type": "integer", "min": 0, "max": 9, "default_int": 6},
            {"names": ["f", "format"], "type": "string", "domain": ["json", "text"], "mandatory": true}
        ]"#).unwrap();

        assert_eq!(3, options.get_options().len());
        assert_eq!(Some("verbose"), options.fetch_by_name("v").unwrap().get_help());
        assert_eq!(OptionType::Integer, options.fetch_by_name("level").unwrap().kind());
        assert!(options.fetch_by_name("format").unwrap().is_mandatory());
    }

    #[test]
    fn test_load_json_errors() {
        let mut options = Options::new();
        assert!(matches!(options.load_json(r#"[{"names": "v", "colour": "red"}]"#),
                         Err(OptionErr::UnknownKeyword(_))));
        assert!(matches!(options.load_json(r#"[{"names": "e", "bind": ["bind"]}]"#),
                         Err(OptionErr::InvalidSpecification { key: SpecKey::Bind, .. })));
        assert!(matches!(options.load_json(r#"[{"help": "no names"}]"#), Err(OptionErr::Json(_))));
        assert!(matches!(options.load_json(r#"[{"names": [0, 1, 2]}]"#), Err(OptionErr::Json(_))));
        assert!(options.get_options().is_empty());
    }
}
