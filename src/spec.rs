use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use serde_json::{Map, Value as JsonValue};

use crate::error::OptionErr;
use crate::validate::SpecValidator;

/// The three option kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionType {
    /// Presence alone sets the value to `true`.
    #[default]
    Boolean,
    /// A bounded integer argument.
    Integer,
    /// A free or enumerated string argument.
    String,
}

impl FromStr for OptionType {
    type Err = OptionErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boolean" => Ok(OptionType::Boolean),
            "integer" => Ok(OptionType::Integer),
            "string" => Ok(OptionType::String),
            _ => Err(OptionErr::invalid(SpecKey::Type, s)),
        }
    }
}

impl Display for OptionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OptionType::Boolean => "boolean",
            OptionType::Integer => "integer",
            OptionType::String => "string",
        })
    }
}

/// Identifies a field of an option declaration, mostly for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecKey {
    Names,
    Type,
    Mandatory,
    Min,
    Max,
    DefaultInt,
    Domain,
    DefaultStr,
    Help,
    Bind,
}

impl Display for SpecKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SpecKey::Names => "names",
            SpecKey::Type => "type",
            SpecKey::Mandatory => "mandatory",
            SpecKey::Min => "min",
            SpecKey::Max => "max",
            SpecKey::DefaultInt => "default_int",
            SpecKey::Domain => "domain",
            SpecKey::DefaultStr => "default_str",
            SpecKey::Help => "help",
            SpecKey::Bind => "bind",
        })
    }
}

/// One `key => value` entry of an [`OptionSpec`].
///
/// Nilable keys carry an `Option`, so "explicitly unset" is different from
/// "not mentioned": `SpecField::Min(None)` removes an inherited lower bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecField {
    Type(OptionType),
    Mandatory(bool),
    Min(Option<i64>),
    Max(Option<i64>),
    DefaultInt(Option<i64>),
    Domain(Option<Vec<String>>),
    DefaultStr(Option<String>),
    Help(Option<String>),
    Bind(Option<String>),
}

impl SpecField {
    pub fn key(&self) -> SpecKey {
        match self {
            SpecField::Type(_) => SpecKey::Type,
            SpecField::Mandatory(_) => SpecKey::Mandatory,
            SpecField::Min(_) => SpecKey::Min,
            SpecField::Max(_) => SpecKey::Max,
            SpecField::DefaultInt(_) => SpecKey::DefaultInt,
            SpecField::Domain(_) => SpecKey::Domain,
            SpecField::DefaultStr(_) => SpecKey::DefaultStr,
            SpecField::Help(_) => SpecKey::Help,
            SpecField::Bind(_) => SpecKey::Bind,
        }
    }

    pub(crate) fn value(&self) -> &dyn Debug {
        match self {
            SpecField::Type(kind) => kind,
            SpecField::Mandatory(mandatory) => mandatory,
            SpecField::Min(bound) | SpecField::Max(bound) | SpecField::DefaultInt(bound) => bound,
            SpecField::Domain(domain) => domain,
            SpecField::DefaultStr(text) | SpecField::Help(text) | SpecField::Bind(text) => text,
        }
    }

    /// Convert one untyped `key: value` pair, e.g. from a JSON declaration.
    ///
    /// # Error
    ///
    /// Returns [`OptionErr::UnknownKeyword`] for a key outside the recognized set
    /// and [`OptionErr::InvalidSpecification`] for a value of the wrong shape.
    pub fn from_json(key: &str, value: &JsonValue) -> Result<SpecField, OptionErr> {
        let field = match key {
            "type" => {
                if !SpecValidator::type_ok(value) {
                    return Err(OptionErr::invalid(SpecKey::Type, value));
                }
                SpecField::Type(value.as_str().unwrap_or_default().parse()?)
            }
            "mandatory" => {
                if !SpecValidator::mandatory_ok(value) {
                    return Err(OptionErr::invalid(SpecKey::Mandatory, value));
                }
                SpecField::Mandatory(value.as_bool().unwrap_or_default())
            }
            "min" => SpecField::Min(json_int(SpecKey::Min, value)?),
            "max" => SpecField::Max(json_int(SpecKey::Max, value)?),
            "default_int" => SpecField::DefaultInt(json_int(SpecKey::DefaultInt, value)?),
            "domain" => SpecField::Domain(json_domain(value)?),
            "default_str" => SpecField::DefaultStr(json_str(SpecKey::DefaultStr, value)?),
            "help" => {
                if !SpecValidator::help_ok(value) {
                    return Err(OptionErr::invalid(SpecKey::Help, value));
                }
                SpecField::Help(value.as_str().map(str::to_owned))
            }
            "bind" => {
                if !SpecValidator::bind_ok(value) {
                    return Err(OptionErr::invalid(SpecKey::Bind, value));
                }
                SpecField::Bind(value.as_str().map(str::to_owned))
            }
            _ => return Err(OptionErr::UnknownKeyword(key.to_string())),
        };
        Ok(field)
    }
}

fn json_int(key: SpecKey, value: &JsonValue) -> Result<Option<i64>, OptionErr> {
    if value.is_null() {
        return Ok(None);
    }
    value.as_i64()
        .map(Some)
        .ok_or_else(|| OptionErr::invalid(key, value))
}

fn json_str(key: SpecKey, value: &JsonValue) -> Result<Option<String>, OptionErr> {
    if value.is_null() {
        return Ok(None);
    }
    value.as_str()
        .map(|s| Some(s.to_owned()))
        .ok_or_else(|| OptionErr::invalid(key, value))
}

fn json_domain(value: &JsonValue) -> Result<Option<Vec<String>>, OptionErr> {
    if value.is_null() {
        return Ok(None);
    }
    let items = value.as_array().ok_or_else(|| OptionErr::invalid(SpecKey::Domain, value))?;
    items.iter()
        .map(|item| item.as_str()
            .map(str::to_owned)
            .ok_or_else(|| OptionErr::invalid(SpecKey::Domain, value)))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// An option specification: an ordered set of [`SpecField`]s.
///
/// Fields missing from a spec are taken from the registry's current
/// [`SpecDefaults`] when an option is added.
///
/// # Examples
///
/// ```
/// use argman::{OptionSpec, OptionType};
///
/// let spec = OptionSpec::new()
///     .kind(OptionType::Integer)
///     .min(0)
///     .max(9)
///     .default_int(0)
///     .help("compression level");
/// assert_eq!(spec.fields().len(), 5);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSpec {
    fields: Vec<SpecField>,
}

impl OptionSpec {
    /// Create an empty spec, meaning "all defaults".
    pub fn new() -> OptionSpec {
        OptionSpec { fields: Vec::new() }
    }

    /// Parse a spec from a JSON object such as `{"type": "integer", "min": 0}`.
    ///
    /// Key order in the document is kept.
    pub fn from_json(json: &str) -> Result<OptionSpec, OptionErr> {
        let map: Map<String, JsonValue> = serde_json::from_str(json)?;
        OptionSpec::from_json_map(&map)
    }

    pub(crate) fn from_json_map(map: &Map<String, JsonValue>) -> Result<OptionSpec, OptionErr> {
        let mut spec = OptionSpec::new();
        for (key, value) in map {
            spec = spec.field(SpecField::from_json(key, value)?);
        }
        Ok(spec)
    }

    /// Set a field. A field with the same key is replaced in place.
    pub fn field(mut self, field: SpecField) -> Self {
        match self.fields.iter().position(|f| f.key() == field.key()) {
            Some(i) => self.fields[i] = field,
            None => self.fields.push(field),
        }
        self
    }

    pub fn kind(self, kind: OptionType) -> Self {
        self.field(SpecField::Type(kind))
    }

    pub fn mandatory(self, mandatory: bool) -> Self {
        self.field(SpecField::Mandatory(mandatory))
    }

    pub fn min(self, min: i64) -> Self {
        self.field(SpecField::Min(Some(min)))
    }

    pub fn max(self, max: i64) -> Self {
        self.field(SpecField::Max(Some(max)))
    }

    pub fn default_int(self, default: i64) -> Self {
        self.field(SpecField::DefaultInt(Some(default)))
    }

    /// Restrict string values to `domain`.
    pub fn domain<I, S>(self, domain: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field(SpecField::Domain(Some(domain.into_iter().map(Into::into).collect())))
    }

    pub fn default_str(self, default: &str) -> Self {
        self.field(SpecField::DefaultStr(Some(default.to_owned())))
    }

    pub fn help(self, help: &str) -> Self {
        self.field(SpecField::Help(Some(help.to_owned())))
    }

    /// Name the external target the resolved value is delivered to.
    ///
    /// See [`Binder`](crate::Binder).
    pub fn bind(self, target: &str) -> Self {
        self.field(SpecField::Bind(Some(target.to_owned())))
    }

    pub fn fields(&self) -> &[SpecField] {
        &self.fields
    }
}

impl From<Vec<SpecField>> for OptionSpec {
    fn from(fields: Vec<SpecField>) -> Self {
        fields.into_iter().fold(OptionSpec::new(), OptionSpec::field)
    }
}

/// A fully resolved specification record.
///
/// The registry keeps one as its "specification defaults"; every new
/// option starts from a copy of it with the caller's [`OptionSpec`] applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecDefaults {
    pub kind: OptionType,
    pub mandatory: bool,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub default_int: Option<i64>,
    pub domain: Option<Vec<String>>,
    pub default_str: Option<String>,
    pub help: Option<String>,
    pub bind: Option<String>,
}

impl SpecDefaults {
    /// Overwrite one field without any validation.
    pub(crate) fn apply(&mut self, field: SpecField) {
        match field {
            SpecField::Type(kind) => self.kind = kind,
            SpecField::Mandatory(mandatory) => self.mandatory = mandatory,
            SpecField::Min(min) => self.min = min,
            SpecField::Max(max) => self.max = max,
            SpecField::DefaultInt(default) => self.default_int = default,
            SpecField::Domain(domain) => self.domain = domain,
            SpecField::DefaultStr(default) => self.default_str = default,
            SpecField::Help(help) => self.help = help,
            SpecField::Bind(bind) => self.bind = bind,
        }
    }

    /// Copy of `self` with every field of `spec` applied over it.
    pub(crate) fn merged(&self, spec: &OptionSpec) -> SpecDefaults {
        let mut merged = self.clone();
        for field in spec.fields() {
            merged.apply(field.clone());
        }
        merged
    }

    /// Check `field` against the other fields currently held.
    pub(crate) fn check(&self, field: &SpecField) -> Result<(), OptionErr> {
        let ok = match field {
            SpecField::Type(_) | SpecField::Mandatory(_) | SpecField::Help(_) | SpecField::Bind(_) => true,
            SpecField::Min(min) => {
                SpecValidator::bounds_ok(*min, self.max)
                    && SpecValidator::int_default_ok(self.default_int, *min, self.max)
            }
            SpecField::Max(max) => {
                SpecValidator::bounds_ok(self.min, *max)
                    && SpecValidator::int_default_ok(self.default_int, self.min, *max)
            }
            SpecField::DefaultInt(default) => SpecValidator::int_default_ok(*default, self.min, self.max),
            SpecField::Domain(domain) => {
                SpecValidator::domain_ok(domain.as_deref())
                    && SpecValidator::str_default_ok(self.default_str.as_deref(), domain.as_deref())
            }
            SpecField::DefaultStr(default) => {
                SpecValidator::str_default_ok(default.as_deref(), self.domain.as_deref())
            }
        };
        if ok {
            Ok(())
        } else {
            Err(OptionErr::invalid(field.key(), field.value()))
        }
    }
}
