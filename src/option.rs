use std::fmt::{Display, Formatter};
use std::num::IntErrorKind;

use serde::Serialize;

use crate::error::{OptionErr, ParseErr};
use crate::spec::{OptionType, SpecDefaults, SpecKey};
use crate::validate::SpecValidator;

/// A resolved option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        if let Value::Bool(b) = self { Some(*b) } else { None }
    }

    pub fn as_int(&self) -> Option<i64> {
        if let Value::Int(i) = self { Some(*i) } else { None }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Value::Str(s) = self { Some(s) } else { None }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(b) => Display::fmt(b, f),
            Value::Int(i) => Display::fmt(i, f),
            Value::Str(s) => Display::fmt(s, f),
        }
    }
}

/// Fields every option kind shares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionCommon {
    names: Vec<String>,
    mandatory: bool,
    help: Option<String>,
    bind: Option<String>,
}

impl OptionCommon {
    fn new(names: Vec<String>, spec: &SpecDefaults) -> Result<OptionCommon, OptionErr> {
        if names.is_empty() || !SpecValidator::names_ok(&names) {
            return Err(OptionErr::invalid(SpecKey::Names, names));
        }
        if let Some(bind) = spec.bind.as_deref() {
            if !SpecValidator::bind_target_ok(bind) {
                return Err(OptionErr::invalid(SpecKey::Bind, bind));
            }
        }
        Ok(OptionCommon {
            names,
            mandatory: spec.mandatory,
            help: spec.help.clone(),
            bind: spec.bind.clone(),
        })
    }
}

/// A switch whose presence alone sets its value to `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanOption {
    common: OptionCommon,
    value: Option<bool>,
}

/// An option taking an integer argument, optionally bounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerOption {
    common: OptionCommon,
    min: Option<i64>,
    max: Option<i64>,
    default: Option<i64>,
    value: Option<i64>,
}

impl IntegerOption {
    pub fn get_min(&self) -> Option<i64> {
        self.min
    }

    pub fn get_max(&self) -> Option<i64> {
        self.max
    }

    pub fn get_default(&self) -> Option<i64> {
        self.default
    }

    fn set_value(&mut self, value: &str) -> Result<(), ParseErr> {
        let option = self.common.names[0].to_owned();
        let value: i64 = match value.parse::<i64>() {
            Ok(value) => value,
            // a literal past the i64 range lies past the bound on that side
            Err(err) if *err.kind() == IntErrorKind::PosOverflow && self.max.is_some() => {
                return Err(ParseErr::ValueOutOfRange { option, value: i64::MAX });
            }
            Err(err) if *err.kind() == IntErrorKind::NegOverflow && self.min.is_some() => {
                return Err(ParseErr::ValueOutOfRange { option, value: i64::MIN });
            }
            Err(_) => return Err(ParseErr::InvalidInteger { option, value: value.to_string() }),
        };
        if self.min.is_some_and(|min| value < min) || self.max.is_some_and(|max| max < value) {
            return Err(ParseErr::ValueOutOfRange { option, value });
        }
        self.value = Some(value);
        Ok(())
    }
}

/// An option taking a string argument, optionally restricted to a domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringOption {
    common: OptionCommon,
    domain: Option<Vec<String>>,
    default: Option<String>,
    value: Option<String>,
}

impl StringOption {
    pub fn get_domain(&self) -> Option<&[String]> {
        self.domain.as_deref()
    }

    pub fn get_default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    fn set_value(&mut self, value: &str) -> Result<(), ParseErr> {
        if let Some(domain) = &self.domain {
            if !domain.iter().any(|item| item == value) {
                return Err(ParseErr::ValueNotInDomain {
                    option: self.common.names[0].to_owned(),
                    value: value.to_string(),
                });
            }
        }
        self.value = Some(value.to_string());
        Ok(())
    }
}

/// A registered option.
///
/// The variant is chosen by the `type` of the resolved specification;
/// the capability set (`can_have_value`, `must_have_value`, `set_value`,
/// `get_value`) dispatches on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgOption {
    Boolean(BooleanOption),
    Integer(IntegerOption),
    String(StringOption),
}

impl ArgOption {
    /// Build an option from a fully resolved specification.
    ///
    /// The whole specification is validated before the option exists, so
    /// an error never leaves a partially configured option behind.
    ///
    /// # Error
    ///
    /// Returns [`OptionErr::InvalidSpecification`] naming the first field that fails.
    pub fn new(names: Vec<String>, spec: &SpecDefaults) -> Result<ArgOption, OptionErr> {
        let common = OptionCommon::new(names, spec)?;

        let option = match spec.kind {
            OptionType::Boolean => ArgOption::Boolean(BooleanOption { common, value: None }),
            OptionType::Integer => {
                if !SpecValidator::bounds_ok(spec.min, spec.max) {
                    return Err(OptionErr::invalid(SpecKey::Min, (spec.min, spec.max)));
                }
                if !SpecValidator::int_default_ok(spec.default_int, spec.min, spec.max) {
                    return Err(OptionErr::invalid(SpecKey::DefaultInt, spec.default_int));
                }
                ArgOption::Integer(IntegerOption {
                    common,
                    min: spec.min,
                    max: spec.max,
                    default: spec.default_int,
                    value: None,
                })
            }
            OptionType::String => {
                if !SpecValidator::domain_ok(spec.domain.as_deref()) {
                    return Err(OptionErr::invalid(SpecKey::Domain, &spec.domain));
                }
                if !SpecValidator::str_default_ok(spec.default_str.as_deref(), spec.domain.as_deref()) {
                    return Err(OptionErr::invalid(SpecKey::DefaultStr, &spec.default_str));
                }
                ArgOption::String(StringOption {
                    common,
                    domain: spec.domain.clone(),
                    default: spec.default_str.clone(),
                    value: None,
                })
            }
        };
        Ok(option)
    }

    fn common(&self) -> &OptionCommon {
        match self {
            ArgOption::Boolean(opt) => &opt.common,
            ArgOption::Integer(opt) => &opt.common,
            ArgOption::String(opt) => &opt.common,
        }
    }

    pub fn kind(&self) -> OptionType {
        match self {
            ArgOption::Boolean(_) => OptionType::Boolean,
            ArgOption::Integer(_) => OptionType::Integer,
            ArgOption::String(_) => OptionType::String,
        }
    }

    pub fn get_names(&self) -> &[String] {
        &self.common().names
    }

    /// The first declared name, used in error messages.
    pub fn get_key(&self) -> &str {
        &self.common().names[0]
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.common().names.iter().any(|n| n == name)
    }

    pub fn is_mandatory(&self) -> bool {
        self.common().mandatory
    }

    pub fn get_help(&self) -> Option<&str> {
        self.common().help.as_deref()
    }

    pub fn get_bind(&self) -> Option<&str> {
        self.common().bind.as_deref()
    }

    /// Check whether the option accepts an argument.
    pub fn can_have_value(&self) -> bool {
        !matches!(self, ArgOption::Boolean(_))
    }

    /// Check whether the option requires an argument, i.e. it accepts one and has no default.
    pub fn must_have_value(&self) -> bool {
        match self {
            ArgOption::Boolean(_) => false,
            ArgOption::Integer(opt) => opt.default.is_none(),
            ArgOption::String(opt) => opt.default.is_none(),
        }
    }

    /// Record that the option appeared on the command line.
    pub fn set_present(&mut self) {
        if let ArgOption::Boolean(opt) = self {
            opt.value = Some(true);
        }
    }

    /// Coerce and validate `value`, then store it.
    ///
    /// # Error
    ///
    /// [`ParseErr::InvalidInteger`] or [`ParseErr::ValueOutOfRange`] for integer options,
    /// [`ParseErr::ValueNotInDomain`] for string options.
    pub fn set_value(&mut self, value: &str) -> Result<(), ParseErr> {
        match self {
            ArgOption::Boolean(opt) => {
                opt.value = Some(true);
                Ok(())
            }
            ArgOption::Integer(opt) => opt.set_value(value),
            ArgOption::String(opt) => opt.set_value(value),
        }
    }

    /// The explicit value if one was parsed, otherwise the default.
    ///
    /// A boolean option that was not given has no value at all, never `false`.
    pub fn get_value(&self) -> Option<Value> {
        match self {
            ArgOption::Boolean(opt) => opt.value.map(Value::Bool),
            ArgOption::Integer(opt) => opt.value.or(opt.default).map(Value::Int),
            ArgOption::String(opt) => opt.value.as_ref().or(opt.default.as_ref()).cloned().map(Value::Str),
        }
    }

    pub fn clear_value(&mut self) {
        match self {
            ArgOption::Boolean(opt) => opt.value = None,
            ArgOption::Integer(opt) => opt.value = None,
            ArgOption::String(opt) => opt.value = None,
        }
    }
}

impl Display for ArgOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut buf = String::from("[ option: ");
        buf.push_str(&self.get_names().join(" "));
        buf.push_str(" ");
        buf.push_str(&self.kind().to_string());
        if self.is_mandatory() {
            buf.push_str(" mandatory");
        }
        buf.push_str(" :: ");
        buf.push_str(self.get_help().unwrap_or("None"));
        buf.push_str(" ]");

        write!(f, "{}", buf)
    }
}
