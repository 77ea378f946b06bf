use thiserror::Error;

use crate::spec::SpecKey;

/// Error raised while declaring options or changing specification defaults.
///
/// Declaration errors never leave a half-built option behind: the registry
/// is unchanged when any of these is returned from [`Options::add_option`].
///
/// [`Options::add_option`]: crate::Options::add_option
#[derive(Debug, Error)]
pub enum OptionErr {
    /// A specification field holds a malformed or out-of-domain value.
    #[error("invalid {key}: {value}")]
    InvalidSpecification {
        key: SpecKey,
        value: String,
    },

    /// A specification keyword is not one of the recognized keys.
    #[error("invalid option specification keyword: {0}")]
    UnknownKeyword(String),

    /// The name is already owned by a registered option.
    #[error("option name already registered: {0}")]
    DuplicateName(String),

    /// A declaration document is not well-formed JSON of the expected shape.
    #[error("malformed option declarations: {0}")]
    Json(#[from] serde_json::Error),
}

impl OptionErr {
    pub(crate) fn invalid<T: std::fmt::Debug>(key: SpecKey, value: T) -> OptionErr {
        OptionErr::InvalidSpecification {
            key,
            value: format!("{:?}", value),
        }
    }
}

/// Argument parsing error.
///
/// Every variant aborts the whole parse; no partial result is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErr {
    /// A token has option syntax but no registered option owns the name.
    #[error("unknown option given: {0}")]
    UnknownOption(String),

    /// An option that requires an argument was given without one.
    #[error("mandatory option argument not given: {0}")]
    MissingArgument(String),

    /// An integer value lies outside the option's bounds.
    ///
    /// A literal beyond the `i64` range is reported as `i64::MAX` or `i64::MIN`.
    #[error("integer value out of range for option '{option}': {value}")]
    ValueOutOfRange {
        option: String,
        value: i64,
    },

    /// A string value is not a member of the option's domain.
    #[error("string value not from domain for option '{option}': {value}")]
    ValueNotInDomain {
        option: String,
        value: String,
    },

    /// The argument of an integer option is not an integer.
    #[error("invalid integer value for option '{option}': {value}")]
    InvalidInteger {
        option: String,
        value: String,
    },

    /// A mandatory option received no value, neither explicit nor default.
    #[error("mandatory option not given: {0}")]
    MissingOption(String),

    /// A short option cluster carries trailing content that is not an option letter.
    ///
    /// Only raised when the parser is built with [`ClusterRemainder::Reject`].
    ///
    /// [`ClusterRemainder::Reject`]: crate::ClusterRemainder::Reject
    #[error("malformed short option cluster: {0}")]
    MalformedCluster(String),
}
