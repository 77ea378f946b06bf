//! # The ArgMan Library
//!
//! The ArgMan library provides an API for declaring typed command line
//! options and parsing arguments against them. It also able to print a
//! help message listing the declared options and their constraints.
//!
//! ArgMan supports three types of options:
//!
//! - Boolean options, which never take an argument, for example `-v` or `--verbose`
//! - Integer options, optionally bounded by `[min, max]`, for example `-l 5` or `--level=5`
//! - String options, optionally restricted to a domain, for example `--format json`
//!
//! Short options can be clustered, so `-xvf` is read as `-x -v -f`.
//! Scanning stops at the first token which is not an option; that token and
//! everything after it are the non-option arguments.
//!
//! A typical help message displayed by ArgMan looks like this:
//!
//! ```txt
//! usage: pack [options] <file>
//!     -v, --verbose        print verbosely
//!     -l, --level=INT      compression level
//!                          INT is from interval [ 0, 9 ]
//!                          INT is not mandatory -- default value is 6
//!     -f, --format=STR     option is mandatory
//!                          STR is from domain { tar, zip }
//!                          STR is mandatory
//! ```
//!
//! # Examples
//!
//! A simple example.
//!
//! ```
//! use argman::{DefaultParser, OptionSpec, OptionType, Options, Parser};
//!
//! let mut options = Options::new();
//! options.add_option(["v", "verbose"], OptionSpec::new().help("print verbosely")).unwrap();
//! options.add_option(["l", "level"], OptionSpec::new()
//!                     .kind(OptionType::Integer)
//!                     .min(0)
//!                     .max(9)
//!                     .default_int(6)
//!                     .help("compression level")).unwrap();
//! options.add_option(["f", "format"], OptionSpec::new()
//!                     .kind(OptionType::String)
//!                     .mandatory(true)
//!                     .domain(["tar", "zip"])).unwrap();
//!
//! let mut parser = DefaultParser::builder().build();
//! let cmd = parser.parse_args(&mut options, &["-vl", "--format=zip", "a.txt"]).unwrap();
//!
//! assert!(cmd.get_flag("verbose"));
//! assert_eq!(Some(6), cmd.get_int("level"));
//! assert_eq!(Some("zip"), cmd.get_str("f"));
//! assert_eq!(vec!["a.txt"], cmd.get_arg_list());
//! ```
//!
//! Declarations can also be loaded from JSON, and values delivered to
//! host-side targets through a [`Binder`].
//!
//! ```
//! use argman::{BoundValues, DefaultParser, HelpFormatter, Options, Parser, Value};
//!
//! let mut options = Options::new();
//! options.load_json(r#"[
//!     {"names": ["o", "output"], "type": "string", "default_str": "-", "bind": "output"},
//!     {"names": "q", "help": "be quiet", "bind": "quiet"}
//! ]"#).unwrap();
//!
//! let mut bound = BoundValues::new();
//! let mut parser = DefaultParser::builder().build();
//! let cmd = parser.parse_and_bind(&mut options, &["-o", "out.bin"], &mut bound).unwrap();
//!
//! assert_eq!(Some(&Value::Str("out.bin".to_string())), bound.get("output"));
//! assert_eq!(None, bound.get("quiet"));
//! assert!(!cmd.has_option("q"));
//!
//! let help = HelpFormatter::new("tool [options]").render_help(&options);
//! assert!(help.contains("STR is not mandatory -- default value is -"));
//! ```

pub use bind::{Binder, BoundValues};
pub use cmd::CommandLine;
pub use error::{OptionErr, ParseErr};
pub use format::{HelpEntry, HelpFormatter};
pub use option::{ArgOption, BooleanOption, IntegerOption, StringOption, Value};
pub use options::Options;
pub use parser::{ClusterRemainder, DefaultParser, Parser, ParserBuilder};
pub use spec::{OptionSpec, OptionType, SpecDefaults, SpecField, SpecKey};
pub use validate::SpecValidator;

pub mod token;

mod bind;
mod cmd;
mod error;
mod format;
mod option;
mod options;
mod parser;
mod spec;
mod validate;
