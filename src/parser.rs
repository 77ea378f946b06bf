use std::collections::{HashMap, VecDeque};
use std::env;
use std::io::stdout;
use std::process::exit;

use tracing::{debug, trace};

use crate::bind::Binder;
use crate::cmd::CommandLine;
use crate::error::ParseErr;
use crate::format::HelpFormatter;
use crate::options::Options;
use crate::token::{self, OptionMatch};

/// The parser trait to parse command line arguments.
pub trait Parser {

    /// Parse arguments from `env::args()`, without the program name, against `options`.
    ///
    /// # Error
    ///
    /// If the arguments don't meet the requirement of `options`,
    /// [`ParseErr`] is returned.
    ///
    /// Also see [`Self::parse_args`], [`Self::parse_or_exit`]
    fn parse(&mut self, options: &mut Options) -> Result<CommandLine, ParseErr>;

    /// Parse arguments from `env::args()`, without the program name, against `options`.
    ///
    /// # Error
    ///
    /// If the arguments don't meet the requirement of `options`,
    /// error message and option help will be print before exit.
    ///
    /// Also see [`Self::parse_args`], [`Self::parse`]
    fn parse_or_exit(&mut self, options: &mut Options, formatter: &HelpFormatter) -> CommandLine;

    /// Parse `arguments` against `options`.
    ///
    /// The values stored in `options` are reset first, then overwritten by
    /// this parse; the non-option arguments are also kept in `options`.
    ///
    /// Also see [`Self::parse_and_bind`]
    fn parse_args<T: AsRef<str>>(&mut self, options: &mut Options, arguments: &[T]) -> Result<CommandLine, ParseErr>;

    /// Parse `arguments` against `options`, then deliver the value of every
    /// given option that has a bind target to `binder`.
    ///
    /// Nothing is delivered when parsing fails.
    fn parse_and_bind<T: AsRef<str>>(&mut self, options: &mut Options, arguments: &[T],
                                     binder: &mut dyn Binder) -> Result<CommandLine, ParseErr>;
}

/// What to do with content trailing the option letters of a short option
/// cluster, such as the `=5` of `-ab=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClusterRemainder {
    /// Silently drop it: `-ab=5` is read as `-a -b`.
    #[default]
    Drop,
    /// Fail with [`ParseErr::MalformedCluster`].
    Reject,
}

/// The default implementation of [`Parser`] trait.
///
/// Options are read from the front of the arguments until the first token
/// that is not an option; that token and everything after it are
/// non-option arguments.
///
/// # Examples
///
/// ```
/// use argman::{DefaultParser, OptionSpec, OptionType, Options, Parser};
///
/// let mut options = Options::new();
/// options.add_options(&["a", "b"]).unwrap();
/// options.add_option(["t", "type"], OptionSpec::new()
///     .kind(OptionType::String)
///     .domain(["foo", "bar"])).unwrap();
///
/// let mut parser = DefaultParser::builder().build();
/// let cmd = parser.parse_args(&mut options, &["-ab", "--type=foo", "x", "-c"]).unwrap();
/// assert!(cmd.get_flag("a"));
/// assert!(cmd.get_flag("b"));
/// assert_eq!(Some("foo"), cmd.get_str("t"));
/// assert_eq!(vec!["x", "-c"], cmd.get_arg_list());
/// ```
pub struct DefaultParser {
    cluster_remainder: ClusterRemainder,
}

/// A builder struct to create [`DefaultParser`].
pub struct ParserBuilder {
    cluster_remainder: ClusterRemainder,
}

impl ParserBuilder {
    pub fn build(self) -> DefaultParser {
        DefaultParser {
            cluster_remainder: self.cluster_remainder,
        }
    }

    /// Set how trailing content of a short option cluster is handled.
    pub fn cluster_remainder(mut self, cluster_remainder: ClusterRemainder) -> Self {
        self.cluster_remainder = cluster_remainder;
        self
    }
}

impl DefaultParser {

    /// Get the builder to config parser.
    pub fn builder() -> ParserBuilder {
        ParserBuilder {
            cluster_remainder: ClusterRemainder::Drop,
        }
    }

    fn check_clusters<T: AsRef<str>>(&self, arguments: &[T]) -> Result<(), ParseErr> {
        if self.cluster_remainder == ClusterRemainder::Drop {
            return Ok(());
        }
        for argument in arguments {
            let argument = argument.as_ref();
            if token::is_short_cluster_token(argument) && !token::expand_cluster(argument).1.is_empty() {
                return Err(ParseErr::MalformedCluster(argument.to_string()));
            }
        }
        Ok(())
    }

    fn check_mandatory_options(&self, options: &Options) -> Result<(), ParseErr> {
        for option in options.get_options() {
            if option.is_mandatory() && option.get_value().is_none() {
                return Err(ParseErr::MissingOption(option.get_key().to_string()));
            }
        }
        Ok(())
    }

    /// Apply one matched option token, taking its argument from `tokens` if needed.
    ///
    /// Returns the index of the option in the registry.
    fn handle_option(&self, options: &mut Options, token: &str, matched: OptionMatch,
                     tokens: &mut VecDeque<String>) -> Result<usize, ParseErr> {
        let index = options.position_by_name(&matched.name)
            .ok_or_else(|| ParseErr::UnknownOption(token.to_string()))?;
        let option = &mut options.get_options_mut()[index];
        trace!(token, option = option.get_key(), "matched option");

        option.set_present();
        if !option.can_have_value() {
            return Ok(index);
        }

        let value = match matched.inline_value {
            Some(value) => Some(value),
            None if Self::is_argument(tokens.front()) => tokens.pop_front(),
            None => None,
        };
        match value {
            Some(value) => option.set_value(&value)?,
            None if option.must_have_value() => return Err(ParseErr::MissingArgument(token.to_string())),
            None => {}
        }
        Ok(index)
    }

    fn is_argument(token: Option<&String>) -> bool {
        token.is_some_and(|t| token::match_option(t).is_none())
    }

    fn run<T: AsRef<str>>(&self, options: &mut Options, arguments: &[T])
                          -> Result<(CommandLine, Vec<usize>), ParseErr> {
        for option in options.get_options_mut() {
            option.clear_value();
        }

        self.check_clusters(arguments)?;
        let mut tokens: VecDeque<String> = token::expand_clusters(arguments).into();

        let mut present = vec![];
        while let Some(matched) = tokens.front().and_then(|t| token::match_option(t)) {
            let Some(token) = tokens.pop_front() else { break };
            let index = self.handle_option(options, &token, matched, &mut tokens)?;
            if !present.contains(&index) {
                present.push(index);
            }
        }

        let non_options: Vec<String> = tokens.into();
        options.set_non_options(non_options.clone());

        self.check_mandatory_options(options)?;

        let mut values = HashMap::new();
        for &index in &present {
            let option = &options.get_options()[index];
            if let Some(value) = option.get_value() {
                for name in option.get_names() {
                    values.insert(name.to_owned(), value.clone());
                }
            }
        }

        debug!(options = present.len(), non_options = non_options.len(), "parsed arguments");
        Ok((CommandLine::new(values, non_options), present))
    }
}

impl Parser for DefaultParser {
    fn parse(&mut self, options: &mut Options) -> Result<CommandLine, ParseErr> {
        self.parse_args(options, &env::args().skip(1).collect::<Vec<String>>())
    }

    fn parse_or_exit(&mut self, options: &mut Options, formatter: &HelpFormatter) -> CommandLine {
        match self.parse(options) {
            Ok(cmd) => cmd,
            Err(err) => {
                let mut error = String::new();
                formatter.render_wrapped_text_block(&mut error, 0, &format!("parse error, {}", err));
                eprintln!("{}", error);
                println!("{}", "-".repeat(formatter.get_width()));
                let _ = formatter.print_help(&mut stdout(), options);
                exit(1);
            }
        }
    }

    fn parse_args<T: AsRef<str>>(&mut self, options: &mut Options, arguments: &[T]) -> Result<CommandLine, ParseErr> {
        self.run(options, arguments).map(|(cmd, _)| cmd)
    }

    fn parse_and_bind<T: AsRef<str>>(&mut self, options: &mut Options, arguments: &[T],
                                     binder: &mut dyn Binder) -> Result<CommandLine, ParseErr> {
        let (cmd, mut present) = self.run(options, arguments)?;
        present.sort_unstable();
        for index in present {
            let option = &options.get_options()[index];
            if let (Some(target), Some(value)) = (option.get_bind(), option.get_value()) {
                binder.bind(target, &value);
            }
        }
        Ok(cmd)
    }
}
