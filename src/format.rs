use std::io::{self, Write};

use crate::option::ArgOption;
use crate::options::Options;

const DEFAULT_LINE_SEPARATOR: &str = if cfg!(windows) { "\r\n" } else { "\n" };

const DEFAULT_WIDTH: usize = 74;
const DEFAULT_LEFT_PAD: usize = 4;
const DEFAULT_DESC_PAD: usize = 4;
const DEFAULT_SYNTAX_PREFIX: &str = "usage: ";

/// The help information of one option.
///
/// Every part except `names` is optional; [`HelpEntry::notes`] lists the
/// present ones in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    /// All names, short ones first, e.g. `-l, --level=INT`.
    pub names: String,
    pub mandatory: Option<String>,
    /// The bounds or the domain of the argument.
    pub constraints: Option<String>,
    /// Whether the argument is required, or its default value.
    pub default: Option<String>,
    pub help: Option<String>,
}

impl HelpEntry {
    fn of(option: &ArgOption) -> HelpEntry {
        let (short, long): (Vec<&String>, Vec<&String>) = option.get_names().iter()
            .partition(|name| name.len() == 1);
        let arg = match option {
            ArgOption::Boolean(_) => "",
            ArgOption::Integer(_) => "=INT",
            ArgOption::String(_) => "=STR",
        };
        let names = short.iter().map(|name| format!("-{}", name))
            .chain(long.iter().map(|name| format!("--{}{}", name, arg)))
            .collect::<Vec<String>>()
            .join(", ");

        let (constraints, default) = match option {
            ArgOption::Boolean(_) => (None, None),
            ArgOption::Integer(opt) => {
                let constraints = (opt.get_min().is_some() || opt.get_max().is_some()).then(|| {
                    format!("INT is from interval [ {}, {} ]",
                            opt.get_min().map_or("-inf".to_string(), |min| min.to_string()),
                            opt.get_max().map_or("+inf".to_string(), |max| max.to_string()))
                });
                let default = match opt.get_default() {
                    Some(default) => format!("INT is not mandatory -- default value is {}", default),
                    None => "INT is mandatory".to_string(),
                };
                (constraints, Some(default))
            }
            ArgOption::String(opt) => {
                let constraints = opt.get_domain()
                    .map(|domain| format!("STR is from domain {{ {} }}", domain.join(", ")));
                let default = match opt.get_default() {
                    Some(default) => format!("STR is not mandatory -- default value is {}", default),
                    None => "STR is mandatory".to_string(),
                };
                (constraints, Some(default))
            }
        };

        HelpEntry {
            names,
            mandatory: option.is_mandatory().then(|| "option is mandatory".to_string()),
            constraints,
            default,
            help: option.get_help().map(str::to_owned),
        }
    }

    /// The display lines of the notes column.
    ///
    /// The fields keep the `names, mandatory, constraints, default, help`
    /// order of the entry itself; for display the help text is moved to the
    /// front so it lines up with the option names, and the remaining notes
    /// follow in field order.
    pub fn notes(&self) -> Vec<&str> {
        [&self.help, &self.mandatory, &self.constraints, &self.default].into_iter()
            .filter_map(|note| note.as_deref())
            .collect()
    }
}

/// `HelpFormatter` helps print usage information for the [`Options`].
///
/// The output format is like:
/// ```txt
/// usage: <cmd_syntax>
/// [header]
///     -<opt>, --<long_opt>=INT    <help>
///                                 <notes>
///     -<opt>                      <help>
/// [footer]
/// ```
///
/// # Examples
///
/// ```
/// use argman::{HelpFormatter, OptionSpec, OptionType, Options};
///
/// let mut options = Options::new();
/// options.add_option(["l", "level"], OptionSpec::new()
///     .kind(OptionType::Integer)
///     .min(0)
///     .max(9)
///     .help("compression level")).unwrap();
///
/// let help = HelpFormatter::get_help(&options);
/// assert_eq!("-l, --level=INT", help[0].names);
/// assert_eq!(vec!["compression level", "INT is from interval [ 0, 9 ]", "INT is mandatory"],
///            help[0].notes());
/// ```
pub struct HelpFormatter {
    width: usize,
    left_pad: usize,
    desc_pad: usize,
    syntax_prefix: String,
    newline: String,
    cmd_syntax: String,
    header: Option<String>,
    footer: Option<String>,
}

impl HelpFormatter {
    /// Create a `HelpFormatter` with default configuration.
    ///
    /// The `cmd_syntax` is typically the name of the executable with positional arguments.
    /// For example, `"cp [options] <src> <dst>"`.
    pub fn new(cmd_syntax: &str) -> HelpFormatter {
        HelpFormatter {
            width: DEFAULT_WIDTH,
            left_pad: DEFAULT_LEFT_PAD,
            desc_pad: DEFAULT_DESC_PAD,
            syntax_prefix: DEFAULT_SYNTAX_PREFIX.to_string(),
            newline: DEFAULT_LINE_SEPARATOR.to_string(),
            cmd_syntax: cmd_syntax.to_string(),
            header: None,
            footer: None,
        }
    }

    /// Collect the help entries of all options in registration order.
    pub fn get_help(options: &Options) -> Vec<HelpEntry> {
        options.get_options().iter().map(HelpEntry::of).collect()
    }

    fn create_padding(&self, len: usize) -> String {
        " ".repeat(len)
    }

    fn find_wrap_pos(&self, text: &str, width: usize, start_pos: usize) -> Option<usize> {
        let trunc_text = &text[start_pos..];

        if let Some(pos) = trunc_text.find('\n').filter(|pos| *pos <= width) {
            return Some(pos + start_pos + 1);
        }
        if let Some(pos) = trunc_text.find('\t').filter(|pos| *pos <= width) {
            return Some(pos + start_pos + 1);
        }

        if start_pos + width >= text.len() {
            return None;
        }

        let limit = start_pos + width;
        let blank = text.as_bytes()[start_pos..=limit].iter()
            .rposition(|b| matches!(b, b' ' | b'\r' | b'\n'))
            .map(|pos| pos + start_pos);
        if let Some(pos) = blank.filter(|pos| *pos > start_pos) {
            return Some(pos);
        }

        self.hard_break(text, limit)
    }

    /// The last char boundary in `1..=limit`.
    fn hard_break(&self, text: &str, limit: usize) -> Option<usize> {
        (1..=limit.min(text.len())).rev().find(|&i| text.is_char_boundary(i))
    }

    /// Get the max width of the output message.
    pub fn get_width(&self) -> usize {
        self.width
    }

    /// Get the newline.
    /// For windows, it defaults to `\r\n`.
    /// For other operating system, it defaults to `\n`.
    pub fn get_newline(&self) -> &str {
        &self.newline
    }

    /// Set number of padding space for the notes column.
    pub fn set_desc_padding(&mut self, padding: usize) {
        self.desc_pad = padding;
    }

    /// Set number of padding space before option names.
    pub fn set_left_padding(&mut self, padding: usize) {
        self.left_pad = padding;
    }

    /// Set the newline characters.
    pub fn set_newline(&mut self, newline: &str) {
        self.newline = newline.to_string();
    }

    /// Set the syntax prefix, which defaults to `"usage: "`.
    pub fn set_syntax_prefix(&mut self, prefix: &str) {
        self.syntax_prefix = prefix.to_string();
    }

    /// Set the maximum width of the display message, which defaults to 74.
    pub fn set_width(&mut self, width: usize) {
        self.width = width.max(2);
    }

    /// Set the cmd syntax, for display purpose only.
    pub fn set_cmd_syntax(&mut self, syntax: &str) {
        self.cmd_syntax = syntax.to_string();
    }

    /// Set header message.
    pub fn set_header(&mut self, header: &str) {
        self.header = Some(header.to_string());
    }

    /// Set footer message.
    pub fn set_footer(&mut self, footer: &str) {
        self.footer = Some(footer.to_string());
    }

    /// Print help message of the [`Options`] to the `out` sink.
    ///
    /// # Example
    ///
    /// ```
    /// use std::io::stderr;
    /// use argman::{HelpFormatter, Options};
    /// HelpFormatter::new("ls").print_help(&mut stderr(), &Options::new()).unwrap();
    /// ```
    pub fn print_help<T: Write>(&self, out: &mut T, options: &Options) -> io::Result<()> {
        write!(out, "{}", self.render_help(options))
    }

    /// Render the whole help message: usage, header, options and footer.
    pub fn render_help(&self, options: &Options) -> String {
        let mut buff = String::new();

        let arg_pos = self.cmd_syntax.find(' ').map(|x| x + 1).unwrap_or(0);
        self.render_wrapped_text(&mut buff, self.syntax_prefix.len() + arg_pos,
                                 &format!("{}{}", self.syntax_prefix, self.cmd_syntax));
        buff.push_str(&self.newline);

        if let Some(header) = self.header.as_ref().filter(|h| !h.is_empty()) {
            self.render_wrapped_text_block(&mut buff, 0, header);
            buff.push_str(&self.newline);
        }

        let entries = Self::get_help(options);
        if !entries.is_empty() {
            self.render_entries(&mut buff, &entries);
            buff.push_str(&self.newline);
        }

        if let Some(footer) = self.footer.as_ref().filter(|f| !f.is_empty()) {
            self.render_wrapped_text_block(&mut buff, 0, footer);
            buff.push_str(&self.newline);
        }
        buff
    }

    fn render_entries(&self, buff: &mut String, entries: &[HelpEntry]) {
        let left_pad = self.create_padding(self.left_pad);
        let desc_pad = self.create_padding(self.desc_pad);

        let prefix_list: Vec<String> = entries.iter()
            .map(|entry| format!("{}{}", left_pad, entry.names))
            .collect();
        let max = prefix_list.iter().map(|p| p.len()).max().unwrap_or(0);
        let next_line_tab_stop = max + self.desc_pad;
        let note_pad = self.create_padding(next_line_tab_stop);

        for (i, (entry, prefix)) in entries.iter().zip(prefix_list).enumerate() {
            let mut notes = entry.notes().into_iter();

            let mut opt_buff = prefix;
            if let Some(first) = notes.next() {
                opt_buff.push_str(&self.create_padding(max - opt_buff.len()));
                opt_buff.push_str(&desc_pad);
                opt_buff.push_str(first);
            }
            self.render_wrapped_text(buff, next_line_tab_stop, &opt_buff);

            for note in notes {
                buff.push_str(&self.newline);
                self.render_wrapped_text(buff, next_line_tab_stop, &format!("{}{}", note_pad, note));
            }

            if i != entries.len() - 1 {
                buff.push_str(&self.newline);
            }
        }
    }

    fn render_wrapped_text(&self, buff: &mut String, mut next_line_tab_stop: usize, text: &str) {
        let Some(mut pos) = self.find_wrap_pos(text, self.width, 0) else {
            buff.push_str(text.trim_end());
            return;
        };
        buff.push_str(text[..pos].trim_end());
        buff.push_str(&self.newline);

        if next_line_tab_stop >= self.width || next_line_tab_stop == 0 {
            next_line_tab_stop = 1;
        }

        let mut processing_text = text.to_string();
        let padding = self.create_padding(next_line_tab_stop);
        loop {
            processing_text = format!("{}{}", &padding, processing_text[pos..].trim());
            let Some(found) = self.find_wrap_pos(&processing_text, self.width, 0) else {
                buff.push_str(&processing_text);
                return;
            };

            pos = if processing_text.len() > self.width && found == next_line_tab_stop - 1 {
                self.hard_break(&processing_text, self.width).unwrap_or(processing_text.len())
            } else {
                found
            };

            // at least one char past the padding per line
            if pos <= next_line_tab_stop {
                pos = processing_text[next_line_tab_stop..].char_indices().nth(1)
                    .map_or(processing_text.len(), |(i, _)| next_line_tab_stop + i);
            }
            if pos >= processing_text.len() {
                buff.push_str(&processing_text);
                return;
            }

            buff.push_str(processing_text[..pos].trim_end());
            buff.push_str(&self.newline);
        }
    }

    /// Render a wrapped text block to the `buffer` with the max `width` configured.
    /// When text is wrapped, `next_line_tab_stop` number of space is appended.
    pub fn render_wrapped_text_block(&self, buffer: &mut String, next_line_tab_stop: usize, text: &str) {
        for (i, line) in text.lines().enumerate() {
            if i != 0 {
                buffer.push_str(&self.newline);
            }
            self.render_wrapped_text(buffer, next_line_tab_stop, line);
        }
    }
}
