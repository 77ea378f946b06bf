//! Recognition of option tokens and short option cluster expansion.

use std::sync::LazyLock;

use regex::Regex;

static SHORT_CLUSTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A-[A-Za-z0-9_]{2,}").expect("static regex must compile"));
static SHORT_OPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A-([A-Za-z0-9_])\z").expect("static regex must compile"));
static LONG_OPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A--([A-Za-z0-9_][-A-Za-z0-9_]*)(?:=(.*))?\z").expect("static regex must compile")
});

/// A token recognized as an option switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionMatch {
    /// The option name without leading dashes.
    pub name: String,
    /// The value attached with `--name=value`, if any.
    pub inline_value: Option<String>,
}

/// Check whether `token` is a dash followed by at least two option letters, e.g. `-xvf`.
pub fn is_short_cluster_token(token: &str) -> bool {
    SHORT_CLUSTER_RE.is_match(token)
}

/// Check whether `token` is exactly a dash and one option letter, e.g. `-x`.
pub fn is_short_option_token(token: &str) -> bool {
    SHORT_OPTION_RE.is_match(token)
}

/// Match `--name` or `--name=value`.
pub fn match_long_option(token: &str) -> Option<OptionMatch> {
    let caps = LONG_OPTION_RE.captures(token)?;
    Some(OptionMatch {
        name: caps[1].to_string(),
        inline_value: caps.get(2).map(|m| m.as_str().to_string()),
    })
}

/// Try the short form first, then the long form.
///
/// `None` means the token is not an option; it starts the non-option tail.
pub fn match_option(token: &str) -> Option<OptionMatch> {
    if let Some(caps) = SHORT_OPTION_RE.captures(token) {
        return Some(OptionMatch { name: caps[1].to_string(), inline_value: None });
    }
    match_long_option(token)
}

/// Expand one cluster into single short option tokens.
///
/// Returns the tokens together with whatever trailed the leading run of
/// option letters (`"=5"` for `-ab=5`), which is not part of the expansion.
pub fn expand_cluster(token: &str) -> (Vec<String>, &str) {
    let body = &token[1..];
    let end = body.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(body.len());
    let expanded = body[..end].chars().map(|c| format!("-{}", c)).collect();
    (expanded, &body[end..])
}

/// Replace every short option cluster by its single option tokens.
///
/// Tokens that are not clusters pass through unchanged, so expanding an
/// already expanded list is a no-op. Trailing content after the option
/// letters of a cluster is dropped: `-ab=5` becomes `-a -b`.
pub fn expand_clusters<T: AsRef<str>>(tokens: &[T]) -> Vec<String> {
    let mut expanded = Vec::with_capacity(tokens.len());
    for token in tokens {
        let token = token.as_ref();
        if is_short_cluster_token(token) {
            let (options, rest) = expand_cluster(token);
            if !rest.is_empty() {
                tracing::warn!(token, dropped = rest, "dropping trailing content of short option cluster");
            }
            expanded.extend(options);
        } else {
            expanded.push(token.to_string());
        }
    }
    expanded
}
