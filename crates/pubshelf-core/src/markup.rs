//! Markup cleaning for title, note, journal and booktitle values.
//!
//! Only a fixed handful of LaTeX commands is understood. Emphasis and bold
//! become HTML tags, a few escaped symbols are unescaped, `{\ss}` becomes `ß`,
//! and every other `\command` word is dropped. The argument text of a dropped
//! command survives only because braces are stripped afterwards.
//!
//! The output is not HTML-escaped. A literal `<`, `>` or `&` in the source
//! (`$n < m$`) passes through unchanged and is inserted into HTML as is.

use once_cell::sync::Lazy;
use regex::Regex;

static TEXTIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\textit\{([^}]+)\}").unwrap());
static TEXTBF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\textbf\{([^}]+)\}").unwrap());
static EMPH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\emph\{([^}]+)\}").unwrap());
static COMMAND_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\[a-zA-Z]+").unwrap());
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Escaped symbols replaced by their literal character.
const UNESCAPES: &[(&str, &str)] = &[("\\_", "_"), ("\\&", "&"), ("\\$", "$"), ("\\%", "%")];

/// Clean a bibliography field value into a short HTML fragment.
pub fn clean_markup(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut result = TEXTIT_RE.replace_all(text, "<em>$1</em>").into_owned();
    result = TEXTBF_RE
        .replace_all(&result, "<strong>$1</strong>")
        .into_owned();
    result = EMPH_RE.replace_all(&result, "<em>$1</em>").into_owned();

    for (escaped, literal) in UNESCAPES {
        result = result.replace(escaped, literal);
    }

    result = result.replace("{\\ss}", "ß");

    result = COMMAND_RE.replace_all(&result, "").into_owned();
    result = result.replace(['{', '}'], "");
    result = WS_RE.replace_all(&result, " ").into_owned();

    result.trim().to_string()
}

/// Tags emitted by [`clean_markup`].
const EMITTED_TAGS: &[&str] = &["<em>", "</em>", "<strong>", "</strong>"];

/// Remove the emphasis tags added by [`clean_markup`], leaving every other
/// character, including a literal `<` or `>`, in place.
pub fn markup_to_plain(text: &str) -> String {
    EMITTED_TAGS
        .iter()
        .fold(text.to_string(), |acc, tag| acc.replace(tag, ""))
}
