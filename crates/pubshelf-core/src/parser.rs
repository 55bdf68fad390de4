//! Permissive scanner for the BibTeX subset used by the publication list.
//!
//! A record is `@type{key,` followed by a body that ends at the first line
//! beginning with `}`. The scan does not track brace depth: a body line that
//! starts with `}` ends the record early, and a braced field value stops at
//! its first `}`. Both are boundaries of the supported input, not errors.
//! Anything that does not match is skipped without complaint.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::RawEntry;

static ENTRY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@([A-Za-z0-9_]+)\{([^,]+),\s*([\s\S]*?)\n\}").unwrap());

static FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z0-9_]+)\s*=\s*\{([^}]*)\}|([A-Za-z0-9_]+)\s*=\s*"([^"]*)""#).unwrap()
});

/// Split bibliography text into records, in document order.
pub fn parse_entries(text: &str) -> Vec<RawEntry> {
    ENTRY_RE
        .captures_iter(text)
        .map(|caps| {
            let mut entry = RawEntry::new(&caps[1], &caps[2]);
            for (name, value) in parse_fields(&caps[3]) {
                entry.insert_field(name, value);
            }
            entry
        })
        .collect()
}

/// Extract `name = {value}` / `name = "value"` assignments from a record body.
///
/// Names come back lower-cased and values trimmed. Repeated names are all
/// returned; [`RawEntry::insert_field`] keeps the first.
pub fn parse_fields(body: &str) -> Vec<(String, String)> {
    FIELD_RE
        .captures_iter(body)
        .filter_map(|caps| {
            let (name, value) = match (caps.get(1), caps.get(2)) {
                (Some(n), Some(v)) => (n, v),
                _ => (caps.get(3)?, caps.get(4)?),
            };
            Some((
                name.as_str().to_lowercase(),
                value.as_str().trim().to_string(),
            ))
        })
        .collect()
}
