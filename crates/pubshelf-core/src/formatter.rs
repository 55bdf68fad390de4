//! Turns a [`RawEntry`] into a display-ready [`FormattedEntry`].
//!
//! Venue and link selection are ordered rule tables evaluated top to bottom.
//! A field only counts when its value is non-empty.

use crate::authors::format_authors;
use crate::markup::clean_markup;
use crate::{FormattedEntry, Link, RawEntry};

/// Title shown when a record has none.
pub const UNTITLED: &str = "Untitled";

/// One step of venue selection. The first rule producing a value wins.
type VenueRule = fn(&RawEntry) -> Option<String>;

const VENUE_RULES: &[VenueRule] = &[
    venue_from_note,
    venue_from_booktitle,
    venue_from_journal,
    venue_from_eprint,
    venue_from_type,
];

/// A link emitted whenever `field` is present.
struct LinkRule {
    field: &'static str,
    label: &'static str,
    url: fn(&str) -> String,
}

const LINK_RULES: &[LinkRule] = &[
    LinkRule {
        field: "eprint",
        label: "arXiv",
        url: arxiv_abs_url,
    },
    LinkRule {
        field: "doi",
        label: "DOI",
        url: doi_url,
    },
    LinkRule {
        field: "url",
        label: "Link",
        url: str::to_string,
    },
];

/// Derive every display field of one record.
pub fn format_entry(entry: &RawEntry) -> FormattedEntry {
    FormattedEntry {
        key: entry.key.clone(),
        year: parse_year(entry.present("year")),
        title: entry
            .present("title")
            .map(clean_markup)
            .unwrap_or_else(|| UNTITLED.to_string()),
        authors: entry.present("author").map(format_authors).unwrap_or_default(),
        venue: venue(entry),
        links: links(entry),
    }
}

/// Integer value of the leading digits of a year field, or 0 when there are
/// none (an optional sign may precede the digits).
pub fn parse_year(year: Option<&str>) -> i32 {
    let Some(year) = year else {
        return 0;
    };
    let year = year.trim_start();
    let (sign, rest) = match year.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, year.strip_prefix('+').unwrap_or(year)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits
        .parse::<i32>()
        .map(|n| sign * n)
        .unwrap_or(0)
}

pub fn venue(entry: &RawEntry) -> String {
    VENUE_RULES
        .iter()
        .find_map(|rule| rule(entry))
        .unwrap_or_else(|| "Publication".to_string())
}

pub fn links(entry: &RawEntry) -> Vec<Link> {
    LINK_RULES
        .iter()
        .filter_map(|rule| {
            entry.present(rule.field).map(|value| Link {
                label: rule.label.to_string(),
                url: (rule.url)(value),
            })
        })
        .collect()
}

fn venue_from_note(entry: &RawEntry) -> Option<String> {
    entry.present("note").map(clean_markup)
}

fn venue_from_booktitle(entry: &RawEntry) -> Option<String> {
    entry.present("booktitle").map(clean_markup)
}

fn venue_from_journal(entry: &RawEntry) -> Option<String> {
    entry.present("journal").map(clean_markup)
}

fn venue_from_eprint(entry: &RawEntry) -> Option<String> {
    entry.present("eprint")?;
    entry
        .present("archiveprefix")
        .map(|prefix| format!("{} Preprint", prefix))
}

/// Generic label keyed by the record type. The match is case-sensitive, so
/// `@Article` falls through to "Publication".
fn venue_from_type(entry: &RawEntry) -> Option<String> {
    let label = match entry.entry_type.as_str() {
        "article" => "Journal Article",
        "inproceedings" => "Conference Proceedings",
        "misc" => "Preprint",
        _ => "Publication",
    };
    Some(label.to_string())
}

fn arxiv_abs_url(id: &str) -> String {
    format!("https://arxiv.org/abs/{}", id)
}

fn doi_url(doi: &str) -> String {
    format!("https://doi.org/{}", doi)
}
