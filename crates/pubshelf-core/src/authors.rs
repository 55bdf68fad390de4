/// More than this many authors collapses the list to "A, B, C, et al.".
pub const MAX_LISTED_AUTHORS: usize = 5;

/// Number of names kept before "et al.".
const ET_AL_KEEP: usize = 3;

/// Format a BibTeX `author` value for display.
///
/// Names are separated by the literal `" and "`. Each name is abbreviated to
/// initials plus family name, then the list is joined with `&` before the
/// last name, or truncated to three names and "et al." beyond five.
pub fn format_authors(author_field: &str) -> String {
    if author_field.is_empty() {
        return String::new();
    }

    let names: Vec<String> = author_field
        .split(" and ")
        .map(reorder_name)
        .map(|n| abbreviate_name(&n))
        .collect();

    join_names(&names)
}

/// Rewrite "Last, First" as "First Last". Segments after the second comma
/// are dropped.
fn reorder_name(name: &str) -> String {
    let name = name.trim();
    if !name.contains(',') {
        return name.to_string();
    }

    let mut parts = name.split(',').map(str::trim);
    let last = parts.next().unwrap_or("");
    let first = parts.next().unwrap_or("");
    format!("{} {}", first, last)
}

/// Reduce every name part except the last to an initial.
///
/// Parts that are already initials ("J.") are kept as they are.
pub fn abbreviate_name(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();
    let Some((family, given)) = parts.split_last() else {
        return String::new();
    };
    if given.is_empty() {
        return family.to_string();
    }

    let mut out: Vec<String> = given.iter().map(|p| initial(p)).collect();
    out.push(family.to_string());
    out.join(" ")
}

fn initial(part: &str) -> String {
    if part.chars().count() <= 2 && part.ends_with('.') {
        return part.to_string();
    }
    match part.chars().next() {
        Some(c) => format!("{}.", c),
        None => String::new(),
    }
}

fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [a, b] => format!("{} & {}", a, b),
        [rest @ .., last] if names.len() <= MAX_LISTED_AUTHORS => {
            format!("{}, & {}", rest.join(", "), last)
        }
        _ => format!("{}, et al.", names[..ET_AL_KEEP].join(", ")),
    }
}
