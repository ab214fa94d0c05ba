//! Release-year extraction from movie titles such as `Toy Story (1995)`.

use std::sync::OnceLock;

use regex::Regex;

fn year_suffix() -> &'static Regex {
    static YEAR_SUFFIX: OnceLock<Regex> = OnceLock::new();
    YEAR_SUFFIX.get_or_init(|| Regex::new(r"\(([0-9]{4})\)\s*$").expect("valid year regex"))
}

/// Splits a trailing `(YYYY)` off a title.
///
/// The title is trimmed first. When the suffix is present its year is
/// returned, the suffix is removed and a single comma left dangling before it
/// is dropped (`Title, The (1999)` becomes `Title, The`). Without a usable
/// suffix the trimmed title is returned unchanged with no year. Only ASCII
/// digits form a year; `(١٩٩٥)` is left in the title.
pub fn split_title_year(raw: Option<&str>) -> (Option<String>, Option<i32>) {
    let Some(raw) = raw else {
        return (None, None);
    };
    let title = raw.trim();
    let Some(captures) = year_suffix().captures(title) else {
        return (Some(title.to_string()), None);
    };
    let year = captures[1]
        .bytes()
        .fold(0, |acc, digit| acc * 10 + i32::from(digit - b'0'));
    let start = captures.get(0).map_or(title.len(), |m| m.start());
    let mut cleaned = title[..start].trim_end();
    if let Some(stripped) = cleaned.strip_suffix(',') {
        cleaned = stripped.trim_end();
    }
    (Some(cleaned.to_string()), Some(year))
}
