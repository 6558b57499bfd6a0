//! Personal name grammar: "Surname, I.I." and "I.I. Surname".

use crate::model::Person;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Regex fragment for a surname.
pub const SURNAME: &str = r"\p{Lu}[\p{L}'’\-]*\p{L}";

/// Regex fragment for one initial with its dot.
pub const INITIAL: &str = r"\p{Lu}\p{Ll}{0,2}\.";

/// Regex fragment for a person in responsibility order ("А.В. Шотт").
pub static DIRECT_PATTERN: Lazy<String> =
    Lazy::new(|| format!(r"(?:{i})\s*(?:{i})?\s*(?:{s})", i = INITIAL, s = SURNAME));

static REVERSED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^(?P<surname>{s}),\s*(?P<name>{i})\s*(?P<patronymic>{i})?$",
        s = SURNAME,
        i = INITIAL
    ))
    .expect("valid reversed person regex")
});

static DIRECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^(?P<name>{i})\s*(?P<patronymic>{i})?\s*(?P<surname>{s})$",
        s = SURNAME,
        i = INITIAL
    ))
    .expect("valid direct person regex")
});

static HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^(?P<surname>{s}),\s*(?P<name>{i})\s*(?P<patronymic>{i})?\s+",
        s = SURNAME,
        i = INITIAL
    ))
    .expect("valid heading person regex")
});

fn from_captures(caps: &Captures<'_>) -> Option<Person> {
    Some(Person::new(
        caps.name("surname")?.as_str(),
        caps.name("name")?.as_str(),
        caps.name("patronymic").map(|m| m.as_str()),
    ))
}

impl Person {
    /// Parse a whole string in either order.
    pub fn parse(text: &str) -> Option<Person> {
        let text = text.trim();
        REVERSED
            .captures(text)
            .or_else(|| DIRECT.captures(text))
            .and_then(|c| from_captures(&c))
    }
}

/// Parse a comma-separated list in responsibility order ("А.В. Шотт, В.А. Шотт").
pub fn parse_direct_list(text: &str) -> Option<Vec<Person>> {
    let people: Option<Vec<Person>> = text
        .split(',')
        .map(|item| DIRECT.captures(item.trim()).and_then(|c| from_captures(&c)))
        .collect();
    people.filter(|p| !p.is_empty())
}

/// Split a heading author ("Шотт, А.В. ") from the start of a text.
pub fn strip_heading(text: &str) -> Option<(Person, &str)> {
    let caps = HEADING.captures(text)?;
    let person = from_captures(&caps)?;
    let rest = &text[caps.get(0)?.end()..];
    Some((person, rest))
}

/// Check if a text starts with a heading author.
pub fn starts_with_person(text: &str) -> bool {
    HEADING.is_match(text.trim_start())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_both_orders() {
        let expected = Person::new("Шотт", "А.", Some("В."));
        assert_eq!(Person::parse("Шотт, А.В."), Some(expected.clone()));
        assert_eq!(Person::parse("А.В. Шотт"), Some(expected.clone()));
        assert_eq!(Person::parse("А. В. Шотт"), Some(expected));
    }

    #[test]
    fn test_parse_single_initial() {
        let p = Person::parse("М. Касцюк").unwrap();
        assert_eq!(p.patronymic, None);
        assert_eq!(p.to_string(), "М. Касцюк");
    }

    #[test]
    fn test_parse_mixed_scripts() {
        let p = Person::parse("A.I. Котаў").unwrap();
        assert_eq!(p.name, "A.");
        assert_eq!(p.patronymic.as_deref(), Some("I."));
        assert_eq!(p.surname, "Котаў");
    }

    #[test]
    fn test_parse_hyphenated() {
        let p = Person::parse("Римский-Корсаков, Н.А.").unwrap();
        assert_eq!(p.surname, "Римский-Корсаков");
    }

    #[test]
    fn test_parse_rejects() {
        assert!(Person::parse("Курс лекций").is_none());
        assert!(Person::parse("Шотт").is_none());
        assert!(Person::parse("М-во обороны").is_none());
    }

    #[test]
    fn test_direct_list() {
        let people = parse_direct_list("Л.А. Чикатуева, Н.В. Третьякова").unwrap();
        assert_eq!(people.len(), 2);
        assert!(parse_direct_list("М-во обороны Рос. Федерации, Ин-т воен. истории").is_none());
    }

    #[test]
    fn test_strip_heading() {
        let (p, rest) = strip_heading("Шотт, А.В. Курс лекций").unwrap();
        assert_eq!(p.reversed(), "Шотт, А.В.");
        assert_eq!(rest, "Курс лекций");
        assert!(strip_heading("Культурология : учеб. пособие").is_none());
        assert!(starts_with_person("  Шотт, А.В. Курс"));
    }
}
