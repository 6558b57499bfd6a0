//! Book grammar and canonical rendering.
//!
//! ```text
//! [Surname, I.I.] Title [/ responsibility [; responsibility]...] [// host]
//!   [. – N-е изд.] . – City : Publisher, Year[–Year] . – N с. | С. a–b. | N т.
//! ```

use super::grammar::{
    area_breaks, has_content, is_dotted_break, is_et_al, join_areas, split_clauses, split_host,
    split_once_spaced, CLAUSE, ET_AL_PATTERN, HOST, RESPONSIBILITY,
};
use super::person::{parse_direct_list, strip_heading, DIRECT_PATTERN};
use crate::model::{Book, Editor, Extent, Language, Person, Publisher};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static TOTAL_PAGES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s*с\.?$").expect("valid pages regex"));

static PAGE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[СCс]\.\s*(\d+)\s*(?:--|[-–—])\s*(\d+)\.?$").expect("valid page range regex")
});

static VOLUMES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s*[тТ]\.?$").expect("valid volumes regex"));

static PUBLISHER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<city>[^:,]+?)\s*:\s*(?P<name>.+?),\s*(?P<year>\d{4})(?:\s*[-–—]\s*(?P<end>\d{4}))?$")
        .expect("valid publisher regex")
});

static PLACE_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<city>[^:,]+?),\s*(?P<year>\d{4})(?:\s*[-–—]\s*(?P<end>\d{4}))?$")
        .expect("valid place regex")
});

static EDITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<n>\d+)(?:\s*-\s*\p{L}{1,2})?\s+(?P<abbr>изд|выд)\.?$").expect("valid edition regex")
});

static EDITOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^(?P<role>под\s+общ\.\s+ред\.|под\s+ред\.|пад\s+агул\.\s+рэд\.|пад\s+рэд\.|редкол\.:|рэдкал\.:|сост\.|склад\.)\s*(?P<person>{p})(?:\s*\((?P<title>[^)]+)\))?(?:\s*(?P<others>{e}))?$",
        p = *DIRECT_PATTERN,
        e = ET_AL_PATTERN
    ))
    .expect("valid editor regex")
});

static AUTHORS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^(?P<list>{p}(?:\s*,\s*{p})*)(?:\s*(?P<others>{e}))?$",
        p = *DIRECT_PATTERN,
        e = ET_AL_PATTERN
    ))
    .expect("valid authors regex")
});

static BELARUSIAN_LETTERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[іІўЎ]").expect("valid letters regex"));

/// Responsibility statement after " / ".
#[derive(Debug, Default)]
struct Responsibility {
    authors: Vec<Person>,
    others: Option<String>,
    collectivity: Vec<String>,
    editor: Option<Editor>,
    editor_others: Option<String>,
}

fn parse_responsibility(text: &str) -> Option<Responsibility> {
    let mut resp = Responsibility::default();
    for clause in split_clauses(text) {
        if let Some(caps) = EDITOR.captures(clause) {
            if resp.editor.is_some() {
                return None;
            }
            let person = Person::parse(caps.name("person")?.as_str())?;
            let others = caps.name("others").map(|m| m.as_str().to_string());
            resp.editor = Some(Editor {
                role: collapse(caps.name("role")?.as_str()),
                person,
                title: caps.name("title").map(|m| m.as_str().trim().to_string()),
                others: others.is_some(),
            });
            resp.editor_others = others;
        } else if let Some(caps) = AUTHORS.captures(clause) {
            if !resp.authors.is_empty() {
                return None;
            }
            resp.authors = parse_direct_list(caps.name("list")?.as_str())?;
            resp.others = caps.name("others").map(|m| m.as_str().to_string());
        } else if has_content(clause) && !is_et_al(clause) {
            resp.collectivity.push(clause.to_string());
        } else {
            return None;
        }
    }
    Some(resp)
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_extent(area: &str) -> Option<Extent> {
    if let Some(c) = TOTAL_PAGES.captures(area) {
        return Some(Extent::Pages {
            count: c[1].parse().ok()?,
        });
    }
    if let Some(c) = PAGE_RANGE.captures(area) {
        let start: u32 = c[1].parse().ok()?;
        let end: u32 = c[2].parse().ok()?;
        return (start <= end).then_some(Extent::PageRange { start, end });
    }
    if let Some(c) = VOLUMES.captures(area) {
        return Some(Extent::Volumes {
            count: c[1].parse().ok()?,
        });
    }
    None
}

fn parse_publisher(area: &str) -> Option<Publisher> {
    let (caps, name) = match PUBLISHER.captures(area) {
        Some(c) => {
            let name = c.name("name").map(|m| m.as_str().trim().to_string());
            (c, name)
        }
        None => (PLACE_YEAR.captures(area)?, None),
    };
    let year: i32 = caps.name("year")?.as_str().parse().ok()?;
    let year_end = match caps.name("end") {
        Some(m) => Some(m.as_str().parse::<i32>().ok()?),
        None => None,
    };
    if year_end.is_some_and(|end| end < year) {
        return None;
    }
    Some(Publisher {
        city: caps.name("city")?.as_str().trim().to_string(),
        name,
        year,
        year_end,
    })
}

/// Edition number and the abbreviation it was written with.
fn parse_edition(area: &str) -> Option<(u32, &str)> {
    let caps = EDITION.captures(area)?;
    let n = caps.name("n")?.as_str().parse().ok()?;
    let abbr = caps.name("abbr")?.as_str();
    Some((n, abbr))
}

fn detect_language(
    body: &str,
    edition: Option<&str>,
    et_al: Option<&str>,
    editor_role: Option<&str>,
) -> Language {
    if let Some(abbr) = edition {
        return if abbr == "выд" {
            Language::Belarusian
        } else {
            Language::Russian
        };
    }
    if let Some(tag) = et_al {
        return if tag.contains("інш") {
            Language::Belarusian
        } else {
            Language::Russian
        };
    }
    if let Some(role) = editor_role {
        return if role.contains("рэд") || role.contains("рэдкал") || role.contains("склад") {
            Language::Belarusian
        } else {
            Language::Russian
        };
    }
    if BELARUSIAN_LETTERS.is_match(body) {
        Language::Belarusian
    } else {
        Language::Russian
    }
}

/// Take the extent, publisher and optional edition areas from the right.
///
/// Everything before them is the head, so a title may keep a spaced dash
/// ("Беларусь – Россия"). A dotted separator inside the head means an
/// area the grammar does not know.
fn split_book_areas(body: &str) -> Option<(&str, Option<&str>, &str, &str)> {
    let breaks = area_breaks(body);
    let n = breaks.len();
    if n < 2 {
        return None;
    }
    let area = |i: usize| {
        let end = breaks.get(i + 1).map_or(body.len(), |b| b.start);
        body[breaks[i].end..end].trim()
    };

    let (head_end, edition) = match n.checked_sub(3) {
        Some(i) if parse_edition(area(i)).is_some() => (breaks[i].start, Some(area(i))),
        _ => (breaks[n - 2].start, None),
    };
    if breaks
        .iter()
        .take_while(|b| b.start < head_end)
        .any(|b| is_dotted_break(body, b))
    {
        return None;
    }

    Some((body[..head_end].trim(), edition, area(n - 2), area(n - 1)))
}

/// Parse a normalised entry body as a book.
pub fn parse_book(body: &str) -> Option<Book> {
    let (head, edition_area, publisher_area, extent_area) = split_book_areas(body)?;

    let extent = parse_extent(extent_area)?;
    let publisher = parse_publisher(publisher_area)?;
    let edition = match edition_area {
        Some(area) => Some(parse_edition(area)?),
        None => None,
    };

    let (main, host) = split_host(head);
    if host.is_some_and(|h| !has_content(h)) {
        return None;
    }
    let (title_part, responsibility) = match split_once_spaced(main, '/') {
        Some((title, resp)) => (title, Some(parse_responsibility(resp)?)),
        None => (main, None),
    };

    let (authors1, title) = match strip_heading(title_part) {
        Some((person, rest)) => (vec![person], rest.trim()),
        None => (Vec::new(), title_part.trim()),
    };
    if !has_content(title) {
        return None;
    }

    let resp = responsibility.unwrap_or_default();
    let et_al = resp.others.as_deref().or(resp.editor_others.as_deref());
    let language = detect_language(
        body,
        edition.map(|(_, abbr)| abbr),
        et_al,
        resp.editor.as_ref().map(|e| e.role.as_str()),
    );

    let collectivity = if resp.collectivity.is_empty() {
        None
    } else {
        Some(resp.collectivity.join(CLAUSE))
    };

    Some(Book {
        authors1,
        title: title.to_string(),
        authors2: resp.authors,
        other_authors: resp.others.is_some(),
        collectivity,
        editor: resp.editor,
        host: host.map(str::to_string),
        edition: edition.map(|(n, _)| n),
        publisher,
        extent,
        language,
    })
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extent::Pages { count } => write!(f, "{} с.", count),
            Extent::PageRange { start, end } => write!(f, "С. {}–{}.", start, end),
            Extent::Volumes { count } => write!(f, "{} т.", count),
        }
    }
}

impl fmt::Display for Publisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(ref name) => write!(f, "{} : {}, {}", self.city, name, self.year)?,
            None => write!(f, "{}, {}", self.city, self.year)?,
        }
        if let Some(end) = self.year_end {
            write!(f, "–{}", end)?;
        }
        Ok(())
    }
}

impl Book {
    /// Responsibility clauses in canonical order.
    fn clauses(&self) -> Vec<String> {
        let mut clauses = Vec::new();
        if !self.authors2.is_empty() {
            let mut authors = self
                .authors2
                .iter()
                .map(Person::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            if self.other_authors {
                authors.push(' ');
                authors.push_str(self.language.et_al());
            }
            clauses.push(authors);
        }
        if let Some(ref collectivity) = self.collectivity {
            clauses.push(collectivity.clone());
        }
        if let Some(ref editor) = self.editor {
            let mut clause = format!("{} {}", editor.role, editor.person);
            if let Some(ref title) = editor.title {
                clause.push_str(&format!(" ({})", title));
            }
            if editor.others {
                clause.push(' ');
                clause.push_str(self.language.et_al());
            }
            clauses.push(clause);
        }
        clauses
    }

    /// Title and statement of responsibility area.
    fn head(&self) -> String {
        let mut head = String::new();
        if let Some(first) = self.authors1.first() {
            head.push_str(&first.reversed());
            head.push(' ');
        }
        head.push_str(&self.title);
        let clauses = self.clauses();
        if !clauses.is_empty() {
            head.push_str(RESPONSIBILITY);
            head.push_str(&clauses.join(CLAUSE));
        }
        if let Some(ref host) = self.host {
            head.push_str(HOST);
            head.push_str(host);
        }
        head
    }
}

/// Canonical rendering.
impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edition = self
            .edition
            .map(|n| format!("{}-е {}", n, self.language.edition()));
        let areas = [
            Some(self.head()),
            edition,
            Some(self.publisher.to_string()),
            Some(self.extent.to_string()),
        ];
        write!(f, "{}", join_areas(areas.iter().flatten()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOTT: &str =
        "Шотт, А.В. Курс лекций по частной хирургии / А.В. Шотт, В.А. Шотт. – Минск : Асар, 2004. – 525 с.";

    #[test]
    fn test_parse_shott() {
        let book = parse_book(SHOTT).unwrap();
        assert_eq!(book.authors1, vec![Person::new("Шотт", "А.", Some("В."))]);
        assert_eq!(book.title, "Курс лекций по частной хирургии");
        assert_eq!(
            book.authors2,
            vec![
                Person::new("Шотт", "А.", Some("В.")),
                Person::new("Шотт", "В.", Some("А."))
            ]
        );
        assert_eq!(book.publisher.city, "Минск");
        assert_eq!(book.publisher.name.as_deref(), Some("Асар"));
        assert_eq!(book.publisher.year, 2004);
        assert_eq!(book.extent, Extent::Pages { count: 525 });
        assert_eq!(book.to_string(), SHOTT);
    }

    #[test]
    fn test_edition_and_language() {
        let text = "Котаў, А.I. Гісторыя Беларусі і сусветная цывілізацыя / A.I. Котаў. – 2-е выд. – Мінск : Энцыклапедыкс, 2003. – 168 с.";
        let book = parse_book(text).unwrap();
        assert_eq!(book.edition, Some(2));
        assert_eq!(book.language, Language::Belarusian);
        assert_eq!(book.to_string(), text);
    }

    #[test]
    fn test_editor_with_title_and_volumes() {
        let text = "Гісторыя Беларусі : у 6 т. / рэдкал.: М. Касцюк (гал. рэд.) [і інш.]. – Мінск : Экаперспектыва, 2000–2005. – 6 т.";
        let book = parse_book(text).unwrap();
        let editor = book.editor.as_ref().unwrap();
        assert_eq!(editor.role, "рэдкал.:");
        assert_eq!(editor.title.as_deref(), Some("гал. рэд."));
        assert!(editor.others);
        assert_eq!(book.publisher.year_end, Some(2005));
        assert_eq!(book.extent, Extent::Volumes { count: 6 });
        assert_eq!(book.to_string(), text);
    }

    #[test]
    fn test_place_without_publisher() {
        let text = "Основы геологии Беларуси / А.С. Махнач [и др.]. – Минск, 2004. – 391 с.";
        let book = parse_book(text).unwrap();
        assert!(book.publisher.name.is_none());
        assert!(book.other_authors);
        assert_eq!(book.to_string(), text);
    }

    #[test]
    fn test_host_and_page_range() {
        let text = "Иванов, И.И. Новые методы / И.И. Иванов // Вестник БГУ. – 2010. – № 3. – С. 12–15.";
        assert!(parse_book(text).is_none());

        let text = "Иванов, И.И. Новые методы / И.И. Иванов // Сборник научных трудов. – Минск : БГУ, 2010. – С. 12–15.";
        let book = parse_book(text).unwrap();
        assert_eq!(book.host.as_deref(), Some("Сборник научных трудов"));
        assert_eq!(book.extent, Extent::PageRange { start: 12, end: 15 });
        assert_eq!(book.to_string(), text);
    }

    #[test]
    fn test_canonical_punctuation() {
        let sloppy = "Шотт, А.В. Курс лекций по частной хирургии / А.В. Шотт, В.А. Шотт - Минск: Асар, 2004 - 525 с";
        let book = parse_book(sloppy).unwrap();
        assert_eq!(book.to_string(), SHOTT);
    }

    #[test]
    fn test_dashed_title() {
        let text = "Иванов, И.И. Беларусь – Россия: экономика / И.И. Иванов. – Минск : Асар, 2004. – 100 с.";
        let book = parse_book(text).unwrap();
        assert_eq!(book.title, "Беларусь – Россия: экономика");
        assert_eq!(book.publisher.year, 2004);
        assert_eq!(book.to_string(), text);
    }

    #[test]
    fn test_unknown_area_in_head_rejected() {
        let text = "Курс / А.В. Шотт. – Конспект. – Минск : Асар, 2004. – 525 с.";
        assert!(parse_book(text).is_none());
    }

    #[test]
    fn test_rejects_incomplete() {
        assert!(parse_book("Курс лекций по частной хирургии").is_none());
        assert!(parse_book("Курс. – Минск : Асар, 2004").is_none());
        assert!(parse_book("Курс. – Минск : Асар, 2004. – много страниц").is_none());
        assert!(parse_book("Курс. – Минск : Асар, 2005–2004. – 5 т.").is_none());
    }
}
