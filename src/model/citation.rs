//! Parsed bibliography records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A person named by surname and initials.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Person {
    /// Surname (may be in an oblique case, e.g. after "под ред.")
    pub surname: String,

    /// Given-name initial with its dot ("А.")
    pub name: String,

    /// Patronymic initial with its dot ("В.")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patronymic: Option<String>,
}

impl Person {
    /// Create a person.
    pub fn new(
        surname: impl Into<String>,
        name: impl Into<String>,
        patronymic: Option<&str>,
    ) -> Self {
        Self {
            surname: surname.into(),
            name: name.into(),
            patronymic: patronymic.map(str::to_string),
        }
    }

    /// Initials joined without spaces ("А.В.").
    pub fn initials(&self) -> String {
        let mut out = self.name.clone();
        if let Some(ref p) = self.patronymic {
            out.push_str(p);
        }
        out
    }

    /// Heading form used at the start of an entry ("Шотт, А.В.").
    pub fn reversed(&self) -> String {
        format!("{}, {}", self.surname, self.initials())
    }
}

/// Responsibility form "А.В. Шотт".
impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.initials(), self.surname)
    }
}

/// Language an entry is written in; selects canonical abbreviations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Russian
    #[default]
    Russian,
    /// Belarusian
    Belarusian,
}

impl Language {
    /// Canonical "et al." tag.
    pub fn et_al(self) -> &'static str {
        match self {
            Language::Russian => "[и др.]",
            Language::Belarusian => "[і інш.]",
        }
    }

    /// Canonical edition abbreviation.
    pub fn edition(self) -> &'static str {
        match self {
            Language::Russian => "изд.",
            Language::Belarusian => "выд.",
        }
    }
}

/// Editor or compiler clause of a book ("под ред. В.П. Федько").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Editor {
    /// Role phrase as written ("под общ. ред.", "редкол.:", "сост.")
    pub role: String,

    /// Named editor
    pub person: Person,

    /// Editor title in parentheses ("гал. рэд.")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Followed by an "et al." tag
    #[serde(default)]
    pub others: bool,
}

/// Publication place, publisher and year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    /// City ("Минск", "М.", "Ростов н/Д")
    pub city: String,

    /// Publisher name, absent in "Минск, 2004"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Year of publication
    pub year: i32,

    /// Last year for multi-year editions ("2000–2005")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_end: Option<i32>,
}

/// Physical extent of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Extent {
    /// Total page count ("525 с.")
    Pages {
        /// Number of pages
        count: u32,
    },
    /// Page range inside a host publication ("С. 12–15.")
    PageRange {
        /// First page
        start: u32,
        /// Last page
        end: u32,
    },
    /// Number of volumes ("6 т.")
    Volumes {
        /// Number of volumes
        count: u32,
    },
}

/// A printed book or a part of one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Heading authors, written "Surname, I.I."
    pub authors1: Vec<Person>,

    /// Title with subtitle
    pub title: String,

    /// Authors in the responsibility area, written "I.I. Surname"
    pub authors2: Vec<Person>,

    /// Responsibility area ends with "et al."
    pub other_authors: bool,

    /// Collective author or issuing body
    pub collectivity: Option<String>,

    /// Editor or compiler
    pub editor: Option<Editor>,

    /// Host publication after "//"
    pub host: Option<String>,

    /// Edition number ("2-е изд.")
    pub edition: Option<u32>,

    /// Publication area
    pub publisher: Publisher,

    /// Pages, page range or volume count
    pub extent: Extent,

    /// Detected language
    pub language: Language,
}

/// Access details shared by electronic resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Access {
    /// "Режим доступа" or "Mode of access"
    pub mode_label: String,

    /// Resource address
    pub url: String,

    /// "Дата доступа" or "Date of access"
    pub date_label: String,

    /// Date of access
    pub date: NaiveDate,
}

/// A page (article, document) published on a web site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebPage {
    /// Heading authors
    pub authors1: Vec<Person>,

    /// Page title
    pub title: String,

    /// Authors in the responsibility area
    pub authors2: Vec<Person>,

    /// Site name
    pub site: String,

    /// "[Электронный ресурс]" marker as canonically written
    pub marker: String,

    /// Publication year
    pub year: Option<i32>,

    /// Issue number
    pub number: Option<u32>,

    /// Access details
    pub access: Access,
}

/// A whole web site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSite {
    /// Site name
    pub site: String,

    /// "[Электронный ресурс]" marker as canonically written
    pub marker: String,

    /// Site owner or publisher after "/"
    pub publisher: Option<String>,

    /// Publication city
    pub city: Option<String>,

    /// Publication year
    pub year: Option<i32>,

    /// Access details
    pub access: Access,
}

/// Structured bibliography record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CitationRecord {
    /// Printed book
    Book(Book),
    /// Web page
    WebPage(WebPage),
    /// Web site
    WebSite(WebSite),
    /// Nothing recognisable
    Unknown,
    /// Looks electronic but does not match the electronic grammar
    UnknownElectronic,
}

impl CitationRecord {
    /// Check if a grammar matched.
    pub fn is_recognized(&self) -> bool {
        !matches!(
            self,
            CitationRecord::Unknown | CitationRecord::UnknownElectronic
        )
    }
}

/// A bibliography entry after analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Source paragraph
    pub paragraph: usize,

    /// Parsed record
    pub record: CitationRecord,

    /// Canonical rendering; the normalised source text when unrecognised
    pub canonical: String,
}
