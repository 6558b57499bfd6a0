//! Electronic resource grammars: a page on a site and a whole site.

use super::grammar::{
    has_content, join_areas, split_areas, split_host, split_once_spaced, HOST, RESPONSIBILITY,
};
use super::person::{parse_direct_list, strip_heading};
use crate::model::{Access, Person, WebPage, WebSite};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

const DATE_FORMAT: &str = "%d.%m.%Y";

static SITE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<site>[^\[\]]+?)\s*\[\s*(?P<marker>Электронный\s+ресурс|Electronic\s+resource)\s*\]$")
        .expect("valid site regex")
});

static MODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<label>Режим\s+доступа|Mode\s+of\s+access)\s*:\s*(?P<url>\S+)$")
        .expect("valid mode regex")
});

static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<label>Дата\s+доступа|Date\s+of\s+access)\s*:\s*(?P<date>\d{2}\.\d{2}\.\d{4})\.?$")
        .expect("valid date regex")
});

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})$").expect("valid year regex"));

static ISSUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:#|№|No\.?)\s*(\d+)$").expect("valid issue regex"));

static PUBLISHED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?P<city>[^:,]+?)\s*[:,]\s*)?(?P<year>\d{4})$").expect("valid published regex")
});

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Site name and its canonical "[Электронный ресурс]" marker.
fn parse_site(text: &str) -> Option<(String, String)> {
    let caps = SITE.captures(text.trim())?;
    let site = caps.name("site")?.as_str().trim();
    if !has_content(site) {
        return None;
    }
    let marker = format!("[{}]", collapse(caps.name("marker")?.as_str()));
    Some((site.to_string(), marker))
}

/// Parse the trailing "Режим доступа" and "Дата доступа" areas.
fn parse_access(mode: &str, date: &str) -> Option<Access> {
    let mode = MODE.captures(mode)?;
    let date_caps = DATE.captures(date)?;
    let parsed = NaiveDate::parse_from_str(date_caps.name("date")?.as_str(), DATE_FORMAT).ok()?;
    Some(Access {
        mode_label: collapse(mode.name("label")?.as_str()),
        url: mode.name("url")?.as_str().to_string(),
        date_label: collapse(date_caps.name("label")?.as_str()),
        date: parsed,
    })
}

/// Split areas into the head, the middle areas and the access details.
fn split_access(body: &str) -> Option<(&str, Vec<&str>, Access)> {
    let areas = split_areas(body);
    if areas.len() < 3 {
        return None;
    }
    let n = areas.len();
    let access = parse_access(areas[n - 2], areas[n - 1])?;
    Some((areas[0], areas[1..n - 2].to_vec(), access))
}

/// Parse a normalised entry body as a page on a web site.
pub fn parse_web_page(body: &str) -> Option<WebPage> {
    let (head, middle, access) = split_access(body)?;
    let (main, site) = split_host(head);
    let (site, marker) = parse_site(site?)?;

    let (title_part, authors2) = match split_once_spaced(main, '/') {
        Some((title, authors)) => (title, parse_direct_list(authors)?),
        None => (main, Vec::new()),
    };
    let (authors1, title) = match strip_heading(title_part) {
        Some((person, rest)) => (vec![person], rest.trim()),
        None => (Vec::new(), title_part.trim()),
    };
    if !has_content(title) {
        return None;
    }

    let mut year = None;
    let mut number = None;
    let mut rest = middle.into_iter().peekable();
    if let Some(c) = rest.peek().and_then(|a| YEAR.captures(a)) {
        year = Some(c[1].parse().ok()?);
        rest.next();
    }
    if let Some(c) = rest.peek().and_then(|a| ISSUE.captures(a)) {
        number = Some(c[1].parse().ok()?);
        rest.next();
    }
    if rest.next().is_some() {
        return None;
    }

    Some(WebPage {
        authors1,
        title: title.to_string(),
        authors2,
        site,
        marker,
        year,
        number,
        access,
    })
}

/// Parse a normalised entry body as a whole web site.
pub fn parse_web_site(body: &str) -> Option<WebSite> {
    let (head, middle, access) = split_access(body)?;
    if head.contains(HOST.trim()) {
        return None;
    }
    let (site_part, publisher) = match split_once_spaced(head, '/') {
        Some((site, publisher)) if has_content(publisher) => (site, Some(publisher.to_string())),
        Some(_) => return None,
        None => (head, None),
    };
    let (site, marker) = parse_site(site_part)?;

    let (city, year) = match middle.as_slice() {
        [] => (None, None),
        [published] => {
            let caps = PUBLISHED.captures(published)?;
            let year: i32 = caps.name("year")?.as_str().parse().ok()?;
            (caps.name("city").map(|m| m.as_str().trim().to_string()), Some(year))
        }
        _ => return None,
    };

    Some(WebSite {
        site,
        marker,
        publisher,
        city,
        year,
        access,
    })
}

impl Access {
    fn areas(&self) -> [String; 2] {
        [
            format!("{}: {}", self.mode_label, self.url),
            format!("{}: {}.", self.date_label, self.date.format(DATE_FORMAT)),
        ]
    }
}

impl fmt::Display for WebPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut head = String::new();
        if let Some(first) = self.authors1.first() {
            head.push_str(&first.reversed());
            head.push(' ');
        }
        head.push_str(&self.title);
        if !self.authors2.is_empty() {
            head.push_str(RESPONSIBILITY);
            let names: Vec<String> = self.authors2.iter().map(Person::to_string).collect();
            head.push_str(&names.join(", "));
        }
        head.push_str(HOST);
        head.push_str(&self.site);
        head.push(' ');
        head.push_str(&self.marker);

        let mut areas = vec![head];
        areas.extend(self.year.map(|y| y.to_string()));
        areas.extend(self.number.map(|n| format!("№ {}", n)));
        areas.extend(self.access.areas());
        write!(f, "{}", join_areas(areas))
    }
}

impl fmt::Display for WebSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut head = format!("{} {}", self.site, self.marker);
        if let Some(ref publisher) = self.publisher {
            head.push_str(RESPONSIBILITY);
            head.push_str(publisher);
        }

        let mut areas = vec![head];
        match (&self.city, self.year) {
            (Some(city), Some(year)) => areas.push(format!("{}, {}", city, year)),
            (None, Some(year)) => areas.push(year.to_string()),
            _ => {}
        }
        areas.extend(self.access.areas());
        write!(f, "{}", join_areas(areas))
    }
}
