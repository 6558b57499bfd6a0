//! Header classification inside the numbered main part.
//!
//! Numbered-looking paragraphs are collected as candidates and grouped into
//! runs of adjacent paragraphs. A run is accepted only when its levels
//! strictly increase ("1 Обзор" directly followed by "1.1 Цели"); other runs
//! are usually enumerations in body text and are dropped.

use super::parts::DocumentParts;
use crate::citation::starts_with_person;
use crate::model::{Paragraph, MAX_OUTLINE_LEVEL};
use crate::options::{AuditOptions, HeaderScope};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::ops::Range;

static CHAPTER_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:глава|раздел|часть|падзел|частка|кіраўнік)\s*\d+")
        .expect("valid chapter regex")
});

static NUMBERED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)*)\.?\s*[^\d\s]").expect("valid numbered regex")
});

static ANNEX_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:приложение|дадатак)\s+\p{L}\s*$").expect("valid annex regex")
});

/// How a candidate was recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderMarker {
    /// "Глава 1", "Раздел 2"
    Chapter,
    /// "2.3 Title"
    Numbered,
    /// "Приложение А"
    Annex,
}

/// An accepted main-part header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Header paragraph
    pub paragraph: usize,

    /// Nesting level, 0 being the outermost
    pub level: u8,

    /// How the header was recognised
    pub marker: HeaderMarker,
}

/// Recognise a header candidate and compute its level.
pub fn candidate(paragraph: &Paragraph) -> Option<Header> {
    let text = paragraph.pure_text();
    let marker = if CHAPTER_MARKER.is_match(&text) {
        HeaderMarker::Chapter
    } else if ANNEX_MARKER.is_match(&text) {
        HeaderMarker::Annex
    } else if NUMBERED.is_match(&text) && !is_numbered_citation(&text) {
        HeaderMarker::Numbered
    } else {
        return None;
    };

    let level = match paragraph.outline_level() {
        Some(level) => level,
        None => match marker {
            HeaderMarker::Chapter => 0,
            HeaderMarker::Annex => 1,
            HeaderMarker::Numbered => numbered_level(&text),
        },
    };

    Some(Header {
        paragraph: paragraph.index,
        level,
        marker,
    })
}

/// "1. Шотт, А.В. Курс..." is a list entry, not a header.
fn is_numbered_citation(text: &str) -> bool {
    NUMBERED
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| text[m.end()..].trim_start_matches(['.', ' ']))
        .is_some_and(starts_with_person)
}

fn numbered_level(text: &str) -> u8 {
    let groups = NUMBERED
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().split('.').count())
        .unwrap_or(1);
    (groups.saturating_sub(1)).min(MAX_OUTLINE_LEVEL as usize) as u8
}

/// Paragraph range to scan and paragraphs inside it to skip.
fn scan_scope(
    paragraphs: &[Paragraph],
    parts: &DocumentParts,
    scope: HeaderScope,
) -> Option<(Range<usize>, HashSet<usize>)> {
    let titles: HashSet<usize> = parts.title_paragraphs().iter().map(|(i, _)| *i).collect();

    if !parts.is_recognized() {
        return parts.main.as_ref().map(|main| (main.range(), titles));
    }

    match scope {
        HeaderScope::Introduction => parts
            .introduction
            .as_ref()
            .map(|intro| (intro.start + 1..intro.end, titles)),
        HeaderScope::Document => parts
            .first_title()
            .map(|first| (first + 1..paragraphs.len(), titles)),
    }
}

/// Find main-part headers. Accepted headers and every part title paragraph
/// get their header flag set; only the main-part headers are returned.
pub fn classify_headers(
    paragraphs: &mut [Paragraph],
    parts: &DocumentParts,
    options: &AuditOptions,
) -> Vec<Header> {
    let mut accepted = Vec::new();

    if let Some((range, skip)) = scan_scope(paragraphs, parts, options.header_scope) {
        let candidates: Vec<Header> = paragraphs[range]
            .iter()
            .filter(|p| !skip.contains(&p.index))
            .filter_map(candidate)
            .collect();
        accepted = accept_runs(&candidates, options.accept_isolated_headers);
        log::debug!(
            "{} of {} header candidates accepted",
            accepted.len(),
            candidates.len()
        );
    }

    for header in &accepted {
        paragraphs[header.paragraph].meta.is_header = true;
    }
    for (index, _) in parts.title_paragraphs() {
        paragraphs[index].meta.is_header = true;
    }

    accepted
}

/// Group candidates into adjacency runs and keep the valid ones.
pub fn accept_runs(candidates: &[Header], accept_isolated: bool) -> Vec<Header> {
    let mut accepted = Vec::new();
    let mut run: Vec<Header> = Vec::new();

    for candidate in candidates {
        let extends = run.last().is_some_and(|last| {
            candidate.paragraph == last.paragraph + 1 && candidate.marker != HeaderMarker::Chapter
        });
        if !extends && !run.is_empty() {
            if run_is_valid(&run, accept_isolated) {
                accepted.append(&mut run);
            } else {
                log::debug!(
                    "discarding header run at paragraph {} ({} candidates)",
                    run[0].paragraph,
                    run.len()
                );
                run.clear();
            }
        }
        run.push(*candidate);
    }

    if !run.is_empty() {
        if run_is_valid(&run, true) {
            accepted.append(&mut run);
        } else {
            log::debug!("discarding terminal header run at paragraph {}", run[0].paragraph);
        }
    }

    accepted
}

fn run_is_valid(run: &[Header], accept_singleton: bool) -> bool {
    match run.len() {
        0 => false,
        1 => accept_singleton,
        _ => run.windows(2).all(|pair| pair[0].level < pair[1].level),
    }
}
