//! Part segmentation.
//!
//! A thesis has a fixed set of top-level parts, each opened by a title
//! paragraph with a known text ("ВВЕДЕНИЕ", "ЗАКЛЮЧЕНИЕ", ...). The segmenter
//! finds those titles and slices the paragraph sequence into ranges.

use crate::model::{Paragraph, PartType};
use serde::Serialize;
use std::ops::Range;

/// Known part titles (lowercase) in Russian, Belarusian and English.
const PART_TITLES: &[(&str, PartType)] = &[
    ("содержание", PartType::Toc),
    ("змест", PartType::Toc),
    ("реферат", PartType::Abstract),
    ("рэферат", PartType::Abstract),
    ("abstract", PartType::Abstract),
    ("введение", PartType::Introduction),
    ("ўводзіны", PartType::Introduction),
    ("уводзіны", PartType::Introduction),
    ("заключение", PartType::Conclusion),
    ("вынікі", PartType::Conclusion),
    ("список использованных источников", PartType::Bibliography),
    ("список использованной литературы", PartType::Bibliography),
    ("спіс выкарыстаных крыніц", PartType::Bibliography),
    ("приложения", PartType::Annex),
];

/// Part type for a paragraph text if it is exactly a known part title.
pub fn part_for_title(text: &str) -> Option<PartType> {
    let normalized = text.trim().to_lowercase();
    PART_TITLES
        .iter()
        .find(|(title, _)| *title == normalized)
        .map(|(_, part)| *part)
}

/// A contiguous range of paragraphs belonging to one part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartRange {
    /// Part type
    pub part: PartType,

    /// First paragraph (the title paragraph for titled parts)
    pub start: usize,

    /// One past the last paragraph
    pub end: usize,

    /// Whether `start` is a recognised title paragraph
    pub titled: bool,
}

impl PartRange {
    fn new(part: PartType, start: usize, end: usize, titled: bool) -> Self {
        Self {
            part,
            start,
            end,
            titled,
        }
    }

    /// Paragraph range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Title paragraph, if the part has one.
    pub fn title(&self) -> Option<usize> {
        self.titled.then_some(self.start)
    }

    /// Number of paragraphs.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the range is empty.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check if a paragraph lies in this part.
    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }
}

/// The top-level parts found in a document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentParts {
    /// Paragraphs before the first part title
    pub title: Option<PartRange>,
    /// Abstracts, in document order
    pub abstracts: Vec<PartRange>,
    /// Table of contents
    pub toc: Option<PartRange>,
    /// Introduction (shortened once the main part is split off)
    pub introduction: Option<PartRange>,
    /// Numbered main part
    pub main: Option<PartRange>,
    /// Conclusion
    pub conclusion: Option<PartRange>,
    /// Bibliography
    pub bibliography: Option<PartRange>,
    /// Annexes
    pub annex: Option<PartRange>,
}

impl DocumentParts {
    /// Check if at least one part title was found.
    pub fn is_recognized(&self) -> bool {
        !self.title_paragraphs().is_empty()
    }

    /// Every titled part, in document order.
    pub fn titled_parts(&self) -> Vec<&PartRange> {
        let mut parts: Vec<&PartRange> = self
            .abstracts
            .iter()
            .chain(self.toc.iter())
            .chain(self.introduction.iter())
            .chain(self.conclusion.iter())
            .chain(self.bibliography.iter())
            .chain(self.annex.iter())
            .filter(|p| p.titled)
            .collect();
        parts.sort_by_key(|p| p.start);
        parts
    }

    /// Title paragraphs with their part types, in document order.
    pub fn title_paragraphs(&self) -> Vec<(usize, PartType)> {
        self.titled_parts()
            .into_iter()
            .map(|p| (p.start, p.part))
            .collect()
    }

    /// Position of the first part title.
    pub fn first_title(&self) -> Option<usize> {
        self.titled_parts().first().map(|p| p.start)
    }

    /// Split the introduction at the first main-part header.
    ///
    /// The introduction keeps `start..header`, the main part gets
    /// `header..end`. Ignored if `header` is outside the introduction body.
    pub fn split_introduction(&mut self, header: usize) {
        let Some(intro) = self.introduction.as_mut() else {
            return;
        };
        if header <= intro.start || header >= intro.end {
            return;
        }
        self.main = Some(PartRange::new(PartType::Main, header, intro.end, false));
        intro.end = header;
    }
}

/// Find part titles and slice the document into parts.
pub fn segment(paragraphs: &[Paragraph]) -> DocumentParts {
    let titles: Vec<(usize, PartType)> = paragraphs
        .iter()
        .filter_map(|p| part_for_title(&p.pure_text()).map(|part| (p.index, part)))
        .collect();

    let mut parts = DocumentParts::default();

    let Some(&(first, _)) = titles.first() else {
        log::debug!("no part titles found, treating the document as one main part");
        if !paragraphs.is_empty() {
            parts.main = Some(PartRange::new(PartType::Main, 0, paragraphs.len(), false));
        }
        return parts;
    };

    if first > 0 {
        parts.title = Some(PartRange::new(PartType::Title, 0, first, false));
    }

    for (i, &(start, part)) in titles.iter().enumerate() {
        let end = titles
            .get(i + 1)
            .map(|(next, _)| *next)
            .unwrap_or(paragraphs.len());
        let range = PartRange::new(part, start, end, true);
        match part {
            PartType::Abstract => parts.abstracts.push(range),
            PartType::Toc => parts.toc = Some(range),
            PartType::Introduction => parts.introduction = Some(range),
            PartType::Conclusion => parts.conclusion = Some(range),
            PartType::Bibliography => parts.bibliography = Some(range),
            PartType::Annex => parts.annex = Some(range),
            PartType::Title | PartType::Main => {}
        }
    }

    log::debug!("found {} part titles", titles.len());
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Document;

    fn segment_lines(lines: &[&str]) -> DocumentParts {
        let doc = Document::from_lines(lines.iter().copied());
        segment(&doc.paragraphs)
    }

    #[test]
    fn test_title_lookup() {
        assert_eq!(part_for_title("ВВЕДЕНИЕ"), Some(PartType::Introduction));
        assert_eq!(part_for_title(" Змест "), Some(PartType::Toc));
        assert_eq!(
            part_for_title("Список использованных источников"),
            Some(PartType::Bibliography)
        );
        assert_eq!(part_for_title("Введение в проблему"), None);
    }

    #[test]
    fn test_segment_ranges() {
        let parts = segment_lines(&[
            "Министерство образования",
            "РЕФЕРАТ",
            "Ключевые слова",
            "СОДЕРЖАНИЕ",
            "ВВЕДЕНИЕ",
            "Текст",
            "ЗАКЛЮЧЕНИЕ",
            "СПИСОК ИСПОЛЬЗОВАННЫХ ИСТОЧНИКОВ",
            "1. Источник",
        ]);

        assert!(parts.is_recognized());
        assert_eq!(parts.title.as_ref().map(PartRange::range), Some(0..1));
        assert_eq!(parts.abstracts[0].range(), 1..3);
        assert_eq!(parts.toc.as_ref().map(PartRange::range), Some(3..4));
        assert_eq!(parts.introduction.as_ref().map(PartRange::range), Some(4..6));
        assert_eq!(parts.bibliography.as_ref().map(PartRange::range), Some(7..9));
        assert!(parts.main.is_none());
        assert_eq!(parts.first_title(), Some(1));
    }

    #[test]
    fn test_multiple_abstracts_kept() {
        let parts = segment_lines(&["РЕФЕРАТ", "а", "РЭФЕРАТ", "б", "ABSTRACT", "в"]);
        assert_eq!(parts.abstracts.len(), 3);
        assert!(parts.title.is_none());
    }

    #[test]
    fn test_duplicate_part_last_wins() {
        let parts = segment_lines(&["ВВЕДЕНИЕ", "а", "ВВЕДЕНИЕ", "б"]);
        assert_eq!(parts.introduction.as_ref().map(|p| p.start), Some(2));
    }

    #[test]
    fn test_page_break_marker_ignored() {
        let parts = segment_lines(&["текст", "{PageBreak}ВВЕДЕНИЕ"]);
        assert_eq!(parts.introduction.as_ref().map(|p| p.start), Some(1));
    }

    #[test]
    fn test_no_titles_is_main_part() {
        let parts = segment_lines(&["a", "b", "c"]);
        assert!(!parts.is_recognized());
        assert_eq!(parts.main.as_ref().map(PartRange::range), Some(0..3));
        assert!(parts.title.is_none());
    }

    #[test]
    fn test_split_introduction() {
        let mut parts = segment_lines(&["ВВЕДЕНИЕ", "текст", "1 Обзор", "текст", "ЗАКЛЮЧЕНИЕ"]);
        parts.split_introduction(2);
        assert_eq!(parts.introduction.as_ref().map(PartRange::range), Some(0..2));
        assert_eq!(parts.main.as_ref().map(PartRange::range), Some(2..4));

        let mut parts = segment_lines(&["ВВЕДЕНИЕ", "текст"]);
        parts.split_introduction(0);
        assert!(parts.main.is_none());
    }
}
