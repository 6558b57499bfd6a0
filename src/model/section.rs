//! Section (page geometry) types.

use serde::{Deserialize, Serialize};

/// Page geometry of one document section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Page size in centimetres
    pub page_size: PageSize,

    /// Page margins in centimetres
    pub margins: PageMargins,

    /// Whether the footers of this section show a page number
    #[serde(default)]
    pub page_numbers: bool,
}

impl Section {
    /// Create a section with the given page size and margins.
    pub fn new(page_size: PageSize, margins: PageMargins) -> Self {
        Self {
            page_size,
            margins,
            page_numbers: false,
        }
    }

    /// Create an A4 section with the given margins.
    pub fn a4(margins: PageMargins) -> Self {
        Self::new(PageSize::A4, margins)
    }

    /// Set whether pages are numbered.
    pub fn with_page_numbers(mut self, numbered: bool) -> Self {
        self.page_numbers = numbered;
        self
    }
}

/// Page size in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl PageSize {
    /// A4 portrait (21.0 x 29.7 cm).
    pub const A4: PageSize = PageSize {
        width: 21.0,
        height: 29.7,
    };

    /// Compare with a tolerance of one millimetre.
    pub fn approx_eq(&self, other: &PageSize) -> bool {
        approx(self.width, other.width) && approx(self.height, other.height)
    }
}

/// Page margins in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageMargins {
    /// Top margin
    pub top: f32,
    /// Right margin
    pub right: f32,
    /// Bottom margin
    pub bottom: f32,
    /// Left margin
    pub left: f32,
}

impl PageMargins {
    /// Create margins.
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Compare with a tolerance of one millimetre.
    pub fn approx_eq(&self, other: &PageMargins) -> bool {
        approx(self.top, other.top)
            && approx(self.right, other.right)
            && approx(self.bottom, other.bottom)
            && approx(self.left, other.left)
    }
}

impl std::fmt::Display for PageMargins {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "left {}, right {}, top {}, bottom {}",
            self.left, self.right, self.top, self.bottom
        )
    }
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.05
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_tolerance() {
        let size = PageSize {
            width: 21.01,
            height: 29.7,
        };
        assert!(size.approx_eq(&PageSize::A4));
        assert!(!PageSize {
            width: 21.6,
            height: 27.9
        }
        .approx_eq(&PageSize::A4));
    }

    #[test]
    fn test_margins_display() {
        let m = PageMargins::new(2.0, 1.0, 2.0, 3.0);
        assert_eq!(m.to_string(), "left 3, right 1, top 2, bottom 2");
    }
}
