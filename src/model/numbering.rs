//! List numbering definitions.

use serde::{Deserialize, Serialize};

/// Maximum number of levels a numbering definition may have.
pub const MAX_NUMBERING_LEVELS: usize = 9;

/// A list numbering definition referenced by paragraph styles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumberingDefinition {
    /// Definition id
    pub id: u32,

    /// Levels, outermost first
    pub levels: Vec<NumberingLevel>,
}

impl NumberingDefinition {
    /// Create a definition from level label templates.
    pub fn new(id: u32, templates: &[&str]) -> Self {
        Self {
            id,
            levels: templates.iter().map(|t| NumberingLevel::new(*t)).collect(),
        }
    }

    /// Get a level by its 0-based index.
    pub fn level(&self, level: u8) -> Option<&NumberingLevel> {
        self.levels.get(level as usize)
    }
}

/// One level of a numbering definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumberingLevel {
    /// Label template with `%1`..`%9` placeholders (e.g. "%1.%2.")
    pub text: String,

    /// How counters are written when substituted
    #[serde(default)]
    pub style: NumberStyle,

    /// First-line indent override in centimetres
    #[serde(default)]
    pub indent: Option<f32>,
}

impl NumberingLevel {
    /// Create a decimal level with the given template.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: NumberStyle::Decimal,
            indent: None,
        }
    }

    /// Set the number style.
    pub fn with_style(mut self, style: NumberStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the indent override.
    pub fn with_indent(mut self, indent: f32) -> Self {
        self.indent = Some(indent);
        self
    }
}

/// Number style for list labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberStyle {
    /// 1, 2, 3, ...
    #[default]
    Decimal,
    /// a, b, c, ...
    LowerAlpha,
    /// A, B, C, ...
    UpperAlpha,
    /// i, ii, iii, ...
    LowerRoman,
    /// I, II, III, ...
    UpperRoman,
    /// Template is used verbatim
    Bullet,
}

impl NumberStyle {
    /// Write a 1-based counter value in this style.
    pub fn format(self, value: u32) -> String {
        match self {
            NumberStyle::Decimal | NumberStyle::Bullet => value.to_string(),
            NumberStyle::LowerAlpha => alpha(value),
            NumberStyle::UpperAlpha => alpha(value).to_uppercase(),
            NumberStyle::LowerRoman => roman(value).to_lowercase(),
            NumberStyle::UpperRoman => roman(value),
        }
    }
}

fn alpha(mut value: u32) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        value -= 1;
        out.push((b'a' + (value % 26) as u8) as char);
        value /= 26;
    }
    out.iter().rev().collect()
}

fn roman(mut value: u32) -> String {
    const TABLE: [(u32, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    if value == 0 {
        return "0".to_string();
    }
    let mut out = String::new();
    for (n, s) in TABLE {
        while value >= n {
            out.push_str(s);
            value -= n;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_styles() {
        assert_eq!(NumberStyle::Decimal.format(12), "12");
        assert_eq!(NumberStyle::LowerAlpha.format(1), "a");
        assert_eq!(NumberStyle::LowerAlpha.format(27), "aa");
        assert_eq!(NumberStyle::UpperAlpha.format(3), "C");
        assert_eq!(NumberStyle::UpperRoman.format(14), "XIV");
        assert_eq!(NumberStyle::LowerRoman.format(4), "iv");
    }

    #[test]
    fn test_definition_levels() {
        let def = NumberingDefinition::new(1, &["%1.", "%1.%2."]);
        assert_eq!(def.levels.len(), 2);
        assert_eq!(def.level(1).map(|l| l.text.as_str()), Some("%1.%2."));
        assert!(def.level(2).is_none());
    }
}
