//! Color harmony table.
//!
//! Pairings are stored unordered: `[red, green]` makes red compatible with
//! green and green with red. Black, white and gray need no entries, they pair
//! with every color.

use serde::{Deserialize, Serialize};
use whatrobe_core::Color;

/// Which rule made two colors compatible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Harmony {
    Identical,
    Neutral,
    Complementary,
    Analogous,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    /// Opposite hues that contrast without clashing.
    #[serde(default)]
    pub complementary: Vec<[Color; 2]>,
    /// Neighbouring hues that blend.
    #[serde(default)]
    pub analogous: Vec<[Color; 2]>,
}

impl ColorPalette {
    pub fn standard() -> Self {
        use Color::*;

        Self {
            complementary: vec![
                [Red, Green],
                [Red, Cyan],
                [Blue, Orange],
                [Yellow, Purple],
                [Pink, Green],
                [Navy, Beige],
                [Navy, Orange],
                [Brown, Blue],
                [Maroon, Teal],
                [Olive, Maroon],
            ],
            analogous: vec![
                [Red, Orange],
                [Red, Pink],
                [Red, Maroon],
                [Orange, Yellow],
                [Yellow, Green],
                [Green, Teal],
                [Green, Olive],
                [Teal, Cyan],
                [Cyan, Blue],
                [Blue, Navy],
                [Blue, Purple],
                [Purple, Pink],
                [Purple, Maroon],
                [Brown, Beige],
                [Brown, Orange],
                [Brown, Olive],
                [Beige, Olive],
            ],
        }
    }

    /// The rule pairing `a` with `b`, or `None` when they clash.
    pub fn harmony(&self, a: Color, b: Color) -> Option<Harmony> {
        if a == b {
            Some(Harmony::Identical)
        } else if a.is_neutral() || b.is_neutral() {
            Some(Harmony::Neutral)
        } else if paired(&self.complementary, a, b) {
            Some(Harmony::Complementary)
        } else if paired(&self.analogous, a, b) {
            Some(Harmony::Analogous)
        } else {
            None
        }
    }

    pub fn compatible(&self, a: Color, b: Color) -> bool {
        self.harmony(a, b).is_some()
    }

    /// Every color that pairs with `color`, itself included.
    pub fn partners(&self, color: Color) -> Vec<Color> {
        use whatrobe_core::Label;

        Color::ALL
            .iter()
            .copied()
            .filter(|other| self.compatible(color, *other))
            .collect()
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::standard()
    }
}

fn paired(pairs: &[[Color; 2]], a: Color, b: Color) -> bool {
    pairs
        .iter()
        .any(|[x, y]| (*x == a && *y == b) || (*x == b && *y == a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use whatrobe_core::Label;

    #[test]
    fn test_neutrals_pair_with_everything() {
        let palette = ColorPalette::standard();
        for neutral in [Color::Black, Color::White, Color::Gray] {
            for color in Color::ALL {
                assert!(palette.compatible(neutral, *color), "{} vs {}", neutral, color);
            }
        }
        assert_eq!(palette.harmony(Color::Black, Color::White), Some(Harmony::Neutral));
    }

    #[test]
    fn test_harmony_is_symmetric() {
        let palette = ColorPalette::standard();
        for a in Color::ALL {
            for b in Color::ALL {
                assert_eq!(palette.harmony(*a, *b), palette.harmony(*b, *a));
            }
        }
    }

    #[test]
    fn test_rules() {
        let palette = ColorPalette::standard();
        assert_eq!(palette.harmony(Color::Red, Color::Red), Some(Harmony::Identical));
        assert_eq!(palette.harmony(Color::Green, Color::Red), Some(Harmony::Complementary));
        assert_eq!(palette.harmony(Color::Blue, Color::Navy), Some(Harmony::Analogous));
        assert_eq!(palette.harmony(Color::Yellow, Color::Maroon), None);
    }

    #[test]
    fn test_partners() {
        let palette = ColorPalette::standard();
        let partners = palette.partners(Color::Yellow);
        assert!(partners.contains(&Color::Yellow));
        assert!(partners.contains(&Color::Purple));
        assert!(partners.contains(&Color::Gray));
        assert!(!partners.contains(&Color::Navy));
    }

    #[test]
    fn test_empty_palette_keeps_neutral_rule() {
        let palette = ColorPalette {
            complementary: vec![],
            analogous: vec![],
        };
        assert!(palette.compatible(Color::Gray, Color::Orange));
        assert!(!palette.compatible(Color::Red, Color::Green));
    }
}
