//! Closed label sets for clothing items, plus normalization of raw labels.
//!
//! Vision models and users describe garments loosely ("Grey", "sneaker",
//! "sporty"). Everything that enters the engine is normalized first:
//! - Lowercase conversion and whitespace trimming
//! - Alias expansion (synonyms, plurals, regional spellings)
//! - Fallback to a documented default for unknown values

use crate::error::WhatrobeError;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Shared behaviour of the closed label enums.
pub trait Label: Sized + Copy + 'static {
    /// Label family name, used in error messages.
    const KIND: &'static str;
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    /// Exact (canonicalized) match against the label set.
    fn parse_exact(raw: &str) -> Option<Self> {
        let key = canonical(raw);
        Self::ALL.iter().copied().find(|l| l.as_str() == key)
    }
}

/// Lowercase, trim, and fold spaces/underscores into hyphens.
pub fn canonical(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn parse_label<L: Label>(raw: &str) -> Result<L, WhatrobeError> {
    L::parse_exact(raw).ok_or_else(|| WhatrobeError::UnknownLabel {
        kind: L::KIND,
        value: raw.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tops,
    Bottoms,
    Dresses,
    Outerwear,
    Shoes,
    Accessories,
    Bags,
    Jewelry,
}

impl Label for Category {
    const KIND: &'static str = "category";
    const ALL: &'static [Self] = &[
        Self::Tops,
        Self::Bottoms,
        Self::Dresses,
        Self::Outerwear,
        Self::Shoes,
        Self::Accessories,
        Self::Bags,
        Self::Jewelry,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Tops => "tops",
            Self::Bottoms => "bottoms",
            Self::Dresses => "dresses",
            Self::Outerwear => "outerwear",
            Self::Shoes => "shoes",
            Self::Accessories => "accessories",
            Self::Bags => "bags",
            Self::Jewelry => "jewelry",
        }
    }
}

impl Category {
    /// Singular noun used in generated descriptions ("top", "pair of shoes").
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Tops => "top",
            Self::Bottoms => "bottoms",
            Self::Dresses => "dress",
            Self::Outerwear => "outer layer",
            Self::Shoes => "shoes",
            Self::Accessories => "accessory",
            Self::Bags => "bag",
            Self::Jewelry => "jewelry",
        }
    }

    pub fn normalize(raw: &str) -> Self {
        let key = canonical(raw);
        CATEGORY_ALIASES
            .get(key.as_str())
            .copied()
            .or_else(|| Self::parse_exact(&key))
            .unwrap_or(Self::Tops)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
    Gray,
    Red,
    Pink,
    Purple,
    Blue,
    Cyan,
    Green,
    Yellow,
    Orange,
    Brown,
    Beige,
    Navy,
    Maroon,
    Olive,
    Teal,
}

impl Label for Color {
    const KIND: &'static str = "color";
    const ALL: &'static [Self] = &[
        Self::Black,
        Self::White,
        Self::Gray,
        Self::Red,
        Self::Pink,
        Self::Purple,
        Self::Blue,
        Self::Cyan,
        Self::Green,
        Self::Yellow,
        Self::Orange,
        Self::Brown,
        Self::Beige,
        Self::Navy,
        Self::Maroon,
        Self::Olive,
        Self::Teal,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
            Self::Gray => "gray",
            Self::Red => "red",
            Self::Pink => "pink",
            Self::Purple => "purple",
            Self::Blue => "blue",
            Self::Cyan => "cyan",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Brown => "brown",
            Self::Beige => "beige",
            Self::Navy => "navy",
            Self::Maroon => "maroon",
            Self::Olive => "olive",
            Self::Teal => "teal",
        }
    }
}

impl Color {
    /// Black, white and gray pair with every color.
    pub fn is_neutral(&self) -> bool {
        matches!(self, Self::Black | Self::White | Self::Gray)
    }

    pub fn normalize(raw: &str) -> Self {
        let key = canonical(raw);
        COLOR_ALIASES
            .get(key.as_str())
            .copied()
            .or_else(|| Self::parse_exact(&key))
            .unwrap_or(Self::Gray)
    }

    /// Like [`Color::normalize`] but keeps absence as absence.
    pub fn normalize_optional(raw: Option<&str>) -> Option<Self> {
        raw.filter(|s| !s.trim().is_empty()).map(Self::normalize)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Casual,
    Formal,
    Business,
    Athletic,
    Streetwear,
    Bohemian,
    Vintage,
    Minimalist,
    Preppy,
    Edgy,
    Elegant,
    Comfortable,
}

impl Label for Style {
    const KIND: &'static str = "style";
    const ALL: &'static [Self] = &[
        Self::Casual,
        Self::Formal,
        Self::Business,
        Self::Athletic,
        Self::Streetwear,
        Self::Bohemian,
        Self::Vintage,
        Self::Minimalist,
        Self::Preppy,
        Self::Edgy,
        Self::Elegant,
        Self::Comfortable,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Casual => "casual",
            Self::Formal => "formal",
            Self::Business => "business",
            Self::Athletic => "athletic",
            Self::Streetwear => "streetwear",
            Self::Bohemian => "bohemian",
            Self::Vintage => "vintage",
            Self::Minimalist => "minimalist",
            Self::Preppy => "preppy",
            Self::Edgy => "edgy",
            Self::Elegant => "elegant",
            Self::Comfortable => "comfortable",
        }
    }
}

impl Style {
    pub fn normalize(raw: &str) -> Self {
        let key = canonical(raw);
        STYLE_ALIASES
            .get(key.as_str())
            .copied()
            .or_else(|| Self::parse_exact(&key))
            .unwrap_or(Self::Casual)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fit {
    Slim,
    Regular,
    Relaxed,
    Oversized,
    Fitted,
    Loose,
    Tailored,
}

impl Label for Fit {
    const KIND: &'static str = "fit";
    const ALL: &'static [Self] = &[
        Self::Slim,
        Self::Regular,
        Self::Relaxed,
        Self::Oversized,
        Self::Fitted,
        Self::Loose,
        Self::Tailored,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Slim => "slim",
            Self::Regular => "regular",
            Self::Relaxed => "relaxed",
            Self::Oversized => "oversized",
            Self::Fitted => "fitted",
            Self::Loose => "loose",
            Self::Tailored => "tailored",
        }
    }
}

impl Fit {
    pub fn normalize(raw: &str) -> Self {
        let key = canonical(raw);
        FIT_ALIASES
            .get(key.as_str())
            .copied()
            .or_else(|| Self::parse_exact(&key))
            .unwrap_or(Self::Regular)
    }
}

/// Seven-level ordinal formality scale, from loungewear to black tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Formality {
    VeryCasual,
    Casual,
    SmartCasual,
    BusinessCasual,
    Business,
    Formal,
    BlackTie,
}

impl Label for Formality {
    const KIND: &'static str = "formality";
    const ALL: &'static [Self] = &[
        Self::VeryCasual,
        Self::Casual,
        Self::SmartCasual,
        Self::BusinessCasual,
        Self::Business,
        Self::Formal,
        Self::BlackTie,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::VeryCasual => "very-casual",
            Self::Casual => "casual",
            Self::SmartCasual => "smart-casual",
            Self::BusinessCasual => "business-casual",
            Self::Business => "business",
            Self::Formal => "formal",
            Self::BlackTie => "black-tie",
        }
    }
}

impl Formality {
    /// Position on the scale, 0 (very casual) to 6 (black tie).
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Mid-scale level assumed for items with no formality tag.
    pub fn midpoint() -> Self {
        Self::BusinessCasual
    }

    /// Unknown formality labels stay absent rather than guessing a level.
    pub fn normalize(raw: &str) -> Option<Self> {
        let key = canonical(raw);
        if key.is_empty() {
            return None;
        }
        FORMALITY_ALIASES
            .get(key.as_str())
            .copied()
            .or_else(|| Self::parse_exact(&key))
    }
}

macro_rules! label_impls {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl FromStr for $ty {
                type Err = WhatrobeError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    parse_label(s)
                }
            }
        )*
    };
}

label_impls!(Category, Color, Style, Fit, Formality);

lazy_static! {
    static ref CATEGORY_ALIASES: HashMap<&'static str, Category> = {
        let mut m = HashMap::new();
        for alias in ["top", "shirt", "blouse", "tshirt", "t-shirt", "tee", "tank", "polo"] {
            m.insert(alias, Category::Tops);
        }
        for alias in ["sweater", "hoodie", "jacket", "coat", "blazer", "cardigan", "parka"] {
            m.insert(alias, Category::Outerwear);
        }
        for alias in [
            "bottom", "pant", "pants", "jean", "jeans", "short", "shorts", "skirt", "trouser",
            "trousers", "leggings",
        ] {
            m.insert(alias, Category::Bottoms);
        }
        for alias in ["shoe", "sneaker", "sneakers", "boot", "boots", "sandal", "sandals", "heels", "loafers"] {
            m.insert(alias, Category::Shoes);
        }
        for alias in ["dress", "gown", "jumpsuit"] {
            m.insert(alias, Category::Dresses);
        }
        for alias in ["accessory", "hat", "scarf", "belt", "sunglasses", "tie"] {
            m.insert(alias, Category::Accessories);
        }
        for alias in ["bag", "purse", "backpack", "handbag", "tote"] {
            m.insert(alias, Category::Bags);
        }
        for alias in ["necklace", "bracelet", "ring", "earring", "earrings", "watch"] {
            m.insert(alias, Category::Jewelry);
        }
        m
    };

    static ref COLOR_ALIASES: HashMap<&'static str, Color> = {
        let mut m = HashMap::new();
        m.insert("grey", Color::Gray);
        m.insert("charcoal", Color::Gray);
        m.insert("silver", Color::Gray);
        m.insert("burgundy", Color::Maroon);
        m.insert("wine", Color::Maroon);
        m.insert("crimson", Color::Red);
        m.insert("scarlet", Color::Red);
        m.insert("lime", Color::Green);
        m.insert("emerald", Color::Green);
        m.insert("khaki", Color::Beige);
        m.insert("tan", Color::Brown);
        m.insert("camel", Color::Brown);
        m.insert("cream", Color::Beige);
        m.insert("ivory", Color::White);
        m.insert("magenta", Color::Pink);
        m.insert("fuchsia", Color::Pink);
        m.insert("violet", Color::Purple);
        m.insert("indigo", Color::Purple);
        m.insert("lavender", Color::Purple);
        m.insert("denim", Color::Blue);
        m.insert("turquoise", Color::Teal);
        m.insert("aqua", Color::Cyan);
        m.insert("gold", Color::Yellow);
        m.insert("mustard", Color::Yellow);
        m.insert("coral", Color::Orange);
        m.insert("rust", Color::Orange);
        m
    };

    static ref STYLE_ALIASES: HashMap<&'static str, Style> = {
        let mut m = HashMap::new();
        m.insert("professional", Style::Business);
        m.insert("office", Style::Business);
        m.insert("dressy", Style::Formal);
        m.insert("sport", Style::Athletic);
        m.insert("sporty", Style::Athletic);
        m.insert("gym", Style::Athletic);
        m.insert("workout", Style::Athletic);
        m.insert("relaxed", Style::Casual);
        m.insert("everyday", Style::Casual);
        m.insert("street", Style::Streetwear);
        m.insert("boho", Style::Bohemian);
        m.insert("retro", Style::Vintage);
        m.insert("classic", Style::Vintage);
        m.insert("minimal", Style::Minimalist);
        m.insert("chic", Style::Elegant);
        m.insert("cozy", Style::Comfortable);
        m
    };

    static ref FIT_ALIASES: HashMap<&'static str, Fit> = {
        let mut m = HashMap::new();
        m.insert("tight", Fit::Slim);
        m.insert("skinny", Fit::Slim);
        m.insert("baggy", Fit::Oversized);
        m.insert("wide", Fit::Oversized);
        m.insert("standard", Fit::Regular);
        m.insert("normal", Fit::Regular);
        m.insert("straight", Fit::Regular);
        m
    };

    static ref FORMALITY_ALIASES: HashMap<&'static str, Formality> = {
        let mut m = HashMap::new();
        m.insert("loungewear", Formality::VeryCasual);
        m.insert("athleisure", Formality::VeryCasual);
        m.insert("relaxed", Formality::Casual);
        m.insert("everyday", Formality::Casual);
        m.insert("smart", Formality::SmartCasual);
        m.insert("office", Formality::BusinessCasual);
        m.insert("professional", Formality::Business);
        m.insert("semi-formal", Formality::Business);
        m.insert("dressy", Formality::Formal);
        m.insert("white-tie", Formality::BlackTie);
        m.insert("evening", Formality::BlackTie);
        m
    };
}
