//! Compatibility policy for the composer.
//!
//! Defines which items may be worn together: the color harmony table, the
//! formality tolerance and the weather labels that call for a layer.
//! Loadable from YAML; omitted keys keep their standard values.

use crate::formality;
use crate::palette::{ColorPalette, Harmony};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use whatrobe_core::{ClothingItem, Formality};

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("POLICY/IO: {path}: {message}")]
    Io { path: String, message: String },
    #[error("POLICY/PARSE: {0}")]
    Parse(String),
    #[error("POLICY/INVALID: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompatibilityPolicy {
    /// Policy name (e.g., "standard@1.0")
    pub name: String,

    /// Maximum formality steps between two pieces of one outfit.
    pub formality_tolerance: u8,

    /// Level assumed for items without a formality tag.
    pub default_formality: Formality,

    /// Weather labels (case-insensitive) that add an outerwear piece.
    pub layering_weather: Vec<String>,

    /// Shuffle tops and bottoms with the run's generator before pairing.
    pub shuffle: bool,

    /// Dresses considered by the dress strategy.
    pub max_dresses: usize,

    pub palette: ColorPalette,
}

impl CompatibilityPolicy {
    pub fn standard() -> Self {
        Self {
            name: "standard@1.0".to_string(),
            formality_tolerance: 1,
            default_formality: Formality::midpoint(),
            layering_weather: vec!["cold".to_string(), "cool".to_string()],
            shuffle: true,
            max_dresses: 2,
            palette: ColorPalette::standard(),
        }
    }

    /// Parse a policy from YAML and validate it.
    pub fn from_yaml(yaml: &str) -> Result<Self, PolicyError> {
        let policy: Self = serde_yaml::from_str(yaml).map_err(|e| PolicyError::Parse(e.to_string()))?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| PolicyError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml(&yaml)
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        let widest = Formality::BlackTie.rank();
        if self.formality_tolerance > widest {
            return Err(PolicyError::Invalid(format!(
                "formality_tolerance {} exceeds the scale width {}",
                self.formality_tolerance, widest
            )));
        }
        Ok(())
    }

    pub fn formality_of(&self, item: &ClothingItem) -> Formality {
        item.formality_or(self.default_formality)
    }

    pub fn formality_compatible(&self, a: &ClothingItem, b: &ClothingItem) -> bool {
        formality::within(self.formality_of(a), self.formality_of(b), self.formality_tolerance)
    }

    /// Harmony between the primary colors of two items.
    pub fn color_harmony(&self, a: &ClothingItem, b: &ClothingItem) -> Option<Harmony> {
        self.palette.harmony(a.color, b.color)
    }

    /// Color- and formality-compatible.
    pub fn matches(&self, a: &ClothingItem, b: &ClothingItem) -> bool {
        self.color_harmony(a, b).is_some() && self.formality_compatible(a, b)
    }

    pub fn wants_layer(&self, weather: &str) -> bool {
        let weather = weather.trim();
        self.layering_weather
            .iter()
            .any(|w| w.trim().eq_ignore_ascii_case(weather))
    }
}

impl Default for CompatibilityPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
