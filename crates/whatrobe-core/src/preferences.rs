//! Preference normalization.
//!
//! Occasion, style and weather are descriptive, not enumerated: any value
//! passes through unchanged. Missing or blank fields take the defaults.

use crate::data_model::{PartialPreferences, Preferences};

pub const DEFAULT_OCCASION: &str = "casual";
pub const DEFAULT_STYLE: &str = "comfortable";
pub const DEFAULT_WEATHER: &str = "moderate";

/// Fill in defaults for every missing field. Never fails.
pub fn normalize(partial: &PartialPreferences) -> Preferences {
    Preferences {
        occasion: field_or(partial.occasion.as_deref(), DEFAULT_OCCASION),
        style: field_or(partial.style.as_deref(), DEFAULT_STYLE),
        weather: field_or(partial.weather.as_deref(), DEFAULT_WEATHER),
    }
}

fn field_or(value: Option<&str>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

impl Default for Preferences {
    fn default() -> Self {
        normalize(&PartialPreferences::default())
    }
}
