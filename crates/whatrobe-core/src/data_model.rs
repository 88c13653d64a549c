//! Data Model: ClothingItem, Preferences, OutfitCandidate
use crate::labels::{Category, Color, Fit, Formality, Style};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A tagged garment from the user's inventory. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItem {
    pub id: String,
    pub category: Category,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<Color>,
    pub style: Style,
    pub fit: Fit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formality: Option<Formality>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Opaque storage reference, never interpreted here.
    pub image_ref: String,
}

impl ClothingItem {
    pub fn new(
        id: impl Into<String>,
        category: Category,
        color: Color,
        style: Style,
        fit: Fit,
    ) -> Self {
        let id = id.into();
        Self {
            image_ref: format!("images/{}", id),
            id,
            category,
            color,
            secondary_color: None,
            style,
            fit,
            pattern: None,
            material: None,
            formality: None,
            tags: Vec::new(),
            description: None,
        }
    }

    pub fn with_formality(mut self, formality: Formality) -> Self {
        self.formality = Some(formality);
        self
    }

    pub fn with_secondary_color(mut self, color: Color) -> Self {
        self.secondary_color = Some(color);
        self
    }

    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = image_ref.into();
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Formality level, or `default` when the item carries no tag.
    pub fn formality_or(&self, default: Formality) -> Formality {
        self.formality.unwrap_or(default)
    }

    /// The projection of this item carried inside an outfit.
    pub fn to_ref(&self) -> ItemRef {
        ItemRef {
            id: self.id.clone(),
            image_ref: self.image_ref.clone(),
            category: self.category,
            color: self.color,
        }
    }
}

/// Outfit-facing projection of a [`ClothingItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRef {
    pub id: String,
    pub image_ref: String,
    pub category: Category,
    pub color: Color,
}

/// Preferences as supplied by the caller; every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialPreferences {
    #[serde(default)]
    pub occasion: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub weather: Option<String>,
}

impl PartialPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn occasion(mut self, occasion: impl Into<String>) -> Self {
        self.occasion = Some(occasion.into());
        self
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn weather(mut self, weather: impl Into<String>) -> Self {
        self.weather = Some(weather.into());
        self
    }
}

/// Complete preference tuple, produced by [`crate::preferences::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub occasion: String,
    pub style: String,
    pub weather: String,
}

/// Which stage produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateSource {
    #[default]
    Proposer,
    Composer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitCandidate {
    pub id: String,
    pub name: String,
    pub items: Vec<ItemRef>,
    pub item_ids: Vec<String>,
    pub occasion: String,
    pub style: String,
    pub weather: String,
    pub description: String,
    pub ai_reason: String,
    #[serde(default)]
    pub source: CandidateSource,
}

impl OutfitCandidate {
    /// Assemble a candidate from inventory items, echoing the preferences.
    pub fn from_items(
        id: impl Into<String>,
        name: impl Into<String>,
        items: &[&ClothingItem],
        preferences: &Preferences,
        source: CandidateSource,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            items: items.iter().map(|item| item.to_ref()).collect(),
            item_ids: items.iter().map(|item| item.id.clone()).collect(),
            occasion: preferences.occasion.clone(),
            style: preferences.style.clone(),
            weather: preferences.weather.clone(),
            description: String::new(),
            ai_reason: String::new(),
            source,
        }
    }

    pub fn with_rationale(mut self, description: impl Into<String>, ai_reason: impl Into<String>) -> Self {
        self.description = description.into();
        self.ai_reason = ai_reason.into();
        self
    }

    /// Override the echoed style label (dress looks are always "elegant").
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn key(&self) -> OutfitKey {
        OutfitKey::from_ids(&self.item_ids)
    }
}

/// Order-independent identity of an outfit: the set of its item ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutfitKey(BTreeSet<String>);

impl OutfitKey {
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(ids.into_iter().map(|id| id.as_ref().to_string()).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs() -> Preferences {
        Preferences {
            occasion: "casual".to_string(),
            style: "comfortable".to_string(),
            weather: "moderate".to_string(),
        }
    }

    #[test]
    fn test_outfit_key_ignores_order() {
        assert_eq!(OutfitKey::from_ids(["a", "b", "c"]), OutfitKey::from_ids(["c", "a", "b"]));
        assert_ne!(OutfitKey::from_ids(["a", "b"]), OutfitKey::from_ids(["a", "b", "c"]));
    }

    #[test]
    fn test_candidate_projection() {
        let top = ClothingItem::new("t1", Category::Tops, Color::Black, Style::Casual, Fit::Slim)
            .with_image_ref("r2://t1.jpg");
        let bottom = ClothingItem::new("b1", Category::Bottoms, Color::White, Style::Casual, Fit::Regular);

        let outfit = OutfitCandidate::from_items("o1", "Look", &[&top, &bottom], &prefs(), CandidateSource::Composer);

        assert_eq!(outfit.item_ids, vec!["t1", "b1"]);
        assert_eq!(outfit.items[0].image_ref, "r2://t1.jpg");
        assert_eq!(outfit.items[1].category, Category::Bottoms);
        assert_eq!(outfit.weather, "moderate");
        assert_eq!(outfit.key().len(), 2);
    }

    #[test]
    fn test_item_json_shape() {
        let item = ClothingItem::new("t1", Category::Tops, Color::Navy, Style::Business, Fit::Tailored)
            .with_formality(Formality::Business);
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["imageRef"], "images/t1");
        assert_eq!(json["formality"], "business");
        assert!(json.get("secondaryColor").is_none());

        let back: ClothingItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_candidate_accepts_missing_source() {
        let json = serde_json::json!({
            "id": "o1",
            "name": "Saved",
            "items": [],
            "itemIds": ["a", "b"],
            "occasion": "work",
            "style": "formal",
            "weather": "cold",
            "description": "d",
            "aiReason": "r"
        });
        let outfit: OutfitCandidate = serde_json::from_value(json).unwrap();
        assert_eq!(outfit.source, CandidateSource::Proposer);
    }
}
