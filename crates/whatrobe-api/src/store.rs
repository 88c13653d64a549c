//! Per-user inventory and favorites.
//!
//! Both stores are traits so the handlers never see the backing storage.
//! The in-memory versions keep one list per user id behind a
//! `tokio::sync::RwLock`; lists are append-only and read newest first.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use whatrobe_core::{
    Category, ClothingItem, Color, Fit, Formality, OutfitCandidate, Style, WhatrobeError,
};

/// Item as submitted: raw labels from a vision model or a form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClothingItem {
    pub category: Option<String>,
    pub color: Option<String>,
    pub secondary_color: Option<String>,
    pub style: Option<String>,
    pub fit: Option<String>,
    pub pattern: Option<String>,
    pub material: Option<String>,
    pub formality: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub description: Option<String>,
    pub image_ref: Option<String>,
}

impl NewClothingItem {
    /// Normalize every label into the closed sets; unknown values take defaults.
    pub fn into_item(self, id: String) -> ClothingItem {
        let text = |raw: Option<String>| {
            raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };

        let mut item = ClothingItem::new(
            id,
            Category::normalize(self.category.as_deref().unwrap_or_default()),
            Color::normalize(self.color.as_deref().unwrap_or_default()),
            Style::normalize(self.style.as_deref().unwrap_or_default()),
            Fit::normalize(self.fit.as_deref().unwrap_or_default()),
        );
        item.secondary_color = Color::normalize_optional(self.secondary_color.as_deref());
        item.formality = self.formality.as_deref().and_then(Formality::normalize);
        item.pattern = text(self.pattern);
        item.material = text(self.material);
        item.description = text(self.description);
        item.tags = self
            .tags
            .into_iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        if let Some(image_ref) = text(self.image_ref) {
            item.image_ref = image_ref;
        }
        item
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredItem {
    #[serde(flatten)]
    pub item: ClothingItem,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteOutfit {
    #[serde(flatten)]
    pub outfit: OutfitCandidate,
    pub favorited_at: DateTime<Utc>,
}

#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn add(&self, user_id: &str, item: ClothingItem) -> Result<StoredItem, WhatrobeError>;

    /// Newest first, optionally restricted to one category.
    async fn list(&self, user_id: &str, category: Option<Category>) -> Vec<StoredItem>;

    async fn get(&self, user_id: &str, item_id: &str) -> Result<StoredItem, WhatrobeError>;

    async fn delete(&self, user_id: &str, item_id: &str) -> Result<(), WhatrobeError>;

    /// The user's items in insertion order, as the engine consumes them.
    async fn inventory(&self, user_id: &str) -> Vec<ClothingItem>;
}

#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// Saving an outfit id again replaces the earlier copy.
    async fn save(&self, user_id: &str, outfit: OutfitCandidate) -> FavoriteOutfit;

    /// Newest first.
    async fn list(&self, user_id: &str) -> Vec<FavoriteOutfit>;
}

#[derive(Debug, Default)]
pub struct MemoryInventory {
    items: RwLock<HashMap<String, Vec<StoredItem>>>,
}

impl MemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InventoryRepository for MemoryInventory {
    async fn add(&self, user_id: &str, item: ClothingItem) -> Result<StoredItem, WhatrobeError> {
        let mut items = self.items.write().await;
        let list = items.entry(user_id.to_string()).or_default();
        if list.iter().any(|stored| stored.item.id == item.id) {
            return Err(WhatrobeError::DuplicateItem(item.id));
        }

        let stored = StoredItem {
            item,
            created_at: Utc::now(),
        };
        list.push(stored.clone());
        tracing::debug!(user_id, item_id = %stored.item.id, "item added");
        Ok(stored)
    }

    async fn list(&self, user_id: &str, category: Option<Category>) -> Vec<StoredItem> {
        let items = self.items.read().await;
        items
            .get(user_id)
            .map(|list| {
                list.iter()
                    .rev()
                    .filter(|stored| category.map_or(true, |c| stored.item.category == c))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    async fn get(&self, user_id: &str, item_id: &str) -> Result<StoredItem, WhatrobeError> {
        let items = self.items.read().await;
        items
            .get(user_id)
            .and_then(|list| list.iter().find(|stored| stored.item.id == item_id))
            .cloned()
            .ok_or_else(|| WhatrobeError::ItemNotFound(item_id.to_string()))
    }

    async fn delete(&self, user_id: &str, item_id: &str) -> Result<(), WhatrobeError> {
        let mut items = self.items.write().await;
        let list = items
            .get_mut(user_id)
            .ok_or_else(|| WhatrobeError::ItemNotFound(item_id.to_string()))?;
        let index = list
            .iter()
            .position(|stored| stored.item.id == item_id)
            .ok_or_else(|| WhatrobeError::ItemNotFound(item_id.to_string()))?;
        list.remove(index);
        Ok(())
    }

    async fn inventory(&self, user_id: &str) -> Vec<ClothingItem> {
        let items = self.items.read().await;
        items
            .get(user_id)
            .map(|list| list.iter().map(|stored| stored.item.clone()).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Default)]
pub struct MemoryFavorites {
    favorites: RwLock<HashMap<String, Vec<FavoriteOutfit>>>,
}

impl MemoryFavorites {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoriteStore for MemoryFavorites {
    async fn save(&self, user_id: &str, outfit: OutfitCandidate) -> FavoriteOutfit {
        let mut favorites = self.favorites.write().await;
        let list = favorites.entry(user_id.to_string()).or_default();
        list.retain(|f| f.outfit.id != outfit.id);

        let favorite = FavoriteOutfit {
            outfit,
            favorited_at: Utc::now(),
        };
        list.push(favorite.clone());
        favorite
    }

    async fn list(&self, user_id: &str) -> Vec<FavoriteOutfit> {
        let favorites = self.favorites.read().await;
        favorites
            .get(user_id)
            .map(|list| list.iter().rev().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use whatrobe_core::{CandidateSource, Preferences};

    fn raw(category: &str, color: &str) -> NewClothingItem {
        NewClothingItem {
            category: Some(category.to_string()),
            color: Some(color.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_item_is_normalized() {
        let item = NewClothingItem {
            style: Some("Sporty".to_string()),
            fit: Some("skinny".to_string()),
            formality: Some("Smart Casual".to_string()),
            secondary_color: Some(" ".to_string()),
            tags: vec![" Summer ".to_string(), "".to_string()],
            ..raw("Sneakers", "Grey")
        }
        .into_item("i1".to_string());

        assert_eq!(item.category, Category::Shoes);
        assert_eq!(item.color, Color::Gray);
        assert_eq!(item.style, Style::Athletic);
        assert_eq!(item.fit, Fit::Slim);
        assert_eq!(item.formality, Some(Formality::SmartCasual));
        assert_eq!(item.secondary_color, None);
        assert_eq!(item.tags, vec!["summer"]);
        assert_eq!(item.image_ref, "images/i1");
    }

    #[test]
    fn test_missing_labels_take_defaults() {
        let item = NewClothingItem::default().into_item("i2".to_string());
        assert_eq!(item.category, Category::Tops);
        assert_eq!(item.color, Color::Gray);
        assert_eq!(item.style, Style::Casual);
        assert_eq!(item.fit, Fit::Regular);
        assert_eq!(item.formality, None);
    }

    #[tokio::test]
    async fn test_inventory_is_scoped_per_user() {
        let repo = MemoryInventory::new();
        repo.add("alice", raw("tops", "red").into_item("a1".to_string())).await.unwrap();
        repo.add("alice", raw("pants", "navy").into_item("a2".to_string())).await.unwrap();
        repo.add("bob", raw("dress", "black").into_item("b1".to_string())).await.unwrap();

        let listed: Vec<String> = repo.list("alice", None).await.into_iter().map(|s| s.item.id).collect();
        assert_eq!(listed, vec!["a2", "a1"]);
        assert_eq!(repo.list("alice", Some(Category::Bottoms)).await.len(), 1);
        assert_eq!(repo.inventory("alice").await[0].id, "a1");
        assert!(repo.get("alice", "b1").await.is_err());
        assert!(repo.list("carol", None).await.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_and_delete() {
        let repo = MemoryInventory::new();
        let item = raw("tops", "red").into_item("a1".to_string());
        repo.add("u", item.clone()).await.unwrap();
        assert_eq!(repo.add("u", item).await, Err(WhatrobeError::DuplicateItem("a1".to_string())));

        repo.delete("u", "a1").await.unwrap();
        assert_eq!(repo.delete("u", "a1").await, Err(WhatrobeError::ItemNotFound("a1".to_string())));
        assert!(repo.inventory("u").await.is_empty());
    }

    #[tokio::test]
    async fn test_favorites_replace_same_id() {
        let store = MemoryFavorites::new();
        let top = raw("tops", "black").into_item("t".to_string());
        let bottom = raw("bottoms", "white").into_item("b".to_string());
        let outfit = OutfitCandidate::from_items(
            "o1",
            "Look",
            &[&top, &bottom],
            &Preferences::default(),
            CandidateSource::Composer,
        );

        store.save("u", outfit.clone()).await;
        store.save("u", outfit.clone().with_style("elegant")).await;

        let saved = store.list("u").await;
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].outfit.style, "elegant");
        assert!(store.list("other").await.is_empty());
    }
}
