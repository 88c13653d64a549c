//! Candidate pool shared by the stages of one recommend run.
//!
//! The pool owns the anti-redundancy set and enforces the outfit invariants
//! centrally, so a stage cannot emit an outfit that references unknown items,
//! has the wrong size, or repeats an item set already emitted.

use crate::data_model::{ClothingItem, OutfitCandidate, OutfitKey};
use crate::{MAX_OUTFIT_ITEMS, MIN_OUTFIT_ITEMS};
use std::collections::HashSet;

/// Why a candidate was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Capacity already reached.
    Full,
    /// Same item set already emitted in this run.
    Duplicate,
    /// Fewer than two or more than four items.
    Size,
    /// References an id that is not in the inventory.
    UnknownItem,
}

#[derive(Debug, Clone)]
pub struct CandidatePool {
    capacity: usize,
    known_ids: HashSet<String>,
    seen: HashSet<OutfitKey>,
    candidates: Vec<OutfitCandidate>,
}

impl CandidatePool {
    pub fn for_inventory(inventory: &[ClothingItem], capacity: usize) -> Self {
        Self {
            capacity,
            known_ids: inventory.iter().map(|item| item.id.clone()).collect(),
            seen: HashSet::new(),
            candidates: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.candidates.len() >= self.capacity
    }

    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.candidates.len())
    }

    /// Whether an outfit with exactly this item set was already emitted.
    pub fn contains(&self, key: &OutfitKey) -> bool {
        self.seen.contains(key)
    }

    pub fn try_push(&mut self, candidate: OutfitCandidate) -> Result<(), Rejection> {
        if self.is_full() {
            return Err(Rejection::Full);
        }

        let key = candidate.key();
        if key.len() != candidate.item_ids.len()
            || key.len() < MIN_OUTFIT_ITEMS
            || key.len() > MAX_OUTFIT_ITEMS
        {
            return Err(Rejection::Size);
        }
        if key.ids().any(|id| !self.known_ids.contains(id)) {
            return Err(Rejection::UnknownItem);
        }
        if !self.seen.insert(key) {
            return Err(Rejection::Duplicate);
        }

        self.candidates.push(candidate);
        Ok(())
    }

    pub fn candidates(&self) -> &[OutfitCandidate] {
        &self.candidates
    }

    /// Stable digest of the emitted item sets, in emission order.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for candidate in &self.candidates {
            for id in candidate.key().ids() {
                hasher.update(id.as_bytes());
                hasher.update(b",");
            }
            hasher.update(b";");
        }
        format!("blake3:{}", hasher.finalize())
    }

    pub fn into_candidates(self) -> Vec<OutfitCandidate> {
        self.candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_model::{CandidateSource, Preferences};
    use crate::labels::{Category, Color, Fit, Style};

    fn inventory() -> Vec<ClothingItem> {
        ["a", "b", "c", "d", "e"]
            .iter()
            .map(|id| ClothingItem::new(*id, Category::Tops, Color::Black, Style::Casual, Fit::Regular))
            .collect()
    }

    fn outfit(ids: &[&str]) -> OutfitCandidate {
        let inv: Vec<ClothingItem> = ids
            .iter()
            .map(|id| ClothingItem::new(*id, Category::Tops, Color::Black, Style::Casual, Fit::Regular))
            .collect();
        let refs: Vec<&ClothingItem> = inv.iter().collect();
        OutfitCandidate::from_items("x", "n", &refs, &Preferences::default(), CandidateSource::Composer)
    }

    #[test]
    fn test_rejects_duplicates_in_any_order() {
        let mut pool = CandidatePool::for_inventory(&inventory(), 5);
        assert!(pool.try_push(outfit(&["a", "b"])).is_ok());
        assert_eq!(pool.try_push(outfit(&["b", "a"])), Err(Rejection::Duplicate));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_rejects_bad_sizes_and_unknown_ids() {
        let mut pool = CandidatePool::for_inventory(&inventory(), 5);
        assert_eq!(pool.try_push(outfit(&["a"])), Err(Rejection::Size));
        assert_eq!(pool.try_push(outfit(&["a", "b", "c", "d", "e"])), Err(Rejection::Size));
        assert_eq!(pool.try_push(outfit(&["a", "zzz"])), Err(Rejection::UnknownItem));
        assert!(pool.is_empty());
    }

    #[test]
    fn test_repeated_id_is_a_size_error() {
        let mut pool = CandidatePool::for_inventory(&inventory(), 5);
        assert_eq!(pool.try_push(outfit(&["a", "a"])), Err(Rejection::Size));
    }

    #[test]
    fn test_capacity() {
        let mut pool = CandidatePool::for_inventory(&inventory(), 2);
        pool.try_push(outfit(&["a", "b"])).unwrap();
        pool.try_push(outfit(&["a", "c"])).unwrap();
        assert!(pool.is_full());
        assert_eq!(pool.remaining(), 0);
        assert_eq!(pool.try_push(outfit(&["a", "d"])), Err(Rejection::Full));
    }

    #[test]
    fn test_fingerprint_tracks_contents() {
        let mut pool = CandidatePool::for_inventory(&inventory(), 5);
        let empty = pool.fingerprint();
        pool.try_push(outfit(&["a", "b"])).unwrap();
        assert_ne!(empty, pool.fingerprint());
        assert!(pool.fingerprint().starts_with("blake3:"));
    }
}
