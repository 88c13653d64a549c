//! Whatrobe Core: data model, Stage trait and recommend pipeline runner
//!
//! A recommend run normalizes preferences, short-circuits small inventories,
//! then lets each stage add outfits to a shared [`CandidatePool`] until it
//! holds [`MAX_OUTFITS`] candidates.
//!
//! ```text
//! inventory + preferences → normalize → proposer → composer (if needed) → ≤5 outfits
//! ```

pub mod data_model;
pub mod labels;
pub mod preferences;
pub mod pool;
pub mod stage;
pub mod runner;
pub mod context;
pub mod error;

pub use data_model::{
    CandidateSource, ClothingItem, ItemRef, OutfitCandidate, OutfitKey, PartialPreferences,
    Preferences,
};
pub use labels::{Category, Color, Fit, Formality, Label, Style};
pub use pool::{CandidatePool, Rejection};
pub use stage::{Stage, StageError, StageInput, StageOutcome};
pub use runner::{PipelineRunner, Recommendation, RecommendStatus, RunProof, StageProof};
pub use context::ExecutionContext;
pub use error::WhatrobeError;

/// Engine version
pub const WHATROBE_VERSION: &str = "1.0.0";

/// Upper bound on outfits returned by one run.
pub const MAX_OUTFITS: usize = 5;

/// Smallest inventory that is worth running the stages for.
pub const MIN_INVENTORY: usize = 2;

pub const MIN_OUTFIT_ITEMS: usize = 2;
pub const MAX_OUTFIT_ITEMS: usize = 4;
