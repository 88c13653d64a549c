//! Whatrobe Composer: deterministic fallback outfit generation
//!
//! When the generative proposer leaves the pool short of five outfits, the
//! composer enumerates inventory combinations filtered by a
//! [`CompatibilityPolicy`]: color harmony, formality distance and
//! weather-driven layering. Given the same inventory, preferences and seed it
//! always produces the same outfits.
//!
//! # Example
//!
//! ```ignore
//! use whatrobe_composer::{CompatibilityPolicy, ComposerStage};
//!
//! let policy = CompatibilityPolicy::load("config/compatibility.yaml")?;
//! let stage = ComposerStage::new(policy);
//! ```

pub mod composer;
pub mod describe;
pub mod formality;
pub mod palette;
pub mod policy;

pub use composer::{ComposerStage, Wardrobe};
pub use palette::{ColorPalette, Harmony};
pub use policy::{CompatibilityPolicy, PolicyError};
