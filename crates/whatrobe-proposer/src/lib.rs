//! Whatrobe Proposer: generative outfit suggestions
//!
//! The proposer renders the inventory and preferences into a prompt, makes a
//! single bounded call to a [`GenerativeModel`], and turns whatever comes back
//! into validated outfit candidates. It never retries and never fails a
//! recommendation: model and parse errors surface as [`whatrobe_core::StageError`]
//! and the runner falls through to the composer.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use whatrobe_proposer::{HttpModel, HttpModelConfig, PromptRenderer, ProposerStage};
//!
//! let model = HttpModel::new(HttpModelConfig::new("https://ai.example/run").token("secret"))?;
//! let stage = ProposerStage::new(Arc::new(model), PromptRenderer::new()?);
//! ```

pub mod model;
pub mod parser;
pub mod prompt;
pub mod stage;

pub use model::{DisabledModel, GenerativeModel, HttpModel, HttpModelConfig, ModelError};
pub use parser::{parse_response, ParseFailure, ProposedOutfit};
pub use prompt::{PromptError, PromptRenderer};
pub use stage::{CandidateRejection, ProposerStage, DEFAULT_MAX_TOKENS};
