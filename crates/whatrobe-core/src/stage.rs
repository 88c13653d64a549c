//! Stage Trait: the single contract every candidate-producing stage follows
use crate::context::ExecutionContext;
use crate::data_model::{ClothingItem, Preferences};
use crate::pool::CandidatePool;
use async_trait::async_trait;
use thiserror::Error;

/// Read-only input shared by all stages of a run.
#[derive(Debug, Clone, Copy)]
pub struct StageInput<'a> {
    pub inventory: &'a [ClothingItem],
    pub preferences: &'a Preferences,
}

/// Counts reported by a stage after it ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageOutcome {
    pub accepted: usize,
    pub rejected: usize,
}

#[async_trait]
pub trait Stage: Send + Sync {
    /// Unique stage id (e.g. "proposer.generative.v1")
    fn id(&self) -> &'static str;

    /// Whether the stage is reproducible given the context seed (default: true)
    fn deterministic(&self) -> bool {
        true
    }

    /// Add candidates to the pool. Errors are recovered by the runner.
    async fn run(
        &self,
        input: StageInput<'_>,
        pool: &mut CandidatePool,
        ctx: &mut ExecutionContext,
    ) -> Result<StageOutcome, StageError>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StageError {
    #[error("STAGE/UNAVAILABLE: {0}")]
    Unavailable(String),

    #[error("STAGE/OUTPUT: {0}")]
    InvalidOutput(String),

    #[error("STAGE/EXEC: {0}")]
    ExecutionFailed(String),
}
