//! Pipeline Runner: short-circuit, run stages in order until the pool is full
use crate::context::ExecutionContext;
use crate::data_model::{ClothingItem, OutfitCandidate, PartialPreferences, Preferences};
use crate::pool::CandidatePool;
use crate::preferences;
use crate::stage::{Stage, StageInput};
use crate::{MAX_OUTFITS, MIN_INVENTORY, WHATROBE_VERSION};
use serde::{Deserialize, Serialize};
use std::time::Instant;

pub const INSUFFICIENT_INVENTORY_MESSAGE: &str =
    "Not enough items in wardrobe. Add at least 2 items.";
pub const NO_CANDIDATES_MESSAGE: &str =
    "No compatible combinations found. Try adding items in other categories or colors.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendStatus {
    Ok,
    /// Fewer than two items; no stage ran.
    InsufficientInventory,
    /// Stages ran but none produced a valid outfit.
    NoCandidates,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub status: RecommendStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub preferences: Preferences,
    pub outfits: Vec<OutfitCandidate>,
    pub proof: RunProof,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunProof {
    pub engine: String,
    pub pipeline_id: String,
    pub trace_id: String,
    pub seed: Option<u64>,
    pub stages: Vec<StageProof>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageProof {
    pub id: String,
    pub in_hash: String,
    pub out_hash: String,
    pub deterministic: bool,
    pub latency_ms: u64,
    pub accepted: usize,
    pub rejected: usize,
    /// Pool was already full, the stage was not invoked.
    pub skipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct PipelineRunner {
    stages: Vec<Box<dyn Stage>>,
    pipeline_id: String,
    capacity: usize,
}

impl PipelineRunner {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        let pipeline_id = stages
            .iter()
            .map(|s| s.id().split('.').next().unwrap_or("?"))
            .collect::<Vec<_>>()
            .join("→");

        Self {
            stages,
            pipeline_id,
            capacity: MAX_OUTFITS,
        }
    }

    /// Recommend outfits. Never fails: every failure degrades to fewer outfits.
    pub async fn run(
        &self,
        inventory: &[ClothingItem],
        partial: &PartialPreferences,
        ctx: &mut ExecutionContext,
    ) -> Recommendation {
        let preferences = preferences::normalize(partial);
        let mut proof = RunProof {
            engine: format!("whatrobe@{}", WHATROBE_VERSION),
            pipeline_id: self.pipeline_id.clone(),
            trace_id: ctx.trace_id.clone(),
            seed: ctx.determinism_seed,
            stages: Vec::new(),
        };

        if inventory.len() < MIN_INVENTORY {
            tracing::info!(
                trace_id = %ctx.trace_id,
                user = %ctx.user_id,
                items = inventory.len(),
                "inventory too small, skipping recommendation"
            );
            return Recommendation {
                status: RecommendStatus::InsufficientInventory,
                message: Some(INSUFFICIENT_INVENTORY_MESSAGE.to_string()),
                preferences,
                outfits: Vec::new(),
                proof,
            };
        }

        let mut pool = CandidatePool::for_inventory(inventory, self.capacity);
        let input = StageInput {
            inventory,
            preferences: &preferences,
        };

        for stage in &self.stages {
            let in_hash = pool.fingerprint();

            if pool.is_full() {
                proof.stages.push(StageProof {
                    id: stage.id().to_string(),
                    out_hash: in_hash.clone(),
                    in_hash,
                    deterministic: stage.deterministic(),
                    latency_ms: 0,
                    accepted: 0,
                    rejected: 0,
                    skipped: true,
                    error: None,
                });
                continue;
            }

            let start = Instant::now();
            let before = pool.len();
            let (outcome, error) = match stage.run(input, &mut pool, ctx).await {
                Ok(outcome) => (outcome, None),
                Err(e) => {
                    tracing::warn!(
                        trace_id = %ctx.trace_id,
                        stage = stage.id(),
                        error = %e,
                        "stage failed, continuing with remaining stages"
                    );
                    (Default::default(), Some(e.to_string()))
                }
            };
            let latency_ms = start.elapsed().as_millis() as u64;

            tracing::debug!(
                stage = stage.id(),
                accepted = outcome.accepted,
                rejected = outcome.rejected,
                latency_ms,
                "stage finished"
            );

            proof.stages.push(StageProof {
                id: stage.id().to_string(),
                in_hash,
                out_hash: pool.fingerprint(),
                deterministic: stage.deterministic(),
                latency_ms,
                accepted: pool.len() - before,
                rejected: outcome.rejected,
                skipped: false,
                error,
            });
        }

        let outfits = pool.into_candidates();
        let (status, message) = if outfits.is_empty() {
            (RecommendStatus::NoCandidates, Some(NO_CANDIDATES_MESSAGE.to_string()))
        } else {
            (RecommendStatus::Ok, None)
        };

        tracing::info!(
            trace_id = %ctx.trace_id,
            user = %ctx.user_id,
            pipeline = %self.pipeline_id,
            outfits = outfits.len(),
            status = ?status,
            "recommendation complete"
        );

        Recommendation {
            status,
            message,
            preferences,
            outfits,
            proof,
        }
    }

    pub fn pipeline_id(&self) -> &str {
        &self.pipeline_id
    }

    pub fn stage_ids(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.id()).collect()
    }
}
