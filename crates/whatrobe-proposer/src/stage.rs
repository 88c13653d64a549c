//! Proposer stage: one model call, tolerant parse, per-candidate validation.
use crate::model::GenerativeModel;
use crate::parser::{parse_response, ProposedOutfit};
use crate::prompt::PromptRenderer;
use async_trait::async_trait;
use std::sync::Arc;
use whatrobe_core::{
    CandidatePool, CandidateSource, ClothingItem, ExecutionContext, OutfitCandidate, Preferences,
    Stage, StageError, StageInput, StageOutcome, MAX_OUTFIT_ITEMS, MIN_OUTFIT_ITEMS,
};

/// Output bound requested from the model.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

const DEFAULT_NAME: &str = "AI Suggested Outfit";

/// Why a single proposed outfit was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateRejection {
    MissingItemIds,
    TooFewKnownItems,
    TooManyItems,
}

pub struct ProposerStage {
    model: Arc<dyn GenerativeModel>,
    renderer: PromptRenderer,
    max_tokens: u32,
}

impl ProposerStage {
    pub fn new(model: Arc<dyn GenerativeModel>, renderer: PromptRenderer) -> Self {
        Self {
            model,
            renderer,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[async_trait]
impl Stage for ProposerStage {
    fn id(&self) -> &'static str {
        "proposer.generative.v1"
    }

    fn deterministic(&self) -> bool {
        false
    }

    async fn run(
        &self,
        input: StageInput<'_>,
        pool: &mut CandidatePool,
        ctx: &mut ExecutionContext,
    ) -> Result<StageOutcome, StageError> {
        let prompt = self
            .renderer
            .render(input.inventory, input.preferences)
            .map_err(|e| StageError::ExecutionFailed(e.to_string()))?;

        let raw = self
            .model
            .generate(&prompt, self.max_tokens)
            .await
            .map_err(|e| StageError::Unavailable(e.to_string()))?;

        let proposals = parse_response(&raw).map_err(|e| StageError::InvalidOutput(e.to_string()))?;
        tracing::debug!(
            model = self.model.name(),
            proposals = proposals.len(),
            "model response parsed"
        );

        Ok(accept_proposals(&proposals, input, pool, ctx))
    }
}

/// Validate each proposal and push the survivors into the pool.
pub fn accept_proposals(
    proposals: &[ProposedOutfit],
    input: StageInput<'_>,
    pool: &mut CandidatePool,
    ctx: &mut ExecutionContext,
) -> StageOutcome {
    let mut outcome = StageOutcome::default();

    for proposal in proposals {
        let items = match resolve_items(proposal, input.inventory) {
            Ok(items) => items,
            Err(reason) => {
                tracing::debug!(name = ?proposal.name, ?reason, "dropping proposed outfit");
                outcome.rejected += 1;
                continue;
            }
        };

        let candidate = build_candidate(proposal, &items, input.preferences, ctx.next_id());
        match pool.try_push(candidate) {
            Ok(()) => outcome.accepted += 1,
            Err(reason) => {
                tracing::debug!(name = ?proposal.name, ?reason, "pool refused proposed outfit");
                outcome.rejected += 1;
            }
        }
    }

    outcome
}

/// Map proposed ids onto inventory items: unknown ids are ignored, repeats
/// collapse, model order is kept.
pub fn resolve_items<'a>(
    proposal: &ProposedOutfit,
    inventory: &'a [ClothingItem],
) -> Result<Vec<&'a ClothingItem>, CandidateRejection> {
    let ids = proposal
        .item_ids
        .as_ref()
        .ok_or(CandidateRejection::MissingItemIds)?;

    let mut items: Vec<&ClothingItem> = Vec::new();
    for id in ids {
        if items.iter().any(|item| &item.id == id) {
            continue;
        }
        if let Some(item) = inventory.iter().find(|item| &item.id == id) {
            items.push(item);
        }
    }

    if items.len() < MIN_OUTFIT_ITEMS {
        return Err(CandidateRejection::TooFewKnownItems);
    }
    if items.len() > MAX_OUTFIT_ITEMS {
        return Err(CandidateRejection::TooManyItems);
    }
    Ok(items)
}

fn build_candidate(
    proposal: &ProposedOutfit,
    items: &[&ClothingItem],
    preferences: &Preferences,
    id: String,
) -> OutfitCandidate {
    let name = proposal.name.clone().unwrap_or_else(|| DEFAULT_NAME.to_string());
    let description = proposal.description.clone().unwrap_or_else(|| {
        format!("A {} outfit for {}", preferences.style, preferences.occasion)
    });

    OutfitCandidate::from_items(id, name, items, preferences, CandidateSource::Proposer)
        .with_rationale(description.clone(), description)
}
