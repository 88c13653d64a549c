//! Shared application state and pipeline assembly.
use crate::config::{ApiConfig, ConfigError};
use crate::metrics::ApiMetrics;
use crate::store::{FavoriteStore, InventoryRepository, MemoryFavorites, MemoryInventory};
use std::sync::Arc;
use whatrobe_composer::{CompatibilityPolicy, ComposerStage};
use whatrobe_core::PipelineRunner;
use whatrobe_proposer::{
    DisabledModel, GenerativeModel, HttpModel, HttpModelConfig, PromptRenderer, ProposerStage,
};

#[derive(Clone)]
pub struct AppState {
    pub runner: Arc<PipelineRunner>,
    pub inventory: Arc<dyn InventoryRepository>,
    pub favorites: Arc<dyn FavoriteStore>,
    pub metrics: Arc<ApiMetrics>,
    /// Applied to every recommend run when set.
    pub seed: Option<u64>,
}

impl AppState {
    /// Proposer then composer, with in-memory stores.
    pub fn new(
        model: Arc<dyn GenerativeModel>,
        policy: CompatibilityPolicy,
        max_tokens: u32,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let renderer = PromptRenderer::new().map_err(|e| ConfigError::Model(e.to_string()))?;
        let runner = PipelineRunner::new(vec![
            Box::new(ProposerStage::new(model, renderer).max_tokens(max_tokens)),
            Box::new(ComposerStage::new(policy)),
        ]);
        let metrics = ApiMetrics::new().map_err(|e| ConfigError::Model(format!("metrics: {}", e)))?;

        Ok(Self {
            runner: Arc::new(runner),
            inventory: Arc::new(MemoryInventory::new()),
            favorites: Arc::new(MemoryFavorites::new()),
            metrics: Arc::new(metrics),
            seed,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ConfigError> {
        let policy = match &config.policy_path {
            Some(path) => CompatibilityPolicy::load(path).map_err(|e| ConfigError::Policy(e.to_string()))?,
            None => CompatibilityPolicy::standard(),
        };

        let model: Arc<dyn GenerativeModel> = match &config.model_url {
            Some(url) => {
                let mut model_config = HttpModelConfig::new(url.clone()).timeout(config.model_timeout);
                if let Some(token) = &config.model_token {
                    model_config = model_config.token(token.clone());
                }
                Arc::new(HttpModel::new(model_config).map_err(|e| ConfigError::Model(e.to_string()))?)
            }
            None => {
                tracing::warn!("WHATROBE_MODEL_URL not set, recommendations use the rule-based composer only");
                Arc::new(DisabledModel)
            }
        };

        tracing::info!(
            policy = %policy.name,
            model = model.name(),
            seeded = config.seed.is_some(),
            "pipeline configured"
        );
        Self::new(model, policy, config.model_max_tokens, config.seed)
    }
}
