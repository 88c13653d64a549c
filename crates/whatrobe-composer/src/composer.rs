//! Rule-based composer stage.
//!
//! Fills the pool after the proposer with two strategies, in order:
//! 1. Top + bottom pairs that match on color and formality, each with the
//!    first matching pair of shoes and, in layering weather, an outer layer.
//! 2. Up to two dresses, each with shoes and an accessory, styled "elegant".
//!
//! When that exact item set is already in the pool, the next matching shoes
//! are tried, then the look without shoes (or, for a dress, without its
//! accessory), before the pair or dress is given up.
//!
//! Tops are visited round-robin so the first outfits use different tops
//! before any top is repeated. All randomness comes from the run's seeded
//! generator.

use crate::describe;
use crate::policy::CompatibilityPolicy;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use whatrobe_core::{
    CandidatePool, CandidateSource, Category, ClothingItem, ExecutionContext, OutfitCandidate,
    OutfitKey, Preferences, Stage, StageError, StageInput, StageOutcome, MIN_OUTFIT_ITEMS,
};

/// Inventory split by the categories the strategies use.
#[derive(Debug, Default)]
pub struct Wardrobe<'a> {
    pub tops: Vec<&'a ClothingItem>,
    pub bottoms: Vec<&'a ClothingItem>,
    pub dresses: Vec<&'a ClothingItem>,
    pub outerwear: Vec<&'a ClothingItem>,
    pub shoes: Vec<&'a ClothingItem>,
    pub accessories: Vec<&'a ClothingItem>,
}

impl<'a> Wardrobe<'a> {
    /// Bags and jewelry are not used by either strategy.
    pub fn partition(inventory: &'a [ClothingItem]) -> Self {
        let mut wardrobe = Self::default();
        for item in inventory {
            match item.category {
                Category::Tops => wardrobe.tops.push(item),
                Category::Bottoms => wardrobe.bottoms.push(item),
                Category::Dresses => wardrobe.dresses.push(item),
                Category::Outerwear => wardrobe.outerwear.push(item),
                Category::Shoes => wardrobe.shoes.push(item),
                Category::Accessories => wardrobe.accessories.push(item),
                Category::Bags | Category::Jewelry => {}
            }
        }
        wardrobe
    }
}

#[derive(Debug, Clone, Default)]
pub struct ComposerStage {
    policy: CompatibilityPolicy,
}

impl ComposerStage {
    pub fn new(policy: CompatibilityPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &CompatibilityPolicy {
        &self.policy
    }

    /// Run both strategies against `pool`. Never fails.
    pub fn compose(
        &self,
        inventory: &[ClothingItem],
        preferences: &Preferences,
        pool: &mut CandidatePool,
        ctx: &mut ExecutionContext,
    ) -> StageOutcome {
        let mut wardrobe = Wardrobe::partition(inventory);
        if self.policy.shuffle {
            wardrobe.tops.shuffle(ctx.rng());
            wardrobe.bottoms.shuffle(ctx.rng());
        }

        let mut outcome = StageOutcome::default();
        self.compose_separates(&wardrobe, preferences, pool, ctx, &mut outcome);
        if !pool.is_full() {
            self.compose_dresses(&wardrobe, preferences, pool, ctx, &mut outcome);
        }
        outcome
    }

    fn compose_separates(
        &self,
        wardrobe: &Wardrobe<'_>,
        preferences: &Preferences,
        pool: &mut CandidatePool,
        ctx: &mut ExecutionContext,
        outcome: &mut StageOutcome,
    ) {
        let policy = &self.policy;
        let pairings: Vec<(&ClothingItem, Vec<&ClothingItem>)> = wardrobe
            .tops
            .iter()
            .map(|top| {
                let bottoms = wardrobe
                    .bottoms
                    .iter()
                    .copied()
                    .filter(|bottom| policy.matches(top, bottom))
                    .collect();
                (*top, bottoms)
            })
            .collect();

        let rounds = pairings.iter().map(|(_, bottoms)| bottoms.len()).max().unwrap_or(0);
        let layering = policy.wants_layer(&preferences.weather);

        for round in 0..rounds {
            for (top, bottoms) in &pairings {
                if pool.is_full() {
                    return;
                }
                let Some(bottom) = bottoms.get(round).copied() else {
                    continue;
                };

                let layer = if layering {
                    wardrobe.outerwear.iter().copied().find(|layer| {
                        policy.formality_compatible(layer, top) && policy.formality_compatible(layer, bottom)
                    })
                } else {
                    None
                };

                // Each matching pair of shoes in turn, then none at all.
                let shoe_options = wardrobe
                    .shoes
                    .iter()
                    .copied()
                    .filter(|shoe| policy.matches(shoe, top) && policy.matches(shoe, bottom))
                    .map(Some)
                    .chain([None]);
                let Some((shoes, items)) = shoe_options
                    .map(|shoes| (shoes, outfit([Some(*top), Some(bottom), shoes, layer])))
                    .find(|(_, items)| !pool.contains(&key_of(items)))
                else {
                    tracing::debug!(top = %top.id, bottom = %bottom.id, "every variant of pair already emitted");
                    continue;
                };

                let candidate = OutfitCandidate::from_items(
                    ctx.next_id(),
                    describe::outfit_name(preferences),
                    &items,
                    preferences,
                    CandidateSource::Composer,
                )
                .with_rationale(
                    describe::describe_items(&items),
                    describe::explain_separates(policy, top, bottom, shoes, layer, &preferences.weather),
                );

                match pool.try_push(candidate) {
                    Ok(()) => outcome.accepted += 1,
                    Err(reason) => {
                        tracing::debug!(top = %top.id, bottom = %bottom.id, ?reason, "composed outfit refused");
                        outcome.rejected += 1;
                    }
                }
            }
        }
    }

    fn compose_dresses(
        &self,
        wardrobe: &Wardrobe<'_>,
        preferences: &Preferences,
        pool: &mut CandidatePool,
        ctx: &mut ExecutionContext,
        outcome: &mut StageOutcome,
    ) {
        let policy = &self.policy;

        for dress in wardrobe.dresses.iter().copied().take(policy.max_dresses) {
            if pool.is_full() {
                return;
            }

            // Matching shoes first; any shoes only when none match.
            let mut shoe_options: Vec<Option<&ClothingItem>> = wardrobe
                .shoes
                .iter()
                .copied()
                .filter(|shoe| policy.matches(dress, shoe))
                .map(Some)
                .collect();
            if shoe_options.is_empty() {
                shoe_options.extend(wardrobe.shoes.iter().copied().map(Some));
            }
            shoe_options.push(None);
            let accessory = wardrobe.accessories.first().copied();

            let Some((shoes, items)) = shoe_options
                .into_iter()
                .flat_map(|shoes| [(shoes, accessory), (shoes, None)])
                .map(|(shoes, accessory)| (shoes, outfit([Some(dress), shoes, accessory])))
                .filter(|(_, items)| items.len() >= MIN_OUTFIT_ITEMS)
                .find(|(_, items)| !pool.contains(&key_of(items)))
            else {
                tracing::debug!(dress = %dress.id, "no unused shoes or accessory to complete dress");
                continue;
            };

            let candidate = OutfitCandidate::from_items(
                ctx.next_id(),
                describe::dress_name(preferences),
                &items,
                preferences,
                CandidateSource::Composer,
            )
            .with_rationale(
                describe::describe_items(&items),
                describe::explain_dress(policy, dress, shoes),
            )
            .with_style("elegant");

            match pool.try_push(candidate) {
                Ok(()) => outcome.accepted += 1,
                Err(reason) => {
                    tracing::debug!(dress = %dress.id, ?reason, "composed dress look refused");
                    outcome.rejected += 1;
                }
            }
        }
    }
}

fn outfit<'a, const N: usize>(pieces: [Option<&'a ClothingItem>; N]) -> Vec<&'a ClothingItem> {
    pieces.into_iter().flatten().collect()
}

fn key_of(items: &[&ClothingItem]) -> OutfitKey {
    OutfitKey::from_ids(items.iter().map(|item| item.id.as_str()))
}

#[async_trait]
impl Stage for ComposerStage {
    fn id(&self) -> &'static str {
        "composer.rules.v1"
    }

    async fn run(
        &self,
        input: StageInput<'_>,
        pool: &mut CandidatePool,
        ctx: &mut ExecutionContext,
    ) -> Result<StageOutcome, StageError> {
        Ok(self.compose(input.inventory, input.preferences, pool, ctx))
    }
}
