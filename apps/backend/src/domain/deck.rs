//! Deterministic deck-set construction.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::category::Category;
use super::item::Item;
use super::ruleset::{CanonicalDeck, RulesetType, TechSpec};
use super::seed_derivation::derive_category_seed;

/// A freshly shuffled, session-owned copy of a ruleset's cards.
#[derive(Debug, Clone)]
pub struct DeckSet {
    pub ruleset: RulesetType,
    /// Front of each vector is the next card to draw.
    pub pools: BTreeMap<Category, Vec<Item>>,
    pub techs: Vec<TechSpec>,
    pub policies: Vec<String>,
}

impl DeckSet {
    /// Copy every category of `canonical` into new items and shuffle each
    /// category independently with a seed derived from `seed`.
    ///
    /// Composition always equals the canonical multiset; only order varies.
    pub fn build(canonical: &CanonicalDeck, seed: u64) -> Self {
        let pools = canonical
            .categories
            .iter()
            .map(|(category, cards)| {
                let mut items: Vec<Item> = cards
                    .iter()
                    .map(|card| Item::new(*category, card.name.clone(), card.payload.clone()))
                    .collect();
                let mut rng = ChaCha8Rng::seed_from_u64(derive_category_seed(seed, *category));
                items.shuffle(&mut rng);
                (*category, items)
            })
            .collect();

        Self {
            ruleset: canonical.ruleset,
            pools,
            techs: canonical.techs.clone(),
            policies: canonical.policies.clone(),
        }
    }

    pub fn sizes(&self) -> BTreeMap<Category, usize> {
        self.pools
            .iter()
            .map(|(category, items)| (*category, items.len()))
            .collect()
    }
}
