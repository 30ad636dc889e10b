//! Drawable items and their category-specific payloads.

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::ids::{ItemId, PlayerId};

/// Category-specific card data. Tagged by `kind` in canonical sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemPayload {
    Unit { attack: u8, health: u8 },
    Culture { description: String },
    GreatPerson { description: String },
    Civ { description: String },
    Exploration { description: String },
    Wonder { description: String },
    Tile { number: u16 },
    CityState { description: String },
}

impl ItemPayload {
    /// Whether this payload shape belongs to `category`.
    pub fn fits(&self, category: Category) -> bool {
        match category {
            Category::Infantry | Category::Artillery | Category::Mounted | Category::Aircraft => {
                matches!(self, ItemPayload::Unit { .. })
            }
            Category::CultureI | Category::CultureII | Category::CultureIII => {
                matches!(self, ItemPayload::Culture { .. })
            }
            Category::GreatPerson => matches!(self, ItemPayload::GreatPerson { .. }),
            Category::Civ => matches!(self, ItemPayload::Civ { .. }),
            Category::Villages | Category::Huts => matches!(self, ItemPayload::Exploration { .. }),
            Category::AncientWonders | Category::MedievalWonders | Category::ModernWonders => {
                matches!(self, ItemPayload::Wonder { .. })
            }
            Category::Tiles => matches!(self, ItemPayload::Tile { .. }),
            Category::CityStates => matches!(self, ItemPayload::CityState { .. }),
        }
    }
}

/// One physical card. Owned by at most one participant, or by the pool
/// when `owner` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub category: Category,
    pub name: String,
    pub payload: ItemPayload,
    pub owner: Option<PlayerId>,
    pub hidden: bool,
    pub used: bool,
}

impl Item {
    /// A fresh, unowned, hidden copy as it sits in a pool.
    pub fn new(category: Category, name: impl Into<String>, payload: ItemPayload) -> Self {
        Self {
            id: ItemId::new(),
            category,
            name: name.into(),
            payload,
            owner: None,
            hidden: true,
            used: false,
        }
    }

    /// Full identity of the card, e.g. `Infantry: Spearmen 1.3`.
    pub fn reveal_all(&self) -> String {
        match &self.payload {
            ItemPayload::Unit { attack, health } => {
                format!("{}: {} {}.{}", self.category, self.name, attack, health)
            }
            ItemPayload::Tile { number } => format!("{}: {} (#{number})", self.category, self.name),
            ItemPayload::Culture { .. }
            | ItemPayload::GreatPerson { .. }
            | ItemPayload::Civ { .. }
            | ItemPayload::Exploration { .. }
            | ItemPayload::Wonder { .. }
            | ItemPayload::CityState { .. } => format!("{}: {}", self.category, self.name),
        }
    }

    /// What everyone may see: the full identity if revealed, else only the category.
    pub fn reveal_public(&self) -> String {
        if self.hidden {
            self.category.label().to_string()
        } else {
            self.reveal_all()
        }
    }

    /// Return to pool state: unowned, hidden, unused.
    pub(crate) fn reset_for_pool(&mut self) {
        self.owner = None;
        self.hidden = true;
        self.used = false;
    }
}
