//! Ruleset types and their canonical card lists.

use std::collections::{BTreeMap, HashSet};
use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::item::ItemPayload;
use crate::errors::domain::DomainError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum RulesetType {
    Base,
    FameAndFortune,
    WisdomAndWarfare,
    DawnOfCivilization,
}

impl RulesetType {
    pub const ALL: [RulesetType; 4] = [
        RulesetType::Base,
        RulesetType::FameAndFortune,
        RulesetType::WisdomAndWarfare,
        RulesetType::DawnOfCivilization,
    ];

    pub const fn code(&self) -> &'static str {
        match self {
            RulesetType::Base => "base",
            RulesetType::FameAndFortune => "faf",
            RulesetType::WisdomAndWarfare => "waw",
            RulesetType::DawnOfCivilization => "doc",
        }
    }

    /// Parse a ruleset code. Unknown codes are a configuration error.
    pub fn parse(raw: &str) -> Result<RulesetType, DomainError> {
        let wanted = raw.trim().to_ascii_lowercase();
        RulesetType::ALL
            .into_iter()
            .find(|r| r.code() == wanted)
            .ok_or_else(|| DomainError::config(format!("Unknown ruleset type '{raw}'")))
    }
}

impl Display for RulesetType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.code())
    }
}

/// One card as listed in a canonical source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSpec {
    pub name: String,
    #[serde(flatten)]
    pub payload: ItemPayload,
}

/// A researchable technology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechSpec {
    pub name: String,
    pub level: u8,
}

/// Raw on-disk shape; category keys are still labels.
#[derive(Debug, Deserialize)]
struct RawDeck {
    ruleset: String,
    categories: BTreeMap<String, Vec<CardSpec>>,
    #[serde(default)]
    techs: Vec<TechSpec>,
    #[serde(default)]
    policies: Vec<String>,
}

/// Parsed, validated canonical source for one ruleset. Its card order is the
/// canonical (unshuffled) order; composition is what every session copies.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalDeck {
    pub ruleset: RulesetType,
    pub categories: BTreeMap<Category, Vec<CardSpec>>,
    pub techs: Vec<TechSpec>,
    pub policies: Vec<String>,
}

impl CanonicalDeck {
    /// Parse and validate a JSON canonical source for `expected`.
    pub fn from_json(expected: RulesetType, raw: &str) -> Result<Self, DomainError> {
        let parsed: RawDeck = serde_json::from_str(raw).map_err(|e| {
            DomainError::config(format!("Malformed {expected} ruleset source: {e}"))
        })?;

        let ruleset = RulesetType::parse(&parsed.ruleset)?;
        if ruleset != expected {
            return Err(DomainError::config(format!(
                "Ruleset source declares '{ruleset}' but '{expected}' was requested"
            )));
        }

        let mut categories = BTreeMap::new();
        for (label, cards) in parsed.categories {
            let category = Category::from_label(&label).ok_or_else(|| {
                DomainError::config(format!("Unknown category '{label}' in {expected} source"))
            })?;

            let mut seen: HashSet<&str> = HashSet::new();
            for card in cards.iter() {
                if !card.payload.fits(category) {
                    return Err(DomainError::config(format!(
                        "Card '{}' does not fit category {category}",
                        card.name
                    )));
                }
                if !seen.insert(card.name.as_str()) {
                    return Err(DomainError::config(format!(
                        "Duplicate card '{}' in category {category}",
                        card.name
                    )));
                }
            }

            if categories.insert(category, cards).is_some() {
                return Err(DomainError::config(format!(
                    "Category {category} listed twice in {expected} source"
                )));
            }
        }

        if let Some(tech) = parsed.techs.iter().find(|t| !(1..=5).contains(&t.level)) {
            return Err(DomainError::config(format!(
                "Tech '{}' has level {} (must be 1..=5)",
                tech.name, tech.level
            )));
        }

        Ok(Self {
            ruleset,
            categories,
            techs: parsed.techs,
            policies: parsed.policies,
        })
    }

    /// Number of cards per category; the conservation target for sessions.
    pub fn sizes(&self) -> BTreeMap<Category, usize> {
        self.categories
            .iter()
            .map(|(category, cards)| (*category, cards.len()))
            .collect()
    }
}
