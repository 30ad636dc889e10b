//! The fixed set of drawable card categories.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    Civ,
    CultureI,
    CultureII,
    CultureIII,
    GreatPerson,
    Infantry,
    Artillery,
    Mounted,
    Aircraft,
    Villages,
    Huts,
    AncientWonders,
    MedievalWonders,
    ModernWonders,
    Tiles,
    CityStates,
}

impl Category {
    pub const ALL: [Category; 16] = [
        Category::Civ,
        Category::CultureI,
        Category::CultureII,
        Category::CultureIII,
        Category::GreatPerson,
        Category::Infantry,
        Category::Artillery,
        Category::Mounted,
        Category::Aircraft,
        Category::Villages,
        Category::Huts,
        Category::AncientWonders,
        Category::MedievalWonders,
        Category::ModernWonders,
        Category::Tiles,
        Category::CityStates,
    ];

    /// Human label, as used in canonical sources and log text.
    pub const fn label(&self) -> &'static str {
        match self {
            Category::Civ => "Civ",
            Category::CultureI => "Culture I",
            Category::CultureII => "Culture II",
            Category::CultureIII => "Culture III",
            Category::GreatPerson => "Great Person",
            Category::Infantry => "Infantry",
            Category::Artillery => "Artillery",
            Category::Mounted => "Mounted",
            Category::Aircraft => "Aircraft",
            Category::Villages => "Villages",
            Category::Huts => "Huts",
            Category::AncientWonders => "Ancient Wonders",
            Category::MedievalWonders => "Medieval Wonders",
            Category::ModernWonders => "Modern Wonders",
            Category::Tiles => "Tiles",
            Category::CityStates => "City-states",
        }
    }

    /// SCREAMING_SNAKE code accepted as an alternative spelling.
    pub const fn code(&self) -> &'static str {
        match self {
            Category::Civ => "CIV",
            Category::CultureI => "CULTURE_1",
            Category::CultureII => "CULTURE_2",
            Category::CultureIII => "CULTURE_3",
            Category::GreatPerson => "GREAT_PERSON",
            Category::Infantry => "INFANTRY",
            Category::Artillery => "ARTILLERY",
            Category::Mounted => "MOUNTED",
            Category::Aircraft => "AIRCRAFT",
            Category::Villages => "VILLAGES",
            Category::Huts => "HUTS",
            Category::AncientWonders => "ANCIENT_WONDERS",
            Category::MedievalWonders => "MEDIEVAL_WONDERS",
            Category::ModernWonders => "MODERN_WONDERS",
            Category::Tiles => "TILES",
            Category::CityStates => "CITY_STATES",
        }
    }

    /// Drawn items of these categories are visible to everyone immediately.
    pub const fn is_public_by_default(&self) -> bool {
        matches!(
            self,
            Category::AncientWonders
                | Category::MedievalWonders
                | Category::ModernWonders
                | Category::Tiles
                | Category::CityStates
        )
    }

    /// Parse a label or code, ignoring case, whitespace, `-` and `_`.
    pub fn from_label(raw: &str) -> Option<Category> {
        let wanted = normalize(raw);
        if wanted.is_empty() {
            return None;
        }
        Category::ALL
            .into_iter()
            .find(|c| normalize(c.label()) == wanted || normalize(c.code()) == wanted)
    }

    /// Like [`Category::from_label`], failing with a validation error.
    pub fn parse(raw: &str) -> Result<Category, DomainError> {
        Category::from_label(raw).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::UnknownCategory,
                format!("Unknown category '{raw}'"),
            )
        })
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}
