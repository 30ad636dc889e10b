//! Small hand-written decks and sessions for domain unit tests.

use time::OffsetDateTime;

use super::deck::DeckSet;
use super::events::SessionEvents;
use super::ids::PlayerId;
use super::ruleset::{CanonicalDeck, RulesetType};
use super::session::Session;

pub const SMALL_BASE_DECK: &str = r#"{
    "ruleset": "base",
    "categories": {
        "Infantry": [
            {"name": "Spearmen", "kind": "unit", "attack": 1, "health": 3},
            {"name": "Pikemen", "kind": "unit", "attack": 2, "health": 3},
            {"name": "Riflemen", "kind": "unit", "attack": 3, "health": 3},
            {"name": "Legion", "kind": "unit", "attack": 2, "health": 2}
        ],
        "Artillery": [
            {"name": "Catapult", "kind": "unit", "attack": 2, "health": 1},
            {"name": "Trebuchet", "kind": "unit", "attack": 3, "health": 1},
            {"name": "Cannon", "kind": "unit", "attack": 3, "health": 2}
        ],
        "Culture I": [
            {"name": "Barbarian Encampment", "kind": "culture", "description": "Place a barbarian next to an enemy city"},
            {"name": "Sabotage", "kind": "culture", "description": "Lose one resource of your choice"},
            {"name": "Patronage", "kind": "culture", "description": "Gain one culture"}
        ],
        "Huts": [
            {"name": "Iron", "kind": "exploration", "description": "Gain iron"},
            {"name": "Friendly Barbarians", "kind": "exploration", "description": "Gain a free infantry"}
        ],
        "Ancient Wonders": [
            {"name": "Colossus", "kind": "wonder", "description": "+1 trade per ocean square"},
            {"name": "Pyramids", "kind": "wonder", "description": "Build a second building per turn"}
        ],
        "Tiles": [
            {"name": "Grassland", "kind": "tile", "number": 1},
            {"name": "Mountains", "kind": "tile", "number": 2},
            {"name": "Desert", "kind": "tile", "number": 3}
        ]
    },
    "techs": [
        {"name": "Pottery", "level": 1},
        {"name": "Writing", "level": 1},
        {"name": "Currency", "level": 2}
    ],
    "policies": ["Patronage", "Rationalism"]
}"#;

pub fn small_canonical_deck() -> CanonicalDeck {
    CanonicalDeck::from_json(RulesetType::Base, SMALL_BASE_DECK).unwrap()
}

pub fn forming_session(capacity: u8, seed: u64) -> Session {
    let deck = DeckSet::build(&small_canonical_deck(), seed);
    Session::new("fixture", deck, capacity, seed, OffsetDateTime::UNIX_EPOCH).unwrap()
}

pub fn player(n: usize) -> PlayerId {
    PlayerId::new(format!("player-{n}"))
}

pub fn username(n: usize) -> String {
    format!("user{n}")
}

/// A session with `players` joined, which is therefore active.
pub fn active_session(players: u8, seed: u64) -> Session {
    let mut session = forming_session(players, seed);
    let mut events = SessionEvents::new(OffsetDateTime::UNIX_EPOCH);
    for n in 0..usize::from(players) {
        session.join(player(n), &username(n), &mut events).unwrap();
    }
    session
}

/// Roster index of the current turn holder.
pub fn holder_index(session: &Session) -> usize {
    session
        .participants
        .iter()
        .position(|p| p.your_turn)
        .unwrap()
}
