//! Renders session events into action log entries.

use crate::domain::{Resolution, Session, SessionEvent};
use crate::repos::LogEntry;

pub(super) fn render_events(session: &Session, events: &[SessionEvent]) -> Vec<LogEntry> {
    let at = session.updated_at;
    let id = session.id;
    let mut entries = Vec::with_capacity(events.len() + 1);

    for event in events {
        match event {
            SessionEvent::Created { username } => entries.push(LogEntry::public(
                id,
                format!("{username} created the game {}", session.name),
                at,
            )),
            SessionEvent::Joined { username } => {
                entries.push(LogEntry::public(id, format!("{username} joined the game"), at))
            }
            SessionEvent::Started { username, .. } => entries.push(LogEntry::public(
                id,
                format!("Game has started. Starting player is {username}"),
                at,
            )),
            SessionEvent::TurnPassed {
                from_username,
                username,
                ..
            } => entries.push(LogEntry::public(
                id,
                format!("{from_username} ended the turn. It is now {username}'s turn"),
                at,
            )),
            SessionEvent::Drawn {
                draw_id,
                username,
                item,
                ..
            } => {
                let public = if item.hidden {
                    format!("{username} drew {} card", with_article(item.category.label()))
                } else {
                    format!("{username} drew {}", item.reveal_all())
                };
                entries.push(LogEntry::public(id, public, at).with_draw(*draw_id));
                entries.push(
                    LogEntry::private(id, username, format!("You drew {}", item.reveal_all()), at)
                        .with_draw(*draw_id),
                );
            }
            SessionEvent::Revealed { username, item } => entries.push(LogEntry::public(
                id,
                format!("{username} revealed {}", item.reveal_all()),
                at,
            )),
            SessionEvent::Discarded { username, item } => entries.push(LogEntry::public(
                id,
                format!("{username} discarded {}", item.reveal_public()),
                at,
            )),
            SessionEvent::Withdrew {
                username,
                discarded,
            } => {
                let text = match discarded {
                    0 => format!("{username} withdrew from the game"),
                    n => format!("{username} withdrew from the game and discarded {n} items"),
                };
                entries.push(LogEntry::public(id, text, at));
            }
            SessionEvent::UndoInitiated {
                draw_id,
                username,
                item,
            } => entries.push(
                LogEntry::public(
                    id,
                    format!("{username} wants to undo the draw of {}", item.reveal_public()),
                    at,
                )
                .with_draw(*draw_id),
            ),
            SessionEvent::VoteCast {
                draw_id,
                username,
                choice,
                item,
            } => entries.push(
                LogEntry::public(
                    id,
                    format!(
                        "{username} has voted {} to undo {}",
                        choice.as_word(),
                        item.reveal_public()
                    ),
                    at,
                )
                .with_draw(*draw_id),
            ),
            SessionEvent::UndoResolved {
                draw_id,
                resolution,
                drawer_username,
                item,
            } => {
                let text = match resolution {
                    Resolution::Approved => format!(
                        "Undo approved: {} drawn by {drawer_username} was returned to the pool",
                        item.reveal_public()
                    ),
                    Resolution::Rejected | Resolution::Pending => format!(
                        "Undo rejected: {drawer_username} keeps {}",
                        item.reveal_public()
                    ),
                };
                entries.push(LogEntry::public(id, text, at).with_draw(*draw_id));
            }
            SessionEvent::TechChosen { username, tech } => entries.push(LogEntry::public(
                id,
                format!("{username} researched {tech}"),
                at,
            )),
            SessionEvent::PolicyChosen { username, policy } => entries.push(LogEntry::public(
                id,
                format!("{username} adopted the {policy} policy"),
                at,
            )),
            SessionEvent::Ended { winner } => {
                let text = match winner {
                    Some(w) => format!("Game has ended. {w} won the game"),
                    None => "Game has ended without a winner".to_string(),
                };
                entries.push(LogEntry::public(id, text, at));
            }
        }
    }
    entries
}

fn with_article(label: &str) -> String {
    match label.chars().next() {
        Some(c) if "AEIOUaeiou".contains(c) => format!("an {label}"),
        _ => format!("a {label}"),
    }
}
