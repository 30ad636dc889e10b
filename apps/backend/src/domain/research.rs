//! Technology and policy choices.

use super::events::{SessionEvent, SessionEvents};
use super::ids::PlayerId;
use super::session::Session;
use crate::errors::domain::{DomainError, ValidationKind};

impl Session {
    pub fn choose_tech(
        &mut self,
        player: &PlayerId,
        tech: &str,
        events: &mut SessionEvents,
    ) -> Result<(), DomainError> {
        self.require_active()?;
        let idx = self.require_member(player)?;
        let wanted = tech.trim();

        let spec = self
            .techs
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(wanted))
            .cloned()
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::UnknownTech,
                    format!("{wanted} is not a tech in the {} ruleset", self.ruleset),
                )
            })?;

        let participant = &mut self.participants[idx];
        if participant.techs.iter().any(|t| t.name == spec.name) {
            return Err(DomainError::validation(
                ValidationKind::TechAlreadyChosen,
                format!("{} already researched {}", participant.username, spec.name),
            ));
        }
        participant.techs.push(spec.clone());

        events.emit(SessionEvent::TechChosen {
            username: participant.username.clone(),
            tech: format!("{} (level {})", spec.name, spec.level),
        });
        Ok(())
    }

    pub fn choose_policy(
        &mut self,
        player: &PlayerId,
        policy: &str,
        events: &mut SessionEvents,
    ) -> Result<(), DomainError> {
        self.require_active()?;
        let idx = self.require_member(player)?;
        let wanted = policy.trim();

        let name = self
            .policies
            .iter()
            .find(|p| p.eq_ignore_ascii_case(wanted))
            .cloned()
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::UnknownPolicy,
                    format!("{wanted} is not a policy in the {} ruleset", self.ruleset),
                )
            })?;

        let participant = &mut self.participants[idx];
        if participant.policies.contains(&name) {
            return Err(DomainError::validation(
                ValidationKind::PolicyAlreadyChosen,
                format!("{} already adopted {name}", participant.username),
            ));
        }
        participant.policies.push(name.clone());

        events.emit(SessionEvent::PolicyChosen {
            username: participant.username.clone(),
            policy: name,
        });
        Ok(())
    }
}
