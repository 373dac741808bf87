//! Direct placement helpers for scenario tests.
//!
//! Scenarios need actors at exact coordinates without replaying long
//! input scripts, so these helpers bypass the command surface.

use munchkin_core::{AdversaryId, AdversaryStatus, PickupId, Position};

use crate::GameSession;

/// Moves the player to `position` without wall checks.
pub fn place_player(session: &mut GameSession, position: Position) {
    session.player.position = position;
    session.player.committed = None;
}

/// Moves a pickup to `position`, returning whether it exists.
pub fn place_pickup(session: &mut GameSession, pickup: PickupId, position: Position) -> bool {
    session
        .pickups
        .iter_mut()
        .find(|candidate| candidate.id == pickup)
        .map(|candidate| candidate.position = position)
        .is_some()
}

/// Moves an adversary to `position` and forces its status.
pub fn place_adversary(
    session: &mut GameSession,
    adversary: AdversaryId,
    position: Position,
    status: AdversaryStatus,
) -> bool {
    session
        .adversaries
        .iter_mut()
        .find(|candidate| candidate.id == adversary)
        .map(|candidate| {
            candidate.position = position;
            candidate.status = status;
        })
        .is_some()
}
