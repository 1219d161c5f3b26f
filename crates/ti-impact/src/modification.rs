//! Applying [`EdgeModification`]s to a [`NetworkOverlay`].

use tracing::warn;

use ti_network::NetworkOverlay;

use crate::model::{EdgeModification, ModificationAction};

/// Apply `modifications` in order and return the ones that took effect.
///
/// A modification is skipped, never an error, when its edge does not exist
/// (or was already removed by an earlier entry), or when a `Modify` lacks a
/// positive `speed_kph`.
pub fn apply_modifications(
    overlay: &mut NetworkOverlay<'_>,
    modifications: &[EdgeModification],
) -> Vec<EdgeModification> {
    let mut applied = Vec::with_capacity(modifications.len());

    for m in modifications {
        let ok = match (m.action, m.speed_kph) {
            (ModificationAction::Remove, _)              => overlay.remove_edge(m.u, m.v),
            (ModificationAction::Modify, Some(speed))    => overlay.set_speed(m.u, m.v, speed),
            (ModificationAction::Modify, None)           => false,
        };

        if ok {
            applied.push(*m);
        } else {
            warn!(u = %m.u, v = %m.v, action = ?m.action, speed_kph = ?m.speed_kph, "skipping modification");
        }
    }

    applied
}
