use std::collections::HashMap;

use super::command::{MapCommand, MarkerSpec};

/// Commands that turn the `previous` marker set into `next`, keyed by id.
/// Removals come first, then additions and updates in `next` order.
pub fn reconcile(previous: &[MarkerSpec], next: &[MarkerSpec]) -> Vec<MapCommand> {
    let before: HashMap<&str, &MarkerSpec> =
        previous.iter().map(|m| (m.id.as_str(), m)).collect();
    let after: HashMap<&str, &MarkerSpec> = next.iter().map(|m| (m.id.as_str(), m)).collect();

    let removals = previous
        .iter()
        .filter(|m| !after.contains_key(m.id.as_str()))
        .map(|m| MapCommand::RemoveMarker { id: m.id.clone() });

    let changes = next
        .iter()
        .filter_map(|marker| match before.get(marker.id.as_str()) {
            None => Some(MapCommand::AddMarker {
                marker: marker.clone(),
            }),
            Some(&old) if old != marker => Some(MapCommand::UpdateMarker {
                marker: marker.clone(),
            }),
            Some(_) => None,
        });

    removals.chain(changes).collect()
}
