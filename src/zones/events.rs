//! Outbound zone notifications.
//!
//! A layout pass does not call back into the renderer or the connector layer.
//! Instead the zone queues `ZoneEvent`s and the host drains them once the
//! pass has returned.

use serde::{Deserialize, Serialize};

use crate::core::ArrowId;

/// Something the host must react to after a layout pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ZoneEvent {
    /// The zone's bounding size changed; dependent layout must re-flow.
    SizeChanged { width: f64, height: f64 },

    /// A connector with an endpoint on a moved card needs a new path.
    /// Queued once per connector per pass.
    ArrowPathChanged(ArrowId),

    /// The background image changed and the zone must be repainted.
    BackgroundChanged(Option<String>),
}

impl ZoneEvent {
    /// The connector this event refers to, if any.
    #[must_use]
    pub fn arrow(&self) -> Option<ArrowId> {
        match self {
            ZoneEvent::ArrowPathChanged(id) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_size_change(&self) -> bool {
        matches!(self, ZoneEvent::SizeChanged { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert_eq!(ZoneEvent::ArrowPathChanged(ArrowId(4)).arrow(), Some(ArrowId(4)));
        assert!(ZoneEvent::SizeChanged { width: 1.0, height: 2.0 }.is_size_change());
        assert!(!ZoneEvent::BackgroundChanged(None).is_size_change());
    }
}
