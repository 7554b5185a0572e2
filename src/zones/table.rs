//! All players' tables for one game session.
//!
//! `Table` creates one `TableZone` per seat and is where the host's settings
//! layer plugs in: a `ConfigSignal` is forwarded to every zone, and the
//! events each zone queued in response are handed back per player.

use log::debug;

use super::events::ZoneEvent;
use super::table_zone::TableZone;
use crate::core::{
    ConfigSignal, DisplaySettings, LayoutError, LayoutResult, PlayerId, PlayerMap, TableLayout,
    MAX_PLAYERS,
};

/// One table zone per player.
///
/// ```
/// use ccg_table::core::{ConfigSignal, DisplaySettings, PlayerId, TableLayout};
/// use ccg_table::zones::Table;
///
/// let mut table = Table::new(2, TableLayout::default(), DisplaySettings::default()).unwrap();
/// table.set_mirrored(PlayerId::new(1), true).unwrap();
///
/// table.apply_signal(&ConfigSignal::InvertVerticalChanged(true));
/// assert!(table.zone(PlayerId::new(0)).unwrap().is_inverted());
/// assert!(!table.zone(PlayerId::new(1)).unwrap().is_inverted());
/// ```
#[derive(Clone, Debug)]
pub struct Table {
    zones: PlayerMap<TableZone>,
    settings: DisplaySettings,
}

impl Table {
    /// Create a table for `player_count` players sharing one layout.
    ///
    /// Fails on unusable layout constants or a seat count outside
    /// `1..=MAX_PLAYERS`.
    pub fn new(
        player_count: usize,
        layout: TableLayout,
        settings: DisplaySettings,
    ) -> LayoutResult<Self> {
        if !(1..=MAX_PLAYERS).contains(&player_count) {
            return Err(LayoutError::InvalidPlayerCount {
                count: player_count,
                max: MAX_PLAYERS,
            });
        }
        layout.validate()?;
        let zones = PlayerMap::new(player_count, |player| {
            TableZone::with_validated_layout(player, layout.clone(), settings.clone())
        });
        Ok(Self { zones, settings })
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.zones.player_count()
    }

    /// Settings as last broadcast to every zone.
    #[must_use]
    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    pub fn zone(&self, player: PlayerId) -> LayoutResult<&TableZone> {
        self.zones
            .try_get(player)
            .ok_or(LayoutError::UnknownPlayer(player))
    }

    pub fn zone_mut(&mut self, player: PlayerId) -> LayoutResult<&mut TableZone> {
        self.zones
            .try_get_mut(player)
            .ok_or(LayoutError::UnknownPlayer(player))
    }

    pub fn zones(&self) -> impl Iterator<Item = (PlayerId, &TableZone)> {
        self.zones.iter()
    }

    /// Mirror a player's table (typically every opponent's).
    pub fn set_mirrored(&mut self, player: PlayerId, mirrored: bool) -> LayoutResult<()> {
        self.zone_mut(player)?.set_mirrored(mirrored);
        Ok(())
    }

    /// Mark the active player's table; every other table becomes inactive.
    pub fn set_active_player(&mut self, active: PlayerId) {
        for (player, zone) in self.zones.iter_mut() {
            zone.set_active(player == active);
        }
    }

    /// Forward a settings change to every zone.
    ///
    /// Returns the events each zone queued, including any left over from
    /// before the signal.
    pub fn apply_signal(&mut self, signal: &ConfigSignal) -> Vec<(PlayerId, Vec<ZoneEvent>)> {
        if !self.settings.apply(signal) {
            return Vec::new();
        }
        debug!("broadcasting {:?} to {} tables", signal, self.zones.player_count());

        self.zones
            .iter_mut()
            .map(|(player, zone)| {
                zone.on_config_changed(signal);
                (player, zone.drain_events())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::TableCard;
    use crate::core::EntityId;
    use crate::grid::GridAddress;

    fn table() -> Table {
        Table::new(3, TableLayout::default(), DisplaySettings::default()).unwrap()
    }

    #[test]
    fn test_one_zone_per_player() {
        let table = table();
        assert_eq!(table.player_count(), 3);
        for (player, zone) in table.zones() {
            assert_eq!(zone.player(), player);
        }
    }

    #[test]
    fn test_unknown_player() {
        let mut table = table();
        assert!(matches!(
            table.zone(PlayerId::new(5)),
            Err(LayoutError::UnknownPlayer(p)) if p == PlayerId::new(5)
        ));
        assert!(table.set_mirrored(PlayerId::new(9), true).is_err());
    }

    #[test]
    fn test_player_count_out_of_range() {
        for count in [0, MAX_PLAYERS + 1] {
            assert!(matches!(
                Table::new(count, TableLayout::default(), DisplaySettings::default()),
                Err(LayoutError::InvalidPlayerCount { count: c, max: MAX_PLAYERS }) if c == count
            ));
        }
        let full = Table::new(MAX_PLAYERS, TableLayout::default(), DisplaySettings::default())
            .unwrap();
        assert_eq!(full.player_count(), MAX_PLAYERS);
    }

    #[test]
    fn test_background_broadcast() {
        let mut table = table();
        let events = table.apply_signal(&ConfigSignal::BackgroundPathChanged(Some("a.png".into())));
        assert_eq!(events.len(), 3);
        for (_, zone_events) in &events {
            assert!(zone_events.contains(&ZoneEvent::BackgroundChanged(Some("a.png".into()))));
        }

        // Repeated signal is a no-op
        assert!(table
            .apply_signal(&ConfigSignal::BackgroundPathChanged(Some("a.png".into())))
            .is_empty());
    }

    #[test]
    fn test_invert_broadcast_moves_cards() {
        let mut table = table();
        let zone = table.zone_mut(PlayerId::new(0)).unwrap();
        zone.add_card(TableCard::new(EntityId(1)), GridAddress::new(0, 0));
        let before = zone.card(EntityId(1)).unwrap().position;

        table.apply_signal(&ConfigSignal::InvertVerticalChanged(true));
        let after = table
            .zone(PlayerId::new(0))
            .unwrap()
            .card(EntityId(1))
            .unwrap()
            .position;
        assert!(after.y > before.y);
    }

    #[test]
    fn test_active_player() {
        let mut table = table();
        table.set_active_player(PlayerId::new(1));
        let active: Vec<bool> = table.zones().map(|(_, z)| z.is_active()).collect();
        assert_eq!(active, vec![false, true, false]);
    }
}
