//! The table zone: one player's play surface.
//!
//! `TableZone` owns the cards on the table, rebuilds the stack width table,
//! positions every card and keeps its own bounding size in step with the
//! rightmost card. All layout flows through [`TableZone::reorganize`]:
//!
//! 1. rebuild the width table from every placed card
//! 2. map each placed card (and its attachments) to pixels
//! 3. assign paint order so lower and further-right cards draw on top
//! 4. queue one path update per connector touching a positioned card
//! 5. resize to contents
//!
//! Cards are stored in `im` collections, so cloning a zone for a drop
//! preview is O(1).

use std::collections::BTreeSet;

use im::{HashMap as ImHashMap, Vector};
use log::{debug, trace, warn};

use super::events::ZoneEvent;
use crate::cards::TableCard;
use crate::commands::{CardAttribute, CardToMove, CommandBatch, DraggedCard, ZoneCommand, ZoneRef};
use crate::core::{
    ArrowId, ConfigSignal, DisplaySettings, EntityId, LayoutResult, PlayerId, TableLayout,
};
use crate::grid::{CoordinateMapper, GridAddress, PixelPoint, StackWidthTable};

/// Name the table zone uses in commands.
pub const TABLE_ZONE_NAME: &str = "table";

/// Paint order for a card drawn at `position`.
///
/// Monotonic in `(y, x)`: lower cards win, ties go to the card further right.
#[must_use]
pub fn paint_order(position: PixelPoint, card_height: f64) -> f64 {
    (position.y + card_height) * 100_000.0 + (position.x + 1.0) * 100.0
}

/// One player's table.
///
/// ## Usage
///
/// ```
/// use ccg_table::cards::TableCard;
/// use ccg_table::core::{DisplaySettings, EntityId, PlayerId, TableLayout};
/// use ccg_table::grid::GridAddress;
/// use ccg_table::zones::TableZone;
///
/// let mut zone = TableZone::new(PlayerId::new(0), TableLayout::default(), DisplaySettings::default())
///     .unwrap();
///
/// zone.add_card(TableCard::new(EntityId(1)), GridAddress::new(0, 0));
/// zone.add_card(TableCard::new(EntityId(2)), GridAddress::new(3, 0));
///
/// let pos = zone.card(EntityId(2)).unwrap().position;
/// assert_eq!(zone.map_to_grid(pos), GridAddress::new(3, 0));
/// ```
#[derive(Clone, Debug)]
pub struct TableZone {
    player: PlayerId,
    layout: TableLayout,
    settings: DisplaySettings,
    mirrored: bool,
    active: bool,

    /// Cards by id.
    cards: ImHashMap<EntityId, TableCard>,

    /// Paint/iteration order (insertion order).
    order: Vector<EntityId>,

    /// Widths from the last layout pass.
    widths: StackWidthTable,

    width: f64,
    height: f64,

    events: Vec<ZoneEvent>,
}

impl TableZone {
    /// Create an empty table for `player`.
    ///
    /// Fails if the layout constants cannot describe a grid.
    pub fn new(
        player: PlayerId,
        layout: TableLayout,
        settings: DisplaySettings,
    ) -> LayoutResult<Self> {
        layout.validate()?;
        Ok(Self::with_validated_layout(player, layout, settings))
    }

    pub(crate) fn with_validated_layout(
        player: PlayerId,
        layout: TableLayout,
        settings: DisplaySettings,
    ) -> Self {
        Self {
            player,
            widths: StackWidthTable::new(layout.card_width),
            width: layout.initial_width(),
            height: layout.zone_height(),
            layout,
            settings,
            mirrored: false,
            active: false,
            cards: ImHashMap::new(),
            order: Vector::new(),
            events: Vec::new(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[must_use]
    pub fn name(&self) -> &str {
        TABLE_ZONE_NAME
    }

    /// This zone as a command endpoint.
    #[must_use]
    pub fn zone_ref(&self) -> ZoneRef {
        ZoneRef::new(self.player, TABLE_ZONE_NAME)
    }

    #[must_use]
    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    #[must_use]
    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    #[must_use]
    pub fn background_path(&self) -> Option<&str> {
        self.settings.background_path.as_deref()
    }

    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Width table from the last layout pass.
    #[must_use]
    pub fn widths(&self) -> &StackWidthTable {
        &self.widths
    }

    #[must_use]
    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    /// Rows are flipped when exactly one of "player is mirrored" and the
    /// global invert preference holds.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.mirrored != self.settings.invert_vertical_coordinate
    }

    /// Whether this is the active player's table (drawn with an outline).
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Mirror or unmirror the player's view and re-lay out if it changed.
    pub fn set_mirrored(&mut self, mirrored: bool) {
        if self.mirrored != mirrored {
            self.mirrored = mirrored;
            self.reorganize();
        }
    }

    /// React to a settings change. Returns true if anything changed.
    pub fn on_config_changed(&mut self, signal: &ConfigSignal) -> bool {
        if !self.settings.apply(signal) {
            return false;
        }
        if let ConfigSignal::BackgroundPathChanged(_) = signal {
            self.events
                .push(ZoneEvent::BackgroundChanged(self.settings.background_path.clone()));
        }
        self.reorganize();
        true
    }

    // === Cards ===

    #[must_use]
    pub fn card(&self, id: EntityId) -> Option<&TableCard> {
        self.cards.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Cards in insertion order.
    pub fn cards(&self) -> impl Iterator<Item = &TableCard> + '_ {
        self.order.iter().filter_map(move |id| self.cards.get(id))
    }

    /// Cards sorted for painting, bottom-most first.
    #[must_use]
    pub fn paint_list(&self) -> Vec<&TableCard> {
        let mut list: Vec<&TableCard> = self.cards().collect();
        list.sort_by(|a, b| a.z_value.total_cmp(&b.z_value));
        list
    }

    /// Put a card on the table and re-lay out.
    ///
    /// Returns false if a card with the same id is already here.
    pub fn add_card(&mut self, mut card: TableCard, addr: GridAddress) -> bool {
        if self.cards.contains_key(&card.id) {
            warn!("{} already on the table of {}", card.id, self.player);
            return false;
        }

        card.grid = self.clamp_address(addr);
        self.order.push_back(card.id);
        self.cards.insert(card.id, card);
        self.reorganize();
        true
    }

    /// Remove a card from the table.
    ///
    /// The card is unlinked from its holder and its own attachments are
    /// released (they stay on the table, unplaced). Pass `can_resize =
    /// false` when another layout pass follows immediately.
    pub fn take_card(&mut self, id: EntityId, can_resize: bool) -> Option<TableCard> {
        let mut card = self.cards.remove(&id)?;
        self.order.retain(|e| *e != id);

        if let Some(holder) = card.attached_to.take() {
            if let Some(holder) = self.cards.get_mut(&holder) {
                holder.attached_cards.retain(|e| *e != id);
            }
        }
        for child in card.attached_cards.drain(..) {
            if let Some(child) = self.cards.get_mut(&child) {
                child.attached_to = None;
            }
        }

        if can_resize {
            self.reorganize();
        }
        Some(card)
    }

    /// Move a card to a new slot, detaching it first if needed.
    pub fn move_card(&mut self, id: EntityId, addr: GridAddress) -> bool {
        if !self.cards.contains_key(&id) {
            warn!("cannot move unknown {} on the table of {}", id, self.player);
            return false;
        }
        self.unlink_from_holder(id);
        let addr = self.clamp_address(addr);
        if let Some(card) = self.cards.get_mut(&id) {
            card.grid = addr;
        }
        self.reorganize();
        true
    }

    /// Attach `child` behind `holder`.
    ///
    /// The child leaves the grid. Rejected if either card is missing, if they
    /// are the same card, if `holder` is itself attached, or if `child`
    /// still carries attachments of its own.
    pub fn attach_card(&mut self, child: EntityId, holder: EntityId) -> bool {
        let valid = child != holder
            && self.cards.get(&holder).is_some_and(|h| h.attached_to.is_none())
            && self.cards.get(&child).is_some_and(|c| c.attached_cards.is_empty());
        if !valid {
            warn!("cannot attach {} to {} on the table of {}", child, holder, self.player);
            return false;
        }

        self.unlink_from_holder(child);
        if let Some(card) = self.cards.get_mut(&child) {
            card.grid = GridAddress::UNPLACED;
            card.attached_to = Some(holder);
        }
        if let Some(card) = self.cards.get_mut(&holder) {
            card.attached_cards.push(child);
        }
        self.reorganize();
        true
    }

    /// Detach `child` from its holder and place it at `addr`.
    pub fn detach_card(&mut self, child: EntityId, addr: GridAddress) -> bool {
        let attached = self
            .cards
            .get(&child)
            .is_some_and(|c| c.attached_to.is_some());
        if !attached {
            warn!("{} is not attached on the table of {}", child, self.player);
            return false;
        }
        self.move_card(child, addr)
    }

    /// Record the server's tap state for a card.
    pub fn set_tapped(&mut self, id: EntityId, tapped: bool) -> bool {
        match self.cards.get_mut(&id) {
            Some(card) => {
                card.tapped = tapped;
                true
            }
            None => false,
        }
    }

    fn unlink_from_holder(&mut self, id: EntityId) {
        let holder = self.cards.get_mut(&id).and_then(|c| c.attached_to.take());
        if let Some(holder) = holder.and_then(|h| self.cards.get_mut(&h)) {
            holder.attached_cards.retain(|e| *e != id);
        }
    }

    /// Whether `reorganize` positions this card.
    fn is_laid_out(&self, card: &TableCard) -> bool {
        card.is_placed()
            || card
                .attached_to
                .and_then(|holder| self.cards.get(&holder))
                .is_some_and(TableCard::is_placed)
    }

    fn clamp_address(&self, addr: GridAddress) -> GridAddress {
        addr.clamp_to_grid(self.layout.rows)
    }

    // === Connectors ===

    /// Register a connector from `from` to `to`.
    ///
    /// Either endpoint may live in another zone. Returns false if neither
    /// endpoint is on this table.
    pub fn link_arrow(&mut self, arrow: ArrowId, from: EntityId, to: EntityId) -> bool {
        let mut linked = false;
        if let Some(card) = self.cards.get_mut(&from) {
            card.arrows_from.push(arrow);
            linked = true;
        }
        if let Some(card) = self.cards.get_mut(&to) {
            card.arrows_to.push(arrow);
            linked = true;
        }
        linked
    }

    /// Forget a connector on every card of this table.
    pub fn unlink_arrow(&mut self, arrow: ArrowId) {
        for (_, card) in self.cards.iter_mut() {
            card.forget_arrow(arrow);
        }
    }

    // === Mapping ===

    /// Mapper over the current widths, orientation and size.
    #[must_use]
    pub fn mapper(&self) -> CoordinateMapper<'_> {
        CoordinateMapper::new(
            &self.layout,
            &self.widths,
            self.is_inverted(),
            self.width,
            self.height,
        )
    }

    #[must_use]
    pub fn map_from_grid(&self, addr: GridAddress) -> PixelPoint {
        self.mapper().map_from_grid(addr)
    }

    #[must_use]
    pub fn map_to_grid(&self, point: PixelPoint) -> GridAddress {
        self.mapper().map_to_grid(point)
    }

    /// First card sitting exactly at `addr`.
    #[must_use]
    pub fn card_at_grid(&self, addr: GridAddress) -> Option<&TableCard> {
        if !addr.is_placed() {
            return None;
        }
        self.cards().find(|c| c.grid == addr)
    }

    /// Card in the slot under a pixel position.
    #[must_use]
    pub fn card_at_point(&self, point: PixelPoint) -> Option<&TableCard> {
        self.card_at_grid(self.map_to_grid(point))
    }

    /// Pixel position of the first free slot in the stack group under
    /// `point`.
    ///
    /// Sub-slots are probed in order 0, 1, 2; if all are taken the card
    /// overlaps in slot 2.
    #[must_use]
    pub fn closest_grid_point(&self, point: PixelPoint) -> PixelPoint {
        let mapper = self.mapper();
        let mut addr = mapper.map_to_grid(point.offset(1.0, 1.0)).group_start();
        for _ in 0..2 {
            if self.card_at_grid(addr).is_some() {
                addr.column += 1;
            }
        }
        mapper.map_from_grid(addr)
    }

    /// Y coordinate of the divider above the last lane.
    #[must_use]
    pub fn land_divider_y(&self) -> f64 {
        let layout = &self.layout;
        let y = f64::from(layout.rows - 1) * layout.row_pitch() + layout.box_line_width
            - layout.padding_y / 2.0;
        if self.is_inverted() {
            self.height - y
        } else {
            y
        }
    }

    // === Layout ===

    /// Recompute widths, positions, paint order and size.
    pub fn reorganize(&mut self) {
        let widths = StackWidthTable::compute(
            self.layout.card_width,
            self.cards()
                .filter(|c| c.is_placed())
                .map(|c| (c.grid, c.attachment_count())),
        );
        self.widths = widths;

        let placed: Vec<&TableCard> = self.cards().filter(|c| c.is_placed()).collect();

        let card_height = self.layout.card_height;
        let fan = self.layout.sub_column_width();
        let mapper = self.mapper();

        let mut placements: Vec<(EntityId, PixelPoint)> = Vec::new();
        let mut arrows: BTreeSet<ArrowId> = BTreeSet::new();

        for card in &placed {
            let base = mapper.map_from_grid(card.grid);
            let attached = card.attachment_count();
            let drop = if attached > 0 {
                self.layout.attachment_drop
            } else {
                0.0
            };
            let holder = base.offset(attached as f64 * fan, drop);
            placements.push((card.id, holder));
            arrows.extend(card.arrows());

            for (j, child_id) in card.attached_cards.iter().enumerate() {
                let Some(child) = self.cards.get(child_id) else {
                    warn!("{} lists missing attachment {}", card.id, child_id);
                    continue;
                };
                let child_pos = PixelPoint::new(
                    holder.x - (j + 1) as f64 * fan,
                    base.y + self.layout.attachment_offset_y,
                );
                placements.push((child.id, child_pos));
                arrows.extend(child.arrows());
            }
        }

        debug!(
            "reorganized {} cards in {} stack groups on the table of {}",
            placements.len(),
            self.widths.len(),
            self.player
        );

        for (id, position) in placements {
            if let Some(card) = self.cards.get_mut(&id) {
                card.position = position;
                card.z_value = paint_order(position, card_height);
            }
        }

        self.events
            .extend(arrows.into_iter().map(ZoneEvent::ArrowPathChanged));

        self.resize_to_contents();
    }

    /// Grow or shrink the zone to fit its rightmost card.
    ///
    /// Only cards laid out by the last pass count: placed cards and the
    /// attachments of placed holders. Other cards keep stale positions and
    /// are ignored.
    ///
    /// Queues `ZoneEvent::SizeChanged` and returns true only if the width
    /// actually changed.
    pub fn resize_to_contents(&mut self) -> bool {
        let layout = &self.layout;
        let x_max = self
            .cards
            .values()
            .filter(|c| self.is_laid_out(c))
            .map(|c| c.position.x)
            .fold(0.0_f64, f64::max)
            .floor();

        // The card itself plus one card of headroom
        let content = (x_max + 2.0 * layout.card_width).max(layout.min_width);
        let new_width = content + 2.0 * layout.margin_x + 2.0 * layout.box_line_width;

        if new_width == self.width {
            return false;
        }

        trace!(
            "table of {} resized from {} to {}",
            self.player,
            self.width,
            new_width
        );
        self.width = new_width;
        self.events.push(ZoneEvent::SizeChanged {
            width: self.width,
            height: self.height,
        });
        true
    }

    // === Events ===

    /// Events queued since the last drain.
    #[must_use]
    pub fn pending_events(&self) -> &[ZoneEvent] {
        &self.events
    }

    /// Take all queued events.
    pub fn drain_events(&mut self) -> Vec<ZoneEvent> {
        std::mem::take(&mut self.events)
    }

    // === Commands ===

    /// Build the move command for cards dropped at a pixel position.
    #[must_use]
    pub fn handle_drop(
        &self,
        dragged: &[DraggedCard],
        start_zone: &ZoneRef,
        drop_point: PixelPoint,
    ) -> ZoneCommand {
        self.handle_drop_by_grid(dragged, start_zone, self.map_to_grid(drop_point))
    }

    /// Build the move command for cards dropped on a grid slot.
    ///
    /// Power/toughness travels only with cards entering from another zone.
    #[must_use]
    pub fn handle_drop_by_grid(
        &self,
        dragged: &[DraggedCard],
        start_zone: &ZoneRef,
        addr: GridAddress,
    ) -> ZoneCommand {
        let target = self.zone_ref();
        let same_zone = *start_zone == target;

        let cards = dragged
            .iter()
            .map(|d| CardToMove {
                card_id: d.id,
                face_down: d.face_down,
                power_toughness: (!same_zone).then(|| d.power_toughness.clone()),
            })
            .collect();

        ZoneCommand::MoveCards {
            start: start_zone.clone(),
            target,
            x: addr.column,
            y: addr.row,
            cards,
        }
    }

    /// Tap every selected card if any is untapped, otherwise untap them all.
    ///
    /// Only cards whose state actually flips get a command. Ids not on this
    /// table are ignored.
    #[must_use]
    pub fn toggle_tapped(&self, selected: &[EntityId]) -> CommandBatch {
        let selected: Vec<&TableCard> = selected.iter().filter_map(|id| self.card(*id)).collect();
        let tap_all = selected.iter().any(|c| !c.tapped);

        selected
            .into_iter()
            .filter(|c| c.tapped != tap_all)
            .map(|c| ZoneCommand::SetCardAttr {
                zone: TABLE_ZONE_NAME.to_string(),
                card_id: c.id,
                attribute: CardAttribute::Tapped,
                value: if tap_all { "1" } else { "0" }.to_string(),
            })
            .collect()
    }

    // === Previews ===

    /// Lay out a hypothetical move without touching this zone.
    ///
    /// Returns the moved-to zone with its event queue empty, or `None` for an
    /// unknown card.
    #[must_use]
    pub fn preview_move(&self, id: EntityId, addr: GridAddress) -> Option<TableZone> {
        if !self.contains(id) {
            return None;
        }
        let mut preview = self.clone();
        preview.move_card(id, addr);
        preview.events.clear();
        Some(preview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone() -> TableZone {
        TableZone::new(PlayerId::new(0), TableLayout::default(), DisplaySettings::default())
            .unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_new_zone_geometry() {
        let zone = zone();
        assert_eq!(zone.size(), (600.0, 406.0));
        assert!(zone.is_empty());
        assert!(!zone.is_inverted());
        assert_eq!(zone.name(), "table");
    }

    #[test]
    fn test_invalid_layout_rejected() {
        let layout = TableLayout::default().with_card_size(-1.0, 10.0);
        assert!(TableZone::new(PlayerId::new(0), layout, DisplaySettings::default()).is_err());
    }

    #[test]
    fn test_add_positions_card() {
        let mut zone = zone();
        assert!(zone.add_card(TableCard::new(EntityId(1)), GridAddress::new(0, 0)));
        assert!(!zone.add_card(TableCard::new(EntityId(1)), GridAddress::new(3, 0)));

        let card = zone.card(EntityId(1)).unwrap();
        assert_eq!(card.position, PixelPoint::new(20.0, 10.0));
        assert_eq!(card.z_value, paint_order(card.position, 102.0));
    }

    #[test]
    fn test_add_clamps_row() {
        let mut zone = zone();
        zone.add_card(TableCard::new(EntityId(1)), GridAddress::new(0, 9));
        assert_eq!(zone.card(EntityId(1)).unwrap().grid, GridAddress::new(0, 2));
    }

    #[test]
    fn test_attachment_fan() {
        let mut zone = zone();
        zone.add_card(TableCard::new(EntityId(1)), GridAddress::new(0, 0));
        zone.add_card(TableCard::new(EntityId(2)), GridAddress::new(3, 0));
        zone.add_card(TableCard::new(EntityId(3)), GridAddress::new(6, 0));
        assert!(zone.attach_card(EntityId(2), EntityId(1)));
        assert!(zone.attach_card(EntityId(3), EntityId(1)));

        let holder = zone.card(EntityId(1)).unwrap();
        assert_eq!(holder.attachment_count(), 2);
        assert!(approx(holder.position.x, 20.0 + 2.0 * 24.0));
        assert!(approx(holder.position.y, 10.0 + 15.0));

        let first = zone.card(EntityId(2)).unwrap();
        assert!(!first.is_placed());
        assert!(approx(first.position.x, holder.position.x - 24.0));
        assert!(approx(first.position.y, 15.0));

        let second = zone.card(EntityId(3)).unwrap();
        assert!(approx(second.position.x, holder.position.x - 48.0));

        // Holder draws above its attachments
        assert!(holder.z_value > first.z_value);
    }

    #[test]
    fn test_attach_rejects_bad_pairs() {
        let mut zone = zone();
        zone.add_card(TableCard::new(EntityId(1)), GridAddress::new(0, 0));
        zone.add_card(TableCard::new(EntityId(2)), GridAddress::new(3, 0));
        zone.add_card(TableCard::new(EntityId(3)), GridAddress::new(6, 0));

        assert!(!zone.attach_card(EntityId(1), EntityId(1)));
        assert!(!zone.attach_card(EntityId(1), EntityId(99)));

        assert!(zone.attach_card(EntityId(2), EntityId(1)));
        // Holder already carries an attachment
        assert!(!zone.attach_card(EntityId(1), EntityId(3)));
        // Cannot attach to an attachment
        assert!(!zone.attach_card(EntityId(3), EntityId(2)));
    }

    #[test]
    fn test_reattach_moves_between_holders() {
        let mut zone = zone();
        zone.add_card(TableCard::new(EntityId(1)), GridAddress::new(0, 0));
        zone.add_card(TableCard::new(EntityId(2)), GridAddress::new(3, 0));
        zone.add_card(TableCard::new(EntityId(3)), GridAddress::new(6, 0));

        zone.attach_card(EntityId(3), EntityId(1));
        zone.attach_card(EntityId(3), EntityId(2));

        assert_eq!(zone.card(EntityId(1)).unwrap().attachment_count(), 0);
        assert_eq!(zone.card(EntityId(2)).unwrap().attachment_count(), 1);
        assert_eq!(zone.card(EntityId(3)).unwrap().attached_to, Some(EntityId(2)));
    }

    #[test]
    fn test_detach() {
        let mut zone = zone();
        zone.add_card(TableCard::new(EntityId(1)), GridAddress::new(0, 0));
        zone.add_card(TableCard::new(EntityId(2)), GridAddress::new(3, 0));
        zone.attach_card(EntityId(2), EntityId(1));

        assert!(zone.detach_card(EntityId(2), GridAddress::new(0, 1)));
        assert!(!zone.detach_card(EntityId(2), GridAddress::new(0, 1)));

        let child = zone.card(EntityId(2)).unwrap();
        assert_eq!(child.grid, GridAddress::new(0, 1));
        assert_eq!(child.attached_to, None);
        assert_eq!(zone.card(EntityId(1)).unwrap().attachment_count(), 0);
    }

    #[test]
    fn test_take_card_unlinks() {
        let mut zone = zone();
        zone.add_card(TableCard::new(EntityId(1)), GridAddress::new(0, 0));
        zone.add_card(TableCard::new(EntityId(2)), GridAddress::new(3, 0));
        zone.attach_card(EntityId(2), EntityId(1));

        let holder = zone.take_card(EntityId(1), true).unwrap();
        assert_eq!(holder.attachment_count(), 0);
        assert_eq!(zone.card(EntityId(2)).unwrap().attached_to, None);
        assert_eq!(zone.len(), 1);
        assert!(zone.take_card(EntityId(1), true).is_none());
    }

    #[test]
    fn test_card_at_grid_ignores_unplaced() {
        let mut zone = zone();
        zone.add_card(TableCard::new(EntityId(1)), GridAddress::UNPLACED);
        assert!(zone.card_at_grid(GridAddress::UNPLACED).is_none());
    }

    #[test]
    fn test_closest_grid_point_probes_sub_slots() {
        let mut zone = zone();
        let target = zone.map_from_grid(GridAddress::new(0, 0));

        assert_eq!(zone.closest_grid_point(target), zone.map_from_grid(GridAddress::new(0, 0)));

        zone.add_card(TableCard::new(EntityId(1)), GridAddress::new(0, 0));
        assert_eq!(zone.closest_grid_point(target), zone.map_from_grid(GridAddress::new(1, 0)));

        zone.add_card(TableCard::new(EntityId(2)), GridAddress::new(1, 0));
        assert_eq!(zone.closest_grid_point(target), zone.map_from_grid(GridAddress::new(2, 0)));

        // Full group overlaps in the last sub-slot
        zone.add_card(TableCard::new(EntityId(3)), GridAddress::new(2, 0));
        assert_eq!(zone.closest_grid_point(target), zone.map_from_grid(GridAddress::new(2, 0)));
    }

    #[test]
    fn test_arrow_events_deduplicated() {
        let mut zone = zone();
        zone.add_card(TableCard::new(EntityId(1)), GridAddress::new(0, 0));
        zone.add_card(TableCard::new(EntityId(2)), GridAddress::new(3, 1));
        assert!(zone.link_arrow(ArrowId(7), EntityId(1), EntityId(2)));
        assert!(!zone.link_arrow(ArrowId(8), EntityId(50), EntityId(51)));
        zone.drain_events();

        zone.reorganize();
        let arrows: Vec<_> = zone.drain_events().iter().filter_map(ZoneEvent::arrow).collect();
        assert_eq!(arrows, vec![ArrowId(7)]);

        zone.unlink_arrow(ArrowId(7));
        zone.reorganize();
        assert!(zone.drain_events().iter().all(|e| e.arrow().is_none()));
    }

    #[test]
    fn test_resize_grows_and_shrinks() {
        let mut zone = zone();
        zone.drain_events();

        zone.add_card(TableCard::new(EntityId(1)), GridAddress::new(18, 0));
        let events = zone.drain_events();
        assert!(events.iter().any(ZoneEvent::is_size_change));
        // Six empty groups of 72 + 35 before column 18
        let x = 20.0 + 6.0 * 107.0;
        assert_eq!(zone.width(), (x + 144.0) + 40.0 + 20.0);

        zone.take_card(EntityId(1), true);
        assert_eq!(zone.width(), 600.0);
    }

    #[test]
    fn test_resize_ignores_unplaced_cards() {
        let mut zone = zone();
        zone.add_card(TableCard::new(EntityId(1)), GridAddress::new(30, 0));
        assert!(zone.width() > 600.0);

        assert!(zone.move_card(EntityId(1), GridAddress::UNPLACED));
        assert_eq!(zone.width(), 600.0);
    }

    #[test]
    fn test_resize_after_holder_leaves() {
        let mut zone = zone();
        zone.add_card(TableCard::new(EntityId(1)), GridAddress::new(30, 0));
        zone.add_card(TableCard::new(EntityId(2)), GridAddress::UNPLACED);
        assert!(zone.attach_card(EntityId(2), EntityId(1)));
        assert!(zone.width() > 600.0);

        // Unplacing the holder takes its attachment out of the layout too
        zone.move_card(EntityId(1), GridAddress::UNPLACED);
        assert_eq!(zone.width(), 600.0);
        zone.move_card(EntityId(1), GridAddress::new(30, 0));
        assert!(zone.width() > 600.0);

        // The released attachment stays on the table, unplaced
        zone.take_card(EntityId(1), true);
        assert_eq!(zone.card(EntityId(2)).unwrap().attached_to, None);
        assert_eq!(zone.width(), 600.0);
    }

    #[test]
    fn test_negative_column_clamped() {
        let mut zone = zone();
        zone.add_card(TableCard::new(EntityId(1)), GridAddress::new(-5, 1));
        let card = zone.card(EntityId(1)).unwrap();
        assert_eq!(card.grid, GridAddress::new(0, 1));
        assert_eq!(zone.map_to_grid(card.position), GridAddress::new(0, 1));

        zone.move_card(EntityId(1), GridAddress::new(-3, 0));
        assert_eq!(zone.card(EntityId(1)).unwrap().grid, GridAddress::new(0, 0));

        // The sentinel still unplaces
        zone.move_card(EntityId(1), GridAddress::UNPLACED);
        assert!(!zone.card(EntityId(1)).unwrap().is_placed());
    }

    #[test]
    fn test_config_signal_inverts() {
        let mut zone = zone();
        zone.add_card(TableCard::new(EntityId(1)), GridAddress::new(0, 0));
        let before = zone.card(EntityId(1)).unwrap().position;

        assert!(zone.on_config_changed(&ConfigSignal::InvertVerticalChanged(true)));
        assert!(zone.is_inverted());
        let after = zone.card(EntityId(1)).unwrap().position;
        assert_eq!(after.x, before.x);
        assert!(approx(after.y, 10.0 + 2.0 * 132.0));

        // Mirroring on top of the global invert cancels out
        zone.set_mirrored(true);
        assert!(!zone.is_inverted());
        assert_eq!(zone.card(EntityId(1)).unwrap().position, before);
    }

    #[test]
    fn test_background_signal_queues_repaint() {
        let mut zone = zone();
        zone.drain_events();
        zone.on_config_changed(&ConfigSignal::BackgroundPathChanged(Some("felt.png".into())));
        assert_eq!(
            zone.drain_events(),
            vec![ZoneEvent::BackgroundChanged(Some("felt.png".into()))]
        );
        assert_eq!(zone.background_path(), Some("felt.png"));
        assert!(!zone.on_config_changed(&ConfigSignal::BackgroundPathChanged(Some("felt.png".into()))));
    }

    #[test]
    fn test_land_divider() {
        let mut zone = zone();
        assert_eq!(zone.land_divider_y(), 2.0 * 132.0 + 10.0 - 5.0);
        zone.set_mirrored(true);
        assert_eq!(zone.land_divider_y(), 406.0 - 269.0);
    }

    #[test]
    fn test_paint_list_order() {
        let mut zone = zone();
        zone.add_card(TableCard::new(EntityId(1)), GridAddress::new(0, 2));
        zone.add_card(TableCard::new(EntityId(2)), GridAddress::new(0, 0));
        zone.add_card(TableCard::new(EntityId(3)), GridAddress::new(3, 0));

        let ids: Vec<_> = zone.paint_list().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![EntityId(2), EntityId(3), EntityId(1)]);
    }

    #[test]
    fn test_preview_leaves_zone_untouched() {
        let mut zone = zone();
        zone.add_card(TableCard::new(EntityId(1)), GridAddress::new(0, 0));
        zone.drain_events();

        let preview = zone.preview_move(EntityId(1), GridAddress::new(9, 1)).unwrap();
        assert_eq!(preview.card(EntityId(1)).unwrap().grid, GridAddress::new(9, 1));
        assert!(preview.pending_events().is_empty());

        assert_eq!(zone.card(EntityId(1)).unwrap().grid, GridAddress::new(0, 0));
        assert!(zone.pending_events().is_empty());
        assert!(zone.preview_move(EntityId(42), GridAddress::new(0, 0)).is_none());
    }
}
