#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Inventory panel showing how many placeable blocks the builder carries.

use std::{cell::RefCell, rc::Rc};

use block_world_core::{BlockKind, Event, EventKind, InventoryCounts, Topic};
use block_world_world::{ModelListener, WorldModel};

/// Block kinds the builder can carry, in display order.
pub const CARRYABLE_KINDS: [BlockKind; 2] = [BlockKind::Wood, BlockKind::Soil];

/// Label shown before the first inventory update.
pub const UNKNOWN_LABEL: &str = "–";

/// One entry of the inventory panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InventorySlot {
    kind: BlockKind,
    count: Option<u32>,
}

impl InventorySlot {
    const fn unknown(kind: BlockKind) -> Self {
        Self { kind, count: None }
    }

    /// Kind of block counted by the slot.
    #[must_use]
    pub const fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Carried amount, or `None` before the first update.
    #[must_use]
    pub const fn count(&self) -> Option<u32> {
        self.count
    }

    /// Text shown beside the block icon.
    #[must_use]
    pub fn label(&self) -> String {
        self.count
            .map_or_else(|| UNKNOWN_LABEL.to_owned(), |count| format!("×{count}"))
    }
}

/// Inventory panel state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InventoryView {
    slots: [InventorySlot; CARRYABLE_KINDS.len()],
}

impl Default for InventoryView {
    fn default() -> Self {
        Self {
            slots: CARRYABLE_KINDS.map(InventorySlot::unknown),
        }
    }
}

impl InventoryView {
    /// Creates a panel with every label unknown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the view with the model and returns the shared handle.
    pub fn attach(self, model: &mut WorldModel) -> Rc<RefCell<Self>> {
        let view = Rc::new(RefCell::new(self));
        let listener: ModelListener = {
            let view = Rc::clone(&view);
            Rc::new(move |event: &Event, model: &WorldModel| {
                view.borrow_mut().handle(event, model);
            })
        };
        model.add_listener(Topic::Kind(EventKind::MapLoaded), Rc::clone(&listener));
        model.add_listener(Topic::Kind(EventKind::InventoryChanged), listener);
        view
    }

    /// Applies a world event to the panel.
    pub fn handle(&mut self, event: &Event, _model: &WorldModel) {
        match event {
            Event::MapLoaded { .. } => *self = Self::default(),
            Event::InventoryChanged { counts } => self.update(counts),
            _ => {}
        }
    }

    /// Slots in display order.
    #[must_use]
    pub fn slots(&self) -> &[InventorySlot] {
        &self.slots
    }

    /// Slot for the provided kind, if the panel shows it.
    #[must_use]
    pub fn slot(&self, kind: BlockKind) -> Option<&InventorySlot> {
        self.slots.iter().find(|slot| slot.kind == kind)
    }

    /// Whether at least one block of the provided kind can be placed.
    #[must_use]
    pub fn placeable(&self, kind: BlockKind) -> bool {
        self.slot(kind)
            .and_then(InventorySlot::count)
            .is_some_and(|count| count > 0)
    }

    fn update(&mut self, counts: &InventoryCounts) {
        for slot in &mut self.slots {
            slot.count = Some(counts.get(slot.kind));
        }
        log::trace!("inventory panel updated: {:?}", self.slots);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_start_unknown() {
        let view = InventoryView::new();

        let labels: Vec<String> = view.slots().iter().map(InventorySlot::label).collect();
        assert_eq!(labels, vec![UNKNOWN_LABEL, UNKNOWN_LABEL]);
        assert!(!view.placeable(BlockKind::Wood));
    }

    #[test]
    fn counts_update_labels() {
        let mut view = InventoryView::new();
        let counts: InventoryCounts = [BlockKind::Wood, BlockKind::Wood].into_iter().collect();

        view.update(&counts);

        assert_eq!(view.slot(BlockKind::Wood).map(InventorySlot::label), Some("×2".to_owned()));
        assert_eq!(view.slot(BlockKind::Soil).map(InventorySlot::label), Some("×0".to_owned()));
        assert!(view.placeable(BlockKind::Wood));
        assert!(!view.placeable(BlockKind::Soil));
        assert!(view.slot(BlockKind::Stone).is_none(), "stone is never carried");
    }
}
