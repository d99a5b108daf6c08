#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Block World.
//!
//! [`WorldModel`] owns the loaded [`WorldMap`], the cache of reachable
//! positions, and the builder's logical position. Every mutation delegates the
//! legality decision to the domain library, then updates only the bookkeeping
//! it owns and broadcasts targeted [`Event`] values to registered listeners.
//! Listeners receive the model itself as a read-only context, which lets
//! views query fresh state without being able to mutate it mid-dispatch.

use block_world_core::{
    BlockKind, Command, Direction, Event, EventDispatcher, EventKind, InventoryCounts, Listener,
    Position, PositionTileMap, Topic,
};
use block_world_map::{BlockWorldError, Tile, WorldMap};
use thiserror::Error;

mod reachability;

pub use reachability::compute_reachable;

/// Listener registered with a [`WorldModel`].
pub type ModelListener = Listener<Event, WorldModel>;

/// Subscription key accepted by [`WorldModel::add_listener`].
pub type ModelTopic = Topic<EventKind>;

/// Reasons a world mutation may be rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    /// The domain library refused the action.
    #[error(transparent)]
    Domain(#[from] BlockWorldError),
    /// The builder carries no block of the requested kind.
    #[error("you have no more {kind}")]
    NotFound {
        /// Kind of block that was requested.
        kind: BlockKind,
    },
    /// No map has been loaded yet.
    #[error("no world map has been loaded")]
    MapNotLoaded,
}

/// State owner and single mutation gateway for the block world.
#[derive(Debug, Default)]
pub struct WorldModel {
    map: Option<WorldMap>,
    tiles: PositionTileMap,
    position: Position,
    dispatcher: EventDispatcher<Event, WorldModel>,
}

impl WorldModel {
    /// Creates a model without a map. Load one with [`WorldModel::load_map`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current map and rebuilds the reachable tile cache.
    ///
    /// Emits [`Event::MapLoaded`] followed by [`Event::InventoryChanged`].
    pub fn load_map(&mut self, map: WorldMap) {
        let start = map.start_position();
        self.tiles = compute_reachable(&map, start);
        self.position = start;
        self.map = Some(map);
        log::debug!(
            "loaded map with {} reachable tiles starting at {start}",
            self.tiles.len()
        );

        self.notify(&Event::MapLoaded {
            start,
            tiles: self.tiles.clone(),
        });
        self.notify(&Event::InventoryChanged {
            counts: self.inventory_counts(),
        });
    }

    /// Executes a single command.
    pub fn apply(&mut self, command: Command) -> Result<(), ActionError> {
        match command {
            Command::MoveBuilder { direction } => self.move_builder(direction),
            Command::Dig => self.dig(),
            Command::MoveBlock { direction } => self.move_block(direction),
            Command::PlaceBlock { kind } => self.place_block(kind),
        }
    }

    /// Moves the builder through the exit in the provided direction.
    pub fn move_builder(&mut self, direction: Direction) -> Result<(), ActionError> {
        self.map_mut()?.move_builder(direction)?;
        self.position = self.position.step(direction);
        self.assert_position_consistent();
        log::debug!("builder moved {direction} to {}", self.position);

        self.notify(&Event::BuilderMoved { direction });
        Ok(())
    }

    /// Digs the top block of the builder's tile into the inventory.
    pub fn dig(&mut self) -> Result<(), ActionError> {
        self.map_mut()?.dig_on_current_tile()?;
        log::debug!("builder dug at {}", self.position);

        self.notify(&Event::BlocksChanged {
            position: self.position,
        });
        self.notify(&Event::InventoryChanged {
            counts: self.inventory_counts(),
        });
        Ok(())
    }

    /// Pushes the top block of the builder's tile onto the adjacent tile.
    pub fn move_block(&mut self, direction: Direction) -> Result<(), ActionError> {
        let map = self.map_mut()?;
        let current = map.builder().current_tile();
        map.move_block(current, direction)?;
        let destination = self.position.step(direction);
        log::debug!("moved block from {} to {destination}", self.position);

        self.notify(&Event::BlocksChanged {
            position: self.position,
        });
        self.notify(&Event::BlocksChanged {
            position: destination,
        });
        Ok(())
    }

    /// Places the first carried block of the provided kind onto the builder's tile.
    pub fn place_block(&mut self, kind: BlockKind) -> Result<(), ActionError> {
        let map = self.map_mut()?;
        let index = map
            .builder()
            .inventory()
            .iter()
            .position(|block| block.kind() == kind)
            .ok_or(ActionError::NotFound { kind })?;

        match map.drop_from_inventory(index) {
            Ok(()) => {}
            Err(BlockWorldError::InvalidBlock) => {
                unreachable!("inventory slot {index} vanished between lookup and drop")
            }
            Err(error) => return Err(error.into()),
        }
        log::debug!("placed {kind} at {}", self.position);

        self.notify(&Event::InventoryChanged {
            counts: self.inventory_counts(),
        });
        self.notify(&Event::BlocksChanged {
            position: self.position,
        });
        Ok(())
    }

    /// Broadcasts a user-facing error message.
    pub fn report_error(&self, message: impl Into<String>) {
        self.notify(&Event::Error {
            message: message.into(),
        });
    }

    /// Broadcasts a user-facing informational message.
    pub fn report_info(&self, message: impl Into<String>) {
        self.notify(&Event::Info {
            message: message.into(),
        });
    }

    /// Registers a listener for the provided topic.
    pub fn add_listener(&mut self, topic: ModelTopic, listener: ModelListener) {
        self.dispatcher.add_listener(topic, listener);
    }

    /// Unregisters a listener from the provided topic.
    pub fn remove_listener(&mut self, topic: ModelTopic, listener: &ModelListener) {
        self.dispatcher.remove_listener(topic, listener);
    }

    /// Whether a map has been loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.map.is_some()
    }

    /// The loaded map, if any.
    #[must_use]
    pub fn world_map(&self) -> Option<&WorldMap> {
        self.map.as_ref()
    }

    /// Position the builder started at on the loaded map.
    #[must_use]
    pub fn start_position(&self) -> Option<Position> {
        self.map.as_ref().map(WorldMap::start_position)
    }

    /// Builder's logical position.
    #[must_use]
    pub const fn current_position(&self) -> Position {
        self.position
    }

    /// Reachable positions and their tiles, as computed at load time.
    #[must_use]
    pub fn tiles(&self) -> &PositionTileMap {
        &self.tiles
    }

    /// Tile cached at the provided position.
    #[must_use]
    pub fn tile_at(&self, position: Position) -> Option<&Tile> {
        let id = self.tiles.get(&position)?;
        self.map.as_ref()?.tile(*id)
    }

    /// Height of the stack at the provided position.
    #[must_use]
    pub fn height_at(&self, position: Position) -> Option<usize> {
        self.tile_at(position).map(Tile::height)
    }

    /// Kind of the top block at the provided position, if the tile has any blocks.
    #[must_use]
    pub fn top_block_at(&self, position: Position) -> Option<BlockKind> {
        self.tile_at(position)?
            .top_block()
            .ok()
            .map(|block| block.kind())
    }

    /// Whether the tile at the provided position has an exit in `direction`.
    #[must_use]
    pub fn has_exit(&self, position: Position, direction: Direction) -> bool {
        self.tile_at(position).is_some_and(|tile| tile.exit(direction).is_some())
    }

    /// Counts the builder's inventory by block kind.
    #[must_use]
    pub fn inventory_counts(&self) -> InventoryCounts {
        self.map.as_ref().map_or_else(InventoryCounts::default, |map| {
            map.builder()
                .inventory()
                .iter()
                .map(|block| block.kind())
                .collect()
        })
    }

    /// Whether the builder could move in the provided direction right now.
    #[must_use]
    pub fn can_move(&self, direction: Direction) -> bool {
        let Some(map) = self.map.as_ref() else {
            return false;
        };
        map.tile(map.builder().current_tile())
            .and_then(|tile| tile.exit(direction))
            .is_some_and(|target| map.builder_can_enter(target))
    }

    /// Whether the builder could dig right now.
    #[must_use]
    pub fn can_dig(&self) -> bool {
        self.tile_at(self.position)
            .and_then(|tile| tile.top_block().ok())
            .is_some_and(|block| block.is_diggable())
    }

    fn map_mut(&mut self) -> Result<&mut WorldMap, ActionError> {
        self.map.as_mut().ok_or(ActionError::MapNotLoaded)
    }

    fn notify(&self, event: &Event) {
        log::trace!("dispatching {event:?}");
        self.dispatcher.notify_listeners(event, self);
    }

    fn assert_position_consistent(&self) {
        let builder_tile = self.map.as_ref().map(|map| map.builder().current_tile());
        let cached_tile = self.tiles.get(&self.position).copied();
        assert_eq!(
            cached_tile, builder_tile,
            "logical position {} diverged from the builder's tile",
            self.position
        );
    }
}
