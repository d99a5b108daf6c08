#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Domain library for the block world.
//!
//! Tiles live in an arena owned by [`WorldMap`] and refer to one another via
//! [`TileId`] handles. The map enforces every legality rule (movement,
//! digging, block placement, and block transfer) and reports violations as
//! [`BlockWorldError`] values without changing any state.

use std::collections::HashMap;

use block_world_core::{Direction, Position, TileGraph, TileId};
use thiserror::Error;

mod block;
mod tile;

pub use block::Block;
pub use tile::Tile;

/// Name given to the builder when none is provided.
pub const DEFAULT_BUILDER_NAME: &str = "Steve";

/// Rule violations reported by the domain library.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
pub enum BlockWorldError {
    /// No exit leads that way, or the tile behind it cannot be entered.
    #[error("there is no way through in that direction")]
    NoExit,
    /// The block cannot be dug or moved, or the inventory slot does not exist.
    #[error("that block can't be used like that")]
    InvalidBlock,
    /// The tile has no blocks.
    #[error("there are no blocks here")]
    TooLow,
    /// The destination stack is too tall to accept the block.
    #[error("the stack is too high")]
    TooHigh,
}

/// Problems detected while assembling a [`WorldMap`].
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum MapError {
    /// An exit or the start position refers to a position without a tile.
    #[error("no tile exists at {0}")]
    MissingTile(Position),
    /// Two tiles were placed at the same position.
    #[error("more than one tile was placed at {0}")]
    DuplicateTile(Position),
}

/// Player-controlled entity standing on exactly one tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Builder {
    name: String,
    current: TileId,
    inventory: Vec<Block>,
}

impl Builder {
    /// Display name of the builder.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tile the builder currently stands on.
    #[must_use]
    pub const fn current_tile(&self) -> TileId {
        self.current
    }

    /// Carried blocks in the order they were collected.
    #[must_use]
    pub fn inventory(&self) -> &[Block] {
        &self.inventory
    }
}

/// Authoritative collection of tiles, their layout, and the builder.
#[derive(Clone, Debug)]
pub struct WorldMap {
    tiles: Vec<Tile>,
    layout: HashMap<Position, TileId>,
    start: Position,
    builder: Builder,
}

impl WorldMap {
    /// Position the builder started at.
    #[must_use]
    pub const fn start_position(&self) -> Position {
        self.start
    }

    /// Handle of the tile placed at the provided position, if any.
    #[must_use]
    pub fn tile_at(&self, position: Position) -> Option<TileId> {
        self.layout.get(&position).copied()
    }

    /// Resolves a tile handle.
    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(slot(id))
    }

    /// Number of tiles stored in the map.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// The builder occupying the map.
    #[must_use]
    pub const fn builder(&self) -> &Builder {
        &self.builder
    }

    /// Whether the builder may step onto the provided tile.
    ///
    /// The tile must be an exit of the builder's current tile and the two
    /// stacks may differ by at most one block.
    #[must_use]
    pub fn builder_can_enter(&self, target: TileId) -> bool {
        let current = self.tile_ref(self.builder.current);
        let Some(destination) = self.tile(target) else {
            return false;
        };

        current.exits().any(|(_, exit)| exit == target)
            && current.height().abs_diff(destination.height()) <= 1
    }

    /// Moves the builder through the exit in the provided direction.
    pub fn move_builder(&mut self, direction: Direction) -> Result<(), BlockWorldError> {
        let target = self
            .tile_ref(self.builder.current)
            .exit(direction)
            .ok_or(BlockWorldError::NoExit)?;

        if !self.builder_can_enter(target) {
            return Err(BlockWorldError::NoExit);
        }

        self.builder.current = target;
        Ok(())
    }

    /// Digs the top block of the builder's tile.
    ///
    /// Carryable blocks are appended to the inventory; others are discarded.
    pub fn dig_on_current_tile(&mut self) -> Result<(), BlockWorldError> {
        let current = self.builder.current;
        let block = self.tile_mut(current).dig()?;
        if block.is_carryable() {
            self.builder.inventory.push(block);
        }
        Ok(())
    }

    /// Places the inventory block at the provided index onto the builder's tile.
    ///
    /// The inventory is left untouched when placement fails.
    pub fn drop_from_inventory(&mut self, index: usize) -> Result<(), BlockWorldError> {
        let block = *self
            .builder
            .inventory
            .get(index)
            .ok_or(BlockWorldError::InvalidBlock)?;
        let current = self.builder.current;

        self.tile_mut(current).place_block(block)?;
        let _ = self.builder.inventory.remove(index);
        Ok(())
    }

    /// Pushes the top block of a tile onto the tile behind its exit.
    ///
    /// Checks run in order: the exit must exist, the destination must be
    /// lower than the source, and the top block must be moveable.
    pub fn move_block(
        &mut self,
        from: TileId,
        direction: Direction,
    ) -> Result<(), BlockWorldError> {
        let source = self.tile_ref(from);
        let to = source.exit(direction).ok_or(BlockWorldError::NoExit)?;
        let destination = self.tile_ref(to);

        if destination.height() >= source.height() {
            return Err(BlockWorldError::TooHigh);
        }

        let top = source.top_block()?;
        if !top.is_moveable() {
            return Err(BlockWorldError::InvalidBlock);
        }
        destination.check_placement(top)?;

        let _ = self.tile_mut(from).pop_block();
        self.tile_mut(to).place_block(top)
    }

    fn tile_ref(&self, id: TileId) -> &Tile {
        &self.tiles[slot(id)]
    }

    fn tile_mut(&mut self, id: TileId) -> &mut Tile {
        &mut self.tiles[slot(id)]
    }
}

impl TileGraph for WorldMap {
    type Tile = TileId;

    fn tile_at(&self, position: Position) -> Option<TileId> {
        WorldMap::tile_at(self, position)
    }

    fn has_exit(&self, tile: TileId, direction: Direction) -> bool {
        self.tile(tile).is_some_and(|tile| tile.exit(direction).is_some())
    }
}

/// Incrementally assembles a [`WorldMap`].
///
/// Exits always connect geometrically adjacent positions: an exit from `p`
/// towards `d` leads to the tile at `p.step(d)`.
#[derive(Clone, Debug, Default)]
pub struct WorldMapBuilder {
    tiles: Vec<(Position, Tile)>,
    exits: Vec<(Position, Direction)>,
    builder_name: Option<String>,
    inventory: Vec<Block>,
}

impl WorldMapBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a tile at the provided position.
    #[must_use]
    pub fn tile(mut self, position: Position, tile: Tile) -> Self {
        self.tiles.push((position, tile));
        self
    }

    /// Adds a one-way exit from `from` to its neighbour in `direction`.
    #[must_use]
    pub fn exit(mut self, from: Position, direction: Direction) -> Self {
        self.exits.push((from, direction));
        self
    }

    /// Adds exits in both directions between `from` and its neighbour.
    #[must_use]
    pub fn connect(self, from: Position, direction: Direction) -> Self {
        self.exit(from, direction)
            .exit(from.step(direction), direction.opposite())
    }

    /// Names the builder.
    #[must_use]
    pub fn builder_name(mut self, name: impl Into<String>) -> Self {
        self.builder_name = Some(name.into());
        self
    }

    /// Sets the builder's starting inventory.
    #[must_use]
    pub fn inventory(mut self, blocks: impl IntoIterator<Item = Block>) -> Self {
        self.inventory = blocks.into_iter().collect();
        self
    }

    /// Validates the layout and produces the map with the builder at `start`.
    pub fn build(self, start: Position) -> Result<WorldMap, MapError> {
        let mut tiles = Vec::with_capacity(self.tiles.len());
        let mut layout = HashMap::with_capacity(self.tiles.len());

        for (index, (position, tile)) in self.tiles.into_iter().enumerate() {
            if layout.insert(position, TileId::new(index as u32)).is_some() {
                return Err(MapError::DuplicateTile(position));
            }
            tiles.push(tile);
        }

        for (from, direction) in self.exits {
            let source = *layout.get(&from).ok_or(MapError::MissingTile(from))?;
            let neighbour = from.step(direction);
            let target = *layout
                .get(&neighbour)
                .ok_or(MapError::MissingTile(neighbour))?;
            tiles[slot(source)].set_exit(direction, Some(target));
        }

        let current = *layout.get(&start).ok_or(MapError::MissingTile(start))?;
        log::debug!("assembled world map with {} tiles starting at {start}", tiles.len());

        Ok(WorldMap {
            tiles,
            layout,
            start,
            builder: Builder {
                name: self
                    .builder_name
                    .unwrap_or_else(|| DEFAULT_BUILDER_NAME.to_owned()),
                current,
                inventory: self.inventory,
            },
        })
    }
}

fn slot(id: TileId) -> usize {
    id.get() as usize
}
