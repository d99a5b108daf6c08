//! Block stacks and their directional exits.

use block_world_core::{Direction, TileId};

use crate::{Block, BlockWorldError};

/// Cell of the world holding a stack of blocks and up to four exits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    blocks: Vec<Block>,
    exits: [Option<TileId>; 4],
}

impl Tile {
    /// Highest stack a tile may hold.
    pub const MAX_HEIGHT: usize = 8;

    /// Ground blocks may only be placed while the stack is lower than this.
    pub const GROUND_LIMIT: usize = 3;

    /// Creates the default tile: two soil blocks under a grass block.
    #[must_use]
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::soil(), Block::soil(), Block::grass()],
            exits: [None; 4],
        }
    }

    /// Creates a tile without any blocks.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            blocks: Vec::new(),
            exits: [None; 4],
        }
    }

    /// Creates a tile from a bottom-to-top block stack.
    ///
    /// Fails with [`BlockWorldError::TooHigh`] when any block would violate the
    /// placement rules had it been placed one at a time.
    pub fn with_blocks(blocks: impl IntoIterator<Item = Block>) -> Result<Self, BlockWorldError> {
        let mut tile = Self::empty();
        for block in blocks {
            tile.place_block(block)?;
        }
        Ok(tile)
    }

    /// Blocks on the tile ordered bottom to top.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks stacked on the tile.
    #[must_use]
    pub fn height(&self) -> usize {
        self.blocks.len()
    }

    /// Block at the top of the stack.
    pub fn top_block(&self) -> Result<Block, BlockWorldError> {
        self.blocks.last().copied().ok_or(BlockWorldError::TooLow)
    }

    /// Tile reached through the exit in the provided direction, if any.
    #[must_use]
    pub fn exit(&self, direction: Direction) -> Option<TileId> {
        self.exits[direction.index()]
    }

    /// Every exit of the tile in canonical direction order.
    pub fn exits(&self) -> impl Iterator<Item = (Direction, TileId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| self.exit(direction).map(|tile| (direction, tile)))
    }

    /// Stacks a block on top of the tile.
    pub fn place_block(&mut self, block: Block) -> Result<(), BlockWorldError> {
        self.check_placement(block)?;
        self.blocks.push(block);
        Ok(())
    }

    /// Removes the top block from the tile.
    pub fn dig(&mut self) -> Result<Block, BlockWorldError> {
        let top = self.top_block()?;
        if !top.is_diggable() {
            return Err(BlockWorldError::InvalidBlock);
        }
        let _ = self.blocks.pop();
        Ok(top)
    }

    pub(crate) fn check_placement(&self, block: Block) -> Result<(), BlockWorldError> {
        let height = self.height();
        if height >= Self::MAX_HEIGHT || (block.is_ground() && height >= Self::GROUND_LIMIT) {
            return Err(BlockWorldError::TooHigh);
        }
        Ok(())
    }

    pub(crate) fn set_exit(&mut self, direction: Direction, tile: Option<TileId>) {
        self.exits[direction.index()] = tile;
    }

    pub(crate) fn pop_block(&mut self) -> Option<Block> {
        self.blocks.pop()
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Tile;
    use crate::{Block, BlockWorldError};

    #[test]
    fn default_tile_is_grass_over_soil() {
        let tile = Tile::new();
        assert_eq!(tile.height(), 3);
        assert_eq!(tile.top_block(), Ok(Block::grass()));
    }

    #[test]
    fn ground_blocks_stop_at_ground_limit() {
        let mut tile = Tile::new();
        assert_eq!(tile.place_block(Block::soil()), Err(BlockWorldError::TooHigh));
        assert_eq!(tile.place_block(Block::wood()), Ok(()));
        assert_eq!(tile.height(), 4);
    }

    #[test]
    fn stack_never_exceeds_max_height() {
        let mut tile = Tile::with_blocks([Block::wood(); Tile::MAX_HEIGHT]).expect("full stack");
        assert_eq!(tile.place_block(Block::stone()), Err(BlockWorldError::TooHigh));
        assert!(Tile::with_blocks([Block::stone(); Tile::MAX_HEIGHT + 1]).is_err());
    }

    #[test]
    fn digging_reports_empty_and_stone_tiles() {
        let mut empty = Tile::empty();
        assert_eq!(empty.dig(), Err(BlockWorldError::TooLow));

        let mut stone = Tile::with_blocks([Block::stone()]).expect("stone tile");
        assert_eq!(stone.dig(), Err(BlockWorldError::InvalidBlock));
        assert_eq!(stone.height(), 1, "failed dig must leave the stack intact");
    }
}
