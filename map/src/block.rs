//! Individual blocks and the rules attached to each kind.

use block_world_core::BlockKind;

/// Single block that can sit in a tile's stack or in the builder's inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    kind: BlockKind,
}

impl Block {
    /// Creates a block of the provided kind.
    #[must_use]
    pub const fn new(kind: BlockKind) -> Self {
        Self { kind }
    }

    /// Creates a wooden block.
    #[must_use]
    pub const fn wood() -> Self {
        Self::new(BlockKind::Wood)
    }

    /// Creates a grass block.
    #[must_use]
    pub const fn grass() -> Self {
        Self::new(BlockKind::Grass)
    }

    /// Creates a soil block.
    #[must_use]
    pub const fn soil() -> Self {
        Self::new(BlockKind::Soil)
    }

    /// Creates a stone block.
    #[must_use]
    pub const fn stone() -> Self {
        Self::new(BlockKind::Stone)
    }

    /// Classifies the block.
    #[must_use]
    pub const fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Whether the block can be dug off the top of a tile.
    #[must_use]
    pub const fn is_diggable(&self) -> bool {
        !matches!(self.kind, BlockKind::Stone)
    }

    /// Whether the block can be pushed onto an adjacent tile.
    #[must_use]
    pub const fn is_moveable(&self) -> bool {
        matches!(self.kind, BlockKind::Wood | BlockKind::Stone)
    }

    /// Whether a dug block ends up in the builder's inventory.
    #[must_use]
    pub const fn is_carryable(&self) -> bool {
        matches!(self.kind, BlockKind::Wood | BlockKind::Soil)
    }

    /// Ground blocks may only be stacked near the bottom of a tile.
    #[must_use]
    pub const fn is_ground(&self) -> bool {
        matches!(self.kind, BlockKind::Grass | BlockKind::Soil)
    }
}
