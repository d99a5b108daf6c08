#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Block World workspace.
//!
//! This crate defines the vocabulary that connects the domain library, the
//! authoritative world model, and the view systems. Adapters submit
//! [`Command`] values describing desired mutations, the world model executes
//! them against the domain library, and then broadcasts [`Event`] values
//! through an [`EventDispatcher`] so that views can patch their local state
//! incrementally.

use std::{
    collections::HashMap,
    fmt,
    ops::{Add, Neg, Sub},
};

use serde::{Deserialize, Serialize};

pub mod dispatch;

pub use dispatch::{Categorised, EventDispatcher, Listener, Topic};

/// Two-dimensional integer coordinate of a tile on the world map.
///
/// `x` grows towards the east and `y` grows towards the south, so moving
/// north decreases `y`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// The origin of the coordinate system.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Creates a new position from its components.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal component of the position.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component of the position.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the adjacent position one step in the provided direction.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        self + direction.offset()
    }
}

impl Add for Position {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Neg for Position {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Sub for Position {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + -rhs
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal directions in which exits, neighbours, and shading are enumerated.
///
/// Every place that walks all four directions uses [`Direction::ALL`], which
/// fixes the order to north, east, south, west.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Towards decreasing `y`.
    North,
    /// Towards increasing `x`.
    East,
    /// Towards increasing `y`.
    South,
    /// Towards decreasing `x`.
    West,
}

impl Direction {
    /// All directions in canonical order.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Unit offset travelled when stepping in this direction.
    #[must_use]
    pub const fn offset(self) -> Position {
        match self {
            Self::North => Position::new(0, -1),
            Self::East => Position::new(1, 0),
            Self::South => Position::new(0, 1),
            Self::West => Position::new(-1, 0),
        }
    }

    /// Index of the direction within [`Direction::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Lower-case name of the direction.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type tag classifying a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BlockKind {
    /// Wooden block.
    Wood,
    /// Grass-topped ground block.
    Grass,
    /// Soil ground block.
    Soil,
    /// Stone block.
    Stone,
}

impl BlockKind {
    /// Every known block kind in canonical order.
    pub const ALL: [Self; 4] = [Self::Wood, Self::Grass, Self::Soil, Self::Stone];

    /// Index of the kind within [`BlockKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Wood => 0,
            Self::Grass => 1,
            Self::Soil => 2,
            Self::Stone => 3,
        }
    }

    /// Lower-case name of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wood => "wood",
            Self::Grass => "grass",
            Self::Soil => "soil",
            Self::Stone => "stone",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle to a tile stored by the domain library.
///
/// Two handles compare equal exactly when they refer to the same tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(u32);

impl TileId {
    /// Creates a new tile handle with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the handle.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Mapping from every reachable position to the tile occupying it.
pub type PositionTileMap = HashMap<Position, TileId>;

/// Number of blocks of each kind carried by the builder.
///
/// Every [`BlockKind`] has an entry; kinds that are not held count zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InventoryCounts {
    counts: [u32; BlockKind::ALL.len()],
}

impl InventoryCounts {
    /// Number of carried blocks of the provided kind.
    #[must_use]
    pub const fn get(&self, kind: BlockKind) -> u32 {
        self.counts[kind.index()]
    }

    /// Total number of carried blocks.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Iterator over every kind and its count in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockKind, u32)> + '_ {
        BlockKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.get(kind)))
    }
}

impl FromIterator<BlockKind> for InventoryCounts {
    fn from_iter<I: IntoIterator<Item = BlockKind>>(iter: I) -> Self {
        let mut counts = Self::default();
        for kind in iter {
            counts.counts[kind.index()] += 1;
        }
        counts
    }
}

/// Lookup seam used by the reachability traversal.
///
/// Implementors resolve positions to tile handles and report which exits a
/// tile has. The domain library's world map implements it; tests provide
/// lightweight fakes.
pub trait TileGraph {
    /// Handle identifying a tile.
    type Tile: Copy;

    /// Resolves the tile located at the provided position, if any.
    fn tile_at(&self, position: Position) -> Option<Self::Tile>;

    /// Reports whether the tile has an exit in the provided direction.
    fn has_exit(&self, tile: Self::Tile, direction: Direction) -> bool;
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Moves the builder across the exit in the provided direction.
    MoveBuilder {
        /// Direction of travel.
        direction: Direction,
    },
    /// Digs the top block of the builder's tile into the inventory.
    Dig,
    /// Pushes the top block of the builder's tile onto the adjacent tile.
    MoveBlock {
        /// Direction of the destination tile.
        direction: Direction,
    },
    /// Places a carried block of the provided kind onto the builder's tile.
    PlaceBlock {
        /// Kind of block to place.
        kind: BlockKind,
    },
}

/// Events broadcast by the world model after state changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A new map replaced the previous one.
    MapLoaded {
        /// Position the builder starts at.
        start: Position,
        /// Every reachable position with its tile.
        tiles: PositionTileMap,
    },
    /// The builder moved one tile.
    BuilderMoved {
        /// Direction the builder travelled in.
        direction: Direction,
    },
    /// The block stack of a tile changed.
    BlocksChanged {
        /// Position of the tile whose blocks changed.
        position: Position,
    },
    /// The builder's inventory changed.
    InventoryChanged {
        /// Block counts after the change.
        counts: InventoryCounts,
    },
    /// A user-facing error message.
    Error {
        /// Message text.
        message: String,
    },
    /// A user-facing informational message.
    Info {
        /// Message text.
        message: String,
    },
}

/// Discriminant of an [`Event`] used as the subscription key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Matches [`Event::MapLoaded`].
    MapLoaded,
    /// Matches [`Event::BuilderMoved`].
    BuilderMoved,
    /// Matches [`Event::BlocksChanged`].
    BlocksChanged,
    /// Matches [`Event::InventoryChanged`].
    InventoryChanged,
    /// Matches [`Event::Error`].
    Error,
    /// Matches [`Event::Info`].
    Info,
}

impl Categorised for Event {
    type Kind = EventKind;

    fn kind(&self) -> EventKind {
        match self {
            Self::MapLoaded { .. } => EventKind::MapLoaded,
            Self::BuilderMoved { .. } => EventKind::BuilderMoved,
            Self::BlocksChanged { .. } => EventKind::BlocksChanged,
            Self::InventoryChanged { .. } => EventKind::InventoryChanged,
            Self::Error { .. } => EventKind::Error,
            Self::Info { .. } => EventKind::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BlockKind, Direction, InventoryCounts, Position};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn north_decreases_y() {
        let origin = Position::new(3, 3);
        assert_eq!(origin.step(Direction::North), Position::new(3, 2));
        assert_eq!(origin.step(Direction::East), Position::new(4, 3));
        assert_eq!(origin.step(Direction::South), Position::new(3, 4));
        assert_eq!(origin.step(Direction::West), Position::new(2, 3));
    }

    #[test]
    fn position_arithmetic_is_component_wise() {
        let left = Position::new(5, -2);
        let right = Position::new(-1, 7);
        assert_eq!(left + right, Position::new(4, 5));
        assert_eq!(left - right, Position::new(6, -9));
        assert_eq!(-left, Position::new(-5, 2));
    }

    #[test]
    fn direction_order_is_north_east_south_west() {
        let indices: Vec<usize> = Direction::ALL.iter().map(|d| d.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_eq!(
                direction.offset() + direction.opposite().offset(),
                Position::ORIGIN
            );
        }
    }

    #[test]
    fn inventory_counts_cover_every_kind() {
        let counts: InventoryCounts = [BlockKind::Wood, BlockKind::Soil, BlockKind::Wood]
            .into_iter()
            .collect();

        assert_eq!(counts.get(BlockKind::Wood), 2);
        assert_eq!(counts.get(BlockKind::Soil), 1);
        assert_eq!(counts.get(BlockKind::Grass), 0);
        assert_eq!(counts.get(BlockKind::Stone), 0);
        assert_eq!(counts.iter().count(), BlockKind::ALL.len());
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn position_and_counts_round_trip_through_bincode() {
        assert_round_trip(&Position::new(-4, 9));
        assert_round_trip(&[BlockKind::Stone].into_iter().collect::<InventoryCounts>());
    }
}
