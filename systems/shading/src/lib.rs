#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Ambient occlusion for stacked block tiles.
//!
//! Each tile carries one shading layer per cardinal direction. A layer is
//! derived purely from how much taller the eight surrounding tiles are than
//! the tile itself. The surroundings are enumerated clockwise starting at the
//! north-west corner:
//!
//! ```text
//! 0 1 2
//! 7 . 3
//! 6 5 4
//! ```
//!
//! Every computation returns the complete shading of a tile, so a layer that
//! was active turns off again once the neighbour responsible for it shrinks.

use block_world_core::{Direction, Position};

/// Offsets of the eight surrounding tiles, clockwise from the north-west.
const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
];

/// Shading drawn along one edge of a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayerState {
    /// No shading.
    #[default]
    None,
    /// Gradient along the whole edge; the side neighbour is taller.
    FullSide,
    /// Gradient in the corner counter-clockwise from the edge.
    Corner,
}

/// Shading of a single tile, one layer per direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Shading {
    layers: [LayerState; 4],
}

impl Shading {
    /// Shading with every layer turned off.
    pub const FLAT: Self = Self {
        layers: [LayerState::None; 4],
    };

    /// Layer drawn along the edge facing `direction`.
    #[must_use]
    pub const fn layer(&self, direction: Direction) -> LayerState {
        self.layers[direction.index()]
    }

    /// Iterator over every direction and its layer in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, LayerState)> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |direction| (direction, self.layer(direction)))
    }

    /// Whether no layer is active.
    #[must_use]
    pub fn is_flat(&self) -> bool {
        *self == Self::FLAT
    }
}

/// The eight positions surrounding `centre`, clockwise from the north-west.
#[must_use]
pub fn neighbourhood(centre: Position) -> [Position; 8] {
    NEIGHBOUR_OFFSETS.map(|(dx, dy)| centre + Position::new(dx, dy))
}

/// Positions whose shading depends on the height at `changed`.
///
/// That is the position itself followed by its eight neighbours.
#[must_use]
pub fn affected_by(changed: Position) -> [Position; 9] {
    let around = neighbourhood(changed);
    std::array::from_fn(|index| match index {
        0 => changed,
        _ => around[index - 1],
    })
}

/// Height of each surrounding tile relative to the tile at `centre`.
///
/// `heights` resolves the stack height at a position. Positions without a
/// tile count as height zero, for the centre as well as its neighbours.
pub fn adjacency<H>(heights: H, centre: Position) -> [i32; 8]
where
    H: Fn(Position) -> Option<i32>,
{
    let height = |position| heights(position).unwrap_or(0);
    let own = height(centre);
    neighbourhood(centre).map(|neighbour| height(neighbour) - own)
}

/// Derives the shading of a tile from its adjacency vector.
///
/// A taller side neighbour always wins over a corner. The corner layer of a
/// direction is drawn when the corner counter-clockwise from it is taller and
/// the side on the far end of that corner is not; otherwise that side's own
/// full layer already covers the corner.
#[must_use]
pub fn shading_from_adjacency(adjacent: [i32; 8]) -> Shading {
    let mut shading = Shading::FLAT;
    for direction in Direction::ALL {
        let shift = 2 * direction.index();
        let side = adjacent[shift + 1];
        let corner = adjacent[shift];
        let far_side = adjacent[(shift + 7) % 8];

        shading.layers[direction.index()] = if side > 0 {
            LayerState::FullSide
        } else if corner > 0 && far_side <= 0 {
            LayerState::Corner
        } else {
            LayerState::None
        };
    }
    shading
}

/// Computes the complete shading of the tile at `centre`.
pub fn compute_shading<H>(heights: H, centre: Position) -> Shading
where
    H: Fn(Position) -> Option<i32>,
{
    shading_from_adjacency(adjacency(heights, centre))
}
