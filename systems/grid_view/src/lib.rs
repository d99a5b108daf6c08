#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Grid view that mirrors the world model as a window of tile squares.
//!
//! The view keeps its own square per reachable position together with a
//! height cache used for shading. It is patched incrementally from world
//! events: only the tile named by a [`Event::BlocksChanged`] and its eight
//! neighbours are recomputed.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use block_world_core::{BlockKind, Direction, Event, EventKind, Position, Topic};
use block_world_system_shading::{affected_by, compute_shading, Shading};
use block_world_world::{ModelListener, WorldModel};

/// Size of the visible window in tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridConfig {
    columns: u32,
    rows: u32,
}

impl GridConfig {
    /// Largest number of columns or rows a window can have.
    pub const MAX_SIDE: u32 = 255;

    /// Creates a window of the provided size. Each side is clamped to
    /// `1..=MAX_SIDE`.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns: clamp_side(columns),
            rows: clamp_side(rows),
        }
    }

    /// Number of visible columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of visible rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }
}

const fn clamp_side(side: u32) -> u32 {
    if side == 0 {
        1
    } else if side > GridConfig::MAX_SIDE {
        GridConfig::MAX_SIDE
    } else {
        side
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(9, 9)
    }
}

/// Everything the view knows about a single tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileSquare {
    height: usize,
    top: Option<BlockKind>,
    exits: [bool; 4],
    shading: Shading,
}

impl TileSquare {
    /// Number of blocks stacked on the tile.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Kind of the top block, if the tile has any.
    #[must_use]
    pub const fn top(&self) -> Option<BlockKind> {
        self.top
    }

    /// Whether the tile has an exit in the provided direction.
    #[must_use]
    pub const fn has_exit(&self, direction: Direction) -> bool {
        self.exits[direction.index()]
    }

    /// Ambient occlusion drawn over the tile.
    #[must_use]
    pub const fn shading(&self) -> Shading {
        self.shading
    }
}

/// A tile square that falls inside the visible window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleSquare {
    position: Position,
    column: u32,
    row: u32,
    builder: bool,
}

impl VisibleSquare {
    /// World position of the square.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Column inside the window, counted from the west edge.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Row inside the window, counted from the north edge.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Whether the builder stands on this square.
    #[must_use]
    pub const fn is_builder(&self) -> bool {
        self.builder
    }
}

/// Scrolling grid of tile squares centred on the builder.
#[derive(Debug, Default)]
pub struct GridView {
    config: GridConfig,
    squares: HashMap<Position, TileSquare>,
    heights: HashMap<Position, i32>,
    centre: Position,
    visible: Vec<VisibleSquare>,
}

impl GridView {
    /// Creates an empty view with the provided window size.
    #[must_use]
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
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
        for kind in [
            EventKind::MapLoaded,
            EventKind::BuilderMoved,
            EventKind::BlocksChanged,
        ] {
            model.add_listener(Topic::Kind(kind), Rc::clone(&listener));
        }
        view
    }

    /// Applies a world event to the view.
    pub fn handle(&mut self, event: &Event, model: &WorldModel) {
        match event {
            Event::MapLoaded { start, tiles } => {
                self.squares.clear();
                self.heights.clear();
                self.centre = *start;
                for &position in tiles.keys() {
                    self.refresh_square(position, model);
                }
                let positions: Vec<Position> = self.squares.keys().copied().collect();
                for position in positions {
                    self.refresh_shading(position);
                }
                self.recompute_window(model);
                log::trace!("grid rebuilt with {} squares", self.squares.len());
            }
            Event::BuilderMoved { .. } => {
                self.centre = model.current_position();
                self.recompute_window(model);
                log::trace!("grid recentred on {}", self.centre);
            }
            Event::BlocksChanged { position } => {
                self.refresh_square(*position, model);
                for affected in affected_by(*position) {
                    self.refresh_shading(affected);
                }
                log::trace!("grid refreshed around {position}");
            }
            _ => {}
        }
    }

    /// Square at the provided position, if the tile is reachable.
    #[must_use]
    pub fn square(&self, position: Position) -> Option<&TileSquare> {
        self.squares.get(&position)
    }

    /// Squares inside the current window, row by row from the north-west.
    #[must_use]
    pub fn visible(&self) -> &[VisibleSquare] {
        &self.visible
    }

    /// Position the window is centred on.
    #[must_use]
    pub const fn centre(&self) -> Position {
        self.centre
    }

    /// Window size.
    #[must_use]
    pub const fn config(&self) -> GridConfig {
        self.config
    }

    /// Number of squares known to the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    /// Whether the view holds no squares.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    /// World position shown at the north-west corner of the window.
    #[must_use]
    pub fn origin(&self) -> Position {
        let half_columns = i32::try_from(self.config.columns / 2).unwrap_or(i32::MAX);
        let half_rows = i32::try_from(self.config.rows / 2).unwrap_or(i32::MAX);
        Position::new(
            self.centre.x().saturating_sub(half_columns),
            self.centre.y().saturating_sub(half_rows),
        )
    }

    fn refresh_square(&mut self, position: Position, model: &WorldModel) {
        let Some(height) = model.height_at(position) else {
            let _ = self.squares.remove(&position);
            let _ = self.heights.remove(&position);
            return;
        };

        let square = self.squares.entry(position).or_default();
        square.height = height;
        square.top = model.top_block_at(position);
        square.exits = Direction::ALL.map(|direction| model.has_exit(position, direction));
        let _ = self
            .heights
            .insert(position, i32::try_from(height).unwrap_or(i32::MAX));
    }

    fn refresh_shading(&mut self, position: Position) {
        let heights = &self.heights;
        let Some(square) = self.squares.get_mut(&position) else {
            return;
        };
        square.shading = compute_shading(|neighbour| heights.get(&neighbour).copied(), position);
    }

    fn recompute_window(&mut self, model: &WorldModel) {
        let origin = self.origin();
        let builder = model.current_position();
        self.visible.clear();

        for row in 0..self.config.rows {
            for column in 0..self.config.columns {
                let Some(position) = window_position(origin, column, row) else {
                    continue;
                };
                if !self.squares.contains_key(&position) {
                    continue;
                }
                self.visible.push(VisibleSquare {
                    position,
                    column,
                    row,
                    builder: position == builder,
                });
            }
        }
    }
}

/// World position of a window cell, or `None` past the edge of the plane.
fn window_position(origin: Position, column: u32, row: u32) -> Option<Position> {
    let x = origin.x().checked_add(i32::try_from(column).ok()?)?;
    let y = origin.y().checked_add(i32::try_from(row).ok()?)?;
    Some(Position::new(x, y))
}
