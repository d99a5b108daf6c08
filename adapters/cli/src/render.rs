//! Plain-text rendering of the views.
//!
//! Every grid cell is three characters wide: the top block (or `@` for the
//! builder), the stack height, and a shading mark (`*` for a full edge, `'`
//! for a corner only).

use std::fmt::Write as _;

use block_world_core::{BlockKind, Direction};
use block_world_system_controls::ControlsView;
use block_world_system_grid_view::{GridView, TileSquare};
use block_world_system_inventory::InventoryView;
use block_world_system_shading::LayerState;

const EMPTY_CELL: &str = "   ";

/// Renders the visible window row by row.
pub(crate) fn render_grid(view: &GridView) -> String {
    let config = view.config();
    let mut cells = vec![
        vec![EMPTY_CELL.to_owned(); config.columns() as usize];
        config.rows() as usize
    ];

    for visible in view.visible() {
        let Some(square) = view.square(visible.position()) else {
            continue;
        };
        let marker = if visible.is_builder() {
            '@'
        } else {
            top_marker(square.top())
        };
        cells[visible.row() as usize][visible.column() as usize] =
            format!("{marker}{}{}", height_marker(square), shade_marker(square));
    }

    cells
        .into_iter()
        .map(|row| row.join(" ").trim_end().to_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the inventory panel on one line.
pub(crate) fn render_inventory(view: &InventoryView) -> String {
    let slots: Vec<String> = view
        .slots()
        .iter()
        .map(|slot| format!("{} {}", slot.kind(), slot.label()))
        .collect();
    format!("inventory: {}", slots.join("  "))
}

/// Renders the enabled controls on one line.
pub(crate) fn render_controls(view: &ControlsView) -> String {
    let mut line = String::from("moves:");
    for direction in Direction::ALL {
        if view.can_move(direction) {
            let _ = write!(line, " {direction}");
        }
    }
    if view.can_dig() {
        line.push_str(" | dig");
    }
    line
}

fn top_marker(top: Option<BlockKind>) -> char {
    match top {
        Some(BlockKind::Wood) => 'w',
        Some(BlockKind::Grass) => 'g',
        Some(BlockKind::Soil) => 's',
        Some(BlockKind::Stone) => '#',
        None => '_',
    }
}

fn height_marker(square: &TileSquare) -> char {
    u32::try_from(square.height())
        .ok()
        .and_then(|height| char::from_digit(height, 10))
        .unwrap_or('+')
}

fn shade_marker(square: &TileSquare) -> char {
    let layers: Vec<LayerState> = square.shading().iter().map(|(_, layer)| layer).collect();
    if layers.contains(&LayerState::FullSide) {
        '*'
    } else if layers.contains(&LayerState::Corner) {
        '\''
    } else {
        ' '
    }
}

#[cfg(test)]
mod tests {
    use block_world_core::Position;
    use block_world_map::{Block, Tile, WorldMapBuilder};
    use block_world_system_grid_view::GridConfig;
    use block_world_world::WorldModel;

    use super::*;

    #[test]
    fn grid_marks_builder_heights_and_shading() {
        let map = WorldMapBuilder::new()
            .tile(Position::ORIGIN, Tile::new())
            .tile(
                Position::new(1, 0),
                Tile::with_blocks([Block::soil(), Block::soil(), Block::grass(), Block::wood()])
                    .expect("stack"),
            )
            .connect(Position::ORIGIN, Direction::East)
            .build(Position::ORIGIN)
            .expect("valid map");
        let mut model = WorldModel::new();
        let grid = GridView::new(GridConfig::new(3, 1)).attach(&mut model);
        let controls = ControlsView::new().attach(&mut model);
        model.load_map(map);

        assert_eq!(render_grid(&grid.borrow()), "    @3* w4");
        assert_eq!(render_controls(&controls.borrow()), "moves: east | dig");
    }

    #[test]
    fn inventory_lists_carryable_kinds() {
        assert_eq!(render_inventory(&InventoryView::new()), "inventory: wood –  soil –");
    }
}
