use block_world_core::{BlockKind, Direction, Event, Position};
use block_world_map::{Block, Tile, WorldMap, WorldMapBuilder};
use block_world_system_controls::ControlsView;
use block_world_world::WorldModel;

const START: Position = Position::ORIGIN;
const EAST: Position = Position::new(1, 0);
const FAR_EAST: Position = Position::new(2, 0);

/// Three tiles in a row, the builder standing on the west end with wood.
fn corridor() -> WorldMap {
    WorldMapBuilder::new()
        .tile(START, Tile::new())
        .tile(EAST, Tile::new())
        .tile(FAR_EAST, Tile::new())
        .connect(START, Direction::East)
        .connect(EAST, Direction::East)
        .inventory([Block::wood()])
        .build(START)
        .expect("valid map")
}

#[test]
fn controls_reflect_the_builder_surroundings() {
    let mut model = WorldModel::new();
    let view = ControlsView::new().attach(&mut model);
    assert!(!view.borrow().can_dig(), "nothing is enabled before a map loads");

    model.load_map(corridor());

    let controls = *view.borrow();
    assert!(controls.can_move(Direction::East));
    assert!(!controls.can_move(Direction::West));
    assert!(!controls.can_move(Direction::North));
    assert!(controls.can_dig());
}

#[test]
fn digging_beside_the_builder_updates_movement() {
    let mut model = WorldModel::new();
    let view = ControlsView::new().attach(&mut model);
    model.load_map(corridor());

    model.move_builder(Direction::East).expect("level ground");
    model.place_block(BlockKind::Wood).expect("wood fits");
    assert!(view.borrow().can_move(Direction::West));

    model.move_builder(Direction::West).expect("one block down");
    model.dig().expect("grass");
    assert!(
        !view.borrow().can_move(Direction::East),
        "east is now two blocks higher",
    );
}

#[test]
fn distant_block_changes_are_ignored() {
    let mut model = WorldModel::new();
    model.load_map(corridor());
    let mut controls = ControlsView::new();

    controls.handle(&Event::BlocksChanged { position: FAR_EAST }, &model);
    assert_eq!(controls, ControlsView::new(), "far tiles cannot affect controls");

    controls.handle(&Event::BlocksChanged { position: EAST }, &model);
    assert!(controls.can_move(Direction::East));
}
