use block_world_core::{BlockKind, Direction, Position, TileGraph};
use block_world_map::{
    Block, BlockWorldError, MapError, Tile, WorldMap, WorldMapBuilder, DEFAULT_BUILDER_NAME,
};

const ORIGIN: Position = Position::ORIGIN;
const EAST: Position = Position::new(1, 0);

fn stack(blocks: &[Block]) -> Tile {
    Tile::with_blocks(blocks.iter().copied()).expect("valid stack")
}

fn two_tiles(origin: Tile, east: Tile) -> WorldMap {
    WorldMapBuilder::new()
        .tile(ORIGIN, origin)
        .tile(EAST, east)
        .connect(ORIGIN, Direction::East)
        .build(ORIGIN)
        .expect("valid map")
}

fn current_height(map: &WorldMap) -> usize {
    map.tile(map.builder().current_tile())
        .expect("builder tile")
        .height()
}

#[test]
fn builder_moves_between_tiles_of_similar_height() {
    let mut map = two_tiles(Tile::new(), stack(&[Block::soil(), Block::soil()]));

    assert_eq!(map.move_builder(Direction::East), Ok(()));
    assert_eq!(Some(map.builder().current_tile()), map.tile_at(EAST));
}

#[test]
fn builder_cannot_climb_more_than_one_block() {
    let mut map = two_tiles(Tile::empty(), stack(&[Block::soil(), Block::soil()]));
    let before = map.builder().current_tile();

    assert_eq!(map.move_builder(Direction::East), Err(BlockWorldError::NoExit));
    assert_eq!(map.builder().current_tile(), before);
}

#[test]
fn builder_cannot_walk_through_walls() {
    let mut map = two_tiles(Tile::new(), Tile::new());

    assert_eq!(map.move_builder(Direction::North), Err(BlockWorldError::NoExit));
}

#[test]
fn digging_keeps_carryable_blocks_only() {
    let mut map = two_tiles(stack(&[Block::soil(), Block::grass()]), Tile::new());

    assert_eq!(map.dig_on_current_tile(), Ok(()));
    assert!(map.builder().inventory().is_empty(), "grass is not carried");

    assert_eq!(map.dig_on_current_tile(), Ok(()));
    let kinds: Vec<BlockKind> = map.builder().inventory().iter().map(Block::kind).collect();
    assert_eq!(kinds, vec![BlockKind::Soil]);

    assert_eq!(map.dig_on_current_tile(), Err(BlockWorldError::TooLow));
}

#[test]
fn dropping_respects_ground_limit() {
    let mut map = WorldMapBuilder::new()
        .tile(ORIGIN, Tile::new())
        .inventory([Block::soil(), Block::wood()])
        .build(ORIGIN)
        .expect("valid map");

    assert_eq!(map.drop_from_inventory(0), Err(BlockWorldError::TooHigh));
    assert_eq!(map.builder().inventory().len(), 2, "failed drop keeps the block");

    assert_eq!(map.drop_from_inventory(1), Ok(()));
    assert_eq!(current_height(&map), 4);
    assert_eq!(map.drop_from_inventory(5), Err(BlockWorldError::InvalidBlock));
}

#[test]
fn blocks_only_move_downhill() {
    let mut map = two_tiles(stack(&[Block::soil(), Block::wood()]), stack(&[Block::soil()]));
    let origin = map.tile_at(ORIGIN).expect("origin tile");
    let east = map.tile_at(EAST).expect("east tile");

    assert_eq!(map.move_block(origin, Direction::North), Err(BlockWorldError::NoExit));
    assert_eq!(map.move_block(origin, Direction::East), Ok(()));
    assert_eq!(map.tile(east).expect("east").top_block(), Ok(Block::wood()));
    assert_eq!(
        map.move_block(origin, Direction::East),
        Err(BlockWorldError::TooHigh),
        "equal heights must reject the move",
    );
}

#[test]
fn ground_blocks_cannot_be_pushed() {
    let mut map = two_tiles(Tile::new(), Tile::empty());
    let origin = map.tile_at(ORIGIN).expect("origin tile");

    assert_eq!(
        map.move_block(origin, Direction::East),
        Err(BlockWorldError::InvalidBlock)
    );
}

#[test]
fn one_way_exits_are_not_reciprocal() {
    let map = WorldMapBuilder::new()
        .tile(ORIGIN, Tile::new())
        .tile(EAST, Tile::new())
        .exit(ORIGIN, Direction::East)
        .build(ORIGIN)
        .expect("valid map");

    let origin = map.tile_at(ORIGIN).expect("origin");
    let east = map.tile_at(EAST).expect("east");
    assert!(map.has_exit(origin, Direction::East));
    assert!(!map.has_exit(east, Direction::West));
}

#[test]
fn build_rejects_inconsistent_layouts() {
    let missing = WorldMapBuilder::new()
        .tile(ORIGIN, Tile::new())
        .exit(ORIGIN, Direction::South)
        .build(ORIGIN);
    assert_eq!(missing.err(), Some(MapError::MissingTile(Position::new(0, 1))));

    let duplicate = WorldMapBuilder::new()
        .tile(ORIGIN, Tile::new())
        .tile(ORIGIN, Tile::empty())
        .build(ORIGIN);
    assert_eq!(duplicate.err(), Some(MapError::DuplicateTile(ORIGIN)));

    let no_start = WorldMapBuilder::new().tile(ORIGIN, Tile::new()).build(EAST);
    assert_eq!(no_start.err(), Some(MapError::MissingTile(EAST)));
}

#[test]
fn builders_are_named_steve_unless_told_otherwise() {
    let unnamed = two_tiles(Tile::new(), Tile::new());
    assert_eq!(unnamed.builder().name(), DEFAULT_BUILDER_NAME);
    assert_eq!(DEFAULT_BUILDER_NAME, "Steve");

    let named = WorldMapBuilder::new()
        .tile(ORIGIN, Tile::new())
        .builder_name("Alex")
        .build(ORIGIN)
        .expect("valid map");
    assert_eq!(named.builder().name(), "Alex");
}
