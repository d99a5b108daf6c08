use anyhow::{Context, Result};
use block_world_core::{BlockKind, Direction, Position};
use block_world_map::{Block, Tile, WorldMap, WorldMapBuilder};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::WorldConfig;

/// Tallest stack generated for the demo world.
const MAX_DEMO_HEIGHT: usize = 5;
/// Stacks at or below this height may end in a ground block.
const GROUND_TOP_LIMIT: usize = 3;
/// One neighbour pair in this many is linked in a single direction only.
const ONE_WAY_ODDS: u32 = 10;

/// Generates the demo world described by `config`.
///
/// The same configuration always yields the same world. The builder starts on
/// the centre tile carrying two wood blocks.
pub(crate) fn generate(config: &WorldConfig) -> Result<WorldMap> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let columns = i32::try_from(config.columns).context("world is too wide")?;
    let rows = i32::try_from(config.rows).context("world is too tall")?;
    let start = Position::new(columns / 2, rows / 2);

    let mut builder = WorldMapBuilder::new().inventory([Block::wood(), Block::wood()]);
    for y in 0..rows {
        for x in 0..columns {
            let tile = random_tile(&mut rng)
                .with_context(|| format!("failed to stack tile at ({x}, {y})"))?;
            builder = builder.tile(Position::new(x, y), tile);
        }
    }

    let mut one_way = 0_usize;
    for y in 0..rows {
        for x in 0..columns {
            let position = Position::new(x, y);
            if x + 1 < columns {
                builder = link(builder, &mut rng, position, Direction::East, &mut one_way);
            }
            if y + 1 < rows {
                builder = link(builder, &mut rng, position, Direction::South, &mut one_way);
            }
        }
    }

    log::debug!(
        "generated {}x{} demo world from seed {:#x} with {one_way} one-way exits",
        config.columns,
        config.rows,
        config.seed
    );
    builder.build(start).context("generated world is inconsistent")
}

fn link(
    builder: WorldMapBuilder,
    rng: &mut ChaCha8Rng,
    position: Position,
    direction: Direction,
    one_way: &mut usize,
) -> WorldMapBuilder {
    match rng.gen_range(0..ONE_WAY_ODDS) {
        0 => {
            *one_way += 1;
            builder.exit(position, direction)
        }
        1 => {
            *one_way += 1;
            builder.exit(position.step(direction), direction.opposite())
        }
        _ => builder.connect(position, direction),
    }
}

fn random_tile(rng: &mut ChaCha8Rng) -> Result<Tile> {
    const ANY_TOP: [BlockKind; 4] = [
        BlockKind::Grass,
        BlockKind::Soil,
        BlockKind::Wood,
        BlockKind::Stone,
    ];
    const RAISED_TOP: [BlockKind; 2] = [BlockKind::Wood, BlockKind::Stone];

    let height = rng.gen_range(1..=MAX_DEMO_HEIGHT);
    let choices: &[BlockKind] = if height <= GROUND_TOP_LIMIT {
        &ANY_TOP
    } else {
        &RAISED_TOP
    };
    let top = choices[rng.gen_range(0..choices.len())];

    let body = (0..height - 1).map(|level| {
        if level < GROUND_TOP_LIMIT {
            Block::soil()
        } else {
            Block::stone()
        }
    });
    Ok(Tile::with_blocks(body.chain([Block::new(top)]))?)
}
