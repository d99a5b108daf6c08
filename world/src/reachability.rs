//! Breadth-first reachability over the tile exit graph.

use std::collections::{HashMap, HashSet, VecDeque};

use block_world_core::{Direction, Position, TileGraph};

/// Collects every position reachable from `start` by following exits.
///
/// Positions are enqueued once per incoming exit and de-duplicated when they
/// are dequeued, so cycles terminate through the visited set rather than a
/// path-length bound. Only forward exits are followed. A position whose tile
/// cannot be resolved is skipped; that only happens when an exit points at
/// an empty position.
pub fn compute_reachable<G>(graph: &G, start: Position) -> HashMap<Position, G::Tile>
where
    G: TileGraph + ?Sized,
{
    let mut reachable = HashMap::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(position) = queue.pop_front() {
        if !visited.insert(position) {
            continue;
        }

        let Some(tile) = graph.tile_at(position) else {
            log::warn!("exit leads to {position} but no tile is placed there");
            continue;
        };
        let _ = reachable.insert(position, tile);

        for direction in Direction::ALL {
            if graph.has_exit(tile, direction) {
                queue.push_back(position.step(direction));
            }
        }
    }

    reachable
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    /// Grid where every tile is identified by its own position.
    struct Corridors {
        exits: HashMap<Position, Vec<Direction>>,
    }

    impl TileGraph for Corridors {
        type Tile = Position;

        fn tile_at(&self, position: Position) -> Option<Position> {
            self.exits.contains_key(&position).then_some(position)
        }

        fn has_exit(&self, tile: Position, direction: Direction) -> bool {
            self.exits
                .get(&tile)
                .is_some_and(|exits| exits.contains(&direction))
        }
    }

    #[test]
    fn isolated_start_reaches_only_itself() {
        let graph = Corridors {
            exits: HashMap::from([(Position::ORIGIN, Vec::new())]),
        };

        let reachable = compute_reachable(&graph, Position::ORIGIN);

        assert_eq!(reachable.len(), 1);
        assert_eq!(reachable.get(&Position::ORIGIN), Some(&Position::ORIGIN));
    }

    #[test]
    fn dangling_exit_is_skipped() {
        let graph = Corridors {
            exits: HashMap::from([(Position::ORIGIN, vec![Direction::North])]),
        };

        let reachable = compute_reachable(&graph, Position::ORIGIN);

        assert_eq!(reachable.len(), 1, "the empty position behind the exit is ignored");
    }
}
