//! Level start: obstacle placement and the initial fill.

use crate::board::Board;
use crate::core::{Cell, EngineError, LevelConfig, PieceKind, TileSource, TileType};

/// Build the starting board for `config`.
///
/// Obstacles are rolled cell by cell, row-major, skipping the spawn row,
/// until `obstacle_count` are placed. Every other cell then gets a tile
/// that does not complete a run with the two cells to its left or the two
/// above it, when such a tile exists.
pub(crate) fn generate_board<R: TileSource>(config: &LevelConfig, rng: &mut R) -> Result<Board, EngineError> {
    let mut board = Board::new(config.width, config.height)?;
    place_obstacles(&mut board, config, rng)?;

    for cell in board.cells().collect::<Vec<_>>() {
        if board.get(cell).is_some() {
            continue;
        }
        let candidates: Vec<TileType> = config
            .available_types
            .iter()
            .copied()
            .filter(|&tile| !completes_run(&board, cell, tile))
            .collect();
        let pool = if candidates.is_empty() { &config.available_types } else { &candidates };
        let tile = pool[rng.pick_index(pool.len())];
        board.spawn_tile(cell, tile)?;
    }
    Ok(board)
}

fn place_obstacles<R: TileSource>(board: &mut Board, config: &LevelConfig, rng: &mut R) -> Result<(), EngineError> {
    if config.obstacles.is_empty() || config.obstacle_count == 0 {
        return Ok(());
    }

    let mut placed = 0;
    for cell in board.cells().filter(|cell| cell.y > 0).collect::<Vec<_>>() {
        if placed >= config.obstacle_count {
            break;
        }
        if rng.chance(config.obstacle_spawn_chance) {
            let spec = config.obstacles[rng.pick_index(config.obstacles.len())];
            board.spawn(cell, PieceKind::obstacle(spec.kind, spec.hits_to_clear))?;
            placed += 1;
        }
    }
    Ok(())
}

/// Whether `tile` at `cell` would extend the two tiles left of it or the two
/// above it into a run of three.
fn completes_run(board: &Board, cell: Cell, tile: TileType) -> bool {
    let same = |dx: isize, dy: isize| {
        cell.offset(dx, dy, board.width(), board.height())
            .is_some_and(|other| board.tile_at(other) == Some(tile))
    };
    (same(-1, 0) && same(-2, 0)) || (same(0, -1) && same(0, -2))
}
