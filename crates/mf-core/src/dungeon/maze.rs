//! Growing-tree corridors
//!
//! Every odd cell left solid after room placement seeds a maze that grows
//! through the wall two tiles at a time, so corridors stay one tile wide with
//! wall between parallel runs.

use tracing::{debug, trace};

use super::generation::GenContext;
use super::stage::Stage;
use super::tile::{Direction, Pos, TileKind};
use crate::error::BuildError;

/// Fill every open odd cell of the stage with maze corridors
pub fn grow_mazes(ctx: &mut GenContext) -> Result<(), BuildError> {
    let regions_before = ctx.stage.region_count();

    for y in (1..ctx.stage.height()).step_by(2) {
        for x in (1..ctx.stage.width()).step_by(2) {
            let start = Pos::new(x, y);
            if ctx.stage.tile(start).kind == TileKind::Floor {
                continue;
            }
            grow_maze(ctx, start)?;
        }
    }

    debug!(
        mazes = ctx.stage.region_count() - regions_before,
        "grew mazes"
    );
    Ok(())
}

/// Grow a single maze from `start` as its own region
///
/// Nothing is carved when `start` already touches floor in any of the eight
/// directions.
pub fn grow_maze(ctx: &mut GenContext, start: Pos) -> Result<(), BuildError> {
    let touches_floor = ctx
        .stage
        .tile(start)
        .neighbors
        .iter()
        .any(|(_, pos)| ctx.stage.tile(pos).kind == TileKind::Floor);
    if touches_floor {
        return Ok(());
    }

    let region = ctx.stage.start_region();
    ctx.stage.set(start.x, start.y, TileKind::Floor)?;

    let mut cells = vec![start];
    let mut last_dir: Option<Direction> = None;
    let mut steps = 0;

    while let Some(&cell) = cells.last() {
        if steps >= ctx.config.max_maze_steps {
            trace!(region, steps, "maze step cap reached");
            break;
        }
        steps += 1;

        let unmade: Vec<Direction> = Direction::CARDINAL
            .into_iter()
            .filter(|&dir| can_carve(&ctx.stage, cell, dir))
            .collect();

        if unmade.is_empty() {
            // Dead end; back up
            cells.pop();
            last_dir = None;
            continue;
        }

        let dir = match last_dir {
            Some(last)
                if unmade.contains(&last)
                    && ctx.rng.integer(1, 100) > ctx.config.winding_percent =>
            {
                last
            }
            _ => unmade[ctx.rng.index(unmade.len())],
        };

        let next = carve_towards(&mut ctx.stage, cell, dir)?;
        cells.push(next);
        last_dir = Some(dir);
    }

    trace!(region, steps, "maze finished");
    Ok(())
}

/// Check if a corridor can open from `cell` into the cell two steps away
///
/// The tile three steps away must be wall on the stage, which keeps corridors
/// off the outer border. The destination itself must still be wall.
pub fn can_carve(stage: &Stage, cell: Pos, dir: Direction) -> bool {
    let Some(beyond) = stage.offset(cell, dir, 3) else {
        return false;
    };
    if stage.tile(beyond).kind != TileKind::Wall {
        return false;
    }
    stage
        .offset(cell, dir, 2)
        .is_some_and(|dest| stage.tile(dest).kind == TileKind::Wall)
}

/// Carve the wall tile and the cell behind it, returning the new cell
fn carve_towards(stage: &mut Stage, cell: Pos, dir: Direction) -> Result<Pos, BuildError> {
    let mut carved = cell;
    for distance in 1..=2 {
        carved = stage
            .offset(cell, dir, distance)
            .ok_or(BuildError::TileUnreachable {
                x: cell.x,
                y: cell.y,
            })?;
        stage.set(carved.x, carved.y, TileKind::Floor)?;
    }
    Ok(carved)
}
