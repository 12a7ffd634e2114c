//! Then steps for board move BDD scenarios.

use super::world::{BoardWorld, run_async};
use corkboard::board::{domain::Lane, services::BoardError};
use rstest_bdd_macros::then;

#[then(r#"the "{lane}" lane lists exactly "{titles}""#)]
fn lane_lists_exactly(
    world: &mut BoardWorld,
    lane: String,
    titles: String,
) -> Result<(), eyre::Report> {
    let target = Lane::try_from(lane.as_str())
        .map_err(|err| eyre::eyre!("invalid lane in scenario: {err}"))?;
    let expected: Vec<&str> = titles.split(", ").collect();

    let listed = run_async(world.board.list_lane(&world.owner, target))
        .map_err(|err| eyre::eyre!("list lane in scenario: {err}"))?;
    let actual: Vec<String> = listed
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect();

    if actual != expected {
        return Err(eyre::eyre!(
            "expected lane {} to list {expected:?}, found {actual:?}",
            target.as_str()
        ));
    }
    Ok(())
}

#[then("the moved task has rank {rank:i64}")]
fn moved_task_has_rank(world: &mut BoardWorld, rank: i64) -> Result<(), eyre::Report> {
    let result = world
        .last_move_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))?;

    let Ok(task) = result else {
        return Err(eyre::eyre!("expected a successful move, got {result:?}"));
    };
    if task.rank() != rank {
        return Err(eyre::eyre!("expected rank {rank}, found {}", task.rank()));
    }
    Ok(())
}

#[then("the move fails with a forbidden error")]
fn move_fails_forbidden(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_move_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))?;

    if !matches!(result, Err(BoardError::Forbidden(_))) {
        return Err(eyre::eyre!("expected Forbidden error, got {result:?}"));
    }
    Ok(())
}
