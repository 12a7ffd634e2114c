//! Given steps for board move BDD scenarios.

use super::world::{BoardWorld, run_async};
use corkboard::board::services::CreateTaskRequest;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a board owned by "{name}""#)]
fn board_owner(world: &mut BoardWorld, name: String) {
    world.owner_name = Some(name);
}

#[given(r#"the board has a pending task titled "{title}""#)]
fn pending_task(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    let created = run_async(
        world
            .board
            .create_task(&world.owner, CreateTaskRequest::new(title.clone())),
    )
    .wrap_err("create pending task in scenario setup")?;
    world.tasks_by_title.insert(title, created.id());
    Ok(())
}
