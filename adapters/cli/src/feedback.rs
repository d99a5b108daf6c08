use block_world_core::{Command, Direction};
use block_world_map::{Block, BlockWorldError};
use block_world_world::{ActionError, WorldModel};

/// Phrases a rejected command for the player.
///
/// Must be called before anything else mutates the model, since the wording
/// depends on the state that caused the failure.
pub(crate) fn failure_message(model: &WorldModel, command: Command, error: &ActionError) -> String {
    let here = model.current_position();
    let top = model.top_block_at(here);

    match (command, error) {
        (Command::MoveBuilder { direction }, ActionError::Domain(BlockWorldError::NoExit)) => {
            if !model.has_exit(here, direction) {
                return no_way(direction);
            }
            let ours = model.height_at(here).unwrap_or(0);
            let theirs = model.height_at(here.step(direction)).unwrap_or(0);
            let relation = if theirs > ours { "high" } else { "low" };
            format!("It's too {relation}!")
        }
        (Command::Dig, ActionError::Domain(BlockWorldError::TooLow)) => {
            "You can't dig bedrock!".to_owned()
        }
        (Command::Dig, ActionError::Domain(BlockWorldError::InvalidBlock)) => match top {
            Some(kind) => format!("You can't dig {kind}!"),
            None => "You can't dig bedrock!".to_owned(),
        },
        (Command::MoveBlock { direction }, ActionError::Domain(_)) => match top {
            None => "You can't move bedrock!".to_owned(),
            Some(kind) if !Block::new(kind).is_moveable() => format!("You can't move {kind}!"),
            Some(_) if !model.has_exit(here, direction) => no_way(direction),
            Some(_) => "There's another block in the way!".to_owned(),
        },
        (Command::PlaceBlock { kind }, ActionError::NotFound { .. }) => {
            format!("You have no more {kind}!")
        }
        (Command::PlaceBlock { kind }, ActionError::Domain(BlockWorldError::TooHigh)) => {
            format!("You can't place {kind} up here!")
        }
        _ => error.to_string(),
    }
}

fn no_way(direction: Direction) -> String {
    format!("There's no way {direction}!")
}
