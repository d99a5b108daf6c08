#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Directional and dig controls enabled according to what the builder can do.

use std::{cell::RefCell, rc::Rc};

use block_world_core::{Direction, Event, EventKind, Topic};
use block_world_world::{ModelListener, WorldModel};

/// Enabled state of the builder controls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlsView {
    can_move: [bool; 4],
    can_dig: bool,
}

impl ControlsView {
    /// Creates a view with every control disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the view with the model and returns the shared handle.
    pub fn attach(self, model: &mut WorldModel) -> Rc<RefCell<Self>> {
        let view = Rc::new(RefCell::new(self));
        let listener: ModelListener = {
            let view = Rc::clone(&view);
            Rc::new(move |event: &Event, model: &WorldModel| {
                view.borrow_mut().handle(event, model);
            })
        };
        for kind in [
            EventKind::MapLoaded,
            EventKind::BuilderMoved,
            EventKind::BlocksChanged,
        ] {
            model.add_listener(Topic::Kind(kind), Rc::clone(&listener));
        }
        view
    }

    /// Applies a world event to the controls.
    ///
    /// Block changes only matter on the builder's tile or one of its four
    /// neighbours, since those are the only heights movement depends on.
    pub fn handle(&mut self, event: &Event, model: &WorldModel) {
        let relevant = match event {
            Event::MapLoaded { .. } | Event::BuilderMoved { .. } => true,
            Event::BlocksChanged { position } => {
                let current = model.current_position();
                *position == current
                    || Direction::ALL
                        .into_iter()
                        .any(|direction| current.step(direction) == *position)
            }
            _ => false,
        };
        if relevant {
            self.refresh(model);
        }
    }

    /// Whether the control for the provided direction is enabled.
    #[must_use]
    pub const fn can_move(&self, direction: Direction) -> bool {
        self.can_move[direction.index()]
    }

    /// Whether the dig control is enabled.
    #[must_use]
    pub const fn can_dig(&self) -> bool {
        self.can_dig
    }

    fn refresh(&mut self, model: &WorldModel) {
        self.can_move = Direction::ALL.map(|direction| model.can_move(direction));
        self.can_dig = model.can_dig();
        log::trace!("controls refreshed: {self:?}");
    }
}
