use std::{cell::RefCell, fmt, rc::Rc};

use block_world_core::{Event, Topic};
use block_world_world::{ModelListener, WorldModel};

/// Severity of a logged message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MessageKind {
    Error,
    Info,
}

/// A user-facing message broadcast by the world model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Message {
    kind: MessageKind,
    text: String,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            MessageKind::Error => "error",
            MessageKind::Info => "info",
        };
        write!(f, "{prefix}: {}", self.text)
    }
}

/// Messages received since they were last taken.
#[derive(Debug, Default)]
pub(crate) struct MessageLog {
    pending: Vec<Message>,
}

impl MessageLog {
    /// Registers a single wildcard listener and returns the shared log.
    pub(crate) fn attach(self, model: &mut WorldModel) -> Rc<RefCell<Self>> {
        let log = Rc::new(RefCell::new(self));
        let listener: ModelListener = {
            let log = Rc::clone(&log);
            Rc::new(move |event: &Event, _: &WorldModel| log.borrow_mut().handle(event))
        };
        model.add_listener(Topic::All, listener);
        log
    }

    fn handle(&mut self, event: &Event) {
        let (kind, text) = match event {
            Event::Error { message } => (MessageKind::Error, message),
            Event::Info { message } => (MessageKind::Info, message),
            _ => return,
        };
        self.pending.push(Message {
            kind,
            text: text.clone(),
        });
    }

    /// Removes and returns every pending message in arrival order.
    pub(crate) fn take(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.pending)
    }
}
