//! Echo components: retransmit what was last received.

use slotcast_engine::{Action, ContractViolation};
use slotcast_simulator::{Component, SlotView};
use slotcast_types::MessageId;

/// Retransmits in slot n+1 whatever it received in slot n; listens
/// otherwise.
pub struct EchoServer {
    name: String,
}

impl EchoServer {
    /// Create a server with the given component id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Component for EchoServer {
    fn id(&self) -> String {
        self.name.clone()
    }

    fn act(&mut self, view: &mut SlotView<'_>) -> Result<(), ContractViolation> {
        if let Some(&Action::Received { message, .. }) = view.previous_action() {
            return view.send(message, 0, true);
        }
        view.listen()
    }
}

/// Sends its message once in slot 0 and listens afterwards.
pub struct EchoClient {
    name: String,
    message: MessageId,
}

impl EchoClient {
    /// Create a client that sends `message` in slot 0.
    #[must_use]
    pub fn new(name: impl Into<String>, message: MessageId) -> Self {
        Self {
            name: name.into(),
            message,
        }
    }
}

impl Component for EchoClient {
    fn id(&self) -> String {
        self.name.clone()
    }

    fn act(&mut self, view: &mut SlotView<'_>) -> Result<(), ContractViolation> {
        if view.slot_number() == 0 {
            return view.send(self.message, 0, true);
        }
        view.listen()
    }
}
