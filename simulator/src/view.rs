//! The per-component, per-slot view of the network.

use tracing::info;

use slotcast_engine::{Action, ContractViolation, Intention, IntentionAssignment, NetworkSetup};
use slotcast_types::{ComponentId, MessageId, SlotNumber, Tic};

/// What one component sees of one slot: the slot number, its own
/// previous action, and the three intention setters.
///
/// Exactly one of [`idle`](SlotView::idle), [`listen`](SlotView::listen),
/// or [`send`](SlotView::send) must be invoked before the callback
/// returns; a second invocation is a contract violation.
pub struct SlotView<'a> {
    setup: &'a NetworkSetup,
    slot: SlotNumber,
    component: ComponentId,
    previous: Option<&'a Action>,
    intent: &'a mut IntentionAssignment,
    acted: bool,
}

impl<'a> SlotView<'a> {
    pub(crate) fn new(
        setup: &'a NetworkSetup,
        slot: SlotNumber,
        component: ComponentId,
        previous: Option<&'a Action>,
        intent: &'a mut IntentionAssignment,
    ) -> Self {
        Self {
            setup,
            slot,
            component,
            previous,
            intent,
            acted: false,
        }
    }

    /// The number of the slot this view belongs to.
    #[must_use]
    pub fn slot_number(&self) -> SlotNumber {
        self.slot
    }

    /// The handle of the component this view is centered on.
    #[must_use]
    pub fn component(&self) -> ComponentId {
        self.component
    }

    /// The action this component observed in the previous slot, or
    /// `None` in slot 0.
    #[must_use]
    pub fn previous_action(&self) -> Option<&Action> {
        self.previous
    }

    /// Whether an intention setter was already invoked this slot.
    #[must_use]
    pub fn has_acted(&self) -> bool {
        self.acted
    }

    /// Idle in this slot.
    ///
    /// # Errors
    ///
    /// `AlreadyActed` on a second intention.
    pub fn idle(&mut self) -> Result<(), ContractViolation> {
        self.commit(Intention::Idle)
    }

    /// Listen to the medium in this slot.
    ///
    /// # Errors
    ///
    /// `AlreadyActed` on a second intention.
    pub fn listen(&mut self) -> Result<(), ContractViolation> {
        self.commit(Intention::Listen)
    }

    /// Attempt to send `message` starting at `tic`. With
    /// `carrier_sense`, the transmission is cancelled if a reachable
    /// neighbor started transmitting at a strictly earlier tic.
    ///
    /// # Errors
    ///
    /// `AlreadyActed` on a second intention, `TicOutOfRange` or
    /// `UnknownMessage` for invalid payloads.
    pub fn send(
        &mut self,
        message: MessageId,
        tic: Tic,
        carrier_sense: bool,
    ) -> Result<(), ContractViolation> {
        self.commit(Intention::Send {
            tic,
            message,
            carrier_sense,
        })
    }

    /// Add a line to the protocol log channel on stderr. Not part of
    /// the primary output.
    pub fn log(&self, text: &str) {
        info!(target: "protocol", "Log: {text}");
    }

    fn commit(&mut self, intention: Intention) -> Result<(), ContractViolation> {
        if self.acted {
            return Err(ContractViolation::AlreadyActed(self.component));
        }
        self.intent.set(self.setup, self.component, intention)?;
        self.acted = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotcast_types::Message;

    struct Plain;

    impl Message for Plain {
        fn render(&self) -> String {
            "m".to_string()
        }
    }

    fn one_component_setup() -> (NetworkSetup, ComponentId, MessageId) {
        let mut setup = NetworkSetup::new(5).unwrap();
        let c = setup.register_component("c").unwrap();
        let m = setup.register_message(Box::new(Plain));
        (setup, c, m)
    }

    #[test]
    fn test_single_intention_enforced() {
        let (setup, c, _) = one_component_setup();
        let mut intent = IntentionAssignment::new(&setup);
        let mut view = SlotView::new(&setup, 0, c, None, &mut intent);
        view.idle().unwrap();
        assert!(view.has_acted());
        assert_eq!(
            view.listen().err(),
            Some(ContractViolation::AlreadyActed(c))
        );
    }

    #[test]
    fn test_send_validates_tic() {
        let (setup, c, m) = one_component_setup();
        let mut intent = IntentionAssignment::new(&setup);
        let mut view = SlotView::new(&setup, 0, c, None, &mut intent);
        assert_eq!(
            view.send(m, 5, true).err(),
            Some(ContractViolation::TicOutOfRange {
                tic: 5,
                tics_per_slot: 5
            })
        );
        // The failed send does not count as acting.
        assert!(!view.has_acted());
        view.send(m, 4, false).unwrap();
        assert_eq!(
            intent.get(c).unwrap(),
            &Intention::Send {
                tic: 4,
                message: m,
                carrier_sense: false
            }
        );
    }

    #[test]
    fn test_previous_action_exposed() {
        let (setup, c, m) = one_component_setup();
        let mut intent = IntentionAssignment::new(&setup);
        let previous = Action::Received { tic: 2, message: m };
        let view = SlotView::new(&setup, 3, c, Some(&previous), &mut intent);
        assert_eq!(view.slot_number(), 3);
        assert_eq!(view.previous_action(), Some(&previous));
        assert_eq!(view.component(), c);
    }
}
