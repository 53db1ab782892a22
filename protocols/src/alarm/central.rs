//! The central unit: sink of all alarms.

use std::sync::Arc;

use slotcast_engine::{Action, ContractViolation};
use slotcast_simulator::{SlotView, StateProtocol};

use super::message::{AlarmBook, MessageKind};
use super::AlarmState;

/// Listens for alarms addressed to it and acknowledges them in the
/// following slot.
pub struct CentralUnit {
    book: Arc<AlarmBook>,
}

impl CentralUnit {
    /// Create the central unit.
    #[must_use]
    pub fn new(book: Arc<AlarmBook>) -> Self {
        Self { book }
    }
}

impl StateProtocol for CentralUnit {
    type State = AlarmState;

    fn id(&self) -> String {
        "CentralUnit".to_string()
    }

    fn act_with_state(
        &mut self,
        view: &mut SlotView<'_>,
        state: AlarmState,
    ) -> Result<AlarmState, ContractViolation> {
        match state {
            AlarmState::InitialCu => {
                // Alarms addressed to supervisors arrive while we
                // listen.
                view.listen()?;
                Ok(AlarmState::WaitingCu)
            }

            AlarmState::WaitingCu => {
                if let Some(&Action::Received { message, .. }) = view.previous_action() {
                    if let Some(envelope) = self.book.envelope(message) {
                        if envelope.kind == MessageKind::Alarm && envelope.to == view.component() {
                            // An alarm for us: acknowledge right at the
                            // start of the slot, without carrier
                            // sensing.
                            let reply = self.book.message(
                                MessageKind::Ack,
                                view.component(),
                                envelope.from,
                                envelope.data,
                            );
                            view.send(reply, 0, false)?;
                            view.log(&format!("Alarm: {}", self.book.name_of(envelope.data)));
                            return Ok(AlarmState::InitialCu);
                        }
                    }
                }

                // Nothing for us; wait for the next alarm.
                view.idle()?;
                Ok(AlarmState::InitialCu)
            }

            // Repeater and sensor states never occur on the central
            // unit. Choosing no intention provokes the driver's
            // missing-intention check.
            _ => Ok(state),
        }
    }

    fn to_xml(&self) -> Vec<String> {
        vec!["<layer>0</layer>".to_string()]
    }
}
