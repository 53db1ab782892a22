//! Sensors: raise alarms towards the last repeater.

use std::sync::Arc;

use slotcast_engine::{Action, ContractViolation};
use slotcast_simulator::{SlotView, StateProtocol};

use super::message::{AlarmBook, MessageKind};
use super::{record_failure, repeater_id, AlarmState, NUM_REPEATERS};

/// Raises one alarm, retries until it is acknowledged, and then stays
/// silent.
pub struct Sensor {
    internal_id: usize,
    num: usize,
    priority: usize,
    collision: usize,
    book: Arc<AlarmBook>,
}

impl Sensor {
    /// Create sensor `num` (0-based) with its internal id (steers the
    /// priority backoff).
    #[must_use]
    pub fn new(internal_id: usize, num: usize, book: Arc<AlarmBook>) -> Self {
        Self {
            internal_id,
            num,
            priority: 8,
            collision: 0,
            book,
        }
    }
}

impl StateProtocol for Sensor {
    type State = AlarmState;

    fn id(&self) -> String {
        format!("Sensor{}", self.num)
    }

    fn act_with_state(
        &mut self,
        view: &mut SlotView<'_>,
        state: AlarmState,
    ) -> Result<AlarmState, ContractViolation> {
        match state {
            AlarmState::InitialSen => {
                // The priority is the base tic of the attempt: carrier
                // sensing only notices transmissions from earlier tics.
                let alarm = self.book.message(
                    MessageKind::Alarm,
                    view.component(),
                    repeater_id(NUM_REPEATERS),
                    view.component(),
                );
                view.send(alarm, self.priority, true)?;
                Ok(AlarmState::AttemptedSen)
            }

            AlarmState::AttemptedSen => {
                if matches!(view.previous_action(), Some(Action::Cancelled { .. })) {
                    // The medium was busy; try again next slot.
                    view.idle()?;
                    return Ok(AlarmState::InitialSen);
                }
                // Acknowledgements arrive in the slot after the alarm.
                view.listen()?;
                Ok(AlarmState::WaitForAckSen)
            }

            AlarmState::WaitForAckSen => {
                if let Some(&Action::Received { message, .. }) = view.previous_action() {
                    if let Some(envelope) = self.book.envelope(message) {
                        if envelope.kind == MessageKind::Ack && envelope.to == view.component() {
                            // Our alarm was acknowledged; we are done.
                            view.idle()?;
                            return Ok(AlarmState::DoneSen);
                        }
                    }
                }

                // No acknowledgement: record the failure and raise the
                // alarm again immediately.
                record_failure(self.internal_id, &mut self.priority, &mut self.collision);
                self.act_with_state(view, AlarmState::InitialSen)
            }

            AlarmState::DoneSen => {
                // The alarm might still be travelling towards the
                // central unit, but this sensor's part is over.
                view.idle()?;
                Ok(AlarmState::DoneSen)
            }

            // Central-unit and repeater states never occur on a
            // sensor. Choosing no intention provokes the driver's
            // missing-intention check.
            _ => Ok(state),
        }
    }

    fn to_xml(&self) -> Vec<String> {
        vec![
            format!("<internalId>{}</internalId>", self.internal_id),
            "<layer>6</layer>".to_string(),
        ]
    }
}
