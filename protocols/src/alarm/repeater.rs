//! Repeaters: relay alarms hop by hop towards the central unit.

use std::sync::Arc;

use slotcast_engine::{Action, ContractViolation};
use slotcast_simulator::{SlotView, StateProtocol};
use slotcast_types::ComponentId;

use super::message::{AlarmBook, MessageKind};
use super::{central_id, record_failure, repeater_id, AlarmState};

/// Relays alarms from its subordinate side (higher-numbered repeater
/// or the sensors) to its supervisor side (lower-numbered repeater or
/// the central unit), acknowledging every alarm it accepts.
pub struct Repeater {
    num: usize,
    priority: usize,
    collision: usize,
    alarms: Vec<ComponentId>,
    book: Arc<AlarmBook>,
}

impl Repeater {
    /// Create repeater `num` (1-based).
    #[must_use]
    pub fn new(num: usize, book: Arc<AlarmBook>) -> Self {
        Self {
            num,
            priority: 0,
            collision: 0,
            alarms: Vec::new(),
            book,
        }
    }

    fn add_alarm(&mut self, origin: ComponentId) {
        if !self.alarms.contains(&origin) {
            self.alarms.push(origin);
        }
    }

    fn supervisor(&self) -> ComponentId {
        if self.num == 1 {
            central_id()
        } else {
            repeater_id(self.num - 1)
        }
    }
}

impl StateProtocol for Repeater {
    type State = AlarmState;

    fn id(&self) -> String {
        format!("Repeater{}", self.num)
    }

    fn act_with_state(
        &mut self,
        view: &mut SlotView<'_>,
        state: AlarmState,
    ) -> Result<AlarmState, ContractViolation> {
        match state {
            AlarmState::InitialRep => {
                view.listen()?;
                Ok(AlarmState::WaitForAlarmRep)
            }

            AlarmState::WaitForAlarmRep => {
                if let Some(&Action::Received { message, .. }) = view.previous_action() {
                    if let Some(envelope) = self.book.envelope(message).copied() {
                        if envelope.kind == MessageKind::Alarm && envelope.to == view.component() {
                            // An alarm for us: acknowledge it without
                            // carrier sensing and remember its origin
                            // for forwarding.
                            let reply = self.book.message(
                                MessageKind::Ack,
                                view.component(),
                                envelope.from,
                                envelope.data,
                            );
                            self.add_alarm(envelope.data);
                            view.log(&format!(
                                "{}: added alarm to stack: {}",
                                self.id(),
                                self.book.name_of(envelope.data)
                            ));
                            view.send(reply, 0, false)?;
                            return Ok(AlarmState::ForwardAlarmsRep);
                        }
                    }
                }

                if self.alarms.is_empty() {
                    view.idle()?;
                    Ok(AlarmState::InitialRep)
                } else {
                    // No new alarm, but stored ones still need
                    // forwarding.
                    view.idle()?;
                    Ok(AlarmState::ForwardAlarmsRep)
                }
            }

            AlarmState::ForwardAlarmsRep => {
                // The priority is the base tic of the attempt: carrier
                // sensing only notices transmissions from earlier tics.
                let origin = *self
                    .alarms
                    .last()
                    .expect("forwarding state entered with an alarm stored");
                let forward =
                    self.book
                        .message(MessageKind::Alarm, view.component(), self.supervisor(), origin);
                view.send(forward, self.priority, true)?;
                Ok(AlarmState::AttemptedRep)
            }

            AlarmState::AttemptedRep => {
                if matches!(view.previous_action(), Some(Action::Cancelled { .. })) {
                    // The medium was busy; retry without recording a
                    // failure.
                    view.idle()?;
                    return Ok(AlarmState::ForwardAlarmsRep);
                }
                view.listen()?;
                Ok(AlarmState::WaitForAckRep)
            }

            AlarmState::WaitForAckRep => {
                if let Some(&Action::Received { message, .. }) = view.previous_action() {
                    if let Some(envelope) = self.book.envelope(message) {
                        if envelope.kind == MessageKind::Ack && envelope.to == view.component() {
                            // Acknowledged: drop the alarm and listen
                            // for more.
                            view.listen()?;
                            view.log(&format!("{}: latest alarm marked as done", self.id()));
                            self.alarms.pop();
                            self.priority = 0;
                            self.collision = 0;
                            return Ok(AlarmState::WaitForAlarmRep);
                        }
                    }
                }

                // Not acknowledged: record the failure and retry the
                // forward immediately.
                record_failure(self.num, &mut self.priority, &mut self.collision);
                self.act_with_state(view, AlarmState::ForwardAlarmsRep)
            }

            // Central-unit and sensor states never occur on a
            // repeater. Choosing no intention provokes the driver's
            // missing-intention check.
            _ => Ok(state),
        }
    }

    fn to_xml(&self) -> Vec<String> {
        vec![format!("<layer>{}</layer>", self.num)]
    }
}
