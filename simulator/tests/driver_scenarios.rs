//! Driver-level scenarios: full slot loops with real protocol
//! callbacks.

use slotcast_engine::{Action, ContractViolation, Semantics};
use slotcast_simulator::{Component, Simulator, SlotView, StateMachine, StateProtocol, TextOutput};
use slotcast_types::{MessageId, TrivialTopology};

struct Plain;

impl slotcast_types::Message for Plain {
    fn render(&self) -> String {
        "m".to_string()
    }
}

fn quiet_simulator(tics: usize) -> Simulator {
    let mut sim = Simulator::new(tics).unwrap();
    sim.use_output_module(Box::new(TextOutput::new(Vec::new())));
    sim.use_topology(Box::new(TrivialTopology));
    sim
}

/// A component that echoes in slot n+1 whatever it received in slot n
/// and listens otherwise.
struct EchoServer;

impl Component for EchoServer {
    fn id(&self) -> String {
        "EchoServer".to_string()
    }

    fn act(&mut self, view: &mut SlotView<'_>) -> Result<(), ContractViolation> {
        if let Some(&Action::Received { message, .. }) = view.previous_action() {
            return view.send(message, 0, true);
        }
        view.listen()
    }
}

/// Scenario: a lone echo server in a trivial topology observes silence
/// in every slot and never transitions to sending.
#[test]
fn idle_echo_observes_silence_forever() {
    let mut sim = quiet_simulator(1);
    sim.register_message(Box::new(Plain));
    let id = sim.register_component(Box::new(EchoServer)).unwrap();

    for slot in 0..3 {
        sim.run_single(3).unwrap();
        let state = sim.previous_state().unwrap();
        assert_eq!(state.get(id).unwrap(), &Action::Silence, "slot {slot}");
    }
    sim.end_single().unwrap();
}

/// Scenario: an echo client sending in slot 0 is answered by the echo
/// server in slot 1.
#[test]
fn successful_receive_roundtrip() {
    struct EchoClient {
        message: MessageId,
    }

    impl Component for EchoClient {
        fn id(&self) -> String {
            "EchoClient".to_string()
        }

        fn act(&mut self, view: &mut SlotView<'_>) -> Result<(), ContractViolation> {
            if view.slot_number() == 0 {
                return view.send(self.message, 0, true);
            }
            view.listen()
        }
    }

    let mut sim = quiet_simulator(1);
    let m = sim.register_message(Box::new(Plain));
    let client = sim
        .register_component(Box::new(EchoClient { message: m }))
        .unwrap();
    let server = sim.register_component(Box::new(EchoServer)).unwrap();

    sim.run(2).unwrap();
    let state = sim.previous_state().unwrap();
    // Slot 1: the server echoes what it received in slot 0 and the
    // client hears it back.
    assert_eq!(
        state.get(server).unwrap(),
        &Action::Sent { tic: 0, message: m }
    );
    assert_eq!(
        state.get(client).unwrap(),
        &Action::Received { tic: 0, message: m }
    );
}

/// The canonical semantics with an unresolved successor set trips the
/// single-outcome contract.
#[test]
fn ambiguous_successors_are_fatal() {
    struct Sender {
        message: MessageId,
    }

    impl Component for Sender {
        fn id(&self) -> String {
            "Sender".to_string()
        }

        fn act(&mut self, view: &mut SlotView<'_>) -> Result<(), ContractViolation> {
            view.send(self.message, 0, true)
        }
    }

    struct Listener;

    impl Component for Listener {
        fn id(&self) -> String {
            "Listener".to_string()
        }

        fn act(&mut self, view: &mut SlotView<'_>) -> Result<(), ContractViolation> {
            view.listen()
        }
    }

    let mut sim = quiet_simulator(4);
    sim.use_semantics(Semantics::Canonical);
    let m = sim.register_message(Box::new(Plain));
    sim.register_component(Box::new(Sender { message: m }))
        .unwrap();
    sim.register_component(Box::new(Listener)).unwrap();

    let err = sim.run(1).unwrap_err();
    assert_eq!(err.violation(), &ContractViolation::AmbiguousOutcome(2));
}

/// A state-machine component driven through the full loop, with an
/// immediate transition on the failure path.
#[test]
fn state_machine_over_slots() {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum SendState {
        Ready,
        Waiting,
        Done,
    }

    struct OneShot {
        message: MessageId,
    }

    impl StateProtocol for OneShot {
        type State = SendState;

        fn id(&self) -> String {
            "OneShot".to_string()
        }

        fn act_with_state(
            &mut self,
            view: &mut SlotView<'_>,
            state: SendState,
        ) -> Result<SendState, ContractViolation> {
            match state {
                SendState::Ready => {
                    view.send(self.message, 0, true)?;
                    Ok(SendState::Waiting)
                }
                SendState::Waiting => {
                    if matches!(view.previous_action(), Some(Action::Cancelled { .. })) {
                        // Retry immediately in the same slot.
                        return self.act_with_state(view, SendState::Ready);
                    }
                    view.idle()?;
                    Ok(SendState::Done)
                }
                SendState::Done => {
                    view.idle()?;
                    Ok(SendState::Done)
                }
            }
        }
    }

    let mut sim = quiet_simulator(1);
    let m = sim.register_message(Box::new(Plain));
    let id = sim
        .register_component(Box::new(StateMachine::new(OneShot { message: m }, SendState::Ready)))
        .unwrap();

    sim.run(3).unwrap();
    let state = sim.previous_state().unwrap();
    assert_eq!(state.get(id).unwrap(), &Action::Idle);
}
